//! Contract composer.
//!
//! Gathers a denormalized snapshot of an operation order (date in the
//! target locale, route, driver identity, vehicle, full passenger list),
//! renders the bilingual Typst source from the template in `static/`, and
//! drives the engine. Output files are named `order_{id}_{timestamp}.pdf`
//! so regeneration produces a new file instead of overwriting.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Datelike, Utc};

use super::layout::{section_height, wrap_paragraph, CONTENT_WIDTH};
use super::{engine, GeneratedContract, PdfError};
use crate::models::{OperationOrder, Passenger, User, Vehicle};

const TEMPLATE_FILE: &str = "transport_contract.typ";
const BODY_FONT_SIZE: f32 = 10.0;

/// Contract preamble mandated by article 39 of the specialized transport
/// regulations, rendered right-to-left above the detail boxes.
const CONTRACT_PREAMBLE: &[&str] = &[
    "تم ابرام هذا العقد بين المتعاقدين بناء على المادة (39) التاسعة و الثلاثون من اللائحة المنظمة لنشاط النقل المتخصص و تأجير و توجيه الحافلات",
    "و بناء على الفقرة (1) من المادة (39) و التي تنص على ان يجب على الناقل ابرام عقد نقل مع الاطراف المحددين في المادة (40) قبل تنفيذ عمليات النقل على الطرق البرية",
    "الطرف الاول : شركة صاعقة الطريق للنقل البري (شخص واحد)",
];

/// Passenger snapshot embedded in the contract.
#[derive(Debug, Clone)]
pub struct ContractPassenger {
    pub name: String,
    pub id_number: String,
    pub nationality: String,
}

/// Flat snapshot of everything the contract renders.
#[derive(Debug, Clone)]
pub struct ContractData {
    pub order_id: i32,
    pub date: String,
    pub from_city: String,
    pub to_city: String,
    pub visa_type: String,
    pub trip_number: String,
    pub driver_name: String,
    pub driver_id_number: String,
    pub driver_license_number: String,
    pub vehicle: String,
    pub passengers: Vec<ContractPassenger>,
}

/// Format a Gregorian date with Arabic month names (e.g. "14 يناير 2026").
pub fn format_arabic_date(date: &DateTime<Utc>) -> String {
    let months = [
        "يناير",
        "فبراير",
        "مارس",
        "أبريل",
        "مايو",
        "يونيو",
        "يوليو",
        "أغسطس",
        "سبتمبر",
        "أكتوبر",
        "نوفمبر",
        "ديسمبر",
    ];
    let month = months[(date.month0() as usize).min(months.len() - 1)];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Escape special characters for Typst strings.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
}

fn unknown_if_empty(value: Option<&String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => "-".to_string(),
    }
}

/// Assemble the denormalized snapshot from the persisted entities.
pub fn compose_contract(
    order: &OperationOrder,
    driver: &User,
    vehicle: Option<&Vehicle>,
    passengers: &[Passenger],
) -> ContractData {
    ContractData {
        order_id: order.id,
        date: format_arabic_date(&order.departure_time),
        from_city: order.from_city.clone(),
        to_city: order.to_city.clone(),
        visa_type: order.visa_type.clone(),
        trip_number: order.trip_number.clone(),
        driver_name: unknown_if_empty(driver.full_name.as_ref()),
        driver_id_number: unknown_if_empty(driver.id_number.as_ref()),
        driver_license_number: unknown_if_empty(driver.license_number.as_ref()),
        vehicle: vehicle
            .map(|v| format!("{} {} ({}) - {}", v.vehicle_type, v.model, v.year, v.plate_number))
            .unwrap_or_else(|| "-".to_string()),
        passengers: passengers
            .iter()
            .map(|p| ContractPassenger {
                name: p.name.clone(),
                id_number: p.id_number.clone(),
                nationality: p.nationality.clone(),
            })
            .collect(),
    }
}

/// Renders contracts from the Typst template in `static/`.
pub struct ContractGenerator {
    template: String,
}

impl ContractGenerator {
    pub fn new() -> Result<Self, PdfError> {
        let template_path = get_static_dir().join(TEMPLATE_FILE);
        let template = fs::read_to_string(&template_path).map_err(PdfError::TemplateIo)?;
        Ok(Self { template })
    }

    /// Render the contract and store it under `uploads_dir`.
    pub fn generate(
        &self,
        data: &ContractData,
        typst_bin: &str,
        uploads_dir: &Path,
    ) -> Result<GeneratedContract, PdfError> {
        let typst_source = self.render_source(data);

        let pdf = engine::render_pdf(typst_bin, &typst_source)?;

        fs::create_dir_all(uploads_dir).map_err(PdfError::StorePdf)?;
        let filename = format!(
            "order_{}_{}.pdf",
            data.order_id,
            Utc::now().timestamp_millis()
        );
        let output_path = uploads_dir.join(&filename);
        fs::write(&output_path, &pdf).map_err(PdfError::StorePdf)?;

        let size_bytes = fs::metadata(&output_path)
            .map_err(PdfError::StorePdf)?
            .len();
        if size_bytes == 0 {
            return Err(PdfError::EmptyOutput);
        }

        Ok(GeneratedContract {
            filename,
            size_bytes,
        })
    }

    /// Build the complete Typst source: pre-wrapped preamble lines, box
    /// heights estimated from line counts, then the template body.
    fn render_source(&self, data: &ContractData) -> String {
        let second_party = format!(
            "الطرف الثاني : {}",
            data.passengers
                .first()
                .map(|p| p.name.as_str())
                .unwrap_or("-")
        );

        let mut preamble_lines: Vec<String> = Vec::new();
        for paragraph in CONTRACT_PREAMBLE
            .iter()
            .copied()
            .chain(std::iter::once(second_party.as_str()))
        {
            for line in wrap_paragraph(paragraph, BODY_FONT_SIZE, CONTENT_WIDTH) {
                preamble_lines.push(line.text);
            }
        }

        let preamble = preamble_lines
            .iter()
            .map(|line| format!("    \"{}\",", escape_typst_string(line)))
            .collect::<Vec<_>>()
            .join("\n");

        let passengers = data
            .passengers
            .iter()
            .map(|p| {
                format!(
                    "    (name: \"{}\", id_number: \"{}\", nationality: \"{}\"),",
                    escape_typst_string(&p.name),
                    escape_typst_string(&p.id_number),
                    escape_typst_string(&p.nationality),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        // Three text rows per passenger, as in the rendered table. The box
        // must hold the full manifest; a 12-passenger box breaks across
        // pages instead of clipping rows.
        let passenger_box_height = section_height(data.passengers.len() * 3, BODY_FONT_SIZE);

        format!(
            r#"#let contract(
  meta: (
    date: "{date}",
    from_city: "{from_city}",
    to_city: "{to_city}",
    visa_type: "{visa_type}",
    trip_number: "{trip_number}",
  ),
  driver: (
    name: "{driver_name}",
    id_number: "{driver_id}",
    license_number: "{driver_license}",
    vehicle: "{vehicle}",
  ),
  preamble: (
{preamble}
  ),
  passengers: (
{passengers}
  ),
  passenger_box_height: {box_height}pt,
) = {{
{body}

#contract()
"#,
            date = escape_typst_string(&data.date),
            from_city = escape_typst_string(&data.from_city),
            to_city = escape_typst_string(&data.to_city),
            visa_type = escape_typst_string(&data.visa_type),
            trip_number = escape_typst_string(&data.trip_number),
            driver_name = escape_typst_string(&data.driver_name),
            driver_id = escape_typst_string(&data.driver_id_number),
            driver_license = escape_typst_string(&data.driver_license_number),
            vehicle = escape_typst_string(&data.vehicle),
            preamble = preamble,
            passengers = passengers,
            box_height = passenger_box_height,
            body = self.extract_function_body(),
        )
    }

    /// Extract the function body from the template (everything between the
    /// signature's closing `) = {` and the trailing `#contract()` call).
    fn extract_function_body(&self) -> String {
        if let Some(start) = self.template.find(") = {") {
            let body_start = start + 5;
            if let Some(end) = self.template.rfind("#contract()") {
                return self.template[body_start..end].to_string();
            }
        }
        self.template.clone()
    }
}

/// Get the static assets directory path.
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_data() -> ContractData {
        ContractData {
            order_id: 17,
            date: "1 يناير 2026".to_string(),
            from_city: "Riyadh".to_string(),
            to_city: "Jeddah".to_string(),
            visa_type: "umrah".to_string(),
            trip_number: "TR-1042".to_string(),
            driver_name: "Ahmed".to_string(),
            driver_id_number: "1012345678".to_string(),
            driver_license_number: "L-556677".to_string(),
            vehicle: "bus Mercedes Travego (2022) - ABC-1234".to_string(),
            passengers: vec![ContractPassenger {
                name: "Said \"Abu\" Karim".to_string(),
                id_number: "2098765432".to_string(),
                nationality: "Egyptian".to_string(),
            }],
        }
    }

    #[test]
    fn test_new_generator_loads_template() {
        let result = ContractGenerator::new();
        assert!(result.is_ok());
    }

    #[test]
    fn test_format_arabic_date() {
        let date = chrono::Utc.with_ymd_and_hms(2026, 1, 14, 9, 30, 0).unwrap();
        assert_eq!(format_arabic_date(&date), "14 يناير 2026");
    }

    #[test]
    fn test_render_source_escapes_and_embeds() {
        let generator = ContractGenerator::new().unwrap();
        let source = generator.render_source(&sample_data());

        assert!(source.contains(r#"Said \"Abu\" Karim"#));
        assert!(source.contains("from_city: \"Riyadh\""));
        assert!(source.contains("trip_number: \"TR-1042\""));
        assert!(source.contains("#contract()"));
        // The second party line is emitted in display order (words reversed),
        // so the phrase appears with its words swapped.
        assert!(source.contains("الثاني الطرف"));
    }

    #[test]
    fn test_full_manifest_box_height_fits_every_passenger() {
        let mut data = sample_data();
        data.passengers = (0..12)
            .map(|i| ContractPassenger {
                name: format!("Passenger {}", i + 1),
                id_number: format!("20000000{:02}", i),
                nationality: "Saudi".to_string(),
            })
            .collect();

        let generator = ContractGenerator::new().unwrap();
        let source = generator.render_source(&data);

        // 12 passengers render as 36 rows; the emitted height is the full
        // uncapped estimate so no row is pushed outside the box.
        let expected = section_height(36, BODY_FONT_SIZE);
        assert!(source.contains(&format!("passenger_box_height: {}pt", expected)));
        for i in 1..=12 {
            assert!(source.contains(&format!("Passenger {}", i)));
        }
    }

    #[test]
    fn test_compose_contract_snapshot() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap();
        let order = OperationOrder {
            id: 5,
            driver_id: 2,
            vehicle_id: None,
            from_city: "Dammam".to_string(),
            to_city: "Riyadh".to_string(),
            departure_time: now,
            visa_type: "work".to_string(),
            trip_number: "TR-7".to_string(),
            pdf_url: None,
            status: "pending".to_string(),
            created_at: now,
        };
        let driver = User {
            id: 2,
            username: "driver1".to_string(),
            password: "hash".to_string(),
            role: "driver".to_string(),
            status: "active".to_string(),
            is_approved: true,
            full_name: Some("Driver One".to_string()),
            id_number: None,
            license_number: Some("L-1".to_string()),
            id_document_url: None,
            license_document_url: None,
            profile_image_url: None,
            created_at: now,
        };
        let passengers = vec![Passenger {
            id: 9,
            order_id: 5,
            name: "P1".to_string(),
            id_number: "1111111111".to_string(),
            nationality: "Saudi".to_string(),
            phone: None,
        }];

        let data = compose_contract(&order, &driver, None, &passengers);

        assert_eq!(data.order_id, 5);
        assert_eq!(data.date, "2 مارس 2026");
        assert_eq!(data.driver_name, "Driver One");
        // Missing identity fields fall back to a dash instead of failing.
        assert_eq!(data.driver_id_number, "-");
        assert_eq!(data.vehicle, "-");
        assert_eq!(data.passengers.len(), 1);
    }
}
