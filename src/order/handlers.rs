//! Operation order routes: creation with the contract PDF side effect and
//! the passengers-by-order query.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use log::{error, info};

use super::models::{CreateOperationOrderRequest, CreateOrderResponse};
use crate::auth::middleware::current_user;
use crate::db::order::{NewOperationOrder, NewPassenger};
use crate::db::AppState;
use crate::models::{OrderWithPassengers, Passenger, User};
use crate::pdf::{compose_contract, ContractGenerator, PdfError};
use crate::validation::{
    validate_passenger_count, validate_phone_optional, validate_required, ValidationErrors,
};
use crate::ErrorResponse;

fn validate_order_request(
    body: &CreateOperationOrderRequest,
) -> Result<DateTime<Utc>, String> {
    let mut errors = ValidationErrors::new();
    validate_required(&body.from_city, "fromCity", "Departure city", &mut errors);
    validate_required(&body.to_city, "toCity", "Destination city", &mut errors);
    validate_required(&body.visa_type, "visaType", "Visa type", &mut errors);
    validate_required(&body.trip_number, "tripNumber", "Trip number", &mut errors);
    validate_passenger_count(body.passengers.len(), "passengers", &mut errors);

    for (i, passenger) in body.passengers.iter().enumerate() {
        let field = |name: &str| format!("passengers[{}].{}", i, name);
        validate_required(&passenger.name, &field("name"), "Passenger name", &mut errors);
        validate_required(
            &passenger.id_number,
            &field("idNumber"),
            "Passenger ID number",
            &mut errors,
        );
        validate_required(
            &passenger.nationality,
            &field("nationality"),
            "Passenger nationality",
            &mut errors,
        );
        if let Some(phone) = &passenger.phone {
            validate_phone_optional(phone, &field("phone"), &mut errors);
        }
    }

    let departure_time = DateTime::parse_from_rfc3339(&body.departure_time)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut errors = ValidationErrors::new();
            errors.add(crate::validation::ValidationError::new(
                "departureTime",
                "Invalid date format",
            ));
            errors.to_message()
        });

    errors.into_result()?;
    departure_time
}

/// Run the contract pipeline for a freshly created order. Failure is
/// logged and recorded on the order; it never propagates to the caller.
fn generate_contract(
    state: &AppState,
    order: &crate::models::OperationOrder,
    driver: &User,
) -> Result<String, PdfError> {
    let passengers = state.get_passengers_by_order(order.id);
    let vehicle = order.vehicle_id.and_then(|id| state.get_vehicle(id));

    let data = compose_contract(order, driver, vehicle.as_ref(), &passengers);
    let generator = ContractGenerator::new()?;
    let contract = generator.generate(&data, &state.typst_bin, &state.uploads_dir)?;
    info!(
        "Contract for order {} rendered: {} ({} bytes)",
        order.id, contract.filename, contract.size_bytes
    );
    Ok(format!("/uploads/{}", contract.filename))
}

/// Create an operation order. The passenger list is persisted with the
/// order; the contract PDF is generated afterwards and a failure there
/// still answers 201 with the order in `error` status.
#[utoipa::path(
    post,
    path = "/api/operation-orders",
    tag = "Orders",
    request_body = CreateOperationOrderRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Order created (PDF may have failed, see status)", body = CreateOrderResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_operation_order(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateOperationOrderRequest>,
) -> impl Responder {
    let user = match current_user(&req, &state) {
        Ok(user) => user,
        Err(e) => return e.error_response(),
    };

    let departure_time = match validate_order_request(&body) {
        Ok(dt) => dt,
        Err(message) => {
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
        }
    };

    let body = body.into_inner();
    info!(
        "Creating order {} -> {} with {} passengers for driver {}",
        body.from_city,
        body.to_city,
        body.passengers.len(),
        user.id
    );

    let order = state.create_operation_order(
        NewOperationOrder {
            driver_id: user.id,
            vehicle_id: body.vehicle_id,
            from_city: body.from_city,
            to_city: body.to_city,
            departure_time,
            visa_type: body.visa_type,
            trip_number: body.trip_number,
        },
        body.passengers
            .into_iter()
            .map(|p| NewPassenger {
                name: p.name,
                id_number: p.id_number,
                nationality: p.nationality,
                phone: p.phone,
            })
            .collect(),
    );

    let (updated, pdf_error) = match generate_contract(&state, &order, &user) {
        Ok(pdf_url) => (
            state.update_order_document(order.id, Some(pdf_url), "active"),
            None,
        ),
        Err(e) => {
            error!("Contract generation failed for order {}: {}", order.id, e);
            (
                state.update_order_document(order.id, None, "error"),
                Some(e.to_string()),
            )
        }
    };

    let order = updated.unwrap_or(order);
    let passengers = state.get_passengers_by_order(order.id);
    HttpResponse::Created().json(CreateOrderResponse {
        order: OrderWithPassengers { order, passengers },
        error: pdf_error,
    })
}

/// Passengers of one order.
#[utoipa::path(
    get,
    path = "/api/operation-orders/{id}/passengers",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Passenger list", body = [Passenger]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order_passengers(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> impl Responder {
    if let Err(e) = current_user(&req, &state) {
        return e.error_response();
    }

    let order_id = path.into_inner();
    if state.get_operation_order(order_id).is_none() {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Order not found"));
    }
    HttpResponse::Ok().json(state.get_passengers_by_order(order_id))
}

/// Configure order routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/operation-orders", web::post().to(create_operation_order))
        .route(
            "/operation-orders/{id}/passengers",
            web::get().to(get_order_passengers),
        );
}
