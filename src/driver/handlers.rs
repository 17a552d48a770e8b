//! Driver-facing routes: identity documents, vehicles, own orders.

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::info;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::middleware::current_user;
use crate::db::vehicle::NewVehicle;
use crate::db::AppState;
use crate::models::{OrderWithPassengers, UserInfo, Vehicle};
use crate::uploads::collect_multipart;
use crate::validation::{validate_required, ValidationErrors};
use crate::ErrorResponse;

/// Multipart schema stub for the document upload endpoint.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadDocumentRequest {
    /// One of `id`, `license`, `profile`
    #[schema(value_type = String)]
    pub r#type: String,
    #[schema(value_type = String, format = Binary)]
    pub document: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatusRequest {
    pub is_active: bool,
}

/// Upload an identity document (id card, license or profile image) for the
/// authenticated driver.
#[utoipa::path(
    post,
    path = "/api/documents/upload",
    tag = "Driver",
    request_body(content = inline(UploadDocumentRequest), content_type = "multipart/form-data"),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Document stored", body = UserInfo),
        (status = 400, description = "Missing file, bad type field or unsupported MIME", body = ErrorResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn upload_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: Multipart,
) -> impl Responder {
    let mut user = match current_user(&req, &state) {
        Ok(user) => user,
        Err(e) => return e.error_response(),
    };

    let form = match collect_multipart(payload, &state.uploads_dir, 1).await {
        Ok(form) => form,
        Err(message) => {
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
        }
    };

    let file = match form.files.first() {
        Some(file) => file,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(
                "No file uploaded or file type not supported",
            ));
        }
    };
    let url = format!("/uploads/{}", file.filename);

    match form.fields.get("type").map(String::as_str) {
        Some("id") => user.id_document_url = Some(url),
        Some("license") => user.license_document_url = Some(url),
        Some("profile") => user.profile_image_url = Some(url),
        _ => {
            form.discard_files(&state.uploads_dir);
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(
                "Document type must be one of: id, license, profile",
            ));
        }
    }

    match state.update_user(user) {
        Some(updated) => {
            info!("Stored {} document for user {}", file.original_filename, updated.id);
            HttpResponse::Ok().json(UserInfo::from(updated))
        }
        None => HttpResponse::NotFound().json(ErrorResponse::not_found("User not found")),
    }
}

/// Multipart schema stub for vehicle registration.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateVehicleRequest {
    #[schema(value_type = String)]
    pub r#type: String,
    #[schema(value_type = String)]
    pub model: String,
    #[schema(value_type = String)]
    pub year: String,
    #[schema(value_type = String)]
    pub plate_number: String,
    #[schema(value_type = Vec<String>, format = Binary)]
    pub photos: Vec<String>,
}

/// Register a vehicle with up to 10 photos.
#[utoipa::path(
    post,
    path = "/api/vehicles",
    tag = "Driver",
    request_body(content = inline(CreateVehicleRequest), content_type = "multipart/form-data"),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Vehicle created", body = Vehicle),
        (status = 400, description = "Missing fields or no usable photos", body = ErrorResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_vehicle(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: Multipart,
) -> impl Responder {
    let user = match current_user(&req, &state) {
        Ok(user) => user,
        Err(e) => return e.error_response(),
    };

    let form = match collect_multipart(payload, &state.uploads_dir, 10).await {
        Ok(form) => form,
        Err(message) => {
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
        }
    };

    if form.files.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(
            "No files uploaded or file types not supported",
        ));
    }

    let field = |name: &str| form.fields.get(name).cloned().unwrap_or_default();
    let vehicle_type = field("type");
    let model = field("model");
    let year = field("year");
    let plate_number = field("plateNumber");

    let mut errors = ValidationErrors::new();
    validate_required(&vehicle_type, "type", "Vehicle type", &mut errors);
    validate_required(&model, "model", "Model", &mut errors);
    validate_required(&year, "year", "Year", &mut errors);
    validate_required(&plate_number, "plateNumber", "Plate number", &mut errors);
    if let Err(message) = errors.into_result() {
        form.discard_files(&state.uploads_dir);
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }

    let vehicle = state.create_vehicle(NewVehicle {
        driver_id: user.id,
        vehicle_type,
        model,
        year,
        plate_number,
        photo_urls: form
            .files
            .iter()
            .map(|file| format!("/uploads/{}", file.filename))
            .collect(),
    });
    info!(
        "Vehicle {} registered for driver {} with {} photos",
        vehicle.id,
        user.id,
        vehicle.photo_urls.len()
    );

    HttpResponse::Created().json(vehicle)
}

/// Vehicles of the authenticated driver.
#[utoipa::path(
    get,
    path = "/api/vehicles/driver",
    tag = "Driver",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vehicle list", body = [Vehicle]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_driver_vehicles(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    match current_user(&req, &state) {
        Ok(user) => HttpResponse::Ok().json(state.get_vehicles_by_driver(user.id)),
        Err(e) => e.error_response(),
    }
}

/// Toggle a vehicle's active flag. Only the owning driver may do this.
#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}/status",
    tag = "Driver",
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = VehicleStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vehicle updated", body = Vehicle),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Vehicle not found or not owned by caller")
    )
)]
pub async fn update_vehicle_status(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<VehicleStatusRequest>,
) -> impl Responder {
    let user = match current_user(&req, &state) {
        Ok(user) => user,
        Err(e) => return e.error_response(),
    };

    match state.update_vehicle_status(path.into_inner(), user.id, body.is_active) {
        Some(vehicle) => HttpResponse::Ok().json(vehicle),
        None => HttpResponse::NotFound().json(ErrorResponse::not_found("Vehicle not found")),
    }
}

/// Orders of the authenticated driver, each with its passengers.
#[utoipa::path(
    get,
    path = "/api/driver/orders",
    tag = "Driver",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order list", body = [OrderWithPassengers]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_driver_orders(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let user = match current_user(&req, &state) {
        Ok(user) => user,
        Err(e) => return e.error_response(),
    };

    let orders: Vec<OrderWithPassengers> = state
        .get_orders_by_driver(user.id)
        .into_iter()
        .map(|order| {
            let passengers = state.get_passengers_by_order(order.id);
            OrderWithPassengers { order, passengers }
        })
        .collect();

    HttpResponse::Ok().json(orders)
}

/// Configure driver routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/documents/upload", web::post().to(upload_document))
        .route("/vehicles", web::post().to(create_vehicle))
        .route("/vehicles/driver", web::get().to(get_driver_vehicles))
        .route("/vehicles/{id}/status", web::patch().to(update_vehicle_status))
        .route("/driver/orders", web::get().to(get_driver_orders));
}
