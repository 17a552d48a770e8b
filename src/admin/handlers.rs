//! Admin routes: driver approval workflow and fleet-wide order browsing.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::info;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::middleware::require_admin;
use crate::db::AppState;
use crate::models::{
    AdminOrderView, DriverDetails, DriverSummary, OrderWithPassengers, UserInfo,
};
use crate::ErrorResponse;

const DRIVER_STATUSES: &[&str] = &["pending", "active", "suspended"];

#[derive(Debug, Deserialize, ToSchema)]
pub struct DriverStatusRequest {
    #[schema(example = "active")]
    pub status: String,
}

fn drivers_by_status(
    req: &HttpRequest,
    state: &web::Data<AppState>,
    status: &str,
) -> HttpResponse {
    if let Err(e) = require_admin(req, state) {
        return e.error_response();
    }
    let drivers: Vec<UserInfo> = state
        .get_drivers_by_status(status)
        .into_iter()
        .map(UserInfo::from)
        .collect();
    HttpResponse::Ok().json(drivers)
}

/// Drivers awaiting approval.
#[utoipa::path(
    get,
    path = "/api/admin/pending-drivers",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending drivers", body = [UserInfo]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn get_pending_drivers(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    drivers_by_status(&req, &state, "pending")
}

/// Approved drivers.
#[utoipa::path(
    get,
    path = "/api/admin/active-drivers",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active drivers", body = [UserInfo]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn get_active_drivers(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    drivers_by_status(&req, &state, "active")
}

/// Suspended drivers.
#[utoipa::path(
    get,
    path = "/api/admin/suspended-drivers",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Suspended drivers", body = [UserInfo]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn get_suspended_drivers(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> impl Responder {
    drivers_by_status(&req, &state, "suspended")
}

/// Transition a driver between `pending`, `active` and `suspended`.
/// `isApproved` follows the status.
#[utoipa::path(
    post,
    path = "/api/admin/drivers/{id}/status",
    tag = "Admin",
    params(("id" = i32, Path, description = "Driver ID")),
    request_body = DriverStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Driver updated", body = UserInfo),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Driver not found")
    )
)]
pub async fn update_driver_status(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<DriverStatusRequest>,
) -> impl Responder {
    if let Err(e) = require_admin(&req, &state) {
        return e.error_response();
    }

    if !DRIVER_STATUSES.contains(&body.status.as_str()) {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request("Invalid status"));
    }

    let driver_id = path.into_inner();
    match state.update_driver_status(driver_id, &body.status) {
        Some(driver) => {
            info!("Driver {} moved to status {}", driver_id, driver.status);
            HttpResponse::Ok().json(UserInfo::from(driver))
        }
        None => HttpResponse::NotFound().json(ErrorResponse::not_found("Driver not found")),
    }
}

/// Full record of one driver: profile, vehicles, orders with passengers.
#[utoipa::path(
    get,
    path = "/api/admin/driver/{id}/details",
    tag = "Admin",
    params(("id" = i32, Path, description = "Driver ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Driver details", body = DriverDetails),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Driver not found")
    )
)]
pub async fn get_driver_details(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> impl Responder {
    if let Err(e) = require_admin(&req, &state) {
        return e.error_response();
    }

    let driver = match state.get_user(path.into_inner()) {
        Some(user) if user.role == "driver" => user,
        _ => {
            return HttpResponse::NotFound().json(ErrorResponse::not_found("Driver not found"));
        }
    };

    let orders: Vec<OrderWithPassengers> = state
        .get_orders_by_driver(driver.id)
        .into_iter()
        .map(|order| {
            let passengers = state.get_passengers_by_order(order.id);
            OrderWithPassengers { order, passengers }
        })
        .collect();

    HttpResponse::Ok().json(DriverDetails {
        vehicles: state.get_vehicles_by_driver(driver.id),
        driver: UserInfo::from(driver),
        orders,
    })
}

/// Every order in the system with passengers and a driver summary.
#[utoipa::path(
    get,
    path = "/api/admin/all-orders",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All orders", body = [AdminOrderView]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn get_all_orders(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    if let Err(e) = require_admin(&req, &state) {
        return e.error_response();
    }

    let orders: Vec<AdminOrderView> = state
        .get_all_orders()
        .into_iter()
        .map(|order| {
            let passengers = state.get_passengers_by_order(order.id);
            let driver = state.get_user(order.driver_id);
            AdminOrderView {
                passengers,
                driver: DriverSummary {
                    full_name: driver.as_ref().and_then(|d| d.full_name.clone()),
                    username: driver.map(|d| d.username).unwrap_or_default(),
                },
                order,
            }
        })
        .collect();

    HttpResponse::Ok().json(orders)
}

/// Configure admin routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/pending-drivers", web::get().to(get_pending_drivers))
            .route("/active-drivers", web::get().to(get_active_drivers))
            .route("/suspended-drivers", web::get().to(get_suspended_drivers))
            .route("/drivers/{id}/status", web::post().to(update_driver_status))
            .route("/driver/{id}/details", web::get().to(get_driver_details))
            .route("/all-orders", web::get().to(get_all_orders)),
    );
}
