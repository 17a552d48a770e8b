use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod admin;
pub mod auth;
pub mod db;
pub mod driver;
pub mod models;
pub mod order;
pub mod pdf;
pub mod uploads;
pub mod validation;

pub use crate::db::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::register,
        crate::auth::handlers::refresh_token,
        crate::auth::handlers::get_current_user,
        crate::driver::handlers::upload_document,
        crate::driver::handlers::create_vehicle,
        crate::driver::handlers::get_driver_vehicles,
        crate::driver::handlers::update_vehicle_status,
        crate::driver::handlers::get_driver_orders,
        crate::order::handlers::create_operation_order,
        crate::order::handlers::get_order_passengers,
        crate::admin::handlers::get_pending_drivers,
        crate::admin::handlers::get_active_drivers,
        crate::admin::handlers::get_suspended_drivers,
        crate::admin::handlers::update_driver_status,
        crate::admin::handlers::get_driver_details,
        crate::admin::handlers::get_all_orders,
    ),
    components(
        schemas(
            models::UserInfo,
            models::Vehicle,
            models::OperationOrder,
            models::Passenger,
            models::OrderWithPassengers,
            models::AdminOrderView,
            models::DriverSummary,
            models::DriverDetails,
            auth::model::LoginRequest,
            auth::model::RegisterRequest,
            auth::model::RefreshRequest,
            auth::model::TokenResponse,
            order::models::CreateOperationOrderRequest,
            order::models::PassengerRequest,
            order::models::CreateOrderResponse,
            driver::handlers::VehicleStatusRequest,
            admin::handlers::DriverStatusRequest,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, registration and token refresh."),
        (name = "Driver", description = "Documents, vehicles and own orders."),
        (name = "Orders", description = "Operation orders and contract generation."),
        (name = "Admin", description = "Driver approval workflow and fleet browsing.")
    )
)]
struct ApiDoc;

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app_state = web::Data::new(AppState::new());
    std::fs::create_dir_all(&app_state.uploads_dir)?;

    let prometheus = PrometheusMetricsBuilder::new("lightning_road_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!("Starting server at http://0.0.0.0:8080");

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let uploads_dir = app_state.uploads_dir.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:8080")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(
                web::scope("/api")
                    .configure(auth::handlers::config)
                    .configure(driver::handlers::config)
                    .configure(order::handlers::config)
                    .configure(admin::handlers::config),
            )
            .service(actix_files::Files::new("/uploads", uploads_dir))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
