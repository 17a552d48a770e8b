use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account record held in the in-memory store.
///
/// Drivers start out with status `pending` and are moved to `active` or
/// `suspended` by an admin. The bcrypt hash never leaves the store; API
/// responses use [`UserInfo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub status: String,
    pub is_approved: bool,
    pub full_name: Option<String>,
    pub id_number: Option<String>,
    pub license_number: Option<String>,
    pub id_document_url: Option<String>,
    pub license_document_url: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User as exposed by the API (no password hash).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    #[schema(example = "driver")]
    pub role: String,
    #[schema(example = "pending")]
    pub status: String,
    pub is_approved: bool,
    pub full_name: Option<String>,
    pub id_number: Option<String>,
    pub license_number: Option<String>,
    pub id_document_url: Option<String>,
    pub license_document_url: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            status: user.status,
            is_approved: user.is_approved,
            full_name: user.full_name,
            id_number: user.id_number,
            license_number: user.license_number,
            id_document_url: user.id_document_url,
            license_document_url: user.license_document_url,
            profile_image_url: user.profile_image_url,
            created_at: user.created_at,
        }
    }
}

/// Vehicle registered by a driver. `photo_urls` keeps upload order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i32,
    pub driver_id: i32,
    #[serde(rename = "type")]
    #[schema(example = "bus")]
    pub vehicle_type: String,
    #[schema(example = "Mercedes Travego")]
    pub model: String,
    #[schema(example = "2022")]
    pub year: String,
    #[schema(example = "ABC-1234")]
    pub plate_number: String,
    pub photo_urls: Vec<String>,
    pub registration_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Trip manifest linking a driver, a route, and a passenger list.
///
/// `status` moves `pending` -> `active` once the contract PDF is attached,
/// or to `error` if generation failed. The passenger list is fixed at
/// creation time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationOrder {
    pub id: i32,
    pub driver_id: i32,
    pub vehicle_id: Option<i32>,
    #[schema(example = "Riyadh")]
    pub from_city: String,
    #[schema(example = "Jeddah")]
    pub to_city: String,
    pub departure_time: DateTime<Utc>,
    #[schema(example = "umrah")]
    pub visa_type: String,
    #[schema(example = "TR-1042")]
    pub trip_number: String,
    pub pdf_url: Option<String>,
    #[schema(example = "active")]
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Passenger row belonging to exactly one operation order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub id: i32,
    pub order_id: i32,
    pub name: String,
    pub id_number: String,
    pub nationality: String,
    pub phone: Option<String>,
}

/// Order together with its passengers, as returned by the listing routes.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithPassengers {
    #[serde(flatten)]
    pub order: OperationOrder,
    pub passengers: Vec<Passenger>,
}

/// Driver summary attached to admin order listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverSummary {
    pub full_name: Option<String>,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderView {
    #[serde(flatten)]
    pub order: OperationOrder,
    pub passengers: Vec<Passenger>,
    pub driver: DriverSummary,
}

/// Full driver record for the admin detail view.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverDetails {
    pub driver: UserInfo,
    pub vehicles: Vec<Vehicle>,
    pub orders: Vec<OrderWithPassengers>,
}
