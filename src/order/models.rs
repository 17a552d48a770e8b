use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::OrderWithPassengers;

/// Passenger as submitted with an order.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassengerRequest {
    #[serde(default)]
    #[schema(example = "Said Karim")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "2098765432")]
    pub id_number: String,
    #[serde(default)]
    #[schema(example = "Egyptian")]
    pub nationality: String,
    pub phone: Option<String>,
}

/// Operation order creation payload. The passenger list is fixed at
/// creation; 1 to 12 passengers are accepted.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOperationOrderRequest {
    #[serde(default)]
    #[schema(example = "Riyadh")]
    pub from_city: String,
    #[serde(default)]
    #[schema(example = "Jeddah")]
    pub to_city: String,
    /// RFC 3339 timestamp
    #[serde(default)]
    #[schema(example = "2026-09-14T06:30:00Z")]
    pub departure_time: String,
    #[serde(default)]
    #[schema(example = "umrah")]
    pub visa_type: String,
    #[serde(default)]
    #[schema(example = "TR-1042")]
    pub trip_number: String,
    pub vehicle_id: Option<i32>,
    #[serde(default)]
    pub passengers: Vec<PassengerRequest>,
}

/// Response to order creation. `error` is only present when the contract
/// PDF could not be generated; the order itself was still created.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    #[serde(flatten)]
    pub order: OrderWithPassengers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
