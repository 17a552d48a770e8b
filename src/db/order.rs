//! Operation order and passenger storage operations.

use chrono::{DateTime, Utc};

use super::AppState;
use crate::models::{OperationOrder, Passenger};

/// Fields accepted when creating an operation order.
pub struct NewOperationOrder {
    pub driver_id: i32,
    pub vehicle_id: Option<i32>,
    pub from_city: String,
    pub to_city: String,
    pub departure_time: DateTime<Utc>,
    pub visa_type: String,
    pub trip_number: String,
}

/// Passenger fields as submitted with an order.
pub struct NewPassenger {
    pub name: String,
    pub id_number: String,
    pub nationality: String,
    pub phone: Option<String>,
}

impl AppState {
    pub fn get_operation_order(&self, id: i32) -> Option<OperationOrder> {
        self.orders.read().get(&id).cloned()
    }

    pub fn get_orders_by_driver(&self, driver_id: i32) -> Vec<OperationOrder> {
        let mut orders: Vec<OperationOrder> = self
            .orders
            .read()
            .values()
            .filter(|order| order.driver_id == driver_id)
            .cloned()
            .collect();
        orders.sort_by_key(|order| order.id);
        orders
    }

    pub fn get_all_orders(&self) -> Vec<OperationOrder> {
        let mut orders: Vec<OperationOrder> = self.orders.read().values().cloned().collect();
        orders.sort_by_key(|order| order.id);
        orders
    }

    /// Insert an order and its passengers in one step. The passenger list
    /// is fixed from this point on.
    pub fn create_operation_order(
        &self,
        new_order: NewOperationOrder,
        new_passengers: Vec<NewPassenger>,
    ) -> OperationOrder {
        let order = OperationOrder {
            id: self.allocate_id(),
            driver_id: new_order.driver_id,
            vehicle_id: new_order.vehicle_id,
            from_city: new_order.from_city,
            to_city: new_order.to_city,
            departure_time: new_order.departure_time,
            visa_type: new_order.visa_type,
            trip_number: new_order.trip_number,
            pdf_url: None,
            status: "pending".to_string(),
            created_at: chrono::Utc::now(),
        };

        let mut passengers = self.passengers.write();
        for new_passenger in new_passengers {
            let passenger = Passenger {
                id: self.allocate_id(),
                order_id: order.id,
                name: new_passenger.name,
                id_number: new_passenger.id_number,
                nationality: new_passenger.nationality,
                phone: new_passenger.phone,
            };
            passengers.insert(passenger.id, passenger);
        }
        drop(passengers);

        self.orders.write().insert(order.id, order.clone());
        order
    }

    pub fn get_passengers_by_order(&self, order_id: i32) -> Vec<Passenger> {
        let mut passengers: Vec<Passenger> = self
            .passengers
            .read()
            .values()
            .filter(|passenger| passenger.order_id == order_id)
            .cloned()
            .collect();
        passengers.sort_by_key(|passenger| passenger.id);
        passengers
    }

    /// Attach the generated PDF (or record a failed generation) on an
    /// existing order.
    pub fn update_order_document(
        &self,
        id: i32,
        pdf_url: Option<String>,
        status: &str,
    ) -> Option<OperationOrder> {
        let mut orders = self.orders.write();
        let order = orders.get_mut(&id)?;
        order.pdf_url = pdf_url;
        order.status = status.to_string();
        Some(order.clone())
    }
}
