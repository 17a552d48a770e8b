//! Vehicle storage operations.

use super::AppState;
use crate::models::Vehicle;

/// Fields accepted when registering a vehicle.
pub struct NewVehicle {
    pub driver_id: i32,
    pub vehicle_type: String,
    pub model: String,
    pub year: String,
    pub plate_number: String,
    pub photo_urls: Vec<String>,
}

impl AppState {
    pub fn get_vehicle(&self, id: i32) -> Option<Vehicle> {
        self.vehicles.read().get(&id).cloned()
    }

    pub fn get_vehicles_by_driver(&self, driver_id: i32) -> Vec<Vehicle> {
        let mut vehicles: Vec<Vehicle> = self
            .vehicles
            .read()
            .values()
            .filter(|vehicle| vehicle.driver_id == driver_id)
            .cloned()
            .collect();
        vehicles.sort_by_key(|vehicle| vehicle.id);
        vehicles
    }

    pub fn create_vehicle(&self, new_vehicle: NewVehicle) -> Vehicle {
        let vehicle = Vehicle {
            id: self.allocate_id(),
            driver_id: new_vehicle.driver_id,
            vehicle_type: new_vehicle.vehicle_type,
            model: new_vehicle.model,
            year: new_vehicle.year,
            plate_number: new_vehicle.plate_number,
            photo_urls: new_vehicle.photo_urls,
            registration_url: None,
            is_active: true,
            created_at: chrono::Utc::now(),
        };
        self.vehicles.write().insert(vehicle.id, vehicle.clone());
        vehicle
    }

    /// Toggle a vehicle's active flag. The vehicle must belong to the given
    /// driver; otherwise this behaves as not-found.
    pub fn update_vehicle_status(
        &self,
        id: i32,
        driver_id: i32,
        is_active: bool,
    ) -> Option<Vehicle> {
        let mut vehicles = self.vehicles.write();
        let vehicle = vehicles.get_mut(&id)?;
        if vehicle.driver_id != driver_id {
            return None;
        }
        vehicle.is_active = is_active;
        Some(vehicle.clone())
    }
}
