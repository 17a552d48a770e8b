//! User and driver-approval storage operations.

use super::AppState;
use crate::models::User;

/// Fields accepted when creating an account.
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: String,
    pub full_name: Option<String>,
    pub id_number: Option<String>,
    pub license_number: Option<String>,
}

impl AppState {
    pub fn get_user(&self, id: i32) -> Option<User> {
        self.users.read().get(&id).cloned()
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    /// Insert a new account. Admins are approved immediately, drivers wait
    /// for an admin status transition.
    pub fn create_user(&self, new_user: NewUser) -> User {
        let is_admin = new_user.role == "admin";
        let user = User {
            id: self.allocate_id(),
            username: new_user.username,
            password: new_user.password,
            role: new_user.role,
            status: if is_admin { "active" } else { "pending" }.to_string(),
            is_approved: is_admin,
            full_name: new_user.full_name,
            id_number: new_user.id_number,
            license_number: new_user.license_number,
            id_document_url: None,
            license_document_url: None,
            profile_image_url: None,
            created_at: chrono::Utc::now(),
        };
        self.users.write().insert(user.id, user.clone());
        user
    }

    /// Replace a stored user wholesale. Returns the stored copy, or `None`
    /// if the id is unknown.
    pub fn update_user(&self, user: User) -> Option<User> {
        let mut users = self.users.write();
        if !users.contains_key(&user.id) {
            return None;
        }
        users.insert(user.id, user.clone());
        Some(user)
    }

    /// Drivers currently in the given status (`pending`, `active`, `suspended`).
    pub fn get_drivers_by_status(&self, status: &str) -> Vec<User> {
        let mut drivers: Vec<User> = self
            .users
            .read()
            .values()
            .filter(|user| user.role == "driver" && user.status == status)
            .cloned()
            .collect();
        drivers.sort_by_key(|user| user.id);
        drivers
    }

    /// Transition a driver between statuses. `is_approved` is derived from
    /// the new status. Returns `None` for unknown ids or non-driver accounts.
    pub fn update_driver_status(&self, id: i32, status: &str) -> Option<User> {
        let mut users = self.users.write();
        let user = users.get_mut(&id)?;
        if user.role != "driver" {
            return None;
        }
        user.status = status.to_string();
        user.is_approved = status == "active";
        Some(user.clone())
    }
}
