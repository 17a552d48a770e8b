//! Application state and storage operations.
//!
//! The store is a set of in-memory maps guarded by `parking_lot` locks.
//! It is a demo stand-in: nothing survives a restart and lookups beyond
//! the primary key are linear scans. Operations are split per domain:
//! - `user` - accounts and the driver approval workflow
//! - `vehicle` - vehicles owned by drivers
//! - `order` - operation orders and their passengers

pub mod order;
pub mod user;
pub mod vehicle;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI32, Ordering};

use parking_lot::RwLock;

use crate::models::{OperationOrder, Passenger, User, Vehicle};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

pub struct AppState {
    pub(crate) users: RwLock<HashMap<i32, User>>,
    pub(crate) vehicles: RwLock<HashMap<i32, Vehicle>>,
    pub(crate) orders: RwLock<HashMap<i32, OperationOrder>>,
    pub(crate) passengers: RwLock<HashMap<i32, Passenger>>,
    next_id: AtomicI32,
    /// Directory where uploaded files and generated PDFs land.
    pub uploads_dir: PathBuf,
    /// Typst binary used by the contract renderer.
    pub typst_bin: String,
}

impl AppState {
    pub fn new() -> Self {
        let uploads_dir =
            std::env::var("UPLOADS_DIR").unwrap_or_else(|_| String::from("./uploads"));
        let typst_bin = std::env::var("TYPST_BIN").unwrap_or_else(|_| String::from("typst"));
        Self::with_config(PathBuf::from(uploads_dir), typst_bin)
    }

    /// Build a state with explicit paths. Used directly by tests.
    pub fn with_config(uploads_dir: PathBuf, typst_bin: String) -> Self {
        let state = Self {
            users: RwLock::new(HashMap::new()),
            vehicles: RwLock::new(HashMap::new()),
            orders: RwLock::new(HashMap::new()),
            passengers: RwLock::new(HashMap::new()),
            next_id: AtomicI32::new(1),
            uploads_dir,
            typst_bin,
        };
        state.seed_default_admin();
        state
    }

    pub(crate) fn allocate_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Seed the default admin account so a fresh instance is usable.
    fn seed_default_admin(&self) {
        let hash = bcrypt::hash(DEFAULT_ADMIN_PASSWORD, bcrypt::DEFAULT_COST)
            .expect("bcrypt hashing of the default admin password cannot fail");
        let admin = User {
            id: self.allocate_id(),
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: hash,
            role: "admin".to_string(),
            status: "active".to_string(),
            is_approved: true,
            full_name: Some("Admin User".to_string()),
            id_number: None,
            license_number: None,
            id_document_url: None,
            license_document_url: None,
            profile_image_url: None,
            created_at: chrono::Utc::now(),
        };
        self.users.write().insert(admin.id, admin);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
