//! HTTP handlers for the Water Plant Inventory API

pub mod auth;
pub mod health;
pub mod materials;
pub mod production;
pub mod reports;

pub use auth::{login, refresh, register};
pub use health::health_check;
pub use materials::{create_material, list_entries, list_materials, record_entry, update_material};
pub use production::{create_run, list_products, list_runs};
pub use reports::{get_critical_materials, get_dashboard, get_reorder_report};
