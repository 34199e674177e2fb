//! Business logic services for the Water Plant Inventory service

pub mod auth;
pub mod materials;
pub mod production;
pub mod reporting;

pub use auth::AuthService;
pub use materials::MaterialService;
pub use production::ProductionService;
pub use reporting::ReportingService;
