//! Shared types and domain logic for the Water Plant Inventory service
//!
//! This crate contains the models and the pure stock computations (reorder
//! policy, recipe-driven deduction planning) shared between the backend and
//! the frontend (via WASM), so both sides apply identical rules.

pub mod deduction;
pub mod models;
pub mod reorder;
pub mod types;
pub mod validation;

pub use deduction::*;
pub use models::*;
pub use reorder::*;
pub use types::*;
pub use validation::*;
