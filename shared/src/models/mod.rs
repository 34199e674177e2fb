//! Domain models for the Water Plant Inventory service

mod material;
mod production;
mod recipe;
mod user;

pub use material::*;
pub use production::*;
pub use recipe::*;
pub use user::*;
