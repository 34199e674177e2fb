//! Production run (salida) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ProductId;

/// Unit recorded for finished-product quantities
pub const PRODUCTION_UNIT: &str = "unidades";

/// A registered production event. Created exactly once per submitted run and
/// immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionRun {
    pub id: Uuid,
    /// Catalog product, absent for free-form manual runs
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub quantity_produced: Decimal,
    pub unit: String,
    pub sale_price: Decimal,
    pub description: Option<String>,
    pub consumed_materials: Vec<ConsumedMaterial>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

impl ProductionRun {
    /// Sale value of the run (quantity produced times unit sale price).
    pub fn production_value(&self) -> Decimal {
        self.quantity_produced * self.sale_price
    }
}

/// One raw-material deduction recorded against a production run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumedMaterial {
    pub material_id: Uuid,
    pub material_name: String,
    pub quantity_consumed: Decimal,
    /// Unit of measure of the material at deduction time
    pub unit: String,
}
