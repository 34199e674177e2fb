//! Database models for the Water Plant Inventory service
//!
//! Re-exports the shared domain models and adds the sqlx row mirrors the
//! services map onto them. The shared crate stays sqlx-free so the wasm
//! module can use it; the FromRow derives live here instead.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

pub use shared::models::*;

/// Raw material row from database
#[derive(Debug, FromRow)]
pub struct MaterialRow {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub current_stock: Decimal,
    pub minimum_stock: Decimal,
    pub average_consumption: Decimal,
    pub unit_cost: Decimal,
    pub unit_of_measure: String,
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MaterialRow> for RawMaterial {
    fn from(row: MaterialRow) -> Self {
        RawMaterial {
            id: row.id,
            name: row.name,
            category: row.category,
            current_stock: row.current_stock,
            minimum_stock: row.minimum_stock,
            average_consumption: row.average_consumption,
            unit_cost: row.unit_cost,
            unit_of_measure: row.unit_of_measure,
            supplier: row.supplier,
            created_at: row.created_at,
        }
    }
}

/// Replenishment entry row from database
#[derive(Debug, FromRow)]
pub struct EntryRow {
    pub id: Uuid,
    pub material_id: Uuid,
    pub material_name: String,
    pub quantity: Decimal,
    pub minimum_stock: Decimal,
    pub unit_cost: Decimal,
    pub unit_of_measure: String,
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

impl From<EntryRow> for MaterialEntry {
    fn from(row: EntryRow) -> Self {
        MaterialEntry {
            id: row.id,
            material_id: row.material_id,
            material_name: row.material_name,
            quantity: row.quantity,
            minimum_stock: row.minimum_stock,
            unit_cost: row.unit_cost,
            unit_of_measure: row.unit_of_measure,
            supplier: row.supplier,
            created_at: row.created_at,
            created_by: row.created_by,
        }
    }
}

/// Production run header row from database; consumed lines live in
/// `production_run_materials` and are attached separately
#[derive(Debug, FromRow)]
pub struct RunRow {
    pub id: Uuid,
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity_produced: Decimal,
    pub unit: String,
    pub sale_price: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

impl RunRow {
    /// Attach consumed lines and convert to the shared model
    pub fn into_run(self, consumed_materials: Vec<ConsumedMaterial>) -> ProductionRun {
        ProductionRun {
            id: self.id,
            product_id: self.product_id.as_deref().and_then(ProductId::parse),
            product_name: self.product_name,
            quantity_produced: self.quantity_produced,
            unit: self.unit,
            sale_price: self.sale_price,
            description: self.description,
            consumed_materials,
            created_at: self.created_at,
            created_by: self.created_by,
        }
    }
}

/// Consumed-material line row from database
#[derive(Debug, FromRow)]
pub struct RunLineRow {
    pub run_id: Uuid,
    pub material_id: Uuid,
    pub material_name: String,
    pub quantity_consumed: Decimal,
    pub unit: String,
}

impl From<RunLineRow> for ConsumedMaterial {
    fn from(row: RunLineRow) -> Self {
        ConsumedMaterial {
            material_id: row.material_id,
            material_name: row.material_name,
            quantity_consumed: row.quantity_consumed,
            unit: row.unit,
        }
    }
}
