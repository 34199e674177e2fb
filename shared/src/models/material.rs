//! Raw material (insumo) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label rendered for materials stored without a name
pub const UNNAMED_MATERIAL: &str = "(Sin nombre)";

/// Category rendered for materials stored without one
pub const DEFAULT_CATEGORY: &str = "General";

/// A raw material consumed by production, tracked in stock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMaterial {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    /// Quantity currently on hand, in `unit_of_measure`
    pub current_stock: Decimal,
    /// Threshold below which the material should be reordered
    pub minimum_stock: Decimal,
    /// Average consumption per period, used when no minimum is set
    pub average_consumption: Decimal,
    pub unit_cost: Decimal,
    pub unit_of_measure: String,
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RawMaterial {
    /// Name as rendered in reports; blank names get a placeholder.
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            UNNAMED_MATERIAL
        } else {
            trimmed
        }
    }

    /// Category as rendered in reports; missing categories get a placeholder.
    pub fn display_category(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => DEFAULT_CATEGORY,
        }
    }

    /// Value of the stock on hand (current stock times unit cost).
    pub fn inventory_value(&self) -> Decimal {
        self.current_stock * self.unit_cost
    }
}

/// Replenishment log entry ("entrada"), an append-only snapshot of the
/// material at the time stock was received
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialEntry {
    pub id: Uuid,
    pub material_id: Uuid,
    pub material_name: String,
    /// Quantity received, in the material's unit of measure
    pub quantity: Decimal,
    pub minimum_stock: Decimal,
    pub unit_cost: Decimal,
    pub unit_of_measure: String,
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}
