//! Production deduction planning
//!
//! Pure half of the production deduction engine. Given a stock snapshot and
//! what was produced, the planner resolves the recipe, folds in any manual
//! material lines, and validates every requirement against available stock
//! before emitting a [`ProductionPlan`] of per-material decrements. Nothing
//! is mutated here; persistence applies the plan as one unit or not at all.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{recipe_for, ProductId, RawMaterial};

/// Why a production run cannot be applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeductionError {
    #[error("quantity produced must be greater than zero")]
    InvalidQuantity,

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("material not found: {0}")]
    MaterialNotFound(String),

    #[error("material name matches more than one record: {0}")]
    AmbiguousMaterial(String),

    #[error("insufficient stock of {name}: available {available}, required {required}")]
    InsufficientStock {
        material_id: Uuid,
        name: String,
        available: Decimal,
        required: Decimal,
    },
}

/// A hand-entered material line on a production run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualLine {
    pub material_id: Uuid,
    pub quantity: Decimal,
}

/// One validated decrement of the plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedConsumption {
    pub material_id: Uuid,
    pub material_name: String,
    pub quantity: Decimal,
    pub unit: String,
}

/// A fully validated set of stock decrements for one production run
#[derive(Debug, Clone, Default)]
pub struct ProductionPlan {
    pub consumptions: Vec<PlannedConsumption>,
}

/// Parse a wire product identifier, surfacing unknown strings as a clean
/// deduction failure before any planning starts.
pub fn parse_product(s: &str) -> Result<ProductId, DeductionError> {
    ProductId::parse(s).ok_or_else(|| DeductionError::UnknownProduct(s.to_string()))
}

/// Plan the stock decrements for a production run.
///
/// When `product` is set its recipe is expanded against `quantity_produced`;
/// `manual_lines` are folded in afterwards. Lines naming the same material
/// are summed before validation so the aggregate requirement is checked
/// against stock. Either every consumption in the returned plan is coverable
/// or the whole call fails; no partial plan is ever produced.
pub fn plan_production(
    product: Option<ProductId>,
    quantity_produced: Decimal,
    manual_lines: &[ManualLine],
    materials: &[RawMaterial],
) -> Result<ProductionPlan, DeductionError> {
    if quantity_produced <= Decimal::ZERO {
        return Err(DeductionError::InvalidQuantity);
    }

    // Aggregate requirements per material, preserving first-seen order.
    let mut order: Vec<Uuid> = Vec::new();
    let mut required: std::collections::HashMap<Uuid, Decimal> =
        std::collections::HashMap::new();

    if let Some(product) = product {
        for entry in recipe_for(product) {
            let material = find_by_name(entry.material_name, materials)?;
            let amount = quantity_produced * entry.quantity_per_unit;
            accumulate(&mut order, &mut required, material.id, amount);
        }
    }

    for line in manual_lines {
        if line.quantity <= Decimal::ZERO {
            return Err(DeductionError::InvalidQuantity);
        }
        let material = find_by_id(line.material_id, materials)?;
        accumulate(&mut order, &mut required, material.id, line.quantity);
    }

    // Validate everything before anything is considered deductible.
    let mut consumptions = Vec::with_capacity(order.len());
    for material_id in order {
        let material = find_by_id(material_id, materials)?;
        let amount = required[&material_id];
        if amount > material.current_stock {
            return Err(DeductionError::InsufficientStock {
                material_id: material.id,
                name: material.display_name().to_string(),
                available: material.current_stock,
                required: amount,
            });
        }
        consumptions.push(PlannedConsumption {
            material_id: material.id,
            material_name: material.name.clone(),
            quantity: amount,
            unit: material.unit_of_measure.clone(),
        });
    }

    Ok(ProductionPlan { consumptions })
}

fn accumulate(
    order: &mut Vec<Uuid>,
    required: &mut std::collections::HashMap<Uuid, Decimal>,
    material_id: Uuid,
    amount: Decimal,
) {
    let slot = required.entry(material_id).or_insert(Decimal::ZERO);
    if *slot == Decimal::ZERO && !order.contains(&material_id) {
        order.push(material_id);
    }
    *slot += amount;
}

fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Resolve a recipe name against the snapshot. Matching is trimmed and
/// case-insensitive; zero matches and multiple matches both fail cleanly.
fn find_by_name<'a>(
    name: &str,
    materials: &'a [RawMaterial],
) -> Result<&'a RawMaterial, DeductionError> {
    let needle = normalize(name);
    let mut matches = materials.iter().filter(|m| normalize(&m.name) == needle);

    let first = matches
        .next()
        .ok_or_else(|| DeductionError::MaterialNotFound(name.to_string()))?;
    if matches.next().is_some() {
        return Err(DeductionError::AmbiguousMaterial(name.to_string()));
    }
    Ok(first)
}

fn find_by_id(id: Uuid, materials: &[RawMaterial]) -> Result<&RawMaterial, DeductionError> {
    materials
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| DeductionError::MaterialNotFound(id.to_string()))
}
