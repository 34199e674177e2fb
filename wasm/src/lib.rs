//! WebAssembly module for the Water Plant Inventory service
//!
//! Provides client-side computation for:
//! - Reorder point and at-risk checks
//! - Recipe requirement previews before a run is submitted
//! - Inventory value calculations
//! - Offline form validation

use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&"water-plant-inventory wasm ready".into());
}

fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

/// Reorder point for a material: the explicit minimum when set, otherwise
/// one and a half periods of average consumption, rounded up
#[wasm_bindgen]
pub fn reorder_point(minimum_stock: f64, average_consumption: f64) -> f64 {
    let point = shared::reorder::reorder_point(
        to_decimal(minimum_stock),
        to_decimal(average_consumption),
    );
    to_f64(point)
}

/// Whether stock has fallen to or below the reorder point
#[wasm_bindgen]
pub fn is_material_at_risk(
    current_stock: f64,
    minimum_stock: f64,
    average_consumption: f64,
) -> bool {
    let point = shared::reorder::reorder_point(
        to_decimal(minimum_stock),
        to_decimal(average_consumption),
    );
    shared::reorder::is_at_risk(to_decimal(current_stock), point)
}

/// Value of the stock on hand (current stock times unit cost)
#[wasm_bindgen]
pub fn inventory_value(current_stock: f64, unit_cost: f64) -> f64 {
    to_f64(to_decimal(current_stock) * to_decimal(unit_cost))
}

#[derive(Serialize)]
struct RecipeRequirement {
    material_name: &'static str,
    quantity: f64,
}

/// Materials a production run would consume, as a JSON array of
/// `{material_name, quantity}`, so the form can preview the deduction
#[wasm_bindgen]
pub fn recipe_requirements(product_id: &str, quantity_produced: f64) -> Result<String, JsValue> {
    let product = ProductId::parse(product_id)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown product: {}", product_id)))?;
    let quantity = to_decimal(quantity_produced);

    let requirements: Vec<RecipeRequirement> = recipe_for(product)
        .iter()
        .map(|entry| RecipeRequirement {
            material_name: entry.material_name,
            quantity: to_f64(entry.quantity_per_unit * quantity),
        })
        .collect();

    serde_json::to_string(&requirements)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

#[derive(Serialize)]
struct CatalogLine {
    material_name: &'static str,
    quantity_per_unit: f64,
}

#[derive(Serialize)]
struct CatalogProduct {
    id: &'static str,
    name: &'static str,
    recipe: Vec<CatalogLine>,
}

/// The fixed product catalog with recipes, as JSON
#[wasm_bindgen]
pub fn product_catalog() -> Result<String, JsValue> {
    let products: Vec<CatalogProduct> = ProductId::all()
        .into_iter()
        .map(|product| CatalogProduct {
            id: product.as_str(),
            name: product.display_name(),
            recipe: recipe_for(product)
                .iter()
                .map(|entry| CatalogLine {
                    material_name: entry.material_name,
                    quantity_per_unit: to_f64(entry.quantity_per_unit),
                })
                .collect(),
        })
        .collect();

    serde_json::to_string(&products)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Validate a replenishment or production quantity before submitting
#[wasm_bindgen]
pub fn is_valid_quantity(quantity: f64) -> bool {
    validate_positive_quantity(to_decimal(quantity)).is_ok()
}

/// Validate a sale price before submitting
#[wasm_bindgen]
pub fn is_valid_sale_price(price: f64) -> bool {
    validate_sale_price(to_decimal(price)).is_ok()
}
