//! Finished-product catalog and fixed recipes
//!
//! Recipes are compile-time data: raw materials receive server-assigned ids
//! at runtime, so entries reference materials by name and are resolved
//! against the stock snapshot when a production run is planned.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Finished products the plant bottles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductId {
    #[serde(rename = "garrafon20")]
    Garrafon20,
    #[serde(rename = "botella1L")]
    Botella1L,
    #[serde(rename = "botella500")]
    Botella500,
}

impl ProductId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductId::Garrafon20 => "garrafon20",
            ProductId::Botella1L => "botella1L",
            ProductId::Botella500 => "botella500",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "garrafon20" => Some(ProductId::Garrafon20),
            "botella1L" => Some(ProductId::Botella1L),
            "botella500" => Some(ProductId::Botella500),
            _ => None,
        }
    }

    /// Customer-facing product name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductId::Garrafon20 => "Garrafón de 20 litros",
            ProductId::Botella1L => "Agua de 1 litro",
            ProductId::Botella500 => "Agua de 500 mL",
        }
    }

    pub fn all() -> [ProductId; 3] {
        [
            ProductId::Garrafon20,
            ProductId::Botella1L,
            ProductId::Botella500,
        ]
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ingredient of a recipe: a raw-material name and the quantity consumed
/// per unit of finished product, in the material's own unit of measure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeEntry {
    pub material_name: &'static str,
    pub quantity_per_unit: Decimal,
}

fn entry(material_name: &'static str, qty: i64, scale: u32) -> RecipeEntry {
    RecipeEntry {
        material_name,
        quantity_per_unit: Decimal::new(qty, scale),
    }
}

/// Fixed consumption ratios for a finished product, in recipe order.
pub fn recipe_for(product: ProductId) -> Vec<RecipeEntry> {
    match product {
        ProductId::Garrafon20 => vec![
            entry("TAPA #54 CON CINTILLO", 1, 0),
            entry("ETIQUETA DE GARRAFÓN", 1, 0),
            entry("SELLO TERMOENCOGIBLE", 1, 0),
            entry("SALES", 18, 3),
            entry("LAVADIN INTERNO", 5, 3),
            entry("LAVADIN EXTERNO", 3, 3),
            entry("OXIDÍN", 2, 3),
            entry("PIPA DE AGUA POTABLE", 20, 3),
        ],
        ProductId::Botella1L => vec![
            entry("BOTELLA DE AGUA DE 1 LT", 1, 0),
            entry("TAPA DE BOTELLA DE AGUA", 1, 0),
            entry("ETIQUETA DE BOTELLAS DE AGUA", 1, 0),
            entry("SALES", 3, 3),
        ],
        ProductId::Botella500 => vec![
            entry("BOTELLA DE AGUA DE 500 ML", 1, 0),
            entry("TAPA DE BOTELLA DE AGUA", 1, 0),
            entry("ETIQUETA DE BOTELLAS DE AGUA", 1, 0),
            entry("SALES", 2, 3),
        ],
    }
}
