//! Reorder point policy for raw materials
//!
//! One policy, applied everywhere reorder status appears (dashboard alerts,
//! report table, chart ranking, CSV export):
//!
//! | minimum_stock | reorder point                        |
//! |---------------|--------------------------------------|
//! | > 0           | minimum_stock                        |
//! | 0             | ceil(average_consumption x 1.5)      |
//!
//! A material is at risk when `current_stock <= reorder_point` and the point
//! is positive. A material with no minimum and no consumption history has a
//! reorder point of zero, is never flagged, and is excluded from the
//! critical-items ranking.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::RawMaterial;

/// Default number of materials in the critical-items ranking
pub const DEFAULT_CRITICAL_LIMIT: usize = 7;

/// Reorder threshold for a material: the explicit minimum when one is set,
/// otherwise one and a half periods of average consumption, rounded up.
pub fn reorder_point(minimum_stock: Decimal, average_consumption: Decimal) -> Decimal {
    if minimum_stock > Decimal::ZERO {
        minimum_stock
    } else {
        (average_consumption * Decimal::new(15, 1)).ceil()
    }
}

/// Whether stock has fallen to or below the reorder threshold.
pub fn is_at_risk(current_stock: Decimal, reorder_point: Decimal) -> bool {
    reorder_point > Decimal::ZERO && current_stock <= reorder_point
}

/// Derived reorder status for a material. Never persisted, recomputed on
/// every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderStatus {
    pub material_id: Uuid,
    pub reorder_point: Decimal,
    pub at_risk: bool,
}

pub fn status_for(material: &RawMaterial) -> ReorderStatus {
    let point = reorder_point(material.minimum_stock, material.average_consumption);
    ReorderStatus {
        material_id: material.id,
        reorder_point: point,
        at_risk: is_at_risk(material.current_stock, point),
    }
}

/// A ranked entry of the critical-items chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalMaterial {
    pub material_id: Uuid,
    pub name: String,
    pub current_stock: Decimal,
    pub minimum_stock: Decimal,
    pub reorder_point: Decimal,
    /// current_stock / reorder_point; lower is worse
    pub ratio: Decimal,
    pub at_risk: bool,
    pub unit_of_measure: String,
}

/// Rank materials by how close stock is to the reorder point, worst first.
///
/// Materials with a zero reorder point carry no signal and are excluded.
/// When nothing is at risk the closest `limit` materials are still returned,
/// each carrying its `at_risk` flag, so a consumer can render the fallback
/// state instead of an empty chart.
pub fn rank_most_critical(materials: &[RawMaterial], limit: usize) -> Vec<CriticalMaterial> {
    let mut ranked: Vec<CriticalMaterial> = materials
        .iter()
        .filter_map(|m| {
            let point = reorder_point(m.minimum_stock, m.average_consumption);
            if point <= Decimal::ZERO {
                return None;
            }
            Some(CriticalMaterial {
                material_id: m.id,
                name: m.display_name().to_string(),
                current_stock: m.current_stock,
                minimum_stock: m.minimum_stock,
                reorder_point: point,
                ratio: m.current_stock / point,
                at_risk: is_at_risk(m.current_stock, point),
                unit_of_measure: m.unit_of_measure.clone(),
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.ratio.cmp(&b.ratio));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn material(name: &str, stock: i64, minimum: i64, consumption: i64) -> RawMaterial {
        RawMaterial {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: None,
            current_stock: Decimal::from(stock),
            minimum_stock: Decimal::from(minimum),
            average_consumption: Decimal::from(consumption),
            unit_cost: Decimal::ONE,
            unit_of_measure: "pieza".to_string(),
            supplier: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_explicit_minimum_wins() {
        assert_eq!(
            reorder_point(Decimal::from(20), Decimal::from(10)),
            Decimal::from(20)
        );
    }

    #[test]
    fn test_consumption_fallback_rounds_up() {
        // 7 * 1.5 = 10.5, rounded up to 11
        assert_eq!(
            reorder_point(Decimal::ZERO, Decimal::from(7)),
            Decimal::from(11)
        );
    }

    #[test]
    fn test_no_signal_yields_zero_point() {
        assert_eq!(reorder_point(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
        assert!(!is_at_risk(Decimal::ZERO, Decimal::ZERO));
    }

    #[test]
    fn test_at_risk_boundary_is_inclusive() {
        let point = Decimal::from(20);
        assert!(is_at_risk(Decimal::from(20), point));
        assert!(is_at_risk(Decimal::from(15), point));
        assert!(!is_at_risk(Decimal::from(25), point));
    }

    #[test]
    fn test_ranking_excludes_zero_point_materials() {
        let materials = vec![
            material("SALES", 5, 20, 0),
            material("SIN DATOS", 0, 0, 0),
            material("TAPAS", 100, 10, 0),
        ];
        let ranked = rank_most_critical(&materials, DEFAULT_CRITICAL_LIMIT);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "SALES");
        assert!(ranked[0].at_risk);
        assert!(!ranked[1].at_risk);
    }

    #[test]
    fn test_ranking_is_ascending_by_ratio() {
        let materials = vec![
            material("A", 50, 10, 0),
            material("B", 5, 10, 0),
            material("C", 10, 10, 0),
        ];
        let ranked = rank_most_critical(&materials, 3);
        let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }
}
