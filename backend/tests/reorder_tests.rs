//! Reorder policy tests
//!
//! Tests for the reorder point computation and the critical-items ranking:
//! - explicit minimum wins over the consumption fallback
//! - fallback is ceil(average_consumption * 1.5)
//! - at-risk boundary is inclusive
//! - ranking is ascending by stock-to-point ratio and excludes silent materials

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::RawMaterial;
use shared::reorder::{
    is_at_risk, rank_most_critical, reorder_point, status_for, DEFAULT_CRITICAL_LIMIT,
};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn material(name: &str, stock: Decimal, minimum: Decimal, consumption: Decimal) -> RawMaterial {
    RawMaterial {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: None,
        current_stock: stock,
        minimum_stock: minimum,
        average_consumption: consumption,
        unit_cost: Decimal::ONE,
        unit_of_measure: "unidades".to_string(),
        supplier: None,
        created_at: Utc::now(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A material with an explicit minimum uses it as the reorder point,
    /// regardless of consumption history
    #[test]
    fn test_explicit_minimum_is_the_point() {
        let m = material("SALES", dec("100"), dec("20"), dec("10"));
        let status = status_for(&m);

        assert_eq!(status.reorder_point, dec("20"));
        assert!(!status.at_risk);
    }

    /// Without a minimum, the point is one and a half periods of consumption
    #[test]
    fn test_consumption_fallback() {
        assert_eq!(reorder_point(Decimal::ZERO, dec("10")), dec("15"));
    }

    /// The fallback rounds up so a fractional threshold never under-orders
    #[test]
    fn test_consumption_fallback_rounds_up() {
        // 7 * 1.5 = 10.5 -> 11
        assert_eq!(reorder_point(Decimal::ZERO, dec("7")), dec("11"));
        // 0.1 * 1.5 = 0.15 -> 1
        assert_eq!(reorder_point(Decimal::ZERO, dec("0.1")), Decimal::ONE);
    }

    /// At-risk comparison includes the boundary
    #[test]
    fn test_at_risk_boundary_inclusive() {
        let m = material("SALES", dec("20"), dec("20"), Decimal::ZERO);
        assert!(status_for(&m).at_risk);

        let below = material("SALES", dec("15"), dec("20"), Decimal::ZERO);
        assert!(status_for(&below).at_risk);

        let above = material("SALES", dec("25"), dec("20"), Decimal::ZERO);
        assert!(!status_for(&above).at_risk);
    }

    /// A material with no minimum and no consumption carries no signal:
    /// zero point, never flagged
    #[test]
    fn test_silent_material_never_flagged() {
        let m = material("NUEVO", Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        let status = status_for(&m);

        assert_eq!(status.reorder_point, Decimal::ZERO);
        assert!(!status.at_risk);
    }

    /// Zero stock against a positive point is at risk
    #[test]
    fn test_zero_stock_is_at_risk() {
        assert!(is_at_risk(Decimal::ZERO, dec("5")));
    }

    /// The ranking is worst-first: lowest stock-to-point ratio leads
    #[test]
    fn test_ranking_ascending_by_ratio() {
        let materials = vec![
            material("HOLGADO", dec("50"), dec("10"), Decimal::ZERO), // ratio 5.0
            material("CRITICO", dec("5"), dec("10"), Decimal::ZERO),  // ratio 0.5
            material("JUSTO", dec("10"), dec("10"), Decimal::ZERO),   // ratio 1.0
        ];

        let ranked = rank_most_critical(&materials, DEFAULT_CRITICAL_LIMIT);
        let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["CRITICO", "JUSTO", "HOLGADO"]);
    }

    /// Materials with a zero reorder point never appear in the ranking
    #[test]
    fn test_ranking_excludes_silent_materials() {
        let materials = vec![
            material("CON MINIMO", dec("5"), dec("10"), Decimal::ZERO),
            material("SIN DATOS", Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        ];

        let ranked = rank_most_critical(&materials, DEFAULT_CRITICAL_LIMIT);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "CON MINIMO");
    }

    /// The ranking is truncated to the requested size
    #[test]
    fn test_ranking_respects_limit() {
        let materials: Vec<RawMaterial> = (1..=10)
            .map(|i| {
                material(
                    &format!("MATERIAL {i}"),
                    Decimal::from(i),
                    dec("10"),
                    Decimal::ZERO,
                )
            })
            .collect();

        let ranked = rank_most_critical(&materials, 7);
        assert_eq!(ranked.len(), 7);
        // Worst first: stock 1 of 10
        assert_eq!(ranked[0].name, "MATERIAL 1");
    }

    /// When nothing is at risk the closest materials are still returned,
    /// flagged accordingly, so a chart has something to render
    #[test]
    fn test_ranking_falls_back_to_closest() {
        let materials = vec![
            material("A", dec("100"), dec("10"), Decimal::ZERO),
            material("B", dec("30"), dec("10"), Decimal::ZERO),
        ];

        let ranked = rank_most_critical(&materials, DEFAULT_CRITICAL_LIMIT);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|c| !c.at_risk));
        assert_eq!(ranked[0].name, "B");
    }

    /// Ranking entries expose the ratio the sort used
    #[test]
    fn test_ranking_ratio_value() {
        let materials = vec![material("SALES", dec("5"), dec("20"), Decimal::ZERO)];
        let ranked = rank_most_critical(&materials, 1);

        assert_eq!(ranked[0].ratio, dec("0.25"));
        assert!(ranked[0].at_risk);
    }

    /// Blank names are replaced with the display placeholder in the ranking
    #[test]
    fn test_ranking_uses_display_name() {
        let materials = vec![material("   ", dec("5"), dec("20"), Decimal::ZERO)];
        let ranked = rank_most_critical(&materials, 1);
        assert_eq!(ranked[0].name, "(Sin nombre)");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for stock-like decimals (0.0 to 1000.0)
    fn stock_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=10000i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Strategy for strictly positive decimals (0.1 to 1000.0)
    fn positive_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10000i64).prop_map(|n| Decimal::new(n, 1))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A positive minimum is always the reorder point as-is
        #[test]
        fn prop_positive_minimum_wins(
            minimum in positive_strategy(),
            consumption in stock_strategy()
        ) {
            prop_assert_eq!(reorder_point(minimum, consumption), minimum);
        }

        /// Without a minimum, the point covers at least 1.5 periods of
        /// consumption and overshoots by less than one unit (rounding up)
        #[test]
        fn prop_fallback_bounds(consumption in positive_strategy()) {
            let point = reorder_point(Decimal::ZERO, consumption);
            let exact = consumption * dec("1.5");

            prop_assert!(point >= exact);
            prop_assert!(point < exact + Decimal::ONE);
        }

        /// at_risk is monotone: if a given stock level is safe, any larger
        /// stock level is safe too
        #[test]
        fn prop_at_risk_monotone(
            stock in stock_strategy(),
            extra in positive_strategy(),
            point in positive_strategy()
        ) {
            if !is_at_risk(stock, point) {
                prop_assert!(!is_at_risk(stock + extra, point));
            }
        }

        /// Exactly at the point is always at risk when the point is positive
        #[test]
        fn prop_boundary_always_at_risk(point in positive_strategy()) {
            prop_assert!(is_at_risk(point, point));
        }

        /// The ranking never exceeds the limit and is sorted ascending by ratio
        #[test]
        fn prop_ranking_sorted_and_bounded(
            stocks in prop::collection::vec((stock_strategy(), positive_strategy()), 0..20),
            limit in 1usize..10
        ) {
            let materials: Vec<RawMaterial> = stocks
                .iter()
                .enumerate()
                .map(|(i, (stock, minimum))| {
                    material(&format!("M{i}"), *stock, *minimum, Decimal::ZERO)
                })
                .collect();

            let ranked = rank_most_critical(&materials, limit);

            prop_assert!(ranked.len() <= limit);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].ratio <= pair[1].ratio);
            }
        }

        /// Every ranked entry has a positive reorder point
        #[test]
        fn prop_ranking_has_no_silent_entries(
            stocks in prop::collection::vec(stock_strategy(), 0..20)
        ) {
            // Half the materials get no minimum and no consumption
            let materials: Vec<RawMaterial> = stocks
                .iter()
                .enumerate()
                .map(|(i, stock)| {
                    let minimum = if i % 2 == 0 { dec("10") } else { Decimal::ZERO };
                    material(&format!("M{i}"), *stock, minimum, Decimal::ZERO)
                })
                .collect();

            let ranked = rank_most_critical(&materials, materials.len());

            for entry in &ranked {
                prop_assert!(entry.reorder_point > Decimal::ZERO);
            }
        }

        /// status_for agrees with the standalone functions
        #[test]
        fn prop_status_consistent(
            stock in stock_strategy(),
            minimum in stock_strategy(),
            consumption in stock_strategy()
        ) {
            let m = material("M", stock, minimum, consumption);
            let status = status_for(&m);

            prop_assert_eq!(status.reorder_point, reorder_point(minimum, consumption));
            prop_assert_eq!(status.at_risk, is_at_risk(stock, status.reorder_point));
        }
    }
}
