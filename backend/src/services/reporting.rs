//! Reporting service for inventory summaries, reorder status and CSV export
//!
//! Every reorder figure flows through the shared policy (`shared::reorder`)
//! so the dashboard, report table, chart ranking and CSV export never
//! disagree about which materials are at risk.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{EntryRow, MaterialRow, RunLineRow, RunRow};
use shared::models::{ConsumedMaterial, MaterialEntry, ProductionRun, RawMaterial};
use shared::reorder::{rank_most_critical, status_for, CriticalMaterial};

/// Entries and runs shown in the dashboard "recent activity" panels
pub const RECENT_LIMIT: usize = 5;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Dashboard summary: inventory totals, low-stock alerts and recent activity
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub total_materials: usize,
    pub total_units: Decimal,
    pub raw_material_value: Decimal,
    pub finished_goods_value: Decimal,
    pub at_risk_count: usize,
    pub low_stock: Vec<LowStockAlert>,
    pub top_consumed: Vec<TopConsumedMaterial>,
    pub recent_entries: Vec<MaterialEntry>,
    pub recent_runs: Vec<ProductionRun>,
}

/// One low-stock line of the dashboard alert box
#[derive(Debug, Serialize)]
pub struct LowStockAlert {
    pub material_id: Uuid,
    pub name: String,
    pub current_stock: Decimal,
    pub minimum_stock: Decimal,
    pub reorder_point: Decimal,
    pub unit_of_measure: String,
}

/// Reorder report row, one per material
#[derive(Debug, Serialize)]
pub struct ReorderReportRow {
    pub material_id: Uuid,
    pub name: String,
    pub category: String,
    pub current_stock: Decimal,
    pub minimum_stock: Decimal,
    pub average_consumption: Decimal,
    pub reorder_point: Decimal,
    pub unit_of_measure: String,
    pub unit_cost: Decimal,
    pub inventory_value: Decimal,
    pub at_risk: bool,
}

/// CSV row of the reorder export; headers match the original spreadsheet
#[derive(Debug, Serialize)]
pub struct ReorderCsvRow {
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "Categoría")]
    pub category: String,
    #[serde(rename = "Stock actual")]
    pub current_stock: Decimal,
    #[serde(rename = "Stock mínimo")]
    pub minimum_stock: Decimal,
    #[serde(rename = "Consumo promedio")]
    pub average_consumption: Decimal,
    #[serde(rename = "Punto de reorden")]
    pub reorder_point: Decimal,
    #[serde(rename = "Unidad")]
    pub unit_of_measure: String,
    #[serde(rename = "Costo unidad")]
    pub unit_cost: Decimal,
    #[serde(rename = "Valor en inventario")]
    pub inventory_value: String,
    #[serde(rename = "En riesgo reorden")]
    pub at_risk: String,
}

impl From<&ReorderReportRow> for ReorderCsvRow {
    fn from(row: &ReorderReportRow) -> Self {
        ReorderCsvRow {
            name: row.name.clone(),
            category: row.category.clone(),
            current_stock: row.current_stock,
            minimum_stock: row.minimum_stock,
            average_consumption: row.average_consumption,
            reorder_point: row.reorder_point,
            unit_of_measure: row.unit_of_measure.clone(),
            unit_cost: row.unit_cost,
            inventory_value: format!("{:.2}", row.inventory_value),
            at_risk: if row.at_risk { "Sí" } else { "No" }.to_string(),
        }
    }
}

/// One row of the top-consumption ranking
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TopConsumedMaterial {
    pub material_id: Uuid,
    pub material_name: String,
    pub total_consumed: Decimal,
    pub unit: String,
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Dashboard report: inventory folds, low-stock alerts, consumption
    /// ranking and the most recent entries and runs
    pub async fn dashboard(&self, top_consumed_limit: usize) -> AppResult<DashboardReport> {
        let materials = self.materials_snapshot().await?;

        let mut total_units = Decimal::ZERO;
        let mut raw_material_value = Decimal::ZERO;
        let mut low_stock = Vec::new();

        for material in &materials {
            total_units += material.current_stock;
            raw_material_value += material.inventory_value();

            let status = status_for(material);
            if status.at_risk {
                low_stock.push(LowStockAlert {
                    material_id: material.id,
                    name: material.display_name().to_string(),
                    current_stock: material.current_stock,
                    minimum_stock: material.minimum_stock,
                    reorder_point: status.reorder_point,
                    unit_of_measure: material.unit_of_measure.clone(),
                });
            }
        }

        let run_rows = sqlx::query_as::<_, RunRow>(
            r#"
            SELECT id, product_id, product_name, quantity_produced, unit, sale_price,
                   description, created_at, created_by
            FROM production_runs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(AppError::StoreRead)?;

        let finished_goods_value: Decimal = run_rows
            .iter()
            .map(|r| r.quantity_produced * r.sale_price)
            .sum();

        let recent_headers: Vec<RunRow> = run_rows.into_iter().take(RECENT_LIMIT).collect();
        let recent_runs = self.attach_lines(recent_headers).await?;

        let recent_entries = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT id, material_id, material_name, quantity, minimum_stock,
                   unit_cost, unit_of_measure, supplier, created_at, created_by
            FROM material_entries
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(RECENT_LIMIT as i64)
        .fetch_all(&self.db)
        .await
        .map_err(AppError::StoreRead)?
        .into_iter()
        .map(MaterialEntry::from)
        .collect();

        let top_consumed = self.top_consumed(top_consumed_limit).await?;

        Ok(DashboardReport {
            total_materials: materials.len(),
            total_units,
            raw_material_value,
            finished_goods_value,
            at_risk_count: low_stock.len(),
            low_stock,
            top_consumed,
            recent_entries,
            recent_runs,
        })
    }

    /// Reorder report, one row per material through the shared policy
    pub async fn reorder_report(&self) -> AppResult<Vec<ReorderReportRow>> {
        let materials = self.materials_snapshot().await?;
        Ok(materials.iter().map(Self::report_row).collect())
    }

    /// Reorder report rendered as CSV, ready for download
    pub async fn export_reorder_csv(&self) -> AppResult<String> {
        let rows = self.reorder_report().await?;
        let csv_rows: Vec<ReorderCsvRow> = rows.iter().map(ReorderCsvRow::from).collect();
        Self::export_to_csv(&csv_rows)
    }

    /// Materials closest to their reorder point, worst first
    pub async fn critical_ranking(&self, limit: usize) -> AppResult<Vec<CriticalMaterial>> {
        let materials = self.materials_snapshot().await?;
        Ok(rank_most_critical(&materials, limit))
    }

    /// Top materials by total quantity consumed across the run history
    pub async fn top_consumed(&self, limit: usize) -> AppResult<Vec<TopConsumedMaterial>> {
        let rows = sqlx::query_as::<_, TopConsumedMaterial>(
            r#"
            SELECT material_id, material_name,
                   SUM(quantity_consumed) as total_consumed,
                   MAX(unit) as unit
            FROM production_run_materials
            GROUP BY material_id, material_name
            ORDER BY total_consumed DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.db)
        .await
        .map_err(AppError::StoreRead)?;

        Ok(rows)
    }

    /// Serialize report rows as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }

    fn report_row(material: &RawMaterial) -> ReorderReportRow {
        let status = status_for(material);
        ReorderReportRow {
            material_id: material.id,
            name: material.display_name().to_string(),
            category: material.display_category().to_string(),
            current_stock: material.current_stock,
            minimum_stock: material.minimum_stock,
            average_consumption: material.average_consumption,
            reorder_point: status.reorder_point,
            unit_of_measure: material.unit_of_measure.clone(),
            unit_cost: material.unit_cost,
            inventory_value: material.inventory_value(),
            at_risk: status.at_risk,
        }
    }

    async fn materials_snapshot(&self) -> AppResult<Vec<RawMaterial>> {
        let rows = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT id, name, category, current_stock, minimum_stock,
                   average_consumption, unit_cost, unit_of_measure, supplier, created_at
            FROM raw_materials
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(AppError::StoreRead)?;

        Ok(rows.into_iter().map(RawMaterial::from).collect())
    }

    async fn attach_lines(&self, run_rows: Vec<RunRow>) -> AppResult<Vec<ProductionRun>> {
        let run_ids: Vec<Uuid> = run_rows.iter().map(|r| r.id).collect();

        let line_rows = sqlx::query_as::<_, RunLineRow>(
            r#"
            SELECT run_id, material_id, material_name, quantity_consumed, unit
            FROM production_run_materials
            WHERE run_id = ANY($1)
            ORDER BY run_id, line_no
            "#,
        )
        .bind(&run_ids)
        .fetch_all(&self.db)
        .await
        .map_err(AppError::StoreRead)?;

        let mut lines_by_run: HashMap<Uuid, Vec<ConsumedMaterial>> = HashMap::new();
        for line in line_rows {
            lines_by_run
                .entry(line.run_id)
                .or_default()
                .push(line.into());
        }

        Ok(run_rows
            .into_iter()
            .map(|row| {
                let consumed = lines_by_run.remove(&row.id).unwrap_or_default();
                row.into_run(consumed)
            })
            .collect())
    }
}
