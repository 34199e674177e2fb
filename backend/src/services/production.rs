//! Production service for registering runs and deducting raw-material stock
//!
//! Planning is pure (`shared::deduction`); this service loads the stock
//! snapshot, asks the planner for the decrements, and applies them in one
//! transaction. Decrements are guarded (`current_stock >= required`) so a
//! write that races another run fails cleanly instead of going negative.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{MaterialRow, RunLineRow, RunRow};
use shared::deduction::{parse_product, plan_production, DeductionError, ManualLine, ProductionPlan};
use shared::models::{
    recipe_for, ConsumedMaterial, ProductId, ProductionRun, RawMaterial, RecipeEntry,
    PRODUCTION_UNIT,
};
use shared::validation::validate_sale_price;

/// Production service
#[derive(Clone)]
pub struct ProductionService {
    db: PgPool,
}

/// Input for registering a production run
#[derive(Debug, Deserialize)]
pub struct CreateRunInput {
    /// Catalog product; absent for free-form manual runs
    pub product_id: Option<String>,
    /// Display name; defaults to the catalog product's name
    pub product_name: Option<String>,
    pub quantity_produced: Decimal,
    pub sale_price: Decimal,
    pub description: Option<String>,
    #[serde(default)]
    pub manual_lines: Vec<ManualLine>,
}

/// One product of the fixed catalog, with its recipe
#[derive(Debug, Serialize)]
pub struct CatalogProduct {
    pub product_id: ProductId,
    pub name: &'static str,
    pub unit: &'static str,
    pub recipe: Vec<RecipeEntry>,
}

impl ProductionService {
    /// Create a new ProductionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// The fixed product catalog with recipes, for front-end previews
    pub fn catalog() -> Vec<CatalogProduct> {
        ProductId::all()
            .into_iter()
            .map(|product_id| CatalogProduct {
                product_id,
                name: product_id.display_name(),
                unit: PRODUCTION_UNIT,
                recipe: recipe_for(product_id),
            })
            .collect()
    }

    /// Register a production run: plan the deductions against a stock
    /// snapshot, then decrement all materials and record the run atomically
    pub async fn create_run(&self, user_id: Uuid, input: CreateRunInput) -> AppResult<ProductionRun> {
        let product = match input.product_id.as_deref() {
            Some(s) => Some(parse_product(s)?),
            None => None,
        };

        let product_name = match (&input.product_name, product) {
            (Some(name), _) if !name.trim().is_empty() => name.trim().to_string(),
            (_, Some(product)) => product.display_name().to_string(),
            _ => {
                return Err(AppError::Validation {
                    field: "product_name".to_string(),
                    message: "Complete name, quantity and price".to_string(),
                    message_es: "Completa nombre, cantidad y precio".to_string(),
                })
            }
        };

        if let Err(message) = validate_sale_price(input.sale_price) {
            return Err(AppError::Validation {
                field: "sale_price".to_string(),
                message: message.to_string(),
                message_es: "El precio de venta debe ser mayor a cero".to_string(),
            });
        }

        if product.is_none() && input.manual_lines.is_empty() {
            return Err(AppError::Validation {
                field: "manual_lines".to_string(),
                message: "Add material lines or load a recipe".to_string(),
                message_es: "Agrega insumos o usa receta automática".to_string(),
            });
        }

        let snapshot = self.materials_snapshot().await?;
        let plan = plan_production(
            product,
            input.quantity_produced,
            &input.manual_lines,
            &snapshot,
        )?;

        self.apply_plan(user_id, product, product_name, &input, plan)
            .await
    }

    /// List production runs, most recent first, with their consumed lines
    pub async fn list_runs(&self) -> AppResult<Vec<ProductionRun>> {
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

    /// Read the full stock snapshot the planner validates against
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

    /// Decrement every planned material and record the run in one transaction.
    /// Any failure rolls the whole run back.
    async fn apply_plan(
        &self,
        user_id: Uuid,
        product: Option<ProductId>,
        product_name: String,
        input: &CreateRunInput,
        plan: ProductionPlan,
    ) -> AppResult<ProductionRun> {
        let mut tx = self.db.begin().await.map_err(AppError::StoreWrite)?;

        for consumption in &plan.consumptions {
            let result = sqlx::query(
                r#"
                UPDATE raw_materials
                SET current_stock = current_stock - $1
                WHERE id = $2 AND current_stock >= $1
                "#,
            )
            .bind(consumption.quantity)
            .bind(consumption.material_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::StoreWrite)?;

            if result.rows_affected() == 0 {
                // Stock moved between snapshot and write; re-read so the
                // error reports what is actually available now
                let available = sqlx::query_scalar::<_, Decimal>(
                    "SELECT current_stock FROM raw_materials WHERE id = $1",
                )
                .bind(consumption.material_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::StoreRead)?
                .unwrap_or(Decimal::ZERO);

                return Err(AppError::Deduction(DeductionError::InsufficientStock {
                    material_id: consumption.material_id,
                    name: consumption.material_name.clone(),
                    available,
                    required: consumption.quantity,
                }));
            }
        }

        let run_row = sqlx::query_as::<_, RunRow>(
            r#"
            INSERT INTO production_runs (product_id, product_name, quantity_produced, unit,
                                         sale_price, description, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, product_id, product_name, quantity_produced, unit, sale_price,
                      description, created_at, created_by
            "#,
        )
        .bind(product.map(|p| p.as_str()))
        .bind(&product_name)
        .bind(input.quantity_produced)
        .bind(PRODUCTION_UNIT)
        .bind(input.sale_price)
        .bind(&input.description)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::StoreWrite)?;

        let mut consumed_materials = Vec::with_capacity(plan.consumptions.len());
        for (line_no, consumption) in plan.consumptions.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO production_run_materials (run_id, line_no, material_id,
                                                      material_name, quantity_consumed, unit)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(run_row.id)
            .bind(line_no as i32)
            .bind(consumption.material_id)
            .bind(&consumption.material_name)
            .bind(consumption.quantity)
            .bind(&consumption.unit)
            .execute(&mut *tx)
            .await
            .map_err(AppError::StoreWrite)?;

            consumed_materials.push(ConsumedMaterial {
                material_id: consumption.material_id,
                material_name: consumption.material_name.clone(),
                quantity_consumed: consumption.quantity,
                unit: consumption.unit.clone(),
            });
        }

        tx.commit().await.map_err(AppError::StoreWrite)?;

        Ok(run_row.into_run(consumed_materials))
    }
}
