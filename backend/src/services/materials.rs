//! Raw material service for stock levels and replenishment entries

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{EntryRow, MaterialRow};
use shared::models::{MaterialEntry, RawMaterial};
use shared::validation::{validate_non_negative, validate_positive_quantity};

/// Raw material service for managing the insumo catalog and stock
#[derive(Clone)]
pub struct MaterialService {
    db: PgPool,
}

/// Input for creating a raw material
#[derive(Debug, Deserialize)]
pub struct CreateMaterialInput {
    pub name: String,
    pub category: Option<String>,
    pub current_stock: Option<Decimal>,
    pub minimum_stock: Option<Decimal>,
    pub average_consumption: Option<Decimal>,
    pub unit_cost: Option<Decimal>,
    pub unit_of_measure: String,
    pub supplier: Option<String>,
}

/// Input for partially updating a raw material
#[derive(Debug, Deserialize)]
pub struct UpdateMaterialInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub current_stock: Option<Decimal>,
    pub minimum_stock: Option<Decimal>,
    pub average_consumption: Option<Decimal>,
    pub unit_cost: Option<Decimal>,
    pub unit_of_measure: Option<String>,
    pub supplier: Option<String>,
}

/// Input for recording a replenishment entry
#[derive(Debug, Deserialize)]
pub struct RecordEntryInput {
    pub quantity: Decimal,
}

impl MaterialService {
    /// Create a new MaterialService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all raw materials
    pub async fn list_materials(&self) -> AppResult<Vec<RawMaterial>> {
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

    /// Create a raw material
    pub async fn create_material(&self, input: CreateMaterialInput) -> AppResult<RawMaterial> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_es: "El nombre es obligatorio".to_string(),
            });
        }

        let current_stock = input.current_stock.unwrap_or(Decimal::ZERO);
        let minimum_stock = input.minimum_stock.unwrap_or(Decimal::ZERO);
        let average_consumption = input.average_consumption.unwrap_or(Decimal::ZERO);
        let unit_cost = input.unit_cost.unwrap_or(Decimal::ZERO);

        Self::validate_amounts(current_stock, minimum_stock, average_consumption, unit_cost)?;

        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            INSERT INTO raw_materials (name, category, current_stock, minimum_stock,
                                       average_consumption, unit_cost, unit_of_measure, supplier)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, category, current_stock, minimum_stock,
                      average_consumption, unit_cost, unit_of_measure, supplier, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.category)
        .bind(current_stock)
        .bind(minimum_stock)
        .bind(average_consumption)
        .bind(unit_cost)
        .bind(&input.unit_of_measure)
        .bind(&input.supplier)
        .fetch_one(&self.db)
        .await
        .map_err(AppError::StoreWrite)?;

        Ok(row.into())
    }

    /// Partially update a raw material; fields left out keep their value
    pub async fn update_material(
        &self,
        material_id: Uuid,
        input: UpdateMaterialInput,
    ) -> AppResult<RawMaterial> {
        // Load existing values to merge with the partial input
        let existing = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT id, name, category, current_stock, minimum_stock,
                   average_consumption, unit_cost, unit_of_measure, supplier, created_at
            FROM raw_materials
            WHERE id = $1
            "#,
        )
        .bind(material_id)
        .fetch_optional(&self.db)
        .await
        .map_err(AppError::StoreRead)?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        let name = input.name.unwrap_or(existing.name);
        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_es: "El nombre es obligatorio".to_string(),
            });
        }

        let category = input.category.or(existing.category);
        let current_stock = input.current_stock.unwrap_or(existing.current_stock);
        let minimum_stock = input.minimum_stock.unwrap_or(existing.minimum_stock);
        let average_consumption = input
            .average_consumption
            .unwrap_or(existing.average_consumption);
        let unit_cost = input.unit_cost.unwrap_or(existing.unit_cost);
        let unit_of_measure = input.unit_of_measure.unwrap_or(existing.unit_of_measure);
        let supplier = input.supplier.or(existing.supplier);

        Self::validate_amounts(current_stock, minimum_stock, average_consumption, unit_cost)?;

        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            UPDATE raw_materials
            SET name = $1, category = $2, current_stock = $3, minimum_stock = $4,
                average_consumption = $5, unit_cost = $6, unit_of_measure = $7, supplier = $8
            WHERE id = $9
            RETURNING id, name, category, current_stock, minimum_stock,
                      average_consumption, unit_cost, unit_of_measure, supplier, created_at
            "#,
        )
        .bind(name.trim())
        .bind(&category)
        .bind(current_stock)
        .bind(minimum_stock)
        .bind(average_consumption)
        .bind(unit_cost)
        .bind(&unit_of_measure)
        .bind(&supplier)
        .bind(material_id)
        .fetch_one(&self.db)
        .await
        .map_err(AppError::StoreWrite)?;

        Ok(row.into())
    }

    /// Record a replenishment entry: increment stock and append a history
    /// row snapshotting the material's fields at entry time
    pub async fn record_entry(
        &self,
        material_id: Uuid,
        user_id: Uuid,
        input: RecordEntryInput,
    ) -> AppResult<MaterialEntry> {
        if let Err(message) = validate_positive_quantity(input.quantity) {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: message.to_string(),
                message_es: "Ingresa una cantidad válida".to_string(),
            });
        }

        let mut tx = self.db.begin().await.map_err(AppError::StoreWrite)?;

        let material = sqlx::query_as::<_, MaterialRow>(
            r#"
            UPDATE raw_materials
            SET current_stock = current_stock + $1
            WHERE id = $2
            RETURNING id, name, category, current_stock, minimum_stock,
                      average_consumption, unit_cost, unit_of_measure, supplier, created_at
            "#,
        )
        .bind(input.quantity)
        .bind(material_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::StoreWrite)?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        let entry = sqlx::query_as::<_, EntryRow>(
            r#"
            INSERT INTO material_entries (material_id, material_name, quantity, minimum_stock,
                                          unit_cost, unit_of_measure, supplier, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, material_id, material_name, quantity, minimum_stock,
                      unit_cost, unit_of_measure, supplier, created_at, created_by
            "#,
        )
        .bind(material.id)
        .bind(&material.name)
        .bind(input.quantity)
        .bind(material.minimum_stock)
        .bind(material.unit_cost)
        .bind(&material.unit_of_measure)
        .bind(&material.supplier)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::StoreWrite)?;

        tx.commit().await.map_err(AppError::StoreWrite)?;

        Ok(entry.into())
    }

    /// List replenishment history, most recent first
    pub async fn list_entries(&self) -> AppResult<Vec<MaterialEntry>> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT id, material_id, material_name, quantity, minimum_stock,
                   unit_cost, unit_of_measure, supplier, created_at, created_by
            FROM material_entries
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(AppError::StoreRead)?;

        Ok(rows.into_iter().map(MaterialEntry::from).collect())
    }

    fn validate_amounts(
        current_stock: Decimal,
        minimum_stock: Decimal,
        average_consumption: Decimal,
        unit_cost: Decimal,
    ) -> AppResult<()> {
        let fields = [
            ("current_stock", current_stock),
            ("minimum_stock", minimum_stock),
            ("average_consumption", average_consumption),
            ("unit_cost", unit_cost),
        ];

        for (field, value) in fields {
            if let Err(message) = validate_non_negative(value) {
                return Err(AppError::Validation {
                    field: field.to_string(),
                    message: message.to_string(),
                    message_es: "El valor no puede ser negativo".to_string(),
                });
            }
        }

        Ok(())
    }
}
