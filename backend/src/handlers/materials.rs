//! HTTP handlers for raw material endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::materials::{
    CreateMaterialInput, MaterialService, RecordEntryInput, UpdateMaterialInput,
};
use crate::AppState;
use shared::models::{MaterialEntry, RawMaterial};

/// List all raw materials
pub async fn list_materials(State(state): State<AppState>) -> AppResult<Json<Vec<RawMaterial>>> {
    let service = MaterialService::new(state.db);
    let materials = service.list_materials().await?;
    Ok(Json(materials))
}

/// Create a raw material
pub async fn create_material(
    State(state): State<AppState>,
    Json(input): Json<CreateMaterialInput>,
) -> AppResult<(StatusCode, Json<RawMaterial>)> {
    let service = MaterialService::new(state.db);
    let material = service.create_material(input).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

/// Update a raw material
pub async fn update_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
    Json(input): Json<UpdateMaterialInput>,
) -> AppResult<Json<RawMaterial>> {
    let service = MaterialService::new(state.db);
    let material = service.update_material(material_id, input).await?;
    Ok(Json(material))
}

/// Record a replenishment entry for a material
pub async fn record_entry(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
    Json(input): Json<RecordEntryInput>,
) -> AppResult<(StatusCode, Json<MaterialEntry>)> {
    let service = MaterialService::new(state.db);
    let entry = service
        .record_entry(material_id, current_user.0.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// List all replenishment entries, newest first
pub async fn list_entries(State(state): State<AppState>) -> AppResult<Json<Vec<MaterialEntry>>> {
    let service = MaterialService::new(state.db);
    let entries = service.list_entries().await?;
    Ok(Json(entries))
}
