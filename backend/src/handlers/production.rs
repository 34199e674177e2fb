//! HTTP handlers for production run endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::production::{CatalogProduct, CreateRunInput, ProductionService};
use crate::AppState;
use shared::models::ProductionRun;

/// List the product catalog with recipes
pub async fn list_products() -> Json<Vec<CatalogProduct>> {
    Json(ProductionService::catalog())
}

/// Register a production run, deducting consumed materials
pub async fn create_run(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateRunInput>,
) -> AppResult<(StatusCode, Json<ProductionRun>)> {
    let service = ProductionService::new(state.db);
    let run = service.create_run(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(run)))
}

/// List production runs, newest first
pub async fn list_runs(State(state): State<AppState>) -> AppResult<Json<Vec<ProductionRun>>> {
    let service = ProductionService::new(state.db);
    let runs = service.list_runs().await?;
    Ok(Json(runs))
}
