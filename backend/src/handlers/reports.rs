//! Reporting handlers for the dashboard, reorder report, and CSV export

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::reporting::{DashboardReport, ReportingService};
use crate::AppState;
use shared::reorder::CriticalMaterial;

#[derive(Deserialize)]
pub struct ReorderQuery {
    pub format: Option<String>, // "json" or "csv"
}

#[derive(Deserialize)]
pub struct CriticalQuery {
    pub limit: Option<usize>,
}

/// Get the dashboard report
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardReport>> {
    let service = ReportingService::new(state.db.clone());
    let report = service
        .dashboard(state.config.report.top_consumed_limit)
        .await?;
    Ok(Json(report))
}

/// Get the reorder report, as JSON or as a CSV download
pub async fn get_reorder_report(
    State(state): State<AppState>,
    Query(query): Query<ReorderQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db.clone());

    if query.format.as_deref() == Some("csv") {
        let csv = service.export_reorder_csv().await?;
        let filename = format!(
            "attachment; filename=\"reporte_reorden_{}.csv\"",
            state.config.report.csv_suffix
        );
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (header::CONTENT_DISPOSITION, filename),
            ],
            csv,
        )
            .into_response())
    } else {
        let rows = service.reorder_report().await?;
        Ok(Json(rows).into_response())
    }
}

/// Get the most critical materials, ranked by stock-to-reorder-point ratio
pub async fn get_critical_materials(
    State(state): State<AppState>,
    Query(query): Query<CriticalQuery>,
) -> AppResult<Json<Vec<CriticalMaterial>>> {
    let limit = query.limit.unwrap_or(state.config.report.critical_limit);
    let service = ReportingService::new(state.db.clone());
    let ranking = service.critical_ranking(limit).await?;
    Ok(Json(ranking))
}
