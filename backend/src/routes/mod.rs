//! Route definitions for the Water Plant Inventory API

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - raw materials and replenishment entries
        .nest("/materials", material_routes())
        // Protected routes - production runs
        .nest("/production", production_routes())
        // Protected routes - reports and exports
        .nest("/reports", report_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
}

/// Raw material routes (protected)
fn material_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_materials).post(handlers::create_material),
        )
        // Global replenishment history, newest first
        .route("/entries", get(handlers::list_entries))
        .route("/:material_id", put(handlers::update_material))
        .route("/:material_id/entries", post(handlers::record_entry))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Production routes (protected)
fn production_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(handlers::list_products))
        .route("/runs", get(handlers::list_runs).post(handlers::create_run))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Reporting routes (protected)
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/reorder", get(handlers::get_reorder_report))
        .route("/critical", get(handlers::get_critical_materials))
        .route_layer(middleware::from_fn(auth_middleware))
}
