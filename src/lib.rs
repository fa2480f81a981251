// src/lib.rs

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod views;

use crate::{config::AppState, docs::ApiDoc};

// Monta todas as rotas; usado pelo main e pelos testes de integração.
pub fn router(app_state: AppState) -> Router {
    let page_routes = Router::new()
        .route("/", get(handlers::dashboard::dashboard_page))
        .route("/dashboard", get(handlers::dashboard::dashboard_page));

    let dashboard_routes = Router::new()
        .route("/overview", get(handlers::dashboard::get_overview));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(page_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
