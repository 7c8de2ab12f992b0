//! clinrep-server
//!
//! HTTP surface for report preview and export. The router is exposed here
//! so integration tests can drive it without binding a socket.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let assets = ServeDir::new(state.templates.dir());

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/generate-preview", post(routes::reports::generate_preview))
        .route("/download-preview-pdf", post(routes::reports::download_pdf))
        .route("/download-preview-doc", post(routes::reports::download_doc))
        // Images and stylesheets referenced by the template
        .nest_service("/report_template", assets)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
