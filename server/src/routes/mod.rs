//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page route answers through the `Inertia` extractor, so the same
//! handler serves both the first HTML load and later in-app JSON visits.
//! Frontend assets live under `/assets` (built files in production, a proxy
//! to the dev server in development).

pub mod auth;
pub mod dashboard;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::frontend::assets;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(auth::show_login))
        .route("/login", get(auth::show_login).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(dashboard::index))
        .route("/healthz", get(healthz))
        .nest_service("/assets", assets::router(state.clone()))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
