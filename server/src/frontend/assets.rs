//! `/assets` service.
//!
//! Production serves the built files from `<dist>/assets`. Development
//! forwards the request to the dev server found through the bridge file so
//! pages can reference same-origin asset URLs in both modes.

use axum::Router;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Router mounted at `/assets`.
pub fn router(state: AppState) -> Router {
    match state.vite.dev_server() {
        Some(_) => Router::new().route("/{*path}", get(proxy)).with_state(state),
        None => {
            let dir = state.config.frontend.dist_dir.join("assets");
            Router::new().fallback_service(ServeDir::new(dir))
        }
    }
}

/// URL of `path` on the dev server.
#[must_use]
pub fn dev_asset_url(dev_server: &str, path: &str) -> String {
    format!("{}/assets/{}", dev_server.trim_end_matches('/'), path.trim_start_matches('/'))
}

async fn proxy(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    let Some(dev_server) = state.vite.dev_server() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let url = dev_asset_url(dev_server, &path);

    let upstream = match state.http.get(&url).send().await {
        Ok(upstream) => upstream,
        Err(e) => {
            tracing::warn!(error = %e, %url, "dev server unreachable");
            return (StatusCode::BAD_GATEWAY, "dev server unreachable").into_response();
        }
    };

    let status = StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_owned();

    match upstream.bytes().await {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, content_type)], Body::from(bytes)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, %url, "dev server response truncated");
            (StatusCode::BAD_GATEWAY, "dev server response truncated").into_response()
        }
    }
}

#[cfg(test)]
#[path = "assets_test.rs"]
mod tests;
