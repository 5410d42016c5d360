//! Inertia server adapter.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client is a single-page app that never fetches data on its own: every
//! navigation is a request answered with a page object (component name +
//! props). The first load gets an HTML shell with the page embedded in
//! `data-page`; later visits carry `X-Inertia: true` and get the page as JSON.
//!
//! VERSIONING
//! ==========
//! Production pages carry the build manifest hash. When an in-app GET arrives
//! with a stale version the extractor answers `409` + `X-Inertia-Location`,
//! which makes the client do a full reload and pick up the new assets.

use axum::Json;
use axum::extract::{FromRef, FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use protocol::{
    ERRORS_PROP, Page, X_INERTIA, X_INERTIA_LOCATION, X_INERTIA_PARTIAL_COMPONENT, X_INERTIA_PARTIAL_DATA,
    X_INERTIA_VERSION, with_errors_prop,
};
use serde::Serialize;
use serde_json::Value;

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum InertiaError {
    #[error("failed to serialize page props: {0}")]
    Props(#[from] serde_json::Error),
    #[error("frontend entry {0:?} is missing from the build manifest")]
    MissingEntry(String),
}

impl IntoResponse for InertiaError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "inertia render failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// Inertia-relevant facts about the incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InertiaRequest {
    /// Path and query as the client sent it (before any nesting).
    pub url: String,
    pub is_xhr: bool,
    pub version: Option<String>,
    pub partial_component: Option<String>,
    pub partial_data: Option<Vec<String>>,
}

impl InertiaRequest {
    #[must_use]
    pub fn from_parts(parts: &Parts) -> Self {
        let uri = parts.extensions.get::<OriginalUri>().map_or(&parts.uri, |original| &original.0);
        let url = uri.path_and_query().map_or_else(|| uri.path().to_owned(), ToString::to_string);
        Self::from_headers(url, &parts.headers)
    }

    #[must_use]
    pub fn from_headers(url: String, headers: &HeaderMap) -> Self {
        let text = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };

        Self {
            url,
            is_xhr: text(X_INERTIA).is_some_and(|value| value.eq_ignore_ascii_case("true")),
            version: text(X_INERTIA_VERSION),
            partial_component: text(X_INERTIA_PARTIAL_COMPONENT),
            partial_data: text(X_INERTIA_PARTIAL_DATA).map(|raw| {
                raw.split(',').map(str::trim).filter(|key| !key.is_empty()).map(str::to_owned).collect()
            }),
        }
    }

    /// An in-app GET whose asset version no longer matches the server's.
    #[must_use]
    pub fn is_stale(&self, method: &Method, current_version: Option<&str>) -> bool {
        method == Method::GET && self.is_xhr && self.version.as_deref() != current_version
    }

    /// Apply a partial reload: when it targets `component`, keep only the
    /// requested props (errors are always kept).
    #[must_use]
    pub fn partial_props(&self, component: &str, props: Value) -> Value {
        let (Some(target), Some(only)) = (&self.partial_component, &self.partial_data) else {
            return props;
        };
        if target != component {
            return props;
        }
        match props {
            Value::Object(map) => Value::Object(
                map.into_iter().filter(|(key, _)| key == ERRORS_PROP || only.iter().any(|o| o == key)).collect(),
            ),
            other => other,
        }
    }
}

// =============================================================================
// EXTRACTOR
// =============================================================================

/// Per-request renderer. Use as a handler parameter.
#[derive(Clone)]
pub struct Inertia {
    state: AppState,
    request: InertiaRequest,
}

impl<S> FromRequestParts<S> for Inertia
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let request = InertiaRequest::from_parts(parts);

        if request.is_stale(&parts.method, state.vite.version()) {
            tracing::debug!(url = %request.url, client = ?request.version, "stale asset version; forcing reload");
            return Err(location_conflict(request.url));
        }

        Ok(Self { state, request })
    }
}

impl Inertia {
    /// Render `component` with `props`. Props always gain an `errors` object.
    ///
    /// # Errors
    ///
    /// Returns [`InertiaError::Props`] if props fail to serialize and
    /// [`InertiaError::MissingEntry`] if the HTML shell cannot reference the
    /// frontend entry.
    pub fn render<T: Serialize>(&self, component: &str, props: T) -> Result<InertiaResponse, InertiaError> {
        let props = with_errors_prop(serde_json::to_value(props)?);
        let props = self.request.partial_props(component, props);
        let page = Page::new(component, props, self.request.url.clone(), self.state.vite.version().map(str::to_owned));

        if self.request.is_xhr {
            return Ok(InertiaResponse::Json(page));
        }

        let entry = &self.state.config.frontend.entry;
        let assets = self.state.vite.asset(entry).ok_or_else(|| InertiaError::MissingEntry(entry.clone()))?;
        Ok(InertiaResponse::Html(html_shell(&page, &assets)?))
    }

    /// Send the client somewhere outside the app (or force a full reload).
    #[must_use]
    pub fn location(&self, url: impl Into<String>) -> Response {
        let url = url.into();
        if self.request.is_xhr { location_conflict(url) } else { Redirect::to(&url).into_response() }
    }
}

fn location_conflict(url: String) -> Response {
    (StatusCode::CONFLICT, [(X_INERTIA_LOCATION, url)]).into_response()
}

// =============================================================================
// RESPONSE
// =============================================================================

#[derive(Debug)]
pub enum InertiaResponse {
    Json(Page),
    Html(String),
}

impl IntoResponse for InertiaResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Json(page) => ([(X_INERTIA, "true"), (header::VARY.as_str(), X_INERTIA)], Json(page)).into_response(),
            Self::Html(html) => ([(header::VARY.as_str(), X_INERTIA)], Html(html)).into_response(),
        }
    }
}

fn html_shell(page: &Page, assets: &str) -> Result<String, serde_json::Error> {
    let data_page = escape_attribute(&serde_json::to_string(page)?);
    Ok(format!(
        r#"<!doctype html>
<html lang="en">
    <head>
        <title>{title}</title>
        <meta charset="UTF-8" />
        <meta name="viewport" content="width=device-width, initial-scale=1.0" />
        {assets}
    </head>
    <body>
        <div id="app" data-page="{data_page}"></div>
    </body>
</html>
"#,
        title = protocol::APP_NAME,
    ))
}

/// Escape text for use inside a double-quoted HTML attribute.
#[must_use]
pub fn escape_attribute(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "inertia_test.rs"]
mod tests;
