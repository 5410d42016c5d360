use super::*;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderValue, Request};
use axum::routing::get;
use serde_json::json;
use tower::ServiceExt;

use crate::state::test_helpers::{development_state, production_state};

fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(*name, HeaderValue::from_static(value));
    }
    map
}

async fn show(inertia: Inertia) -> Result<InertiaResponse, InertiaError> {
    inertia.render("Auth/Login", json!({"greeting": "hi", "secret": 1}))
}

fn app(state: AppState) -> Router {
    Router::new().route("/login", get(show)).with_state(state)
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

// =============================================================================
// REQUEST PARSING
// =============================================================================

#[test]
fn request_detects_xhr_and_version() {
    let req = InertiaRequest::from_headers(
        "/login".to_owned(),
        &headers(&[("X-Inertia", "true"), ("X-Inertia-Version", "abc")]),
    );
    assert!(req.is_xhr);
    assert_eq!(req.version.as_deref(), Some("abc"));
}

#[test]
fn request_without_headers_is_plain_visit() {
    let req = InertiaRequest::from_headers("/".to_owned(), &HeaderMap::new());
    assert!(!req.is_xhr);
    assert!(req.version.is_none());
    assert!(req.partial_data.is_none());
}

#[test]
fn empty_version_header_counts_as_missing() {
    let req = InertiaRequest::from_headers("/".to_owned(), &headers(&[("X-Inertia-Version", "  ")]));
    assert!(req.version.is_none());
}

#[test]
fn partial_data_is_split_and_trimmed() {
    let req = InertiaRequest::from_headers(
        "/".to_owned(),
        &headers(&[("X-Inertia-Partial-Component", "Auth/Login"), ("X-Inertia-Partial-Data", "a, b,,c")]),
    );
    assert_eq!(req.partial_data, Some(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]));
}

// =============================================================================
// VERSION CHECK
// =============================================================================

#[test]
fn stale_only_for_xhr_get_with_mismatched_version() {
    let xhr = InertiaRequest::from_headers("/".to_owned(), &headers(&[("X-Inertia", "true"), ("X-Inertia-Version", "old")]));
    assert!(xhr.is_stale(&Method::GET, Some("new")));
    assert!(!xhr.is_stale(&Method::GET, Some("old")));
    assert!(!xhr.is_stale(&Method::POST, Some("new")));

    let plain = InertiaRequest::from_headers("/".to_owned(), &HeaderMap::new());
    assert!(!plain.is_stale(&Method::GET, Some("new")));
}

#[test]
fn xhr_without_version_is_current_in_development() {
    let xhr = InertiaRequest::from_headers("/".to_owned(), &headers(&[("X-Inertia", "true")]));
    assert!(!xhr.is_stale(&Method::GET, None));
}

// =============================================================================
// PARTIAL RELOADS
// =============================================================================

#[test]
fn partial_props_keep_requested_keys_and_errors() {
    let req = InertiaRequest::from_headers(
        "/".to_owned(),
        &headers(&[("X-Inertia-Partial-Component", "Auth/Login"), ("X-Inertia-Partial-Data", "greeting")]),
    );
    let props = req.partial_props("Auth/Login", json!({"greeting": "hi", "secret": 1, "errors": {}}));
    assert_eq!(props, json!({"greeting": "hi", "errors": {}}));
}

#[test]
fn partial_props_ignore_other_components() {
    let req = InertiaRequest::from_headers(
        "/".to_owned(),
        &headers(&[("X-Inertia-Partial-Component", "Dashboard/Index"), ("X-Inertia-Partial-Data", "greeting")]),
    );
    let props = json!({"greeting": "hi", "secret": 1});
    assert_eq!(req.partial_props("Auth/Login", props.clone()), props);
}

// =============================================================================
// RENDERING
// =============================================================================

#[tokio::test]
async fn first_visit_renders_html_shell_with_page() {
    let response = app(production_state())
        .oneshot(Request::get("/login?next=%2F").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"<div id="app" data-page="{&quot;component&quot;:&quot;Auth/Login&quot;"#));
    assert!(html.contains("&quot;url&quot;:&quot;/login?next=%2F&quot;"));
    assert!(html.contains(r#"<script type="module" src="/assets/index-4f2a.js"></script>"#));
    assert!(html.contains(r#"<link rel="stylesheet" href="/assets/index-77b1.css" />"#));
}

#[tokio::test]
async fn xhr_visit_returns_json_page() {
    let state = production_state();
    let version = state.vite.version().unwrap().to_owned();
    let response = app(state)
        .oneshot(
            Request::get("/login")
                .header("X-Inertia", "true")
                .header("X-Inertia-Version", version.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("X-Inertia").unwrap(), "true");
    assert_eq!(response.headers().get(header::VARY).unwrap(), "X-Inertia");
    let page: Page = serde_json::from_str(&body_string(response).await).expect("page json");
    assert_eq!(page.component, "Auth/Login");
    assert_eq!(page.props["greeting"], "hi");
    assert_eq!(page.props["errors"], json!({}));
    assert_eq!(page.version, Some(version));
}

#[tokio::test]
async fn stale_xhr_visit_gets_409_with_location() {
    let response = app(production_state())
        .oneshot(
            Request::get("/login")
                .header("X-Inertia", "true")
                .header("X-Inertia-Version", "outdated")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(response.headers().get("X-Inertia-Location").unwrap(), "/login");
}

#[tokio::test]
async fn development_shell_loads_entry_from_dev_server() {
    let response = app(development_state("http://127.0.0.1:5173"))
        .oneshot(Request::get("/login").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let html = body_string(response).await;
    assert!(html.contains(r#"<script type="module" src="http://127.0.0.1:5173/index.js"></script>"#));
    assert!(html.contains("&quot;version&quot;:null"));
}

#[tokio::test]
async fn missing_manifest_entry_is_server_error() {
    let mut state = production_state();
    let mut config = (*state.config).clone();
    config.frontend.entry = "missing.js".to_owned();
    state.config = std::sync::Arc::new(config);

    let response = app(state).oneshot(Request::get("/login").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// HELPERS
// =============================================================================

#[test]
fn escape_attribute_covers_html_specials() {
    assert_eq!(escape_attribute(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
}

#[test]
fn html_shell_embeds_escaped_page() {
    let page = Page::new("Auth/Login", json!({"errors": {}, "note": "it's <b>"}), "/", None);
    let html = html_shell(&page, "<script></script>").expect("shell");
    assert!(html.contains("it&#39;s &lt;b&gt;"));
    assert!(html.contains("<title>Ping CRM</title>"));
}
