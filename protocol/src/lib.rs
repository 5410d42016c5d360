//! Shared Inertia page model for the `PingCRM` server and client.
//!
//! This crate owns the wire representation exchanged between the `pingcrm`
//! backend and the `client` frontend: the page object, the protocol headers,
//! the field-level error bag and the form records both sides agree on.
//! Props stay flexible (`serde_json::Value`) since each page defines its own.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// HEADERS
// =============================================================================

/// Set to `true` by the client on every in-app visit, echoed by the server on page responses.
pub const X_INERTIA: &str = "X-Inertia";

/// Asset version the client was booted with.
pub const X_INERTIA_VERSION: &str = "X-Inertia-Version";

/// Target of a forced full-page visit (409 responses).
pub const X_INERTIA_LOCATION: &str = "X-Inertia-Location";

/// Component a partial reload applies to.
pub const X_INERTIA_PARTIAL_COMPONENT: &str = "X-Inertia-Partial-Component";

/// Comma-separated prop names requested by a partial reload.
pub const X_INERTIA_PARTIAL_DATA: &str = "X-Inertia-Partial-Data";

/// Prop key carrying field-level validation messages.
pub const ERRORS_PROP: &str = "errors";

/// Application name used in document titles.
pub const APP_NAME: &str = "Ping CRM";

// =============================================================================
// PAGE NAMES
// =============================================================================

/// Logical page names understood by the client's page registry.
pub mod pages {
    pub const AUTH_LOGIN: &str = "Auth/Login";
    pub const DASHBOARD_INDEX: &str = "Dashboard/Index";
}

/// Endpoint the login form posts to.
pub const LOGIN_ENDPOINT: &str = "/login";

// =============================================================================
// TYPES
// =============================================================================

/// Field name -> message. Ordered so serialized pages are stable.
pub type Errors = BTreeMap<String, String>;

/// The page object: everything the client needs to render one screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Logical component name, e.g. `"Auth/Login"`.
    pub component: String,
    /// Component props; always a JSON object.
    pub props: Value,
    /// Request URL (path + query) the page was rendered for.
    pub url: String,
    /// Asset version, `None` while serving from a dev server.
    pub version: Option<String>,
}

impl Page {
    #[must_use]
    pub fn new(component: impl Into<String>, props: Value, url: impl Into<String>, version: Option<String>) -> Self {
        Self { component: component.into(), props, url: url.into(), version }
    }

    /// Field-level errors carried in the `errors` prop. Non-string messages are skipped.
    #[must_use]
    pub fn errors(&self) -> Errors {
        self.props
            .get(ERRORS_PROP)
            .and_then(Value::as_object)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|(field, message)| message.as_str().map(|m| (field.clone(), m.to_owned())))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the page reports any validation error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }
}

/// Ensure `props` is an object that carries an `errors` entry.
///
/// Non-object props are wrapped under `"value"` so the page stays well formed.
#[must_use]
pub fn with_errors_prop(props: Value) -> Value {
    let mut map = match props {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("value".to_owned(), other);
            map
        }
    };
    map.entry(ERRORS_PROP).or_insert_with(|| Value::Object(Map::new()));
    Value::Object(map)
}

/// Values submitted by the login form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self { email: "johndoe@example.com".to_owned(), password: "secret".to_owned(), remember: false }
    }
}

/// Document title for a page: `"Login - Ping CRM"`, or the bare app name.
#[must_use]
pub fn page_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(title) if !title.is_empty() => format!("{title} - {APP_NAME}"),
        _ => APP_NAME.to_owned(),
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
