//! Inertia visits.
//!
//! DESIGN
//! ======
//! A visit is an XHR carrying `X-Inertia: true` (plus the asset version the
//! page was rendered with). The server answers with one of:
//!
//! - `200` + `X-Inertia: true` and a JSON page: swap to that page.
//! - `409` + `X-Inertia-Location`: assets changed or the target lives outside
//!   the app; do a full browser navigation.
//! - anything else: the visit failed.
//!
//! Classification is a pure function so it can be tested natively; only
//! `send` touches the network (browser builds).

#[cfg(test)]
#[path = "inertia_test.rs"]
mod inertia_test;

use protocol::{Page, X_INERTIA, X_INERTIA_VERSION};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// One request to the server on behalf of the current page.
#[derive(Clone, Debug, PartialEq)]
pub struct Visit {
    pub method: Method,
    pub url: String,
    /// JSON body; ignored for `GET`.
    pub data: Option<Value>,
    /// Asset version of the page issuing the visit.
    pub version: Option<String>,
}

impl Visit {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), data: None, version: None }
    }

    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    /// Request headers for this visit.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            (X_INERTIA, "true".to_owned()),
            ("X-Requested-With", "XMLHttpRequest".to_owned()),
            ("Accept", "text/html, application/xhtml+xml".to_owned()),
        ];
        if let Some(version) = &self.version {
            headers.push((X_INERTIA_VERSION, version.clone()));
        }
        if self.sends_body() {
            headers.push(("Content-Type", "application/json".to_owned()));
        }
        headers
    }

    fn sends_body(&self) -> bool {
        self.method != Method::Get && self.data.is_some()
    }
}

/// What the server told us to do next.
#[derive(Clone, Debug, PartialEq)]
pub enum VisitOutcome {
    Page(Page),
    Location(String),
    Failed(String),
}

/// Map a raw response to an outcome.
pub fn classify(status: u16, inertia: bool, location: Option<&str>, body: &str) -> VisitOutcome {
    if status == 409 {
        if let Some(url) = location.filter(|url| !url.is_empty()) {
            return VisitOutcome::Location(url.to_owned());
        }
    }
    if !(200..300).contains(&status) {
        return VisitOutcome::Failed(format!("visit failed: {status}"));
    }
    if !inertia {
        return VisitOutcome::Failed("response is not an inertia page".to_owned());
    }
    match serde_json::from_str::<Page>(body) {
        Ok(page) => VisitOutcome::Page(page),
        Err(e) => VisitOutcome::Failed(format!("invalid page response: {e}")),
    }
}

/// Send a visit and classify the response. Browser builds only.
#[cfg(feature = "csr")]
pub async fn send(visit: Visit) -> VisitOutcome {
    use gloo_net::http::Request;

    let mut builder = match visit.method {
        Method::Get => Request::get(&visit.url),
        Method::Post => Request::post(&visit.url),
        Method::Put => Request::put(&visit.url),
        Method::Patch => Request::patch(&visit.url),
        Method::Delete => Request::delete(&visit.url),
    };
    for (name, value) in visit.headers() {
        builder = builder.header(name, &value);
    }

    let request = match (&visit.data, visit.sends_body()) {
        (Some(data), true) => builder.body(data.to_string()),
        _ => builder.build(),
    };
    let request = match request {
        Ok(request) => request,
        Err(e) => return VisitOutcome::Failed(format!("invalid request: {e}")),
    };

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => return VisitOutcome::Failed(format!("network error: {e}")),
    };
    let headers = response.headers();
    let inertia = headers.get(X_INERTIA).is_some_and(|value| value.eq_ignore_ascii_case("true"));
    let location = headers.get(protocol::X_INERTIA_LOCATION);
    let body = response.text().await.unwrap_or_default();
    classify(response.status(), inertia, location.as_deref(), &body)
}
