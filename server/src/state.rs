//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! into the `Inertia` extractor via `FromRef`. Everything is read-only after
//! startup: configuration, the resolved frontend assets, and an HTTP client
//! used to proxy dev assets.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::frontend::vite::Vite;

/// Clone is required by Axum; all inner fields are Arc-wrapped or cheap clones.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub vite: Arc<Vite>,
    pub http: reqwest::Client,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, vite: Vite) -> Self {
        Self { config: Arc::new(config), vite: Arc::new(vite), http: reqwest::Client::new() }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
