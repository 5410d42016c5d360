//! Server configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_FRONTEND_DIST: &str = "frontend/dist";
pub const DEFAULT_FRONTEND_ENTRY: &str = "index.js";
pub const DEFAULT_VITE_DEV_WAIT_SECS: u64 = 10;
pub const DEFAULT_DEMO_EMAIL: &str = "johndoe@example.com";
pub const DEFAULT_DEMO_PASSWORD: &str = "secret";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Where frontend assets come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontendMode {
    /// Assets served by a running dev server discovered through the bridge file.
    Development,
    /// Assets built into `dist/` and described by `manifest.json`.
    Production,
}

impl FrontendMode {
    /// Debug builds default to development, release builds to production.
    #[must_use]
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) { Self::Development } else { Self::Production }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    pub mode: FrontendMode,
    pub dist_dir: PathBuf,
    /// Entry module referenced by the HTML shell.
    pub entry: String,
    /// How long to wait for the dev server to publish its address.
    pub dev_wait: Duration,
}

/// Credentials accepted by the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub frontend: FrontendConfig,
    pub demo: DemoAccount,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 8000
    /// - `FRONTEND_MODE`: `development` or `production`; build profile decides when absent
    /// - `FRONTEND_DIST`: default `frontend/dist`
    /// - `FRONTEND_ENTRY`: default `index.js`
    /// - `VITE_DEV_WAIT_SECS`: default 10
    /// - `DEMO_EMAIL` / `DEMO_PASSWORD`: default `johndoe@example.com` / `secret`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for unparseable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let mode = parse_mode(std::env::var("FRONTEND_MODE").ok().as_deref())?;
        let dev_wait_secs = parse_secs("VITE_DEV_WAIT_SECS", std::env::var("VITE_DEV_WAIT_SECS").ok().as_deref())?;

        let frontend = FrontendConfig {
            mode,
            dist_dir: std::env::var("FRONTEND_DIST").map_or_else(|_| PathBuf::from(DEFAULT_FRONTEND_DIST), PathBuf::from),
            entry: env_or("FRONTEND_ENTRY", DEFAULT_FRONTEND_ENTRY).trim_start_matches('/').to_owned(),
            dev_wait: Duration::from_secs(dev_wait_secs),
        };
        let demo = DemoAccount {
            email: env_or("DEMO_EMAIL", DEFAULT_DEMO_EMAIL),
            password: env_or("DEMO_PASSWORD", DEFAULT_DEMO_PASSWORD),
        };

        Ok(Self { port, frontend, demo })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { var: "PORT", value: value.to_owned() }),
    }
}

fn parse_mode(raw: Option<&str>) -> Result<FrontendMode, ConfigError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(FrontendMode::for_build());
    };
    match value.to_ascii_lowercase().as_str() {
        "development" | "dev" => Ok(FrontendMode::Development),
        "production" | "prod" => Ok(FrontendMode::Production),
        _ => Err(ConfigError::Invalid { var: "FRONTEND_MODE", value: value.to_owned() }),
    }
}

fn parse_secs(var: &'static str, raw: Option<&str>) -> Result<u64, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_VITE_DEV_WAIT_SECS),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { var, value: value.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
