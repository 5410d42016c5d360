//! Frontend asset resolution.
//!
//! DESIGN
//! ======
//! In development the page shell points straight at the dev server, whose URL
//! the dev server publishes to `<dist>/.vite-dev` through the bridge. The file
//! may appear after this process starts, so loading polls until a deadline.
//! In production the build's `manifest.json` maps entry names to hashed files
//! and stylesheets; the manifest hash doubles as the Inertia asset version.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dev_bridge::BridgeFile;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::{FrontendConfig, FrontendMode};

const MANIFEST_FILE: &str = "manifest.json";
const DEV_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub file: String,
    #[serde(default)]
    pub css: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ViteError {
    #[error("could not find dev server information at {}; start the frontend dev server first", .path.display())]
    DevServerNotFound { path: PathBuf },
    #[error("could not read {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("could not find build manifest at {}; build the frontend first", .path.display())]
    BuildManifestNotFound { path: PathBuf },
    #[error("failed to parse manifest: {0}")]
    InvalidManifest(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vite {
    Production { manifest: HashMap<String, ManifestEntry>, version: String },
    Development { dev_server: String },
}

impl Vite {
    /// Load according to the configured mode.
    ///
    /// # Errors
    ///
    /// See [`Vite::development`] and [`Vite::production`].
    pub async fn load(config: &FrontendConfig) -> Result<Self, ViteError> {
        match config.mode {
            FrontendMode::Development => {
                Self::development(&BridgeFile::in_dir(&config.dist_dir), config.dev_wait, DEV_POLL_INTERVAL).await
            }
            FrontendMode::Production => Self::production(&config.dist_dir),
        }
    }

    /// Wait up to `wait` for the dev server to publish its URL, checking every `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`ViteError::DevServerNotFound`] on timeout and [`ViteError::Io`]
    /// if the bridge file exists but cannot be read.
    pub async fn development(bridge: &BridgeFile, wait: Duration, interval: Duration) -> Result<Self, ViteError> {
        let deadline = tokio::time::Instant::now() + wait;
        loop {
            let read = bridge.read().map_err(|source| ViteError::Io { path: bridge.path().to_path_buf(), source })?;
            if let Some(url) = read {
                let dev_server = url.trim_end_matches('/').to_owned();
                tracing::info!(%dev_server, "using frontend dev server");
                return Ok(Self::Development { dev_server });
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(ViteError::DevServerNotFound { path: bridge.path().to_path_buf() });
            }
            tracing::debug!(path = %bridge.path().display(), "waiting for dev server address");
            tokio::time::sleep(interval).await;
        }
    }

    /// Read and parse `<dist>/manifest.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ViteError::BuildManifestNotFound`] when missing and
    /// [`ViteError::InvalidManifest`] when it is not valid manifest JSON.
    pub fn production(dist_dir: &Path) -> Result<Self, ViteError> {
        let path = dist_dir.join(MANIFEST_FILE);
        let raw = match std::fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ViteError::BuildManifestNotFound { path });
            }
            Err(source) => return Err(ViteError::Io { path, source }),
        };
        Self::from_manifest_bytes(&raw)
    }

    /// Build a production resolver from raw manifest bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ViteError::InvalidManifest`] for malformed JSON.
    pub fn from_manifest_bytes(raw: &[u8]) -> Result<Self, ViteError> {
        let manifest = serde_json::from_slice(raw)?;
        let version = format!("{:x}", Sha256::digest(raw));
        tracing::info!(%version, "loaded frontend build manifest");
        Ok(Self::Production { manifest, version })
    }

    /// Asset version for Inertia; `None` in development.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Production { version, .. } => Some(version),
            Self::Development { .. } => None,
        }
    }

    #[must_use]
    pub fn dev_server(&self) -> Option<&str> {
        match self {
            Self::Development { dev_server } => Some(dev_server),
            Self::Production { .. } => None,
        }
    }

    /// HTML tags that load `entry`. `None` if a production manifest lacks it.
    #[must_use]
    pub fn asset(&self, entry: &str) -> Option<String> {
        match self {
            Self::Development { dev_server } => Some(format!(r#"<script type="module" src="{dev_server}/{entry}"></script>"#)),
            Self::Production { manifest, .. } => {
                let entry = manifest.get(entry)?;
                let mut tags = String::new();
                for css in &entry.css {
                    let _ = writeln!(tags, r#"<link rel="stylesheet" href="/{css}" />"#);
                }
                let _ = write!(tags, r#"<script type="module" src="/{}"></script>"#, entry.file);
                Some(tags)
            }
        }
    }
}

#[cfg(test)]
#[path = "vite_test.rs"]
mod tests;
