//! The bridge file: a fixed-path handoff of the dev server URL.
//!
//! DESIGN
//! ======
//! One bare URL per file, no trailing newline, no schema. Writes overwrite
//! (last writer wins) and are synchronous so the file exists before the dev
//! server starts accepting requests. There is no locking; readers that start
//! before the file appears are expected to poll.

use std::io;
use std::path::{Path, PathBuf};

/// File name the backend looks for inside the frontend build output directory.
pub const BRIDGE_FILE_NAME: &str = ".vite-dev";

/// Default location, relative to the frontend project root.
pub const DEFAULT_BRIDGE_PATH: &str = "./dist/.vite-dev";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeFile {
    path: PathBuf,
}

impl BridgeFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Bridge file inside a build output directory (`<dist>/.vite-dev`).
    #[must_use]
    pub fn in_dir(dist: impl AsRef<Path>) -> Self {
        Self::new(dist.as_ref().join(BRIDGE_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Replace the file contents with `url`, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Propagates any I/O failure creating the directory or writing the file.
    pub fn write(&self, url: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, url)
    }

    /// Read the published URL. A missing file is `Ok(None)`; surrounding
    /// whitespace is ignored so hand-edited files still work.
    ///
    /// # Errors
    ///
    /// Returns I/O errors other than `NotFound`, and `InvalidData` for non-UTF-8 content.
    pub fn read(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let url = contents.trim();
                Ok((!url.is_empty()).then(|| url.to_owned()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete the file if present. Safe to call any number of times.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures other than the file already being gone.
    pub fn clean(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl Default for BridgeFile {
    fn default() -> Self {
        Self::new(DEFAULT_BRIDGE_PATH)
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
