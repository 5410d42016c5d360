//! Unix socket paths for the dev server's socket mode.
//!
//! A socket left behind by a crashed run blocks the next bind, so it is
//! removed before binding and again at exit. Only sockets are ever removed:
//! any other file at the path is reported and left alone.

use std::io;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SocketPathError {
    #[error("{} exists and is not a socket; refusing to replace it", .path.display())]
    NotASocket { path: PathBuf },
    #[error("could not remove socket {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Remove the socket at `path` if there is one. Returns whether anything was removed.
///
/// # Errors
///
/// Returns [`SocketPathError::NotASocket`] when something other than a socket
/// occupies `path`, and [`SocketPathError::Io`] when inspecting or removing it fails.
pub fn remove_socket(path: &Path) -> Result<bool, SocketPathError> {
    let io_error = |source| SocketPathError::Io { path: path.to_path_buf(), source };

    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(io_error(e)),
    };
    if !metadata.file_type().is_socket() {
        return Err(SocketPathError::NotASocket { path: path.to_path_buf() });
    }

    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error(e)),
    }
}

#[cfg(test)]
#[path = "socket_test.rs"]
mod tests;
