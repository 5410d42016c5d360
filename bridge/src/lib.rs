//! Dev-server address bridge.
//!
//! Publishes a frontend dev server's listening URL to a well-known file
//! (`dist/.vite-dev`) so the `pingcrm` backend can find it, and removes the
//! file when the dev server exits. The backend reads the same file through
//! [`BridgeFile::read`].

pub mod address;
pub mod bridge;
pub mod exit;
pub mod file;
#[cfg(unix)]
pub mod socket;

pub use address::{AddressFamily, ListenAddress};
pub use bridge::{BridgeError, BridgeState, DevBridge, ListenNotifier, setup};
pub use exit::{
    CLEANUP_FAILED_EXIT_CODE, CleanupFailed, ExitGuard, ExitHooks, ExitSignal, HookError, HookRun, listen_for_signals,
};
pub use file::{BRIDGE_FILE_NAME, BridgeFile, DEFAULT_BRIDGE_PATH};
#[cfg(unix)]
pub use socket::{SocketPathError, remove_socket};
