//! Dev-server address bridge.
//!
//! SYSTEM CONTEXT
//! ==============
//! A frontend dev server and the `pingcrm` backend run as separate processes.
//! The dev server binds wherever the OS lets it; the backend needs that URL to
//! point pages at dev assets. The bridge publishes the bound address to the
//! bridge file as soon as the server is listening, and removes it when the
//! process ends so the backend never proxies to a dead server.
//!
//! STATE MACHINE
//! =============
//! `Idle -> Armed -> Written -> Cleaned`, with `Armed -> Cleaned` when the
//! process ends before the server ever listens. The listen notification is a
//! one-shot value consumed on use.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use crate::address::ListenAddress;
use crate::exit::{ExitHooks, listen_for_signals};
use crate::file::BridgeFile;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to write dev server address to {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error("failed to remove {path}: {source}")]
    Clean { path: String, source: io::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Idle,
    Armed,
    Written,
    Cleaned,
}

#[derive(Debug)]
pub struct DevBridge {
    file: BridgeFile,
    state: Mutex<BridgeState>,
}

impl DevBridge {
    #[must_use]
    pub fn new(file: BridgeFile) -> Self {
        Self { file, state: Mutex::new(BridgeState::Idle) }
    }

    #[must_use]
    pub fn file(&self) -> &BridgeFile {
        &self.file
    }

    #[must_use]
    pub fn state(&self) -> BridgeState {
        *self.lock_state()
    }

    /// Register cleanup with `hooks` and hand out the listen notifier.
    ///
    /// Cleanup is bound at most once per registry; the returned flag is `true`
    /// when this call performed the binding. A failed removal fails the
    /// cleanup pass (see [`ExitHooks::run`]).
    pub fn arm(self: &Arc<Self>, hooks: &ExitHooks) -> (ListenNotifier, bool) {
        {
            let mut state = self.lock_state();
            if *state == BridgeState::Idle {
                *state = BridgeState::Armed;
            }
        }

        let bridge = Arc::clone(self);
        let bound = hooks.bind(move || bridge.clean());

        (ListenNotifier { bridge: Arc::clone(self) }, bound)
    }

    /// Remove the bridge file and stop accepting writes.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Clean`] if the file exists but cannot be removed.
    pub fn clean(&self) -> Result<(), BridgeError> {
        *self.lock_state() = BridgeState::Cleaned;
        self.file.clean().map_err(|source| BridgeError::Clean { path: self.path_display(), source })?;
        tracing::debug!(path = %self.path_display(), "bridge file removed");
        Ok(())
    }

    fn publish(&self, address: &ListenAddress) -> Result<Option<String>, BridgeError> {
        let Some(url) = address.url() else {
            tracing::debug!(%address, "listening address has no URL form; bridge file not written");
            return Ok(None);
        };

        let mut state = self.lock_state();
        if *state == BridgeState::Cleaned {
            return Ok(None);
        }

        self.file.write(&url).map_err(|source| BridgeError::Write { path: self.path_display(), source })?;
        *state = BridgeState::Written;
        tracing::info!(%url, path = %self.path_display(), "dev server address published");
        Ok(Some(url))
    }

    fn path_display(&self) -> String {
        self.file.path().display().to_string()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, BridgeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One-shot "now listening" notification. Consumed by [`ListenNotifier::listening`].
#[derive(Debug)]
pub struct ListenNotifier {
    bridge: Arc<DevBridge>,
}

impl ListenNotifier {
    /// Publish the bound address. Opaque addresses are a silent no-op (`Ok(None)`).
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Write`] if the bridge file cannot be written.
    pub fn listening(self, address: &ListenAddress) -> Result<Option<String>, BridgeError> {
        self.bridge.publish(address)
    }
}

/// Arm `bridge` against `hooks` and, the first time handlers are bound,
/// start the signal listener. Must be called from within a Tokio runtime.
pub fn setup(bridge: &Arc<DevBridge>, hooks: &Arc<ExitHooks>) -> ListenNotifier {
    let (notifier, bound) = bridge.arm(hooks);
    if bound {
        listen_for_signals(Arc::clone(hooks));
    }
    notifier
}

#[cfg(test)]
#[path = "bridge_test.rs"]
mod tests;
