//! Process-exit cleanup hooks.
//!
//! DESIGN
//! ======
//! `ExitHooks` owns a guard flag with process lifetime: false until the first
//! `bind`, true afterwards, never reset. Later `bind` calls are ignored so a
//! setup that runs more than once (config re-evaluation, a second server)
//! still produces a single cleanup pass.
//!
//! Two paths run the hooks:
//! - normal exit: an `ExitGuard` held by `main` runs them on drop;
//! - SIGINT / SIGTERM / SIGHUP: `listen_for_signals` runs them, then exits.
//!
//! Hooks run at most once whichever path fires first. A hook that fails is
//! logged and counted; callers turn a failed pass into a non-zero exit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use tokio::task::JoinHandle;

pub type HookError = Box<dyn std::error::Error + Send + Sync>;

type Hook = Box<dyn FnOnce() -> Result<(), HookError> + Send>;

/// Exit status used when cleanup fails, whatever ended the process.
pub const CLEANUP_FAILED_EXIT_CODE: i32 = 1;

static PROCESS_HOOKS: LazyLock<Arc<ExitHooks>> = LazyLock::new(|| Arc::new(ExitHooks::new()));

pub struct ExitHooks {
    bound: AtomicBool,
    hooks: Mutex<Vec<Hook>>,
}

impl ExitHooks {
    #[must_use]
    pub fn new() -> Self {
        Self { bound: AtomicBool::new(false), hooks: Mutex::new(Vec::new()) }
    }

    /// The registry shared by the whole process.
    #[must_use]
    pub fn process() -> Arc<Self> {
        Arc::clone(&PROCESS_HOOKS)
    }

    /// Register `hook` unless handlers were already bound. Returns `true` only
    /// for the call that bound them.
    pub fn bind<E>(&self, hook: impl FnOnce() -> Result<(), E> + Send + 'static) -> bool
    where
        E: Into<HookError>,
    {
        if self.bound.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.push(hook);
        true
    }

    /// Register an extra hook for the same cleanup pass, bound or not.
    pub fn add<E>(&self, hook: impl FnOnce() -> Result<(), E> + Send + 'static)
    where
        E: Into<HookError>,
    {
        self.push(hook);
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound.load(Ordering::SeqCst)
    }

    /// Run and drop every registered hook.
    pub fn run(&self) -> HookRun {
        let hooks = std::mem::take(&mut *self.lock());
        let mut run = HookRun::default();
        for hook in hooks {
            run.ran += 1;
            if let Err(e) = hook() {
                tracing::error!(error = %e, "exit hook failed");
                run.failed += 1;
            }
        }
        run
    }

    fn push<E>(&self, hook: impl FnOnce() -> Result<(), E> + Send + 'static)
    where
        E: Into<HookError>,
    {
        self.lock().push(Box::new(move || hook().map_err(Into::into)));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Hook>> {
        self.hooks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ExitHooks {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one cleanup pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HookRun {
    pub ran: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{failed} of {ran} exit hooks failed")]
pub struct CleanupFailed {
    pub ran: usize,
    pub failed: usize,
}

impl HookRun {
    /// `Ok(ran)` when every hook succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`CleanupFailed`] when at least one hook failed.
    pub fn into_result(self) -> Result<usize, CleanupFailed> {
        if self.failed == 0 { Ok(self.ran) } else { Err(CleanupFailed { ran: self.ran, failed: self.failed }) }
    }
}

/// Runs the hooks when dropped. Keep one alive for the duration of `main`.
#[must_use = "hooks run when the guard is dropped"]
pub struct ExitGuard {
    hooks: Arc<ExitHooks>,
}

impl ExitGuard {
    pub fn new(hooks: Arc<ExitHooks>) -> Self {
        Self { hooks }
    }

    /// Run the hooks now and report how the pass went. Dropping the guard
    /// afterwards runs nothing.
    pub fn finish(self) -> HookRun {
        self.hooks.run()
    }
}

impl Drop for ExitGuard {
    fn drop(&mut self) {
        let run = self.hooks.run();
        if run.ran > 0 {
            tracing::debug!(hooks = run.ran, failed = run.failed, "exit hooks ran on shutdown");
        }
    }
}

/// Signals that end the dev server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    Interrupt,
    Terminate,
    HangUp,
}

impl ExitSignal {
    /// Conventional shell exit status for a process ended by this signal.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::HangUp => 128 + 1,
            Self::Interrupt => 128 + 2,
            Self::Terminate => 128 + 15,
        }
    }

    /// Exit status once cleanup has run: the signal's code, or
    /// [`CLEANUP_FAILED_EXIT_CODE`] when a hook failed.
    #[must_use]
    pub fn exit_code_after(self, run: HookRun) -> i32 {
        if run.failed == 0 { self.exit_code() } else { CLEANUP_FAILED_EXIT_CODE }
    }
}

/// Wait for interrupt, termination or hang-up, run the hooks, and exit the process.
///
/// Handlers are installed before this returns, so a signal that arrives any
/// time after the call goes through the hooks. Must be called from within a
/// Tokio runtime.
pub fn listen_for_signals(hooks: Arc<ExitHooks>) -> JoinHandle<()> {
    let signals = ExitSignals::install();
    tokio::spawn(async move {
        let signal = signals.recv().await;
        tracing::info!(?signal, "shutting down dev server");
        let run = hooks.run();
        std::process::exit(signal.exit_code_after(run));
    })
}

#[cfg(unix)]
struct ExitSignals {
    interrupt: Option<tokio::signal::unix::Signal>,
    terminate: Option<tokio::signal::unix::Signal>,
    hangup: Option<tokio::signal::unix::Signal>,
}

#[cfg(unix)]
impl ExitSignals {
    fn install() -> Self {
        use tokio::signal::unix::{SignalKind, signal};

        let install = |kind: SignalKind, name: &'static str| match signal(kind) {
            Ok(stream) => Some(stream),
            Err(e) => {
                tracing::warn!(error = %e, signal = name, "unable to install signal handler");
                None
            }
        };
        Self {
            interrupt: install(SignalKind::interrupt(), "SIGINT"),
            terminate: install(SignalKind::terminate(), "SIGTERM"),
            hangup: install(SignalKind::hangup(), "SIGHUP"),
        }
    }

    async fn recv(mut self) -> ExitSignal {
        tokio::select! {
            Some(()) = next_signal(&mut self.interrupt) => ExitSignal::Interrupt,
            Some(()) = next_signal(&mut self.terminate) => ExitSignal::Terminate,
            Some(()) = next_signal(&mut self.hangup) => ExitSignal::HangUp,
            else => std::future::pending().await,
        }
    }
}

#[cfg(unix)]
async fn next_signal(stream: &mut Option<tokio::signal::unix::Signal>) -> Option<()> {
    match stream {
        Some(stream) => stream.recv().await,
        None => None,
    }
}

#[cfg(not(unix))]
struct ExitSignals;

#[cfg(not(unix))]
impl ExitSignals {
    fn install() -> Self {
        Self
    }

    async fn recv(self) -> ExitSignal {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "unable to listen for interrupt");
            std::future::pending::<()>().await;
        }
        ExitSignal::Interrupt
    }
}

#[cfg(test)]
#[path = "exit_test.rs"]
mod tests;
