//! Ping CRM browser client.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server decides which page to show and with which props; this crate
//! only maps a page component name to a Leptos view and sends the user's
//! visits back as Inertia requests. Build with `--features csr` for the
//! browser; without it the crate compiles natively so the pure logic can be
//! unit-tested.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;

pub use app::{App, read_initial_page};
