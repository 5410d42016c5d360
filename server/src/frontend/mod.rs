//! Frontend integration: Inertia page rendering and asset resolution.

pub mod assets;
pub mod inertia;
pub mod vite;

pub use inertia::{Inertia, InertiaError, InertiaResponse};
pub use vite::Vite;
