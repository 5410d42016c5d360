//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business rules so route handlers can stay focused on
//! protocol translation (Inertia pages, redirects).

pub mod auth;
