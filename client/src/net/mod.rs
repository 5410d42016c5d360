//! Networking: Inertia visits sent back to the server.

pub mod inertia;
