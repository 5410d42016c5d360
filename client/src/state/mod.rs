//! Client-side state containers.

pub mod form;
