//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Inputs are controlled: they render the value they are given and report
//! every change through a callback, leaving the values in the page's
//! `FormState`.

pub mod loading_button;
pub mod logo;
pub mod text_input;
