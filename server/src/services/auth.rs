//! Login check against the configured demo account.
//!
//! There is no user store: the only accepted credentials come from
//! `DEMO_EMAIL` / `DEMO_PASSWORD`. Messages are keyed by form field so the
//! client can render them beneath the matching input.

use protocol::{Errors, LoginForm};

use crate::config::DemoAccount;

pub const EMAIL_REQUIRED: &str = "The email field is required.";
pub const PASSWORD_REQUIRED: &str = "The password field is required.";
pub const BAD_CREDENTIALS: &str = "These credentials do not match our records.";

/// Check a submitted login form.
///
/// # Errors
///
/// Returns the field errors to show when the form is incomplete or the
/// credentials do not match.
pub fn attempt_login(form: &LoginForm, account: &DemoAccount) -> Result<(), Errors> {
    let email = form.email.trim();
    let mut errors = Errors::new();
    if email.is_empty() {
        errors.insert("email".to_owned(), EMAIL_REQUIRED.to_owned());
    }
    if form.password.is_empty() {
        errors.insert("password".to_owned(), PASSWORD_REQUIRED.to_owned());
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    if email.eq_ignore_ascii_case(&account.email) && form.password == account.password {
        Ok(())
    } else {
        errors.insert("email".to_owned(), BAD_CREDENTIALS.to_owned());
        Err(errors)
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
