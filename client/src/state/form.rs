//! Form state shared by page forms.
//!
//! DESIGN
//! ======
//! `FormState<T>` holds the typed values of a form, field-level errors and a
//! `processing` flag. Fields are addressed by their serialized name so input
//! components can stay generic; every update round-trips through serde, so an
//! update that does not fit `T` is rejected and leaves the values untouched.
//!
//! Errors come only from the server: a response page's `errors` prop replaces
//! the current set when a submission finishes. There is no client validation
//! and no retry.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use protocol::Errors;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::net::inertia::{Method, Visit, VisitOutcome};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("form has no field named {0:?}")]
    UnknownField(String),
    #[error("invalid value for field {field:?}: {message}")]
    InvalidValue { field: String, message: String },
    #[error("form data does not serialize to an object")]
    NotAnObject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState<T> {
    data: T,
    errors: Errors,
    processing: bool,
}

impl<T> FormState<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(data: T) -> Self {
        Self { data, errors: Errors::new(), processing: false }
    }

    /// Start with errors the server already sent (e.g. a re-rendered page).
    #[must_use]
    pub fn with_errors(mut self, errors: Errors) -> Self {
        self.errors = errors;
        self
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn processing(&self) -> bool {
        self.processing
    }

    /// Replace one field's value.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when `T` has no such field and
    /// [`FormError::InvalidValue`] when the value does not deserialize into it.
    pub fn set_field(&mut self, field: &str, value: impl Into<Value>) -> Result<(), FormError> {
        let mut fields = self.fields()?;
        if !fields.contains_key(field) {
            return Err(FormError::UnknownField(field.to_owned()));
        }
        fields.insert(field.to_owned(), value.into());

        self.data = serde_json::from_value(Value::Object(fields))
            .map_err(|e| FormError::InvalidValue { field: field.to_owned(), message: e.to_string() })?;
        Ok(())
    }

    /// Mark the form as submitting and build the visit to send.
    ///
    /// Returns `None` while a previous submission is still pending.
    pub fn begin_submit(&mut self, method: Method, url: &str) -> Option<Visit> {
        if self.processing {
            return None;
        }
        let data = serde_json::to_value(&self.data).ok()?;
        self.processing = true;
        Some(Visit::new(method, url).with_data(data))
    }

    /// Settle a submission. A returned page replaces the errors with its own
    /// `errors` prop (empty when the submission succeeded).
    pub fn finish(&mut self, outcome: &VisitOutcome) {
        self.processing = false;
        if let VisitOutcome::Page(page) = outcome {
            self.errors = page.errors();
        }
    }

    fn fields(&self) -> Result<serde_json::Map<String, Value>, FormError> {
        match serde_json::to_value(&self.data) {
            Ok(Value::Object(fields)) => Ok(fields),
            _ => Err(FormError::NotAnObject),
        }
    }
}
