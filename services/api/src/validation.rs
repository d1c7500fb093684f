//! Input validation utilities
//!
//! A [`Validator`] collects every failing field of a request so the client
//! receives the whole list at once.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::error::ApiError;

/// One failed check on a request field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<&'static str>,
}

impl FieldError {
    pub fn new(param: &'static str, msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            param: Some(param),
        }
    }

    /// An error not tied to a single field
    pub fn general(msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            param: None,
        }
    }
}

/// Accumulates field errors over a chain of checks
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value must contain something other than whitespace
    pub fn required(mut self, param: &'static str, value: &str, msg: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(param, msg));
        }
        self
    }

    /// Value must look like an email address
    pub fn email(mut self, param: &'static str, value: &str, msg: &str) -> Self {
        if !is_valid_email(value.trim()) {
            self.errors.push(FieldError::new(param, msg));
        }
        self
    }

    /// Value must be at least `min` characters long
    pub fn min_length(mut self, param: &'static str, value: &str, min: usize, msg: &str) -> Self {
        if value.chars().count() < min {
            self.errors.push(FieldError::new(param, msg));
        }
        self
    }

    /// Fail with every collected error, if any
    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}

/// Validate email
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 {
        return false;
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    regex.is_match(email)
}
