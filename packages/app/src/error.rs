//! Errors surfaced by the app workflows.

use std::fmt;

use api::ApiError;

/// A user-input problem tied to one form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("no user is logged in")]
    NoSession,

    #[error("profile has no recognised roleName")]
    InvalidProfile,

    #[error("profile is missing {0}")]
    MissingField(&'static str),

    #[error("invalid input: {}", join_fields(.0))]
    Validation(Vec<FieldError>),
}

impl From<FieldError> for AppError {
    fn from(error: FieldError) -> Self {
        AppError::Validation(vec![error])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let err = AppError::Validation(vec![
            FieldError::new("phone", "is required"),
            FieldError::new("otp", "must be 6 digits"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: phone: is required, otp: must be 6 digits"
        );
    }
}
