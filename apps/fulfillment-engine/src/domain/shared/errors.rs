//! Domain errors shared by the fulfillment contexts.

use std::fmt;

/// Domain-level errors raised by shared value objects.
///
/// Bounded contexts translate these into their own error enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Value could not be parsed from its textual form.
    Unparseable {
        /// Field name.
        field: String,
        /// The raw input.
        input: String,
    },
}

impl DomainError {
    /// Name of the field the error refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidValue { field, .. } | Self::Unparseable { field, .. } => field,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::Unparseable { field, input } => {
                write!(f, "Cannot parse '{field}' from \"{input}\"")
            }
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_display() {
        let err = DomainError::InvalidValue {
            field: "tax".to_string(),
            message: "cannot be negative".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("tax"));
        assert!(msg.contains("negative"));
    }

    #[test]
    fn unparseable_display_and_field() {
        let err = DomainError::Unparseable {
            field: "startDate".to_string(),
            input: "yesterday".to_string(),
        };
        assert_eq!(err.field(), "startDate");
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn domain_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(DomainError::InvalidValue {
            field: "price".to_string(),
            message: "must be positive".to_string(),
        });
        assert!(err.to_string().contains("price"));
    }
}
