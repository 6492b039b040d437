#![forbid(unsafe_code)]

//! The pass/fail contract shared by every rule and every field.

use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Error Codes
// ---------------------------------------------------------------------------

/// Error code for a missing value.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Error code for a malformed email address.
pub const ERROR_CODE_EMAIL: &str = "email";
/// Error code for a value that does not coerce to a number.
pub const ERROR_CODE_NUMBER: &str = "number";
/// Error code for the cross-field first/last name check.
pub const ERROR_CODE_NAME_REQUIRED: &str = "name_required";
/// Error code for minimum length validation.
pub const ERROR_CODE_MIN_LENGTH: &str = "too_short";
/// Error code for maximum length validation.
pub const ERROR_CODE_MAX_LENGTH: &str = "too_long";
/// Error code used by [`Not`](crate::rule::Not).
pub const ERROR_CODE_NOT: &str = "not";
/// Error code for failures produced from a bare message.
pub const ERROR_CODE_CUSTOM: &str = "custom";

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A validation failure with a stable code, a message template, and
/// interpolation parameters.
///
/// The formatted message is the user-facing string: `{key}` placeholders in
/// `message` are replaced by the matching entry of `params`.
///
/// ```rust
/// use vuiless_core::ValidationError;
///
/// let error = ValidationError::new("too_short", "Min length {min}").with_param("min", 3);
/// assert_eq!(error.to_string(), "Min length 3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable error code for programmatic handling.
    pub code: &'static str,
    /// Message template.
    pub message: String,
    /// Parameters for message interpolation.
    pub params: BTreeMap<String, String>,
}

impl ValidationError {
    /// Create a new validation error with the given code and message.
    ///
    /// The message must not be empty: it is what the user sees.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "validation error {code:?} has an empty message");
        Self {
            code,
            message,
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter for message interpolation.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Format the message with parameter substitution.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut result = self.message.clone();
        for (key, value) in &self.params {
            result = result.replace(&format!("{{{key}}}"), value);
        }
        result
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_message())
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// The result of validating a value: a pass, or a failure carrying the
/// message to show the user.
///
/// Failure is ordinary control flow. Nothing in this crate reports a failed
/// validation through `Err` or a panic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    /// The value is valid.
    #[default]
    Valid,
    /// The value is invalid.
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Shorthand for `Invalid(ValidationError::new(code, message))`.
    #[must_use]
    pub fn invalid(code: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid(ValidationError::new(code, message))
    }

    /// A failure carrying only a message. The message must not be empty.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::invalid(ERROR_CODE_CUSTOM, message)
    }

    /// Returns `true` if the result is `Valid`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns `true` if the result is `Invalid`.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Returns the error if the result is `Invalid`.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// Returns the formatted error message if the result is `Invalid`.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ValidationError::format_message)
    }

    /// Combine two results, returning the first error if any.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::Valid => other,
            Self::Invalid(_) => self,
        }
    }

    /// Combine two results, returning `Valid` if either is valid.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Valid => Self::Valid,
            Self::Invalid(_) => other,
        }
    }

    /// Convert into `Ok(())` or `Err(error)` for callers that prefer `?`.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of an `Invalid` result.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(e) => Err(e),
        }
    }
}

impl From<ValidationError> for ValidationResult {
    fn from(error: ValidationError) -> Self {
        Self::Invalid(error)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
