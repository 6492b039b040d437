#![forbid(unsafe_code)]

//! Form configuration.
//!
//! # Env Var Contract
//!
//! - `VUILESS_FIRST_VALIDATION` - first validation trigger, one of
//!   `on-change`, `touched-on-blur`, `on-blur`, `on-submit`, `none`
//!
//! [`FormOptions::from_env`] fails open: an unparseable value falls back to
//! the default trigger. [`FormOptions::try_from_env`] reports it instead.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the first validation trigger.
pub const ENV_FIRST_VALIDATION: &str = "VUILESS_FIRST_VALIDATION";

// ---------------------------------------------------------------------------
// ValidationTrigger
// ---------------------------------------------------------------------------

/// When a field is first validated.
///
/// The policy is chosen when the form is created and never changes. Acting
/// on it (deciding when to call `validate`) belongs to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ValidationTrigger {
    /// Validate on every value change.
    #[default]
    OnChange,
    /// Validate on blur once the field has been touched.
    TouchedOnBlur,
    /// Validate on every blur.
    OnBlur,
    /// Validate only when the form is submitted.
    OnSubmit,
    /// Never validate automatically.
    None,
}

impl ValidationTrigger {
    /// All triggers, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::OnChange,
        Self::TouchedOnBlur,
        Self::OnBlur,
        Self::OnSubmit,
        Self::None,
    ];

    /// The kebab-case name of the trigger.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnChange => "on-change",
            Self::TouchedOnBlur => "touched-on-blur",
            Self::OnBlur => "on-blur",
            Self::OnSubmit => "on-submit",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ValidationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationTrigger {
    type Err = ParseTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseTriggerError {
                value: s.to_string(),
            })
    }
}

/// An unrecognized trigger name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTriggerError {
    /// The rejected input.
    pub value: String,
}

impl fmt::Display for ParseTriggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown validation trigger {:?} (expected on-change, touched-on-blur, on-blur, on-submit or none)",
            self.value
        )
    }
}

impl std::error::Error for ParseTriggerError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Configuration loading error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held an invalid trigger name.
    InvalidTrigger {
        var: &'static str,
        source: ParseTriggerError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTrigger { var, source } => write!(f, "{var}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidTrigger { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// FormOptions
// ---------------------------------------------------------------------------

/// Options fixed at form creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FormOptions {
    /// When fields are first validated.
    pub first_validation: ValidationTrigger,
}

impl FormOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first validation trigger.
    #[must_use]
    pub fn first_validation(mut self, trigger: ValidationTrigger) -> Self {
        self.first_validation = trigger;
        self
    }

    /// Read options from the process environment, falling back to defaults
    /// for missing or invalid values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read options from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTrigger`] if `VUILESS_FIRST_VALIDATION`
    /// is set to an unknown trigger.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::try_from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an injectable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match Self::try_from_lookup(lookup) {
            Ok(options) => options,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "invalid form configuration, using defaults");
                Self::default()
            }
        }
    }

    /// Like [`try_from_env`](Self::try_from_env) with an injectable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTrigger`] for an unknown trigger name.
    pub fn try_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut options = Self::default();
        if let Some(raw) = lookup(ENV_FIRST_VALIDATION) {
            options.first_validation =
                raw.parse()
                    .map_err(|source| ConfigError::InvalidTrigger {
                        var: ENV_FIRST_VALIDATION,
                        source,
                    })?;
        }
        Ok(options)
    }
}
