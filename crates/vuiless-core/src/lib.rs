#![forbid(unsafe_code)]

//! Core contracts for vuiless form validation.
//!
//! - [`ValidationResult`]: pass, or fail with a user-facing message
//! - [`Rule`]: a pure predicate over a value, the form data and a context
//! - [`Field`] and [`FieldCallbacks`]: how a field exposes validate, clear
//!   and reset to its form
//! - [`FieldRegistry`] and [`FormState`]: the controller side, holding at
//!   most one registration per [`FieldId`] plus the [`Insights`] aggregate
//!
//! Everything here is synchronous and single-threaded. Validation failure is
//! returned as data and never raised.
//!
//! # Features
//!
//! - `tracing`: structured events for registration, validation and submit
//! - `serde`: (de)serialize values, data, context, insights and options

pub mod config;
pub mod field;
pub mod form;
pub mod number;
pub mod registry;
pub mod result;
pub mod rule;
pub mod value;

pub use config::{ConfigError, ENV_FIRST_VALIDATION, FormOptions, ParseTriggerError, ValidationTrigger};
pub use field::{CallbackSet, Field, FieldCallbacks, FieldId, SharedField};
pub use form::{FormState, Insights, SubmitOutcome};
pub use number::coerce_number;
pub use registry::FieldRegistry;
pub use result::{
    ERROR_CODE_CUSTOM, ERROR_CODE_EMAIL, ERROR_CODE_MAX_LENGTH, ERROR_CODE_MIN_LENGTH,
    ERROR_CODE_NAME_REQUIRED, ERROR_CODE_NOT, ERROR_CODE_NUMBER, ERROR_CODE_REQUIRED,
    ValidationError, ValidationResult,
};
pub use rule::{All, And, Any, BoxedRule, Not, Or, Rule, ValueRule, value_rule};
pub use value::{FieldValue, FormContext, FormData, RuleInput};
