#![forbid(unsafe_code)]

//! Built-in validation rules for vuiless.
//!
//! Each rule is available as a unit struct (or factory) implementing
//! [`vuiless_core::Rule`], and as a plain function for one-off checks.
//!
//! ```rust
//! use vuiless_core::{FieldValue, Rule};
//! use vuiless_rules::{MinLength, is_email, is_required, min};
//!
//! assert!(is_required("ada").is_valid());
//! assert_eq!(is_required(&FieldValue::Absent).error_message().as_deref(), Some("Required"));
//! assert!(is_email("ada@example.com").is_valid());
//!
//! let at_least_three = min(3);
//! let result = <MinLength as Rule<str>>::check(&at_least_three, "ab", None, None);
//! assert_eq!(result.error_message().as_deref(), Some("Min length 3"));
//! ```

pub mod builder;
pub mod rules;

pub use builder::RuleBuilder;
pub use rules::{
    Email, FirstOrLastName, MESSAGE_EMAIL, MESSAGE_NAME_REQUIRED, MESSAGE_NUMBER,
    MESSAGE_REQUIRED, MaxLength, MinLength, NameFields, NameRequirement, Numeric, Required,
    first_or_last_name, is_email, is_number, is_required, max, min,
};
