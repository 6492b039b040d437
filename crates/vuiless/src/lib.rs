#![forbid(unsafe_code)]

//! vuiless public facade crate.
//!
//! Re-exports the field contract and form controller from `vuiless-core`
//! and, with the default `rules` feature, the built-in rule set from
//! `vuiless-rules`. Most applications only need the [`prelude`].
//!
//! ```rust
//! use vuiless::prelude::*;
//!
//! let email: SharedField<String> = Field::new("email", String::new())
//!     .rules(RuleBuilder::new().required().email().into_rules())
//!     .shared();
//!
//! let mut form: FormState = FormState::new(FormOptions::default(), FormData::new());
//! form.register("email", email.clone());
//!
//! let outcome = form.submit();
//! assert!(!outcome.valid);
//! assert_eq!(form.insights().error("email"), Some("Required"));
//!
//! email.borrow_mut().set_value("ada@example.com".into());
//! assert!(form.submit().valid);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use vuiless_core::{
    All, And, Any, BoxedRule, CallbackSet, ConfigError, ENV_FIRST_VALIDATION, Field,
    FieldCallbacks, FieldId, FieldRegistry, FieldValue, FormContext, FormData, FormOptions,
    FormState, Insights, Not, Or, ParseTriggerError, Rule, RuleInput, SharedField,
    SubmitOutcome, ValidationError, ValidationResult, ValidationTrigger, ValueRule,
    coerce_number, value_rule,
};

// --- Rule re-exports -------------------------------------------------------

#[cfg(feature = "rules")]
pub use vuiless_rules::{
    Email, FirstOrLastName, MaxLength, MinLength, NameFields, NameRequirement, Numeric,
    Required, RuleBuilder, first_or_last_name, is_email, is_number, is_required, max, min,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Field, FieldCallbacks, FieldId, FieldValue, FormContext, FormData, FormOptions,
        FormState, Rule, SharedField, ValidationResult, ValidationTrigger, value_rule,
    };

    #[cfg(feature = "rules")]
    pub use crate::{RuleBuilder, first_or_last_name, is_email, is_number, is_required, max, min};

    pub use crate::core;
    #[cfg(feature = "rules")]
    pub use crate::rules;
}

pub use vuiless_core as core;
#[cfg(feature = "rules")]
pub use vuiless_rules as rules;
