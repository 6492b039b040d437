#![forbid(unsafe_code)]

//! Controller-owned form state.
//!
//! [`FormState`] owns the form data, the optional context, the field
//! registry and the [`Insights`] aggregate. Fields never write to it
//! directly: they are registered, unregistered and driven through it.
//!
//! ```rust
//! use vuiless_core::{
//!     Field, FormData, FormOptions, FormState, SharedField, ValidationResult, value_rule,
//! };
//!
//! let mut form: FormState = FormState::new(FormOptions::default(), FormData::new());
//! let name: SharedField<String> = Field::new("name", String::new())
//!     .rule(value_rule(|v: &String| {
//!         if v.is_empty() {
//!             ValidationResult::message("Required")
//!         } else {
//!             ValidationResult::Valid
//!         }
//!     }))
//!     .shared();
//! form.register("name", name.clone());
//!
//! let outcome = form.submit();
//! assert!(outcome.first_submit);
//! assert!(!outcome.valid);
//! assert_eq!(form.insights().error("name"), Some("Required"));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{FormOptions, ValidationTrigger};
use crate::field::{FieldCallbacks, FieldId};
use crate::registry::FieldRegistry;
use crate::result::ValidationResult;
use crate::value::{FormContext, FormData};

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

/// Aggregated view of current errors and touched fields across the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insights {
    /// Current error message per field.
    pub errors: BTreeMap<FieldId, String>,
    /// Fields the user has touched.
    pub touched: BTreeSet<FieldId>,
}

impl Insights {
    /// The recorded error for `id`.
    #[must_use]
    pub fn error(&self, id: &str) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    /// Whether `id` has been touched.
    #[must_use]
    pub fn is_touched(&self, id: &str) -> bool {
        self.touched.contains(id)
    }

    /// Whether any field currently has an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of fields with an error.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    fn record(&mut self, id: &FieldId, result: &ValidationResult) {
        match result.error_message() {
            Some(message) => {
                self.errors.insert(id.clone(), message);
            }
            None => {
                self.errors.remove(id.as_str());
            }
        }
    }

    fn forget(&mut self, id: &str) {
        self.errors.remove(id);
        self.touched.remove(id);
    }

    fn clear(&mut self) {
        self.errors.clear();
        self.touched.clear();
    }
}

// ---------------------------------------------------------------------------
// SubmitOutcome
// ---------------------------------------------------------------------------

/// What happened when the form was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Whether this was the form's first submit attempt.
    pub first_submit: bool,
    /// Whether every field passed.
    pub valid: bool,
    /// Failing fields and their messages, in registration order.
    pub errors: Vec<(FieldId, String)>,
}

// ---------------------------------------------------------------------------
// FormState
// ---------------------------------------------------------------------------

/// State shared by every field of one form.
pub struct FormState<D = FormData, C = FormContext> {
    options: FormOptions,
    first_submit_happened: bool,
    form_data: D,
    form_context: Option<C>,
    insights: Insights,
    registry: FieldRegistry<D, C>,
}

impl<D, C> FormState<D, C> {
    /// Create form state with no context.
    #[must_use]
    pub fn new(options: FormOptions, form_data: D) -> Self {
        Self {
            options,
            first_submit_happened: false,
            form_data,
            form_context: None,
            insights: Insights::default(),
            registry: FieldRegistry::new(),
        }
    }

    /// Builder-style context.
    #[must_use]
    pub fn with_context(mut self, context: C) -> Self {
        self.form_context = Some(context);
        self
    }

    /// The options the form was created with.
    #[must_use]
    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// When fields are first validated. Fixed for the life of the form.
    #[must_use]
    pub fn first_validation(&self) -> ValidationTrigger {
        self.options.first_validation
    }

    /// Whether the form has been submitted at least once.
    #[must_use]
    pub fn first_submit_happened(&self) -> bool {
        self.first_submit_happened
    }

    /// The form data.
    #[must_use]
    pub fn form_data(&self) -> &D {
        &self.form_data
    }

    /// Mutable access to the form data.
    pub fn form_data_mut(&mut self) -> &mut D {
        &mut self.form_data
    }

    /// The form context, if any.
    #[must_use]
    pub fn form_context(&self) -> Option<&C> {
        self.form_context.as_ref()
    }

    /// Replace the form context.
    pub fn set_form_context(&mut self, context: Option<C>) {
        self.form_context = context;
    }

    /// The aggregated error/touched view.
    #[must_use]
    pub fn insights(&self) -> &Insights {
        &self.insights
    }

    /// The field registry.
    #[must_use]
    pub fn registry(&self) -> &FieldRegistry<D, C> {
        &self.registry
    }

    /// Register a field, replacing any earlier registration under `id`.
    pub fn register(&mut self, id: impl Into<FieldId>, callbacks: impl FieldCallbacks<D, C> + 'static) {
        self.registry.register(id, callbacks);
    }

    /// Unregister a field and drop its insights. Unknown ids are ignored.
    pub fn unregister(&mut self, id: &str) {
        self.registry.unregister(id);
        self.insights.forget(id);
    }

    /// Drop every registration and all insights.
    pub fn clear_registry(&mut self) {
        self.registry.clear();
        self.insights.clear();
    }

    /// Validate one field and record the outcome in the insights.
    ///
    /// `None` if `id` is not registered.
    pub fn validate_field(&mut self, id: &str) -> Option<ValidationResult> {
        let result = self
            .registry
            .validate(id, &self.form_data, self.form_context.as_ref())?;
        self.insights.record(&FieldId::from(id), &result);
        Some(result)
    }

    /// Validate every field. Returns whether all of them passed.
    pub fn validate_all(&mut self) -> bool {
        self.run_all().is_empty()
    }

    fn run_all(&mut self) -> Vec<(FieldId, String)> {
        let results = self
            .registry
            .validate_all(&self.form_data, self.form_context.as_ref());
        let mut errors = Vec::new();
        for (id, result) in results {
            self.insights.record(&id, &result);
            if let Some(message) = result.error_message() {
                errors.push((id, message));
            }
        }
        errors
    }

    /// Handle a submit attempt.
    ///
    /// Marks the first submit (this never reverts) and validates every field.
    pub fn submit(&mut self) -> SubmitOutcome {
        let first_submit = !self.first_submit_happened;
        self.first_submit_happened = true;
        let errors = self.run_all();
        #[cfg(feature = "tracing")]
        tracing::debug!(first_submit, errors = errors.len(), "form submitted");
        SubmitOutcome {
            first_submit,
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Record that the user has touched `id` and tell the field.
    ///
    /// Returns whether `id` was registered. Unknown ids are not recorded.
    pub fn touch(&mut self, id: impl Into<FieldId>) -> bool {
        let id = id.into();
        if !self.registry.touch(id.as_str()) {
            return false;
        }
        self.insights.touched.insert(id);
        true
    }

    /// Clear one field's errors. Returns whether `id` was registered.
    pub fn clear_errors(&mut self, id: &str) -> bool {
        self.insights.errors.remove(id);
        self.registry.clear_errors(id)
    }

    /// Clear every field's errors.
    pub fn clear_all_errors(&mut self) {
        self.insights.errors.clear();
        self.registry.clear_all_errors();
    }

    /// Reset one field. Returns whether `id` was registered.
    pub fn reset_field(&mut self, id: &str) -> bool {
        self.insights.forget(id);
        self.registry.reset(id)
    }

    /// Reset every field and clear the insights.
    ///
    /// Registrations are kept and `first_submit_happened` is not reverted.
    pub fn reset(&mut self) {
        self.registry.reset_all();
        self.insights.clear();
        #[cfg(feature = "tracing")]
        tracing::debug!(fields = self.registry.len(), "form reset");
    }

    /// Whether no field currently has a recorded error.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.insights.has_errors()
    }
}

impl<D: Default, C> Default for FormState<D, C> {
    fn default() -> Self {
        Self::new(FormOptions::default(), D::default())
    }
}

impl<D: std::fmt::Debug, C: std::fmt::Debug> std::fmt::Debug for FormState<D, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormState")
            .field("options", &self.options)
            .field("first_submit_happened", &self.first_submit_happened)
            .field("form_data", &self.form_data)
            .field("form_context", &self.form_context)
            .field("insights", &self.insights)
            .field("registry", &self.registry)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
