#![forbid(unsafe_code)]

//! Fields and the callback contract a field exposes to its form.
//!
//! A form drives its fields through three callbacks: `validate`,
//! `clear_errors` and `reset`. It never looks inside a field. The form owns
//! its data and context and hands them to `validate` explicitly on every
//! call, so a field never reaches for ambient state.
//!
//! [`Field`] is the stock implementation: a named value with an ordered rule
//! list, an error slot, and touched/dirty flags. [`CallbackSet`] adapts three
//! closures for fields that keep their state elsewhere.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::result::ValidationResult;
use crate::rule::{Rule, first_failure};
use crate::value::{FormContext, FormData};

// ---------------------------------------------------------------------------
// FieldId
// ---------------------------------------------------------------------------

/// The identity a field registers under.
///
/// A plain string name: comparable, hashable, ordered, and serializable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FieldId(String);

impl FieldId {
    /// Create an id from a field name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The field name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FieldId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&FieldId> for FieldId {
    fn from(id: &FieldId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// FieldCallbacks
// ---------------------------------------------------------------------------

/// What a field hands to its form when it registers.
pub trait FieldCallbacks<D = FormData, C = FormContext> {
    /// Validate the field's current value against its rules.
    ///
    /// Rules run in order and the first failure wins.
    fn validate(&mut self, data: &D, context: Option<&C>) -> ValidationResult;

    /// Clear the field's displayed error. The value is left alone.
    fn clear_errors(&mut self);

    /// Restore the initial value and clear error and touched state.
    fn reset(&mut self);

    /// Mark the field as touched. Does nothing by default.
    fn touch(&mut self) {}
}

type ValidateCallback<D, C> = Box<dyn FnMut(&D, Option<&C>) -> ValidationResult>;

/// Field callbacks built from closures.
///
/// `clear_errors`, `reset` and `touch` default to doing nothing.
pub struct CallbackSet<D = FormData, C = FormContext> {
    validate: ValidateCallback<D, C>,
    clear_errors: Box<dyn FnMut()>,
    reset: Box<dyn FnMut()>,
    touch: Box<dyn FnMut()>,
}

impl<D, C> CallbackSet<D, C> {
    /// Create a callback set around a validate closure.
    pub fn new(validate: impl FnMut(&D, Option<&C>) -> ValidationResult + 'static) -> Self {
        Self {
            validate: Box::new(validate),
            clear_errors: Box::new(|| {}),
            reset: Box::new(|| {}),
            touch: Box::new(|| {}),
        }
    }

    /// Set the clear-errors callback.
    #[must_use]
    pub fn on_clear_errors(mut self, f: impl FnMut() + 'static) -> Self {
        self.clear_errors = Box::new(f);
        self
    }

    /// Set the reset callback.
    #[must_use]
    pub fn on_reset(mut self, f: impl FnMut() + 'static) -> Self {
        self.reset = Box::new(f);
        self
    }

    /// Set the touch callback.
    #[must_use]
    pub fn on_touch(mut self, f: impl FnMut() + 'static) -> Self {
        self.touch = Box::new(f);
        self
    }
}

impl<D, C> FieldCallbacks<D, C> for CallbackSet<D, C> {
    fn validate(&mut self, data: &D, context: Option<&C>) -> ValidationResult {
        (self.validate)(data, context)
    }

    fn clear_errors(&mut self) {
        (self.clear_errors)();
    }

    fn reset(&mut self) {
        (self.reset)();
    }

    fn touch(&mut self) {
        (self.touch)();
    }
}

impl<D, C> fmt::Debug for CallbackSet<D, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSet").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A single input's validation unit.
pub struct Field<V, D = FormData, C = FormContext> {
    id: FieldId,
    initial: V,
    value: V,
    rules: Vec<Box<dyn Rule<V, D, C>>>,
    error: Option<String>,
    touched: bool,
    dirty: bool,
}

/// A field shared between the UI that edits it and the form that drives it.
pub type SharedField<V, D = FormData, C = FormContext> = Rc<RefCell<Field<V, D, C>>>;

impl<V: Clone + PartialEq, D, C> Field<V, D, C> {
    /// Create a field with its initial value.
    pub fn new(id: impl Into<FieldId>, initial: V) -> Self {
        Self {
            id: id.into(),
            value: initial.clone(),
            initial,
            rules: Vec::new(),
            error: None,
            touched: false,
            dirty: false,
        }
    }

    /// Append a rule. Rules run in the order they were added.
    #[must_use]
    pub fn rule(mut self, rule: impl Rule<V, D, C> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append already boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = Box<dyn Rule<V, D, C>>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Wrap the field for registration while keeping a handle to it.
    #[must_use]
    pub fn shared(self) -> SharedField<V, D, C> {
        Rc::new(RefCell::new(self))
    }

    /// The field's identity.
    #[must_use]
    pub fn id(&self) -> &FieldId {
        &self.id
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The value the field was created with.
    #[must_use]
    pub fn initial(&self) -> &V {
        &self.initial
    }

    /// Replace the current value.
    pub fn set_value(&mut self, value: V) {
        self.dirty = value != self.initial;
        self.value = value;
    }

    /// The message from the most recent failed validation.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the user has left the field at least once.
    #[must_use]
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Mark the field as touched.
    pub fn touch(&mut self) {
        self.touched = true;
    }

    /// Whether the value differs from the initial value.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of attached rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Run the rules against the current value.
    ///
    /// The first failing rule wins and later rules are not evaluated. The
    /// outcome replaces the stored error.
    pub fn validate(&mut self, data: Option<&D>, context: Option<&C>) -> ValidationResult {
        let result = first_failure(&self.rules, &self.value, data, context);
        self.error = result.error_message();
        result
    }

    /// Clear the stored error.
    pub fn clear_errors(&mut self) {
        self.error = None;
    }

    /// Restore the initial value and clear error, touched and dirty state.
    pub fn reset(&mut self) {
        self.value = self.initial.clone();
        self.error = None;
        self.touched = false;
        self.dirty = false;
    }
}

impl<V: Clone + PartialEq, D, C> FieldCallbacks<D, C> for Field<V, D, C> {
    fn validate(&mut self, data: &D, context: Option<&C>) -> ValidationResult {
        Field::validate(self, Some(data), context)
    }

    fn clear_errors(&mut self) {
        Field::clear_errors(self);
    }

    fn reset(&mut self) {
        Field::reset(self);
    }

    fn touch(&mut self) {
        Field::touch(self);
    }
}

/// # Panics
///
/// Each callback mutably borrows the field; calling one while the UI holds a
/// borrow of the same field panics.
impl<V: Clone + PartialEq, D, C> FieldCallbacks<D, C> for SharedField<V, D, C> {
    fn validate(&mut self, data: &D, context: Option<&C>) -> ValidationResult {
        self.borrow_mut().validate(Some(data), context)
    }

    fn clear_errors(&mut self) {
        self.borrow_mut().clear_errors();
    }

    fn reset(&mut self) {
        self.borrow_mut().reset();
    }

    fn touch(&mut self) {
        self.borrow_mut().touch();
    }
}

impl<V: fmt::Debug, D, C> fmt::Debug for Field<V, D, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("rules", &format!("[{} rules]", self.rules.len()))
            .field("error", &self.error)
            .field("touched", &self.touched)
            .field("dirty", &self.dirty)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
