#![forbid(unsafe_code)]

//! The rule contract and rule composition.
//!
//! A rule looks at one value, optionally consulting the whole form's data
//! and an out-of-band context, and answers with a [`ValidationResult`].
//! Rules must be pure: they never mutate the data or context they are
//! handed, and they treat a missing data or context as "no cross-field
//! information available" rather than failing loudly.
//!
//! Any `Fn(&V, Option<&D>, Option<&C>) -> ValidationResult` closure is a
//! rule. Parametrized rules are factories returning a value that implements
//! [`Rule`].
//!
//! ```rust
//! use vuiless_core::{FormContext, FormData, Rule, ValidationResult};
//!
//! let no_spaces = |v: &str, _: Option<&FormData>, _: Option<&FormContext>| {
//!     if v.contains(' ') {
//!         ValidationResult::message("No spaces")
//!     } else {
//!         ValidationResult::Valid
//!     }
//! };
//! assert!(no_spaces.check("ada", None::<&FormData>, None::<&FormContext>).is_valid());
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::result::{ERROR_CODE_NOT, ValidationError, ValidationResult};
use crate::value::{FormContext, FormData};

// ---------------------------------------------------------------------------
// Rule Trait
// ---------------------------------------------------------------------------

/// A pure predicate over a value of type `V`.
///
/// `D` is the form data type and `C` the context type.
pub trait Rule<V: ?Sized, D: ?Sized = FormData, C: ?Sized = FormContext> {
    /// Validate `value`.
    fn check(&self, value: &V, data: Option<&D>, context: Option<&C>) -> ValidationResult;
}

impl<V, D, C, F> Rule<V, D, C> for F
where
    V: ?Sized,
    D: ?Sized,
    C: ?Sized,
    F: Fn(&V, Option<&D>, Option<&C>) -> ValidationResult,
{
    fn check(&self, value: &V, data: Option<&D>, context: Option<&C>) -> ValidationResult {
        self(value, data, context)
    }
}

/// A rule that only looks at the value.
///
/// Wraps a `Fn(&V) -> ValidationResult` so it can be used wherever a full
/// three-argument rule is expected.
pub struct ValueRule<V: ?Sized, F> {
    f: F,
    _value: PhantomData<fn(&V)>,
}

/// Build a [`ValueRule`] from a closure over the value alone.
#[must_use]
pub fn value_rule<V: ?Sized, F>(f: F) -> ValueRule<V, F>
where
    F: Fn(&V) -> ValidationResult,
{
    ValueRule {
        f,
        _value: PhantomData,
    }
}

impl<V, D, C, F> Rule<V, D, C> for ValueRule<V, F>
where
    V: ?Sized,
    D: ?Sized,
    C: ?Sized,
    F: Fn(&V) -> ValidationResult,
{
    fn check(&self, value: &V, _data: Option<&D>, _context: Option<&C>) -> ValidationResult {
        (self.f)(value)
    }
}

impl<V: ?Sized, F> fmt::Debug for ValueRule<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueRule").finish_non_exhaustive()
    }
}

/// A heap-allocated rule.
pub type BoxedRule<V, D = FormData, C = FormContext> = Box<dyn Rule<V, D, C>>;

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Combines two rules with AND logic. `second` runs only if `first` passes.
#[derive(Debug, Clone)]
pub struct And<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> And<A, B> {
    /// Create a new `And` rule.
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<V: ?Sized, D: ?Sized, C: ?Sized, A, B> Rule<V, D, C> for And<A, B>
where
    A: Rule<V, D, C>,
    B: Rule<V, D, C>,
{
    fn check(&self, value: &V, data: Option<&D>, context: Option<&C>) -> ValidationResult {
        match self.first.check(value, data, context) {
            ValidationResult::Valid => self.second.check(value, data, context),
            err => err,
        }
    }
}

/// Combines two rules with OR logic. `second` runs only if `first` fails,
/// and its failure is the one reported.
#[derive(Debug, Clone)]
pub struct Or<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Or<A, B> {
    /// Create a new `Or` rule.
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<V: ?Sized, D: ?Sized, C: ?Sized, A, B> Rule<V, D, C> for Or<A, B>
where
    A: Rule<V, D, C>,
    B: Rule<V, D, C>,
{
    fn check(&self, value: &V, data: Option<&D>, context: Option<&C>) -> ValidationResult {
        match self.first.check(value, data, context) {
            ValidationResult::Valid => ValidationResult::Valid,
            ValidationResult::Invalid(_) => self.second.check(value, data, context),
        }
    }
}

/// Negates a rule.
#[derive(Debug, Clone)]
pub struct Not<R> {
    pub inner: R,
    /// Message reported when the inner rule passes.
    pub message: String,
}

impl<R> Not<R> {
    /// Create a new `Not` rule with the message to report on a pass.
    #[must_use]
    pub fn new(inner: R, message: impl Into<String>) -> Self {
        Self {
            inner,
            message: message.into(),
        }
    }
}

impl<V: ?Sized, D: ?Sized, C: ?Sized, R> Rule<V, D, C> for Not<R>
where
    R: Rule<V, D, C>,
{
    fn check(&self, value: &V, data: Option<&D>, context: Option<&C>) -> ValidationResult {
        match self.inner.check(value, data, context) {
            ValidationResult::Valid => {
                ValidationResult::Invalid(ValidationError::new(ERROR_CODE_NOT, &self.message))
            }
            ValidationResult::Invalid(_) => ValidationResult::Valid,
        }
    }
}

/// An ordered list of rules where the first failure wins.
///
/// Rules after the first failing one are not evaluated.
pub struct All<V: ?Sized, D: ?Sized = FormData, C: ?Sized = FormContext> {
    rules: Vec<Box<dyn Rule<V, D, C>>>,
}

impl<V: ?Sized, D: ?Sized, C: ?Sized> All<V, D, C> {
    /// Create a new `All` rule.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule<V, D, C>>>) -> Self {
        Self { rules }
    }

    /// Number of chained rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the chain is empty (and therefore always passes).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<V: ?Sized, D: ?Sized, C: ?Sized> Rule<V, D, C> for All<V, D, C> {
    fn check(&self, value: &V, data: Option<&D>, context: Option<&C>) -> ValidationResult {
        first_failure(&self.rules, value, data, context)
    }
}

impl<V: ?Sized, D: ?Sized, C: ?Sized> fmt::Debug for All<V, D, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("All")
            .field("rules", &format!("[{} rules]", self.rules.len()))
            .finish()
    }
}

/// An ordered list of rules where the first pass wins.
///
/// If every rule fails, the last failure is reported. An empty list passes.
pub struct Any<V: ?Sized, D: ?Sized = FormData, C: ?Sized = FormContext> {
    rules: Vec<Box<dyn Rule<V, D, C>>>,
}

impl<V: ?Sized, D: ?Sized, C: ?Sized> Any<V, D, C> {
    /// Create a new `Any` rule.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule<V, D, C>>>) -> Self {
        Self { rules }
    }
}

impl<V: ?Sized, D: ?Sized, C: ?Sized> Rule<V, D, C> for Any<V, D, C> {
    fn check(&self, value: &V, data: Option<&D>, context: Option<&C>) -> ValidationResult {
        let mut last_error = None;
        for rule in &self.rules {
            match rule.check(value, data, context) {
                ValidationResult::Valid => return ValidationResult::Valid,
                ValidationResult::Invalid(e) => last_error = Some(e),
            }
        }
        last_error.map_or(ValidationResult::Valid, ValidationResult::Invalid)
    }
}

impl<V: ?Sized, D: ?Sized, C: ?Sized> fmt::Debug for Any<V, D, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Any")
            .field("rules", &format!("[{} rules]", self.rules.len()))
            .finish()
    }
}

/// Run `rules` in order and return the first failure, or `Valid`.
pub(crate) fn first_failure<V: ?Sized, D: ?Sized, C: ?Sized>(
    rules: &[Box<dyn Rule<V, D, C>>],
    value: &V,
    data: Option<&D>,
    context: Option<&C>,
) -> ValidationResult {
    rules
        .iter()
        .map(|rule| rule.check(value, data, context))
        .find(ValidationResult::is_invalid)
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
