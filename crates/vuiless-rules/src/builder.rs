#![forbid(unsafe_code)]

//! Fluent construction of rule chains.

use std::marker::PhantomData;

use vuiless_core::{All, FormContext, FormData, Rule, RuleInput};

use crate::rules::{Email, FirstOrLastName, NameFields, NameRequirement, Numeric, Required, max, min};

/// Builds an [`All`] chain: rules run in the order they were added and the
/// first failure wins.
///
/// ```rust
/// use vuiless_core::Rule;
/// use vuiless_rules::RuleBuilder;
///
/// let rule = RuleBuilder::<str>::new().required().min(3).max(20).build();
///
/// let check = |v: &str| rule.check(v, None, None).error_message();
/// assert_eq!(check("alice"), None);
/// assert_eq!(check("").as_deref(), Some("Required"));
/// assert_eq!(check("al").as_deref(), Some("Min length 3"));
/// ```
pub struct RuleBuilder<V: ?Sized, D: ?Sized = FormData, C: ?Sized = FormContext> {
    rules: Vec<Box<dyn Rule<V, D, C>>>,
    _phantom: PhantomData<fn(&V)>,
}

impl<V: ?Sized, D: ?Sized, C: ?Sized> Default for RuleBuilder<V, D, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized, D: ?Sized, C: ?Sized> RuleBuilder<V, D, C> {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Add any rule.
    #[must_use]
    pub fn custom(mut self, rule: impl Rule<V, D, C> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Number of rules added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Build the chain.
    #[must_use]
    pub fn build(self) -> All<V, D, C> {
        All::new(self.rules)
    }

    /// The rules, boxed, for [`Field::rules`](vuiless_core::Field::rules).
    #[must_use]
    pub fn into_rules(self) -> Vec<Box<dyn Rule<V, D, C>>> {
        self.rules
    }
}

impl<V: RuleInput + ?Sized, D: ?Sized, C: ?Sized> RuleBuilder<V, D, C> {
    /// Add [`Required`].
    #[must_use]
    pub fn required(self) -> Self {
        self.custom(Required)
    }

    /// Add [`Email`] with the built-in pattern.
    #[must_use]
    pub fn email(self) -> Self {
        self.custom(Email::new())
    }

    /// Add [`Numeric`].
    #[must_use]
    pub fn number(self) -> Self {
        self.custom(Numeric)
    }

    /// Add a minimum length.
    #[must_use]
    pub fn min(self, n: usize) -> Self {
        self.custom(min(n))
    }

    /// Add a maximum length.
    #[must_use]
    pub fn max(self, n: usize) -> Self {
        self.custom(max(n))
    }
}

impl<V: ?Sized, D: NameFields + ?Sized, C: NameRequirement + ?Sized> RuleBuilder<V, D, C> {
    /// Add [`FirstOrLastName`].
    #[must_use]
    pub fn first_or_last_name(self) -> Self {
        self.custom(FirstOrLastName)
    }
}
