#![forbid(unsafe_code)]

//! Built-in rules.
//!
//! | Rule | Fails with |
//! |---|---|
//! | [`Required`] / [`is_required`] | `Required` when the value is absent or empty |
//! | [`Email`] / [`is_email`] | `Incorrect email address` when the value is not an address |
//! | [`Numeric`] / [`is_number`] | `Wrong Number` when the value does not coerce to a number |
//! | [`FirstOrLastName`] / [`first_or_last_name`] | `Please enter first name or last name` |
//! | [`min`] | `Min length {n}` when shorter than `n` characters |
//! | [`max`] | `Max length {n}` when longer than `n` characters |
//!
//! Lengths count characters. Absent values have length 0.

use std::sync::OnceLock;

use regex::Regex;
use vuiless_core::{
    ERROR_CODE_EMAIL, ERROR_CODE_MAX_LENGTH, ERROR_CODE_MIN_LENGTH, ERROR_CODE_NAME_REQUIRED,
    ERROR_CODE_NUMBER, ERROR_CODE_REQUIRED, FormContext, FormData, Rule, RuleInput,
    ValidationError, ValidationResult,
};

pub const MESSAGE_REQUIRED: &str = "Required";
pub const MESSAGE_EMAIL: &str = "Incorrect email address";
pub const MESSAGE_NUMBER: &str = "Wrong Number";
pub const MESSAGE_NAME_REQUIRED: &str = "Please enter first name or last name";

/// Local part (dot-separated atoms, or a quoted string) `@` domain (dotted
/// labels ending in a TLD of at least two letters, or a bracketed IPv4
/// literal).
const EMAIL_PATTERN: &str = r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|.(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#;

fn default_email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

// ---------------------------------------------------------------------------
// Required
// ---------------------------------------------------------------------------

/// Fails when the value is falsy (absent or empty).
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl<V, D, C> Rule<V, D, C> for Required
where
    V: RuleInput + ?Sized,
    D: ?Sized,
    C: ?Sized,
{
    fn check(&self, value: &V, _data: Option<&D>, _context: Option<&C>) -> ValidationResult {
        is_required(value)
    }
}

/// `Required` as a plain function.
pub fn is_required<V: RuleInput + ?Sized>(value: &V) -> ValidationResult {
    if value.is_truthy() {
        ValidationResult::Valid
    } else {
        ValidationResult::invalid(ERROR_CODE_REQUIRED, MESSAGE_REQUIRED)
    }
}

// ---------------------------------------------------------------------------
// Email
// ---------------------------------------------------------------------------

/// Fails when the value is not an email address.
///
/// The empty string and absent values fail too. Combine with a blank check
/// through [`Or`](vuiless_core::Or) when an empty email is acceptable.
#[derive(Debug, Clone)]
pub struct Email {
    pattern: Option<Regex>,
}

impl Email {
    /// Email rule with the built-in address pattern.
    #[must_use]
    pub fn new() -> Self {
        Self { pattern: None }
    }

    /// Email rule with a caller-supplied pattern.
    #[must_use]
    pub fn with_pattern(pattern: Regex) -> Self {
        Self {
            pattern: Some(pattern),
        }
    }

    fn regex(&self) -> Option<&Regex> {
        match &self.pattern {
            Some(pattern) => Some(pattern),
            None => default_email_regex(),
        }
    }

    fn test<V: RuleInput + ?Sized>(&self, value: &V) -> ValidationResult {
        let matches = match (value.text(), self.regex()) {
            (Some(text), Some(re)) => re.is_match(&text),
            _ => false,
        };
        if matches {
            ValidationResult::Valid
        } else {
            ValidationResult::invalid(ERROR_CODE_EMAIL, MESSAGE_EMAIL)
        }
    }
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, D, C> Rule<V, D, C> for Email
where
    V: RuleInput + ?Sized,
    D: ?Sized,
    C: ?Sized,
{
    fn check(&self, value: &V, _data: Option<&D>, _context: Option<&C>) -> ValidationResult {
        self.test(value)
    }
}

/// `Email` with the built-in pattern, as a plain function.
pub fn is_email<V: RuleInput + ?Sized>(value: &V) -> ValidationResult {
    Email::new().test(value)
}

// ---------------------------------------------------------------------------
// Numeric
// ---------------------------------------------------------------------------

/// Fails when the value does not coerce to a number.
///
/// Coercion is loose: see [`vuiless_core::number`]. Blank text counts as 0;
/// an absent value is not a number.
#[derive(Debug, Clone, Copy, Default)]
pub struct Numeric;

impl<V, D, C> Rule<V, D, C> for Numeric
where
    V: RuleInput + ?Sized,
    D: ?Sized,
    C: ?Sized,
{
    fn check(&self, value: &V, _data: Option<&D>, _context: Option<&C>) -> ValidationResult {
        is_number(value)
    }
}

/// `Numeric` as a plain function.
pub fn is_number<V: RuleInput + ?Sized>(value: &V) -> ValidationResult {
    match value.to_number() {
        Some(_) => ValidationResult::Valid,
        None => ValidationResult::invalid(ERROR_CODE_NUMBER, MESSAGE_NUMBER),
    }
}

// ---------------------------------------------------------------------------
// FirstOrLastName
// ---------------------------------------------------------------------------

/// Form data that carries a first and a last name.
pub trait NameFields {
    fn has_first_name(&self) -> bool;
    fn has_last_name(&self) -> bool;
}

impl NameFields for FormData {
    fn has_first_name(&self) -> bool {
        self.is_filled("firstName")
    }

    fn has_last_name(&self) -> bool {
        self.is_filled("lastName")
    }
}

/// Context that says whether a name is mandatory.
pub trait NameRequirement {
    fn name_is_required(&self) -> bool;
}

impl NameRequirement for FormContext {
    fn name_is_required(&self) -> bool {
        self.flag("nameIsRequired")
    }
}

impl NameRequirement for bool {
    fn name_is_required(&self) -> bool {
        *self
    }
}

/// Cross-field rule: when the context requires a name, the form data must
/// have a first name or a last name.
///
/// The value under validation is ignored. Without a context, or with a
/// context that does not require a name, the rule passes. A missing form
/// data counts as having no names.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOrLastName;

impl<V, D, C> Rule<V, D, C> for FirstOrLastName
where
    V: ?Sized,
    D: NameFields + ?Sized,
    C: NameRequirement + ?Sized,
{
    fn check(&self, value: &V, data: Option<&D>, context: Option<&C>) -> ValidationResult {
        first_or_last_name(value, data, context)
    }
}

/// `FirstOrLastName` as a plain function.
pub fn first_or_last_name<V, D, C>(_value: &V, data: Option<&D>, context: Option<&C>) -> ValidationResult
where
    V: ?Sized,
    D: NameFields + ?Sized,
    C: NameRequirement + ?Sized,
{
    if !context.is_some_and(NameRequirement::name_is_required) {
        return ValidationResult::Valid;
    }
    let has_name = data.is_some_and(|d| d.has_first_name() || d.has_last_name());
    if has_name {
        ValidationResult::Valid
    } else {
        ValidationResult::invalid(ERROR_CODE_NAME_REQUIRED, MESSAGE_NAME_REQUIRED)
    }
}

// ---------------------------------------------------------------------------
// Length
// ---------------------------------------------------------------------------

/// Fails when the value has fewer than `min` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinLength {
    pub min: usize,
}

impl<V, D, C> Rule<V, D, C> for MinLength
where
    V: RuleInput + ?Sized,
    D: ?Sized,
    C: ?Sized,
{
    fn check(&self, value: &V, _data: Option<&D>, _context: Option<&C>) -> ValidationResult {
        let len = value.char_len();
        if len < self.min {
            ValidationResult::Invalid(
                ValidationError::new(ERROR_CODE_MIN_LENGTH, "Min length {min}")
                    .with_param("min", self.min),
            )
        } else {
            ValidationResult::Valid
        }
    }
}

/// Fails when the value has more than `max` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLength {
    pub max: usize,
}

impl<V, D, C> Rule<V, D, C> for MaxLength
where
    V: RuleInput + ?Sized,
    D: ?Sized,
    C: ?Sized,
{
    fn check(&self, value: &V, _data: Option<&D>, _context: Option<&C>) -> ValidationResult {
        let len = value.char_len();
        if len > self.max {
            ValidationResult::Invalid(
                ValidationError::new(ERROR_CODE_MAX_LENGTH, "Max length {max}")
                    .with_param("max", self.max),
            )
        } else {
            ValidationResult::Valid
        }
    }
}

/// Minimum length rule factory.
#[must_use]
pub fn min(n: usize) -> MinLength {
    MinLength { min: n }
}

/// Maximum length rule factory.
#[must_use]
pub fn max(n: usize) -> MaxLength {
    MaxLength { max: n }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
