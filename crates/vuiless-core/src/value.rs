#![forbid(unsafe_code)]

//! Field values, form data, and form context.
//!
//! Rules do not care whether a value is a `&str`, an owned `String`, an
//! optional input that was never filled in, or a loosely typed
//! [`FieldValue`]. The [`RuleInput`] trait gives them one view of all of
//! these: an optional text form, truthiness, and numeric coercion.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use crate::number::coerce_number;

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// A single, loosely typed form value.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    /// No value (never entered, or explicitly cleared).
    #[default]
    Absent,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Returns `true` for [`FieldValue::Absent`].
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The text payload, if this is a `Text` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

// ---------------------------------------------------------------------------
// RuleInput
// ---------------------------------------------------------------------------

/// Uniform view of a value under validation.
pub trait RuleInput {
    /// Text form of the value, or `None` when the value is absent.
    fn text(&self) -> Option<Cow<'_, str>>;

    /// Whether the value counts as "filled in".
    ///
    /// Absent values and empty text are falsy.
    fn is_truthy(&self) -> bool {
        self.text().is_some_and(|t| !t.is_empty())
    }

    /// Numeric coercion of the value, or `None` when it is not a number.
    fn to_number(&self) -> Option<f64> {
        self.text().and_then(|t| coerce_number(&t))
    }

    /// Length in characters. Absent values have length 0.
    fn char_len(&self) -> usize {
        self.text().map_or(0, |t| t.chars().count())
    }
}

impl RuleInput for str {
    fn text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl RuleInput for String {
    fn text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl<T: RuleInput + ?Sized> RuleInput for &T {
    fn text(&self) -> Option<Cow<'_, str>> {
        (**self).text()
    }

    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }

    fn to_number(&self) -> Option<f64> {
        (**self).to_number()
    }

    fn char_len(&self) -> usize {
        (**self).char_len()
    }
}

impl<T: RuleInput> RuleInput for Option<T> {
    fn text(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(RuleInput::text)
    }

    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(RuleInput::is_truthy)
    }

    fn to_number(&self) -> Option<f64> {
        self.as_ref().and_then(RuleInput::to_number)
    }

    fn char_len(&self) -> usize {
        self.as_ref().map_or(0, RuleInput::char_len)
    }
}

impl RuleInput for FieldValue {
    fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Absent => None,
            Self::Text(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    fn is_truthy(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }

    fn to_number(&self) -> Option<f64> {
        match self {
            Self::Absent => None,
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Number(n) if n.is_nan() => None,
            Self::Number(n) => Some(*n),
            Self::Text(s) => coerce_number(s),
        }
    }
}

// ---------------------------------------------------------------------------
// FormData
// ---------------------------------------------------------------------------

/// The values of a whole form, keyed by field name.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FormData {
    values: BTreeMap<String, FieldValue>,
}

impl FormData {
    /// Create empty form data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a value, returning the previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Get a value by field name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Get a text value by field name.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    /// Whether the named value is present and truthy.
    #[must_use]
    pub fn is_filled(&self, name: &str) -> bool {
        self.get(name).is_some_and(RuleInput::is_truthy)
    }

    /// Remove a value.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.values.remove(name)
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// FormContext
// ---------------------------------------------------------------------------

/// Side-channel data handed to rules alongside the form data.
///
/// Context values are not form fields. They carry flags such as "a name is
/// required for this form" that cross-field rules consult.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FormContext {
    entries: BTreeMap<String, FieldValue>,
}

impl FormContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Builder-style boolean flag.
    #[must_use]
    pub fn with_flag(self, key: impl Into<String>, on: bool) -> Self {
        self.with(key, on)
    }

    /// Insert or replace an entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get an entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    /// Truthiness of an entry. Missing entries are `false`.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(RuleInput::is_truthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_truthiness() {
        assert!(!FieldValue::Absent.is_truthy());
        assert!(!FieldValue::from("").is_truthy());
        assert!(FieldValue::from("a").is_truthy());
        assert!(!FieldValue::from(false).is_truthy());
        assert!(FieldValue::from(true).is_truthy());
        assert!(!FieldValue::from(0.0).is_truthy());
        assert!(!FieldValue::Number(f64::NAN).is_truthy());
        assert!(FieldValue::from(3_i64).is_truthy());
    }

    #[test]
    fn option_maps_to_absent() {
        assert_eq!(FieldValue::from(None::<&str>), FieldValue::Absent);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::from("x"));
    }

    #[test]
    fn rule_input_for_strings() {
        assert_eq!("abc".char_len(), 3);
        assert_eq!(String::from("héllo").char_len(), 5);
        assert!(!"".is_truthy());
        assert_eq!("12".to_number(), Some(12.0));
    }

    #[test]
    fn rule_input_for_option() {
        let missing: Option<String> = None;
        assert!(missing.text().is_none());
        assert!(!missing.is_truthy());
        assert_eq!(missing.char_len(), 0);
        assert_eq!(missing.to_number(), None);
        assert!(Some("x").is_truthy());
    }

    #[test]
    fn field_value_numbers() {
        assert_eq!(FieldValue::from(true).to_number(), Some(1.0));
        assert_eq!(FieldValue::Number(f64::NAN).to_number(), None);
        assert_eq!(FieldValue::from("0x10").to_number(), Some(16.0));
        assert_eq!(FieldValue::Absent.to_number(), None);
        assert_eq!(FieldValue::from(2.5).text().as_deref(), Some("2.5"));
    }

    #[test]
    fn form_data_lookup() {
        let mut data = FormData::new().with("firstName", "Ada").with("age", 36_i64);
        assert_eq!(data.text("firstName"), Some("Ada"));
        assert_eq!(data.text("age"), None);
        assert!(data.is_filled("firstName"));
        assert!(!data.is_filled("lastName"));

        let previous = data.set("firstName", "");
        assert_eq!(previous, Some(FieldValue::from("Ada")));
        assert!(!data.is_filled("firstName"));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn form_data_from_iter_is_name_ordered() {
        let data: FormData = [("b", "2"), ("a", "1")].into_iter().collect();
        let names: Vec<&str> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn context_flags() {
        let ctx = FormContext::new().with_flag("nameIsRequired", true);
        assert!(ctx.flag("nameIsRequired"));
        assert!(!ctx.flag("missing"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn form_data_serde_shape() {
        let data = FormData::new()
            .with("email", "a@b.co")
            .with("age", 3_i64)
            .with("agree", true)
            .with("nickname", FieldValue::Absent);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"age": 3.0, "agree": true, "email": "a@b.co", "nickname": null})
        );
        let back: FormData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }
}
