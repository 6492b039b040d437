//! Property-based invariant tests for the built-in rules.
//!
//! 1. Required accepts every non-empty string.
//! 2. Generated well-formed addresses pass Email; strings without `@` fail.
//! 3. Every finite float's text form passes Numeric; alphabetic words fail.
//! 4. min/max agree with the character count.
//! 5. The name rule only depends on the context flag and the name fields.
//! 6. A field reports the first failing rule and stops there.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use vuiless_core::{Field, FormContext, FormData, Rule, ValidationResult, value_rule};
use vuiless_rules::{Required, first_or_last_name, is_email, is_number, is_required, max, min};

// ── Helpers ─────────────────────────────────────────────────────────────

fn check<R: Rule<str>>(rule: &R, value: &str) -> ValidationResult {
    rule.check(value, None, None)
}

fn address_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z0-9_+-]{1,12}",
        proptest::collection::vec("[a-z0-9-]{1,10}", 1..3),
        "[a-z]{2,6}",
    )
        .prop_map(|(local, labels, tld)| format!("{local}@{}.{tld}", labels.join(".")))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Required
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn required_accepts_non_empty(v in ".+") {
        prop_assert_eq!(is_required(v.as_str()), ValidationResult::Valid);
        prop_assert!(check(&Required, &v).is_valid());
    }
}

#[test]
fn required_rejects_empty_and_absent() {
    assert_eq!(is_required("").error_message().as_deref(), Some("Required"));
    assert_eq!(
        is_required(&None::<&str>).error_message().as_deref(),
        Some("Required")
    );
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Email
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn email_accepts_well_formed(address in address_strategy()) {
        prop_assert!(is_email(address.as_str()).is_valid(), "{} rejected", address);
    }

    #[test]
    fn email_rejects_without_at(v in "[^@]*") {
        prop_assert_eq!(
            is_email(v.as_str()).error_message(),
            Some("Incorrect email address".to_string())
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Numeric
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn number_accepts_float_text(n in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        prop_assert!(is_number(n.to_string().as_str()).is_valid(), "{} rejected", n);
    }

    #[test]
    fn number_rejects_words(word in "[g-wyzG-WYZ]{1,8}") {
        prop_assert_eq!(
            is_number(word.as_str()).error_message(),
            Some("Wrong Number".to_string())
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Length
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn min_matches_char_count(v in "\\PC{0,12}", n in 0usize..12) {
        let len = v.chars().count();
        let result = check(&min(n), &v);
        if len < n {
            prop_assert_eq!(result.error_message(), Some(format!("Min length {n}")));
        } else {
            prop_assert!(result.is_valid());
        }
    }

    #[test]
    fn max_matches_char_count(v in "\\PC{0,12}", n in 0usize..12) {
        let len = v.chars().count();
        let result = check(&max(n), &v);
        if len > n {
            prop_assert_eq!(result.error_message(), Some(format!("Max length {n}")));
        } else {
            prop_assert!(result.is_valid());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. First or last name
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn name_rule_truth_table(
        value in ".*",
        first in prop::option::of("[a-z]{0,3}"),
        last in prop::option::of("[a-z]{0,3}"),
        required in any::<bool>(),
    ) {
        let mut data = FormData::new();
        if let Some(first) = &first {
            data.set("firstName", first.as_str());
        }
        if let Some(last) = &last {
            data.set("lastName", last.as_str());
        }
        let ctx = FormContext::new().with_flag("nameIsRequired", required);

        let has_name = first.is_some_and(|f| !f.is_empty()) || last.is_some_and(|l| !l.is_empty());
        let result = first_or_last_name(value.as_str(), Some(&data), Some(&ctx));
        prop_assert_eq!(result.is_valid(), !required || has_name);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. First failure wins inside a field
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn field_stops_at_first_failure(v in "\\PC{0,6}") {
        let reached = Rc::new(Cell::new(false));
        let probe = {
            let reached = Rc::clone(&reached);
            value_rule(move |_: &String| {
                reached.set(true);
                ValidationResult::Valid
            })
        };
        let mut field: Field<String> = Field::new("f", v.clone()).rule(min(3)).rule(probe);

        let result = field.validate(None, None);
        let short = v.chars().count() < 3;
        prop_assert_eq!(result.is_invalid(), short);
        prop_assert_eq!(reached.get(), !short);
    }
}
