#![forbid(unsafe_code)]

//! Loose string-to-number coercion.
//!
//! Form inputs arrive as text, and "is this a number" means "does the text
//! coerce to a finite-or-infinite numeric value" rather than "is it a Rust
//! float literal". The rules:
//!
//! - surrounding whitespace is ignored, and blank text is `0`
//! - `0x`, `0o` and `0b` prefixes select a radix (unsigned only)
//! - `Infinity` with an optional sign is accepted
//! - otherwise only decimal digits, one sign, `.` and an exponent are allowed,
//!   so spellings such as `inf`, `nan` and `1_000` are rejected

/// Coerce `text` to a number, or `None` if it is not numeric.
#[must_use]
pub fn coerce_number(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let decimal_only = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !decimal_only {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}
