//! Lenient numeric coercion
//!
//! Backend values and form inputs arrive as loosely-typed text. These helpers
//! read the longest numeric prefix the way browser scripts do (`"12abc"` is 12,
//! `"abc"` is nothing), so a stray unit suffix doesn't lose the number.

use crate::types::Value;

/// Integer prefix of a string: optional sign followed by ASCII digits
pub fn parse_int_prefix_str(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Float prefix of a string: sign, digits, optional fraction and exponent
pub fn parse_float_prefix_str(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].replace("Infinity", "inf").parse().ok();
    }

    let int_digits = bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts if at least one digit follows it
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-') | Some(b'+')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end.min(bytes.len())..].iter().take_while(|b| b.is_ascii_digit()).count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// Integer coercion of a field value; fractional numbers truncate toward zero
pub fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) if n.is_finite() => Some(n.trunc() as i64),
        Value::Text(s) => parse_int_prefix_str(s),
        _ => None,
    }
}

/// Finite float coercion of a field value
pub fn float_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => Some(*n),
        Value::Text(s) => parse_float_prefix_str(s),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Whole-string numeric conversion of text, or `None` where a browser yields NaN
///
/// Blank text is 0. `0x`, `0o` and `0b` literals take no sign. `Infinity` is
/// spelled out and case-sensitive; Rust's own `inf` and `nan` spellings are rejected.
pub fn number_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        return u128::from_str_radix(digits, radix).ok().map(|n| n as f64);
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return Some(if trimmed.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }
    if !unsigned.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) {
        return None;
    }
    trimmed.parse().ok()
}

/// Whether a value converts to a number in its entirety
///
/// Unlike the prefix parsers this rejects trailing garbage: `"12"`, `" 3.5 "` and
/// `"0x10"` are numeric, `"12kg"` is not. Nulls, booleans and blank strings
/// convert to 0 or 1 and so count as numeric.
pub fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(n) => !n.is_nan(),
        Value::Null | Value::Bool(_) => true,
        Value::Text(s) => number_str(s).is_some(),
    }
}
