//! Loose-typing coercions applied to payload values.
//!
//! API payloads routinely carry numbers as strings, flags as `"1"`/`0`, and
//! empty strings where a value is absent. These helpers turn any JSON value
//! into the scalar a typed field wants, never failing.

use serde_json::{Number, Value};

/// Whitespace skipped before a numeric string.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Splits off the longest leading numeral of `s`.
///
/// Returns the numeral and whether it carries a fraction or exponent.
fn numeric_prefix(s: &str) -> (&str, bool) {
    let b = s.as_bytes();
    let len = b.len();
    let mut i = 0;
    if i < len && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < len && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    let mut is_float = false;

    if i < len && b[i] == b'.' {
        let mut j = i + 1;
        while j < len && b[j].is_ascii_digit() {
            j += 1;
        }
        let frac = j - (i + 1);
        if digits > 0 || frac > 0 {
            i = j;
            digits += frac;
            is_float = true;
        }
    }
    if digits == 0 {
        return ("", false);
    }

    if i < len && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < len && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
            is_float = true;
        }
    }

    (&s[..i], is_float)
}

/// `as` saturates at the integer bounds and maps NaN to 0.
fn float_to_int(f: f64) -> i64 {
    f as i64
}

fn number_to_int(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        i
    } else if n.is_u64() {
        i64::MAX
    } else {
        float_to_int(n.as_f64().unwrap_or_default())
    }
}

fn str_to_int(s: &str) -> i64 {
    let (numeral, is_float) = numeric_prefix(s.trim_start_matches(is_space));
    if numeral.is_empty() {
        return 0;
    }
    let as_float = || float_to_int(numeral.parse::<f64>().unwrap_or_default());
    if is_float {
        as_float()
    } else {
        numeral.parse::<i64>().unwrap_or_else(|_| as_float())
    }
}

/// Integer coercion. Non-numeric strings become 0; a numeric prefix is honoured.
#[must_use]
pub fn to_int(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => number_to_int(n),
        Value::String(s) => str_to_int(s),
        Value::Array(items) => i64::from(!items.is_empty()),
        Value::Object(map) => i64::from(!map.is_empty()),
    }
}

/// True for numbers and for strings that are entirely a decimal numeral
/// (surrounding whitespace allowed).
#[must_use]
pub fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => {
            let trimmed = s.trim_matches(is_space);
            let (numeral, _) = numeric_prefix(trimmed);
            !numeral.is_empty() && numeral.len() == trimmed.len()
        }
        _ => false,
    }
}

/// String coercion. `null` is empty, booleans are `"1"`/`""`, collections are
/// rendered as compact JSON.
#[must_use]
pub fn to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Loose truthiness: `null`, `false`, zero, `""`, `"0"` and empty collections
/// are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i != 0
            } else if let Some(u) = n.as_u64() {
                u != 0
            } else {
                n.as_f64().is_some_and(|f| f != 0.0)
            }
        }
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// True for sequences and mappings.
#[must_use]
pub fn is_collection(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// True if `needle` appears among `values`, as a string or as a number's rendering.
pub fn contains_member<'a>(mut values: impl Iterator<Item = &'a Value>, needle: &str) -> bool {
    values.any(|value| match value {
        Value::String(s) => s == needle,
        Value::Number(n) => n.to_string() == needle,
        _ => false,
    })
}
