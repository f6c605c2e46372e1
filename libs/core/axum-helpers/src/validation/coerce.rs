//! Loose readings of untyped request values.
//!
//! Path parameters arrive as strings and JSON bodies may carry numbers as
//! strings, so every check works on the value's string form the same way a
//! form-oriented validator would.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("valid numeric regex"));

static INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?([1-9][0-9]*|0)$").expect("valid int regex"));

/// String form of a scalar. Null, arrays and objects have none.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn is_not_empty(value: &Value) -> bool {
    as_text(value).is_some_and(|s| !s.is_empty())
}

pub fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => NUMERIC.is_match(s),
        _ => false,
    }
}

pub fn is_int(value: &Value) -> bool {
    as_int(value).is_some() || matches!(value, Value::String(s) if INT.is_match(s))
}

pub fn is_boolean(value: &Value) -> bool {
    as_bool(value).is_some()
}

/// Numeric reading: JSON numbers as-is, numeric strings parsed.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if NUMERIC.is_match(s) => s.parse().ok(),
        _ => None,
    }
}

/// Integer reading. Integral floats such as `3.0` count; out-of-range strings do not.
pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) if INT.is_match(s) => s.parse().ok(),
        _ => None,
    }
}

/// Boolean reading: `true`/`false`, `0`/`1`, and their string forms.
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_empty_rejects_missing_shapes() {
        assert!(is_not_empty(&json!("Mouse")));
        assert!(is_not_empty(&json!(0)));
        assert!(is_not_empty(&json!(false)));

        assert!(!is_not_empty(&json!("")));
        assert!(!is_not_empty(&Value::Null));
        assert!(!is_not_empty(&json!([])));
        assert!(!is_not_empty(&json!({ "a": 1 })));
    }

    #[test]
    fn test_numeric_accepts_numbers_and_numeric_strings() {
        assert!(is_numeric(&json!(50)));
        assert!(is_numeric(&json!(-3.5)));
        assert!(is_numeric(&json!("300")));
        assert!(is_numeric(&json!("+.5")));

        assert!(!is_numeric(&json!("hola")));
        assert!(!is_numeric(&json!("1e5")));
        assert!(!is_numeric(&json!("")));
        assert!(!is_numeric(&json!(true)));
    }

    #[test]
    fn test_int_follows_decimal_grammar() {
        assert!(is_int(&json!("1")));
        assert!(is_int(&json!("-4")));
        assert!(is_int(&json!("0")));
        assert!(is_int(&json!(12)));
        assert!(is_int(&json!("99999999999999999999999")));

        assert!(!is_int(&json!("01")));
        assert!(!is_int(&json!("not-valid")));
        assert!(!is_int(&json!("1.5")));
        assert!(!is_int(&json!(1.5)));
    }

    #[test]
    fn test_as_int_rejects_values_beyond_i64() {
        assert_eq!(as_int(&json!("42")), Some(42));
        assert_eq!(as_int(&json!(7.0)), Some(7));
        assert_eq!(as_int(&json!("99999999999999999999999")), None);
    }

    #[test]
    fn test_boolean_forms() {
        for truthy in [json!(true), json!(1), json!("true"), json!("1")] {
            assert_eq!(as_bool(&truthy), Some(true), "{truthy}");
        }
        for falsy in [json!(false), json!(0), json!("false"), json!("0")] {
            assert_eq!(as_bool(&falsy), Some(false), "{falsy}");
        }
        for invalid in [json!("yes"), json!(2), json!(null), json!("TRUE")] {
            assert!(!is_boolean(&invalid), "{invalid}");
        }
    }

    #[test]
    fn test_as_number_parses_numeric_strings() {
        assert_eq!(as_number(&json!("19.99")), Some(19.99));
        assert_eq!(as_number(&json!(50)), Some(50.0));
        assert_eq!(as_number(&json!("abc")), None);
    }
}
