//! Lenient JSON scalar coercion.
//!
//! Missing or mistyped required values collapse to `0` / empty string so
//! they never leak into aggregation arithmetic.

use serde_json::Value;

/// `None` for missing or `null`, otherwise the value as text
pub(crate) fn to_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

pub(crate) fn to_f64(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

pub(crate) fn to_i64(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .unwrap_or_else(|| n.as_f64().map_or(0, |f| f as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .unwrap_or_else(|_| s.parse::<f64>().map_or(0, |f| f as i64))
        }
        _ => 0,
    }
}

pub(crate) fn to_status(value: Option<&Value>) -> u16 {
    to_i64(value).clamp(0, i64::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(None), None);
        assert_eq!(to_text(Some(&Value::Null)), None);
        assert_eq!(to_text(Some(&json!(""))), Some(String::new()));
        assert_eq!(to_text(Some(&json!(42))), Some("42".to_string()));
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(to_i64(Some(&json!(1500))), 1500);
        assert_eq!(to_i64(Some(&json!(1500.9))), 1500);
        assert_eq!(to_i64(Some(&json!(" 2048 "))), 2048);
        assert_eq!(to_i64(Some(&json!("abc"))), 0);
        assert_eq!(to_i64(None), 0);
        assert_eq!(to_f64(Some(&json!("0.5"))), 0.5);
        assert_eq!(to_f64(Some(&json!(true))), 0.0);
    }

    #[test]
    fn test_status_is_clamped() {
        assert_eq!(to_status(Some(&json!(404))), 404);
        assert_eq!(to_status(Some(&json!(-1))), 0);
        assert_eq!(to_status(Some(&json!(70000))), u16::MAX);
    }
}
