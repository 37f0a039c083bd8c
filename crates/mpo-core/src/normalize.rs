//! Field-level normalization of loosely-typed source values.
//!
//! The upstream dataset is hand-maintained JSON: the same field may arrive
//! as a string, a number, or be missing entirely. These helpers collapse
//! that into the typed values the `mobilepost` columns expect. Times and
//! display strings degrade silently to "no data"; a present-but-malformed
//! numeric field is an error the caller must surface.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("field `{field}` is not an integer: {value}")]
    InvalidInteger { field: &'static str, value: String },
    #[error("field `{field}` is not a number: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Loose truthiness over JSON values: null, `""`, `0`, `false`, and empty
/// containers all count as absent.
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Stringify a scalar the way the source data uses it: strings pass
/// through untouched, numbers and booleans render in their canonical form.
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Normalize an hour-of-day value to canonical zero-padded `HH:MM`.
///
/// Accepts `.` as a separator variant (`"9.5"` means 09:05). Anything that
/// does not yield exactly an in-range hour and minute pair is treated as
/// "no data" and returns `None` — never an error.
#[must_use]
pub fn normalize_time(raw: &Value) -> Option<String> {
    if is_falsy(raw) {
        return None;
    }
    let text = value_to_string(raw).trim().replace('.', ":");
    let mut parts = text.split(':');
    let (Some(hour_part), Some(minute_part), None) = (parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let hour: i32 = hour_part.trim().parse().ok()?;
    let minute: i32 = minute_part.trim().parse().ok()?;
    if (0..=23).contains(&hour) && (0..=59).contains(&minute) {
        Some(format!("{hour:02}:{minute:02}"))
    } else {
        None
    }
}

/// Coerce an optional display field to a `String`, defaulting falsy values
/// to the empty string. No trimming, no case changes.
#[must_use]
pub fn display_string(raw: &Value) -> String {
    if is_falsy(raw) {
        String::new()
    } else {
        value_to_string(raw)
    }
}

/// Coerce a key field whose presence has already been confirmed to `i32`.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidInteger`] for non-integral numbers,
/// unparseable strings, and non-scalar values.
pub fn coerce_int(field: &'static str, raw: &Value) -> Result<i32, NormalizeError> {
    let invalid = || NormalizeError::InvalidInteger {
        field,
        value: raw.to_string(),
    };
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).map_err(|_| invalid())
            } else {
                // Whole-valued floats (e.g. 3.0) count as integers.
                let f = n.as_f64().ok_or_else(invalid)?;
                if f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
                    #[allow(clippy::cast_possible_truncation)]
                    let whole = f as i32;
                    Ok(whole)
                } else {
                    Err(invalid())
                }
            }
        }
        Value::String(s) => s.trim().parse::<i32>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// Coerce an optional coordinate field to `f64`.
///
/// Null or the empty string mean "no data". A present value that does not
/// parse as a number is an error, not a silent `None` — deliberately
/// stricter than time/string handling so bad coordinates are reported.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidNumber`] for non-numeric present values.
pub fn coerce_float(field: &'static str, raw: &Value) -> Result<Option<f64>, NormalizeError> {
    let invalid = || NormalizeError::InvalidNumber {
        field,
        value: raw.to_string(),
    };
    match raw {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(Some(n.as_f64().ok_or_else(invalid)?)),
        Value::String(s) => {
            let trimmed = s.trim();
            if s.is_empty() {
                Ok(None)
            } else {
                trimmed.parse::<f64>().map(Some).map_err(|_| invalid())
            }
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn normalize_time_pads_hour_and_minute() {
        assert_eq!(normalize_time(&json!("9:5")).as_deref(), Some("09:05"));
    }

    #[test]
    fn normalize_time_accepts_dot_separator() {
        assert_eq!(normalize_time(&json!("9.5")).as_deref(), Some("09:05"));
    }

    #[test]
    fn normalize_time_accepts_numeric_input() {
        // 9.5 as a JSON number stringifies to "9.5" and normalizes the same way.
        assert_eq!(normalize_time(&json!(9.5)).as_deref(), Some("09:05"));
    }

    #[test]
    fn normalize_time_rejects_out_of_range_hour() {
        assert_eq!(normalize_time(&json!("25:00")), None);
    }

    #[test]
    fn normalize_time_rejects_out_of_range_minute() {
        assert_eq!(normalize_time(&json!("12:60")), None);
    }

    #[test]
    fn normalize_time_rejects_wrong_part_count() {
        assert_eq!(normalize_time(&json!("9")), None);
        assert_eq!(normalize_time(&json!("9:5:0")), None);
    }

    #[test]
    fn normalize_time_rejects_non_numeric_parts() {
        assert_eq!(normalize_time(&json!("nine:five")), None);
    }

    #[test]
    fn normalize_time_empty_and_null_are_no_data() {
        assert_eq!(normalize_time(&json!("")), None);
        assert_eq!(normalize_time(&Value::Null), None);
    }

    #[test]
    fn normalize_time_trims_surrounding_whitespace() {
        assert_eq!(normalize_time(&json!(" 09:30 ")).as_deref(), Some("09:30"));
    }

    #[test]
    fn display_string_defaults_falsy_to_empty() {
        assert_eq!(display_string(&Value::Null), "");
        assert_eq!(display_string(&json!("")), "");
        assert_eq!(display_string(&json!(0)), "");
    }

    #[test]
    fn display_string_keeps_text_untouched() {
        assert_eq!(display_string(&json!("  Sha Tin ")), "  Sha Tin ");
    }

    #[test]
    fn display_string_renders_numbers() {
        assert_eq!(display_string(&json!(42)), "42");
    }

    #[test]
    fn coerce_int_accepts_integers_and_numeric_strings() {
        assert_eq!(coerce_int("seq", &json!(3)).unwrap(), 3);
        assert_eq!(coerce_int("seq", &json!("3")).unwrap(), 3);
        assert_eq!(coerce_int("seq", &json!(" 7 ")).unwrap(), 7);
        assert_eq!(coerce_int("seq", &json!(3.0)).unwrap(), 3);
    }

    #[test]
    fn coerce_int_rejects_fractional_and_textual_values() {
        assert!(coerce_int("seq", &json!(3.5)).is_err());
        assert!(coerce_int("seq", &json!("three")).is_err());
        assert!(coerce_int("seq", &json!(true)).is_err());
    }

    #[test]
    fn coerce_float_treats_null_and_empty_as_no_data() {
        assert_eq!(coerce_float("latitude", &Value::Null).unwrap(), None);
        assert_eq!(coerce_float("latitude", &json!("")).unwrap(), None);
    }

    #[test]
    fn coerce_float_parses_numbers_and_numeric_strings() {
        assert_eq!(
            coerce_float("latitude", &json!(22.3193)).unwrap(),
            Some(22.3193)
        );
        assert_eq!(
            coerce_float("latitude", &json!("22.3193")).unwrap(),
            Some(22.3193)
        );
    }

    #[test]
    fn coerce_float_errors_on_non_numeric_present_value() {
        let err = coerce_float("latitude", &json!("north")).unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }
}
