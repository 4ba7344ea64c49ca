//! Coercion: untyped JSON value in, typed value or one violation out.
//!
//! Coercion is lax. Numeric strings count as numbers, booleans count as
//! 0 and 1, and date-times may be unix numbers. Anything else of the wrong
//! JSON type is a type error, reported before any range or pattern check.

use jiff::{Timestamp, civil};
use serde_json::Value;
use uuid::Uuid;

use crate::model::{DateTimeValue, ErrorDetail, ErrorKind};

/// Unix numbers with a larger magnitude are milliseconds, not seconds.
const MILLIS_THRESHOLD: f64 = 20_000_000_000.0;

/// Coerce to a UUID. Accepts hyphenated, simple, braced, and URN forms.
pub fn uuid(field: &str, value: &Value) -> Result<Uuid, ErrorDetail> {
    let Value::String(s) = value else {
        return Err(ErrorDetail::new(
            ErrorKind::UuidType,
            field,
            "UUID input should be a string, bytes or UUID object",
            value.clone(),
        ));
    };

    Uuid::parse_str(s).map_err(|e| {
        ErrorDetail::new(
            ErrorKind::UuidParsing,
            field,
            format!("Input should be a valid UUID, {e}"),
            value.clone(),
        )
        .with_ctx("error", e.to_string())
    })
}

/// Coerce to a date-time.
///
/// Strings with an offset become instants, strings without one stay naive,
/// and a bare date means midnight. Numbers (and numeric strings) are unix
/// time.
pub fn datetime(field: &str, value: &Value) -> Result<DateTimeValue, ErrorDetail> {
    let parsed = match value {
        Value::String(s) => parse_datetime(s),
        Value::Number(n) => match n.as_f64() {
            Some(n) => from_unix(n).map(DateTimeValue::Aware),
            None => Err(format!("number {n} is not representable")),
        },
        _ => {
            return Err(ErrorDetail::new(
                ErrorKind::DatetimeType,
                field,
                "Input should be a valid datetime",
                value.clone(),
            ));
        }
    };

    parsed.map_err(|reason| {
        ErrorDetail::new(
            ErrorKind::DatetimeParsing,
            field,
            format!("Input should be a valid datetime, {reason}"),
            value.clone(),
        )
        .with_ctx("error", reason)
    })
}

fn parse_datetime(s: &str) -> Result<DateTimeValue, String> {
    // Digits-only strings such as "20240101" are unix time, not basic-format dates.
    if let Ok(n) = s.parse::<f64>()
        && n.is_finite()
    {
        return from_unix(n).map(DateTimeValue::Aware);
    }

    // Expanded years and bracketed time zone annotations parse in jiff but
    // are not date-times in this schema.
    if s.starts_with(['+', '-']) || s.contains('[') {
        return Err("unsupported date-time form".to_string());
    }

    if let Ok(ts) = s.parse::<Timestamp>() {
        return Ok(DateTimeValue::Aware(ts));
    }

    let naive_err = match s.parse::<civil::DateTime>() {
        Ok(dt) => return Ok(DateTimeValue::Naive(dt)),
        Err(e) => e,
    };

    if let Ok(date) = s.parse::<civil::Date>() {
        return Ok(DateTimeValue::Naive(date.at(0, 0, 0, 0)));
    }

    Err(naive_err.to_string())
}

/// Unix seconds, or milliseconds past [`MILLIS_THRESHOLD`].
fn from_unix(n: f64) -> Result<Timestamp, String> {
    let scale = if n.abs() > MILLIS_THRESHOLD { 1e6 } else { 1e9 };
    // Saturates for out-of-range input, which `from_nanosecond` then rejects.
    #[allow(clippy::cast_possible_truncation)]
    let nanos = (n * scale).round() as i128;
    Timestamp::from_nanosecond(nanos).map_err(|e| e.to_string())
}

/// Coerce to a float and check it lies within `ge..=le`.
pub fn float(field: &str, value: &Value, ge: i32, le: i32) -> Result<f64, ErrorDetail> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) => Some(n),
            Err(_) => {
                return Err(ErrorDetail::new(
                    ErrorKind::FloatParsing,
                    field,
                    "Input should be a valid number, unable to parse string as a number",
                    value.clone(),
                ));
            }
        },
        _ => None,
    };

    let Some(n) = n else {
        return Err(ErrorDetail::new(
            ErrorKind::FloatType,
            field,
            "Input should be a valid number",
            value.clone(),
        ));
    };

    // NaN satisfies neither bound; it is reported against the lower one.
    if n.is_nan() || n < f64::from(ge) {
        return Err(ErrorDetail::new(
            ErrorKind::GreaterThanEqual,
            field,
            format!("Input should be greater than or equal to {ge}"),
            value.clone(),
        )
        .with_ctx("ge", ge));
    }
    if n > f64::from(le) {
        return Err(ErrorDetail::new(
            ErrorKind::LessThanEqual,
            field,
            format!("Input should be less than or equal to {le}"),
            value.clone(),
        )
        .with_ctx("le", le));
    }

    Ok(n)
}

/// Require a string that is exactly one of `literals`.
pub fn pattern<'a>(
    field: &str,
    value: &'a Value,
    pattern: &str,
    literals: &[&str],
) -> Result<&'a str, ErrorDetail> {
    let Value::String(s) = value else {
        return Err(ErrorDetail::new(
            ErrorKind::StringType,
            field,
            "Input should be a valid string",
            value.clone(),
        ));
    };

    if literals.contains(&s.as_str()) {
        Ok(s.as_str())
    } else {
        Err(ErrorDetail::new(
            ErrorKind::StringPatternMismatch,
            field,
            format!("String should match pattern '{pattern}'"),
            value.clone(),
        )
        .with_ctx("pattern", pattern))
    }
}
