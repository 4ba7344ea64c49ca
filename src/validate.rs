//! Validation: fold a document over the schema table.
//!
//! Every field is checked, in declaration order, and every violation is
//! collected. A field contributes at most one error. Unknown keys are
//! ignored.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::coerce;
use crate::error::{Error, Result};
use crate::model::{
    DateTimeValue, ErrorDetail, ErrorKind, Mode, StructuralConfig, ValidationResult,
};
use crate::schema::{Field, FieldKind, SCHEMA};

/// A field's value after coercion.
#[derive(Debug, Clone, PartialEq)]
enum Coerced<'a> {
    Uuid(Uuid),
    DateTime(DateTimeValue),
    Float(f64),
    Text(&'a str),
}

/// Parse raw text and validate it.
///
/// Malformed JSON and non-object documents are errors; schema violations
/// are not, they are reported in the result.
pub fn validate(raw: &str) -> Result<ValidationResult> {
    let value: Value = serde_json::from_str(raw)?;

    let document = match value {
        Value::Object(document) => document,
        other => return Err(Error::NotAnObject(json_type_name(&other))),
    };

    Ok(validate_document(&document))
}

/// Validate a parsed document: every violation, or the typed record.
pub fn validate_document(document: &Map<String, Value>) -> ValidationResult {
    let mut values = Vec::with_capacity(SCHEMA.len());
    let mut errors = Vec::new();

    for field in SCHEMA {
        match check_field(field, document) {
            Ok(value) => values.push(value),
            Err(error) => errors.push(error),
        }
    }

    if !errors.is_empty() {
        return ValidationResult::from_errors(errors);
    }

    // A table that drifted from the record still yields a correct verdict,
    // just without the typed record.
    match assemble(&values) {
        Some(record) => ValidationResult::conforming(record),
        None => ValidationResult::from_errors(errors),
    }
}

fn check_field<'a>(
    field: &Field,
    document: &'a Map<String, Value>,
) -> core::result::Result<Coerced<'a>, ErrorDetail> {
    let Some(value) = document.get(field.name) else {
        return Err(ErrorDetail::new(
            ErrorKind::Missing,
            field.name,
            "Field required",
            Value::Object(document.clone()),
        ));
    };

    match field.kind {
        FieldKind::Uuid => coerce::uuid(field.name, value).map(Coerced::Uuid),
        FieldKind::DateTime => coerce::datetime(field.name, value).map(Coerced::DateTime),
        FieldKind::Float { ge, le } => coerce::float(field.name, value, ge, le).map(Coerced::Float),
        FieldKind::Pattern { pattern, literals } => {
            coerce::pattern(field.name, value, pattern, literals).map(Coerced::Text)
        }
    }
}

/// Build the typed record from values coerced in schema order.
///
/// Returns `None` only if the schema table and [`StructuralConfig`] have
/// drifted apart.
fn assemble(values: &[Coerced<'_>]) -> Option<StructuralConfig> {
    let [
        Coerced::Uuid(id),
        Coerced::DateTime(timestamp),
        Coerced::Float(temperature),
        Coerced::Float(pressure),
        Coerced::Text(mode),
    ] = values
    else {
        return None;
    };

    Some(StructuralConfig {
        id: *id,
        timestamp: *timestamp,
        temperature: *temperature,
        pressure: *pressure,
        mode: Mode::from_literal(mode)?,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    const ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    fn valid() -> Value {
        json!({
            "id": ID,
            "timestamp": "2024-01-01T00:00:00Z",
            "temperature": 20.5,
            "pressure": 1010,
            "mode": "AUTO",
        })
    }

    fn with(key: &str, value: Value) -> String {
        let mut doc = valid();
        doc[key] = value;
        doc.to_string()
    }

    fn without(key: &str) -> String {
        let mut doc = valid();
        doc.as_object_mut().unwrap().remove(key);
        doc.to_string()
    }

    fn fields(result: &ValidationResult) -> Vec<(&str, ErrorKind)> {
        result
            .errors
            .iter()
            .map(|e| (e.loc[0].as_str(), e.kind))
            .collect()
    }

    #[test]
    fn valid_document_passes() {
        let result = validate(&valid().to_string()).unwrap();
        assert!(result.ok);
        assert!(result.errors.is_empty());
        assert!(result.record.is_some());
    }

    #[test]
    fn valid_document_yields_record() {
        let Value::Object(doc) = valid() else {
            unreachable!()
        };
        let record = validate_document(&doc).record.unwrap();
        assert_eq!(record.id, ID.parse::<Uuid>().unwrap());
        assert_eq!(
            record.timestamp,
            DateTimeValue::Aware("2024-01-01T00:00:00Z".parse::<Timestamp>().unwrap())
        );
        assert_eq!(record.temperature, 20.5);
        assert_eq!(record.pressure, 1010.0);
        assert_eq!(record.mode, Mode::Auto);
    }

    #[test]
    fn bad_id() {
        let result = validate(&with("id", json!("not-a-uuid"))).unwrap();
        assert!(!result.ok);
        assert_eq!(fields(&result), [("id", ErrorKind::UuidParsing)]);
        assert_eq!(result.errors[0].input, json!("not-a-uuid"));
    }

    #[test]
    fn temperature_out_of_range() {
        let result = validate(&with("temperature", json!(300))).unwrap();
        assert!(!result.ok);
        assert_eq!(fields(&result), [("temperature", ErrorKind::LessThanEqual)]);
        assert_eq!(result.errors[0].input, json!(300));
    }

    #[test]
    fn unknown_mode() {
        let result = validate(&with("mode", json!("STANDBY"))).unwrap();
        assert_eq!(
            fields(&result),
            [("mode", ErrorKind::StringPatternMismatch)]
        );
    }

    #[test]
    fn lowercase_mode_is_rejected() {
        let result = validate(&with("mode", json!("auto"))).unwrap();
        assert!(!result.ok);
        assert_eq!(
            fields(&result),
            [("mode", ErrorKind::StringPatternMismatch)]
        );
    }

    #[test]
    fn empty_object_reports_every_field_missing() {
        let result = validate("{}").unwrap();
        assert!(!result.ok);
        assert_eq!(
            fields(&result),
            [
                ("id", ErrorKind::Missing),
                ("timestamp", ErrorKind::Missing),
                ("temperature", ErrorKind::Missing),
                ("pressure", ErrorKind::Missing),
                ("mode", ErrorKind::Missing),
            ]
        );
        for error in &result.errors {
            assert_eq!(error.msg, "Field required");
            assert_eq!(error.input, json!({}));
        }
    }

    #[test]
    fn missing_id_reports_once_with_whole_document() {
        let raw = without("id");
        let result = validate(&raw).unwrap();
        assert!(!result.ok);
        assert_eq!(fields(&result), [("id", ErrorKind::Missing)]);
        assert_eq!(
            result.errors[0].input,
            serde_json::from_str::<Value>(&raw).unwrap()
        );
    }

    #[test]
    fn errors_follow_declaration_order() {
        let raw = json!({
            "mode": "off",
            "pressure": "heavy",
            "temperature": -100,
            "id": 7,
        })
        .to_string();
        let result = validate(&raw).unwrap();
        assert_eq!(
            fields(&result),
            [
                ("id", ErrorKind::UuidType),
                ("timestamp", ErrorKind::Missing),
                ("temperature", ErrorKind::GreaterThanEqual),
                ("pressure", ErrorKind::FloatParsing),
                ("mode", ErrorKind::StringPatternMismatch),
            ]
        );
    }

    #[test]
    fn null_is_a_type_error_not_missing() {
        let result = validate(&with("timestamp", Value::Null)).unwrap();
        assert_eq!(fields(&result), [("timestamp", ErrorKind::DatetimeType)]);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let result = validate(&with("operator", json!("night shift"))).unwrap();
        assert!(result.ok);
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let result = validate(&with("pressure", json!("1200"))).unwrap();
        assert!(result.ok);
    }

    #[test]
    fn pressure_bounds() {
        for ok in [800.0, 1200.0, 1000.0] {
            assert!(validate(&with("pressure", json!(ok))).unwrap().ok, "{ok}");
        }
        let low = validate(&with("pressure", json!(799.999))).unwrap();
        assert_eq!(fields(&low), [("pressure", ErrorKind::GreaterThanEqual)]);
        let high = validate(&with("pressure", json!(1200.001))).unwrap();
        assert_eq!(fields(&high), [("pressure", ErrorKind::LessThanEqual)]);
    }

    #[test]
    fn malformed_json_is_fatal() {
        let err = validate("not valid json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));

        let err = validate("").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn non_object_is_fatal() {
        let cases = [
            ("[]", "an array"),
            ("null", "null"),
            ("42", "a number"),
            ("\"id\"", "a string"),
            ("true", "a boolean"),
        ];
        for (raw, name) in cases {
            match validate(raw) {
                Err(Error::NotAnObject(got)) => assert_eq!(got, name),
                other => panic!("{raw}: expected NotAnObject, got {other:?}"),
            }
        }
    }

    proptest! {
        #[test]
        fn temperature_in_range_passes(t in -50.0f64..=150.0) {
            prop_assert!(validate(&with("temperature", json!(t))).unwrap().ok);
        }

        #[test]
        fn temperature_out_of_range_fails(t in prop_oneof![-1e9f64..-50.0001, 150.0001f64..1e9]) {
            let result = validate(&with("temperature", json!(t))).unwrap();
            prop_assert!(!result.ok);
            prop_assert_eq!(result.errors.len(), 1);
            prop_assert_eq!(result.errors[0].loc[0].as_str(), "temperature");
        }

        #[test]
        fn validation_is_idempotent(
            temperature in -200.0f64..300.0,
            pressure in 500.0f64..1500.0,
            mode in "[A-Z]{0,7}",
            drop in prop::option::of(0usize..5),
        ) {
            let mut doc = valid();
            doc["temperature"] = json!(temperature);
            doc["pressure"] = json!(pressure);
            doc["mode"] = json!(mode);
            if let Some(i) = drop {
                doc.as_object_mut().unwrap().remove(SCHEMA[i].name);
            }
            let raw = doc.to_string();
            prop_assert_eq!(validate(&raw).unwrap(), validate(&raw).unwrap());
        }
    }
}
