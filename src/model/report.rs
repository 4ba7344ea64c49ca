//! Report: what the gate says about a document.

use serde::Serialize;
use serde_json::{Map, Value};

use super::StructuralConfig;

/// The verdict for one input document.
///
/// `ok` is true exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub errors: Vec<ErrorDetail>,

    /// Typed form of a conforming document. Never written to stdout.
    #[serde(skip)]
    pub record: Option<StructuralConfig>,
}

impl ValidationResult {
    /// Build a verdict from collected violations.
    pub fn from_errors(errors: Vec<ErrorDetail>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
            record: None,
        }
    }

    /// A passing verdict carrying the coerced record.
    pub fn conforming(record: StructuralConfig) -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            record: Some(record),
        }
    }
}

/// A single field-level violation.
///
/// Key order on the wire is `type`, `loc`, `msg`, `input`, `ctx`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: ErrorKind,

    /// Path to the field, root-relative.
    pub loc: Vec<String>,

    pub msg: String,

    /// The offending value. For `missing`, the whole document.
    pub input: Value,

    /// Constraint context: bounds, pattern, or the underlying parse error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Map<String, Value>>,
}

impl ErrorDetail {
    pub fn new(kind: ErrorKind, field: &str, msg: impl Into<String>, input: Value) -> Self {
        Self {
            kind,
            loc: vec![field.to_string()],
            msg: msg.into(),
            input,
            ctx: None,
        }
    }

    /// Attach one context entry.
    #[must_use]
    pub fn with_ctx(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.ctx
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
        self
    }
}

/// Machine-readable error kind.
///
/// Type errors (`*_type`, `*_parsing`) are reported before constraint
/// errors; a field never carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required field absent.
    Missing,

    UuidType,
    UuidParsing,

    DatetimeType,
    DatetimeParsing,

    FloatType,
    FloatParsing,
    GreaterThanEqual,
    LessThanEqual,

    StringType,
    StringPatternMismatch,
}
