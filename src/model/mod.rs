//! Data model for schemagate.
//!
//! Two halves: the report written to stdout for every document, and the
//! typed record a conforming document coerces into.

mod record;
mod report;

pub use record::{DateTimeValue, Mode, StructuralConfig};
pub use report::{ErrorDetail, ErrorKind, ValidationResult};
