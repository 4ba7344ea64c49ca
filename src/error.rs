//! Fatal errors: input the gate cannot judge at all.
//!
//! Schema violations are not errors here. They are part of a normal
//! [`ValidationResult`](crate::model::ValidationResult).

use std::io;

/// Errors that end the process without printing a result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read standard input: {0}")]
    Read(#[source] io::Error),

    #[error("input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("failed to write result: {0}")]
    Write(#[source] io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
