//! Record: the typed form of a document that passed the gate.

use jiff::{Timestamp, civil};
use serde::Serialize;
use uuid::Uuid;

/// A structural config document after coercion.
///
/// Only ever built from a document with zero violations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralConfig {
    pub id: Uuid,
    pub timestamp: DateTimeValue,
    pub temperature: f64,
    pub pressure: f64,
    pub mode: Mode,
}

/// A date-time as it was written: with an offset, or without one.
///
/// Naive values are kept naive rather than assumed UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DateTimeValue {
    /// Offset given (or a unix number): a fixed instant.
    Aware(Timestamp),

    /// No offset: wall-clock date and time.
    Naive(civil::DateTime),
}

/// Operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Auto,
    Manual,
}

impl Mode {
    /// Exact, case-sensitive match against the literal names.
    pub fn from_literal(s: &str) -> Option<Self> {
        match s {
            "AUTO" => Some(Self::Auto),
            "MANUAL" => Some(Self::Manual),
            _ => None,
        }
    }
}
