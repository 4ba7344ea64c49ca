//! The structural config schema, as a constraint table.
//!
//! Five required fields, checked in declaration order. The table is the
//! only place field names, kinds, and bounds are written down; the
//! validator folds over it and never special-cases a field.

/// One required field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// What a field must coerce to, and what it must satisfy once coerced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// A UUID in any of its textual forms.
    Uuid,

    /// A date-time string or a unix number.
    DateTime,

    /// A float within `ge..=le`.
    ///
    /// Bounds are integers so messages and context render them without a
    /// fractional part.
    Float { ge: i32, le: i32 },

    /// A string fully matching `pattern`, which is an alternation of
    /// `literals`.
    Pattern {
        pattern: &'static str,
        literals: &'static [&'static str],
    },
}

// Field names, in declaration order.
pub const ID: &str = "id";
pub const TIMESTAMP: &str = "timestamp";
pub const TEMPERATURE: &str = "temperature";
pub const PRESSURE: &str = "pressure";
pub const MODE: &str = "mode";

/// The schema. Immutable; errors are reported in this order.
pub const SCHEMA: &[Field] = &[
    Field {
        name: ID,
        kind: FieldKind::Uuid,
    },
    Field {
        name: TIMESTAMP,
        kind: FieldKind::DateTime,
    },
    Field {
        name: TEMPERATURE,
        kind: FieldKind::Float { ge: -50, le: 150 },
    },
    Field {
        name: PRESSURE,
        kind: FieldKind::Float { ge: 800, le: 1200 },
    },
    Field {
        name: MODE,
        kind: FieldKind::Pattern {
            pattern: "^(AUTO|MANUAL)$",
            literals: &["AUTO", "MANUAL"],
        },
    },
];
