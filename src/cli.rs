//! CLI interface for schemagate.
//!
//! One document in on stdin, one verdict line out on stdout. There are no
//! operational flags: `--help` and `--version` are all clap adds.
//!
//! A verdict is printed (and the process exits 0) whether or not the
//! document conforms. Only input that cannot be judged at all, such as
//! malformed JSON or a top-level array, aborts without a verdict.

use std::io::{Read, Write};

use clap::Parser;
use tracing::debug;

use crate::error::{Error, Result};
use crate::{output, validate};

/// Schemagate: check a structural config document against its schema.
#[derive(Debug, Parser)]
#[command(name = "schemagate", version, about, after_long_help = USAGE_HELP)]
pub struct Cli {}

const USAGE_HELP: &str = r#"Usage:
  schemagate < config.json
  echo '{"id": "...", "timestamp": "...", ...}' | schemagate

Schema (all fields required, unknown fields ignored):
  id           UUID
  timestamp    date-time (RFC 3339, naive ISO 8601, date, or unix number)
  temperature  number, -50 to 150 inclusive
  pressure     number, 800 to 1200 inclusive
  mode         "AUTO" or "MANUAL"

Output:
  {"ok": true, "errors": []}
  {"ok": false, "errors": [{"type": ..., "loc": [...], "msg": ..., "input": ...}]}

Exit status is 0 whenever a verdict is printed, 1 when the input cannot be
read or is not a JSON object.
Set RUST_LOG=debug for diagnostics on stderr."#;

/// Read a document from `input`, validate it, and write the verdict to `out`.
pub fn run(mut input: impl Read, out: impl Write) -> Result<()> {
    let mut raw = String::new();
    input.read_to_string(&mut raw).map_err(Error::Read)?;
    debug!(bytes = raw.len(), "read document");

    let result = validate::validate(&raw)?;
    debug!(
        ok = result.ok,
        errors = result.errors.len(),
        "validated document"
    );
    if let Some(normalized) = result
        .record
        .as_ref()
        .and_then(|record| serde_json::to_string(record).ok())
    {
        debug!(record = %normalized, "normalized record");
    }

    output::write_line(out, &result).map_err(Error::Write)
}
