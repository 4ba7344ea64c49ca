//! Output: one line of JSON per verdict.
//!
//! Separators (`", "`, `": "`), escaping (every non-ASCII character as
//! `\uXXXX`) and float formatting (`repr` form) follow Python's
//! `json.dumps` defaults. Object keys keep document order
//! (`serde_json/preserve_order`).
//!
//! Echoed input goes through `serde_json::Value`, so integers beyond the
//! `i64`/`u64` range and `-0` are floats by the time they are written:
//! `100000000000000000000` echoes as `1e+20`, `-0` as `-0.0`.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

use crate::model::ValidationResult;

/// Write `result` followed by a newline, then flush.
pub fn write_line(mut writer: impl Write, result: &ValidationResult) -> io::Result<()> {
    let mut ser = Serializer::with_formatter(&mut writer, DumpsFormatter);
    result.serialize(&mut ser)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// `serde_json` formatter matching `json.dumps` defaults.
struct DumpsFormatter;

impl Formatter for DumpsFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(float_repr(value).as_bytes())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if c.is_ascii() {
                continue;
            }
            writer.write_all(&bytes[start..i])?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + c.len_utf8();
        }
        writer.write_all(&bytes[start..])
    }
}

/// Shortest round-trip float text, Python style.
///
/// Positional between 1e-4 and 1e16, always with a fractional part;
/// scientific outside that, with a signed, two-digit exponent.
fn float_repr(value: f64) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{value:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };

    if (-4..16).contains(&exp) {
        let plain = value.to_string();
        if plain.contains('.') {
            plain
        } else {
            plain + ".0"
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    }
}
