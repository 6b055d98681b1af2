//! # Go-Compatible Compact JSON
//!
//! Validation messages embed some rejected values as JSON, and those
//! messages must read byte for byte like the ones produced by Go's
//! `encoding/json`. That encoder escapes `&`, `<`, `>`, U+2028 and U+2029
//! inside strings; `serde_json` does not. [`to_go_json`] is compact
//! `serde_json` output with those escapes added.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

/// Compact output; only string fragments differ from the default.
struct GoEscapeFormatter;

impl Formatter for GoEscapeFormatter {
    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            let escaped = match c {
                '&' => "\\u0026",
                '<' => "\\u003c",
                '>' => "\\u003e",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(&fragment.as_bytes()[start..i])?;
            writer.write_all(escaped.as_bytes())?;
            start = i + c.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Compact JSON with Go's HTML-safe string escaping.
///
/// # Errors
///
/// Propagates serialization failures from the value's `Serialize` impl.
pub fn to_go_json(value: &impl Serialize) -> Result<String, serde_json::Error> {
    let mut out = Vec::new();
    value.serialize(&mut Serializer::with_formatter(&mut out, GoEscapeFormatter))?;
    // Only whole UTF-8 fragments and ASCII escapes are written.
    String::from_utf8(out).map_err(|e| serde::ser::Error::custom(e.to_string()))
}
