//! TLV field layout: `TYPE(2 ASCII digits) | LENGTH(4 ASCII hex digits) | VALUE(LENGTH bytes)`.

use serde::Serialize;

/// One decoded TLV field from a response frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedField {
    /// Two-ASCII-digit field number, e.g. `"48"`.
    pub field_type: String,
    /// Declared value length in bytes.
    pub length: u16,
    /// Raw value bytes, exactly `length` long.
    pub value: Vec<u8>,
}

impl ParsedField {
    /// The value as ASCII with trailing ASCII spaces trimmed.
    ///
    /// Values are right-padded with spaces on encode (§4.1), so trimming the
    /// trailing padding is the only transformation needed to recover the
    /// logical field value.
    pub fn ascii_trimmed(&self) -> String {
        String::from_utf8_lossy(&self.value).trim_end_matches(' ').to_string()
    }
}

/// Encode one TLV field: a separator byte, the 2-digit ASCII type, the
/// 4-digit ASCII-hex length, and the value right-padded with spaces to
/// exactly `width` bytes (truncated if longer).
pub fn encode_field(out: &mut Vec<u8>, field_type: &str, width: usize, value: &str) {
    debug_assert_eq!(field_type.len(), 2, "field type must be exactly 2 ASCII digits");
    out.push(crate::constants::SEPARATOR);
    out.extend_from_slice(field_type.as_bytes());
    out.extend_from_slice(format!("{width:04X}").as_bytes());

    let bytes = value.as_bytes();
    if bytes.len() >= width {
        out.extend_from_slice(&bytes[..width]);
    } else {
        out.extend_from_slice(bytes);
        out.resize(out.len() + (width - bytes.len()), b' ');
    }
}

/// Parse every TLV field found between `body` (the bytes strictly between the
/// presentation header and `ETX`) that follow a [`SEPARATOR`](crate::constants::SEPARATOR)
/// byte.
///
/// Malformed trailing TLVs (truncated type/length header, or a declared
/// length that runs past the end of `body`) terminate the scan without
/// discarding fields already parsed, per `spec.md` §4.1.
pub fn parse_fields(body: &[u8]) -> Vec<ParsedField> {
    let mut fields = Vec::new();
    let mut i = 0;
    while i < body.len() {
        if body[i] != crate::constants::SEPARATOR {
            // Bytes that aren't a separator here belong to the presentation
            // header prefix the caller hasn't skipped; callers always pass a
            // body that starts exactly at the first separator or is empty.
            break;
        }
        i += 1;

        if i + 6 > body.len() {
            break;
        }
        let Ok(field_type) = std::str::from_utf8(&body[i..i + 2]) else { break };
        let Ok(length_hex) = std::str::from_utf8(&body[i + 2..i + 6]) else { break };
        let Ok(length) = u16::from_str_radix(length_hex, 16) else { break };
        let value_start = i + 6;
        let value_end = value_start + length as usize;
        if value_end > body.len() {
            break;
        }

        fields.push(ParsedField {
            field_type: field_type.to_string(),
            length,
            value: body[value_start..value_end].to_vec(),
        });
        i = value_end;
    }
    fields
}

/// Parsing result for [`try_parse_fields`]: the fields recovered, plus
/// whether the scan stopped early due to a malformed TLV header.
pub struct FieldScan {
    pub fields: Vec<ParsedField>,
    pub truncated: bool,
}

/// Same as [`parse_fields`], but reports whether the scan stopped early so
/// callers can decide whether to log a warning.
pub fn try_parse_fields(body: &[u8]) -> FieldScan {
    let fields = parse_fields(body);
    let consumed: usize = fields.iter().map(|f| 1 + 2 + 4 + f.value.len()).sum();
    FieldScan { fields, truncated: consumed < body.len() }
}
