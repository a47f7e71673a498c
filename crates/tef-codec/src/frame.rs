//! Frame layout: `STX | LENGTH(2) | TRANSPORT_HEADER(10) | PRESENTATION_HEADER(7)
//! [ | SEP | FIELD ]* | ETX | LRC(1)`.

use crate::{
    constants::{ETX, SEPARATOR, STX, TRANSPORT_HEADER},
    error::CodecError,
    field::{encode_field, try_parse_fields, ParsedField},
};

/// Bytes ready for the wire. Always begins with `STX` and ends with the LRC
/// byte; the declared `LENGTH` equals the byte count from immediately after
/// `LENGTH` through and including `ETX` (`spec.md` §3 invariant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame(Vec<u8>);

impl EncodedFrame {
    /// Borrow the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the frame, returning the owned bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for EncodedFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Build a complete frame from a presentation header and already-encoded
/// field bytes (each field already includes its leading separator).
///
/// This is the one place `LENGTH` and `LRC` are computed, in the order
/// `spec.md` §4.1 mandates: compute `LENGTH` over `header + fields + ETX`
/// first, append `ETX`, then compute `LRC` over `LENGTH || body || ETX`.
fn build_frame(presentation_header: &[u8; 7], field_bytes: &[u8]) -> EncodedFrame {
    let body_len = TRANSPORT_HEADER.len() + presentation_header.len() + field_bytes.len() + 1; // + ETX
    let length_field = format!("{body_len:04}");
    debug_assert_eq!(length_field.len(), 4, "frame body exceeds 4-digit decimal length field");

    let mut frame = Vec::with_capacity(1 + 4 + body_len + 1);
    frame.push(STX);
    frame.extend_from_slice(length_field.as_bytes());
    frame.extend_from_slice(TRANSPORT_HEADER);
    frame.extend_from_slice(presentation_header);
    frame.extend_from_slice(field_bytes);
    frame.push(ETX);

    let lrc = frame[1..].iter().fold(0u8, |acc, &b| acc ^ b);
    frame.push(lrc);

    EncodedFrame(frame)
}

/// Encode the eight purchase fields (40, 41, 42, 53, 81, 82, 83, 84) in the
/// fixed order `spec.md` §4.1 specifies.
pub(crate) fn encode_purchase_fields(
    amount_cents: u64,
    tax_cents: u64,
    tip_cents: u64,
    iac: u64,
    terminal_id: &str,
    transaction_id: &str,
    cashier_id: &str,
) -> Vec<u8> {
    let mut out = Vec::new();
    encode_field(&mut out, "40", 12, &format!("{amount_cents:012}"));
    encode_field(&mut out, "41", 12, &format!("{tax_cents:012}"));
    encode_field(&mut out, "42", 10, terminal_id);
    encode_field(&mut out, "53", 10, transaction_id);
    encode_field(&mut out, "81", 12, &format!("{tip_cents:012}"));
    encode_field(&mut out, "82", 12, &format!("{iac:012}"));
    encode_field(&mut out, "83", 12, cashier_id);
    encode_field(&mut out, "84", 12, crate::constants::FILLER_VALUE);
    out
}

/// Encode the reversal field set this crate resolves per `DESIGN.md` Open
/// Question 2: receipt number (76), terminal id (42), transaction id (53),
/// cashier id (83).
pub(crate) fn encode_reversal_fields(
    receipt_number: &str,
    terminal_id: &str,
    transaction_id: &str,
    cashier_id: &str,
) -> Vec<u8> {
    let mut out = Vec::new();
    encode_field(&mut out, "76", 6, receipt_number);
    encode_field(&mut out, "42", 10, terminal_id);
    encode_field(&mut out, "53", 10, transaction_id);
    encode_field(&mut out, "83", 12, cashier_id);
    out
}

pub(crate) fn build_purchase_frame(field_bytes: &[u8]) -> EncodedFrame {
    build_frame(crate::constants::PURCHASE_HEADER, field_bytes)
}

pub(crate) fn build_reversal_frame(field_bytes: &[u8]) -> EncodedFrame {
    build_frame(crate::constants::REVERSAL_HEADER, field_bytes)
}

/// Build an arbitrary response-shaped frame from `(field_type, width, value)`
/// triples. Used to construct canned terminal responses — the mock
/// transport's reply and test fixtures alike — without duplicating the TLV
/// encoding rules at each call site.
pub fn encode_response_frame(presentation_header: &[u8; 7], fields: &[(&str, usize, &str)]) -> EncodedFrame {
    let mut bytes = Vec::new();
    for (field_type, width, value) in fields {
        encode_field(&mut bytes, field_type, *width, value);
    }
    build_frame(presentation_header, &bytes)
}

/// Result of validating and slicing a candidate frame out of a byte buffer.
pub struct DecodedFrame {
    pub fields: Vec<ParsedField>,
    /// `true` if the TLV scan stopped early due to a malformed trailing
    /// field; the frame is still considered valid (LRC checked out) and the
    /// fields parsed so far are kept, per `spec.md` §4.1's failure table.
    pub truncated_fields: bool,
}

/// Decode a complete candidate frame: verify `STX`/`ETX` presence, verify the
/// LRC, then scan the body for TLV fields.
///
/// `raw` must be exactly one candidate frame (`STX..=LRC`); reassembling such
/// a slice out of a streaming buffer is the transaction coordinator's job,
/// not this function's.
///
/// # Errors
///
/// - [`CodecError::ShortFrame`] if `raw` is under 5 bytes.
/// - [`CodecError::MalformedFrame`] if `STX`/`ETX` are missing.
/// - [`CodecError::ChecksumMismatch`] if the computed LRC disagrees with the
///   trailing byte.
pub fn decode_frame(raw: &[u8]) -> Result<DecodedFrame, CodecError> {
    if raw.len() < 5 {
        return Err(CodecError::ShortFrame { len: raw.len() });
    }
    if raw[0] != STX {
        return Err(CodecError::MalformedFrame("missing STX at start of frame".into()));
    }
    let lrc_pos = raw.len() - 1;
    let etx_pos = lrc_pos - 1;
    if raw[etx_pos] != ETX {
        return Err(CodecError::MalformedFrame("missing ETX before trailing LRC byte".into()));
    }

    let expected_lrc = raw[1..=etx_pos].iter().fold(0u8, |acc, &b| acc ^ b);
    let received_lrc = raw[lrc_pos];
    if expected_lrc != received_lrc {
        return Err(CodecError::ChecksumMismatch { expected: expected_lrc, received: received_lrc });
    }

    // Body starts after STX + 4-byte LENGTH + 10-byte transport header +
    // 7-byte presentation header, and runs up to (not including) ETX.
    let header_end = 1 + 4 + TRANSPORT_HEADER.len() + 7;
    let body = if header_end <= etx_pos { &raw[header_end..etx_pos] } else { &[][..] };

    // Fields begin at the first SEPARATOR; anything before it in `body`
    // (there should be nothing once headers are skipped) is not a field.
    let fields_start = body.iter().position(|&b| b == SEPARATOR).unwrap_or(body.len());
    let scan = try_parse_fields(&body[fields_start..]);

    Ok(DecodedFrame { fields: scan.fields, truncated_fields: scan.truncated })
}

/// Parse the 4-ASCII-digit-decimal `LENGTH` field starting at `raw[1..5]`.
///
/// Returns `None` if `raw` is too short or the bytes aren't ASCII decimal
/// digits — callers treat that the same as any other malformed frame.
pub fn parse_length_field(raw: &[u8]) -> Option<u16> {
    let bytes = raw.get(1..5)?;
    let text = std::str::from_utf8(bytes).ok()?;
    text.parse().ok()
}
