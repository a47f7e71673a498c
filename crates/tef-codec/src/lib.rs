//! Pure, stateless encode/decode for the TEF II Credibanco serial protocol.
//!
//! [`FrameCodec`] is the only entry point callers need: it turns a
//! [`PurchaseRequest`] or [`ReversalRequest`] into wire bytes, and turns a
//! complete candidate frame back into a [`TerminalResponse`]. Nothing in this
//! crate touches I/O — that is [`tef-transport`](../tef_transport/index.html)'s job.

pub mod constants;
mod error;
mod field;
mod frame;
mod request;
mod response;

pub use error::CodecError;
pub use field::ParsedField;
pub use frame::{encode_response_frame, parse_length_field, DecodedFrame, EncodedFrame};
pub use request::{PurchaseRequest, ReversalRequest};
pub use response::{decline_message, TerminalResponse};

/// Stateless encoder/decoder for the TEF II Credibanco frame format.
///
/// Every method takes `&self` only because it reads naturally as part of a
/// small API surface; it carries no state and is safe to share across tasks
/// behind a plain value (it is `Copy`).
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameCodec;

impl FrameCodec {
    /// Construct a codec. There is no configuration to provide.
    pub fn new() -> Self {
        Self
    }

    /// Validate and encode a purchase request into a complete frame.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidRequest`] if [`PurchaseRequest::validate`]
    /// rejects the request.
    pub fn encode_purchase(&self, request: &PurchaseRequest) -> Result<EncodedFrame, CodecError> {
        request.validate()?;
        let fields = frame::encode_purchase_fields(
            request.amount_cents,
            request.tax_cents,
            request.tip_cents,
            request.iac,
            &request.terminal_id,
            &request.transaction_id,
            &request.cashier_id,
        );
        Ok(frame::build_purchase_frame(&fields))
    }

    /// Validate and encode a reversal request into a complete frame.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidRequest`] if [`ReversalRequest::validate`]
    /// rejects the request.
    pub fn encode_reversal(&self, request: &ReversalRequest) -> Result<EncodedFrame, CodecError> {
        request.validate()?;
        let fields = frame::encode_reversal_fields(
            &request.receipt_number,
            &request.terminal_id,
            &request.transaction_id,
            &request.cashier_id,
        );
        Ok(frame::build_reversal_frame(&fields))
    }

    /// Decode a complete candidate frame (`STX..=LRC`) into a response.
    ///
    /// Reassembling a streaming byte buffer into discrete candidate frames is
    /// the transaction coordinator's responsibility; this method expects
    /// exactly one frame's worth of bytes.
    ///
    /// # Errors
    ///
    /// See [`frame::decode_frame`] for the conditions under which this
    /// returns [`CodecError::ShortFrame`], [`CodecError::MalformedFrame`], or
    /// [`CodecError::ChecksumMismatch`].
    pub fn decode(&self, raw: &[u8]) -> Result<TerminalResponse, CodecError> {
        let decoded = frame::decode_frame(raw)?;
        if decoded.truncated_fields {
            tracing::warn!("response frame had a malformed trailing TLV field; fields parsed up to that point were kept");
        }
        Ok(response::build_response(decoded.fields))
    }
}
