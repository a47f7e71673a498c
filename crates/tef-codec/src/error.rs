use thiserror::Error;

/// Errors produced while encoding a request or decoding a response frame.
///
/// `CodecError` is pure and carries no I/O state; it only ever describes a
/// malformed request or a malformed byte sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The request failed validation before it could be encoded (e.g. a zero
    /// amount, or a missing/oversized identifier).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response was too short to possibly contain a valid frame.
    #[error("frame too short: {len} bytes")]
    ShortFrame {
        /// Number of bytes actually received.
        len: usize,
    },

    /// The response was missing `STX` or `ETX` where the layout requires them.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// The computed LRC did not match the byte received in the frame's last position.
    #[error("checksum mismatch: expected {expected:#04X}, received {received:#04X}")]
    ChecksumMismatch {
        /// LRC computed over the frame's `LENGTH..=ETX` range.
        expected: u8,
        /// LRC byte actually present in the frame.
        received: u8,
    },
}
