use thiserror::Error;

/// Errors the coordinator can surface to a caller.
///
/// `Declined` is deliberately absent: a decline is a successful
/// [`TerminalResponse`](tef_codec::TerminalResponse) with `approved=false`,
/// not an error at this boundary.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// The request failed codec-level validation before anything was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No transaction can be sent because the transport isn't open.
    #[error("coordinator is not connected")]
    NotConnected,

    /// A transaction is already in flight; the caller must wait for it to
    /// complete before issuing another.
    #[error("coordinator is busy with another transaction")]
    Busy,

    /// The per-transaction deadline elapsed with no valid response.
    #[error("transaction timed out")]
    Timeout,

    /// The transport failed; the coordinator has closed itself as a result.
    #[error("transport error: {0}")]
    Transport(#[from] tef_transport::TransportError),

    /// The transport was closed while a transaction was pending.
    #[error("transport closed")]
    Closed,
}

impl From<tef_codec::CodecError> for CoordinatorError {
    fn from(err: tef_codec::CodecError) -> Self {
        CoordinatorError::InvalidRequest(err.to_string())
    }
}
