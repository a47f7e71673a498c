use thiserror::Error;

/// Errors a [`SerialTransport`](crate::SerialTransport) implementation can report.
#[derive(Debug, Error)]
pub enum TransportError {
    /// `open` was called on a transport that is already open.
    #[error("transport is already open")]
    AlreadyOpen,

    /// `write`/`close` were called before `open` succeeded.
    #[error("transport is not open")]
    NotOpen,

    /// No candidate device path could be opened.
    #[error("no serial device found (tried {tried:?})")]
    DeviceNotFound { tried: Vec<String> },

    /// The underlying OS/serial-library call failed.
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),
}
