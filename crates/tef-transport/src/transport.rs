use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::{config::SerialConfig, error::TransportError, event::TransportEvent};

/// Abstract byte-level I/O over a serial line.
///
/// A transport starts `Closed`. `open` transitions it to `Open` and returns
/// the receiving half of its single event channel; `write` enqueues bytes
/// for transmission; `close` releases the device and ends the event stream
/// with [`TransportEvent::Closed`].
///
/// Implementations: [`RealSerialTransport`](crate::RealSerialTransport) for
/// production hardware, [`MockTransport`](crate::MockTransport) for tests.
/// The coordinator's code path through either must be identical — it only
/// ever talks to this trait.
#[async_trait]
pub trait SerialTransport: Send {
    /// Acquire the device described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::AlreadyOpen`] if called twice without an
    /// intervening `close`, or [`TransportError::DeviceNotFound`] /
    /// [`TransportError::Io`] if the device cannot be acquired.
    async fn open(&mut self, config: &SerialConfig) -> Result<mpsc::UnboundedReceiver<TransportEvent>, TransportError>;

    /// Enqueue `bytes` for transmission. Returns once the write has been
    /// handed to the underlying I/O; delivery is not guaranteed synchronously
    /// and byte order is always preserved.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::NotOpen`] if the transport isn't open.
    async fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Release the device. Safe to call on an already-closed transport.
    async fn close(&mut self) -> Result<(), TransportError>;

    /// `true` once `open` has succeeded and before `close` completes.
    fn is_open(&self) -> bool;
}
