use crate::error::TransportError;

/// One item delivered to the transport's single consumer.
///
/// This is the Rust rendering of the abstract contract's `on_bytes(sink)` /
/// `on_error(sink)` pair: instead of two callback registrations, `open()`
/// returns one channel carrying this enum, so there is exactly one byte sink
/// and one error sink by construction.
#[derive(Debug)]
pub enum TransportEvent {
    /// A chunk of bytes arrived from the device. Order is preserved relative
    /// to other `Bytes` events; a single logical frame may arrive split
    /// across more than one event.
    Bytes(Vec<u8>),
    /// The transport failed; no further events follow except possibly `Closed`.
    Error(TransportError),
    /// The transport was closed, by `close()` or by the device disappearing.
    Closed,
}
