//! Abstract serial byte transport: a real `tokio-serial` adapter and an
//! in-memory mock sharing one contract, [`SerialTransport`].

mod config;
mod error;
mod event;
mod mock;
mod real;
mod transport;

pub use config::{DataBits, Parity, SerialConfig, StopBits};
pub use error::TransportError;
pub use event::TransportEvent;
pub use mock::{MockTransport, MOCK_RESPONSE_DELAY};
pub use real::RealSerialTransport;
pub use transport::SerialTransport;
