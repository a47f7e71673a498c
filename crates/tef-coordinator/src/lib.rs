//! Serializes purchase/reversal transactions over a [`SerialTransport`](tef_transport::SerialTransport):
//! reassembly, ACKs, timeouts, and the at-most-one-in-flight rule, all
//! enforced structurally by a single actor task rather than a mutex.

mod actor;
mod command;
mod error;
mod pending;
mod status;

mod coordinator;

pub use coordinator::{TransactionCoordinator, DEFAULT_TIMEOUT};
pub use error::CoordinatorError;
pub use status::Status;
