use std::time::Duration;

use tokio::sync::oneshot;

use tef_codec::TerminalResponse;

use crate::error::CoordinatorError;
use crate::status::Status;

/// Messages the actor task consumes. One variant per coordinator-facing
/// operation; `Send` covers both purchase and reversal since by the time a
/// request reaches this channel it has already been validated and encoded.
pub(crate) enum Command {
    Connect { port_path: String, reply: oneshot::Sender<Result<(), CoordinatorError>> },
    Disconnect { reply: oneshot::Sender<()> },
    Send {
        frame: Vec<u8>,
        timeout: Duration,
        reply: oneshot::Sender<Result<TerminalResponse, CoordinatorError>>,
    },
    Status { reply: oneshot::Sender<Status> },
}
