use tokio::sync::oneshot;

use tef_codec::TerminalResponse;

use crate::error::CoordinatorError;

/// The single in-flight transaction slot. Mirrors the shape of an in-flight
/// request/response pairing: a completion sender consumed exactly once,
/// either by a decoded frame, a timeout, or a transport failure.
pub(crate) struct PendingTransaction {
    reply: oneshot::Sender<Result<TerminalResponse, CoordinatorError>>,
}

impl PendingTransaction {
    pub(crate) fn new(reply: oneshot::Sender<Result<TerminalResponse, CoordinatorError>>) -> Self {
        Self { reply }
    }

    /// Consume the pending transaction, delivering its outcome to the
    /// waiting caller. The send result is ignored: a dropped receiver means
    /// the caller already gave up (e.g. its own future was cancelled).
    pub(crate) fn fulfill(self, outcome: Result<TerminalResponse, CoordinatorError>) {
        let _ = self.reply.send(outcome);
    }
}
