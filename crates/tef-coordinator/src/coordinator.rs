use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use tef_codec::{FrameCodec, PurchaseRequest, ReversalRequest, TerminalResponse};
use tef_transport::{SerialConfig, SerialTransport};

use crate::actor::CoordinatorActor;
use crate::command::Command;
use crate::error::CoordinatorError;
use crate::status::Status;

/// Default per-transaction timeout (`tef.timeout_ms` default of 60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// Caller-facing handle to a running coordinator actor.
///
/// Cheap to clone: every clone shares the same underlying actor task and
/// the same transport, so operations issued from different clones are
/// still serialized through that task's `tokio::select!` loop.
#[derive(Clone)]
pub struct TransactionCoordinator {
    commands: mpsc::Sender<Command>,
    codec: FrameCodec,
}

impl TransactionCoordinator {
    /// Spawn the actor task owning `transport`, and return a handle to it.
    ///
    /// `base_config` supplies the line parameters (baud, data/stop bits,
    /// parity) used on every `connect`; only `port_path` varies per call.
    pub fn spawn(transport: Box<dyn SerialTransport>, base_config: SerialConfig) -> Self {
        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let actor = CoordinatorActor::new(transport, base_config);
        tokio::spawn(actor.run(rx));
        Self { commands: tx, codec: FrameCodec::new() }
    }

    /// Open the serial device at `port_path`.
    pub async fn connect(&self, port_path: impl Into<String>) -> Result<(), CoordinatorError> {
        let (reply, recv) = oneshot::channel();
        self.commands
            .send(Command::Connect { port_path: port_path.into(), reply })
            .await
            .map_err(|_| CoordinatorError::Closed)?;
        recv.await.map_err(|_| CoordinatorError::Closed)?
    }

    /// Close the serial device. Any pending transaction completes with
    /// [`CoordinatorError::Closed`].
    pub async fn disconnect(&self) {
        let (reply, recv) = oneshot::channel();
        if self.commands.send(Command::Disconnect { reply }).await.is_ok() {
            let _ = recv.await;
        }
    }

    /// Encode and send a purchase request, awaiting the terminal's response.
    ///
    /// A decline is returned as `Ok` with `approved=false`; only protocol
    /// and transport failures are `Err`.
    pub async fn send_purchase(
        &self,
        request: PurchaseRequest,
        timeout: Option<Duration>,
    ) -> Result<TerminalResponse, CoordinatorError> {
        let frame = self.codec.encode_purchase(&request)?;
        self.send_frame(frame.into_bytes(), timeout.unwrap_or(DEFAULT_TIMEOUT)).await
    }

    /// Encode and send a reversal request, awaiting the terminal's response.
    pub async fn send_reversal(
        &self,
        request: ReversalRequest,
        timeout: Option<Duration>,
    ) -> Result<TerminalResponse, CoordinatorError> {
        let frame = self.codec.encode_reversal(&request)?;
        self.send_frame(frame.into_bytes(), timeout.unwrap_or(DEFAULT_TIMEOUT)).await
    }

    async fn send_frame(&self, frame: Vec<u8>, timeout: Duration) -> Result<TerminalResponse, CoordinatorError> {
        let (reply, recv) = oneshot::channel();
        self.commands
            .send(Command::Send { frame, timeout, reply })
            .await
            .map_err(|_| CoordinatorError::Closed)?;
        recv.await.map_err(|_| CoordinatorError::Closed)?
    }

    /// Current connection status.
    pub async fn status(&self) -> Status {
        let (reply, recv) = oneshot::channel();
        if self.commands.send(Command::Status { reply }).await.is_err() {
            return Status { connected: false, port: None, baud: None };
        }
        recv.await.unwrap_or(Status { connected: false, port: None, baud: None })
    }
}
