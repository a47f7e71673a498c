use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{info, warn};

use tef_codec::{constants, FrameCodec, TerminalResponse};
use tef_transport::{SerialConfig, SerialTransport, TransportEvent};

use crate::command::Command;
use crate::error::CoordinatorError;
use crate::pending::PendingTransaction;
use crate::status::Status;

/// Far enough out that the timeout branch never fires while idle, without
/// the `Option`-wrapped-future plumbing a real "no deadline" would need.
fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(365 * 24 * 3600)
}

/// Owns the transport and the single pending-transaction slot, and runs the
/// reassembly algorithm. Reachable only through [`TransactionCoordinator`](crate::TransactionCoordinator),
/// which is the `Clone`-able handle callers actually hold.
///
/// The inbound event receiver is deliberately kept as a local in [`run`]
/// rather than a struct field: it lets the `tokio::select!` loop borrow it
/// independently of `self`, so handling a command (which needs `&mut self`
/// as a whole) never conflicts with polling it.
pub(crate) struct CoordinatorActor {
    transport: Box<dyn SerialTransport>,
    base_config: SerialConfig,
    current_config: Option<SerialConfig>,
    buffer: Vec<u8>,
    pending: Option<PendingTransaction>,
    codec: FrameCodec,
}

impl CoordinatorActor {
    pub(crate) fn new(transport: Box<dyn SerialTransport>, base_config: SerialConfig) -> Self {
        Self {
            transport,
            base_config,
            current_config: None,
            buffer: Vec::new(),
            pending: None,
            codec: FrameCodec::new(),
        }
    }

    pub(crate) async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        let mut events: Option<mpsc::UnboundedReceiver<TransportEvent>> = None;
        let sleep = tokio::time::sleep_until(far_future());
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                command = commands.recv() => {
                    match command {
                        Some(command) => self.handle_command(command, &mut events, sleep.as_mut()).await,
                        None => break,
                    }
                }
                event = Self::next_event(&mut events) => {
                    self.handle_event(event, &mut events, sleep.as_mut()).await;
                }
                () = &mut sleep, if self.pending.is_some() => {
                    warn!("transaction deadline elapsed with no valid response");
                    self.complete_pending(Err(CoordinatorError::Timeout));
                    sleep.as_mut().reset(far_future());
                }
            }
        }
    }

    async fn next_event(events: &mut Option<mpsc::UnboundedReceiver<TransportEvent>>) -> Option<TransportEvent> {
        match events {
            Some(rx) => rx.recv().await,
            None => futures::future::pending().await,
        }
    }

    async fn handle_command(
        &mut self,
        command: Command,
        events: &mut Option<mpsc::UnboundedReceiver<TransportEvent>>,
        sleep: std::pin::Pin<&mut tokio::time::Sleep>,
    ) {
        match command {
            Command::Connect { port_path, reply } => self.handle_connect(port_path, events, reply).await,
            Command::Disconnect { reply } => self.handle_disconnect(events, reply).await,
            Command::Send { frame, timeout, reply } => self.handle_send(frame, timeout, reply, sleep).await,
            Command::Status { reply } => {
                let _ = reply.send(Status {
                    connected: self.transport.is_open(),
                    port: self.current_config.as_ref().map(|c| c.port_path.clone()),
                    baud: self.current_config.as_ref().map(|c| c.baud),
                });
            }
        }
    }

    async fn handle_connect(
        &mut self,
        port_path: String,
        events: &mut Option<mpsc::UnboundedReceiver<TransportEvent>>,
        reply: oneshot::Sender<Result<(), CoordinatorError>>,
    ) {
        let config = SerialConfig { port_path, ..self.base_config.clone() };
        match self.transport.open(&config).await {
            Ok(rx) => {
                info!(port = %config.port_path, baud = config.baud, "connected");
                *events = Some(rx);
                self.current_config = Some(config);
                let _ = reply.send(Ok(()));
            }
            Err(err) => {
                let _ = reply.send(Err(CoordinatorError::Transport(err)));
            }
        }
    }

    async fn handle_disconnect(
        &mut self,
        events: &mut Option<mpsc::UnboundedReceiver<TransportEvent>>,
        reply: oneshot::Sender<()>,
    ) {
        let _ = self.transport.close().await;
        *events = None;
        self.current_config = None;
        if let Some(pending) = self.pending.take() {
            pending.fulfill(Err(CoordinatorError::Closed));
        }
        self.buffer.clear();
        let _ = reply.send(());
    }

    async fn handle_send(
        &mut self,
        frame: Vec<u8>,
        timeout: Duration,
        reply: oneshot::Sender<Result<TerminalResponse, CoordinatorError>>,
        mut sleep: std::pin::Pin<&mut tokio::time::Sleep>,
    ) {
        if !self.transport.is_open() {
            let _ = reply.send(Err(CoordinatorError::NotConnected));
            return;
        }
        if self.pending.is_some() {
            let _ = reply.send(Err(CoordinatorError::Busy));
            return;
        }

        match self.transport.write(&frame).await {
            Ok(()) => {
                self.pending = Some(PendingTransaction::new(reply));
                sleep.as_mut().reset(Instant::now() + timeout);
            }
            Err(err) => {
                let _ = self.transport.close().await;
                self.current_config = None;
                let _ = reply.send(Err(CoordinatorError::Transport(err)));
            }
        }
    }

    async fn handle_event(
        &mut self,
        event: Option<TransportEvent>,
        events: &mut Option<mpsc::UnboundedReceiver<TransportEvent>>,
        sleep: std::pin::Pin<&mut tokio::time::Sleep>,
    ) {
        match event {
            Some(TransportEvent::Bytes(bytes)) => {
                self.buffer.extend_from_slice(&bytes);
                self.drain_buffer(sleep).await;
            }
            Some(TransportEvent::Error(err)) => {
                warn!(error = %err, "transport reported an error; closing");
                self.fail_and_close(events, CoordinatorError::Transport(err)).await;
            }
            Some(TransportEvent::Closed) | None => {
                self.fail_and_close(events, CoordinatorError::Closed).await;
            }
        }
    }

    async fn fail_and_close(
        &mut self,
        events: &mut Option<mpsc::UnboundedReceiver<TransportEvent>>,
        err: CoordinatorError,
    ) {
        if let Some(pending) = self.pending.take() {
            pending.fulfill(Err(err));
        }
        let _ = self.transport.close().await;
        *events = None;
        self.current_config = None;
        self.buffer.clear();
    }

    /// Implements the reassembly algorithm: drop a lone ACK byte, discard
    /// leading garbage before `STX`, wait for a complete `STX..=LRC` run,
    /// decode it, ACK it, deliver it, and repeat while bytes remain.
    async fn drain_buffer(&mut self, mut sleep: std::pin::Pin<&mut tokio::time::Sleep>) {
        loop {
            if self.buffer.len() == 1 && self.buffer[0] == constants::ACK {
                self.buffer.clear();
                return;
            }

            let Some(stx_pos) = self.buffer.iter().position(|&b| b == constants::STX) else {
                self.buffer.clear();
                return;
            };
            if stx_pos > 0 {
                self.buffer.drain(0..stx_pos);
            }

            let Some(etx_pos) = self.buffer.iter().position(|&b| b == constants::ETX) else {
                return;
            };
            let frame_end = etx_pos + 2; // + LRC byte
            if self.buffer.len() < frame_end {
                return;
            }

            let candidate: Vec<u8> = self.buffer.drain(0..frame_end).collect();
            match self.codec.decode(&candidate) {
                Ok(response) => {
                    let _ = self.transport.write(&[constants::ACK]).await;
                    self.complete_pending(Ok(response));
                    sleep.as_mut().reset(far_future());
                }
                Err(err) => {
                    warn!(error = %err, "dropping invalid candidate frame");
                }
            }

            if self.buffer.is_empty() {
                return;
            }
        }
    }

    fn complete_pending(&mut self, outcome: Result<TerminalResponse, CoordinatorError>) {
        if let Some(pending) = self.pending.take() {
            pending.fulfill(outcome);
        }
    }
}
