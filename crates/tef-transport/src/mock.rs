use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::trace;

use crate::{config::SerialConfig, error::TransportError, event::TransportEvent, transport::SerialTransport};

/// Delay before the mock delivers its canned response, chosen to be long
/// enough to exercise the coordinator's `Awaiting` state without making
/// tests slow (see `DESIGN.md` Open Question 4).
pub const MOCK_RESPONSE_DELAY: Duration = Duration::from_millis(150);

/// In-memory transport for tests: ignores writes beyond tracing them, and
/// after [`MOCK_RESPONSE_DELAY`] emits a canned response frame back to the
/// caller's event channel.
///
/// The coordinator must take the exact same code path through this
/// transport as it does through [`RealSerialTransport`](crate::RealSerialTransport) —
/// this type exists so tests never have to special-case coordinator logic.
pub struct MockTransport {
    open: bool,
    canned_response: Vec<u8>,
    sender: Option<mpsc::UnboundedSender<TransportEvent>>,
    pending_reply: Option<tokio::task::JoinHandle<()>>,
}

impl MockTransport {
    /// Build a mock that replies with `canned_response` (a complete encoded
    /// frame) after every `write`.
    pub fn new(canned_response: Vec<u8>) -> Self {
        Self { open: false, canned_response, sender: None, pending_reply: None }
    }
}

#[async_trait]
impl SerialTransport for MockTransport {
    async fn open(
        &mut self,
        _config: &SerialConfig,
    ) -> Result<mpsc::UnboundedReceiver<TransportEvent>, TransportError> {
        if self.open {
            return Err(TransportError::AlreadyOpen);
        }
        self.open = true;
        let (tx, rx) = mpsc::unbounded_channel();
        self.sender = Some(tx);
        Ok(rx)
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let sender = self.sender.as_ref().ok_or(TransportError::NotOpen)?.clone();
        trace!(len = bytes.len(), "mock transport ignoring write payload, scheduling canned reply");

        if let Some(prior) = self.pending_reply.take() {
            prior.abort();
        }
        let response = self.canned_response.clone();
        self.pending_reply = Some(tokio::spawn(async move {
            tokio::time::sleep(MOCK_RESPONSE_DELAY).await;
            let _ = sender.send(TransportEvent::Bytes(response));
        }));
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if let Some(task) = self.pending_reply.take() {
            task.abort();
        }
        self.sender = None;
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_schedules_one_canned_reply() {
        let mut transport = MockTransport::new(vec![0x02, b'0', b'0', b'0', b'1', 0x03, 0x00]);
        let mut rx = transport.open(&SerialConfig::default()).await.unwrap();

        transport.write(b"anything").await.unwrap();
        let event = rx.recv().await.expect("reply arrives");
        match event {
            TransportEvent::Bytes(bytes) => assert_eq!(bytes[0], 0x02),
            other => panic!("expected Bytes event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn double_open_is_rejected() {
        let mut transport = MockTransport::new(vec![]);
        transport.open(&SerialConfig::default()).await.unwrap();
        assert!(matches!(transport.open(&SerialConfig::default()).await, Err(TransportError::AlreadyOpen)));
    }
}
