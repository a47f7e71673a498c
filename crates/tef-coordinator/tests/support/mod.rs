//! A fully test-controlled [`SerialTransport`] used to drive the
//! coordinator's reassembly, ACK, busy, and timeout behavior directly,
//! since the real device and the canned-delay mock in `tef-transport`
//! don't give tests control over exact byte chunking and timing.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use tef_transport::{SerialConfig, SerialTransport, TransportError, TransportEvent};

#[derive(Clone)]
pub struct TestTransport {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    open: bool,
    sender: Option<mpsc::UnboundedSender<TransportEvent>>,
    writes: Vec<Vec<u8>>,
}

impl TestTransport {
    pub fn new() -> Self {
        Self { inner: Arc::new(Mutex::new(Inner { open: false, sender: None, writes: Vec::new() })) }
    }

    /// Push bytes to the coordinator as if they arrived from the device.
    pub async fn deliver(&self, bytes: Vec<u8>) {
        let inner = self.inner.lock().await;
        if let Some(sender) = &inner.sender {
            let _ = sender.send(TransportEvent::Bytes(bytes));
        }
    }

    /// Push an arbitrary transport event (error/closed) to the coordinator.
    pub async fn deliver_event(&self, event: TransportEvent) {
        let inner = self.inner.lock().await;
        if let Some(sender) = &inner.sender {
            let _ = sender.send(event);
        }
    }

    /// All byte sequences written by the coordinator so far, in order.
    pub async fn writes(&self) -> Vec<Vec<u8>> {
        self.inner.lock().await.writes.clone()
    }
}

#[async_trait]
impl SerialTransport for TestTransport {
    async fn open(
        &mut self,
        _config: &SerialConfig,
    ) -> Result<mpsc::UnboundedReceiver<TransportEvent>, TransportError> {
        let mut inner = self.inner.lock().await;
        if inner.open {
            return Err(TransportError::AlreadyOpen);
        }
        inner.open = true;
        let (tx, rx) = mpsc::unbounded_channel();
        inner.sender = Some(tx);
        Ok(rx)
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().await;
        if !inner.open {
            return Err(TransportError::NotOpen);
        }
        inner.writes.push(bytes.to_vec());
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().await;
        inner.open = false;
        inner.sender = None;
        Ok(())
    }

    fn is_open(&self) -> bool {
        // The trait requires a synchronous check; the lock is never held
        // across an await point in this harness, so try_lock never contends.
        self.inner.try_lock().map(|inner| inner.open).unwrap_or(false)
    }
}
