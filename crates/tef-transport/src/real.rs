use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    config::SerialConfig,
    error::TransportError,
    event::TransportEvent,
    transport::SerialTransport,
};

/// Conventional POSIX tty paths tried, in order, when `port_path` is the
/// literal placeholder `"COM3"` and the host isn't Windows.
const POSIX_FALLBACK_CANDIDATES: &[&str] =
    &["/dev/ttyUSB0", "/dev/ttyUSB1", "/dev/ttyACM0", "/dev/ttyACM1"];

/// Production transport backed by `tokio-serial`.
///
/// Chosen over a raw `serialport` + blocking-thread wrapper because it
/// composes directly with `tokio::io::{AsyncRead, AsyncWrite}`, the same
/// split the rest of this workspace's I/O already uses.
#[derive(Debug, Default)]
pub struct RealSerialTransport {
    write_half: Option<WriteHalf<tokio_serial::SerialStream>>,
    reader_task: Option<tokio::task::JoinHandle<()>>,
}

impl RealSerialTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `config.port_path` to a concrete device path, applying the
    /// `"COM3"` POSIX fallback rule when applicable.
    fn resolve_path(config: &SerialConfig) -> Result<String, TransportError> {
        if config.port_path != "COM3" || cfg!(windows) {
            return Ok(config.port_path.clone());
        }

        let mut tried: Vec<String> = Vec::new();
        for candidate in POSIX_FALLBACK_CANDIDATES {
            tried.push((*candidate).to_string());
            if std::path::Path::new(candidate).exists() {
                return Ok((*candidate).to_string());
            }
        }

        if let Ok(ports) = tokio_serial::available_ports() {
            for port in ports {
                if port.port_name.contains("USB") || port.port_name.contains("ACM") {
                    tried.push(port.port_name.clone());
                    return Ok(port.port_name);
                }
                tried.push(port.port_name);
            }
        }

        Err(TransportError::DeviceNotFound { tried })
    }
}

#[async_trait]
impl SerialTransport for RealSerialTransport {
    async fn open(
        &mut self,
        config: &SerialConfig,
    ) -> Result<mpsc::UnboundedReceiver<TransportEvent>, TransportError> {
        if self.write_half.is_some() {
            return Err(TransportError::AlreadyOpen);
        }

        let path = Self::resolve_path(config)?;
        info!(device = %path, baud = config.baud, "opening serial device");

        let builder = tokio_serial::new(path.clone(), config.baud)
            .data_bits(config.data_bits.into())
            .stop_bits(config.stop_bits.into())
            .parity(config.parity.into());
        let stream = tokio_serial::SerialStream::open(&builder)?;
        let (mut read_half, write_half): (ReadHalf<_>, WriteHalf<_>) = tokio::io::split(stream);

        let (tx, rx) = mpsc::unbounded_channel();
        let reader_tx = tx.clone();
        let reader_task = tokio::spawn(async move {
            let mut buf = [0u8; 512];
            loop {
                match read_half.read(&mut buf).await {
                    Ok(0) => {
                        let _ = reader_tx.send(TransportEvent::Closed);
                        break;
                    }
                    Ok(n) => {
                        debug!(bytes = n, "received from serial device");
                        if reader_tx.send(TransportEvent::Bytes(buf[..n].to_vec())).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "serial read failed");
                        let _ = reader_tx.send(TransportEvent::Error(TransportError::Io(err)));
                        let _ = reader_tx.send(TransportEvent::Closed);
                        break;
                    }
                }
            }
        });

        self.write_half = Some(write_half);
        self.reader_task = Some(reader_task);
        Ok(rx)
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let stream = self.write_half.as_mut().ok_or(TransportError::NotOpen)?;
        stream.write_all(bytes).await?;
        stream.flush().await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if let Some(task) = self.reader_task.take() {
            task.abort();
        }
        self.write_half = None;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.write_half.is_some()
    }
}
