use clap::Parser;
use tracing::info;

use tef_coordinator::TransactionCoordinator;
use tef_server::{cli, config, http, logging};
use tef_transport::{MockTransport, RealSerialTransport, SerialTransport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Args::parse();
    logging::init(args.log_json);

    let settings = config::Settings::load(args.config.as_deref())?;
    let settings = args.apply_overrides(settings);

    let serial_config = settings.serial.to_serial_config().map_err(|e| format!("invalid configuration: {e}"))?;

    let transport: Box<dyn SerialTransport> = if settings.tef.mock_mode {
        info!("mock transport mode enabled");
        Box::new(MockTransport::new(mock_approved_purchase_frame()))
    } else {
        Box::new(RealSerialTransport::new())
    };

    let coordinator = TransactionCoordinator::spawn(transport, serial_config.clone());
    coordinator.connect(serial_config.port_path.clone()).await?;

    let app = http::router(coordinator, std::time::Duration::from_millis(settings.tef.timeout_ms));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", settings.http.port)).await?;
    info!(port = settings.http.port, "tef-server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Canned response the mock transport replays: an approved purchase with a
/// fixed authorization code, built with the same TLV layout production
/// frames use.
fn mock_approved_purchase_frame() -> Vec<u8> {
    tef_codec::encode_response_frame(
        tef_codec::constants::PURCHASE_HEADER,
        &[("48", 2, "00"), ("01", 6, "MOCK01"), ("40", 12, "000000010000")],
    )
    .into_bytes()
}
