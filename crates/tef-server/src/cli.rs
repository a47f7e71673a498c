use clap::Parser;

/// TEF II Credibanco terminal bridge.
#[derive(Debug, Parser)]
#[command(name = "tef-server", version, about)]
pub struct Args {
    /// Path to a TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// HTTP listen port. Overrides `http.port` from config.
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Serial device path. Overrides `serial.port` from config.
    #[arg(long = "serial-port", value_name = "DEVICE")]
    pub serial_port: Option<String>,

    /// Force the in-memory mock transport regardless of config.
    #[arg(long)]
    pub mock: bool,

    /// Emit structured JSON logs instead of compact human-readable ones.
    #[arg(long = "log-json")]
    pub log_json: bool,
}

impl Args {
    /// Apply CLI overrides on top of file/environment-loaded settings, per
    /// the precedence order `defaults < file < env < CLI`.
    pub fn apply_overrides(&self, mut settings: crate::config::Settings) -> crate::config::Settings {
        if let Some(port) = self.port {
            settings.http.port = port;
        }
        if let Some(serial_port) = &self.serial_port {
            settings.serial.port = serial_port.clone();
        }
        if self.mock {
            settings.tef.mock_mode = true;
        }
        settings
    }
}
