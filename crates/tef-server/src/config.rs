use serde::Deserialize;

use tef_transport::{DataBits, Parity, SerialConfig, StopBits};

/// Process configuration, mirroring `spec.md` §6's configuration table.
///
/// Layered, in increasing precedence: built-in [`Default`] values, an
/// optional TOML file, environment variables prefixed `TEF_` (double
/// underscore as the nested-key separator, e.g. `TEF_SERIAL__PORT`), then
/// CLI flags applied on top by [`crate::cli::Args::apply_overrides`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub http: HttpSettings,
    pub serial: SerialSettings,
    pub tef: TefSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub port: u16,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SerialSettings {
    pub port: String,
    pub baud: u32,
    pub data_bits: u8,
    pub stop_bits: u8,
    pub parity: String,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self { port: "COM3".to_string(), baud: 9600, data_bits: 8, stop_bits: 1, parity: "none".to_string() }
    }
}

impl SerialSettings {
    /// Translate the loosely-typed configuration values into
    /// `tef-transport`'s strongly-typed [`SerialConfig`].
    ///
    /// # Errors
    ///
    /// Returns a descriptive string if `data_bits`, `stop_bits`, or `parity`
    /// hold a value outside what the serial line actually supports.
    pub fn to_serial_config(&self) -> Result<SerialConfig, String> {
        let data_bits = match self.data_bits {
            5 => DataBits::Five,
            6 => DataBits::Six,
            7 => DataBits::Seven,
            8 => DataBits::Eight,
            other => return Err(format!("unsupported serial.data_bits: {other}")),
        };
        let stop_bits = match self.stop_bits {
            1 => StopBits::One,
            2 => StopBits::Two,
            other => return Err(format!("unsupported serial.stop_bits: {other}")),
        };
        let parity = match self.parity.to_ascii_lowercase().as_str() {
            "none" => Parity::None,
            "odd" => Parity::Odd,
            "even" => Parity::Even,
            other => return Err(format!("unsupported serial.parity: {other}")),
        };
        Ok(SerialConfig { port_path: self.port.clone(), baud: self.baud, data_bits, stop_bits, parity })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TefSettings {
    pub timeout_ms: u64,
    pub mock_mode: bool,
}

impl Default for TefSettings {
    fn default() -> Self {
        Self { timeout_ms: 60_000, mock_mode: false }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self { http: HttpSettings::default(), serial: SerialSettings::default(), tef: TefSettings::default() }
    }
}

impl Settings {
    /// Load settings from the default chain: built-in defaults, then
    /// `config_path` if it exists, then `TEF_`-prefixed environment
    /// variables. CLI overrides are applied separately by the caller.
    pub fn load(config_path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        let path = config_path.unwrap_or("tef-server.toml");
        if std::path::Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("TEF").separator("__").try_parsing(true),
        );

        // Every field carries `#[serde(default)]`, so any key absent from
        // both the file and the environment falls back to `Settings::default()`.
        builder.build()?.try_deserialize()
    }
}
