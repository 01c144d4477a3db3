//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,

    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Serial port configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SerialConfig {
    /// Gateway device path; empty means try the default candidates
    pub port: String,

    pub baud_rate: u32,

    /// Upper bound on a single blocking read
    pub read_timeout_ms: u64,
}

/// Frame hand-off configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ParserConfig {
    /// Capacity of the reader-to-consumer frame channel
    pub channel_capacity: usize,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    /// Default tracing filter when RUST_LOG is not set
    pub level: String,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: 57_600,
            read_timeout_ms: 2_000,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            parser: ParserConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, TOML parsing fails, or
    /// validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional path, falling back to defaults when absent
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.serial.baud_rate == 0 {
            return Err(crate::error::Esp3BridgeError::Config(
                toml::de::Error::custom("baud_rate must be greater than 0"),
            ));
        }

        if self.serial.read_timeout_ms == 0 || self.serial.read_timeout_ms > 10_000 {
            return Err(crate::error::Esp3BridgeError::Config(
                toml::de::Error::custom("read_timeout_ms must be between 1 and 10000"),
            ));
        }

        if self.parser.channel_capacity == 0 || self.parser.channel_capacity > 1_024 {
            return Err(crate::error::Esp3BridgeError::Config(
                toml::de::Error::custom("channel_capacity must be between 1 and 1024"),
            ));
        }

        if self.log.level.is_empty() {
            return Err(crate::error::Esp3BridgeError::Config(
                toml::de::Error::custom("log level cannot be empty"),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.serial.baud_rate, 57_600);
        assert_eq!(config.serial.read_timeout_ms, 2_000);
        assert!(config.serial.port.is_empty());
        assert_eq!(config.parser.channel_capacity, 32);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_load_full_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[serial]
port = "/dev/ttyUSB1"
baud_rate = 57600
read_timeout_ms = 1000

[parser]
channel_capacity = 64

[log]
level = "debug"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.serial.port, "/dev/ttyUSB1");
        assert_eq!(config.serial.read_timeout_ms, 1000);
        assert_eq!(config.parser.channel_capacity, 64);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[serial]
port = "/dev/ttyACM3"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.serial.port, "/dev/ttyACM3");
        assert_eq!(config.serial.baud_rate, 57_600);
        assert_eq!(config.parser.channel_capacity, 32);
    }

    #[test]
    fn test_invalid_read_timeout_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[serial]
read_timeout_ms = 0
"#
        )
        .unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_invalid_channel_capacity_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[parser]
channel_capacity = 0
"#
        )
        .unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config.serial.baud_rate, 57_600);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(Config::load("/nonexistent/esp3-bridge.toml").is_err());
    }
}
