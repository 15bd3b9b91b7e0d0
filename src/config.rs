//! SDK configuration.
//!
//! ```toml
//! logging = "debug"                                # trace | debug | errors
//! expected_host_origin = "https://meet.example"    # optional
//! ```
//!
//! Environment overrides (applied by [`SdkConfig::with_env_overrides`]):
//! - `ADDONS_SDK_LOG`: log level
//! - `ADDONS_SDK_HOST_ORIGIN`: expected host origin (empty unsets it)

use crate::error::SdkError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

pub const ENV_LOG: &str = "ADDONS_SDK_LOG";
pub const ENV_HOST_ORIGIN: &str = "ADDONS_SDK_HOST_ORIGIN";

/// How chatty the SDK's diagnostics are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every event, including each dropped message and why.
    Trace,
    /// Handshakes and outbound messages.
    Debug,
    /// Error reports only.
    #[default]
    Errors,
}

impl LogLevel {
    /// Most verbose level emitted; the default directive of `init_tracing`.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Errors => LevelFilter::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "errors" | "error" => Ok(LogLevel::Errors),
            other => Err(SdkError::Config(format!("unknown log level: {other}"))),
        }
    }
}

/// Settings read once at addon startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    pub logging: LogLevel,

    /// When set, events are only accepted from this origin before the first handshake.
    /// When unset, any origin may deliver the first handshake and becomes trusted.
    pub expected_host_origin: Option<String>,
}

impl SdkConfig {
    /// Apply `ADDONS_SDK_LOG` and `ADDONS_SDK_HOST_ORIGIN` on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(level) = env::var(ENV_LOG) {
            self.logging = level.parse()?;
        }
        if let Ok(origin) = env::var(ENV_HOST_ORIGIN) {
            let origin = origin.trim();
            self.expected_host_origin = (!origin.is_empty()).then(|| origin.to_string());
        }
        Ok(self)
    }
}

#[cfg(feature = "config")]
impl SdkConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| SdkError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }
}

/// Install a global `tracing` subscriber writing to stderr at the configured level.
///
/// `RUST_LOG`, when set, takes precedence over `config.logging`. Fails if a global subscriber
/// is already installed.
#[cfg(feature = "config")]
pub fn init_tracing(config: &SdkConfig) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::builder()
        .with_default_directive(config.logging.level_filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| SdkError::Config(e.to_string()))
}
