//! Log subscriber setup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human oriented
    Pretty,
    /// Single-line text
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Lowercase name, as accepted in settings.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "log.format".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Logging settings.
///
/// `level` is an `EnvFilter` directive, so `"info"` as well as
/// `"mika=trace,warn"` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    pub with_targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            with_targets: true,
        }
    }
}

impl LogConfig {
    /// Defaults: `info`, compact, with targets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter directive.
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Includes event targets in the output.
    pub fn with_targets(mut self, enabled: bool) -> Self {
        self.with_targets = enabled;
        self
    }

    /// Parsed filter directive.
    pub fn filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.level).map_err(|_| ConfigError::InvalidValue {
            key: "log.level".to_string(),
            value: self.level.clone(),
        })
    }

    /// Installs the global subscriber.
    ///
    /// Fails if the filter does not parse or a global subscriber is
    /// already set.
    ///
    /// ```no_run
    /// use mika::{LogConfig, LogFormat};
    ///
    /// LogConfig::new().level("debug").format(LogFormat::Json).init().unwrap();
    /// tracing::info!("ready");
    /// ```
    pub fn init(&self) -> Result<(), ConfigError> {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.filter()?)
            .with_target(self.with_targets);

        let installed = match self.format {
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Compact => builder.compact().try_init(),
            LogFormat::Json => builder.json().try_init(),
        };

        installed.map_err(|e| ConfigError::Logging(e.to_string()))
    }
}
