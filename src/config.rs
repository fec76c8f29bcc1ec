//! Application settings.
//!
//! Settings come from three layers, later ones winning: built-in
//! defaults, an optional JSON document, and environment variables named
//! `{PREFIX}_{KEY}` (the conventional prefix is `MIKA`).

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::{LogConfig, LogFormat};
use crate::route::RouteNaming;

/// Prefix used by [`Settings::from_env`].
pub const ENV_PREFIX: &str = "MIKA";

/// Runtime settings of an [`Application`](crate::Application).
///
/// # Examples
///
/// ```rust
/// use mika::{LogFormat, Settings};
///
/// let settings = Settings::from_json_str(
///     r#"{ "routing": { "default_segment": "index" }, "log": { "format": "json" } }"#,
/// ).unwrap();
///
/// assert_eq!(settings.routing.default_segment, "index");
/// assert_eq!(settings.routing.action_suffix, "Action");
/// assert_eq!(settings.log.format, LogFormat::Json);
/// assert!(!settings.trace_actions);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub routing: RouteNaming,
    pub log: LogConfig,
    /// Registers a [`TracingObserver`](crate::TracingObserver) on every
    /// request
    pub trace_actions: bool,
}

impl Settings {
    /// Parses settings; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON settings file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Defaults overridden by `MIKA_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides(ENV_PREFIX)
    }

    /// Applies `{prefix}_DEFAULT_SEGMENT`, `_ACTION_SUFFIX`,
    /// `_CONTROLLER_SUFFIX`, `_LOG_LEVEL`, `_LOG_FORMAT` and
    /// `_TRACE_ACTIONS` when set.
    pub fn with_env_overrides(mut self, prefix: &str) -> Result<Self, ConfigError> {
        let var = |key: &str| env::var(format!("{}_{}", prefix, key)).ok();

        if let Some(value) = var("DEFAULT_SEGMENT") {
            self.routing.default_segment = non_empty(prefix, "DEFAULT_SEGMENT", value)?;
        }
        if let Some(value) = var("ACTION_SUFFIX") {
            self.routing.action_suffix = value;
        }
        if let Some(value) = var("CONTROLLER_SUFFIX") {
            self.routing.controller_suffix = value;
        }
        if let Some(value) = var("LOG_LEVEL") {
            self.log.level = non_empty(prefix, "LOG_LEVEL", value)?;
        }
        if let Some(value) = var("LOG_FORMAT") {
            self.log.format = value.parse::<LogFormat>().map_err(|_| ConfigError::InvalidValue {
                key: format!("{}_LOG_FORMAT", prefix),
                value,
            })?;
        }
        if let Some(value) = var("TRACE_ACTIONS") {
            self.trace_actions = parse_flag(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: format!("{}_TRACE_ACTIONS", prefix),
                value: value.clone(),
            })?;
        }

        Ok(self)
    }
}

fn non_empty(prefix: &str, key: &str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: format!("{}_{}", prefix, key),
            value,
        });
    }
    Ok(value)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_json_type_errors() {
        assert!(Settings::from_json_str("{}").is_ok());
        assert!(matches!(
            Settings::from_json_str("{ \"trace_actions\": \"yes\" }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
