mod common;

use mika::{ConfigError, LogFormat, RouteNaming, Settings};
use serial_test::serial;
use std::env;
use std::io::Write;

const KEYS: [&str; 6] = [
    "DEFAULT_SEGMENT",
    "ACTION_SUFFIX",
    "CONTROLLER_SUFFIX",
    "LOG_LEVEL",
    "LOG_FORMAT",
    "TRACE_ACTIONS",
];

fn clear(prefix: &str) {
    for key in KEYS {
        env::remove_var(format!("{}_{}", prefix, key));
    }
}

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.routing, RouteNaming::default());
    assert_eq!(settings.log.level, "info");
    assert_eq!(settings.log.format, LogFormat::Compact);
    assert!(!settings.trace_actions);
}

#[test]
fn test_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "routing": {{ "action_suffix": "Do" }}, "log": {{ "level": "debug", "format": "pretty" }}, "trace_actions": true }}"#
    )
    .unwrap();

    let settings = Settings::from_json_file(file.path()).unwrap();
    assert_eq!(settings.routing.action_suffix, "Do");
    assert_eq!(settings.routing.default_segment, "default");
    assert_eq!(settings.log.level, "debug");
    assert_eq!(settings.log.format, LogFormat::Pretty);
    assert!(settings.trace_actions);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let error = Settings::from_json_file(&path).unwrap_err();
    assert!(matches!(error, ConfigError::Io { .. }));
    assert!(error.to_string().contains("absent.json"));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(Settings::from_json_str("{"), Err(ConfigError::Parse(_))));
    assert!(matches!(
        Settings::from_json_str(r#"{ "log": { "format": "xml" } }"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
#[serial]
fn test_env_overrides() {
    clear("MIKA");
    env::set_var("MIKA_DEFAULT_SEGMENT", "index");
    env::set_var("MIKA_CONTROLLER_SUFFIX", "Handler");
    env::set_var("MIKA_LOG_FORMAT", "json");
    env::set_var("MIKA_TRACE_ACTIONS", "yes");

    let settings = Settings::from_env().unwrap();
    clear("MIKA");

    assert_eq!(settings.routing.default_segment, "index");
    assert_eq!(settings.routing.controller_suffix, "Handler");
    assert_eq!(settings.routing.action_suffix, "Action");
    assert_eq!(settings.log.format, LogFormat::Json);
    assert!(settings.trace_actions);
}

#[test]
#[serial]
fn test_env_overrides_win_over_json() {
    clear("MIKA_TEST");
    env::set_var("MIKA_TEST_LOG_LEVEL", "trace");

    let settings = Settings::from_json_str(r#"{ "log": { "level": "warn" } }"#)
        .unwrap()
        .with_env_overrides("MIKA_TEST")
        .unwrap();
    clear("MIKA_TEST");

    assert_eq!(settings.log.level, "trace");
}

#[test]
#[serial]
fn test_invalid_env_values() {
    clear("MIKA");

    env::set_var("MIKA_TRACE_ACTIONS", "sometimes");
    let error = Settings::from_env().unwrap_err();
    assert!(matches!(
        &error,
        ConfigError::InvalidValue { key, value } if key == "MIKA_TRACE_ACTIONS" && value == "sometimes"
    ));
    clear("MIKA");

    env::set_var("MIKA_LOG_FORMAT", "xml");
    assert!(matches!(Settings::from_env(), Err(ConfigError::InvalidValue { .. })));
    clear("MIKA");

    env::set_var("MIKA_DEFAULT_SEGMENT", "  ");
    assert!(matches!(Settings::from_env(), Err(ConfigError::InvalidValue { .. })));
    clear("MIKA");
}

#[test]
#[serial]
fn test_settings_drive_routing() {
    use common::*;
    use mika::{Application, Request};
    use std::sync::Arc;

    clear("MIKA");
    env::set_var("MIKA_DEFAULT_SEGMENT", "bar");
    let settings = Settings::from_env().unwrap();
    clear("MIKA");

    let app = Application::new(Arc::new(registry()), Arc::new(catalog()), Arc::new(routes()))
        .with_settings(settings);
    let error = app.handle(Request::get("/foo")).unwrap_err();
    // `/foo` now means `/foo/bar/bar`, and the Foo BarController has no barAction.
    assert_eq!(
        error.to_string(),
        format!("Method {}::barAction() does not exist", FOO_BAR_CONTROLLER)
    );
}
