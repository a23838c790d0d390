//! Integration tests for configuration loading and validation

#![allow(clippy::expect_used, clippy::unwrap_used)]

use tagwire::config::{CodecConfig, LimitsConfig, LoggingConfig};
use tagwire::{decode_with_config, CodecError, Encoder};
use tracing::Level;

#[test]
fn test_default_config_validates() {
    let config = CodecConfig::default();
    let errors = config.validate();
    assert!(
        errors.is_empty(),
        "Default config should be valid, but got errors: {:?}",
        errors
    );
    assert!(config.validate_strict().is_ok());
}

#[test]
fn test_zero_message_size() {
    let mut config = CodecConfig::default();
    config.limits.max_message_size = 0;

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("Max message size cannot be 0")));
}

#[test]
fn test_zero_field_count() {
    let mut config = CodecConfig::default();
    config.limits.max_field_count = 0;

    let errors = config.validate();
    assert!(errors
        .iter()
        .any(|e| e.contains("Max field count must be greater than 0")));
}

#[test]
fn test_field_count_larger_than_message_size() {
    let config = CodecConfig::default_with_overrides(|c| {
        c.limits.max_message_size = 1024;
        c.limits.max_field_count = 4096;
    });
    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("exceeds max message size")));
}

#[test]
fn test_empty_app_name() {
    let mut config = CodecConfig::default();
    config.logging.app_name = String::new();
    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("cannot be empty")));
}

#[test]
fn test_validate_strict_collects_all_errors() {
    let config = CodecConfig {
        limits: LimitsConfig {
            max_message_size: 0,
            max_field_count: 0,
        },
        logging: LoggingConfig {
            app_name: String::new(),
            ..LoggingConfig::default()
        },
    };
    match config.validate_strict() {
        Err(CodecError::ConfigError(msg)) => {
            assert!(msg.contains("Max message size"));
            assert!(msg.contains("Max field count"));
            assert!(msg.contains("Application name"));
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_toml_log_level_parsing() {
    let config = CodecConfig::from_toml(
        r#"
        [logging]
        app_name = "wire-tap"
        log_level = "debug"
        json_format = true
        "#,
    )
    .unwrap();
    assert_eq!(config.logging.log_level, Level::DEBUG);
    assert!(config.logging.json_format);
    assert_eq!(config.limits, LimitsConfig::default());
}

#[test]
fn test_toml_invalid_log_level() {
    let err = CodecConfig::from_toml(
        r#"
        [logging]
        app_name = "wire-tap"
        log_level = "loud"
        json_format = false
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, CodecError::ConfigError(_)));
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tagwire.toml");

    let config = CodecConfig::default_with_overrides(|c| {
        c.limits.max_message_size = 2048;
        c.logging.log_level = Level::WARN;
    });
    config.save_to_file(&path).unwrap();

    let loaded = CodecConfig::from_file(&path).unwrap();
    assert_eq!(loaded.limits.max_message_size, 2048);
    assert_eq!(loaded.logging.log_level, Level::WARN);
}

#[test]
fn test_missing_file() {
    let err = CodecConfig::from_file("/definitely/not/here/tagwire.toml").unwrap_err();
    assert!(matches!(err, CodecError::ConfigError(_)));
}

#[test]
fn test_limits_drive_decoder() {
    let config = CodecConfig::default_with_overrides(|c| {
        c.limits.max_field_count = 2;
    });

    let mut enc = Encoder::new();
    for n in 1..=3 {
        enc.encode_varint_field(n, u64::from(n)).unwrap();
    }
    let err = decode_with_config(enc.finish(), &config.limits).unwrap_err();
    assert!(matches!(err, CodecError::TooManyFields { limit: 2 }));
}
