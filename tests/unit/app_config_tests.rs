/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use dualsub::app_config::{Config, LogLevel};
use dualsub::DesyncMode;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.output_dir, ".");
    assert!(!config.extend);
    assert_eq!(config.extend_secs, 2);
    assert!(!config.progressive);
    assert_eq!(config.desync_mode, 1);
    assert_eq!(config.charset, "UTF-8");
    assert!(!config.translate);
    assert!(!config.merge_label);
    assert_eq!(config.ui_language, "en");
    assert_eq!(config.labels_file, None);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.desync_mode = 7;
    assert!(config.validate().is_err());
    config.desync_mode = 3;
    assert!(config.validate().is_ok());

    config.charset = "EBCDIC".to_string();
    assert!(config.validate().is_err());
    config.charset = "iso-8859-1".to_string();
    assert!(config.validate().is_ok());

    config.ui_language = "zz".to_string();
    assert!(config.validate().is_err());
    config.ui_language = "spa".to_string();
    assert!(config.validate().is_ok());

    config.output_dir = "  ".to_string();
    assert!(config.validate().is_err());
}

/// Test conversion to merger options
#[test]
fn test_merger_options_withExtension_shouldConvertSecondsToMillis() -> Result<()> {
    let config = Config {
        output_dir: "merged".to_string(),
        extend: true,
        extend_secs: 3,
        progressive: true,
        desync_mode: 2,
        ..Config::default()
    };

    let options = config.merger_options()?;

    assert_eq!(options.output_dir, "merged");
    assert!(options.extend);
    assert_eq!(options.extend_ms, 3_000);
    assert!(options.progressive);
    assert_eq!(options.desync_mode, DesyncMode::UseMaxTime);

    Ok(())
}

/// Extension seconds are ignored while extension is off
#[test]
fn test_merger_options_withoutExtension_shouldLeaveZero() -> Result<()> {
    let options = Config::default().merger_options()?;
    assert!(!options.extend);
    assert_eq!(options.extend_ms, 0);
    Ok(())
}

/// Test that a partial JSON file fills in defaults
#[test]
fn test_from_file_withPartialJson_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", r#"{"extend": true, "desync_mode": 0, "log_level": "debug"}"#)?;

    let config = Config::from_file(&path)?;

    assert!(config.extend);
    assert_eq!(config.desync_mode, 0);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.charset, "UTF-8");

    Ok(())
}

/// Test save and reload
#[test]
fn test_save_withDefaultConfig_shouldReloadEqual() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config { translate: true, ui_language: "de".to_string(), ..Config::default() };
    config.save(&path)?;

    assert_eq!(Config::from_file(&path)?, config);

    Ok(())
}

/// Test custom label file loading
#[test]
fn test_label_provider_withLabelsFile_shouldUseIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "labels.json", r#"{"translated": "vertaald"}"#)?;

    let config = Config { labels_file: Some(path.to_string_lossy().to_string()), ..Config::default() };
    let labels = config.label_provider()?;

    assert_eq!(labels.label("translated").as_deref(), Some("vertaald"));
    assert_eq!(labels.label("merged"), None);

    Ok(())
}

/// Test log level mapping
#[test]
fn test_log_level_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
