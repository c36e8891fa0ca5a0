/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use cmx_edl::app_config::{Config, LogLevel};
use cmx_edl::Framerate;
use serde_json::json;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.framerate().unwrap(), Framerate::Fps24);
    assert_eq!(config.extension, "edl");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.framerate = json!(29.97);
    assert!(config.validate().is_ok());

    config.framerate = json!("29.970001");
    assert!(config.validate().is_err());

    config.framerate = json!(["24"]);
    assert!(config.validate().is_err());

    config.framerate = json!(25);
    config.extension = ".EDL".to_string();
    assert!(config.validate().is_ok());

    config.extension = "".to_string();
    assert!(config.validate().is_err());

    config.extension = "edl/x".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "edl.json", r#"{ "framerate": 50 }"#)?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.framerate()?, Framerate::Fps50);
    assert_eq!(config.extension, "edl");
    assert_eq!(config.log_level, LogLevel::Info);

    Ok(())
}

#[test]
fn test_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "edl.json", "{ not json")?;
    assert!(Config::from_file(&path).is_err());
    Ok(())
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("edl.json");

    let config = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(config.extension, "edl");

    let reloaded = Config::from_file(&path)?;
    assert_eq!(reloaded.framerate, config.framerate);
    assert_eq!(reloaded.log_level, config.log_level);

    Ok(())
}

#[test]
fn test_save_thenLoad_shouldKeepValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("custom.json");

    let config = Config {
        framerate: json!("59.94"),
        extension: "cmx".to_string(),
        log_level: LogLevel::Debug,
    };
    config.save(&path)?;

    let loaded = Config::load_or_create(&path)?;
    assert_eq!(loaded.framerate()?, Framerate::Fps59_94);
    assert_eq!(loaded.extension, "cmx");
    assert_eq!(loaded.log_level, LogLevel::Debug);

    Ok(())
}

#[test]
fn test_logLevel_shouldMapToFilter() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);

    let level: LogLevel = serde_json::from_value(json!("warn")).unwrap();
    assert_eq!(level, LogLevel::Warn);
}
