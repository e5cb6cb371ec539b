//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise default loading, dot-path updates, persistence,
//! reset and user agent resolution.

use pafari::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use pafari::services::user_agent::DEFAULT_USER_AGENT;
use pafari::types::errors::SettingsError;
use pafari::types::request::TextDirection;
use pafari::types::settings::BrowserSettings;
use serde_json::json;
use tempfile::TempDir;

/// The caller holds the `TempDir` so the file outlives the engine.
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    SettingsEngine::new(Some(dir.path().join("settings.json")))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let loaded = engine.load().unwrap();
    assert_eq!(loaded, BrowserSettings::default());
    assert_eq!(loaded.overview.favorites.len(), 4);
    assert_eq!(loaded.overview.favorites[0].title, "pearOS");
}

#[test]
fn test_set_value_persists_to_disk() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    engine.set_value("general.language", json!("fr_FR")).unwrap();
    engine.set_value("general.text_direction", json!("rtl")).unwrap();
    assert!(engine.get_config_path().exists());

    let mut reloaded = engine_in_temp(&dir);
    let settings = reloaded.load().unwrap();
    assert_eq!(settings.general.language, "fr_FR");
    assert_eq!(settings.general.text_direction, TextDirection::Rtl);
}

#[test]
fn test_set_value_replaces_favorites() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    engine
        .set_value(
            "overview.favorites",
            json!([{"url": "https://gnome.org", "title": "GNOME"}]),
        )
        .unwrap();
    let favorites = &engine.get_settings().overview.favorites;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].url, "https://gnome.org");
}

#[test]
fn test_unknown_and_empty_keys_are_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    assert!(matches!(
        engine.set_value("", json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("web.nonexistent", json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("nope.deeper", json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
}

#[test]
fn test_wrongly_typed_value_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let err = engine.set_value("general.language", json!(42)).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
    assert_eq!(engine.get_settings().general.language, "en");
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    engine.set_value("web.user_agent", json!("Custom/1.0")).unwrap();
    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &BrowserSettings::default());
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();

    let mut engine = engine_in_temp(&dir);
    assert!(matches!(engine.load(), Err(SettingsError::SerializationError(_))));
    assert_eq!(engine.load_or_default(), &BrowserSettings::default());
}

#[test]
fn test_user_agent_override() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    assert_eq!(engine.user_agent().as_str(), DEFAULT_USER_AGENT);

    engine.set_value("web.user_agent", json!("  Custom/1.0  ")).unwrap();
    assert_eq!(engine.user_agent().as_str(), "Custom/1.0");

    engine.set_value("web.user_agent", json!("   ")).unwrap();
    assert_eq!(engine.user_agent().as_str(), DEFAULT_USER_AGENT);
}
