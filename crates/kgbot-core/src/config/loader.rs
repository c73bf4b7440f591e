//! Config loader — reads `~/.kgbot/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.kgbot/config.json`
//! 3. Environment variables `KGBOT_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `KGBOT_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `KGBOT_KNOWLEDGE__ENABLE` → `knowledge.enable`
/// - `KGBOT_KNOWLEDGE__PROVIDER` → `knowledge.provider`
/// - `KGBOT_KNOWLEDGE__ID` / `KGBOT_KNOWLEDGE__KEY` → credentials
/// - `KGBOT_KNOWLEDGE__MODEL` → `knowledge.model`
/// - `KGBOT_KNOWLEDGE__ROBOT_NAME` → `knowledge.robot_name`
/// - `KGBOT_KNOWLEDGE__API_BASE` → `knowledge.api_base`
/// - `KGBOT_TRANSCRIPTION__API_KEY` / `KGBOT_TRANSCRIPTION__API_URL`
fn apply_env_overrides(mut config: Config) -> Config {
    let knowledge = &mut config.knowledge;
    if let Ok(val) = std::env::var("KGBOT_KNOWLEDGE__ENABLE") {
        knowledge.enable = val == "true" || val == "1";
    }
    if let Ok(val) = std::env::var("KGBOT_KNOWLEDGE__PROVIDER") {
        knowledge.provider = val;
    }
    if let Ok(val) = std::env::var("KGBOT_KNOWLEDGE__ID") {
        knowledge.id = val;
    }
    if let Ok(val) = std::env::var("KGBOT_KNOWLEDGE__KEY") {
        knowledge.key = val;
    }
    if let Ok(val) = std::env::var("KGBOT_KNOWLEDGE__MODEL") {
        knowledge.model = val;
    }
    if let Ok(val) = std::env::var("KGBOT_KNOWLEDGE__ROBOT_NAME") {
        knowledge.robot_name = val;
    }
    if let Ok(val) = std::env::var("KGBOT_KNOWLEDGE__API_BASE") {
        knowledge.api_base = Some(val);
    }

    if let Ok(val) = std::env::var("KGBOT_TRANSCRIPTION__API_KEY") {
        config.transcription.api_key = val;
    }
    if let Ok(val) = std::env::var("KGBOT_TRANSCRIPTION__API_URL") {
        config.transcription.api_url = val;
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        assert_eq!(config.knowledge.robot_name, "Vector");
        assert_eq!(config.transcription.model, "whisper-1");
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(r#"{
            "knowledge": {
                "enable": true,
                "provider": "houndify",
                "id": "client-id",
                "key": "client-key"
            }
        }"#);

        let config = load_config_from_path(file.path());
        assert!(config.knowledge.enable);
        assert_eq!(config.knowledge.provider, "houndify");
        assert!(config.knowledge.has_credentials());
        // Default preserved
        assert_eq!(config.knowledge.robot_name, "Vector");
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert!(!config.knowledge.enable);
    }

    #[test]
    fn test_load_wrong_types_returns_defaults() {
        let file = write_temp_json(r#"{ "knowledge": { "enable": "yes please" } }"#);
        let config = load_config_from_path(file.path());
        assert!(!config.knowledge.enable);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.knowledge.provider = "openai".to_string();
        config.knowledge.key = "sk-test".to_string();

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path);
        assert_eq!(reloaded.knowledge.provider, "openai");
        assert_eq!(reloaded.knowledge.key, "sk-test");
    }

    #[test]
    fn test_unrecognized_keys_are_ignored() {
        let file = write_temp_json(r#"{
            "knowledge": { "enable": true, "botName": "Cozmo" },
            "channels": {}
        }"#);
        let config = load_config_from_path(file.path());
        assert!(config.knowledge.enable);
        assert_eq!(config.knowledge.robot_name, "Vector");
    }

    #[test]
    fn test_robot_name_from_file() {
        let file = write_temp_json(r#"{ "knowledge": { "robotName": "Cozmo" } }"#);
        let config = load_config_from_path(file.path());
        assert_eq!(config.knowledge.robot_name, "Cozmo");
    }

    #[test]
    fn test_env_override_model() {
        std::env::set_var("KGBOT_KNOWLEDGE__MODEL", "test-model");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.knowledge.model, "test-model");
        std::env::remove_var("KGBOT_KNOWLEDGE__MODEL");
    }

    #[test]
    fn test_env_override_transcription_key() {
        std::env::set_var("KGBOT_TRANSCRIPTION__API_KEY", "sk-env-key");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.transcription.api_key, "sk-env-key");
        std::env::remove_var("KGBOT_TRANSCRIPTION__API_KEY");
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        save_config(&Config::default(), Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(raw["knowledge"].get("robotName").is_some());
        assert!(raw["knowledge"].get("robot_name").is_none());
        assert!(raw["transcription"].get("apiUrl").is_some());
    }
}
