//! Kiosk settings, loaded from `eclat.toml` with environment overrides.

use crate::error::{KioskError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "eclat.toml";
pub const CONFIG_PATH_ENV: &str = "ECLAT_CONFIG";
/// Checked in order; the first non-empty value wins.
pub const API_KEY_ENVS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    pub guide: GuideConfig,
    pub session: SessionConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Without a key every request is answered by the offline fallback.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Oldest turns are dropped first once the bound is reached.
    pub max_history_turns: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub fullscreen: bool,
    pub width: f32,
    pub height: f32,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-3-flash-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 20,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_history_turns: 200,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            fullscreen: false,
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl KioskConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| {
            KioskError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Where the configuration is read from: `$ECLAT_CONFIG`, else `eclat.toml`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// A missing file yields defaults. A malformed one is logged and replaced
    /// by defaults so the kiosk still starts.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no configuration file; using defaults");
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "configuration loaded");
                config
            }
            Err(err) => {
                tracing::error!(
                    path = %path.display(),
                    %err,
                    "invalid configuration; using defaults"
                );
                Self::default()
            }
        }
    }

    pub fn merge_with_env(&mut self) {
        self.merge_with(|name| std::env::var(name).ok());
    }

    /// Environment values take precedence over the file.
    pub fn merge_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let api_key = API_KEY_ENVS
            .iter()
            .filter_map(|name| lookup(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());
        if let Some(api_key) = api_key {
            self.guide.api_key = Some(api_key);
        }
        if let Some(model) = lookup("ECLAT_MODEL").filter(|value| !value.trim().is_empty()) {
            self.guide.model = model.trim().to_string();
        }
        if let Some(value) = lookup("ECLAT_FULLSCREEN") {
            self.window.fullscreen = value == "1" || value.eq_ignore_ascii_case("true");
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.guide
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_the_kiosk_profile() {
        let config = KioskConfig::default();
        assert_eq!(config.guide.model, "gemini-3-flash-preview");
        assert_eq!(config.guide.timeout_secs, 20);
        assert_eq!(config.session.max_history_turns, 200);
        assert!(!config.window.fullscreen);
        assert!(!config.has_api_key());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = KioskConfig::from_toml(
            r#"
            [guide]
            timeout_secs = 5

            [window]
            fullscreen = true
            "#,
        )
        .expect("partial config should parse");
        assert_eq!(config.guide.timeout_secs, 5);
        assert_eq!(config.guide.model, GuideConfig::default().model);
        assert!(config.window.fullscreen);
        assert_eq!(config.window.width, 1280.0);
        assert_eq!(config.session.max_history_turns, 200);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let err = KioskConfig::from_toml("[guide\nmodel = ")
            .expect_err("malformed config should fail");
        assert!(matches!(err, KioskError::Config(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = KioskConfig::load_or_default(Path::new("/nonexistent/eclat.toml"));
        assert_eq!(config.session.max_history_turns, 200);
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = KioskConfig::from_toml(
            r#"
            [guide]
            api_key = "from-file"
            "#,
        )
        .expect("config should parse");
        let env = HashMap::from([
            ("GEMINI_API_KEY", "  "),
            ("API_KEY", "from-env"),
            ("ECLAT_FULLSCREEN", "TRUE"),
        ]);
        config.merge_with(|name| env.get(name).map(|value| value.to_string()));

        assert_eq!(config.guide.api_key.as_deref(), Some("from-env"));
        assert!(config.window.fullscreen);
    }

    #[test]
    fn gemini_key_takes_precedence() {
        let mut config = KioskConfig::default();
        let env = HashMap::from([("GEMINI_API_KEY", "primary"), ("API_KEY", "secondary")]);
        config.merge_with(|name| env.get(name).map(|value| value.to_string()));
        assert_eq!(config.guide.api_key.as_deref(), Some("primary"));
        assert!(config.has_api_key());
    }
}
