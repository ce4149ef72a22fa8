use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const EXTERNAL_DEFAULT_BASE_URL: &str = "https://chat.aistocktickers.com";
const LOCAL_DEFAULT_BASE_URL: &str = "http://localhost:5000";
const PLACEHOLDER_HOST: &str = "your-api-domain.com";
const CONFIG_FILE_PATH: &str = "widget.toml";
const DEFAULT_USER_ID: &str = "123";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Which chat backend the widget talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Hosted StockChat API.
    #[default]
    External,
    /// Demo backend running next to the dashboard.
    Local,
}

impl BackendKind {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::External => EXTERNAL_DEFAULT_BASE_URL,
            Self::Local => LOCAL_DEFAULT_BASE_URL,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "external" | "remote" => Some(Self::External),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default)]
    pub debug_api: bool,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn widget_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".stock-chat")
}

fn widget_config_json_path() -> PathBuf {
    widget_dir().join("config.json")
}

fn parse_bool_env(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            api_base_url: None,
            user_id: default_user_id(),
            debug_api: false,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl WidgetConfig {
    /// Load from `~/.stock-chat/config.json`, then `./widget.toml`, then
    /// defaults, and apply `CHAT_*` environment overrides.
    pub fn new() -> Self {
        let mut config = Self::default();

        let json_path = widget_config_json_path();
        let candidates = [json_path.as_path(), Path::new(CONFIG_FILE_PATH)];
        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(file_config) => {
                    log::debug!("Loaded widget config from {}", path.display());
                    config = file_config;
                    break;
                }
                Err(e) => {
                    log::warn!("Ignoring widget config {}: {}", path.display(), e);
                }
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Read a `.json` or `.toml` config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = var("CHAT_BACKEND") {
            match BackendKind::parse(&backend) {
                Some(kind) => self.backend = kind,
                None => log::warn!("Unknown CHAT_BACKEND value '{}'", backend),
            }
        }
        if let Some(base_url) = var("CHAT_API_BASE_URL") {
            self.api_base_url = Some(base_url);
        }
        if let Some(user_id) = var("CHAT_USER_ID") {
            self.user_id = user_id;
        }
        if let Some(debug) = var("CHAT_DEBUG_API") {
            self.debug_api = parse_bool_env(&debug);
        }
        if let Some(timeout) = var("CHAT_REQUEST_TIMEOUT_SECS") {
            match timeout.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.request_timeout_secs = secs,
                _ => log::warn!("Invalid CHAT_REQUEST_TIMEOUT_SECS value '{}'", timeout),
            }
        }
    }

    /// Effective base URL without trailing slashes.
    ///
    /// Placeholder hosts left over from templates fall back to the
    /// production default.
    pub fn base_url(&self) -> String {
        let configured = self
            .api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());

        let url = match configured {
            Some(url) if url.contains(PLACEHOLDER_HOST) => {
                log::warn!("Detected placeholder API URL '{}', using production fallback", url);
                EXTERNAL_DEFAULT_BASE_URL
            }
            Some(url) => url,
            None => self.backend.default_base_url(),
        };
        url.trim_end_matches('/').to_string()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn parse_bool_env_true_values() {
        for value in ["1", "true", "TRUE", " yes ", "Y", "on"] {
            assert!(parse_bool_env(value), "value {value:?} should be true");
        }
    }

    #[test]
    fn parse_bool_env_false_values() {
        for value in ["0", "false", "no", "off", "", "  "] {
            assert!(!parse_bool_env(value), "value {value:?} should be false");
        }
    }

    #[test]
    fn default_base_url_depends_on_backend() {
        let mut config = WidgetConfig::default();
        assert_eq!(config.base_url(), "https://chat.aistocktickers.com");
        config.backend = BackendKind::Local;
        assert_eq!(config.base_url(), "http://localhost:5000");
    }

    #[test]
    fn placeholder_url_falls_back_to_production() {
        let config = WidgetConfig {
            api_base_url: Some("https://your-api-domain.com".to_string()),
            ..WidgetConfig::default()
        };
        assert_eq!(config.base_url(), "https://chat.aistocktickers.com");
    }

    #[test]
    fn base_url_drops_trailing_slashes() {
        let config = WidgetConfig {
            api_base_url: Some("http://example.test///".to_string()),
            ..WidgetConfig::default()
        };
        assert_eq!(config.base_url(), "http://example.test");
    }

    #[test]
    fn overrides_apply() {
        let mut config = WidgetConfig::default();
        config.apply_overrides(lookup(&[
            ("CHAT_BACKEND", "local"),
            ("CHAT_API_BASE_URL", "http://127.0.0.1:9000"),
            ("CHAT_USER_ID", "alice"),
            ("CHAT_DEBUG_API", "true"),
            ("CHAT_REQUEST_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.user_id, "alice");
        assert!(config.debug_api);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let mut config = WidgetConfig::default();
        config.apply_overrides(lookup(&[
            ("CHAT_BACKEND", "carrier-pigeon"),
            ("CHAT_REQUEST_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.backend, BackendKind::External);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn loads_toml_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("widget.toml");
        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(file, "backend = \"local\"\nuser_id = \"bob\"").expect("write");

        let config = WidgetConfig::from_file(&path).expect("load");
        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.user_id, "bob");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn loads_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_base_url": "http://h", "debug_api": true}"#).expect("write");

        let config = WidgetConfig::from_file(&path).expect("load");
        assert_eq!(config.base_url(), "http://h");
        assert!(config.debug_api);
        assert_eq!(config.user_id, "123");
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "a: b").expect("write");
        assert!(matches!(
            WidgetConfig::from_file(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
