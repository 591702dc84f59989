use crate::api::constants::{DEFAULT_BASE_URL, USER_AGENT};
use crate::api::models::TokenPair;
use crate::api::TokenStore;
use crate::domain::locales::default_languages;
use crate::domain::review::DEFAULT_PAGE_LIMIT;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Overrides `api.base_url` without touching the file
pub const API_URL_ENV: &str = "QUIZ_ADMIN_API_URL";
/// Points at an alternative config file
pub const CONFIG_PATH_ENV: &str = "QUIZ_ADMIN_CONFIG";

/// Setting names accepted by `settings get|set|reset`
pub const SETTING_NAMES: [&str; 6] = [
    "base-url",
    "timeout",
    "user-agent",
    "default-language",
    "supported-languages",
    "page-limit",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    USER_AGENT.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredTokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<&TokenPair> for StoredTokens {
    fn from(pair: &TokenPair) -> Self {
        Self {
            access_token: pair.access_token.clone(),
            refresh_token: pair.refresh_token.clone(),
        }
    }
}

impl From<StoredTokens> for TokenPair {
    fn from(stored: StoredTokens) -> Self {
        Self {
            access_token: stored.access_token,
            refresh_token: stored.refresh_token,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_languages")]
    pub supported_languages: Vec<String>,
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            supported_languages: default_languages(),
            page_limit: default_page_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<StoredTokens>,
    #[serde(default)]
    pub settings: Settings,
    /// File this config was loaded from
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        if let Ok(custom) = std::env::var(CONFIG_PATH_ENV) {
            if !custom.trim().is_empty() {
                return Ok(PathBuf::from(custom));
            }
        }

        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("quiz-admin")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".quiz-admin")
        };

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self {
                path: Some(config_path.to_path_buf()),
                ..Self::default()
            });
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let mut config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        config.path = Some(config_path.to_path_buf());

        debug!("Loaded config for {}", config.api.base_url);
        Ok(config)
    }

    pub fn path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Self::get_config_path(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = self.path()?;
        debug!("Saving config to: {:?}", config_path);

        if let Some(config_dir) = config_path.parent() {
            if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
                fs::create_dir_all(config_dir)
                    .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
                info!("Created config directory: {:?}", config_dir);
            }
        }

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    /// Backend URL, with the environment taking precedence over the file
    pub fn base_url(&self) -> String {
        resolve_base_url(&self.api.base_url, std::env::var(API_URL_ENV).ok())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tokens(&self) -> Option<TokenPair> {
        self.tokens.clone().map(TokenPair::from)
    }

    pub fn set_tokens(&mut self, tokens: &TokenPair) -> Result<()> {
        self.tokens = Some(StoredTokens::from(tokens));
        self.save()
    }

    pub fn clear_tokens(&mut self) -> Result<()> {
        if self.tokens.take().is_some() {
            info!("Clearing stored tokens");
        }
        self.save()
    }

    pub fn get_setting(&self, name: &str) -> Result<String> {
        let value = match name {
            "base-url" => self.api.base_url.clone(),
            "timeout" => self.api.timeout_secs.to_string(),
            "user-agent" => self.api.user_agent.clone(),
            "default-language" => self.settings.default_language.clone(),
            "supported-languages" => self.settings.supported_languages.join(","),
            "page-limit" => self.settings.page_limit.to_string(),
            _ => anyhow::bail!("Unknown setting: {}", name),
        };
        Ok(value)
    }

    /// Parse and apply one setting without saving
    pub fn apply_setting(&mut self, name: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match name {
            "base-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    anyhow::bail!("base-url must start with http:// or https://, got '{}'", value);
                }
                self.api.base_url = value.trim_end_matches('/').to_string();
            }
            "timeout" => {
                let secs: u64 = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid value for timeout: '{}'. Must be a positive integer.", value)
                })?;
                if secs == 0 {
                    anyhow::bail!("timeout must be greater than 0");
                }
                self.api.timeout_secs = secs;
            }
            "user-agent" => {
                if value.is_empty() {
                    anyhow::bail!("user-agent cannot be empty");
                }
                self.api.user_agent = value.to_string();
            }
            "default-language" => {
                if !self.settings.supported_languages.iter().any(|l| l == value) {
                    anyhow::bail!(
                        "default-language must be one of: {}",
                        self.settings.supported_languages.join(", ")
                    );
                }
                self.settings.default_language = value.to_string();
            }
            "supported-languages" => {
                let languages: Vec<String> = value
                    .split(',')
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty())
                    .collect();
                if languages.is_empty() {
                    anyhow::bail!("supported-languages needs at least one language");
                }
                if !languages.contains(&self.settings.default_language) {
                    anyhow::bail!(
                        "supported-languages must include the default language '{}'",
                        self.settings.default_language
                    );
                }
                self.settings.supported_languages = languages;
            }
            "page-limit" => {
                let limit: u32 = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid value for page-limit: '{}'. Must be a positive integer.", value)
                })?;
                if limit == 0 {
                    anyhow::bail!("page-limit must be greater than 0");
                }
                self.settings.page_limit = limit;
            }
            _ => anyhow::bail!("Unknown setting: {}", name),
        }
        Ok(())
    }

    pub fn set_setting(&mut self, name: &str, value: &str) -> Result<()> {
        info!("Setting {} to {}", name, value);
        self.apply_setting(name, value)?;
        self.save()
    }

    pub fn reset_setting(&mut self, name: &str) -> Result<()> {
        info!("Resetting {}", name);
        match name {
            "base-url" => self.api.base_url = default_base_url(),
            "timeout" => self.api.timeout_secs = default_timeout_secs(),
            "user-agent" => self.api.user_agent = default_user_agent(),
            "default-language" => self.settings.default_language = default_language(),
            "supported-languages" => self.settings.supported_languages = default_languages(),
            "page-limit" => self.settings.page_limit = default_page_limit(),
            _ => anyhow::bail!("Unknown setting: {}", name),
        }
        self.save()
    }

    pub fn reset_all(&mut self) -> Result<()> {
        info!("Resetting all settings");
        self.api = ApiConfig::default();
        self.settings = Settings::default();
        self.save()
    }
}

fn resolve_base_url(file_value: &str, env_value: Option<String>) -> String {
    env_value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| file_value.to_string())
}

/// Token store persisting into the `[tokens]` section of the config file
pub struct ConfigTokenStore {
    path: PathBuf,
    tokens: Mutex<Option<TokenPair>>,
}

impl ConfigTokenStore {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            path: config.path()?,
            tokens: Mutex::new(config.tokens()),
        })
    }

    fn write(&self, tokens: Option<&TokenPair>) -> Result<()> {
        let mut config = Config::load_from(&self.path)?;
        match tokens {
            Some(pair) => config.set_tokens(pair)?,
            None => config.clear_tokens()?,
        }
        let mut guard = self
            .tokens
            .lock()
            .map_err(|_| anyhow::anyhow!("token store lock poisoned"))?;
        *guard = tokens.cloned();
        Ok(())
    }
}

impl TokenStore for ConfigTokenStore {
    fn load(&self) -> Option<TokenPair> {
        match self.tokens.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, tokens: &TokenPair) -> Result<()> {
        self.write(Some(tokens))
    }

    fn clear(&self) -> Result<()> {
        self.write(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        (dir, path)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (_dir, path) = temp_config();
        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.settings.page_limit, 5);
        assert_eq!(config.settings.supported_languages.len(), 9);
        assert!(config.tokens().is_none());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let (_dir, path) = temp_config();
        let mut config = Config::load_from(&path).unwrap();
        config.set_setting("base-url", "https://quiz.example.com/").unwrap();
        config.set_setting("page-limit", "20").unwrap();
        config
            .set_tokens(&TokenPair {
                access_token: "a".into(),
                refresh_token: "r".into(),
            })
            .unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.api.base_url, "https://quiz.example.com");
        assert_eq!(reloaded.tokens().unwrap().refresh_token, "r");

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[api]"));
        assert!(text.contains("[tokens]"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let (_dir, path) = temp_config();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[settings]\ndefault_language = \"uk\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.settings.default_language, "uk");
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let mut config = Config::default();
        assert!(config.apply_setting("page-limit", "0").is_err());
        assert!(config.apply_setting("timeout", "soon").is_err());
        assert!(config.apply_setting("base-url", "ftp://x").is_err());
        assert!(config.apply_setting("default-language", "xx").is_err());
        assert!(config.apply_setting("supported-languages", "de,fr").is_err());
        assert!(config.apply_setting("colour", "blue").is_err());

        config.apply_setting("supported-languages", "en, uk").unwrap();
        assert_eq!(config.get_setting("supported-languages").unwrap(), "en,uk");
    }

    #[test]
    fn test_env_url_takes_precedence() {
        assert_eq!(
            resolve_base_url("http://file", Some("http://env".to_string())),
            "http://env"
        );
        assert_eq!(resolve_base_url("http://file", Some("  ".to_string())), "http://file");
        assert_eq!(resolve_base_url("http://file", None), "http://file");
    }

    #[test]
    fn test_token_store_persists_to_file() {
        let (_dir, path) = temp_config();
        let config = Config::load_from(&path).unwrap();
        let store = ConfigTokenStore::new(&config).unwrap();

        let pair = TokenPair {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
        };
        store.save(&pair).unwrap();
        assert_eq!(store.load(), Some(pair.clone()));
        assert_eq!(Config::load_from(&path).unwrap().tokens(), Some(pair));

        store.clear().unwrap();
        assert!(store.load().is_none());
        assert!(Config::load_from(&path).unwrap().tokens().is_none());
    }
}
