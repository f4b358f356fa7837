//! Configuration settings for Bistro.

use crate::pricing::CurrencyFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `BISTRO_API__BASE_URL`.
const ENV_PREFIX: &str = "BISTRO";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
    /// Currency formatting.
    pub currency: CurrencyFormat,
}

fn default_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

impl Config {
    /// Load configuration from the default location, falling back to
    /// defaults for anything not set.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from a TOML file (optional) overlaid with
    /// `BISTRO_`-prefixed environment variables.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_path);
        tracing::debug!(path = %config_path.display(), "Loading configuration");

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(config_path.as_path()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_path);
        Self::write_toml(self, &config_path)
    }

    fn write_toml(&self, config_path: &Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }
}

/// API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// GoRestaurant API base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333".to_string(),
            timeout_secs: 10,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            mouse_support: true,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Select/open.
    pub select: String,
    /// Back.
    pub back: String,
    /// Refresh/retry.
    pub refresh: String,
    /// Switch to orders tab.
    pub orders: String,
    /// Switch to favorites tab.
    pub favorites: String,
    /// Cancel the open order.
    pub cancel_order: String,
    /// Answer yes to a prompt.
    pub confirm: String,
    /// Answer no to a prompt.
    pub decline: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            refresh: "r".to_string(),
            orders: "1".to_string(),
            favorites: "2".to_string(),
            cancel_order: "x".to_string(),
            confirm: "y".to_string(),
            decline: "n".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("bistro-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load(Some(temp_path("absent.toml"))).unwrap();
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.currency, CurrencyFormat::brl());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_path("partial.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://10.0.2.2:3333\"\n\n[keybindings]\nquit = \"Ctrl+c\"\n",
        )
        .unwrap();

        let config = Config::load(Some(path.clone())).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.2.2:3333");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.keybindings.quit, "Ctrl+c");
        assert_eq!(config.keybindings.help, "?");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("saved.toml");
        let mut config = Config::default();
        config.ui.tick_rate_ms = 250;
        config.save(Some(path.clone())).unwrap();

        let loaded = Config::load(Some(path.clone())).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_file(path).ok();
    }
}
