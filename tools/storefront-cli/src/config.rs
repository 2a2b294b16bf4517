//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::settings::{StorefrontSettings, Theme};
use storefront_observability::{LogFormat, LogLevel};

/// File names searched for, in order, from the working directory upward.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront presentation and catalog source.
    #[serde(default)]
    pub storefront: StorefrontConfig,

    /// Timer periods and capacities.
    #[serde(default)]
    pub timing: StorefrontSettings,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Problems that make the config unusable, then ones worth a warning.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.timing.compare_capacity == 0 {
            errors.push("timing.compare_capacity must be at least 1".to_string());
        }
        if self.timing.countdown_tick_ms == 0 {
            errors.push("timing.countdown_tick_ms must be positive".to_string());
        }
        if self.timing.image_cycle_ms == 0 {
            errors.push("timing.image_cycle_ms must be positive".to_string());
        }
        if self.timing.toast_duration_ms == 0 {
            warnings.push("timing.toast_duration_ms is 0; toasts dismiss on the next tick".to_string());
        }
        if self.timing.compare_capacity > 8 {
            warnings.push(format!(
                "timing.compare_capacity {} is wider than the compare tray renders comfortably",
                self.timing.compare_capacity
            ));
        }
        if self.logging.level.parse::<LogLevel>().is_err() {
            warnings.push(format!(
                "logging.level '{}' is not a plain level; it is passed to the filter as a directive",
                self.logging.level
            ));
        }

        (errors, warnings)
    }
}

/// Storefront section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Color theme passed to the presentation surface.
    #[serde(default)]
    pub theme: Theme,

    /// Catalog JSON file. The built-in sample catalog is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Format of session log entries.
    #[serde(default = "default_format")]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> LogFormat {
    LogFormat::Human
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl LoggingConfig {
    /// Minimum level for session log entries.
    pub fn min_level(&self) -> LogLevel {
        self.level.parse().unwrap_or(LogLevel::Warn)
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[storefront]
theme = "light"
# catalog = "catalog.json"

[timing]
image_cycle_ms = 1500
reveal_stagger_ms = 100
toast_duration_ms = 3000
countdown_tick_ms = 1000
compare_capacity = 4

[logging]
level = "warn"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.storefront.theme, Theme::Light);
        assert!(config.storefront.catalog.is_none());
        assert_eq!(config.timing, StorefrontSettings::default());
        assert_eq!(config.logging.format, LogFormat::Human);
        let (errors, warnings) = config.check();
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_partial_config() {
        let config: CliConfig = toml::from_str(
            r#"
            [storefront]
            theme = "dark"
            catalog = "data/catalog.json"

            [timing]
            compare_capacity = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.storefront.theme, Theme::Dark);
        assert_eq!(config.timing.toast_duration_ms, 3000);
        assert_eq!(config.logging.level, "warn");

        let (errors, _) = config.check();
        assert_eq!(errors, vec!["timing.compare_capacity must be at least 1".to_string()]);
    }

    #[test]
    fn test_json_config() {
        let config: CliConfig =
            serde_json::from_str(r#"{"logging": {"level": "debug", "format": "json"}}"#).unwrap();
        assert_eq!(config.logging.min_level(), LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_directive_level_warns() {
        let mut config = CliConfig::default();
        config.logging.level = "storefront_commerce=trace".to_string();
        let (errors, warnings) = config.check();
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.logging.min_level(), LogLevel::Warn);
    }
}
