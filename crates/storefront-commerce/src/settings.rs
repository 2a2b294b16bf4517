//! Session settings and theme.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::StorefrontError;
use serde::{Deserialize, Serialize};

/// Color theme, passed through to the presentation surface untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(StorefrontError::UnknownTheme(s.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timing and capacity knobs of a storefront session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontSettings {
    /// Card image rotation period while hovered.
    #[serde(default = "default_image_cycle_ms")]
    pub image_cycle_ms: u64,

    /// Entrance delay per card position.
    #[serde(default = "default_reveal_stagger_ms")]
    pub reveal_stagger_ms: u64,

    /// How long a toast stays up.
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,

    /// Offer countdown step.
    #[serde(default = "default_countdown_tick_ms")]
    pub countdown_tick_ms: u64,

    /// Maximum products in the compare tray.
    #[serde(default = "default_compare_capacity")]
    pub compare_capacity: usize,
}

fn default_image_cycle_ms() -> u64 {
    1500
}

fn default_reveal_stagger_ms() -> u64 {
    100
}

fn default_toast_duration_ms() -> u64 {
    3000
}

fn default_countdown_tick_ms() -> u64 {
    1000
}

fn default_compare_capacity() -> usize {
    4
}

impl StorefrontSettings {
    pub fn image_cycle(&self) -> Duration {
        Duration::from_millis(self.image_cycle_ms)
    }

    pub fn reveal_stagger(&self) -> Duration {
        Duration::from_millis(self.reveal_stagger_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms)
    }
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self {
            image_cycle_ms: default_image_cycle_ms(),
            reveal_stagger_ms: default_reveal_stagger_ms(),
            toast_duration_ms: default_toast_duration_ms(),
            countdown_tick_ms: default_countdown_tick_ms(),
            compare_capacity: default_compare_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parsing() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: StorefrontSettings = serde_json::from_str(r#"{"toast_duration_ms": 500}"#).unwrap();
        assert_eq!(settings.toast_duration(), Duration::from_millis(500));
        assert_eq!(settings.image_cycle(), Duration::from_millis(1500));
        assert_eq!(settings.compare_capacity, 4);
    }
}
