//! Shopper session scripts.
//!
//! A script is a list of steps, each either an intent (tagged by `type`,
//! as the storefront accepts it) or a pause that lets the session clock run:
//!
//! ```toml
//! name = "quick view checkout"
//!
//! [[steps]]
//! type = "open_quick_view"
//! product_id = 7
//!
//! [[steps]]
//! wait_ms = 3000
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::storefront::Intent;

/// A scripted shopper session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

/// One script step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    /// Let the session clock run.
    Wait { wait_ms: u64 },
    Intent(Intent),
}

impl ScriptStep {
    /// Pause length, `None` for intent steps.
    pub fn wait(&self) -> Option<Duration> {
        match self {
            ScriptStep::Wait { wait_ms } => Some(Duration::from_millis(*wait_ms)),
            ScriptStep::Intent(_) => None,
        }
    }
}

impl Script {
    /// Read a script, JSON or TOML by extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON script: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML script: {}", path.display()))
        }
    }

    /// Number of intent steps.
    pub fn intent_count(&self) -> usize {
        self.steps.iter().filter(|step| step.wait().is_none()).count()
    }

    /// Total scripted pause.
    pub fn total_wait(&self) -> Duration {
        self.steps.iter().filter_map(ScriptStep::wait).sum()
    }
}
