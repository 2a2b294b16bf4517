//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_commerce::catalog::Catalog;
use storefront_commerce::storefront::Storefront;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Load the configured catalog, or the built-in sample.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.config.storefront.catalog {
            Some(path) => self.load_catalog(path),
            None => Catalog::sample().context("Failed to load the built-in sample catalog"),
        }
    }

    /// Load a catalog JSON file.
    pub fn load_catalog(&self, path: &str) -> Result<Catalog> {
        let resolved = self.resolve_path(path);
        let content = std::fs::read_to_string(&resolved)
            .with_context(|| format!("Failed to read catalog: {}", resolved.display()))?;
        Catalog::from_json(&content)
            .with_context(|| format!("Invalid catalog: {}", resolved.display()))
    }

    /// A fresh storefront over the configured catalog.
    pub fn storefront(&self) -> Result<Storefront> {
        Ok(Storefront::new(
            self.catalog()?,
            self.config.storefront.theme,
            self.config.timing.clone(),
        ))
    }

    /// Get the recordings directory.
    pub fn recordings_dir(&self) -> Result<PathBuf> {
        let recordings = self.cwd.join(".storefront").join("recordings");
        std::fs::create_dir_all(&recordings)?;
        Ok(recordings)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
