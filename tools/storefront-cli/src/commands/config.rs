//! Configuration management commands.

use std::path::PathBuf;

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[storefront]");
    ctx.output.kv("theme", ctx.config.storefront.theme.as_str());
    ctx.output.kv(
        "catalog",
        ctx.config.storefront.catalog.as_deref().unwrap_or("(sample)"),
    );

    let timing = &ctx.config.timing;
    ctx.output.info("");
    ctx.output.info("[timing]");
    ctx.output.kv("image_cycle_ms", &timing.image_cycle_ms.to_string());
    ctx.output.kv("reveal_stagger_ms", &timing.reveal_stagger_ms.to_string());
    ctx.output.kv("toast_duration_ms", &timing.toast_duration_ms.to_string());
    ctx.output.kv("countdown_tick_ms", &timing.countdown_tick_ms.to_string());
    ctx.output.kv("compare_capacity", &timing.compare_capacity.to_string());

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        println!(r#"{{"key": "{}", "value": {}}}"#, key, value);
    } else {
        println!("{}", value);
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(config_path) = ctx.config_path.as_ref() else {
        bail!("No config file found. Run `storefront config init` to create one.");
    };
    let config_path = config_path.to_string_lossy();

    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;

        if !overwrite {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    std::fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (mut errors, warnings) = ctx.config.check();

    if let Err(e) = ctx.catalog() {
        errors.push(format!("storefront.catalog: {:#}", e));
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();
    let timing = &config.timing;

    match parts.as_slice() {
        ["storefront", "theme"] => Ok(format!("\"{}\"", config.storefront.theme)),
        ["storefront", "catalog"] => Ok(config
            .storefront
            .catalog
            .as_ref()
            .map(|c| format!("\"{}\"", c))
            .unwrap_or_else(|| "null".to_string())),
        ["timing", "image_cycle_ms"] => Ok(timing.image_cycle_ms.to_string()),
        ["timing", "reveal_stagger_ms"] => Ok(timing.reveal_stagger_ms.to_string()),
        ["timing", "toast_duration_ms"] => Ok(timing.toast_duration_ms.to_string()),
        ["timing", "countdown_tick_ms"] => Ok(timing.countdown_tick_ms.to_string()),
        ["timing", "compare_capacity"] => Ok(timing.compare_capacity.to_string()),
        ["logging", "level"] => Ok(format!("\"{}\"", config.logging.level)),
        ["logging", "format"] => Ok(serde_json::to_string(&config.logging.format)?),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let timing = &mut config.timing;

    match parts.as_slice() {
        ["storefront", "theme"] => config.storefront.theme = value.parse()?,
        ["storefront", "catalog"] => config.storefront.catalog = Some(value.to_string()),
        ["timing", "image_cycle_ms"] => timing.image_cycle_ms = value.parse()?,
        ["timing", "reveal_stagger_ms"] => timing.reveal_stagger_ms = value.parse()?,
        ["timing", "toast_duration_ms"] => timing.toast_duration_ms = value.parse()?,
        ["timing", "countdown_tick_ms"] => timing.countdown_tick_ms = value.parse()?,
        ["timing", "compare_capacity"] => timing.compare_capacity = value.parse()?,
        ["logging", "level"] => config.logging.level = value.to_string(),
        ["logging", "format"] => config.logging.format = value.parse()?,
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::settings::Theme;
    use storefront_observability::LogFormat;

    #[test]
    fn test_set_then_get() {
        let mut config = CliConfig::default();
        set_config_value(&mut config, "storefront.theme", "dark").unwrap();
        set_config_value(&mut config, "timing.compare_capacity", "3").unwrap();
        set_config_value(&mut config, "logging.format", "json").unwrap();

        assert_eq!(config.storefront.theme, Theme::Dark);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(get_config_value(&config, "storefront.theme").unwrap(), "\"dark\"");
        assert_eq!(get_config_value(&config, "timing.compare_capacity").unwrap(), "3");
        assert_eq!(get_config_value(&config, "logging.format").unwrap(), "\"json\"");
        assert_eq!(get_config_value(&config, "storefront.catalog").unwrap(), "null");
    }

    #[test]
    fn test_unknown_key() {
        let mut config = CliConfig::default();
        assert!(get_config_value(&config, "build.target").is_err());
        assert!(set_config_value(&mut config, "timing", "1").is_err());
        assert!(set_config_value(&mut config, "timing.compare_capacity", "many").is_err());
    }
}
