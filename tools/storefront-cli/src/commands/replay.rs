//! Recorded session replay for debugging.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use storefront_observability::{DiffType, Recording, ReplayPlayer};

use super::{ReplayArgs, ReplayCommand};
use crate::context::Context;

/// Run the replay command.
pub async fn run(args: ReplayArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ReplayCommand::List => list_recordings(ctx).await,
        ReplayCommand::Show { recording } => show_recording(&recording, ctx).await,
        ReplayCommand::Verify { recording } => verify_recording(&recording, ctx).await,
        ReplayCommand::Delete { recording, yes } => delete_recording(&recording, yes, ctx).await,
    }
}

/// A recording name inside the recordings directory, or a file path.
fn recording_path(recording: &str, ctx: &Context) -> Result<PathBuf> {
    let direct = ctx.resolve_path(recording);
    if direct.is_file() {
        return Ok(direct);
    }

    let named = ctx.recordings_dir()?.join(format!("{}.json", recording));
    if named.is_file() {
        return Ok(named);
    }

    bail!("Recording '{}' not found", recording)
}

fn load_recording(recording: &str, ctx: &Context) -> Result<Recording> {
    let path = recording_path(recording, ctx)?;
    let content = fs::read_to_string(&path)?;
    let recording = Recording::from_json(&content)
        .with_context(|| format!("Invalid recording: {}", path.display()))?;

    if recording.version != Recording::VERSION {
        bail!(
            "Recording format version {} is not supported (expected {})",
            recording.version,
            Recording::VERSION
        );
    }

    Ok(recording)
}

async fn list_recordings(ctx: &Context) -> Result<()> {
    let recordings_dir = ctx.recordings_dir()?;

    ctx.output.header("Recordings");

    let mut recordings: Vec<(String, Recording)> = Vec::new();

    for entry in fs::read_dir(&recordings_dir)? {
        let path = entry?.path();

        if path.extension().is_some_and(|e| e == "json") {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(recording) = Recording::from_json(&content) {
                    recordings.push((name.to_string(), recording));
                }
            }
        }
    }

    if recordings.is_empty() {
        ctx.output.info("No recordings found.");
        ctx.output.info("Run `storefront run <script> --record <name>` to record one.");
        return Ok(());
    }

    // Newest first
    recordings.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));

    if ctx.output.is_json() {
        let names: Vec<&str> = recordings.iter().map(|(name, _)| name.as_str()).collect();
        ctx.output.json(&names);
        return Ok(());
    }

    let widths = [30, 25, 8, 10];
    ctx.output.table_row(&["NAME", "RECORDED", "STEPS", "CLOCK"], &widths);
    ctx.output.info(&"-".repeat(80));

    for (name, recording) in &recordings {
        let recorded = recording.timestamp.get(..19).unwrap_or(&recording.timestamp);
        ctx.output.table_row(
            &[
                name,
                recorded,
                &recording.steps.len().to_string(),
                &format!("{}ms", recording.final_at_ms),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!("Total: {} recording(s)", recordings.len()));

    Ok(())
}

async fn show_recording(recording: &str, ctx: &Context) -> Result<()> {
    let recording = load_recording(recording, ctx)?;

    if ctx.output.is_json() {
        ctx.output.json(&recording);
        return Ok(());
    }

    ctx.output.header(&format!("Recording {}", recording.session_id));
    ctx.output.kv("Recorded", &recording.timestamp);
    ctx.output.kv("Theme", recording.theme.as_str());
    ctx.output.kv("Catalog", recording.catalog.as_deref().unwrap_or("(sample)"));
    ctx.output.kv("Steps", &recording.steps.len().to_string());
    ctx.output.info("");

    for step in &recording.steps {
        let detail = serde_json::to_string(&step.intent)?;
        ctx.output.list_item(&format!("@{}ms {}", step.at_ms, detail));
    }

    if let Some(metrics) = &recording.metrics {
        ctx.output.info("");
        ctx.output.info(&metrics.to_summary());
    }

    Ok(())
}

async fn verify_recording(recording: &str, ctx: &Context) -> Result<()> {
    let recording = load_recording(recording, ctx)?;

    let catalog = match &recording.catalog {
        Some(path) => ctx.load_catalog(path)?,
        None => ctx.catalog()?,
    };

    ctx.output.header(&format!("Replaying: {}", recording.session_id));
    ctx.output.kv("Steps", &recording.steps.len().to_string());

    let player = ReplayPlayer::new(recording);
    let diff = player.verify(catalog);
    ctx.output.debug(&format!("replayed {} step(s)", player.steps().len()));

    if ctx.output.is_json() {
        ctx.output.json(&diff);
    }

    if diff.matches {
        ctx.output.success("Replayed state matches the recording");
        return Ok(());
    }

    for field in &diff.field_diffs {
        let render = |value: &Option<serde_json::Value>| {
            value
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        let kind = match field.diff_type {
            DiffType::Missing => "missing",
            DiffType::Added => "added",
            DiffType::Mismatch => "changed",
        };
        ctx.output.warn(&format!(
            "{} {}: expected {}, got {}",
            kind,
            field.path,
            render(&field.expected),
            render(&field.actual)
        ));
    }

    bail!("Replay diverged in {} field(s)", diff.field_diffs.len())
}

async fn delete_recording(recording: &str, yes: bool, ctx: &Context) -> Result<()> {
    let path = ctx.recordings_dir()?.join(format!("{}.json", recording));
    if !path.exists() {
        bail!("Recording '{}' not found", recording);
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete recording '{}'?", recording))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    fs::remove_file(&path)?;
    ctx.output.success(&format!("Deleted: {}", recording));

    Ok(())
}
