//! Scripted shopper sessions.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context as _, Result};
use chrono::Utc;
use storefront_commerce::storefront::{Notification, Snapshot, Storefront};
use storefront_observability::{ObservedSession, ReplayRecorder, StructuredLogger};

use super::RunArgs;
use crate::context::Context;
use crate::output::format_duration_ms;
use crate::script::{Script, ScriptStep};

/// Clock step while sleeping through a wait in realtime mode.
const REALTIME_STEP: Duration = Duration::from_millis(100);

/// Run the run command.
pub async fn run(args: RunArgs, ctx: &Context) -> Result<()> {
    let script_path = ctx.resolve_path(&args.script);
    let script = Script::from_path(&script_path)?;

    let storefront = ctx.storefront()?;
    let logger = StructuredLogger::new(storefront.session_id().clone())
        .with_component("session")
        .with_min_level(ctx.config.logging.min_level())
        .with_format(ctx.config.logging.format);

    let record_name = match (args.record, args.auto_record) {
        (Some(name), _) => Some(name),
        (None, true) => Some(Utc::now().format("session-%Y%m%d-%H%M%S").to_string()),
        (None, false) => None,
    };

    let mut session = ObservedSession::new(storefront, logger);
    if record_name.is_some() {
        let mut recorder = ReplayRecorder::new(session.storefront());
        if let Some(catalog) = &ctx.config.storefront.catalog {
            recorder = recorder.with_catalog(ctx.resolve_path(catalog).to_string_lossy());
        }
        session = session.with_recorder(recorder);
    }

    ctx.output.header(&format!(
        "Running {}",
        script.name.as_deref().unwrap_or(&args.script)
    ));
    ctx.output.kv("Session", &session.storefront().session_id().to_string());
    ctx.output.kv("Intents", &script.intent_count().to_string());
    ctx.output.kv("Scripted wait", &format_duration_ms(millis(script.total_wait())));
    ctx.output.info("");

    for step in script.steps {
        let notifications = match step {
            ScriptStep::Intent(intent) => {
                ctx.output.debug(&format!("{} @{}ms", intent.kind(), now_ms(&session)));
                session.dispatch(intent)
            }
            ScriptStep::Wait { wait_ms } => {
                let wait = Duration::from_millis(wait_ms);
                if args.realtime {
                    wait_realtime(&mut session, wait, ctx).await
                } else {
                    session.advance(wait)
                }
            }
        };
        print_notifications(&notifications, now_ms(&session), ctx);
    }

    let (storefront, metrics, recording) = session.finish();
    let snapshot = storefront.snapshot();

    if ctx.output.is_json() {
        ctx.output.json(&snapshot);
    } else {
        print_snapshot(&storefront, &snapshot, ctx);
        if ctx.output.is_verbose() {
            ctx.output.info("");
            ctx.output.info(&metrics.to_summary());
        }
    }

    if let (Some(name), Some(recording)) = (record_name, recording) {
        let path = ctx.recordings_dir()?.join(format!("{}.json", name));
        write_recording(&path, &recording.to_json()?)?;
        ctx.output.success(&format!("Recording saved: {}", path.display()));
    }

    Ok(())
}

/// Sleep through `wait`, moving the session clock along with wall time.
async fn wait_realtime(session: &mut ObservedSession, wait: Duration, ctx: &Context) -> Vec<Notification> {
    let pb = ctx.output.progress(millis(wait), "waiting");
    let mut notifications = Vec::new();
    let mut remaining = wait;

    while !remaining.is_zero() {
        let step = remaining.min(REALTIME_STEP);
        tokio::time::sleep(step).await;
        notifications.extend(session.advance(step));
        remaining -= step;
        pb.inc(millis(step));
    }

    pb.finish_and_clear();
    notifications
}

fn print_notifications(notifications: &[Notification], at_ms: u64, ctx: &Context) {
    for notification in notifications {
        match notification {
            Notification::ToastShown { message, duration_ms } => ctx.output.success(&format!(
                "[{}ms] {} ({})",
                at_ms,
                message,
                format_duration_ms(*duration_ms)
            )),
            Notification::ToastDismissed => {
                ctx.output.debug(&format!("[{}ms] toast dismissed", at_ms))
            }
        }
    }
}

fn print_snapshot(storefront: &Storefront, snapshot: &Snapshot, ctx: &Context) {
    ctx.output.header("Final state");
    ctx.output.kv("Clock", &format!("{}ms", snapshot.at_ms));
    ctx.output.kv("Filter", snapshot.filter.label());
    ctx.output.kv("Sort", snapshot.sort.display_name());
    ctx.output.kv("Visible", &join_ids(&snapshot.visible));
    ctx.output.kv("Wishlist", &join_ids(&snapshot.selection.wishlist));
    ctx.output.kv("Compare", &join_ids(&snapshot.compare_tray.products));

    let cart = storefront.store().cart();
    ctx.output.kv("Cart", &format!("{} line(s), {} item(s)", cart.len(), cart.item_count()));
    for line in cart.lines() {
        let name = storefront
            .catalog()
            .get(line.product_id)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        let options: Vec<&str> = [line.color.as_deref(), line.size.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if options.is_empty() {
            ctx.output.list_item(&format!("{} x{}", name, line.quantity));
        } else {
            ctx.output
                .list_item(&format!("{} x{} ({})", name, line.quantity, options.join(", ")));
        }
    }
    if let Some(subtotal) = cart.subtotal(storefront.catalog()) {
        if !cart.is_empty() {
            ctx.output.kv("Subtotal", &subtotal.display());
        }
    }

    if let Some(quick_view) = &snapshot.selection.quick_view {
        let detail = match quick_view.time_left {
            Some(time_left) => format!("#{} (offer ends in {})", quick_view.product_id, time_left),
            None => format!("#{}", quick_view.product_id),
        };
        ctx.output.kv("Quick view", &detail);
    }
    if let Some(toast) = &snapshot.toast {
        ctx.output.kv("Toast", &toast.message);
    }
}

fn join_ids<T: ToString>(ids: &[T]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn write_recording(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json).with_context(|| format!("Failed to write recording: {}", path.display()))
}

fn now_ms(session: &ObservedSession) -> u64 {
    millis(session.storefront().now())
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
