//! Session recording and replay for local debugging.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_commerce::catalog::Catalog;
use storefront_commerce::settings::{StorefrontSettings, Theme};
use storefront_commerce::storefront::{Intent, Snapshot, Storefront};
use storefront_commerce::SessionId;
use std::time::Duration;

use crate::metrics::SessionMetrics;

/// One intent with the session clock at which it was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedStep {
    pub at_ms: u64,
    pub intent: Intent,
}

/// A complete recording of a shopper session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Recording format version.
    pub version: u32,
    /// Timestamp when recorded (RFC 3339).
    pub timestamp: String,
    pub session_id: String,
    pub theme: Theme,
    pub settings: StorefrontSettings,
    /// Catalog file the session ran against, absent for the sample catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    pub steps: Vec<RecordedStep>,
    /// Session clock when recording stopped.
    pub final_at_ms: u64,
    /// State at the end of the session.
    pub snapshot: Snapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<SessionMetrics>,
}

impl Recording {
    /// Current recording format version.
    pub const VERSION: u32 = 1;

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Records the intents applied to a session.
#[derive(Debug)]
pub struct ReplayRecorder {
    session_id: SessionId,
    theme: Theme,
    settings: StorefrontSettings,
    catalog: Option<String>,
    steps: Vec<RecordedStep>,
}

impl ReplayRecorder {
    /// Create a recorder for a storefront about to receive intents.
    pub fn new(storefront: &Storefront) -> Self {
        Self {
            session_id: storefront.session_id().clone(),
            theme: storefront.theme(),
            settings: storefront.settings().clone(),
            catalog: None,
            steps: Vec::new(),
        }
    }

    /// Note the catalog file the session uses.
    pub fn with_catalog(mut self, path: impl Into<String>) -> Self {
        self.catalog = Some(path.into());
        self
    }

    /// Record an intent dispatched at `at`.
    pub fn record_intent(&mut self, at: Duration, intent: &Intent) {
        self.steps.push(RecordedStep {
            at_ms: u64::try_from(at.as_millis()).unwrap_or(u64::MAX),
            intent: intent.clone(),
        });
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Finalize the recording with the session's end state.
    pub fn finalize(self, storefront: &Storefront, metrics: Option<SessionMetrics>) -> Recording {
        let snapshot = storefront.snapshot();
        Recording {
            version: Recording::VERSION,
            timestamp: chrono::Utc::now().to_rfc3339(),
            session_id: self.session_id.to_string(),
            theme: self.theme,
            settings: self.settings,
            catalog: self.catalog,
            steps: self.steps,
            final_at_ms: snapshot.at_ms,
            snapshot,
            metrics,
        }
    }
}

/// Replays recorded sessions.
#[derive(Debug)]
pub struct ReplayPlayer {
    recording: Recording,
}

impl ReplayPlayer {
    pub fn new(recording: Recording) -> Self {
        Self { recording }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(Recording::from_json(json)?))
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    pub fn steps(&self) -> &[RecordedStep] {
        &self.recording.steps
    }

    /// Get original metrics.
    pub fn metrics(&self) -> Option<&SessionMetrics> {
        self.recording.metrics.as_ref()
    }

    /// Re-run every step on a fresh storefront over `catalog`.
    pub fn play(&self, catalog: Catalog) -> Storefront {
        let mut storefront = Storefront::new(catalog, self.recording.theme, self.recording.settings.clone())
            .with_session_id(SessionId::new(self.recording.session_id.clone()));

        for step in &self.recording.steps {
            storefront.advance_to(Duration::from_millis(step.at_ms));
            storefront.dispatch(step.intent.clone());
        }
        storefront.advance_to(Duration::from_millis(self.recording.final_at_ms));

        storefront
    }

    /// Replay and compare the result with the recorded end state.
    pub fn verify(&self, catalog: Catalog) -> ReplayDiff {
        let replayed = self.play(catalog);
        ReplayDiff::compare_snapshots(&self.recording.snapshot, &replayed.snapshot())
    }
}

/// Result of comparing two snapshots.
#[derive(Debug, Serialize)]
pub struct ReplayDiff {
    /// Whether the snapshots match.
    pub matches: bool,
    pub field_diffs: Vec<FieldDiff>,
}

/// Difference at one path of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDiff {
    /// JSON path, e.g. `selection.compare[2]`.
    pub path: String,
    pub diff_type: DiffType,
    /// Expected value (from recording).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    /// Actual value (from replay).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
}

/// Type of difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiffType {
    /// Present in the recording, missing after replay.
    Missing,
    /// Present only after replay.
    Added,
    /// Value differs.
    Mismatch,
}

impl ReplayDiff {
    /// Compare two snapshots field by field.
    pub fn compare_snapshots(expected: &Snapshot, actual: &Snapshot) -> Self {
        let expected = serde_json::to_value(expected).unwrap_or(Value::Null);
        let actual = serde_json::to_value(actual).unwrap_or(Value::Null);

        let mut field_diffs = Vec::new();
        diff_values("", &expected, &actual, &mut field_diffs);

        Self {
            matches: field_diffs.is_empty(),
            field_diffs,
        }
    }
}

fn diff_values(path: &str, expected: &Value, actual: &Value, diffs: &mut Vec<FieldDiff>) {
    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => {
            for (key, exp_value) in exp {
                let child = join_path(path, key);
                match act.get(key) {
                    Some(act_value) => diff_values(&child, exp_value, act_value, diffs),
                    None => diffs.push(FieldDiff {
                        path: child,
                        diff_type: DiffType::Missing,
                        expected: Some(exp_value.clone()),
                        actual: None,
                    }),
                }
            }
            for (key, act_value) in act {
                if !exp.contains_key(key) {
                    diffs.push(FieldDiff {
                        path: join_path(path, key),
                        diff_type: DiffType::Added,
                        expected: None,
                        actual: Some(act_value.clone()),
                    });
                }
            }
        }
        (Value::Array(exp), Value::Array(act)) => {
            for i in 0..exp.len().max(act.len()) {
                let child = format!("{}[{}]", path, i);
                match (exp.get(i), act.get(i)) {
                    (Some(e), Some(a)) => diff_values(&child, e, a, diffs),
                    (Some(e), None) => diffs.push(FieldDiff {
                        path: child,
                        diff_type: DiffType::Missing,
                        expected: Some(e.clone()),
                        actual: None,
                    }),
                    (None, Some(a)) => diffs.push(FieldDiff {
                        path: child,
                        diff_type: DiffType::Added,
                        expected: None,
                        actual: Some(a.clone()),
                    }),
                    (None, None) => {}
                }
            }
        }
        _ if expected != actual => diffs.push(FieldDiff {
            path: path.to_string(),
            diff_type: DiffType::Mismatch,
            expected: Some(expected.clone()),
            actual: Some(actual.clone()),
        }),
        _ => {}
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::ids::ProductId;
    use storefront_commerce::search::SortKey;

    fn storefront() -> Storefront {
        Storefront::new(
            Catalog::sample().unwrap(),
            Theme::Dark,
            StorefrontSettings::default(),
        )
    }

    fn recorded_session() -> Recording {
        let mut storefront = storefront();
        let mut recorder = ReplayRecorder::new(&storefront);

        let script = [
            (0, Intent::SortBy { sort: SortKey::PriceLow }),
            (
                400,
                Intent::ToggleCompare {
                    product_id: ProductId::new(2),
                    desired: true,
                },
            ),
            (1200, Intent::add_to_cart(5)),
        ];
        for (at_ms, intent) in script {
            storefront.advance_to(Duration::from_millis(at_ms));
            recorder.record_intent(storefront.now(), &intent);
            storefront.dispatch(intent);
        }
        storefront.advance(Duration::from_millis(500));

        recorder.finalize(&storefront, None)
    }

    #[test]
    fn test_replay_reproduces_snapshot() {
        let recording = recorded_session();
        assert_eq!(recording.steps.len(), 3);
        assert_eq!(recording.final_at_ms, 1700);
        assert!(recording.snapshot.toast.is_some());

        let player = ReplayPlayer::new(recording);
        let diff = player.verify(Catalog::sample().unwrap());
        assert!(diff.matches, "unexpected diffs: {:?}", diff.field_diffs);
    }

    #[test]
    fn test_recording_survives_json() {
        let recording = recorded_session();
        let json = recording.to_json().unwrap();
        let player = ReplayPlayer::from_json(&json).unwrap();
        assert_eq!(player.steps(), recording.steps.as_slice());
        assert!(player.verify(Catalog::sample().unwrap()).matches);
    }

    #[test]
    fn test_diff_reports_paths() {
        let recording = recorded_session();
        let mut tampered = recording.clone();
        tampered.steps.pop();

        let player = ReplayPlayer::new(tampered);
        let diff = player.verify(Catalog::sample().unwrap());
        assert!(!diff.matches);
        assert!(diff
            .field_diffs
            .iter()
            .any(|d| d.path == "selection.cart[0]" && d.diff_type == DiffType::Missing));
        assert!(diff.field_diffs.iter().any(|d| d.path == "toast"));
    }
}
