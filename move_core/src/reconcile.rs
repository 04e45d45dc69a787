//! Load-time reconciliation of persisted progress.
//!
//! Turns whatever was persisted (possibly from an older build, possibly from
//! an earlier week) into a snapshot for the current week:
//! 1. Merge the raw record over a full set of defaults
//! 2. If the record belongs to an earlier week, archive it and roll over

use crate::calendar::monday_of;
use crate::progress;
use crate::{Catalog, Plan, ProgressSnapshot, Result, WorkoutHistoryEntry};
use chrono::NaiveDateTime;
use serde_json::Value;

/// Number of archived weeks kept in `workout_history`
pub const HISTORY_LIMIT: usize = 12;

/// Result of reconciling a persisted snapshot against the current week
#[derive(Clone, Debug)]
pub struct Reconciled {
    pub snapshot: ProgressSnapshot,
    /// History entry written for the stale week, if a rollover happened
    pub archived: Option<WorkoutHistoryEntry>,
}

impl Reconciled {
    pub fn rolled_over(&self) -> bool {
        self.archived.is_some()
    }
}

/// Parse a stored record and merge it over `defaults`
///
/// Missing or `null` fields keep their default value; unknown fields are
/// ignored. Fails only if the text is not JSON or a present field has the
/// wrong shape.
pub fn merge_over_defaults(raw: &str, defaults: ProgressSnapshot) -> Result<ProgressSnapshot> {
    let raw: Value = serde_json::from_str(raw)?;
    let mut merged = serde_json::to_value(defaults)?;

    match (raw, &mut merged) {
        (Value::Object(stored), Value::Object(target)) => {
            for (key, value) in stored {
                if !value.is_null() {
                    target.insert(key, value);
                }
            }
        }
        (other, _) => {
            return Err(crate::Error::State(format!(
                "Stored progress is not an object: {}",
                other
            )));
        }
    }

    Ok(serde_json::from_value(merged)?)
}

/// Decode the local record, substituting defaults for anything unreadable
pub fn decode_local(raw: Option<&str>, now: NaiveDateTime) -> ProgressSnapshot {
    let defaults = ProgressSnapshot::fresh(monday_of(now));
    let Some(raw) = raw else {
        tracing::info!("No stored progress found, starting fresh");
        return defaults;
    };

    match merge_over_defaults(raw, defaults.clone()) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("Failed to parse stored progress: {}. Using defaults.", e);
            defaults
        }
    }
}

/// Bring a merged snapshot up to the week containing `now`
///
/// A snapshot already in the current week is returned unchanged. Otherwise
/// the stale week is archived, the streak advanced or reset, and the weekly
/// fields cleared. Swaps, achievements, preferences and lifetime counters are
/// carried over untouched.
pub fn reconcile(merged: ProgressSnapshot, now: NaiveDateTime, catalog: &Catalog) -> Reconciled {
    let current_week_start = monday_of(now);
    if merged.week_start_date == current_week_start {
        return Reconciled {
            snapshot: merged,
            archived: None,
        };
    }

    let plan = catalog.plan(merged.difficulty);
    let was_complete = progress::is_week_complete(&merged, plan);
    let entry = history_entry(&merged, plan);

    let streak = if was_complete { merged.streak + 1 } else { 0 };
    let longest_streak = merged.longest_streak.max(streak);
    let last_completed_week = if was_complete {
        Some(merged.week_start_date)
    } else {
        merged.last_completed_week
    };

    tracing::info!(
        "Rolling over week {} -> {} (complete: {}, streak: {})",
        merged.week_start_date,
        current_week_start,
        was_complete,
        streak
    );

    let mut workout_history = merged.workout_history;
    workout_history.push(entry.clone());
    if workout_history.len() > HISTORY_LIMIT {
        let excess = workout_history.len() - HISTORY_LIMIT;
        workout_history.drain(..excess);
    }

    let snapshot = ProgressSnapshot {
        completed_exercises: Default::default(),
        week_start_date: current_week_start,
        streak,
        last_completed_week,
        notes: Default::default(),
        day_statuses: Default::default(),
        longest_streak,
        workout_history,
        ..merged
    };

    Reconciled {
        snapshot,
        archived: Some(entry),
    }
}

/// Summarize the week a snapshot belongs to
fn history_entry(snapshot: &ProgressSnapshot, plan: &Plan) -> WorkoutHistoryEntry {
    WorkoutHistoryEntry {
        week_start_date: snapshot.week_start_date,
        completed_days: progress::completed_days(snapshot, plan) as u32,
        completed_exercises: progress::completed_exercises(snapshot, plan) as u32,
        total_exercises: plan.total_exercises() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::get_default_catalog;
    use crate::{DayStatus, DifficultyLevel, SkipReason};
    use chrono::{Duration, NaiveDate};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn wednesday_noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 21)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn last_week_snapshot() -> ProgressSnapshot {
        let mut snap = ProgressSnapshot::fresh(monday() - Duration::days(7));
        snap.completed_exercises.insert("mon-w1".into(), true);
        snap.notes.insert("monday".into(), "tired".into());
        snap.day_statuses.insert(
            "sunday".into(),
            DayStatus {
                completed: false,
                skipped: true,
                skipped_reason: Some(SkipReason::Rest),
            },
        );
        snap.exercise_swaps.insert("mon-m1".into(), "Chair Squats".into());
        snap.achievements.insert("first_workout".into());
        snap.total_workouts_completed = 41;
        snap.streak = 2;
        snap.longest_streak = 5;
        snap
    }

    fn complete_week(snapshot: &mut ProgressSnapshot) {
        let plan = get_default_catalog().plan(snapshot.difficulty);
        for id in plan.exercise_ids() {
            snapshot.completed_exercises.insert(id.to_string(), true);
        }
    }

    #[test]
    fn test_current_week_is_unchanged() {
        let mut snap = last_week_snapshot();
        snap.week_start_date = monday();
        let reconciled = reconcile(snap.clone(), wednesday_noon(), get_default_catalog());
        assert!(!reconciled.rolled_over());
        assert_eq!(reconciled.snapshot, snap);
    }

    #[test]
    fn test_rollover_resets_weekly_fields_and_keeps_lifetime_fields() {
        let before = last_week_snapshot();
        let reconciled = reconcile(before.clone(), wednesday_noon(), get_default_catalog());
        let after = reconciled.snapshot;

        assert!(after.completed_exercises.is_empty());
        assert!(after.notes.is_empty());
        assert!(after.day_statuses.is_empty());
        assert_eq!(after.week_start_date, monday());
        assert_eq!(after.exercise_swaps, before.exercise_swaps);
        assert_eq!(after.achievements, before.achievements);
        assert_eq!(after.total_workouts_completed, 41);
    }

    #[test]
    fn test_incomplete_week_resets_streak() {
        let before = last_week_snapshot();
        let after = reconcile(before.clone(), wednesday_noon(), get_default_catalog()).snapshot;

        assert_eq!(after.streak, 0);
        assert_eq!(after.longest_streak, 5);
        assert_eq!(after.last_completed_week, before.last_completed_week);
    }

    #[test]
    fn test_complete_week_extends_streak() {
        let mut before = last_week_snapshot();
        before.longest_streak = 2;
        complete_week(&mut before);

        let reconciled = reconcile(before.clone(), wednesday_noon(), get_default_catalog());
        let after = reconciled.snapshot;
        assert_eq!(after.streak, 3);
        assert_eq!(after.longest_streak, 3);
        assert_eq!(after.last_completed_week, Some(before.week_start_date));

        let entry = reconciled.archived.unwrap();
        assert_eq!(entry.week_start_date, before.week_start_date);
        assert_eq!(entry.completed_days, 7);
        assert_eq!(entry.completed_exercises, 103);
        assert_eq!(entry.total_exercises, 103);
    }

    #[test]
    fn test_completion_is_judged_against_the_active_plan() {
        let mut before = last_week_snapshot();
        complete_week(&mut before);
        before.difficulty = DifficultyLevel::Intermediate;
        // beginner and intermediate share ids but not every id
        let plan = get_default_catalog().plan(DifficultyLevel::Intermediate);
        let all_done = plan.exercise_ids().all(|id| before.is_completed(id));

        let after = reconcile(before, wednesday_noon(), get_default_catalog()).snapshot;
        assert_eq!(after.streak > 0, all_done);
    }

    #[test]
    fn test_history_entry_counts_full_days_only() {
        let mut before = last_week_snapshot();
        let plan = get_default_catalog().plan(DifficultyLevel::Beginner);
        for exercise in &plan.day("tuesday").unwrap().exercises {
            before.completed_exercises.insert(exercise.id.clone(), true);
        }

        let entry = reconcile(before, wednesday_noon(), get_default_catalog())
            .archived
            .unwrap();
        assert_eq!(entry.completed_days, 1);
        assert_eq!(entry.completed_exercises, 16);
        assert_eq!(entry.total_exercises, 103);
    }

    #[test]
    fn test_history_is_capped_at_twelve() {
        let catalog = get_default_catalog();
        let mut snap = ProgressSnapshot::fresh(monday() - Duration::days(7 * 13));
        let mut now = wednesday_noon() - Duration::days(7 * 12);
        let mut first_archived = Vec::new();

        for _ in 0..13 {
            let reconciled = reconcile(snap, now, catalog);
            first_archived.push(reconciled.archived.clone().unwrap().week_start_date);
            snap = reconciled.snapshot;
            now += Duration::days(7);
        }

        assert_eq!(snap.workout_history.len(), HISTORY_LIMIT);
        assert_eq!(snap.workout_history[0].week_start_date, first_archived[1]);
        assert_eq!(
            snap.workout_history.last().unwrap().week_start_date,
            first_archived[12]
        );
    }

    #[test]
    fn test_merge_backfills_missing_and_null_fields() {
        let raw = r#"{
            "completedExercises": {"mon-w1": true},
            "weekStartDate": "2026-10-12",
            "streak": 3,
            "notes": null,
            "someFutureField": 1
        }"#;
        let defaults = ProgressSnapshot::fresh(monday());
        let merged = merge_over_defaults(raw, defaults).unwrap();

        assert!(merged.is_completed("mon-w1"));
        assert_eq!(merged.week_start_date, monday() - Duration::days(7));
        assert_eq!(merged.streak, 3);
        assert!(merged.notes.is_empty());
        assert!(merged.workout_history.is_empty());
        assert_eq!(merged.difficulty, DifficultyLevel::Beginner);
        assert!(merged.has_seen_onboarding);
    }

    #[test]
    fn test_merge_tolerates_unknown_difficulty() {
        let raw = r#"{"difficulty": "legendary"}"#;
        let merged = merge_over_defaults(raw, ProgressSnapshot::fresh(monday())).unwrap();
        assert_eq!(merged.difficulty, DifficultyLevel::Intermediate);
    }

    #[test]
    fn test_decode_garbage_yields_defaults() {
        let snap = decode_local(Some("{ invalid json }"), wednesday_noon());
        assert_eq!(snap, ProgressSnapshot::fresh(monday()));

        let snap = decode_local(Some("[1, 2, 3]"), wednesday_noon());
        assert_eq!(snap, ProgressSnapshot::fresh(monday()));

        let snap = decode_local(None, wednesday_noon());
        assert_eq!(snap.week_start_date, monday());
    }
}
