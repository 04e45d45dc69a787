//! Derived progress queries.
//!
//! Everything here is recomputed on demand from a snapshot and the active
//! plan; nothing is stored.

use crate::types::percentage;
use crate::{DayProgress, DayWorkout, Plan, ProgressSnapshot, WeekProgress};

/// Completion of one day of the active plan
///
/// Unknown day ids yield zeroed progress.
pub fn day_progress(snapshot: &ProgressSnapshot, plan: &Plan, day_id: &str) -> DayProgress {
    match plan.day(day_id) {
        Some(day) => progress_for_day(snapshot, day),
        None => DayProgress::default(),
    }
}

pub(crate) fn progress_for_day(snapshot: &ProgressSnapshot, day: &DayWorkout) -> DayProgress {
    let total = day.exercises.len();
    let completed = day
        .exercises
        .iter()
        .filter(|e| snapshot.is_completed(&e.id))
        .count();

    DayProgress {
        completed,
        total,
        percentage: percentage(completed, total),
    }
}

/// Whether every exercise of the day is completed
///
/// Days with no exercises are never complete.
pub fn is_day_completed(snapshot: &ProgressSnapshot, plan: &Plan, day_id: &str) -> bool {
    day_progress(snapshot, plan, day_id).percentage == 100
}

/// Number of days of the plan at 100%
pub fn completed_days(snapshot: &ProgressSnapshot, plan: &Plan) -> usize {
    plan.days
        .iter()
        .filter(|day| progress_for_day(snapshot, day).percentage == 100)
        .count()
}

/// Completion of the whole week: a day counts once it reaches 100%
pub fn week_progress(snapshot: &ProgressSnapshot, plan: &Plan) -> WeekProgress {
    const TOTAL_DAYS: usize = 7;
    let completed_days = completed_days(snapshot, plan);

    WeekProgress {
        completed_days,
        total_days: TOTAL_DAYS,
        percentage: percentage(completed_days, TOTAL_DAYS),
    }
}

/// Whether every exercise id of the plan is marked completed
pub fn is_week_complete(snapshot: &ProgressSnapshot, plan: &Plan) -> bool {
    plan.exercise_ids().all(|id| snapshot.is_completed(id))
}

/// Count of the plan's exercises marked completed
pub fn completed_exercises(snapshot: &ProgressSnapshot, plan: &Plan) -> usize {
    plan.exercise_ids()
        .filter(|id| snapshot.is_completed(id))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::get_default_catalog;
    use crate::{DayId, DifficultyLevel, Exercise, Section};
    use chrono::NaiveDate;

    fn snapshot() -> ProgressSnapshot {
        ProgressSnapshot::fresh(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn beginner() -> &'static Plan {
        get_default_catalog().plan(DifficultyLevel::Beginner)
    }

    fn complete_day(snapshot: &mut ProgressSnapshot, plan: &Plan, day_id: &str) {
        for exercise in &plan.day(day_id).unwrap().exercises {
            snapshot.completed_exercises.insert(exercise.id.clone(), true);
        }
    }

    #[test]
    fn test_full_day_is_one_hundred_percent() {
        let mut snap = snapshot();
        complete_day(&mut snap, beginner(), "monday");

        let progress = day_progress(&snap, beginner(), "monday");
        assert_eq!(
            progress,
            DayProgress {
                completed: 16,
                total: 16,
                percentage: 100
            }
        );
        assert!(is_day_completed(&snap, beginner(), "monday"));
    }

    #[test]
    fn test_partial_day_rounds() {
        let mut snap = snapshot();
        // 1 of 15 on Tuesday = 6.67% -> 7
        snap.completed_exercises.insert("tue-w1".into(), true);
        let progress = day_progress(&snap, beginner(), "tuesday");
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 15);
        assert_eq!(progress.percentage, 7);
    }

    #[test]
    fn test_false_entries_do_not_count() {
        let mut snap = snapshot();
        snap.completed_exercises.insert("mon-w1".into(), false);
        assert_eq!(day_progress(&snap, beginner(), "monday").completed, 0);
    }

    #[test]
    fn test_empty_day_has_zero_percentage() {
        let plan = Plan {
            difficulty: DifficultyLevel::Beginner,
            days: vec![DayWorkout {
                id: DayId::Monday,
                focus: "Nothing".into(),
                exercises: vec![],
            }],
        };
        let progress = day_progress(&snapshot(), &plan, "monday");
        assert_eq!(progress.total, 0);
        assert_eq!(progress.percentage, 0);
        assert!(!is_day_completed(&snapshot(), &plan, "monday"));
    }

    #[test]
    fn test_unknown_day_is_zeroed() {
        assert_eq!(
            day_progress(&snapshot(), beginner(), "caturday"),
            DayProgress::default()
        );
    }

    #[test]
    fn test_week_progress_counts_full_days() {
        let mut snap = snapshot();
        complete_day(&mut snap, beginner(), "monday");
        complete_day(&mut snap, beginner(), "wednesday");
        snap.completed_exercises.insert("fri-w1".into(), true);

        let week = week_progress(&snap, beginner());
        assert_eq!(week.completed_days, 2);
        assert_eq!(week.total_days, 7);
        assert_eq!(week.percentage, 29);
        assert!(!is_week_complete(&snap, beginner()));
        assert_eq!(completed_exercises(&snap, beginner()), 16 + 15 + 1);
    }

    #[test]
    fn test_whole_week() {
        let mut snap = snapshot();
        for day in DayId::ALL {
            complete_day(&mut snap, beginner(), day.as_str());
        }
        assert_eq!(week_progress(&snap, beginner()).percentage, 100);
        assert!(is_week_complete(&snap, beginner()));
    }

    #[test]
    fn test_progress_is_per_plan() {
        let plan = Plan {
            difficulty: DifficultyLevel::Hardcore,
            days: vec![DayWorkout {
                id: DayId::Monday,
                focus: "Test".into(),
                exercises: vec![Exercise {
                    id: "mon-m1".into(),
                    name: "Squats".into(),
                    reps: "1".into(),
                    section: Section::Main,
                }],
            }],
        };
        let mut snap = snapshot();
        snap.completed_exercises.insert("mon-m1".into(), true);
        assert!(is_day_completed(&snap, &plan, "monday"));
        assert!(!is_day_completed(&snap, beginner(), "monday"));
    }
}
