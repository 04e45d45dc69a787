//! Achievement catalog and unlock rules.
//!
//! Unlocks are evaluated synchronously by the engine against the state a
//! mutation produces. Each rule returns only the ids that were not already
//! held, so the engine can report what a mutation newly unlocked.

use crate::progress;
use crate::{Plan, ProgressSnapshot};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Hour before which a completion counts as early
const EARLY_BIRD_BEFORE_HOUR: u32 = 8;
/// Hour from which a completion counts as late
const NIGHT_OWL_FROM_HOUR: u32 = 21;
/// Fully completed weeks needed for `consistency_king`
const CONSISTENCY_WEEKS: usize = 4;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstWorkout,
    FirstDay,
    FirstWeek,
    ThreeDayStreak,
    SevenDayStreak,
    EarlyBird,
    NightOwl,
    ConsistencyKing,
    HalfwayHero,
    PerfectWeek,
    ComebackKid,
    NoteTaker,
}

impl AchievementId {
    pub const ALL: [AchievementId; 12] = [
        AchievementId::FirstWorkout,
        AchievementId::FirstDay,
        AchievementId::FirstWeek,
        AchievementId::ThreeDayStreak,
        AchievementId::SevenDayStreak,
        AchievementId::EarlyBird,
        AchievementId::NightOwl,
        AchievementId::ConsistencyKing,
        AchievementId::HalfwayHero,
        AchievementId::PerfectWeek,
        AchievementId::ComebackKid,
        AchievementId::NoteTaker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstWorkout => "first_workout",
            AchievementId::FirstDay => "first_day",
            AchievementId::FirstWeek => "first_week",
            AchievementId::ThreeDayStreak => "three_day_streak",
            AchievementId::SevenDayStreak => "seven_day_streak",
            AchievementId::EarlyBird => "early_bird",
            AchievementId::NightOwl => "night_owl",
            AchievementId::ConsistencyKing => "consistency_king",
            AchievementId::HalfwayHero => "halfway_hero",
            AchievementId::PerfectWeek => "perfect_week",
            AchievementId::ComebackKid => "comeback_kid",
            AchievementId::NoteTaker => "note_taker",
        }
    }

    pub fn info(&self) -> AchievementInfo {
        let (name, description, icon) = match self {
            AchievementId::FirstWorkout => ("First Steps", "Complete your first workout", "🎯"),
            AchievementId::FirstDay => ("Day One", "Complete all exercises in a day", "✅"),
            AchievementId::FirstWeek => ("Week Warrior", "Complete a full week of workouts", "🏆"),
            AchievementId::ThreeDayStreak => ("On a Roll", "Complete 3 consecutive days", "🔥"),
            AchievementId::SevenDayStreak => ("Unstoppable", "Maintain a 7-day streak", "⚡"),
            AchievementId::EarlyBird => ("Early Bird", "Complete a workout before 8 AM", "🌅"),
            AchievementId::NightOwl => ("Night Owl", "Complete a workout after 9 PM", "🦉"),
            AchievementId::ConsistencyKing => {
                ("Consistency King", "Complete 4 weeks total", "👑")
            }
            AchievementId::HalfwayHero => ("Halfway Hero", "Complete 50% of a week", "🌟"),
            AchievementId::PerfectWeek => {
                ("Perfect Week", "Complete every single exercise in a week", "💎")
            }
            AchievementId::ComebackKid => ("Comeback Kid", "Return after skipping a week", "💪"),
            AchievementId::NoteTaker => ("Reflective", "Add your first workout note", "📝"),
        };

        AchievementInfo {
            id: *self,
            name,
            description,
            icon,
        }
    }
}

impl FromStr for AchievementId {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        AchievementId::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| crate::Error::Other(format!("Unknown achievement: {}", s)))
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata for an achievement
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AchievementInfo {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Metadata for a stored achievement id; `None` for ids this build doesn't know
pub fn achievement_info(id: &str) -> Option<AchievementInfo> {
    id.parse::<AchievementId>().ok().map(|a| a.info())
}

/// Insert `id` if missing, recording it in `unlocked`
pub(crate) fn grant(
    snapshot: &mut ProgressSnapshot,
    id: AchievementId,
    unlocked: &mut Vec<AchievementId>,
) {
    if snapshot.achievements.insert(id.as_str().to_string()) {
        tracing::info!("Achievement unlocked: {}", id);
        unlocked.push(id);
    }
}

/// Context of a single exercise toggle, captured before and after the flip
pub(crate) struct ToggleEvent {
    /// True when the exercise went from not-done to done
    pub completed: bool,
    /// Local hour of day at call time
    pub hour: u32,
    /// Week percentage before the flip
    pub week_percentage_before: u8,
}

/// Rules evaluated after an exercise toggle
pub(crate) fn after_toggle(
    snapshot: &mut ProgressSnapshot,
    plan: &Plan,
    event: &ToggleEvent,
) -> Vec<AchievementId> {
    let mut unlocked = Vec::new();

    if event.completed {
        grant(snapshot, AchievementId::FirstWorkout, &mut unlocked);

        if event.hour < EARLY_BIRD_BEFORE_HOUR {
            grant(snapshot, AchievementId::EarlyBird, &mut unlocked);
        }
        if event.hour >= NIGHT_OWL_FROM_HOUR {
            grant(snapshot, AchievementId::NightOwl, &mut unlocked);
        }

        let skipped_last_week = snapshot
            .workout_history
            .last()
            .is_some_and(|entry| entry.completed_exercises == 0);
        if skipped_last_week {
            grant(snapshot, AchievementId::ComebackKid, &mut unlocked);
        }
    }

    let completed_days = progress::completed_days(snapshot, plan);
    if completed_days >= 1 {
        grant(snapshot, AchievementId::FirstDay, &mut unlocked);
    }
    if completed_days >= 3 {
        grant(snapshot, AchievementId::ThreeDayStreak, &mut unlocked);
    }
    if completed_days >= 4 {
        grant(snapshot, AchievementId::HalfwayHero, &mut unlocked);
    }
    if completed_days >= 7 {
        grant(snapshot, AchievementId::SevenDayStreak, &mut unlocked);
    }

    let week_percentage = progress::week_progress(snapshot, plan).percentage;
    if week_percentage == 100 && event.week_percentage_before < 100 {
        grant(snapshot, AchievementId::FirstWeek, &mut unlocked);
        grant(snapshot, AchievementId::PerfectWeek, &mut unlocked);
    }

    unlocked
}

/// Rules evaluated after a note is saved
pub(crate) fn after_note(snapshot: &mut ProgressSnapshot, note: &str) -> Vec<AchievementId> {
    let mut unlocked = Vec::new();
    if !note.is_empty() {
        grant(snapshot, AchievementId::NoteTaker, &mut unlocked);
    }
    unlocked
}

/// Rules evaluated after a week rollover archived history
pub(crate) fn after_rollover(snapshot: &mut ProgressSnapshot) -> Vec<AchievementId> {
    let mut unlocked = Vec::new();
    let complete_weeks = snapshot
        .workout_history
        .iter()
        .filter(|entry| entry.is_complete())
        .count();
    if complete_weeks >= CONSISTENCY_WEEKS {
        grant(snapshot, AchievementId::ConsistencyKing, &mut unlocked);
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::get_default_catalog;
    use crate::{DifficultyLevel, WorkoutHistoryEntry};
    use chrono::{Duration, NaiveDate};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn beginner() -> &'static Plan {
        get_default_catalog().plan(DifficultyLevel::Beginner)
    }

    fn toggle(hour: u32) -> ToggleEvent {
        ToggleEvent {
            completed: true,
            hour,
            week_percentage_before: 0,
        }
    }

    #[test]
    fn test_ids_round_trip_through_strings() {
        for id in AchievementId::ALL {
            assert_eq!(id.as_str().parse::<AchievementId>().unwrap(), id);
        }
        assert!(achievement_info("made_up").is_none());
        assert_eq!(achievement_info("note_taker").unwrap().name, "Reflective");
    }

    #[test]
    fn test_morning_completion() {
        let mut snap = ProgressSnapshot::fresh(monday());
        snap.completed_exercises.insert("mon-w1".into(), true);

        let unlocked = after_toggle(&mut snap, beginner(), &toggle(7));
        assert_eq!(
            unlocked,
            vec![AchievementId::FirstWorkout, AchievementId::EarlyBird]
        );
        assert!(!snap.has_achievement("night_owl"));
    }

    #[test]
    fn test_late_completion() {
        let mut snap = ProgressSnapshot::fresh(monday());
        snap.completed_exercises.insert("mon-w1".into(), true);

        let unlocked = after_toggle(&mut snap, beginner(), &toggle(21));
        assert!(unlocked.contains(&AchievementId::NightOwl));
        assert!(!unlocked.contains(&AchievementId::EarlyBird));
    }

    #[test]
    fn test_already_held_is_not_reported() {
        let mut snap = ProgressSnapshot::fresh(monday());
        snap.achievements.insert("first_workout".into());
        snap.completed_exercises.insert("mon-w1".into(), true);

        let unlocked = after_toggle(&mut snap, beginner(), &toggle(12));
        assert!(unlocked.is_empty());
    }

    #[test]
    fn test_untoggle_unlocks_nothing_time_based() {
        let mut snap = ProgressSnapshot::fresh(monday());
        let event = ToggleEvent {
            completed: false,
            hour: 6,
            week_percentage_before: 0,
        };
        assert!(after_toggle(&mut snap, beginner(), &event).is_empty());
    }

    #[test]
    fn test_day_count_thresholds() {
        let mut snap = ProgressSnapshot::fresh(monday());
        for day in &beginner().days[..4] {
            for exercise in &day.exercises {
                snap.completed_exercises.insert(exercise.id.clone(), true);
            }
        }
        snap.achievements.insert("first_workout".into());

        let unlocked = after_toggle(&mut snap, beginner(), &toggle(12));
        assert_eq!(
            unlocked,
            vec![
                AchievementId::FirstDay,
                AchievementId::ThreeDayStreak,
                AchievementId::HalfwayHero
            ]
        );
    }

    #[test]
    fn test_week_completion_unlocks_week_badges() {
        let mut snap = ProgressSnapshot::fresh(monday());
        for id in beginner().exercise_ids() {
            snap.completed_exercises.insert(id.to_string(), true);
        }
        let event = ToggleEvent {
            completed: true,
            hour: 12,
            week_percentage_before: 86,
        };

        let unlocked = after_toggle(&mut snap, beginner(), &event);
        assert!(unlocked.contains(&AchievementId::SevenDayStreak));
        assert!(unlocked.contains(&AchievementId::FirstWeek));
        assert!(unlocked.contains(&AchievementId::PerfectWeek));
    }

    #[test]
    fn test_comeback_after_empty_week() {
        let mut snap = ProgressSnapshot::fresh(monday());
        snap.workout_history.push(WorkoutHistoryEntry {
            week_start_date: monday() - Duration::days(7),
            completed_days: 0,
            completed_exercises: 0,
            total_exercises: 103,
        });
        snap.completed_exercises.insert("mon-w1".into(), true);

        let unlocked = after_toggle(&mut snap, beginner(), &toggle(12));
        assert!(unlocked.contains(&AchievementId::ComebackKid));
    }

    #[test]
    fn test_note_taker_needs_text() {
        let mut snap = ProgressSnapshot::fresh(monday());
        assert!(after_note(&mut snap, "").is_empty());
        assert_eq!(after_note(&mut snap, "felt good"), vec![AchievementId::NoteTaker]);
        assert!(after_note(&mut snap, "again").is_empty());
    }

    #[test]
    fn test_consistency_after_four_complete_weeks() {
        let mut snap = ProgressSnapshot::fresh(monday());
        for week in 1..=4 {
            snap.workout_history.push(WorkoutHistoryEntry {
                week_start_date: monday() - Duration::days(7 * week),
                completed_days: 7,
                completed_exercises: 103,
                total_exercises: 103,
            });
        }
        assert_eq!(after_rollover(&mut snap), vec![AchievementId::ConsistencyKing]);
    }
}
