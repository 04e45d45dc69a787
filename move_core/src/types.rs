//! Core domain types for the Move workout tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Plans, days, and exercises (static catalog data)
//! - The progress snapshot and its per-day/per-week records
//! - Derived progress views and sync status

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Plan Types
// ============================================================================

/// Section of a day's workout an exercise belongs to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Warmup,
    Main,
    Core,
    Cooldown,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Warmup => "warmup",
            Section::Main => "main",
            Section::Core => "core",
            Section::Cooldown => "cooldown",
        }
    }
}

/// One of the seven weekday tags a plan day is keyed by
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DayId {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayId {
    /// All days in plan order (the week starts on Monday)
    pub const ALL: [DayId; 7] = [
        DayId::Monday,
        DayId::Tuesday,
        DayId::Wednesday,
        DayId::Thursday,
        DayId::Friday,
        DayId::Saturday,
        DayId::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayId::Monday => "monday",
            DayId::Tuesday => "tuesday",
            DayId::Wednesday => "wednesday",
            DayId::Thursday => "thursday",
            DayId::Friday => "friday",
            DayId::Saturday => "saturday",
            DayId::Sunday => "sunday",
        }
    }

    /// Capitalized day name for display
    pub fn day_name(&self) -> &'static str {
        match self {
            DayId::Monday => "Monday",
            DayId::Tuesday => "Tuesday",
            DayId::Wednesday => "Wednesday",
            DayId::Thursday => "Thursday",
            DayId::Friday => "Friday",
            DayId::Saturday => "Saturday",
            DayId::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayId {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayId::Monday,
            Weekday::Tue => DayId::Tuesday,
            Weekday::Wed => DayId::Wednesday,
            Weekday::Thu => DayId::Thursday,
            Weekday::Fri => DayId::Friday,
            Weekday::Sat => DayId::Saturday,
            Weekday::Sun => DayId::Sunday,
        }
    }
}

impl FromStr for DayId {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let wanted = s.trim().to_lowercase();
        DayId::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| crate::Error::Other(format!("Unknown day: {}", s)))
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single exercise within a plan day
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique within the whole plan (e.g. `mon-m1`)
    pub id: String,
    pub name: String,
    /// Human-readable rep/time description
    pub reps: String,
    pub section: Section,
}

/// One day of a weekly plan
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DayWorkout {
    pub id: DayId,
    pub focus: String,
    pub exercises: Vec<Exercise>,
}

impl DayWorkout {
    pub fn day_name(&self) -> &'static str {
        self.id.day_name()
    }
}

/// Difficulty level tag identifying a plan
///
/// Deserializing an unrecognized tag yields the fallback plan rather than
/// failing the whole snapshot.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum DifficultyLevel {
    #[default]
    Beginner,
    Intermediate,
    Hardcore,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Beginner,
        DifficultyLevel::Intermediate,
        DifficultyLevel::Hardcore,
    ];

    /// Plan used when a stored or requested id is not recognized
    pub const FALLBACK: DifficultyLevel = DifficultyLevel::Intermediate;

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "beginner",
            DifficultyLevel::Intermediate => "intermediate",
            DifficultyLevel::Hardcore => "hardcore",
        }
    }

    /// Parse a plan id, falling back to [`DifficultyLevel::FALLBACK`]
    pub fn parse_or_fallback(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "beginner" => DifficultyLevel::Beginner,
            "intermediate" => DifficultyLevel::Intermediate,
            "hardcore" => DifficultyLevel::Hardcore,
            other => {
                tracing::warn!(
                    "Unknown difficulty '{}', falling back to {}",
                    other,
                    Self::FALLBACK
                );
                Self::FALLBACK
            }
        }
    }
}

impl From<String> for DifficultyLevel {
    fn from(s: String) -> Self {
        DifficultyLevel::parse_or_fallback(&s)
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata for a plan
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanInfo {
    pub id: DifficultyLevel,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub level: String,
    pub icon: String,
    /// False for plans that are announced but not yet written
    pub available: bool,
}

/// A complete weekly plan: seven days, Monday first
#[derive(Clone, Debug)]
pub struct Plan {
    pub difficulty: DifficultyLevel,
    pub days: Vec<DayWorkout>,
}

impl Plan {
    /// Look up a day by its tag; unknown tags return `None`
    pub fn day(&self, day_id: &str) -> Option<&DayWorkout> {
        self.days.iter().find(|d| d.id.as_str() == day_id)
    }

    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.days.iter().flat_map(|d| d.exercises.iter())
    }

    pub fn exercise_ids(&self) -> impl Iterator<Item = &str> {
        self.exercises().map(|e| e.id.as_str())
    }

    pub fn find_exercise(&self, exercise_id: &str) -> Option<&Exercise> {
        self.exercises().find(|e| e.id == exercise_id)
    }

    pub fn total_exercises(&self) -> usize {
        self.days.iter().map(|d| d.exercises.len()).sum()
    }
}

/// The complete catalog of plans and their metadata
#[derive(Clone, Debug)]
pub struct Catalog {
    pub plans: HashMap<DifficultyLevel, Plan>,
    pub info: HashMap<DifficultyLevel, PlanInfo>,
}

// ============================================================================
// Progress Types
// ============================================================================

/// Why a day was skipped
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SkipReason {
    Rest,
    Missed,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Rest => "rest",
            SkipReason::Missed => "missed",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkipReason {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "rest" => Ok(SkipReason::Rest),
            "missed" => Ok(SkipReason::Missed),
            other => Err(crate::Error::Other(format!("Unknown skip reason: {}", other))),
        }
    }
}

/// Per-day status for the current week
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayStatus {
    pub completed: bool,
    pub skipped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped_reason: Option<SkipReason>,
}

/// Archived summary of one rolled-over week
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutHistoryEntry {
    pub week_start_date: NaiveDate,
    pub completed_days: u32,
    pub completed_exercises: u32,
    pub total_exercises: u32,
}

impl WorkoutHistoryEntry {
    /// Whether every exercise of the week's plan was completed
    pub fn is_complete(&self) -> bool {
        self.total_exercises > 0 && self.completed_exercises >= self.total_exercises
    }

    pub fn percentage(&self) -> u8 {
        percentage(self.completed_exercises as usize, self.total_exercises as usize)
    }
}

/// One user's progress for the current week plus cross-week aggregates
///
/// Serialized wholesale as the local persistence record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub completed_exercises: BTreeMap<String, bool>,
    /// Monday of the week `completed_exercises` belongs to
    pub week_start_date: NaiveDate,
    pub streak: u32,
    pub last_completed_week: Option<NaiveDate>,
    pub notes: BTreeMap<String, String>,
    pub day_statuses: BTreeMap<String, DayStatus>,
    /// Exercise id -> substituted exercise name; survives rollover
    pub exercise_swaps: BTreeMap<String, String>,
    pub total_workouts_completed: i64,
    pub longest_streak: u32,
    pub workout_history: Vec<WorkoutHistoryEntry>,
    pub achievements: BTreeSet<String>,
    pub reminder_time: Option<String>,
    pub accent_color: Option<String>,
    pub has_seen_onboarding: bool,
    pub difficulty: DifficultyLevel,
}

impl ProgressSnapshot {
    /// Default snapshot for the week starting at `week_start_date`
    pub fn fresh(week_start_date: NaiveDate) -> Self {
        Self {
            completed_exercises: BTreeMap::new(),
            week_start_date,
            streak: 0,
            last_completed_week: None,
            notes: BTreeMap::new(),
            day_statuses: BTreeMap::new(),
            exercise_swaps: BTreeMap::new(),
            total_workouts_completed: 0,
            longest_streak: 0,
            workout_history: Vec::new(),
            achievements: BTreeSet::new(),
            reminder_time: None,
            accent_color: None,
            // The app loads straight into the plan unless a frontend opts in
            has_seen_onboarding: true,
            difficulty: DifficultyLevel::default(),
        }
    }

    pub fn is_completed(&self, exercise_id: &str) -> bool {
        self.completed_exercises.get(exercise_id) == Some(&true)
    }

    /// Number of entries currently marked completed
    pub fn completed_count(&self) -> usize {
        self.completed_exercises.values().filter(|done| **done).count()
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.contains(id)
    }
}

// ============================================================================
// Derived Views
// ============================================================================

/// Completion of a single day
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Default)]
pub struct DayProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

/// Completion of the whole week
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct WeekProgress {
    pub completed_days: usize,
    pub total_days: usize,
    pub percentage: u8,
}

/// Remote synchronization indicator
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Idle,
    Syncing,
    Synced,
    Error,
    /// No remote identity; the engine is local-only
    Offline,
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncStatus::Idle => "idle",
            SyncStatus::Syncing => "syncing",
            SyncStatus::Synced => "synced",
            SyncStatus::Error => "error",
            SyncStatus::Offline => "offline",
        };
        f.write_str(s)
    }
}

/// `round(100 * part / total)`, or 0 for an empty total
pub fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u8
}
