//! Progress engine: owns the in-memory snapshot for one user.
//!
//! The engine is the only writer of the snapshot. Every mutation:
//! 1. Transforms the snapshot synchronously
//! 2. Evaluates achievement rules against the result
//! 3. Writes the whole snapshot through to the local store
//! 4. Schedules a debounced remote write when a remote identity is set
//!
//! Storage failures never undo a mutation. Local write failures are logged;
//! remote failures surface only through [`SyncStatus`].

use crate::achievements::{self, AchievementId, AchievementInfo, ToggleEvent};
use crate::calendar::{monday_of, Clock, SystemClock};
use crate::catalog::get_default_catalog;
use crate::progress;
use crate::reconcile::{self, Reconciled};
use crate::store::{LocalStore, RemoteRecord, RemoteStore, PROGRESS_KEY};
use crate::sync::{RemoteSync, SyncSettings};
use crate::{
    Catalog, DayProgress, DayStatus, DifficultyLevel, Error, Plan, PlanInfo, ProgressSnapshot,
    Result, SkipReason, SyncStatus, WeekProgress, WorkoutHistoryEntry,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// A remote row store together with the user it belongs to
#[derive(Clone)]
pub struct RemoteIdentity {
    pub store: Arc<dyn RemoteStore>,
    pub user_id: Uuid,
}

/// Everything the engine needs from its surroundings
pub struct EngineContext {
    pub catalog: &'static Catalog,
    pub local: Arc<dyn LocalStore>,
    pub remote: Option<RemoteIdentity>,
    pub clock: Arc<dyn Clock>,
    pub sync: SyncSettings,
}

impl EngineContext {
    /// Local-only context with the built-in catalog and the system clock
    pub fn new(local: Arc<dyn LocalStore>) -> Self {
        Self {
            catalog: get_default_catalog(),
            local,
            remote: None,
            clock: Arc::new(SystemClock),
            sync: SyncSettings::default(),
        }
    }

    pub fn with_remote(mut self, store: Arc<dyn RemoteStore>, user_id: Uuid) -> Self {
        self.remote = Some(RemoteIdentity { store, user_id });
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_sync(mut self, sync: SyncSettings) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_catalog(mut self, catalog: &'static Catalog) -> Self {
        self.catalog = catalog;
        self
    }
}

/// Result of a mutation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Achievements the mutation unlocked, in evaluation order
    pub newly_unlocked: Vec<AchievementId>,
}

impl Outcome {
    fn unlocked(newly_unlocked: Vec<AchievementId>) -> Self {
        Self { newly_unlocked }
    }

    pub fn is_empty(&self) -> bool {
        self.newly_unlocked.is_empty()
    }

    pub fn contains(&self, id: AchievementId) -> bool {
        self.newly_unlocked.contains(&id)
    }
}

/// What the most recent load found
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Summary of the stale week, when the load rolled over
    pub archived: Option<WorkoutHistoryEntry>,
    pub newly_unlocked: Vec<AchievementId>,
}

pub struct ProgressEngine {
    catalog: &'static Catalog,
    local: Arc<dyn LocalStore>,
    identity: Option<RemoteIdentity>,
    clock: Arc<dyn Clock>,
    settings: SyncSettings,
    status: Arc<watch::Sender<SyncStatus>>,
    sync: Option<RemoteSync>,
    snapshot: ProgressSnapshot,
    loaded: bool,
    last_load: LoadReport,
}

impl ProgressEngine {
    /// Engine holding defaults for the current week; nothing is read or
    /// persisted until [`ProgressEngine::reload`] runs
    pub fn new(ctx: EngineContext) -> Self {
        let initial_status = if ctx.remote.is_some() {
            SyncStatus::Idle
        } else {
            SyncStatus::Offline
        };
        let (status, _) = watch::channel(initial_status);
        let snapshot = ProgressSnapshot::fresh(monday_of(ctx.clock.now()));

        Self {
            catalog: ctx.catalog,
            local: ctx.local,
            identity: ctx.remote,
            clock: ctx.clock,
            settings: ctx.sync,
            status: Arc::new(status),
            sync: None,
            snapshot,
            loaded: false,
            last_load: LoadReport::default(),
        }
    }

    /// Build an engine and load the current week's progress
    pub async fn load(ctx: EngineContext) -> Self {
        let mut engine = Self::new(ctx);
        engine.reload().await;
        engine
    }

    /// Read both stores and reconcile against the current week
    ///
    /// Local-only fields always come from the local record. When a remote
    /// row exists its shared fields win; when it doesn't, the local copy is
    /// pushed as the initial row. A rollover is archived and persisted.
    pub async fn reload(&mut self) -> LoadReport {
        if let Some(sync) = self.sync.as_mut() {
            if let Err(e) = sync.flush().await {
                tracing::warn!("Failed to flush pending write before reload: {}", e);
            }
        }

        let now = self.clock.now();
        let raw = match self.local.get(PROGRESS_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read local progress: {}. Using defaults.", e);
                None
            }
        };
        let mut merged = reconcile::decode_local(raw.as_deref(), now);

        if let Some(identity) = self.identity.clone() {
            if self.sync.is_none() {
                self.sync = Some(RemoteSync::new(
                    Arc::clone(&identity.store),
                    identity.user_id,
                    self.settings,
                    Arc::clone(&self.status),
                ));
            }
            self.merge_remote(&identity, &mut merged).await;
        }

        let Reconciled { mut snapshot, archived } = reconcile::reconcile(merged, now, self.catalog);
        let newly_unlocked = if archived.is_some() {
            achievements::after_rollover(&mut snapshot)
        } else {
            Vec::new()
        };

        self.snapshot = snapshot;
        self.loaded = true;
        self.save_local();
        if archived.is_some() || !newly_unlocked.is_empty() {
            self.schedule_remote();
        }

        tracing::info!(
            "Loaded progress for week of {} ({} plan, streak {})",
            self.snapshot.week_start_date,
            self.snapshot.difficulty,
            self.snapshot.streak
        );

        self.last_load = LoadReport {
            archived,
            newly_unlocked,
        };
        self.last_load.clone()
    }

    async fn merge_remote(&self, identity: &RemoteIdentity, merged: &mut ProgressSnapshot) {
        match identity.store.fetch(identity.user_id).await {
            Ok(Some(row)) => {
                tracing::debug!("Applying remote progress for {}", identity.user_id);
                row.apply_to(merged);
            }
            Ok(None) => {
                tracing::info!(
                    "No remote progress for {}, uploading local copy",
                    identity.user_id
                );
                let record = RemoteRecord::from_snapshot(identity.user_id, merged);
                if let Err(e) = identity.store.insert(&record).await {
                    tracing::warn!("Failed to create remote progress row: {}", e);
                    self.status.send_replace(SyncStatus::Error);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to fetch remote progress: {}. Staying local.", e);
                self.status.send_replace(SyncStatus::Error);
            }
        }
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Persist after a mutation; before the first load nothing is written
    fn commit(&mut self) {
        if !self.loaded {
            tracing::debug!("Mutation before load, not persisting");
            return;
        }
        self.save_local();
        self.schedule_remote();
    }

    fn save_local(&self) {
        let json = match serde_json::to_string(&self.snapshot) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize progress: {}", e);
                return;
            }
        };
        if let Err(e) = self.local.set(PROGRESS_KEY, &json) {
            tracing::warn!("Failed to save local progress: {}", e);
        }
    }

    fn schedule_remote(&mut self) {
        if let Some(sync) = self.sync.as_mut() {
            let record = RemoteRecord::from_snapshot(sync.user_id(), &self.snapshot);
            sync.schedule(record);
        }
    }

    /// Send any pending remote write now
    pub async fn flush(&mut self) -> Result<()> {
        match self.sync.as_mut() {
            Some(sync) => sync.flush().await,
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Flip an exercise between done and not done
    pub fn toggle_exercise(&mut self, exercise_id: &str) -> Outcome {
        let catalog = self.catalog;
        let plan = catalog.plan(self.snapshot.difficulty);
        if plan.find_exercise(exercise_id).is_none() {
            tracing::debug!("Toggling {} which is not in the active plan", exercise_id);
        }

        let week_percentage_before = progress::week_progress(&self.snapshot, plan).percentage;
        let completed = !self.snapshot.is_completed(exercise_id);
        self.snapshot
            .completed_exercises
            .insert(exercise_id.to_string(), completed);

        if completed {
            self.snapshot.total_workouts_completed += 1;
        } else {
            let floor = self.snapshot.completed_count() as i64;
            let decremented = self.snapshot.total_workouts_completed - 1;
            if decremented < floor {
                tracing::warn!(
                    "Lifetime total {} would drop below {} completed entries, clamping",
                    decremented,
                    floor
                );
            }
            self.snapshot.total_workouts_completed = decremented.max(floor);
        }

        let event = ToggleEvent {
            completed,
            hour: self.clock.hour(),
            week_percentage_before,
        };
        let unlocked = achievements::after_toggle(&mut self.snapshot, plan, &event);
        self.commit();
        Outcome::unlocked(unlocked)
    }

    /// Overwrite the note for a day
    pub fn set_day_note(&mut self, day_id: &str, text: &str) -> Outcome {
        self.snapshot
            .notes
            .insert(day_id.to_string(), text.to_string());
        let unlocked = achievements::after_note(&mut self.snapshot, text);
        self.commit();
        Outcome::unlocked(unlocked)
    }

    /// Mark a day skipped; completed exercises are left alone
    pub fn skip_day(&mut self, day_id: &str, reason: SkipReason) -> Outcome {
        self.snapshot.day_statuses.insert(
            day_id.to_string(),
            DayStatus {
                completed: false,
                skipped: true,
                skipped_reason: Some(reason),
            },
        );
        self.commit();
        Outcome::default()
    }

    /// Substitute an exercise by name; an empty name restores the default
    pub fn swap_exercise(&mut self, exercise_id: &str, alternative: &str) -> Outcome {
        if alternative.is_empty() {
            self.snapshot.exercise_swaps.remove(exercise_id);
        } else {
            self.snapshot
                .exercise_swaps
                .insert(exercise_id.to_string(), alternative.to_string());
        }
        self.commit();
        Outcome::default()
    }

    /// Switch plans, clearing the week's progress and all swaps
    ///
    /// Selecting the plan already active changes nothing.
    pub fn set_difficulty(&mut self, difficulty: DifficultyLevel) -> Outcome {
        if self.snapshot.difficulty == difficulty {
            return Outcome::default();
        }

        tracing::info!(
            "Switching plan {} -> {}",
            self.snapshot.difficulty,
            difficulty
        );
        self.snapshot.difficulty = difficulty;
        self.snapshot.completed_exercises.clear();
        self.snapshot.notes.clear();
        self.snapshot.day_statuses.clear();
        self.snapshot.exercise_swaps.clear();
        self.commit();
        Outcome::default()
    }

    /// Insert an achievement id; ids this build doesn't know are kept as-is
    pub fn unlock_achievement(&mut self, id: &str) -> Outcome {
        if self.snapshot.has_achievement(id) {
            return Outcome::default();
        }

        self.snapshot.achievements.insert(id.to_string());
        let newly_unlocked = match id.parse::<AchievementId>() {
            Ok(known) => vec![known],
            Err(_) => {
                tracing::debug!("Stored unrecognized achievement {}", id);
                Vec::new()
            }
        };
        self.commit();
        Outcome::unlocked(newly_unlocked)
    }

    /// Set the daily reminder as `HH:MM`, or clear it with `None`
    pub fn set_reminder_time(&mut self, time: Option<&str>) -> Result<Outcome> {
        if let Some(time) = time {
            validate_reminder_time(time)?;
        }
        self.snapshot.reminder_time = time.map(str::to_string);
        self.commit();
        Ok(Outcome::default())
    }

    pub fn set_accent_color(&mut self, color: Option<&str>) -> Outcome {
        self.snapshot.accent_color = color.map(str::to_string);
        self.commit();
        Outcome::default()
    }

    pub fn mark_onboarding_complete(&mut self) -> Outcome {
        self.snapshot.has_seen_onboarding = true;
        self.commit();
        Outcome::default()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn day_progress(&self, day_id: &str) -> DayProgress {
        progress::day_progress(&self.snapshot, self.current_plan(), day_id)
    }

    pub fn week_progress(&self) -> WeekProgress {
        progress::week_progress(&self.snapshot, self.current_plan())
    }

    pub fn is_day_completed(&self, day_id: &str) -> bool {
        progress::is_day_completed(&self.snapshot, self.current_plan(), day_id)
    }

    pub fn is_exercise_completed(&self, exercise_id: &str) -> bool {
        self.snapshot.is_completed(exercise_id)
    }

    /// Share text for the current week
    pub fn week_summary(&self) -> String {
        let week = self.week_progress();
        format!(
            "🏋️ MOVE Workout Progress\n📊 This Week: {}/{} days completed\n🔥 Current Streak: {} weeks",
            week.completed_days, week.total_days, self.snapshot.streak
        )
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn sync_status(&self) -> SyncStatus {
        *self.status.borrow()
    }

    pub fn subscribe_sync(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    pub fn last_load(&self) -> &LoadReport {
        &self.last_load
    }

    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn now(&self) -> chrono::NaiveDateTime {
        self.clock.now()
    }

    pub fn difficulty(&self) -> DifficultyLevel {
        self.snapshot.difficulty
    }

    pub fn current_plan(&self) -> &'static Plan {
        self.catalog.plan(self.snapshot.difficulty)
    }

    pub fn plan_info(&self) -> Option<&'static PlanInfo> {
        self.catalog.plan_info(self.snapshot.difficulty)
    }

    pub fn streak(&self) -> u32 {
        self.snapshot.streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.snapshot.longest_streak
    }

    pub fn total_workouts_completed(&self) -> i64 {
        self.snapshot.total_workouts_completed
    }

    pub fn workout_history(&self) -> &[WorkoutHistoryEntry] {
        &self.snapshot.workout_history
    }

    pub fn achievements(&self) -> &BTreeSet<String> {
        &self.snapshot.achievements
    }

    /// Metadata for every unlocked achievement this build knows about
    pub fn unlocked_achievements(&self) -> Vec<AchievementInfo> {
        AchievementId::ALL
            .iter()
            .filter(|id| self.snapshot.has_achievement(id.as_str()))
            .map(|id| id.info())
            .collect()
    }

    pub fn reminder_time(&self) -> Option<&str> {
        self.snapshot.reminder_time.as_deref()
    }

    pub fn accent_color(&self) -> Option<&str> {
        self.snapshot.accent_color.as_deref()
    }

    pub fn has_seen_onboarding(&self) -> bool {
        self.snapshot.has_seen_onboarding
    }

    /// Note for a day, empty when none was saved
    pub fn day_note(&self, day_id: &str) -> &str {
        self.snapshot
            .notes
            .get(day_id)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn day_status(&self, day_id: &str) -> Option<&DayStatus> {
        self.snapshot.day_statuses.get(day_id)
    }

    pub fn exercise_swap(&self, exercise_id: &str) -> Option<&str> {
        self.snapshot
            .exercise_swaps
            .get(exercise_id)
            .map(String::as_str)
    }

    /// Name to show for an exercise: the swap if set, else the plan's name
    pub fn exercise_display_name(&self, exercise_id: &str) -> Option<&str> {
        self.exercise_swap(exercise_id).or_else(|| {
            self.current_plan()
                .find_exercise(exercise_id)
                .map(|e| e.name.as_str())
        })
    }
}

/// Accepts `HH:MM` with hours 00-23 and minutes 00-59
fn validate_reminder_time(time: &str) -> Result<()> {
    let invalid = || Error::State(format!("Invalid reminder time '{}', expected HH:MM", time));

    let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(())
}
