use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use move_core::*;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "move")]
#[command(about = "Weekly workout plan and progress tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretend the local time is this (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(long, global = true, value_parser = parse_now)]
    now: Option<NaiveDateTime>,

    /// Ignore any configured remote store
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a day's workout (default: today)
    Show {
        /// Day to show (monday..sunday)
        day: Option<DayId>,
    },

    /// Show progress for every day of the week
    Week,

    /// Mark an exercise done, or undo it
    Toggle {
        /// Exercise id, e.g. mon-w1
        exercise_id: String,
    },

    /// Save a note for a day
    Note { day: DayId, text: String },

    /// Mark a day as skipped
    Skip {
        day: DayId,

        /// Why the day was skipped (rest, missed)
        #[arg(long, default_value = "rest")]
        reason: SkipReason,
    },

    /// Swap an exercise for an alternative, or list the alternatives
    Swap {
        exercise_id: String,

        /// Alternative name; omit to list the choices
        name: Option<String>,

        /// Restore the plan's exercise
        #[arg(long, conflicts_with = "name")]
        reset: bool,
    },

    /// List plans, or switch to one (clears this week's progress)
    Plan { level: Option<String> },

    /// Streaks, lifetime totals and archived weeks
    Stats,

    /// Unlocked and locked achievements
    Achievements,

    /// Set or clear the daily reminder time (HH:MM)
    Remind {
        time: Option<String>,

        #[arg(long, conflicts_with = "time")]
        clear: bool,
    },

    /// Set or clear the accent color
    Accent {
        color: Option<String>,

        #[arg(long, conflicts_with = "color")]
        clear: bool,
    },

    /// Mark onboarding as seen
    Onboard,

    /// Print a shareable summary of this week
    Share,

    /// Export archived weeks as CSV
    Export { path: PathBuf },
}

fn parse_now(s: &str) -> std::result::Result<NaiveDateTime, String> {
    if let Ok(at) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(at);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .ok_or_else(|| format!("expected YYYY-MM-DD or YYYY-MM-DDTHH:MM, got '{}'", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    move_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let mut ctx = EngineContext::new(Arc::new(FileStore::new(data_dir)))
        .with_catalog(catalog)
        .with_sync(config.sync.settings());
    if let Some(now) = cli.now {
        ctx = ctx.with_clock(Arc::new(FixedClock::new(now)));
    }
    if !cli.offline {
        if let Some(target) = config.remote_identity() {
            tracing::debug!("Syncing with {} as {}", target.url, target.user_id);
            let store =
                RestRemoteStore::new(target.url, target.table, target.api_key, target.timeout)?;
            ctx = ctx.with_remote(Arc::new(store), target.user_id);
        }
    }

    let mut engine = ProgressEngine::load(ctx).await;
    report_load(&engine);

    let result = run(&mut engine, cli.command);

    if let Err(e) = engine.flush().await {
        eprintln!("⚠ Saved locally, but remote sync failed: {}", e);
    }
    result
}

fn run(engine: &mut ProgressEngine, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Show { day }) => cmd_show(engine, day),
        Some(Commands::Week) => cmd_week(engine),
        Some(Commands::Toggle { exercise_id }) => cmd_toggle(engine, &exercise_id),
        Some(Commands::Note { day, text }) => {
            let outcome = engine.set_day_note(day.as_str(), &text);
            println!("✓ Note saved for {}", day.day_name());
            print_unlocked(&outcome);
            Ok(())
        }
        Some(Commands::Skip { day, reason }) => {
            engine.skip_day(day.as_str(), reason);
            println!("✓ {} marked as skipped ({})", day.day_name(), reason);
            Ok(())
        }
        Some(Commands::Swap {
            exercise_id,
            name,
            reset,
        }) => cmd_swap(engine, &exercise_id, name, reset),
        Some(Commands::Plan { level }) => cmd_plan(engine, level),
        Some(Commands::Stats) => cmd_stats(engine),
        Some(Commands::Achievements) => cmd_achievements(engine),
        Some(Commands::Remind { time, clear }) => {
            match (time, clear) {
                (_, true) => {
                    engine.set_reminder_time(None)?;
                    println!("✓ Reminder cleared");
                }
                (Some(time), false) => {
                    engine.set_reminder_time(Some(&time))?;
                    println!("✓ Reminder set for {}", time);
                }
                (None, false) => match engine.reminder_time() {
                    Some(time) => println!("Reminder: {}", time),
                    None => println!("No reminder set"),
                },
            }
            Ok(())
        }
        Some(Commands::Accent { color, clear }) => {
            match (color, clear) {
                (_, true) => {
                    engine.set_accent_color(None);
                    println!("✓ Accent color cleared");
                }
                (Some(color), false) => {
                    engine.set_accent_color(Some(&color));
                    println!("✓ Accent color set to {}", color);
                }
                (None, false) => match engine.accent_color() {
                    Some(color) => println!("Accent color: {}", color),
                    None => println!("Default accent color"),
                },
            }
            Ok(())
        }
        Some(Commands::Onboard) => {
            engine.mark_onboarding_complete();
            println!("✓ Onboarding complete");
            Ok(())
        }
        Some(Commands::Share) => {
            println!("{}", engine.week_summary());
            Ok(())
        }
        Some(Commands::Export { path }) => {
            let count = export_history(engine.workout_history(), &path)?;
            println!("✓ Exported {} weeks to {}", count, path.display());
            Ok(())
        }
        None => cmd_show(engine, None),
    }
}

fn report_load(engine: &ProgressEngine) {
    let report = engine.last_load();
    if let Some(ref archived) = report.archived {
        println!(
            "New week! Archived week of {}: {}/{} exercises, {} days complete",
            archived.week_start_date,
            archived.completed_exercises,
            archived.total_exercises,
            archived.completed_days
        );
    }
    for id in &report.newly_unlocked {
        print_achievement(*id);
    }
    if engine.sync_status() == SyncStatus::Error {
        eprintln!("⚠ Remote progress unavailable, using local data");
    }
}

fn print_unlocked(outcome: &Outcome) {
    for id in &outcome.newly_unlocked {
        print_achievement(*id);
    }
}

fn print_achievement(id: AchievementId) {
    let info = id.info();
    println!("🏆 Achievement unlocked: {} {} ({})", info.icon, info.name, info.description);
}

fn cmd_show(engine: &ProgressEngine, day: Option<DayId>) -> Result<()> {
    let day = day.unwrap_or_else(|| today_day_id(engine.now()));
    let Some(workout) = engine.current_plan().day(day.as_str()) else {
        println!("No workout planned for {}", day.day_name());
        return Ok(());
    };

    let progress = engine.day_progress(day.as_str());
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}: {}", workout.day_name().to_uppercase(), workout.focus);
    println!("╰─────────────────────────────────────────╯");
    println!(
        "  {}/{} exercises ({}%)",
        progress.completed, progress.total, progress.percentage
    );
    if let Some(status) = engine.day_status(day.as_str()) {
        if status.skipped {
            let reason = status
                .skipped_reason
                .map(|r| format!(" ({})", r))
                .unwrap_or_default();
            println!("  Skipped{}", reason);
        }
    }

    let mut section = None;
    for exercise in &workout.exercises {
        if section != Some(exercise.section) {
            section = Some(exercise.section);
            println!();
            println!("  {}", section_label(exercise.section.as_str()));
        }

        let mark = if engine.is_exercise_completed(&exercise.id) {
            "✓"
        } else {
            " "
        };
        let name = engine
            .exercise_display_name(&exercise.id)
            .unwrap_or(&exercise.name);
        let swapped = if engine.exercise_swap(&exercise.id).is_some() {
            " (swapped)"
        } else {
            ""
        };
        println!(
            "    [{}] {:<8} {}{}  {}",
            mark, exercise.id, name, swapped, exercise.reps
        );
    }

    let note = engine.day_note(day.as_str());
    if !note.is_empty() {
        println!();
        println!("  📝 {}", note);
    }
    println!();
    Ok(())
}

fn cmd_week(engine: &ProgressEngine) -> Result<()> {
    let week = engine.week_progress();
    let plan_name = engine
        .plan_info()
        .map(|info| info.name.as_str())
        .unwrap_or_else(|| engine.difficulty().as_str());

    println!("Week of {} ({})", engine.snapshot().week_start_date, plan_name);
    for workout in &engine.current_plan().days {
        let progress = engine.day_progress(workout.id.as_str());
        let mark = if progress.percentage == 100 { "✓" } else { " " };
        let skipped = engine
            .day_status(workout.id.as_str())
            .is_some_and(|s| s.skipped);
        println!(
            "  [{}] {:<10} {:>3}%  {}/{}{}",
            mark,
            workout.day_name(),
            progress.percentage,
            progress.completed,
            progress.total,
            if skipped { "  skipped" } else { "" }
        );
    }
    println!(
        "This week: {}/{} days ({}%)",
        week.completed_days, week.total_days, week.percentage
    );
    Ok(())
}

fn cmd_toggle(engine: &mut ProgressEngine, exercise_id: &str) -> Result<()> {
    if engine.current_plan().find_exercise(exercise_id).is_none() {
        return Err(Error::State(format!(
            "Unknown exercise '{}' in the {} plan",
            exercise_id,
            engine.difficulty()
        )));
    }

    let outcome = engine.toggle_exercise(exercise_id);
    let name = engine.exercise_display_name(exercise_id).unwrap_or(exercise_id);
    if engine.is_exercise_completed(exercise_id) {
        println!("✓ {} done", name);
    } else {
        println!("↺ {} not done", name);
    }
    print_unlocked(&outcome);
    Ok(())
}

fn cmd_swap(
    engine: &mut ProgressEngine,
    exercise_id: &str,
    name: Option<String>,
    reset: bool,
) -> Result<()> {
    let Some(exercise) = engine.current_plan().find_exercise(exercise_id) else {
        return Err(Error::State(format!("Unknown exercise '{}'", exercise_id)));
    };

    if reset {
        engine.swap_exercise(exercise_id, "");
        println!("✓ {} restored", exercise.name);
        return Ok(());
    }

    match name {
        Some(name) => {
            engine.swap_exercise(exercise_id, &name);
            println!("✓ {} swapped for {}", exercise.name, name);
        }
        None => {
            let alternatives = alternatives_for(&exercise.name);
            if alternatives.is_empty() {
                println!("No alternatives known for {}", exercise.name);
            } else {
                println!("Alternatives for {}:", exercise.name);
                for alt in alternatives {
                    println!("  {:?}: {} ({})", alt.difficulty, alt.name, alt.reps);
                }
            }
        }
    }
    Ok(())
}

fn cmd_plan(engine: &mut ProgressEngine, level: Option<String>) -> Result<()> {
    let Some(level) = level else {
        for difficulty in DifficultyLevel::ALL {
            let Some(info) = engine.catalog().plan_info(difficulty) else {
                continue;
            };
            let current = if difficulty == engine.difficulty() { "*" } else { " " };
            let availability = if info.available { "" } else { " (coming soon)" };
            println!(
                "{} {:<12} {} {}: {}, {}{}",
                current, info.id.as_str(), info.icon, info.name, info.level, info.duration, availability
            );
        }
        return Ok(());
    };

    let difficulty = DifficultyLevel::parse_or_fallback(&level);
    if let Some(info) = engine.catalog().plan_info(difficulty) {
        if !info.available {
            return Err(Error::State(format!("The {} plan is not available yet", info.name)));
        }
    }
    if difficulty == engine.difficulty() {
        println!("Already on the {} plan", difficulty);
        return Ok(());
    }

    engine.set_difficulty(difficulty);
    println!("✓ Switched to the {} plan; this week's progress was reset", difficulty);
    Ok(())
}

fn cmd_stats(engine: &ProgressEngine) -> Result<()> {
    println!("Current streak:   {} weeks", engine.streak());
    println!("Longest streak:   {} weeks", engine.longest_streak());
    println!("Exercises done:   {}", engine.total_workouts_completed());
    if let Some(week) = engine.snapshot().last_completed_week {
        println!("Last full week:   {}", week);
    }

    let history = engine.workout_history();
    if history.is_empty() {
        println!("No archived weeks yet");
        return Ok(());
    }

    println!();
    println!("Recent weeks:");
    for entry in history.iter().rev() {
        println!(
            "  {}  {}/7 days  {}/{} exercises ({}%){}",
            entry.week_start_date,
            entry.completed_days,
            entry.completed_exercises,
            entry.total_exercises,
            entry.percentage(),
            if entry.is_complete() { "  ✓" } else { "" }
        );
    }
    Ok(())
}

fn cmd_achievements(engine: &ProgressEngine) -> Result<()> {
    let unlocked = engine.unlocked_achievements();
    println!(
        "{}/{} achievements unlocked",
        unlocked.len(),
        AchievementId::ALL.len()
    );
    for id in AchievementId::ALL {
        let info = id.info();
        if engine.achievements().contains(id.as_str()) {
            println!("  {} {}: {}", info.icon, info.name, info.description);
        } else {
            println!("  🔒 {}: {}", info.name, info.description);
        }
    }
    Ok(())
}
