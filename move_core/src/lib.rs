#![forbid(unsafe_code)]

//! Core domain model and progress engine for the Move workout tracker.
//!
//! This crate provides:
//! - Domain types (plans, exercises, progress snapshots)
//! - The built-in plan, achievement and alternative-exercise catalogs
//! - Week reconciliation and derived progress queries
//! - Local and remote storage ports with debounced remote sync
//! - The `ProgressEngine` that ties them together

pub mod types;
pub mod error;
pub mod catalog;
pub mod alternatives;
pub mod achievements;
pub mod calendar;
pub mod progress;
pub mod reconcile;
pub mod store;
pub mod sync;
pub mod history;
pub mod config;
pub mod logging;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, section_label};
pub use alternatives::{alternatives_for, AlternativeDifficulty, ExerciseAlternative};
pub use achievements::{achievement_info, AchievementId, AchievementInfo};
pub use calendar::{monday_of, today_day_id, Clock, FixedClock, SystemClock};
pub use config::Config;
pub use store::{FileStore, LocalStore, MemoryRemoteStore, MemoryStore, RemoteRecord, RemoteStore, RestRemoteStore};
pub use sync::{RemoteSync, SyncSettings};
pub use history::export_history;
pub use engine::{EngineContext, LoadReport, Outcome, ProgressEngine, RemoteIdentity};
