//! Per-user remote persistence of the shared progress fields.
//!
//! Only the fields a user expects to follow them between devices are stored
//! remotely. Week bookkeeping, streaks, counters and history stay local.

use crate::{DayStatus, DifficultyLevel, Error, ProgressSnapshot, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Default table name for progress rows
pub const DEFAULT_TABLE: &str = "workout_progress";

/// One remote row, keyed by user id
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RemoteRecord {
    pub user_id: Uuid,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed_exercises: BTreeMap<String, bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub day_statuses: BTreeMap<String, DayStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exercise_swaps: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: DifficultyLevel,
    #[serde(default)]
    pub reminder_time: Option<String>,
    #[serde(default)]
    pub accent_color: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RemoteRecord {
    /// Project the shared fields of a snapshot
    pub fn from_snapshot(user_id: Uuid, snapshot: &ProgressSnapshot) -> Self {
        Self {
            user_id,
            completed_exercises: snapshot.completed_exercises.clone(),
            notes: snapshot.notes.clone(),
            day_statuses: snapshot.day_statuses.clone(),
            exercise_swaps: snapshot.exercise_swaps.clone(),
            achievements: snapshot.achievements.iter().cloned().collect(),
            difficulty: snapshot.difficulty,
            reminder_time: snapshot.reminder_time.clone(),
            accent_color: snapshot.accent_color.clone(),
        }
    }

    /// Overwrite the shared fields of `snapshot` with this row
    ///
    /// Local-only fields (week start, streaks, counters, history, onboarding)
    /// are left as they are.
    pub fn apply_to(self, snapshot: &mut ProgressSnapshot) {
        snapshot.completed_exercises = self.completed_exercises;
        snapshot.notes = self.notes;
        snapshot.day_statuses = self.day_statuses;
        snapshot.exercise_swaps = self.exercise_swaps;
        snapshot.achievements = self.achievements.into_iter().collect();
        snapshot.difficulty = self.difficulty;
        snapshot.reminder_time = self.reminder_time;
        snapshot.accent_color = self.accent_color;
    }
}

/// Row store reachable once a user identity is known
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch at most one row for the user
    async fn fetch(&self, user_id: Uuid) -> Result<Option<RemoteRecord>>;

    /// Create the user's row
    async fn insert(&self, record: &RemoteRecord) -> Result<()>;

    /// Update the user's existing row
    async fn update(&self, record: &RemoteRecord) -> Result<()>;
}

/// PostgREST-style HTTP row store
#[derive(Clone, Debug)]
pub struct RestRemoteStore {
    client: Client,
    base_url: String,
    table: String,
    api_key: Option<String>,
}

impl RestRemoteStore {
    pub fn new(
        base_url: impl Into<String>,
        table: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            table: table.into(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn request(&self, method: Method) -> RequestBuilder {
        let mut builder = self.client.request(method, self.endpoint());
        if let Some(ref key) = self.api_key {
            builder = builder.header("apikey", key).bearer_auth(key);
        }
        builder
    }
}

async fn check(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Remote(format!("{} failed with {}: {}", action, status, body)))
}

#[async_trait]
impl RemoteStore for RestRemoteStore {
    async fn fetch(&self, user_id: Uuid) -> Result<Option<RemoteRecord>> {
        let response = self
            .request(Method::GET)
            .query(&[("user_id", format!("eq.{}", user_id)), ("select", "*".into())])
            .send()
            .await?;
        let rows: Vec<RemoteRecord> = check(response, "fetch").await?.json().await?;
        tracing::debug!("Fetched {} remote rows for {}", rows.len(), user_id);
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, record: &RemoteRecord) -> Result<()> {
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;
        check(response, "insert").await?;
        tracing::debug!("Inserted remote row for {}", record.user_id);
        Ok(())
    }

    async fn update(&self, record: &RemoteRecord) -> Result<()> {
        let response = self
            .request(Method::PATCH)
            .query(&[("user_id", format!("eq.{}", record.user_id))])
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;
        let response = check(response, "update").await?;
        if response.status() != StatusCode::NO_CONTENT {
            tracing::debug!("Update returned {}", response.status());
        }
        Ok(())
    }
}

/// In-memory row store with failure injection, for tests
#[derive(Debug, Default)]
pub struct MemoryRemoteStore {
    rows: Mutex<HashMap<Uuid, RemoteRecord>>,
    fail: AtomicBool,
    inserts: AtomicUsize,
    updates: AtomicUsize,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(record: RemoteRecord) -> Self {
        let mut store = Self::default();
        store.rows.get_mut().insert(record.user_id, record);
        store
    }

    /// Make every subsequent call fail until switched back
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub async fn row(&self, user_id: Uuid) -> Option<RemoteRecord> {
        self.rows.lock().await.get(&user_id).cloned()
    }

    fn check_failing(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Remote("remote store unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn fetch(&self, user_id: Uuid) -> Result<Option<RemoteRecord>> {
        self.check_failing()?;
        Ok(self.rows.lock().await.get(&user_id).cloned())
    }

    async fn insert(&self, record: &RemoteRecord) -> Result<()> {
        self.check_failing()?;
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().await.insert(record.user_id, record.clone());
        Ok(())
    }

    async fn update(&self, record: &RemoteRecord) -> Result<()> {
        self.check_failing()?;
        self.updates.fetch_add(1, Ordering::SeqCst);
        // Like a filtered PATCH, updating a missing row touches nothing
        if let Some(row) = self.rows.lock().await.get_mut(&record.user_id) {
            *row = record.clone();
        }
        Ok(())
    }
}
