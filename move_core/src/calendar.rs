//! Wall-clock access and week arithmetic.
//!
//! All week logic works on the LOCAL wall clock: a week starts on Monday at
//! 00:00 local time and Sunday belongs to the week of the previous Monday.

use crate::DayId;
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use std::sync::Mutex;

/// Source of the current local wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Local hour of day (0-23)
    fn hour(&self) -> u32 {
        self.now().hour()
    }
}

/// The machine's local clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A settable clock for tests and `--now` overrides
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Monday of the week containing `now`
pub fn monday_of(now: NaiveDateTime) -> NaiveDate {
    let date = now.date();
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Day tag for "today"
pub fn today_day_id(now: NaiveDateTime) -> DayId {
    DayId::from(now.weekday())
}
