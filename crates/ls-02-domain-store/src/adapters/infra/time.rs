use crate::ports::outbound::Clock;
use chrono::{DateTime, Local, TimeZone};

/// Local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }

    fn time_label(&self) -> String {
        Local::now().format("%I:%M %p").to_string()
    }

    fn now_millis(&self) -> u64 {
        u64::try_from(Local::now().timestamp_millis()).unwrap_or(0)
    }
}

/// A clock frozen at one instant, for deterministic tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock {
    today: String,
    time_label: String,
    now_millis: u64,
}

impl FixedClock {
    pub fn new(today: impl Into<String>, time_label: impl Into<String>, now_millis: u64) -> Self {
        Self {
            today: today.into(),
            time_label: time_label.into(),
            now_millis,
        }
    }

    /// Derives all three readings from one local instant.
    pub fn at<Tz: TimeZone>(instant: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            today: instant.format("%Y-%m-%d").to_string(),
            time_label: instant.format("%I:%M %p").to_string(),
            now_millis: u64::try_from(instant.timestamp_millis()).unwrap_or(0),
        }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new("2024-05-01", "09:30 AM", 1_714_555_800_000)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> String {
        self.today.clone()
    }

    fn time_label(&self) -> String {
        self.time_label.clone()
    }

    fn now_millis(&self) -> u64 {
        self.now_millis
    }
}
