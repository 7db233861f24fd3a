//! Departure and return time windows and the bounds derived from them.
//!
//! The same numeric thresholds drive two consumers: the prompt builder turns
//! them into instructions for the generation service, and the
//! [`ItineraryGuard`](crate::schedule::ItineraryGuard) enforces them on the
//! reply. Keep the policy texts below in sync with the tables.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::schedule::{format_hhmm, Minutes};

/// Earliest first-day start when no departure window is given.
pub const DEFAULT_MIN_START: Minutes = 9 * 60;

/// Last-day cutoff when no return window is given.
pub const DEFAULT_LAST_LIMIT: Minutes = 16 * 60 + 30;

/// First-day starts at or after this time push sightseeing to day 2.
pub const LATE_ARRIVAL_THRESHOLD: Minutes = 20 * 60;

/// Advisory text for late arrivals. Never enforced by the guard.
pub const LATE_ARRIVAL_POLICY: &str = "If the earliest start on day_1 is 20:00 or later, \
begin substantive sightseeing on the morning of day_2 and keep day_1 to arrival, \
check-in and a short walk or late snack nearby.";

const LAST_DAY_DAWN_POLICY: &str = "Schedule no sightseeing on the last day and wrap up \
sightseeing in the late afternoon of the day before. The last day only covers the airport \
transfer, check-in and departure procedures.";
const LAST_DAY_MORNING_POLICY: &str = "Be ready to leave before 08:00 on the last day. \
Do not schedule sightseeing on the last day.";
const LAST_DAY_AFTERNOON_POLICY: &str = "Finish all sightseeing before 12:30 on the last day.";
const LAST_DAY_EVENING_POLICY: &str = "Finish all sightseeing before 16:30 on the last day.";

/// Coarse time-of-day bucket for a departure or return flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Dawn,
    Morning,
    Afternoon,
    Evening,
}

impl TimeWindow {
    /// Lenient parse of an English or Korean token.
    ///
    /// Returns `None` for empty or unrecognized input, which callers treat as
    /// "unspecified".
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "dawn" | "새벽" => Some(Self::Dawn),
            "morning" | "오전" => Some(Self::Morning),
            "afternoon" | "오후" => Some(Self::Afternoon),
            "evening" | "저녁" => Some(Self::Evening),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }

    /// Earliest start of the first day for a departure in this window.
    pub fn first_day_start(self) -> Minutes {
        match self {
            Self::Dawn => 9 * 60,
            Self::Morning => 13 * 60,
            Self::Afternoon => 17 * 60,
            Self::Evening => 20 * 60,
        }
    }

    /// Cutoff on the last day for a return in this window.
    ///
    /// A dawn return leaves no time at all.
    pub fn last_day_limit(self) -> Minutes {
        match self {
            Self::Dawn => 0,
            Self::Morning => 8 * 60,
            Self::Afternoon => 12 * 60 + 30,
            Self::Evening => 16 * 60 + 30,
        }
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid time window: {s}"))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deserializes an optional window, mapping unknown tokens to `None`.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<TimeWindow>, D::Error>
where
    D: Deserializer<'de>,
{
    let token = Option::<String>::deserialize(deserializer)?;
    Ok(token.as_deref().and_then(TimeWindow::parse))
}

/// Thresholds resolved from a departure and return window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    /// Earliest permissible start on day 1.
    pub min_start: Minutes,
    /// Latest permissible moment on the last day.
    pub last_limit: Minutes,
    return_window: Option<TimeWindow>,
}

impl WindowBounds {
    pub fn resolve(depart: Option<TimeWindow>, return_window: Option<TimeWindow>) -> Self {
        Self {
            min_start: depart.map_or(DEFAULT_MIN_START, TimeWindow::first_day_start),
            last_limit: return_window.map_or(DEFAULT_LAST_LIMIT, TimeWindow::last_day_limit),
            return_window,
        }
    }

    /// `min_start` as `HH:MM`.
    pub fn min_start_label(&self) -> String {
        format_hhmm(self.min_start)
    }

    /// Natural-language rule for the final day.
    pub fn last_day_policy(&self) -> &'static str {
        match self.return_window {
            Some(TimeWindow::Dawn) => LAST_DAY_DAWN_POLICY,
            Some(TimeWindow::Morning) => LAST_DAY_MORNING_POLICY,
            Some(TimeWindow::Afternoon) => LAST_DAY_AFTERNOON_POLICY,
            Some(TimeWindow::Evening) | None => LAST_DAY_EVENING_POLICY,
        }
    }

    /// True when day 1 should hold only arrival and light activity.
    pub fn late_arrival(&self) -> bool {
        self.min_start >= LATE_ARRIVAL_THRESHOLD
    }
}

impl Default for WindowBounds {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}
