//! First/last day trimming against the departure and return windows.

use log::debug;

use super::{
    format_range, normalize_to_array, time_range_minutes, Activity, DayPlan, Minutes, Unshaped,
};
use crate::{
    prompt::Pace,
    window::{TimeWindow, WindowBounds},
};

/// Enforces window-derived time bounds on the first and last day.
///
/// Day 1 loses activities that end before `min_start` and has earlier starts
/// clipped to it. The last day loses activities that start at or after
/// `last_limit` and has later ends clipped to it. Activities whose interval
/// does not parse are never judged. With a single day both passes run on it,
/// last-day pass second.
///
/// ```rust
/// use serde_json::json;
/// use wayfare_core::{schedule::{ItineraryGuard, Unshaped}, TimeWindow};
///
/// let guard = ItineraryGuard::new(2, Some(TimeWindow::Evening), None);
/// let days = guard.apply(&Unshaped::from(json!({
///     "day_1": [{ "time": "19:30-21:00", "activity": "Night market" }],
///     "day_2": [],
/// })));
/// assert_eq!(days[0].activities[0].time(), "20:00-21:00");
/// ```
#[derive(Debug, Clone)]
pub struct ItineraryGuard {
    days: usize,
    bounds: WindowBounds,
    pace: Option<Pace>,
}

impl ItineraryGuard {
    pub fn new(days: usize, depart: Option<TimeWindow>, return_window: Option<TimeWindow>) -> Self {
        Self {
            days,
            bounds: WindowBounds::resolve(depart, return_window),
            pace: None,
        }
    }

    /// Records the traveller's pace.
    ///
    /// Accepted for parity with the prompt builder; trimming does not depend
    /// on it yet.
    pub fn with_pace(mut self, pace: Option<Pace>) -> Self {
        self.pace = pace;
        self
    }

    pub fn bounds(&self) -> &WindowBounds {
        &self.bounds
    }

    pub fn pace(&self) -> Option<Pace> {
        self.pace
    }

    /// Normalizes any itinerary shape and applies both trimming passes.
    pub fn apply(&self, schedule: &Unshaped) -> Vec<DayPlan> {
        self.trim(normalize_to_array(schedule, Some(self.days)))
    }

    /// Applies both trimming passes to days already in canonical form.
    pub fn apply_canonical(&self, mut plans: Vec<DayPlan>) -> Vec<DayPlan> {
        if self.days > 0 {
            plans.truncate(self.days);
        }
        self.trim(plans)
    }

    fn trim(&self, mut plans: Vec<DayPlan>) -> Vec<DayPlan> {
        if let Some(first) = plans.first_mut() {
            first.activities = trim_first_day(&first.activities, self.bounds.min_start);
        }
        if let Some(last) = plans.last_mut() {
            last.activities = trim_last_day(&last.activities, self.bounds.last_limit);
        }
        plans
    }
}

/// Parsed interval, or `None` for the unjudgeable `(0, 0)` sentinel.
fn judged_interval(activity: &Activity) -> Option<(Minutes, Minutes)> {
    match time_range_minutes(activity.time()) {
        (0, 0) => None,
        interval => Some(interval),
    }
}

fn trim_first_day(activities: &[Activity], min_start: Minutes) -> Vec<Activity> {
    activities
        .iter()
        .filter_map(|activity| {
            let Some((start, end)) = judged_interval(activity) else {
                return Some(activity.clone());
            };
            if end <= min_start {
                debug!("Day 1: dropping '{}' ending before start bound", activity.time());
                None
            } else if start < min_start {
                debug!("Day 1: clipping start of '{}'", activity.time());
                Some(activity.with_time(format_range(min_start, end)))
            } else {
                Some(activity.clone())
            }
        })
        .collect()
}

fn trim_last_day(activities: &[Activity], last_limit: Minutes) -> Vec<Activity> {
    activities
        .iter()
        .filter_map(|activity| {
            let Some((start, end)) = judged_interval(activity) else {
                return Some(activity.clone());
            };
            if start >= last_limit {
                debug!("Last day: dropping '{}' starting after cutoff", activity.time());
                None
            } else if end > last_limit {
                debug!("Last day: clipping end of '{}'", activity.time());
                Some(activity.with_time(format_range(start, last_limit)))
            } else {
                Some(activity.clone())
            }
        })
        .collect()
}

/// Normalizes and guards an itinerary from raw survey tokens.
///
/// Unknown window or pace tokens count as unspecified.
pub fn guard_schedule(
    schedule: &Unshaped,
    days: usize,
    depart_window: Option<&str>,
    return_window: Option<&str>,
    density: Option<&str>,
) -> Vec<DayPlan> {
    ItineraryGuard::new(
        days,
        depart_window.and_then(TimeWindow::parse),
        return_window.and_then(TimeWindow::parse),
    )
    .with_pace(density.map(Pace::parse))
    .apply(schedule)
}
