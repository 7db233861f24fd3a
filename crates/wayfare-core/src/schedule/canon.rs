//! Conversions between the array and map itinerary forms.

use log::debug;
use serde_json::{Map, Value};

use super::{Activity, DayPlan, ScheduleMap, Unshaped, FIRST_DAY_LABEL};

/// Keeps at most `days` leading entries. `None` and `Some(0)` mean no limit.
fn truncate(mut plans: Vec<DayPlan>, days: Option<usize>) -> Vec<DayPlan> {
    if let Some(limit) = days.filter(|limit| *limit > 0) {
        if plans.len() > limit {
            debug!("Truncating itinerary from {} to {limit} days", plans.len());
            plans.truncate(limit);
        }
    }
    plans
}

fn activities_of(entries: &[Value]) -> Vec<Activity> {
    entries.iter().cloned().map(Activity::from).collect()
}

/// Converts a label-keyed mapping into days sorted by their ordinal.
///
/// Entries whose value is not an array are dropped. The sort is stable, so
/// labels sharing an ordinal keep the mapping's iteration order.
pub fn map_to_array(map: &Map<String, Value>, days: Option<usize>) -> Vec<DayPlan> {
    let mut plans: Vec<DayPlan> = map
        .iter()
        .filter_map(|(label, value)| match value {
            Value::Array(entries) => Some(DayPlan::new(label.clone(), activities_of(entries))),
            _ => {
                debug!("Dropping day '{label}': activities are not a list");
                None
            }
        })
        .collect();

    plans.sort_by_key(DayPlan::index);
    truncate(plans, days)
}

/// Normalizes any itinerary shape into the canonical array form.
///
/// - canonical arrays are kept in their given order (non-object entries are
///   skipped) and truncated to `days`;
/// - any other array is treated as the activity list of a single `day_1`;
/// - mappings go through [`map_to_array`];
/// - everything else yields an empty itinerary.
pub fn normalize_to_array(schedule: &Unshaped, days: Option<usize>) -> Vec<DayPlan> {
    match schedule {
        Unshaped::Array(entries) if schedule.is_canonical() => {
            truncate(entries.iter().filter_map(DayPlan::from_entry).collect(), days)
        }
        Unshaped::Array(entries) => {
            debug!("Wrapping bare activity list of {} entries as {FIRST_DAY_LABEL}", entries.len());
            truncate(
                vec![DayPlan::new(FIRST_DAY_LABEL, activities_of(entries))],
                days,
            )
        }
        Unshaped::Mapping(map) => map_to_array(map, days),
        Unshaped::Other => {
            debug!("Unsupported itinerary shape, returning empty schedule");
            Vec::new()
        }
    }
}

/// Converts canonical days back into the keyed form.
///
/// Days sharing a label overwrite each other in array order; the last wins.
pub fn array_to_map(plans: &[DayPlan]) -> ScheduleMap {
    let mut map = ScheduleMap::new();
    for plan in plans {
        map.insert(plan.day.clone(), plan.activities.clone());
    }
    map
}
