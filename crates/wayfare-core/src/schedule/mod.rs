//! Itinerary shapes and the normalization pipeline.
//!
//! The generation service answers with an itinerary in one of several
//! shapes. Everything that enters this module is first lifted into
//! [`Unshaped`], normalized into the canonical array form (a `Vec<DayPlan>`),
//! repaired by the [`ItineraryGuard`], and finally turned back into the keyed
//! [`ScheduleMap`] used for storage and responses:
//!
//! ```text
//! Value ─▶ Unshaped ─▶ normalize_to_array ─▶ ItineraryGuard ─▶ array_to_map
//! ```
//!
//! All functions here are total. Malformed input degrades to an empty or
//! untouched result instead of an error, and every output is a fresh copy
//! that never aliases the caller's input.
//!
//! ```rust
//! use serde_json::json;
//! use wayfare_core::schedule::{array_to_map, normalize_to_array, Unshaped};
//!
//! let raw = json!({
//!     "day_2": [{ "time": "10:00-12:00", "activity": "Museum" }],
//!     "day_1": [{ "time": "09:00-10:00", "activity": "Breakfast" }],
//! });
//! let days = normalize_to_array(&Unshaped::from(&raw), None);
//! assert_eq!(days[0].day, "day_1");
//!
//! let map = array_to_map(&days);
//! assert_eq!(map.len(), 2);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

mod canon;
mod guard;
mod time;

pub use canon::{array_to_map, map_to_array, normalize_to_array};
pub use guard::{guard_schedule, ItineraryGuard};
pub use time::{format_hhmm, format_range, parse_clock, time_range_minutes, Minutes};

/// Ordinal assigned to day labels without any digits.
pub const UNLABELED_DAY_INDEX: u32 = 10_000;

/// Label given to a bare activity list wrapped into a single day.
pub const FIRST_DAY_LABEL: &str = "day_1";

const DAY_FIELD: &str = "day";
const ACTIVITIES_FIELD: &str = "activities";
const TIME_FIELD: &str = "time";
const DESCRIPTION_FIELD: &str = "activity";

/// Keyed itinerary form: day label to activities.
///
/// Key order carries no meaning; recover it with [`day_index`].
pub type ScheduleMap = BTreeMap<String, Vec<Activity>>;

/// Extracts the first run of ASCII digits in a day label.
///
/// Labels without digits get [`UNLABELED_DAY_INDEX`] so they sort after every
/// numbered day. Runs too long for `u32` saturate.
pub fn day_index(label: &str) -> u32 {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();

    if digits.is_empty() {
        return UNLABELED_DAY_INDEX;
    }
    digits.parse().unwrap_or(u32::MAX)
}

/// One scheduled item.
///
/// Backed by the raw JSON value produced by the generator so that fields
/// other than `time` survive the pipeline byte for byte. Entries that are
/// not JSON objects are carried along verbatim and read as having no time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Activity(Value);

impl Activity {
    /// Creates an activity from a `HH:MM-HH:MM` interval and a description.
    pub fn new(time: impl Into<String>, description: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(TIME_FIELD.to_string(), Value::String(time.into()));
        fields.insert(
            DESCRIPTION_FIELD.to_string(),
            Value::String(description.into()),
        );
        Self(Value::Object(fields))
    }

    /// The textual interval, or an empty string when absent or not a string.
    pub fn time(&self) -> &str {
        self.0
            .get(TIME_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The free-text description, if present.
    pub fn description(&self) -> Option<&str> {
        self.0.get(DESCRIPTION_FIELD).and_then(Value::as_str)
    }

    /// Returns a copy with only the time field replaced.
    pub fn with_time(&self, time: impl Into<String>) -> Self {
        let mut value = self.0.clone();
        if let Value::Object(fields) = &mut value {
            fields.insert(TIME_FIELD.to_string(), Value::String(time.into()));
        }
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Activity {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A day label paired with its ordered activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Free-text label; only its embedded ordinal matters.
    pub day: String,

    /// Activities in their scheduled order.
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl DayPlan {
    pub fn new(day: impl Into<String>, activities: Vec<Activity>) -> Self {
        Self {
            day: day.into(),
            activities,
        }
    }

    /// Ordinal used for sorting, see [`day_index`].
    pub fn index(&self) -> u32 {
        day_index(&self.day)
    }

    /// Reads one entry of an already-canonical array.
    ///
    /// Non-object entries yield `None`. A missing or non-textual label becomes
    /// the empty string (numbers keep their digits); a missing or non-array
    /// activity list becomes empty.
    fn from_entry(entry: &Value) -> Option<Self> {
        let fields = entry.as_object()?;

        let day = match fields.get(DAY_FIELD) {
            Some(Value::String(label)) => label.clone(),
            Some(Value::Number(number)) => number.to_string(),
            _ => String::new(),
        };
        let activities = match fields.get(ACTIVITIES_FIELD) {
            Some(Value::Array(entries)) => entries.iter().cloned().map(Activity::from).collect(),
            _ => Vec::new(),
        };

        Some(Self { day, activities })
    }
}

impl From<&DayPlan> for Value {
    fn from(plan: &DayPlan) -> Self {
        let mut fields = Map::new();
        fields.insert(DAY_FIELD.to_string(), Value::String(plan.day.clone()));
        fields.insert(
            ACTIVITIES_FIELD.to_string(),
            Value::Array(
                plan.activities
                    .iter()
                    .map(|activity| activity.as_value().clone())
                    .collect(),
            ),
        );
        Value::Object(fields)
    }
}

/// Untrusted itinerary input, tagged by its top-level JSON shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Unshaped {
    /// A JSON array: either canonical days or a bare activity list.
    Array(Vec<Value>),
    /// A JSON object keyed by day label.
    Mapping(Map<String, Value>),
    /// Anything else (null, scalars).
    #[default]
    Other,
}

impl Unshaped {
    /// True when the first element is an object carrying both a day label and
    /// an activities field.
    pub fn is_canonical(&self) -> bool {
        match self {
            Self::Array(entries) => entries.first().is_some_and(|first| {
                first
                    .as_object()
                    .is_some_and(|o| o.contains_key(DAY_FIELD) && o.contains_key(ACTIVITIES_FIELD))
            }),
            _ => false,
        }
    }
}

impl From<Value> for Unshaped {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(entries) => Self::Array(entries),
            Value::Object(fields) => Self::Mapping(fields),
            _ => Self::Other,
        }
    }
}

impl From<&Value> for Unshaped {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

impl From<&[DayPlan]> for Unshaped {
    fn from(days: &[DayPlan]) -> Self {
        Self::Array(days.iter().map(Value::from).collect())
    }
}

impl<'de> Deserialize<'de> for Unshaped {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_day_index_extracts_first_digit_run() {
        assert_eq!(day_index("day_12"), 12);
        assert_eq!(day_index("Day 3 (arrival)"), 3);
        assert_eq!(day_index("2일차 / 5"), 2);
        assert_eq!(day_index("day_007"), 7);
    }

    #[test]
    fn test_day_index_sentinel_for_unlabeled() {
        assert_eq!(day_index("day"), UNLABELED_DAY_INDEX);
        assert_eq!(day_index(""), UNLABELED_DAY_INDEX);
        assert_eq!(day_index("마지막 날"), UNLABELED_DAY_INDEX);
    }

    #[test]
    fn test_day_index_saturates_on_overflow() {
        assert_eq!(day_index("day_99999999999999999999"), u32::MAX);
    }

    #[test]
    fn test_activity_accessors() {
        let activity = Activity::new("09:00-10:00", "Breakfast (walk)");
        assert_eq!(activity.time(), "09:00-10:00");
        assert_eq!(activity.description(), Some("Breakfast (walk)"));

        let bare = Activity::from(json!("just text"));
        assert_eq!(bare.time(), "");
        assert_eq!(bare.description(), None);

        let numeric_time = Activity::from(json!({ "time": 900, "activity": "x" }));
        assert_eq!(numeric_time.time(), "");
    }

    #[test]
    fn test_with_time_preserves_other_fields_and_original() {
        let original = Activity::from(json!({
            "time": "08:00-10:30",
            "activity": "Harbor walk",
            "cost": 12,
        }));

        let rewritten = original.with_time("09:00-10:30");

        assert_eq!(original.time(), "08:00-10:30");
        assert_eq!(
            rewritten.as_value(),
            &json!({ "time": "09:00-10:30", "activity": "Harbor walk", "cost": 12 })
        );
    }

    #[test]
    fn test_unshaped_tags_top_level_shape() {
        assert!(matches!(Unshaped::from(json!([])), Unshaped::Array(_)));
        assert!(matches!(Unshaped::from(json!({})), Unshaped::Mapping(_)));
        assert_eq!(Unshaped::from(json!(null)), Unshaped::Other);
        assert_eq!(Unshaped::from(json!(42)), Unshaped::Other);
        assert_eq!(Unshaped::from(json!("day_1")), Unshaped::Other);
    }

    #[test]
    fn test_unshaped_canonical_detection() {
        let canonical = Unshaped::from(json!([{ "day": "day_1", "activities": [] }]));
        let bare = Unshaped::from(json!([{ "time": "09:00-10:00", "activity": "x" }]));
        let label_only = Unshaped::from(json!([{ "day": "day_1" }]));

        assert!(canonical.is_canonical());
        assert!(!bare.is_canonical());
        assert!(!label_only.is_canonical());
        assert!(!Unshaped::Array(Vec::new()).is_canonical());
    }

    #[test]
    fn test_unshaped_deserializes_from_json_text() {
        let parsed: Unshaped = serde_json::from_str(r#"{"day_1": []}"#).unwrap();
        assert!(matches!(parsed, Unshaped::Mapping(ref m) if m.contains_key("day_1")));
    }

    #[test]
    fn test_day_plan_from_entry_tolerates_odd_fields() {
        let plan = DayPlan::from_entry(&json!({ "day": 2, "activities": "nope" })).unwrap();
        assert_eq!(plan.day, "2");
        assert!(plan.activities.is_empty());

        assert!(DayPlan::from_entry(&json!("day_1")).is_none());
    }
}
