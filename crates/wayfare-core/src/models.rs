//! Data models for surveys, recommendations and saved items.
//!
//! Survey answers arrive from untrusted clients, so [`Preferences`]
//! deserializes leniently: missing answers default to empty, a single style
//! string is accepted where a list is expected, and unknown time windows
//! become "unspecified".

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    duration::extract_days,
    prompt::Pace,
    schedule::ScheduleMap,
    window::{deserialize_lenient, TimeWindow},
};

/// Maximum length of a recommendation summary, in characters.
pub const SUMMARY_MAX_CHARS: usize = 160;

/// Maximum length of a note attached to a saved item, in characters.
pub const NOTE_MAX_CHARS: usize = 200;

const DEFAULT_TITLE: &str = "Recommended trip";

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(style)) if style.is_empty() => Vec::new(),
        Some(OneOrMany::One(style)) => vec![style],
        Some(OneOrMany::Many(styles)) => styles,
        None => Vec::new(),
    })
}

/// A traveller's survey answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Preferences {
    /// Who the traveller goes with
    #[serde(default)]
    pub companion: String,

    /// Themes such as food, history or nature
    #[serde(default, deserialize_with = "one_or_many")]
    #[cfg_attr(feature = "schema", schemars(with = "Vec<String>"))]
    pub style: Vec<String>,

    /// Freeform trip length, e.g. "2night 3days" or "1박 2일"
    #[serde(default)]
    pub duration: String,

    /// Preferred means of transport
    #[serde(default)]
    pub driving: String,

    #[serde(default)]
    pub budget: String,

    #[serde(default)]
    pub climate: String,

    #[serde(default)]
    pub continent: String,

    /// Freeform pace, e.g. "relaxed", "moderate", "active"
    #[serde(default)]
    pub density: String,

    /// Departure flight window
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schema", schemars(with = "Option<TimeWindow>"))]
    pub depart_window: Option<TimeWindow>,

    /// Return flight window
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schema", schemars(with = "Option<TimeWindow>"))]
    pub return_window: Option<TimeWindow>,
}

impl Preferences {
    /// Trip length in days, see [`extract_days`].
    pub fn days(&self) -> u32 {
        extract_days(&self.duration)
    }

    pub fn pace(&self) -> Pace {
        Pace::parse(&self.density)
    }
}

/// A stored survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub id: u64,

    /// Owner of the survey
    pub nickname: String,

    pub preferences: Preferences,

    /// Timestamp when the survey was submitted (UTC)
    pub created_at: Timestamp,
}

/// One recommended city with its guarded itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecommendation {
    pub city: String,
    pub country: String,

    /// Short reason for the recommendation
    pub reason: String,

    /// Guarded itinerary in keyed form
    pub schedule: ScheduleMap,
}

/// A stored recommendation produced for a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: u64,
    pub survey_id: u64,
    pub cities: Vec<CityRecommendation>,

    /// User rating from 1 to 5
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,

    pub created_at: Timestamp,
}

/// Compact view of a recommendation for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub id: u64,
    pub survey_id: u64,
    pub title: String,
    pub summary: Option<String>,
    pub rating: Option<u8>,
    pub created_at: Timestamp,
}

/// Shortens text to [`SUMMARY_MAX_CHARS`] characters, ending in `…`.
pub fn truncate_summary(text: &str) -> String {
    if text.chars().count() <= SUMMARY_MAX_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(SUMMARY_MAX_CHARS - 3).collect();
    short.push('…');
    short
}

impl From<&Recommendation> for RecommendationSummary {
    fn from(recommendation: &Recommendation) -> Self {
        let first = recommendation.cities.first();
        let title = first
            .filter(|city| !city.city.is_empty())
            .map(|city| {
                if city.country.is_empty() {
                    city.city.clone()
                } else {
                    format!("{}, {}", city.city, city.country)
                }
            })
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let summary = first
            .map(|city| city.reason.as_str())
            .filter(|reason| !reason.is_empty())
            .map(truncate_summary);

        Self {
            id: recommendation.id,
            survey_id: recommendation.survey_id,
            title,
            summary,
            rating: recommendation.rating,
            created_at: recommendation.created_at,
        }
    }
}

/// Pairs a survey with the recommendation made for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub survey_id: u64,
    pub recommendation_id: u64,
}

/// A survey together with its recommendation, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyDetail {
    pub survey: Survey,
    pub recommendation: Option<Recommendation>,
}

/// Result of a completed recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendOutcome {
    pub survey_id: u64,
    pub recommendation_id: u64,
    pub cities: Vec<CityRecommendation>,
}

/// Which personal list an item is saved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum SavedList {
    Bookmark,
    Wishlist,
}

impl SavedList {
    pub fn as_str(&self) -> &'static str {
        match self {
            SavedList::Bookmark => "bookmark",
            SavedList::Wishlist => "wishlist",
        }
    }
}

impl FromStr for SavedList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bookmark" => Ok(SavedList::Bookmark),
            "wishlist" => Ok(SavedList::Wishlist),
            _ => Err(format!("Invalid saved list: {s}")),
        }
    }
}

impl fmt::Display for SavedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of item that can be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Recommendation,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Recommendation => "recommendation",
        }
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recommendation" => Ok(ItemType::Recommendation),
            _ => Err(format!("Invalid item type: {s}")),
        }
    }
}

/// A bookmarked or wishlisted item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedItem {
    pub id: u64,
    pub nickname: String,
    pub list: SavedList,
    pub item_type: ItemType,
    pub item_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Activity;

    fn recommendation(reason: &str) -> Recommendation {
        Recommendation {
            id: 7,
            survey_id: 3,
            cities: vec![CityRecommendation {
                city: "Lisbon".to_string(),
                country: "Portugal".to_string(),
                reason: reason.to_string(),
                schedule: ScheduleMap::from([(
                    "day_1".to_string(),
                    vec![Activity::new("09:00-10:00", "Pastries (walk)")],
                )]),
            }],
            rating: Some(4),
            created_at: Timestamp::from_second(1_640_995_200).unwrap(),
        }
    }

    #[test]
    fn test_preferences_lenient_deserialize() {
        let prefs: Preferences = serde_json::from_str(
            r#"{
                "companion": "family",
                "style": "food",
                "duration": "1박 2일",
                "density": "느긋하게",
                "depart_window": "오후",
                "return_window": "sometime"
            }"#,
        )
        .unwrap();

        assert_eq!(prefs.style, vec!["food".to_string()]);
        assert_eq!(prefs.days(), 2);
        assert_eq!(prefs.pace(), Pace::Relaxed);
        assert_eq!(prefs.depart_window, Some(TimeWindow::Afternoon));
        assert_eq!(prefs.return_window, None);
        assert!(prefs.budget.is_empty());
    }

    #[test]
    fn test_preferences_serialize_round_trip() {
        let prefs = Preferences {
            style: vec!["history".to_string(), "nature".to_string()],
            duration: "3 days".to_string(),
            depart_window: Some(TimeWindow::Evening),
            ..Default::default()
        };

        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains(r#""depart_window":"evening""#));
        assert!(!json.contains("return_window"));
        assert_eq!(serde_json::from_str::<Preferences>(&json).unwrap(), prefs);
    }

    #[test]
    fn test_summary_uses_first_city() {
        let summary = RecommendationSummary::from(&recommendation("Great food."));
        assert_eq!(summary.title, "Lisbon, Portugal");
        assert_eq!(summary.summary.as_deref(), Some("Great food."));
        assert_eq!(summary.rating, Some(4));
    }

    #[test]
    fn test_summary_truncates_long_reason() {
        let long = "가".repeat(200);
        let summary = RecommendationSummary::from(&recommendation(&long));
        let text = summary.summary.unwrap();
        assert_eq!(text.chars().count(), SUMMARY_MAX_CHARS - 2);
        assert!(text.ends_with('…'));

        let exact = "a".repeat(SUMMARY_MAX_CHARS);
        assert_eq!(truncate_summary(&exact), exact);
    }

    #[test]
    fn test_summary_defaults_without_cities() {
        let mut empty = recommendation("");
        empty.cities.clear();
        let summary = RecommendationSummary::from(&empty);
        assert_eq!(summary.title, DEFAULT_TITLE);
        assert_eq!(summary.summary, None);
    }

    #[test]
    fn test_saved_list_parse() {
        assert_eq!("Bookmark".parse::<SavedList>(), Ok(SavedList::Bookmark));
        assert_eq!("wishlist".parse::<SavedList>(), Ok(SavedList::Wishlist));
        assert!("favourites".parse::<SavedList>().is_err());
        assert_eq!("recommendation".parse::<ItemType>(), Ok(ItemType::Recommendation));
    }
}
