//! Parameter structures shared by the CLI and MCP front ends.
//!
//! Each interface wraps or converts into these types, so the
//! [`Recommender`](crate::Recommender) API stays free of clap or rmcp
//! specifics. JSON schemas are derived only with the `schema` feature.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{ItemType, Preferences, SavedList};

/// Parameters for requesting a recommendation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Recommend {
    /// Nickname of the traveller submitting the survey
    pub nickname: String,
    /// Survey answers
    pub preferences: Preferences,
}

/// Parameters for operations scoped to a nickname.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Nickname {
    /// Nickname whose records to read
    pub nickname: String,
}

/// Parameters for operations on a resource owned by a nickname.
///
/// Used for showing and deleting surveys and showing recommendations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct OwnedId {
    /// The ID of the resource to operate on
    pub id: u64,
    /// Nickname of the caller; must own the resource
    pub nickname: String,
}

/// Parameters for rating a recommendation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RateRecommendation {
    /// ID of the recommendation
    pub id: u64,
    /// Nickname of the caller; must own the recommendation
    pub nickname: String,
    /// Rating from 1 to 5
    pub rating: u8,
}

/// Parameters for adding an item to a bookmark or wishlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SaveItem {
    /// Nickname owning the list
    pub nickname: String,
    /// Which list to add to: "bookmark" or "wishlist"
    pub list: SavedList,
    /// Kind of item; only "recommendation" exists
    #[serde(default)]
    pub item_type: ItemType,
    /// ID of the item
    pub item_id: u64,
    /// Optional note of at most 200 characters
    pub note: Option<String>,
}

/// Parameters for removing an item from a bookmark or wishlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RemoveItem {
    pub nickname: String,
    pub list: SavedList,
    #[serde(default)]
    pub item_type: ItemType,
    pub item_id: u64,
}

/// Parameters for listing a bookmark or wishlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListSaved {
    pub nickname: String,
    pub list: SavedList,
}

/// Parameters for guarding a raw itinerary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GuardSchedule {
    /// Itinerary in any shape: day-keyed object, array of
    /// `{day, activities}` objects, or a flat activity list
    pub schedule: Value,
    /// Number of days to keep; 0 keeps all
    #[serde(default)]
    pub days: usize,
    /// Departure window: dawn, morning, afternoon or evening
    pub depart_window: Option<String>,
    /// Return window: dawn, morning, afternoon or evening
    pub return_window: Option<String>,
    /// Freeform pace; accepted but does not change trimming
    pub density: Option<String>,
}
