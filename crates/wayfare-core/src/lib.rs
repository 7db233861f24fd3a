//! Core library for the Wayfare travel recommendation service.
//!
//! A traveller fills in a survey; the generation service proposes cities with
//! day-by-day itineraries; this crate turns whatever shape those itineraries
//! arrive in into a canonical, window-respecting form and stores the result.
//!
//! # Itinerary pipeline
//!
//! - [`schedule`]: day labels, `HH:MM-HH:MM` intervals, conversion between
//!   the keyed and the canonical array form, and the [`ItineraryGuard`] that
//!   trims the first and last day.
//! - [`window`]: departure/return windows and the minute bounds they imply.
//! - [`duration`]: trip length from freeform answers.
//! - [`prompt`]: the generation prompt, quoting the same bounds the guard
//!   enforces.
//!
//! # Service
//!
//! - [`generation`]: the [`Generator`] seam and the Gemini client.
//! - [`db`]: SQLite storage.
//! - [`recommender`]: the async [`Recommender`] API on top of both.
//! - [`display`]: markdown formatting for every result type.
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use wayfare_core::{array_to_map, guard_schedule, Unshaped};
//!
//! let raw = json!({
//!     "day_2": [{ "time": "15:00-18:00", "activity": "Harbour cruise (ferry)" }],
//!     "day_1": [{ "time": "19:00-21:00", "activity": "Night market (walk)" }],
//! });
//!
//! let days = guard_schedule(&Unshaped::from(&raw), 2, Some("evening"), Some("afternoon"), None);
//! assert_eq!(days[0].day, "day_1");
//! assert_eq!(days[0].activities[0].time(), "20:00-21:00");
//! assert!(days[1].activities.is_empty());
//!
//! let keyed = array_to_map(&days);
//! assert_eq!(keyed.len(), 2);
//! ```

pub mod db;
pub mod display;
pub mod duration;
pub mod error;
pub mod generation;
pub mod models;
pub mod params;
pub mod prompt;
pub mod recommender;
pub mod schedule;
pub mod window;

// Re-export commonly used types
pub use db::Database;
pub use duration::extract_days;
pub use error::{Result, WayfareError};
pub use generation::{
    parse_reply, CityPlan, GeminiClient, GenerationConfig, GenerationReply, Generator,
};
pub use models::{
    CityRecommendation, HistoryEntry, ItemType, Preferences, RecommendOutcome, Recommendation,
    RecommendationSummary, SavedItem, SavedList, Survey, SurveyDetail,
};
pub use prompt::{build_prompt, Pace};
pub use recommender::{guard_reply, Recommender, RecommenderBuilder};
pub use schedule::{
    array_to_map, day_index, guard_schedule, map_to_array, normalize_to_array, time_range_minutes,
    Activity, DayPlan, ItineraryGuard, ScheduleMap, Unshaped,
};
pub use window::{TimeWindow, WindowBounds};
