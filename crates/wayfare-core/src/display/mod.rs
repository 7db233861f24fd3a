//! Markdown formatting for domain models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections are wrapped in newtypes from [`collections`] so empty results
//! render a friendly line instead of nothing. Every formatter produces
//! markdown, which the CLI renders for the terminal and the MCP server hands
//! over verbatim.
//!
//! ```rust
//! use wayfare_core::{
//!     display::{Itinerary, OperationStatus},
//!     schedule::{Activity, DayPlan},
//! };
//!
//! let itinerary = Itinerary(vec![DayPlan::new(
//!     "day_1",
//!     vec![Activity::new("20:00-21:00", "Night market (walk)")],
//! )]);
//! assert!(itinerary.to_string().contains("**20:00-21:00** Night market (walk)"));
//!
//! let status = OperationStatus::success("Survey 3 deleted".to_string());
//! assert_eq!(status.to_string(), "Success: Survey 3 deleted\n");
//! ```

pub mod collections;
pub mod models;
pub mod status;

pub use collections::{History, Itinerary, RecommendationSummaries, SavedItems};
pub use status::OperationStatus;
