//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::{
    models::{HistoryEntry, RecommendationSummary, SavedItem},
    schedule::DayPlan,
};

/// Newtype wrapper for displaying a canonical itinerary.
pub struct Itinerary(pub Vec<DayPlan>);

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No days in this itinerary.")
        } else {
            for day in &self.0 {
                write!(f, "{day}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a nickname's survey history.
pub struct History(pub Vec<HistoryEntry>);

impl History {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No history found.");
        }
        for entry in &self.0 {
            writeln!(
                f,
                "- Survey {} → recommendation {}",
                entry.survey_id, entry.recommendation_id
            )?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying recommendation summaries.
pub struct RecommendationSummaries(pub Vec<RecommendationSummary>);

impl RecommendationSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecommendationSummary> {
        self.0.iter()
    }
}

impl fmt::Display for RecommendationSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No recommendations found.")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying bookmarks or wishlist entries.
pub struct SavedItems(pub Vec<SavedItem>);

impl SavedItems {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SavedItem> {
        self.0.iter()
    }
}

impl fmt::Display for SavedItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No saved items found.")
        } else {
            for item in &self.0 {
                write!(f, "{item}")?;
            }
            Ok(())
        }
    }
}
