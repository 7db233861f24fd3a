//! Display implementations for domain models.
//!
//! Everything renders as markdown. Itineraries are printed in day order
//! (`day_2` before `day_10`) even though [`ScheduleMap`] keys sort
//! lexicographically.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

use crate::{
    models::{
        CityRecommendation, Preferences, Recommendation, RecommendOutcome,
        RecommendationSummary, SavedItem, Survey, SurveyDetail,
    },
    schedule::{day_index, Activity, DayPlan, ScheduleMap},
};

/// Renders a 1-5 rating as filled and empty stars.
pub(crate) fn stars(rating: Option<u8>) -> String {
    match rating {
        Some(r) => {
            let r = usize::from(r.min(5));
            format!("{}{}", "★".repeat(r), "☆".repeat(5 - r))
        }
        None => "Not rated".to_string(),
    }
}

/// Stored timestamps shown in the system timezone, to the minute.
fn local_time(timestamp: &Timestamp) -> String {
    timestamp
        .to_zoned(TimeZone::system())
        .strftime("%Y-%m-%d %H:%M %Z")
        .to_string()
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.time(), self.description()) {
            ("", Some(desc)) => write!(f, "- {desc}"),
            (time, Some(desc)) => write!(f, "- **{time}** {desc}"),
            ("", None) => write!(f, "- `{}`", self.as_value()),
            (time, None) => write!(f, "- **{time}**"),
        }
    }
}

fn fmt_day(f: &mut fmt::Formatter<'_>, day: &str, activities: &[Activity]) -> fmt::Result {
    writeln!(f, "### {day}")?;
    writeln!(f)?;
    if activities.is_empty() {
        writeln!(f, "Free day.")?;
    }
    for activity in activities {
        writeln!(f, "{activity}")?;
    }
    writeln!(f)
}

impl fmt::Display for DayPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_day(f, &self.day, &self.activities)
    }
}

fn fmt_schedule(f: &mut fmt::Formatter<'_>, schedule: &ScheduleMap) -> fmt::Result {
    let mut days: Vec<_> = schedule.iter().collect();
    days.sort_by_key(|(label, _)| day_index(label));
    for (label, activities) in days {
        fmt_day(f, label, activities)?;
    }
    Ok(())
}

impl fmt::Display for Preferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("Companions", self.companion.clone()),
            ("Style", self.style.join(", ")),
            ("Duration", self.duration.clone()),
            ("Transport", self.driving.clone()),
            ("Budget", self.budget.clone()),
            ("Climate", self.climate.clone()),
            ("Continent", self.continent.clone()),
            ("Pace", self.density.clone()),
        ];
        for (label, value) in fields.iter().filter(|(_, v)| !v.trim().is_empty()) {
            writeln!(f, "- **{label}**: {value}")?;
        }
        if let Some(window) = self.depart_window {
            writeln!(f, "- **Departure**: {window}")?;
        }
        if let Some(window) = self.return_window {
            writeln!(f, "- **Return**: {window}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Survey {}", self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Nickname**: {}", self.nickname)?;
        writeln!(f, "- **Submitted**: {}", local_time(&self.created_at))?;
        writeln!(f)?;
        writeln!(f, "## Preferences")?;
        writeln!(f)?;
        write!(f, "{}", self.preferences)
    }
}

impl fmt::Display for CityRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.country.is_empty() {
            writeln!(f, "## {}", self.city)?;
        } else {
            writeln!(f, "## {}, {}", self.city, self.country)?;
        }
        writeln!(f)?;
        if !self.reason.is_empty() {
            writeln!(f, "{}", self.reason)?;
            writeln!(f)?;
        }
        fmt_schedule(f, &self.schedule)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Recommendation {}", self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Survey**: {}", self.survey_id)?;
        writeln!(f, "- **Rating**: {}", stars(self.rating))?;
        writeln!(f, "- **Created**: {}", local_time(&self.created_at))?;
        writeln!(f)?;
        if self.cities.is_empty() {
            writeln!(f, "No cities in this recommendation.")?;
        }
        for city in &self.cities {
            write!(f, "{city}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RecommendationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.title, self.id)?;
        writeln!(f)?;
        if let Some(summary) = &self.summary {
            writeln!(f, "- **Summary**: {summary}")?;
        }
        writeln!(f, "- **Survey**: {}", self.survey_id)?;
        writeln!(f, "- **Rating**: {}", stars(self.rating))?;
        writeln!(f, "- **Created**: {}", local_time(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for SurveyDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.survey)?;
        writeln!(f)?;
        match &self.recommendation {
            Some(recommendation) => write!(f, "{recommendation}"),
            None => writeln!(f, "No recommendation for this survey yet."),
        }
    }
}

impl fmt::Display for RecommendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created recommendation {} for survey {}",
            self.recommendation_id, self.survey_id
        )?;
        writeln!(f)?;
        if self.cities.is_empty() {
            writeln!(f, "The generation service proposed no cities.")?;
        }
        for city in &self.cities {
            write!(f, "{city}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SavedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} {} (ID: {})",
            self.item_type.as_str(),
            self.item_id,
            self.id
        )?;
        writeln!(f)?;
        writeln!(f, "- **List**: {}", self.list)?;
        if let Some(note) = &self.note {
            writeln!(f, "- **Note**: {note}")?;
        }
        writeln!(f, "- **Saved**: {}", local_time(&self.created_at))?;
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use serde_json::json;

    use super::*;
    use crate::window::TimeWindow;

    fn city() -> CityRecommendation {
        CityRecommendation {
            city: "Kyoto".to_string(),
            country: "Japan".to_string(),
            reason: "Quiet temples.".to_string(),
            schedule: ScheduleMap::from([
                (
                    "day_10".to_string(),
                    vec![Activity::new("09:00-10:00", "Last walk")],
                ),
                (
                    "day_2".to_string(),
                    vec![Activity::new("13:00-14:00", "Lunch (subway)")],
                ),
                ("day_1".to_string(), vec![]),
            ]),
        }
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(Some(3)), "★★★☆☆");
        assert_eq!(stars(Some(5)), "★★★★★");
        assert_eq!(stars(None), "Not rated");
    }

    #[test]
    fn test_activity_display() {
        assert_eq!(
            Activity::new("09:00-10:00", "Cafe").to_string(),
            "- **09:00-10:00** Cafe"
        );
        assert_eq!(Activity::from(json!("free text")).to_string(), "- `\"free text\"`");
        assert_eq!(Activity::from(json!({ "activity": "Nap" })).to_string(), "- Nap");
    }

    #[test]
    fn test_city_schedule_in_day_order() {
        let output = city().to_string();

        let day_1 = output.find("### day_1").unwrap();
        let day_2 = output.find("### day_2").unwrap();
        let day_10 = output.find("### day_10").unwrap();
        assert!(day_1 < day_2 && day_2 < day_10);
        assert!(output.starts_with("## Kyoto, Japan"));
        assert!(output.contains("Free day."));
    }

    #[test]
    fn test_survey_detail_without_recommendation() {
        let detail = SurveyDetail {
            survey: Survey {
                id: 4,
                nickname: "mina".to_string(),
                preferences: Preferences {
                    companion: "family".to_string(),
                    style: vec!["food".to_string(), "nature".to_string()],
                    depart_window: Some(TimeWindow::Morning),
                    ..Default::default()
                },
                created_at: Timestamp::from_second(1_640_995_200).unwrap(),
            },
            recommendation: None,
        };

        let output = detail.to_string();
        assert!(output.starts_with("# Survey 4"));
        assert!(output.contains("- **Style**: food, nature"));
        assert!(output.contains("- **Departure**: morning"));
        assert!(!output.contains("Budget"));
        assert!(output.contains("No recommendation for this survey yet."));
    }

    #[test]
    fn test_outcome_display() {
        let outcome = RecommendOutcome {
            survey_id: 1,
            recommendation_id: 2,
            cities: vec![city()],
        };
        let output = outcome.to_string();
        assert!(output.starts_with("Created recommendation 2 for survey 1"));
        assert!(output.contains("**13:00-14:00** Lunch (subway)"));
    }
}
