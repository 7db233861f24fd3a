//! Prompt construction for the itinerary generation service.
//!
//! The prompt carries the survey answers plus hard time rules derived from
//! [`WindowBounds`]. The guard later enforces the same bounds, so the numbers
//! quoted here always come from the shared tables rather than literals.

use serde::{Deserialize, Serialize};

use crate::{
    duration::extract_days,
    models::Preferences,
    schedule::format_range,
    window::{TimeWindow, WindowBounds, LATE_ARRIVAL_POLICY},
};

/// Travel tempo selected in the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Relaxed,
    #[default]
    Moderate,
    Active,
}

impl Pace {
    /// Reads a pace keyword out of freeform text. Anything unrecognized is
    /// [`Pace::Moderate`].
    pub fn parse(density: &str) -> Self {
        let density = density.to_lowercase();
        if density.contains("느긋") || density.contains("relax") {
            Self::Relaxed
        } else if density.contains("활동") || density.contains("active") {
            Self::Active
        } else {
            Self::Moderate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relaxed => "relaxed",
            Self::Moderate => "moderate",
            Self::Active => "active",
        }
    }
}

/// Activities per day, block length and routing rule for a pace.
pub fn pace_rule(pace: Pace) -> &'static str {
    match pace {
        Pace::Relaxed => {
            "2-3 activities per day, blocks of 2-3 hours, include cafes and rest, \
             keep routes simple."
        }
        Pace::Moderate => {
            "3-4 activities per day, blocks of 1-2 hours, balance travel and rest."
        }
        Pace::Active => {
            "4-5 activities per day, blocks of about 1 hour, optimize routes to \
             minimize transfers and include plenty of hands-on experiences."
        }
    }
}

/// Evening composition rule for the regular days of a trip of `days` days.
pub fn evening_rule(pace: Pace, days: u32) -> String {
    let last_regular = days.saturating_sub(1).max(2);
    let (content, end) = match pace {
        Pace::Relaxed => (
            "include at least one of 'dinner' or 'a light night walk / sunset view'",
            "19:30-20:00",
        ),
        Pace::Moderate => (
            "include at least one of 'dinner' or 'night view / night market / observatory'",
            "20:00-20:30",
        ),
        Pace::Active => (
            "include 'dinner' and at least one night highlight such as a night view, \
             night market or observatory",
            "20:30-21:00",
        ),
    };
    format!(
        "On regular days (day_2 to day_{last_regular}) {content}, and end the day \
         around {end}."
    )
}

fn or_unspecified(value: &str) -> &str {
    if value.trim().is_empty() {
        "unspecified"
    } else {
        value
    }
}

/// Builds the full generation prompt for a survey.
pub fn build_prompt(preferences: &Preferences) -> String {
    let days = extract_days(&preferences.duration);
    let bounds = WindowBounds::resolve(preferences.depart_window, preferences.return_window);
    let pace = preferences.pace();
    let min_start = bounds.min_start_label();
    let arrival = format_range(bounds.min_start, bounds.min_start + 60);
    let first_meal = format_range(bounds.min_start + 90, bounds.min_start + 180);
    let styles: Vec<&str> = preferences
        .style
        .iter()
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
        .collect();
    let window_label = |w: Option<TimeWindow>| w.map_or("unspecified", |w| w.as_str());

    format!(
        r#"You are a seasoned travel consultant who has been all over the world.
Reflect the traveller's preferences below, recommend 2-3 cities worldwide that suit a {days}-day trip, and write a detailed day-by-day itinerary for each city.

[Traveller preferences]
- Companions: {companion}
- Travel style (themes): {styles}
- Transportation: {driving}
- Budget: {budget}
- Preferred climate: {climate}
- Preferred continent: {continent}
- Pace (relaxed/moderate/active): {density}
- Departure window: {depart}  (one of dawn/morning/afternoon/evening)
- Return window: {ret}  (one of dawn/morning/afternoon/evening)

[Absolute time rules]
- The first activity of day 1 must start at {min_start} or later.
- {late_policy}
- The last day must follow this policy: {last_policy}

[Pace rules]
- Apply the following for a "{pace}" pace: {pace_rule}

[Evening rules (all paces)]
- {evening_rule}
- Never leave a gap of more than 60 minutes within a day.
- Relax these rules on the first and last day as the flight windows require, while keeping the way home safe.

[Itinerary guide]
- Each day usually has 3-5 activities (relaxed: 2-3, moderate: 3-4, active: 4-5).
- Every activity has a "time" (HH:MM-HH:MM) and an "activity" (concise description) field.
- Put the means of transport in parentheses, e.g. (subway), (bus), (walk), (taxi), (rental car).
- Include one photo spot, one local food stop and one cultural experience per day.
- The last day reflects airport transfer, check-out and departure; do not overload it with sightseeing.
- Avoid exaggerated or promotional wording; use clear, actionable descriptions.
- Optimize routes and avoid unnecessary back-and-forth.

[Strict output requirements]
- Return **JSON only**. No prose, explanations, greetings, markdown code fences or comments.
- Use **exact JSON syntax**. Every key and string uses **double quotes**; never single quotes.
- **No trailing commas** after the last element of an array or object.
- Whitespace is free, but values must not contain control characters or needless backslash escapes.
- **No fields beyond the schema**, and no required field may be missing.

[Final JSON schema]
{{
  "data": [
    {{
      "city": "string (city name)",
      "country": "string (country name)",
      "reason": "string (warm reason for the recommendation; 1-2 sentences, no exaggeration)",
      "schedule": [
        {{
          "day": "string (e.g. day_1)",
          "activities": [
            {{
              "time": "string (HH:MM-HH:MM)",
              "activity": "string (description; transport in parentheses)"
            }}
          ]
        }}
      ]
    }}
  ]
}}

[JSON example (format reference only; generate your own values)]
{{
  "data": [
    {{
      "city": "Kyoto",
      "country": "Japan",
      "reason": "Traditional atmosphere and seasonal scenery make it ideal for quiet walks and cultural experiences.",
      "schedule": [
        {{
          "day": "day_1",
          "activities": [
            {{ "time": "{arrival}", "activity": "Arrival, check-in, walk around the neighbourhood (walk)" }},
            {{ "time": "{first_meal}", "activity": "Meal at a local restaurant (walk)" }}
          ]
        }},
        {{
          "day": "day_2",
          "activities": [
            {{ "time": "09:00-10:00", "activity": "Temple visit and photo spot (subway)" }},
            {{ "time": "10:30-12:00", "activity": "Walk through the old town (walk)" }},
            {{ "time": "12:00-13:00", "activity": "Home-style local lunch (walk)" }},
            {{ "time": "14:00-15:30", "activity": "Tea ceremony or craft class (bus)" }},
            {{ "time": "18:30-20:00", "activity": "Dinner or night view spot (walk/subway)" }}
          ]
        }}
      ]
    }}
  ]
}}"#,
        companion = preferences.companion,
        styles = if styles.is_empty() {
            "unspecified".to_string()
        } else {
            styles.join(", ")
        },
        driving = preferences.driving,
        budget = preferences.budget,
        climate = preferences.climate,
        continent = preferences.continent,
        density = or_unspecified(&preferences.density),
        depart = window_label(preferences.depart_window),
        ret = window_label(preferences.return_window),
        late_policy = LATE_ARRIVAL_POLICY,
        last_policy = bounds.last_day_policy(),
        pace = pace.as_str(),
        pace_rule = pace_rule(pace),
        evening_rule = evening_rule(pace, days),
    )
}
