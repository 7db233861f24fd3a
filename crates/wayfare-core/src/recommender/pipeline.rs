//! The survey-to-recommendation pipeline.

use log::{info, warn};

use super::{validate_nickname, Recommender};
use crate::{
    error::{Result, WayfareError},
    generation::GenerationReply,
    models::{CityRecommendation, Preferences, RecommendOutcome},
    params::Recommend,
    prompt::build_prompt,
    schedule::{array_to_map, ItineraryGuard, Unshaped},
};

/// Guards every city of a generation reply against the survey's windows and
/// converts the itineraries to keyed form.
///
/// Itineraries are truncated to the survey's trip length.
pub fn guard_reply(reply: GenerationReply, preferences: &Preferences) -> Vec<CityRecommendation> {
    let guard = ItineraryGuard::new(
        preferences.days() as usize,
        preferences.depart_window,
        preferences.return_window,
    )
    .with_pace(Some(preferences.pace()));

    reply
        .data
        .into_iter()
        .map(|plan| {
            let days = guard.apply(&Unshaped::from(&plan.schedule));
            CityRecommendation {
                city: plan.city,
                country: plan.country,
                reason: plan.reason,
                schedule: array_to_map(&days),
            }
        })
        .collect()
}

impl Recommender {
    /// Stores a survey, asks the generation service for cities and stores the
    /// guarded result.
    ///
    /// # Errors
    ///
    /// Generation failures surface as `WayfareError::GenerationUnavailable`
    /// or `WayfareError::MalformedGeneration`. The survey is kept in that
    /// case so the request can be retried or inspected.
    pub async fn recommend(&self, params: &Recommend) -> Result<RecommendOutcome> {
        let nickname = validate_nickname(&params.nickname)?;
        let generator = self
            .generator
            .clone()
            .ok_or_else(|| WayfareError::Configuration {
                message: "No generation service configured".to_string(),
            })?;

        let preferences = params.preferences.clone();
        let survey = {
            let preferences = preferences.clone();
            self.with_db(move |db| db.create_survey(&nickname, &preferences))
                .await?
        };
        info!("Stored survey {} for {}", survey.id, survey.nickname);

        let prompt = build_prompt(&preferences);
        let reply = generator.generate(&prompt).await.map_err(|e| {
            warn!("Generation failed for survey {}: {e}", survey.id);
            e
        })?;

        let cities = guard_reply(reply, &preferences);
        let survey_id = survey.id;
        let recommendation = {
            let cities = cities.clone();
            self.with_db(move |db| db.create_recommendation(survey_id, &cities))
                .await?
        };
        info!(
            "Stored recommendation {} with {} cities",
            recommendation.id,
            cities.len()
        );

        Ok(RecommendOutcome {
            survey_id,
            recommendation_id: recommendation.id,
            cities,
        })
    }
}
