//! Recommendation listing and rating for the Recommender.

use super::{check_recommendation_owner, validate_nickname, Recommender};
use crate::{
    display::RecommendationSummaries,
    error::{Result, WayfareError},
    models::{Recommendation, RecommendationSummary},
    params::{Nickname, OwnedId, RateRecommendation},
};

impl Recommender {
    /// Lists every recommendation made for a nickname, newest first.
    pub async fn list_recommendations(&self, params: &Nickname) -> Result<Vec<Recommendation>> {
        let nickname = validate_nickname(&params.nickname)?;
        self.with_db(move |db| db.list_recommendations(&nickname))
            .await
    }

    /// Same as [`list_recommendations`](Self::list_recommendations), reduced
    /// to summaries for list display.
    pub async fn list_recommendation_summaries(
        &self,
        params: &Nickname,
    ) -> Result<RecommendationSummaries> {
        let recommendations = self.list_recommendations(params).await?;
        Ok(RecommendationSummaries(
            recommendations
                .iter()
                .map(RecommendationSummary::from)
                .collect(),
        ))
    }

    /// Retrieves a recommendation owned by the caller.
    pub async fn get_recommendation(&self, params: &OwnedId) -> Result<Recommendation> {
        let nickname = validate_nickname(&params.nickname)?;
        let id = params.id;

        self.with_db(move |db| {
            check_recommendation_owner(db, id, &nickname)?;
            db.get_recommendation(id)?
                .ok_or(WayfareError::RecommendationNotFound { id })
        })
        .await
    }

    /// Rates a recommendation from 1 to 5 and returns it updated.
    pub async fn rate_recommendation(&self, params: &RateRecommendation) -> Result<Recommendation> {
        let nickname = validate_nickname(&params.nickname)?;
        if !(1..=5).contains(&params.rating) {
            return Err(WayfareError::invalid_input("rating").with_reason("must be between 1 and 5"));
        }
        let (id, rating) = (params.id, params.rating);

        self.with_db(move |db| {
            check_recommendation_owner(db, id, &nickname)?;
            db.set_rating(id, rating)?;
            db.get_recommendation(id)?
                .ok_or(WayfareError::RecommendationNotFound { id })
        })
        .await
    }
}
