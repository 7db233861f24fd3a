//! Survey history operations for the Recommender.

use super::{owned_survey, validate_nickname, Recommender};
use crate::{
    error::Result,
    models::{HistoryEntry, SurveyDetail},
    params::{Nickname, OwnedId},
};

impl Recommender {
    /// Lists `(survey, recommendation)` pairs for a nickname, newest first.
    pub async fn history(&self, params: &Nickname) -> Result<Vec<HistoryEntry>> {
        let nickname = validate_nickname(&params.nickname)?;
        self.with_db(move |db| db.history(&nickname)).await
    }

    /// Shows a survey with its latest recommendation.
    pub async fn survey_detail(&self, params: &OwnedId) -> Result<SurveyDetail> {
        let nickname = validate_nickname(&params.nickname)?;
        let id = params.id;

        self.with_db(move |db| {
            let survey = owned_survey(db, id, &nickname)?;
            let recommendation = db.recommendation_for_survey(id)?;
            Ok(SurveyDetail {
                survey,
                recommendation,
            })
        })
        .await
    }

    /// Permanently deletes a survey together with its recommendations.
    pub async fn delete_survey(&self, params: &OwnedId) -> Result<()> {
        let nickname = validate_nickname(&params.nickname)?;
        let id = params.id;

        self.with_db(move |db| {
            owned_survey(db, id, &nickname)?;
            db.delete_survey(id)?;
            Ok(())
        })
        .await
    }
}
