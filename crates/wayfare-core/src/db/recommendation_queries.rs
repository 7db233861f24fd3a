//! Recommendation storage, lookup and rating.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::utils::{id_column, json_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{CityRecommendation, Recommendation},
};

const INSERT_RECOMMENDATION_SQL: &str =
    "INSERT INTO recommendations (survey_id, cities, created_at) VALUES (?1, ?2, ?3)";
const RECOMMENDATION_COLUMNS: &str = "r.id, r.survey_id, r.cities, r.rating, r.created_at";
const SELECT_OWNER_SQL: &str = "SELECT s.nickname FROM recommendations r \
     JOIN surveys s ON s.id = r.survey_id WHERE r.id = ?1";
const UPDATE_RATING_SQL: &str = "UPDATE recommendations SET rating = ?1 WHERE id = ?2";

fn recommendation_from_row(row: &Row<'_>) -> rusqlite::Result<Recommendation> {
    Ok(Recommendation {
        id: id_column(row, 0)?,
        survey_id: id_column(row, 1)?,
        cities: json_column(row, 2)?,
        rating: row.get(3)?,
        created_at: timestamp_column(row, 4)?,
    })
}

impl super::Database {
    /// Stores the guarded cities produced for a survey.
    pub fn create_recommendation(
        &mut self,
        survey_id: u64,
        cities: &[CityRecommendation],
    ) -> Result<Recommendation> {
        let now = Timestamp::now();
        let encoded = serde_json::to_string(cities)?;

        self.connection
            .execute(
                INSERT_RECOMMENDATION_SQL,
                params![survey_id as i64, encoded, now.to_string()],
            )
            .db_context("Failed to insert recommendation")?;

        Ok(Recommendation {
            id: self.connection.last_insert_rowid() as u64,
            survey_id,
            cities: cities.to_vec(),
            rating: None,
            created_at: now,
        })
    }

    /// Retrieves a recommendation by its ID.
    pub fn get_recommendation(&self, id: u64) -> Result<Option<Recommendation>> {
        let sql = format!("SELECT {RECOMMENDATION_COLUMNS} FROM recommendations r WHERE r.id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], recommendation_from_row)
            .optional()
            .db_context("Failed to query recommendation")
    }

    /// Retrieves the latest recommendation made for a survey.
    pub fn recommendation_for_survey(&self, survey_id: u64) -> Result<Option<Recommendation>> {
        let sql = format!(
            "SELECT {RECOMMENDATION_COLUMNS} FROM recommendations r \
             WHERE r.survey_id = ?1 ORDER BY r.id DESC LIMIT 1"
        );
        self.connection
            .query_row(&sql, params![survey_id as i64], recommendation_from_row)
            .optional()
            .db_context("Failed to query recommendation")
    }

    /// Lists all recommendations made for a nickname's surveys, newest first.
    pub fn list_recommendations(&self, nickname: &str) -> Result<Vec<Recommendation>> {
        let sql = format!(
            "SELECT {RECOMMENDATION_COLUMNS} FROM recommendations r \
             JOIN surveys s ON s.id = r.survey_id \
             WHERE s.nickname = ?1 ORDER BY r.id DESC"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let recommendations = stmt
            .query_map(params![nickname], recommendation_from_row)
            .db_context("Failed to query recommendations")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read recommendation row")?;
        Ok(recommendations)
    }

    /// Nickname owning the survey a recommendation was made for.
    pub fn recommendation_owner(&self, id: u64) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_OWNER_SQL, params![id as i64], |row| row.get(0))
            .optional()
            .db_context("Failed to query recommendation owner")
    }

    /// Sets the rating of a recommendation. Returns false when no
    /// recommendation has this ID.
    pub fn set_rating(&mut self, id: u64, rating: u8) -> Result<bool> {
        let updated = self
            .connection
            .execute(UPDATE_RATING_SQL, params![rating, id as i64])
            .db_context("Failed to update rating")?;
        Ok(updated > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Database;
    use crate::{
        models::{CityRecommendation, Preferences},
        schedule::{Activity, ScheduleMap},
    };

    fn cities() -> Vec<CityRecommendation> {
        vec![CityRecommendation {
            city: "Porto".to_string(),
            country: "Portugal".to_string(),
            reason: "River views.".to_string(),
            schedule: ScheduleMap::from([(
                "day_1".to_string(),
                vec![Activity::new("13:00-15:00", "Ribeira walk (walk)")],
            )]),
        }]
    }

    #[test]
    fn test_create_and_load_recommendation() {
        let mut db = Database::in_memory().unwrap();
        let survey = db.create_survey("mina", &Preferences::default()).unwrap();
        let created = db.create_recommendation(survey.id, &cities()).unwrap();

        assert_eq!(db.get_recommendation(created.id).unwrap(), Some(created.clone()));
        assert_eq!(db.recommendation_for_survey(survey.id).unwrap(), Some(created.clone()));
        assert_eq!(db.recommendation_owner(created.id).unwrap().as_deref(), Some("mina"));
        assert_eq!(db.list_recommendations("mina").unwrap(), vec![created]);
        assert!(db.list_recommendations("joon").unwrap().is_empty());
    }

    #[test]
    fn test_recommendation_requires_survey() {
        let mut db = Database::in_memory().unwrap();
        assert!(db.create_recommendation(99, &cities()).is_err());
    }

    #[test]
    fn test_rating_range_enforced_by_schema() {
        let mut db = Database::in_memory().unwrap();
        let survey = db.create_survey("mina", &Preferences::default()).unwrap();
        let rec = db.create_recommendation(survey.id, &cities()).unwrap();

        assert!(db.set_rating(rec.id, 4).unwrap());
        assert_eq!(db.get_recommendation(rec.id).unwrap().unwrap().rating, Some(4));
        assert!(db.set_rating(rec.id, 6).is_err());
        assert!(!db.set_rating(rec.id + 1, 3).unwrap());
    }

    #[test]
    fn test_delete_survey_cascades() {
        let mut db = Database::in_memory().unwrap();
        let survey = db.create_survey("mina", &Preferences::default()).unwrap();
        let rec = db.create_recommendation(survey.id, &cities()).unwrap();

        assert_eq!(db.history("mina").unwrap().len(), 1);
        assert!(db.delete_survey(survey.id).unwrap());
        assert!(db.get_recommendation(rec.id).unwrap().is_none());
        assert!(db.history("mina").unwrap().is_empty());
    }
}
