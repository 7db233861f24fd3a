//! Survey CRUD operations and history queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::utils::{id_column, json_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{HistoryEntry, Preferences, Survey},
};

const INSERT_SURVEY_SQL: &str =
    "INSERT INTO surveys (nickname, preferences, created_at) VALUES (?1, ?2, ?3)";
const SELECT_SURVEY_SQL: &str =
    "SELECT id, nickname, preferences, created_at FROM surveys WHERE id = ?1";
const SELECT_HISTORY_SQL: &str = "SELECT s.id, r.id FROM surveys s \
     JOIN recommendations r ON r.survey_id = s.id \
     WHERE s.nickname = ?1 ORDER BY s.id DESC, r.id DESC";
const DELETE_SURVEY_SAVED_ITEMS_SQL: &str = "DELETE FROM saved_items \
     WHERE item_type = 'recommendation' \
     AND item_id IN (SELECT id FROM recommendations WHERE survey_id = ?1)";
const DELETE_SURVEY_SQL: &str = "DELETE FROM surveys WHERE id = ?1";

fn survey_from_row(row: &Row<'_>) -> rusqlite::Result<Survey> {
    Ok(Survey {
        id: id_column(row, 0)?,
        nickname: row.get(1)?,
        preferences: json_column(row, 2)?,
        created_at: timestamp_column(row, 3)?,
    })
}

impl super::Database {
    /// Stores a survey for the given nickname.
    pub fn create_survey(&mut self, nickname: &str, preferences: &Preferences) -> Result<Survey> {
        let now = Timestamp::now();
        let encoded = serde_json::to_string(preferences)?;

        self.connection
            .execute(
                INSERT_SURVEY_SQL,
                params![nickname, encoded, now.to_string()],
            )
            .db_context("Failed to insert survey")?;

        Ok(Survey {
            id: self.connection.last_insert_rowid() as u64,
            nickname: nickname.to_string(),
            preferences: preferences.clone(),
            created_at: now,
        })
    }

    /// Retrieves a survey by its ID.
    pub fn get_survey(&self, id: u64) -> Result<Option<Survey>> {
        self.connection
            .query_row(SELECT_SURVEY_SQL, params![id as i64], survey_from_row)
            .optional()
            .db_context("Failed to query survey")
    }

    /// Lists `(survey, recommendation)` pairs for a nickname, newest first.
    ///
    /// Surveys without a recommendation do not appear.
    pub fn history(&self, nickname: &str) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_HISTORY_SQL)
            .db_context("Failed to prepare query")?;

        let entries = stmt
            .query_map(params![nickname], |row| {
                Ok(HistoryEntry {
                    survey_id: id_column(row, 0)?,
                    recommendation_id: id_column(row, 1)?,
                })
            })
            .db_context("Failed to query history")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read history row")?;
        Ok(entries)
    }

    /// Deletes a survey, its recommendations and any saved references to
    /// them. Returns false when no survey has this ID.
    pub fn delete_survey(&mut self, id: u64) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_SURVEY_SAVED_ITEMS_SQL, params![id as i64])
            .db_context("Failed to delete saved items")?;
        let deleted = tx
            .execute(DELETE_SURVEY_SQL, params![id as i64])
            .db_context("Failed to delete survey")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(deleted > 0)
    }
}
