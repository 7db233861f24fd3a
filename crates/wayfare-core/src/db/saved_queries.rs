//! Bookmark and wishlist storage.

use jiff::Timestamp;
use rusqlite::{params, Row};

use super::utils::{id_column, parsed_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{ItemType, SavedItem, SavedList},
};

// Re-adding an item keeps its original row; a new note replaces the old one.
const UPSERT_SAVED_ITEM_SQL: &str = "INSERT INTO saved_items \
     (nickname, list, item_type, item_id, note, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
     ON CONFLICT (nickname, list, item_type, item_id) \
     DO UPDATE SET note = COALESCE(excluded.note, saved_items.note)";
const SAVED_ITEM_COLUMNS: &str = "id, nickname, list, item_type, item_id, note, created_at";
const DELETE_SAVED_ITEM_SQL: &str = "DELETE FROM saved_items \
     WHERE nickname = ?1 AND list = ?2 AND item_type = ?3 AND item_id = ?4";

fn saved_item_from_row(row: &Row<'_>) -> rusqlite::Result<SavedItem> {
    Ok(SavedItem {
        id: id_column(row, 0)?,
        nickname: row.get(1)?,
        list: parsed_column(row, 2)?,
        item_type: parsed_column(row, 3)?,
        item_id: id_column(row, 4)?,
        note: row.get(5)?,
        created_at: timestamp_column(row, 6)?,
    })
}

impl super::Database {
    /// Adds an item to a nickname's list, or updates the note of an item
    /// already on it.
    pub fn save_item(
        &mut self,
        nickname: &str,
        list: SavedList,
        item_type: ItemType,
        item_id: u64,
        note: Option<&str>,
    ) -> Result<SavedItem> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            UPSERT_SAVED_ITEM_SQL,
            params![
                nickname,
                list.as_str(),
                item_type.as_str(),
                item_id as i64,
                note,
                Timestamp::now().to_string()
            ],
        )
        .db_context("Failed to save item")?;

        let sql = format!(
            "SELECT {SAVED_ITEM_COLUMNS} FROM saved_items \
             WHERE nickname = ?1 AND list = ?2 AND item_type = ?3 AND item_id = ?4"
        );
        let item = tx
            .query_row(
                &sql,
                params![nickname, list.as_str(), item_type.as_str(), item_id as i64],
                saved_item_from_row,
            )
            .db_context("Failed to read saved item")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(item)
    }

    /// Removes an item from a nickname's list. Returns false when it was not
    /// on the list.
    pub fn remove_item(
        &mut self,
        nickname: &str,
        list: SavedList,
        item_type: ItemType,
        item_id: u64,
    ) -> Result<bool> {
        let removed = self
            .connection
            .execute(
                DELETE_SAVED_ITEM_SQL,
                params![nickname, list.as_str(), item_type.as_str(), item_id as i64],
            )
            .db_context("Failed to remove saved item")?;
        Ok(removed > 0)
    }

    /// Lists a nickname's saved items, newest first.
    pub fn list_items(&self, nickname: &str, list: SavedList) -> Result<Vec<SavedItem>> {
        let sql = format!(
            "SELECT {SAVED_ITEM_COLUMNS} FROM saved_items \
             WHERE nickname = ?1 AND list = ?2 ORDER BY id DESC"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let items = stmt
            .query_map(params![nickname, list.as_str()], saved_item_from_row)
            .db_context("Failed to query saved items")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read saved item row")?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Database;
    use crate::models::{ItemType, SavedList};

    #[test]
    fn test_save_is_idempotent() {
        let mut db = Database::in_memory().unwrap();
        let first = db
            .save_item("mina", SavedList::Bookmark, ItemType::Recommendation, 3, None)
            .unwrap();
        let again = db
            .save_item("mina", SavedList::Bookmark, ItemType::Recommendation, 3, Some("Autumn"))
            .unwrap();
        let kept = db
            .save_item("mina", SavedList::Bookmark, ItemType::Recommendation, 3, None)
            .unwrap();

        assert_eq!(first.id, again.id);
        assert_eq!(again.note.as_deref(), Some("Autumn"));
        assert_eq!(kept.note.as_deref(), Some("Autumn"));
        assert_eq!(kept.created_at, first.created_at);
        assert_eq!(db.list_items("mina", SavedList::Bookmark).unwrap().len(), 1);
    }

    #[test]
    fn test_lists_are_separate() {
        let mut db = Database::in_memory().unwrap();
        db.save_item("mina", SavedList::Bookmark, ItemType::Recommendation, 1, None)
            .unwrap();
        db.save_item("mina", SavedList::Wishlist, ItemType::Recommendation, 1, None)
            .unwrap();
        db.save_item("mina", SavedList::Wishlist, ItemType::Recommendation, 2, None)
            .unwrap();
        db.save_item("joon", SavedList::Wishlist, ItemType::Recommendation, 2, None)
            .unwrap();

        let wishlist: Vec<u64> = db
            .list_items("mina", SavedList::Wishlist)
            .unwrap()
            .iter()
            .map(|item| item.item_id)
            .collect();
        assert_eq!(wishlist, [2, 1]);
        assert_eq!(db.list_items("mina", SavedList::Bookmark).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut db = Database::in_memory().unwrap();
        db.save_item("mina", SavedList::Bookmark, ItemType::Recommendation, 1, None)
            .unwrap();

        assert!(db
            .remove_item("mina", SavedList::Bookmark, ItemType::Recommendation, 1)
            .unwrap());
        assert!(!db
            .remove_item("mina", SavedList::Bookmark, ItemType::Recommendation, 1)
            .unwrap());
        assert!(db.list_items("mina", SavedList::Bookmark).unwrap().is_empty());
    }
}
