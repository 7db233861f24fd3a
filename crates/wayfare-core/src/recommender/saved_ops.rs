//! Bookmark and wishlist operations for the Recommender.

use super::{check_recommendation_owner, validate_nickname, Recommender};
use crate::{
    error::{Result, WayfareError},
    models::{ItemType, SavedItem, NOTE_MAX_CHARS},
    params::{ListSaved, RemoveItem, SaveItem},
};

fn validate_note(note: Option<&str>) -> Result<Option<String>> {
    let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if note.chars().count() > NOTE_MAX_CHARS {
        return Err(WayfareError::invalid_input("note")
            .with_reason(format!("must be at most {NOTE_MAX_CHARS} characters")));
    }
    Ok(Some(note.to_string()))
}

impl Recommender {
    /// Adds an item to a bookmark or wishlist.
    ///
    /// Adding an item that is already on the list returns the existing entry,
    /// with its note replaced when a new one is given.
    pub async fn save_item(&self, params: &SaveItem) -> Result<SavedItem> {
        let nickname = validate_nickname(&params.nickname)?;
        let note = validate_note(params.note.as_deref())?;
        let (list, item_type, item_id) = (params.list, params.item_type, params.item_id);

        self.with_db(move |db| {
            match item_type {
                ItemType::Recommendation => check_recommendation_owner(db, item_id, &nickname)?,
            }
            db.save_item(&nickname, list, item_type, item_id, note.as_deref())
        })
        .await
    }

    /// Removes an item from a bookmark or wishlist. Returns false when the
    /// item was not on the list.
    pub async fn remove_item(&self, params: &RemoveItem) -> Result<bool> {
        let nickname = validate_nickname(&params.nickname)?;
        let (list, item_type, item_id) = (params.list, params.item_type, params.item_id);

        self.with_db(move |db| db.remove_item(&nickname, list, item_type, item_id))
            .await
    }

    /// Lists a bookmark or wishlist, newest first.
    pub async fn list_items(&self, params: &ListSaved) -> Result<Vec<SavedItem>> {
        let nickname = validate_nickname(&params.nickname)?;
        let list = params.list;

        self.with_db(move |db| db.list_items(&nickname, list)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_note() {
        assert_eq!(validate_note(None).unwrap(), None);
        assert_eq!(validate_note(Some("   ")).unwrap(), None);
        assert_eq!(validate_note(Some(" Spring ")).unwrap().as_deref(), Some("Spring"));
        assert!(validate_note(Some(&"가".repeat(NOTE_MAX_CHARS))).is_ok());
        assert!(validate_note(Some(&"a".repeat(NOTE_MAX_CHARS + 1))).is_err());
    }
}
