mod common;

use common::create_test_recommender;
use wayfare_core::{
    models::{HistoryEntry, Preferences, SavedList},
    params::{ListSaved, Nickname, OwnedId, RateRecommendation, Recommend, SaveItem},
    TimeWindow, WayfareError,
};

const REPLY: &str = r#"{
  "data": [
    {
      "city": "Lisbon",
      "country": "Portugal",
      "reason": "Hills, trams and custard tarts.",
      "schedule": {
        "day_2": [{ "time": "15:00-17:00", "activity": "Tram 28 (tram)" }],
        "day_1": [{ "time": "08:00-10:00", "activity": "Pasteis de Belem (walk)" }],
        "day_3": [{ "time": "10:00-12:00", "activity": "Beyond the trip" }]
      }
    },
    {
      "city": "Porto",
      "country": "Portugal",
      "reason": "Port cellars.",
      "schedule": [{ "time": "13:00-14:00", "activity": "Lunch by the river (walk)" }]
    }
  ]
}"#;

fn request(nickname: &str) -> Recommend {
    Recommend {
        nickname: nickname.to_string(),
        preferences: Preferences {
            companion: "partner".to_string(),
            style: vec!["food".to_string()],
            duration: "1박 2일".to_string(),
            density: "moderate".to_string(),
            depart_window: Some(TimeWindow::Dawn),
            return_window: Some(TimeWindow::Evening),
            ..Default::default()
        },
    }
}

fn nickname(name: &str) -> Nickname {
    Nickname {
        nickname: name.to_string(),
    }
}

#[tokio::test]
async fn test_recommend_guards_every_city() {
    let (_temp_dir, recommender) = create_test_recommender(REPLY).await;

    let outcome = recommender.recommend(&request("mina")).await.unwrap();
    assert_eq!(outcome.cities.len(), 2);

    let lisbon = &outcome.cities[0].schedule;
    assert_eq!(lisbon.len(), 2);
    assert_eq!(lisbon["day_1"][0].time(), "09:00-10:00");
    assert_eq!(lisbon["day_2"][0].time(), "15:00-16:30");
    assert!(!lisbon.contains_key("day_3"));

    let porto = &outcome.cities[1].schedule;
    assert_eq!(porto["day_1"][0].time(), "13:00-14:00");
}

#[tokio::test]
#[allow(clippy::too_many_lines)]
async fn test_complete_recommendation_workflow() {
    let (_temp_dir, recommender) = create_test_recommender(REPLY).await;

    let first = recommender.recommend(&request("mina")).await.unwrap();
    let second = recommender.recommend(&request("mina")).await.unwrap();
    assert_eq!((first.survey_id, first.recommendation_id), (1, 1));
    assert_eq!((second.survey_id, second.recommendation_id), (2, 2));

    // Newest first
    let history = recommender.history(&nickname("mina")).await.unwrap();
    assert_eq!(
        history,
        [
            HistoryEntry {
                survey_id: 2,
                recommendation_id: 2
            },
            HistoryEntry {
                survey_id: 1,
                recommendation_id: 1
            },
        ]
    );
    let ids: Vec<u64> = recommender
        .list_recommendations(&nickname("mina"))
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, [2, 1]);

    let summaries = recommender
        .list_recommendation_summaries(&nickname("mina"))
        .await
        .unwrap();
    assert_eq!(summaries.0[0].title, "Lisbon, Portugal");
    assert_eq!(
        summaries.0[0].summary.as_deref(),
        Some("Hills, trams and custard tarts.")
    );

    let rated = recommender
        .rate_recommendation(&RateRecommendation {
            id: first.recommendation_id,
            nickname: "mina".to_string(),
            rating: 5,
        })
        .await
        .unwrap();
    assert_eq!(rated.rating, Some(5));

    let bookmark = recommender
        .save_item(&SaveItem {
            nickname: "mina".to_string(),
            list: SavedList::Bookmark,
            item_type: Default::default(),
            item_id: first.recommendation_id,
            note: Some("Anniversary".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(bookmark.note.as_deref(), Some("Anniversary"));

    recommender
        .save_item(&SaveItem {
            nickname: "mina".to_string(),
            list: SavedList::Wishlist,
            item_type: Default::default(),
            item_id: second.recommendation_id,
            note: None,
        })
        .await
        .unwrap();

    let detail = recommender
        .survey_detail(&OwnedId {
            id: first.survey_id,
            nickname: "mina".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(detail.survey.preferences.days(), 2);
    assert_eq!(
        detail.recommendation.map(|r| r.id),
        Some(first.recommendation_id)
    );

    // Deleting a survey takes its recommendation and saved references along
    recommender
        .delete_survey(&OwnedId {
            id: first.survey_id,
            nickname: "mina".to_string(),
        })
        .await
        .unwrap();

    let history = recommender.history(&nickname("mina")).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].survey_id, second.survey_id);

    let bookmarks = recommender
        .list_items(&ListSaved {
            nickname: "mina".to_string(),
            list: SavedList::Bookmark,
        })
        .await
        .unwrap();
    assert!(bookmarks.is_empty());

    let wishlist = recommender
        .list_items(&ListSaved {
            nickname: "mina".to_string(),
            list: SavedList::Wishlist,
        })
        .await
        .unwrap();
    assert_eq!(wishlist.len(), 1);
    assert_eq!(wishlist[0].item_id, second.recommendation_id);

    let err = recommender
        .get_recommendation(&OwnedId {
            id: first.recommendation_id,
            nickname: "mina".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, WayfareError::RecommendationNotFound { id: 1 }));
}

#[tokio::test]
async fn test_nicknames_are_isolated() {
    let (_temp_dir, recommender) = create_test_recommender(REPLY).await;
    recommender.recommend(&request("mina")).await.unwrap();

    assert!(recommender
        .history(&nickname("joon"))
        .await
        .unwrap()
        .is_empty());
    assert!(recommender
        .list_recommendations(&nickname("joon"))
        .await
        .unwrap()
        .is_empty());

    let err = recommender
        .survey_detail(&OwnedId {
            id: 1,
            nickname: "joon".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WayfareError::Forbidden {
            resource: "survey",
            id: 1
        }
    ));
}

#[tokio::test]
async fn test_reply_without_cities_is_stored_empty() {
    let (_temp_dir, recommender) = create_test_recommender(r#"{"data": []}"#).await;

    let outcome = recommender.recommend(&request("mina")).await.unwrap();
    assert!(outcome.cities.is_empty());

    let stored = recommender
        .get_recommendation(&OwnedId {
            id: outcome.recommendation_id,
            nickname: "mina".to_string(),
        })
        .await
        .unwrap();
    assert!(stored.cities.is_empty());
}
