//! High-level recommendation service.
//!
//! [`Recommender`] ties the survey store, the prompt builder, the generation
//! service and the itinerary guard together:
//!
//! ```text
//! survey ──▶ save ──▶ build_prompt ──▶ Generator ──▶ per city:
//!                                                   normalize ─▶ guard ─▶ to map
//!                                                                          │
//!                                             RecommendOutcome ◀── save ◀──┘
//! ```
//!
//! Database work runs on the blocking thread pool with a fresh connection per
//! call. Records are owned by nickname; reading or changing someone else's
//! record yields `WayfareError::Forbidden`, a missing one its own
//! not-found error.
//!
//! ```rust,no_run
//! use wayfare_core::{params::Nickname, RecommenderBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let recommender = RecommenderBuilder::new()
//!     .with_database_path(Some("wayfare.db"))
//!     .build()
//!     .await?;
//!
//! let history = recommender
//!     .history(&Nickname { nickname: "mina".to_string() })
//!     .await?;
//! println!("{} past trips", history.len());
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, WayfareError},
    generation::Generator,
    models::Survey,
};

pub mod builder;
pub mod pipeline;
pub mod recommendation_ops;
pub mod saved_ops;
pub mod survey_ops;


pub use builder::RecommenderBuilder;
pub use pipeline::guard_reply;

/// Main service interface for surveys, recommendations and saved items.
#[derive(Clone)]
pub struct Recommender {
    pub(crate) db_path: PathBuf,
    pub(crate) generator: Option<Arc<dyn Generator>>,
}

impl Recommender {
    pub(crate) fn new(db_path: PathBuf, generator: Option<Arc<dyn Generator>>) -> Self {
        Self { db_path, generator }
    }

    /// Runs `f` against a fresh connection on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(WayfareError::join)?
    }
}

/// Trims a nickname, rejecting blank ones.
pub(crate) fn validate_nickname(nickname: &str) -> Result<String> {
    let trimmed = nickname.trim();
    if trimmed.is_empty() {
        return Err(WayfareError::invalid_input("nickname").with_reason("must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Loads a survey and checks that `nickname` owns it.
pub(crate) fn owned_survey(db: &Database, id: u64, nickname: &str) -> Result<Survey> {
    let survey = db
        .get_survey(id)?
        .ok_or(WayfareError::SurveyNotFound { id })?;
    if survey.nickname != nickname {
        return Err(WayfareError::Forbidden {
            resource: "survey",
            id,
        });
    }
    Ok(survey)
}

/// Checks that the recommendation exists and `nickname` owns it.
pub(crate) fn check_recommendation_owner(db: &Database, id: u64, nickname: &str) -> Result<()> {
    match db.recommendation_owner(id)? {
        None => Err(WayfareError::RecommendationNotFound { id }),
        Some(owner) if owner != nickname => Err(WayfareError::Forbidden {
            resource: "recommendation",
            id,
        }),
        Some(_) => Ok(()),
    }
}
