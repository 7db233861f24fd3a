//! Command handlers for the `wf` binary.
//!
//! `prompt` and `guard` work on files alone; everything else goes through
//! the [`Recommender`] and renders the markdown from `wayfare_core::display`.

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wayfare_core::{
    array_to_map, build_prompt,
    display::{History, Itinerary, OperationStatus, SavedItems},
    guard_schedule,
    models::{Preferences, SavedList},
    params::{Nickname, OwnedId, Recommend},
    Recommender, Unshaped,
};

use crate::{
    args::{GuardArgs, NicknameArgs, PromptArgs, RateArgs, RecommendArgs, SavedCommands, SurveyIdArgs},
    renderer::TerminalRenderer,
};

/// Reads and decodes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Prints the generation prompt for a survey file.
///
/// The prompt is plain text and is printed unstyled.
pub fn prompt(args: PromptArgs) -> Result<()> {
    let preferences: Preferences = read_json(&args.survey)?;
    println!("{}", build_prompt(&preferences).trim_end());
    Ok(())
}

/// Normalizes and guards an itinerary file.
pub fn guard(renderer: &TerminalRenderer, args: GuardArgs) -> Result<()> {
    let raw: Value = read_json(&args.file)?;
    let days = guard_schedule(
        &Unshaped::from(&raw),
        args.days,
        args.depart.as_deref(),
        args.return_window.as_deref(),
        args.pace.as_deref(),
    );
    debug!("Guarded itinerary has {} days", days.len());

    if args.json {
        let keyed = serde_json::to_value(array_to_map(&days))?;
        renderer.render_json(&keyed)
    } else {
        renderer.render(&Itinerary(days).to_string())
    }
}

/// Handlers for commands backed by the database.
pub struct Cli {
    recommender: Recommender,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(recommender: Recommender, renderer: TerminalRenderer) -> Self {
        Self {
            recommender,
            renderer,
        }
    }

    pub async fn recommend(&self, args: RecommendArgs) -> Result<()> {
        let preferences: Preferences = read_json(&args.survey)?;
        let outcome = self
            .recommender
            .recommend(&Recommend {
                nickname: args.nickname,
                preferences,
            })
            .await
            .context("Failed to create recommendation")?;
        self.renderer.render(&outcome.to_string())
    }

    pub async fn history(&self, args: NicknameArgs) -> Result<()> {
        let entries = self
            .recommender
            .history(&Nickname::from(args))
            .await
            .context("Failed to load history")?;
        self.renderer.render(&History(entries).to_string())
    }

    pub async fn show(&self, args: SurveyIdArgs) -> Result<()> {
        let detail = self
            .recommender
            .survey_detail(&OwnedId::from(args))
            .await
            .context("Failed to load survey")?;
        self.renderer.render(&detail.to_string())
    }

    pub async fn delete(&self, args: SurveyIdArgs) -> Result<()> {
        let params = OwnedId::from(args);
        self.recommender
            .delete_survey(&params)
            .await
            .context("Failed to delete survey")?;
        self.renderer
            .render(&OperationStatus::survey_deleted(&params).to_string())
    }

    pub async fn recs(&self, args: NicknameArgs) -> Result<()> {
        let summaries = self
            .recommender
            .list_recommendation_summaries(&Nickname::from(args))
            .await
            .context("Failed to list recommendations")?;
        self.renderer.render(&summaries.to_string())
    }

    pub async fn rate(&self, args: RateArgs) -> Result<()> {
        let recommendation = self
            .recommender
            .rate_recommendation(&args.into())
            .await
            .context("Failed to rate recommendation")?;
        self.renderer.render(&recommendation.to_string())
    }

    pub async fn handle_saved_command(&self, list: SavedList, command: SavedCommands) -> Result<()> {
        match command {
            SavedCommands::Add(args) => {
                let item = self
                    .recommender
                    .save_item(&args.into_params(list))
                    .await
                    .with_context(|| format!("Failed to add to {list}"))?;
                self.renderer.render(&item.to_string())
            }
            SavedCommands::Remove(args) => {
                let params = args.into_params(list);
                let removed = self
                    .recommender
                    .remove_item(&params)
                    .await
                    .with_context(|| format!("Failed to remove from {list}"))?;
                self.renderer
                    .render(&OperationStatus::item_removed(&params, removed).to_string())
            }
            SavedCommands::List(args) => {
                let items = self
                    .recommender
                    .list_items(&args.into_list_params(list))
                    .await
                    .with_context(|| format!("Failed to list {list}"))?;
                self.renderer.render(&SavedItems(items).to_string())
            }
        }
    }
}
