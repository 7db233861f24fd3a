//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use wayfare_core::{
    array_to_map, build_prompt,
    display::{History, OperationStatus, SavedItems},
    guard_schedule, models, params as core, Recommender, Unshaped,
};

use super::to_mcp_error;

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Wraps a core parameter type in a transparent serde container so rmcp can
// deserialize it and publish its schema, without the core crate depending on
// rmcp.

/// Generic MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type GuardSchedule = McpParams<core::GuardSchedule>;
pub type Preferences = McpParams<models::Preferences>;
pub type Recommend = McpParams<core::Recommend>;
pub type Nickname = McpParams<core::Nickname>;
pub type OwnedId = McpParams<core::OwnedId>;
pub type RateRecommendation = McpParams<core::RateRecommendation>;
pub type SaveItem = McpParams<core::SaveItem>;
pub type RemoveItem = McpParams<core::RemoveItem>;
pub type ListSaved = McpParams<core::ListSaved>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    recommender: Arc<Recommender>,
}

impl McpHandlers {
    pub fn new(recommender: Arc<Recommender>) -> Self {
        Self { recommender }
    }

    /// Returns the guarded itinerary as day-keyed JSON.
    pub async fn guard_schedule(&self, Parameters(params): Parameters<GuardSchedule>) -> McpResult {
        debug!("guard_schedule: {:?}", params);

        let params = params.as_ref();
        let days = guard_schedule(
            &Unshaped::from(&params.schedule),
            params.days,
            params.depart_window.as_deref(),
            params.return_window.as_deref(),
            params.density.as_deref(),
        );
        let keyed = serde_json::to_string_pretty(&array_to_map(&days))
            .map_err(|e| to_mcp_error("Failed to encode schedule", e.into()))?;
        text_result(keyed)
    }

    pub async fn build_prompt(&self, Parameters(params): Parameters<Preferences>) -> McpResult {
        debug!("build_prompt: {:?}", params);
        text_result(build_prompt(params.as_ref()))
    }

    pub async fn recommend(&self, Parameters(params): Parameters<Recommend>) -> McpResult {
        debug!("recommend: {:?}", params);

        let outcome = self
            .recommender
            .recommend(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create recommendation", e))?;
        text_result(outcome.to_string())
    }

    pub async fn list_history(&self, Parameters(params): Parameters<Nickname>) -> McpResult {
        debug!("list_history: {:?}", params);

        let entries = self
            .recommender
            .history(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to load history", e))?;
        text_result(History(entries).to_string())
    }

    pub async fn show_survey(&self, Parameters(params): Parameters<OwnedId>) -> McpResult {
        debug!("show_survey: {:?}", params);

        let detail = self
            .recommender
            .survey_detail(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to load survey", e))?;
        text_result(detail.to_string())
    }

    pub async fn delete_survey(&self, Parameters(params): Parameters<OwnedId>) -> McpResult {
        debug!("delete_survey: {:?}", params);

        let params = params.as_ref();
        self.recommender
            .delete_survey(params)
            .await
            .map_err(|e| to_mcp_error("Failed to delete survey", e))?;
        text_result(OperationStatus::survey_deleted(params).to_string())
    }

    pub async fn list_recommendations(&self, Parameters(params): Parameters<Nickname>) -> McpResult {
        debug!("list_recommendations: {:?}", params);

        let summaries = self
            .recommender
            .list_recommendation_summaries(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list recommendations", e))?;
        text_result(summaries.to_string())
    }

    pub async fn rate_recommendation(
        &self,
        Parameters(params): Parameters<RateRecommendation>,
    ) -> McpResult {
        debug!("rate_recommendation: {:?}", params);

        let recommendation = self
            .recommender
            .rate_recommendation(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to rate recommendation", e))?;
        text_result(recommendation.to_string())
    }

    pub async fn save_item(&self, Parameters(params): Parameters<SaveItem>) -> McpResult {
        debug!("save_item: {:?}", params);

        let item = self
            .recommender
            .save_item(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to save item", e))?;
        text_result(item.to_string())
    }

    pub async fn remove_item(&self, Parameters(params): Parameters<RemoveItem>) -> McpResult {
        debug!("remove_item: {:?}", params);

        let params = params.as_ref();
        let removed = self
            .recommender
            .remove_item(params)
            .await
            .map_err(|e| to_mcp_error("Failed to remove item", e))?;
        text_result(OperationStatus::item_removed(params, removed).to_string())
    }

    pub async fn list_saved(&self, Parameters(params): Parameters<ListSaved>) -> McpResult {
        debug!("list_saved: {:?}", params);

        let items = self
            .recommender
            .list_items(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list saved items", e))?;
        text_result(SavedItems(items).to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use wayfare_core::{models::SavedList, RecommenderBuilder};

    use super::*;

    async fn handlers() -> (TempDir, McpHandlers) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let recommender = RecommenderBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .await
            .expect("Failed to create recommender");
        (temp_dir, McpHandlers::new(Arc::new(recommender)))
    }

    fn text(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }

    #[tokio::test]
    async fn test_guard_schedule_returns_keyed_json() {
        let (_temp_dir, handlers) = handlers().await;
        let params = McpParams(core::GuardSchedule {
            schedule: json!({
                "day_2": [{ "time": "10:00-11:00", "activity": "Museum (walk)" }],
                "day_1": [
                    { "time": "08:00-09:00", "activity": "Too early" },
                    { "time": "14:00-15:00", "activity": "Lunch (walk)" },
                ],
            }),
            days: 2,
            depart_window: Some("morning".to_string()),
            return_window: Some("evening".to_string()),
            density: None,
        });

        let result = handlers.guard_schedule(Parameters(params)).await.unwrap();
        let keyed: Value = serde_json::from_str(&text(&result)).unwrap();
        assert_eq!(keyed["day_1"].as_array().unwrap().len(), 1);
        assert_eq!(keyed["day_1"][0]["time"], "14:00-15:00");
        assert_eq!(keyed["day_2"][0]["time"], "10:00-11:00");
    }

    #[tokio::test]
    async fn test_build_prompt_mentions_bounds() {
        let (_temp_dir, handlers) = handlers().await;
        let params = McpParams(models::Preferences {
            duration: "3days".to_string(),
            depart_window: Some(wayfare_core::TimeWindow::Evening),
            ..Default::default()
        });

        let result = handlers.build_prompt(Parameters(params)).await.unwrap();
        assert!(text(&result).contains("must start at 20:00 or later"));
    }

    #[tokio::test]
    async fn test_recommend_without_generator_is_internal_error() {
        let (_temp_dir, handlers) = handlers().await;
        let params = McpParams(core::Recommend {
            nickname: "mina".to_string(),
            preferences: Default::default(),
        });

        let err = handlers.recommend(Parameters(params)).await.unwrap_err();
        assert!(err.message.contains("No generation service configured"));
    }

    #[tokio::test]
    async fn test_empty_lists() {
        let (_temp_dir, handlers) = handlers().await;

        let history = handlers
            .list_history(Parameters(McpParams(core::Nickname {
                nickname: "mina".to_string(),
            })))
            .await
            .unwrap();
        assert_eq!(text(&history), "No history found.\n");

        let saved = handlers
            .list_saved(Parameters(McpParams(core::ListSaved {
                nickname: "mina".to_string(),
                list: SavedList::Wishlist,
            })))
            .await
            .unwrap();
        assert_eq!(text(&saved), "No saved items found.\n");
    }

    #[tokio::test]
    async fn test_show_missing_survey_is_invalid_params() {
        let (_temp_dir, handlers) = handlers().await;
        let err = handlers
            .show_survey(Parameters(McpParams(core::OwnedId {
                id: 3,
                nickname: "mina".to_string(),
            })))
            .await
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }
}
