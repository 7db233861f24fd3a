//! MCP server implementation for Wayfare
//!
//! Exposes itinerary guarding, prompt building and the recommendation
//! history to AI assistants over the Model Context Protocol.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};
use wayfare_core::Recommender;

pub mod errors;
pub mod handlers;

pub use errors::to_mcp_error;
pub use handlers::{
    GuardSchedule, ListSaved, McpResult, Nickname, OwnedId, Preferences, RateRecommendation,
    Recommend, RemoveItem, SaveItem,
};

/// MCP server for Wayfare
#[derive(Clone)]
pub struct WayfareMcpServer {
    recommender: Arc<Recommender>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WayfareMcpServer {
    pub fn new(recommender: Recommender) -> Self {
        Self {
            recommender: Arc::new(recommender),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.recommender.clone())
    }

    #[tool(
        name = "guard_schedule",
        description = "Normalize an itinerary and enforce departure/return windows. Accepts a day-keyed object, an array of {day, activities} objects, or a flat activity list. days limits the number of days kept (0 keeps all). Windows are dawn, morning, afternoon or evening. Returns the repaired itinerary as day-keyed JSON."
    )]
    async fn guard_schedule(&self, params: Parameters<GuardSchedule>) -> McpResult {
        self.handlers().guard_schedule(params).await
    }

    #[tool(
        name = "build_prompt",
        description = "Build the generation prompt for a set of survey answers. The prompt quotes the same first-day start and last-day cutoff that guard_schedule enforces."
    )]
    async fn build_prompt(&self, params: Parameters<Preferences>) -> McpResult {
        self.handlers().build_prompt(params).await
    }

    #[tool(
        name = "recommend",
        description = "Save a traveller's survey, ask the generation service for city recommendations, guard every itinerary and store the result. Returns the survey ID, recommendation ID and the cities. The survey is kept even when generation fails."
    )]
    async fn recommend(&self, params: Parameters<Recommend>) -> McpResult {
        self.handlers().recommend(params).await
    }

    #[tool(
        name = "list_history",
        description = "List a nickname's surveys with the recommendations made for them, newest first."
    )]
    async fn list_history(&self, params: Parameters<Nickname>) -> McpResult {
        self.handlers().list_history(params).await
    }

    #[tool(
        name = "show_survey",
        description = "Show a survey's answers together with its latest recommendation. The nickname must own the survey."
    )]
    async fn show_survey(&self, params: Parameters<OwnedId>) -> McpResult {
        self.handlers().show_survey(params).await
    }

    #[tool(
        name = "delete_survey",
        description = "Permanently delete a survey and every recommendation made for it. The nickname must own the survey. This cannot be undone."
    )]
    async fn delete_survey(&self, params: Parameters<OwnedId>) -> McpResult {
        self.handlers().delete_survey(params).await
    }

    #[tool(
        name = "list_recommendations",
        description = "List a nickname's recommendations with title, summary and rating, newest first."
    )]
    async fn list_recommendations(&self, params: Parameters<Nickname>) -> McpResult {
        self.handlers().list_recommendations(params).await
    }

    #[tool(
        name = "rate_recommendation",
        description = "Rate a recommendation from 1 to 5. The nickname must own the recommendation. Rating again replaces the previous rating."
    )]
    async fn rate_recommendation(&self, params: Parameters<RateRecommendation>) -> McpResult {
        self.handlers().rate_recommendation(params).await
    }

    #[tool(
        name = "save_item",
        description = "Add a recommendation to the nickname's bookmark list or wishlist, with an optional note of at most 200 characters. Saving an item twice keeps one entry."
    )]
    async fn save_item(&self, params: Parameters<SaveItem>) -> McpResult {
        self.handlers().save_item(params).await
    }

    #[tool(
        name = "remove_item",
        description = "Remove a recommendation from the nickname's bookmark list or wishlist."
    )]
    async fn remove_item(&self, params: Parameters<RemoveItem>) -> McpResult {
        self.handlers().remove_item(params).await
    }

    #[tool(
        name = "list_saved",
        description = "List the items on a nickname's bookmark list or wishlist, newest first."
    )]
    async fn list_saved(&self, params: Parameters<ListSaved>) -> McpResult {
        self.handlers().list_saved(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for WayfareMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "wayfare".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Wayfare recommends travel destinations with day-by-day itineraries and keeps a per-nickname history.

## Core Concepts
- **Survey**: a traveller's answers (companions, style, duration, budget, pace, departure and return windows)
- **Recommendation**: cities proposed for a survey, each with a schedule keyed by day ("day_1", "day_2", ...)
- **Activity**: an entry with a "time" of the form HH:MM-HH:MM and an "activity" description
- **Windows**: dawn, morning, afternoon or evening; the departure window sets the earliest start on day 1, the return window sets the cutoff on the last day

## Typical Workflows

### Planning a Trip
1. Call `recommend` with a nickname and the survey answers
2. Review the cities and schedules in the result
3. Rate the result with `rate_recommendation`
4. Keep favourites with `save_item` on the bookmark list or wishlist

### Reviewing Past Trips
1. `list_history` or `list_recommendations` for an overview
2. `show_survey` for a survey's answers and its latest recommendation
3. `list_saved` to see bookmarks or the wishlist

### Working With Itineraries Directly
- `build_prompt` shows the instructions sent to the generation service
- `guard_schedule` repairs any itinerary so day 1 starts after the departure window and the last day ends before the return cutoff

## Ownership
Every stored survey, recommendation and saved item belongs to a nickname. Operations on another nickname's data are rejected."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: WayfareMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Wayfare MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use wayfare_core::RecommenderBuilder;

    use super::*;

    #[tokio::test]
    async fn test_server_lists_every_tool() {
        let temp_dir = TempDir::new().unwrap();
        let recommender = RecommenderBuilder::new()
            .with_database_path(Some(temp_dir.path().join("serve.db")))
            .build()
            .await
            .unwrap();
        let server = WayfareMcpServer::new(recommender);

        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            [
                "build_prompt",
                "delete_survey",
                "guard_schedule",
                "list_history",
                "list_recommendations",
                "list_saved",
                "rate_recommendation",
                "recommend",
                "remove_item",
                "save_item",
                "show_survey",
            ]
        );
        assert_eq!(server.get_info().server_info.name, "wayfare");
    }
}
