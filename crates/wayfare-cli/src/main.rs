//! Wayfare CLI Application
//!
//! Command-line interface and MCP server for wayfare travel recommendations.

mod args;
mod cli;
mod mcp;
mod renderer;
mod reply;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::{info, warn};
use mcp::{run_stdio_server, WayfareMcpServer};
use renderer::TerminalRenderer;
use reply::CannedReply;
use wayfare_core::{models::SavedList, GeminiClient, Generator, Recommender, RecommenderBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let renderer = TerminalRenderer::new(!no_color);

    info!("Wayfare started");

    match command {
        Prompt(args) => cli::prompt(args),
        Guard(args) => cli::guard(&renderer, args),
        Recommend(args) => {
            let generator: Arc<dyn Generator> = match &args.reply {
                Some(path) => Arc::new(CannedReply::from_file(path)?),
                None => Arc::new(
                    GeminiClient::from_env().context("Failed to configure generation service")?,
                ),
            };
            let recommender = open(database_file, Some(generator)).await?;
            Cli::new(recommender, renderer).recommend(args).await
        }
        History(args) => {
            let recommender = open(database_file, None).await?;
            Cli::new(recommender, renderer).history(args).await
        }
        Show(args) => {
            let recommender = open(database_file, None).await?;
            Cli::new(recommender, renderer).show(args).await
        }
        Delete(args) => {
            let recommender = open(database_file, None).await?;
            Cli::new(recommender, renderer).delete(args).await
        }
        Recs(args) => {
            let recommender = open(database_file, None).await?;
            Cli::new(recommender, renderer).recs(args).await
        }
        Rate(args) => {
            let recommender = open(database_file, None).await?;
            Cli::new(recommender, renderer).rate(args).await
        }
        Bookmark { command } => {
            let recommender = open(database_file, None).await?;
            Cli::new(recommender, renderer)
                .handle_saved_command(SavedList::Bookmark, command)
                .await
        }
        Wishlist { command } => {
            let recommender = open(database_file, None).await?;
            Cli::new(recommender, renderer)
                .handle_saved_command(SavedList::Wishlist, command)
                .await
        }
        Serve => {
            let generator: Option<Arc<dyn Generator>> = match GeminiClient::from_env() {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    warn!("Recommendations disabled: {e}");
                    None
                }
            };
            let recommender = open(database_file, generator).await?;
            info!("Starting Wayfare MCP server");
            run_stdio_server(WayfareMcpServer::new(recommender))
                .await
                .context("MCP server failed")
        }
    }
}

/// Opens the database, creating it on first use. Commands that only read
/// files never call this.
async fn open(
    database_file: Option<PathBuf>,
    generator: Option<Arc<dyn Generator>>,
) -> Result<Recommender> {
    let mut builder = RecommenderBuilder::new().with_database_path(database_file);
    if let Some(generator) = generator {
        builder = builder.with_generator(generator);
    }
    builder
        .build()
        .await
        .context("Failed to initialize recommender")
}
