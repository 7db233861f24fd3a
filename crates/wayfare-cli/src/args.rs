//! Command-line interface definitions using clap
//!
//! Each subcommand gets its own `#[derive(Args)]` struct that converts into
//! the matching core parameter type, so clap attributes never leak into
//! `wayfare-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Recommender
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use wayfare_core::{
    models::{ItemType, SavedList},
    params::{ListSaved, Nickname, OwnedId, RateRecommendation, RemoveItem, SaveItem},
};

/// Travel recommendations with window-aware itineraries
///
/// Wayfare turns a traveller survey into city recommendations with a
/// day-by-day schedule, keeps the history per nickname, and lets travellers
/// rate results and collect them on a bookmark list or a wishlist. The same
/// operations are available to AI assistants through `wf serve`.
#[derive(Parser)]
#[command(version, about, name = "wf")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/wayfare/wayfare.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the Wayfare CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Submit a survey and store the generated recommendation
    Recommend(RecommendArgs),
    /// Print the generation prompt for a survey
    Prompt(PromptArgs),
    /// Normalize and trim a raw itinerary
    Guard(GuardArgs),
    /// List surveys and their recommendations for a nickname
    History(NicknameArgs),
    /// Show a survey with its latest recommendation
    Show(SurveyIdArgs),
    /// Delete a survey and its recommendations
    Delete(SurveyIdArgs),
    /// List recommendations for a nickname
    Recs(NicknameArgs),
    /// Rate a recommendation from 1 to 5
    Rate(RateArgs),
    /// Manage bookmarked recommendations
    #[command(alias = "b")]
    Bookmark {
        #[command(subcommand)]
        command: SavedCommands,
    },
    /// Manage the wishlist
    #[command(alias = "w")]
    Wishlist {
        #[command(subcommand)]
        command: SavedCommands,
    },
    /// Start the MCP server
    Serve,
}

/// Submit a survey for a recommendation
#[derive(ClapArgs)]
pub struct RecommendArgs {
    /// Nickname of the traveller
    #[arg(short, long)]
    pub nickname: String,
    /// JSON file with the survey answers
    #[arg(short, long)]
    pub survey: PathBuf,
    /// Use the generation reply stored in this file instead of calling the
    /// generation service
    #[arg(long)]
    pub reply: Option<PathBuf>,
}

/// Build the generation prompt for a survey
#[derive(ClapArgs)]
pub struct PromptArgs {
    /// JSON file with the survey answers
    #[arg(short, long)]
    pub survey: PathBuf,
}

/// Guard a raw itinerary
#[derive(ClapArgs)]
pub struct GuardArgs {
    /// JSON file holding the itinerary in any supported shape
    pub file: PathBuf,
    /// Number of days to keep; 0 keeps all
    #[arg(short, long, default_value_t = 0)]
    pub days: usize,
    /// Departure window (dawn, morning, afternoon, evening)
    #[arg(long)]
    pub depart: Option<String>,
    /// Return window (dawn, morning, afternoon, evening)
    #[arg(long = "return")]
    pub return_window: Option<String>,
    /// Travel pace
    #[arg(long)]
    pub pace: Option<String>,
    /// Print the keyed schedule as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

/// Operations scoped to a nickname
#[derive(ClapArgs)]
pub struct NicknameArgs {
    /// Nickname of the traveller
    pub nickname: String,
}

impl From<NicknameArgs> for Nickname {
    fn from(val: NicknameArgs) -> Self {
        Nickname {
            nickname: val.nickname,
        }
    }
}

/// Operations on a single survey
#[derive(ClapArgs)]
pub struct SurveyIdArgs {
    /// Survey ID
    pub id: u64,
    /// Nickname owning the survey
    #[arg(short, long)]
    pub nickname: String,
}

impl From<SurveyIdArgs> for OwnedId {
    fn from(val: SurveyIdArgs) -> Self {
        OwnedId {
            id: val.id,
            nickname: val.nickname,
        }
    }
}

/// Rate a recommendation
#[derive(ClapArgs)]
pub struct RateArgs {
    /// Recommendation ID
    pub id: u64,
    /// Rating from 1 to 5
    pub rating: u8,
    /// Nickname owning the recommendation
    #[arg(short, long)]
    pub nickname: String,
}

impl From<RateArgs> for RateRecommendation {
    fn from(val: RateArgs) -> Self {
        RateRecommendation {
            id: val.id,
            nickname: val.nickname,
            rating: val.rating,
        }
    }
}

/// Subcommands shared by `bookmark` and `wishlist`
#[derive(Subcommand)]
pub enum SavedCommands {
    /// Add an item to the list
    Add(AddItemArgs),
    /// Remove an item from the list
    #[command(alias = "rm")]
    Remove(RemoveItemArgs),
    /// List saved items
    #[command(alias = "ls")]
    List(NicknameArgs),
}

/// Kind of item to save
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum ItemTypeArg {
    #[default]
    Recommendation,
}

impl From<ItemTypeArg> for ItemType {
    fn from(val: ItemTypeArg) -> Self {
        match val {
            ItemTypeArg::Recommendation => ItemType::Recommendation,
        }
    }
}

/// Add an item to a list
#[derive(ClapArgs)]
pub struct AddItemArgs {
    /// ID of the item
    pub item_id: u64,
    /// Nickname owning the list
    #[arg(short, long)]
    pub nickname: String,
    /// Kind of item
    #[arg(long, value_enum, default_value_t)]
    pub item_type: ItemTypeArg,
    /// Optional note of at most 200 characters
    #[arg(long)]
    pub note: Option<String>,
}

impl AddItemArgs {
    pub fn into_params(self, list: SavedList) -> SaveItem {
        SaveItem {
            nickname: self.nickname,
            list,
            item_type: self.item_type.into(),
            item_id: self.item_id,
            note: self.note,
        }
    }
}

/// Remove an item from a list
#[derive(ClapArgs)]
pub struct RemoveItemArgs {
    /// ID of the item
    pub item_id: u64,
    /// Nickname owning the list
    #[arg(short, long)]
    pub nickname: String,
    /// Kind of item
    #[arg(long, value_enum, default_value_t)]
    pub item_type: ItemTypeArg,
}

impl RemoveItemArgs {
    pub fn into_params(self, list: SavedList) -> RemoveItem {
        RemoveItem {
            nickname: self.nickname,
            list,
            item_type: self.item_type.into(),
            item_id: self.item_id,
        }
    }
}

impl NicknameArgs {
    pub fn into_list_params(self, list: SavedList) -> ListSaved {
        ListSaved {
            nickname: self.nickname,
            list,
        }
    }
}
