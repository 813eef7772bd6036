//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::{num::NonZeroUsize, path::PathBuf};
use types::{
    CategoryFilter, FootballId, InjurySort, InjuryStatusFilter, PlayerId, PlayerSort,
    PlayerStatusFilter, SquadSort,
};

/// Paging and search arguments shared by the list views
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive substring search.
    #[clap(long, short = 'q')]
    pub search: Option<String>,

    /// Page to show, starting at 1.
    #[clap(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (defaults to the configured page size).
    #[clap(long)]
    pub page_size: Option<NonZeroUsize>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCmd {
    /// Print the effective configuration
    Show,
    /// Write a config file with the defaults
    Init {
        /// Overwrite an existing file.
        #[clap(long)]
        force: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "roster-dash",
    version,
    about = "Fantasy-football roster dashboard CLI"
)]
pub struct RosterCli {
    /// Backend URL (or set `ROSTER_API_URL` env var).
    #[clap(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (defaults to `{config_dir}/roster-dash/config.json`).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output results as JSON instead of text lines.
    #[clap(long, global = true)]
    pub json: bool,

    /// Debug logging (`RUST_LOG` takes precedence when set).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List players with search, position and injury filters.
    Players {
        #[clap(flatten)]
        list: ListArgs,

        /// Exact position (e.g. Forward), or `all`.
        #[clap(long, short = 'p', default_value = "all")]
        position: CategoryFilter,

        #[clap(long, value_enum, default_value_t = PlayerStatusFilter::All)]
        status: PlayerStatusFilter,

        #[clap(long, value_enum)]
        sort: Option<PlayerSort>,
    },

    /// List injuries joined with player names (active ones by default).
    Injuries {
        #[clap(flatten)]
        list: ListArgs,

        /// Exact severity (Minor, Moderate, Severe), or `all`.
        #[clap(long, default_value = "all")]
        severity: CategoryFilter,

        #[clap(long, value_enum, default_value_t = InjuryStatusFilter::Active)]
        status: InjuryStatusFilter,

        #[clap(long, value_enum)]
        sort: Option<InjurySort>,
    },

    /// Show one player.
    Player { id: PlayerId },

    /// Delete a player from the dashboard.
    DeletePlayer { id: PlayerId },

    /// Overview numbers, position shares and top players.
    Dashboard,

    /// Check the backend health endpoint.
    Health,

    /// Search the football-data provider for players (at least 3 characters).
    SearchPlayers {
        query: String,

        #[clap(long, default_value_t = 1)]
        page: u32,
    },

    /// Search the football-data provider for teams (at least 3 characters).
    SearchTeams {
        query: String,

        #[clap(long)]
        country: Option<String>,
    },

    /// Add a player from a `search-players` result to the dashboard.
    ImportPlayer {
        football_id: FootballId,

        /// Display name for the new dashboard player.
        #[clap(long)]
        name: String,

        /// Defaults to `api-football-{football_id}`.
        #[clap(long)]
        sorare_id: Option<String>,

        #[clap(long)]
        position: Option<String>,
    },

    /// Show a team's next fixtures.
    Upcoming {
        team_id: FootballId,

        /// How many fixtures to show (1-50).
        #[clap(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=50))]
        next: u8,
    },

    /// Show a team's squad with import status.
    Squad {
        team_id: FootballId,

        #[clap(flatten)]
        list: ListArgs,

        /// Exact position (e.g. Attacker), or `all`.
        #[clap(long, short = 'p', default_value = "all")]
        position: CategoryFilter,

        #[clap(long, value_enum)]
        sort: Option<SquadSort>,
    },

    /// Import a squad member into the dashboard.
    Import {
        team_id: FootballId,
        player_id: FootballId,
    },

    /// Poll the dashboard and backend health until Ctrl-C.
    Watch {
        /// Stop after this many dashboard refreshes.
        #[clap(long)]
        count: Option<u64>,
    },

    /// Inspect or create the config file.
    Config {
        #[clap(subcommand)]
        cmd: ConfigCmd,
    },
}
