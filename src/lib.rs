//! Roster Dashboard CLI Library
//!
//! A Rust library and CLI for a fantasy-football roster dashboard backend,
//! providing player and injury lists, dashboard stats, and football-data
//! search and squad import.
//!
//! ## Features
//!
//! - **Roster Query Engine**: generic filter, sort, paginate and aggregate over
//!   fetched players, injuries and squad members
//! - **Typed Backend Client**: every response decoded and normalized at the
//!   fetch boundary
//! - **Query Cache**: in-memory LRU with expiry and per-resource invalidation
//! - **Layered Config**: defaults, JSON file, `ROSTER_API_URL`, CLI flags
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roster_dash::{commands::{players::*, CommandContext}, config::Config};
//!
//! # async fn example() -> roster_dash::Result<()> {
//! let ctx = CommandContext::new(Config::resolve(None, None)?, false)?;
//! let params = PlayersParams {
//!     search: Some("mbap".to_string()),
//!     page: 1,
//!     ..PlayersParams::default()
//! };
//!
//! handle_players(&ctx, params).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at your backend without passing `--api-url` every time:
//! ```bash
//! export ROSTER_API_URL=http://localhost:8000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod query;

// Re-export commonly used types
pub use api::types::{InjuryRecord, PlayerRecord, Severity, SquadPlayer};
pub use cli::types::{FootballId, InjuryId, PlayerId};
pub use error::{Result, RosterError};

pub const API_URL_ENV_VAR: &str = "ROSTER_API_URL";
