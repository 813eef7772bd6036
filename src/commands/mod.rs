//! Command implementations for the roster dashboard CLI

pub mod common;
pub mod config_cmd;
pub mod dashboard;
pub mod injuries;
pub mod matches;
pub mod players;
pub mod search;
pub mod squad;
pub mod watch;

pub use common::CommandContext;
