//! Type-safe wrappers and enums for roster data.

pub mod filters;
pub mod ids;
pub mod sort;

pub use filters::{CategoryFilter, InjuryStatusFilter, PlayerStatusFilter};
pub use ids::{FootballId, InjuryId, PlayerId};
pub use sort::{InjurySort, PlayerSort, SquadSort};
