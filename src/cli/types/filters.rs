//! Filter types for roster CLI commands.

use crate::error::RosterError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Filter for a player's injury flag.
///
/// Maps onto the query engine's status predicate, where the player's status
/// flag is `is_injured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PlayerStatusFilter {
    /// Every player
    #[default]
    All,
    /// Players flagged as injured
    Injured,
    /// Players not flagged as injured
    Healthy,
}

impl PlayerStatusFilter {
    /// Required value of the status flag, or `None` for no constraint.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            PlayerStatusFilter::All => None,
            PlayerStatusFilter::Injured => Some(true),
            PlayerStatusFilter::Healthy => Some(false),
        }
    }
}

impl fmt::Display for PlayerStatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerStatusFilter::All => "all",
            PlayerStatusFilter::Injured => "injured",
            PlayerStatusFilter::Healthy => "healthy",
        };
        write!(f, "{}", s)
    }
}

/// Filter for whether an injury is still current.
///
/// The injuries view starts on `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InjuryStatusFilter {
    /// Current and past injuries
    All,
    /// Injuries still in effect
    #[default]
    Active,
    /// Injuries the player has recovered from
    Past,
}

impl InjuryStatusFilter {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            InjuryStatusFilter::All => None,
            InjuryStatusFilter::Active => Some(true),
            InjuryStatusFilter::Past => Some(false),
        }
    }
}

impl fmt::Display for InjuryStatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InjuryStatusFilter::All => "all",
            InjuryStatusFilter::Active => "active",
            InjuryStatusFilter::Past => "past",
        };
        write!(f, "{}", s)
    }
}

/// Category selection: either everything or one exact value.
///
/// Parsing `"all"` (any case) yields [`CategoryFilter::All`]; anything else is
/// kept verbatim and later compared case-sensitively against the record's
/// category (position, severity).
///
/// # Examples
///
/// ```rust
/// use roster_dash::cli::types::CategoryFilter;
///
/// let all: CategoryFilter = "all".parse().unwrap();
/// assert_eq!(all, CategoryFilter::All);
///
/// let fwd: CategoryFilter = "Forward".parse().unwrap();
/// assert!(fwd.matches(Some("Forward")));
/// assert!(!fwd.matches(Some("forward")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn only(value: impl Into<String>) -> Self {
        CategoryFilter::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    /// Exact match against a record's category. Records without a category
    /// only pass the `All` filter.
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted.as_str()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(RosterError::InvalidFilter {
                value: s.to_string(),
            });
        }
        if trimmed.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(trimmed.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(value) => write!(f, "{}", value),
        }
    }
}
