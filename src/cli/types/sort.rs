//! Sort keys offered by each roster view.

use serde::Serialize;
use std::fmt;

/// Sort orders for the players list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlayerSort {
    /// Display name, A to Z
    Name,
    /// Average score, best first
    Score,
    /// Total games played, most first
    Games,
    /// Age, youngest first
    Age,
    /// Club name, A to Z
    Club,
}

impl fmt::Display for PlayerSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerSort::Name => "name",
            PlayerSort::Score => "score",
            PlayerSort::Games => "games",
            PlayerSort::Age => "age",
            PlayerSort::Club => "club",
        };
        write!(f, "{}", s)
    }
}

/// Sort orders for the injuries list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InjurySort {
    /// Injury date, newest first
    Date,
    /// Severity, most severe first
    Severity,
    /// Expected return, soonest first
    Return,
    /// Linked player's name, A to Z
    Player,
}

impl fmt::Display for InjurySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InjurySort::Date => "date",
            InjurySort::Severity => "severity",
            InjurySort::Return => "return",
            InjurySort::Player => "player",
        };
        write!(f, "{}", s)
    }
}

/// Sort orders for a team squad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SquadSort {
    /// Name, A to Z
    Name,
    /// Shirt number, lowest first
    Number,
    /// Age, youngest first
    Age,
}

impl fmt::Display for SquadSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SquadSort::Name => "name",
            SquadSort::Number => "number",
            SquadSort::Age => "age",
        };
        write!(f, "{}", s)
    }
}
