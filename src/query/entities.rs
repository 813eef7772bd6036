//! Field accessors wiring each roster record type into the query engine.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::sort::{cmp_f64_desc, cmp_opt, cmp_text};
use super::Entity;
use crate::api::types::{InjuryRecord, PlayerRecord, SquadPlayer};
use crate::cli::types::{InjurySort, PlayerId, PlayerSort, SquadSort};

const PLAYER_POSITIONS: &[&str] = &["Goalkeeper", "Defender", "Midfielder", "Forward"];
const SQUAD_POSITIONS: &[&str] = &["Goalkeeper", "Defender", "Midfielder", "Attacker"];
const SEVERITIES: &[&str] = &["Minor", "Moderate", "Severe"];

impl Entity for PlayerRecord {
    type SortKey = PlayerSort;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![self.display_name.as_deref(), self.club_name.as_deref()]
    }

    fn category(&self) -> Option<&str> {
        self.position.as_deref()
    }

    fn status_flag(&self) -> Option<bool> {
        Some(self.is_injured)
    }

    fn compare_by(&self, other: &Self, key: PlayerSort) -> Ordering {
        match key {
            PlayerSort::Name => cmp_text(self.display_name.as_deref(), other.display_name.as_deref()),
            PlayerSort::Score => cmp_f64_desc(self.average_score, other.average_score),
            PlayerSort::Games => other.total_games.cmp(&self.total_games),
            PlayerSort::Age => cmp_opt(self.age, other.age, false),
            PlayerSort::Club => cmp_text(self.club_name.as_deref(), other.club_name.as_deref()),
        }
    }

    fn known_categories() -> &'static [&'static str] {
        PLAYER_POSITIONS
    }

    fn status_labels() -> Option<(&'static str, &'static str)> {
        Some(("injured", "healthy"))
    }

    fn extra_bucket_labels() -> &'static [&'static str] {
        &["active"]
    }

    fn extra_buckets(&self) -> Vec<&'static str> {
        if self.is_active {
            vec!["active"]
        } else {
            Vec::new()
        }
    }
}

/// Injury joined with the display name of the player it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InjuryRow {
    #[serde(flatten)]
    pub injury: InjuryRecord,
    /// `None` when the player is not in the loaded roster.
    pub player_name: Option<String>,
}

impl InjuryRow {
    pub fn is_severe_active(&self) -> bool {
        self.injury.is_active && self.injury.severity == Some(crate::api::Severity::Severe)
    }
}

/// Attach player display names to injuries by `player_id`.
///
/// Only `display_name` is joined, the same field the player search looks at,
/// so a player matches a term in both views or in neither.
pub fn join_injuries(injuries: Vec<InjuryRecord>, players: &[PlayerRecord]) -> Vec<InjuryRow> {
    let names: HashMap<PlayerId, &str> = players
        .iter()
        .filter_map(|p| p.display_name.as_deref().map(|name| (p.id, name)))
        .collect();

    injuries
        .into_iter()
        .map(|injury| {
            let player_name = names.get(&injury.player_id).map(|name| name.to_string());
            if player_name.is_none() {
                tracing::debug!(injury_id = %injury.id, player_id = %injury.player_id, "injury for unknown player");
            }
            InjuryRow {
                injury,
                player_name,
            }
        })
        .collect()
}

impl Entity for InjuryRow {
    type SortKey = InjurySort;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.player_name.as_deref(),
            self.injury.injury_type.as_deref(),
            self.injury.injury_description.as_deref(),
        ]
    }

    fn category(&self) -> Option<&str> {
        self.injury.severity.as_ref().map(|s| s.as_str())
    }

    fn status_flag(&self) -> Option<bool> {
        Some(self.injury.is_active)
    }

    fn compare_by(&self, other: &Self, key: InjurySort) -> Ordering {
        let (a, b) = (&self.injury, &other.injury);
        match key {
            InjurySort::Date => cmp_opt(a.injury_date, b.injury_date, true),
            InjurySort::Severity => cmp_opt(a.severity, b.severity, true),
            InjurySort::Return => cmp_opt(a.expected_return_date, b.expected_return_date, false),
            InjurySort::Player => cmp_text(self.player_name.as_deref(), other.player_name.as_deref()),
        }
    }

    fn known_categories() -> &'static [&'static str] {
        SEVERITIES
    }

    fn status_labels() -> Option<(&'static str, &'static str)> {
        Some(("active", "past"))
    }

    fn extra_bucket_labels() -> &'static [&'static str] {
        &["severe_active"]
    }

    fn extra_buckets(&self) -> Vec<&'static str> {
        if self.is_severe_active() {
            vec!["severe_active"]
        } else {
            Vec::new()
        }
    }
}

impl Entity for SquadPlayer {
    type SortKey = SquadSort;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![self.name.as_deref()]
    }

    fn category(&self) -> Option<&str> {
        self.position.as_deref()
    }

    fn compare_by(&self, other: &Self, key: SquadSort) -> Ordering {
        match key {
            SquadSort::Name => cmp_text(self.name.as_deref(), other.name.as_deref()),
            SquadSort::Number => cmp_opt(self.number, other.number, false),
            SquadSort::Age => cmp_opt(self.age, other.age, false),
        }
    }

    fn known_categories() -> &'static [&'static str] {
        SQUAD_POSITIONS
    }

    fn extra_bucket_labels() -> &'static [&'static str] {
        &["imported"]
    }

    fn extra_buckets(&self) -> Vec<&'static str> {
        if self.is_imported {
            vec!["imported"]
        } else {
            Vec::new()
        }
    }
}
