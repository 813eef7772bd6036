use crate::cli::types::{FootballId, InjuryId, PlayerId};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};


/// Parse a backend timestamp.
///
/// Accepts RFC 3339 (`2025-01-10T12:00:00+00:00`), naive ISO timestamps with
/// or without fractional seconds (taken as UTC) and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn de_lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| {
        let parsed = parse_timestamp(s);
        if parsed.is_none() && !s.trim().is_empty() {
            tracing::warn!(raw = s, "unparseable timestamp, treating as absent");
        }
        parsed
    }))
}

/// `null` and missing both become `T::default()`.
fn de_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn de_null_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

fn default_true() -> bool {
    true
}

fn de_severity<'de, D>(deserializer: D) -> Result<Option<Severity>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| {
        let parsed = Severity::from_label(s);
        if parsed.is_none() && !s.trim().is_empty() {
            tracing::warn!(raw = s, "unknown injury severity");
        }
        parsed
    }))
}

/// Blank strings carry no information; treat them as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Repairs applied once, at the fetch boundary, so downstream code can rely on
/// the record invariants.
pub trait Normalize {
    fn normalize(self) -> Self;
}

/// Keep the first record for each id.
fn dedupe_by_id<T, K, F>(records: Vec<T>, key: F, what: &str) -> Vec<T>
where
    K: std::hash::Hash + Eq + std::fmt::Display,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let id = key(record);
            if seen.contains(&id) {
                tracing::warn!(id = %id, "dropping duplicate {}", what);
                false
            } else {
                seen.insert(id);
                true
            }
        })
        .collect()
}

/// Player as returned by `GET /players`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    #[serde(default)]
    pub sorare_id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub club_name: Option<String>,
    #[serde(default)]
    pub league_name: Option<String>,
    /// Goalkeeper, Defender, Midfielder or Forward
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub average_score: f64,
    #[serde(default, deserialize_with = "de_null_default")]
    pub total_games: u32,
    #[serde(default, deserialize_with = "de_null_default")]
    pub season_games: u32,
    #[serde(default)]
    pub last_game_score: Option<f64>,
    #[serde(default = "default_true", deserialize_with = "de_null_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "de_null_default")]
    pub is_injured: bool,
    #[serde(default)]
    pub injury_status: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_lenient_datetime")]
    pub last_sorare_sync: Option<DateTime<Utc>>,
}

impl PlayerRecord {
    /// Minimal record; everything else takes its default.
    pub fn new(id: PlayerId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            sorare_id: None,
            slug: None,
            first_name: None,
            last_name: None,
            display_name: Some(display_name.into()),
            club_name: None,
            league_name: None,
            position: None,
            country: None,
            age: None,
            average_score: 0.0,
            total_games: 0,
            season_games: 0,
            last_game_score: None,
            is_active: true,
            is_injured: false,
            injury_status: None,
            created_at: None,
            updated_at: None,
            last_sorare_sync: None,
        }
    }

    /// Name used everywhere a player is shown: display name, else first + last.
    pub fn name(&self) -> Option<String> {
        if let Some(name) = &self.display_name {
            return Some(name.clone());
        }
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

impl Normalize for PlayerRecord {
    fn normalize(mut self) -> Self {
        self.display_name = non_blank(self.display_name);
        self.first_name = non_blank(self.first_name);
        self.last_name = non_blank(self.last_name);
        self.club_name = non_blank(self.club_name);
        self.league_name = non_blank(self.league_name);
        self.position = non_blank(self.position);
        self.country = non_blank(self.country);
        self.injury_status = non_blank(self.injury_status);

        if !self.average_score.is_finite() || self.average_score < 0.0 {
            tracing::warn!(
                player_id = %self.id,
                score = self.average_score,
                "average score out of range, resetting to 0"
            );
            self.average_score = 0.0;
        }

        if matches!(self.last_game_score, Some(s) if !s.is_finite()) {
            self.last_game_score = None;
        }

        if !self.is_injured && self.injury_status.is_some() {
            tracing::debug!(player_id = %self.id, "clearing injury status on healthy player");
            self.injury_status = None;
        }

        self
    }
}

/// Injury classification used by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Minor, Severity::Moderate, Severity::Severe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "Minor",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }

    /// Exact, case-sensitive label match.
    pub fn from_label(label: &str) -> Option<Self> {
        Severity::ALL.into_iter().find(|s| s.as_str() == label.trim())
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Injury as returned by `GET /injuries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryRecord {
    pub id: InjuryId,
    pub player_id: PlayerId,
    #[serde(default)]
    pub injury_type: Option<String>,
    #[serde(default)]
    pub injury_description: Option<String>,
    #[serde(default, deserialize_with = "de_severity")]
    pub severity: Option<Severity>,
    #[serde(default, deserialize_with = "de_lenient_datetime")]
    pub injury_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_lenient_datetime")]
    pub expected_return_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_lenient_datetime")]
    pub actual_return_date: Option<DateTime<Utc>>,
    #[serde(default = "default_true", deserialize_with = "de_null_true")]
    pub is_active: bool,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl InjuryRecord {
    pub fn new(id: InjuryId, player_id: PlayerId) -> Self {
        Self {
            id,
            player_id,
            injury_type: None,
            injury_description: None,
            severity: None,
            injury_date: None,
            expected_return_date: None,
            actual_return_date: None,
            is_active: true,
            source: None,
            source_url: None,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Normalize for InjuryRecord {
    fn normalize(mut self) -> Self {
        self.injury_type = non_blank(self.injury_type);
        self.injury_description = non_blank(self.injury_description);
        self.source = non_blank(self.source);
        self.source_url = non_blank(self.source_url);

        if let (Some(start), Some(expected)) = (self.injury_date, self.expected_return_date) {
            if expected < start {
                tracing::warn!(
                    injury_id = %self.id,
                    "expected return precedes injury date, dropping it"
                );
                self.expected_return_date = None;
            }
        }

        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerListResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
}

impl Normalize for PlayerListResponse {
    fn normalize(self) -> Self {
        let players = self.players.into_iter().map(Normalize::normalize).collect();
        Self {
            total: self.total,
            players: dedupe_by_id(players, |p: &PlayerRecord| p.id, "player"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InjuryListResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub injuries: Vec<InjuryRecord>,
}

impl Normalize for InjuryListResponse {
    fn normalize(self) -> Self {
        let injuries = self.injuries.into_iter().map(Normalize::normalize).collect();
        Self {
            total: self.total,
            injuries: dedupe_by_id(injuries, |i: &InjuryRecord| i.id, "injury"),
        }
    }
}

/// Headline numbers of `GET /stats/dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    #[serde(default)]
    pub total_players: u64,
    #[serde(default)]
    pub active_players: u64,
    #[serde(default)]
    pub injured_players: u64,
    #[serde(default, deserialize_with = "de_null_default")]
    pub avg_team_score: f64,
    #[serde(default)]
    pub active_injuries_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPlayer {
    pub id: PlayerId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub club: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub score: f64,
    #[serde(default, deserialize_with = "de_null_default")]
    pub games: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastUpdate {
    #[serde(rename = "type")]
    pub update_type: String,
    pub status: String,
    #[serde(default, deserialize_with = "de_lenient_datetime")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items_processed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub overview: DashboardOverview,
    #[serde(default)]
    pub position_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub top_players: Vec<TopPlayer>,
    #[serde(default)]
    pub last_update: Option<LastUpdate>,
}

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Player profile from the football-data search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootballPlayer {
    pub id: FootballId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub injured: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerSearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub players: Vec<FootballPlayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootballTeam {
    pub id: FootballId,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub founded: Option<u16>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub venue: Option<Venue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamSearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub teams: Vec<FootballTeam>,
}

/// Squad member of a third-party team, as shown on the team-import view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadPlayer {
    pub id: FootballId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub is_imported: bool,
    #[serde(default)]
    pub dashboard_player_id: Option<PlayerId>,
}

impl SquadPlayer {
    pub fn new(id: FootballId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            firstname: None,
            lastname: None,
            age: None,
            number: None,
            position: None,
            photo: None,
            nationality: None,
            is_imported: false,
            dashboard_player_id: None,
        }
    }
}

impl Normalize for SquadPlayer {
    fn normalize(mut self) -> Self {
        self.name = non_blank(self.name);
        self.position = non_blank(self.position);
        self.nationality = non_blank(self.nationality);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadTeam {
    pub id: FootballId,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSquadResponse {
    #[serde(default)]
    pub success: bool,
    pub team: SquadTeam,
    #[serde(default)]
    pub players: Vec<SquadPlayer>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub imported_count: u64,
}

impl Normalize for TeamSquadResponse {
    fn normalize(self) -> Self {
        let players = self.players.into_iter().map(Normalize::normalize).collect();
        Self {
            players: dedupe_by_id(players, |p: &SquadPlayer| p.id, "squad player"),
            ..self
        }
    }
}

/// One side of a fixture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchTeam {
    #[serde(default)]
    pub id: Option<FootballId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchLeague {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Scheduled fixture from the football-data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootballMatch {
    #[serde(default, deserialize_with = "de_null_default")]
    pub id: u64,
    /// Kickoff time.
    #[serde(default, deserialize_with = "de_lenient_datetime")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
    /// Provider wording, e.g. "Not Started".
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub league: MatchLeague,
    #[serde(default, deserialize_with = "de_null_default")]
    pub home_team: MatchTeam,
    #[serde(default, deserialize_with = "de_null_default")]
    pub away_team: MatchTeam,
}

/// `GET /football/matches/upcoming/{team_id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpcomingMatchesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub matches: Vec<FootballMatch>,
}

impl Normalize for UpcomingMatchesResponse {
    /// Soonest kickoff first; fixtures without a date go last.
    fn normalize(mut self) -> Self {
        for m in &mut self.matches {
            m.venue = non_blank(m.venue.take());
            m.status = non_blank(m.status.take());
            m.home_team.name = non_blank(m.home_team.name.take());
            m.away_team.name = non_blank(m.away_team.name.take());
        }
        self.matches.sort_by_key(|m| (m.date.is_none(), m.date));
        self
    }
}

/// Body of `POST /players/import`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPlayerRequest {
    pub football_api_id: FootballId,
    pub sorare_id: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// Outcome of an import call. The backend's reply varies by route (a
/// `{success, message}` envelope or the created player itself), so every
/// field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl ImportResult {
    /// Only an explicit `success: false` is a rejection; a 2xx reply without
    /// the flag counts as accepted.
    pub fn is_rejected(&self) -> bool {
        self.success == Some(false)
    }

    /// Dashboard id of the imported player, from whichever field the route sent.
    pub fn dashboard_id(&self) -> Option<PlayerId> {
        self.player_id.or(self.id)
    }
}

/// Plain `{ "message": ... }` reply (e.g. deletes).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
