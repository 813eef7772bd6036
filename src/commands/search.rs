//! Server-side search of the football-data provider, and importing a hit.
//!
//! Unlike the list views these hit the backend on every call; there is no
//! local filtering and no cancellation of an earlier search.

use super::common::{or_unknown, print_json, CommandContext};
use crate::{
    api::types::{FootballPlayer, FootballTeam, ImportPlayerRequest},
    cli::types::FootballId,
    core::Resource,
    Result, RosterError,
};

/// Parameters for the import-player command
#[derive(Debug, Clone)]
pub struct ImportPlayerParams {
    /// Id from a `search-players` result.
    pub football_id: FootballId,
    pub name: String,
    /// Defaults to `api-football-{id}`.
    pub sorare_id: Option<String>,
    pub position: Option<String>,
}

impl ImportPlayerParams {
    pub fn request(&self) -> ImportPlayerRequest {
        ImportPlayerRequest {
            football_api_id: self.football_id,
            sorare_id: self
                .sorare_id
                .clone()
                .unwrap_or_else(|| format!("api-football-{}", self.football_id)),
            display_name: self.name.trim().to_string(),
            position: self.position.clone(),
        }
    }
}

pub fn format_football_player(player: &FootballPlayer) -> String {
    let age = player
        .age
        .map(|a| format!("{} yrs", a))
        .unwrap_or_else(|| "age unknown".to_string());
    let mut line = format!(
        "[{}] {} ({}, {})",
        player.id,
        or_unknown(player.name.as_deref()),
        or_unknown(player.nationality.as_deref()),
        age
    );
    if player.injured == Some(true) {
        line.push_str(" [injured]");
    }
    line
}

pub fn format_team(team: &FootballTeam) -> String {
    let mut line = format!("[{}] {}", team.id, team.name);
    if let Some(code) = &team.code {
        line.push_str(&format!(" ({})", code));
    }
    line.push_str(&format!(" - {}", or_unknown(team.country.as_deref())));
    if let Some(founded) = team.founded {
        line.push_str(&format!(", founded {}", founded));
    }
    if let Some(venue) = &team.venue {
        if let Some(name) = &venue.name {
            line.push_str(&format!(", plays at {}", name));
            if let Some(city) = &venue.city {
                line.push_str(&format!(" ({})", city));
            }
        }
    }
    line
}

/// Handle the search-players command
pub async fn handle_search_players(ctx: &CommandContext, query: &str, page: u32) -> Result<()> {
    let response = ctx.client.search_players(query, page).await?;

    if ctx.as_json {
        return print_json(&response);
    }
    if response.players.is_empty() {
        println!("No players found for '{}'.", query.trim());
        return Ok(());
    }
    println!("{} player(s) found, page {}:", response.count, page.max(1));
    for player in &response.players {
        println!("  {}", format_football_player(player));
    }
    Ok(())
}

/// Handle the search-teams command
pub async fn handle_search_teams(
    ctx: &CommandContext,
    query: &str,
    country: Option<&str>,
) -> Result<()> {
    let response = ctx.client.search_teams(query, country).await?;

    if ctx.as_json {
        return print_json(&response);
    }
    if response.teams.is_empty() {
        println!("No teams found for '{}'.", query.trim());
        return Ok(());
    }
    println!("{} team(s) found:", response.count);
    for team in &response.teams {
        println!("  {}", format_team(team));
    }
    Ok(())
}

/// Handle the import-player command
///
/// Adds a football-data player to the dashboard and drops the cached player
/// list and dashboard stats.
pub async fn handle_import_player(ctx: &CommandContext, params: ImportPlayerParams) -> Result<()> {
    let request = params.request();
    let result = ctx.client.import_player(&request).await?;
    if result.is_rejected() {
        return Err(RosterError::Api {
            status: 200,
            message: result
                .message
                .unwrap_or_else(|| format!("import of player {} was rejected", params.football_id)),
        });
    }

    ctx.invalidate(Resource::Players);
    ctx.invalidate(Resource::Dashboard);
    tracing::info!(football_id = %params.football_id, sorare_id = %request.sorare_id, "player imported");

    if ctx.as_json {
        return print_json(&result);
    }
    let name = result.display_name.as_deref().unwrap_or(&request.display_name);
    match result.dashboard_id() {
        Some(id) => println!("✓ {} added to the dashboard as player {}", name, id),
        None => println!("✓ {} added to the dashboard", name),
    }
    Ok(())
}
