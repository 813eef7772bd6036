//! Upcoming fixtures of a football-data team.

use super::common::{or_unknown, print_json, CommandContext};
use crate::{api::types::FootballMatch, cli::types::FootballId, Result};

/// "Sat 05 Oct 19:00  PSG vs Lens  (Ligue 1, Not Started) @ Parc des Princes"
pub fn format_match_line(fixture: &FootballMatch) -> String {
    let kickoff = fixture
        .date
        .map(|d| d.format("%a %d %b %H:%M").to_string())
        .unwrap_or_else(|| "date TBD".to_string());
    let mut line = format!(
        "{}  {} vs {}",
        kickoff,
        or_unknown(fixture.home_team.name.as_deref()),
        or_unknown(fixture.away_team.name.as_deref())
    );

    let details: Vec<&str> = [fixture.league.name.as_deref(), fixture.status.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !details.is_empty() {
        line.push_str(&format!("  ({})", details.join(", ")));
    }
    if let Some(venue) = &fixture.venue {
        line.push_str(&format!(" @ {}", venue));
    }
    line
}

/// Handle the upcoming command
pub async fn handle_upcoming(ctx: &CommandContext, team_id: FootballId, next: u8) -> Result<()> {
    let response = ctx.client.upcoming_matches(team_id, next).await?;

    if ctx.as_json {
        return print_json(&response);
    }
    if response.matches.is_empty() {
        println!("No upcoming matches for team {}.", team_id);
        return Ok(());
    }
    println!("Next {} match(es) for team {}:", response.matches.len(), team_id);
    for fixture in &response.matches {
        println!("  {}", format_match_line(fixture));
    }
    Ok(())
}
