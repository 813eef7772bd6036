//! Players list, player detail and player deletion.

use std::num::NonZeroUsize;

use super::common::{
    format_breakdown, format_page_footer, format_summary, or_unknown, print_json, CommandContext,
};
use crate::{
    api::types::PlayerRecord,
    cli::types::{CategoryFilter, PlayerId, PlayerSort, PlayerStatusFilter},
    core::Resource,
    query::{run_query, FilterState, QueryResult},
    Result,
};

const STATUS_LABELS: [&str; 4] = ["total", "active", "injured", "healthy"];

/// Parameters for the players command
#[derive(Debug, Clone, Default)]
pub struct PlayersParams {
    pub search: Option<String>,
    pub position: CategoryFilter,
    pub status: PlayerStatusFilter,
    pub sort: Option<PlayerSort>,
    pub page: usize,
    /// Overrides the configured page size.
    pub page_size: Option<NonZeroUsize>,
}

impl PlayersParams {
    pub fn filter_state(&self) -> FilterState<PlayerSort> {
        FilterState::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_category(self.position.clone())
            .with_status(self.status.as_flag())
            .with_sort(self.sort)
            .with_page(self.page.max(1))
    }
}

/// One list row: name, club, position, score, games and injury marker.
pub fn format_player_line(player: &PlayerRecord) -> String {
    let name = player.name().unwrap_or_else(|| format!("#{}", player.id));
    let mut line = format!(
        "{:<28} {:<22} {:<11} {:>6.1} pts {:>4} games",
        name,
        or_unknown(player.club_name.as_deref()),
        or_unknown(player.position.as_deref()),
        player.average_score,
        player.total_games
    );
    if player.is_injured {
        line.push_str(&format!(
            "  [injured: {}]",
            player.injury_status.as_deref().unwrap_or("no details")
        ));
    }
    if !player.is_active {
        line.push_str("  [inactive]");
    }
    line
}

pub fn render_players(result: &QueryResult<'_, PlayerRecord>) -> String {
    let mut out = vec![
        format_summary(&result.aggregates, &STATUS_LABELS),
        format!(
            "Positions: {}",
            format_breakdown(&result.aggregates, &STATUS_LABELS)
        ),
        String::new(),
    ];

    if result.page.total_count == 0 {
        out.push("No players match the current filters.".to_string());
        return out.join("\n");
    }

    out.extend(result.page.items.iter().map(|p| format_player_line(p)));
    out.push(String::new());
    out.push(format_page_footer(&result.page));
    out.join("\n")
}

/// Handle the players command
pub async fn handle_players(ctx: &CommandContext, params: PlayersParams) -> Result<()> {
    let players = ctx.fetch_players().await?;
    let filters = params.filter_state();
    let page_size = params.page_size.unwrap_or_else(|| ctx.config.page_size());

    let result = run_query(&players, &filters, page_size);
    tracing::debug!(
        fetched = players.len(),
        matched = result.page.total_count,
        page = result.page.page,
        "players query"
    );

    if ctx.as_json {
        print_json(&result)?;
    } else {
        println!("{}", render_players(&result));
    }
    Ok(())
}

pub fn format_player_detail(player: &PlayerRecord) -> String {
    let mut lines = vec![
        format!(
            "{} (#{})",
            player.name().unwrap_or_else(|| "unknown".to_string()),
            player.id
        ),
        format!("  Club:      {}", or_unknown(player.club_name.as_deref())),
        format!("  League:    {}", or_unknown(player.league_name.as_deref())),
        format!("  Position:  {}", or_unknown(player.position.as_deref())),
        format!("  Country:   {}", or_unknown(player.country.as_deref())),
        format!(
            "  Age:       {}",
            player
                .age
                .map(|a| a.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        ),
        format!("  Avg score: {:.1}", player.average_score),
        format!(
            "  Games:     {} total, {} this season",
            player.total_games, player.season_games
        ),
    ];
    if let Some(last) = player.last_game_score {
        lines.push(format!("  Last game: {:.1}", last));
    }
    lines.push(format!(
        "  Status:    {}{}",
        if player.is_active { "active" } else { "inactive" },
        if player.is_injured {
            format!(
                ", injured ({})",
                player.injury_status.as_deref().unwrap_or("no details")
            )
        } else {
            String::new()
        }
    ));
    if let Some(sync) = player.last_sorare_sync {
        lines.push(format!("  Synced:    {}", sync.format("%Y-%m-%d %H:%M UTC")));
    }
    lines.join("\n")
}

/// Handle the player detail command
pub async fn handle_player(ctx: &CommandContext, id: PlayerId) -> Result<()> {
    let player = ctx.client.get_player(id).await?;
    if ctx.as_json {
        print_json(&player)?;
    } else {
        println!("{}", format_player_detail(&player));
    }
    Ok(())
}

/// Handle the delete-player command
pub async fn handle_delete_player(ctx: &CommandContext, id: PlayerId) -> Result<()> {
    ctx.client.delete_player(id).await?;
    ctx.invalidate(Resource::Players);
    ctx.invalidate(Resource::Dashboard);

    if ctx.as_json {
        print_json(&serde_json::json!({ "deleted": id }))?;
    } else {
        println!("✓ Player {} deleted", id);
    }
    Ok(())
}
