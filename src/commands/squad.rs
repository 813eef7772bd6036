//! Team squad view and importing squad members into the dashboard.

use serde::Serialize;
use std::num::NonZeroUsize;

use super::common::{
    format_breakdown, format_page_footer, format_summary, or_unknown, print_json, CommandContext,
};
use crate::{
    api::types::{SquadPlayer, SquadTeam},
    cli::types::{CategoryFilter, FootballId, SquadSort},
    core::Resource,
    query::{run_query, FilterState, QueryResult},
    Result, RosterError,
};

const SUMMARY_LABELS: [&str; 2] = ["total", "imported"];

/// Parameters for the squad command
#[derive(Debug, Clone)]
pub struct SquadParams {
    pub team_id: FootballId,
    pub search: Option<String>,
    pub position: CategoryFilter,
    pub sort: Option<SquadSort>,
    pub page: usize,
    pub page_size: Option<NonZeroUsize>,
}

impl SquadParams {
    pub fn new(team_id: FootballId) -> Self {
        Self {
            team_id,
            search: None,
            position: CategoryFilter::All,
            sort: None,
            page: 1,
            page_size: None,
        }
    }

    pub fn filter_state(&self) -> FilterState<SquadSort> {
        FilterState::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_category(self.position.clone())
            .with_sort(self.sort)
            .with_page(self.page.max(1))
    }
}

#[derive(Serialize)]
struct SquadOutput<'a> {
    team: &'a SquadTeam,
    #[serde(flatten)]
    result: &'a QueryResult<'a, SquadPlayer>,
}

pub fn format_squad_line(player: &SquadPlayer) -> String {
    let number = player
        .number
        .map(|n| format!("#{:<3}", n))
        .unwrap_or_else(|| "    ".to_string());
    let mut line = format!(
        "{} [{}] {:<28} {:<11} {}",
        number,
        player.id,
        or_unknown(player.name.as_deref()),
        or_unknown(player.position.as_deref()),
        player
            .age
            .map(|a| format!("{} yrs", a))
            .unwrap_or_default()
    );
    if player.is_imported {
        match player.dashboard_player_id {
            Some(id) => line.push_str(&format!("  [imported as {}]", id)),
            None => line.push_str("  [imported]"),
        }
    }
    line.trim_end().to_string()
}

pub fn render_squad(team: &SquadTeam, result: &QueryResult<'_, SquadPlayer>) -> String {
    let mut out = vec![
        format!("{} [{}]", team.name, team.id),
        format_summary(&result.aggregates, &SUMMARY_LABELS),
        format!(
            "Positions: {}",
            format_breakdown(&result.aggregates, &SUMMARY_LABELS)
        ),
        String::new(),
    ];

    if result.page.total_count == 0 {
        out.push("No squad players match the current filters.".to_string());
        return out.join("\n");
    }

    out.extend(result.page.items.iter().map(|p| format_squad_line(p)));
    out.push(String::new());
    out.push(format_page_footer(&result.page));
    out.join("\n")
}

/// Handle the squad command
pub async fn handle_squad(ctx: &CommandContext, params: SquadParams) -> Result<()> {
    let squad = ctx.fetch_squad(params.team_id).await?;
    let filters = params.filter_state();
    let page_size = params.page_size.unwrap_or_else(|| ctx.config.page_size());
    let result = run_query(&squad.players, &filters, page_size);

    if ctx.as_json {
        print_json(&SquadOutput {
            team: &squad.team,
            result: &result,
        })?;
    } else {
        println!("{}", render_squad(&squad.team, &result));
    }
    Ok(())
}

/// Handle the import command
///
/// A reply with `success: false` is reported as an API error.
pub async fn handle_import(
    ctx: &CommandContext,
    team_id: FootballId,
    player_id: FootballId,
) -> Result<()> {
    let result = ctx.client.import_squad_player(team_id, player_id).await?;
    if result.is_rejected() {
        return Err(RosterError::Api {
            status: 200,
            message: result
                .message
                .unwrap_or_else(|| format!("import of player {} was rejected", player_id)),
        });
    }

    ctx.invalidate(Resource::Players);
    ctx.invalidate(Resource::Squad);
    ctx.invalidate(Resource::Dashboard);
    tracing::info!(%team_id, %player_id, "squad player imported");

    if ctx.as_json {
        print_json(&result)?;
    } else {
        match result.dashboard_id() {
            Some(id) => println!("✓ Player {} imported as dashboard player {}", player_id, id),
            None => println!("✓ Player {} imported", player_id),
        }
    }
    Ok(())
}
