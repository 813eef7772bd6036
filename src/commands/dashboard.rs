//! Dashboard overview and backend health.

use serde::Serialize;
use std::collections::BTreeMap;

use super::common::{format_shares, or_unknown, print_json, CommandContext};
use crate::{
    api::types::{DashboardStats, Health},
    query::{percent, shares},
    Result,
};

/// Dashboard stats plus the ratios shown on the stat cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    #[serde(flatten)]
    pub stats: DashboardStats,
    pub active_pct: f64,
    pub injured_pct: f64,
    pub position_shares: BTreeMap<String, f64>,
}

impl DashboardSummary {
    pub fn from_stats(stats: DashboardStats) -> Self {
        let overview = &stats.overview;
        let active_pct = percent(overview.active_players, overview.total_players);
        let injured_pct = percent(overview.injured_players, overview.total_players);
        let position_shares = shares(&stats.position_distribution);
        Self {
            stats,
            active_pct,
            injured_pct,
            position_shares,
        }
    }
}

pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let stats = &summary.stats;
    let overview = &stats.overview;

    let mut out = vec![
        format!(
            "Players: {} total, {} active ({:.1}%), {} injured ({:.1}%)",
            overview.total_players,
            overview.active_players,
            summary.active_pct,
            overview.injured_players,
            summary.injured_pct
        ),
        format!("Average score: {:.1}", overview.avg_team_score),
        format!("Active injuries: {}", overview.active_injuries_count),
    ];

    if !summary.position_shares.is_empty() {
        out.push(format!("Positions: {}", format_shares(&summary.position_shares)));
    }

    if !stats.top_players.is_empty() {
        out.push(String::new());
        out.push("Top players:".to_string());
        for (rank, player) in stats.top_players.iter().enumerate() {
            out.push(format!(
                "  {:>2}. {} ({}, {}) {:.1} pts, {} games",
                rank + 1,
                or_unknown(player.name.as_deref()),
                or_unknown(player.club.as_deref()),
                or_unknown(player.position.as_deref()),
                player.score,
                player.games
            ));
        }
    }

    if let Some(update) = &stats.last_update {
        let when = update
            .date
            .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "unknown date".to_string());
        out.push(String::new());
        out.push(format!(
            "Last update: {} {} on {} ({} items)",
            update.update_type, update.status, when, update.items_processed
        ));
    }

    out.join("\n")
}

/// Handle the dashboard command
pub async fn handle_dashboard(ctx: &CommandContext) -> Result<()> {
    let (stats, _) = ctx.fetch_dashboard().await?;
    let summary = DashboardSummary::from_stats(stats);

    if ctx.as_json {
        print_json(&summary)?;
    } else {
        println!("{}", render_dashboard(&summary));
    }
    Ok(())
}

pub fn format_health(health: &Health) -> String {
    let version = health
        .version
        .as_deref()
        .map(|v| format!(" (version {})", v))
        .unwrap_or_default();
    if health.is_healthy() {
        format!("✓ Backend healthy{}", version)
    } else {
        format!("⚠ Backend reports '{}'{}", health.status, version)
    }
}

/// Handle the health command
pub async fn handle_health(ctx: &CommandContext) -> Result<()> {
    let health = ctx.client.health().await?;
    if ctx.as_json {
        print_json(&health)?;
    } else {
        println!("{}", format_health(&health));
    }
    Ok(())
}
