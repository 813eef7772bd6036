//! Common utilities and helper functions shared across commands.
//!
//! Holds the per-invocation [`CommandContext`] (config, backend client and the
//! query caches) plus the text formatting used by the list views.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::{
    api::{
        http::{InjuryListParams, PlayerListParams},
        types::{DashboardStats, InjuryRecord, PlayerRecord, TeamSquadResponse},
        BackendClient,
    },
    cli::types::FootballId,
    config::Config,
    core::{CacheStatus, QueryCache, QueryKey, Resource},
    query::{Aggregates, ResultPage},
    Result,
};

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub config: Config,
    pub client: BackendClient,
    /// Print JSON instead of text lines.
    pub as_json: bool,
    players: QueryCache<QueryKey, Vec<PlayerRecord>>,
    injuries: QueryCache<QueryKey, Vec<InjuryRecord>>,
    dashboard: QueryCache<QueryKey, DashboardStats>,
    squads: QueryCache<QueryKey, TeamSquadResponse>,
}

impl CommandContext {
    pub fn new(config: Config, as_json: bool) -> Result<Self> {
        let client = BackendClient::from_config(&config)?;
        let (capacity, ttl) = (config.cache_capacity, config.cache_ttl());
        tracing::debug!(api_url = %client.base_url(), capacity, ttl_secs = ttl.as_secs(), "command context ready");

        Ok(Self {
            config,
            client,
            as_json,
            players: QueryCache::new(capacity, ttl),
            injuries: QueryCache::new(capacity, ttl),
            dashboard: QueryCache::new(capacity, ttl),
            squads: QueryCache::new(capacity, ttl),
        })
    }

    /// Every player up to the fetch cap; the engine filters locally.
    pub async fn fetch_players(&self) -> Result<Vec<PlayerRecord>> {
        let limit = self.config.fetch_limit;
        let key = QueryKey::new(Resource::Players).with_param("limit", limit);
        let (players, status) = self
            .players
            .get_or_fetch(key, move || async move {
                let response = self
                    .client
                    .list_players(&PlayerListParams::with_limit(limit))
                    .await?;
                Ok(response.players)
            })
            .await?;
        log_fetch("players", players.len(), status);
        Ok(players)
    }

    /// Every injury, current or past, up to the fetch cap.
    pub async fn fetch_injuries(&self) -> Result<Vec<InjuryRecord>> {
        let limit = self.config.fetch_limit;
        let key = QueryKey::new(Resource::Injuries).with_param("limit", limit);
        let (injuries, status) = self
            .injuries
            .get_or_fetch(key, move || async move {
                let response = self
                    .client
                    .list_injuries(&InjuryListParams::with_limit(limit))
                    .await?;
                Ok(response.injuries)
            })
            .await?;
        log_fetch("injuries", injuries.len(), status);
        Ok(injuries)
    }

    pub async fn fetch_dashboard(&self) -> Result<(DashboardStats, CacheStatus)> {
        self.dashboard
            .get_or_fetch(QueryKey::new(Resource::Dashboard), move || {
                self.client.dashboard_stats()
            })
            .await
    }

    pub async fn fetch_squad(&self, team_id: FootballId) -> Result<TeamSquadResponse> {
        let key = QueryKey::new(Resource::Squad).with_param("team", team_id);
        let (squad, status) = self
            .squads
            .get_or_fetch(key, move || self.client.team_squad(team_id))
            .await?;
        log_fetch("squad", squad.players.len(), status);
        Ok(squad)
    }

    /// Drop every cached query for `resource`. Returns how many were dropped.
    pub fn invalidate(&self, resource: Resource) -> usize {
        match resource {
            Resource::Players => self.players.invalidate_resource(resource),
            Resource::Injuries => self.injuries.invalidate_resource(resource),
            Resource::Dashboard => self.dashboard.invalidate_resource(resource),
            Resource::Squad => self.squads.invalidate_resource(resource),
        }
    }
}

fn log_fetch(what: &str, count: usize, status: CacheStatus) {
    match status {
        CacheStatus::Hit => tracing::debug!(what, count, "loaded from cache"),
        CacheStatus::Miss => tracing::info!(what, count, "fetched from backend"),
    }
}

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Placeholder for absent text fields.
pub fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or("unknown")
}

/// One line of summary counts, in the order of `labels`.
///
/// ```rust
/// use std::collections::BTreeMap;
/// use roster_dash::commands::common::format_summary;
///
/// let mut counts = BTreeMap::new();
/// counts.insert("total".to_string(), 3);
/// counts.insert("injured".to_string(), 1);
/// assert_eq!(format_summary(&counts, &["total", "injured", "healthy"]), "total: 3 | injured: 1 | healthy: 0");
/// ```
pub fn format_summary(aggregates: &Aggregates, labels: &[&str]) -> String {
    labels
        .iter()
        .map(|label| format!("{}: {}", label, aggregates.get(*label).copied().unwrap_or(0)))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Category buckets only, skipping `total` and the status labels.
pub fn format_breakdown(aggregates: &Aggregates, skip: &[&str]) -> String {
    aggregates
        .iter()
        .filter(|(label, count)| **count > 0 && !skip.contains(&label.as_str()))
        .map(|(label, count)| format!("{} {}", label, count))
        .collect::<Vec<_>>()
        .join(", ")
}

/// "Showing 13-24 of 40 (page 2/4)", or a hint when the page is past the end.
pub fn format_page_footer<U>(page: &ResultPage<U>) -> String {
    if page.is_out_of_range() {
        return format!(
            "Page {} is past the last page ({}); try --page 1",
            page.page, page.total_pages
        );
    }
    format!(
        "Showing {}-{} of {} (page {}/{})",
        page.first_index(),
        page.last_index(),
        page.total_count,
        page.page,
        page.total_pages
    )
}

/// Percentages formatted with one decimal, keyed like the input.
pub fn format_shares(shares: &BTreeMap<String, f64>) -> String {
    shares
        .iter()
        .map(|(label, pct)| format!("{} {:.1}%", label, pct))
        .collect::<Vec<_>>()
        .join(", ")
}
