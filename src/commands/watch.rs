//! Live dashboard: poll stats and health until interrupted.

use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use super::{
    common::{print_json, CommandContext},
    dashboard::{format_health, render_dashboard, DashboardSummary},
};
use crate::Result;

/// Parameters for the watch command
#[derive(Debug, Clone, Copy, Default)]
pub struct WatchParams {
    /// Stop after this many dashboard refreshes.
    pub count: Option<u64>,
    pub refresh_interval: Option<Duration>,
    pub health_interval: Option<Duration>,
}

/// Stats younger than `cache_ttl` are served from the cache, so a refresh
/// interval shorter than the TTL does not hit the backend every tick.
async fn refresh_dashboard(ctx: &CommandContext) -> Result<()> {
    let (stats, status) = ctx.fetch_dashboard().await?;
    tracing::debug!(?status, "dashboard refreshed");
    let summary = DashboardSummary::from_stats(stats);
    if ctx.as_json {
        print_json(&summary)?;
    } else {
        println!("{}\n", render_dashboard(&summary));
    }
    Ok(())
}

async fn check_health(ctx: &CommandContext) {
    match ctx.client.health().await {
        Ok(health) if ctx.as_json => {
            if let Err(e) = print_json(&health) {
                tracing::warn!(error = %e, "could not print health");
            }
        }
        Ok(health) => println!("{}", format_health(&health)),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            if !ctx.as_json {
                println!("⚠ Backend unreachable: {}", e);
            }
        }
    }
}

/// Handle the watch command
///
/// Fetch failures are logged and retried on the next tick.
pub async fn handle_watch(ctx: &CommandContext, params: WatchParams) -> Result<()> {
    let refresh_every = params
        .refresh_interval
        .unwrap_or_else(|| ctx.config.refresh_interval());
    let health_every = params
        .health_interval
        .unwrap_or_else(|| ctx.config.health_interval());

    let mut refresh = interval(refresh_every);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut health = interval(health_every);
    health.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        refresh_secs = refresh_every.as_secs(),
        health_secs = health_every.as_secs(),
        "watching dashboard"
    );

    let mut refreshes = 0u64;
    loop {
        tokio::select! {
            _ = refresh.tick() => {
                if let Err(e) = refresh_dashboard(ctx).await {
                    tracing::warn!(error = %e, "dashboard refresh failed");
                    if !ctx.as_json {
                        println!("⚠ Could not refresh dashboard: {}", e);
                    }
                }
                refreshes += 1;
                if params.count.is_some_and(|count| refreshes >= count) {
                    break;
                }
            }
            _ = health.tick() => check_health(ctx).await,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
        }
    }

    Ok(())
}
