//! Injuries list, joined with player names.

use std::num::NonZeroUsize;

use super::common::{format_page_footer, format_summary, or_unknown, print_json, CommandContext};
use crate::{
    api::types::Severity,
    cli::types::{CategoryFilter, InjuryStatusFilter, InjurySort},
    query::{join_injuries, run_query, FilterState, InjuryRow, QueryResult},
    Result,
};

const SUMMARY_LABELS: [&str; 5] = ["total", "active", "past", "severe_active", "Severe"];

/// Parameters for the injuries command
#[derive(Debug, Clone, Default)]
pub struct InjuriesParams {
    pub search: Option<String>,
    pub severity: CategoryFilter,
    /// Defaults to active injuries only.
    pub status: InjuryStatusFilter,
    pub sort: Option<InjurySort>,
    pub page: usize,
    pub page_size: Option<NonZeroUsize>,
}

impl InjuriesParams {
    pub fn filter_state(&self) -> FilterState<InjurySort> {
        FilterState::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_category(self.severity.clone())
            .with_status(self.status.as_flag())
            .with_sort(self.sort)
            .with_page(self.page.max(1))
    }

    /// The untouched default view: active injuries, nothing else selected.
    fn is_default_view(&self) -> bool {
        self.status == InjuryStatusFilter::Active
            && self.severity.is_all()
            && self.search.as_deref().map_or(true, str::is_empty)
    }
}

/// Message for an empty result, distinct from an error.
pub fn empty_message(params: &InjuriesParams) -> &'static str {
    if params.is_default_view() {
        "No active injuries — great!"
    } else {
        "No injuries match the current filters."
    }
}

pub fn format_injury_line(row: &InjuryRow) -> String {
    let injury = &row.injury;
    let date = |d: Option<chrono::DateTime<chrono::Utc>>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "?".to_string())
    };
    let mut line = format!(
        "{:<28} {:<9} {:<24} since {}",
        or_unknown(row.player_name.as_deref()),
        injury.severity.map(|s| s.as_str()).unwrap_or("unknown"),
        or_unknown(injury.injury_type.as_deref()),
        date(injury.injury_date),
    );
    if injury.is_active {
        if injury.expected_return_date.is_some() {
            line.push_str(&format!(", back {}", date(injury.expected_return_date)));
        }
    } else {
        line.push_str(&format!(", returned {}", date(injury.actual_return_date)));
    }
    line
}

pub fn render_injuries(result: &QueryResult<'_, InjuryRow>, params: &InjuriesParams) -> String {
    let mut out = vec![format_summary(&result.aggregates, &SUMMARY_LABELS), String::new()];

    if result.page.total_count == 0 {
        out.push(empty_message(params).to_string());
        return out.join("\n");
    }

    out.extend(result.page.items.iter().map(|row| format_injury_line(row)));
    out.push(String::new());
    out.push(format_page_footer(&result.page));
    out.join("\n")
}

/// Handle the injuries command
pub async fn handle_injuries(ctx: &CommandContext, params: InjuriesParams) -> Result<()> {
    if let CategoryFilter::Only(value) = &params.severity {
        if Severity::from_label(value).is_none() {
            tracing::warn!(severity = %value, "unknown severity, expected Minor, Moderate or Severe");
        }
    }

    let (injuries, players) = tokio::try_join!(ctx.fetch_injuries(), ctx.fetch_players())?;
    let rows = join_injuries(injuries, &players);

    let filters = params.filter_state();
    let page_size = params.page_size.unwrap_or_else(|| ctx.config.page_size());
    let result = run_query(&rows, &filters, page_size);
    tracing::debug!(
        fetched = rows.len(),
        matched = result.page.total_count,
        page = result.page.page,
        "injuries query"
    );

    if ctx.as_json {
        print_json(&result)?;
    } else {
        println!("{}", render_injuries(&result, &params));
    }
    Ok(())
}
