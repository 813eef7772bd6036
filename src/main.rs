//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use roster_dash::{
    cli::{Commands, ConfigCmd, RosterCli},
    commands::{
        config_cmd::{handle_config_init, handle_config_show},
        dashboard::{handle_dashboard, handle_health},
        injuries::{handle_injuries, InjuriesParams},
        players::{handle_delete_player, handle_player, handle_players, PlayersParams},
        matches::handle_upcoming,
        search::{
            handle_import_player, handle_search_players, handle_search_teams, ImportPlayerParams,
        },
        squad::{handle_import, handle_squad, SquadParams},
        watch::{handle_watch, WatchParams},
        CommandContext,
    },
    config::Config,
};

fn init_tracing(verbose: bool) {
    let log_filter = if verbose {
        "roster_dash=debug,info"
    } else {
        "warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter));

    // stdout is for results; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = RosterCli::parse();
    init_tracing(app.verbose);

    let config_path = app.config.clone().unwrap_or_else(Config::default_path);

    // `config init` must work even when the existing file is broken
    if let Commands::Config {
        cmd: ConfigCmd::Init { force },
    } = app.command
    {
        handle_config_init(&config_path, force)?;
        return Ok(());
    }

    let config = Config::resolve(Some(config_path.as_path()), app.api_url.clone())
        .with_context(|| format!("loading config '{}'", config_path.display()))?;
    tracing::debug!(api_url = %config.base_url(), "configuration resolved");

    if let Commands::Config {
        cmd: ConfigCmd::Show,
    } = app.command
    {
        handle_config_show(&config, &config_path, app.json)?;
        return Ok(());
    }

    let ctx = CommandContext::new(config, app.json).context("building backend client")?;
    let api_url = ctx.client.base_url().to_string();

    let outcome = match app.command {
        Commands::Players {
            list,
            position,
            status,
            sort,
        } => {
            handle_players(
                &ctx,
                PlayersParams {
                    search: list.search,
                    position,
                    status,
                    sort,
                    page: list.page,
                    page_size: list.page_size,
                },
            )
            .await
        }

        Commands::Injuries {
            list,
            severity,
            status,
            sort,
        } => {
            handle_injuries(
                &ctx,
                InjuriesParams {
                    search: list.search,
                    severity,
                    status,
                    sort,
                    page: list.page,
                    page_size: list.page_size,
                },
            )
            .await
        }

        Commands::Player { id } => handle_player(&ctx, id).await,
        Commands::DeletePlayer { id } => handle_delete_player(&ctx, id).await,
        Commands::Dashboard => handle_dashboard(&ctx).await,
        Commands::Health => handle_health(&ctx).await,

        Commands::SearchPlayers { query, page } => handle_search_players(&ctx, &query, page).await,
        Commands::SearchTeams { query, country } => {
            handle_search_teams(&ctx, &query, country.as_deref()).await
        }
        Commands::ImportPlayer {
            football_id,
            name,
            sorare_id,
            position,
        } => {
            handle_import_player(
                &ctx,
                ImportPlayerParams {
                    football_id,
                    name,
                    sorare_id,
                    position,
                },
            )
            .await
        }
        Commands::Upcoming { team_id, next } => handle_upcoming(&ctx, team_id, next).await,

        Commands::Squad {
            team_id,
            list,
            position,
            sort,
        } => {
            handle_squad(
                &ctx,
                SquadParams {
                    search: list.search,
                    position,
                    sort,
                    page: list.page,
                    page_size: list.page_size,
                    ..SquadParams::new(team_id)
                },
            )
            .await
        }
        Commands::Import { team_id, player_id } => handle_import(&ctx, team_id, player_id).await,

        Commands::Watch { count } => {
            handle_watch(
                &ctx,
                WatchParams {
                    count,
                    ..WatchParams::default()
                },
            )
            .await
        }

        Commands::Config { .. } => Ok(()),
    };

    outcome.with_context(|| format!("request to {} failed", api_url))?;
    Ok(())
}
