//! Integration tests for CLI argument parsing

use clap::Parser;
use roster_dash::cli::{
    types::{CategoryFilter, InjuryStatusFilter, PlayerSort, PlayerStatusFilter},
    Commands, ConfigCmd, RosterCli,
};
use roster_dash::{FootballId, PlayerId};

#[test]
fn test_players_defaults() {
    let cli = RosterCli::try_parse_from(["roster-dash", "players"]).unwrap();
    assert!(!cli.json);
    assert!(cli.api_url.is_none());
    match cli.command {
        Commands::Players {
            list,
            position,
            status,
            sort,
        } => {
            assert_eq!(list.page, 1);
            assert!(list.search.is_none());
            assert!(list.page_size.is_none());
            assert_eq!(position, CategoryFilter::All);
            assert_eq!(status, PlayerStatusFilter::All);
            assert!(sort.is_none());
        }
        other => panic!("Expected Players, got {:?}", other),
    }
}

#[test]
fn test_players_with_filters_and_global_flags() {
    let cli = RosterCli::try_parse_from([
        "roster-dash",
        "players",
        "-q",
        "mes",
        "--position",
        "Forward",
        "--status",
        "healthy",
        "--sort",
        "score",
        "--page",
        "2",
        "--page-size",
        "20",
        "--json",
        "--api-url",
        "http://backend:8000",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.api_url.as_deref(), Some("http://backend:8000"));
    match cli.command {
        Commands::Players {
            list,
            position,
            status,
            sort,
        } => {
            assert_eq!(list.search.as_deref(), Some("mes"));
            assert_eq!(list.page, 2);
            assert_eq!(list.page_size.map(|n| n.get()), Some(20));
            assert_eq!(position, CategoryFilter::only("Forward"));
            assert_eq!(status, PlayerStatusFilter::Healthy);
            assert_eq!(sort, Some(PlayerSort::Score));
        }
        other => panic!("Expected Players, got {:?}", other),
    }
}

#[test]
fn test_injuries_default_to_active() {
    let cli = RosterCli::try_parse_from(["roster-dash", "injuries"]).unwrap();
    match cli.command {
        Commands::Injuries {
            status, severity, ..
        } => {
            assert_eq!(status, InjuryStatusFilter::Active);
            assert!(severity.is_all());
        }
        other => panic!("Expected Injuries, got {:?}", other),
    }
}

#[test]
fn test_zero_page_size_rejected() {
    assert!(RosterCli::try_parse_from(["roster-dash", "players", "--page-size", "0"]).is_err());
}

#[test]
fn test_ids_are_parsed() {
    let cli = RosterCli::try_parse_from(["roster-dash", "delete-player", "42"]).unwrap();
    assert!(matches!(cli.command, Commands::DeletePlayer { id } if id == PlayerId::new(42)));

    let cli = RosterCli::try_parse_from(["roster-dash", "import", "85", "278"]).unwrap();
    match cli.command {
        Commands::Import { team_id, player_id } => {
            assert_eq!(team_id, FootballId::new(85));
            assert_eq!(player_id, FootballId::new(278));
        }
        other => panic!("Expected Import, got {:?}", other),
    }

    assert!(RosterCli::try_parse_from(["roster-dash", "player", "abc"]).is_err());
}

#[test]
fn test_config_subcommands() {
    let cli = RosterCli::try_parse_from(["roster-dash", "config", "init", "--force"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Config {
            cmd: ConfigCmd::Init { force: true }
        }
    ));

    let cli = RosterCli::try_parse_from(["roster-dash", "config", "show", "--verbose"]).unwrap();
    assert!(cli.verbose);
}

#[test]
fn test_search_teams_country() {
    let cli = RosterCli::try_parse_from([
        "roster-dash",
        "search-teams",
        "Paris",
        "--country",
        "France",
    ])
    .unwrap();
    match cli.command {
        Commands::SearchTeams { query, country } => {
            assert_eq!(query, "Paris");
            assert_eq!(country.as_deref(), Some("France"));
        }
        other => panic!("Expected SearchTeams, got {:?}", other),
    }
}

#[test]
fn test_import_player_args() {
    let cli = RosterCli::try_parse_from([
        "roster-dash",
        "import-player",
        "278",
        "--name",
        "Kylian Mbappé",
        "--position",
        "Forward",
    ])
    .unwrap();
    match cli.command {
        Commands::ImportPlayer {
            football_id,
            name,
            sorare_id,
            position,
        } => {
            assert_eq!(football_id, FootballId::new(278));
            assert_eq!(name, "Kylian Mbappé");
            assert!(sorare_id.is_none());
            assert_eq!(position.as_deref(), Some("Forward"));
        }
        other => panic!("Expected ImportPlayer, got {:?}", other),
    }

    assert!(RosterCli::try_parse_from(["roster-dash", "import-player", "278"]).is_err());
}

#[test]
fn test_upcoming_next_range() {
    let cli = RosterCli::try_parse_from(["roster-dash", "upcoming", "541"]).unwrap();
    assert!(matches!(cli.command, Commands::Upcoming { next: 5, .. }));

    let cli = RosterCli::try_parse_from(["roster-dash", "upcoming", "541", "--next", "50"]).unwrap();
    assert!(matches!(cli.command, Commands::Upcoming { next: 50, .. }));

    assert!(RosterCli::try_parse_from(["roster-dash", "upcoming", "541", "--next", "0"]).is_err());
    assert!(RosterCli::try_parse_from(["roster-dash", "upcoming", "541", "--next", "51"]).is_err());
}
