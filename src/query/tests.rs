//! Unit tests for the roster query engine

use super::*;
use crate::api::types::{InjuryRecord, PlayerRecord, Severity, SquadPlayer};
use crate::cli::types::{
    CategoryFilter, FootballId, InjuryId, InjurySort, PlayerId, PlayerSort, SquadSort,
};
use chrono::{TimeZone, Utc};

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn player(id: u64, name: &str, position: &str, injured: bool) -> PlayerRecord {
    let mut p = PlayerRecord::new(PlayerId::new(id), name);
    p.position = Some(position.to_string());
    p.is_injured = injured;
    p
}

fn trio() -> Vec<PlayerRecord> {
    vec![
        player(1, "Mbappe", "Forward", true),
        player(2, "Messi", "Forward", false),
        player(3, "Ramos", "Defender", false),
    ]
}

fn names<'a>(records: &[&'a PlayerRecord]) -> Vec<&'a str> {
    records
        .iter()
        .map(|p| p.display_name.as_deref().unwrap_or("?"))
        .collect()
}

fn forward() -> CategoryFilter {
    CategoryFilter::Only("Forward".to_string())
}

fn injury(id: u64, player_id: u64, severity: Option<Severity>, active: bool) -> InjuryRecord {
    let mut i = InjuryRecord::new(InjuryId::new(id), PlayerId::new(player_id));
    i.severity = severity;
    i.is_active = active;
    i
}

#[cfg(test)]
mod filter_tests {
    use super::*;

    #[test]
    fn test_category_forward() {
        let players = trio();
        let filters = FilterState::new().with_category(forward());
        assert_eq!(names(&filter_records(&players, &filters)), vec!["Mbappe", "Messi"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let players = trio();
        for term in ["mes", "MES", "Mes"] {
            let filters: FilterState<PlayerSort> = FilterState::new().with_search(term);
            assert_eq!(names(&filter_records(&players, &filters)), vec!["Messi"]);
        }
    }

    #[test]
    fn test_search_covers_club_name() {
        let mut players = trio();
        players[2].club_name = Some("Sevilla FC".to_string());
        let filters: FilterState<PlayerSort> = FilterState::new().with_search("sevilla");
        assert_eq!(names(&filter_records(&players, &filters)), vec!["Ramos"]);
    }

    #[test]
    fn test_search_skips_missing_fields() {
        let mut players = trio();
        players[0].display_name = None;
        let filters: FilterState<PlayerSort> = FilterState::new().with_search("mbappe");
        assert!(filter_records(&players, &filters).is_empty());
    }

    #[test]
    fn test_status_filter() {
        let players = trio();
        let injured: FilterState<PlayerSort> = FilterState::new().with_status(Some(true));
        let healthy: FilterState<PlayerSort> = FilterState::new().with_status(Some(false));
        assert_eq!(names(&filter_records(&players, &injured)), vec!["Mbappe"]);
        assert_eq!(names(&filter_records(&players, &healthy)), vec!["Messi", "Ramos"]);
    }

    #[test]
    fn test_category_is_exact_and_case_sensitive() {
        let players = trio();
        let lower = FilterState::new().with_category(CategoryFilter::Only("forward".into()));
        let partial = FilterState::new().with_category(CategoryFilter::Only("Forw".into()));
        assert!(filter_records(&players, &lower).is_empty());
        assert!(filter_records(&players, &partial).is_empty());
    }

    #[test]
    fn test_missing_category_matches_only_all() {
        let mut players = trio();
        players[1].position = None;
        let all: FilterState<PlayerSort> = FilterState::new();
        assert_eq!(filter_records(&players, &all).len(), 3);
        assert_eq!(
            names(&filter_records(&players, &FilterState::new().with_category(forward()))),
            vec!["Mbappe"]
        );
    }

    #[test]
    fn test_identity_filter_preserves_order() {
        let players = trio();
        let filters: FilterState<PlayerSort> = FilterState::new();
        assert!(filters.is_identity());
        let out = filter_records(&players, &filters);
        assert_eq!(out.len(), players.len());
        for (a, b) in out.iter().zip(players.iter()) {
            assert_eq!(*a, b);
        }
    }

    #[test]
    fn test_idempotence() {
        let players = trio();
        let filters = FilterState::new()
            .with_search("m")
            .with_category(forward())
            .with_status(Some(false));
        let once: Vec<PlayerRecord> = filter_records(&players, &filters)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<PlayerRecord> = filter_records(&once, &filters)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_monotonic_in_search() {
        let players = trio();
        let base = FilterState::new().with_category(forward());
        let narrowed = base.clone().with_search("mb");
        assert!(filter_records(&players, &narrowed).len() <= filter_records(&players, &base).len());
    }

    #[test]
    fn test_search_matches_whitespace_literally() {
        let players = vec![
            player(1, "Lionel Messi", "Forward", false),
            player(2, "Mbappe", "Forward", true),
        ];

        let trailing: FilterState<PlayerSort> = FilterState::new().with_search("Messi ");
        assert!(filter_records(&players, &trailing).is_empty());

        let space: FilterState<PlayerSort> = FilterState::new().with_search(" ");
        assert!(!space.is_identity());
        assert_eq!(names(&filter_records(&players, &space)), vec!["Lionel Messi"]);

        let empty: FilterState<PlayerSort> = FilterState::new().with_search("");
        assert!(empty.is_identity());
        assert_eq!(filter_records(&players, &empty).len(), 2);
    }

    #[test]
    fn test_injury_search_fields() {
        let mut a = injury(1, 1, Some(Severity::Minor), true);
        a.injury_type = Some("Hamstring".to_string());
        let mut b = injury(2, 2, None, true);
        b.injury_description = Some("Ankle sprain in training".to_string());
        let rows = join_injuries(vec![a, b], &trio());

        let by_type: FilterState<InjurySort> = FilterState::new().with_search("hamstring");
        let by_description: FilterState<InjurySort> = FilterState::new().with_search("ANKLE");
        let by_player: FilterState<InjurySort> = FilterState::new().with_search("messi");

        assert_eq!(filter_records(&rows, &by_type)[0].injury.id, InjuryId::new(1));
        assert_eq!(filter_records(&rows, &by_description)[0].injury.id, InjuryId::new(2));
        assert_eq!(filter_records(&rows, &by_player)[0].injury.id, InjuryId::new(2));
    }

    #[test]
    fn test_squad_ignores_status() {
        let squad = vec![
            SquadPlayer::new(FootballId::new(1), "G. Donnarumma"),
            SquadPlayer::new(FootballId::new(2), "Marquinhos"),
        ];
        let filters: FilterState<SquadSort> = FilterState::new().with_status(Some(true));
        assert_eq!(filter_records(&squad, &filters).len(), 2);
    }
}

#[cfg(test)]
mod filter_state_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let filters: FilterState<PlayerSort> = FilterState::default();
        assert_eq!(filters.page(), 1);
        assert_eq!(filters.search(), "");
        assert!(filters.category().is_all());
        assert_eq!(filters.status(), None);
        assert_eq!(filters.sort(), None);
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut filters: FilterState<PlayerSort> = FilterState::new().with_page(4);
        filters.set_category(forward());
        assert_eq!(filters.page(), 1);

        filters.set_page(3);
        filters.set_status(Some(true));
        assert_eq!(filters.page(), 1);

        filters.set_page(2);
        filters.set_sort(Some(PlayerSort::Score));
        assert_eq!(filters.page(), 1);

        filters.set_page(5);
        filters.set_search("ram");
        assert_eq!(filters.page(), 1);
    }

    #[test]
    fn test_unchanged_value_keeps_page() {
        let mut filters: FilterState<PlayerSort> = FilterState::new().with_search("ram").with_page(2);
        filters.set_search("ram");
        assert_eq!(filters.page(), 2);
    }
}

#[cfg(test)]
mod sort_tests {
    use super::*;

    fn scored() -> Vec<PlayerRecord> {
        let mut players = trio();
        players[0].average_score = 60.0;
        players[1].average_score = 75.5;
        players[2].average_score = 60.0;
        players[0].age = Some(25);
        players[2].age = Some(38);
        players[0].total_games = 10;
        players[1].total_games = 30;
        players[2].total_games = 20;
        players
    }

    #[test]
    fn test_score_descending_is_stable() {
        let players = scored();
        let mut refs: Vec<&PlayerRecord> = players.iter().collect();
        sort_records(&mut refs, PlayerSort::Score);
        assert_eq!(names(&refs), vec!["Messi", "Mbappe", "Ramos"]);
    }

    #[test]
    fn test_age_ascending_missing_last() {
        let players = scored();
        let mut refs: Vec<&PlayerRecord> = players.iter().collect();
        sort_records(&mut refs, PlayerSort::Age);
        assert_eq!(names(&refs), vec!["Mbappe", "Ramos", "Messi"]);
    }

    #[test]
    fn test_games_descending() {
        let players = scored();
        let mut refs: Vec<&PlayerRecord> = players.iter().collect();
        sort_records(&mut refs, PlayerSort::Games);
        assert_eq!(names(&refs), vec!["Messi", "Ramos", "Mbappe"]);
    }

    #[test]
    fn test_sort_does_not_touch_input() {
        let players = scored();
        let filters = FilterState::new().with_sort(Some(PlayerSort::Name));
        let result = run_query(&players, &filters, size(12));
        assert_eq!(names(&result.page.items), vec!["Mbappe", "Messi", "Ramos"]);
        assert_eq!(players[0].display_name.as_deref(), Some("Mbappe"));
        assert_eq!(players[2].display_name.as_deref(), Some("Ramos"));
    }

    #[test]
    fn test_injury_severity_then_date() {
        let rows = join_injuries(
            vec![
                injury(1, 1, Some(Severity::Minor), true),
                injury(2, 2, None, true),
                injury(3, 3, Some(Severity::Severe), true),
                injury(4, 1, Some(Severity::Moderate), true),
            ],
            &trio(),
        );
        let mut refs: Vec<&InjuryRow> = rows.iter().collect();
        sort_records(&mut refs, InjurySort::Severity);
        let ids: Vec<u64> = refs.iter().map(|r| r.injury.id.as_u64()).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }

    #[test]
    fn test_injury_date_newest_first() {
        let mut a = injury(1, 1, None, true);
        a.injury_date = Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());
        let mut b = injury(2, 1, None, true);
        b.injury_date = Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        let c = injury(3, 1, None, true);

        let rows = join_injuries(vec![a, c, b], &trio());
        let mut refs: Vec<&InjuryRow> = rows.iter().collect();
        sort_records(&mut refs, InjurySort::Date);
        let ids: Vec<u64> = refs.iter().map(|r| r.injury.id.as_u64()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_squad_number() {
        let mut a = SquadPlayer::new(FootballId::new(1), "Hakimi");
        a.number = Some(2);
        let mut b = SquadPlayer::new(FootballId::new(2), "Donnarumma");
        b.number = Some(99);
        let c = SquadPlayer::new(FootballId::new(3), "Trialist");
        let squad = vec![b, c, a];

        let mut refs: Vec<&SquadPlayer> = squad.iter().collect();
        sort_records(&mut refs, SquadSort::Number);
        let ids: Vec<u64> = refs.iter().map(|p| p.id.as_u64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}

#[cfg(test)]
mod pagination_tests {
    use super::*;

    #[test]
    fn test_pages_cover_filtered_exactly() {
        let players: Vec<PlayerRecord> = (1..=11)
            .map(|i| player(i, &format!("Player {}", i), "Midfielder", i % 2 == 0))
            .collect();
        let filters: FilterState<PlayerSort> = FilterState::new().with_status(Some(false));
        let filtered = filter_records(&players, &filters);

        let first = paginate(&filtered, 1, size(4));
        let mut collected = Vec::new();
        for page in 1..=first.total_pages {
            collected.extend(paginate(&filtered, page, size(4)).items);
        }
        assert_eq!(collected, filtered);
        assert_eq!(first.total_pages, 2);
    }

    #[test]
    fn test_run_query_beyond_range() {
        let players = trio();
        let filters: FilterState<PlayerSort> = FilterState::new().with_page(10);
        let result = run_query(&players, &filters, size(2));
        assert!(result.page.items.is_empty());
        assert_eq!(result.page.total_count, 3);
        assert_eq!(result.page.total_pages, 2);
    }
}

#[cfg(test)]
mod aggregate_tests {
    use super::*;

    #[test]
    fn test_player_buckets() {
        let mut players = trio();
        players[2].is_active = false;
        let counts = aggregate_counts(&players);
        assert_eq!(counts["total"], 3);
        assert_eq!(counts["Forward"], 2);
        assert_eq!(counts["Defender"], 1);
        assert_eq!(counts["Goalkeeper"], 0);
        assert_eq!(counts["injured"], 1);
        assert_eq!(counts["healthy"], 2);
        assert_eq!(counts["active"], 2);
    }

    #[test]
    fn test_unknown_bucket() {
        let mut players = trio();
        players[0].position = None;
        let counts = aggregate_counts(&players);
        assert_eq!(counts["unknown"], 1);
        assert_eq!(counts["Forward"], 1);
    }

    #[test]
    fn test_empty_input_has_zeroes() {
        let counts = aggregate_counts::<InjuryRow>(&[]);
        assert_eq!(counts["total"], 0);
        assert_eq!(counts["Severe"], 0);
        assert_eq!(counts["active"], 0);
        assert_eq!(counts["past"], 0);
        assert_eq!(counts["severe_active"], 0);
        assert!(!counts.contains_key("unknown"));
    }

    #[test]
    fn test_severe_active_needs_both() {
        let rows = join_injuries(
            vec![
                injury(1, 1, Some(Severity::Severe), true),
                injury(2, 2, Some(Severity::Severe), false),
                injury(3, 3, Some(Severity::Minor), true),
            ],
            &trio(),
        );
        let counts = aggregate_counts(&rows);
        assert_eq!(counts["Severe"], 2);
        assert_eq!(counts["severe_active"], 1);
        assert_eq!(counts["active"], 2);
        assert_eq!(counts["past"], 1);
    }

    #[test]
    fn test_aggregates_ignore_filters() {
        let players = trio();
        let plain: FilterState<PlayerSort> = FilterState::new();
        let narrowed = FilterState::new()
            .with_search("ramos")
            .with_category(CategoryFilter::Only("Defender".into()))
            .with_page(3);
        assert_eq!(
            run_query(&players, &plain, size(12)).aggregates,
            run_query(&players, &narrowed, size(12)).aggregates
        );
    }

    #[test]
    fn test_squad_imported_bucket() {
        let mut a = SquadPlayer::new(FootballId::new(1), "Hakimi");
        a.is_imported = true;
        a.position = Some("Defender".into());
        let squad = vec![a, SquadPlayer::new(FootballId::new(2), "Vitinha")];
        let counts = aggregate_counts(&squad);
        assert_eq!(counts["imported"], 1);
        assert_eq!(counts["Defender"], 1);
        assert_eq!(counts["unknown"], 1);
        assert!(!counts.contains_key("injured"));
    }

    #[test]
    fn test_percent_and_shares() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(3, 0), 0.0);

        let mut distribution = std::collections::BTreeMap::new();
        distribution.insert("Forward".to_string(), 3);
        distribution.insert("Defender".to_string(), 1);
        let shares = shares(&distribution);
        assert_eq!(shares["Forward"], 75.0);
        assert_eq!(shares["Defender"], 25.0);
    }
}

#[cfg(test)]
mod join_tests {
    use super::*;

    #[test]
    fn test_join_uses_player_name() {
        let rows = join_injuries(
            vec![injury(1, 2, None, true), injury(2, 42, None, true)],
            &trio(),
        );
        assert_eq!(rows[0].player_name.as_deref(), Some("Messi"));
        assert_eq!(rows[1].player_name, None);
    }

    #[test]
    fn test_join_and_player_search_agree() {
        let mut players = trio();
        players[2].display_name = None;
        players[2].first_name = Some("Sergio".to_string());
        players[2].last_name = Some("Ramos".to_string());
        let rows = join_injuries(vec![injury(1, 3, Some(Severity::Severe), true)], &players);
        assert_eq!(rows[0].player_name, None);

        let by_player: FilterState<PlayerSort> = FilterState::new().with_search("ramos");
        let by_injury: FilterState<InjurySort> = FilterState::new().with_search("ramos");
        assert!(filter_records(&players, &by_player).is_empty());
        assert!(filter_records(&rows, &by_injury).is_empty());
    }

    #[test]
    fn test_row_serializes_flat() {
        let rows = join_injuries(vec![injury(7, 1, Some(Severity::Severe), true)], &trio());
        let value = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["player_name"], "Mbappe");
        assert_eq!(value["severity"], "Severe");
    }
}
