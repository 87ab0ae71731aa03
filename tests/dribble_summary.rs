use pitch_events::dribble::{DribbleColumn, DribbleOptions, summarize_dribbles};
use pitch_events::event::{Event, EventKind};
use pitch_events::rank::RankOrder;

fn dribble(index: u32, player: &str, match_id: u64, outcome: &str) -> Event {
    Event::new(
        index,
        EventKind::Dribble {
            outcome: Some(outcome.to_string()),
        },
    )
    .with_player(player)
    .with_match(match_id)
}

fn pressure(index: u32, player: &str, match_id: u64) -> Event {
    Event::new(
        index,
        EventKind::Other {
            name: "Pressure".to_string(),
        },
    )
    .with_player(player)
    .with_match(match_id)
}

fn b_and_c() -> Vec<Event> {
    vec![
        dribble(1, "B", 1, "Complete"),
        dribble(2, "B", 1, "Complete"),
        dribble(1, "B", 2, "Complete"),
        dribble(2, "B", 2, "Incomplete"),
        dribble(3, "C", 1, "Complete"),
        dribble(4, "C", 1, "Incomplete"),
    ]
}

#[test]
fn single_player_rates() {
    let events: Vec<Event> = b_and_c()
        .into_iter()
        .filter(|e| e.player_name.as_deref() == Some("B"))
        .collect();
    let rows = summarize_dribbles(&events, &DribbleOptions::default()).unwrap();
    assert_eq!(rows.len(), 1);
    let b = &rows[0];
    assert_eq!((b.complete, b.incomplete, b.total), (3, 1, 4));
    assert_eq!(b.success_rate, Some(0.75));
    assert_eq!(b.matches_played, 2);
    assert_eq!(b.dribbles_per_match, 2.0);
    assert_eq!(b.success_rate_rank, None);
}

#[test]
fn second_player_enables_ranking() {
    let rows = summarize_dribbles(&b_and_c(), &DribbleOptions::default()).unwrap();
    assert_eq!(rows.len(), 2);

    let b = rows.iter().find(|r| r.player_name == "B").unwrap();
    let c = rows.iter().find(|r| r.player_name == "C").unwrap();
    assert_eq!(c.success_rate, Some(0.5));
    assert_eq!(b.success_rate_rank, Some(1.0));
    assert_eq!(c.success_rate_rank, Some(2.0));
    // Both average two dribbles per match.
    assert_eq!(b.dribbles_per_match_rank, Some(1.5));
    assert_eq!(c.dribbles_per_match_rank, Some(1.5));

    // Default sort: most completed dribbles first.
    assert_eq!(rows[0].player_name, "B");
}

#[test]
fn ascending_rank_order_flips_ranks() {
    let opts = DribbleOptions {
        rank_order: RankOrder::Ascending,
        ..Default::default()
    };
    let rows = summarize_dribbles(&b_and_c(), &opts).unwrap();
    let b = rows.iter().find(|r| r.player_name == "B").unwrap();
    assert_eq!(b.success_rate_rank, Some(2.0));
}

#[test]
fn tied_players_share_rank() {
    let mut events = b_and_c();
    events.push(dribble(5, "D", 3, "Complete"));
    events.push(dribble(6, "D", 3, "Incomplete"));
    let rows = summarize_dribbles(&events, &DribbleOptions::default()).unwrap();
    let c = rows.iter().find(|r| r.player_name == "C").unwrap();
    let d = rows.iter().find(|r| r.player_name == "D").unwrap();
    assert_eq!(c.success_rate_rank, Some(2.5));
    assert_eq!(d.success_rate_rank, Some(2.5));
}

#[test]
fn sort_by_column_and_direction() {
    let opts = DribbleOptions {
        sort_by: DribbleColumn::SuccessRate,
        ascending: true,
        ..Default::default()
    };
    let rows = summarize_dribbles(&b_and_c(), &opts).unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.player_name.as_str()).collect();
    assert_eq!(names, vec!["C", "B"]);
}

#[test]
fn matches_played_counts_every_appearance() {
    let mut events = b_and_c();
    events.push(pressure(9, "C", 2));
    events.push(pressure(9, "C", 3));
    let rows = summarize_dribbles(&events, &DribbleOptions::default()).unwrap();
    let c = rows.iter().find(|r| r.player_name == "C").unwrap();
    assert_eq!(c.matches_played, 3);
    assert_eq!(c.dribbles_per_match, 0.7);
}

#[test]
fn players_without_dribbles_are_absent() {
    let mut events = b_and_c();
    events.push(pressure(9, "E", 1));
    let rows = summarize_dribbles(&events, &DribbleOptions::default()).unwrap();
    assert!(rows.iter().all(|r| r.player_name != "E"));
}

#[test]
fn missing_match_id_fails_fast() {
    let events = vec![Event::new(
        1,
        EventKind::Dribble {
            outcome: Some("Complete".to_string()),
        },
    )
    .with_player("B")];
    let err = summarize_dribbles(&events, &DribbleOptions::default()).unwrap_err();
    assert!(err.to_string().contains("match_id"));
}

#[test]
fn no_dribbles_no_rows() {
    let events = vec![pressure(1, "B", 1)];
    assert!(summarize_dribbles(&events, &DribbleOptions::default()).unwrap().is_empty());
}
