use pitch_events::carry::{carry_distance, summarize_carries};
use pitch_events::event::{Event, EventKind, Point};

fn carry(index: u32, player: &str, match_id: u64, from: (f64, f64), to: (f64, f64)) -> Event {
    Event::new(
        index,
        EventKind::Carry {
            end_location: Some(Point::new(to.0, to.1)),
        },
    )
    .with_player(player)
    .with_match(match_id)
    .at(from.0, from.1)
}

fn pass(index: u32, player: &str, match_id: u64) -> Event {
    Event::new(
        index,
        EventKind::Pass {
            end_location: Some(Point::new(90.0, 10.0)),
            outcome: None,
        },
    )
    .with_player(player)
    .with_match(match_id)
    .at(10.0, 10.0)
}

#[test]
fn two_carries_in_one_match() {
    let events = vec![
        carry(1, "A", 1, (0.0, 0.0), (3.0, 4.0)),
        carry(2, "A", 1, (0.0, 0.0), (0.0, 0.0)),
    ];
    assert_eq!(carry_distance(&events[0]), 5);
    assert_eq!(carry_distance(&events[1]), 0);

    let rows = summarize_carries(&events).unwrap();
    assert_eq!(rows.len(), 1);
    let a = &rows[0];
    assert_eq!(a.player_name, "A");
    assert_eq!(a.carry_count, 2);
    assert_eq!(a.matches_played, 1);
    assert_eq!(a.total_distance, 5);
    assert_eq!(a.max_distance_single_match, 5);
    assert_eq!(a.avg_distance_per_match, 5.0);
}

#[test]
fn per_match_max_and_average() {
    let events = vec![
        carry(1, "A", 1, (0.0, 0.0), (3.0, 4.0)),
        carry(2, "A", 1, (10.0, 10.0), (16.0, 18.0)),
        carry(1, "A", 2, (0.0, 0.0), (0.0, 12.0)),
        pass(2, "A", 3),
    ];
    let rows = summarize_carries(&events).unwrap();
    let a = &rows[0];
    assert_eq!(a.carry_count, 3);
    assert_eq!(a.matches_played, 3);
    assert_eq!(a.total_distance, 27);
    assert_eq!(a.max_distance_single_match, 15);
    assert_eq!(a.avg_distance_per_match, 9.0);
}

#[test]
fn players_without_carries_get_zero_rows_sorted_by_name() {
    let events = vec![
        pass(1, "Zed", 1),
        carry(2, "Abe", 1, (0.0, 0.0), (6.0, 8.0)),
        pass(3, "Abe", 2),
    ];
    let rows = summarize_carries(&events).unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.player_name.as_str()).collect();
    assert_eq!(names, vec!["Abe", "Zed"]);

    assert_eq!(rows[0].total_distance, 10);
    assert_eq!(rows[0].avg_distance_per_match, 5.0);
    assert_eq!(rows[1].carry_count, 0);
    assert_eq!(rows[1].total_distance, 0);
    assert_eq!(rows[1].max_distance_single_match, 0);
    assert_eq!(rows[1].avg_distance_per_match, 0.0);
}

#[test]
fn average_rounds_to_one_decimal() {
    let events = vec![
        carry(1, "A", 1, (0.0, 0.0), (0.0, 7.0)),
        pass(1, "A", 2),
        pass(1, "A", 3),
    ];
    let rows = summarize_carries(&events).unwrap();
    assert_eq!(rows[0].avg_distance_per_match, 2.3);
}

#[test]
fn carry_without_end_counts_but_adds_no_distance() {
    let events = vec![
        Event::new(1, EventKind::Carry { end_location: None })
            .with_player("A")
            .with_match(1)
            .at(0.0, 0.0),
    ];
    let rows = summarize_carries(&events).unwrap();
    assert_eq!(rows[0].carry_count, 1);
    assert_eq!(rows[0].total_distance, 0);
}

#[test]
fn summary_is_repeatable() {
    let events = vec![
        carry(1, "A", 1, (0.0, 0.0), (3.0, 4.0)),
        carry(2, "B", 2, (5.0, 5.0), (5.0, 25.0)),
        pass(3, "A", 2),
    ];
    let first = summarize_carries(&events).unwrap();
    let second = summarize_carries(&events).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_match_id_fails_fast() {
    let mut events = vec![carry(1, "A", 1, (0.0, 0.0), (3.0, 4.0))];
    events.push(Event::new(2, EventKind::Dribble { outcome: None }).with_player("A"));
    let err = summarize_carries(&events).unwrap_err();
    assert!(err.to_string().contains("match_id"));
}

#[test]
fn off_pitch_distances_saturate() {
    let events = vec![
        carry(1, "A", 1, (0.0, 0.0), (1e10, 0.0)),
        carry(2, "A", 1, (0.0, 0.0), (1e10, 0.0)),
    ];
    assert_eq!(carry_distance(&events[0]), u32::MAX);
    let rows = summarize_carries(&events).unwrap();
    assert_eq!(rows[0].total_distance, u32::MAX);
    assert_eq!(rows[0].max_distance_single_match, u32::MAX);
}
