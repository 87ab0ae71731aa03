use rand::Rng;

use crate::dribble::{COMPLETE, INCOMPLETE};
use crate::event::{EndPoint, Event, EventKind, Point};

pub const PITCH_LENGTH: f64 = 120.0;
pub const PITCH_WIDTH: f64 = 80.0;

pub const DEMO_PLAYERS: [&str; 4] = [
    "Ruud Gullit",
    "Marco van Basten",
    "Frank Rijkaard",
    "Ronald Koeman",
];

/// A plausible-looking event stream for one match: strictly increasing
/// `index`, occasional index gaps, coordinates inside a 120x80 pitch.
pub fn synthetic_match<R: Rng>(
    rng: &mut R,
    match_id: u64,
    players: &[&str],
    len: usize,
) -> Vec<Event> {
    let mut out = Vec::with_capacity(len);
    let mut index = 1u32;
    let mut second = 0u32;

    for _ in 0..len {
        let player = if players.is_empty() {
            None
        } else {
            Some(players[rng.gen_range(0..players.len())].to_string())
        };
        let start = random_point(rng);
        let kind = random_kind(rng, start);

        out.push(Event {
            index,
            match_id: Some(match_id),
            period: Some(if second < 45 * 60 { 1 } else { 2 }),
            minute: Some((second / 60) as u16),
            second: Some((second % 60) as u16),
            player_name: player,
            team_name: None,
            location: Some(start),
            kind,
        });

        // Sub-events (ball receipts, pressures) often land between two rows.
        index += if rng.gen_bool(0.15) { rng.gen_range(2..=6) } else { 1 };
        second += rng.gen_range(1..=8);
    }
    out
}

fn random_kind<R: Rng>(rng: &mut R, start: Point) -> EventKind {
    match rng.gen_range(0..10) {
        0..=3 => EventKind::Pass {
            end_location: Some(nudge(rng, start, 35.0)),
            outcome: rng.gen_bool(0.2).then(|| INCOMPLETE.to_string()),
        },
        4..=5 => EventKind::Carry {
            end_location: Some(nudge(rng, start, 12.0)),
        },
        6 => EventKind::Dribble {
            outcome: Some(if rng.gen_bool(0.6) { COMPLETE } else { INCOMPLETE }.to_string()),
        },
        7 => EventKind::BallReceipt { outcome: None },
        8 if rng.gen_bool(0.3) => EventKind::Shot {
            end_location: Some(EndPoint {
                x: PITCH_LENGTH,
                y: rng.gen_range(30.0..50.0),
                z: Some(rng.gen_range(0.0..3.0)),
            }),
            outcome: Some(if rng.gen_bool(0.1) { "Goal" } else { "Off T" }.to_string()),
        },
        _ => EventKind::Other {
            name: "Pressure".to_string(),
        },
    }
}

fn random_point<R: Rng>(rng: &mut R) -> Point {
    Point::new(rng.gen_range(0.0..PITCH_LENGTH), rng.gen_range(0.0..PITCH_WIDTH))
}

fn nudge<R: Rng>(rng: &mut R, from: Point, reach: f64) -> Point {
    Point::new(
        (from.x + rng.gen_range(-reach..reach)).clamp(0.0, PITCH_LENGTH),
        (from.y + rng.gen_range(-reach..reach)).clamp(0.0, PITCH_WIDTH),
    )
}
