use serde::Serialize;

use crate::event::{EndPoint, Event, Point};

/// Uniform per-event view. Every coordinate and the outcome are `None` when
/// the event type does not define them, so downstream code never needs to
/// know which fields belong to which type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedEvent {
    pub index: u32,
    pub match_id: Option<u64>,
    pub player_name: Option<String>,
    pub type_name: String,
    pub x_start: Option<f64>,
    pub y_start: Option<f64>,
    pub x_end: Option<f64>,
    pub y_end: Option<f64>,
    pub z_end: Option<f64>,
    pub dx: Option<f64>,
    pub dy: Option<f64>,
    pub outcome: Option<String>,
}

impl NormalizedEvent {
    pub fn start(&self) -> Option<Point> {
        Some(Point::new(self.x_start?, self.y_start?))
    }

    pub fn displacement(&self) -> Option<Displacement> {
        Some(Displacement {
            dx: self.dx?,
            dy: self.dy?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

pub fn extract_location(event: &Event) -> Option<Point> {
    event.location
}

pub fn extract_end_location(event: &Event) -> Option<EndPoint> {
    event.kind.end_location()
}

pub fn extract_outcome(event: &Event) -> Option<&str> {
    event.kind.outcome()
}

/// `end - start`, or `None` when either side is unknown.
pub fn displacement(start: Option<Point>, end: Option<Point>) -> Option<Displacement> {
    let (start, end) = (start?, end?);
    Some(Displacement {
        dx: end.x - start.x,
        dy: end.y - start.y,
    })
}

pub fn normalize_event(event: &Event) -> NormalizedEvent {
    let start = extract_location(event);
    let end = extract_end_location(event);
    let delta = displacement(start, end.map(|e| e.planar()));

    NormalizedEvent {
        index: event.index,
        match_id: event.match_id,
        player_name: event.player_name.clone(),
        type_name: event.type_name().to_string(),
        x_start: start.map(|p| p.x),
        y_start: start.map(|p| p.y),
        x_end: end.map(|e| e.x),
        y_end: end.map(|e| e.y),
        z_end: end.and_then(|e| e.z),
        dx: delta.map(|d| d.dx),
        dy: delta.map(|d| d.dy),
        outcome: extract_outcome(event).map(str::to_string),
    }
}

pub fn normalize_events(events: &[Event]) -> Vec<NormalizedEvent> {
    events.iter().map(normalize_event).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    fn pass(end: Option<Point>, outcome: Option<&str>) -> Event {
        Event::new(
            1,
            EventKind::Pass {
                end_location: end,
                outcome: outcome.map(str::to_string),
            },
        )
    }

    #[test]
    fn missing_location_is_none() {
        let event = pass(Some(Point::new(10.0, 10.0)), None);
        assert_eq!(extract_location(&event), None);

        let norm = normalize_event(&event);
        assert_eq!(norm.x_start, None);
        assert_eq!(norm.y_start, None);
        assert_eq!(norm.x_end, Some(10.0));
        assert_eq!(norm.dx, None);
        assert_eq!(norm.dy, None);
    }

    #[test]
    fn two_component_end_has_no_height() {
        let event = pass(Some(Point::new(30.0, 40.0)), None).at(20.0, 35.0);
        let end = extract_end_location(&event).unwrap();
        assert_eq!((end.x, end.y, end.z), (30.0, 40.0, None));

        let norm = normalize_event(&event);
        assert_eq!(norm.z_end, None);
        assert_eq!(norm.dx, Some(10.0));
        assert_eq!(norm.dy, Some(5.0));
    }

    #[test]
    fn shot_end_keeps_height() {
        let event = Event::new(
            4,
            EventKind::Shot {
                end_location: EndPoint::from_slice(&[120.0, 38.0, 1.5]),
                outcome: Some("Goal".to_string()),
            },
        )
        .at(100.0, 40.0);
        let norm = normalize_event(&event);
        assert_eq!(norm.z_end, Some(1.5));
        assert_eq!(norm.dx, Some(20.0));
        assert_eq!(norm.dy, Some(-2.0));
        assert_eq!(norm.outcome.as_deref(), Some("Goal"));
    }

    #[test]
    fn displacement_needs_both_ends() {
        assert_eq!(displacement(None, Some(Point::new(1.0, 2.0))), None);
        assert_eq!(displacement(Some(Point::new(1.0, 2.0)), None), None);
        assert_eq!(
            displacement(Some(Point::new(1.0, 2.0)), Some(Point::new(4.0, 0.0))),
            Some(Displacement { dx: 3.0, dy: -2.0 })
        );
    }

    #[test]
    fn types_without_payload_have_no_end_or_outcome() {
        let event = Event::new(
            2,
            EventKind::Other {
                name: "Pressure".to_string(),
            },
        )
        .at(50.0, 20.0);
        let norm = normalize_event(&event);
        assert_eq!(norm.type_name, "Pressure");
        assert_eq!(norm.x_start, Some(50.0));
        assert_eq!(norm.x_end, None);
        assert_eq!(norm.y_end, None);
        assert_eq!(norm.z_end, None);
        assert_eq!(norm.outcome, None);
    }

    #[test]
    fn dribble_outcome_is_extracted() {
        let event = Event::new(
            3,
            EventKind::Dribble {
                outcome: Some("Incomplete".to_string()),
            },
        );
        assert_eq!(extract_outcome(&event), Some("Incomplete"));
        assert_eq!(extract_end_location(&event), None);
    }
}
