use serde::{Deserialize, Serialize};

pub const PASS: &str = "Pass";
pub const CARRY: &str = "Carry";
pub const DRIBBLE: &str = "Dribble";
pub const SHOT: &str = "Shot";
pub const BALL_RECEIPT: &str = "Ball Receipt*";
pub const DUEL: &str = "Duel";
pub const INTERCEPTION: &str = "Interception";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Accepts exactly two components.
    pub fn from_slice(raw: &[f64]) -> Option<Self> {
        match raw {
            [x, y] => Some(Self::new(*x, *y)),
            _ => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// End coordinate of an event. Only shots carry a height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndPoint {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl EndPoint {
    /// Accepts two or three components.
    pub fn from_slice(raw: &[f64]) -> Option<Self> {
        match raw {
            [x, y] => Some(Self { x: *x, y: *y, z: None }),
            [x, y, z] => Some(Self { x: *x, y: *y, z: Some(*z) }),
            _ => None,
        }
    }

    pub fn planar(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Point> for EndPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y, z: None }
    }
}

/// Event type with the attributes that only exist for that type.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Pass {
        end_location: Option<Point>,
        outcome: Option<String>,
    },
    Carry {
        end_location: Option<Point>,
    },
    Shot {
        end_location: Option<EndPoint>,
        outcome: Option<String>,
    },
    Dribble {
        outcome: Option<String>,
    },
    Duel {
        outcome: Option<String>,
    },
    Interception {
        outcome: Option<String>,
    },
    BallReceipt {
        outcome: Option<String>,
    },
    Other {
        name: String,
    },
}

impl EventKind {
    pub fn type_name(&self) -> &str {
        match self {
            EventKind::Pass { .. } => PASS,
            EventKind::Carry { .. } => CARRY,
            EventKind::Shot { .. } => SHOT,
            EventKind::Dribble { .. } => DRIBBLE,
            EventKind::Duel { .. } => DUEL,
            EventKind::Interception { .. } => INTERCEPTION,
            EventKind::BallReceipt { .. } => BALL_RECEIPT,
            EventKind::Other { name } => name,
        }
    }

    pub fn end_location(&self) -> Option<EndPoint> {
        match self {
            EventKind::Pass { end_location, .. } | EventKind::Carry { end_location } => {
                end_location.map(EndPoint::from)
            }
            EventKind::Shot { end_location, .. } => *end_location,
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&str> {
        match self {
            EventKind::Pass { outcome, .. }
            | EventKind::Shot { outcome, .. }
            | EventKind::Dribble { outcome }
            | EventKind::Duel { outcome }
            | EventKind::Interception { outcome }
            | EventKind::BallReceipt { outcome } => outcome.as_deref(),
            EventKind::Carry { .. } | EventKind::Other { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub index: u32,
    pub match_id: Option<u64>,
    pub period: Option<u8>,
    pub minute: Option<u16>,
    pub second: Option<u16>,
    pub player_name: Option<String>,
    pub team_name: Option<String>,
    pub location: Option<Point>,
    pub kind: EventKind,
}

impl Event {
    pub fn new(index: u32, kind: EventKind) -> Self {
        Self {
            index,
            match_id: None,
            period: None,
            minute: None,
            second: None,
            player_name: None,
            team_name: None,
            location: None,
            kind,
        }
    }

    pub fn with_match(mut self, match_id: u64) -> Self {
        self.match_id = Some(match_id);
        self
    }

    pub fn with_player(mut self, player: &str) -> Self {
        self.player_name = Some(player.to_string());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.location = Some(Point::new(x, y));
        self
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    /// `event_type` may use any alias accepted by [`kind_from_parts`].
    pub fn is(&self, event_type: &str, player: &str) -> bool {
        self.type_name() == canonical_type_name(event_type)
            && self.player_name.as_deref() == Some(player)
    }
}

/// The name [`EventKind::type_name`] reports for a source type label.
pub fn canonical_type_name(name: &str) -> &str {
    match name {
        "Ball Receipt" => BALL_RECEIPT,
        other => other,
    }
}

/// Maps a source type label plus its optional payload onto [`EventKind`].
pub fn kind_from_parts(
    type_name: &str,
    end_location: Option<&[f64]>,
    outcome: Option<String>,
) -> EventKind {
    match canonical_type_name(type_name) {
        PASS => EventKind::Pass {
            end_location: end_location.and_then(Point::from_slice),
            outcome,
        },
        CARRY => EventKind::Carry {
            end_location: end_location.and_then(Point::from_slice),
        },
        SHOT => EventKind::Shot {
            end_location: end_location.and_then(EndPoint::from_slice),
            outcome,
        },
        DRIBBLE => EventKind::Dribble { outcome },
        DUEL => EventKind::Duel { outcome },
        INTERCEPTION => EventKind::Interception { outcome },
        BALL_RECEIPT => EventKind::BallReceipt { outcome },
        other => EventKind::Other {
            name: other.to_string(),
        },
    }
}
