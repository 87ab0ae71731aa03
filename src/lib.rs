pub mod carry;
pub mod config;
pub mod dribble;
pub mod event;
pub mod event_parse;
pub mod export;
pub mod fake_events;
pub mod layers;
pub mod normalize;
pub mod rank;
pub mod window;
