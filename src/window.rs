use crate::event::Event;

/// Neighbourhood around matching events: up to `reach` rows either side,
/// as long as the `index` gap stays below `max_index_gap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyWindow {
    pub reach: usize,
    pub max_index_gap: u32,
}

impl Default for AdjacencyWindow {
    fn default() -> Self {
        Self {
            reach: 2,
            max_index_gap: 5,
        }
    }
}

impl AdjacencyWindow {
    pub fn mask(&self, events: &[Event], player: &str, event_type: &str) -> Vec<bool> {
        let hits: Vec<bool> = events.iter().map(|e| e.is(event_type, player)).collect();

        (0..events.len())
            .map(|row| {
                if hits[row] {
                    return true;
                }
                let lo = row.saturating_sub(self.reach);
                let hi = (row + self.reach).min(events.len().saturating_sub(1));
                (lo..=hi).any(|other| {
                    other != row
                        && hits[other]
                        && events[row].index.abs_diff(events[other].index) < self.max_index_gap
                })
            })
            .collect()
    }
}

/// Flags rows that are the target `(player, event_type)` event, or sit at
/// most two rows from one with an index gap under 5.
pub fn adjacency_mask(events: &[Event], player: &str, event_type: &str) -> Vec<bool> {
    AdjacencyWindow::default().mask(events, player, event_type)
}

pub fn adjacent_events<'a>(events: &'a [Event], player: &str, event_type: &str) -> Vec<&'a Event> {
    adjacency_mask(events, player, event_type)
        .into_iter()
        .zip(events)
        .filter_map(|(keep, event)| keep.then_some(event))
        .collect()
}
