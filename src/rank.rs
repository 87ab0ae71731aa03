use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankOrder {
    /// Rank 1 goes to the largest value.
    #[default]
    Descending,
    Ascending,
}

/// Averaged tie ranking, 1-based. Tied values share the mean of the positions
/// they span (two values tied for first both get 1.5). `None` inputs get no
/// rank and do not take up a position.
pub fn average_ranks(values: &[Option<f64>], order: RankOrder) -> Vec<Option<f64>> {
    let mut ranked: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(idx, v)| v.filter(|v| !v.is_nan()).map(|v| (idx, v)))
        .collect();

    ranked.sort_by(|a, b| {
        let ord = a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal);
        match order {
            RankOrder::Ascending => ord,
            RankOrder::Descending => ord.reverse(),
        }
    });

    let mut out = vec![None; values.len()];
    let mut start = 0usize;
    while start < ranked.len() {
        let mut end = start + 1;
        while end < ranked.len() && ranked[end].1 == ranked[start].1 {
            end += 1;
        }
        // Positions start+1 ..= end share their mean.
        let rank = (start + 1 + end) as f64 / 2.0;
        for (idx, _) in &ranked[start..end] {
            out[*idx] = Some(rank);
        }
        start = end;
    }
    out
}

/// Rounds half to even at `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}
