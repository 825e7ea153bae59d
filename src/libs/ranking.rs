//! Shared rank assignment.
//!
//! The reference system carried two copies of the same ranking loop (one for
//! monthly discipline scores, one for aggregate voting scores); this module
//! is the single primitive both pipelines use. Ranks are competition style:
//! tied scores share a rank, and a strictly lower score at zero-based
//! position `i` takes rank `i + 1`, so `[100, 100, 80]` ranks `[1, 1, 3]`
//! and `[100, 90, 90, 80]` ranks `[1, 2, 2, 4]`.
//!
//! Ordering is made deterministic with the id as a secondary ascending key,
//! which also decides winners when the top score is tied.

/// One ranked entry: the caller's row id, its score, and the assigned rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedItem {
    pub id: i64,
    pub score: f64,
    pub rank: i64,
}

/// Assigns competition ranks by score descending. Input order does not
/// matter; ties are broken for ordering (not for rank) by id ascending.
pub fn assign_ranks(items: &[(i64, f64)]) -> Vec<RankedItem> {
    let mut sorted: Vec<(i64, f64)> = items.to_vec();
    sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));

    let mut ranked = Vec::with_capacity(sorted.len());
    let mut current_rank = 1i64;
    let mut prev_score: Option<f64> = None;

    for (index, (id, score)) in sorted.into_iter().enumerate() {
        if prev_score.map_or(false, |prev| score < prev) {
            current_rank = index as i64 + 1;
        }
        prev_score = Some(score);
        ranked.push(RankedItem { id, score, rank: current_rank });
    }

    ranked
}
