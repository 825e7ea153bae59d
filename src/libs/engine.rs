//! Aggregation engine: collapses the votes of one (period, category) pair
//! into a single weighted score per employee, then ranks the field and
//! marks the winner.

use crate::db;
use crate::db::criteria::Criteria;
use crate::db::db::Db;
use crate::db::scores::{CriterionBreakdown, Score, Scores};
use crate::db::votes::Votes;
use crate::libs::ranking::assign_ranks;
use crate::libs::score::round2;
use anyhow::Result;
use rusqlite::Connection;
use std::collections::HashMap;

/// Recomputes the aggregate scores for one category of a period.
///
/// Existing rows for the pair are wiped first so the pass is idempotent.
/// Returns the number of employees scored.
pub fn calculate_scores(period_id: i64, category_id: i64) -> Result<usize> {
    let mut db = Db::new()?;
    db::ensure_schema(&db.conn)?;
    let tx = db.conn.transaction()?;

    let count = run_calculation(&tx, period_id, category_id)?;

    tx.commit()?;
    Ok(count)
}

/// Recomputes every category of a period from scratch.
pub fn recalculate_scores(period_id: i64) -> Result<usize> {
    let mut db = Db::new()?;
    db::ensure_schema(&db.conn)?;
    let tx = db.conn.transaction()?;

    Scores::wipe_period_with(&tx, period_id)?;
    let mut total = 0;
    for category_id in Criteria::category_ids_with(&tx)? {
        total += run_calculation(&tx, period_id, category_id)?;
    }

    tx.commit()?;
    Ok(total)
}

/// The calculation body, separated so tests can drive it on a prepared
/// connection.
pub fn run_calculation(conn: &Connection, period_id: i64, category_id: i64) -> Result<usize> {
    let criteria = Criteria::for_category_with(conn, category_id)?;
    let employee_ids = Votes::voted_employee_ids_with(conn, period_id, category_id)?;

    Scores::wipe_category_with(conn, period_id, category_id)?;

    // Maps each employee to the id of the score row written for them, so
    // ranks can be attached after the whole field is known.
    let mut row_ids: HashMap<i64, i64> = HashMap::new();
    let mut field: Vec<(i64, f64)> = Vec::new();

    for &employee_id in &employee_ids {
        let votes = Votes::for_employee_with(conn, period_id, employee_id, category_id)?;
        let vote_count = votes.len();

        // Per-criterion sums across all votes. A vote with no detail row
        // for a criterion contributes zero to that criterion.
        let mut sums: HashMap<i64, f64> = HashMap::new();
        for vote in &votes {
            let vote_id = vote
                .id
                .ok_or_else(|| anyhow::anyhow!("vote row without id for employee {}", employee_id))?;
            for detail in Votes::details_with(conn, vote_id)? {
                *sums.entry(detail.criterion_id).or_insert(0.0) += detail.score;
            }
        }

        let mut weighted_score = 0.0;
        let mut breakdown = Vec::with_capacity(criteria.len());
        for criterion in &criteria {
            let criterion_id = criterion
                .id
                .ok_or_else(|| anyhow::anyhow!("criterion without id in category {}", category_id))?;
            let average = if vote_count == 0 {
                0.0
            } else {
                sums.get(&criterion_id).copied().unwrap_or(0.0) / vote_count as f64
            };
            let weighted = average * criterion.weight / 100.0;
            weighted_score += weighted;
            breakdown.push(CriterionBreakdown {
                criterion_id,
                name: criterion.name.clone(),
                weight: criterion.weight,
                average: round2(average),
                weighted: round2(weighted),
            });
        }
        let weighted_score = round2(weighted_score);

        let score = Score {
            id: None,
            period_id,
            category_id,
            employee_id,
            weighted_score,
            rank: None,
            is_winner: false,
            breakdown: Some(serde_json::to_string(&breakdown)?),
        };
        let row_id = Scores::insert_with(conn, &score)?;
        row_ids.insert(employee_id, row_id);
        field.push((employee_id, weighted_score));
    }

    // Exactly one winner even when the top is tied: the first item in
    // rank order, which breaks ties on the lower employee id.
    for (index, ranked) in assign_ranks(&field).into_iter().enumerate() {
        let row_id = row_ids[&ranked.id];
        Scores::update_rank_with(conn, row_id, ranked.rank, index == 0)?;
    }

    Ok(employee_ids.len())
}
