//! Bridge between the automatic discipline evaluation and the voting
//! tables: turns persisted monthly scores into synthetic votes so the
//! weighted ranking engine can treat them like any human submission.

use crate::db::criteria::Criteria;
use crate::db::db::Db;
use crate::db::discipline_scores::{DisciplineScore, DisciplineScores};
use crate::db::employees::Employees;
use crate::db::periods::Periods;
use crate::db::users::Users;
use crate::db::votes::{Vote, Votes};
use crate::db;
use crate::libs::messages::Message;
use crate::libs::outcome::BatchOutcome;
use crate::msg_debug;
use anyhow::Result;
use rusqlite::Connection;

/// Generates one vote per discipline score row for the given period.
///
/// The voter defaults to the first admin account when none is given.
/// Existing votes are skipped unless `overwrite` is set, in which case
/// their details are replaced in place. All rows run inside a single
/// transaction; per-row failures are recorded and do not stop the batch.
pub fn generate_votes(period_id: i64, voter_id: Option<i64>, overwrite: bool, category_id: i64) -> Result<BatchOutcome> {
    let mut db = Db::new()?;
    db::ensure_schema(&db.conn)?;
    let tx = db.conn.transaction()?;

    let outcome = run_bridge(&tx, period_id, voter_id, overwrite, category_id)?;

    tx.commit()?;
    Ok(outcome)
}

/// The batch body, separated so tests can drive it on a prepared connection.
pub fn run_bridge(
    conn: &Connection,
    period_id: i64,
    voter_id: Option<i64>,
    overwrite: bool,
    category_id: i64,
) -> Result<BatchOutcome> {
    let period = match Periods::get_with(conn, period_id)? {
        Some(period) => period,
        None => return Ok(BatchOutcome::aborted(Message::PeriodNotFound(period_id).to_string())),
    };
    if !period.is_open() {
        return Ok(BatchOutcome::aborted(Message::PeriodNotOpen(period_id).to_string()));
    }

    let voter = match voter_id {
        Some(id) => Users::get_with(conn, id)?,
        None => Users::first_admin_with(conn)?,
    };
    let voter_id = match voter.and_then(|v| v.id) {
        Some(id) => id,
        None => return Ok(BatchOutcome::aborted(Message::NoVoterAvailable.to_string())),
    };

    let criteria = Criteria::for_category_with(conn, category_id)?;
    if criteria.len() != 3 {
        return Ok(BatchOutcome::aborted(Message::WrongCriteriaCount(category_id, criteria.len()).to_string()));
    }
    // Positions 1 to 3 map the criteria onto score_1/score_2/score_3; any
    // other numbering would silently misattribute the components.
    if criteria.iter().enumerate().any(|(i, c)| c.position != i as i64 + 1) {
        return Ok(BatchOutcome::aborted(Message::CriteriaPositionsInvalid(category_id).to_string()));
    }
    let criterion_ids: Vec<i64> = criteria.iter().filter_map(|c| c.id).collect();

    let scores = DisciplineScores::fetch_for_period_with(conn, period_id)?;
    let mut outcome = BatchOutcome::default();

    for score in &scores {
        match bridge_row(conn, score, period_id, voter_id, category_id, &criterion_ids, overwrite) {
            Ok(true) => outcome.success += 1,
            Ok(false) => {
                let who = describe_employee(conn, score.employee_id);
                outcome.failed += 1;
                outcome.errors.push(Message::VoteAlreadyExists(who).to_string());
            }
            Err(e) => {
                let who = describe_employee(conn, score.employee_id);
                msg_debug!("vote for {} failed: {}", who, e);
                outcome.failed += 1;
                outcome.errors.push(format!("{}: {}", who, e));
            }
        }
    }

    Ok(outcome)
}

/// Writes one synthetic vote. Returns Ok(false) when an existing vote was
/// left untouched because overwriting was not requested.
fn bridge_row(
    conn: &Connection,
    score: &DisciplineScore,
    period_id: i64,
    voter_id: i64,
    category_id: i64,
    criterion_ids: &[i64],
    overwrite: bool,
) -> Result<bool> {
    let details: Vec<(i64, f64)> = criterion_ids
        .iter()
        .zip([score.score_1, score.score_2, score.score_3])
        .map(|(&id, value)| (id, value))
        .collect();
    let total_score = score.final_score;

    match Votes::find_with(conn, period_id, voter_id, score.employee_id, category_id)? {
        Some(_) if !overwrite => Ok(false),
        Some(existing) => {
            let vote_id = existing
                .id
                .ok_or_else(|| anyhow::anyhow!("vote row without id for employee {}", score.employee_id))?;
            Votes::overwrite_with(conn, vote_id, total_score, &details)?;
            Ok(true)
        }
        None => {
            let vote = Vote {
                id: None,
                period_id,
                voter_id,
                employee_id: score.employee_id,
                category_id,
                total_score,
            };
            Votes::create_with(conn, &vote, &details)?;
            Ok(true)
        }
    }
}

fn describe_employee(conn: &Connection, employee_id: i64) -> String {
    match Employees::get_by_id_with(conn, employee_id) {
        Ok(Some(employee)) => {
            if employee.nip.is_empty() {
                employee.name
            } else {
                format!("{} ({})", employee.name, employee.nip)
            }
        }
        _ => format!("employee #{}", employee_id),
    }
}
