//! Monthly attendance import pipeline.
//!
//! One import run covers one workbook file: every employee row is parsed,
//! scored and upserted on (employee, month, year), then the whole month is
//! re-ranked. The run is wrapped in a single transaction, but individual row
//! failures are soft: they are logged, counted and reported while the rest
//! of the file still commits. Only an error escaping the loop (e.g. a lost
//! connection) rolls the import back entirely.

use crate::db::discipline_scores::{DisciplineScore, DisciplineScores};
use crate::db::employees::Employees;
use crate::db::{self, db::Db};
use crate::libs::messages::Message;
use crate::libs::outcome::BatchOutcome;
use crate::libs::ranking::assign_ranks;
use crate::libs::score::DisciplineBreakdown;
use crate::libs::stats::AttendanceStats;
use crate::libs::workbook::{AttendanceSheet, EmployeeAttendanceRow};
use crate::msg_debug;
use anyhow::Result;
use rusqlite::Connection;
use std::collections::HashMap;
use std::path::Path;

/// Imports one monthly attendance workbook and re-ranks the month.
pub fn import_workbook(path: &Path, month: u32, year: i32, period_id: Option<i64>) -> Result<BatchOutcome> {
    let sheet = AttendanceSheet::load(path)?;

    let mut db = Db::new()?;
    db::ensure_schema(&db.conn)?;
    let tx = db.conn.transaction()?;

    let outcome = run_import(&tx, &sheet, month, year, period_id)?;

    tx.commit()?;
    Ok(outcome)
}

/// The batch body, separated so tests can drive it from a parsed sheet.
pub fn run_import(
    conn: &Connection,
    sheet: &AttendanceSheet,
    month: u32,
    year: i32,
    period_id: Option<i64>,
) -> Result<BatchOutcome> {
    let weights = sheet.weights();
    let mut outcome = BatchOutcome::default();

    for row in &sheet.rows {
        match import_row(conn, row, &weights, sheet.total_work_days, month, year, period_id) {
            Ok(()) => outcome.success += 1,
            Err(e) => {
                let who = if row.nip.is_empty() { row.nama.clone() } else { format!("{} ({})", row.nama, row.nip) };
                let message = Message::ImportRowFailed(who, e.to_string()).to_string();
                msg_debug!("{}", message);
                outcome.failed += 1;
                outcome.errors.push(message);
            }
        }
    }

    let ranked = rank_month(conn, month, year)?;
    msg_debug!("{}", Message::ImportRanked(ranked, month, year));
    Ok(outcome)
}

fn import_row(
    conn: &Connection,
    row: &EmployeeAttendanceRow,
    weights: &HashMap<String, f64>,
    total_work_days: i64,
    month: u32,
    year: i32,
    period_id: Option<i64>,
) -> Result<()> {
    let employee_id = Employees::find_or_create_with(conn, &row.nip, &row.nama, &row.jabatan)?;

    let stats = AttendanceStats::compute(&row.attendance, weights, total_work_days, row.present_on_time, row.leave_on_time);
    let breakdown = DisciplineBreakdown::from_stats(&stats);

    let raw_data = serde_json::json!({
        "nip": row.nip,
        "nama": row.nama,
        "jabatan": row.jabatan,
        "attendance": row.attendance,
        "stats": stats,
    });

    DisciplineScores::upsert_with(
        conn,
        &DisciplineScore {
            id: None,
            employee_id,
            period_id,
            month,
            year,
            total_work_days: stats.total_work_days,
            present_on_time: stats.present_on_time,
            leave_on_time: stats.leave_on_time,
            late_minutes: stats.late_penalty,
            early_leave_minutes: stats.early_penalty,
            excess_permission_count: stats.excess_permission_count,
            score_1: breakdown.score1,
            score_2: breakdown.score2,
            score_3: breakdown.score3,
            final_score: breakdown.final_score(),
            rank: None,
            raw_data: Some(raw_data.to_string()),
        },
    )?;

    Ok(())
}

/// Re-ranks every discipline score of (month, year) by final score through
/// the shared ranking primitive.
fn rank_month(conn: &Connection, month: u32, year: i32) -> Result<usize> {
    let scores = DisciplineScores::fetch_month_with(conn, month, year)?;

    // Rank on the employee id so tie order stays stable across re-imports,
    // then map back to the row ids for the update.
    let mut row_ids: HashMap<i64, i64> = HashMap::new();
    let mut items: Vec<(i64, f64)> = Vec::with_capacity(scores.len());
    for score in &scores {
        let row_id = score
            .id
            .ok_or_else(|| anyhow::anyhow!("score row without id for employee {}", score.employee_id))?;
        row_ids.insert(score.employee_id, row_id);
        items.push((score.employee_id, score.final_score));
    }

    let ranked = assign_ranks(&items);
    for item in &ranked {
        DisciplineScores::update_rank_with(conn, row_ids[&item.id], item.rank)?;
    }
    Ok(ranked.len())
}
