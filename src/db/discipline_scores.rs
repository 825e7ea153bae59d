use crate::db::db::Db;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

const SCHEMA_DISCIPLINE_SCORES: &str = "CREATE TABLE IF NOT EXISTS discipline_scores (
    id INTEGER PRIMARY KEY,
    employee_id INTEGER NOT NULL,
    period_id INTEGER,
    month INTEGER NOT NULL,
    year INTEGER NOT NULL,
    total_work_days INTEGER NOT NULL DEFAULT 0,
    present_on_time INTEGER NOT NULL DEFAULT 0,
    leave_on_time INTEGER NOT NULL DEFAULT 0,
    late_minutes REAL NOT NULL DEFAULT 0,
    early_leave_minutes REAL NOT NULL DEFAULT 0,
    excess_permission_count INTEGER NOT NULL DEFAULT 0,
    score_1 REAL NOT NULL DEFAULT 0,
    score_2 REAL NOT NULL DEFAULT 0,
    score_3 REAL NOT NULL DEFAULT 0,
    final_score REAL NOT NULL DEFAULT 0,
    rank INTEGER,
    raw_data TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    UNIQUE(employee_id, month, year)
)";

const UPSERT_SCORE: &str = "INSERT INTO discipline_scores (
        employee_id, period_id, month, year, total_work_days, present_on_time,
        leave_on_time, late_minutes, early_leave_minutes, excess_permission_count,
        score_1, score_2, score_3, final_score, raw_data
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
    ON CONFLICT(employee_id, month, year) DO UPDATE SET
        period_id = excluded.period_id,
        total_work_days = excluded.total_work_days,
        present_on_time = excluded.present_on_time,
        leave_on_time = excluded.leave_on_time,
        late_minutes = excluded.late_minutes,
        early_leave_minutes = excluded.early_leave_minutes,
        excess_permission_count = excluded.excess_permission_count,
        score_1 = excluded.score_1,
        score_2 = excluded.score_2,
        score_3 = excluded.score_3,
        final_score = excluded.final_score,
        rank = NULL,
        raw_data = excluded.raw_data";

const SELECT_MONTH: &str = "SELECT id, employee_id, period_id, month, year, total_work_days, present_on_time,
    leave_on_time, late_minutes, early_leave_minutes, excess_permission_count,
    score_1, score_2, score_3, final_score, rank, raw_data
    FROM discipline_scores WHERE month = ?1 AND year = ?2 ORDER BY final_score DESC, employee_id";

const SELECT_FOR_PERIOD: &str = "SELECT id, employee_id, period_id, month, year, total_work_days, present_on_time,
    leave_on_time, late_minutes, early_leave_minutes, excess_permission_count,
    score_1, score_2, score_3, final_score, rank, raw_data
    FROM discipline_scores WHERE period_id = ?1 OR period_id IS NULL ORDER BY employee_id";

const SELECT_BY_EMPLOYEE_MONTH: &str = "SELECT id, employee_id, period_id, month, year, total_work_days, present_on_time,
    leave_on_time, late_minutes, early_leave_minutes, excess_permission_count,
    score_1, score_2, score_3, final_score, rank, raw_data
    FROM discipline_scores WHERE employee_id = ?1 AND month = ?2 AND year = ?3";

const UPDATE_RANK: &str = "UPDATE discipline_scores SET rank = ?2 WHERE id = ?1";

const SELECT_STANDINGS: &str = "SELECT d.rank, e.nip, e.name, d.total_work_days, d.present_on_time,
    d.leave_on_time, d.late_minutes, d.early_leave_minutes, d.excess_permission_count,
    d.score_1, d.score_2, d.score_3, d.final_score
    FROM discipline_scores d JOIN employees e ON e.id = d.employee_id
    WHERE d.month = ?1 AND d.year = ?2
    ORDER BY d.final_score DESC, d.employee_id";

/// One persisted discipline score: the automatic evaluation of one employee
/// for one month. `final_score` is always the plain sum of the three
/// weight-adjusted components; `rank` is assigned after the whole month is
/// imported and cleared again whenever the row is overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisciplineScore {
    pub id: Option<i64>,
    pub employee_id: i64,
    /// Scores are not strictly period-scoped: a NULL period lets one monthly
    /// import feed any number of voting periods.
    pub period_id: Option<i64>,
    pub month: u32,
    pub year: i32,
    pub total_work_days: i64,
    pub present_on_time: i64,
    pub leave_on_time: i64,
    pub late_minutes: f64,
    pub early_leave_minutes: f64,
    pub excess_permission_count: i64,
    pub score_1: f64,
    pub score_2: f64,
    pub score_3: f64,
    pub final_score: f64,
    pub rank: Option<i64>,
    /// Free-form audit blob: the raw sheet row and derived statistics.
    pub raw_data: Option<String>,
}

/// One line of the monthly standings table, joined with employee identity.
#[derive(Debug, Clone, Serialize)]
pub struct Standing {
    pub rank: Option<i64>,
    pub nip: String,
    pub name: String,
    pub total_work_days: i64,
    pub present_on_time: i64,
    pub leave_on_time: i64,
    pub late_minutes: f64,
    pub early_leave_minutes: f64,
    pub excess_permission_count: i64,
    pub score_1: f64,
    pub score_2: f64,
    pub score_3: f64,
    pub final_score: f64,
}

pub struct DisciplineScores {
    conn: Connection,
}

impl DisciplineScores {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_DISCIPLINE_SCORES, [])?;
        Ok(Self { conn: db.conn })
    }

    pub(crate) fn ensure_schema(conn: &Connection) -> Result<()> {
        conn.execute(SCHEMA_DISCIPLINE_SCORES, [])?;
        Ok(())
    }

    pub fn upsert(&mut self, score: &DisciplineScore) -> Result<i64> {
        Self::upsert_with(&self.conn, score)
    }

    pub fn fetch_month(&mut self, month: u32, year: i32) -> Result<Vec<DisciplineScore>> {
        Self::fetch_month_with(&self.conn, month, year)
    }

    pub fn fetch_for_period(&mut self, period_id: i64) -> Result<Vec<DisciplineScore>> {
        Self::fetch_for_period_with(&self.conn, period_id)
    }

    pub fn fetch_for_employee_month(&mut self, employee_id: i64, month: u32, year: i32) -> Result<Option<DisciplineScore>> {
        self.conn
            .query_row(SELECT_BY_EMPLOYEE_MONTH, params![employee_id, month, year], row_to_score)
            .optional()
            .map_err(Into::into)
    }

    pub fn standings(&mut self, month: u32, year: i32) -> Result<Vec<Standing>> {
        let mut stmt = self.conn.prepare(SELECT_STANDINGS)?;
        let iter = stmt.query_map(params![month, year], |row| {
            Ok(Standing {
                rank: row.get(0)?,
                nip: row.get(1)?,
                name: row.get(2)?,
                total_work_days: row.get(3)?,
                present_on_time: row.get(4)?,
                leave_on_time: row.get(5)?,
                late_minutes: row.get(6)?,
                early_leave_minutes: row.get(7)?,
                excess_permission_count: row.get(8)?,
                score_1: row.get(9)?,
                score_2: row.get(10)?,
                score_3: row.get(11)?,
                final_score: row.get(12)?,
            })
        })?;
        let mut standings = Vec::new();
        for standing in iter {
            standings.push(standing?);
        }
        Ok(standings)
    }

    /// Idempotent upsert keyed on (employee, month, year): re-imports
    /// overwrite rather than duplicate, and invalidate the stored rank.
    pub(crate) fn upsert_with(conn: &Connection, score: &DisciplineScore) -> Result<i64> {
        conn.execute(
            UPSERT_SCORE,
            params![
                score.employee_id,
                score.period_id,
                score.month,
                score.year,
                score.total_work_days,
                score.present_on_time,
                score.leave_on_time,
                score.late_minutes,
                score.early_leave_minutes,
                score.excess_permission_count,
                score.score_1,
                score.score_2,
                score.score_3,
                score.final_score,
                score.raw_data,
            ],
        )?;
        let id = conn.query_row(
            "SELECT id FROM discipline_scores WHERE employee_id = ?1 AND month = ?2 AND year = ?3",
            params![score.employee_id, score.month, score.year],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    pub(crate) fn fetch_month_with(conn: &Connection, month: u32, year: i32) -> Result<Vec<DisciplineScore>> {
        let mut stmt = conn.prepare(SELECT_MONTH)?;
        let iter = stmt.query_map(params![month, year], row_to_score)?;
        let mut scores = Vec::new();
        for score in iter {
            scores.push(score?);
        }
        Ok(scores)
    }

    /// Scores for a voting period: rows stamped with the period id plus all
    /// unscoped rows. The OR-NULL arm is deliberate, not an accident of
    /// nullable columns.
    pub(crate) fn fetch_for_period_with(conn: &Connection, period_id: i64) -> Result<Vec<DisciplineScore>> {
        let mut stmt = conn.prepare(SELECT_FOR_PERIOD)?;
        let iter = stmt.query_map(params![period_id], row_to_score)?;
        let mut scores = Vec::new();
        for score in iter {
            scores.push(score?);
        }
        Ok(scores)
    }

    pub(crate) fn update_rank_with(conn: &Connection, id: i64, rank: i64) -> Result<()> {
        conn.execute(UPDATE_RANK, params![id, rank])?;
        Ok(())
    }
}

fn row_to_score(row: &rusqlite::Row) -> rusqlite::Result<DisciplineScore> {
    Ok(DisciplineScore {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        period_id: row.get(2)?,
        month: row.get(3)?,
        year: row.get(4)?,
        total_work_days: row.get(5)?,
        present_on_time: row.get(6)?,
        leave_on_time: row.get(7)?,
        late_minutes: row.get(8)?,
        early_leave_minutes: row.get(9)?,
        excess_permission_count: row.get(10)?,
        score_1: row.get(11)?,
        score_2: row.get(12)?,
        score_3: row.get(13)?,
        final_score: row.get(14)?,
        rank: row.get(15)?,
        raw_data: row.get(16)?,
    })
}
