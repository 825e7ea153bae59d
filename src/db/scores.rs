use crate::db::db::Db;
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

const SCHEMA_SCORES: &str = "CREATE TABLE IF NOT EXISTS scores (
    id INTEGER PRIMARY KEY,
    period_id INTEGER NOT NULL,
    category_id INTEGER NOT NULL,
    employee_id INTEGER NOT NULL,
    weighted_score REAL NOT NULL DEFAULT 0,
    rank INTEGER,
    is_winner INTEGER NOT NULL DEFAULT 0,
    breakdown TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    UNIQUE(period_id, category_id, employee_id)
)";
const INSERT_SCORE: &str = "INSERT INTO scores (period_id, category_id, employee_id, weighted_score, breakdown)
    VALUES (?1, ?2, ?3, ?4, ?5)";
const DELETE_FOR_CATEGORY: &str = "DELETE FROM scores WHERE period_id = ?1 AND category_id = ?2";
const DELETE_FOR_PERIOD: &str = "DELETE FROM scores WHERE period_id = ?1";
const UPDATE_RANK: &str = "UPDATE scores SET rank = ?2, is_winner = ?3 WHERE id = ?1";
const SELECT_RANKED: &str = "SELECT s.id, s.period_id, s.category_id, s.employee_id, s.weighted_score,
    s.rank, s.is_winner, s.breakdown, e.nip, e.name
    FROM scores s JOIN employees e ON e.id = s.employee_id
    WHERE s.period_id = ?1 AND s.category_id = ?2
    ORDER BY s.weighted_score DESC, s.employee_id";

/// Per-criterion slice of an aggregate score, persisted as JSON alongside
/// the row for auditing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionBreakdown {
    pub criterion_id: i64,
    pub name: String,
    pub weight: f64,
    pub average: f64,
    pub weighted: f64,
}

/// One aggregate score per (period, category, employee), recomputed
/// wholesale on every calculation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub id: Option<i64>,
    pub period_id: i64,
    pub category_id: i64,
    pub employee_id: i64,
    pub weighted_score: f64,
    pub rank: Option<i64>,
    /// Set on exactly one row per (period, category): the first in rank order.
    pub is_winner: bool,
    pub breakdown: Option<String>,
}

/// Score row joined with employee identity for display.
#[derive(Debug, Clone)]
pub struct RankedScore {
    pub score: Score,
    pub nip: String,
    pub name: String,
}

pub struct Scores {
    conn: Connection,
}

impl Scores {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_SCORES, [])?;
        Ok(Self { conn: db.conn })
    }

    pub(crate) fn ensure_schema(conn: &Connection) -> Result<()> {
        conn.execute(SCHEMA_SCORES, [])?;
        Ok(())
    }

    pub fn ranked(&mut self, period_id: i64, category_id: i64) -> Result<Vec<RankedScore>> {
        Self::ranked_with(&self.conn, period_id, category_id)
    }

    pub(crate) fn insert_with(conn: &Connection, score: &Score) -> Result<i64> {
        conn.execute(
            INSERT_SCORE,
            params![score.period_id, score.category_id, score.employee_id, score.weighted_score, score.breakdown],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub(crate) fn wipe_category_with(conn: &Connection, period_id: i64, category_id: i64) -> Result<()> {
        conn.execute(DELETE_FOR_CATEGORY, params![period_id, category_id])?;
        Ok(())
    }

    pub(crate) fn wipe_period_with(conn: &Connection, period_id: i64) -> Result<()> {
        conn.execute(DELETE_FOR_PERIOD, params![period_id])?;
        Ok(())
    }

    pub(crate) fn update_rank_with(conn: &Connection, id: i64, rank: i64, is_winner: bool) -> Result<()> {
        conn.execute(UPDATE_RANK, params![id, rank, is_winner as i64])?;
        Ok(())
    }

    pub(crate) fn ranked_with(conn: &Connection, period_id: i64, category_id: i64) -> Result<Vec<RankedScore>> {
        let mut stmt = conn.prepare(SELECT_RANKED)?;
        let iter = stmt.query_map(params![period_id, category_id], |row| {
            Ok(RankedScore {
                score: Score {
                    id: row.get(0)?,
                    period_id: row.get(1)?,
                    category_id: row.get(2)?,
                    employee_id: row.get(3)?,
                    weighted_score: row.get(4)?,
                    rank: row.get(5)?,
                    is_winner: row.get::<_, i64>(6)? != 0,
                    breakdown: row.get(7)?,
                },
                nip: row.get(8)?,
                name: row.get(9)?,
            })
        })?;
        let mut scores = Vec::new();
        for score in iter {
            scores.push(score?);
        }
        Ok(scores)
    }
}
