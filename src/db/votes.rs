use crate::db::db::Db;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

const SCHEMA_VOTES: &str = "CREATE TABLE IF NOT EXISTS votes (
    id INTEGER PRIMARY KEY,
    period_id INTEGER NOT NULL,
    voter_id INTEGER NOT NULL,
    employee_id INTEGER NOT NULL,
    category_id INTEGER NOT NULL,
    total_score REAL NOT NULL DEFAULT 0,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    UNIQUE(period_id, voter_id, employee_id, category_id)
)";
const SCHEMA_VOTE_DETAILS: &str = "CREATE TABLE IF NOT EXISTS vote_details (
    id INTEGER PRIMARY KEY,
    vote_id INTEGER NOT NULL,
    criterion_id INTEGER NOT NULL,
    score REAL NOT NULL,
    FOREIGN KEY (vote_id) REFERENCES votes(id) ON DELETE CASCADE
)";
const INSERT_VOTE: &str = "INSERT INTO votes (period_id, voter_id, employee_id, category_id, total_score)
    VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_TOTAL: &str = "UPDATE votes SET total_score = ?2 WHERE id = ?1";
const SELECT_EXISTING: &str = "SELECT id, period_id, voter_id, employee_id, category_id, total_score FROM votes
    WHERE period_id = ?1 AND voter_id = ?2 AND employee_id = ?3 AND category_id = ?4";
const SELECT_FOR_EMPLOYEE: &str = "SELECT id, period_id, voter_id, employee_id, category_id, total_score FROM votes
    WHERE period_id = ?1 AND employee_id = ?2 AND category_id = ?3";
const SELECT_EMPLOYEE_IDS: &str = "SELECT DISTINCT employee_id FROM votes
    WHERE period_id = ?1 AND category_id = ?2 ORDER BY employee_id";
const INSERT_DETAIL: &str = "INSERT INTO vote_details (vote_id, criterion_id, score) VALUES (?1, ?2, ?3)";
const DELETE_DETAILS: &str = "DELETE FROM vote_details WHERE vote_id = ?1";
const SELECT_DETAILS: &str = "SELECT id, vote_id, criterion_id, score FROM vote_details WHERE vote_id = ?1 ORDER BY id";

/// One submission by one voter for one (period, employee, category).
/// Immutable once created unless explicitly overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: Option<i64>,
    pub period_id: i64,
    pub voter_id: i64,
    pub employee_id: i64,
    pub category_id: i64,
    /// Sum of the per-criterion scores.
    pub total_score: f64,
}

/// One-row-per-criterion breakdown of a vote, kept 1:1 with the vote's
/// scores and recreated whenever the vote is overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteDetail {
    pub id: Option<i64>,
    pub vote_id: i64,
    pub criterion_id: i64,
    pub score: f64,
}

pub struct Votes {
    conn: Connection,
}

impl Votes {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_VOTES, [])?;
        db.conn.execute(SCHEMA_VOTE_DETAILS, [])?;
        Ok(Self { conn: db.conn })
    }

    pub(crate) fn ensure_schema(conn: &Connection) -> Result<()> {
        conn.execute(SCHEMA_VOTES, [])?;
        conn.execute(SCHEMA_VOTE_DETAILS, [])?;
        Ok(())
    }

    pub fn find(&mut self, period_id: i64, voter_id: i64, employee_id: i64, category_id: i64) -> Result<Option<Vote>> {
        Self::find_with(&self.conn, period_id, voter_id, employee_id, category_id)
    }

    pub fn details(&mut self, vote_id: i64) -> Result<Vec<VoteDetail>> {
        Self::details_with(&self.conn, vote_id)
    }

    /// Creates a vote together with its detail rows.
    pub fn create(&mut self, vote: &Vote, details: &[(i64, f64)]) -> Result<i64> {
        Self::create_with(&self.conn, vote, details)
    }

    pub(crate) fn find_with(
        conn: &Connection,
        period_id: i64,
        voter_id: i64,
        employee_id: i64,
        category_id: i64,
    ) -> Result<Option<Vote>> {
        conn.query_row(SELECT_EXISTING, params![period_id, voter_id, employee_id, category_id], row_to_vote)
            .optional()
            .map_err(Into::into)
    }

    pub(crate) fn create_with(conn: &Connection, vote: &Vote, details: &[(i64, f64)]) -> Result<i64> {
        conn.execute(
            INSERT_VOTE,
            params![vote.period_id, vote.voter_id, vote.employee_id, vote.category_id, vote.total_score],
        )?;
        let vote_id = conn.last_insert_rowid();
        for (criterion_id, score) in details {
            conn.execute(INSERT_DETAIL, params![vote_id, criterion_id, score])?;
        }
        Ok(vote_id)
    }

    /// Replaces an existing vote's details in place and refreshes its total.
    pub(crate) fn overwrite_with(conn: &Connection, vote_id: i64, total_score: f64, details: &[(i64, f64)]) -> Result<()> {
        conn.execute(DELETE_DETAILS, params![vote_id])?;
        conn.execute(UPDATE_TOTAL, params![vote_id, total_score])?;
        for (criterion_id, score) in details {
            conn.execute(INSERT_DETAIL, params![vote_id, criterion_id, score])?;
        }
        Ok(())
    }

    pub(crate) fn for_employee_with(conn: &Connection, period_id: i64, employee_id: i64, category_id: i64) -> Result<Vec<Vote>> {
        let mut stmt = conn.prepare(SELECT_FOR_EMPLOYEE)?;
        let iter = stmt.query_map(params![period_id, employee_id, category_id], row_to_vote)?;
        let mut votes = Vec::new();
        for vote in iter {
            votes.push(vote?);
        }
        Ok(votes)
    }

    /// Employees that received at least one vote in (period, category).
    pub(crate) fn voted_employee_ids_with(conn: &Connection, period_id: i64, category_id: i64) -> Result<Vec<i64>> {
        let mut stmt = conn.prepare(SELECT_EMPLOYEE_IDS)?;
        let iter = stmt.query_map(params![period_id, category_id], |row| row.get(0))?;
        let mut ids = Vec::new();
        for id in iter {
            ids.push(id?);
        }
        Ok(ids)
    }

    pub(crate) fn details_with(conn: &Connection, vote_id: i64) -> Result<Vec<VoteDetail>> {
        let mut stmt = conn.prepare(SELECT_DETAILS)?;
        let iter = stmt.query_map(params![vote_id], |row| {
            Ok(VoteDetail {
                id: row.get(0)?,
                vote_id: row.get(1)?,
                criterion_id: row.get(2)?,
                score: row.get(3)?,
            })
        })?;
        let mut details = Vec::new();
        for detail in iter {
            details.push(detail?);
        }
        Ok(details)
    }
}

fn row_to_vote(row: &rusqlite::Row) -> rusqlite::Result<Vote> {
    Ok(Vote {
        id: row.get(0)?,
        period_id: row.get(1)?,
        voter_id: row.get(2)?,
        employee_id: row.get(3)?,
        category_id: row.get(4)?,
        total_score: row.get(5)?,
    })
}
