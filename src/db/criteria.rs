use crate::db::db::Db;
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

const SCHEMA_CRITERIA: &str = "CREATE TABLE IF NOT EXISTS criteria (
    id INTEGER PRIMARY KEY,
    category_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    weight REAL NOT NULL,
    position INTEGER NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";
const INSERT_CRITERION: &str = "INSERT INTO criteria (category_id, name, weight, position) VALUES (?1, ?2, ?3, ?4)";
const SELECT_BY_CATEGORY: &str = "SELECT id, category_id, name, weight, position FROM criteria
    WHERE category_id = ?1 ORDER BY position";
const SELECT_CATEGORY_IDS: &str = "SELECT DISTINCT category_id FROM criteria ORDER BY category_id";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Criterion {
    pub id: Option<i64>,
    pub category_id: i64,
    pub name: String,
    /// Percentage weight applied to this criterion's vote average.
    pub weight: f64,
    /// 1-based ordering within the category; for the discipline category
    /// positions 1-3 map to score1/score2/score3.
    pub position: i64,
}

pub struct Criteria {
    conn: Connection,
}

impl Criteria {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_CRITERIA, [])?;
        Ok(Self { conn: db.conn })
    }

    pub(crate) fn ensure_schema(conn: &Connection) -> Result<()> {
        conn.execute(SCHEMA_CRITERIA, [])?;
        Ok(())
    }

    pub fn create(&mut self, criterion: &Criterion) -> Result<i64> {
        self.conn.execute(
            INSERT_CRITERION,
            params![criterion.category_id, criterion.name, criterion.weight, criterion.position],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn for_category(&mut self, category_id: i64) -> Result<Vec<Criterion>> {
        Self::for_category_with(&self.conn, category_id)
    }

    pub fn category_ids(&mut self) -> Result<Vec<i64>> {
        Self::category_ids_with(&self.conn)
    }

    pub(crate) fn for_category_with(conn: &Connection, category_id: i64) -> Result<Vec<Criterion>> {
        let mut stmt = conn.prepare(SELECT_BY_CATEGORY)?;
        let iter = stmt.query_map(params![category_id], |row| {
            Ok(Criterion {
                id: row.get(0)?,
                category_id: row.get(1)?,
                name: row.get(2)?,
                weight: row.get(3)?,
                position: row.get(4)?,
            })
        })?;
        let mut criteria = Vec::new();
        for criterion in iter {
            criteria.push(criterion?);
        }
        Ok(criteria)
    }

    pub(crate) fn category_ids_with(conn: &Connection) -> Result<Vec<i64>> {
        let mut stmt = conn.prepare(SELECT_CATEGORY_IDS)?;
        let iter = stmt.query_map([], |row| row.get(0))?;
        let mut ids = Vec::new();
        for id in iter {
            ids.push(id?);
        }
        Ok(ids)
    }
}
