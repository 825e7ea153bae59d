use crate::db::db::Db;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

const SCHEMA_PERIODS: &str = "CREATE TABLE IF NOT EXISTS periods (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    year INTEGER NOT NULL,
    status TEXT NOT NULL DEFAULT 'open',
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";
const INSERT_PERIOD: &str = "INSERT INTO periods (name, year, status) VALUES (?1, ?2, ?3)";
const UPDATE_STATUS: &str = "UPDATE periods SET status = ?2 WHERE id = ?1";
const SELECT_BY_ID: &str = "SELECT id, name, year, status FROM periods WHERE id = ?1";

pub const STATUS_OPEN: &str = "open";
pub const STATUS_CLOSED: &str = "closed";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Period {
    pub id: Option<i64>,
    pub name: String,
    pub year: i32,
    pub status: String,
}

impl Period {
    pub fn is_open(&self) -> bool {
        self.status == STATUS_OPEN
    }
}

pub struct Periods {
    conn: Connection,
}

impl Periods {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_PERIODS, [])?;
        Ok(Self { conn: db.conn })
    }

    pub(crate) fn ensure_schema(conn: &Connection) -> Result<()> {
        conn.execute(SCHEMA_PERIODS, [])?;
        Ok(())
    }

    pub fn create(&mut self, name: &str, year: i32) -> Result<i64> {
        self.conn.execute(INSERT_PERIOD, params![name, year, STATUS_OPEN])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn close(&mut self, id: i64) -> Result<()> {
        self.conn.execute(UPDATE_STATUS, params![id, STATUS_CLOSED])?;
        Ok(())
    }

    pub fn get(&mut self, id: i64) -> Result<Option<Period>> {
        Self::get_with(&self.conn, id)
    }

    pub(crate) fn get_with(conn: &Connection, id: i64) -> Result<Option<Period>> {
        conn.query_row(SELECT_BY_ID, params![id], |row| {
            Ok(Period {
                id: row.get(0)?,
                name: row.get(1)?,
                year: row.get(2)?,
                status: row.get(3)?,
            })
        })
        .optional()
        .map_err(Into::into)
    }
}
