use crate::db::db::Db;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

const SCHEMA_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    role TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";
const INSERT_USER: &str = "INSERT INTO users (name, role) VALUES (?1, ?2)";
const SELECT_BY_ID: &str = "SELECT id, name, role FROM users WHERE id = ?1";
const SELECT_FIRST_ADMIN: &str = "SELECT id, name, role FROM users
    WHERE role IN ('admin', 'superadmin') ORDER BY id LIMIT 1";

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPERADMIN: &str = "superadmin";
pub const ROLE_ASSESSOR: &str = "assessor";
pub const ROLE_PARTICIPANT: &str = "participant";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub role: String,
}

pub struct Users {
    conn: Connection,
}

impl Users {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_USERS, [])?;
        Ok(Self { conn: db.conn })
    }

    pub(crate) fn ensure_schema(conn: &Connection) -> Result<()> {
        conn.execute(SCHEMA_USERS, [])?;
        Ok(())
    }

    pub fn create(&mut self, name: &str, role: &str) -> Result<i64> {
        self.conn.execute(INSERT_USER, params![name, role])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&mut self, id: i64) -> Result<Option<User>> {
        Self::get_with(&self.conn, id)
    }

    /// The lowest-id admin or superadmin, used as the designated voter for
    /// synthetic discipline votes when none is configured.
    pub fn first_admin(&mut self) -> Result<Option<User>> {
        Self::first_admin_with(&self.conn)
    }

    pub(crate) fn get_with(conn: &Connection, id: i64) -> Result<Option<User>> {
        conn.query_row(SELECT_BY_ID, params![id], row_to_user).optional().map_err(Into::into)
    }

    pub(crate) fn first_admin_with(conn: &Connection) -> Result<Option<User>> {
        conn.query_row(SELECT_FIRST_ADMIN, [], row_to_user).optional().map_err(Into::into)
    }
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        role: row.get(2)?,
    })
}
