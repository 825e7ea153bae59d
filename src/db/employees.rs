use crate::db::db::Db;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

const SCHEMA_EMPLOYEES: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    nip TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    position TEXT,
    tmt DATE,
    is_pppk INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";
const INSERT_EMPLOYEE: &str = "INSERT INTO employees (nip, name, position, tmt, is_pppk) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_IDENTITY: &str = "UPDATE employees SET name = ?2, position = ?3 WHERE id = ?1";
const SELECT_BY_NIP: &str = "SELECT id, nip, name, position, tmt, is_pppk FROM employees WHERE nip = ?1";
const SELECT_BY_ID: &str = "SELECT id, nip, name, position, tmt, is_pppk FROM employees WHERE id = ?1";
const SELECT_ALL: &str = "SELECT id, nip, name, position, tmt, is_pppk FROM employees ORDER BY name";

/// NIP is the stable natural key across monthly imports; rows are created
/// minimally on first sight of an unknown NIP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Option<i64>,
    pub nip: String,
    pub name: String,
    pub position: Option<String>,
    /// Effective appointment date, used to prorate PPPK evaluation.
    pub tmt: Option<NaiveDate>,
    pub is_pppk: bool,
}

pub struct Employees {
    conn: Connection,
}

impl Employees {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_EMPLOYEES, [])?;
        Ok(Self { conn: db.conn })
    }

    pub(crate) fn ensure_schema(conn: &Connection) -> Result<()> {
        conn.execute(SCHEMA_EMPLOYEES, [])?;
        Ok(())
    }

    pub fn create(&mut self, employee: &Employee) -> Result<i64> {
        Self::create_with(&self.conn, employee)
    }

    pub fn find_or_create(&mut self, nip: &str, name: &str, position: &str) -> Result<i64> {
        Self::find_or_create_with(&self.conn, nip, name, position)
    }

    pub fn get_by_nip(&mut self, nip: &str) -> Result<Option<Employee>> {
        Self::get_by_nip_with(&self.conn, nip)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Employee>> {
        self.conn
            .query_row(SELECT_BY_ID, params![id], row_to_employee)
            .optional()
            .map_err(Into::into)
    }

    pub fn list(&mut self) -> Result<Vec<Employee>> {
        let mut stmt = self.conn.prepare(SELECT_ALL)?;
        let iter = stmt.query_map([], row_to_employee)?;
        let mut employees = Vec::new();
        for employee in iter {
            employees.push(employee?);
        }
        Ok(employees)
    }

    pub(crate) fn create_with(conn: &Connection, employee: &Employee) -> Result<i64> {
        conn.execute(
            INSERT_EMPLOYEE,
            params![
                employee.nip,
                employee.name,
                employee.position,
                employee.tmt.map(|d| d.format("%Y-%m-%d").to_string()),
                employee.is_pppk as i64
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Returns the id for a NIP, creating a minimal record when unknown and
    /// refreshing name/position when the sheet carries newer values.
    pub(crate) fn find_or_create_with(conn: &Connection, nip: &str, name: &str, position: &str) -> Result<i64> {
        if let Some(existing) = Self::get_by_nip_with(conn, nip)? {
            let id = existing.id.unwrap_or_default();
            if !name.is_empty() && existing.name != name {
                conn.execute(UPDATE_IDENTITY, params![id, name, position])?;
            }
            return Ok(id);
        }
        conn.execute(INSERT_EMPLOYEE, params![nip, name, position, None::<String>, 0i64])?;
        Ok(conn.last_insert_rowid())
    }

    pub(crate) fn get_by_id_with(conn: &Connection, id: i64) -> Result<Option<Employee>> {
        conn.query_row(SELECT_BY_ID, params![id], row_to_employee)
            .optional()
            .map_err(Into::into)
    }

    pub(crate) fn get_by_nip_with(conn: &Connection, nip: &str) -> Result<Option<Employee>> {
        conn.query_row(SELECT_BY_NIP, params![nip], row_to_employee)
            .optional()
            .map_err(Into::into)
    }
}

fn row_to_employee(row: &rusqlite::Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        nip: row.get(1)?,
        name: row.get(2)?,
        position: row.get(3)?,
        tmt: row
            .get::<_, Option<String>>(4)?
            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        is_pppk: row.get::<_, i64>(5)? != 0,
    })
}
