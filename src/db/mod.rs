//! Database layer.
//!
//! SQLite persistence with one repository struct per table. Every repository
//! creates its own schema idempotently in `new()` and additionally exposes
//! `*_with(conn, ...)` associated functions so the batch pipelines can run
//! all of their row work inside a single transaction on one connection.

use anyhow::Result;
use rusqlite::Connection;

/// Core database connection management.
pub mod db;

/// Employee identity records keyed by NIP.
pub mod employees;

/// Evaluation periods with an open/closed lifecycle.
pub mod periods;

/// Application users; admins double as designated voters for synthetic votes.
pub mod users;

/// Weighted criteria grouped by category.
pub mod criteria;

/// Monthly automatic discipline scores derived from attendance imports.
pub mod discipline_scores;

/// Votes and their per-criterion detail rows.
pub mod votes;

/// Aggregate weighted scores with ranks and the winner flag.
pub mod scores;

/// Creates every table the pipelines touch on the given connection. Used by
/// the import, bridge and engine batches before opening their transaction.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    employees::Employees::ensure_schema(conn)?;
    periods::Periods::ensure_schema(conn)?;
    users::Users::ensure_schema(conn)?;
    criteria::Criteria::ensure_schema(conn)?;
    discipline_scores::DisciplineScores::ensure_schema(conn)?;
    votes::Votes::ensure_schema(conn)?;
    scores::Scores::ensure_schema(conn)?;
    Ok(())
}
