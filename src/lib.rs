//! # Sidik - Sistem Informasi Disiplin Kepegawaian
//!
//! A command-line utility for computing "most disciplined employee" scores
//! from monthly attendance workbooks exported by SIKEP.
//!
//! ## Features
//!
//! - **Workbook Import**: Parse semi-structured attendance spreadsheets into
//!   normalized per-employee monthly statistics
//! - **Discipline Scoring**: Three-component weighted score with monthly
//!   competition-style ranking
//! - **Vote Bridge**: Materialize discipline scores as synthetic votes in
//!   the generic voting data model
//! - **Ranking Engine**: Criterion-weighted aggregation of votes per period
//!   and category with a single marked winner
//! - **Annual Reports**: Consolidated yearly workbook with per-month
//!   breakdowns and auditable live formulas
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sidik::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
