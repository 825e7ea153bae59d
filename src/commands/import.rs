//! Monthly workbook import command.
//!
//! Runs the whole import pipeline for one file and prints the outcome:
//! success/failed counts, the recorded per-row errors, and the resulting
//! standings table for the month.

use crate::{
    db::discipline_scores::DisciplineScores,
    libs::{import, messages::Message, view::View},
    msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to the attendance workbook (.xlsx or .xls)
    file: PathBuf,
    /// Month number (1-12) the workbook covers
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,
    /// Four-digit year the workbook covers
    #[arg(short, long)]
    year: i32,
    /// Voting period to attach the scores to; omit to leave them unscoped
    #[arg(short, long)]
    period: Option<i64>,
}

pub fn cmd(import_args: ImportArgs) -> Result<()> {
    msg_info!(Message::ImportStarting(
        import_args.file.display().to_string(),
        import_args.month,
        import_args.year
    ));

    let outcome = import::import_workbook(&import_args.file, import_args.month, import_args.year, import_args.period)?;

    if outcome.success == 0 && outcome.failed == 0 {
        msg_warning!(Message::ImportEmptyWorkbook(import_args.file.display().to_string()));
        return Ok(());
    }

    msg_success!(Message::ImportCompleted(outcome.success, outcome.failed));
    if !outcome.errors.is_empty() {
        msg_warning!(Message::ErrorList(outcome.errors.clone()));
    }

    let standings = DisciplineScores::new()?.standings(import_args.month, import_args.year)?;
    if !standings.is_empty() {
        View::standings(&standings)?;
    }

    Ok(())
}
