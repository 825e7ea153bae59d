//! Monthly standings display and export command.

use crate::{
    db::discipline_scores::{DisciplineScores, Standing},
    libs::{messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StandingsFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Args)]
pub struct StandingsArgs {
    /// Month number (1-12)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,
    /// Four-digit year
    #[arg(short, long)]
    year: i32,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = StandingsFormat::Table)]
    format: StandingsFormat,
    /// Write to a file instead of stdout (csv and json only)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(standings_args: StandingsArgs) -> Result<()> {
    let standings = DisciplineScores::new()?.standings(standings_args.month, standings_args.year)?;
    if standings.is_empty() {
        msg_info!(Message::StandingsEmpty(standings_args.month, standings_args.year));
        return Ok(());
    }

    match standings_args.format {
        StandingsFormat::Table => {
            msg_print!(Message::StandingsHeader(standings_args.month, standings_args.year));
            View::standings(&standings)?;
        }
        StandingsFormat::Csv => {
            let csv = to_csv(&standings)?;
            write_out(&csv, standings_args.output.as_ref())?;
        }
        StandingsFormat::Json => {
            let json = serde_json::to_string_pretty(&standings)?;
            write_out(&json, standings_args.output.as_ref())?;
        }
    }

    Ok(())
}

fn to_csv(standings: &[Standing]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "rank",
        "nip",
        "name",
        "total_work_days",
        "present_on_time",
        "leave_on_time",
        "late_minutes",
        "early_leave_minutes",
        "excess_permission_count",
        "score_1",
        "score_2",
        "score_3",
        "final_score",
    ])?;
    for standing in standings {
        wtr.write_record([
            standing.rank.map(|r| r.to_string()).unwrap_or_default(),
            standing.nip.clone(),
            standing.name.clone(),
            standing.total_work_days.to_string(),
            standing.present_on_time.to_string(),
            standing.leave_on_time.to_string(),
            format!("{:.2}", standing.late_minutes),
            format!("{:.2}", standing.early_leave_minutes),
            standing.excess_permission_count.to_string(),
            format!("{:.2}", standing.score_1),
            format!("{:.2}", standing.score_2),
            format!("{:.2}", standing.score_3),
            format!("{:.2}", standing.final_score),
        ])?;
    }
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn write_out(content: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            File::create(path)?.write_all(content.as_bytes())?;
            msg_success!(Message::StandingsExported(path.display().to_string()));
        }
        None => println!("{}", content),
    }
    Ok(())
}
