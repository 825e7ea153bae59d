//! Annual report export command.

use crate::libs::annual::AnnualExporter;
use crate::libs::config::{Config, DEFAULT_FILE_PREFIX};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Year to consolidate
    #[arg(short, long)]
    year: i32,
    /// Directory holding the monthly workbooks; defaults to the configured
    /// export source directory, then the current directory
    #[arg(short, long)]
    dir: Option<PathBuf>,
    /// Output file; defaults to rekap_disiplin_<year>.xlsx in the source dir
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(export_args: ExportArgs) -> Result<()> {
    let config = Config::read().unwrap_or_default();
    let (source_dir, file_prefix) = match (&export_args.dir, &config.export) {
        (Some(dir), Some(export)) => (dir.clone(), export.file_prefix.clone()),
        (Some(dir), None) => (dir.clone(), DEFAULT_FILE_PREFIX.to_string()),
        (None, Some(export)) => (export.source_dir.clone(), export.file_prefix.clone()),
        (None, None) => (PathBuf::from("."), DEFAULT_FILE_PREFIX.to_string()),
    };
    let output_path = export_args
        .output
        .unwrap_or_else(|| source_dir.join(format!("rekap_disiplin_{}.xlsx", export_args.year)));

    AnnualExporter::new(export_args.year, source_dir, output_path, file_prefix).export()?;
    Ok(())
}
