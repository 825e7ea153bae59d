pub mod export;
pub mod import;
pub mod init;
pub mod scores;
pub mod standings;
pub mod votes;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Import a monthly attendance workbook", arg_required_else_help = true)]
    Import(import::ImportArgs),
    #[command(about = "Display or export monthly discipline standings")]
    Standings(standings::StandingsArgs),
    #[command(about = "Generate synthetic votes from discipline scores")]
    Votes(votes::VotesArgs),
    #[command(about = "Calculate weighted voting scores and ranks")]
    Scores(scores::ScoresArgs),
    #[command(about = "Export the consolidated annual report workbook")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Import(args) => import::cmd(args),
            Commands::Standings(args) => standings::cmd(args),
            Commands::Votes(args) => votes::cmd(args),
            Commands::Scores(args) => scores::cmd(args),
            Commands::Export(args) => export::cmd(args),
        }
    }
}
