//! Synthetic vote generation command.

use crate::{
    libs::{bridge, config::Config, messages::Message},
    msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct VotesArgs {
    /// Voting period to generate votes for
    #[arg(short, long)]
    period: i64,
    /// Voter to attribute the votes to; defaults to the configured voter,
    /// then to the first admin account
    #[arg(short, long)]
    voter: Option<i64>,
    /// Replace existing votes instead of skipping them
    #[arg(short, long)]
    overwrite: bool,
}

pub fn cmd(votes_args: VotesArgs) -> Result<()> {
    let config = Config::read()?;
    let voter_id = votes_args.voter.or(config.default_voter_id);

    msg_info!(Message::VotesGenerating(votes_args.period));
    let outcome = bridge::generate_votes(votes_args.period, voter_id, votes_args.overwrite, config.discipline_category_id)?;

    msg_success!(Message::VotesCompleted(outcome.success, outcome.failed));
    if !outcome.errors.is_empty() {
        msg_warning!(Message::ErrorList(outcome.errors.clone()));
    }

    Ok(())
}
