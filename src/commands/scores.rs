//! Weighted score calculation command.

use crate::{
    db::scores::Scores,
    libs::{config::Config, engine, messages::Message, view::View},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ScoresArgs {
    /// Voting period to calculate
    #[arg(short, long)]
    period: i64,
    /// Category to calculate; defaults to the configured discipline category
    #[arg(short, long)]
    category: Option<i64>,
    /// Wipe and recompute every category of the period
    #[arg(short, long)]
    recalculate: bool,
}

pub fn cmd(scores_args: ScoresArgs) -> Result<()> {
    let config = Config::read()?;
    let category_id = scores_args.category.unwrap_or(config.discipline_category_id);

    if scores_args.recalculate {
        let count = engine::recalculate_scores(scores_args.period)?;
        msg_success!(Message::ScoresRecalculated(count, scores_args.period));
    } else {
        let count = engine::calculate_scores(scores_args.period, category_id)?;
        if count == 0 {
            msg_info!(Message::NoVotesForCategory(scores_args.period, category_id));
            return Ok(());
        }
        msg_success!(Message::ScoresCalculated(count, scores_args.period, category_id));
    }

    let ranked = Scores::new()?.ranked(scores_args.period, category_id)?;
    if !ranked.is_empty() {
        View::scores(&ranked)?;
    }

    Ok(())
}
