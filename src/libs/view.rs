use crate::db::discipline_scores::Standing;
use crate::db::scores::RankedScore;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Monthly discipline standings, one row per employee.
    pub fn standings(standings: &[Standing]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row![
            "RANK", "NIP", "NAME", "DAYS", "PRESENT", "LEAVE", "LATE", "EARLY", "EXCESS", "S1", "S2", "S3", "FINAL"
        ]);
        for standing in standings {
            table.add_row(row![
                standing.rank.map(|r| r.to_string()).unwrap_or_default(),
                standing.nip,
                standing.name,
                standing.total_work_days,
                standing.present_on_time,
                standing.leave_on_time,
                format!("{:.2}", standing.late_minutes),
                format!("{:.2}", standing.early_leave_minutes),
                standing.excess_permission_count,
                format!("{:.2}", standing.score_1),
                format!("{:.2}", standing.score_2),
                format!("{:.2}", standing.score_3),
                format!("{:.2}", standing.final_score)
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Aggregated voting scores for one (period, category), winner marked.
    pub fn scores(scores: &[RankedScore]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["RANK", "NIP", "NAME", "SCORE", "WINNER"]);
        for ranked in scores {
            table.add_row(row![
                ranked.score.rank.map(|r| r.to_string()).unwrap_or_default(),
                ranked.nip,
                ranked.name,
                format!("{:.2}", ranked.score.weighted_score),
                if ranked.score.is_winner { "*" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }
}
