//! Display implementation for sidik application messages.
//!
//! All user-facing text lives here, so wording can be audited and changed in
//! one place. Messages with dynamic content use typed parameters from the
//! `Message` enum rather than ad-hoc format strings at call sites.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // Configuration
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigParseError => "Failed to parse configuration file".to_string(),
            Message::PromptCategoryId => "Discipline category id".to_string(),
            Message::PromptDefaultVoter => "Default voter user id (0 = auto-detect first admin)".to_string(),
            Message::PromptExportDir => "Directory holding the monthly SIKEP workbooks".to_string(),
            Message::PromptExportPrefix => "Monthly workbook file prefix".to_string(),

            // Import
            Message::ImportStarting(file, month, year) => format!("Importing {} for {:02}/{}", file, month, year),
            Message::ImportCompleted(success, failed) => format!("Import finished: {} succeeded, {} failed", success, failed),
            Message::ImportRowFailed(who, reason) => format!("Row for {} failed: {}", who, reason),
            Message::ImportEmptyWorkbook(file) => format!("No employee rows found in {}", file),
            Message::ImportRanked(count, month, year) => format!("Ranked {} discipline scores for {:02}/{}", count, month, year),

            // Vote bridge
            Message::VotesGenerating(period) => format!("Generating discipline votes for period {}", period),
            Message::VotesCompleted(success, failed) => format!("Vote generation finished: {} created, {} failed", success, failed),
            Message::VoteAlreadyExists(who) => format!("Vote already exists for {} (use --overwrite to replace)", who),
            Message::PeriodNotFound(id) => format!("Period {} not found", id),
            Message::PeriodNotOpen(id) => format!("Period {} is not open", id),
            Message::NoVoterAvailable => "No admin user available to attribute votes to".to_string(),
            Message::WrongCriteriaCount(category, found) => {
                format!("Discipline category {} must have exactly 3 criteria, found {}", category, found)
            }
            Message::CriteriaPositionsInvalid(category) => {
                format!("Criteria of category {} must occupy positions 1 to 3", category)
            }

            // Score engine
            Message::ScoresCalculated(rows, period, category) => {
                format!("Calculated {} scores for period {} category {}", rows, period, category)
            }
            Message::ScoresRecalculated(rows, period) => format!("Recalculated {} scores for period {}", rows, period),
            Message::NoVotesForCategory(period, category) => {
                format!("No votes found for period {} category {}", period, category)
            }

            // Standings
            Message::StandingsHeader(month, year) => format!("Discipline standings for {:02}/{}", month, year),
            Message::StandingsEmpty(month, year) => format!("No discipline scores recorded for {:02}/{}", month, year),
            Message::StandingsExported(path) => format!("Standings exported to {}", path),

            // Annual export
            Message::AnnualExportStarting(year) => format!("Building annual recap for {}", year),
            Message::AnnualExportCompleted(path) => format!("Annual recap written to {}", path),
            Message::AnnualMonthMissing(month, year) => format!("No workbook found for {:02}/{}, month skipped", month, year),
            Message::AnnualNoData(year) => format!("No monthly workbooks found for {}", year),

            // Generic
            Message::ErrorList(errors) => errors.join("\n"),
        };
        write!(f, "{}", text)
    }
}
