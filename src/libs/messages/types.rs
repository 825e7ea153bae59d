#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigParseError,
    PromptCategoryId,
    PromptDefaultVoter,
    PromptExportDir,
    PromptExportPrefix,

    // === IMPORT MESSAGES ===
    ImportStarting(String, u32, i32),      // file, month, year
    ImportCompleted(usize, usize),         // success, failed
    ImportRowFailed(String, String),       // nip/name context, reason
    ImportEmptyWorkbook(String),           // file
    ImportRanked(usize, u32, i32),         // rows ranked, month, year

    // === VOTE BRIDGE MESSAGES ===
    VotesGenerating(i64),                  // period id
    VotesCompleted(usize, usize),          // success, failed
    VoteAlreadyExists(String),             // employee name/nip
    PeriodNotFound(i64),
    PeriodNotOpen(i64),
    NoVoterAvailable,
    WrongCriteriaCount(i64, usize),        // category id, found
    CriteriaPositionsInvalid(i64),         // category id

    // === SCORE ENGINE MESSAGES ===
    ScoresCalculated(usize, i64, i64),     // rows, period, category
    ScoresRecalculated(usize, i64),        // rows, period
    NoVotesForCategory(i64, i64),          // period, category

    // === STANDINGS MESSAGES ===
    StandingsHeader(u32, i32),             // month, year
    StandingsEmpty(u32, i32),              // month, year
    StandingsExported(String),             // path

    // === ANNUAL EXPORT MESSAGES ===
    AnnualExportStarting(i32),             // year
    AnnualExportCompleted(String),         // path
    AnnualMonthMissing(u32, i32),          // month, year
    AnnualNoData(i32),                     // year

    // === GENERIC ===
    ErrorList(Vec<String>),
}
