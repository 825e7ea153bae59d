//! Discipline score arithmetic.
//!
//! Three weighted components: punctual attendance (50 points), freedom from
//! lateness penalties (35 points) and staying within the permission quota
//! (15 points). The rounding points are load-bearing: the annual recap
//! workbook reproduces these exact formulas as live spreadsheet formulas and
//! both must agree to the cent.

use crate::libs::stats::AttendanceStats;

/// Rounds to two decimals, the fixed precision of every persisted score.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Attendance/punctuality component, 50-point maximum: the share of
/// effective days on which the employee both arrived and left on time.
pub fn score1(present_on_time: i64, leave_on_time: i64, effective_days: i64) -> f64 {
    if effective_days <= 0 {
        return 0.0;
    }
    let punctual = (present_on_time + leave_on_time) as f64;
    round2(punctual / (effective_days as f64 * 2.0) * 50.0)
}

/// Discipline component, 35-point maximum reduced by the total penalty.
/// The penalty is on a 0-100 scale before the 35% weighting.
pub fn score2(late_penalty: f64, early_penalty: f64) -> f64 {
    round2(((100.0 - (late_penalty + early_penalty)) * 0.35).max(0.0))
}

/// Obedience component: all 15 points or none, depending on whether any
/// excess permission was taken.
pub fn score3(excess_permission_count: i64) -> f64 {
    if excess_permission_count == 0 {
        15.0
    } else {
        0.0
    }
}

/// The three weight-adjusted components of a discipline score. The final
/// score is always their plain sum, 100 at most.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisciplineBreakdown {
    pub score1: f64,
    pub score2: f64,
    pub score3: f64,
}

impl DisciplineBreakdown {
    pub fn from_stats(stats: &AttendanceStats) -> Self {
        DisciplineBreakdown {
            score1: score1(stats.present_on_time, stats.leave_on_time, stats.effective_days),
            score2: score2(stats.late_penalty, stats.early_penalty),
            score3: score3(stats.excess_permission_count),
        }
    }

    pub fn final_score(&self) -> f64 {
        round2(self.score1 + self.score2 + self.score3)
    }
}
