//! Monthly attendance statistics.
//!
//! Turns one employee's raw per-code tallies into the normalized statistics
//! the discipline score is computed from. The code sets below are
//! organizational attendance policy, not something derivable from the data;
//! they must match the categories SIKEP emits.

use crate::libs::score::round2;
use serde::Serialize;
use std::collections::HashMap;

/// Excused-absence codes: approved leave, training and similar days that are
/// removed from the attendance denominator and carry no penalty.
pub const EXCUSED_CODES: &[&str] = &["dls", "ct", "ctl", "tb", "ld", "cs1", "cm1", "cm2", "cm3", "cap1"];

/// Late-arrival codes, each weighted by the sheet's penalty column.
pub const LATE_CODES: &[&str] = &["tl1", "tl2", "tl3", "tl4", "thm"];

/// Early-departure codes, weighted the same way as late arrivals.
pub const EARLY_CODES: &[&str] = &["psw1", "psw2", "psw3", "psw4", "thp"];

/// Codes counted as permissions beyond the allowed quota.
pub const EXCESS_PERMISSION_CODES: &[&str] = &[
    "i", "clt", "cpp", "bmt", "ib", "tmk", "cs14", "cm41", "cm42", "cm43", "cap10", "cb1", "cb2", "cb3",
];

/// Normalized attendance statistics for one employee and month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttendanceStats {
    /// Sheet-wide work day count.
    pub total_work_days: i64,
    /// Work days excluded from the denominator (sum of excused-code tallies).
    pub excused_days: i64,
    /// `total_work_days - excused_days`, floored at zero.
    pub effective_days: i64,
    pub present_on_time: i64,
    pub leave_on_time: i64,
    /// Weighted late-arrival penalty on a 0-100 scale, 2 decimals.
    pub late_penalty: f64,
    /// Weighted early-departure penalty on a 0-100 scale, 2 decimals.
    pub early_penalty: f64,
    pub total_penalty: f64,
    pub excess_permission_count: i64,
}

impl AttendanceStats {
    /// Computes statistics from raw tallies and per-code weights. A code
    /// missing from either map contributes zero.
    pub fn compute(
        attendance: &HashMap<String, f64>,
        weights: &HashMap<String, f64>,
        total_work_days: i64,
        present_on_time: i64,
        leave_on_time: i64,
    ) -> Self {
        let excused_days = sum_tallies(attendance, EXCUSED_CODES) as i64;
        let effective_days = (total_work_days - excused_days).max(0);

        let late_penalty = round2(weighted_sum(attendance, weights, LATE_CODES));
        let early_penalty = round2(weighted_sum(attendance, weights, EARLY_CODES));
        let excess_permission_count = sum_tallies(attendance, EXCESS_PERMISSION_CODES) as i64;

        AttendanceStats {
            total_work_days,
            excused_days,
            effective_days,
            present_on_time,
            leave_on_time,
            late_penalty,
            early_penalty,
            total_penalty: round2(late_penalty + early_penalty),
            excess_permission_count,
        }
    }
}

fn sum_tallies(attendance: &HashMap<String, f64>, codes: &[&str]) -> f64 {
    codes.iter().filter_map(|code| attendance.get(*code)).sum()
}

fn weighted_sum(attendance: &HashMap<String, f64>, weights: &HashMap<String, f64>, codes: &[&str]) -> f64 {
    codes
        .iter()
        .map(|code| {
            let tally = attendance.get(*code).copied().unwrap_or(0.0);
            let weight = weights.get(*code).copied().unwrap_or(0.0);
            tally * weight
        })
        .sum()
}
