#[cfg(test)]
mod tests {
    use sidik::libs::stats::{AttendanceStats, EARLY_CODES, EXCESS_PERMISSION_CODES, EXCUSED_CODES, LATE_CODES};
    use std::collections::HashMap;

    fn tallies(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(code, count)| (code.to_string(), *count)).collect()
    }

    #[test]
    fn test_excused_days_reduce_effective_days() {
        let attendance = tallies(&[("ct", 3.0), ("dls", 2.0)]);
        let weights = HashMap::new();

        let stats = AttendanceStats::compute(&attendance, &weights, 22, 17, 17);
        assert_eq!(stats.excused_days, 5);
        assert_eq!(stats.effective_days, 17);
        assert_eq!(stats.late_penalty, 0.0);
        assert_eq!(stats.early_penalty, 0.0);
        assert_eq!(stats.excess_permission_count, 0);
    }

    #[test]
    fn test_effective_days_floor_at_zero() {
        let attendance = tallies(&[("ct", 30.0)]);
        let stats = AttendanceStats::compute(&attendance, &HashMap::new(), 22, 0, 0);
        assert_eq!(stats.excused_days, 30);
        assert_eq!(stats.effective_days, 0);
    }

    #[test]
    fn test_penalties_are_weighted_and_rounded() {
        let attendance = tallies(&[("tl1", 2.0), ("tl2", 1.0), ("psw1", 3.0)]);
        let weights = tallies(&[("tl1", 0.5), ("tl2", 1.125), ("psw1", 2.0)]);

        let stats = AttendanceStats::compute(&attendance, &weights, 22, 20, 20);
        // 2*0.5 + 1*1.125 = 2.125 -> 2.13
        assert_eq!(stats.late_penalty, 2.13);
        assert_eq!(stats.early_penalty, 6.0);
        assert_eq!(stats.total_penalty, 8.13);
    }

    #[test]
    fn test_code_missing_from_weights_contributes_zero() {
        let attendance = tallies(&[("tl1", 4.0)]);
        let stats = AttendanceStats::compute(&attendance, &HashMap::new(), 22, 20, 20);
        assert_eq!(stats.late_penalty, 0.0);
    }

    #[test]
    fn test_excess_permission_count() {
        let attendance = tallies(&[("i", 1.0), ("tmk", 2.0), ("cb1", 1.0)]);
        let stats = AttendanceStats::compute(&attendance, &HashMap::new(), 22, 20, 20);
        assert_eq!(stats.excess_permission_count, 4);
    }

    #[test]
    fn test_unknown_codes_are_ignored() {
        let attendance = tallies(&[("xyz", 9.0)]);
        let stats = AttendanceStats::compute(&attendance, &HashMap::new(), 22, 20, 20);
        assert_eq!(stats.excused_days, 0);
        assert_eq!(stats.late_penalty, 0.0);
        assert_eq!(stats.excess_permission_count, 0);
    }

    #[test]
    fn test_code_sets_are_disjoint() {
        let mut all: Vec<&str> = Vec::new();
        all.extend(EXCUSED_CODES);
        all.extend(LATE_CODES);
        all.extend(EARLY_CODES);
        all.extend(EXCESS_PERMISSION_CODES);
        let unique: std::collections::HashSet<&&str> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_excused_codes_never_penalize() {
        // Excused codes carrying a nominal weight still contribute nothing
        // to penalties or the excess count.
        let attendance = tallies(&[("cs1", 2.0)]);
        let weights = tallies(&[("cs1", 50.0)]);
        let stats = AttendanceStats::compute(&attendance, &weights, 22, 20, 20);
        assert_eq!(stats.excused_days, 2);
        assert_eq!(stats.late_penalty, 0.0);
        assert_eq!(stats.early_penalty, 0.0);
        assert_eq!(stats.excess_permission_count, 0);
    }
}
