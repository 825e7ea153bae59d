#[cfg(test)]
mod tests {
    use sidik::libs::score::{round2, score1, score2, score3, DisciplineBreakdown};
    use sidik::libs::stats::AttendanceStats;
    use std::collections::HashMap;

    #[test]
    fn test_round2() {
        assert_eq!(round2(45.454545), 45.45);
        assert_eq!(round2(31.505), 31.51);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_score1_zero_effective_days() {
        assert_eq!(score1(20, 20, 0), 0.0);
    }

    #[test]
    fn test_score1_full_punctuality() {
        // 22 of 22 days punctual both ways caps at 50.
        assert_eq!(score1(22, 22, 22), 50.0);
    }

    #[test]
    fn test_score2_zero_penalty_is_exactly_35() {
        assert_eq!(score2(0.0, 0.0), 35.0);
    }

    #[test]
    fn test_score2_floors_at_zero() {
        assert_eq!(score2(80.0, 30.0), 0.0);
    }

    #[test]
    fn test_score3_binary() {
        assert_eq!(score3(0), 15.0);
        assert_eq!(score3(1), 0.0);
        assert_eq!(score3(7), 0.0);
    }

    #[test]
    fn test_score_bounds() {
        // Punctual-day tallies can never exceed the effective days they are
        // counted against, so only those combinations are meaningful input.
        for effective in [0i64, 10, 22] {
            for present in (0..=effective).step_by(5) {
                for leave in (0..=effective).step_by(5) {
                    let s1 = score1(present, leave, effective);
                    assert!((0.0..=50.0).contains(&s1), "score1 out of bounds: {}", s1);
                }
            }
        }
        for late in [0.0, 10.0, 50.0, 120.0] {
            for early in [0.0, 10.0, 50.0, 120.0] {
                let s2 = score2(late, early);
                assert!((0.0..=35.0).contains(&s2), "score2 out of bounds: {}", s2);
            }
        }
    }

    #[test]
    fn test_concrete_scenario() {
        // 22 work days, two first-tier lates at 5 points each, otherwise
        // fully punctual.
        let mut attendance = HashMap::new();
        attendance.insert("tl1".to_string(), 2.0);
        let mut weights = HashMap::new();
        weights.insert("tl1".to_string(), 5.0);

        let stats = AttendanceStats::compute(&attendance, &weights, 22, 20, 20);
        assert_eq!(stats.excused_days, 0);
        assert_eq!(stats.effective_days, 22);
        assert_eq!(stats.late_penalty, 10.0);
        assert_eq!(stats.early_penalty, 0.0);

        let breakdown = DisciplineBreakdown::from_stats(&stats);
        assert_eq!(breakdown.score1, 45.45);
        assert_eq!(breakdown.score2, 31.50);
        assert_eq!(breakdown.score3, 15.0);
        assert_eq!(breakdown.final_score(), 91.95);
    }

    #[test]
    fn test_final_score_is_sum_of_components() {
        let breakdown = DisciplineBreakdown {
            score1: 45.45,
            score2: 31.50,
            score3: 15.0,
        };
        assert_eq!(breakdown.final_score(), 91.95);
    }
}
