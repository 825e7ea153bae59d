#[cfg(test)]
mod tests {
    use sidik::db::criteria::{Criteria, Criterion};
    use sidik::db::employees::{Employee, Employees};
    use sidik::db::periods::Periods;
    use sidik::db::scores::Scores;
    use sidik::db::votes::{Vote, Votes};
    use sidik::libs::engine::{calculate_scores, recalculate_scores};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    const CATEGORY: i64 = 3;

    struct EngineTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for EngineTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            EngineTestContext { _temp_dir: temp_dir }
        }
    }

    /// Criteria weighted 50/30/20; returns their ids in position order.
    fn seed_criteria() -> Vec<i64> {
        let mut criteria = Criteria::new().unwrap();
        [(1, "Kehadiran", 50.0), (2, "Disiplin", 30.0), (3, "Ketaatan", 20.0)]
            .iter()
            .map(|(position, name, weight)| {
                criteria
                    .create(&Criterion {
                        id: None,
                        category_id: CATEGORY,
                        name: name.to_string(),
                        weight: *weight,
                        position: *position,
                    })
                    .unwrap()
            })
            .collect()
    }

    fn seed_employee(nip: &str, name: &str) -> i64 {
        Employees::new()
            .unwrap()
            .create(&Employee {
                id: None,
                nip: nip.to_string(),
                name: name.to_string(),
                position: None,
                tmt: None,
                is_pppk: false,
            })
            .unwrap()
    }

    fn cast_vote(period_id: i64, voter_id: i64, employee_id: i64, details: &[(i64, f64)]) {
        let total: f64 = details.iter().map(|(_, s)| s).sum();
        Votes::new()
            .unwrap()
            .create(
                &Vote {
                    id: None,
                    period_id,
                    voter_id,
                    employee_id,
                    category_id: CATEGORY,
                    total_score: total,
                },
                details,
            )
            .unwrap();
    }

    #[test_context(EngineTestContext)]
    #[test]
    fn test_weighted_mean_across_votes(ctx: &mut EngineTestContext) {
        let _ = ctx;
        let period_id = Periods::new().unwrap().create("Triwulan I", 2025).unwrap();
        let criteria = seed_criteria();
        let budi = seed_employee("1001", "Budi Santoso");
        let siti = seed_employee("1002", "Siti Aminah");

        // Budi: means [70, 60, 50] -> 35 + 18 + 10 = 63.
        cast_vote(period_id, 1, budi, &[(criteria[0], 80.0), (criteria[1], 70.0), (criteria[2], 60.0)]);
        cast_vote(period_id, 2, budi, &[(criteria[0], 60.0), (criteria[1], 50.0), (criteria[2], 40.0)]);
        // Siti: single vote of 90s -> 90.
        cast_vote(period_id, 1, siti, &[(criteria[0], 90.0), (criteria[1], 90.0), (criteria[2], 90.0)]);

        let count = calculate_scores(period_id, CATEGORY).unwrap();
        assert_eq!(count, 2);

        let ranked = Scores::new().unwrap().ranked(period_id, CATEGORY).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].nip, "1002");
        assert_eq!(ranked[0].score.weighted_score, 90.0);
        assert_eq!(ranked[0].score.rank, Some(1));
        assert!(ranked[0].score.is_winner);
        assert_eq!(ranked[1].nip, "1001");
        assert_eq!(ranked[1].score.weighted_score, 63.0);
        assert_eq!(ranked[1].score.rank, Some(2));
        assert!(!ranked[1].score.is_winner);
    }

    #[test_context(EngineTestContext)]
    #[test]
    fn test_missing_detail_counts_as_zero(ctx: &mut EngineTestContext) {
        let _ = ctx;
        let period_id = Periods::new().unwrap().create("Triwulan I", 2025).unwrap();
        let criteria = seed_criteria();
        let budi = seed_employee("1001", "Budi Santoso");

        // No entry for the third criterion: its mean is zero.
        cast_vote(period_id, 1, budi, &[(criteria[0], 100.0), (criteria[1], 100.0)]);

        calculate_scores(period_id, CATEGORY).unwrap();
        let ranked = Scores::new().unwrap().ranked(period_id, CATEGORY).unwrap();
        assert_eq!(ranked[0].score.weighted_score, 80.0);
    }

    #[test_context(EngineTestContext)]
    #[test]
    fn test_unvoted_employee_stays_unscored(ctx: &mut EngineTestContext) {
        let _ = ctx;
        let period_id = Periods::new().unwrap().create("Triwulan I", 2025).unwrap();
        let criteria = seed_criteria();
        let budi = seed_employee("1001", "Budi Santoso");
        seed_employee("1002", "Siti Aminah");

        cast_vote(period_id, 1, budi, &[(criteria[0], 80.0), (criteria[1], 80.0), (criteria[2], 80.0)]);

        let count = calculate_scores(period_id, CATEGORY).unwrap();
        assert_eq!(count, 1);
        assert_eq!(Scores::new().unwrap().ranked(period_id, CATEGORY).unwrap().len(), 1);
    }

    #[test_context(EngineTestContext)]
    #[test]
    fn test_top_tie_has_single_winner(ctx: &mut EngineTestContext) {
        let _ = ctx;
        let period_id = Periods::new().unwrap().create("Triwulan I", 2025).unwrap();
        let criteria = seed_criteria();
        let budi = seed_employee("1001", "Budi Santoso");
        let siti = seed_employee("1002", "Siti Aminah");

        let same = [(criteria[0], 90.0), (criteria[1], 90.0), (criteria[2], 90.0)];
        cast_vote(period_id, 1, budi, &same);
        cast_vote(period_id, 1, siti, &same);

        calculate_scores(period_id, CATEGORY).unwrap();
        let ranked = Scores::new().unwrap().ranked(period_id, CATEGORY).unwrap();
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.score.rank == Some(1)));
        // The tie is broken for the winner flag by the lower employee id.
        let winners: Vec<&str> = ranked.iter().filter(|r| r.score.is_winner).map(|r| r.nip.as_str()).collect();
        assert_eq!(winners, vec!["1001"]);
    }

    #[test_context(EngineTestContext)]
    #[test]
    fn test_recalculation_is_idempotent(ctx: &mut EngineTestContext) {
        let _ = ctx;
        let period_id = Periods::new().unwrap().create("Triwulan I", 2025).unwrap();
        let criteria = seed_criteria();
        let budi = seed_employee("1001", "Budi Santoso");
        cast_vote(period_id, 1, budi, &[(criteria[0], 80.0), (criteria[1], 80.0), (criteria[2], 80.0)]);

        calculate_scores(period_id, CATEGORY).unwrap();
        let count = recalculate_scores(period_id).unwrap();
        assert_eq!(count, 1);

        let ranked = Scores::new().unwrap().ranked(period_id, CATEGORY).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score.weighted_score, 80.0);
        assert!(ranked[0].score.is_winner);
    }

    #[test_context(EngineTestContext)]
    #[test]
    fn test_breakdown_json_is_persisted(ctx: &mut EngineTestContext) {
        let _ = ctx;
        let period_id = Periods::new().unwrap().create("Triwulan I", 2025).unwrap();
        let criteria = seed_criteria();
        let budi = seed_employee("1001", "Budi Santoso");
        cast_vote(period_id, 1, budi, &[(criteria[0], 80.0), (criteria[1], 70.0), (criteria[2], 60.0)]);

        calculate_scores(period_id, CATEGORY).unwrap();
        let ranked = Scores::new().unwrap().ranked(period_id, CATEGORY).unwrap();
        let breakdown = ranked[0].score.breakdown.as_deref().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(breakdown).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["average"], 80.0);
        assert_eq!(entries[0]["weighted"], 40.0);
    }
}
