#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_xlsxwriter::Workbook;
    use sidik::db::discipline_scores::DisciplineScores;
    use sidik::db::employees::{Employee, Employees};
    use sidik::libs::import::import_workbook;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ImportTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ImportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ImportTestContext { temp_dir }
        }
    }

    /// Two employees: one with two first-tier lates, one spotless.
    fn write_workbook(ctx: &ImportTestContext) -> PathBuf {
        let path = ctx.temp_dir.path().join("attendance.xlsx");
        let mut book = Workbook::new();
        let sheet = book.add_worksheet();

        sheet.write_string(5, 0, "TOTAL HARI KERJA").unwrap();
        sheet.write_number(5, 2, 22.0).unwrap();

        sheet.write_string(9, 5, "tl1").unwrap();
        sheet.write_string(10, 5, "5").unwrap();

        sheet.write_number(11, 0, 1.0).unwrap();
        sheet.write_string(11, 1, "Budi Santoso").unwrap();
        sheet.write_string(11, 2, "1001").unwrap();
        sheet.write_string(11, 3, "Panitera").unwrap();
        sheet.write_number(11, 4, 20.0).unwrap();
        sheet.write_number(11, 11, 20.0).unwrap();
        sheet.write_number(11, 5, 2.0).unwrap();

        sheet.write_number(12, 0, 2.0).unwrap();
        sheet.write_string(12, 1, "Siti Aminah").unwrap();
        sheet.write_string(12, 2, "1002").unwrap();
        sheet.write_string(12, 3, "Sekretaris").unwrap();
        sheet.write_number(12, 4, 22.0).unwrap();
        sheet.write_number(12, 11, 22.0).unwrap();

        book.save(&path).unwrap();
        path
    }

    #[test_context(ImportTestContext)]
    #[test]
    fn test_import_persists_scores_and_ranks(ctx: &mut ImportTestContext) {
        let path = write_workbook(ctx);
        let outcome = import_workbook(&path, 3, 2025, None).unwrap();
        assert_eq!(outcome.success, 2);
        assert_eq!(outcome.failed, 0);
        assert!(outcome.errors.is_empty());

        let scores = DisciplineScores::new().unwrap().fetch_month(3, 2025).unwrap();
        assert_eq!(scores.len(), 2);

        // Ordered by final score descending: the spotless employee first.
        assert_eq!(scores[0].final_score, 100.0);
        assert_eq!(scores[0].rank, Some(1));
        assert_eq!(scores[1].final_score, 91.95);
        assert_eq!(scores[1].rank, Some(2));
        assert_eq!(scores[1].score_1, 45.45);
        assert_eq!(scores[1].score_2, 31.50);
        assert_eq!(scores[1].score_3, 15.0);
        assert_eq!(scores[1].late_minutes, 10.0);
        assert!(scores[1].raw_data.is_some());
    }

    #[test_context(ImportTestContext)]
    #[test]
    fn test_import_creates_employees_by_nip(ctx: &mut ImportTestContext) {
        let path = write_workbook(ctx);
        import_workbook(&path, 3, 2025, None).unwrap();

        let mut employees = Employees::new().unwrap();
        let budi = employees.get_by_nip("1001").unwrap().unwrap();
        assert_eq!(budi.name, "Budi Santoso");
        assert_eq!(budi.position.as_deref(), Some("Panitera"));
        assert!(employees.get_by_nip("1002").unwrap().is_some());
    }

    #[test_context(ImportTestContext)]
    #[test]
    fn test_reimport_is_idempotent(ctx: &mut ImportTestContext) {
        let path = write_workbook(ctx);
        import_workbook(&path, 3, 2025, None).unwrap();
        let first = DisciplineScores::new().unwrap().fetch_month(3, 2025).unwrap();

        import_workbook(&path, 3, 2025, None).unwrap();
        let second = DisciplineScores::new().unwrap().fetch_month(3, 2025).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.employee_id, b.employee_id);
            assert_eq!(a.final_score, b.final_score);
            assert_eq!(a.rank, b.rank);
        }
    }

    #[test]
    fn test_employee_json_round_trip_keeps_tmt() {
        let employee = Employee {
            id: Some(1),
            nip: "1001".to_string(),
            name: "Budi Santoso".to_string(),
            position: Some("Panitera".to_string()),
            tmt: NaiveDate::from_ymd_opt(2024, 5, 1),
            is_pppk: true,
        };

        let json = serde_json::to_string(&employee).unwrap();
        assert!(json.contains("2024-05-01"));

        let back: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tmt, employee.tmt);
        assert_eq!(back.nip, employee.nip);
        assert!(back.is_pppk);
    }

    #[test_context(ImportTestContext)]
    #[test]
    fn test_import_separate_months_coexist(ctx: &mut ImportTestContext) {
        let path = write_workbook(ctx);
        import_workbook(&path, 3, 2025, None).unwrap();
        import_workbook(&path, 4, 2025, None).unwrap();

        let mut db = DisciplineScores::new().unwrap();
        assert_eq!(db.fetch_month(3, 2025).unwrap().len(), 2);
        assert_eq!(db.fetch_month(4, 2025).unwrap().len(), 2);
    }
}
