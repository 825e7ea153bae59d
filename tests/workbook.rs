#[cfg(test)]
mod tests {
    use calamine::{Data, Range};
    use rust_xlsxwriter::Workbook;
    use sidik::libs::workbook::{parse_early_arrivals, parse_numeric_text, parse_weight, AttendanceSheet};
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Writes a minimal but structurally faithful attendance workbook.
    fn write_attendance_workbook(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("attendance.xlsx");
        let mut book = Workbook::new();
        let sheet = book.add_worksheet();

        sheet.write_string(5, 0, "Total Hari Kerja").unwrap();
        sheet.write_number(5, 2, 22.0).unwrap();

        // Label / code / weight header triple (rows 9-11 on the sheet).
        sheet.write_string(8, 4, "Datang Tepat").unwrap();
        sheet.write_string(8, 11, "Pulang Tepat").unwrap();
        sheet.write_string(8, 5, "Terlambat 1-30 menit").unwrap();
        sheet.write_string(8, 6, "Cuti Sakit").unwrap();
        sheet.write_string(8, 12, "Izin").unwrap();
        sheet.write_string(9, 5, "TL1").unwrap();
        sheet.write_string(9, 6, "CS1").unwrap();
        sheet.write_string(9, 12, "I").unwrap();
        sheet.write_string(10, 5, "5%").unwrap();
        sheet.write_string(10, 6, "-").unwrap();
        sheet.write_number(10, 12, 0.0).unwrap();

        // Employee rows start on sheet row 12.
        sheet.write_number(11, 0, 1.0).unwrap();
        sheet.write_string(11, 1, "Budi Santoso").unwrap();
        sheet.write_string(11, 2, "197001011990031001").unwrap();
        sheet.write_string(11, 3, "Panitera").unwrap();
        sheet.write_number(11, 4, 20.0).unwrap();
        sheet.write_number(11, 11, 20.0).unwrap();
        sheet.write_number(11, 5, 2.0).unwrap();
        sheet.write_string(11, 6, "-").unwrap();

        sheet.write_number(12, 0, 2.0).unwrap();
        sheet.write_string(12, 1, "Siti Aminah").unwrap();
        sheet.write_number(12, 2, 12345.0).unwrap();
        sheet.write_string(12, 3, "Sekretaris").unwrap();
        sheet.write_number(12, 4, 22.0).unwrap();
        sheet.write_number(12, 11, 22.0).unwrap();
        sheet.write_string(12, 5, "1,5").unwrap();
        sheet.write_number(12, 12, 1.0).unwrap();

        // Footer without a row marker must not become an employee.
        sheet.write_string(14, 1, "Mengetahui, Ketua Pengadilan").unwrap();

        book.save(&path).unwrap();
        path
    }

    #[test]
    fn test_numeric_parsing_policy() {
        assert_eq!(parse_numeric_text("1,5"), 1.5);
        assert_eq!(parse_numeric_text("-"), 0.0);
        assert_eq!(parse_numeric_text(""), 0.0);
        assert_eq!(parse_numeric_text("3"), 3.0);
        assert_eq!(parse_numeric_text("  2.25 "), 2.25);
        assert_eq!(parse_numeric_text("abc"), 0.0);
        assert_eq!(parse_numeric_text("sakit 3 hari"), 3.0);
    }

    #[test]
    fn test_weight_parsing_strips_percent() {
        assert_eq!(parse_weight(&Data::String("85%".to_string())), 85.0);
        assert_eq!(parse_weight(&Data::String("2,5%".to_string())), 2.5);
        assert_eq!(parse_weight(&Data::Float(5.0)), 5.0);
        assert_eq!(parse_weight(&Data::Empty), 0.0);
    }

    #[test]
    fn test_load_attendance_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_attendance_workbook(&dir);

        let sheet = AttendanceSheet::load(&path).unwrap();
        assert_eq!(sheet.total_work_days, 22);
        assert_eq!(sheet.rows.len(), 2);

        let weights = sheet.weights();
        assert_eq!(weights.get("tl1"), Some(&5.0));

        let budi = &sheet.rows[0];
        assert_eq!(budi.nip, "197001011990031001");
        assert_eq!(budi.nama, "Budi Santoso");
        assert_eq!(budi.jabatan, "Panitera");
        assert_eq!(budi.present_on_time, 20);
        assert_eq!(budi.leave_on_time, 20);
        assert_eq!(budi.attendance.get("tl1"), Some(&2.0));
        assert_eq!(budi.attendance.get("cs1"), Some(&0.0));
        // The fixed E/L columns never leak into the coded map.
        assert!(!budi.attendance.keys().any(|code| code.is_empty()));

        let siti = &sheet.rows[1];
        // Numeric NIP cells come back without a fractional part.
        assert_eq!(siti.nip, "12345");
        assert_eq!(siti.attendance.get("tl1"), Some(&1.5));
        assert_eq!(siti.attendance.get("i"), Some(&1.0));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendance.csv");
        std::fs::write(&path, "x").unwrap();
        assert!(AttendanceSheet::load(&path).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(AttendanceSheet::load(std::path::Path::new("/nonexistent/a.xlsx")).is_err());
    }

    #[test]
    fn test_malformed_sheet_degrades_to_defaults() {
        let mut range: Range<Data> = Range::new((0, 0), (3, 3));
        range.set_value((0, 0), Data::String("random".to_string()));
        let sheet = AttendanceSheet::from_range(&range);
        assert_eq!(sheet.total_work_days, 0);
        assert!(sheet.rows.is_empty());
    }

    #[test]
    fn test_early_arrival_sections() {
        let mut range: Range<Data> = Range::new((0, 0), (10, 4));
        range.set_value((0, 0), Data::String("NIP".to_string()));
        range.set_value((0, 1), Data::String("197001011990031001".to_string()));
        range.set_value((1, 3), Data::String("07:30".to_string()));
        range.set_value((2, 3), Data::String("08:15".to_string()));
        range.set_value((3, 3), Data::String("06:45".to_string()));
        range.set_value((4, 0), Data::String("Jumlah".to_string()));

        // Second section, NIP value pushed to column C.
        range.set_value((5, 0), Data::String("NIP".to_string()));
        range.set_value((5, 2), Data::String("12345".to_string()));
        range.set_value((6, 3), Data::Float(0.25)); // 06:00 as a day fraction
        range.set_value((7, 0), Data::String("Jumlah".to_string()));

        let counts = parse_early_arrivals(&range);
        assert_eq!(counts.get("197001011990031001"), Some(&2));
        assert_eq!(counts.get("12345"), Some(&1));
    }
}
