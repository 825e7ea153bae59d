//! Annual report batch job.
//!
//! Re-parses a full year of monthly attendance workbooks straight from disk
//! (nothing is read from or written to the database except employee identity
//! for TMT/PPPK lookup) and writes one consolidated spreadsheet: a summary
//! sheet with per-employee averages plus one sheet per employee holding the
//! 12 monthly rows. Score cells are live formulas so the arithmetic can be
//! audited in the spreadsheet itself; the constants in the formula text must
//! stay in lockstep with the score calculator.

use crate::db::employees::{Employee, Employees};
use crate::libs::messages::Message;
use crate::libs::score::{round2, DisciplineBreakdown};
use crate::libs::stats::AttendanceStats;
use crate::libs::workbook::{self, AttendanceSheet};
use crate::{msg_bail_anyhow, msg_info, msg_warning};
use anyhow::Result;
use chrono::Datelike;
use rust_xlsxwriter::{Format, Formula, Workbook};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Month names as they appear in the monthly workbook file names.
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// One month of parsed figures for one employee.
#[derive(Debug, Clone)]
struct MonthFigures {
    stats: AttendanceStats,
    breakdown: DisciplineBreakdown,
    early_arrivals: i64,
}

/// A year of figures for one employee, keyed into the `months` array by
/// zero-based month index.
#[derive(Debug, Clone, Default)]
struct EmployeeYear {
    nama: String,
    jabatan: String,
    months: Vec<Option<MonthFigures>>,
}

pub struct AnnualExporter {
    year: i32,
    source_dir: PathBuf,
    output_path: PathBuf,
    file_prefix: String,
}

impl AnnualExporter {
    pub fn new(year: i32, source_dir: PathBuf, output_path: PathBuf, file_prefix: String) -> Self {
        Self {
            year,
            source_dir,
            output_path,
            file_prefix,
        }
    }

    /// Runs the whole job. Returns the output path on success.
    pub fn export(&self) -> Result<PathBuf> {
        msg_info!(Message::AnnualExportStarting(self.year));

        let mut per_employee: BTreeMap<String, EmployeeYear> = BTreeMap::new();

        for month in 1..=12u32 {
            let sheet = match self.load_month(month)? {
                Some(sheet) => sheet,
                None => {
                    msg_warning!(Message::AnnualMonthMissing(month, self.year));
                    continue;
                }
            };
            let early = self.load_month_early_arrivals(month);
            let weights = sheet.weights();

            for row in &sheet.rows {
                let stats = AttendanceStats::compute(
                    &row.attendance,
                    &weights,
                    sheet.total_work_days,
                    row.present_on_time,
                    row.leave_on_time,
                );
                let breakdown = DisciplineBreakdown::from_stats(&stats);
                let entry = per_employee.entry(row.nip.clone()).or_insert_with(|| EmployeeYear {
                    nama: row.nama.clone(),
                    jabatan: row.jabatan.clone(),
                    months: vec![None; 12],
                });
                entry.months[(month - 1) as usize] = Some(MonthFigures {
                    stats,
                    breakdown,
                    early_arrivals: early.get(&row.nip).copied().unwrap_or(0),
                });
            }
        }

        if per_employee.is_empty() {
            msg_bail_anyhow!(Message::AnnualNoData(self.year));
        }

        let identities = self.load_identities()?;
        self.write_report(&per_employee, &identities)?;

        msg_info!(Message::AnnualExportCompleted(self.output_path.display().to_string()));
        Ok(self.output_path.clone())
    }

    /// Opens the primary workbook for one month, if the file exists.
    fn load_month(&self, month: u32) -> Result<Option<AttendanceSheet>> {
        let name = format!("{}_{}_{}.xlsx", self.file_prefix, MONTH_NAMES[(month - 1) as usize], self.year);
        let path = self.source_dir.join(&name);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(AttendanceSheet::load(&path)?))
    }

    /// Finds the legacy `.xls` supplement for one month by a looser match:
    /// any `.xls` whose stem mentions both the month name and the year.
    /// Absent or unreadable supplements simply contribute zero counts.
    fn load_month_early_arrivals(&self, month: u32) -> HashMap<String, i64> {
        match self.find_early_arrival_file(month) {
            Some(path) => workbook::load_early_arrivals(&path).unwrap_or_default(),
            None => HashMap::new(),
        }
    }

    fn find_early_arrival_file(&self, month: u32) -> Option<PathBuf> {
        let month_name = MONTH_NAMES[(month - 1) as usize].to_lowercase();
        let year = self.year.to_string();
        let entries = std::fs::read_dir(&self.source_dir).ok()?;
        for entry in entries.flatten() {
            let path = entry.path();
            let is_xls = path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("xls"));
            if !is_xls {
                continue;
            }
            let stem = path.file_stem().map(|s| s.to_string_lossy().to_lowercase()).unwrap_or_default();
            if stem.contains(&month_name) && stem.contains(&year) {
                return Some(path);
            }
        }
        None
    }

    /// TMT and PPPK flags for every known NIP.
    fn load_identities(&self) -> Result<HashMap<String, Employee>> {
        let employees = Employees::new()?.list()?;
        Ok(employees.into_iter().map(|e| (e.nip.clone(), e)).collect())
    }

    /// PPPK staff appointed within the export year are only evaluated from
    /// their TMT month; everyone else from January.
    fn start_month(&self, identity: Option<&Employee>) -> u32 {
        match identity {
            Some(employee) if employee.is_pppk => match employee.tmt {
                Some(tmt) if tmt.year() == self.year => tmt.month(),
                _ => 1,
            },
            _ => 1,
        }
    }

    fn write_report(&self, per_employee: &BTreeMap<String, EmployeeYear>, identities: &HashMap<String, Employee>) -> Result<()> {
        let mut book = Workbook::new();
        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);
        let title_format = Format::new().set_bold().set_font_size(14.0);

        self.write_summary_sheet(&mut book, per_employee, identities, &header_format, &title_format)?;

        let mut used_names: HashMap<String, usize> = HashMap::new();
        for (nip, year_data) in per_employee {
            let identity = identities.get(nip);
            let start_month = self.start_month(identity);
            let sheet_name = unique_sheet_name(&year_data.nama, nip, &mut used_names);
            self.write_employee_sheet(&mut book, &sheet_name, nip, year_data, start_month, &header_format, &title_format)?;
        }

        book.save(&self.output_path)?;
        Ok(())
    }

    fn write_summary_sheet(
        &self,
        book: &mut Workbook,
        per_employee: &BTreeMap<String, EmployeeYear>,
        identities: &HashMap<String, Employee>,
        header_format: &Format,
        title_format: &Format,
    ) -> Result<()> {
        let sheet = book.add_worksheet().set_name("Rekap")?;
        sheet.write_string_with_format(0, 0, &format!("Rekapitulasi Disiplin Pegawai {}", self.year), title_format)?;

        let headers = [
            "No",
            "Nama",
            "NIP",
            "Jabatan",
            "TMT",
            "PPPK",
            "Bulan Awal",
            "Bulan Dinilai",
            "Rata-rata Nilai 1",
            "Rata-rata Nilai 2",
            "Rata-rata Nilai 3",
            "Rata-rata Akhir",
        ];
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string_with_format(2, col as u16, *header, header_format)?;
        }

        for (index, (nip, year_data)) in per_employee.iter().enumerate() {
            let row = index as u32 + 3;
            let identity = identities.get(nip);
            let start_month = self.start_month(identity);

            // Average over the months actually evaluated, not over 12.
            let evaluated: Vec<&MonthFigures> = year_data
                .months
                .iter()
                .enumerate()
                .filter(|(i, _)| *i as u32 + 1 >= start_month)
                .filter_map(|(_, m)| m.as_ref())
                .collect();
            let count = evaluated.len();
            let avg = |f: fn(&MonthFigures) -> f64| {
                if count == 0 {
                    0.0
                } else {
                    round2(evaluated.iter().map(|m| f(m)).sum::<f64>() / count as f64)
                }
            };

            sheet.write_number(row, 0, (index + 1) as f64)?;
            sheet.write_string(row, 1, &year_data.nama)?;
            sheet.write_string(row, 2, nip)?;
            sheet.write_string(row, 3, &year_data.jabatan)?;
            let tmt = identity
                .and_then(|e| e.tmt)
                .map(|d| d.format("%d-%m-%Y").to_string())
                .unwrap_or_default();
            sheet.write_string(row, 4, &tmt)?;
            sheet.write_string(row, 5, if identity.map_or(false, |e| e.is_pppk) { "Ya" } else { "Tidak" })?;
            sheet.write_string(row, 6, MONTH_NAMES[(start_month - 1) as usize])?;
            sheet.write_number(row, 7, count as f64)?;
            sheet.write_number(row, 8, avg(|m| m.breakdown.score1))?;
            sheet.write_number(row, 9, avg(|m| m.breakdown.score2))?;
            sheet.write_number(row, 10, avg(|m| m.breakdown.score3))?;
            sheet.write_number(row, 11, avg(|m| m.breakdown.final_score()))?;
        }

        sheet.autofit();
        Ok(())
    }

    fn write_employee_sheet(
        &self,
        book: &mut Workbook,
        sheet_name: &str,
        nip: &str,
        year_data: &EmployeeYear,
        start_month: u32,
        header_format: &Format,
        title_format: &Format,
    ) -> Result<()> {
        let sheet = book.add_worksheet().set_name(sheet_name)?;
        sheet.write_string_with_format(0, 0, &year_data.nama, title_format)?;
        sheet.write_string(1, 0, &format!("NIP: {}  Jabatan: {}", nip, year_data.jabatan))?;

        let headers = [
            "Bulan",
            "Hari Kerja",
            "Dikecualikan",
            "Hari Efektif",
            "Datang Tepat",
            "Pulang Tepat",
            "Penalti Terlambat",
            "Penalti Pulang Awal",
            "Izin Berlebih",
            "Nilai 1",
            "Nilai 2",
            "Nilai 3",
            "Nilai Akhir",
            "Datang < 08:00",
        ];
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string_with_format(3, col as u16, *header, header_format)?;
        }

        for month in 1..=12u32 {
            let row = month + 3;
            sheet.write_string(row, 0, MONTH_NAMES[(month - 1) as usize])?;

            if month < start_month {
                continue;
            }
            let figures = match &year_data.months[(month - 1) as usize] {
                Some(figures) => figures,
                None => continue,
            };

            let stats = &figures.stats;
            sheet.write_number(row, 1, stats.total_work_days as f64)?;
            sheet.write_number(row, 2, stats.excused_days as f64)?;
            sheet.write_number(row, 3, stats.effective_days as f64)?;
            sheet.write_number(row, 4, stats.present_on_time as f64)?;
            sheet.write_number(row, 5, stats.leave_on_time as f64)?;
            sheet.write_number(row, 6, stats.late_penalty)?;
            sheet.write_number(row, 7, stats.early_penalty)?;
            sheet.write_number(row, 8, stats.excess_permission_count as f64)?;

            // Live formulas mirroring the score calculator. The spreadsheet
            // row number is one past the zero-based `row` index.
            let r = row + 1;
            sheet.write_formula(row, 9, Formula::new(format!("=IF(D{r}=0,0,ROUND(((E{r}+F{r})/(D{r}*2))*50,2))")))?;
            sheet.write_formula(row, 10, Formula::new(format!("=ROUND(MAX(0,(100-(G{r}+H{r}))*0.35),2)")))?;
            sheet.write_formula(row, 11, Formula::new(format!("=IF(I{r}=0,15,0)")))?;
            sheet.write_formula(row, 12, Formula::new(format!("=ROUND(J{r}+K{r}+L{r},2)")))?;
            sheet.write_number(row, 13, figures.early_arrivals as f64)?;
        }

        sheet.autofit();
        Ok(())
    }
}

/// Excel sheet names are capped at 31 characters and reject a handful of
/// punctuation; duplicates get a numeric suffix.
fn unique_sheet_name(nama: &str, nip: &str, used: &mut HashMap<String, usize>) -> String {
    let base: String = nama
        .chars()
        .map(|c| if matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\' | '\'') { ' ' } else { c })
        .collect();
    let base = base.trim().to_string();
    let base = if base.is_empty() { nip.to_string() } else { base };
    let base: String = base.chars().take(28).collect();

    let count = used.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        base
    } else {
        format!("{} {}", base, count)
    }
}
