//! SIKEP attendance workbook extraction.
//!
//! The monthly attendance sheets are produced by hand in the court office and
//! follow a loose but stable layout: a "TOTAL HARI KERJA" figure somewhere in
//! the first ten rows, a label/code/weight header triple in rows 9-11, and
//! employee tallies from row 12 down. Cells are frequently sloppy ("-" for
//! zero, comma decimals, stray "%" suffixes), so every numeric read degrades
//! to a default instead of failing. Only opening the file itself can error;
//! a malformed sheet yields zeroed data, never an abort.

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

/// Label cell that pairs with the sheet-wide work day count in column C.
const TOTAL_WORK_DAYS_LABEL: &str = "TOTAL HARI KERJA";
/// The label is only searched within this many rows of column A.
const HEADER_SCAN_ROWS: u32 = 10;

/// Fixed layout rows, zero-based: human labels, attendance codes, weights.
const LABEL_ROW: u32 = 8;
const CODE_ROW: u32 = 9;
const WEIGHT_ROW: u32 = 10;
/// First employee data row (sheet row 12).
const DATA_START_ROW: u32 = 11;

/// Fixed identity and tally columns, zero-based.
const COL_ROW_MARKER: u32 = 0;
const COL_NAME: u32 = 1;
const COL_NIP: u32 = 2;
const COL_POSITION: u32 = 3;
const COL_PRESENT_ON_TIME: u32 = 4; // column E
const COL_LEAVE_ON_TIME: u32 = 11; // column L

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("workbook not found: {0}")]
    FileNotFound(String),
    #[error("unsupported workbook format: {0}")]
    UnsupportedFormat(String),
    #[error("workbook has no sheets: {0}")]
    NoSheets(String),
    #[error("failed to read workbook: {0}")]
    Read(String),
}

/// Metadata for one attendance column, keyed by sheet position.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceColumnMeta {
    /// Short attendance-category token, lowercased (e.g. "tl1", "cs1").
    pub code: String,
    /// Human-readable column label from the sheet.
    pub label: String,
    /// Penalty or percentage weight attached to the code.
    pub weight: f64,
}

/// One employee's raw tallies for one month, straight off the sheet.
#[derive(Debug, Clone)]
pub struct EmployeeAttendanceRow {
    pub nip: String,
    pub nama: String,
    pub jabatan: String,
    pub present_on_time: i64,
    pub leave_on_time: i64,
    /// Tallies per attendance code. The fixed E/L columns are kept out of
    /// this map so they are never double counted as coded categories.
    pub attendance: HashMap<String, f64>,
}

/// Parsed contents of one monthly attendance sheet.
#[derive(Debug, Clone, Default)]
pub struct AttendanceSheet {
    pub total_work_days: i64,
    /// Column metadata keyed by zero-based column position.
    pub columns: BTreeMap<u32, AttendanceColumnMeta>,
    pub rows: Vec<EmployeeAttendanceRow>,
}

impl AttendanceSheet {
    /// Opens a workbook and parses its first sheet.
    pub fn load(path: &Path) -> Result<Self, WorkbookError> {
        if !path.exists() {
            return Err(WorkbookError::FileNotFound(path.display().to_string()));
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_lowercase();
        if ext != "xlsx" && ext != "xls" && ext != "xlsm" {
            return Err(WorkbookError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path).map_err(|e| WorkbookError::Read(e.to_string()))?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| WorkbookError::NoSheets(path.display().to_string()))?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| WorkbookError::Read(e.to_string()))?;

        Ok(Self::from_range(&range))
    }

    /// Parses an in-memory cell range. Structural defects (missing label,
    /// no numeric row markers) produce zeroed fields rather than errors.
    pub fn from_range(range: &Range<Data>) -> Self {
        let (max_row, max_col) = range.end().unwrap_or((0, 0));

        let mut sheet = AttendanceSheet {
            total_work_days: find_total_work_days(range, max_row),
            ..Default::default()
        };

        // Column metadata spans every populated column; a column is kept if
        // at least one of label, code or weight is present.
        for col in 0..=max_col {
            let label = cell_text(range, LABEL_ROW, col);
            let code = cell_text(range, CODE_ROW, col).to_lowercase();
            let weight_cell = range.get_value((WEIGHT_ROW, col));
            let has_weight = !matches!(weight_cell, None | Some(Data::Empty));
            if label.is_empty() && code.is_empty() && !has_weight {
                continue;
            }
            let weight = weight_cell.map(parse_weight).unwrap_or(0.0);
            sheet.columns.insert(col, AttendanceColumnMeta { code, label, weight });
        }

        // The data region ends at the last row whose column A still holds a
        // numeric row marker, which tolerates trailing footer and blank rows.
        let mut last_data_row = None;
        for row in DATA_START_ROW..=max_row.max(DATA_START_ROW) {
            if is_row_marker(range.get_value((row, COL_ROW_MARKER))) {
                last_data_row = Some(row);
            }
        }

        let Some(last_data_row) = last_data_row else {
            return sheet;
        };

        for row in DATA_START_ROW..=last_data_row {
            let nama = cell_text(range, row, COL_NAME);
            let nip = cell_text(range, row, COL_NIP);
            if nama.is_empty() && nip.is_empty() {
                continue;
            }

            let mut attendance: HashMap<String, f64> = HashMap::new();
            for (&col, meta) in &sheet.columns {
                if meta.code.is_empty() || is_fixed_column(col) {
                    continue;
                }
                let tally = cell_number(range, row, col);
                *attendance.entry(meta.code.clone()).or_insert(0.0) += tally;
            }

            sheet.rows.push(EmployeeAttendanceRow {
                nip,
                nama,
                jabatan: cell_text(range, row, COL_POSITION),
                present_on_time: cell_number(range, row, COL_PRESENT_ON_TIME) as i64,
                leave_on_time: cell_number(range, row, COL_LEAVE_ON_TIME) as i64,
                attendance,
            });
        }

        sheet
    }

    /// Per-code penalty weights, for the statistics calculator.
    pub fn weights(&self) -> HashMap<String, f64> {
        self.columns
            .values()
            .filter(|meta| !meta.code.is_empty())
            .map(|meta| (meta.code.clone(), meta.weight))
            .collect()
    }
}

fn find_total_work_days(range: &Range<Data>, max_row: u32) -> i64 {
    for row in 0..=max_row.min(HEADER_SCAN_ROWS) {
        let label = cell_text(range, row, COL_ROW_MARKER).to_uppercase();
        if label.contains(TOTAL_WORK_DAYS_LABEL) {
            return cell_number(range, row, COL_NIP) as i64;
        }
    }
    0
}

/// Identity columns plus the fixed E/L tallies are excluded from the
/// generic per-code attendance map.
fn is_fixed_column(col: u32) -> bool {
    matches!(
        col,
        COL_ROW_MARKER | COL_NAME | COL_NIP | COL_POSITION | COL_PRESENT_ON_TIME | COL_LEAVE_ON_TIME
    )
}

/// A data row is recognized by a numeric sequence number in column A.
fn is_row_marker(cell: Option<&Data>) -> bool {
    match cell {
        Some(Data::Float(_)) | Some(Data::Int(_)) => true,
        Some(Data::String(s)) => s.trim().parse::<f64>().is_ok(),
        _ => false,
    }
}

/// Text content of a cell, trimmed; numeric cells render without a spurious
/// fractional part so NIP columns survive being typed as numbers.
pub fn cell_text(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) if f.fract() == 0.0 => format!("{:.0}", f),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// Numeric content of a cell under the lenient parsing policy.
pub fn cell_number(range: &Range<Data>, row: u32, col: u32) -> f64 {
    range.get_value((row, col)).map(parse_numeric).unwrap_or(0.0)
}

/// Lenient numeric cell parsing: native numbers pass through, everything
/// else goes through the text policy.
pub fn parse_numeric(cell: &Data) -> f64 {
    match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::Empty => 0.0,
        Data::String(s) => parse_numeric_text(s),
        other => parse_numeric_text(&other.to_string()),
    }
}

/// Numeric parsing policy for text cells: `-` or empty means zero, comma is
/// accepted as a decimal separator, junk characters are stripped, and as a
/// last resort the first embedded number wins. Never fails.
pub fn parse_numeric_text(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return 0.0;
    }
    let normalized = trimmed.replace(',', ".");

    let mut filtered = String::new();
    for (i, ch) in normalized.char_indices() {
        if ch.is_ascii_digit() || ch == '.' || (ch == '-' && i == 0) {
            filtered.push(ch);
        }
    }
    if let Ok(value) = filtered.parse::<f64>() {
        return value;
    }

    first_number(&normalized).unwrap_or(0.0)
}

/// Weight cells additionally tolerate a trailing percent sign.
pub fn parse_weight(cell: &Data) -> f64 {
    match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::Empty => 0.0,
        other => parse_numeric_text(other.to_string().trim().trim_end_matches('%')),
    }
}

/// First `-?digits[.digits]` substring of `text`, if any.
fn first_number(text: &str) -> Option<f64> {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let digit_start = chars[i].is_ascii_digit()
            || (chars[i] == '-' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit());
        if digit_start {
            let start = i;
            if chars[i] == '-' {
                i += 1;
            }
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let token: String = chars[start..i].iter().collect();
            return token.parse().ok();
        }
        i += 1;
    }
    None
}

/// Parses an early-arrival supplement sheet (legacy `.xls` shape): sections
/// are delimited by `NIP` / `Jumlah` markers in column A, each data row
/// carries a scan time in column D. Returns per-NIP counts of scans strictly
/// before 08:00.
pub fn parse_early_arrivals(range: &Range<Data>) -> HashMap<String, i64> {
    let (max_row, _) = range.end().unwrap_or((0, 0));
    let mut counts: HashMap<String, i64> = HashMap::new();
    let mut current_nip: Option<String> = None;

    for row in 0..=max_row {
        let marker = cell_text(range, row, 0).to_lowercase();
        match marker.as_str() {
            "nip" => {
                let mut nip = cell_text(range, row, 1);
                if nip.is_empty() {
                    nip = cell_text(range, row, 2);
                }
                current_nip = (!nip.is_empty()).then(|| {
                    counts.entry(nip.clone()).or_insert(0);
                    nip
                });
                continue;
            }
            "jumlah" => {
                current_nip = None;
                continue;
            }
            _ => {}
        }

        let Some(nip) = &current_nip else { continue };
        if let Some(hour) = cell_time_hours(range.get_value((row, 3))) {
            if hour > 0.0 && hour < 8.0 {
                *counts.entry(nip.clone()).or_insert(0) += 1;
            }
        }
    }

    counts
}

/// Loads an early-arrival supplement workbook (first sheet).
pub fn load_early_arrivals(path: &Path) -> Result<HashMap<String, i64>, WorkbookError> {
    if !path.exists() {
        return Err(WorkbookError::FileNotFound(path.display().to_string()));
    }
    let mut workbook = open_workbook_auto(path).map_err(|e| WorkbookError::Read(e.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| WorkbookError::NoSheets(path.display().to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| WorkbookError::Read(e.to_string()))?;
    Ok(parse_early_arrivals(&range))
}

/// Time-of-day in fractional hours for a cell, if it holds one. Accepts both
/// Excel datetime serials and `HH:MM[:SS]` text.
fn cell_time_hours(cell: Option<&Data>) -> Option<f64> {
    match cell {
        Some(Data::DateTime(dt)) => Some(dt.as_f64().fract() * 24.0),
        Some(Data::Float(f)) if *f >= 0.0 && *f < 1.0 => Some(f * 24.0),
        Some(Data::String(s)) => {
            let mut parts = s.trim().split(':');
            let hour: f64 = parts.next()?.trim().parse().ok()?;
            let minute: f64 = parts.next()?.trim().parse().ok()?;
            Some(hour + minute / 60.0)
        }
        _ => None,
    }
}
