use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::info;
use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::record::{ExhibitorRecord, EXPORT_COLUMNS};

pub const SHEET_NAME: &str = "Exhibitors";
const MAX_COLUMN_WIDTH: usize = 50;

/// `gulfood_exhibitors_20260116_093512.xlsx`
pub fn timestamped_file_name() -> String {
    format!("gulfood_exhibitors_{}.xlsx", Local::now().format("%Y%m%d_%H%M%S"))
}

pub fn partial_file_name(page: u32) -> String {
    format!("partial_results_page_{}.xlsx", page)
}

/// Writes the fixed 11-column sheet and returns its path.
pub fn export_table(
    records: &[ExhibitorRecord],
    output_dir: &Path,
    filename: Option<&str>,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = match filename {
        Some(name) => output_dir.join(name),
        None => output_dir.join(timestamped_file_name()),
    };

    let rows: Vec<[&str; 11]> = records.iter().map(ExhibitorRecord::export_row).collect();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in EXPORT_COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(r as u32 + 1, col as u16, *value)?;
            }
        }
    }
    for (col, width) in column_widths(&rows).into_iter().enumerate() {
        sheet.set_column_width(col as u16, width as f64)?;
    }

    workbook.save(&path)?;
    info!("Excel file saved to {:?}", path);
    Ok(path)
}

/// Partial export after a page, named after the page number.
pub fn export_partial(records: &[ExhibitorRecord], output_dir: &Path, page: u32) -> Result<PathBuf> {
    export_table(records, output_dir, Some(&partial_file_name(page)))
}

/// Longest cell (header included) plus two, capped at 50.
fn column_widths(rows: &[[&str; 11]]) -> [usize; 11] {
    let mut widths = EXPORT_COLUMNS.map(|h| h.chars().count());
    for row in rows {
        for (w, value) in widths.iter_mut().zip(row) {
            *w = (*w).max(value.chars().count());
        }
    }
    widths.map(|w| (w + 2).min(MAX_COLUMN_WIDTH))
}
