//! Spreadsheet-to-markdown conversion.
//!
//! Attachments in tabular formats are rendered as GitHub-style markdown
//! tables and fed to the model as plain text, which scores better than
//! handing the raw workbook to the file API. Workbook formats go through
//! `calamine`; `csv`/`tsv` are split manually (quoted fields supported).

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use thiserror::Error;

/// Extensions treated as spreadsheets.
const SPREADSHEET_EXTENSIONS: [&str; 6] = ["xlsx", "xls", "xlsm", "ods", "csv", "tsv"];

/// Conversion errors.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("could not open workbook: {0}")]
    Workbook(String),

    #[error("could not read sheet '{name}': {reason}")]
    Sheet { name: String, reason: String },

    #[error("spreadsheet has no data")]
    Empty,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Returns true if the path has a spreadsheet extension.
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SPREADSHEET_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Converts a spreadsheet file to markdown tables, one per sheet.
pub fn to_markdown(path: &Path) -> Result<String, SpreadsheetError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => delimited_to_markdown(&std::fs::read_to_string(path)?, ','),
        "tsv" => delimited_to_markdown(&std::fs::read_to_string(path)?, '\t'),
        _ => workbook_to_markdown(path),
    }
}

fn workbook_to_markdown(path: &Path) -> Result<String, SpreadsheetError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| SpreadsheetError::Workbook(e.to_string()))?;

    let mut tables = Vec::new();
    let sheet_names = workbook.sheet_names().to_owned();
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| SpreadsheetError::Sheet {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        if range.is_empty() {
            continue;
        }
        tables.push(format!("## {}\n\n{}", name, range_to_markdown(&range)));
    }

    if tables.is_empty() {
        return Err(SpreadsheetError::Empty);
    }
    Ok(tables.join("\n\n"))
}

fn range_to_markdown(range: &Range<Data>) -> String {
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    rows_to_markdown(&rows)
}

fn delimited_to_markdown(content: &str, delimiter: char) -> Result<String, SpreadsheetError> {
    let rows: Vec<Vec<String>> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| split_delimited_line(line, delimiter))
        .collect();

    if rows.is_empty() {
        return Err(SpreadsheetError::Empty);
    }
    Ok(rows_to_markdown(&rows))
}

fn rows_to_markdown(rows: &[Vec<String>]) -> String {
    let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(rows.len() + 1);

    for (index, row) in rows.iter().enumerate() {
        let mut cells: Vec<String> = row.iter().map(|cell| escape_cell(cell)).collect();
        cells.resize(width, String::new());
        lines.push(format!("| {} |", cells.join(" | ")));

        if index == 0 {
            let separator: Vec<&str> = std::iter::repeat("---").take(width).collect();
            lines.push(format!("| {} |", separator.join(" | ")));
        }
    }

    lines.join("\n")
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

/// Splits one delimited line honoring double-quoted fields.
fn split_delimited_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                // Escaped quote inside a quoted field
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            c => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}
