//! CSV, TSV and XLSX loading for column-mapped card imports.
//!
//! The first non-empty row names the columns. Rows and columns with no
//! content at all are dropped before anything else sees the data.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use flashdeck_core::CardRecord;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Unsupported table file {0:?} (expected .csv, .tsv or .xlsx)")]
    UnsupportedFormat(String),
    #[error("Could not read table: {0}")]
    Malformed(String),
    #[error("Column {0:?} not found")]
    UnknownColumn(String),
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl From<calamine::Error> for TableError {
    fn from(err: calamine::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Tsv,
    Xlsx,
}

impl TableFormat {
    /// Pick the format from the file extension, ignoring case.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let name = filename.to_lowercase();
        if name.ends_with(".csv") {
            Some(Self::Csv)
        } else if name.ends_with(".tsv") {
            Some(Self::Tsv)
        } else if name.ends_with(".xlsx") {
            Some(Self::Xlsx)
        } else {
            None
        }
    }
}

/// A loaded table. Every row has one cell per column, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from raw rows, the first non-empty one being the header.
    fn from_grid(grid: Vec<Vec<String>>) -> Self {
        let mut grid = grid.into_iter().filter(|row| !is_blank_row(row));
        let Some(header) = grid.next() else {
            return Self::default();
        };
        let body: Vec<Vec<String>> = grid.collect();

        let width = body.iter().map(Vec::len).fold(header.len(), usize::max);
        let keep: Vec<usize> = (0..width)
            .filter(|&col| body.iter().any(|row| !cell(row, col).trim().is_empty()))
            .collect();

        let columns = column_names(&header, width);
        Self {
            columns: keep.iter().map(|&col| columns[col].clone()).collect(),
            rows: body
                .iter()
                .map(|row| keep.iter().map(|&col| cell(row, col).to_string()).collect())
                .collect(),
        }
    }

    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    /// Map two columns onto card sides, one record per row.
    pub fn records(&self, front: &str, back: &str) -> Result<Vec<CardRecord>, TableError> {
        let front = self.column_index(front)?;
        let back = self.column_index(back)?;
        Ok(self
            .rows
            .iter()
            .map(|row| CardRecord::new(row[front].trim(), row[back].trim()))
            .collect())
    }
}

/// Load a CSV, TSV or XLSX file, choosing the reader by `filename`.
pub fn load_table(bytes: &[u8], filename: &str) -> Result<Table, TableError> {
    let format = TableFormat::from_filename(filename)
        .ok_or_else(|| TableError::UnsupportedFormat(filename.to_string()))?;

    let grid = match format {
        TableFormat::Csv => read_delimited(bytes, b',')?,
        TableFormat::Tsv => read_delimited(bytes, b'\t')?,
        TableFormat::Xlsx => read_workbook(bytes)?,
    };

    let table = Table::from_grid(grid);
    tracing::debug!(
        "Loaded {:?} table with {} rows and {} columns",
        format,
        table.rows.len(),
        table.columns.len()
    );
    Ok(table)
}

fn read_delimited(bytes: &[u8], delimiter: u8) -> Result<Vec<Vec<String>>, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut grid = Vec::new();
    for record in reader.records() {
        grid.push(record?.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Read the first worksheet of a workbook.
fn read_workbook(bytes: &[u8]) -> Result<Vec<Vec<String>>, TableError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| TableError::Malformed("workbook has no sheets".to_string()))?;
    let range = workbook.worksheet_range(&name)?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{:.0}", f),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERR:{:?}", e),
    }
}

fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

/// Header names, with blanks filled in and repeats numbered.
fn column_names(header: &[String], width: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(width);
    for col in 0..width {
        let base = match cell(header, col).trim() {
            "" => format!("Unnamed: {}", col),
            name => name.to_string(),
        };
        let mut name = base.clone();
        let mut n = 1;
        while names.contains(&name) {
            name = format!("{}.{}", base, n);
            n += 1;
        }
        names.push(name);
    }
    names
}
