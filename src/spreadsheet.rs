//! Workbook loading.
//!
//! Reads one worksheet of an Excel or OpenDocument workbook into a
//! header-addressed table of text cells. Every cell is converted to text up
//! front; the pipeline does its own typed parsing on top of that.

use calamine::{open_workbook_auto, Data, Reader};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{DashboardError, Result};

/// A worksheet as text: one header row plus data rows of equal width.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table in memory. Short rows are padded with empty cells.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let mut index = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            // first occurrence wins
            index.entry(header.clone()).or_insert(i);
        }
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, index, rows }
    }

    /// Open a workbook and read the named sheet, or the first sheet.
    pub fn open(path: &Path, sheet: Option<&str>) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)?;
        let range = match sheet {
            Some(name) => {
                if !workbook.sheet_names().iter().any(|s| s == name) {
                    return Err(DashboardError::SheetNotFound(name.to_string()));
                }
                workbook.worksheet_range(name)?
            }
            None => workbook
                .worksheet_range_at(0)
                .ok_or(DashboardError::EmptySheet)??,
        };

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .ok_or(DashboardError::EmptySheet)?
            .iter()
            .map(cell_text)
            .collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(DashboardError::EmptySheet);
        }

        let data: Vec<Vec<String>> = rows
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        info!(
            path = %path.display(),
            columns = headers.len(),
            rows = data.len(),
            "Loaded worksheet"
        );
        Ok(Self::new(headers, data))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact header name.
    pub fn column(&self, name: &str) -> Result<usize> {
        let idx = self
            .index
            .get(name)
            .copied()
            .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))?;
        debug!(column = name, index = idx, "Resolved column");
        Ok(idx)
    }
}

/// Text rendering of a single cell.
///
/// Integral numbers lose their `.0`, date cells become `dd/mm/yyyy`, and
/// empty or error cells become the empty string.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if datetime.time() == chrono::NaiveTime::MIN => {
                datetime.format("%d/%m/%Y").to_string()
            }
            Some(datetime) => datetime.format("%d/%m/%Y %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}
