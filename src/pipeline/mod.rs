// Data pipeline: normalization, field derivation and aggregation

pub mod age;
pub mod aggregate;
pub mod dates;
pub mod normalize;
pub mod record;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ColumnConfig;
use crate::error::{DashboardError, Result};
use crate::spreadsheet::Table;

pub use age::{parse_age, AgeBucket};
pub use aggregate::Summary;
pub use dates::{parse_death_date, YearMonth};
pub use normalize::normalize_region;
pub use record::{CaseRecord, CaseStatus};

/// Counts gathered while deriving records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub rows: usize,
    pub unparseable_dates: usize,
    pub unparseable_ages: usize,
}

/// The normalized, derived record set. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<CaseRecord>,
    stats: PipelineStats,
}

/// Column positions resolved against one table
struct ColumnIndex {
    region: usize,
    city: usize,
    death_date: usize,
    status: usize,
    age: usize,
}

impl ColumnIndex {
    fn resolve(table: &Table, columns: &ColumnConfig) -> Result<Self> {
        Ok(Self {
            region: table.column(&columns.region)?,
            city: table.column(&columns.city)?,
            death_date: table.column(&columns.death_date)?,
            status: table.column(&columns.status)?,
            age: table.column(&columns.age)?,
        })
    }
}

impl Dataset {
    /// Derive every record of `table`.
    ///
    /// Fails on a missing column, or when a non-empty table has no parseable
    /// death date or no parseable age at all. Individual bad values only
    /// leave the derived field empty.
    pub fn from_table(table: &Table, columns: &ColumnConfig) -> Result<Self> {
        let index = ColumnIndex::resolve(table, columns)?;
        let mut stats = PipelineStats {
            rows: table.len(),
            ..Default::default()
        };

        let records: Vec<CaseRecord> = table
            .rows()
            .iter()
            .enumerate()
            .map(|(row, cells)| derive_record(row, cells, &index))
            .collect();

        for record in &records {
            if record.year_month.is_none() {
                stats.unparseable_dates += 1;
                debug!(row = record.row, value = %record.death_date, "Unparseable death date");
            }
            if record.age.is_none() {
                stats.unparseable_ages += 1;
                debug!(row = record.row, value = %record.age_text, "Unparseable age");
            }
        }

        if stats.rows > 0 && stats.unparseable_dates == stats.rows {
            return Err(DashboardError::UnparseableColumn {
                column: columns.death_date.clone(),
                rows: stats.rows,
            });
        }
        if stats.rows > 0 && stats.unparseable_ages == stats.rows {
            return Err(DashboardError::UnparseableColumn {
                column: columns.age.clone(),
                rows: stats.rows,
            });
        }

        if stats.unparseable_dates > 0 {
            warn!(
                count = stats.unparseable_dates,
                "Records without a parseable death date are left out of yearly and monthly views"
            );
        }
        info!(
            rows = stats.rows,
            unparseable_dates = stats.unparseable_dates,
            unparseable_ages = stats.unparseable_ages,
            "Derived case records"
        );
        Ok(Self { records, stats })
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    pub fn summary(&self, report: &crate::config::ReportConfig) -> Summary {
        Summary::compute(&self.records, report)
    }
}

fn derive_record(row: usize, cells: &[String], index: &ColumnIndex) -> CaseRecord {
    let cell = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");
    let age = parse_age(cell(index.age));
    CaseRecord {
        row,
        region: normalize_region(cell(index.region)),
        city: cell(index.city).to_string(),
        status: CaseStatus::parse(cell(index.status)),
        death_date: cell(index.death_date).to_string(),
        age_text: cell(index.age).to_string(),
        year_month: parse_death_date(cell(index.death_date)),
        age,
        age_bucket: age.and_then(AgeBucket::for_age),
    }
}
