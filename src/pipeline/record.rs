use serde::{Serialize, Serializer};
use std::fmt;

use super::age::AgeBucket;
use super::dates::YearMonth;
use crate::constants::{CONFIRMED_LABEL, DISCARDED_LABEL, SUSPECTED_LABEL, UNCLASSIFIED_LABEL};

/// Case classification of a death.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CaseStatus {
    Confirmed,
    Suspected,
    Discarded,
    /// Any other non-empty value, kept verbatim
    Other(String),
    /// Empty cell, or one already reading `SIN CLASIFICAR`
    Unclassified,
}

impl CaseStatus {
    pub const CANONICAL: [CaseStatus; 3] =
        [CaseStatus::Confirmed, CaseStatus::Suspected, CaseStatus::Discarded];

    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "" | UNCLASSIFIED_LABEL => Self::Unclassified,
            CONFIRMED_LABEL => Self::Confirmed,
            SUSPECTED_LABEL => Self::Suspected,
            DISCARDED_LABEL => Self::Discarded,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Confirmed => CONFIRMED_LABEL,
            Self::Suspected => SUSPECTED_LABEL,
            Self::Discarded => DISCARDED_LABEL,
            Self::Other(label) => label,
            Self::Unclassified => UNCLASSIFIED_LABEL,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for CaseStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One mortality case with its derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRecord {
    /// Source row number, 0-based, header excluded
    pub row: usize,
    /// Accent-folded department name
    pub region: String,
    pub city: String,
    pub status: CaseStatus,
    pub death_date: String,
    pub age_text: String,
    pub year_month: Option<YearMonth>,
    pub age: Option<f64>,
    pub age_bucket: Option<AgeBucket>,
}

impl CaseRecord {
    pub fn year(&self) -> Option<&str> {
        self.year_month.as_ref().map(|ym| ym.year.as_str())
    }

    pub fn month(&self) -> Option<&str> {
        self.year_month.as_ref().map(|ym| ym.month.as_str())
    }

    pub fn year_month_key(&self) -> Option<String> {
        self.year_month.as_ref().map(YearMonth::key)
    }

    pub fn in_year(&self, year: &str) -> bool {
        self.year() == Some(year)
    }
}
