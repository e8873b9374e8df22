use chrono::{Datelike, NaiveDate};

/// Formats accepted for the date part of a death date
const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

/// Calendar year and month of a death, as fixed-width text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    /// 4 digits
    pub year: String,
    /// 2 digits, zero-padded
    pub month: String,
}

impl YearMonth {
    /// `yyyy-mm`; sorts chronologically as plain text.
    pub fn key(&self) -> String {
        format!("{}-{}", self.year, self.month)
    }
}

/// Parse a death date such as `15/03/2020`, `'15/03/2020` or
/// `2020-03-15 00:00:00`.
///
/// Anything that is not a valid calendar date in one of the accepted formats
/// returns `None`; no partial year or month is guessed.
pub fn parse_death_date(text: &str) -> Option<YearMonth> {
    let text = text.trim();
    // Excel text-marker apostrophe
    let text = text.strip_prefix('\'').unwrap_or(text).trim();
    let date_part = text.split([' ', 'T']).next()?;

    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())?;
    if !(0..=9999).contains(&date.year()) {
        return None;
    }

    Some(YearMonth {
        year: format!("{:04}", date.year()),
        month: format!("{:02}", date.month()),
    })
}
