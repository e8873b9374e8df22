//! Summary views over the derived record set.
//!
//! Every function here is a read-only projection: filter, group by one key,
//! count. None of them depends on another's output.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::age::AgeBucket;
use super::record::{CaseRecord, CaseStatus};
use crate::config::ReportConfig;

/// Count rows per key, keeping keys in order of first appearance.
fn count_in_row_order<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + std::hash::Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut position: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in keys {
        match position.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}

fn confirmed_in_year<'a>(
    records: &'a [CaseRecord],
    year: &'a str,
) -> impl Iterator<Item = &'a CaseRecord> + 'a {
    records
        .iter()
        .filter(move |r| r.status.is_confirmed() && r.in_year(year))
}

/// Confirmed deaths per age band in `year`, every band present in band
/// order. Records without a numeric age are skipped.
pub fn age_histogram(records: &[CaseRecord], year: &str) -> Vec<(AgeBucket, usize)> {
    let mut counts: BTreeMap<AgeBucket, usize> = AgeBucket::all().map(|b| (b, 0)).collect();
    for bucket in confirmed_in_year(records, year).filter_map(|r| r.age_bucket) {
        *counts.entry(bucket).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Confirmed deaths per `yyyy-mm`, across all years, ascending.
pub fn monthly_confirmed(records: &[CaseRecord]) -> BTreeMap<String, usize> {
    let mut series = BTreeMap::new();
    for key in records
        .iter()
        .filter(|r| r.status.is_confirmed())
        .filter_map(CaseRecord::year_month_key)
    {
        *series.entry(key).or_insert(0) += 1;
    }
    series
}

/// Confirmed deaths per department in `year`.
pub fn region_totals(records: &[CaseRecord], year: &str) -> BTreeMap<String, usize> {
    let mut totals = BTreeMap::new();
    for record in confirmed_in_year(records, year) {
        *totals.entry(record.region.clone()).or_insert(0) += 1;
    }
    totals
}

/// Confirmed deaths per city in `year`, in order of first appearance.
pub fn city_totals(records: &[CaseRecord], year: &str) -> Vec<(String, usize)> {
    count_in_row_order(confirmed_in_year(records, year).map(|r| r.city.clone()))
}

/// The `n` cities with most confirmed deaths in `year`, largest first.
/// Ties keep source row order.
pub fn top_cities(records: &[CaseRecord], year: &str, n: usize) -> Vec<(String, usize)> {
    let mut totals = city_totals(records, year);
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals.truncate(n);
    totals
}

/// All cases of `year` per classification. The three canonical statuses are
/// always listed first; other and unclassified values follow as seen.
pub fn status_totals(records: &[CaseRecord], year: &str) -> Vec<(CaseStatus, usize)> {
    let mut totals: Vec<(CaseStatus, usize)> =
        CaseStatus::CANONICAL.into_iter().map(|s| (s, 0)).collect();
    let seen = count_in_row_order(
        records
            .iter()
            .filter(|r| r.in_year(year))
            .map(|r| r.status.clone()),
    );
    for (status, count) in seen {
        match totals.iter_mut().find(|(s, _)| *s == status) {
            Some(entry) => entry.1 = count,
            None => totals.push((status, count)),
        }
    }
    totals
}

/// One labelled count, the common output shape of every view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelledCount {
    pub label: String,
    pub count: usize,
}

impl LabelledCount {
    fn from_pairs<K: ToString>(pairs: impl IntoIterator<Item = (K, usize)>) -> Vec<Self> {
        pairs
            .into_iter()
            .map(|(key, count)| Self {
                label: key.to_string(),
                count,
            })
            .collect()
    }
}

/// All five views for one report configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub histogram_year: String,
    pub map_year: String,
    pub age_histogram: Vec<LabelledCount>,
    pub monthly_confirmed: Vec<LabelledCount>,
    pub region_totals: Vec<LabelledCount>,
    pub top_cities: Vec<LabelledCount>,
    pub status_totals: Vec<LabelledCount>,
}

impl Summary {
    pub fn compute(records: &[CaseRecord], report: &ReportConfig) -> Self {
        Self {
            histogram_year: report.histogram_year.clone(),
            map_year: report.map_year.clone(),
            age_histogram: LabelledCount::from_pairs(age_histogram(
                records,
                &report.histogram_year,
            )),
            monthly_confirmed: LabelledCount::from_pairs(monthly_confirmed(records)),
            region_totals: LabelledCount::from_pairs(region_totals(records, &report.map_year)),
            top_cities: LabelledCount::from_pairs(top_cities(
                records,
                &report.map_year,
                report.top_cities,
            )),
            status_totals: LabelledCount::from_pairs(status_totals(records, &report.map_year)),
        }
    }
}
