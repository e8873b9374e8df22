//! Dashboard assembly: figures from the aggregated views, laid out in one
//! HTML page.

pub mod figures;
pub mod page;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::boundary;
use crate::config::ReportConfig;
use crate::pipeline::{aggregate, Dataset};

/// The five chart figures
#[derive(Debug, Clone)]
pub struct Figures {
    pub map: Value,
    pub bars: Value,
    pub pie: Value,
    pub line: Value,
    pub histogram: Value,
}

impl Figures {
    /// Figures keyed by the element id they are drawn into
    pub fn to_json(&self) -> Value {
        json!({
            "map": self.map,
            "bars": self.bars,
            "pie": self.pie,
            "line": self.line,
            "histogram": self.histogram,
        })
    }
}

/// A fully rendered dashboard
#[derive(Debug, Clone)]
pub struct Dashboard {
    figures: Figures,
    html: String,
}

impl Dashboard {
    pub fn figures(&self) -> &Figures {
        &self.figures
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Builds the dashboard for one report configuration
pub struct DashboardBuilder {
    report: ReportConfig,
    feature_key: String,
}

impl DashboardBuilder {
    pub fn new(report: ReportConfig, feature_key: impl Into<String>) -> Self {
        Self {
            report,
            feature_key: feature_key.into(),
        }
    }

    pub fn build(&self, dataset: &Dataset, geojson: &Value) -> Dashboard {
        let records = dataset.records();
        let report = &self.report;

        let regions = aggregate::region_totals(records, &report.map_year);
        let unmatched = boundary::unmatched_regions(regions.keys(), geojson, &self.feature_key);
        if !unmatched.is_empty() {
            warn!(
                count = unmatched.len(),
                regions = ?unmatched,
                "Departments without a boundary feature will not be drawn on the map"
            );
        }

        let figures = Figures {
            map: figures::region_choropleth(&regions, geojson, &self.feature_key, &report.map_year),
            bars: figures::city_bars(
                &aggregate::top_cities(records, &report.map_year, report.top_cities),
                &report.map_year,
            ),
            pie: figures::status_pie(
                &aggregate::status_totals(records, &report.map_year),
                &report.map_year,
            ),
            line: figures::monthly_line(&aggregate::monthly_confirmed(records)),
            histogram: figures::age_histogram(
                &aggregate::age_histogram(records, &report.histogram_year),
                &report.histogram_year,
            ),
        };

        let html = page::render(
            &page::PageSpec {
                title: &report.title,
                heading: &report.heading,
                credits: &report.credits,
                plotly_cdn: &report.plotly_cdn,
            },
            &figures.to_json(),
        );
        info!(bytes = html.len(), "Rendered dashboard page");

        Dashboard { figures, html }
    }
}
