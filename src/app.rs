use serde_json::Value;
use tracing::info;

use crate::boundary::{self, BoundarySource};
use crate::config::Config;
use crate::dashboard::{Dashboard, DashboardBuilder};
use crate::error::Result;
use crate::pipeline::{Dataset, Summary};
use crate::spreadsheet::Table;

/// Use case tying the workbook, the boundary cache and the dashboard together
pub struct DashboardUseCase {
    config: Config,
    boundary_source: Box<dyn BoundarySource>,
}

impl DashboardUseCase {
    pub fn new(config: Config, boundary_source: Box<dyn BoundarySource>) -> Self {
        Self {
            config,
            boundary_source,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read the configured workbook and derive the record set
    pub fn load_dataset(&self) -> Result<Dataset> {
        let input = &self.config.input;
        info!(path = %input.path.display(), "Loading workbook");
        let table = Table::open(&input.path, input.sheet.as_deref())?;
        self.dataset_from_table(&table)
    }

    pub fn dataset_from_table(&self, table: &Table) -> Result<Dataset> {
        Dataset::from_table(table, &self.config.columns)
    }

    /// Cached boundary document, downloaded on first use
    pub fn boundaries(&self) -> Result<Value> {
        let cfg = &self.config.boundary;
        boundary::ensure_local(&cfg.path, &cfg.url, self.boundary_source.as_ref())
    }

    pub fn summary(&self, dataset: &Dataset) -> Summary {
        dataset.summary(&self.config.report)
    }

    pub fn build(&self, dataset: &Dataset) -> Result<Dashboard> {
        let geojson = self.boundaries()?;
        let builder = DashboardBuilder::new(
            self.config.report.clone(),
            self.config.boundary.feature_key.clone(),
        );
        Ok(builder.build(dataset, &geojson))
    }
}
