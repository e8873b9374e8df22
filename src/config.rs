use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub columns: ColumnConfig,
    pub boundary: BoundaryConfig,
    pub report: ReportConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: PathBuf,
    /// Worksheet to read; the first sheet when unset
    pub sheet: Option<String>,
}

/// Header names of the columns the pipeline reads
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub region: String,
    pub city: String,
    pub death_date: String,
    pub status: String,
    pub age: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    pub path: PathBuf,
    pub url: String,
    /// Feature property holding the region name
    pub feature_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub histogram_year: String,
    pub map_year: String,
    pub top_cities: usize,
    pub title: String,
    pub heading: String,
    pub credits: Vec<String>,
    pub plotly_cdn: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    /// File name prefix; a date suffix is added on rotation
    pub file: String,
    /// `EnvFilter` directives, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::DEFAULT_INPUT_PATH),
            sheet: None,
        }
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            region: constants::REGION_COLUMN.to_string(),
            city: constants::CITY_COLUMN.to_string(),
            death_date: constants::DEATH_DATE_COLUMN.to_string(),
            status: constants::STATUS_COLUMN.to_string(),
            age: constants::AGE_COLUMN.to_string(),
        }
    }
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::DEFAULT_BOUNDARY_PATH),
            url: constants::DEFAULT_BOUNDARY_URL.to_string(),
            feature_key: constants::DEFAULT_FEATURE_KEY.to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            histogram_year: constants::DEFAULT_HISTOGRAM_YEAR.to_string(),
            map_year: constants::DEFAULT_MAP_YEAR.to_string(),
            top_cities: constants::DEFAULT_TOP_CITIES,
            title: constants::DEFAULT_TITLE.to_string(),
            heading: constants::DEFAULT_HEADING.to_string(),
            credits: constants::DEFAULT_CREDITS.iter().map(|s| s.to_string()).collect(),
            plotly_cdn: constants::DEFAULT_PLOTLY_CDN.to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_HOST.to_string(),
            port: constants::DEFAULT_PORT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(constants::DEFAULT_LOG_DIR),
            file: constants::DEFAULT_LOG_FILE.to_string(),
            filter: constants::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `dashboard.toml` in the
    /// working directory is used when present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(constants::DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.report.top_cities == 0 {
            return Err(DashboardError::Config(
                "report.top_cities must be at least 1".to_string(),
            ));
        }
        for (name, year) in [
            ("report.histogram_year", &self.report.histogram_year),
            ("report.map_year", &self.report.map_year),
        ] {
            if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
                return Err(DashboardError::Config(format!(
                    "{name} must be a 4-digit year, got '{year}'"
                )));
            }
        }
        Ok(())
    }
}
