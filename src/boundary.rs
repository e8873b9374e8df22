//! Local cache for the department boundary GeoJSON.
//!
//! `ensure_local` downloads the document once, stores it next to the
//! working data and serves every later call from disk.

use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{DashboardError, Result};

/// Where the boundary document comes from when it is not cached yet
pub trait BoundarySource {
    fn fetch(&self, url: &str) -> Result<Value>;
}

/// Blocking HTTP download
pub struct ReqwestBoundarySource {
    client: reqwest::blocking::Client,
}

impl Default for ReqwestBoundarySource {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestBoundarySource {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl BoundarySource for ReqwestBoundarySource {
    fn fetch(&self, url: &str) -> Result<Value> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DashboardError::BoundaryFetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp.json::<Value>()?)
    }
}

/// Make sure `path` holds the boundary document, then read it back.
///
/// Only a missing file triggers a fetch. The document is written to a
/// sibling temporary file and renamed into place.
pub fn ensure_local(path: &Path, url: &str, source: &dyn BoundarySource) -> Result<Value> {
    if path.exists() {
        info!(path = %path.display(), "Boundary document cached");
    } else {
        info!(path = %path.display(), url, "Boundary document not found locally, downloading");
        let document = source.fetch(url)?;
        persist(path, &document)?;
        info!(path = %path.display(), "Boundary document saved");
    }
    load(path)
}

pub fn load(path: &Path) -> Result<Value> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn persist(path: &Path, document: &Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = temp_path(path);
    {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer(&mut writer, document)?;
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Values of `properties.<key>` across the document's features.
pub fn feature_names(document: &Value, key: &str) -> BTreeSet<String> {
    document
        .get("features")
        .and_then(Value::as_array)
        .map(|features| {
            features
                .iter()
                .filter_map(|f| f.get("properties")?.get(key)?.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Region names with no matching boundary feature. Matching is exact.
pub fn unmatched_regions<'a>(
    regions: impl IntoIterator<Item = &'a String>,
    document: &Value,
    key: &str,
) -> Vec<String> {
    let known = feature_names(document, key);
    if known.is_empty() {
        warn!(key, "Boundary document has no features with the join key");
    }
    regions
        .into_iter()
        .filter(|r| !known.contains(*r))
        .cloned()
        .collect()
}
