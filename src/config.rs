//! City configuration: which CSV file backs each selectable city.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::DataError;

static DEFAULT_CITIES: &[(&str, &str)] = &[
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// Maps lowercase city names to the CSV file holding their trips.
///
/// Can be loaded from a plain JSON object on disk:
/// ```json
/// {
///   "chicago": "chicago.csv",
///   "boston": "/data/boston_trips.csv"
/// }
/// ```
/// Relative paths are resolved against the data directory.
#[derive(Debug, Clone)]
pub struct CityConfig {
    entries: BTreeMap<String, PathBuf>,
}

impl CityConfig {
    /// The three bundled cities, with files looked up in `data_dir`.
    pub fn with_defaults(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let entries = DEFAULT_CITIES
            .iter()
            .map(|(city, file)| (city.to_string(), data_dir.join(file)))
            .collect();
        Self { entries }
    }

    /// Loads the city map from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>, data_dir: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read city config '{}'", path.display()))?;
        Self::from_json(&content, data_dir)
            .with_context(|| format!("invalid city config '{}'", path.display()))
    }

    pub fn from_json(content: &str, data_dir: impl AsRef<Path>) -> Result<Self> {
        let raw: BTreeMap<String, PathBuf> = serde_json::from_str(content)?;
        let data_dir = data_dir.as_ref();
        let entries = raw
            .into_iter()
            .map(|(city, file)| (city.trim().to_lowercase(), data_dir.join(file)))
            .collect::<BTreeMap<_, _>>();
        if entries.is_empty() {
            anyhow::bail!("city config must name at least one city");
        }
        Ok(Self { entries })
    }

    /// Returns the source file for `city` (case-insensitive).
    pub fn resolve(&self, city: &str) -> Result<&Path, DataError> {
        self.entries
            .get(&city.trim().to_lowercase())
            .map(PathBuf::as_path)
            .ok_or_else(|| DataError::UnknownCity(city.to_string()))
    }

    /// City names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
