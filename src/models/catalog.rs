//! Catalog of theoretical axion models.
//!
//! Each entry names a model, optionally its domain-wall number tag (N_DW), and
//! the range of its anomaly coefficient `C`. Entries with a single `C` render as
//! a line; entries with a range render as a band.
//!
//! Catalogs are built once (built-in table or a JSON file) and then only read.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Closed range of the anomaly coefficient `C`, `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CouplingRange {
    low: f64,
    high: f64,
}

impl CouplingRange {
    pub fn new(low: f64, high: f64) -> Result<Self, AppError> {
        if !(low.is_finite() && high.is_finite()) {
            return Err(AppError::config(format!(
                "Invalid coupling range ({low}, {high}): values must be finite."
            )));
        }
        if low > high {
            return Err(AppError::config(format!(
                "Invalid coupling range ({low}, {high}): low must not exceed high."
            )));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Whether the range collapses to a single value within relative tolerance `tol`.
    pub fn is_degenerate(&self, tol: f64) -> bool {
        (self.high - self.low).abs() <= tol * self.low.abs().max(self.high.abs())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelEntry {
    name: String,
    domain_walls: Option<String>,
    coupling: CouplingRange,
}

impl ModelEntry {
    pub fn new(
        name: impl Into<String>,
        domain_walls: Option<String>,
        low: f64,
        high: f64,
    ) -> Result<Self, AppError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::config("Model name must not be empty."));
        }
        let coupling = CouplingRange::new(low, high)
            .map_err(|e| AppError::config(format!("Model '{name}': {e}")))?;
        Ok(Self {
            name,
            domain_walls,
            coupling,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain_walls(&self) -> Option<&str> {
        self.domain_walls.as_deref()
    }

    pub fn coupling(&self) -> CouplingRange {
        self.coupling
    }

    /// Legend text: `"<name> (N_DW=<tag>)"`, or just the name without a tag.
    pub fn legend_label(&self) -> String {
        match &self.domain_walls {
            Some(ndw) => format!("{} (N_DW={ndw})", self.name),
            None => self.name.clone(),
        }
    }
}

/// Built-in models: `(name, N_DW tag, C_low, C_high)`.
const BUILTIN_MODELS: &[(&str, Option<&str>, f64, f64)] = &[
    ("KSVZ", Some("1"), -1.92, -1.92),
    ("DFSZ-I", Some("6,3"), 0.75, 0.75),
    ("DFSZ-II", Some("6,3"), -1.25, -1.25),
    ("Astrophobic QCD axion", Some("1,2"), -6.59, 0.74),
    ("VISHν", Some("1"), 0.75, 0.75),
    ("νDFSZ", Some("6"), 0.75, 0.75),
    ("Majoraxion", None, 2.66, 2.66),
    ("Composite Axion", Some("0/2/6"), 1.33, 2.66),
];

/// Ordered, immutable list of models. Iteration follows declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelCatalog {
    entries: Vec<ModelEntry>,
}

impl ModelCatalog {
    pub fn new(entries: Vec<ModelEntry>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for e in &entries {
            if !seen.insert(e.name()) {
                return Err(AppError::config(format!("Duplicate model name '{}'.", e.name())));
            }
        }
        Ok(Self { entries })
    }

    /// The built-in table of QCD axion models.
    pub fn builtin() -> Self {
        let entries = BUILTIN_MODELS
            .iter()
            .map(|&(name, ndw, low, high)| ModelEntry {
                name: name.to_string(),
                domain_walls: ndw.map(str::to_string),
                coupling: CouplingRange { low, high },
            })
            .collect();
        Self { entries }
    }

    /// Load a catalog from a JSON array of `{ "name", "ndw"?, "c": [low, high] }`.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Failed to read model catalog '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
            .map_err(|e| AppError::config(format!("Model catalog '{}': {e}", path.display())))
    }

    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let records: Vec<ModelRecord> = serde_json::from_str(json)
            .map_err(|e| AppError::config(format!("Invalid model catalog JSON: {e}")))?;
        let entries = records
            .into_iter()
            .map(|r| ModelEntry::new(r.name, r.ndw, r.c.0, r.c.1))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelEntry> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct ModelRecord {
    name: String,
    #[serde(default)]
    ndw: Option<String>,
    c: (f64, f64),
}
