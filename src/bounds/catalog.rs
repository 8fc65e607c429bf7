//! Catalog of bound layers, grouped by category.
//!
//! Iteration order is category-major, entry-minor, in declaration order. The
//! catalog comes from one of three places:
//!
//! 1. a `bounds.json` manifest inside the limit-data directory
//! 2. the built-in table, with file-backed layers pointing into that directory
//! 3. the built-in table degraded to no-op layers when no data directory exists

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::bounds::{BoundLayer, FilledLimit, LayerParams, LineLimit, NoopLayer, QcdBand};
use crate::error::AppError;

/// File name of the optional manifest inside the limit-data directory.
pub const MANIFEST_FILE: &str = "bounds.json";

pub struct BoundEntry {
    name: String,
    category: String,
    layer: Box<dyn BoundLayer>,
    default_visible: bool,
    params: LayerParams,
}

impl BoundEntry {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        layer: Box<dyn BoundLayer>,
        default_visible: bool,
        params: LayerParams,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            layer,
            default_visible,
            params,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn layer(&self) -> &dyn BoundLayer {
        self.layer.as_ref()
    }

    pub fn default_visible(&self) -> bool {
        self.default_visible
    }

    pub fn params(&self) -> &LayerParams {
        &self.params
    }
}

impl fmt::Debug for BoundEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundEntry")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("layer", &self.layer.kind())
            .field("default_visible", &self.default_visible)
            .field("params", &self.params)
            .finish()
    }
}

#[derive(Debug)]
pub struct BoundCategory {
    name: String,
    entries: Vec<BoundEntry>,
}

impl BoundCategory {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[BoundEntry] {
        &self.entries
    }
}

#[derive(Debug, Default)]
pub struct BoundCatalog {
    categories: Vec<BoundCategory>,
}

impl BoundCatalog {
    /// Group `entries` by category, keeping first-appearance order.
    ///
    /// Entry names must be unique across the whole catalog.
    pub fn new(entries: Vec<BoundEntry>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(AppError::config(format!("Duplicate bound layer name '{}'.", entry.name)));
            }
        }
        Ok(Self::group(entries))
    }

    /// Resolve the catalog for an optional limit-data directory.
    pub fn load(data_dir: Option<&Path>) -> Result<Self, AppError> {
        match data_dir {
            Some(dir) if dir.join(MANIFEST_FILE).is_file() => Self::from_manifest(&dir.join(MANIFEST_FILE)),
            Some(dir) if dir.is_dir() => Ok(Self::builtin(Some(dir))),
            Some(dir) => {
                warn!(data_dir = %dir.display(), "limit data directory not found; bound layers will draw nothing");
                Ok(Self::builtin(None))
            }
            None => {
                warn!("no limit data directory configured; bound layers will draw nothing");
                Ok(Self::builtin(None))
            }
        }
    }

    /// The built-in categories.
    ///
    /// File-backed layers read from `data_dir`; without one they become
    /// [`NoopLayer`]s. The QCD band needs no data and is always live.
    pub fn builtin(data_dir: Option<&Path>) -> Self {
        let entries = BUILTIN_BOUNDS
            .iter()
            .map(|b| {
                let layer: Box<dyn BoundLayer> = match (b.source, data_dir) {
                    (BuiltinSource::Filled(file), Some(dir)) => Box::new(FilledLimit::new(dir.join(file))),
                    (BuiltinSource::Filled(_), None) => Box::new(NoopLayer),
                    (BuiltinSource::Qcd, _) => Box::new(QcdBand),
                };
                let mut params = LayerParams::new();
                params.insert("color".into(), json!(b.color));
                params.insert("label".into(), json!(b.name));
                BoundEntry::new(b.name, b.category, layer, b.visible, params)
            })
            .collect();
        Self::group(entries)
    }

    fn group(entries: Vec<BoundEntry>) -> Self {
        let mut categories: Vec<BoundCategory> = Vec::new();
        for entry in entries {
            match categories.iter_mut().find(|c| c.name == entry.category) {
                Some(cat) => cat.entries.push(entry),
                None => categories.push(BoundCategory {
                    name: entry.category.clone(),
                    entries: vec![entry],
                }),
            }
        }
        Self { categories }
    }

    /// Load a manifest. Relative `file` paths resolve against the manifest's directory.
    pub fn from_manifest(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Failed to read bound manifest '{}': {e}", path.display())))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_manifest_str(&text, base)
            .map_err(|e| AppError::config(format!("Bound manifest '{}': {e}", path.display())))
    }

    pub fn from_manifest_str(json: &str, base: &Path) -> Result<Self, AppError> {
        let manifest: Manifest =
            serde_json::from_str(json).map_err(|e| AppError::config(format!("Invalid bound manifest JSON: {e}")))?;

        let mut entries = Vec::new();
        for category in manifest.categories {
            for rec in category.entries {
                let layer = rec.build_layer(base)?;
                entries.push(BoundEntry::new(rec.name, category.name.clone(), layer, rec.visible, rec.params));
            }
        }
        Self::new(entries)
    }

    pub fn categories(&self) -> &[BoundCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&BoundCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// All entries, category-major.
    pub fn entries(&self) -> impl Iterator<Item = &BoundEntry> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }

    pub fn get(&self, name: &str) -> Option<&BoundEntry> {
        self.entries().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy)]
enum BuiltinSource {
    Filled(&'static str),
    Qcd,
}

struct BuiltinBound {
    name: &'static str,
    category: &'static str,
    source: BuiltinSource,
    visible: bool,
    color: &'static str,
}

const ASTRO: &str = "Astrophysical Bounds";
const EXPERIMENT: &str = "Experimental Bounds";
const QCD: &str = "Test QCD";

const BUILTIN_BOUNDS: &[BuiltinBound] = &[
    BuiltinBound {
        name: "Helioscopes",
        category: ASTRO,
        source: BuiltinSource::Filled("Helioscopes.txt"),
        visible: true,
        color: "#8b0000",
    },
    BuiltinBound {
        name: "White Dwarfs",
        category: ASTRO,
        source: BuiltinSource::Filled("WhiteDwarfs.txt"),
        visible: false,
        color: "#2f4f4f",
    },
    BuiltinBound {
        name: "Stellar Bounds",
        category: ASTRO,
        source: BuiltinSource::Filled("StellarBounds.txt"),
        visible: false,
        color: "#006400",
    },
    BuiltinBound {
        name: "Haloscopes",
        category: EXPERIMENT,
        source: BuiltinSource::Filled("Haloscopes.txt"),
        visible: false,
        color: "#8b4513",
    },
    BuiltinBound {
        name: "Solar Basin",
        category: EXPERIMENT,
        source: BuiltinSource::Filled("SolarBasin.txt"),
        visible: false,
        color: "#ff8c00",
    },
    BuiltinBound {
        name: "StAB",
        category: EXPERIMENT,
        source: BuiltinSource::Filled("StAB.txt"),
        visible: false,
        color: "#4b0082",
    },
    BuiltinBound {
        name: "QCD Axion",
        category: QCD,
        source: BuiltinSource::Qcd,
        visible: false,
        color: "#ffd700",
    },
];

#[derive(Debug, Deserialize)]
struct Manifest {
    categories: Vec<ManifestCategory>,
}

#[derive(Debug, Deserialize)]
struct ManifestCategory {
    name: String,
    entries: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum LayerKind {
    FilledLimit,
    LineLimit,
    QcdBand,
    Noop,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    layer: LayerKind,
    #[serde(default)]
    file: Option<PathBuf>,
    #[serde(default)]
    visible: bool,
    #[serde(default)]
    params: LayerParams,
}

impl ManifestEntry {
    fn build_layer(&self, base: &Path) -> Result<Box<dyn BoundLayer>, AppError> {
        let file = || {
            self.file
                .as_ref()
                .map(|f| base.join(f))
                .ok_or_else(|| AppError::config(format!("Bound layer '{}' needs a 'file'.", self.name)))
        };
        Ok(match self.layer {
            LayerKind::FilledLimit => Box::new(FilledLimit::new(file()?)),
            LayerKind::LineLimit => Box::new(LineLimit::new(file()?)),
            LayerKind::QcdBand => Box::new(QcdBand),
            LayerKind::Noop => Box::new(NoopLayer),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_iterates_category_major() {
        let cat = BoundCatalog::builtin(None);
        let names: Vec<_> = cat.entries().map(BoundEntry::name).collect();
        assert_eq!(
            names,
            vec![
                "Helioscopes",
                "White Dwarfs",
                "Stellar Bounds",
                "Haloscopes",
                "Solar Basin",
                "StAB",
                "QCD Axion"
            ]
        );
        let cats: Vec<_> = cat.categories().iter().map(BoundCategory::name).collect();
        assert_eq!(cats, vec![ASTRO, EXPERIMENT, QCD]);
    }

    #[test]
    fn builtin_without_data_degrades_file_layers_to_noop() {
        let cat = BoundCatalog::builtin(None);
        assert_eq!(cat.get("Helioscopes").unwrap().layer().kind(), "noop");
        assert_eq!(cat.get("QCD Axion").unwrap().layer().kind(), "qcd_band");

        let cat = BoundCatalog::builtin(Some(Path::new("/data")));
        assert_eq!(cat.get("Helioscopes").unwrap().layer().kind(), "filled_limit");
    }

    #[test]
    fn only_helioscopes_visible_by_default() {
        let cat = BoundCatalog::builtin(None);
        let visible: Vec<_> = cat.entries().filter(|e| e.default_visible()).map(BoundEntry::name).collect();
        assert_eq!(visible, vec!["Helioscopes"]);
    }

    #[test]
    fn load_missing_directory_degrades() {
        let cat = BoundCatalog::load(Some(Path::new("/nonexistent/axl-data"))).unwrap();
        assert_eq!(cat.len(), 7);
        assert!(cat.entries().filter(|e| e.name() != "QCD Axion").all(|e| e.layer().kind() == "noop"));
    }

    #[test]
    fn manifest_builds_layers_and_keeps_order() {
        let json = r##"{
            "categories": [
                {"name": "Projections", "entries": [
                    {"name": "IAXO", "layer": "line_limit", "file": "IAXO.txt", "params": {"color": "#000080"}},
                    {"name": "Band", "layer": "qcd_band", "visible": true}
                ]},
                {"name": "Other", "entries": [{"name": "Nothing", "layer": "noop"}]}
            ]
        }"##;
        let cat = BoundCatalog::from_manifest_str(json, Path::new("/data")).unwrap();
        let names: Vec<_> = cat.entries().map(BoundEntry::name).collect();
        assert_eq!(names, vec!["IAXO", "Band", "Nothing"]);
        assert_eq!(cat.get("IAXO").unwrap().layer().kind(), "line_limit");
        assert_eq!(cat.get("IAXO").unwrap().category(), "Projections");
        assert!(cat.get("Band").unwrap().default_visible());
    }

    #[test]
    fn manifest_rejects_missing_file_and_duplicates() {
        let no_file = r#"{"categories": [{"name": "A", "entries": [{"name": "X", "layer": "filled_limit"}]}]}"#;
        assert!(BoundCatalog::from_manifest_str(no_file, Path::new(".")).is_err());

        let dup = r#"{"categories": [
            {"name": "A", "entries": [{"name": "X", "layer": "noop"}]},
            {"name": "B", "entries": [{"name": "X", "layer": "noop"}]}
        ]}"#;
        let err = BoundCatalog::from_manifest_str(dup, Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }
}
