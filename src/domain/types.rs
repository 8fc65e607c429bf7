//! Shared domain types.
//!
//! - `Viewport`: validated axis limits of the coupling/mass plane
//! - `Selection`: which models and bound layers are enabled
//! - `PlotConfig`: the JSON configuration accepted at the programmatic boundary
//! - `RenderSettings`, `ComposeOptions`: tunables with dashboard defaults

use std::collections::BTreeSet;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::bounds::BoundCatalog;
use crate::error::AppError;
use crate::models::ModelCatalog;

pub const DEFAULT_MASS_MIN_EV: f64 = 1e-12;
pub const DEFAULT_MASS_MAX_EV: f64 = 1e-1;
pub const DEFAULT_COUPLING_MIN: f64 = 1e-20;
pub const DEFAULT_COUPLING_MAX: f64 = 1e-8;

/// How the four viewport numbers are expressed by a caller.
///
/// `Values` is the canonical representation. `Log10` is accepted only at the
/// CLI adapter and converted (`10^x`) before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportUnits {
    #[default]
    Values,
    Log10,
}

impl ViewportUnits {
    pub fn to_value(self, x: f64) -> f64 {
        match self {
            ViewportUnits::Values => x,
            ViewportUnits::Log10 => 10f64.powf(x),
        }
    }
}

/// Visible rectangle on log–log axes.
///
/// Invariant (checked by `new`): all bounds finite and strictly positive,
/// `x_min < x_max`, `y_min < y_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Viewport {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, AppError> {
        check_axis("mass", x_min, x_max)?;
        check_axis("coupling", y_min, y_max)?;
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn from_units(
        units: ViewportUnits,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> Result<Self, AppError> {
        Self::new(
            units.to_value(x_min),
            units.to_value(x_max),
            units.to_value(y_min),
            units.to_value(y_max),
        )
    }

    pub fn x_limits(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    pub fn y_limits(&self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x_min: DEFAULT_MASS_MIN_EV,
            x_max: DEFAULT_MASS_MAX_EV,
            y_min: DEFAULT_COUPLING_MIN,
            y_max: DEFAULT_COUPLING_MAX,
        }
    }
}

fn check_axis(axis: &str, min: f64, max: f64) -> Result<(), AppError> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(AppError::config(format!(
            "Invalid {axis} range: min={min}, max={max} (must be finite)."
        )));
    }
    if min <= 0.0 || max <= 0.0 {
        return Err(AppError::config(format!(
            "Invalid {axis} range: min={min}, max={max} (log axes need values > 0)."
        )));
    }
    if min >= max {
        return Err(AppError::config(format!(
            "Invalid {axis} range: min={min}, max={max} (need min < max)."
        )));
    }
    Ok(())
}

/// Enabled model and bound-layer names.
///
/// Names are an intended subset of the catalogs; names that match nothing are
/// kept but ignored during composition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    models: BTreeSet<String>,
    bounds: BTreeSet<String>,
}

impl Selection {
    pub fn new<M, B>(models: M, bounds: B) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            models: models.into_iter().map(Into::into).collect(),
            bounds: bounds.into_iter().map(Into::into).collect(),
        }
    }

    /// Nothing enabled.
    pub fn none() -> Self {
        Self::default()
    }

    /// Dashboard start state: every model on, bounds at their default visibility.
    pub fn defaults(models: &ModelCatalog, bounds: &BoundCatalog) -> Self {
        Self {
            models: models.iter().map(|m| m.name().to_string()).collect(),
            bounds: bounds
                .entries()
                .filter(|b| b.default_visible())
                .map(|b| b.name().to_string())
                .collect(),
        }
    }

    pub fn model_enabled(&self, name: &str) -> bool {
        self.models.contains(name)
    }

    pub fn bound_enabled(&self, name: &str) -> bool {
        self.bounds.contains(name)
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(String::as_str)
    }

    pub fn bounds(&self) -> impl Iterator<Item = &str> {
        self.bounds.iter().map(String::as_str)
    }

    pub fn set_model(&mut self, name: &str, enabled: bool) {
        if enabled {
            self.models.insert(name.to_string());
        } else {
            self.models.remove(name);
        }
    }

    pub fn set_bound(&mut self, name: &str, enabled: bool) {
        if enabled {
            self.bounds.insert(name.to_string());
        } else {
            self.bounds.remove(name);
        }
    }

    /// Enable or disable every model in the catalog.
    pub fn set_all_models(&mut self, catalog: &ModelCatalog, enabled: bool) {
        for m in catalog.iter() {
            self.set_model(m.name(), enabled);
        }
    }

    /// Enable or disable every bound layer of one category.
    ///
    /// Unknown categories are ignored.
    pub fn set_category(&mut self, catalog: &BoundCatalog, category: &str, enabled: bool) {
        if let Some(cat) = catalog.category(category) {
            for entry in cat.entries() {
                self.set_bound(entry.name(), enabled);
            }
        }
    }
}

/// Upper bound on samples per model curve.
pub const MAX_SAMPLES: usize = 100_000;

/// Tunables for composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeOptions {
    /// Number of log-spaced mass samples per model curve.
    pub samples: usize,
    /// Relative tolerance under which a coupling range counts as a single value.
    pub tie_rel_tol: f64,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            samples: 600,
            tie_rel_tol: 1e-9,
            title: "Axion–Photon Coupling vs Mass".to_string(),
            x_label: "m_a [eV]".to_string(),
            y_label: "|g_aγ| [GeV⁻¹]".to_string(),
        }
    }
}

impl ComposeOptions {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(2..=MAX_SAMPLES).contains(&self.samples) {
            return Err(AppError::config(format!(
                "compose.samples must be between 2 and {MAX_SAMPLES} (got {}).",
                self.samples
            )));
        }
        if !(self.tie_rel_tol.is_finite() && self.tie_rel_tol >= 0.0) {
            return Err(AppError::config(format!(
                "compose.tie_rel_tol must be finite and >= 0 (got {}).",
                self.tie_rel_tol
            )));
        }
        Ok(())
    }
}

/// Largest raster edge we agree to allocate.
const MAX_PIXELS_PER_EDGE: f64 = 16_384.0;

/// Physical figure size and raster resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub dpi: u32,
    pub width_in: f64,
    pub height_in: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            dpi: 150,
            width_in: 8.0,
            height_in: 5.5,
        }
    }
}

impl RenderSettings {
    /// Canvas size in pixels (`inches × dpi`).
    pub fn pixel_size(&self) -> Result<(u32, u32), AppError> {
        if self.dpi == 0 {
            return Err(AppError::config("render.dpi must be > 0."));
        }
        let edge = |inches: f64, name: &str| -> Result<u32, AppError> {
            let px = (inches * f64::from(self.dpi)).round();
            if !(inches.is_finite() && inches > 0.0) || px < 1.0 || px > MAX_PIXELS_PER_EDGE {
                return Err(AppError::config(format!(
                    "render.{name}={inches} at {} dpi gives an unusable canvas edge.",
                    self.dpi
                )));
            }
            Ok(px as u32)
        };
        Ok((edge(self.width_in, "width_in")?, edge(self.height_in, "height_in")?))
    }

    /// Scale factor relative to a 100-dpi reference, for line widths and fonts.
    pub fn scale(&self) -> f64 {
        f64::from(self.dpi) / 100.0
    }
}

/// Output encodings of the export sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
    /// The figure scene itself, serialized as JSON.
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Json => "json",
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ExportFormat::Png),
            "svg" => Some(ExportFormat::Svg),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Configuration accepted at the programmatic boundary.
///
/// ```json
/// { "mmin": 1e-12, "mmax": 1e-1, "ymin": 1e-20, "ymax": 1e-8,
///   "models": ["KSVZ"], "categories": ["Helioscopes"] }
/// ```
///
/// The four numbers are raw axis values. `categories` lists bound-layer names
/// (`bounds` is accepted as an alias).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub mmin: f64,
    pub mmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default, alias = "bounds")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub compose: ComposeOptions,
    #[serde(default)]
    pub render: RenderSettings,
}

impl PlotConfig {
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json).map_err(|e| AppError::config(format!("Invalid plot config: {e}")))
    }

    pub fn viewport(&self) -> Result<Viewport, AppError> {
        Viewport::new(self.mmin, self.mmax, self.ymin, self.ymax)
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.models.iter().cloned(), self.categories.iter().cloned())
    }

    /// Check everything that must hold before any drawing starts.
    pub fn validate(&self) -> Result<(), AppError> {
        self.viewport()?;
        self.compose.validate()?;
        self.render.pixel_size()?;
        Ok(())
    }
}
