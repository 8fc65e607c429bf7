//! Command-line parsing for the axion exclusion-plot composer.
//!
//! Argument parsing stays here; `app` turns parsed arguments into a scene and
//! dispatches.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ExportFormat;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "axl", version, about = "Axion-photon coupling vs mass exclusion plots")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compose the figure and export it (PNG, SVG or JSON scene), or print base64 PNG.
    Render(RenderArgs),
    /// Compose the figure and print an ASCII preview.
    Preview(PreviewArgs),
    /// List the model and bound-layer catalogs.
    List(CatalogArgs),
}

/// Where the catalogs come from.
#[derive(Debug, Args, Clone, Default)]
pub struct CatalogArgs {
    /// Limit-data directory (two-column limit files, optional `bounds.json`).
    #[arg(long, env = "AXL_LIMIT_DATA", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Replace the built-in models with a JSON table.
    #[arg(long, value_name = "JSON")]
    pub models_file: Option<PathBuf>,
}

/// Viewport, selection and composition options shared by `render` and `preview`.
#[derive(Debug, Args, Clone, Default)]
pub struct SceneArgs {
    #[command(flatten)]
    pub catalogs: CatalogArgs,

    /// JSON plot configuration. Replaces the viewport and selection flags below.
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Minimum axion mass [eV] (default 1e-12).
    #[arg(long, allow_negative_numbers = true)]
    pub mmin: Option<f64>,

    /// Maximum axion mass [eV] (default 1e-1).
    #[arg(long, allow_negative_numbers = true)]
    pub mmax: Option<f64>,

    /// Minimum |g_aγ| [GeV⁻¹] (default 1e-20).
    #[arg(long, allow_negative_numbers = true)]
    pub ymin: Option<f64>,

    /// Maximum |g_aγ| [GeV⁻¹] (default 1e-8).
    #[arg(long, allow_negative_numbers = true)]
    pub ymax: Option<f64>,

    /// Read --mmin/--mmax/--ymin/--ymax as base-10 exponents.
    #[arg(long)]
    pub log10: bool,

    /// Enable only these models (repeatable). Default: all models.
    #[arg(long = "model", value_name = "NAME")]
    pub models: Vec<String>,

    /// Disable all models.
    #[arg(long, conflicts_with = "models")]
    pub no_models: bool,

    /// Enable only these bound layers (repeatable). Default: the catalog defaults.
    #[arg(long = "bound", value_name = "NAME")]
    pub bounds: Vec<String>,

    /// Enable every bound layer of a category (repeatable).
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Disable all bound layers.
    #[arg(long, conflicts_with_all = ["bounds", "categories"])]
    pub no_bounds: bool,

    /// Mass samples per model curve.
    #[arg(long)]
    pub samples: Option<usize>,

    /// Relative tolerance under which a coupling range is drawn as one line.
    #[arg(long)]
    pub tie_tol: Option<f64>,
}

/// Options for `axl render`.
#[derive(Debug, Parser, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Output format. Default: inferred from --out, else png.
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output path. Default: AxionPhoton_Dashboard.<ext>.
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Print the PNG as base64 on stdout instead of writing a file.
    #[arg(long, conflicts_with_all = ["format", "out"])]
    pub base64: bool,

    /// Raster resolution.
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Figure width in inches.
    #[arg(long)]
    pub width_in: Option<f64>,

    /// Figure height in inches.
    #[arg(long)]
    pub height_in: Option<f64>,

    /// Do not print the composition report.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Options for `axl preview`.
#[derive(Debug, Parser, Clone)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 30)]
    pub height: usize,
}
