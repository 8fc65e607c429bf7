//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - builds the model and bound catalogs
//! - resolves the scene (viewport, selection, options)
//! - composes the figure
//! - exports, previews or lists

use clap::Parser;

use crate::cli::{CatalogArgs, Command, PreviewArgs, RenderArgs, SceneArgs};
use crate::domain::{
    ComposeOptions, ExportFormat, RenderSettings, Selection, Viewport, ViewportUnits, DEFAULT_COUPLING_MAX,
    DEFAULT_COUPLING_MIN, DEFAULT_MASS_MAX_EV, DEFAULT_MASS_MIN_EV,
};
use crate::error::AppError;
use crate::io::config::read_plot_config;

pub mod pipeline;

use pipeline::{compose_scene, Catalogs, Scene};

/// Entry point for the `axl` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` must be loaded before clap reads `AXL_LIMIT_DATA`.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Render(args) => handle_render(args),
        Command::Preview(args) => handle_preview(args),
        Command::List(args) => handle_list(args),
    }
}

fn load_catalogs(args: &CatalogArgs) -> Result<Catalogs, AppError> {
    Catalogs::load(args.data_dir.as_deref(), args.models_file.as_deref())
}

fn handle_render(args: RenderArgs) -> Result<(), AppError> {
    let catalogs = load_catalogs(&args.scene.catalogs)?;
    let mut scene = scene_from_args(&args.scene, &catalogs)?;
    apply_render_overrides(&mut scene.render, &args);

    let composition = compose_scene(&scene, &catalogs)?;

    if args.base64 {
        println!("{}", crate::io::export::render_base64(&composition.figure, &scene.render)?);
        return Ok(());
    }

    let format = args
        .format
        .or_else(|| args.out.as_deref().and_then(ExportFormat::from_path))
        .unwrap_or(ExportFormat::Png);
    let path = args
        .out
        .clone()
        .unwrap_or_else(|| crate::io::export::default_output_path(format));
    crate::io::export::write_figure(&path, &composition.figure, format, &scene.render)?;

    if !args.quiet {
        println!("{}", crate::report::format_report(&composition.report, &scene.viewport));
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn handle_preview(args: PreviewArgs) -> Result<(), AppError> {
    let catalogs = load_catalogs(&args.scene.catalogs)?;
    let scene = scene_from_args(&args.scene, &catalogs)?;
    let composition = compose_scene(&scene, &catalogs)?;

    println!(
        "{}",
        crate::plot::render_ascii_figure(&composition.figure, args.width, args.height)
    );
    println!("{}", crate::report::format_report(&composition.report, &scene.viewport));
    Ok(())
}

fn handle_list(args: CatalogArgs) -> Result<(), AppError> {
    let catalogs = load_catalogs(&args)?;
    println!("{}", crate::report::format_catalogs(&catalogs.models, &catalogs.bounds));
    Ok(())
}

fn apply_render_overrides(render: &mut RenderSettings, args: &RenderArgs) {
    if let Some(dpi) = args.dpi {
        render.dpi = dpi;
    }
    if let Some(w) = args.width_in {
        render.width_in = w;
    }
    if let Some(h) = args.height_in {
        render.height_in = h;
    }
}

/// Resolve the scene from a config file, or from the individual flags.
pub fn scene_from_args(args: &SceneArgs, catalogs: &Catalogs) -> Result<Scene, AppError> {
    let mut scene = match &args.config {
        Some(path) => Scene::from_config(&read_plot_config(path)?)?,
        None => Scene {
            viewport: viewport_from_args(args)?,
            selection: selection_from_args(args, catalogs),
            compose: ComposeOptions::default(),
            render: RenderSettings::default(),
        },
    };

    if let Some(samples) = args.samples {
        scene.compose.samples = samples;
    }
    if let Some(tol) = args.tie_tol {
        scene.compose.tie_rel_tol = tol;
    }
    scene.compose.validate()?;
    Ok(scene)
}

fn viewport_from_args(args: &SceneArgs) -> Result<Viewport, AppError> {
    let units = if args.log10 {
        ViewportUnits::Log10
    } else {
        ViewportUnits::Values
    };
    // Defaults are raw values; express them in the caller's units.
    let or_default = |arg: Option<f64>, default: f64| match (arg, units) {
        (Some(v), _) => v,
        (None, ViewportUnits::Values) => default,
        (None, ViewportUnits::Log10) => default.log10(),
    };
    Viewport::from_units(
        units,
        or_default(args.mmin, DEFAULT_MASS_MIN_EV),
        or_default(args.mmax, DEFAULT_MASS_MAX_EV),
        or_default(args.ymin, DEFAULT_COUPLING_MIN),
        or_default(args.ymax, DEFAULT_COUPLING_MAX),
    )
}

/// Models: `--model` list, else none with `--no-models`, else all.
/// Bounds: `--bound` and `--category` union, else none with `--no-bounds`, else catalog defaults.
fn selection_from_args(args: &SceneArgs, catalogs: &Catalogs) -> Selection {
    let mut selection = Selection::defaults(&catalogs.models, &catalogs.bounds);

    if !args.models.is_empty() || args.no_models {
        selection.set_all_models(&catalogs.models, false);
        for name in &args.models {
            selection.set_model(name, true);
        }
    }

    if !args.bounds.is_empty() || !args.categories.is_empty() || args.no_bounds {
        for entry in catalogs.bounds.entries() {
            selection.set_bound(entry.name(), false);
        }
        for name in &args.bounds {
            selection.set_bound(name, true);
        }
        for category in &args.categories {
            selection.set_category(&catalogs.bounds, category, true);
        }
    }

    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundCatalog;
    use crate::models::ModelCatalog;

    fn catalogs() -> Catalogs {
        Catalogs {
            models: ModelCatalog::builtin(),
            bounds: BoundCatalog::builtin(None),
        }
    }

    #[test]
    fn defaults_mirror_the_dashboard() {
        let scene = scene_from_args(&SceneArgs::default(), &catalogs()).unwrap();
        assert_eq!(scene.viewport, Viewport::default());
        assert!(scene.selection.model_enabled("KSVZ"));
        assert!(scene.selection.model_enabled("Composite Axion"));
        assert!(scene.selection.bound_enabled("Helioscopes"));
        assert!(!scene.selection.bound_enabled("QCD Axion"));
    }

    #[test]
    fn log10_defaults_match_value_defaults() {
        let args = SceneArgs {
            log10: true,
            ..SceneArgs::default()
        };
        let vp = scene_from_args(&args, &catalogs()).unwrap().viewport;
        let (x0, x1) = vp.x_limits();
        approx::assert_relative_eq!(x0, 1e-12, max_relative = 1e-12);
        approx::assert_relative_eq!(x1, 1e-1, max_relative = 1e-12);
    }

    #[test]
    fn explicit_lists_replace_defaults() {
        let args = SceneArgs {
            models: vec!["KSVZ".into()],
            categories: vec!["Test QCD".into()],
            ..SceneArgs::default()
        };
        let sel = scene_from_args(&args, &catalogs()).unwrap().selection;
        assert_eq!(sel.models().collect::<Vec<_>>(), vec!["KSVZ"]);
        assert_eq!(sel.bounds().collect::<Vec<_>>(), vec!["QCD Axion"]);
    }

    #[test]
    fn no_flags_clear_selection() {
        let args = SceneArgs {
            no_models: true,
            no_bounds: true,
            ..SceneArgs::default()
        };
        let sel = scene_from_args(&args, &catalogs()).unwrap().selection;
        assert_eq!(sel.models().count(), 0);
        assert_eq!(sel.bounds().count(), 0);
    }

    #[test]
    fn inverted_viewport_is_a_config_error() {
        let args = SceneArgs {
            mmin: Some(1.0),
            mmax: Some(1e-3),
            ..SceneArgs::default()
        };
        assert_eq!(scene_from_args(&args, &catalogs()).unwrap_err().exit_code(), 2);
    }
}
