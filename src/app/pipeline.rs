//! Shared "compose then export" logic used by the CLI and by library callers.
//!
//! config -> scene (viewport, selection, options) -> composition -> bytes
//!
//! The CLI only adds argument handling and printing on top of this.

use std::path::Path;

use crate::bounds::BoundCatalog;
use crate::compose::{Composer, Composition};
use crate::domain::{ComposeOptions, PlotConfig, RenderSettings, Selection, Viewport};
use crate::error::AppError;
use crate::io::export::render_base64;
use crate::models::ModelCatalog;

/// Model and bound catalogs, built once per process.
#[derive(Debug)]
pub struct Catalogs {
    pub models: ModelCatalog,
    pub bounds: BoundCatalog,
}

impl Catalogs {
    /// Built-in models (or `models_file`) plus the bound catalog for `data_dir`.
    pub fn load(data_dir: Option<&Path>, models_file: Option<&Path>) -> Result<Self, AppError> {
        let models = match models_file {
            Some(path) => ModelCatalog::from_json_file(path)?,
            None => ModelCatalog::builtin(),
        };
        let bounds = BoundCatalog::load(data_dir)?;
        Ok(Self { models, bounds })
    }
}

/// Everything one composition and export needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    pub selection: Selection,
    pub compose: ComposeOptions,
    pub render: RenderSettings,
}

impl Scene {
    /// Validate a configuration and turn it into a scene.
    pub fn from_config(config: &PlotConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self {
            viewport: config.viewport()?,
            selection: config.selection(),
            compose: config.compose.clone(),
            render: config.render.clone(),
        })
    }

    /// Check the parts a viewport constructor does not cover.
    pub fn validate(&self) -> Result<(), AppError> {
        self.compose.validate()?;
        self.render.pixel_size()?;
        Ok(())
    }
}

/// Compose a validated scene with a one-shot [`Composer`].
pub fn compose_scene(scene: &Scene, catalogs: &Catalogs) -> Result<Composition, AppError> {
    scene.validate()?;
    let mut composer = Composer::new(&catalogs.models, &catalogs.bounds, scene.compose.clone())?;
    composer.recompute(&scene.viewport, &scene.selection);
    composer
        .take()
        .ok_or_else(|| AppError::new(1, "Composer holds no figure after recompute."))
}

/// Configuration in, base64 PNG out.
pub fn render_config_base64(config: &PlotConfig, catalogs: &Catalogs) -> Result<String, AppError> {
    let scene = Scene::from_config(config)?;
    let composition = compose_scene(&scene, catalogs)?;
    render_base64(&composition.figure, &scene.render)
}

/// JSON configuration text in, base64 PNG out.
pub fn render_json_base64(json: &str, catalogs: &Catalogs) -> Result<String, AppError> {
    let config = PlotConfig::from_json_str(json)?;
    render_config_base64(&config, catalogs)
}
