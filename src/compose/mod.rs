//! Figure composition.
//!
//! One recompute turns `(Viewport, Selection)` into a finished figure:
//!
//! 1. start from a fresh log–log figure (nothing survives from earlier calls)
//! 2. apply the viewport limits, autoscale off
//! 3. draw enabled models in catalog order
//! 4. invoke enabled bound layers in catalog order (category-major)
//! 5. add grid, legend, title and axis labels
//!
//! Output depends only on the inputs and the catalogs. Failing layers are
//! recorded in the report and never abort the composition.
//!
//! `Composer::recompute` takes `&mut self`: callers dispatch one change at a
//! time, and the borrow checker rules out overlapping recomputes. The CLI
//! pipeline (`app::pipeline::compose_scene`) drives a `Composer` too; `compose`
//! is the stateless core both share.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::bounds::{invoke_entry, BoundCatalog};
use crate::domain::{ComposeOptions, Selection, Viewport};
use crate::error::AppError;
use crate::figure::{series_color, Figure, LegendPosition};
use crate::models::ModelCatalog;
use crate::plot::curve::model_artists;
use crate::plot::grid::log_space;

pub mod report;

pub use report::*;

/// A finished figure and the record of how it was built.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub figure: Figure,
    pub report: CompositionReport,
}

/// Compose one figure from scratch.
pub fn compose(
    models: &ModelCatalog,
    bounds: &BoundCatalog,
    viewport: &Viewport,
    selection: &Selection,
    options: &ComposeOptions,
) -> Composition {
    let mut figure = Figure::new();
    let mut report = CompositionReport::default();

    let (x0, x1) = viewport.x_limits();
    let (y0, y1) = viewport.y_limits();
    {
        let axes = figure.axes_mut();
        axes.set_xlim(x0, x1);
        axes.set_ylim(y0, y1);
        axes.set_autoscale(false);
    }

    // Models.
    let masses = match log_space(x0, x1, options.samples) {
        Ok(m) => m,
        Err(e) => {
            warn!(error = %e, "mass grid unavailable; skipping model curves");
            Vec::new()
        }
    };
    if !masses.is_empty() {
        for (i, entry) in models.iter().enumerate() {
            if !selection.model_enabled(entry.name()) {
                continue;
            }
            debug!(model = entry.name(), "drawing model");
            for artist in model_artists(entry, &masses, options.tie_rel_tol, series_color(i)) {
                figure.axes_mut().add_artist(artist);
            }
            report.models.push(entry.name().to_string());
        }
    }

    // Bound layers.
    for entry in bounds.entries() {
        if selection.bound_enabled(entry.name()) {
            let outcome = invoke_entry(entry, figure.axes_mut());
            report.layers.push(outcome);
        }
    }

    report.ignored_models = unknown(selection.models(), |n| models.contains(n));
    report.ignored_bounds = unknown(selection.bounds(), |n| bounds.contains(n));
    if !report.ignored_models.is_empty() || !report.ignored_bounds.is_empty() {
        debug!(
            models = ?report.ignored_models,
            bounds = ?report.ignored_bounds,
            "ignoring selection names missing from the catalogs"
        );
    }

    // Cosmetics.
    {
        let axes = figure.axes_mut();
        axes.set_grid(true);
        axes.set_legend(Some(LegendPosition::LowerRight));
        axes.set_title(options.title.clone());
        axes.set_labels(options.x_label.clone(), options.y_label.clone());
    }

    Composition { figure, report }
}

fn unknown<'a>(names: impl Iterator<Item = &'a str>, known: impl Fn(&str) -> bool) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .filter(|n| !known(*n) && seen.insert(*n))
        .map(str::to_string)
        .collect()
}

/// Holds the catalogs and the most recent composition.
pub struct Composer<'a> {
    models: &'a ModelCatalog,
    bounds: &'a BoundCatalog,
    options: ComposeOptions,
    current: Option<Composition>,
}

impl<'a> Composer<'a> {
    pub fn new(models: &'a ModelCatalog, bounds: &'a BoundCatalog, options: ComposeOptions) -> Result<Self, AppError> {
        options.validate()?;
        Ok(Self {
            models,
            bounds,
            options,
            current: None,
        })
    }

    /// Replace the current figure with a fresh composition.
    pub fn recompute(&mut self, viewport: &Viewport, selection: &Selection) -> &Composition {
        // Drop the old figure before building the new one.
        self.current = None;
        let composition = compose(self.models, self.bounds, viewport, selection, &self.options);
        self.current.insert(composition)
    }

    pub fn current(&self) -> Option<&Composition> {
        self.current.as_ref()
    }

    /// Hand the current composition over, leaving the composer empty.
    pub fn take(&mut self) -> Option<Composition> {
        self.current.take()
    }

    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }
}
