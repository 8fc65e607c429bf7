//! Model curve generation.
//!
//! A model with a single coupling coefficient becomes one line. A model with a
//! coefficient range becomes a filled band between the two extreme couplings
//! plus a geometric-mean centerline that carries the legend entry.
//!
//! Generation is pure: it returns artists and never touches any axes.

use crate::figure::{Artist, Band, Color, FillStyle, Line, LineStyle};
use crate::models::{g_agamma, ModelEntry};

const LINE_WIDTH: f64 = 2.0;
const LINE_ALPHA: f64 = 0.95;
const BAND_ALPHA: f64 = 0.25;
const CENTER_WIDTH: f64 = 1.5;
const CENTER_ALPHA: f64 = 0.85;

/// Sampled coupling values for one model over a mass grid.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelCurve {
    Line {
        label: String,
        coupling: Vec<f64>,
    },
    Band {
        label: String,
        lower: Vec<f64>,
        upper: Vec<f64>,
        center: Vec<f64>,
    },
}

/// Evaluate a model over `masses`.
///
/// `tie_rel_tol` decides when the coupling range counts as a single value.
pub fn model_curve(entry: &ModelEntry, masses: &[f64], tie_rel_tol: f64) -> ModelCurve {
    let range = entry.coupling();
    let label = entry.legend_label();

    if range.is_degenerate(tie_rel_tol) {
        let coupling = masses.iter().map(|&m| g_agamma(m, range.low())).collect();
        return ModelCurve::Line { label, coupling };
    }

    let mut lower = Vec::with_capacity(masses.len());
    let mut upper = Vec::with_capacity(masses.len());
    let mut center = Vec::with_capacity(masses.len());
    for &m in masses {
        let y1 = g_agamma(m, range.low());
        let y2 = g_agamma(m, range.high());
        // |C| is not monotone across a sign change, so order per point.
        let (lo, hi) = (y1.min(y2), y1.max(y2));
        lower.push(lo);
        upper.push(hi);
        center.push((lo * hi).sqrt());
    }
    ModelCurve::Band {
        label,
        lower,
        upper,
        center,
    }
}

/// Artists for one model, drawn in `color`.
pub fn model_artists(entry: &ModelEntry, masses: &[f64], tie_rel_tol: f64, color: Color) -> Vec<Artist> {
    match model_curve(entry, masses, tie_rel_tol) {
        ModelCurve::Line { label, coupling } => vec![Artist::Line(Line {
            xs: masses.to_vec(),
            ys: coupling,
            style: LineStyle::new(color, LINE_WIDTH).with_alpha(LINE_ALPHA),
            label: Some(label),
        })],
        ModelCurve::Band {
            label,
            lower,
            upper,
            center,
        } => vec![
            Artist::Band(Band {
                xs: masses.to_vec(),
                lower,
                upper,
                fill: FillStyle::new(color, BAND_ALPHA),
                label: None,
            }),
            Artist::Line(Line {
                xs: masses.to_vec(),
                ys: center,
                style: LineStyle::new(color, CENTER_WIDTH).with_alpha(CENTER_ALPHA),
                label: Some(label),
            }),
        ],
    }
}
