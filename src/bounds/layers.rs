//! Built-in bound layer implementations.
//!
//! - `FilledLimit`: region between a limit curve and a ceiling, read from a file
//! - `LineLimit`: a projected sensitivity drawn as a line, read from a file
//! - `QcdBand`: the QCD axion band over a range of anomaly coefficients
//! - `NoopLayer`: placeholder used when limit data is unavailable
//!
//! Recognised parameters: `color`, `edge_color`, `alpha`, `linewidth`, `y_top`,
//! `label`, `text`, `text_pos`, `text_size`, `c_min`, `c_max`.

use std::path::PathBuf;

use crate::bounds::params::{color_param, f64_param, point_param, str_param};
use crate::bounds::{BoundLayer, LayerError, LayerParams};
use crate::figure::{Axes, Color, FillStyle, LineStyle};
use crate::io::limit_data::read_limit_curve;
use crate::models::g_agamma;
use crate::plot::grid::log_space;

const DEFAULT_FILL: Color = Color::rgb(139, 0, 0);
const DEFAULT_QCD: Color = Color::rgb(255, 215, 0);

/// E/N = 5/3 gives C = 5/3 − 1.92.
pub const QCD_C_MIN: f64 = 5.0 / 3.0 - 1.92;
/// E/N = 44/3 gives C = 44/3 − 1.92.
pub const QCD_C_MAX: f64 = 44.0 / 3.0 - 1.92;

const QCD_SAMPLES: usize = 200;

fn label_param(params: &LayerParams) -> Result<Option<String>, LayerError> {
    Ok(str_param(params, "label")?.map(str::to_string))
}

/// Optional annotation: `text` at `text_pos`, or at `fallback` when no position is given.
fn annotate(axes: &mut Axes, params: &LayerParams, fallback: (f64, f64), color: Color) -> Result<(), LayerError> {
    if let Some(text) = str_param(params, "text")? {
        let (x, y) = point_param(params, "text_pos")?.unwrap_or(fallback);
        let size = f64_param(params, "text_size", 10.0)?;
        axes.text(x, y, text, size, color);
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct FilledLimit {
    path: PathBuf,
}

impl FilledLimit {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BoundLayer for FilledLimit {
    fn draw(&self, axes: &mut Axes, params: &LayerParams) -> Result<(), LayerError> {
        let color = color_param(params, "color", DEFAULT_FILL)?;
        let edge_color = color_param(params, "edge_color", Color::BLACK)?;
        let alpha = f64_param(params, "alpha", 0.6)?;
        let linewidth = f64_param(params, "linewidth", 1.0)?;
        let y_top = f64_param(params, "y_top", 1.0)?;
        let label = label_param(params)?;

        let curve = read_limit_curve(&self.path)?;
        let (first, last) = match (curve.first(), curve.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => return Err(LayerError::Other("limit curve is empty".into())),
        };
        let anchor = curve[curve.len() / 2];

        let mut polygon = curve;
        polygon.push((last.0, y_top));
        polygon.push((first.0, y_top));

        let edge = (linewidth > 0.0).then(|| LineStyle::new(edge_color, linewidth));
        axes.fill(polygon, FillStyle::new(color, alpha), edge, label);
        annotate(axes, params, anchor, Color::BLACK)
    }

    fn kind(&self) -> &'static str {
        "filled_limit"
    }
}

#[derive(Debug, Clone)]
pub struct LineLimit {
    path: PathBuf,
}

impl LineLimit {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BoundLayer for LineLimit {
    fn draw(&self, axes: &mut Axes, params: &LayerParams) -> Result<(), LayerError> {
        let color = color_param(params, "color", Color::BLACK)?;
        let alpha = f64_param(params, "alpha", 1.0)?;
        let linewidth = f64_param(params, "linewidth", 1.5)?;
        let label = label_param(params)?;

        let curve = read_limit_curve(&self.path)?;
        let anchor = curve[curve.len() / 2];
        let (xs, ys): (Vec<f64>, Vec<f64>) = curve.into_iter().unzip();
        axes.plot(xs, ys, LineStyle::new(color, linewidth).with_alpha(alpha), label);
        annotate(axes, params, anchor, color)
    }

    fn kind(&self) -> &'static str {
        "line_limit"
    }
}

/// The QCD axion band between `|g(m, c_min)|` and `|g(m, c_max)|`.
///
/// Sampled over the current x limits of the axes it draws on.
#[derive(Debug, Clone, Copy, Default)]
pub struct QcdBand;

impl BoundLayer for QcdBand {
    fn draw(&self, axes: &mut Axes, params: &LayerParams) -> Result<(), LayerError> {
        let c_min = f64_param(params, "c_min", QCD_C_MIN)?;
        let c_max = f64_param(params, "c_max", QCD_C_MAX)?;
        let color = color_param(params, "color", DEFAULT_QCD)?;
        let alpha = f64_param(params, "alpha", 0.35)?;
        let label = label_param(params)?;

        let (x0, x1) = axes.xlim();
        let masses = log_space(x0, x1, QCD_SAMPLES).map_err(|e| LayerError::Other(e.to_string()))?;
        let (lower, upper): (Vec<f64>, Vec<f64>) = masses
            .iter()
            .map(|&m| {
                let (a, b) = (g_agamma(m, c_min), g_agamma(m, c_max));
                (a.min(b), a.max(b))
            })
            .unzip();

        let anchor = (masses[QCD_SAMPLES / 2], upper[QCD_SAMPLES / 2]);
        axes.fill_between(masses, lower, upper, FillStyle::new(color, alpha), label);
        annotate(axes, params, anchor, Color::BLACK)
    }

    fn kind(&self) -> &'static str {
        "qcd_band"
    }
}

/// Draws nothing; stands in for layers whose data is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLayer;

impl BoundLayer for NoopLayer {
    fn draw(&self, _axes: &mut Axes, _params: &LayerParams) -> Result<(), LayerError> {
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Artist;
    use serde_json::json;

    fn temp_limit_file(name: &str, body: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("axl-layers-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    fn params(v: serde_json::Value) -> LayerParams {
        serde_json::from_value(v).unwrap()
    }

    fn axes() -> Axes {
        let mut ax = Axes::new();
        ax.set_xlim(1e-12, 1e-1);
        ax.set_ylim(1e-20, 1e-8);
        ax.set_autoscale(false);
        ax
    }

    #[test]
    fn filled_limit_closes_region_at_ceiling() {
        let path = temp_limit_file("filled.txt", "1e-6 1e-10\n1e-4 2e-10\n1e-2 5e-10\n");
        let mut ax = axes();
        FilledLimit::new(&path)
            .draw(&mut ax, &params(json!({"label": "CAST", "y_top": 1e-5, "text": "CAST"})))
            .unwrap();

        assert_eq!(ax.artist_count(), 2);
        match &ax.artists()[0] {
            Artist::Region(r) => {
                assert_eq!(r.label.as_deref(), Some("CAST"));
                assert_eq!(r.points.len(), 5);
                assert_eq!(r.points[3], (1e-2, 1e-5));
                assert_eq!(r.points[4], (1e-6, 1e-5));
            }
            other => panic!("expected region, got {other:?}"),
        }
        match &ax.artists()[1] {
            Artist::Text(t) => assert_eq!((t.x, t.y), (1e-4, 2e-10)),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn filled_limit_without_data_fails() {
        let mut ax = axes();
        let err = FilledLimit::new("/nonexistent/axl/missing.txt")
            .draw(&mut ax, &LayerParams::new())
            .unwrap_err();
        assert!(matches!(err, LayerError::Data { .. }));
        assert_eq!(ax.artist_count(), 0);
    }

    #[test]
    fn bad_parameter_fails_before_drawing() {
        let path = temp_limit_file("badparam.txt", "1 1\n2 2\n");
        let mut ax = axes();
        let err = FilledLimit::new(&path)
            .draw(&mut ax, &params(json!({"alpha": "opaque"})))
            .unwrap_err();
        assert!(matches!(err, LayerError::Param { .. }));
        assert_eq!(ax.artist_count(), 0);
    }

    #[test]
    fn line_limit_draws_polyline() {
        let path = temp_limit_file("line.txt", "1e-5 1e-12\n1e-3 1e-11\n");
        let mut ax = axes();
        LineLimit::new(&path)
            .draw(&mut ax, &params(json!({"color": "navy", "label": "IAXO"})))
            .unwrap();
        match &ax.artists()[0] {
            Artist::Line(l) => {
                assert_eq!(l.xs, vec![1e-5, 1e-3]);
                assert_eq!(l.label.as_deref(), Some("IAXO"));
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn qcd_band_spans_current_mass_range() {
        let mut ax = axes();
        QcdBand.draw(&mut ax, &LayerParams::new()).unwrap();
        match &ax.artists()[0] {
            Artist::Band(b) => {
                assert_eq!(b.xs.len(), QCD_SAMPLES);
                assert_eq!(b.xs[0], 1e-12);
                assert_eq!(*b.xs.last().unwrap(), 1e-1);
                assert!(b.lower.iter().zip(&b.upper).all(|(lo, hi)| lo <= hi));
                assert_eq!(b.upper[0], g_agamma(1e-12, QCD_C_MAX));
            }
            other => panic!("expected band, got {other:?}"),
        }
    }

    #[test]
    fn noop_draws_nothing() {
        let mut ax = axes();
        NoopLayer.draw(&mut ax, &LayerParams::new()).unwrap();
        assert_eq!(ax.artist_count(), 0);
    }
}
