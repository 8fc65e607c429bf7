//! Drawable elements of a figure.
//!
//! Artists are plain data in data coordinates (eV, GeV⁻¹). They carry no
//! backend handles, so a figure can be compared, dumped to JSON, or handed to
//! any renderer.

use serde::Serialize;

use crate::figure::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    pub alpha: f64,
}

impl LineStyle {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width, alpha: 1.0 }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FillStyle {
    pub color: Color,
    pub alpha: f64,
}

impl FillStyle {
    pub fn new(color: Color, alpha: f64) -> Self {
        Self { color, alpha }
    }
}

/// A polyline through `(xs[i], ys[i])`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub style: LineStyle,
    pub label: Option<String>,
}

impl Line {
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

/// The filled region between `lower` and `upper` over a shared `xs` grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub xs: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub fill: FillStyle,
    pub label: Option<String>,
}

impl Band {
    /// Closed outline: along `upper` left to right, back along `lower`.
    pub fn outline(&self) -> Vec<(f64, f64)> {
        let upper = self.xs.iter().copied().zip(self.upper.iter().copied());
        let lower = self.xs.iter().copied().zip(self.lower.iter().copied()).rev();
        upper.chain(lower).collect()
    }
}

/// An arbitrary filled polygon, optionally outlined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub points: Vec<(f64, f64)>,
    pub fill: FillStyle,
    pub edge: Option<LineStyle>,
    pub label: Option<String>,
}

/// Free-floating annotation anchored at a data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub size: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artist {
    Line(Line),
    Band(Band),
    Region(Region),
    Text(TextLabel),
}

/// Bounding box of the log-drawable (finite, strictly positive) data of an artist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Artist {
    /// Legend text, if the artist was given one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Artist::Line(l) => l.label.as_deref(),
            Artist::Band(b) => b.label.as_deref(),
            Artist::Region(r) => r.label.as_deref(),
            Artist::Text(_) => None,
        }
    }

    pub fn extent(&self) -> Option<Extent> {
        match self {
            Artist::Line(l) => extent_of(l.points()),
            Artist::Band(b) => {
                let upper = b.xs.iter().copied().zip(b.upper.iter().copied());
                let lower = b.xs.iter().copied().zip(b.lower.iter().copied());
                extent_of(upper.chain(lower))
            }
            Artist::Region(r) => extent_of(r.points.iter().copied()),
            Artist::Text(t) => extent_of(std::iter::once((t.x, t.y))),
        }
    }
}

fn extent_of(points: impl Iterator<Item = (f64, f64)>) -> Option<Extent> {
    let drawable = |v: f64| v.is_finite() && v > 0.0;
    let mut out: Option<Extent> = None;
    for (x, y) in points.filter(|&(x, y)| drawable(x) && drawable(y)) {
        out = Some(match out {
            None => Extent { x: (x, x), y: (y, y) },
            Some(e) => Extent {
                x: (e.x.0.min(x), e.x.1.max(x)),
                y: (e.y.0.min(y), e.y.1.max(y)),
            },
        });
    }
    out
}
