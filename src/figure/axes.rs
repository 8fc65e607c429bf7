//! The shared log–log axes every model curve and bound layer draws onto.
//!
//! `Axes` mimics the small part of a plotting library's axes API that bound
//! routines need: stored view limits, an autoscale flag, and methods that append
//! artists. With autoscale on, appending an artist widens the stored limits to
//! include its data, which is exactly what the layer invoker guards against.

use serde::Serialize;

use crate::figure::artist::{Artist, Band, FillStyle, Line, LineStyle, Region, TextLabel};
use crate::figure::color::Color;

/// Where the legend box is anchored inside the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axes {
    xlim: (f64, f64),
    ylim: (f64, f64),
    autoscale: bool,
    artists: Vec<Artist>,
    title: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    grid: bool,
    legend: Option<LegendPosition>,
}

impl Default for Axes {
    fn default() -> Self {
        Self::new()
    }
}

impl Axes {
    /// Fresh logarithmic axes spanning one decade on each axis, autoscale on.
    pub fn new() -> Self {
        Self {
            xlim: (1.0, 10.0),
            ylim: (1.0, 10.0),
            autoscale: true,
            artists: Vec::new(),
            title: None,
            x_label: None,
            y_label: None,
            grid: false,
            legend: None,
        }
    }

    pub fn xlim(&self) -> (f64, f64) {
        self.xlim
    }

    pub fn ylim(&self) -> (f64, f64) {
        self.ylim
    }

    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        self.xlim = (lo, hi);
    }

    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        self.ylim = (lo, hi);
    }

    pub fn autoscale(&self) -> bool {
        self.autoscale
    }

    pub fn set_autoscale(&mut self, on: bool) {
        self.autoscale = on;
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    /// Artists that will appear in the legend, in drawing order.
    pub fn labelled_artists(&self) -> impl Iterator<Item = &Artist> {
        self.artists.iter().filter(|a| a.label().is_some())
    }

    /// Drop every artist appended after the first `len`.
    pub(crate) fn truncate_artists(&mut self, len: usize) {
        self.artists.truncate(len);
    }

    pub fn add_artist(&mut self, artist: Artist) {
        if self.autoscale {
            if let Some(extent) = artist.extent() {
                self.xlim = (self.xlim.0.min(extent.x.0), self.xlim.1.max(extent.x.1));
                self.ylim = (self.ylim.0.min(extent.y.0), self.ylim.1.max(extent.y.1));
            }
        }
        self.artists.push(artist);
    }

    pub fn plot(&mut self, xs: Vec<f64>, ys: Vec<f64>, style: LineStyle, label: Option<String>) {
        self.add_artist(Artist::Line(Line { xs, ys, style, label }));
    }

    pub fn fill_between(
        &mut self,
        xs: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        fill: FillStyle,
        label: Option<String>,
    ) {
        self.add_artist(Artist::Band(Band { xs, lower, upper, fill, label }));
    }

    pub fn fill(
        &mut self,
        points: Vec<(f64, f64)>,
        fill: FillStyle,
        edge: Option<LineStyle>,
        label: Option<String>,
    ) {
        self.add_artist(Artist::Region(Region { points, fill, edge, label }));
    }

    pub fn text(&mut self, x: f64, y: f64, content: impl Into<String>, size: f64, color: Color) {
        self.add_artist(Artist::Text(TextLabel {
            x,
            y,
            content: content.into(),
            size,
            color,
        }));
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn x_label(&self) -> Option<&str> {
        self.x_label.as_deref()
    }

    pub fn y_label(&self) -> Option<&str> {
        self.y_label.as_deref()
    }

    pub fn set_labels(&mut self, x: impl Into<String>, y: impl Into<String>) {
        self.x_label = Some(x.into());
        self.y_label = Some(y.into());
    }

    pub fn grid(&self) -> bool {
        self.grid
    }

    pub fn set_grid(&mut self, on: bool) {
        self.grid = on;
    }

    pub fn legend(&self) -> Option<LegendPosition> {
        self.legend
    }

    pub fn set_legend(&mut self, position: Option<LegendPosition>) {
        self.legend = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(xs: Vec<f64>, ys: Vec<f64>) -> (Vec<f64>, Vec<f64>, LineStyle) {
        (xs, ys, LineStyle::new(Color::BLACK, 1.0))
    }

    #[test]
    fn autoscale_widens_limits_to_include_data() {
        let mut ax = Axes::new();
        let (xs, ys, style) = line(vec![1e-3, 1e3], vec![1e-5, 2.0]);
        ax.plot(xs, ys, style, None);
        assert_eq!(ax.xlim(), (1e-3, 1e3));
        assert_eq!(ax.ylim(), (1e-5, 10.0));
    }

    #[test]
    fn limits_are_fixed_when_autoscale_is_off() {
        let mut ax = Axes::new();
        ax.set_xlim(1e-12, 1e-1);
        ax.set_ylim(1e-20, 1e-8);
        ax.set_autoscale(false);
        let (xs, ys, style) = line(vec![1e-20, 1e20], vec![1e-40, 1e40]);
        ax.plot(xs, ys, style, None);
        assert_eq!(ax.xlim(), (1e-12, 1e-1));
        assert_eq!(ax.ylim(), (1e-20, 1e-8));
        assert_eq!(ax.artist_count(), 1);
    }

    #[test]
    fn only_labelled_artists_reach_the_legend() {
        let mut ax = Axes::new();
        ax.fill_between(
            vec![1.0, 2.0],
            vec![1.0, 1.0],
            vec![2.0, 2.0],
            FillStyle::new(Color::BLACK, 0.25),
            None,
        );
        let (xs, ys, style) = line(vec![1.0, 2.0], vec![1.5, 1.5]);
        ax.plot(xs, ys, style, Some("centre".into()));
        ax.text(1.0, 1.0, "note", 9.0, Color::BLACK);

        let labels: Vec<_> = ax.labelled_artists().filter_map(Artist::label).collect();
        assert_eq!(labels, vec!["centre"]);
    }

    #[test]
    fn truncate_discards_trailing_artists() {
        let mut ax = Axes::new();
        ax.text(1.0, 1.0, "a", 9.0, Color::BLACK);
        ax.text(2.0, 2.0, "b", 9.0, Color::BLACK);
        ax.truncate_artists(1);
        assert_eq!(ax.artist_count(), 1);
    }
}
