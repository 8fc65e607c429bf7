//! ASCII preview of a composed figure.
//!
//! Fixed-size character grid on log–log axes, optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Glyphs:
//! - bands: `.`
//! - regions: `:`
//! - labelled lines: `a`, `b`, `c`, ... (listed under the grid)
//! - unlabelled lines: `-`
//!
//! Annotations are not drawn.

use crate::figure::{Artist, Figure};

const BAND: char = '.';
const REGION: char = ':';
const PLAIN_LINE: char = '-';

/// Log-space mapping from data coordinates to grid cells.
struct Frame {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    width: usize,
    height: usize,
}

impl Frame {
    fn col(&self, x: f64) -> f64 {
        (x.log10() - self.x0) / (self.x1 - self.x0) * (self.width as f64 - 1.0)
    }

    fn row(&self, y: f64) -> f64 {
        // y = top is max -> row 0
        (self.height as f64 - 1.0) * (1.0 - (y.log10() - self.y0) / (self.y1 - self.y0))
    }

    fn cell(&self, (x, y): (f64, f64)) -> Option<(isize, isize)> {
        if !(x > 0.0 && y > 0.0 && x.is_finite() && y.is_finite()) {
            return None;
        }
        Some((self.col(x).round() as isize, self.row(y).round() as isize))
    }

    /// Cell centre in `(col, row)` units, as fractional grid coordinates.
    fn to_grid(&self, (x, y): (f64, f64)) -> Option<(f64, f64)> {
        (x > 0.0 && y > 0.0 && x.is_finite() && y.is_finite()).then(|| (self.col(x), self.row(y)))
    }
}

/// Render `figure` as a `width × height` character plot with a header and legend.
pub fn render_ascii_figure(figure: &Figure, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let axes = figure.axes();
    let (xmin, xmax) = axes.xlim();
    let (ymin, ymax) = axes.ylim();

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: m=[{xmin:.1e}, {xmax:.1e}] eV | g=[{ymin:.1e}, {ymax:.1e}] GeV^-1 | log-log\n"
    ));

    if !(xmin > 0.0 && ymin > 0.0 && xmax > xmin && ymax > ymin) {
        out.push_str("(limits cannot be shown on log axes)\n");
        return out;
    }

    let frame = Frame {
        x0: xmin.log10(),
        x1: xmax.log10(),
        y0: ymin.log10(),
        y1: ymax.log10(),
        width,
        height,
    };
    let mut grid = vec![vec![' '; width]; height];
    let mut legend: Vec<(char, &str)> = Vec::new();
    let mut next_letter = 0usize;

    for artist in axes.artists() {
        match artist {
            Artist::Band(band) => {
                fill_polygon(&mut grid, &frame, &band.outline(), BAND);
                if let Some(label) = band.label.as_deref() {
                    legend.push((BAND, label));
                }
            }
            Artist::Region(region) => {
                fill_polygon(&mut grid, &frame, &region.points, REGION);
                if let Some(label) = region.label.as_deref() {
                    legend.push((REGION, label));
                }
            }
            Artist::Line(line) => {
                let glyph = match line.label.as_deref() {
                    Some(label) => {
                        let ch = char::from(b'a' + (next_letter % 26) as u8);
                        next_letter += 1;
                        legend.push((ch, label));
                        ch
                    }
                    None => PLAIN_LINE,
                };
                draw_polyline(&mut grid, &frame, line.points(), glyph);
            }
            Artist::Text(_) => {}
        }
    }

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    for (glyph, label) in legend {
        out.push_str(&format!("  {glyph}  {label}\n"));
    }

    out
}

fn draw_polyline(grid: &mut [Vec<char>], frame: &Frame, points: impl Iterator<Item = (f64, f64)>, ch: char) {
    let mut prev = None;
    for p in points {
        let Some((x, y)) = frame.cell(p) else {
            prev = None;
            continue;
        };
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, y, ch),
            None => put(grid, x, y, ch),
        }
        prev = Some((x, y));
    }
}

fn put(grid: &mut [Vec<char>], x: isize, y: isize, ch: char) {
    if y >= 0 && (y as usize) < grid.len() && x >= 0 && (x as usize) < grid[0].len() {
        grid[y as usize][x as usize] = ch;
    }
}

/// Integer line drawing (Bresenham).
fn draw_line(grid: &mut [Vec<char>], x0: isize, y0: isize, x1: isize, y1: isize, ch: char) {
    let (mut x0, mut y0) = (x0, y0);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(grid, x0, y0, ch);

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Mark every cell whose centre lies inside the polygon (even–odd rule).
fn fill_polygon(grid: &mut [Vec<char>], frame: &Frame, points: &[(f64, f64)], ch: char) {
    let poly: Vec<(f64, f64)> = points.iter().filter_map(|&p| frame.to_grid(p)).collect();
    if poly.len() < 3 {
        return;
    }
    for (r, row) in grid.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            if inside(&poly, (c as f64, r as f64)) {
                *cell = ch;
            }
        }
    }
}

fn inside(poly: &[(f64, f64)], (px, py): (f64, f64)) -> bool {
    let mut hit = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let (xi, yi) = poly[i];
        let (xj, yj) = poly[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            hit = !hit;
        }
        j = i;
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Color, FillStyle, LineStyle};

    fn decade_figure() -> Figure {
        let mut fig = Figure::new();
        let ax = fig.axes_mut();
        ax.set_xlim(1.0, 100.0);
        ax.set_ylim(1.0, 100.0);
        ax.set_autoscale(false);
        fig
    }

    #[test]
    fn preview_golden_snapshot_small() {
        let mut fig = decade_figure();
        fig.axes_mut().plot(
            vec![1.0, 100.0],
            vec![1.0, 100.0],
            LineStyle::new(Color::BLACK, 1.0),
            Some("diag".into()),
        );

        let txt = render_ascii_figure(&fig, 10, 5);
        let expected = concat!(
            "Plot: m=[1.0e0, 1.0e2] eV | g=[1.0e0, 1.0e2] GeV^-1 | log-log\n",
            "        aa\n",
            "      aa  \n",
            "    aa    \n",
            "  aa      \n",
            "aa        \n",
            "  a  diag\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn band_covering_everything_fills_the_grid() {
        let mut fig = decade_figure();
        fig.axes_mut().fill_between(
            vec![0.1, 1000.0],
            vec![0.1, 0.1],
            vec![1000.0, 1000.0],
            FillStyle::new(Color::BLACK, 0.5),
            None,
        );
        let txt = render_ascii_figure(&fig, 10, 5);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| *r == ".........."));
    }

    #[test]
    fn legend_letters_wrap_for_long_model_lists() {
        let mut fig = decade_figure();
        for i in 0..300 {
            fig.axes_mut().plot(
                vec![1.0, 100.0],
                vec![10.0, 10.0],
                LineStyle::new(Color::BLACK, 1.0),
                Some(format!("model {i}")),
            );
        }
        let txt = render_ascii_figure(&fig, 10, 5);
        let legend: Vec<&str> = txt.lines().skip(6).collect();
        assert_eq!(legend.len(), 300);
        assert_eq!(legend[26], "  a  model 26");
        assert_eq!(legend[299], "  n  model 299");
    }

    #[test]
    fn lines_draw_over_fills_and_skip_non_positive_points() {
        let mut fig = decade_figure();
        fig.axes_mut().fill(
            vec![(0.1, 0.1), (1000.0, 0.1), (1000.0, 1000.0), (0.1, 1000.0)],
            FillStyle::new(Color::BLACK, 0.5),
            None,
            Some("region".into()),
        );
        fig.axes_mut().plot(
            vec![1.0, 100.0, 200.0],
            vec![10.0, 10.0, 0.0],
            LineStyle::new(Color::BLACK, 1.0),
            None,
        );
        let txt = render_ascii_figure(&fig, 10, 5);
        let rows: Vec<&str> = txt.lines().collect();
        assert_eq!(rows[3], "----------");
        assert_eq!(rows[1], "::::::::::");
        assert_eq!(rows[6], "  :  region");
    }
}
