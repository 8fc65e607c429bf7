//! Plotters rendering of a [`Figure`].
//!
//! `draw_figure` works on any plotters backend; `render_rgb`, `render_png` and
//! `render_svg` wrap the bitmap and SVG backends. The canvas is the figure plus
//! small margins, with nothing around it.
//!
//! Drawing is deterministic: the same figure and settings give the same bytes.
//! Text is laid out and rasterised with DejaVu Sans, bundled into the binary and
//! registered with plotters on first use, so no system fonts are consulted.
//!
//! Artist styles come from bound layers and are not trusted: line widths and
//! text sizes are clamped, and non-finite values fall back to defaults.

use std::sync::OnceLock;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::domain::RenderSettings;
use crate::error::AppError;
use crate::figure::{Artist, Color as FigureColor, Figure, LegendPosition, LineStyle};

pub mod clip;

use clip::{clip_polygon, clip_polyline, visible, LogRect};

static DEJAVU_SANS: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");

const FONT: &str = "DejaVu Sans";

/// Widest stroke drawn, in points.
const MAX_LINE_WIDTH: f64 = 24.0;
/// Largest annotation drawn, in points.
const MAX_TEXT_SIZE: f64 = 96.0;

/// Register the bundled font with plotters. Called by the `render_*` helpers;
/// callers driving [`draw_figure`] on their own backend call it first.
pub fn register_fonts() -> Result<(), AppError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED.get_or_init(|| {
        plotters::style::register_font(FONT, plotters::style::FontStyle::Normal, DEJAVU_SANS).is_ok()
    });
    if ok {
        Ok(())
    } else {
        Err(AppError::render("Bundled font could not be loaded."))
    }
}

fn line_width(width: f64) -> f64 {
    if width.is_finite() { width.clamp(0.0, MAX_LINE_WIDTH) } else { 1.0 }
}

fn opacity(alpha: f64) -> f64 {
    if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 1.0 }
}

/// `None` for sizes that cannot be drawn.
fn text_size(size: f64) -> Option<f64> {
    (size.is_finite() && size > 0.0).then(|| size.min(MAX_TEXT_SIZE))
}

fn rgb(c: FigureColor) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

fn legend_position(pos: LegendPosition) -> SeriesLabelPosition {
    match pos {
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

/// Draw `figure` onto `root`. `scale` multiplies line widths, fonts and margins.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    scale: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let px = |v: f64| (v * scale).round().max(1.0) as u32;
    let axes = figure.axes();
    let (x0, x1) = axes.xlim();
    let (y0, y1) = axes.ylim();

    root.fill(&WHITE)?;
    let Some(window) = LogRect::from_limits((x0, x1), (y0, y1)) else {
        // Nothing can be placed on log axes with these limits.
        return Ok(());
    };

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(px(10.0))
        .x_label_area_size(px(40.0))
        .y_label_area_size(px(64.0));
    if let Some(title) = axes.title() {
        builder.caption(title, (FONT, f64::from(px(16.0))).into_font());
    }
    let mut chart = builder.build_cartesian_2d((x0..x1).log_scale(), (y0..y1).log_scale())?;

    let tick = |v: &f64| format!("{v:.0e}");
    let grid = rgb(FigureColor::GRID);
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_label_formatter(&tick)
            .y_label_formatter(&tick)
            .label_style((FONT, f64::from(px(11.0))).into_font())
            .axis_desc_style((FONT, f64::from(px(13.0))).into_font())
            .bold_line_style(grid.mix(0.6))
            .light_line_style(grid.mix(0.2))
            .axis_style(BLACK.stroke_width(px(1.0)));
        if let Some(x) = axes.x_label() {
            mesh.x_desc(x);
        }
        if let Some(y) = axes.y_label() {
            mesh.y_desc(y);
        }
        if !axes.grid() {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    let swatch = px(18.0) as i32;
    let stroke = |s: &LineStyle| rgb(s.color).mix(opacity(s.alpha)).stroke_width(px(line_width(s.width)));

    for artist in axes.artists() {
        match artist {
            Artist::Line(line) => {
                let style = stroke(&line.style);
                let runs = clip_polyline(&window, line.points());
                let anno = chart.draw_series(runs.into_iter().map(|run| PathElement::new(run, style)))?;
                if let Some(label) = &line.label {
                    anno.label(label.as_str())
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + swatch, y)], style));
                }
            }
            Artist::Band(band) => {
                let fill = rgb(band.fill.color).mix(opacity(band.fill.alpha)).filled();
                let outline = clip_polygon(&window, band.outline());
                let anno = chart.draw_series((!outline.is_empty()).then(|| Polygon::new(outline, fill)))?;
                if let Some(label) = &band.label {
                    anno.label(label.as_str()).legend(move |(x, y)| {
                        Rectangle::new([(x, y - swatch / 3), (x + swatch, y + swatch / 3)], fill)
                    });
                }
            }
            Artist::Region(region) => {
                let fill = rgb(region.fill.color).mix(opacity(region.fill.alpha)).filled();
                let polygon = clip_polygon(&window, region.points.iter().copied());
                if polygon.is_empty() {
                    continue;
                }
                if let Some(edge) = &region.edge {
                    let mut ring = polygon.clone();
                    ring.push(polygon[0]);
                    chart.draw_series(std::iter::once(PathElement::new(ring, stroke(edge))))?;
                }
                let anno = chart.draw_series(std::iter::once(Polygon::new(polygon, fill)))?;
                if let Some(label) = &region.label {
                    anno.label(label.as_str()).legend(move |(x, y)| {
                        Rectangle::new([(x, y - swatch / 3), (x + swatch, y + swatch / 3)], fill)
                    });
                }
            }
            Artist::Text(text) => {
                let Some(size) = text_size(text.size) else {
                    continue;
                };
                if !visible(&window, (text.x, text.y)) {
                    continue;
                }
                let color = rgb(text.color);
                let font = (FONT, size * scale).into_font().color(&color);
                chart.draw_series(std::iter::once(Text::new(text.content.clone(), (text.x, text.y), font)))?;
            }
        }
    }

    if let Some(pos) = axes.legend() {
        if axes.labelled_artists().next().is_some() {
            chart
                .configure_series_labels()
                .position(legend_position(pos))
                .background_style(WHITE.mix(0.85))
                .border_style(BLACK)
                .label_font((FONT, f64::from(px(11.0))).into_font())
                .draw()?;
        }
    }

    Ok(())
}

/// Rasterise into a tightly packed RGB8 buffer. Returns the buffer and its size.
pub fn render_rgb(figure: &Figure, settings: &RenderSettings) -> Result<(Vec<u8>, (u32, u32)), AppError> {
    let (w, h) = settings.pixel_size()?;
    register_fonts()?;
    let mut buf = vec![0u8; (w as usize) * (h as usize) * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        draw_figure(&root, figure, settings.scale()).map_err(|e| AppError::render(format!("Drawing failed: {e}")))?;
        root.present()
            .map_err(|e| AppError::render(format!("Drawing failed: {e}")))?;
    }
    Ok((buf, (w, h)))
}

/// Rasterise and encode as PNG.
pub fn render_png(figure: &Figure, settings: &RenderSettings) -> Result<Vec<u8>, AppError> {
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    let (buf, (w, h)) = render_rgb(figure, settings)?;
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&buf, w, h, ExtendedColorType::Rgb8)
        .map_err(|e| AppError::render(format!("PNG encoding failed: {e}")))?;
    Ok(out)
}

/// Render as an SVG document.
pub fn render_svg(figure: &Figure, settings: &RenderSettings) -> Result<String, AppError> {
    let (w, h) = settings.pixel_size()?;
    register_fonts()?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (w, h)).into_drawing_area();
        draw_figure(&root, figure, settings.scale()).map_err(|e| AppError::render(format!("Drawing failed: {e}")))?;
        root.present()
            .map_err(|e| AppError::render(format!("Drawing failed: {e}")))?;
    }
    Ok(svg)
}
