//! Export sink: turn a finished figure into bytes, a base64 string, or a file.
//!
//! The figure is only ever read here.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::info;

use crate::domain::{ExportFormat, RenderSettings};
use crate::error::AppError;
use crate::figure::Figure;
use crate::render::{render_png, render_svg};

/// File stem used when no output path is given.
pub const DEFAULT_FILE_STEM: &str = "AxionPhoton_Dashboard";

/// `AxionPhoton_Dashboard.<ext>` in the working directory.
pub fn default_output_path(format: ExportFormat) -> PathBuf {
    PathBuf::from(format!("{DEFAULT_FILE_STEM}.{}", format.extension()))
}

/// Encode `figure` in `format`.
pub fn render_bytes(figure: &Figure, format: ExportFormat, settings: &RenderSettings) -> Result<Vec<u8>, AppError> {
    match format {
        ExportFormat::Png => render_png(figure, settings),
        ExportFormat::Svg => render_svg(figure, settings).map(String::into_bytes),
        ExportFormat::Json => serde_json::to_vec_pretty(figure)
            .map_err(|e| AppError::render(format!("Failed to serialise figure: {e}"))),
    }
}

/// PNG bytes as standard base64, without a data-URI header.
pub fn render_base64(figure: &Figure, settings: &RenderSettings) -> Result<String, AppError> {
    let png = render_png(figure, settings)?;
    Ok(STANDARD.encode(png))
}

/// Render and write to `path`.
pub fn write_figure(
    path: &Path,
    figure: &Figure,
    format: ExportFormat,
    settings: &RenderSettings,
) -> Result<(), AppError> {
    let bytes = render_bytes(figure, format, settings)?;
    std::fs::write(path, &bytes)
        .map_err(|e| AppError::render(format!("Failed to write '{}': {e}", path.display())))?;
    info!(path = %path.display(), format = format.extension(), bytes = bytes.len(), "figure exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RenderSettings {
        RenderSettings {
            dpi: 40,
            width_in: 4.0,
            height_in: 3.0,
        }
    }

    fn figure() -> Figure {
        let mut fig = Figure::new();
        fig.axes_mut().set_xlim(1e-12, 1e-1);
        fig.axes_mut().set_ylim(1e-20, 1e-8);
        fig
    }

    #[test]
    fn default_names_follow_format() {
        assert_eq!(default_output_path(ExportFormat::Png), PathBuf::from("AxionPhoton_Dashboard.png"));
        assert_eq!(default_output_path(ExportFormat::Svg), PathBuf::from("AxionPhoton_Dashboard.svg"));
    }

    #[test]
    fn base64_is_bare_png() {
        let encoded = render_base64(&figure(), &settings()).unwrap();
        assert!(!encoded.starts_with("data:"));
        let decoded = STANDARD.decode(&encoded).unwrap();
        assert_eq!(&decoded[..4], b"\x89PNG");
    }

    #[test]
    fn json_dump_describes_the_scene() {
        let bytes = render_bytes(&figure(), ExportFormat::Json, &settings()).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["axes"]["xlim"][0].as_f64(), Some(1e-12));
        assert!(v["axes"]["artists"].as_array().unwrap().is_empty());
    }

    #[test]
    fn unwritable_path_is_a_render_error() {
        let err = write_figure(
            Path::new("/nonexistent/axl/out.png"),
            &figure(),
            ExportFormat::Png,
            &settings(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn writes_file() {
        let path = std::env::temp_dir().join(format!("axl-export-{}.svg", std::process::id()));
        write_figure(&path, &figure(), ExportFormat::Svg, &settings()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("<svg"));
        let _ = std::fs::remove_file(&path);
    }
}
