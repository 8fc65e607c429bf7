//! Plot configuration files.

use std::path::Path;

use crate::domain::PlotConfig;
use crate::error::AppError;

/// Read and validate a JSON plot configuration.
pub fn read_plot_config(path: &Path) -> Result<PlotConfig, AppError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::config(format!("Failed to read config '{}': {e}", path.display())))?;
    let config = PlotConfig::from_json_str(&text)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_config_error() {
        let err = read_plot_config(Path::new("/nonexistent/axl/config.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn invalid_viewport_is_rejected_on_read() {
        let path = std::env::temp_dir().join(format!("axl-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"mmin": 1e-1, "mmax": 1e-12, "ymin": 1e-20, "ymax": 1e-8}"#).unwrap();
        let err = read_plot_config(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let _ = std::fs::remove_file(&path);
    }
}
