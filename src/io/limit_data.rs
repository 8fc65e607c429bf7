//! Limit-curve files.
//!
//! A limit file is plain text with one `(mass_eV, coupling_GeV⁻¹)` pair per
//! line, separated by whitespace or a comma. Blank lines and lines starting with
//! `#` or `%` are ignored. Columns beyond the second are ignored.

use std::path::Path;

use crate::bounds::LayerError;

/// Read and parse a limit file.
pub fn read_limit_curve(path: &Path) -> Result<Vec<(f64, f64)>, LayerError> {
    let text = std::fs::read_to_string(path).map_err(|e| LayerError::Data {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_limit_curve(&text).map_err(|message| LayerError::Data {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse limit-file text. Errors name the 1-based line that failed.
pub fn parse_limit_curve(text: &str) -> Result<Vec<(f64, f64)>, String> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }

        let mut fields = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|f| !f.is_empty());
        let (Some(m), Some(g)) = (fields.next(), fields.next()) else {
            return Err(format!("line {line_no}: expected two columns, got '{line}'"));
        };
        let parse = |s: &str| -> Result<f64, String> {
            match s.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(format!("line {line_no}: '{s}' is not a finite number")),
            }
        };
        out.push((parse(m)?, parse(g)?));
    }

    if out.len() < 2 {
        return Err(format!("need at least two points, found {}", out.len()));
    }
    Ok(out)
}
