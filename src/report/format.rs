//! Formatted terminal output.
//!
//! All user-facing text lives here so output changes stay localized.

use crate::bounds::{BoundCatalog, LayerStatus};
use crate::compose::CompositionReport;
use crate::domain::Viewport;
use crate::models::ModelCatalog;

/// Summary of one composition: viewport, drawn models, per-layer outcomes.
pub fn format_report(report: &CompositionReport, viewport: &Viewport) -> String {
    let mut out = String::new();
    let (x0, x1) = viewport.x_limits();
    let (y0, y1) = viewport.y_limits();

    out.push_str("=== axl - Axion-Photon Coupling vs Mass ===\n");
    out.push_str(&format!("m_a: [{x0:.1e}, {x1:.1e}] eV | g: [{y0:.1e}, {y1:.1e}] GeV^-1\n"));

    out.push_str(&format!("\nModels ({}):\n", report.models.len()));
    if report.models.is_empty() {
        out.push_str("  (none)\n");
    }
    for name in &report.models {
        out.push_str(&format!("  {name}\n"));
    }

    out.push_str(&format!("\nBound layers ({}):\n", report.layers.len()));
    if report.layers.is_empty() {
        out.push_str("  (none)\n");
    }
    for o in &report.layers {
        match &o.status {
            LayerStatus::Drawn { artists } => out.push_str(&format!(
                "  ok     {:<24} {:<22} {artists} artist(s)\n",
                o.name, o.category
            )),
            LayerStatus::Failed { reason } => {
                out.push_str(&format!("  FAILED {:<24} {:<22} {reason}\n", o.name, o.category))
            }
        }
    }

    if !report.ignored_models.is_empty() {
        out.push_str(&format!("\nIgnored models: {}\n", report.ignored_models.join(", ")));
    }
    if !report.ignored_bounds.is_empty() {
        out.push_str(&format!("\nIgnored bounds: {}\n", report.ignored_bounds.join(", ")));
    }

    out
}

/// Models with their anomaly coefficients, then bound layers by category.
pub fn format_catalogs(models: &ModelCatalog, bounds: &BoundCatalog) -> String {
    let mut out = String::new();

    out.push_str("Models:\n");
    for m in models.iter() {
        let c = m.coupling();
        let range = if c.low() == c.high() {
            format!("C = {}", fmt_coeff(c.low()))
        } else {
            format!("C in [{}, {}]", fmt_coeff(c.low()), fmt_coeff(c.high()))
        };
        let ndw = m.domain_walls().map(|t| format!("N_DW={t}")).unwrap_or_default();
        out.push_str(&format!("  {:<24} {:<8} {range}\n", m.name(), ndw));
    }

    out.push_str("\nBounds:\n");
    for cat in bounds.categories() {
        out.push_str(&format!("  {}\n", cat.name()));
        for e in cat.entries() {
            let mark = if e.default_visible() { "*" } else { " " };
            out.push_str(&format!("   {mark} {:<22} ({})\n", e.name(), e.layer().kind()));
        }
    }
    out.push_str("\n(* = shown by default)\n");

    out
}

fn fmt_coeff(c: f64) -> String {
    format!("{c:.3}").trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::LayerOutcome;

    #[test]
    fn report_lists_failures_with_reason() {
        let report = CompositionReport {
            models: vec!["KSVZ".into()],
            layers: vec![
                LayerOutcome {
                    name: "Helioscopes".into(),
                    category: "Astrophysical Bounds".into(),
                    status: LayerStatus::Drawn { artists: 2 },
                },
                LayerOutcome {
                    name: "StAB".into(),
                    category: "Experimental Bounds".into(),
                    status: LayerStatus::Failed {
                        reason: "no data".into(),
                    },
                },
            ],
            ignored_models: vec!["Mystery".into()],
            ignored_bounds: vec![],
        };
        let text = format_report(&report, &Viewport::default());
        assert!(text.contains("KSVZ"));
        assert!(text.contains("ok     Helioscopes"));
        assert!(text.contains("FAILED StAB"));
        assert!(text.contains("no data"));
        assert!(text.contains("Ignored models: Mystery"));
        assert!(!text.contains("Ignored bounds"));
    }

    #[test]
    fn catalog_listing_shows_ranges_and_defaults() {
        let text = format_catalogs(&ModelCatalog::builtin(), &BoundCatalog::builtin(None));
        assert!(text.contains("C = -1.92"));
        assert!(text.contains("C in [-6.59, 0.74]"));
        assert!(text.contains("Test QCD"));
        assert!(text.contains("* Helioscopes"));
    }

    #[test]
    fn coefficients_drop_trailing_zeros() {
        assert_eq!(fmt_coeff(0.75), "0.75");
        assert_eq!(fmt_coeff(-1.5), "-1.5");
        assert_eq!(fmt_coeff(2.0), "2");
    }
}
