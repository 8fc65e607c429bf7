use approx::assert_relative_eq;
use axion_limits::app::pipeline::{compose_scene, render_json_base64, Catalogs, Scene};
use axion_limits::bounds::{BoundCatalog, BoundEntry, LayerError, LayerParams, LayerStatus, QcdBand};
use axion_limits::compose::compose;
use axion_limits::domain::{ComposeOptions, ExportFormat, PlotConfig, RenderSettings, Selection, Viewport};
use axion_limits::figure::{Artist, Axes, Color, LineStyle};
use axion_limits::io::export::render_bytes;
use axion_limits::models::{g_agamma, ModelCatalog};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

fn builtin() -> Catalogs {
    Catalogs {
        models: ModelCatalog::builtin(),
        bounds: BoundCatalog::builtin(None),
    }
}

fn small_render() -> RenderSettings {
    RenderSettings {
        dpi: 40,
        width_in: 5.0,
        height_in: 4.0,
    }
}

fn scene(json: &str) -> Scene {
    Scene::from_config(&PlotConfig::from_json_str(json).unwrap()).unwrap()
}

#[test]
fn ksvz_only_draws_one_labelled_line() {
    let s = scene(
        r#"{"mmin": 1e-12, "mmax": 1e-1, "ymin": 1e-20, "ymax": 1e-8,
            "models": ["KSVZ"], "categories": []}"#,
    );
    let c = compose_scene(&s, &builtin()).unwrap();
    let ax = c.figure.axes();

    assert_eq!(ax.xlim(), (1e-12, 1e-1));
    assert_eq!(ax.ylim(), (1e-20, 1e-8));
    assert_eq!(ax.artist_count(), 1);

    let Artist::Line(line) = &ax.artists()[0] else {
        panic!("expected a line");
    };
    assert_eq!(line.label.as_deref(), Some("KSVZ (N_DW=1)"));
    assert_eq!(line.xs.len(), ComposeOptions::default().samples);
    assert_eq!(line.xs[0], 1e-12);
    assert_eq!(*line.xs.last().unwrap(), 1e-1);
    for (m, g) in line.points() {
        assert_relative_eq!(g, g_agamma(m, -1.92), max_relative = 1e-12);
    }
}

#[test]
fn astrophobic_model_draws_ordered_band_and_centerline() {
    let s = scene(
        r#"{"mmin": 1e-12, "mmax": 1e-1, "ymin": 1e-20, "ymax": 1e-8,
            "models": ["Astrophobic QCD axion"]}"#,
    );
    let c = compose_scene(&s, &builtin()).unwrap();
    let artists = c.figure.axes().artists();
    assert_eq!(artists.len(), 2);

    let (Artist::Band(band), Artist::Line(center)) = (&artists[0], &artists[1]) else {
        panic!("expected band then centerline, got {artists:?}");
    };
    assert!(band.label.is_none());
    assert_eq!(center.label.as_deref(), Some("Astrophobic QCD axion (N_DW=1,2)"));
    for i in 0..band.xs.len() {
        assert!(band.lower[i] <= band.upper[i]);
        assert_relative_eq!(center.ys[i], (band.lower[i] * band.upper[i]).sqrt(), max_relative = 1e-12);
    }
}

#[test]
fn empty_selection_draws_no_data() {
    let s = scene(r#"{"mmin": 1e-12, "mmax": 1e-1, "ymin": 1e-20, "ymax": 1e-8}"#);
    let c = compose_scene(&s, &builtin()).unwrap();
    assert_eq!(c.figure.data_artist_count(), 0);
    assert!(c.figure.axes().grid());
}

#[test]
fn identical_inputs_render_identical_bytes() {
    let catalogs = builtin();
    let s = scene(
        r#"{"mmin": 1e-10, "mmax": 1e-2, "ymin": 1e-18, "ymax": 1e-9,
            "models": ["KSVZ", "DFSZ-II", "Composite Axion"], "categories": ["QCD Axion"]}"#,
    );
    let a = compose_scene(&s, &catalogs).unwrap();
    let b = compose_scene(&s, &catalogs).unwrap();
    assert_eq!(a.figure, b.figure);

    let png_a = render_bytes(&a.figure, ExportFormat::Png, &small_render()).unwrap();
    let png_b = render_bytes(&b.figure, ExportFormat::Png, &small_render()).unwrap();
    assert_eq!(png_a, png_b);
}

#[test]
fn unknown_names_match_omitting_them() {
    let catalogs = builtin();
    let plain = scene(r#"{"mmin": 1e-12, "mmax": 1e-1, "ymin": 1e-20, "ymax": 1e-8, "models": ["DFSZ-I"]}"#);
    let noisy = scene(
        r#"{"mmin": 1e-12, "mmax": 1e-1, "ymin": 1e-20, "ymax": 1e-8,
            "models": ["DFSZ-I", "Hidden Photon"], "categories": ["Dark Matter Halo"]}"#,
    );
    let a = compose_scene(&plain, &catalogs).unwrap();
    let b = compose_scene(&noisy, &catalogs).unwrap();
    assert_eq!(a.figure, b.figure);
    assert_eq!(b.report.ignored_models, vec!["Hidden Photon"]);
    assert_eq!(b.report.ignored_bounds, vec!["Dark Matter Halo"]);
}

fn always_fails(ax: &mut Axes, _: &LayerParams) -> Result<(), LayerError> {
    ax.set_ylim(1.0, 2.0);
    ax.plot(vec![1e-5, 1e-4], vec![1e-11, 1e-11], LineStyle::new(Color::BLACK, 1.0), None);
    Err(LayerError::Other("limit server offline".into()))
}

fn always_panics(ax: &mut Axes, _: &LayerParams) -> Result<(), LayerError> {
    ax.set_autoscale(true);
    panic!("corrupt limit table");
}

fn marker(ax: &mut Axes, _: &LayerParams) -> Result<(), LayerError> {
    ax.plot(vec![1e-6, 1e-3], vec![1e-12, 1e-12], LineStyle::new(Color::BLACK, 1.0), Some("marker".into()));
    Ok(())
}

#[test]
fn failing_layers_do_not_block_models_or_other_layers() {
    let bounds = BoundCatalog::new(vec![
        BoundEntry::new("Flaky", "Experimental", Box::new(always_fails), true, LayerParams::new()),
        BoundEntry::new("Marker", "Experimental", Box::new(marker), true, LayerParams::new()),
        BoundEntry::new("Crashy", "Astrophysical", Box::new(always_panics), true, LayerParams::new()),
        BoundEntry::new("QCD Axion", "Test QCD", Box::new(QcdBand), true, LayerParams::new()),
    ])
    .unwrap();
    let models = ModelCatalog::builtin();
    let viewport = Viewport::default();
    let selection = Selection::new(["KSVZ", "DFSZ-I"], ["Flaky", "Marker", "Crashy", "QCD Axion"]);

    let c = compose(&models, &bounds, &viewport, &selection, &ComposeOptions::default());

    // Two model lines, the marker line and the QCD band.
    assert_eq!(c.figure.data_artist_count(), 4);
    assert_eq!(c.figure.axes().xlim(), viewport.x_limits());
    assert_eq!(c.figure.axes().ylim(), viewport.y_limits());
    assert!(!c.figure.axes().autoscale());

    let statuses: Vec<(&str, bool)> = c.report.layers.iter().map(|o| (o.name.as_str(), o.is_failed())).collect();
    assert_eq!(
        statuses,
        vec![("Flaky", true), ("Marker", false), ("Crashy", true), ("QCD Axion", false)]
    );
    assert!(matches!(&c.report.layers[2].status, LayerStatus::Failed { reason } if reason.contains("corrupt limit table")));
}

#[test]
fn json_config_to_base64_png() {
    let encoded = render_json_base64(
        r#"{"mmin": 1e-12, "mmax": 1e-1, "ymin": 1e-20, "ymax": 1e-8,
            "models": ["KSVZ"], "categories": ["QCD Axion"],
            "render": {"dpi": 40, "width_in": 4.0, "height_in": 3.0}}"#,
        &builtin(),
    )
    .unwrap();
    assert!(!encoded.starts_with("data:"));
    let png = STANDARD.decode(encoded).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    let w = u32::from_be_bytes(png[16..20].try_into().unwrap());
    let h = u32::from_be_bytes(png[20..24].try_into().unwrap());
    assert_eq!((w, h), (160, 120));
}

#[test]
fn degenerate_viewport_is_rejected_before_drawing() {
    let err = render_json_base64(
        r#"{"mmin": 1e-3, "mmax": 1e-3, "ymin": 1e-20, "ymax": 1e-8}"#,
        &builtin(),
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn absurd_sample_count_is_a_config_error() {
    let err = render_json_base64(
        r#"{"mmin": 1e-12, "mmax": 1e-1, "ymin": 1e-20, "ymax": 1e-8,
            "models": ["KSVZ"], "compose": {"samples": 4611686018427387904}}"#,
        &builtin(),
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

fn oversized_styles(ax: &mut Axes, _: &LayerParams) -> Result<(), LayerError> {
    ax.plot(vec![1e-6, 1e-3], vec![1e-12, 1e-12], LineStyle::new(Color::BLACK, 1e12), None);
    ax.text(1e-5, 1e-11, "shouting", 1e12, Color::BLACK);
    ax.text(1e-5, 1e-12, "broken", f64::NAN, Color::BLACK);
    Ok(())
}

#[test]
fn layer_with_absurd_styles_still_exports() {
    let bounds = BoundCatalog::new(vec![BoundEntry::new(
        "Loud",
        "Experimental",
        Box::new(oversized_styles),
        true,
        LayerParams::new(),
    )])
    .unwrap();
    let selection = Selection::new(["KSVZ"], ["Loud"]);
    let c = compose(&ModelCatalog::builtin(), &bounds, &Viewport::default(), &selection, &ComposeOptions::default());
    assert!(!c.report.has_failures());

    let encoded = axion_limits::io::export::render_base64(&c.figure, &small_render()).unwrap();
    let png = STANDARD.decode(encoded).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}
