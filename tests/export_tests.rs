use radar_rs::api::{
    ChartInstance, ChartOptions, ChartSnapshot, Container, ImageFormat,
    CHART_SNAPSHOT_JSON_SCHEMA_V1,
};
use radar_rs::core::{BoundingBox, Category};
use radar_rs::render::{NullRenderer, SvgRenderer};
use radar_rs::ChartError;

fn categories(n: usize) -> Vec<Category> {
    (0..n).map(|i| Category::labeled(format!("Axis {i}"))).collect()
}

fn chart(options: ChartOptions, n: usize) -> ChartInstance {
    ChartInstance::new(
        Some(Container::new("export", BoundingBox::square(options.size))),
        categories(n),
        Some(vec![2.0; n]),
        options,
    )
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn vector_export_has_one_grid_group_series_areas_and_labels() {
    let single = chart(ChartOptions::default(), 5);
    let payload = single
        .export_as_image(ImageFormat::Vector)
        .expect("vector export");
    assert_eq!(payload.mime_type(), "image/svg+xml");
    assert_eq!((payload.width, payload.height), (280, 280));

    let svg = payload.as_markup().expect("markup");
    assert!(svg.starts_with("<svg"));
    assert_eq!(count(svg, r#"class="radar-grid""#), 1);
    assert_eq!(count(svg, r#"class="radar-area""#), 1);
    assert_eq!(count(svg, r#"class="radar-label""#), 5);
    assert_eq!(count(svg, r#"class="radar-ring""#), 5);
    assert_eq!(count(svg, r#"class="radar-point""#), 5);

    let comparison = chart(ChartOptions::comparison(), 7);
    let svg = comparison
        .export_as_image(ImageFormat::Vector)
        .expect("vector export")
        .as_markup()
        .map(str::to_owned)
        .expect("markup");
    assert_eq!(count(&svg, r#"class="radar-grid""#), 1);
    assert_eq!(count(&svg, r#"class="radar-area""#), 2);
    assert_eq!(count(&svg, r#"class="radar-label""#), 7);
}

#[test]
fn every_category_gets_a_label_even_when_empty() {
    let chart = ChartInstance::new(
        Some(Container::new("export", BoundingBox::square(280.0))),
        vec![
            Category::new("a", "A"),
            Category::new("b", ""),
            Category::new("c", "C"),
        ],
        Some(vec![1.0, 2.0, 3.0]),
        ChartOptions::default(),
    );
    let payload = chart
        .export_as_image(ImageFormat::Vector)
        .expect("vector export");
    let svg = payload.as_markup().expect("markup");
    assert_eq!(count(svg, r#"class="radar-label""#), 3);
    assert!(chart.scene().expect("scene").validate().is_ok());
}

#[test]
fn vector_export_is_deterministic() {
    let a = chart(ChartOptions::default(), 6);
    let b = chart(ChartOptions::default(), 6);
    let left = a.export_as_image(ImageFormat::Vector).expect("export a");
    let right = b.export_as_image(ImageFormat::Vector).expect("export b");
    assert_eq!(left.bytes, right.bytes);
    assert!(left.data_uri().starts_with("data:image/svg+xml;base64,"));
}

#[test]
fn export_without_scene_fails() {
    let inert = ChartInstance::new(None, categories(5), None, ChartOptions::default());
    assert!(matches!(
        inert.export_as_image(ImageFormat::Vector),
        Err(ChartError::Export(_))
    ));

    let degenerate = chart(ChartOptions::default(), 2);
    assert!(matches!(
        degenerate.export_as_image(ImageFormat::Vector),
        Err(ChartError::Export(_))
    ));
}

#[cfg(not(feature = "cairo-backend"))]
#[test]
fn raster_export_requires_cairo_backend() {
    let chart = chart(ChartOptions::default(), 5);
    assert!(matches!(
        chart.export_as_image(ImageFormat::Raster),
        Err(ChartError::Export(_))
    ));
}

#[test]
fn container_presenter_receives_every_render() {
    let options = ChartOptions::default();
    let chart = ChartInstance::new(
        Some(
            Container::new("presented", BoundingBox::square(280.0))
                .with_presenter(Box::new(NullRenderer::default())),
        ),
        categories(5),
        None,
        options,
    );
    assert!(chart.container().is_some_and(Container::has_presenter));
    assert_eq!(chart.render_count(), 1);
}

#[test]
fn svg_renderer_matches_export_markup() {
    use radar_rs::render::Renderer;

    let chart = chart(ChartOptions::default(), 5);
    let mut renderer = SvgRenderer::new();
    renderer
        .render(chart.scene().expect("scene"))
        .expect("svg render");
    let exported = chart.export_as_image(ImageFormat::Vector).expect("export");
    assert_eq!(Some(renderer.markup()), exported.as_markup());
}

#[test]
fn snapshot_json_contract_round_trips() {
    let mut chart = chart(ChartOptions::default(), 5);
    chart.pointer_enter(3);
    let snapshot = chart.snapshot().expect("snapshot");
    assert_eq!(snapshot.committed, vec![vec![2.0; 5]]);
    assert_eq!(snapshot.hovered_marker, Some(3));
    assert!(snapshot.tooltip.is_some());

    let json = snapshot.to_json_contract_v1_pretty().expect("json");
    assert!(json.contains(&format!(
        "\"schema_version\": {CHART_SNAPSHOT_JSON_SCHEMA_V1}"
    )));
    let parsed = ChartSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_same_state(&parsed, &snapshot);

    let bare = serde_json::to_string(&snapshot).expect("bare json");
    let parsed = ChartSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_same_state(&parsed, &snapshot);
}

fn assert_same_state(parsed: &ChartSnapshot, expected: &ChartSnapshot) {
    assert_eq!(parsed.instance, expected.instance);
    assert_eq!(parsed.options, expected.options);
    assert_eq!(parsed.categories, expected.categories);
    assert_eq!(parsed.committed, expected.committed);
    assert_eq!(parsed.displayed, expected.displayed);
    assert_eq!(parsed.hovered_marker, expected.hovered_marker);
    assert_eq!(parsed.stats, expected.stats);
    assert_eq!(
        parsed.tooltip.as_ref().map(|tooltip| tooltip.glyphs.as_str()),
        expected.tooltip.as_ref().map(|tooltip| tooltip.glyphs.as_str())
    );
}

#[test]
fn snapshot_rejects_unknown_schema_version() {
    let chart = chart(ChartOptions::default(), 5);
    let json = chart
        .snapshot()
        .expect("snapshot")
        .to_json_contract_v1_pretty()
        .expect("json")
        .replacen("\"schema_version\": 1", "\"schema_version\": 99", 1);
    assert!(ChartSnapshot::from_json_compat_str(&json).is_err());
}
