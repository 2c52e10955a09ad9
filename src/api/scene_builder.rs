use crate::core::{Category, RadialLayout};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PolygonPrimitive, PolygonRole, RadarScene,
    SceneLayerKind, TextPrimitive,
};

use super::ChartOptions;
use super::labels::{LabelTranslator, resolve_label};

const GRID_STROKE_WIDTH: f64 = 1.0;
const MARKER_FILL: Color = Color::rgb(1.0, 1.0, 1.0);

/// Everything one redraw needs.
pub(crate) struct SceneInput<'a> {
    pub options: &'a ChartOptions,
    pub categories: &'a [Category],
    pub series: &'a [Vec<f64>],
    pub hovered_marker: Option<usize>,
    pub translator: Option<&'a dyn LabelTranslator>,
}

/// Builds the full layered scene for the current display state.
///
/// Fails with `DegenerateGeometry` for fewer than three categories.
pub(crate) fn build_scene(input: &SceneInput<'_>) -> ChartResult<RadarScene> {
    let options = input.options;
    let layout = RadialLayout::for_size(
        options.size,
        options.label_margin(),
        input.categories.len(),
    )?;
    let mut scene = RadarScene::new(options.size);

    push_grid(&mut scene, &layout, options);
    push_series(&mut scene, &layout, options, input.series);
    if let Some(primary) = input.series.first() {
        push_markers(&mut scene, &layout, options, primary, input.hovered_marker);
    }
    push_labels(&mut scene, &layout, options, input.categories, input.translator);

    Ok(scene)
}

fn push_grid(scene: &mut RadarScene, layout: &RadialLayout, options: &ChartOptions) {
    for level in 1..=options.grid_levels {
        scene.push_polygon(
            SceneLayerKind::Grid,
            PolygonPrimitive {
                role: PolygonRole::GridRing { level },
                points: layout.ring_vertices(level, options.grid_levels),
                fill: None,
                stroke: options.grid_color,
                stroke_width: GRID_STROKE_WIDTH,
            },
        );
    }

    for vertex in layout.outer_vertices() {
        scene.push_line(
            SceneLayerKind::Grid,
            LinePrimitive::between(layout.center, vertex, GRID_STROKE_WIDTH, options.grid_color),
        );
    }
}

fn push_series(
    scene: &mut RadarScene,
    layout: &RadialLayout,
    options: &ChartOptions,
    series: &[Vec<f64>],
) {
    for (index, values) in series.iter().enumerate() {
        let style = options.series_style(index);
        scene.push_polygon(
            SceneLayerKind::Series,
            PolygonPrimitive {
                role: PolygonRole::SeriesArea { series: index },
                points: layout.polygon_for(values, options.max_value),
                fill: Some(style.fill),
                stroke: style.stroke,
                stroke_width: options.stroke_width,
            },
        );
    }
}

fn push_markers(
    scene: &mut RadarScene,
    layout: &RadialLayout,
    options: &ChartOptions,
    primary: &[f64],
    hovered_marker: Option<usize>,
) {
    let stroke = options.series_style(0).stroke;
    for (index, value) in primary.iter().enumerate().take(layout.vertex_count) {
        let point = layout.data_point(*value, options.max_value, index);
        let radius = if hovered_marker == Some(index) {
            options.point_radius + options.hover_radius_delta
        } else {
            options.point_radius
        };
        scene.push_circle(
            SceneLayerKind::Markers,
            CirclePrimitive {
                category_index: index,
                cx: point.x,
                cy: point.y,
                radius,
                fill: MARKER_FILL,
                stroke,
                stroke_width: options.stroke_width,
            },
        );
    }
}

fn push_labels(
    scene: &mut RadarScene,
    layout: &RadialLayout,
    options: &ChartOptions,
    categories: &[Category],
    translator: Option<&dyn LabelTranslator>,
) {
    let radius = layout.max_radius + options.label_offset;
    for (index, category) in categories.iter().enumerate() {
        let text = resolve_label(translator, category);
        scene.push_text(
            SceneLayerKind::Labels,
            TextPrimitive::centered(
                text,
                layout.point_at(radius, index),
                options.label_font_size_px,
                options.label_color,
            ),
        );
    }
}
