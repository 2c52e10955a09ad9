//! SVG serialization of a [`RadarScene`].
//!
//! Each scene layer becomes one `<g>` group whose class names the layer, so
//! consumers (and tests) can find the grid, the series areas, the markers and
//! the labels without parsing geometry.

use std::fmt::Write as _;

use crate::error::ChartResult;
use crate::render::{
    PolygonPrimitive, PolygonRole, RadarScene, Renderer, SceneLayerKind, TextHAlign, TextVAlign,
    trim_number,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const FONT_FAMILY: &str = "system-ui, -apple-system, 'Segoe UI', sans-serif";

/// Renderer that keeps the markup of the last scene it received.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    markup: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    #[must_use]
    pub fn into_markup(self) -> String {
        self.markup
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, scene: &RadarScene) -> ChartResult<()> {
        scene.validate()?;
        self.markup = scene_to_svg(scene);
        Ok(())
    }
}

/// Serializes the scene into a standalone SVG document.
#[must_use]
pub fn scene_to_svg(scene: &RadarScene) -> String {
    let size = trim_number(scene.size);
    let mut out = String::with_capacity(4096);
    let _ = write!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    );

    for layer in &scene.layers {
        let _ = write!(out, r#"<g class="{}">"#, layer.kind.group_class());

        for polygon in &layer.polygons {
            write_polygon(&mut out, polygon);
        }
        for line in &layer.lines {
            let _ = write!(
                out,
                r#"<line class="radar-spoke" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                trim_number(line.x1),
                trim_number(line.y1),
                trim_number(line.x2),
                trim_number(line.y2),
                line.color.to_css(),
                trim_number(line.stroke_width),
            );
        }
        for circle in &layer.circles {
            let _ = write!(
                out,
                r#"<circle class="radar-point" data-index="{}" cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                circle.category_index,
                trim_number(circle.cx),
                trim_number(circle.cy),
                trim_number(circle.radius),
                circle.fill.to_css(),
                circle.stroke.to_css(),
                trim_number(circle.stroke_width),
            );
        }
        for text in &layer.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            let baseline = match text.v_align {
                TextVAlign::Top => "hanging",
                TextVAlign::Middle => "middle",
                TextVAlign::Baseline => "alphabetic",
            };
            let class = if layer.kind == SceneLayerKind::Labels {
                "radar-label"
            } else {
                "radar-text"
            };
            let _ = write!(
                out,
                r#"<text class="{class}" x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}" fill="{}" text-anchor="{anchor}" dominant-baseline="{baseline}">{}</text>"#,
                trim_number(text.x),
                trim_number(text.y),
                trim_number(text.font_size_px),
                text.color.to_css(),
                escape_xml(&text.text),
            );
        }

        out.push_str("</g>");
    }

    out.push_str("</svg>");
    out
}

fn write_polygon(out: &mut String, polygon: &PolygonPrimitive) {
    let points = polygon
        .points
        .iter()
        .map(|point| format!("{},{}", trim_number(point.x), trim_number(point.y)))
        .collect::<Vec<_>>()
        .join(" ");
    let fill = polygon
        .fill
        .map_or_else(|| "none".to_owned(), |color| color.to_css());
    let (class, data) = match polygon.role {
        PolygonRole::GridRing { level } => ("radar-ring", format!(r#" data-level="{level}""#)),
        PolygonRole::SeriesArea { series } => {
            ("radar-area", format!(r#" data-series="{series}""#))
        }
    };
    let _ = write!(
        out,
        r#"<polygon class="{class}"{data} points="{points}" fill="{fill}" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
        polygon.stroke.to_css(),
        trim_number(polygon.stroke_width),
    );
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_xml, scene_to_svg};
    use crate::core::Point;
    use crate::render::{
        Color, PolygonPrimitive, PolygonRole, RadarScene, SceneLayerKind, TextPrimitive,
    };

    #[test]
    fn label_text_is_escaped() {
        assert_eq!(escape_xml("R&D <core>"), "R&amp;D &lt;core&gt;");
    }

    #[test]
    fn every_layer_becomes_one_group() {
        let mut scene = RadarScene::new(100.0);
        scene.push_polygon(
            SceneLayerKind::Series,
            PolygonPrimitive {
                role: PolygonRole::SeriesArea { series: 0 },
                points: vec![
                    Point::new(50.0, 10.0),
                    Point::new(90.0, 80.0),
                    Point::new(10.0, 80.0),
                ],
                fill: Some(Color::rgba(0.0, 0.0, 1.0, 0.2)),
                stroke: Color::rgb(0.0, 0.0, 1.0),
                stroke_width: 2.0,
            },
        );
        scene.push_text(
            SceneLayerKind::Labels,
            TextPrimitive::centered("Safety", Point::new(50.0, 5.0), 12.0, Color::rgb(0.2, 0.2, 0.2)),
        );

        let svg = scene_to_svg(&scene);
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<g class=").count(), 4);
        assert!(svg.contains(r#"points="50,10 90,80 10,80""#));
        assert!(svg.contains(">Safety</text>"));
        assert!(svg.contains(r#"text-anchor="middle""#));
    }
}
