use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::{CirclePrimitive, LinePrimitive, PolygonPrimitive, SceneLayerKind, TextPrimitive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayer {
    pub kind: SceneLayerKind,
    pub lines: Vec<LinePrimitive>,
    pub polygons: Vec<PolygonPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl SceneLayer {
    #[must_use]
    pub fn empty(kind: SceneLayerKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            polygons: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.polygons.is_empty()
            && self.circles.is_empty()
            && self.texts.is_empty()
    }
}

/// Backend-agnostic layered scene for one radar chart draw pass.
///
/// Coordinates live in a square logical space of edge `size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarScene {
    pub size: f64,
    pub layers: Vec<SceneLayer>,
}

impl RadarScene {
    #[must_use]
    pub fn new(size: f64) -> Self {
        Self {
            size,
            layers: SceneLayerKind::CANONICAL
                .into_iter()
                .map(SceneLayer::empty)
                .collect(),
        }
    }

    pub fn push_line(&mut self, kind: SceneLayerKind, line: LinePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.lines.push(line);
        }
    }

    pub fn push_polygon(&mut self, kind: SceneLayerKind, polygon: PolygonPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.polygons.push(polygon);
        }
    }

    pub fn push_circle(&mut self, kind: SceneLayerKind, circle: CirclePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.circles.push(circle);
        }
    }

    pub fn push_text(&mut self, kind: SceneLayerKind, text: TextPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.texts.push(text);
        }
    }

    #[must_use]
    pub fn layer(&self, kind: SceneLayerKind) -> Option<&SceneLayer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    /// Markers of the primary series, in category order.
    #[must_use]
    pub fn markers(&self) -> &[CirclePrimitive] {
        self.layer(SceneLayerKind::Markers)
            .map(|layer| layer.circles.as_slice())
            .unwrap_or_default()
    }

    pub fn marker_mut(&mut self, category_index: usize) -> Option<&mut CirclePrimitive> {
        self.layer_mut(SceneLayerKind::Markers)?
            .circles
            .iter_mut()
            .find(|circle| circle.category_index == category_index)
    }

    /// Topmost marker under `(x, y)` in scene coordinates.
    #[must_use]
    pub fn hit_test_marker(&self, x: f64, y: f64) -> Option<usize> {
        self.markers()
            .iter()
            .rev()
            .find(|marker| marker.contains(x, y))
            .map(|marker| marker.category_index)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ChartError::InvalidData(
                "scene size must be finite and > 0".to_owned(),
            ));
        }
        for layer in &self.layers {
            for line in &layer.lines {
                line.validate()?;
            }
            for polygon in &layer.polygons {
                polygon.validate()?;
            }
            for circle in &layer.circles {
                circle.validate()?;
            }
            for text in &layer.texts {
                text.validate()?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(SceneLayer::is_empty)
    }

    fn layer_mut(&mut self, kind: SceneLayerKind) -> Option<&mut SceneLayer> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }
}
