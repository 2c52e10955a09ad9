use crate::error::ChartResult;
use crate::render::{RadarScene, Renderer, SceneLayerKind};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates scene content so tests can catch invalid geometry before
/// a real backend is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_polygon_count: usize,
    pub last_marker_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &RadarScene) -> ChartResult<()> {
        scene.validate()?;
        self.frames_rendered += 1;
        self.last_polygon_count = scene
            .layers
            .iter()
            .map(|layer| layer.polygons.len())
            .sum();
        self.last_marker_count = scene.markers().len();
        self.last_text_count = scene
            .layer(SceneLayerKind::Labels)
            .map_or(0, |layer| layer.texts.len());
        Ok(())
    }
}
