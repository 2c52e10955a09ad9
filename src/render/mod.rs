mod layer_stack;
mod null_renderer;
mod primitives;
mod scene;
mod svg;

pub use layer_stack::SceneLayerKind;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PolygonPrimitive, PolygonRole, TextHAlign,
    TextPrimitive, TextVAlign, trim_number,
};
pub use scene::{RadarScene, SceneLayer};
pub use svg::{SvgRenderer, scene_to_svg};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RadarScene` so
/// drawing code remains isolated from chart state, animation and interaction.
pub trait Renderer {
    fn render(&mut self, scene: &RadarScene) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
