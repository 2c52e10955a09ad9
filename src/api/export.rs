use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::render::{RadarScene, scene_to_svg};

use super::ChartInstance;

/// Raster exports are drawn at this multiple of the nominal size.
pub const RASTER_EXPORT_SCALE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    /// SVG markup.
    Vector,
    /// PNG bitmap.
    Raster,
}

impl ImageFormat {
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Vector => "image/svg+xml",
            Self::Raster => "image/png",
        }
    }
}

/// Encoded snapshot of a chart scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// `data:` URI that can be embedded directly in markup.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            STANDARD.encode(&self.bytes)
        )
    }

    /// SVG markup for vector payloads.
    #[must_use]
    pub fn as_markup(&self) -> Option<&str> {
        match self.format {
            ImageFormat::Vector => std::str::from_utf8(&self.bytes).ok(),
            ImageFormat::Raster => None,
        }
    }
}

impl ChartInstance {
    /// Snapshots the currently drawn scene, mid-animation included.
    ///
    /// Fails with `Export` when nothing is rendered (inert, destroyed or
    /// degenerate chart) or when rasterization fails; no partial payload is
    /// ever returned.
    ///
    /// Raster export is synchronous: drawing the scene offscreen and encoding
    /// the PNG happen inside this call, so there is no separate image decode
    /// step to await and surface/encode failures are the only raster errors.
    pub fn export_as_image(&self, format: ImageFormat) -> ChartResult<ImagePayload> {
        let Some(scene) = self.scene() else {
            warn!(instance = self.serial(), ?format, "export requested without a rendered scene");
            return Err(ChartError::Export(
                "chart has no rendered scene".to_owned(),
            ));
        };

        let result = match format {
            ImageFormat::Vector => Ok(export_vector(scene)),
            ImageFormat::Raster => export_raster(scene),
        };
        match &result {
            Ok(payload) => debug!(
                instance = self.serial(),
                ?format,
                bytes = payload.bytes.len(),
                "export chart image"
            ),
            Err(err) => warn!(instance = self.serial(), ?format, error = %err, "chart export failed"),
        }
        result
    }
}

fn export_vector(scene: &RadarScene) -> ImagePayload {
    let edge = scene.size.ceil() as u32;
    ImagePayload {
        format: ImageFormat::Vector,
        width: edge,
        height: edge,
        bytes: scene_to_svg(scene).into_bytes(),
    }
}

#[cfg(feature = "cairo-backend")]
fn export_raster(scene: &RadarScene) -> ChartResult<ImagePayload> {
    use crate::render::{CairoRenderer, Renderer};

    let mut renderer = CairoRenderer::for_scene(scene.size, RASTER_EXPORT_SCALE)
        .map_err(|err| ChartError::Export(err.to_string()))?;
    renderer
        .render(scene)
        .map_err(|err| ChartError::Export(err.to_string()))?;
    let bytes = renderer.encode_png()?;
    let edge = (scene.size * RASTER_EXPORT_SCALE).ceil() as u32;
    Ok(ImagePayload {
        format: ImageFormat::Raster,
        width: edge,
        height: edge,
        bytes,
    })
}

#[cfg(not(feature = "cairo-backend"))]
fn export_raster(_scene: &RadarScene) -> ChartResult<ImagePayload> {
    Err(ChartError::Export(
        "raster export requires the `cairo-backend` feature".to_owned(),
    ))
}
