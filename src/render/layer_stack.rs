use serde::{Deserialize, Serialize};

/// Scene layers, listed back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneLayerKind {
    Grid,
    Series,
    Markers,
    Labels,
}

impl SceneLayerKind {
    /// Canonical draw order.
    pub const CANONICAL: [SceneLayerKind; 4] = [
        SceneLayerKind::Grid,
        SceneLayerKind::Series,
        SceneLayerKind::Markers,
        SceneLayerKind::Labels,
    ];

    /// Class name of the SVG group holding this layer.
    #[must_use]
    pub const fn group_class(self) -> &'static str {
        match self {
            Self::Grid => "radar-grid",
            Self::Series => "radar-series",
            Self::Markers => "radar-points",
            Self::Labels => "radar-labels",
        }
    }
}
