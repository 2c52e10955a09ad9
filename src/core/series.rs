use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Fill/stroke pair for one data polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub fill: Color,
    pub stroke: Color,
}

impl SeriesStyle {
    #[must_use]
    pub const fn new(fill: Color, stroke: Color) -> Self {
        Self { fill, stroke }
    }

    /// Translucent blue used by the primary series.
    #[must_use]
    pub const fn primary() -> Self {
        Self::new(
            Color::rgba(59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0, 0.2),
            Color::rgb(59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0),
        )
    }

    /// Translucent green used by the comparison series.
    #[must_use]
    pub const fn comparison() -> Self {
        Self::new(
            Color::rgba(16.0 / 255.0, 185.0 / 255.0, 129.0 / 255.0, 0.2),
            Color::rgb(16.0 / 255.0, 185.0 / 255.0, 129.0 / 255.0),
        )
    }
}

/// One named set of per-category values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub style: SeriesStyle,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<f64>, style: SeriesStyle) -> Self {
        Self {
            name: name.into(),
            values,
            style,
        }
    }

    #[must_use]
    pub fn zeroed(name: impl Into<String>, len: usize, style: SeriesStyle) -> Self {
        Self::new(name, vec![0.0; len], style)
    }
}
