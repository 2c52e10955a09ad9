use serde::{Deserialize, Serialize};

use crate::animation::AnimationOptions;
use crate::core::SeriesStyle;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Rendering capability profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartProfile {
    /// One series with hover markers and tooltip.
    #[default]
    SingleSeriesInteractive,
    /// Up to two overlaid series, no hover unless explicitly enabled.
    MultiSeriesComparison,
}

impl ChartProfile {
    #[must_use]
    pub const fn series_count(self) -> usize {
        match self {
            Self::SingleSeriesInteractive => 1,
            Self::MultiSeriesComparison => 2,
        }
    }

    #[must_use]
    pub const fn hover_by_default(self) -> bool {
        matches!(self, Self::SingleSeriesInteractive)
    }
}

/// Public chart configuration.
///
/// Every field has a default so hosts can persist/load partial option sets
/// as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Edge of the square viewport in logical pixels.
    #[serde(default = "default_size")]
    pub size: f64,
    #[serde(default = "default_max_value")]
    pub max_value: f64,
    #[serde(default = "default_grid_levels")]
    pub grid_levels: u32,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "default_point_radius")]
    pub point_radius: f64,
    #[serde(default = "default_hover_radius_delta")]
    pub hover_radius_delta: f64,
    #[serde(default = "default_label_offset")]
    pub label_offset: f64,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
    #[serde(default)]
    pub profile: ChartProfile,
    /// Overrides the profile's hover default.
    #[serde(default)]
    pub hover_markers: Option<bool>,
    #[serde(default)]
    pub animation: AnimationOptions,
    #[serde(default = "default_series_styles")]
    pub series_styles: Vec<SeriesStyle>,
    #[serde(default = "default_grid_color")]
    pub grid_color: Color,
    #[serde(default = "default_label_color")]
    pub label_color: Color,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            size: default_size(),
            max_value: default_max_value(),
            grid_levels: default_grid_levels(),
            stroke_width: default_stroke_width(),
            point_radius: default_point_radius(),
            hover_radius_delta: default_hover_radius_delta(),
            label_offset: default_label_offset(),
            label_font_size_px: default_label_font_size_px(),
            profile: ChartProfile::default(),
            hover_markers: None,
            animation: AnimationOptions::default(),
            series_styles: default_series_styles(),
            grid_color: default_grid_color(),
            label_color: default_label_color(),
        }
    }
}

impl ChartOptions {
    /// Options for the two-series comparison profile.
    #[must_use]
    pub fn comparison() -> Self {
        Self {
            profile: ChartProfile::MultiSeriesComparison,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = max_value;
        self
    }

    #[must_use]
    pub fn with_grid_levels(mut self, grid_levels: u32) -> Self {
        self.grid_levels = grid_levels;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationOptions) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_hover_markers(mut self, enabled: bool) -> Self {
        self.hover_markers = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_series_style(mut self, index: usize, style: SeriesStyle) -> Self {
        if let Some(slot) = self.series_styles.get_mut(index) {
            *slot = style;
        } else {
            self.series_styles.push(style);
        }
        self
    }

    #[must_use]
    pub fn hover_enabled(&self) -> bool {
        self.hover_markers
            .unwrap_or_else(|| self.profile.hover_by_default())
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.profile.series_count()
    }

    /// Style of series `index`, falling back to the built-in palette.
    #[must_use]
    pub fn series_style(&self, index: usize) -> SeriesStyle {
        self.series_styles.get(index).copied().unwrap_or(if index == 0 {
            SeriesStyle::primary()
        } else {
            SeriesStyle::comparison()
        })
    }

    /// Pixels kept free around the outer ring for labels.
    #[must_use]
    pub fn label_margin(&self) -> f64 {
        self.label_offset + self.label_font_size_px
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ChartError::Configuration(
                "size must be finite and > 0".to_owned(),
            ));
        }
        if !self.max_value.is_finite() || self.max_value <= 0.0 {
            return Err(ChartError::Configuration(
                "max value must be finite and > 0".to_owned(),
            ));
        }
        if self.grid_levels == 0 {
            return Err(ChartError::Configuration(
                "grid level count must be >= 1".to_owned(),
            ));
        }
        for (name, value) in [
            ("stroke width", self.stroke_width),
            ("point radius", self.point_radius),
            ("label font size", self.label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::Configuration(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("hover radius delta", self.hover_radius_delta),
            ("label offset", self.label_offset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::Configuration(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.animation.duration_ms.is_finite() || self.animation.duration_ms < 0.0 {
            return Err(ChartError::Configuration(
                "animation duration must be finite and >= 0".to_owned(),
            ));
        }
        for style in &self.series_styles {
            style
                .fill
                .validate()
                .and_then(|()| style.stroke.validate())
                .map_err(|err| ChartError::Configuration(format!("series style: {err}")))?;
        }
        self.grid_color
            .validate()
            .and_then(|()| self.label_color.validate())
            .map_err(|err| ChartError::Configuration(err.to_string()))
    }
}

fn default_size() -> f64 {
    280.0
}

fn default_max_value() -> f64 {
    5.0
}

fn default_grid_levels() -> u32 {
    5
}

fn default_stroke_width() -> f64 {
    2.0
}

fn default_point_radius() -> f64 {
    4.0
}

fn default_hover_radius_delta() -> f64 {
    2.0
}

fn default_label_offset() -> f64 {
    20.0
}

fn default_label_font_size_px() -> f64 {
    12.0
}

fn default_series_styles() -> Vec<SeriesStyle> {
    vec![SeriesStyle::primary(), SeriesStyle::comparison()]
}

fn default_grid_color() -> Color {
    Color::from_rgb8(229, 231, 235, 1.0)
}

fn default_label_color() -> Color {
    Color::from_rgb8(55, 65, 81, 1.0)
}

#[cfg(test)]
mod tests {
    use super::{ChartOptions, ChartProfile};

    #[test]
    fn defaults_match_documented_values() {
        let options = ChartOptions::default();
        assert_eq!(options.size, 280.0);
        assert_eq!(options.max_value, 5.0);
        assert_eq!(options.grid_levels, 5);
        assert!(options.animation.enabled);
        assert_eq!(options.animation.duration_ms, 800.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let options: ChartOptions =
            serde_json::from_str(r#"{"size": 400, "profile": "MultiSeriesComparison"}"#)
                .expect("parse options");
        assert_eq!(options.size, 400.0);
        assert_eq!(options.grid_levels, 5);
        assert_eq!(options.profile, ChartProfile::MultiSeriesComparison);
        assert!(!options.hover_enabled());
        assert_eq!(options.series_count(), 2);
    }

    #[test]
    fn hover_override_wins_over_profile() {
        let options = ChartOptions::comparison().with_hover_markers(true);
        assert!(options.hover_enabled());
    }

    #[test]
    fn non_positive_max_value_is_a_configuration_error() {
        let err = ChartOptions::default()
            .with_max_value(0.0)
            .validate()
            .expect_err("zero max value");
        assert!(err.to_string().contains("max value"));
    }
}
