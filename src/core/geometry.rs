//! Regular n-gon geometry for radial charts.
//!
//! Index 0 sits at the top of the chart and indices proceed clockwise in
//! screen space (y grows downwards).

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::core::types::Point;
use crate::error::{ChartError, ChartResult};

/// Smallest vertex count that forms a polygon.
pub const MIN_VERTEX_COUNT: usize = 3;

/// Angle of axis `index` on an `vertex_count`-gon, in radians.
#[must_use]
pub fn vertex_angle(index: usize, vertex_count: usize) -> f64 {
    TAU * index as f64 / vertex_count as f64 - FRAC_PI_2
}

#[must_use]
pub fn point_at(center: Point, radius: f64, index: usize, vertex_count: usize) -> Point {
    let angle = vertex_angle(index, vertex_count);
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Maps `value` on axis `index` to scene coordinates.
///
/// Scaling is linear and unclamped; values above `max_value` land outside the
/// outer ring.
#[must_use]
pub fn data_point(
    center: Point,
    value: f64,
    max_value: f64,
    max_radius: f64,
    index: usize,
    vertex_count: usize,
) -> Point {
    point_at(center, max_radius * value / max_value, index, vertex_count)
}

/// Resolved center/radius for one chart size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialLayout {
    pub center: Point,
    pub max_radius: f64,
    pub vertex_count: usize,
}

impl RadialLayout {
    pub fn new(center: Point, max_radius: f64, vertex_count: usize) -> ChartResult<Self> {
        if vertex_count < MIN_VERTEX_COUNT {
            return Err(ChartError::DegenerateGeometry { vertex_count });
        }
        if !center.is_finite() || !max_radius.is_finite() || max_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "layout center and radius must be finite, radius >= 0".to_owned(),
            ));
        }
        Ok(Self {
            center,
            max_radius,
            vertex_count,
        })
    }

    /// Derives the layout of a square viewport of edge `size`, reserving
    /// `label_margin` pixels around the outer ring for category labels.
    pub fn for_size(size: f64, label_margin: f64, vertex_count: usize) -> ChartResult<Self> {
        let half = size / 2.0;
        Self::new(
            Point::new(half, half),
            (half - label_margin).max(0.0),
            vertex_count,
        )
    }

    #[must_use]
    pub fn angle(&self, index: usize) -> f64 {
        vertex_angle(index, self.vertex_count)
    }

    #[must_use]
    pub fn point_at(&self, radius: f64, index: usize) -> Point {
        point_at(self.center, radius, index, self.vertex_count)
    }

    #[must_use]
    pub fn data_point(&self, value: f64, max_value: f64, index: usize) -> Point {
        data_point(
            self.center,
            value,
            max_value,
            self.max_radius,
            index,
            self.vertex_count,
        )
    }

    /// Radius of grid ring `level` out of `levels`.
    #[must_use]
    pub fn ring_radius(&self, level: u32, levels: u32) -> f64 {
        self.max_radius * f64::from(level) / f64::from(levels)
    }

    #[must_use]
    pub fn ring_vertices(&self, level: u32, levels: u32) -> Vec<Point> {
        let radius = self.ring_radius(level, levels);
        (0..self.vertex_count)
            .map(|index| self.point_at(radius, index))
            .collect()
    }

    #[must_use]
    pub fn outer_vertices(&self) -> Vec<Point> {
        (0..self.vertex_count)
            .map(|index| self.point_at(self.max_radius, index))
            .collect()
    }

    #[must_use]
    pub fn polygon_for(&self, values: &[f64], max_value: f64) -> Vec<Point> {
        values
            .iter()
            .take(self.vertex_count)
            .enumerate()
            .map(|(index, value)| self.data_point(*value, max_value, index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{RadialLayout, data_point, point_at, vertex_angle};
    use crate::core::Point;
    use crate::error::ChartError;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn first_vertex_points_straight_up() {
        assert_abs_diff_eq!(vertex_angle(0, 5), -FRAC_PI_2);
        let top = point_at(Point::new(100.0, 100.0), 50.0, 0, 5);
        assert_abs_diff_eq!(top.x, 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(top.y, 50.0, epsilon = 1e-12);
    }

    #[test]
    fn indices_proceed_clockwise_on_screen() {
        // On a square, index 1 is to the right of center.
        let right = point_at(Point::new(0.0, 0.0), 10.0, 1, 4);
        assert_abs_diff_eq!(right.x, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(right.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn data_point_is_not_clamped() {
        let center = Point::new(0.0, 0.0);
        let outside = data_point(center, 10.0, 5.0, 100.0, 0, 3);
        assert_abs_diff_eq!(outside.distance_to(center), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn layout_rejects_fewer_than_three_vertices() {
        let err = RadialLayout::for_size(280.0, 30.0, 2).expect_err("two axes are degenerate");
        assert!(matches!(
            err,
            ChartError::DegenerateGeometry { vertex_count: 2 }
        ));
    }

    #[test]
    fn layout_radius_never_goes_negative() {
        let layout = RadialLayout::for_size(20.0, 30.0, 3).expect("layout");
        assert_eq!(layout.max_radius, 0.0);
    }
}
