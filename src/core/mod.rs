pub mod geometry;
pub mod series;
pub mod stats;
pub mod types;

pub use geometry::{MIN_VERTEX_COUNT, RadialLayout, data_point, point_at, vertex_angle};
pub use series::{Series, SeriesStyle};
pub use stats::ChartStats;
pub use types::{BoundingBox, Category, Point};
