//! radar-rs: radial (radar/polygon) chart engine.
//!
//! The crate is split the same way as a classic chart engine: pure math in
//! [`core`], backend-agnostic scenes and backends in [`render`], time-based
//! transitions in [`animation`], hover/tooltip state in [`interaction`], and
//! the host-facing chart instance, registry and export service in [`api`].

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartInstance, ChartOptions, ChartRegistry};
pub use error::{ChartError, ChartResult};
