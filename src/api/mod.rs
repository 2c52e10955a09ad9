mod config;
mod container;
mod export;
mod instance;
mod labels;
mod listeners;
mod registry;
mod scene_builder;
mod snapshot;

pub use config::{ChartOptions, ChartProfile};
pub use container::Container;
pub use export::{ImageFormat, ImagePayload, RASTER_EXPORT_SCALE};
pub use instance::{ChartEnvironment, ChartInstance};
pub use labels::{LabelTranslator, TranslationCache, TranslationCacheStats, resolve_label};
pub use listeners::{ChartEvent, ChartEventContext, ChartListener};
pub use registry::ChartRegistry;
pub use snapshot::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1};

pub use crate::animation::{AnimationOptions, Easing, FrameHandle};
