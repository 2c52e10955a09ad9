use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Construction-time failure: missing container or invalid options.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid data length: expected {expected} values, got {actual}")]
    DataLength { expected: usize, actual: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("degenerate geometry: {vertex_count} categories, at least 3 required")]
    DegenerateGeometry { vertex_count: usize },

    #[error("export failed: {0}")]
    Export(String),

    /// The instance failed to initialize and ignores every operation.
    #[error("chart instance is inert")]
    Inert,
}
