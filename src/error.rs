use thiserror::Error;

/// Errors produced at the boundary of the drawing surface.
///
/// Drawing primitives themselves never fail on valid input; everything here is
/// either rejected input or a failure of the host (encoding, file system).
#[derive(Error, Debug)]
pub enum PaintError {
    #[error("Canvas has not been initialized")]
    NotInitialized,

    #[error("Canvas is already initialized ({width}x{height})")]
    AlreadyInitialized { width: u32, height: u32 },

    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid pointer coordinate: ({x}, {y})")]
    InvalidCoordinate { x: f32, y: f32 },

    #[error("Brush width must be positive, got {0}")]
    InvalidBrushWidth(u32),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("No color swatch at index {index} (palette has {len})")]
    UnknownSwatch { index: usize, len: usize },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Snapshot is {found:?} but canvas is {expected:?}")]
    SnapshotMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Result type for drawing surface operations
pub type PaintResult<T> = Result<T, PaintError>;
