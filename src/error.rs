use thiserror::Error;

pub type Result<T> = core::result::Result<T, PatternLockError>;

/// Errors surfaced by the pattern lock engine and its helpers.
#[derive(Debug, Error)]
pub enum PatternLockError {
    /// A row or column outside the current grid.
    #[error("dot ({row}, {column}) out of range; row and column must be in 0-{max}")]
    OutOfRange {
        row: usize,
        column: usize,
        max: usize,
    },
    /// A dot id outside the current grid.
    #[error("dot id {id} out of range for a {grid_size}x{grid_size} grid")]
    IdOutOfRange { id: usize, grid_size: usize },
    #[error("grid size must be at least 1, got {0}")]
    InvalidGridSize(usize),
    #[error("hit factor must be in (0, 1], got {0}")]
    InvalidHitFactor(f32),
    /// A programmatic pattern that repeats a dot.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    /// A serialized pattern that could not be decoded.
    #[error("invalid pattern string {input:?}: {reason}")]
    InvalidPatternString { input: String, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
