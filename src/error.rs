#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("node capacity must be at least 1")]
    InvalidCapacity,

    #[error("degenerate boundary: {width}x{height}")]
    DegenerateBoundary { width: f64, height: f64 },

    #[error("bit depth must be in 1..=8, got {0}")]
    InvalidBitDepth(u8),

    #[error("dropout percentage must be in (0, 1], got {0}")]
    InvalidDropout(f64),

    #[error("initial search radius must be positive and finite, got {0}")]
    InvalidSearchRadius(f64),

    /// Dimensions are zero or do not fit the packed coordinate range.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("channel {0} is out of range for an RGBA buffer")]
    InvalidChannel(usize),
}
