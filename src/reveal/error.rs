//! Error type for the reveal engine.

use thiserror::Error;

/// Failures surfaced by the reveal engine.
///
/// None of these reach the end user: callers degrade to showing content
/// without animation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RevealError {
    /// The platform cannot report element visibility.
    #[error("Visibility detection is unavailable")]
    DetectionUnavailable,

    /// Visibility threshold outside `0.0..=1.0`.
    #[error("Visibility threshold {0} is outside 0.0..=1.0")]
    InvalidThreshold(f32),

    /// The owning event loop no longer exists.
    #[error("Event loop has been dropped")]
    LoopClosed,
}

/// Result alias for reveal engine operations.
pub type Result<T> = std::result::Result<T, RevealError>;
