use thiserror::Error;

use crate::detection::domain::detection_result::DetectionResult;
use crate::shared::frame::Frame;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Domain interface for face-presence checks on a single still frame.
///
/// Implementations must be pure: no state carried between calls, so one
/// instance can serve several threads at once.
pub trait PresenceDetector: Send + Sync {
    fn detect(&self, frame: &Frame) -> Result<DetectionResult, DetectionError>;
}
