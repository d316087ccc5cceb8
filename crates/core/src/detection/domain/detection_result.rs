use serde::Serialize;

use crate::shared::constants::{FACE_DETECTED_MESSAGE, NO_FACE_MESSAGE};

/// What the UI should offer after a check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Affordance {
    /// Face present: the capture can be submitted for verification.
    Proceed,
    /// No face: prompt the user to capture again.
    Recapture,
}

/// Verdict of one face-presence check.
///
/// Confidence is reported on negative verdicts too; it reflects skin
/// coverage, not the decision.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    has_face: bool,
    confidence: f64,
    message: String,
}

impl DetectionResult {
    pub fn new(has_face: bool, confidence: f64) -> Self {
        let message = if has_face {
            FACE_DETECTED_MESSAGE
        } else {
            NO_FACE_MESSAGE
        };
        Self {
            has_face,
            confidence,
            message: message.to_string(),
        }
    }

    pub fn has_face(&self) -> bool {
        self.has_face
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn affordance(&self) -> Affordance {
        if self.has_face {
            Affordance::Proceed
        } else {
            Affordance::Recapture
        }
    }
}
