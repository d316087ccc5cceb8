use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::MAX_CONFIDENCE;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("min_edge_percentage ({min}) must be below max_edge_percentage ({max})")]
    InvertedEdgeBounds { min: f64, max: f64 },
    #[error("max_confidence ({0}) must lie in [0, {cap}]", cap = MAX_CONFIDENCE)]
    ConfidenceOutOfRange(f64),
}

/// Fixed thresholds of the skin/edge presence heuristic.
///
/// Channel bounds are strict: a pixel passes `skin_min_red` only when its red
/// value is greater than it. The edge bounds were tuned against scan-order
/// comparison, so changing the scan requires retuning them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicThresholds {
    pub skin_min_red: u8,
    pub skin_min_green: u8,
    pub skin_min_blue: u8,
    /// Minimum `max(r,g,b) - min(r,g,b)`.
    pub skin_min_spread: u8,
    /// Minimum `|r - g|`.
    pub skin_min_red_green_gap: u8,
    /// Minimum brightness change between scan-order neighbours.
    pub edge_brightness_delta: f64,
    pub min_skin_percentage: f64,
    pub min_edge_percentage: f64,
    pub max_edge_percentage: f64,
    pub max_confidence: f64,
}

impl Default for HeuristicThresholds {
    fn default() -> Self {
        Self {
            skin_min_red: 95,
            skin_min_green: 40,
            skin_min_blue: 20,
            skin_min_spread: 15,
            skin_min_red_green_gap: 15,
            edge_brightness_delta: 30.0,
            min_skin_percentage: 8.0,
            min_edge_percentage: 2.0,
            max_edge_percentage: 15.0,
            max_confidence: MAX_CONFIDENCE,
        }
    }
}

impl HeuristicThresholds {
    pub fn validate(&self) -> Result<(), ThresholdError> {
        let floats = [
            ("edge_brightness_delta", self.edge_brightness_delta),
            ("min_skin_percentage", self.min_skin_percentage),
            ("min_edge_percentage", self.min_edge_percentage),
            ("max_edge_percentage", self.max_edge_percentage),
            ("max_confidence", self.max_confidence),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ThresholdError::NotFinite(*name));
        }
        if self.min_edge_percentage >= self.max_edge_percentage {
            return Err(ThresholdError::InvertedEdgeBounds {
                min: self.min_edge_percentage,
                max: self.max_edge_percentage,
            });
        }
        if !(0.0..=MAX_CONFIDENCE).contains(&self.max_confidence) {
            return Err(ThresholdError::ConfidenceOutOfRange(self.max_confidence));
        }
        Ok(())
    }
}
