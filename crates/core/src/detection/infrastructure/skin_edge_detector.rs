use crate::detection::domain::detection_result::DetectionResult;
use crate::detection::domain::heuristic_thresholds::HeuristicThresholds;
use crate::detection::domain::presence_detector::{DetectionError, PresenceDetector};
use crate::shared::frame::Frame;

/// Counters gathered by one scan of a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStatistics {
    pub total_pixels: usize,
    pub skin_pixels: usize,
    pub edge_pixels: usize,
    pub skin_percentage: f64,
    pub edge_percentage: f64,
}

/// Colour/brightness heuristic that guesses whether a still frame shows a
/// face.
///
/// A frame passes when enough pixels look like skin and the share of sharp
/// brightness changes sits inside a band: too few means a flat image, too
/// many means texture or noise.
///
/// Brightness changes are measured between consecutive pixels of the
/// flattened buffer, so the last pixel of a row is compared with the first
/// pixel of the next one. The edge band is tuned for exactly this scan.
pub struct SkinEdgeDetector {
    thresholds: HeuristicThresholds,
}

impl SkinEdgeDetector {
    pub fn new(thresholds: HeuristicThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &HeuristicThresholds {
        &self.thresholds
    }

    /// Scans every pixel once, counting skin pixels and edge pixels.
    pub fn analyze(&self, frame: &Frame) -> Result<FrameStatistics, DetectionError> {
        frame
            .validate()
            .map_err(|e| DetectionError::InvalidInput(e.to_string()))?;
        let total_pixels = frame.pixel_count();
        if total_pixels == 0 {
            return Err(DetectionError::InvalidInput(format!(
                "frame has no pixels ({}x{})",
                frame.width(),
                frame.height()
            )));
        }

        let mut skin_pixels = 0usize;
        let mut edge_pixels = 0usize;
        let mut previous_brightness: Option<f64> = None;

        for (r, g, b) in frame.pixels() {
            if self.is_skin(r, g, b) {
                skin_pixels += 1;
            }

            // The edge belongs to the previous pixel; the last pixel has no
            // successor and is never counted.
            let current = brightness(r, g, b);
            if let Some(previous) = previous_brightness {
                if (previous - current).abs() > self.thresholds.edge_brightness_delta {
                    edge_pixels += 1;
                }
            }
            previous_brightness = Some(current);
        }

        let total = total_pixels as f64;
        Ok(FrameStatistics {
            total_pixels,
            skin_pixels,
            edge_pixels,
            skin_percentage: (skin_pixels as f64 / total) * 100.0,
            edge_percentage: (edge_pixels as f64 / total) * 100.0,
        })
    }

    fn is_skin(&self, r: u8, g: u8, b: u8) -> bool {
        let t = &self.thresholds;
        let spread = r.max(g).max(b) - r.min(g).min(b);
        r > t.skin_min_red
            && g > t.skin_min_green
            && b > t.skin_min_blue
            && spread > t.skin_min_spread
            && r.abs_diff(g) > t.skin_min_red_green_gap
            && r > g
            && r > b
    }

    fn verdict(&self, stats: &FrameStatistics) -> DetectionResult {
        let t = &self.thresholds;
        let has_face = stats.skin_percentage > t.min_skin_percentage
            && stats.edge_percentage > t.min_edge_percentage
            && stats.edge_percentage < t.max_edge_percentage;
        let confidence = (stats.skin_percentage / 100.0).min(t.max_confidence);
        DetectionResult::new(has_face, confidence)
    }
}

impl Default for SkinEdgeDetector {
    fn default() -> Self {
        Self::new(HeuristicThresholds::default())
    }
}

impl PresenceDetector for SkinEdgeDetector {
    fn detect(&self, frame: &Frame) -> Result<DetectionResult, DetectionError> {
        let stats = self.analyze(frame)?;
        let result = self.verdict(&stats);
        log::debug!(
            "Scanned {}x{} frame: skin {:.2}%, edges {:.2}%, face={}",
            frame.width(),
            frame.height(),
            stats.skin_percentage,
            stats.edge_percentage,
            result.has_face()
        );
        Ok(result)
    }
}

fn brightness(r: u8, g: u8, b: u8) -> f64 {
    (r as f64 + g as f64 + b as f64) / 3.0
}
