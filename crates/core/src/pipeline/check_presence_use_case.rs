use thiserror::Error;

use crate::capture::domain::capture_device::{CaptureDevice, CaptureError};
use crate::capture::domain::capture_session::CaptureSession;
use crate::detection::domain::detection_result::DetectionResult;
use crate::detection::domain::presence_detector::{DetectionError, PresenceDetector};

#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Detection(#[from] DetectionError),
}

/// Single-capture check: open device → capture → release → detect.
///
/// The device is released before detection runs and on every failure path.
pub struct CheckPresenceUseCase {
    detector: Box<dyn PresenceDetector>,
}

impl CheckPresenceUseCase {
    pub fn new(detector: Box<dyn PresenceDetector>) -> Self {
        Self { detector }
    }

    pub fn execute<D: CaptureDevice>(&self, device: D) -> Result<DetectionResult, CheckError> {
        let result = check_device(self.detector.as_ref(), device)?;
        log::info!(
            "{} (confidence {:.2})",
            result.message(),
            result.confidence()
        );
        Ok(result)
    }
}

/// One capture and one verdict. The session is closed before detection.
pub(crate) fn check_device<D: CaptureDevice>(
    detector: &dyn PresenceDetector,
    device: D,
) -> Result<DetectionResult, CheckError> {
    let mut session = CaptureSession::open(device)?;
    let frame = session.capture()?;
    session.close();
    Ok(detector.detect(&frame)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::infrastructure::skin_edge_detector::SkinEdgeDetector;
    use crate::shared::frame::Frame;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // --- Stubs ---

    struct StubDevice {
        frame: Frame,
        open: bool,
        releases: Arc<AtomicUsize>,
    }

    impl StubDevice {
        fn new(frame: Frame) -> (Self, Arc<AtomicUsize>) {
            let releases = Arc::new(AtomicUsize::new(0));
            let device = Self {
                frame,
                open: false,
                releases: releases.clone(),
            };
            (device, releases)
        }
    }

    impl CaptureDevice for StubDevice {
        fn open(&mut self) -> Result<(), CaptureError> {
            self.open = true;
            Ok(())
        }

        fn grab(&mut self) -> Result<Frame, CaptureError> {
            if !self.open {
                return Err(CaptureError::NotOpen);
            }
            Ok(self.frame.clone())
        }

        fn release(&mut self) {
            self.open = false;
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FailingDevice;

    impl CaptureDevice for FailingDevice {
        fn open(&mut self) -> Result<(), CaptureError> {
            Err(CaptureError::Io {
                origin: "camera".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        fn grab(&mut self) -> Result<Frame, CaptureError> {
            Err(CaptureError::NotOpen)
        }

        fn release(&mut self) {}
    }

    fn face_like_frame() -> Frame {
        // 50 skin pixels, 50 neutral pixels of equal brightness, three dark
        // pixels giving 5 edges.
        let mut pixels = vec![[200u8, 120, 90]; 50];
        pixels.extend(vec![[140u8, 140, 130]; 50]);
        for i in [60, 70, 99] {
            pixels[i] = [20, 20, 20];
        }
        Frame::new(pixels.concat(), 10, 10, 3)
    }

    fn use_case() -> CheckPresenceUseCase {
        CheckPresenceUseCase::new(Box::new(SkinEdgeDetector::default()))
    }

    #[test]
    fn test_detects_face_and_releases_device() {
        let (device, releases) = StubDevice::new(face_like_frame());
        let result = use_case().execute(device).unwrap();
        assert!(result.has_face());
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_no_face_is_not_an_error() {
        let (device, releases) = StubDevice::new(Frame::new(vec![0u8; 300], 10, 10, 3));
        let result = use_case().execute(device).unwrap();
        assert!(!result.has_face());
        assert_eq!(result.message(), "No face detected in the image");
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_capture_is_detection_error_and_releases() {
        let (device, releases) = StubDevice::new(Frame::new(Vec::new(), 0, 0, 4));
        let err = use_case().execute(device).unwrap_err();
        assert!(matches!(
            err,
            CheckError::Detection(DetectionError::InvalidInput(_))
        ));
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_open_failure_is_capture_error() {
        let err = use_case().execute(FailingDevice).unwrap_err();
        assert!(matches!(err, CheckError::Capture(CaptureError::Io { .. })));
    }
}
