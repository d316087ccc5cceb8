use thiserror::Error;

use crate::shared::frame::{Frame, FrameError};

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("capture device is not open")]
    NotOpen,
    #[error("failed to read {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image from {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// A source of still frames: a camera, an uploaded file, a test fixture.
///
/// `open` acquires the underlying resource and `release` gives it back.
/// `release` must be safe to call more than once and on a device that
/// never opened successfully.
pub trait CaptureDevice: Send {
    fn open(&mut self) -> Result<(), CaptureError>;

    /// Grabs one still frame. Fails with [`CaptureError::NotOpen`] before `open`.
    fn grab(&mut self) -> Result<Frame, CaptureError>;

    fn release(&mut self);
}
