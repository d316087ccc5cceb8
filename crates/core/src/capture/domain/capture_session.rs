use crate::capture::domain::capture_device::{CaptureDevice, CaptureError};
use crate::shared::frame::Frame;

/// Scoped ownership of an open [`CaptureDevice`].
///
/// The device is released exactly once: by [`CaptureSession::close`], or by
/// `Drop` on any other exit path (early return, `?`, panic).
pub struct CaptureSession<D: CaptureDevice> {
    device: Option<D>,
}

impl<D: CaptureDevice> CaptureSession<D> {
    /// Opens the device. A device that fails to open is released before the
    /// error is returned.
    pub fn open(mut device: D) -> Result<Self, CaptureError> {
        if let Err(e) = device.open() {
            device.release();
            return Err(e);
        }
        Ok(Self {
            device: Some(device),
        })
    }

    pub fn capture(&mut self) -> Result<Frame, CaptureError> {
        self.device.as_mut().ok_or(CaptureError::NotOpen)?.grab()
    }

    /// Releases the device and hands it back to the caller.
    pub fn close(mut self) -> D {
        let mut device = self
            .device
            .take()
            .expect("CaptureSession holds its device until closed");
        device.release();
        device
    }
}

impl<D: CaptureDevice> Drop for CaptureSession<D> {
    fn drop(&mut self) {
        if let Some(mut device) = self.device.take() {
            log::debug!("Releasing capture device on drop");
            device.release();
        }
    }
}
