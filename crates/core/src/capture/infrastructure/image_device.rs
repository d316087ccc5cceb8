use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageReader;

use crate::capture::domain::capture_device::{CaptureDevice, CaptureError};
use crate::shared::frame::Frame;

/// Adapts a single image file to the [`CaptureDevice`] interface.
///
/// The file is read and decoded on `open`; every `grab` then returns the same
/// still frame, the way a paused camera would.
pub struct ImageFileDevice {
    path: PathBuf,
    frame: Option<Frame>,
}

impl ImageFileDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            frame: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CaptureDevice for ImageFileDevice {
    fn open(&mut self) -> Result<(), CaptureError> {
        let origin = self.path.display().to_string();
        let bytes = std::fs::read(&self.path).map_err(|source| CaptureError::Io {
            origin: origin.clone(),
            source,
        })?;
        self.frame = Some(decode_frame(&bytes, &origin)?);
        Ok(())
    }

    fn grab(&mut self) -> Result<Frame, CaptureError> {
        self.frame.clone().ok_or(CaptureError::NotOpen)
    }

    fn release(&mut self) {
        self.frame = None;
    }
}

/// Same as [`ImageFileDevice`] but over an encoded image already in memory,
/// e.g. an upload body.
pub struct MemoryImageDevice {
    bytes: Vec<u8>,
    frame: Option<Frame>,
}

impl MemoryImageDevice {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes, frame: None }
    }
}

impl CaptureDevice for MemoryImageDevice {
    fn open(&mut self) -> Result<(), CaptureError> {
        self.frame = Some(decode_frame(&self.bytes, "memory buffer")?);
        Ok(())
    }

    fn grab(&mut self) -> Result<Frame, CaptureError> {
        self.frame.clone().ok_or(CaptureError::NotOpen)
    }

    fn release(&mut self) {
        self.frame = None;
    }
}

/// Decodes an encoded image (format guessed from its content) into an RGBA
/// frame, the layout a browser canvas hands out.
pub fn decode_frame(bytes: &[u8], origin: &str) -> Result<Frame, CaptureError> {
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|source| CaptureError::Io {
            origin: origin.to_string(),
            source,
        })?
        .decode()
        .map_err(|source| CaptureError::Decode {
            origin: origin.to_string(),
            source,
        })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Frame::try_new(rgba.into_raw(), width, height, 4)?)
}
