use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("unsupported channel count {0} (expected 3 for RGB or 4 for RGBA)")]
    UnsupportedChannels(u8),
    #[error("data length {actual} does not match {width}x{height}x{channels} = {expected}")]
    LengthMismatch {
        width: u32,
        height: u32,
        channels: u8,
        expected: usize,
        actual: usize,
    },
}

/// A captured still frame: contiguous RGB or RGBA bytes in row-major order.
///
/// Decoding happens at the capture boundary; the detection layer only reads
/// the red, green and blue channels and ignores alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Frame {
    /// Builds a frame from trusted data. Dimensions are only checked in debug
    /// builds; use [`Frame::try_new`] for buffers coming from callers.
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert!(
            channels == 3 || channels == 4,
            "channels must be 3 (RGB) or 4 (RGBA)"
        );
        debug_assert_eq!(
            data.len(),
            expected_len(width, height, channels),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    pub fn try_new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: u8,
    ) -> Result<Self, FrameError> {
        check_layout(data.len(), width, height, channels)?;
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Skips every layout check, including the debug ones.
    #[cfg(test)]
    pub(crate) fn new_unchecked(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(img.into_raw(), width, height, 3)
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(img.into_raw(), width, height, 4)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Re-checks the layout invariant `try_new` enforces. Frames built with
    /// [`Frame::new`] are only checked in debug builds.
    pub fn validate(&self) -> Result<(), FrameError> {
        check_layout(self.data.len(), self.width, self.height, self.channels)
    }

    /// `(r, g, b)` triples in row-major scan order.
    pub fn pixels(&self) -> impl Iterator<Item = (u8, u8, u8)> + '_ {
        self.data
            .chunks_exact(self.channels as usize)
            .map(|px| (px[0], px[1], px[2]))
    }
}

fn expected_len(width: u32, height: u32, channels: u8) -> usize {
    (width as usize) * (height as usize) * (channels as usize)
}

fn check_layout(len: usize, width: u32, height: u32, channels: u8) -> Result<(), FrameError> {
    if channels != 3 && channels != 4 {
        return Err(FrameError::UnsupportedChannels(channels));
    }
    let expected = expected_len(width, height, channels);
    if len != expected {
        return Err(FrameError::LengthMismatch {
            width,
            height,
            channels,
            expected,
            actual: len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.pixel_count(), 4);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_try_new_accepts_rgba() {
        let frame = Frame::try_new(vec![0u8; 16], 2, 2, 4).unwrap();
        assert_eq!(frame.channels(), 4);
        assert_eq!(frame.pixel_count(), 4);
    }

    #[test]
    fn test_try_new_rejects_length_mismatch() {
        let err = Frame::try_new(vec![0u8; 10], 2, 2, 3).unwrap_err();
        assert_eq!(
            err,
            FrameError::LengthMismatch {
                width: 2,
                height: 2,
                channels: 3,
                expected: 12,
                actual: 10,
            }
        );
    }

    #[test]
    fn test_try_new_rejects_grayscale() {
        let err = Frame::try_new(vec![0u8; 4], 2, 2, 1).unwrap_err();
        assert_eq!(err, FrameError::UnsupportedChannels(1));
    }

    #[test]
    fn test_zero_area_frame_is_constructible_and_empty() {
        let frame = Frame::try_new(Vec::new(), 0, 5, 4).unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame.pixels().count(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3);
    }

    #[test]
    fn test_validate_accepts_consistent_frame() {
        assert_eq!(Frame::new(vec![0u8; 12], 2, 2, 3).validate(), Ok(()));
    }

    #[test]
    fn test_validate_catches_short_buffer() {
        let frame = Frame::new_unchecked(vec![200, 120, 90], 2, 2, 3);
        assert!(matches!(
            frame.validate(),
            Err(FrameError::LengthMismatch {
                expected: 12,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_catches_bad_channels() {
        let frame = Frame::new_unchecked(vec![0u8; 8], 2, 2, 2);
        assert_eq!(frame.validate(), Err(FrameError::UnsupportedChannels(2)));
    }

    #[test]
    fn test_pixels_row_major_and_ignore_alpha() {
        // 2x2 RGBA, each pixel tagged by its red value
        let data = vec![
            1, 10, 20, 255, 2, 11, 21, 0, //
            3, 12, 22, 128, 4, 13, 23, 7,
        ];
        let frame = Frame::new(data, 2, 2, 4);
        let pixels: Vec<_> = frame.pixels().collect();
        assert_eq!(
            pixels,
            vec![(1, 10, 20), (2, 11, 21), (3, 12, 22), (4, 13, 23)]
        );
    }

    #[test]
    fn test_from_rgba_image() {
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgba([9, 8, 7, 6]));
        let frame = Frame::from_rgba_image(img);
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 4);
        assert_eq!(frame.pixels().last(), Some((9, 8, 7)));
    }

    #[test]
    fn test_from_rgb_image() {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([50, 100, 200]));
        let frame = Frame::from_rgb_image(img);
        assert_eq!(frame.channels(), 3);
        assert!(frame.pixels().all(|p| p == (50, 100, 200)));
    }
}
