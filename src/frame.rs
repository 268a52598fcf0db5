//! Owned RGBA frames handed to analysis code.

use alloc::vec;
use alloc::vec::Vec;

use imgref::{ImgRef, ImgRefMut, ImgVec};
use rgb::Rgba;

use crate::error::{BufferRole, PackError};
use crate::pack::{PixelPacker, pixel_count};

/// A frame read back from the GPU, as RGBA pixels in row order.
///
/// Converting to ARGB allocates; do it off the graphics thread.
#[derive(Clone, Debug)]
pub struct AnalysisFrame {
    pixels: ImgVec<Rgba<u8>>,
}

impl AnalysisFrame {
    /// Copy a tightly packed RGBA byte buffer into a frame.
    ///
    /// # Errors
    ///
    /// Same checks as [`PixelPacker::pack`]: negative or oversized
    /// dimensions, or a byte length other than `4 * width * height`.
    /// Frames must hold at least one pixel.
    pub fn from_rgba_bytes(width: i32, height: i32, bytes: &[u8]) -> Result<Self, PackError> {
        let pixels = pixel_count(width, height)?;
        if pixels == 0 {
            return Err(PackError::InvalidDimension { width, height });
        }
        PixelPacker::new().validate(width, height, bytes.len(), pixels)?;
        let buf: Vec<Rgba<u8>> = bytes
            .chunks_exact(4)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(Self {
            pixels: ImgVec::new(buf, width as usize, height as usize),
        })
    }

    /// Wrap typed pixels.
    pub fn from_img(pixels: ImgVec<Rgba<u8>>) -> Self {
        Self { pixels }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    /// Frame height in pixels.
    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    /// Borrow the pixels.
    pub fn as_img(&self) -> ImgRef<'_, Rgba<u8>> {
        self.pixels.as_ref()
    }

    /// Pack into a newly allocated ARGB image.
    pub fn to_argb(&self) -> Result<ImgVec<u32>, PackError> {
        let mut out = ImgVec::new(
            vec![0u32; self.width() * self.height()],
            self.width(),
            self.height(),
        );
        PixelPacker::new().pack_image(self.as_img(), out.as_mut())?;
        Ok(out)
    }

    /// Pack into a caller buffer of exactly `width * height` words.
    pub fn pack_into(&self, destination: &mut [u32]) -> Result<(), PackError> {
        let expected = self.width() * self.height();
        if destination.len() != expected {
            return Err(PackError::BufferSizeMismatch {
                buffer: BufferRole::Destination,
                expected,
                actual: destination.len(),
            });
        }
        let out = ImgRefMut::new(destination, self.width(), self.height());
        PixelPacker::new().pack_image(self.as_img(), out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: [u8; 8] = [10, 20, 30, 40, 200, 150, 100, 255];

    #[test]
    fn from_bytes_and_back() {
        let frame = AnalysisFrame::from_rgba_bytes(2, 1, &SCENARIO).unwrap();
        assert_eq!((frame.width(), frame.height()), (2, 1));
        assert_eq!(frame.as_img().buf()[1], Rgba::new(200, 150, 100, 255));

        let argb = frame.to_argb().unwrap();
        assert_eq!(argb.buf().as_slice(), &[0x280A_141E, 0xFFC8_9664]);
    }

    #[test]
    fn pack_into_caller_buffer() {
        let frame = AnalysisFrame::from_rgba_bytes(1, 2, &SCENARIO).unwrap();
        let mut out = [0u32; 2];
        frame.pack_into(&mut out).unwrap();
        assert_eq!(out, [0x280A_141E, 0xFFC8_9664]);

        let mut short = [0u32; 1];
        assert_eq!(
            frame.pack_into(&mut short),
            Err(PackError::BufferSizeMismatch {
                buffer: BufferRole::Destination,
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn wrong_byte_count_rejected() {
        assert!(matches!(
            AnalysisFrame::from_rgba_bytes(2, 2, &SCENARIO),
            Err(PackError::BufferSizeMismatch {
                buffer: BufferRole::Source,
                expected: 16,
                actual: 8,
            })
        ));
        assert!(matches!(
            AnalysisFrame::from_rgba_bytes(-2, 1, &SCENARIO),
            Err(PackError::InvalidDimension { .. })
        ));
        assert_eq!(
            AnalysisFrame::from_rgba_bytes(0, 4, &[]).map(|f| f.width()),
            Err(PackError::InvalidDimension {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn wraps_typed_pixels() {
        let img = ImgVec::new(vec![Rgba::new(1u8, 2, 3, 4); 6], 3, 2);
        let frame = AnalysisFrame::from_img(img);
        let argb = frame.to_argb().unwrap();
        assert!(argb.buf().iter().all(|&w| w == 0x0401_0203));
    }
}
