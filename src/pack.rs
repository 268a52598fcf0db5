//! RGBA to packed ARGB conversion.
//!
//! Source pixels are four bytes in R, G, B, A order. Each packed word holds
//! alpha in bits 31-24, red in 23-16, green in 15-8 and blue in 7-0, the
//! layout of `ARGB_8888` bitmaps.

use imgref::{ImgRef, ImgRefMut};
use rgb::Rgba;

use crate::error::{BufferRole, PackError};
use crate::limits::PackLimits;

/// Largest element count a host array can index.
///
/// Host arrays are indexed by a signed 32-bit integer, which bounds both the
/// packed word count and the RGBA byte count.
pub const MAX_HOST_ELEMENTS: usize = i32::MAX as usize;

/// Pack one pixel's channels into an ARGB word.
#[inline]
pub const fn argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Pack a typed RGBA pixel into an ARGB word.
#[inline]
pub const fn argb_from_rgba(px: Rgba<u8>) -> u32 {
    argb(px.r, px.g, px.b, px.a)
}

/// Pixel count for a `width` × `height` frame.
///
/// # Errors
///
/// [`PackError::InvalidDimension`] for a negative dimension,
/// [`PackError::Overflow`] when the pixel count or its RGBA byte count
/// exceeds [`MAX_HOST_ELEMENTS`].
pub fn pixel_count(width: i32, height: i32) -> Result<usize, PackError> {
    if width < 0 || height < 0 {
        return Err(PackError::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|pixels| {
            pixels
                .checked_mul(4)
                .is_some_and(|bytes| bytes <= MAX_HOST_ELEMENTS)
        })
        .ok_or(PackError::Overflow { width, height })
}

/// Stateless RGBA to ARGB packer.
///
/// Holds only its [`PackLimits`]; every call is independent, so one packer
/// may be shared across threads as long as each call gets its own buffers.
///
/// ```
/// use argbpack::PixelPacker;
///
/// let rgba = [10, 20, 30, 40, 200, 150, 100, 255];
/// let mut argb = [0u32; 2];
/// PixelPacker::new().pack(2, 1, &rgba, &mut argb)?;
/// assert_eq!(argb, [0x280A141E, 0xFFC89664]);
/// # Ok::<(), argbpack::PackError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelPacker {
    limits: PackLimits,
}

impl PixelPacker {
    /// Packer without limits.
    pub const fn new() -> Self {
        Self {
            limits: PackLimits::none(),
        }
    }

    /// Apply dimension limits.
    pub fn with_limits(mut self, limits: PackLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Configured limits.
    pub fn limits(&self) -> &PackLimits {
        &self.limits
    }

    /// Validate a frame against buffer lengths, returning its pixel count.
    ///
    /// Checks run in order: dimensions, overflow, limits, source length,
    /// destination length.
    pub fn validate(
        &self,
        width: i32,
        height: i32,
        source_len: usize,
        destination_len: usize,
    ) -> Result<usize, PackError> {
        let pixels = pixel_count(width, height)?;
        self.limits
            .check_dimensions(width as u32, height as u32)?;
        let expected = pixels * 4;
        if source_len != expected {
            return Err(PackError::BufferSizeMismatch {
                buffer: BufferRole::Source,
                expected,
                actual: source_len,
            });
        }
        if destination_len != pixels {
            return Err(PackError::BufferSizeMismatch {
                buffer: BufferRole::Destination,
                expected: pixels,
                actual: destination_len,
            });
        }
        Ok(pixels)
    }

    /// Pack `width * height` RGBA pixels into `destination`.
    ///
    /// # Errors
    ///
    /// Fails before writing anything if the dimensions are invalid or the
    /// buffer lengths do not match them exactly.
    pub fn pack(
        &self,
        width: i32,
        height: i32,
        source: &[u8],
        destination: &mut [u32],
    ) -> Result<(), PackError> {
        self.validate(width, height, source.len(), destination.len())
            .inspect_err(|err| log::debug!("rejected RGBA pack: {err}"))?;
        for (px, out) in source.chunks_exact(4).zip(destination.iter_mut()) {
            *out = argb(px[0], px[1], px[2], px[3]);
        }
        Ok(())
    }

    /// Pack host-typed buffers: signed bytes in, signed 32-bit words out.
    ///
    /// Each byte is reinterpreted as unsigned before it is shifted into
    /// place, so `-1i8` contributes `0xFF` to its channel. Output words
    /// carry the same bits as [`pack`](Self::pack) would produce.
    pub fn pack_signed(
        &self,
        width: i32,
        height: i32,
        source: &[i8],
        destination: &mut [i32],
    ) -> Result<(), PackError> {
        self.validate(width, height, source.len(), destination.len())
            .inspect_err(|err| log::debug!("rejected host RGBA pack: {err}"))?;
        for (px, out) in source.chunks_exact(4).zip(destination.iter_mut()) {
            *out = argb(px[0] as u8, px[1] as u8, px[2] as u8, px[3] as u8) as i32;
        }
        Ok(())
    }

    /// Pack a strided RGBA image into a strided ARGB image of the same size.
    ///
    /// Row padding in either image is never read or written.
    pub fn pack_image(
        &self,
        source: ImgRef<'_, Rgba<u8>>,
        mut destination: ImgRefMut<'_, u32>,
    ) -> Result<(), PackError> {
        let source_shape = (source.width(), source.height());
        let destination_shape = (destination.width(), destination.height());
        if source_shape != destination_shape {
            let err = PackError::ShapeMismatch {
                source: source_shape,
                destination: destination_shape,
            };
            log::debug!("rejected RGBA image pack: {err}");
            return Err(err);
        }
        let width = u32::try_from(source.width()).unwrap_or(u32::MAX);
        let height = u32::try_from(source.height()).unwrap_or(u32::MAX);
        self.limits.check_dimensions(width, height)?;

        for (src_row, dst_row) in source.rows().zip(destination.rows_mut()) {
            for (px, out) in src_row.iter().zip(dst_row.iter_mut()) {
                *out = argb_from_rgba(*px);
            }
        }
        Ok(())
    }
}

/// Pack `width * height` RGBA pixels into `destination` without limits.
///
/// Shorthand for [`PixelPacker::new().pack(..)`](PixelPacker::pack).
pub fn pack_rgba_to_argb(
    width: i32,
    height: i32,
    source: &[u8],
    destination: &mut [u32],
) -> Result<(), PackError> {
    PixelPacker::new().pack(width, height, source, destination)
}
