//! Readback regions and pack alignment.

use crate::error::ReadError;
use crate::format::TransferDescriptor;
use crate::limits::PackLimits;

/// Row alignment of readback destinations (`GL_PACK_ALIGNMENT`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PackAlignment {
    /// Rows are tightly packed.
    One = 1,
    /// Rows start on 2-byte boundaries.
    Two = 2,
    /// Rows start on 4-byte boundaries (the graphics API default).
    #[default]
    Four = 4,
    /// Rows start on 8-byte boundaries.
    Eight = 8,
}

impl PackAlignment {
    /// Create from a raw alignment value. Returns `None` unless it is 1, 2, 4 or 8.
    pub const fn from_raw(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            _ => None,
        }
    }

    /// Alignment in bytes.
    #[inline]
    pub const fn bytes(self) -> usize {
        self as usize
    }
}

/// A rectangle of the bound color buffer, in window coordinates.
///
/// The origin may be negative or extend past the framebuffer; pixels outside
/// the framebuffer are unspecified in the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReadRegion {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl ReadRegion {
    /// Create a region, rejecting negative dimensions.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self, ReadError> {
        if width < 0 || height < 0 {
            return Err(ReadError::InvalidDimension { width, height });
        }
        Ok(Self {
            x,
            y,
            width: width as u32,
            height: height as u32,
        })
    }

    /// Region anchored at the origin.
    pub const fn sized(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Left edge.
    #[inline]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Bottom edge.
    #[inline]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Width in pixels.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total pixels in the region.
    #[inline]
    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether the region covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check the region against configured limits.
    pub fn check(&self, limits: &PackLimits) -> Result<(), ReadError> {
        limits.check_dimensions(self.width, self.height)?;
        Ok(())
    }

    /// Byte stride between row starts for `descriptor` at `alignment`.
    pub fn stride(
        &self,
        descriptor: TransferDescriptor,
        alignment: PackAlignment,
    ) -> Result<usize, ReadError> {
        let row = (self.width as usize)
            .checked_mul(descriptor.bytes_per_pixel())
            .ok_or(ReadError::Overflow)?;
        align_up(row, alignment.bytes()).ok_or(ReadError::Overflow)
    }

    /// Bytes a destination must hold to receive this region.
    ///
    /// Every row but the last is padded to `alignment`.
    pub fn byte_len(
        &self,
        descriptor: TransferDescriptor,
        alignment: PackAlignment,
    ) -> Result<usize, ReadError> {
        if self.is_empty() {
            return Ok(0);
        }
        let row = (self.width as usize)
            .checked_mul(descriptor.bytes_per_pixel())
            .ok_or(ReadError::Overflow)?;
        let stride = self.stride(descriptor, alignment)?;
        (self.height as usize - 1)
            .checked_mul(stride)
            .and_then(|padded| padded.checked_add(row))
            .ok_or(ReadError::Overflow)
    }
}

#[inline]
const fn align_up(value: usize, align: usize) -> Option<usize> {
    match value.checked_add(align - 1) {
        Some(v) => Some(v / align * align),
        None => None,
    }
}
