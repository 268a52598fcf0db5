//! Pixel transfer formats for framebuffer readback.
//!
//! [`PixelFormat`] and [`SampleType`] mirror the OpenGL ES `format` and
//! `type` enums accepted by `glReadPixels`. A [`TransferDescriptor`] pairs
//! them and knows how many bytes one pixel occupies in the destination.

use crate::error::ReadError;

// ---------------------------------------------------------------------------
// Descriptor enums
// ---------------------------------------------------------------------------

/// Destination pixel format (GL `format` argument).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u32)]
pub enum PixelFormat {
    /// `GL_RED`
    Red = 0x1903,
    /// `GL_ALPHA`
    Alpha = 0x1906,
    /// `GL_RGB`
    Rgb = 0x1907,
    /// `GL_RGBA`
    Rgba = 0x1908,
    /// `GL_LUMINANCE`
    Luminance = 0x1909,
    /// `GL_LUMINANCE_ALPHA`
    LuminanceAlpha = 0x190A,
    /// `GL_RG`
    Rg = 0x8227,
    /// `GL_RG_INTEGER`
    RgInteger = 0x8228,
    /// `GL_RED_INTEGER`
    RedInteger = 0x8D94,
    /// `GL_RGB_INTEGER`
    RgbInteger = 0x8D98,
    /// `GL_RGBA_INTEGER`
    RgbaInteger = 0x8D99,
}

impl PixelFormat {
    /// Map a raw GL format enum. Returns `None` for unrecognized values.
    pub const fn from_gl(raw: u32) -> Option<Self> {
        match raw {
            0x1903 => Some(Self::Red),
            0x1906 => Some(Self::Alpha),
            0x1907 => Some(Self::Rgb),
            0x1908 => Some(Self::Rgba),
            0x1909 => Some(Self::Luminance),
            0x190A => Some(Self::LuminanceAlpha),
            0x8227 => Some(Self::Rg),
            0x8228 => Some(Self::RgInteger),
            0x8D94 => Some(Self::RedInteger),
            0x8D98 => Some(Self::RgbInteger),
            0x8D99 => Some(Self::RgbaInteger),
            _ => None,
        }
    }

    /// Raw GL enum value.
    #[inline]
    pub const fn gl(self) -> u32 {
        self as u32
    }

    /// Number of channels written per pixel.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Self::Red | Self::Alpha | Self::Luminance | Self::RedInteger => 1,
            Self::LuminanceAlpha | Self::Rg | Self::RgInteger => 2,
            Self::Rgb | Self::RgbInteger => 3,
            Self::Rgba | Self::RgbaInteger => 4,
        }
    }

    /// Whether this format includes an alpha channel.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(
            self,
            Self::Alpha | Self::LuminanceAlpha | Self::Rgba | Self::RgbaInteger
        )
    }
}

/// Destination sample type (GL `type` argument).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u32)]
pub enum SampleType {
    /// `GL_BYTE`
    Byte = 0x1400,
    /// `GL_UNSIGNED_BYTE`
    UnsignedByte = 0x1401,
    /// `GL_SHORT`
    Short = 0x1402,
    /// `GL_UNSIGNED_SHORT`
    UnsignedShort = 0x1403,
    /// `GL_INT`
    Int = 0x1404,
    /// `GL_UNSIGNED_INT`
    UnsignedInt = 0x1405,
    /// `GL_FLOAT`
    Float = 0x1406,
    /// `GL_HALF_FLOAT`
    HalfFloat = 0x140B,
    /// `GL_UNSIGNED_SHORT_4_4_4_4`
    UnsignedShort4444 = 0x8033,
    /// `GL_UNSIGNED_SHORT_5_5_5_1`
    UnsignedShort5551 = 0x8034,
    /// `GL_UNSIGNED_SHORT_5_6_5`
    UnsignedShort565 = 0x8363,
    /// `GL_UNSIGNED_INT_2_10_10_10_REV`
    UnsignedInt2101010Rev = 0x8368,
    /// `GL_UNSIGNED_INT_10F_11F_11F_REV`
    UnsignedInt10f11f11fRev = 0x8C3B,
    /// `GL_UNSIGNED_INT_5_9_9_9_REV`
    UnsignedInt5999Rev = 0x8C3E,
}

impl SampleType {
    /// Map a raw GL type enum. Returns `None` for unrecognized values.
    pub const fn from_gl(raw: u32) -> Option<Self> {
        match raw {
            0x1400 => Some(Self::Byte),
            0x1401 => Some(Self::UnsignedByte),
            0x1402 => Some(Self::Short),
            0x1403 => Some(Self::UnsignedShort),
            0x1404 => Some(Self::Int),
            0x1405 => Some(Self::UnsignedInt),
            0x1406 => Some(Self::Float),
            0x140B => Some(Self::HalfFloat),
            0x8033 => Some(Self::UnsignedShort4444),
            0x8034 => Some(Self::UnsignedShort5551),
            0x8363 => Some(Self::UnsignedShort565),
            0x8368 => Some(Self::UnsignedInt2101010Rev),
            0x8C3B => Some(Self::UnsignedInt10f11f11fRev),
            0x8C3E => Some(Self::UnsignedInt5999Rev),
            _ => None,
        }
    }

    /// Raw GL enum value.
    #[inline]
    pub const fn gl(self) -> u32 {
        self as u32
    }

    /// Byte size of one sample, or of the whole pixel for packed types.
    #[inline]
    pub const fn byte_size(self) -> usize {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short
            | Self::UnsignedShort
            | Self::HalfFloat
            | Self::UnsignedShort4444
            | Self::UnsignedShort5551
            | Self::UnsignedShort565 => 2,
            Self::Int
            | Self::UnsignedInt
            | Self::Float
            | Self::UnsignedInt2101010Rev
            | Self::UnsignedInt10f11f11fRev
            | Self::UnsignedInt5999Rev => 4,
        }
    }

    /// The format a packed type encodes, or `None` for per-channel types.
    pub const fn packed_format(self) -> Option<PixelFormat> {
        match self {
            Self::UnsignedShort565
            | Self::UnsignedInt10f11f11fRev
            | Self::UnsignedInt5999Rev => Some(PixelFormat::Rgb),
            Self::UnsignedShort4444 | Self::UnsignedShort5551 | Self::UnsignedInt2101010Rev => {
                Some(PixelFormat::Rgba)
            }
            _ => None,
        }
    }

    /// Whether one word holds every channel of a pixel.
    #[inline]
    pub const fn is_packed(self) -> bool {
        self.packed_format().is_some()
    }
}

// ---------------------------------------------------------------------------
// TransferDescriptor
// ---------------------------------------------------------------------------

/// A validated format and sample type pair for one readback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransferDescriptor {
    format: PixelFormat,
    sample_type: SampleType,
}

impl TransferDescriptor {
    /// 8-bit RGBA, the layout [`PixelPacker`](crate::PixelPacker) consumes.
    pub const RGBA8: Self = Self {
        format: PixelFormat::Rgba,
        sample_type: SampleType::UnsignedByte,
    };

    /// Pair a format with a sample type.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::IncompatibleFormat`] if `sample_type` is a packed
    /// type for a different format. `GL_UNSIGNED_INT_2_10_10_10_REV` is also
    /// accepted with `GL_RGBA_INTEGER`.
    pub const fn new(format: PixelFormat, sample_type: SampleType) -> Result<Self, ReadError> {
        let compatible = match sample_type.packed_format() {
            None => true,
            Some(packed) => {
                packed as u32 == format as u32
                    || (matches!(sample_type, SampleType::UnsignedInt2101010Rev)
                        && matches!(format, PixelFormat::RgbaInteger))
            }
        };
        if compatible {
            Ok(Self {
                format,
                sample_type,
            })
        } else {
            Err(ReadError::IncompatibleFormat {
                format,
                sample_type,
            })
        }
    }

    /// Build from raw GL `format` and `type` enums.
    pub fn from_gl(format: u32, sample_type: u32) -> Result<Self, ReadError> {
        let format = PixelFormat::from_gl(format).ok_or(ReadError::UnknownFormat(format))?;
        let sample_type =
            SampleType::from_gl(sample_type).ok_or(ReadError::UnknownSampleType(sample_type))?;
        Self::new(format, sample_type)
    }

    /// Destination pixel format.
    #[inline]
    pub const fn format(self) -> PixelFormat {
        self.format
    }

    /// Destination sample type.
    #[inline]
    pub const fn sample_type(self) -> SampleType {
        self.sample_type
    }

    /// Bytes per pixel in the destination.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        if self.sample_type.is_packed() {
            self.sample_type.byte_size()
        } else {
            self.sample_type.byte_size() * self.format.channels()
        }
    }
}

impl Default for TransferDescriptor {
    fn default() -> Self {
        Self::RGBA8
    }
}
