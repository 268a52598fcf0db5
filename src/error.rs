//! Error types for packing and readback.
//!
//! Every error is a precondition violation detected before any pixel is
//! written. Calls are deterministic, so a caller can fix its inputs and
//! call again.

use core::fmt;

use crate::format::{PixelFormat, SampleType};
use crate::limits::LimitExceeded;

/// Which caller buffer failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferRole {
    /// The RGBA byte input.
    Source,
    /// The packed ARGB output.
    Destination,
}

impl fmt::Display for BufferRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Errors from RGBA to ARGB packing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum PackError {
    /// Width or height is negative.
    InvalidDimension { width: i32, height: i32 },
    /// A buffer length does not match the frame dimensions.
    BufferSizeMismatch {
        buffer: BufferRole,
        expected: usize,
        actual: usize,
    },
    /// `width * height` (or its byte length) exceeds the host array index range.
    Overflow { width: i32, height: i32 },
    /// Strided source and destination images differ in size.
    ShapeMismatch {
        source: (usize, usize),
        destination: (usize, usize),
    },
    /// A configured [`PackLimits`](crate::PackLimits) cap was exceeded.
    Limit(LimitExceeded),
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { width, height } => {
                write!(f, "invalid dimensions {width}x{height}")
            }
            Self::BufferSizeMismatch {
                buffer,
                expected,
                actual,
            } => write!(
                f,
                "{buffer} buffer holds {actual} elements, expected {expected}"
            ),
            Self::Overflow { width, height } => {
                write!(f, "{width}x{height} exceeds the addressable buffer range")
            }
            Self::ShapeMismatch {
                source,
                destination,
            } => write!(
                f,
                "source is {}x{} but destination is {}x{}",
                source.0, source.1, destination.0, destination.1
            ),
            Self::Limit(limit) => write!(f, "{limit}"),
        }
    }
}

impl core::error::Error for PackError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Limit(limit) => Some(limit),
            _ => None,
        }
    }
}

impl From<LimitExceeded> for PackError {
    fn from(limit: LimitExceeded) -> Self {
        Self::Limit(limit)
    }
}

/// Errors from framebuffer readback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReadError {
    /// Width or height is negative.
    InvalidDimension { width: i32, height: i32 },
    /// The region's byte size does not fit in memory.
    Overflow,
    /// Raw format enum is not a known pixel format.
    UnknownFormat(u32),
    /// Raw type enum is not a known sample type.
    UnknownSampleType(u32),
    /// Packed sample type used with a format it does not pack.
    IncompatibleFormat {
        format: PixelFormat,
        sample_type: SampleType,
    },
    /// Destination is smaller than the aligned region size.
    BufferTooSmall { required: usize, actual: usize },
    /// The pack buffer could not be mapped for reading.
    MapFailed,
    /// A configured [`PackLimits`](crate::PackLimits) cap was exceeded.
    Limit(LimitExceeded),
    /// Read-back bytes could not be turned into a frame.
    Pack(PackError),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { width, height } => {
                write!(f, "invalid region dimensions {width}x{height}")
            }
            Self::Overflow => f.write_str("region byte size overflows"),
            Self::UnknownFormat(raw) => write!(f, "unknown pixel format 0x{raw:04X}"),
            Self::UnknownSampleType(raw) => write!(f, "unknown sample type 0x{raw:04X}"),
            Self::IncompatibleFormat {
                format,
                sample_type,
            } => write!(f, "sample type {sample_type:?} cannot be read as {format:?}"),
            Self::BufferTooSmall { required, actual } => write!(
                f,
                "destination holds {actual} bytes, region needs {required}"
            ),
            Self::MapFailed => f.write_str("failed to map pack buffer"),
            Self::Limit(limit) => write!(f, "{limit}"),
            Self::Pack(err) => write!(f, "{err}"),
        }
    }
}

impl core::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Limit(limit) => Some(limit),
            Self::Pack(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LimitExceeded> for ReadError {
    fn from(limit: LimitExceeded) -> Self {
        Self::Limit(limit)
    }
}

impl From<PackError> for ReadError {
    fn from(err: PackError) -> Self {
        Self::Pack(err)
    }
}
