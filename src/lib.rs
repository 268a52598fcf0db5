//! RGBA to packed ARGB conversion and framebuffer readback plumbing.
//!
//! This crate holds the native half of a camera pipeline's frame handoff:
//!
//! - [`PixelPacker`] / [`pack_rgba_to_argb`]: repack interleaved RGBA bytes
//!   into `ARGB_8888` words (alpha in the high byte, blue in the low byte)
//! - [`FrameSource`]: the graphics API seam, with
//!   [`read_region_into_buffer`] and [`read_region`] on top
//! - [`DirectReader`] / [`DoubleBufferedReader`]: whole-frame readers
//! - [`AnalysisFrame`]: an owned RGBA frame for analysis code
//! - [`TransferDescriptor`] / [`ReadRegion`]: readback formats and sizing
//! - [`PackLimits`]: dimension caps applied before any pixel work
//!
//! Every operation validates its inputs before writing, and reports
//! contract violations as [`PackError`] or [`ReadError`].

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod format;
mod frame;
mod limits;
mod pack;
mod reader;
mod region;
mod source;

#[cfg(test)]
mod testing;

pub use error::{BufferRole, PackError, ReadError};
pub use format::{PixelFormat, SampleType, TransferDescriptor};
pub use frame::AnalysisFrame;
pub use limits::{LimitExceeded, PackLimits};
pub use pack::{
    MAX_HOST_ELEMENTS, PixelPacker, argb, argb_from_rgba, pack_rgba_to_argb, pixel_count,
};
pub use reader::{DirectReader, DoubleBufferedReader, PixelReader};
pub use region::{PackAlignment, ReadRegion};
pub use source::{FrameSource, read_region, read_region_into_buffer, read_region_into_buffer_gl};

// Re-exports for callers building typed images.
pub use imgref::{Img, ImgRef, ImgRefMut, ImgVec};
pub use rgb::Rgba;
