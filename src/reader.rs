//! Frame readers that pull RGBA frames off the graphics thread.
//!
//! [`DirectReader`] blocks on every call. [`DoubleBufferedReader`] keeps two
//! pack buffers in flight: each call starts reading the current frame into
//! one buffer and returns the frame read into the other on the previous
//! call, so the driver never stalls on a fresh copy.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::ReadError;
use crate::format::TransferDescriptor;
use crate::frame::AnalysisFrame;
use crate::limits::PackLimits;
use crate::region::{PackAlignment, ReadRegion};
use crate::source::{FrameSource, read_region};

/// Reads whole RGBA8 frames from a [`FrameSource`].
pub trait PixelReader<S: FrameSource> {
    /// The region read on every call.
    fn region(&self) -> ReadRegion;

    /// Read the next frame's tightly packed RGBA bytes.
    ///
    /// Returns `None` while no frame is available yet.
    fn read_frame(&mut self, source: &mut S) -> Result<Option<&[u8]>, ReadError>;

    /// Read the next frame and copy it into an [`AnalysisFrame`].
    fn read_analysis_frame(&mut self, source: &mut S) -> Result<Option<AnalysisFrame>, ReadError> {
        let region = self.region();
        let Some(bytes) = self.read_frame(source)? else {
            return Ok(None);
        };
        let frame =
            AnalysisFrame::from_rgba_bytes(region.width() as i32, region.height() as i32, bytes)?;
        Ok(Some(frame))
    }
}

fn frame_region(width: i32, height: i32, limits: &PackLimits) -> Result<ReadRegion, ReadError> {
    let region = ReadRegion::new(0, 0, width, height)?;
    if region.is_empty() {
        return Err(ReadError::InvalidDimension { width, height });
    }
    region.check(limits)?;
    Ok(region)
}

// ---------------------------------------------------------------------------
// DirectReader
// ---------------------------------------------------------------------------

/// Blocking reader: every call copies the frame straight into CPU memory.
#[derive(Debug)]
pub struct DirectReader {
    region: ReadRegion,
    buffer: Vec<u8>,
}

impl DirectReader {
    /// Reader for a `width` × `height` frame anchored at the origin.
    pub fn new(width: i32, height: i32, limits: &PackLimits) -> Result<Self, ReadError> {
        let region = frame_region(width, height, limits)?;
        let len = region.byte_len(TransferDescriptor::RGBA8, PackAlignment::One)?;
        Ok(Self {
            region,
            buffer: vec![0; len],
        })
    }

    /// Read the frame and borrow its bytes.
    pub fn read<S: FrameSource>(&mut self, source: &mut S) -> Result<&[u8], ReadError> {
        read_region(
            source,
            self.region,
            TransferDescriptor::RGBA8,
            PackAlignment::One,
            &mut self.buffer,
        )?;
        Ok(&self.buffer)
    }
}

impl<S: FrameSource> PixelReader<S> for DirectReader {
    fn region(&self) -> ReadRegion {
        self.region
    }

    fn read_frame(&mut self, source: &mut S) -> Result<Option<&[u8]>, ReadError> {
        self.read(source).map(Some)
    }
}

// ---------------------------------------------------------------------------
// DoubleBufferedReader
// ---------------------------------------------------------------------------

/// Ping-pong reader over two pack buffers.
///
/// The first call only starts a transfer and returns `None`; call `n`
/// returns the frame submitted by call `n - 1`. No pack buffer is left bound
/// after any call. Buffers live until [`release`](Self::release).
#[derive(Debug)]
pub struct DoubleBufferedReader<B> {
    region: ReadRegion,
    buffers: [B; 2],
    current: usize,
    primed: bool,
    staging: Vec<u8>,
}

impl<B: Copy> DoubleBufferedReader<B> {
    /// Allocate both pack buffers for a `width` × `height` RGBA8 frame.
    pub fn new<S>(
        source: &mut S,
        width: i32,
        height: i32,
        limits: &PackLimits,
    ) -> Result<Self, ReadError>
    where
        S: FrameSource<Buffer = B>,
    {
        let region = frame_region(width, height, limits)?;
        let len = region.byte_len(TransferDescriptor::RGBA8, PackAlignment::One)?;
        let buffers = [source.create_pack_buffer(len), source.create_pack_buffer(len)];
        source.bind_pack_buffer(None);
        log::debug!("allocated two {len}-byte pack buffers for {width}x{height} readback");
        Ok(Self {
            region,
            buffers,
            current: 0,
            primed: false,
            staging: vec![0; len],
        })
    }

    /// Submit this frame and return the previous one, if any.
    pub fn read<S>(&mut self, source: &mut S) -> Result<Option<&[u8]>, ReadError>
    where
        S: FrameSource<Buffer = B>,
    {
        source.bind_pack_buffer(Some(self.buffers[self.current]));
        source.set_pack_alignment(PackAlignment::One);
        source.read_pixels_to_bound_buffer(self.region, TransferDescriptor::RGBA8);
        self.current = (self.current + 1) % self.buffers.len();

        if !self.primed {
            source.bind_pack_buffer(None);
            self.primed = true;
            log::trace!("first readback submitted, no frame yet");
            return Ok(None);
        }

        source.bind_pack_buffer(Some(self.buffers[self.current]));
        let staging = &mut self.staging;
        let copied = source.with_mapped_pack_buffer(staging.len(), |mapped| {
            staging.copy_from_slice(mapped);
        });
        source.bind_pack_buffer(None);

        match copied {
            Some(()) => Ok(Some(&self.staging)),
            None => {
                log::warn!("pack buffer map failed, dropping frame");
                Err(ReadError::MapFailed)
            }
        }
    }

    /// Whether a previous transfer is pending, so the next read returns a frame.
    pub fn is_primed(&self) -> bool {
        self.primed
    }

    /// Free both pack buffers.
    pub fn release<S>(self, source: &mut S)
    where
        S: FrameSource<Buffer = B>,
    {
        for buffer in self.buffers {
            source.delete_pack_buffer(buffer);
        }
        log::debug!("released readback pack buffers");
    }
}

impl<B: Copy, S: FrameSource<Buffer = B>> PixelReader<S> for DoubleBufferedReader<B> {
    fn region(&self) -> ReadRegion {
        self.region
    }

    fn read_frame(&mut self, source: &mut S) -> Result<Option<&[u8]>, ReadError> {
        self.read(source)
    }
}
