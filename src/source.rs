//! Framebuffer readback over the graphics API.
//!
//! [`FrameSource`] is the seam between this crate and the driver: it wraps
//! the handful of pixel-pack calls readback needs, so everything above it
//! can run against a fake in tests. All calls block the thread that owns
//! the graphics context until the driver finishes.

use crate::error::ReadError;
use crate::format::{PixelFormat, SampleType, TransferDescriptor};
use crate::region::{PackAlignment, ReadRegion};

/// The currently bound color buffer and its pixel-pack buffer objects.
pub trait FrameSource {
    /// Buffer object handle.
    type Buffer: Copy;

    /// Set the row alignment of subsequent readbacks.
    fn set_pack_alignment(&mut self, alignment: PackAlignment);

    /// Copy `region` into the currently bound pack buffer.
    ///
    /// The destination is implicit: callers bind it with
    /// [`bind_pack_buffer`](Self::bind_pack_buffer) first.
    fn read_pixels_to_bound_buffer(&mut self, region: ReadRegion, descriptor: TransferDescriptor);

    /// Copy `region` into caller memory.
    ///
    /// `destination` holds at least `region.byte_len(descriptor, alignment)`
    /// bytes for the current pack alignment.
    fn read_pixels(
        &mut self,
        region: ReadRegion,
        descriptor: TransferDescriptor,
        destination: &mut [u8],
    );

    /// Allocate a pack buffer of `size` bytes for streaming reads.
    ///
    /// Leaves no pack buffer bound.
    fn create_pack_buffer(&mut self, size: usize) -> Self::Buffer;

    /// Bind `buffer` as the pack target, or unbind with `None`.
    fn bind_pack_buffer(&mut self, buffer: Option<Self::Buffer>);

    /// Map the first `len` bytes of the bound pack buffer for reading,
    /// run `f` over them, and unmap.
    ///
    /// Returns `None` when the buffer cannot be mapped.
    fn with_mapped_pack_buffer<R>(&mut self, len: usize, f: impl FnOnce(&[u8]) -> R)
    -> Option<R>;

    /// Free a pack buffer.
    fn delete_pack_buffer(&mut self, buffer: Self::Buffer);
}

/// Copy a region of the bound color buffer into the bound pack buffer.
///
/// Validates the region and the format/type pairing before touching the
/// driver. An empty region is forwarded unchanged; the driver treats it as
/// a no-op.
pub fn read_region_into_buffer<S: FrameSource>(
    source: &mut S,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    format: PixelFormat,
    sample_type: SampleType,
) -> Result<(), ReadError> {
    let region = ReadRegion::new(x, y, width, height)?;
    let descriptor = TransferDescriptor::new(format, sample_type)?;
    log::trace!(
        "reading {}x{} at ({x}, {y}) as {format:?}/{sample_type:?} into pack buffer",
        region.width(),
        region.height()
    );
    source.read_pixels_to_bound_buffer(region, descriptor);
    Ok(())
}

/// [`read_region_into_buffer`] with raw GL `format` and `type` enums.
pub fn read_region_into_buffer_gl<S: FrameSource>(
    source: &mut S,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    format: u32,
    sample_type: u32,
) -> Result<(), ReadError> {
    let descriptor = TransferDescriptor::from_gl(format, sample_type)
        .inspect_err(|err| log::debug!("rejected readback: {err}"))?;
    read_region_into_buffer(
        source,
        x,
        y,
        width,
        height,
        descriptor.format(),
        descriptor.sample_type(),
    )
}

/// Copy a region of the bound color buffer into `destination`.
///
/// Sets the pack alignment first, so the destination only needs to hold
/// `region.byte_len(descriptor, alignment)` bytes.
pub fn read_region<S: FrameSource>(
    source: &mut S,
    region: ReadRegion,
    descriptor: TransferDescriptor,
    alignment: PackAlignment,
    destination: &mut [u8],
) -> Result<(), ReadError> {
    let required = region.byte_len(descriptor, alignment)?;
    if destination.len() < required {
        let err = ReadError::BufferTooSmall {
            required,
            actual: destination.len(),
        };
        log::debug!("rejected readback: {err}");
        return Err(err);
    }
    source.set_pack_alignment(alignment);
    source.read_pixels(region, descriptor, &mut destination[..required]);
    Ok(())
}
