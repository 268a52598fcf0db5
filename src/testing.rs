//! In-memory [`FrameSource`] for tests.

use alloc::vec;
use alloc::vec::Vec;

use crate::format::TransferDescriptor;
use crate::region::{PackAlignment, ReadRegion};
use crate::source::FrameSource;

/// One driver call, as recorded by [`FakeFrameSource`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    PackAlignment(PackAlignment),
    ReadToBuffer(ReadRegion, TransferDescriptor),
    Read(ReadRegion, TransferDescriptor),
    Create(usize),
    Bind(Option<u32>),
    Map(usize),
    Delete(u32),
}

/// An RGBA8 framebuffer with pack buffers, recording every call.
///
/// Rows are stored bottom-up, matching window coordinates.
pub(crate) struct FakeFrameSource {
    width: usize,
    height: usize,
    framebuffer: Vec<u8>,
    alignment: PackAlignment,
    buffers: Vec<Option<Vec<u8>>>,
    bound: Option<u32>,
    pub(crate) fail_map: bool,
    pub(crate) calls: Vec<Call>,
}

impl FakeFrameSource {
    /// Framebuffer filled with a per-pixel pattern for frame 0.
    pub(crate) fn gradient(width: usize, height: usize) -> Self {
        let mut source = Self {
            width,
            height,
            framebuffer: vec![0; width * height * 4],
            alignment: PackAlignment::default(),
            buffers: Vec::new(),
            bound: None,
            fail_map: false,
            calls: Vec::new(),
        };
        source.draw_frame(0);
        source
    }

    /// Repaint the framebuffer with the pattern for `frame`.
    pub(crate) fn draw_frame(&mut self, frame: usize) {
        for (i, byte) in self.framebuffer.iter_mut().enumerate() {
            *byte = (i * 7 + frame * 31) as u8;
        }
    }

    /// Framebuffer bytes of `count` pixels starting at `(x, y)` in row order.
    pub(crate) fn pixel_bytes(&self, x: usize, y: usize, count: usize) -> Vec<u8> {
        let start = (y * self.width + x) * 4;
        self.framebuffer[start..start + count * 4].to_vec()
    }

    /// Contents of a pack buffer.
    pub(crate) fn buffer_contents(&self, buffer: u32) -> &[u8] {
        self.buffers[buffer as usize - 1]
            .as_deref()
            .unwrap_or_default()
    }

    /// Currently bound pack buffer.
    pub(crate) fn bound(&self) -> Option<u32> {
        self.bound
    }

    /// Number of pack buffers not yet deleted.
    pub(crate) fn live_buffers(&self) -> usize {
        self.buffers.iter().filter(|b| b.is_some()).count()
    }

    fn copy_region(
        &self,
        region: ReadRegion,
        descriptor: TransferDescriptor,
        destination: &mut [u8],
    ) {
        let bpp = descriptor.bytes_per_pixel();
        let Ok(stride) = region.stride(descriptor, self.alignment) else {
            return;
        };
        for row in 0..region.height() as usize {
            for col in 0..region.width() as usize {
                let offset = row * stride + col * bpp;
                let Some(out) = destination.get_mut(offset..offset + bpp) else {
                    return;
                };
                let x = region.x() as i64 + col as i64;
                let y = region.y() as i64 + row as i64;
                let inside = x >= 0
                    && y >= 0
                    && (x as usize) < self.width
                    && (y as usize) < self.height;
                if inside && descriptor == TransferDescriptor::RGBA8 {
                    let start = (y as usize * self.width + x as usize) * 4;
                    out.copy_from_slice(&self.framebuffer[start..start + 4]);
                } else {
                    out.fill(0);
                }
            }
        }
    }
}

impl FrameSource for FakeFrameSource {
    type Buffer = u32;

    fn set_pack_alignment(&mut self, alignment: PackAlignment) {
        self.calls.push(Call::PackAlignment(alignment));
        self.alignment = alignment;
    }

    fn read_pixels_to_bound_buffer(&mut self, region: ReadRegion, descriptor: TransferDescriptor) {
        self.calls.push(Call::ReadToBuffer(region, descriptor));
        let Some(handle) = self.bound else {
            return;
        };
        let mut staged = self.buffers[handle as usize - 1]
            .take()
            .unwrap_or_default();
        self.copy_region(region, descriptor, &mut staged);
        self.buffers[handle as usize - 1] = Some(staged);
    }

    fn read_pixels(
        &mut self,
        region: ReadRegion,
        descriptor: TransferDescriptor,
        destination: &mut [u8],
    ) {
        self.calls.push(Call::Read(region, descriptor));
        self.copy_region(region, descriptor, destination);
    }

    fn create_pack_buffer(&mut self, size: usize) -> u32 {
        self.calls.push(Call::Create(size));
        self.buffers.push(Some(vec![0; size]));
        self.buffers.len() as u32
    }

    fn bind_pack_buffer(&mut self, buffer: Option<u32>) {
        self.calls.push(Call::Bind(buffer));
        self.bound = buffer;
    }

    fn with_mapped_pack_buffer<R>(
        &mut self,
        len: usize,
        f: impl FnOnce(&[u8]) -> R,
    ) -> Option<R> {
        self.calls.push(Call::Map(len));
        if self.fail_map {
            return None;
        }
        let handle = self.bound?;
        let data = self.buffers[handle as usize - 1].as_deref()?;
        data.get(..len).map(f)
    }

    fn delete_pack_buffer(&mut self, buffer: u32) {
        self.calls.push(Call::Delete(buffer));
        if self.bound == Some(buffer) {
            self.bound = None;
        }
        self.buffers[buffer as usize - 1] = None;
    }
}
