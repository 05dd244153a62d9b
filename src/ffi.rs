//! C ABI over the inspection functions.
//!
//! The host describes a frame with [`RawFrame`], borrowing its own plane
//! memory. Functions returning `i32` report failures as the negative
//! [`Error::code`] of the error.

use std::cell::OnceCell;
use std::ffi::c_void;

use arrayvec::ArrayVec;

use crate::error::{Error, PlatformError};
use crate::frame::{Frame, MAX_PLANES, Plane};
use crate::inspect;
use crate::types::{CropRect, PixelFormat, Size};

/// Host liveness callback. Returns 0 while the frame is live, 1 once it has
/// been released, and any other value to report a host failure. The crop
/// rectangle is written on success.
pub type LivenessFn = unsafe extern "C" fn(context: *const c_void, crop: *mut CropRect) -> i32;

/// Pixel format codes carried in [`RawFrame::pixel_format`].
pub const PIXEL_FORMAT_YUV420: u32 = 0;
pub const PIXEL_FORMAT_NV12: u32 = 1;
pub const PIXEL_FORMAT_NV21: u32 = 2;
pub const PIXEL_FORMAT_GRAY8: u32 = 3;
pub const PIXEL_FORMAT_BGRA32: u32 = 4;
pub const PIXEL_FORMAT_JPEG: u32 = 5;

fn pixel_format_from_raw(code: u32) -> PixelFormat {
    match code {
        PIXEL_FORMAT_YUV420 => PixelFormat::Yuv420,
        PIXEL_FORMAT_NV12 => PixelFormat::Nv12,
        PIXEL_FORMAT_NV21 => PixelFormat::Nv21,
        PIXEL_FORMAT_GRAY8 => PixelFormat::Gray8,
        PIXEL_FORMAT_BGRA32 => PixelFormat::Bgra32,
        PIXEL_FORMAT_JPEG => PixelFormat::Jpeg,
        other => PixelFormat::Other(other),
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawPlane {
    pub data: *const u8,
    pub len: usize,
    pub row_stride: usize,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawFrame {
    pub planes: *const RawPlane,
    pub plane_count: usize,
    pub width: u32,
    pub height: u32,
    /// One of the `PIXEL_FORMAT_*` codes.
    pub pixel_format: u32,
    /// Opaque host pointer handed back to `is_live`.
    pub context: *const c_void,
    /// `None` means the frame has no underlying image.
    pub is_live: Option<LivenessFn>,
}

/// A [`Frame`] view over a host-described [`RawFrame`].
///
/// Plane memory is only turned into slices once the host has confirmed the
/// frame is live, so a released frame's planes are never referenced.
struct HostFrame<'a> {
    raw: &'a RawFrame,
    planes: OnceCell<ArrayVec<Plane<'a>, MAX_PLANES>>,
}

impl<'a> HostFrame<'a> {
    /// SAFETY: while the host reports the frame live, `raw.planes` must point
    /// to `raw.plane_count` planes whose `data` stays readable for `len`
    /// bytes during `'a`. Nothing is read from a released frame.
    unsafe fn new(raw: &'a RawFrame) -> Self {
        HostFrame {
            raw,
            planes: OnceCell::new(),
        }
    }

    fn build_planes(&self) -> ArrayVec<Plane<'a>, MAX_PLANES> {
        let raw_planes: &[RawPlane] = if self.raw.planes.is_null() || self.raw.plane_count == 0 {
            &[]
        } else {
            unsafe { std::slice::from_raw_parts(self.raw.planes, self.raw.plane_count) }
        };
        if raw_planes.len() > MAX_PLANES {
            log::warn!(
                "host frame has {} planes, keeping the first {MAX_PLANES}",
                raw_planes.len()
            );
        }
        raw_planes
            .iter()
            .take(MAX_PLANES)
            .map(|p| Plane {
                data: if p.data.is_null() || p.len == 0 {
                    &[]
                } else {
                    unsafe { std::slice::from_raw_parts(p.data, p.len) }
                },
                bytes_per_row: p.row_stride,
            })
            .collect()
    }
}

impl Frame for HostFrame<'_> {
    fn crop_rect(&self) -> Result<CropRect, Error> {
        let is_live = self.raw.is_live.ok_or(Error::NoImage)?;
        let mut crop = CropRect::default();
        match unsafe { is_live(self.raw.context, &mut crop) } {
            0 => Ok(crop),
            1 => Err(Error::Released),
            status => Err(PlatformError::Status(status).into()),
        }
    }

    fn planes(&self) -> Result<&[Plane<'_>], Error> {
        self.crop_rect()?;
        Ok(self.planes.get_or_init(|| self.build_planes()))
    }

    fn pixel_format(&self) -> PixelFormat {
        pixel_format_from_raw(self.raw.pixel_format)
    }

    fn size(&self) -> Size {
        Size {
            width: self.raw.width,
            height: self.raw.height,
        }
    }
}

/// Largest byte count a single call can report, since results travel as `i32`.
const MAX_REPORTABLE: usize = i32::MAX as usize;

/// Run `f` against the frame behind `frame`, folding failures into codes.
///
/// Successful values above `i32::MAX` saturate; only counts and strides go
/// through here, and callers that copy bytes reject such sizes up front.
unsafe fn with_frame(
    frame: *const RawFrame,
    f: impl FnOnce(&HostFrame<'_>) -> Result<usize, Error>,
) -> i32 {
    let Some(raw) = (unsafe { frame.as_ref() }) else {
        return Error::NullHandle.code();
    };
    let host = unsafe { HostFrame::new(raw) };
    match f(&host) {
        Ok(value) => i32::try_from(value).unwrap_or(i32::MAX),
        Err(e) => {
            log::debug!("frame query failed: {e}");
            e.code()
        }
    }
}

/// Check that `len` bytes fit both the destination and an `i32` result.
fn check_copy_len(len: usize, capacity: usize) -> Result<usize, Error> {
    if len > MAX_REPORTABLE {
        return Err(Error::TooLarge { len });
    }
    if len > capacity {
        return Err(Error::BufferTooSmall {
            needed: len,
            capacity,
        });
    }
    Ok(len)
}

/// # Safety
/// `frame` must be null or point to a valid [`RawFrame`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn frame_inspect_is_valid(frame: *const RawFrame) -> bool {
    let Some(raw) = (unsafe { frame.as_ref() }) else {
        return false;
    };
    inspect::is_valid(&unsafe { HostFrame::new(raw) })
}

/// # Safety
/// `frame` must be null or point to a valid [`RawFrame`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn frame_inspect_plane_count(frame: *const RawFrame) -> i32 {
    unsafe { with_frame(frame, |f| inspect::plane_count(f)) }
}

/// # Safety
/// `frame` must be null or point to a valid [`RawFrame`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn frame_inspect_bytes_per_row(frame: *const RawFrame) -> i32 {
    unsafe { with_frame(frame, |f| inspect::bytes_per_row(f)) }
}

/// # Safety
/// `frame` must be null or point to a valid [`RawFrame`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn frame_inspect_average_luma(frame: *const RawFrame) -> i32 {
    unsafe { with_frame(frame, |f| inspect::average_luma(f).map(usize::from)) }
}

/// Copy plane `index` into `out`, returning the number of bytes written.
///
/// Planes larger than `i32::MAX` bytes are refused with [`Error::TooLarge`]
/// rather than copied, since the count could not be reported.
///
/// # Safety
/// `frame` must be null or point to a valid [`RawFrame`], and `out` must be
/// writable for `capacity` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn frame_inspect_copy_plane(
    frame: *const RawFrame,
    index: usize,
    out: *mut u8,
    capacity: usize,
) -> i32 {
    unsafe {
        with_frame(frame, |f| {
            let mut buffer = inspect::plane_buffer(f, index)?;
            check_copy_len(buffer.len(), capacity)?;
            if buffer.is_empty() {
                return Ok(0);
            }
            if out.is_null() {
                return Err(Error::BufferTooSmall {
                    needed: buffer.len(),
                    capacity: 0,
                });
            }
            let bytes = inspect::to_bytes(&mut buffer);
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), out, bytes.len());
            Ok(bytes.len())
        })
    }
}
