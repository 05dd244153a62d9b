//! Stateless queries over a borrowed [`Frame`].
//!
//! Every function is a single synchronous pass and never releases the frame.
//!
//! # Release race
//!
//! The host may release a frame from another thread at any time. Each
//! extraction re-probes liveness, but a release landing between that probe
//! and the read that follows it is not detected here. Closing that window
//! needs locking inside the host framework; callers that share frames
//! across threads must hold the frame open for the duration of the call.

use crate::buffer::BufferView;
use crate::error::Error;
use crate::frame::{Frame, Plane};
use crate::types::CropRect;

/// Probe the frame's crop rectangle, reporting why it is unusable if so.
pub fn check_live<F: Frame + ?Sized>(frame: &F) -> Result<CropRect, Error> {
    frame.crop_rect()
}

/// Whether the frame is still live. Every failure collapses to `false`.
pub fn is_valid<F: Frame + ?Sized>(frame: &F) -> bool {
    match check_live(frame) {
        Ok(_) => true,
        Err(e) if e.is_liveness() => {
            log::trace!("frame not live: {e}");
            false
        }
        Err(e) => {
            log::debug!("frame probe failed: {e}");
            false
        }
    }
}

pub fn plane_count<F: Frame + ?Sized>(frame: &F) -> Result<usize, Error> {
    Ok(frame.planes()?.len())
}

/// Row stride of plane 0, in bytes.
pub fn bytes_per_row<F: Frame + ?Sized>(frame: &F) -> Result<usize, Error> {
    Ok(first_plane(frame)?.bytes_per_row)
}

/// Mean of plane 0's bytes, each read as 0..=255, using integer division.
pub fn average_luma<F: Frame + ?Sized>(frame: &F) -> Result<u8, Error> {
    let plane = first_plane(frame)?;
    if !frame.pixel_format().has_luma_plane() {
        log::debug!(
            "averaging plane 0 of {:?} frame, which is not a luma plane",
            frame.pixel_format()
        );
    }
    luma_of(plane.data)
}

/// Average a raw byte slice. Fails with [`Error::EmptyBuffer`] on an empty slice.
pub fn luma_of(data: &[u8]) -> Result<u8, Error> {
    if data.is_empty() {
        return Err(Error::EmptyBuffer);
    }
    let total: u64 = data.iter().map(|&b| u64::from(b)).sum();
    // The mean of bytes never exceeds 255.
    Ok((total / data.len() as u64) as u8)
}

/// Rewind `buffer` and copy all of it into a fresh vector.
///
/// The result does not depend on where the cursor was before the call; the
/// cursor ends at the end of the buffer.
#[cfg(feature = "alloc")]
pub fn to_bytes(buffer: &mut BufferView<'_>) -> alloc::vec::Vec<u8> {
    let prior = buffer.position();
    let bytes = buffer.to_vec();
    log::trace!("copied {} bytes (cursor was at {prior})", bytes.len());
    bytes
}

/// A cursor over plane `index`, positioned at its start.
pub fn plane_buffer<F: Frame + ?Sized>(frame: &F, index: usize) -> Result<BufferView<'_>, Error> {
    let planes = frame.planes()?;
    planes
        .get(index)
        .map(|p| BufferView::new(p.data))
        .ok_or(Error::PlaneOutOfRange {
            index,
            count: planes.len(),
        })
}

fn first_plane<F: Frame + ?Sized>(frame: &F) -> Result<Plane<'_>, Error> {
    frame.planes()?.first().copied().ok_or(Error::NoPlanes)
}
