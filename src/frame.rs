use arrayvec::ArrayVec;

use crate::error::Error;
use crate::types::{CropRect, PixelFormat, Size};

/// Maximum number of planes a [`BorrowedFrame`] holds inline.
pub const MAX_PLANES: usize = 4;

/// A single plane of image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plane<'a> {
    pub data: &'a [u8],
    pub bytes_per_row: usize,
}

/// A borrowed camera frame owned by the host framework.
///
/// The host may release the frame at any time, so every accessor can fail.
/// Implementations must never release the frame themselves.
pub trait Frame {
    /// Read the crop rectangle. This is the liveness probe: it fails with
    /// [`Error::Released`] or [`Error::NoImage`] once the image is gone.
    fn crop_rect(&self) -> Result<CropRect, Error>;
    fn planes(&self) -> Result<&[Plane<'_>], Error>;
    fn pixel_format(&self) -> PixelFormat;
    fn size(&self) -> Size;
}

impl<F: Frame + ?Sized> Frame for &F {
    fn crop_rect(&self) -> Result<CropRect, Error> {
        (**self).crop_rect()
    }

    fn planes(&self) -> Result<&[Plane<'_>], Error> {
        (**self).planes()
    }

    fn pixel_format(&self) -> PixelFormat {
        (**self).pixel_format()
    }

    fn size(&self) -> Size {
        (**self).size()
    }
}

/// Whether a [`BorrowedFrame`] still has its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Live,
    Released,
    NoImage,
}

/// A frame over plane slices the host already holds.
#[derive(Debug, Clone)]
pub struct BorrowedFrame<'a> {
    planes: ArrayVec<Plane<'a>, MAX_PLANES>,
    pixel_format: PixelFormat,
    size: Size,
    crop: CropRect,
    liveness: Liveness,
}

impl<'a> BorrowedFrame<'a> {
    /// Create a live frame with no planes and a full-size crop.
    pub fn new(pixel_format: PixelFormat, size: Size) -> Self {
        BorrowedFrame {
            planes: ArrayVec::new(),
            pixel_format,
            size,
            crop: CropRect::full(size),
            liveness: Liveness::Live,
        }
    }

    /// Append a plane. Planes past [`MAX_PLANES`] are dropped with a warning.
    pub fn with_plane(mut self, data: &'a [u8], bytes_per_row: usize) -> Self {
        if self
            .planes
            .try_push(Plane {
                data,
                bytes_per_row,
            })
            .is_err()
        {
            log::warn!("dropping plane beyond capacity of {MAX_PLANES}");
        }
        self
    }

    pub fn with_crop(mut self, crop: CropRect) -> Self {
        self.crop = crop;
        self
    }

    pub fn with_liveness(mut self, liveness: Liveness) -> Self {
        self.liveness = liveness;
        self
    }

    /// Mark the frame as released, as the host does when it recycles the image.
    pub fn release(&mut self) {
        self.liveness = Liveness::Released;
    }

    fn ensure_live(&self) -> Result<(), Error> {
        match self.liveness {
            Liveness::Live => Ok(()),
            Liveness::Released => Err(Error::Released),
            Liveness::NoImage => Err(Error::NoImage),
        }
    }
}

impl Frame for BorrowedFrame<'_> {
    fn crop_rect(&self) -> Result<CropRect, Error> {
        self.ensure_live()?;
        Ok(self.crop)
    }

    fn planes(&self) -> Result<&[Plane<'_>], Error> {
        self.ensure_live()?;
        Ok(&self.planes)
    }

    fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Size = Size {
        width: 4,
        height: 2,
    };

    #[test]
    fn planes_beyond_capacity_are_dropped() {
        let data = [0u8; 8];
        let mut frame = BorrowedFrame::new(PixelFormat::Gray8, SIZE);
        for _ in 0..MAX_PLANES + 2 {
            frame = frame.with_plane(&data, 4);
        }
        assert_eq!(frame.planes().unwrap().len(), MAX_PLANES);
    }

    #[test]
    fn released_frame_refuses_access() {
        let data = [1u8; 8];
        let mut frame = BorrowedFrame::new(PixelFormat::Gray8, SIZE).with_plane(&data, 4);
        assert_eq!(frame.crop_rect(), Ok(CropRect::full(SIZE)));
        frame.release();
        assert_eq!(frame.crop_rect(), Err(Error::Released));
        assert_eq!(frame.planes().unwrap_err(), Error::Released);
        assert_eq!(frame.size(), SIZE);
    }

    #[test]
    fn frame_without_image() {
        let frame = BorrowedFrame::new(PixelFormat::Nv21, SIZE).with_liveness(Liveness::NoImage);
        assert_eq!(frame.crop_rect(), Err(Error::NoImage));
    }

    #[test]
    fn reference_forwards_to_frame() {
        let crop = CropRect {
            left: 1,
            top: 0,
            right: 3,
            bottom: 2,
        };
        let frame = BorrowedFrame::new(PixelFormat::Yuv420, SIZE).with_crop(crop);
        let by_ref: &dyn Frame = &frame;
        assert_eq!((&by_ref).crop_rect(), Ok(crop));
        assert_eq!(by_ref.pixel_format(), PixelFormat::Yuv420);
    }
}
