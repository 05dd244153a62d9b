/// Pixel formats a host frame may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Planar Y, U, V (three planes). The Android `YUV_420_888` layout.
    Yuv420,
    /// Y plane plus interleaved UV plane.
    Nv12,
    /// Y plane plus interleaved VU plane.
    Nv21,
    /// Single luma plane.
    Gray8,
    Bgra32,
    Jpeg,
    /// A host format code with no named variant.
    Other(u32),
}

impl PixelFormat {
    /// Whether plane 0 holds luma samples, one byte per pixel.
    pub fn has_luma_plane(&self) -> bool {
        matches!(self, Self::Yuv420 | Self::Nv12 | Self::Nv21 | Self::Gray8)
    }
}

/// Pixel dimensions of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// A frame's crop rectangle, in pixels.
///
/// Reading it is how liveness is probed: the host refuses once the
/// underlying image is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CropRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl CropRect {
    /// A rectangle covering the whole of `size`.
    pub fn full(size: Size) -> Self {
        CropRect {
            left: 0,
            top: 0,
            right: i32::try_from(size.width).unwrap_or(i32::MAX),
            bottom: i32::try_from(size.height).unwrap_or(i32::MAX),
        }
    }

    /// Horizontal extent; an inverted rectangle is empty.
    pub fn width(&self) -> u32 {
        if self.right > self.left {
            self.right.abs_diff(self.left)
        } else {
            0
        }
    }

    pub fn height(&self) -> u32 {
        if self.bottom > self.top {
            self.bottom.abs_diff(self.top)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_crop_matches_size() {
        let rect = CropRect::full(Size {
            width: 640,
            height: 480,
        });
        assert_eq!(rect.width(), 640);
        assert_eq!(rect.height(), 480);
        assert_eq!((rect.left, rect.top), (0, 0));
    }

    #[test]
    fn luma_plane_formats() {
        assert!(PixelFormat::Yuv420.has_luma_plane());
        assert!(PixelFormat::Gray8.has_luma_plane());
        assert!(!PixelFormat::Bgra32.has_luma_plane());
        assert!(!PixelFormat::Jpeg.has_luma_plane());
        assert!(!PixelFormat::Other(7).has_luma_plane());
    }

    #[test]
    fn full_crop_saturates_huge_sizes() {
        let rect = CropRect::full(Size {
            width: u32::MAX,
            height: u32::MAX,
        });
        assert_eq!(rect.right, i32::MAX);
        assert_eq!(rect.bottom, i32::MAX);
        assert_eq!(rect.width(), i32::MAX as u32);
    }

    #[test]
    fn extents_of_extreme_rects() {
        let wide = CropRect {
            left: i32::MIN,
            top: i32::MIN,
            right: i32::MAX,
            bottom: 10,
        };
        assert_eq!(wide.width(), u32::MAX);
        assert_eq!(wide.height(), 10u32 + 2_147_483_648);

        let inverted = CropRect {
            left: 10,
            top: 5,
            right: i32::MIN,
            bottom: 0,
        };
        assert_eq!(inverted.width(), 0);
        assert_eq!(inverted.height(), 0);
    }
}
