use core::fmt;

/// Failure reported by the host framework itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlatformError {
    Message(&'static str),
    /// A non-zero status returned by a host callback.
    Status(i32),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(msg) => f.write_str(msg),
            Self::Status(code) => write!(f, "host returned status {code}"),
        }
    }
}

impl core::error::Error for PlatformError {}

/// Top-level crate error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The frame has already been released by the host.
    Released,
    /// The frame carries no underlying image.
    NoImage,
    NoPlanes,
    /// The plane buffer holds no bytes, so no average exists.
    EmptyBuffer,
    PlaneOutOfRange {
        index: usize,
        count: usize,
    },
    BufferTooSmall {
        needed: usize,
        capacity: usize,
    },
    NullHandle,
    /// A byte count too large to report through an `i32` result.
    TooLarge {
        len: usize,
    },
    Platform(PlatformError),
}

impl Error {
    /// Stable negative code used when this error crosses the C ABI.
    pub fn code(&self) -> i32 {
        match self {
            Self::Released => -1,
            Self::NoImage => -2,
            Self::NoPlanes => -3,
            Self::EmptyBuffer => -4,
            Self::PlaneOutOfRange { .. } => -5,
            Self::BufferTooSmall { .. } => -6,
            Self::NullHandle => -7,
            Self::Platform(_) => -8,
            Self::TooLarge { .. } => -9,
        }
    }

    /// Whether this error means the frame is not (or no longer) usable.
    pub fn is_liveness(&self) -> bool {
        matches!(self, Self::Released | Self::NoImage | Self::NullHandle)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Released => f.write_str("frame already released"),
            Self::NoImage => f.write_str("frame has no underlying image"),
            Self::NoPlanes => f.write_str("frame has no planes"),
            Self::EmptyBuffer => f.write_str("plane buffer is empty"),
            Self::PlaneOutOfRange { index, count } => {
                write!(f, "plane {index} out of range (frame has {count})")
            }
            Self::BufferTooSmall { needed, capacity } => {
                write!(f, "buffer too small: need {needed} bytes, have {capacity}")
            }
            Self::NullHandle => f.write_str("null frame handle"),
            Self::TooLarge { len } => write!(f, "{len} bytes is too large to report"),
            Self::Platform(e) => write!(f, "platform error: {e}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Platform(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlatformError> for Error {
    fn from(e: PlatformError) -> Self {
        Self::Platform(e)
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn codes_are_negative_and_distinct() {
        let errors = [
            Error::Released,
            Error::NoImage,
            Error::NoPlanes,
            Error::EmptyBuffer,
            Error::PlaneOutOfRange { index: 3, count: 1 },
            Error::BufferTooSmall {
                needed: 8,
                capacity: 4,
            },
            Error::NullHandle,
            Error::Platform(PlatformError::Status(5)),
            Error::TooLarge { len: 1 << 31 },
        ];
        let mut codes: Vec<i32> = errors.iter().map(Error::code).collect();
        assert!(codes.iter().all(|c| *c < 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn platform_error_is_source() {
        let err = Error::from(PlatformError::Message("probe failed"));
        assert_eq!(err.to_string(), "platform error: probe failed");
        assert_eq!(err.source().unwrap().to_string(), "probe failed");
        assert!(Error::EmptyBuffer.source().is_none());
    }

    #[test]
    fn liveness_classification() {
        assert!(Error::Released.is_liveness());
        assert!(Error::NullHandle.is_liveness());
        assert!(!Error::EmptyBuffer.is_liveness());
    }
}
