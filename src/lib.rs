#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod buffer;
pub mod error;
pub mod frame;
pub mod inspect;
pub mod types;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-exports
pub use buffer::*;
pub use error::*;
pub use frame::*;
pub use inspect::*;
pub use types::*;
