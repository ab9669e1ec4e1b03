//! # dxt-squish-api
//!
//! Safe Rust bindings for a libsquish-compatible DXT1/DXT3/DXT5 block codec.
//!
//! The crate has two halves:
//!
//! - [`binding`]: selects the codec entry points for the current process
//!   architecture exactly once, and caches the outcome.
//! - [`squish`]: validates flags and buffer lengths, sizes outputs, pins the
//!   buffers for the duration of each codec call and forwards the call.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use dxt_squish_api::{compress_image, decompress_image, storage_requirements, SquishFlags};
//!
//! let (width, height) = (8, 8);
//! let rgba = [0u8, 128, 255, 255].repeat(width * height);
//! let flags = SquishFlags::DXT5 | SquishFlags::CLUSTER_FIT;
//!
//! let blocks = compress_image(&rgba, width, height, flags)?;
//! assert_eq!(blocks.len(), storage_requirements(width, height, flags)?);
//!
//! let decoded = decompress_image(&blocks, width, height, flags)?;
//! assert_eq!(decoded.len(), rgba.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `linked-codec` (default): use the `dxt-squish-codec` crate linked into this binary
//! - `dynamic-codec`: otherwise load `squish_x86` / `squish_x64` at runtime
//! - `c-exports`: export the facade (and the codec entry points) as a C API
//!
//! ## Logging
//!
//! Codec selection is logged through [`tracing`] at `info` (or `warn` on
//! failure). Buffer pins are logged at `trace`. Install any subscriber to see them.

#![warn(missing_docs)]

pub mod binding;
#[cfg(feature = "c-exports")]
pub mod c_api;
pub mod error;
pub mod flags;
pub mod pin;
pub mod squish;

#[cfg(test)]
pub(crate) mod test_prelude;

// Re-export main functionality at crate root
pub use binding::{Architecture, Codec, CodecSource, CodecTable, EntryPoint};
pub use error::{FlagsError, LoadError, SquishError};
pub use flags::{CompressionOptions, Fit, Format, Metric, SquishFlags};
pub use pin::{active_pins, PinnedBuffer, PinnedBufferMut};
pub use squish::{
    compress, compress_image, compress_image_into, compress_into, compress_masked,
    compress_masked_into, decompress, decompress_image, decompress_image_into, decompress_into,
    storage_requirements, BLOCK_RGBA_LEN,
};
