//! DXT1/DXT3/DXT5 block compression with a libsquish-compatible C ABI.
//!
//! This crate is the codec that `dxt-squish-api` binds to. It exposes six
//! entry points taking raw pointers and plain integers (see [`c_api`]), plus
//! the safe slice-level functions backing them.
//!
//! The entry points are always compiled so they can be linked in-process. With
//! the `c-exports` feature they are also exported under unmangled names, which
//! is what allows the `cdylib` build to be loaded as `squish_x86` / `squish_x64`.
//!
//! # Features
//!
//! - `std` (default): link the standard library. Without it the crate is
//!   `no_std` and never allocates.
//! - `c-exports`: export the entry points under their unmangled C names.
//!
//! # Examples
//!
//! ```
//! use dxt_squish_codec::{compress_block, decompress_block, flags};
//!
//! let rgba = [[255u8, 0, 0, 255]; 16].concat();
//! let rgba: [u8; 64] = rgba.try_into().unwrap();
//!
//! let mut block = [0u8; 8];
//! compress_block(&rgba, &mut block, flags::DXT1);
//!
//! let decoded = decompress_block(&block, flags::DXT1);
//! assert_eq!(&decoded[..4], &[255, 0, 0, 255]);
//! ```
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(missing_docs)]

pub mod c_api;
pub mod flags;

mod alpha;
mod block;
mod cluster_fit;
mod colour_block;
mod colour_fit;
mod colour_set;
mod image;
mod maths;
mod range_fit;
mod single_colour_fit;

pub use block::{compress_block, compress_block_masked, decompress_block};
pub use flags::BlockFormat;
pub use image::{compress_image, decompress_image, storage_requirements};

/// Number of bytes in one uncompressed 4x4 RGBA block.
pub const BLOCK_RGBA_LEN: usize = 64;

/// Mask selecting all 16 pixels of a block.
pub const FULL_MASK: u32 = 0xFFFF;

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
