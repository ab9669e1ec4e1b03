//! Buffer Marshaling Facade.
//!
//! Safe, slice-based compression and decompression. Every operation:
//!
//! 1. Validates flags, dimensions and buffer lengths
//! 2. Sizes the output from the codec's storage requirement
//! 3. Pins the input and output for the duration of one codec call
//! 4. Releases the pins on every exit path
//!
//! The free functions below use the process-wide codec from
//! [`binding::codec`](crate::binding::codec). The same operations are
//! available as methods on [`Codec`] for callers holding their own.

mod block;
mod image;
mod raw;

use crate::binding::{self, Codec};
use crate::error::SquishError;
use crate::flags::{CompressionOptions, SquishFlags};
use core::ffi::c_int;

/// Number of bytes in one uncompressed 4x4 RGBA block.
pub const BLOCK_RGBA_LEN: usize = 64;

pub(crate) fn validate_flags(flags: SquishFlags) -> Result<CompressionOptions, SquishError> {
    Ok(CompressionOptions::try_from(flags)?)
}

/// Rejects zero dimensions and dimensions the codec's `int` cannot hold.
pub(crate) fn validate_dimensions(width: usize, height: usize) -> Result<(c_int, c_int), SquishError> {
    let invalid = || SquishError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid());
    }

    let c_width = c_int::try_from(width).map_err(|_| invalid())?;
    let c_height = c_int::try_from(height).map_err(|_| invalid())?;
    Ok((c_width, c_height))
}

/// Length of a `width` x `height` RGBA image in bytes.
pub(crate) fn image_len(width: usize, height: usize) -> Result<usize, SquishError> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or(SquishError::InvalidDimensions { width, height })
}

#[inline]
pub(crate) fn check_length(expected: usize, actual: usize) -> Result<(), SquishError> {
    if expected != actual {
        return Err(SquishError::InvalidLength { expected, actual });
    }
    Ok(())
}

#[inline]
pub(crate) fn check_output(needed: usize, actual: usize) -> Result<(), SquishError> {
    if actual < needed {
        return Err(SquishError::OutputBufferTooSmall { needed, actual });
    }
    Ok(())
}

#[inline]
fn global() -> Result<&'static Codec, SquishError> {
    Ok(binding::codec()?)
}

/// Number of bytes needed to compress a `width` x `height` image with `flags`.
///
/// See [`Codec::storage_requirements`].
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use dxt_squish_api::{storage_requirements, SquishFlags};
///
/// assert_eq!(storage_requirements(8, 8, SquishFlags::DXT5)?, 64);
/// assert_eq!(storage_requirements(5, 3, SquishFlags::DXT1)?, 16);
/// # Ok(())
/// # }
/// ```
pub fn storage_requirements(
    width: usize,
    height: usize,
    flags: impl Into<SquishFlags>,
) -> Result<usize, SquishError> {
    global()?.storage_requirements(width, height, flags)
}

/// Compresses one 4x4 block of RGBA pixels. See [`Codec::compress`].
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use dxt_squish_api::{compress, decompress, SquishFlags};
///
/// let rgba = [255u8, 0, 0, 255].repeat(16);
/// let block = compress(&rgba, SquishFlags::DXT1)?;
/// let decoded = decompress(&block, SquishFlags::DXT1)?;
/// assert_eq!(&decoded[..4], &[255, 0, 0, 255]);
/// # Ok(())
/// # }
/// ```
pub fn compress(rgba: &[u8], flags: impl Into<SquishFlags>) -> Result<Vec<u8>, SquishError> {
    global()?.compress(rgba, flags)
}

/// Compresses one 4x4 block into `output`. See [`Codec::compress_into`].
pub fn compress_into(
    rgba: &[u8],
    output: &mut [u8],
    flags: impl Into<SquishFlags>,
) -> Result<usize, SquishError> {
    global()?.compress_into(rgba, output, flags)
}

/// Compresses one 4x4 block using only the pixels selected by `mask`. See [`Codec::compress_masked`].
pub fn compress_masked(
    rgba: &[u8],
    mask: u16,
    flags: impl Into<SquishFlags>,
) -> Result<Vec<u8>, SquishError> {
    global()?.compress_masked(rgba, mask, flags)
}

/// Compresses one masked 4x4 block into `output`. See [`Codec::compress_masked_into`].
pub fn compress_masked_into(
    rgba: &[u8],
    mask: u16,
    output: &mut [u8],
    flags: impl Into<SquishFlags>,
) -> Result<usize, SquishError> {
    global()?.compress_masked_into(rgba, mask, output, flags)
}

/// Decompresses one block into 64 bytes of RGBA. See [`Codec::decompress`].
pub fn decompress(block: &[u8], flags: impl Into<SquishFlags>) -> Result<Vec<u8>, SquishError> {
    global()?.decompress(block, flags)
}

/// Decompresses one block into `output`. See [`Codec::decompress_into`].
pub fn decompress_into(
    block: &[u8],
    output: &mut [u8],
    flags: impl Into<SquishFlags>,
) -> Result<usize, SquishError> {
    global()?.decompress_into(block, output, flags)
}

/// Compresses a `width` x `height` RGBA image. See [`Codec::compress_image`].
pub fn compress_image(
    rgba: &[u8],
    width: usize,
    height: usize,
    flags: impl Into<SquishFlags>,
) -> Result<Vec<u8>, SquishError> {
    global()?.compress_image(rgba, width, height, flags)
}

/// Compresses a `width` x `height` RGBA image into `output`. See [`Codec::compress_image_into`].
pub fn compress_image_into(
    rgba: &[u8],
    width: usize,
    height: usize,
    output: &mut [u8],
    flags: impl Into<SquishFlags>,
) -> Result<usize, SquishError> {
    global()?.compress_image_into(rgba, width, height, output, flags)
}

/// Decompresses blocks into a `width` x `height` RGBA image. See [`Codec::decompress_image`].
pub fn decompress_image(
    blocks: &[u8],
    width: usize,
    height: usize,
    flags: impl Into<SquishFlags>,
) -> Result<Vec<u8>, SquishError> {
    global()?.decompress_image(blocks, width, height, flags)
}

/// Decompresses blocks into `output`. See [`Codec::decompress_image_into`].
pub fn decompress_image_into(
    blocks: &[u8],
    width: usize,
    height: usize,
    output: &mut [u8],
    flags: impl Into<SquishFlags>,
) -> Result<usize, SquishError> {
    global()?.decompress_image_into(blocks, width, height, output, flags)
}
