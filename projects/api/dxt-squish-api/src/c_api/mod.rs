//! # C API (FFI) Documentation
//!
//! *Note: The C API is only available when the `c-exports` feature is enabled.*
//!
//! These functions expose the safe facade to C. Unlike the raw `squish_*`
//! codec entry points, every buffer is passed as a pointer and a length, and
//! every length is validated before the codec runs. All functions use the
//! process-wide codec.
//!
//! ## Example Usage
//!
//! ```c
//! uint8_t rgba[8 * 8 * 4] = { /* ... */ };
//! size_t size = 0;
//! DltSquishResult result = dltsquish_storage_requirements(8, 8, SQUISH_DXT5, &size);
//! if (result.error_code != DLTSQUISH_SUCCESS) {
//!     printf("%s\n", dltsquish_error_message(result.error_code));
//!     return;
//! }
//!
//! uint8_t* blocks = malloc(size);
//! result = dltsquish_compress_image(rgba, sizeof(rgba), 8, 8, blocks, size, SQUISH_DXT5);
//! ```
//!
//! ## Error Handling
//!
//! All functions return a [`DltSquishResult`] whose `error_code` is `0` on
//! success. Use [`dltsquish_error_message`] for a description.

pub mod error;

pub use error::{dltsquish_error_message, DltSquishErrorCode, DltSquishResult};

use crate::flags::SquishFlags;
use crate::squish;
use core::slice;

/// Validates a pointer pair and builds the slices for one call.
///
/// # Safety
///
/// Non-null pointers must be valid for their lengths.
unsafe fn buffers<'a>(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
) -> Result<(&'a [u8], &'a mut [u8]), DltSquishResult> {
    if input.is_null() {
        return Err(DltSquishResult::from_error_code(DltSquishErrorCode::NullInputPointer));
    }
    if output.is_null() {
        return Err(DltSquishResult::from_error_code(
            DltSquishErrorCode::NullOutputBufferPointer,
        ));
    }

    let input = unsafe { slice::from_raw_parts(input, input_len) };
    let output = unsafe { slice::from_raw_parts_mut(output, output_len) };
    Ok((input, output))
}

/// Number of bytes needed to compress a `width` x `height` image.
///
/// # Parameters
/// - `width`, `height`: image size in pixels
/// - `flags`: compression flags
/// - `out_size`: receives the size in bytes on success
///
/// # Safety
/// - `out_size` must be valid for writes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dltsquish_storage_requirements(
    width: usize,
    height: usize,
    flags: i32,
    out_size: *mut usize,
) -> DltSquishResult {
    if out_size.is_null() {
        return DltSquishResult::from_error_code(DltSquishErrorCode::NullOutputBufferPointer);
    }

    match squish::storage_requirements(width, height, SquishFlags::from_bits_retain(flags)) {
        Ok(size) => {
            unsafe { *out_size = size };
            DltSquishResult::success()
        }
        Err(e) => e.into(),
    }
}

/// Compress one 4x4 block of RGBA pixels.
///
/// # Parameters
/// - `input`: 64 bytes of RGBA pixels
/// - `input_len`: must be 64
/// - `output`: receives one compressed block
/// - `output_len`: at least 8 bytes for DXT1, 16 bytes otherwise
/// - `flags`: compression flags
///
/// # Safety
/// - `input` must be valid for reads of `input_len` bytes
/// - `output` must be valid for writes of `output_len` bytes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dltsquish_compress(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
    flags: i32,
) -> DltSquishResult {
    let (input, output) = match unsafe { buffers(input, input_len, output, output_len) } {
        Ok(buffers) => buffers,
        Err(result) => return result,
    };
    squish::compress_into(input, output, SquishFlags::from_bits_retain(flags)).into()
}

/// Compress one 4x4 block, considering only the pixels whose bit is set in `mask`.
///
/// # Safety
/// Same as [`dltsquish_compress`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dltsquish_compress_masked(
    input: *const u8,
    input_len: usize,
    mask: u16,
    output: *mut u8,
    output_len: usize,
    flags: i32,
) -> DltSquishResult {
    let (input, output) = match unsafe { buffers(input, input_len, output, output_len) } {
        Ok(buffers) => buffers,
        Err(result) => return result,
    };
    squish::compress_masked_into(input, mask, output, SquishFlags::from_bits_retain(flags)).into()
}

/// Decompress one block into 64 bytes of RGBA.
///
/// # Parameters
/// - `input`: one compressed block
/// - `input_len`: 8 for DXT1, 16 otherwise
/// - `output`: receives 16 RGBA pixels
/// - `output_len`: at least 64
/// - `flags`: compression flags
///
/// # Safety
/// - `input` must be valid for reads of `input_len` bytes
/// - `output` must be valid for writes of `output_len` bytes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dltsquish_decompress(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
    flags: i32,
) -> DltSquishResult {
    let (input, output) = match unsafe { buffers(input, input_len, output, output_len) } {
        Ok(buffers) => buffers,
        Err(result) => return result,
    };
    squish::decompress_into(input, output, SquishFlags::from_bits_retain(flags)).into()
}

/// Compress a `width` x `height` RGBA image.
///
/// # Parameters
/// - `input`: `width * height * 4` bytes of RGBA pixels
/// - `output`: at least [`dltsquish_storage_requirements`] bytes
///
/// # Safety
/// - `input` must be valid for reads of `input_len` bytes
/// - `output` must be valid for writes of `output_len` bytes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dltsquish_compress_image(
    input: *const u8,
    input_len: usize,
    width: usize,
    height: usize,
    output: *mut u8,
    output_len: usize,
    flags: i32,
) -> DltSquishResult {
    let (input, output) = match unsafe { buffers(input, input_len, output, output_len) } {
        Ok(buffers) => buffers,
        Err(result) => return result,
    };
    squish::compress_image_into(input, width, height, output, SquishFlags::from_bits_retain(flags))
        .into()
}

/// Decompress blocks into a `width` x `height` RGBA image.
///
/// # Parameters
/// - `input`: exactly [`dltsquish_storage_requirements`] bytes of blocks
/// - `output`: at least `width * height * 4` bytes
///
/// # Safety
/// - `input` must be valid for reads of `input_len` bytes
/// - `output` must be valid for writes of `output_len` bytes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dltsquish_decompress_image(
    input: *const u8,
    input_len: usize,
    width: usize,
    height: usize,
    output: *mut u8,
    output_len: usize,
    flags: i32,
) -> DltSquishResult {
    let (input, output) = match unsafe { buffers(input, input_len, output, output_len) } {
        Ok(buffers) => buffers,
        Err(result) => return result,
    };
    squish::decompress_image_into(input, width, height, output, SquishFlags::from_bits_retain(flags))
        .into()
}
