//! The six C-ABI codec entry points.
//!
//! These take raw pointers and plain integers only. They perform no length
//! validation: the caller guarantees every buffer is large enough for the
//! given dimensions and flags. A null pointer makes the call a no-op.
//!
//! With the `c-exports` feature the functions are exported unmangled, so a
//! `cdylib` build can be loaded as `squish_x86` / `squish_x64`.

use crate::block::decompress_block_into;
use crate::flags::BlockFormat;
use crate::{compress_block_masked, compress_image, decompress_image, BLOCK_RGBA_LEN};
use core::ffi::{c_int, c_void};
use core::slice;

/// Converts C dimensions into `usize`, rejecting non-positive values.
#[inline]
fn dimensions(width: c_int, height: c_int) -> Option<(usize, usize)> {
    if width <= 0 || height <= 0 {
        return None;
    }
    Some((width as usize, height as usize))
}

/// Byte lengths of the RGBA pixels and of the blocks for a whole image.
///
/// `None` if either length overflows or is too large to address.
#[inline]
fn image_lengths(width: usize, height: usize, flags: c_int) -> Option<(usize, usize)> {
    let addressable = |len: &usize| *len <= isize::MAX as usize;
    let rgba = width.checked_mul(height)?.checked_mul(4).filter(addressable)?;
    let storage = crate::storage_requirements(width, height, BlockFormat::from_flags(flags))
        .filter(addressable)?;
    Some((rgba, storage))
}

/// Number of bytes needed to compress a `width` x `height` image with `flags`.
///
/// # Returns
/// - The size in bytes
/// - `0` if either dimension is not positive
/// - `-1` if the size does not fit in a `c_int`
#[cfg_attr(feature = "c-exports", unsafe(no_mangle))]
pub extern "C" fn squish_storage_requirements(width: c_int, height: c_int, flags: c_int) -> c_int {
    let Some((width, height)) = dimensions(width, height) else {
        return 0;
    };

    crate::storage_requirements(width, height, BlockFormat::from_flags(flags))
        .and_then(|size| c_int::try_from(size).ok())
        .unwrap_or(-1)
}

/// Compresses one 4x4 block of RGBA pixels.
///
/// # Parameters
/// - `rgba`: 64 bytes of RGBA pixels
/// - `block`: output, 8 bytes for DXT1 or 16 bytes for DXT3/DXT5
/// - `flags`: raw flag bits (see [`crate::flags`])
///
/// # Safety
/// - `rgba` must be valid for reads of 64 bytes
/// - `block` must be valid for writes of one compressed block
#[cfg_attr(feature = "c-exports", unsafe(no_mangle))]
pub unsafe extern "C" fn squish_compress(rgba: *const c_void, block: *mut c_void, flags: c_int) {
    unsafe { squish_compress_masked(rgba, 0xFFFF, block, flags) }
}

/// Compresses one 4x4 block, considering only the pixels whose bit is set in `mask`.
///
/// # Safety
/// Same as [`squish_compress`].
#[cfg_attr(feature = "c-exports", unsafe(no_mangle))]
pub unsafe extern "C" fn squish_compress_masked(
    rgba: *const c_void,
    mask: c_int,
    block: *mut c_void,
    flags: c_int,
) {
    if rgba.is_null() || block.is_null() {
        return;
    }

    let bytes_per_block = BlockFormat::from_flags(flags).bytes_per_block();
    let rgba = unsafe { &*(rgba as *const [u8; BLOCK_RGBA_LEN]) };
    let block = unsafe { slice::from_raw_parts_mut(block as *mut u8, bytes_per_block) };
    compress_block_masked(rgba, mask as u32 & 0xFFFF, block, flags);
}

/// Decompresses one block into 64 bytes of RGBA pixels.
///
/// # Safety
/// - `rgba` must be valid for writes of 64 bytes
/// - `block` must be valid for reads of one compressed block
#[cfg_attr(feature = "c-exports", unsafe(no_mangle))]
pub unsafe extern "C" fn squish_decompress(rgba: *mut c_void, block: *const c_void, flags: c_int) {
    if rgba.is_null() || block.is_null() {
        return;
    }

    let bytes_per_block = BlockFormat::from_flags(flags).bytes_per_block();
    let rgba = unsafe { &mut *(rgba as *mut [u8; BLOCK_RGBA_LEN]) };
    let block = unsafe { slice::from_raw_parts(block as *const u8, bytes_per_block) };
    decompress_block_into(rgba, block, flags);
}

/// Compresses a whole `width` x `height` image.
///
/// Does nothing if the image is too large to address.
///
/// # Safety
/// - `rgba` must be valid for reads of `width * height * 4` bytes
/// - `blocks` must be valid for writes of [`squish_storage_requirements`] bytes
#[cfg_attr(feature = "c-exports", unsafe(no_mangle))]
pub unsafe extern "C" fn squish_compress_image(
    rgba: *const c_void,
    width: c_int,
    height: c_int,
    blocks: *mut c_void,
    flags: c_int,
) {
    let Some((width, height)) = dimensions(width, height) else {
        return;
    };
    if rgba.is_null() || blocks.is_null() {
        return;
    }
    let Some((rgba_len, storage)) = image_lengths(width, height, flags) else {
        return;
    };

    let rgba = unsafe { slice::from_raw_parts(rgba as *const u8, rgba_len) };
    let blocks = unsafe { slice::from_raw_parts_mut(blocks as *mut u8, storage) };
    compress_image(rgba, width, height, blocks, flags);
}

/// Decompresses a whole `width` x `height` image.
///
/// Does nothing if the image is too large to address.
///
/// # Safety
/// - `rgba` must be valid for writes of `width * height * 4` bytes
/// - `blocks` must be valid for reads of [`squish_storage_requirements`] bytes
#[cfg_attr(feature = "c-exports", unsafe(no_mangle))]
pub unsafe extern "C" fn squish_decompress_image(
    rgba: *mut c_void,
    width: c_int,
    height: c_int,
    blocks: *const c_void,
    flags: c_int,
) {
    let Some((width, height)) = dimensions(width, height) else {
        return;
    };
    if rgba.is_null() || blocks.is_null() {
        return;
    }
    let Some((rgba_len, storage)) = image_lengths(width, height, flags) else {
        return;
    };

    let rgba = unsafe { slice::from_raw_parts_mut(rgba as *mut u8, rgba_len) };
    let blocks = unsafe { slice::from_raw_parts(blocks as *const u8, storage) };
    decompress_image(rgba, width, height, blocks, flags);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(4, 4, DXT1, 8)]
    #[case(5, 3, DXT3, 32)]
    #[case(8, 8, DXT5, 64)]
    #[case(0, 4, DXT1, 0)]
    #[case(-4, 4, DXT1, 0)]
    #[case(c_int::MAX, c_int::MAX, DXT5, -1)]
    fn storage_requirements_entry(
        #[case] width: c_int,
        #[case] height: c_int,
        #[case] flags: c_int,
        #[case] expected: c_int,
    ) {
        assert_eq!(squish_storage_requirements(width, height, flags), expected);
    }

    #[test]
    fn block_entry_points_match_safe_functions() {
        let rgba = gradient_block();
        let mut expected = [0u8; 16];
        compress_block_masked(&rgba, 0x0FF0, &mut expected, DXT5);

        let mut block = [0u8; 16];
        unsafe {
            squish_compress_masked(
                rgba.as_ptr().cast(),
                0x0FF0,
                block.as_mut_ptr().cast(),
                DXT5,
            )
        };
        assert_eq!(block, expected);

        let mut decoded = [0u8; 64];
        unsafe { squish_decompress(decoded.as_mut_ptr().cast(), block.as_ptr().cast(), DXT5) };
        assert_eq!(decoded, decompress_block(&expected, DXT5));
    }

    #[test]
    fn image_entry_points_round_trip() {
        let rgba = [200u8, 16, 16, 255].repeat(6 * 5);
        let size = squish_storage_requirements(6, 5, DXT1) as usize;
        let mut blocks = vec![0u8; size];
        let mut decoded = vec![0u8; rgba.len()];

        unsafe {
            squish_compress_image(rgba.as_ptr().cast(), 6, 5, blocks.as_mut_ptr().cast(), DXT1);
            squish_decompress_image(decoded.as_mut_ptr().cast(), 6, 5, blocks.as_ptr().cast(), DXT1);
        }

        for pixel in decoded.chunks_exact(4) {
            assert!(pixel[0].abs_diff(200) <= 8);
            assert_eq!(pixel[3], 255);
        }
    }

    #[test]
    fn image_lengths_are_checked() {
        assert_eq!(image_lengths(6, 5, DXT1), Some((120, 32)));
        assert_eq!(image_lengths(usize::MAX, 2, DXT1), None);
        assert_eq!(image_lengths(c_int::MAX as usize, c_int::MAX as usize, DXT5), None);
    }

    #[test]
    fn oversized_images_are_ignored() {
        let mut rgba = [0x11u8; 64];
        let mut blocks = [0x22u8; 16];

        unsafe {
            squish_compress_image(rgba.as_ptr().cast(), c_int::MAX, c_int::MAX, blocks.as_mut_ptr().cast(), DXT5);
            squish_decompress_image(rgba.as_mut_ptr().cast(), c_int::MAX, c_int::MAX, blocks.as_ptr().cast(), DXT5);
        }
        assert_eq!(blocks, [0x22; 16]);
        assert_eq!(rgba, [0x11; 64]);
    }

    #[test]
    fn null_pointers_are_ignored() {
        let mut block = [0xAAu8; 8];
        unsafe { squish_compress(core::ptr::null(), block.as_mut_ptr().cast(), DXT1) };
        assert_eq!(block, [0xAA; 8]);
    }
}
