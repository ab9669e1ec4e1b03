//! Whole-image compression over row-major 4x4 blocks.
//!
//! Images need not be a multiple of 4 in either dimension. Edge blocks are
//! padded by masking out the pixels that fall outside the image, and those
//! pixels are never written back on decompression.

use crate::block::{compress_block_masked, decompress_block_into};
use crate::flags::BlockFormat;
use crate::BLOCK_RGBA_LEN;

/// Number of bytes needed to store an image of the given size in `format`.
///
/// Returns `None` on overflow.
#[inline]
pub fn storage_requirements(width: usize, height: usize, format: BlockFormat) -> Option<usize> {
    let blocks_wide = width.div_ceil(4);
    let blocks_high = height.div_ceil(4);
    blocks_wide
        .checked_mul(blocks_high)?
        .checked_mul(format.bytes_per_block())
}

/// Calls `f` for every block position along with the mask of in-range pixels.
fn for_each_block(width: usize, height: usize, mut f: impl FnMut(usize, usize, u32)) {
    for y in (0..height).step_by(4) {
        for x in (0..width).step_by(4) {
            let mut mask = 0u32;
            for py in 0..4 {
                for px in 0..4 {
                    if x + px < width && y + py < height {
                        mask |= 1 << (4 * py + px);
                    }
                }
            }
            f(x, y, mask);
        }
    }
}

/// Compresses a `width` x `height` RGBA image into consecutive blocks.
///
/// # Parameters
///
/// - `rgba`: `width * height * 4` bytes, row-major
/// - `blocks`: output, at least [`storage_requirements`] bytes
/// - `flags`: raw flag bits (see [`crate::flags`])
///
/// # Panics
///
/// If either buffer is shorter than described above.
pub fn compress_image(rgba: &[u8], width: usize, height: usize, blocks: &mut [u8], flags: i32) {
    let bytes_per_block = BlockFormat::from_flags(flags).bytes_per_block();
    let mut offset = 0;

    for_each_block(width, height, |x, y, mask| {
        let mut source = [0u8; BLOCK_RGBA_LEN];
        for py in 0..4 {
            for px in 0..4 {
                if mask & (1 << (4 * py + px)) == 0 {
                    continue;
                }
                let src = 4 * (width * (y + py) + x + px);
                let dst = 4 * (4 * py + px);
                source[dst..dst + 4].copy_from_slice(&rgba[src..src + 4]);
            }
        }

        compress_block_masked(&source, mask, &mut blocks[offset..offset + bytes_per_block], flags);
        offset += bytes_per_block;
    });
}

/// Decompresses consecutive blocks into a `width` x `height` RGBA image.
///
/// # Parameters
///
/// - `rgba`: output, `width * height * 4` bytes, row-major
/// - `blocks`: at least [`storage_requirements`] bytes
/// - `flags`: raw flag bits (see [`crate::flags`])
///
/// # Panics
///
/// If either buffer is shorter than described above.
pub fn decompress_image(rgba: &mut [u8], width: usize, height: usize, blocks: &[u8], flags: i32) {
    let bytes_per_block = BlockFormat::from_flags(flags).bytes_per_block();
    let mut offset = 0;

    for_each_block(width, height, |x, y, mask| {
        let mut target = [0u8; BLOCK_RGBA_LEN];
        decompress_block_into(&mut target, &blocks[offset..offset + bytes_per_block], flags);
        offset += bytes_per_block;

        for py in 0..4 {
            for px in 0..4 {
                if mask & (1 << (4 * py + px)) == 0 {
                    continue;
                }
                let src = 4 * (4 * py + px);
                let dst = 4 * (width * (y + py) + x + px);
                rgba[dst..dst + 4].copy_from_slice(&target[src..src + 4]);
            }
        }
    });
}
