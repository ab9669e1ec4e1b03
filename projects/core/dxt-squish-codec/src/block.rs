//! Single 4x4 block compression and decompression.

use crate::alpha::{
    compress_alpha_dxt3, compress_alpha_dxt5, decompress_alpha_dxt3, decompress_alpha_dxt5,
};
use crate::colour_block::decompress_colour;
use crate::colour_fit::compress_colour;
use crate::flags::{BlockFormat, CodecFlags};
use crate::{BLOCK_RGBA_LEN, FULL_MASK};

/// Compresses a 4x4 block of RGBA pixels, considering only the pixels in `mask`.
///
/// Bit `i` of `mask` selects pixel `i` (row-major). Pixels outside the mask do
/// not influence the result; in DXT1 they decode as transparent when the block
/// uses 3-colour mode.
///
/// # Parameters
///
/// - `rgba`: 16 pixels, 4 bytes each
/// - `mask`: pixel validity mask, low 16 bits used
/// - `block`: output, at least [`BlockFormat::bytes_per_block`] bytes for the format in `flags`
/// - `flags`: raw flag bits (see [`crate::flags`])
///
/// # Panics
///
/// If `block` is shorter than one compressed block.
pub fn compress_block_masked(rgba: &[u8; BLOCK_RGBA_LEN], mask: u32, block: &mut [u8], flags: i32) {
    let flags = CodecFlags::from_bits(flags);
    let block = &mut block[..flags.format.bytes_per_block()];

    match flags.format {
        BlockFormat::Dxt1 => compress_colour(rgba, mask, &flags, block),
        BlockFormat::Dxt3 => {
            let (alpha, colour) = block.split_at_mut(8);
            compress_alpha_dxt3(rgba, mask, alpha);
            compress_colour(rgba, mask, &flags, colour);
        }
        BlockFormat::Dxt5 => {
            let (alpha, colour) = block.split_at_mut(8);
            compress_alpha_dxt5(rgba, mask, alpha);
            compress_colour(rgba, mask, &flags, colour);
        }
    }
}

/// Compresses a 4x4 block of RGBA pixels. Same as [`compress_block_masked`] with all pixels selected.
#[inline]
pub fn compress_block(rgba: &[u8; BLOCK_RGBA_LEN], block: &mut [u8], flags: i32) {
    compress_block_masked(rgba, FULL_MASK, block, flags);
}

/// Decompresses one block into 16 RGBA pixels.
///
/// # Panics
///
/// If `block` is shorter than one compressed block for the format in `flags`.
pub fn decompress_block(block: &[u8], flags: i32) -> [u8; BLOCK_RGBA_LEN] {
    let mut rgba = [0u8; BLOCK_RGBA_LEN];
    decompress_block_into(&mut rgba, block, flags);
    rgba
}

pub(crate) fn decompress_block_into(rgba: &mut [u8; BLOCK_RGBA_LEN], block: &[u8], flags: i32) {
    match BlockFormat::from_flags(flags) {
        BlockFormat::Dxt1 => decompress_colour(rgba, &block[..8], true),
        BlockFormat::Dxt3 => {
            decompress_colour(rgba, &block[8..16], false);
            decompress_alpha_dxt3(rgba, &block[..8]);
        }
        BlockFormat::Dxt5 => {
            decompress_colour(rgba, &block[8..16], false);
            decompress_alpha_dxt5(rgba, &block[..8]);
        }
    }
}
