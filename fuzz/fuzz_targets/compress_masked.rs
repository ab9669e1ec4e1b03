#![no_main]

// Compresses arbitrary pixels with arbitrary masks and flags. A full mask must
// produce the unmasked block, and every block must decode without panicking.

use dxt_squish_codec::{compress_block, compress_block_masked, decompress_block, FULL_MASK};
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct MaskedInput {
    pub rgba: [[u8; 32]; 2],
    pub mask: u16,
    pub flags: u16,
}

fuzz_target!(|input: MaskedInput| {
    let mut rgba = [0u8; 64];
    rgba[..32].copy_from_slice(&input.rgba[0]);
    rgba[32..].copy_from_slice(&input.rgba[1]);

    // Any bit pattern is accepted by the codec; unknown bits are ignored.
    let flags = i32::from(input.flags);

    let mut masked = [0u8; 16];
    let mut unmasked = [0u8; 16];
    compress_block_masked(&rgba, FULL_MASK, &mut masked, flags);
    compress_block(&rgba, &mut unmasked, flags);
    assert_eq!(masked, unmasked, "Full mask differs from unmasked compression");

    let mut partial = [0u8; 16];
    compress_block_masked(&rgba, u32::from(input.mask), &mut partial, flags);
    let decoded = decompress_block(&partial, flags);
    assert_eq!(decoded.len(), 64);
});
