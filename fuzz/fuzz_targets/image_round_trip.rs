#![no_main]

// Compresses and decompresses small images of arbitrary size through the safe
// facade, checking buffer lengths and that no pin outlives a call.

use dxt_squish_api::{
    active_pins, compress_image, decompress_image, storage_requirements, CompressionOptions,
};
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct ImageInput {
    pub width: u8,
    pub height: u8,
    pub options: u8,
    pub seed: u8,
}

fuzz_target!(|input: ImageInput| {
    let width = usize::from(input.width % 32) + 1;
    let height = usize::from(input.height % 32) + 1;
    let Some(options) = CompressionOptions::all_combinations().nth(usize::from(input.options) % 72) else {
        return;
    };

    let rgba: Vec<u8> = (0..width * height * 4)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(input.seed))
        .collect();

    let blocks = compress_image(&rgba, width, height, options).expect("valid image");
    assert_eq!(Ok(blocks.len()), storage_requirements(width, height, options));

    let decoded = decompress_image(&blocks, width, height, options).expect("valid blocks");
    assert_eq!(decoded.len(), rgba.len());
    assert_eq!(active_pins(), 0);
});
