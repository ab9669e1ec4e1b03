//! Common test imports and utilities for codec tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;

// Core functionality from this crate
pub use crate::flags::*;
pub use crate::{compress_block, compress_block_masked, decompress_block, FULL_MASK};

/// A 4x4 block where every pixel has the same RGBA value.
pub(crate) fn solid_block(pixel: [u8; 4]) -> [u8; 64] {
    core::array::from_fn(|i| pixel[i % 4])
}

/// A fully opaque block with a smooth gradient along each channel.
///
/// Red increases left to right, green top to bottom and blue diagonally.
pub(crate) fn gradient_block() -> [u8; 64] {
    let mut rgba = [255u8; 64];
    for y in 0..4 {
        for x in 0..4 {
            let pixel = &mut rgba[4 * (4 * y + x)..4 * (4 * y + x) + 4];
            pixel[0] = (x * 80) as u8;
            pixel[1] = (y * 60 + 20) as u8;
            pixel[2] = ((x + y) * 30) as u8;
        }
    }
    rgba
}

/// Mean absolute difference across the RGB channels of the pixels in `mask`.
pub(crate) fn mean_colour_error(expected: &[u8; 64], actual: &[u8; 64], mask: u32) -> f32 {
    let mut total = 0u32;
    let mut samples = 0u32;
    for i in 0..16 {
        if mask & (1 << i) == 0 {
            continue;
        }
        for channel in 0..3 {
            total += expected[4 * i + channel].abs_diff(actual[4 * i + channel]) as u32;
            samples += 1;
        }
    }

    if samples == 0 {
        0.0
    } else {
        total as f32 / samples as f32
    }
}
