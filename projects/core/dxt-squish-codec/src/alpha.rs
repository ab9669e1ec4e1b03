//! Alpha blocks for DXT3 (explicit 4-bit) and DXT5 (interpolated).

use crate::colour_block::float_to_int;

/// Quantises alpha to 4 bits per pixel. Pixels outside the mask store 0.
pub(crate) fn compress_alpha_dxt3(rgba: &[u8; 64], mask: u32, block: &mut [u8]) {
    for i in 0..8 {
        let quantise = |pixel: usize| {
            if mask & (1 << pixel) == 0 {
                return 0;
            }
            float_to_int(rgba[4 * pixel + 3] as f32 * (15.0 / 255.0), 15) as u8
        };

        block[i] = quantise(2 * i) | (quantise(2 * i + 1) << 4);
    }
}

pub(crate) fn decompress_alpha_dxt3(rgba: &mut [u8; 64], block: &[u8]) {
    for i in 0..8 {
        let quant = block[i];
        let lo = quant & 0x0F;
        let hi = quant & 0xF0;
        rgba[8 * i + 3] = lo | (lo << 4);
        rgba[8 * i + 7] = hi | (hi >> 4);
    }
}

/// Widens `[min, max]` so the codebook spans at least `steps`.
fn fix_range(min: &mut i32, max: &mut i32, steps: i32) {
    if *max - *min < steps {
        *max = (*min + steps).min(255);
    }
    if *max - *min < steps {
        *min = (*max - steps).max(0);
    }
}

fn fit_codes(rgba: &[u8; 64], mask: u32, codes: &[u8; 8], indices: &mut [u8; 16]) -> i32 {
    let mut error = 0;
    for i in 0..16 {
        if mask & (1 << i) == 0 {
            indices[i] = 0;
            continue;
        }

        let value = rgba[4 * i + 3] as i32;
        let mut least = i32::MAX;
        let mut index = 0;
        for (j, &code) in codes.iter().enumerate() {
            let dist = (value - code as i32).pow(2);
            if dist < least {
                least = dist;
                index = j as u8;
            }
        }

        indices[i] = index;
        error += least;
    }
    error
}

fn write_alpha_block(alpha0: u8, alpha1: u8, indices: &[u8; 16], block: &mut [u8]) {
    block[0] = alpha0;
    block[1] = alpha1;

    for (group, chunk) in indices.chunks_exact(8).enumerate() {
        let value = chunk
            .iter()
            .enumerate()
            .fold(0u32, |acc, (j, &index)| acc | ((index as u32) << (3 * j)));
        let dest = &mut block[2 + 3 * group..5 + 3 * group];
        dest.copy_from_slice(&value.to_le_bytes()[..3]);
    }
}

fn write_alpha_block5(alpha0: u8, alpha1: u8, indices: &[u8; 16], block: &mut [u8]) {
    if alpha0 > alpha1 {
        // Swap the endpoints; 5-alpha mode needs alpha0 <= alpha1.
        let mut swapped = [0u8; 16];
        for (dest, &index) in swapped.iter_mut().zip(indices) {
            *dest = match index {
                0 => 1,
                1 => 0,
                2..=5 => 7 - index,
                other => other,
            };
        }
        write_alpha_block(alpha1, alpha0, &swapped, block);
    } else {
        write_alpha_block(alpha0, alpha1, indices, block);
    }
}

fn write_alpha_block7(alpha0: u8, alpha1: u8, indices: &[u8; 16], block: &mut [u8]) {
    if alpha0 < alpha1 {
        // Swap the endpoints; 7-alpha mode needs alpha0 > alpha1.
        let mut swapped = [0u8; 16];
        for (dest, &index) in swapped.iter_mut().zip(indices) {
            *dest = match index {
                0 => 1,
                1 => 0,
                other => 9 - other,
            };
        }
        write_alpha_block(alpha1, alpha0, &swapped, block);
    } else {
        write_alpha_block(alpha0, alpha1, indices, block);
    }
}

/// Fits both the 5-alpha and 7-alpha codebooks and writes whichever is closer.
pub(crate) fn compress_alpha_dxt5(rgba: &[u8; 64], mask: u32, block: &mut [u8]) {
    let (mut min5, mut max5, mut min7, mut max7) = (255i32, 0i32, 255i32, 0i32);
    for i in 0..16 {
        if mask & (1 << i) == 0 {
            continue;
        }

        let value = rgba[4 * i + 3] as i32;
        min7 = min7.min(value);
        max7 = max7.max(value);
        // 0 and 255 are explicit codes in 5-alpha mode.
        if value != 0 {
            min5 = min5.min(value);
        }
        if value != 255 {
            max5 = max5.max(value);
        }
    }

    if min5 > max5 {
        min5 = max5;
    }
    if min7 > max7 {
        min7 = max7;
    }

    fix_range(&mut min5, &mut max5, 5);
    fix_range(&mut min7, &mut max7, 7);

    let mut codes5 = [0u8; 8];
    codes5[0] = min5 as u8;
    codes5[1] = max5 as u8;
    for i in 1..5 {
        codes5[1 + i] = (((5 - i) as i32 * min5 + i as i32 * max5) / 5) as u8;
    }
    codes5[6] = 0;
    codes5[7] = 255;

    let mut codes7 = [0u8; 8];
    codes7[0] = min7 as u8;
    codes7[1] = max7 as u8;
    for i in 1..7 {
        codes7[1 + i] = (((7 - i) as i32 * min7 + i as i32 * max7) / 7) as u8;
    }

    let mut indices5 = [0u8; 16];
    let mut indices7 = [0u8; 16];
    let error5 = fit_codes(rgba, mask, &codes5, &mut indices5);
    let error7 = fit_codes(rgba, mask, &codes7, &mut indices7);

    if error5 <= error7 {
        write_alpha_block5(min5 as u8, max5 as u8, &indices5, block);
    } else {
        write_alpha_block7(min7 as u8, max7 as u8, &indices7, block);
    }
}

pub(crate) fn decompress_alpha_dxt5(rgba: &mut [u8; 64], block: &[u8]) {
    let alpha0 = block[0] as u32;
    let alpha1 = block[1] as u32;

    let mut codes = [0u8; 8];
    codes[0] = alpha0 as u8;
    codes[1] = alpha1 as u8;
    if alpha0 <= alpha1 {
        for i in 1..5u32 {
            codes[1 + i as usize] = (((5 - i) * alpha0 + i * alpha1) / 5) as u8;
        }
        codes[6] = 0;
        codes[7] = 255;
    } else {
        for i in 1..7u32 {
            codes[1 + i as usize] = (((7 - i) * alpha0 + i * alpha1) / 7) as u8;
        }
    }

    for group in 0..2 {
        let src = &block[2 + 3 * group..5 + 3 * group];
        let value = u32::from_le_bytes([src[0], src[1], src[2], 0]);
        for j in 0..8 {
            let index = (value >> (3 * j)) & 0x7;
            rgba[4 * (8 * group + j) + 3] = codes[index as usize];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    fn with_alphas(alphas: [u8; 16]) -> [u8; 64] {
        let mut rgba = [0u8; 64];
        for (i, alpha) in alphas.iter().enumerate() {
            rgba[4 * i + 3] = *alpha;
        }
        rgba
    }

    fn alphas_of(rgba: &[u8; 64]) -> [u8; 16] {
        core::array::from_fn(|i| rgba[4 * i + 3])
    }

    #[test]
    fn dxt3_keeps_4_bit_values_exactly() {
        let alphas: [u8; 16] = core::array::from_fn(|i| (i as u8) * 0x11);
        let rgba = with_alphas(alphas);

        let mut block = [0u8; 8];
        compress_alpha_dxt3(&rgba, 0xFFFF, &mut block);
        let mut decoded = [0u8; 64];
        decompress_alpha_dxt3(&mut decoded, &block);

        assert_eq!(alphas_of(&decoded), alphas);
    }

    #[test]
    fn dxt3_zeroes_masked_pixels() {
        let rgba = with_alphas([0xFF; 16]);
        let mut block = [0u8; 8];
        compress_alpha_dxt3(&rgba, 0xFFFE, &mut block);
        assert_eq!(block[0], 0xF0);
        assert_eq!(&block[1..], &[0xFF; 7]);
    }

    #[test]
    fn dxt5_solid_alpha_is_exact() {
        for alpha in [0u8, 1, 77, 128, 254, 255] {
            let rgba = with_alphas([alpha; 16]);
            let mut block = [0u8; 8];
            compress_alpha_dxt5(&rgba, 0xFFFF, &mut block);

            let mut decoded = [0u8; 64];
            decompress_alpha_dxt5(&mut decoded, &block);
            assert_eq!(alphas_of(&decoded), [alpha; 16], "alpha {alpha}");
        }
    }

    #[test]
    fn dxt5_gradient_is_within_tolerance() {
        let alphas: [u8; 16] = core::array::from_fn(|i| (i as u8) * 17);
        let rgba = with_alphas(alphas);

        let mut block = [0u8; 8];
        compress_alpha_dxt5(&rgba, 0xFFFF, &mut block);
        let mut decoded = [0u8; 64];
        decompress_alpha_dxt5(&mut decoded, &block);

        for (expected, actual) in alphas.iter().zip(alphas_of(&decoded)) {
            assert!(expected.abs_diff(actual) <= 20, "{expected} vs {actual}");
        }
    }

    #[test]
    fn dxt5_index_packing_round_trips() {
        let indices: [u8; 16] = core::array::from_fn(|i| (i % 8) as u8);
        let mut block = [0u8; 8];
        write_alpha_block(10, 200, &indices, &mut block);

        // alpha0 <= alpha1 selects 5-alpha mode, where codes 6 and 7 are 0 and 255.
        let mut decoded = solid_block([0, 0, 0, 0]);
        decompress_alpha_dxt5(&mut decoded, &block);
        assert_eq!(decoded[3], 10);
        assert_eq!(decoded[4 + 3], 200);
        assert_eq!(decoded[4 * 6 + 3], 0);
        assert_eq!(decoded[4 * 7 + 3], 255);
    }
}
