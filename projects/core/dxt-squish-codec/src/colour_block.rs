//! Packing and unpacking of the 8 byte colour block shared by all formats.
//!
//! Layout: `color0: u16 LE`, `color1: u16 LE` (RGB565), then 16 2-bit indices,
//! four per byte, lowest bits first. When `color0 <= color1` a DXT1 block is
//! in 3-colour mode and index 3 is transparent black.

use crate::maths::Vec3;

#[inline]
pub(crate) fn float_to_int(a: f32, limit: i32) -> i32 {
    // Round to nearest, then clamp into range.
    ((a + 0.5) as i32).clamp(0, limit)
}

#[inline]
fn float_to_565(colour: Vec3) -> u16 {
    let r = float_to_int(31.0 * colour.x, 31);
    let g = float_to_int(63.0 * colour.y, 63);
    let b = float_to_int(31.0 * colour.z, 31);
    ((r << 11) | (g << 5) | b) as u16
}

fn write_colour_block(a: u16, b: u16, indices: &[u8; 16], block: &mut [u8]) {
    block[0..2].copy_from_slice(&a.to_le_bytes());
    block[2..4].copy_from_slice(&b.to_le_bytes());
    for (i, chunk) in indices.chunks_exact(4).enumerate() {
        block[4 + i] = chunk[0] | (chunk[1] << 2) | (chunk[2] << 4) | (chunk[3] << 6);
    }
}

/// Writes a 3-colour block; indices use 0 = start, 1 = end, 2 = midpoint, 3 = transparent.
pub(crate) fn write_colour_block3(start: Vec3, end: Vec3, indices: &[u8; 16], block: &mut [u8]) {
    let mut a = float_to_565(start);
    let mut b = float_to_565(end);

    let mut remapped = *indices;
    if a > b {
        core::mem::swap(&mut a, &mut b);
        for index in remapped.iter_mut() {
            *index = match *index {
                0 => 1,
                1 => 0,
                other => other,
            };
        }
    }

    write_colour_block(a, b, &remapped, block);
}

/// Writes a 4-colour block; indices use 0 = start, 1 = end, 2 = 2/3 start, 3 = 1/3 start.
pub(crate) fn write_colour_block4(start: Vec3, end: Vec3, indices: &[u8; 16], block: &mut [u8]) {
    let mut a = float_to_565(start);
    let mut b = float_to_565(end);

    let mut remapped = *indices;
    if a < b {
        core::mem::swap(&mut a, &mut b);
        for index in remapped.iter_mut() {
            *index = (*index ^ 0x1) & 0x3;
        }
    } else if a == b {
        remapped = [0; 16];
    }

    write_colour_block(a, b, &remapped, block);
}

#[inline]
fn unpack_565(value: u16) -> [u8; 4] {
    let r = ((value >> 11) & 0x1F) as u8;
    let g = ((value >> 5) & 0x3F) as u8;
    let b = (value & 0x1F) as u8;
    [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2), 255]
}

/// Decodes the colour block into `rgba`, overwriting all four channels.
pub(crate) fn decompress_colour(rgba: &mut [u8; 64], block: &[u8], is_dxt1: bool) {
    let a = u16::from_le_bytes([block[0], block[1]]);
    let b = u16::from_le_bytes([block[2], block[3]]);

    let mut codes = [[0u8; 4]; 4];
    codes[0] = unpack_565(a);
    codes[1] = unpack_565(b);

    let three_colour = is_dxt1 && a <= b;
    for channel in 0..3 {
        let c = codes[0][channel] as u32;
        let d = codes[1][channel] as u32;
        if three_colour {
            codes[2][channel] = ((c + d) / 2) as u8;
            codes[3][channel] = 0;
        } else {
            codes[2][channel] = ((2 * c + d) / 3) as u8;
            codes[3][channel] = ((c + 2 * d) / 3) as u8;
        }
    }
    codes[2][3] = 255;
    codes[3][3] = if three_colour { 0 } else { 255 };

    for i in 0..16 {
        let index = (block[4 + i / 4] >> (2 * (i % 4))) & 0x3;
        rgba[4 * i..4 * i + 4].copy_from_slice(&codes[index as usize]);
    }
}
