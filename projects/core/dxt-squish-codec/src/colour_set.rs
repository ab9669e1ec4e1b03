//! Unique colours of a block, with the weights the fitters work on.

use crate::flags::CodecFlags;
use crate::maths::Vec3;

/// The distinct colours of a 4x4 block that take part in the fit.
///
/// Pixels outside the mask never enter the set. For DXT1, pixels with alpha
/// below 128 are also left out and mark the block as transparent.
pub(crate) struct ColourSet {
    count: usize,
    points: [Vec3; 16],
    weights: [f32; 16],
    remap: [Option<u8>; 16],
    transparent: bool,
}

impl ColourSet {
    pub fn new(rgba: &[u8; 64], mask: u32, flags: &CodecFlags) -> Self {
        let is_dxt1 = flags.is_dxt1();
        let mut set = Self {
            count: 0,
            points: [Vec3::default(); 16],
            weights: [0.0; 16],
            remap: [None; 16],
            transparent: false,
        };

        for i in 0..16 {
            if mask & (1 << i) == 0 {
                continue;
            }

            let pixel = &rgba[4 * i..4 * i + 4];
            if is_dxt1 && pixel[3] < 128 {
                set.transparent = true;
                continue;
            }

            let weight = if flags.weight_colour_by_alpha {
                (pixel[3] as f32 + 1.0) / 256.0
            } else {
                1.0
            };

            // Merge with an earlier identical pixel if there is one.
            let existing = (0..i).find(|&j| {
                set.remap[j].is_some() && rgba[4 * j..4 * j + 3] == pixel[..3]
            });

            match existing.and_then(|j| set.remap[j]) {
                Some(index) => {
                    set.weights[index as usize] += weight;
                    set.remap[i] = Some(index);
                }
                None => {
                    set.points[set.count] = Vec3::from_rgb(pixel[0], pixel[1], pixel[2]);
                    set.weights[set.count] = weight;
                    set.remap[i] = Some(set.count as u8);
                    set.count += 1;
                }
            }
        }

        set
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points[..self.count]
    }

    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights[..self.count]
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// Expands per-colour indices back to per-pixel indices.
    /// Pixels outside the set get index 3 (transparent in 3-colour blocks).
    pub fn remap_indices(&self, source: &[u8; 16]) -> [u8; 16] {
        let mut target = [3u8; 16];
        for (pixel, slot) in self.remap.iter().enumerate() {
            if let Some(index) = slot {
                target[pixel] = source[*index as usize];
            }
        }
        target
    }
}
