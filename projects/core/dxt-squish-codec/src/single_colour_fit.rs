//! Colour fit for blocks with a single distinct colour.
//!
//! Each channel is looked up in a table that holds, for every 8-bit target,
//! the endpoint pair whose decoded start (slot 0) or first interpolant
//! (slot 1) lands closest to the target. Both slots are tried and the one with
//! the lower summed squared error wins.

use crate::colour_block::{float_to_int, write_colour_block3, write_colour_block4};
use crate::colour_fit::ColourFit;
use crate::colour_set::ColourSet;
use crate::maths::Vec3;

/// Endpoints (in 5 or 6 bit precision) reproducing a target value, and how far off they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Source {
    start: u8,
    end: u8,
    error: u8,
}

/// Per 8-bit target, the best source for the start code and for the first interpolant.
type Lookup = [[Source; 2]; 256];

const UNSET: Source = Source {
    start: 0,
    end: 0,
    error: u8::MAX,
};

/// Expands a `bits` wide channel to 8 bits, as the decoder does.
const fn expand(value: usize, bits: u32) -> usize {
    (value << (8 - bits)) | (value >> (2 * bits - 8))
}

const fn build_lookup(bits: u32, three_colour: bool) -> Lookup {
    let mut lookup = [[UNSET; 2]; 256];
    let count = 1usize << bits;

    // Every target that some endpoint pair hits exactly.
    let mut first = 0;
    while first < count {
        let mut second = 0;
        while second < count {
            let a = expand(first, bits);
            let b = expand(second, bits);
            let codes = [a, if three_colour { (a + b) / 2 } else { (2 * a + b) / 3 }];

            let mut slot = 0;
            while slot < 2 {
                if lookup[codes[slot]][slot].error != 0 {
                    lookup[codes[slot]][slot] = Source {
                        start: first as u8,
                        end: second as u8,
                        error: 0,
                    };
                }
                slot += 1;
            }
            second += 1;
        }
        first += 1;
    }

    // The rest borrow the nearest exact target. Target 0 is always exact.
    let mut slot = 0;
    while slot < 2 {
        let mut target = 0;
        while target < 256 {
            if lookup[target][slot].error != 0 {
                let mut distance = 1;
                loop {
                    if target >= distance && lookup[target - distance][slot].error == 0 {
                        lookup[target][slot] = Source {
                            error: distance as u8,
                            ..lookup[target - distance][slot]
                        };
                        break;
                    }
                    if target + distance < 256 && lookup[target + distance][slot].error == 0 {
                        lookup[target][slot] = Source {
                            error: distance as u8,
                            ..lookup[target + distance][slot]
                        };
                        break;
                    }
                    distance += 1;
                }
            }
            target += 1;
        }
        slot += 1;
    }

    lookup
}

static LOOKUP_5_3: Lookup = build_lookup(5, true);
static LOOKUP_6_3: Lookup = build_lookup(6, true);
static LOOKUP_5_4: Lookup = build_lookup(5, false);
static LOOKUP_6_4: Lookup = build_lookup(6, false);

/// Winning endpoints for one codebook size.
struct Fit {
    start: Vec3,
    end: Vec3,
    index: u8,
    error: u32,
}

pub(crate) struct SingleColourFit<'a> {
    set: &'a ColourSet,
    colour: [u8; 3],
}

impl<'a> SingleColourFit<'a> {
    /// `set` must hold exactly one colour.
    pub fn new(set: &'a ColourSet) -> Self {
        let point = set.points().first().copied().unwrap_or_default();
        Self {
            set,
            colour: [
                float_to_int(255.0 * point.x, 255) as u8,
                float_to_int(255.0 * point.y, 255) as u8,
                float_to_int(255.0 * point.z, 255) as u8,
            ],
        }
    }

    fn candidate(&self, lookups: [&Lookup; 3], slot: usize) -> Fit {
        let sources: [Source; 3] = core::array::from_fn(|c| lookups[c][self.colour[c] as usize][slot]);
        Fit {
            start: Vec3::new(
                sources[0].start as f32 / 31.0,
                sources[1].start as f32 / 63.0,
                sources[2].start as f32 / 31.0,
            ),
            end: Vec3::new(
                sources[0].end as f32 / 31.0,
                sources[1].end as f32 / 63.0,
                sources[2].end as f32 / 31.0,
            ),
            // Slot 1 is block index 2 in both codebooks.
            index: 2 * slot as u8,
            error: sources.iter().map(|s| u32::from(s.error).pow(2)).sum(),
        }
    }

    fn fit(&self, lookups: [&Lookup; 3]) -> Fit {
        let start = self.candidate(lookups, 0);
        let interpolant = self.candidate(lookups, 1);
        if interpolant.error < start.error {
            interpolant
        } else {
            start
        }
    }

    fn compress(
        &self,
        best_error: f32,
        block: &mut [u8],
        lookups: [&Lookup; 3],
        write: fn(Vec3, Vec3, &[u8; 16], &mut [u8]),
    ) -> f32 {
        let fit = self.fit(lookups);
        let error = fit.error as f32;
        if error < best_error {
            let indices = self.set.remap_indices(&[fit.index; 16]);
            write(fit.start, fit.end, &indices, block);
            error
        } else {
            best_error
        }
    }
}

impl ColourFit for SingleColourFit<'_> {
    fn compress3(&mut self, best_error: f32, block: &mut [u8]) -> f32 {
        self.compress(
            best_error,
            block,
            [&LOOKUP_5_3, &LOOKUP_6_3, &LOOKUP_5_3],
            write_colour_block3,
        )
    }

    fn compress4(&mut self, best_error: f32, block: &mut [u8]) -> f32 {
        self.compress(
            best_error,
            block,
            [&LOOKUP_5_4, &LOOKUP_6_4, &LOOKUP_5_4],
            write_colour_block4,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour_block::decompress_colour;
    use crate::flags::CodecFlags;
    use crate::test_prelude::*;

    fn decode_single(colour: [u8; 3], flags: i32) -> [u8; 64] {
        let rgba = solid_block([colour[0], colour[1], colour[2], 255]);
        let codec_flags = CodecFlags::from_bits(flags);
        let set = ColourSet::new(&rgba, FULL_MASK, &codec_flags);
        let mut fit = SingleColourFit::new(&set);

        let mut block = [0u8; 8];
        let mut error = f32::MAX;
        if codec_flags.is_dxt1() {
            error = fit.compress3(error, &mut block);
        }
        fit.compress4(error, &mut block);

        let mut decoded = [0u8; 64];
        decompress_colour(&mut decoded, &block, codec_flags.is_dxt1());
        decoded
    }

    #[rstest]
    #[case(5, true, 2)]
    #[case(6, true, 1)]
    #[case(5, false, 1)]
    #[case(6, false, 1)]
    fn interpolant_slot_covers_every_target(
        #[case] bits: u32,
        #[case] three_colour: bool,
        #[case] max_error: u8,
    ) {
        let lookup = build_lookup(bits, three_colour);
        for (target, sources) in lookup.iter().enumerate() {
            let source = sources[1];
            assert!(source.error <= max_error, "target {target}: {source:?}");

            let a = expand(source.start as usize, bits);
            let b = expand(source.end as usize, bits);
            let code = if three_colour { (a + b) / 2 } else { (2 * a + b) / 3 };
            assert_eq!(code.abs_diff(target), source.error as usize, "target {target}");
        }
    }

    #[test]
    fn start_slot_is_exact_on_the_grid() {
        let lookup = build_lookup(5, false);
        for value in 0..32 {
            let target = expand(value, 5);
            assert_eq!(lookup[target][0].error, 0);
            assert_eq!(lookup[target][0].start as usize, value);
        }
    }

    #[rstest]
    #[case(DXT1)]
    #[case(DXT5)]
    fn off_grid_colours_decode_within_one(#[case] flags: i32) {
        for r in (0..=255u8).step_by(3) {
            let colour = [r, 255 - r, r.wrapping_mul(7)];
            let decoded = decode_single(colour, flags);
            for pixel in decoded.chunks_exact(4) {
                for c in 0..3 {
                    assert!(
                        pixel[c].abs_diff(colour[c]) <= 1,
                        "colour {colour:?} decoded as {pixel:?} for flags {flags:#x}"
                    );
                }
                assert_eq!(pixel[3], 255);
            }
        }
    }
}
