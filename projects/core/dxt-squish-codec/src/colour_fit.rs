//! Chooses a colour fitter for a block and drives it.

use crate::cluster_fit::ClusterFit;
use crate::colour_set::ColourSet;
use crate::flags::{CodecFlags, FitMethod};
use crate::maths::Vec3;
use crate::range_fit::RangeFit;
use crate::single_colour_fit::SingleColourFit;

/// Maximum number of refinement passes for the iterative cluster fit.
const MAX_CLUSTER_ITERATIONS: usize = 8;

/// Per-channel error weights for the uniform metric.
const UNIFORM_METRIC: Vec3 = Vec3::splat(1.0);

/// Per-channel error weights for the perceptual metric (Rec. 709 luma).
const PERCEPTUAL_METRIC: Vec3 = Vec3::new(0.2126, 0.7152, 0.0722);

/// A strategy that picks two endpoints and the per-pixel indices for a colour block.
///
/// Each method writes into `block` only when it improves on `best_error`,
/// and returns the error of whatever `block` now holds.
pub(crate) trait ColourFit {
    /// Tries a 3-colour block (start, end, midpoint).
    fn compress3(&mut self, best_error: f32, block: &mut [u8]) -> f32;

    /// Tries a 4-colour block (start, end and two interpolants).
    fn compress4(&mut self, best_error: f32, block: &mut [u8]) -> f32;
}

/// Runs `fit`, trying the 3-colour block first for DXT1.
fn compress(fit: &mut impl ColourFit, set: &ColourSet, is_dxt1: bool, block: &mut [u8]) {
    let mut best_error = f32::MAX;
    if is_dxt1 {
        best_error = fit.compress3(best_error, block);
        if !set.is_transparent() {
            fit.compress4(best_error, block);
        }
    } else {
        fit.compress4(best_error, block);
    }
}

/// Compresses the colour part of `rgba` into the first 8 bytes of `block`.
pub(crate) fn compress_colour(rgba: &[u8; 64], mask: u32, flags: &CodecFlags, block: &mut [u8]) {
    let set = ColourSet::new(rgba, mask, flags);
    let metric = if flags.perceptual {
        PERCEPTUAL_METRIC
    } else {
        UNIFORM_METRIC
    };

    let is_dxt1 = flags.is_dxt1();
    if set.count() == 1 {
        let mut fit = SingleColourFit::new(&set);
        compress(&mut fit, &set, is_dxt1, block);
    } else if set.count() == 0 || flags.fit == FitMethod::Range {
        let mut fit = RangeFit::new(&set, metric);
        compress(&mut fit, &set, is_dxt1, block);
    } else {
        let iterations = match flags.fit {
            FitMethod::IterativeCluster => MAX_CLUSTER_ITERATIONS,
            _ => 1,
        };
        let mut fit = ClusterFit::new(&set, metric, iterations);
        compress(&mut fit, &set, is_dxt1, block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour_block::decompress_colour;
    use crate::test_prelude::*;

    fn round_trip(rgba: &[u8; 64], flags: i32) -> [u8; 64] {
        let codec_flags = CodecFlags::from_bits(flags);
        let mut block = [0u8; 8];
        compress_colour(rgba, FULL_MASK, &codec_flags, &mut block);

        let mut decoded = [0u8; 64];
        decompress_colour(&mut decoded, &block, codec_flags.is_dxt1());
        decoded
    }

    /// Sum over pixels of the squared channel differences, scaled by the perceptual metric.
    fn perceptual_error(expected: &[u8; 64], actual: &[u8; 64]) -> f32 {
        let weights = [PERCEPTUAL_METRIC.x, PERCEPTUAL_METRIC.y, PERCEPTUAL_METRIC.z];
        expected
            .chunks_exact(4)
            .zip(actual.chunks_exact(4))
            .map(|(e, a)| {
                (0..3)
                    .map(|c| (weights[c] * (e[c] as f32 - a[c] as f32)).powi(2))
                    .sum::<f32>()
            })
            .sum()
    }

    #[rstest]
    #[case(DXT1 | COLOUR_RANGE_FIT, 33.0)]
    #[case(DXT5 | COLOUR_RANGE_FIT, 33.0)]
    #[case(DXT1 | COLOUR_CLUSTER_FIT, 31.0)]
    #[case(DXT1 | COLOUR_ITERATIVE_CLUSTER_FIT, 31.0)]
    #[case(DXT3 | COLOUR_ITERATIVE_CLUSTER_FIT | WEIGHT_COLOUR_BY_ALPHA, 31.0)]
    fn gradient_error_is_bounded(#[case] flags: i32, #[case] bound: f32) {
        let rgba = gradient_block();
        let decoded = round_trip(&rgba, flags);
        let error = mean_colour_error(&rgba, &decoded, FULL_MASK);
        assert!(error < bound, "mean error {error} for flags {flags:#x}");
    }

    #[rstest]
    #[case(COLOUR_RANGE_FIT, 12_000.0)]
    #[case(COLOUR_CLUSTER_FIT, 33_000.0)]
    #[case(COLOUR_ITERATIVE_CLUSTER_FIT, 24_000.0)]
    fn perceptual_metric_lowers_perceptual_error(#[case] fit: i32, #[case] bound: f32) {
        let rgba = gradient_block();
        let perceptual = perceptual_error(&rgba, &round_trip(&rgba, DXT5 | fit | COLOUR_METRIC_PERCEPTUAL));
        let uniform = perceptual_error(&rgba, &round_trip(&rgba, DXT5 | fit));

        assert!(perceptual < bound, "perceptual error {perceptual} for fit {fit:#x}");
        assert!(
            perceptual < uniform,
            "perceptual fit {perceptual} vs uniform fit {uniform} for fit {fit:#x}"
        );
    }

    #[test]
    fn cluster_fit_is_no_worse_than_range_fit_on_two_colours() {
        let mut rgba = solid_block([0, 0, 0, 255]);
        for pixel in rgba.chunks_exact_mut(4).skip(8) {
            pixel.copy_from_slice(&[255, 255, 255, 255]);
        }

        let range = round_trip(&rgba, DXT1 | COLOUR_RANGE_FIT);
        let cluster = round_trip(&rgba, DXT1 | COLOUR_CLUSTER_FIT);
        assert_eq!(mean_colour_error(&rgba, &range, FULL_MASK), 0.0);
        assert_eq!(mean_colour_error(&rgba, &cluster, FULL_MASK), 0.0);
    }

    #[rstest]
    #[case(DXT1 | COLOUR_RANGE_FIT)]
    #[case(DXT5 | COLOUR_CLUSTER_FIT)]
    fn off_grid_single_colour_is_within_one(#[case] flags: i32) {
        // Each channel sits between two RGB565 grid points.
        let rgba = solid_block([4, 2, 12, 255]);
        let decoded = round_trip(&rgba, flags);
        for (expected, actual) in rgba.iter().zip(&decoded) {
            assert!(expected.abs_diff(*actual) <= 1, "{decoded:?}");
        }
    }

    #[test]
    fn fully_transparent_dxt1_block_decodes_transparent() {
        let rgba = solid_block([200, 100, 50, 0]);
        let decoded = round_trip(&rgba, DXT1);
        assert_eq!(decoded, [0u8; 64]);
    }
}
