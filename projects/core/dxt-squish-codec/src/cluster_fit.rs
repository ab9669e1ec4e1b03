//! High quality colour fit.
//!
//! Colours are ordered along an axis and every split of that ordering into
//! contiguous clusters is tried. For each split, the endpoints are solved by
//! weighted least squares and scored after quantisation to RGB565. The
//! iterative variant re-derives the axis from the best endpoints and repeats
//! until the ordering stops changing.

use crate::colour_block::{write_colour_block3, write_colour_block4};
use crate::colour_fit::ColourFit;
use crate::colour_set::ColourSet;
use crate::maths::{principle_component, weighted_covariance, Vec3};

/// Determinants below this are treated as singular.
const SINGULAR_EPSILON: f32 = 1.0e-8;

/// Interpolation weight of the start endpoint per cluster, and the block index
/// each cluster maps to.
const THREE_COLOUR_CLUSTERS: [(f32, u8); 3] = [(1.0, 0), (0.5, 2), (0.0, 1)];
const FOUR_COLOUR_CLUSTERS: [(f32, u8); 4] =
    [(1.0, 0), (2.0 / 3.0, 2), (1.0 / 3.0, 3), (0.0, 1)];

/// Best endpoints found for one ordering.
struct Solution {
    start: Vec3,
    end: Vec3,
    /// Cluster boundaries within the ordering; cluster `c` spans `bounds[c]..bounds[c + 1]`.
    bounds: [usize; 5],
    error: f32,
}

pub(crate) struct ClusterFit<'a> {
    set: &'a ColourSet,
    /// `metric * metric`, applied to squared per-channel errors.
    metric_sq: Vec3,
    iterations: usize,
    axis: Vec3,
}

impl<'a> ClusterFit<'a> {
    pub fn new(set: &'a ColourSet, metric: Vec3, iterations: usize) -> Self {
        let covariance = weighted_covariance(set.points(), set.weights());
        Self {
            set,
            metric_sq: metric * metric,
            iterations: iterations.max(1),
            axis: principle_component(&covariance),
        }
    }

    /// Sorts the colours by their projection onto `axis`.
    fn order(&self, axis: Vec3) -> ([u8; 16], usize) {
        let count = self.set.count();
        let mut order = [0u8; 16];
        for (i, slot) in order.iter_mut().enumerate().take(count) {
            *slot = i as u8;
        }

        let points = self.set.points();
        // Ties keep index order.
        order[..count].sort_unstable_by(|&a, &b| {
            let pa = points[a as usize].dot(axis);
            let pb = points[b as usize].dot(axis);
            pa.total_cmp(&pb).then(a.cmp(&b))
        });
        (order, count)
    }

    /// Tries every contiguous split of `order` into `clusters.len()` groups.
    fn solve(&self, order: &[u8], clusters: &[(f32, u8)]) -> Option<Solution> {
        let points = self.set.points();
        let weights = self.set.weights();
        let count = order.len();

        // Prefix sums of w and w*x over the ordering.
        let mut prefix_weight = [0.0f32; 17];
        let mut prefix_point = [Vec3::default(); 17];
        for (i, &index) in order.iter().enumerate() {
            let weight = weights[index as usize];
            prefix_weight[i + 1] = prefix_weight[i] + weight;
            prefix_point[i + 1] = prefix_point[i] + points[index as usize] * weight;
        }

        let mut best: Option<Solution> = None;
        let mut bounds = [0usize; 5];
        bounds[clusters.len()] = count;

        // Enumerate the interior boundaries in non-decreasing order.
        loop {
            let mut alpha2_sum = 0.0;
            let mut beta2_sum = 0.0;
            let mut alphabeta_sum = 0.0;
            let mut alphax_sum = Vec3::default();
            let mut betax_sum = Vec3::default();

            for (c, &(alpha, _)) in clusters.iter().enumerate() {
                let (lo, hi) = (bounds[c], bounds[c + 1]);
                let weight = prefix_weight[hi] - prefix_weight[lo];
                let point = prefix_point[hi] - prefix_point[lo];
                let beta = 1.0 - alpha;

                alpha2_sum += alpha * alpha * weight;
                beta2_sum += beta * beta * weight;
                alphabeta_sum += alpha * beta * weight;
                alphax_sum += point * alpha;
                betax_sum += point * beta;
            }

            let det = alpha2_sum * beta2_sum - alphabeta_sum * alphabeta_sum;
            if det.abs() > SINGULAR_EPSILON {
                let factor = 1.0 / det;
                let a = (alphax_sum * beta2_sum - betax_sum * alphabeta_sum) * factor;
                let b = (betax_sum * alpha2_sum - alphax_sum * alphabeta_sum) * factor;
                let a = a.quantise_565();
                let b = b.quantise_565();

                // Squared error minus the constant sum of w*x*x.
                let e = a * a * alpha2_sum + b * b * beta2_sum + a * b * (2.0 * alphabeta_sum)
                    - a * alphax_sum * 2.0
                    - b * betax_sum * 2.0;
                let error = e.dot(self.metric_sq);

                if best.as_ref().is_none_or(|s| error < s.error) {
                    best = Some(Solution {
                        start: a,
                        end: b,
                        bounds,
                        error,
                    });
                }
            }

            if !next_split(&mut bounds[1..clusters.len()], count) {
                break;
            }
        }

        best
    }

    /// Runs the fit for the given cluster layout and returns the best solution
    /// alongside the ordering it was found on.
    fn fit(&self, clusters: &[(f32, u8)]) -> Option<(Solution, [u8; 16], usize)> {
        let mut axis = self.axis;
        let mut best: Option<(Solution, [u8; 16], usize)> = None;
        let mut seen: [[u8; 16]; 8] = [[0; 16]; 8];
        let mut seen_count = 0;

        for _ in 0..self.iterations {
            let (order, count) = self.order(axis);
            if seen[..seen_count].contains(&order) {
                break;
            }
            if seen_count < seen.len() {
                seen[seen_count] = order;
                seen_count += 1;
            }

            let Some(solution) = self.solve(&order[..count], clusters) else {
                break;
            };

            let improved = best.as_ref().is_none_or(|(s, _, _)| solution.error < s.error);
            if !improved {
                break;
            }

            axis = solution.start - solution.end;
            best = Some((solution, order, count));
        }

        best
    }

    /// Converts a solution into per-colour indices.
    fn indices(solution: &Solution, order: &[u8], clusters: &[(f32, u8)]) -> [u8; 16] {
        let mut closest = [0u8; 16];
        for (c, &(_, index)) in clusters.iter().enumerate() {
            for &colour in &order[solution.bounds[c]..solution.bounds[c + 1]] {
                closest[colour as usize] = index;
            }
        }
        closest
    }

    fn compress(
        &mut self,
        best_error: f32,
        block: &mut [u8],
        clusters: &[(f32, u8)],
        write: fn(Vec3, Vec3, &[u8; 16], &mut [u8]),
    ) -> f32 {
        let Some((solution, order, count)) = self.fit(clusters) else {
            return best_error;
        };

        if solution.error < best_error {
            let closest = Self::indices(&solution, &order[..count], clusters);
            let indices = self.set.remap_indices(&closest);
            write(solution.start, solution.end, &indices, block);
            solution.error
        } else {
            best_error
        }
    }
}

/// Advances a non-decreasing sequence of boundaries, each within `0..=count`.
/// Returns false once every combination has been produced.
fn next_split(bounds: &mut [usize], count: usize) -> bool {
    for i in (0..bounds.len()).rev() {
        if bounds[i] < count {
            bounds[i] += 1;
            for later in i + 1..bounds.len() {
                bounds[later] = bounds[i];
            }
            return true;
        }
    }
    false
}

impl ColourFit for ClusterFit<'_> {
    fn compress3(&mut self, best_error: f32, block: &mut [u8]) -> f32 {
        self.compress(best_error, block, &THREE_COLOUR_CLUSTERS, write_colour_block3)
    }

    fn compress4(&mut self, best_error: f32, block: &mut [u8]) -> f32 {
        self.compress(best_error, block, &FOUR_COLOUR_CLUSTERS, write_colour_block4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::CodecFlags;
    use crate::test_prelude::*;

    #[test]
    fn next_split_enumerates_ordered_boundaries() {
        let mut bounds = [0usize; 2];
        let mut seen = vec![bounds];
        while next_split(&mut bounds, 3) {
            seen.push(bounds);
        }

        // Multisets of size 2 drawn from 0..=3.
        assert_eq!(seen.len(), 10);
        assert!(seen.iter().all(|b| b[0] <= b[1]));
        assert_eq!(seen.last(), Some(&[3, 3]));
    }

    #[test]
    fn order_keeps_ties_in_index_order() {
        let mut rgba = solid_block([40, 0, 0, 255]);
        for (i, pixel) in rgba.chunks_exact_mut(4).enumerate().take(4) {
            pixel[1] = 200 - 50 * i as u8;
        }

        let set = ColourSet::new(&rgba, FULL_MASK, &CodecFlags::from_bits(DXT5));
        let fit = ClusterFit::new(&set, Vec3::splat(1.0), 1);

        // Only green differs, so every colour projects to the same red value.
        let (order, count) = fit.order(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(count, 5);
        assert_eq!(&order[..count], &[0, 1, 2, 3, 4]);

        let (order, _) = fit.order(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(&order[..count], &[4, 3, 2, 1, 0]);
    }

    #[test]
    fn splits_two_colours_exactly() {
        let mut rgba = solid_block([0, 0, 255, 255]);
        for pixel in rgba.chunks_exact_mut(4).step_by(2) {
            pixel.copy_from_slice(&[255, 255, 0, 255]);
        }

        let set = ColourSet::new(&rgba, FULL_MASK, &CodecFlags::from_bits(DXT5));
        let mut fit = ClusterFit::new(&set, Vec3::splat(1.0), 1);

        let mut block = [0u8; 8];
        fit.compress4(f32::MAX, &mut block);

        let mut decoded = [0u8; 64];
        crate::colour_block::decompress_colour(&mut decoded, &block, false);
        assert_eq!(decoded, rgba);
    }

    #[rstest]
    #[case(1)]
    #[case(8)]
    fn iterating_never_increases_error(#[case] iterations: usize) {
        let rgba = gradient_block();
        let set = ColourSet::new(&rgba, FULL_MASK, &CodecFlags::from_bits(DXT1));

        let mut single = ClusterFit::new(&set, Vec3::splat(1.0), 1);
        let mut block = [0u8; 8];
        let single_error = single.compress4(f32::MAX, &mut block);

        let mut fit = ClusterFit::new(&set, Vec3::splat(1.0), iterations);
        let error = fit.compress4(f32::MAX, &mut block);
        assert!(error <= single_error);
    }
}
