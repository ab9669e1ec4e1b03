//! Fast colour fit: endpoints are the extremes of the set along its principal axis.

use crate::colour_block::{write_colour_block3, write_colour_block4};
use crate::colour_fit::ColourFit;
use crate::colour_set::ColourSet;
use crate::maths::{principle_component, weighted_covariance, Vec3};

pub(crate) struct RangeFit<'a> {
    set: &'a ColourSet,
    metric: Vec3,
    start: Vec3,
    end: Vec3,
}

impl<'a> RangeFit<'a> {
    pub fn new(set: &'a ColourSet, metric: Vec3) -> Self {
        let points = set.points();
        let covariance = weighted_covariance(points, set.weights());
        let axis = principle_component(&covariance);

        let mut start = Vec3::default();
        let mut end = Vec3::default();
        if let Some(&first) = points.first() {
            start = first;
            end = first;
            let mut min = first.dot(axis);
            let mut max = min;
            for &point in &points[1..] {
                let projection = point.dot(axis);
                if projection < min {
                    start = point;
                    min = projection;
                } else if projection > max {
                    end = point;
                    max = projection;
                }
            }
        }

        Self {
            set,
            metric,
            start: start.quantise_565(),
            end: end.quantise_565(),
        }
    }

    /// Assigns each colour its closest code; returns the weighted error.
    fn fit_indices(&self, codes: &[Vec3], indices: &mut [u8; 16]) -> f32 {
        let mut error = 0.0;
        for (i, (&point, &weight)) in self.set.points().iter().zip(self.set.weights()).enumerate() {
            let mut least = f32::MAX;
            let mut index = 0;
            for (j, &code) in codes.iter().enumerate() {
                let dist = (self.metric * (point - code)).length_squared();
                if dist < least {
                    least = dist;
                    index = j as u8;
                }
            }

            indices[i] = index;
            error += weight * least;
        }
        error
    }
}

impl ColourFit for RangeFit<'_> {
    fn compress3(&mut self, best_error: f32, block: &mut [u8]) -> f32 {
        let codes = [
            self.start,
            self.end,
            self.start * 0.5 + self.end * 0.5,
        ];

        let mut closest = [0u8; 16];
        let error = self.fit_indices(&codes, &mut closest);
        if error < best_error {
            let indices = self.set.remap_indices(&closest);
            write_colour_block3(self.start, self.end, &indices, block);
            error
        } else {
            best_error
        }
    }

    fn compress4(&mut self, best_error: f32, block: &mut [u8]) -> f32 {
        let codes = [
            self.start,
            self.end,
            self.start * (2.0 / 3.0) + self.end * (1.0 / 3.0),
            self.start * (1.0 / 3.0) + self.end * (2.0 / 3.0),
        ];

        let mut closest = [0u8; 16];
        let error = self.fit_indices(&codes, &mut closest);
        if error < best_error {
            let indices = self.set.remap_indices(&closest);
            write_colour_block4(self.start, self.end, &indices, block);
            error
        } else {
            best_error
        }
    }
}
