//! Small vector helpers used by the colour fitters.

use core::ops::{Add, AddAssign, Mul, Sub};

/// Number of power iterations used to find the principal axis.
const POWER_ITERATIONS: usize = 8;

/// Grid of the RGB565 endpoint space.
const GRID: Vec3 = Vec3::new(31.0, 63.0, 31.0);
const GRID_RCP: Vec3 = Vec3::new(1.0 / 31.0, 1.0 / 63.0, 1.0 / 31.0);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Builds a unit-range colour from 8-bit RGB.
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32, g as f32, b as f32) * (1.0 / 255.0)
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn clamp_unit(self) -> Self {
        Self::new(
            self.x.clamp(0.0, 1.0),
            self.y.clamp(0.0, 1.0),
            self.z.clamp(0.0, 1.0),
        )
    }

    /// Rounds each component towards zero. Components must fit in an `i32`.
    #[inline]
    pub fn truncate(self) -> Self {
        Self::new(
            self.x as i32 as f32,
            self.y as i32 as f32,
            self.z as i32 as f32,
        )
    }

    /// Snaps a colour onto the nearest representable RGB565 value.
    #[inline]
    pub fn quantise_565(self) -> Self {
        (GRID * self.clamp_unit() + Vec3::splat(0.5)).truncate() * GRID_RCP
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Upper triangle of a symmetric 3x3 matrix: xx, xy, xz, yy, yz, zz.
pub(crate) type Sym3x3 = [f32; 6];

pub(crate) fn weighted_covariance(points: &[Vec3], weights: &[f32]) -> Sym3x3 {
    let total: f32 = weights.iter().sum();

    let mut centroid = Vec3::default();
    if total > f32::EPSILON {
        for (&point, &weight) in points.iter().zip(weights) {
            centroid += point * weight;
        }
        centroid = centroid * (1.0 / total);
    }

    let mut covariance = [0.0f32; 6];
    for (&point, &weight) in points.iter().zip(weights) {
        let a = point - centroid;
        let b = a * weight;
        covariance[0] += a.x * b.x;
        covariance[1] += a.x * b.y;
        covariance[2] += a.x * b.z;
        covariance[3] += a.y * b.y;
        covariance[4] += a.y * b.z;
        covariance[5] += a.z * b.z;
    }
    covariance
}

/// Approximates the dominant eigenvector of `matrix` by power iteration.
///
/// A degenerate (all zero) matrix yields the diagonal `(1, 1, 1)`.
pub(crate) fn principle_component(matrix: &Sym3x3) -> Vec3 {
    let row0 = Vec3::new(matrix[0], matrix[1], matrix[2]);
    let row1 = Vec3::new(matrix[1], matrix[3], matrix[4]);
    let row2 = Vec3::new(matrix[2], matrix[4], matrix[5]);

    let mut v = Vec3::splat(1.0);
    for _ in 0..POWER_ITERATIONS {
        let w = row0 * v.x + row1 * v.y + row2 * v.z;

        // Normalise by the component with the largest magnitude.
        let mut largest = w.x;
        if w.y.abs() > largest.abs() {
            largest = w.y;
        }
        if w.z.abs() > largest.abs() {
            largest = w.z;
        }
        if largest.abs() <= f32::EPSILON {
            break;
        }
        v = w * (1.0 / largest);
    }
    v
}
