//! Cartesian vectors on (and around) the unit sphere.
//!
//! Orientation tests, plane classification and chord lengths are all done on
//! 3-D unit vectors rather than on angles, which keeps the geometry free of
//! longitude wraparound and pole singularities.

use std::ops::{Add, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Unit vector for colatitude `theta` and azimuth `phi`, both in radians.
    #[inline]
    pub fn from_colatitude(theta: f64, phi: f64) -> Self {
        let (sin_theta, cos_theta) = libm::sincos(theta);
        let (sin_phi, cos_phi) = libm::sincos(phi);
        Self::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
    }

    /// Unit vector from the cosine and sine of the colatitude, for callers that
    /// already hold them at full precision near the poles.
    #[inline]
    pub(crate) fn from_z_phi(z: f64, sin_theta: f64, phi: f64) -> Self {
        let (sin_phi, cos_phi) = libm::sincos(phi);
        Self::new(sin_theta * cos_phi, sin_theta * sin_phi, z)
    }

    /// Inverse of [`from_colatitude`](Self::from_colatitude): `(theta, phi)`
    /// with `phi` in `[0, 2π)`.
    pub fn to_colatitude(&self) -> (f64, f64) {
        let rho = libm::sqrt(self.x * self.x + self.y * self.y);
        let theta = libm::atan2(rho, self.z);
        let mut phi = if rho == 0.0 {
            0.0
        } else {
            libm::atan2(self.y, self.x)
        };
        if phi < 0.0 {
            phi += crate::constants::TWOPI;
        }
        (theta, phi)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Scalar triple product `self · (b × c)`.
    #[inline]
    pub fn triple(&self, b: &Self, c: &Self) -> f64 {
        self.dot(&b.cross(c))
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.dot(self))
    }

    /// Unit vector in the same direction; the zero vector is returned as is.
    pub fn normalize(&self) -> Self {
        let m = self.magnitude();
        if m == 0.0 {
            *self
        } else {
            Self::new(self.x / m, self.y / m, self.z / m)
        }
    }

    /// Great-circle angle to `other`, in radians.
    ///
    /// Uses `atan2(|a×b|, a·b)`, which stays accurate for both tiny and nearly
    /// antipodal separations where `acos` loses precision.
    #[inline]
    pub fn angle_to(&self, other: &Self) -> f64 {
        libm::atan2(self.cross(other).magnitude(), self.dot(other))
    }

    /// Straight-line (chord) distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (*self - *other).magnitude()
    }
}

impl Add for Vector3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HALF_PI, PI};

    #[test]
    fn test_cross_follows_right_hand_rule() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(x.triple(&y, &Vector3::new(0.0, 0.0, 1.0)), 1.0);
    }

    #[test]
    fn test_colatitude_round_trip() {
        for &(theta, phi) in &[(0.3, 0.1), (HALF_PI, 3.0), (2.9, 6.0), (1.0, 0.0)] {
            let v = Vector3::from_colatitude(theta, phi);
            assert!((v.magnitude() - 1.0).abs() < 1e-15);
            let (t, p) = v.to_colatitude();
            assert!((t - theta).abs() < 1e-12);
            assert!((p - phi).abs() < 1e-12);
        }
    }

    #[test]
    fn test_pole_has_zero_azimuth() {
        let (theta, phi) = Vector3::new(0.0, 0.0, 1.0).to_colatitude();
        assert_eq!(theta, 0.0);
        assert_eq!(phi, 0.0);
    }

    #[test]
    fn test_angle_to() {
        let a = Vector3::from_colatitude(HALF_PI, 0.0);
        let b = Vector3::from_colatitude(HALF_PI, HALF_PI);
        assert!((a.angle_to(&b) - HALF_PI).abs() < 1e-15);
        assert!((a.angle_to(&-a) - PI).abs() < 1e-15);
        assert_eq!(a.angle_to(&a), 0.0);
    }

    #[test]
    fn test_normalize_zero_vector() {
        let zero = Vector3::new(0.0, 0.0, 0.0);
        assert_eq!(zero.normalize(), zero);
        let v = Vector3::new(3.0, 4.0, 0.0).normalize();
        assert!((v.magnitude() - 1.0).abs() < 1e-15);
    }
}
