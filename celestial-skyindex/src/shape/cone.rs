use super::SphericalPoint;
use crate::constants::PI;
use crate::errors::{SkyIndexError, SkyIndexResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A spherical cap: every position within `radius` of `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cone {
    center: SphericalPoint,
    radius: f64,
}

impl Cone {
    /// `radius` is in radians and must lie in `[0, π]`.
    pub fn new(center: SphericalPoint, radius: f64) -> SkyIndexResult<Self> {
        if !radius.is_finite() || !(0.0..=PI).contains(&radius) {
            return Err(SkyIndexError::invalid_shape(format!(
                "cone radius {radius} rad outside [0, π]"
            )));
        }
        Ok(Self { center, radius })
    }

    pub fn from_degrees(center: SphericalPoint, radius_deg: f64) -> SkyIndexResult<Self> {
        Self::new(center, radius_deg.to_radians())
    }

    pub fn center(&self) -> &SphericalPoint {
        &self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn contains(&self, point: &SphericalPoint) -> bool {
        self.center.separation(point) <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_bounds() {
        let center = SphericalPoint::equatorial(0.0, 0.0).unwrap();
        assert!(Cone::new(center, 0.0).is_ok());
        assert!(Cone::new(center, PI).is_ok());
        for radius in [-0.1, 3.2, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(Cone::new(center, radius), Err(SkyIndexError::InvalidShape { .. })),
                "radius {radius} should be rejected"
            );
        }
    }

    #[test]
    fn test_contains() {
        let center = SphericalPoint::equatorial(0.0, 0.0).unwrap();
        let cone = Cone::from_degrees(center, 30.0).unwrap();
        assert!(cone.contains(&SphericalPoint::equatorial(20.0, 20.0).unwrap()));
        assert!(!cone.contains(&SphericalPoint::equatorial(0.0, 31.0).unwrap()));
    }
}
