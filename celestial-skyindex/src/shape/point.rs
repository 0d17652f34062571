use crate::errors::SkyIndexResult;
use crate::frame::CoordinateFrame;
use crate::vector::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A validated position on the sphere.
///
/// Keeps the native pair it was built from alongside the canonical
/// colatitude/azimuth and the unit vector, so geometry never has to convert
/// back and forth.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphericalPoint {
    frame: CoordinateFrame,
    first: f64,
    second: f64,
    theta: f64,
    phi: f64,
    vector: Vector3,
}

impl SphericalPoint {
    pub fn new(frame: CoordinateFrame, first: f64, second: f64) -> SkyIndexResult<Self> {
        let (theta, phi) = frame.to_canonical(first, second)?;
        Ok(Self {
            frame,
            first,
            second,
            theta,
            phi,
            vector: Vector3::from_colatitude(theta, phi),
        })
    }

    /// Right ascension and declination, in degrees.
    pub fn equatorial(ra_deg: f64, dec_deg: f64) -> SkyIndexResult<Self> {
        Self::new(CoordinateFrame::Equatorial, ra_deg, dec_deg)
    }

    /// Longitude and latitude, in degrees.
    pub fn geocentric(lon_deg: f64, lat_deg: f64) -> SkyIndexResult<Self> {
        Self::new(CoordinateFrame::Geocentric, lon_deg, lat_deg)
    }

    /// Colatitude and azimuth, in radians.
    pub fn spherical(theta: f64, phi: f64) -> SkyIndexResult<Self> {
        Self::new(CoordinateFrame::Spherical, theta, phi)
    }

    /// Builds a point in `frame` from a frame-independent longitude/latitude
    /// in degrees, wrapping the longitude into the frame's range.
    pub fn from_lon_lat(frame: CoordinateFrame, lon_deg: f64, lat_deg: f64) -> SkyIndexResult<Self> {
        let (first, second) = frame.lon_lat_to_native(lon_deg, lat_deg);
        Self::new(frame, first, second)
    }

    pub fn frame(&self) -> CoordinateFrame {
        self.frame
    }

    /// The native coordinate pair, in the frame's units.
    pub fn native(&self) -> (f64, f64) {
        (self.first, self.second)
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn unit_vector(&self) -> Vector3 {
        self.vector
    }

    /// Longitude-like angle in degrees (RA, longitude or azimuth).
    pub fn lon_deg(&self) -> f64 {
        self.frame.native_to_lon_lat(self.first, self.second).0
    }

    /// Latitude-like angle in degrees (Dec, latitude or `90° - θ`).
    pub fn lat_deg(&self) -> f64 {
        self.frame.native_to_lon_lat(self.first, self.second).1
    }

    pub fn is_north_pole(&self) -> bool {
        self.lat_deg() == 90.0
    }

    pub fn is_south_pole(&self) -> bool {
        self.lat_deg() == -90.0
    }

    pub fn is_pole(&self) -> bool {
        self.is_north_pole() || self.is_south_pole()
    }

    /// Great-circle separation from `other`, in radians.
    pub fn separation(&self, other: &Self) -> f64 {
        self.vector.angle_to(&other.vector)
    }

    /// The same position expressed in another frame.
    pub fn to_frame(&self, frame: CoordinateFrame) -> SkyIndexResult<Self> {
        if frame == self.frame {
            return Ok(*self);
        }
        let (first, second) = frame.from_canonical(self.theta, self.phi);
        Self::new(frame, first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SkyIndexError;

    #[test]
    fn test_equatorial_point() {
        let p = SphericalPoint::equatorial(10.0, 20.0).unwrap();
        assert_eq!(p.frame(), CoordinateFrame::Equatorial);
        assert_eq!(p.native(), (10.0, 20.0));
        assert_eq!(p.lon_deg(), 10.0);
        assert_eq!(p.lat_deg(), 20.0);
        assert!((p.theta() - 70f64.to_radians()).abs() < 1e-15);
        assert!((p.unit_vector().magnitude() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_invalid_declination() {
        let result = SphericalPoint::equatorial(10.0, 95.0);
        assert!(matches!(result, Err(SkyIndexError::InvalidShape { .. })));
    }

    #[test]
    fn test_pole_detection() {
        assert!(SphericalPoint::geocentric(45.0, 90.0).unwrap().is_north_pole());
        assert!(SphericalPoint::equatorial(0.0, -90.0).unwrap().is_south_pole());
        assert!(SphericalPoint::spherical(0.0, 1.0).unwrap().is_north_pole());
        assert!(!SphericalPoint::geocentric(45.0, 89.9).unwrap().is_pole());
    }

    #[test]
    fn test_from_lon_lat_wraps_into_frame() {
        let p = SphericalPoint::from_lon_lat(CoordinateFrame::Geocentric, 350.0, 5.0).unwrap();
        assert!((p.lon_deg() + 10.0).abs() < 1e-12);
        let q = SphericalPoint::from_lon_lat(CoordinateFrame::Equatorial, -10.0, 5.0).unwrap();
        assert!((q.lon_deg() - 350.0).abs() < 1e-12);
        assert!(p.separation(&q) < 1e-12);
    }

    #[test]
    fn test_to_frame_preserves_position() {
        let p = SphericalPoint::equatorial(300.0, -30.0).unwrap();
        let g = p.to_frame(CoordinateFrame::Geocentric).unwrap();
        assert!((g.lon_deg() + 60.0).abs() < 1e-10);
        assert!(p.separation(&g) < 1e-12);
        let s = p.to_frame(CoordinateFrame::Spherical).unwrap();
        assert!(p.separation(&s) < 1e-12);
    }
}
