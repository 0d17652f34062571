//! Coordinate frames accepted by shape constructors.
//!
//! Every frame maps onto the same canonical spherical form used by the
//! pixelization: colatitude `θ ∈ [0, π]` measured from the north pole and
//! azimuth `φ ∈ [0, 2π)`, both in radians.
//!
//! | Frame | First angle | Second angle | Units |
//! |-------|-------------|--------------|-------|
//! | [`Equatorial`](CoordinateFrame::Equatorial) | right ascension `[0, 360]` | declination `[-90, 90]` | degrees |
//! | [`Geocentric`](CoordinateFrame::Geocentric) | longitude `[-180, 180]` | latitude `[-90, 90]` | degrees |
//! | [`Spherical`](CoordinateFrame::Spherical) | colatitude `θ ∈ [0, π]` | azimuth `φ ∈ [0, 2π]` | radians |

use std::fmt;

use crate::constants::{PI, TWOPI};
use crate::errors::{SkyIndexError, SkyIndexResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoordinateFrame {
    Equatorial,
    Geocentric,
    Spherical,
}

impl CoordinateFrame {
    /// Validates a native coordinate pair and returns canonical `(θ, φ)`.
    pub fn to_canonical(self, first: f64, second: f64) -> SkyIndexResult<(f64, f64)> {
        self.validate(first, second)?;
        match self {
            Self::Spherical => Ok((first, wrap_positive(second, TWOPI))),
            _ => Ok(lon_lat_to_canonical(first, second)),
        }
    }

    /// Converts canonical `(θ, φ)` back to this frame's native pair.
    ///
    /// Right ascension comes back in `[0, 360)`, geocentric longitude in
    /// `(-180, 180]` and spherical azimuth in `[0, 2π)`.
    pub fn from_canonical(self, theta: f64, phi: f64) -> (f64, f64) {
        match self {
            Self::Spherical => (theta, wrap_positive(phi, TWOPI)),
            _ => {
                let lon_deg = phi.to_degrees();
                let lat_deg = 90.0 - theta.to_degrees();
                (self.wrap_longitude(lon_deg), lat_deg)
            }
        }
    }

    /// Checks a native pair against this frame's bounds.
    pub fn validate(self, first: f64, second: f64) -> SkyIndexResult<()> {
        if !first.is_finite() || !second.is_finite() {
            return Err(SkyIndexError::invalid_shape(format!(
                "{self} coordinates ({first}, {second}) are not finite"
            )));
        }
        let ((lo1, hi1), (lo2, hi2)) = self.bounds();
        if !(lo1..=hi1).contains(&first) || !(lo2..=hi2).contains(&second) {
            return Err(SkyIndexError::invalid_shape(format!(
                "{self} coordinates ({first}, {second}) outside [{lo1}, {hi1}] x [{lo2}, {hi2}]"
            )));
        }
        Ok(())
    }

    /// Inclusive bounds of the first and second native angle.
    pub fn bounds(self) -> ((f64, f64), (f64, f64)) {
        match self {
            Self::Equatorial => ((0.0, 360.0), (-90.0, 90.0)),
            Self::Geocentric => ((-180.0, 180.0), (-90.0, 90.0)),
            Self::Spherical => ((0.0, PI), (0.0, TWOPI)),
        }
    }

    /// Native pair as frame-independent (longitude, latitude) in degrees.
    pub(crate) fn native_to_lon_lat(self, first: f64, second: f64) -> (f64, f64) {
        match self {
            Self::Equatorial | Self::Geocentric => (first, second),
            Self::Spherical => (second.to_degrees(), 90.0 - first.to_degrees()),
        }
    }

    /// Frame-independent (longitude, latitude) in degrees back to a native pair,
    /// wrapping the longitude into the frame's range.
    pub(crate) fn lon_lat_to_native(self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        match self {
            Self::Equatorial | Self::Geocentric => (self.wrap_longitude(lon_deg), lat_deg),
            Self::Spherical => (
                (90.0 - lat_deg).to_radians().clamp(0.0, PI),
                wrap_positive(lon_deg, 360.0).to_radians(),
            ),
        }
    }

    /// Wraps a longitude in degrees into this frame's longitude range.
    pub(crate) fn wrap_longitude(self, lon_deg: f64) -> f64 {
        match self {
            Self::Geocentric => {
                let wrapped = wrap_positive(lon_deg, 360.0);
                if wrapped > 180.0 {
                    wrapped - 360.0
                } else {
                    wrapped
                }
            }
            _ => wrap_positive(lon_deg, 360.0),
        }
    }
}

impl fmt::Display for CoordinateFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equatorial => "equatorial",
            Self::Geocentric => "geocentric",
            Self::Spherical => "spherical",
        };
        f.write_str(name)
    }
}

pub(crate) fn lon_lat_to_canonical(lon_deg: f64, lat_deg: f64) -> (f64, f64) {
    let theta = (90.0 - lat_deg).to_radians();
    let phi = wrap_positive(lon_deg, 360.0).to_radians();
    (theta, phi)
}

/// `value` modulo `period`, in `[0, period)`.
pub(crate) fn wrap_positive(value: f64, period: f64) -> f64 {
    let wrapped = libm::fmod(value, period);
    let wrapped = if wrapped < 0.0 {
        wrapped + period
    } else {
        wrapped
    };
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}
