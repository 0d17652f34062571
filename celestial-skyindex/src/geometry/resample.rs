//! Densification of polygon edges.
//!
//! Great-circle edges longer than a pixel bulge away from the straight
//! lon/lat segments a catalog footprint usually means. Inserting vertices
//! every few arcminutes keeps the triangulated shape close to the intended
//! one.

use crate::constants::{DEFAULT_RESAMPLE_STEP_ARCMIN, RAD_TO_ARCMIN};
use crate::errors::{SkyIndexError, SkyIndexResult};
use crate::frame::wrap_positive;
use crate::shape::{Polygon, SphericalPoint};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeResampler {
    step_arcmin: f64,
}

impl Default for EdgeResampler {
    fn default() -> Self {
        Self {
            step_arcmin: DEFAULT_RESAMPLE_STEP_ARCMIN,
        }
    }
}

impl EdgeResampler {
    /// `step_arcmin` must be finite and positive.
    pub fn new(step_arcmin: f64) -> SkyIndexResult<Self> {
        if !step_arcmin.is_finite() || step_arcmin <= 0.0 {
            return Err(SkyIndexError::invalid_config(format!(
                "resample step {step_arcmin}' must be finite and positive"
            )));
        }
        Ok(Self { step_arcmin })
    }

    pub fn step_arcmin(&self) -> f64 {
        self.step_arcmin
    }

    /// Number of points emitted for the edge `a → b`, counting `a` itself.
    pub fn segments(&self, a: &SphericalPoint, b: &SphericalPoint) -> usize {
        let chord_arcmin = a.unit_vector().distance_to(&b.unit_vector()) * RAD_TO_ARCMIN;
        let n = libm::floor(chord_arcmin / self.step_arcmin);
        if n >= 1.0 {
            n as usize
        } else {
            1
        }
    }

    /// Returns a polygon in the same frame with every edge split into steps
    /// of roughly `step_arcmin`.
    ///
    /// Each edge contributes its start vertex followed by the interpolated
    /// points. Interior points are computed from the same endpoint whichever
    /// way the edge is traversed, so a polygon and its reversal share them
    /// exactly.
    pub fn resample(&self, polygon: &Polygon) -> SkyIndexResult<Polygon> {
        let points = polygon.points();
        let count = points.len();
        let mut out = Vec::with_capacity(count);
        for (i, a) in points.iter().enumerate() {
            let b = &points[(i + 1) % count];
            let n = self.segments(a, b);
            out.push(*a);
            let forward = edge_key(a) <= edge_key(b);
            for j in 1..n {
                let point = if forward {
                    interpolate(a, b, j as f64 / n as f64)?
                } else {
                    interpolate(b, a, (n - j) as f64 / n as f64)?
                };
                out.push(point);
            }
        }

        tracing::debug!(
            input = count,
            output = out.len(),
            step_arcmin = self.step_arcmin,
            "resampled polygon edges"
        );
        Polygon::new(out)
    }
}

fn edge_key(p: &SphericalPoint) -> (f64, f64) {
    (p.lon_deg(), p.lat_deg())
}

/// Linear lon/lat interpolation from `a` to `b`, following the shorter way
/// around in longitude.
fn interpolate(a: &SphericalPoint, b: &SphericalPoint, t: f64) -> SkyIndexResult<SphericalPoint> {
    let (mut lon_a, lat_a) = edge_key(a);
    let (mut lon_b, lat_b) = edge_key(b);
    // A pole has no longitude of its own; follow the other end's meridian.
    if a.is_pole() {
        lon_a = lon_b;
    }
    if b.is_pole() {
        lon_b = lon_a;
    }
    let target = [lon_b, lon_b + 360.0, lon_b - 360.0]
        .into_iter()
        .fold(lon_b, |best, candidate| {
            if (candidate - lon_a).abs() < (best - lon_a).abs() {
                candidate
            } else {
                best
            }
        });
    let lon = wrap_positive(lon_a + (target - lon_a) * t, 360.0);
    let lat = lat_a + (lat_b - lat_a) * t;
    SphericalPoint::from_lon_lat(a.frame(), lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::CoordinateFrame;

    fn polygon(frame: CoordinateFrame, coords: &[(f64, f64)]) -> Polygon {
        Polygon::from_coordinates(frame, coords).unwrap()
    }

    #[test]
    fn test_short_edges_unchanged() {
        let small = polygon(
            CoordinateFrame::Equatorial,
            &[(10.0, 10.0), (10.1, 10.0), (10.1, 10.1)],
        );
        let out = EdgeResampler::default().resample(&small).unwrap();
        assert_eq!(out, small);
    }

    #[test]
    fn test_edge_point_count() {
        // A one-degree edge on the equator is a 60' chord: six segments.
        let a = SphericalPoint::equatorial(0.0, 0.0).unwrap();
        let b = SphericalPoint::equatorial(1.0, 0.0).unwrap();
        let resampler = EdgeResampler::default();
        let n = resampler.segments(&a, &b);
        assert!(n == 5 || n == 6, "got {n}");
        assert_eq!(EdgeResampler::new(30.0).unwrap().segments(&a, &b), 1);
    }

    #[test]
    fn test_rejects_bad_step() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                EdgeResampler::new(step).is_err(),
                "step {step} should be rejected"
            );
        }
    }

    #[test]
    fn test_interpolation_crosses_zero_meridian() {
        let rect = polygon(
            CoordinateFrame::Equatorial,
            &[(359.0, -1.0), (1.0, -1.0), (1.0, 1.0), (359.0, 1.0)],
        );
        let out = EdgeResampler::default().resample(&rect).unwrap();
        assert!(out.len() > rect.len());
        for p in out.points() {
            let lon = p.lon_deg();
            assert!(lon >= 359.0 - 1e-9 || lon <= 1.0 + 1e-9, "lon {lon} took the long way");
            assert!(p.lat_deg().abs() <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn test_geocentric_output_stays_in_frame() {
        let box_ = polygon(
            CoordinateFrame::Geocentric,
            &[(170.0, 0.0), (-170.0, 0.0), (-170.0, 5.0), (170.0, 5.0)],
        );
        let out = EdgeResampler::new(60.0).unwrap().resample(&box_).unwrap();
        assert_eq!(out.frame(), CoordinateFrame::Geocentric);
        for p in out.points() {
            let lon = p.lon_deg();
            assert!(lon.abs() >= 170.0 - 1e-9, "lon {lon} left the antimeridian box");
        }
    }

    #[test]
    fn test_pole_edge_follows_meridian() {
        let cap = polygon(
            CoordinateFrame::Equatorial,
            &[(0.0, 80.0), (90.0, 80.0), (45.0, 90.0)],
        );
        let out = EdgeResampler::default().resample(&cap).unwrap();
        let on_meridian = out
            .points()
            .iter()
            .filter(|p| p.lat_deg() > 80.0 && !p.is_pole())
            .all(|p| (p.lon_deg() - 90.0).abs() < 1e-9 || p.lon_deg().abs() < 1e-9);
        assert!(on_meridian);
    }

    #[test]
    fn test_reversal_shares_interior_points() {
        let p = polygon(
            CoordinateFrame::Equatorial,
            &[(10.0, 20.0), (14.0, 20.0), (14.0, 23.0), (10.0, 23.0)],
        );
        let forward = EdgeResampler::default().resample(&p).unwrap();
        let backward = EdgeResampler::default().resample(&p.reversed()).unwrap();
        assert_eq!(forward.len(), backward.len());
        for point in forward.points() {
            assert!(backward.points().contains(point));
        }
    }
}
