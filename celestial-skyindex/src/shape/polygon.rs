use super::SphericalPoint;
use crate::errors::{SkyIndexError, SkyIndexResult};
use crate::frame::CoordinateFrame;
use crate::geometry::orientation;
use crate::vector::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed spherical polygon.
///
/// Vertices are joined by great-circle arcs and the last vertex connects
/// back to the first. The vertex order decides which side is the interior:
/// counter-clockwise polygons enclose the region on their left, clockwise
/// ones describe the rest of the sky. Orientation is always derived from the
/// vertices, never stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    points: Vec<SphericalPoint>,
}

impl Polygon {
    /// Builds a polygon from at least three points sharing one frame.
    ///
    /// A trailing copy of the first point (explicitly closed input) is
    /// dropped before counting.
    pub fn new(mut points: Vec<SphericalPoint>) -> SkyIndexResult<Self> {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return Err(SkyIndexError::invalid_shape(format!(
                "polygon needs at least 3 points, got {}",
                points.len()
            )));
        }
        let frame = points[0].frame();
        if let Some(other) = points.iter().find(|p| p.frame() != frame) {
            return Err(SkyIndexError::invalid_shape(format!(
                "polygon mixes {frame} and {} points",
                other.frame()
            )));
        }
        Ok(Self { points })
    }

    /// Builds a polygon from `(first, second)` native pairs in `frame`.
    pub fn from_coordinates(frame: CoordinateFrame, coords: &[(f64, f64)]) -> SkyIndexResult<Self> {
        let points = coords
            .iter()
            .map(|&(a, b)| SphericalPoint::new(frame, a, b))
            .collect::<SkyIndexResult<Vec<_>>>()?;
        Self::new(points)
    }

    /// Triangle straight from three vertices, skipping validation. Used for
    /// triangulation output, whose vertices already passed through
    /// [`Polygon::new`].
    pub(crate) fn triangle(a: SphericalPoint, b: SphericalPoint, c: SphericalPoint) -> Self {
        Self {
            points: vec![a, b, c],
        }
    }

    pub fn points(&self) -> &[SphericalPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn frame(&self) -> CoordinateFrame {
        self.points[0].frame()
    }

    pub fn unit_vectors(&self) -> Vec<Vector3> {
        self.points.iter().map(SphericalPoint::unit_vector).collect()
    }

    /// The same vertices in the opposite order, which swaps interior and
    /// exterior.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Mixed-sign polygons are decided by their summed turning angle.
    pub fn is_clockwise(&self) -> bool {
        orientation::is_clockwise(self)
    }

    pub fn is_convex(&self) -> bool {
        orientation::is_convex(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle() -> Polygon {
        Polygon::from_coordinates(
            CoordinateFrame::Equatorial,
            &[(340.0, -10.0), (20.0, -10.0), (20.0, 10.0), (340.0, 10.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_too_few_points() {
        let result = Polygon::from_coordinates(CoordinateFrame::Equatorial, &[(0.0, 0.0), (10.0, 0.0)]);
        assert!(matches!(result, Err(SkyIndexError::InvalidShape { .. })));
    }

    #[test]
    fn test_closing_vertex_dropped() {
        let closed = Polygon::from_coordinates(
            CoordinateFrame::Equatorial,
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)],
        )
        .unwrap();
        assert_eq!(closed.len(), 3);

        let degenerate = Polygon::from_coordinates(
            CoordinateFrame::Equatorial,
            &[(0.0, 0.0), (10.0, 0.0), (0.0, 0.0)],
        );
        assert!(degenerate.is_err());
    }

    #[test]
    fn test_mixed_frames_rejected() {
        let points = vec![
            SphericalPoint::equatorial(0.0, 0.0).unwrap(),
            SphericalPoint::geocentric(10.0, 0.0).unwrap(),
            SphericalPoint::equatorial(10.0, 10.0).unwrap(),
        ];
        assert!(matches!(Polygon::new(points), Err(SkyIndexError::InvalidShape { .. })));
    }

    #[test]
    fn test_reversed() {
        let polygon = rectangle();
        let reversed = polygon.reversed();
        assert_eq!(reversed.points()[0], polygon.points()[3]);
        assert_eq!(reversed.reversed(), polygon);
        assert!(!polygon.is_clockwise());
        assert!(reversed.is_clockwise());
    }
}
