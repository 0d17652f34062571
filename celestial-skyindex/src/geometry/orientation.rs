//! Orientation and convexity of points and polygons on the sphere.
//!
//! All tests work on unit vectors. The orientation of three points is the
//! sign of the scalar triple product `p0 · (p1 × p2)`, which equals the
//! triple product of the edge vectors `(p0 − p1, p1, p2 − p1)` around the
//! middle vertex.

use crate::constants::ORIENTATION_EPSILON;
use crate::shape::{Polygon, SphericalPoint};
use crate::vector::Vector3;

/// Triple product of three points, snapped to zero below
/// [`ORIENTATION_EPSILON`].
fn snapped_triple(p0: &SphericalPoint, p1: &SphericalPoint, p2: &SphericalPoint) -> f64 {
    let t = p0.unit_vector().triple(&p1.unit_vector(), &p2.unit_vector());
    if t.abs() < ORIENTATION_EPSILON {
        0.0
    } else {
        t
    }
}

/// Three points sharing one latitude or one longitude value.
fn shares_parallel_or_meridian(p0: &SphericalPoint, p1: &SphericalPoint, p2: &SphericalPoint) -> bool {
    let (lon0, lat0) = (p0.lon_deg(), p0.lat_deg());
    let (lon1, lat1) = (p1.lon_deg(), p1.lat_deg());
    let (lon2, lat2) = (p2.lon_deg(), p2.lat_deg());
    (lat0 == lat1 && lat1 == lat2) || (lon0 == lon1 && lon1 == lon2)
}

/// Whether `p0 → p1 → p2` turns clockwise seen from outside the sphere.
///
/// A zero triple product counts as clockwise, and so do three points on one
/// parallel or one meridian.
pub fn is_clockwise_triple(p0: &SphericalPoint, p1: &SphericalPoint, p2: &SphericalPoint) -> bool {
    if shares_parallel_or_meridian(p0, p1, p2) {
        return true;
    }
    snapped_triple(p0, p1, p2) <= 0.0
}

/// Signed turning angle at `p1` between the great circles `p0p1` and `p1p2`.
fn turning_angle(p0: &Vector3, p1: &Vector3, p2: &Vector3) -> f64 {
    let n1 = p0.cross(p1);
    let n2 = p1.cross(p2);
    libm::atan2(n1.cross(&n2).dot(p1), n1.dot(&n2))
}

/// Whether the polygon is traversed clockwise.
///
/// Every non-degenerate consecutive triple votes. When they all agree the
/// answer is that sign; with no usable triple the polygon is clockwise by
/// convention. A polygon with turns of both signs is decided by the sign of
/// its summed turning angle, so reversing it flips the answer.
pub fn is_clockwise(polygon: &Polygon) -> bool {
    let points = polygon.points();
    let n = points.len();
    let mut clockwise = 0usize;
    let mut counter = 0usize;
    for i in 0..n {
        let (a, b, c) = (&points[(i + n - 1) % n], &points[i], &points[(i + 1) % n]);
        if shares_parallel_or_meridian(a, b, c) {
            continue;
        }
        let t = snapped_triple(a, b, c);
        if t > 0.0 {
            counter += 1;
        } else if t < 0.0 {
            clockwise += 1;
        }
    }

    match (clockwise, counter) {
        (_, 0) => true,
        (0, _) => false,
        _ => {
            let vectors = polygon.unit_vectors();
            let total: f64 = (0..n)
                .map(|i| turning_angle(&vectors[(i + n - 1) % n], &vectors[i], &vectors[(i + 1) % n]))
                .sum();
            total < 0.0
        }
    }
}

/// Whether the polygon is convex.
///
/// The cross products of consecutive 3-D edge vectors must all point to the
/// same side, checked pairwise around the ring.
pub fn is_convex(polygon: &Polygon) -> bool {
    let vectors = polygon.unit_vectors();
    let n = vectors.len();
    let turns: Vec<Vector3> = (0..n)
        .map(|i| {
            let e1 = vectors[(i + 1) % n] - vectors[i];
            let e2 = vectors[(i + 2) % n] - vectors[(i + 1) % n];
            e1.cross(&e2)
        })
        .collect();
    (0..n).all(|i| turns[i].dot(&turns[(i + 1) % n]) >= 0.0)
}

/// Whether `p` lies strictly inside the counter-clockwise triangle `abc`.
pub fn point_in_triangle(p: &Vector3, a: &Vector3, b: &Vector3, c: &Vector3) -> bool {
    p.dot(&a.cross(b)) > 0.0 && p.dot(&b.cross(c)) > 0.0 && p.dot(&c.cross(a)) > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::CoordinateFrame;

    fn eq(ra: f64, dec: f64) -> SphericalPoint {
        SphericalPoint::equatorial(ra, dec).unwrap()
    }

    fn polygon(coords: &[(f64, f64)]) -> Polygon {
        Polygon::from_coordinates(CoordinateFrame::Equatorial, coords).unwrap()
    }

    #[test]
    fn test_triple_orientation() {
        assert!(!is_clockwise_triple(&eq(0.0, 0.0), &eq(10.0, 0.5), &eq(10.0, 10.0)));
        assert!(is_clockwise_triple(&eq(10.0, 10.0), &eq(10.0, 0.5), &eq(0.0, 0.0)));
    }

    #[test]
    fn test_same_latitude_is_clockwise() {
        // Counter-clockwise by the triple product, clockwise by convention.
        assert!(is_clockwise_triple(&eq(0.0, 30.0), &eq(10.0, 30.0), &eq(20.0, 30.0)));
        assert!(is_clockwise_triple(&eq(20.0, 30.0), &eq(10.0, 30.0), &eq(0.0, 30.0)));
        assert!(is_clockwise_triple(&eq(5.0, 0.0), &eq(5.0, 10.0), &eq(5.0, 20.0)));
    }

    #[test]
    fn test_collinear_triple_is_clockwise() {
        assert!(is_clockwise_triple(&eq(0.0, 0.0), &eq(10.0, 0.0), &eq(20.0, 0.0)));
    }

    #[test]
    fn test_rectangle_orientation() {
        let rect = polygon(&[(340.0, -10.0), (20.0, -10.0), (20.0, 10.0), (340.0, 10.0)]);
        assert!(!is_clockwise(&rect));
        assert!(is_clockwise(&rect.reversed()));
        assert!(is_convex(&rect));
        assert!(is_convex(&rect.reversed()));
    }

    #[test]
    fn test_concave_polygon_orientation_flips() {
        let concave = polygon(&[(0.0, 0.0), (30.0, 0.0), (30.0, 30.0), (15.0, 5.0), (0.0, 30.0)]);
        assert!(!is_convex(&concave));
        assert!(!is_clockwise(&concave));
        assert!(is_clockwise(&concave.reversed()));
    }

    #[test]
    fn test_parallel_polygon_is_clockwise_both_ways() {
        let ring = polygon(&[(0.0, 60.0), (120.0, 60.0), (240.0, 60.0)]);
        assert!(is_clockwise(&ring));
        assert!(is_clockwise(&ring.reversed()));
    }

    #[test]
    fn test_point_in_triangle_is_strict() {
        let a = eq(0.0, 0.0).unit_vector();
        let b = eq(10.0, 0.0).unit_vector();
        let c = eq(5.0, 10.0).unit_vector();
        assert!(point_in_triangle(&eq(5.0, 3.0).unit_vector(), &a, &b, &c));
        assert!(!point_in_triangle(&eq(20.0, 3.0).unit_vector(), &a, &b, &c));
        assert!(!point_in_triangle(&a, &a, &b, &c));
    }
}
