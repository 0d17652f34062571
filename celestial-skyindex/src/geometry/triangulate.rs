//! Ear-cutting triangulation of spherical polygons.

use std::cmp::Ordering;

use super::orientation::{is_clockwise, is_clockwise_triple, point_in_triangle};
use crate::errors::{SkyIndexError, SkyIndexResult};
use crate::shape::{Polygon, SphericalPoint};

/// Splits a polygon into triangles wound like its counter-clockwise boundary.
///
/// A clockwise polygon is triangulated as its reversal, so the triangles
/// always cover the region left of the counter-clockwise boundary. Winding
/// here means the sign of the triple product: a triangle whose three vertices
/// share a parallel or a meridian still reports [`Polygon::is_clockwise`],
/// since such triples count as clockwise. Repeated
/// poles are collapsed first. The walk starts at the lowest vertex by
/// (latitude, longitude), which makes a polygon and its reversal produce the
/// same triangles.
pub fn triangulate(polygon: &Polygon) -> SkyIndexResult<Vec<Polygon>> {
    let mut points = polygon.points().to_vec();
    if is_clockwise(polygon) {
        points.reverse();
    }

    let mut seen_north = false;
    let mut seen_south = false;
    points.retain(|p| {
        if p.is_north_pole() {
            return !std::mem::replace(&mut seen_north, true);
        }
        if p.is_south_pole() {
            return !std::mem::replace(&mut seen_south, true);
        }
        true
    });

    if points.len() < 3 {
        return Err(SkyIndexError::invalid_shape(format!(
            "polygon has {} distinct vertices after collapsing poles",
            points.len()
        )));
    }

    let start = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| lowest_first(a, b))
        .map(|(i, _)| i)
        .unwrap_or(0);
    points.rotate_left(start);

    let triangles = EarCutter::new(&points).run();
    tracing::debug!(
        vertices = points.len(),
        triangles = triangles.len(),
        "triangulated polygon"
    );
    Ok(triangles)
}

fn lowest_first(a: &SphericalPoint, b: &SphericalPoint) -> Ordering {
    a.lat_deg()
        .total_cmp(&b.lat_deg())
        .then(a.lon_deg().total_cmp(&b.lon_deg()))
}

struct EarCutter<'a> {
    points: &'a [SphericalPoint],
    prev: Vec<usize>,
    next: Vec<usize>,
}

impl<'a> EarCutter<'a> {
    fn new(points: &'a [SphericalPoint]) -> Self {
        let n = points.len();
        Self {
            points,
            prev: (0..n).map(|i| (i + n - 1) % n).collect(),
            next: (0..n).map(|i| (i + 1) % n).collect(),
        }
    }

    fn run(mut self) -> Vec<Polygon> {
        let mut remaining = self.points.len();
        let mut triangles = Vec::with_capacity(remaining - 2);
        let mut current = 0;
        let mut misses = 0;

        while remaining > 3 {
            if self.is_ear(current) {
                triangles.push(self.clip(current));
                current = self.next[current];
                remaining -= 1;
                misses = 0;
                continue;
            }
            misses += 1;
            if misses > remaining {
                let vertex = self.most_convex(current, remaining);
                tracing::trace!(vertex, remaining, "no ear found, clipping most convex vertex");
                triangles.push(self.clip(vertex));
                current = self.next[vertex];
                remaining -= 1;
                misses = 0;
            } else {
                current = self.next[current];
            }
        }

        triangles.push(self.triangle(current));
        triangles
    }

    fn triangle(&self, b: usize) -> Polygon {
        let (a, c) = (self.prev[b], self.next[b]);
        Polygon::triangle(self.points[a], self.points[b], self.points[c])
    }

    /// Emits the triangle at `b` and unlinks `b`.
    fn clip(&mut self, b: usize) -> Polygon {
        let triangle = self.triangle(b);
        let (a, c) = (self.prev[b], self.next[b]);
        self.next[a] = c;
        self.prev[c] = a;
        triangle
    }

    fn is_ear(&self, b: usize) -> bool {
        let (a, c) = (self.prev[b], self.next[b]);
        let (pa, pb, pc) = (&self.points[a], &self.points[b], &self.points[c]);
        if is_clockwise_triple(pa, pb, pc) {
            return false;
        }
        let (va, vb, vc) = (pa.unit_vector(), pb.unit_vector(), pc.unit_vector());
        let mut j = self.next[c];
        while j != a {
            if point_in_triangle(&self.points[j].unit_vector(), &va, &vb, &vc) {
                return false;
            }
            j = self.next[j];
        }
        true
    }

    /// The remaining vertex with the largest triple product with its
    /// neighbours.
    fn most_convex(&self, start: usize, remaining: usize) -> usize {
        let mut best = start;
        let mut best_det = f64::NEG_INFINITY;
        let mut j = start;
        for _ in 0..remaining {
            let det = self.points[self.prev[j]]
                .unit_vector()
                .triple(&self.points[j].unit_vector(), &self.points[self.next[j]].unit_vector());
            if det > best_det {
                best_det = det;
                best = j;
            }
            j = self.next[j];
        }
        best
    }
}
