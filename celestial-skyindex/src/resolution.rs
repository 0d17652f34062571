//! Picks the pixel order an index is built at from the size of the shape.

use crate::constants::RAD_TO_ARCSEC;
use crate::pixel::Pixelization;
use crate::shape::{Polygon, Shape};

/// Characteristic angular size of a shape in arcseconds, or `None` for
/// shapes without one (points, polygons whose edges all have zero length).
///
/// Cones use their radius. Polygons use the shortest edge; a quadrilateral
/// is treated as a box and only its first two edges, one per side pair, are
/// looked at.
pub fn minimum_feature_arcsec(shape: &Shape) -> Option<f64> {
    match shape {
        Shape::Point(_) => None,
        Shape::Cone(cone) => Some(cone.radius() * RAD_TO_ARCSEC),
        Shape::Polygon(polygon) => shortest_edge(polygon).map(|rad| rad * RAD_TO_ARCSEC),
    }
}

fn shortest_edge(polygon: &Polygon) -> Option<f64> {
    let points = polygon.points();
    let n = points.len();
    let edges = if n == 4 { 2 } else { n };
    (0..edges)
        .map(|i| points[i].separation(&points[(i + 1) % n]))
        .filter(|&d| d > 0.0)
        .min_by(f64::total_cmp)
}

/// Order at which `shape` should be indexed on `port`.
///
/// Points go to the finest order. Otherwise the coarsest order whose pixels
/// are no larger than the shape's feature size is used, capped at the
/// port's maximum.
pub fn select_order<P: Pixelization + ?Sized>(port: &P, shape: &Shape) -> u8 {
    let max = port.max_supported_order();
    let order = match minimum_feature_arcsec(shape) {
        Some(arcsec) => port.order_for_resolution(arcsec).min(max),
        None => max,
    };
    tracing::trace!(kind = %shape.kind(), order, "selected index order");
    order
}
