//! HEALPix pixelization of the sphere, backed by `cdshealpix`.
//!
//! Gorski et al. (2005) equal-area grid: 12 base pixels, each split into
//! `nside × nside` sub-pixels with `nside = 2^order`. Two numberings of the
//! same pixels are supported:
//!
//! | Scheme | Layout | Used for |
//! |--------|--------|----------|
//! | NESTED | quad-tree: children of `p` are `4p..4p+4` | hierarchical queries, coverage maps |
//! | RING | iso-latitude rings, north to south | latitude-ordered scans |
//!
//! The grid's native numbering is NESTED, so region queries come back as
//! compact ranges even at order 29. Hashing, pixel centers, renumbering and
//! the cone and polygon coverages are delegated to [`cdshealpix`]; this
//! module maps the crate's colatitude/azimuth angles and unit vectors onto
//! its longitude/latitude API and applies the inclusive factor.

use cdshealpix::nested::bmoc::BMOC;
use cdshealpix::nested::{self, Layer};

use super::{PixelRangeSet, Pixelization, Scheme};
use crate::constants::{HALF_PI, HEALPIX_MAX_ORDER, ORIENTATION_EPSILON, PI, RAD_TO_ARCSEC};
use crate::errors::{PixelizationError, PixelizationResult};
use crate::vector::Vector3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealpixGrid {
    max_order: u8,
}

impl Default for HealpixGrid {
    fn default() -> Self {
        Self {
            max_order: HEALPIX_MAX_ORDER,
        }
    }
}

impl HealpixGrid {
    /// A grid limited to orders `0..=max_order`; `max_order` may not exceed
    /// 29.
    pub fn new(max_order: u8) -> PixelizationResult<Self> {
        if max_order > HEALPIX_MAX_ORDER {
            return Err(PixelizationError::OrderOutOfRange {
                order: max_order,
                max: HEALPIX_MAX_ORDER,
            });
        }
        Ok(Self { max_order })
    }

    fn check_order(&self, order: u8) -> PixelizationResult<()> {
        if order > self.max_order {
            return Err(PixelizationError::OrderOutOfRange {
                order,
                max: self.max_order,
            });
        }
        Ok(())
    }

    fn check_pixel(&self, order: u8, pixel: u64) -> PixelizationResult<()> {
        self.check_order(order)?;
        let npix = cdshealpix::n_hash(order);
        if pixel >= npix {
            return Err(PixelizationError::PixelOutOfRange { order, pixel, npix });
        }
        Ok(())
    }

    /// Unit vector of the center of NESTED pixel `pixel`.
    pub fn pixel_center(&self, order: u8, pixel: u64) -> PixelizationResult<Vector3> {
        self.check_pixel(order, pixel)?;
        Ok(center_vector(nested::get(order), pixel))
    }

    /// NESTED ranges at `order` of the pixels a coverage query selects.
    ///
    /// With `inclusive_factor == 0` the query runs at `order` and boundary
    /// pixels are kept when their center satisfies `contains`. Otherwise it
    /// runs `log2(inclusive_factor)` orders deeper (at most order 29) and
    /// every pixel holding a selected sub-pixel is kept.
    fn coverage<Q, C>(&self, order: u8, inclusive_factor: u32, query: Q, contains: C) -> PixelRangeSet
    where
        Q: FnOnce(&Layer) -> BMOC,
        C: Fn(&Vector3) -> bool,
    {
        if inclusive_factor == 0 {
            let layer = nested::get(order);
            let mut ranges = Vec::new();
            for (range, full) in query(layer).to_flagged_ranges() {
                if full {
                    ranges.push((range.start, range.end));
                } else {
                    ranges.extend(
                        range
                            .filter(|&pixel| contains(&center_vector(layer, pixel)))
                            .map(|pixel| (pixel, pixel + 1)),
                    );
                }
            }
            return PixelRangeSet::from_ranges(ranges);
        }

        let extra = inclusive_factor.ilog2().min(u32::from(HEALPIX_MAX_ORDER - order)) as u8;
        let shift = 2 * u32::from(extra);
        let round_up = (1u64 << shift) - 1;
        let bmoc = query(nested::get(order + extra));
        PixelRangeSet::from_ranges(
            bmoc.to_ranges()
                .iter()
                .map(|r| (r.start >> shift, (r.end + round_up) >> shift)),
        )
    }

    /// Coverage of a convex ring whose edge planes all face inward once
    /// `flip` is applied.
    fn convex_coverage(&self, order: u8, ring: &[Vector3], flip: bool, inclusive_factor: u32) -> PixelRangeSet {
        let n = ring.len();
        let normals: Vec<Vector3> = (0..n)
            .map(|i| {
                let normal = ring[i].cross(&ring[(i + 1) % n]).normalize();
                if flip {
                    -normal
                } else {
                    normal
                }
            })
            .collect();
        let vertices: Vec<(f64, f64)> = ring.iter().map(lon_lat).collect();
        self.coverage(
            order,
            inclusive_factor,
            |layer| layer.polygon_coverage(&vertices, true),
            |p| normals.iter().all(|normal| p.dot(normal) >= 0.0),
        )
    }
}

impl Pixelization for HealpixGrid {
    fn native_scheme(&self) -> Scheme {
        Scheme::Nested
    }

    fn max_supported_order(&self) -> u8 {
        self.max_order
    }

    fn angle_to_pixel(&self, order: u8, theta: f64, phi: f64) -> PixelizationResult<u64> {
        self.check_order(order)?;
        if !theta.is_finite() || !phi.is_finite() || !(0.0..=PI).contains(&theta) {
            return Err(PixelizationError::invalid_angle(format!(
                "(θ, φ) = ({theta}, {phi}) is not a position on the sphere"
            )));
        }
        Ok(nested::get(order).hash(phi, HALF_PI - theta))
    }

    fn pixel_to_angle(&self, order: u8, pixel: u64) -> PixelizationResult<(f64, f64)> {
        self.check_pixel(order, pixel)?;
        let (lon, lat) = nested::get(order).center(pixel);
        Ok((HALF_PI - lat, lon))
    }

    fn query_disc(
        &self,
        order: u8,
        center: &Vector3,
        radius: f64,
        inclusive_factor: u32,
    ) -> PixelizationResult<PixelRangeSet> {
        self.check_order(order)?;
        if !radius.is_finite() || radius < 0.0 {
            return Err(PixelizationError::invalid_query(format!(
                "disc radius {radius} must be finite and non-negative"
            )));
        }
        if center.magnitude() == 0.0 {
            return Err(PixelizationError::invalid_query("disc center is the zero vector"));
        }
        if radius >= PI {
            return Ok(PixelRangeSet::full(cdshealpix::n_hash(order)));
        }
        let center = center.normalize();
        let (lon, lat) = lon_lat(&center);
        Ok(self.coverage(
            order,
            inclusive_factor,
            |layer| layer.cone_coverage_approx(lon, lat, radius),
            |p| p.angle_to(&center) <= radius,
        ))
    }

    fn query_polygon(
        &self,
        order: u8,
        vertices: &[Vector3],
        inclusive_factor: u32,
    ) -> PixelizationResult<PixelRangeSet> {
        self.check_order(order)?;
        let ring = simplify_ring(vertices);
        if ring.len() < 3 {
            return Ok(PixelRangeSet::new());
        }
        let n = ring.len();
        let corners: Vec<f64> = (0..n)
            .map(|i| ring[(i + n - 1) % n].triple(&ring[i], &ring[(i + 1) % n]))
            .collect();
        let counter_clockwise = corners.iter().all(|&t| t > 0.0);
        if !counter_clockwise && !corners.iter().all(|&t| t < 0.0) {
            return Err(PixelizationError::invalid_query(format!(
                "polygon with {n} vertices is not convex"
            )));
        }
        Ok(self.convex_coverage(order, &ring, !counter_clockwise, inclusive_factor))
    }

    fn query_triangle(
        &self,
        order: u8,
        a: &Vector3,
        b: &Vector3,
        c: &Vector3,
        inclusive_factor: u32,
    ) -> PixelizationResult<PixelRangeSet> {
        self.check_order(order)?;
        let det = a.triple(b, c);
        if det.abs() < ORIENTATION_EPSILON {
            return Ok(PixelRangeSet::new());
        }
        Ok(self.convex_coverage(order, &[*a, *b, *c], det < 0.0, inclusive_factor))
    }

    fn convert_numbering(&self, order: u8, pixel: u64, from: Scheme, to: Scheme) -> PixelizationResult<u64> {
        self.check_pixel(order, pixel)?;
        let layer = nested::get(order);
        Ok(match (from, to) {
            (Scheme::Ring, Scheme::Nested) => layer.from_ring(pixel),
            (Scheme::Nested, Scheme::Ring) => layer.to_ring(pixel),
            _ => pixel,
        })
    }

    fn order_for_resolution(&self, arcsec: f64) -> u8 {
        (0..=self.max_order)
            .find(|&order| self.resolution_for_order(order) <= arcsec)
            .unwrap_or(self.max_order)
    }

    fn resolution_for_order(&self, order: u8) -> f64 {
        libm::sqrt(4.0 * PI / cdshealpix::n_hash(order) as f64) * RAD_TO_ARCSEC
    }

    fn pixel_count(&self, order: u8) -> u64 {
        cdshealpix::n_hash(order)
    }
}

/// `(lon, lat)` in radians, the argument order `cdshealpix` expects.
fn lon_lat(v: &Vector3) -> (f64, f64) {
    let (theta, phi) = v.to_colatitude();
    (phi, HALF_PI - theta)
}

fn center_vector(layer: &Layer, pixel: u64) -> Vector3 {
    let (lon, lat) = layer.center(pixel);
    Vector3::from_colatitude(HALF_PI - lat, lon)
}

/// Drops repeated consecutive vertices, then vertices collinear with their
/// neighbours.
fn simplify_ring(vertices: &[Vector3]) -> Vec<Vector3> {
    let mut ring: Vec<Vector3> = Vec::with_capacity(vertices.len());
    for v in vertices {
        if ring.last() != Some(v) {
            ring.push(*v);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    let n = ring.len();
    if n < 3 {
        return ring;
    }
    (0..n)
        .filter(|&i| {
            ring[(i + n - 1) % n].triple(&ring[i], &ring[(i + 1) % n]).abs() >= ORIENTATION_EPSILON
        })
        .map(|i| ring[i])
        .collect()
}
