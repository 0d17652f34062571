//! Sphere pixelization behind a narrow trait.
//!
//! The index strategies only talk to [`Pixelization`]; [`HealpixGrid`] is the
//! HEALPix implementation shipped with the crate.

mod healpix;
mod ranges;

pub use healpix::HealpixGrid;
pub use ranges::PixelRangeSet;

use std::fmt;

use crate::errors::PixelizationResult;
use crate::vector::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pixel numbering convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scheme {
    Ring,
    Nested,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ring => f.write_str("RING"),
            Self::Nested => f.write_str("NESTED"),
        }
    }
}

/// Discretization primitives of a hierarchical sphere pixelization.
///
/// Pixel ids passed in and returned are in [`native_scheme`] numbering
/// unless a method says otherwise. Angles are canonical colatitude `θ` and
/// azimuth `φ` in radians; vectors are unit vectors.
///
/// [`native_scheme`]: Pixelization::native_scheme
pub trait Pixelization {
    fn native_scheme(&self) -> Scheme;

    fn max_supported_order(&self) -> u8;

    fn angle_to_pixel(&self, order: u8, theta: f64, phi: f64) -> PixelizationResult<u64>;

    /// Center of `pixel` as `(θ, φ)`.
    fn pixel_to_angle(&self, order: u8, pixel: u64) -> PixelizationResult<(f64, f64)>;

    /// Pixels of the disc of angular `radius` around `center`.
    ///
    /// `inclusive_factor` 0 keeps pixels whose center lies in the disc; a
    /// power of two keeps every pixel touching it, tested that much finer.
    fn query_disc(
        &self,
        order: u8,
        center: &Vector3,
        radius: f64,
        inclusive_factor: u32,
    ) -> PixelizationResult<PixelRangeSet>;

    /// Pixels of a convex polygon, in either orientation.
    fn query_polygon(
        &self,
        order: u8,
        vertices: &[Vector3],
        inclusive_factor: u32,
    ) -> PixelizationResult<PixelRangeSet>;

    /// Pixels of the triangle `abc`. Degenerate triangles give an empty set.
    fn query_triangle(
        &self,
        order: u8,
        a: &Vector3,
        b: &Vector3,
        c: &Vector3,
        inclusive_factor: u32,
    ) -> PixelizationResult<PixelRangeSet>;

    fn convert_numbering(&self, order: u8, pixel: u64, from: Scheme, to: Scheme) -> PixelizationResult<u64>;

    /// Coarsest order whose pixel size is at most `arcsec`, or the maximum
    /// order when none is that fine.
    fn order_for_resolution(&self, arcsec: f64) -> u8;

    /// Typical pixel size at `order`, in arcseconds.
    fn resolution_for_order(&self, order: u8) -> f64;

    fn pixel_count(&self, order: u8) -> u64;

    /// Renumbers every pixel of `ranges`.
    fn convert_ranges(
        &self,
        order: u8,
        ranges: &PixelRangeSet,
        from: Scheme,
        to: Scheme,
    ) -> PixelizationResult<PixelRangeSet> {
        if from == to {
            return Ok(ranges.clone());
        }
        let pixels = ranges
            .pixels()
            .map(|p| self.convert_numbering(order, p, from, to))
            .collect::<PixelizationResult<Vec<u64>>>()?;
        Ok(PixelRangeSet::from_pixels(pixels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_ranges() {
        let grid = HealpixGrid::new(2).unwrap();
        let nested = PixelRangeSet::from_ranges([(0, 4)]);
        let ring = grid
            .convert_ranges(1, &nested, Scheme::Nested, Scheme::Ring)
            .unwrap();
        assert_eq!(ring.pixel_count(), 4);
        let back = grid
            .convert_ranges(1, &ring, Scheme::Ring, Scheme::Nested)
            .unwrap();
        assert_eq!(back, nested);
        assert_eq!(
            grid.convert_ranges(1, &nested, Scheme::Nested, Scheme::Nested).unwrap(),
            nested
        );
    }

    #[test]
    fn test_scheme_display() {
        assert_eq!(Scheme::Ring.to_string(), "RING");
        assert_eq!(Scheme::Nested.to_string(), "NESTED");
    }
}
