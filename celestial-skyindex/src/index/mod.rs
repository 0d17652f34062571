//! Index strategies and the factory that picks one.
//!
//! | Requested scheme | Strategy | Point | Cone | Polygon |
//! |------------------|----------|-------|------|---------|
//! | `RING` / `NESTED` | [`SingleResolutionIndex`] | one pixel | disc ranges | polygon or triangle ranges |
//! | `MOC` / `COVERAGE` | [`CoverageIndex`] | one cell | disc cells | triangle cells |
//!
//! Clockwise polygons index the rest of the sky in every strategy.

mod coverage;
mod single;

pub use coverage::CoverageIndex;
pub use single::SingleResolutionIndex;

use std::fmt;
use std::str::FromStr;

use crate::config::IndexConfig;
use crate::coverage::CoverageMap;
use crate::errors::{SkyIndexError, SkyIndexResult};
use crate::geometry::{triangulate, EdgeResampler};
use crate::pixel::{PixelRangeSet, Pixelization, Scheme};
use crate::shape::{Polygon, Shape};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of index requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IndexScheme {
    Ring,
    Nested,
    Coverage,
}

impl IndexScheme {
    /// Pixel numbering of a single-resolution scheme.
    pub fn numbering(self) -> Option<Scheme> {
        match self {
            Self::Ring => Some(Scheme::Ring),
            Self::Nested => Some(Scheme::Nested),
            Self::Coverage => None,
        }
    }
}

impl FromStr for IndexScheme {
    type Err = SkyIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RING" => Ok(Self::Ring),
            "NESTED" => Ok(Self::Nested),
            "MOC" | "COVERAGE" => Ok(Self::Coverage),
            _ => Err(SkyIndexError::unsupported_scheme(format!(
                "unknown index scheme '{s}', expected RING, NESTED or MOC"
            ))),
        }
    }
}

impl fmt::Display for IndexScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ring => f.write_str("RING"),
            Self::Nested => f.write_str("NESTED"),
            Self::Coverage => f.write_str("MOC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IndexResult {
    Pixel { order: u8, scheme: Scheme, pixel: u64 },
    Ranges { order: u8, scheme: Scheme, ranges: PixelRangeSet },
    Coverage(CoverageMap),
}

impl IndexResult {
    pub fn order(&self) -> u8 {
        match self {
            Self::Pixel { order, .. } | Self::Ranges { order, .. } => *order,
            Self::Coverage(map) => map.order(),
        }
    }

    /// Number of pixels (or cells) at [`order`](Self::order).
    pub fn pixel_count(&self) -> u64 {
        match self {
            Self::Pixel { .. } => 1,
            Self::Ranges { ranges, .. } => ranges.pixel_count(),
            Self::Coverage(map) => map.cell_count(),
        }
    }
}

/// A configured strategy, ready to produce its index.
#[derive(Debug)]
pub enum IndexStrategy<'a, P: Pixelization + ?Sized> {
    Single(SingleResolutionIndex<'a, P>),
    Coverage(CoverageIndex<'a, P>),
}

impl<P: Pixelization + ?Sized> IndexStrategy<'_, P> {
    pub fn order(&self) -> u8 {
        match self {
            Self::Single(index) => index.order(),
            Self::Coverage(index) => index.order(),
        }
    }

    pub fn get_index(self) -> SkyIndexResult<IndexResult> {
        match self {
            Self::Single(index) => index.get_index(),
            Self::Coverage(index) => index.get_index(),
        }
    }
}

/// Creates index strategies over one pixelization with shared settings.
#[derive(Debug, Clone)]
pub struct IndexFactory<'a, P: Pixelization + ?Sized> {
    port: &'a P,
    config: IndexConfig,
}

impl<'a, P: Pixelization + ?Sized> IndexFactory<'a, P> {
    pub fn new(port: &'a P, config: IndexConfig) -> SkyIndexResult<Self> {
        config.validate()?;
        Ok(Self { port, config })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn create_index(&self, shape: Shape, scheme: IndexScheme) -> SkyIndexResult<IndexStrategy<'a, P>> {
        let strategy = match scheme {
            IndexScheme::Ring | IndexScheme::Nested => IndexStrategy::Single(SingleResolutionIndex::new(
                self.port,
                self.config.clone(),
                shape,
                scheme,
            )?),
            IndexScheme::Coverage => {
                IndexStrategy::Coverage(CoverageIndex::new(self.port, self.config.clone(), shape)?)
            }
        };
        tracing::debug!(%scheme, order = strategy.order(), "created index strategy");
        Ok(strategy)
    }

    /// Shorthand for [`create_index`](Self::create_index) followed by
    /// [`IndexStrategy::get_index`].
    pub fn index(&self, shape: Shape, scheme: IndexScheme) -> SkyIndexResult<IndexResult> {
        self.create_index(shape, scheme)?.get_index()
    }
}

/// Native-numbered pixels of the polygon's counter-clockwise interior,
/// built from its densified triangulation.
fn triangulated_ranges<P: Pixelization + ?Sized>(
    port: &P,
    order: u8,
    polygon: &Polygon,
    config: &IndexConfig,
) -> SkyIndexResult<PixelRangeSet> {
    let resampled = EdgeResampler::new(config.resample_step_arcmin)?.resample(polygon)?;
    let triangles = triangulate(&resampled)?;
    let mut ranges = PixelRangeSet::new();
    for triangle in &triangles {
        let v = triangle.unit_vectors();
        let part = port.query_triangle(order, &v[0], &v[1], &v[2], config.inclusive_factor)?;
        ranges = ranges.union(&part);
    }
    tracing::debug!(
        vertices = resampled.len(),
        triangles = triangles.len(),
        pixels = ranges.pixel_count(),
        "indexed triangulated polygon"
    );
    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::HealpixGrid;
    use crate::shape::SphericalPoint;

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("RING".parse::<IndexScheme>().unwrap(), IndexScheme::Ring);
        assert_eq!("nested".parse::<IndexScheme>().unwrap(), IndexScheme::Nested);
        assert_eq!(" moc ".parse::<IndexScheme>().unwrap(), IndexScheme::Coverage);
        assert_eq!("Coverage".parse::<IndexScheme>().unwrap(), IndexScheme::Coverage);
        assert!(matches!(
            "HTM".parse::<IndexScheme>(),
            Err(SkyIndexError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_factory_rejects_invalid_config() {
        let grid = HealpixGrid::new(5).unwrap();
        let config = IndexConfig::default().with_inclusive_factor(6);
        assert!(matches!(
            IndexFactory::new(&grid, config),
            Err(SkyIndexError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_factory_dispatch() {
        let grid = HealpixGrid::new(7).unwrap();
        let factory = IndexFactory::new(&grid, IndexConfig::default()).unwrap();
        let point: Shape = SphericalPoint::equatorial(10.0, 20.0).unwrap().into();

        let ring = factory.create_index(point.clone(), IndexScheme::Ring).unwrap();
        assert!(matches!(ring, IndexStrategy::Single(_)));
        assert_eq!(ring.order(), 7);

        let moc = factory.create_index(point.clone(), IndexScheme::Coverage).unwrap();
        assert!(matches!(moc, IndexStrategy::Coverage(_)));

        let result = factory.index(point, IndexScheme::Coverage).unwrap();
        assert!(matches!(result, IndexResult::Coverage(_)));
        assert_eq!(result.order(), 7);
        assert_eq!(result.pixel_count(), 1);
    }

    #[test]
    fn test_factory_with_trait_object() {
        let grid = HealpixGrid::new(5).unwrap();
        let port: &dyn Pixelization = &grid;
        let factory = IndexFactory::new(port, IndexConfig::default()).unwrap();
        let point: Shape = SphericalPoint::equatorial(10.0, 20.0).unwrap().into();
        let result = factory.create_index(point, IndexScheme::Ring).unwrap().get_index().unwrap();
        assert_eq!(
            result,
            IndexResult::Pixel {
                order: 5,
                scheme: Scheme::Ring,
                pixel: 4035
            }
        );
    }
}
