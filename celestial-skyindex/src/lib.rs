//! Hierarchical sky-pixel indexing of points, cones and polygons.
//!
//! Given a shape on the celestial sphere, computes the HEALPix pixels that
//! cover it: a single pixel for a point, pixel ranges for a cone or polygon at
//! one order (RING or NESTED numbering), or a multi-resolution coverage map
//! (MOC). Polygons are handled with spherical geometry on unit vectors:
//! orientation and convexity tests, edge densification and ear-cutting
//! triangulation. A clockwise polygon stands for everything outside it.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`frame`] | [`CoordinateFrame`]: equatorial, geocentric and canonical spherical angles |
//! | [`shape`] | [`SphericalPoint`], [`Cone`], [`Polygon`], [`Shape`] |
//! | [`geometry`] | Orientation, convexity, [`EdgeResampler`], [`triangulate`](geometry::triangulate) |
//! | [`resolution`] | Order selection from the shape's feature size |
//! | [`pixel`] | [`Pixelization`] trait, [`HealpixGrid`], [`PixelRangeSet`] |
//! | [`coverage`] | [`CoverageCell`], [`CoverageMap`] |
//! | [`index`] | [`IndexFactory`], [`IndexStrategy`], [`IndexResult`] |
//!
//! # Quick Start
//!
//! ```
//! use celestial_skyindex::{
//!     Cone, HealpixGrid, IndexConfig, IndexFactory, IndexResult, IndexScheme, SphericalPoint,
//! };
//!
//! let grid = HealpixGrid::new(12).unwrap();
//! let factory = IndexFactory::new(&grid, IndexConfig::default()).unwrap();
//!
//! let center = SphericalPoint::equatorial(83.633, -5.375).unwrap();
//! let cone = Cone::from_degrees(center, 0.5).unwrap();
//!
//! match factory.index(cone.into(), IndexScheme::Nested).unwrap() {
//!     IndexResult::Ranges { order, ranges, .. } => {
//!         assert!(order <= 12);
//!         assert!(!ranges.is_empty());
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! # Logging
//!
//! Strategy construction, triangulation and complement steps emit
//! [`tracing`] events at `debug` and `trace` level. Install a subscriber to
//! see them.
//!
//! # Features
//!
//! - **`serde`**: `Serialize`/`Deserialize` for shapes, frames, results,
//!   coverage maps and [`IndexConfig`].

pub mod config;
pub mod constants;
pub mod coverage;
pub mod errors;
pub mod frame;
pub mod geometry;
pub mod index;
pub mod pixel;
pub mod resolution;
pub mod shape;
pub mod vector;

pub use config::IndexConfig;
pub use coverage::{CoverageCell, CoverageMap};
pub use errors::{PixelizationError, PixelizationResult, SkyIndexError, SkyIndexResult};
pub use frame::CoordinateFrame;
pub use geometry::EdgeResampler;
pub use index::{CoverageIndex, IndexFactory, IndexResult, IndexScheme, IndexStrategy, SingleResolutionIndex};
pub use pixel::{HealpixGrid, PixelRangeSet, Pixelization, Scheme};
pub use shape::{Cone, Polygon, Shape, ShapeKind, SphericalPoint};
pub use vector::Vector3;
