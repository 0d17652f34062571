//! Shapes that can be indexed.
//!
//! | Shape | Surface | Index result |
//! |-------|---------|--------------|
//! | [`SphericalPoint`] | no | a single pixel |
//! | [`Cone`] | yes | pixels of a disc |
//! | [`Polygon`] | yes | pixels of the enclosed region (or its complement when clockwise) |

mod cone;
mod point;
mod polygon;

pub use cone::Cone;
pub use point::SphericalPoint;
pub use polygon::Polygon;

use std::fmt;

use crate::frame::CoordinateFrame;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeKind {
    Point,
    Cone,
    Polygon,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "point",
            Self::Cone => "cone",
            Self::Polygon => "polygon",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    Point(SphericalPoint),
    Cone(Cone),
    Polygon(Polygon),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Point(_) => ShapeKind::Point,
            Self::Cone(_) => ShapeKind::Cone,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Points have no area; cones and polygons do.
    pub fn is_surface(&self) -> bool {
        !matches!(self, Self::Point(_))
    }

    pub fn frame(&self) -> CoordinateFrame {
        match self {
            Self::Point(p) => p.frame(),
            Self::Cone(c) => c.center().frame(),
            Self::Polygon(p) => p.frame(),
        }
    }
}

impl From<SphericalPoint> for Shape {
    fn from(point: SphericalPoint) -> Self {
        Self::Point(point)
    }
}

impl From<Cone> for Shape {
    fn from(cone: Cone) -> Self {
        Self::Cone(cone)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Self::Polygon(polygon)
    }
}
