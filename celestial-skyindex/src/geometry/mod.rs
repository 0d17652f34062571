//! Spherical polygon geometry: orientation, edge densification and
//! triangulation.

pub mod orientation;
pub mod resample;
pub mod triangulate;

pub use orientation::{is_clockwise, is_clockwise_triple, is_convex, point_in_triangle};
pub use resample::EdgeResampler;
pub use triangulate::triangulate;
