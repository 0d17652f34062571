use super::{triangulated_ranges, IndexResult};
use crate::config::IndexConfig;
use crate::coverage::CoverageMap;
use crate::errors::{PixelizationError, SkyIndexResult};
use crate::pixel::{PixelRangeSet, Pixelization, Scheme};
use crate::shape::Shape;

/// Builds a [`CoverageMap`] at the port's finest order.
///
/// Polygons are always densified and triangulated, convex or not, so the map
/// follows the lon/lat edges closely at fine orders. The config is validated
/// on construction.
#[derive(Debug)]
pub struct CoverageIndex<'a, P: Pixelization + ?Sized> {
    port: &'a P,
    config: IndexConfig,
    shape: Shape,
    order: u8,
}

impl<'a, P: Pixelization + ?Sized> CoverageIndex<'a, P> {
    pub fn new(port: &'a P, config: IndexConfig, shape: Shape) -> SkyIndexResult<Self> {
        config.validate()?;
        let order = port.max_supported_order();
        Ok(Self {
            port,
            config,
            shape,
            order,
        })
    }

    /// Builds the map at a coarser order than the port maximum.
    pub fn with_order(mut self, order: u8) -> SkyIndexResult<Self> {
        let max = self.port.max_supported_order();
        if order > max {
            return Err(PixelizationError::OrderOutOfRange { order, max }.into());
        }
        self.order = order;
        Ok(self)
    }

    pub fn order(&self) -> u8 {
        self.order
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn get_index(self) -> SkyIndexResult<IndexResult> {
        tracing::debug!(kind = %self.shape.kind(), order = self.order, "building coverage map");
        let native = self.port.native_scheme();
        let order = self.order;

        let (ranges, clockwise) = match &self.shape {
            Shape::Point(point) => {
                let pixel = self.port.angle_to_pixel(order, point.theta(), point.phi())?;
                (PixelRangeSet::from_pixels([pixel]), false)
            }
            Shape::Cone(cone) => {
                let ranges = self.port.query_disc(
                    order,
                    &cone.center().unit_vector(),
                    cone.radius(),
                    self.config.inclusive_factor,
                )?;
                (ranges, false)
            }
            Shape::Polygon(polygon) => (
                triangulated_ranges(self.port, order, polygon, &self.config)?,
                polygon.is_clockwise(),
            ),
        };

        let nested = self
            .port
            .convert_ranges(order, &ranges, native, Scheme::Nested)?;
        let map = CoverageMap::from_ranges(order, nested)?;
        if clockwise {
            tracing::debug!(order, "clockwise polygon, complementing coverage map");
            return Ok(IndexResult::Coverage(map.complement()));
        }
        Ok(IndexResult::Coverage(map))
    }
}
