use super::{triangulated_ranges, IndexResult, IndexScheme};
use crate::config::IndexConfig;
use crate::errors::{PixelizationError, SkyIndexError, SkyIndexResult};
use crate::pixel::{PixelRangeSet, Pixelization, Scheme};
use crate::resolution::select_order;
use crate::shape::{Polygon, Shape};

/// Builds a RING or NESTED index at one order.
///
/// The order defaults to the one [`select_order`] picks for the shape and
/// can be overridden with [`with_order`](Self::with_order). The config is
/// validated on construction.
#[derive(Debug)]
pub struct SingleResolutionIndex<'a, P: Pixelization + ?Sized> {
    port: &'a P,
    config: IndexConfig,
    shape: Shape,
    scheme: Scheme,
    order: u8,
}

impl<'a, P: Pixelization + ?Sized> SingleResolutionIndex<'a, P> {
    pub fn new(port: &'a P, config: IndexConfig, shape: Shape, scheme: IndexScheme) -> SkyIndexResult<Self> {
        config.validate()?;
        let scheme = scheme.numbering().ok_or_else(|| {
            SkyIndexError::unsupported_scheme(format!(
                "{scheme} is multi-resolution; use a coverage index"
            ))
        })?;
        let order = select_order(port, &shape);
        Ok(Self {
            port,
            config,
            shape,
            scheme,
            order,
        })
    }

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

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn get_index(self) -> SkyIndexResult<IndexResult> {
        let native = self.port.native_scheme();
        tracing::debug!(
            kind = %self.shape.kind(),
            scheme = %self.scheme,
            order = self.order,
            "building single-resolution index"
        );

        let (ranges, clockwise) = match &self.shape {
            Shape::Point(point) => {
                let pixel = self.port.angle_to_pixel(self.order, point.theta(), point.phi())?;
                let pixel = self
                    .port
                    .convert_numbering(self.order, pixel, native, self.scheme)?;
                return Ok(IndexResult::Pixel {
                    order: self.order,
                    scheme: self.scheme,
                    pixel,
                });
            }
            Shape::Cone(cone) => {
                let ranges = self.port.query_disc(
                    self.order,
                    &cone.center().unit_vector(),
                    cone.radius(),
                    self.config.inclusive_factor,
                )?;
                (ranges, false)
            }
            Shape::Polygon(polygon) => (self.polygon_ranges(polygon)?, polygon.is_clockwise()),
        };

        // Complement after renumbering so only the traced interior is converted.
        let mut ranges = self
            .port
            .convert_ranges(self.order, &ranges, native, self.scheme)?;
        if clockwise {
            tracing::debug!(order = self.order, "clockwise polygon, indexing the complement");
            ranges = ranges.complement(self.port.pixel_count(self.order));
        }
        Ok(IndexResult::Ranges {
            order: self.order,
            scheme: self.scheme,
            ranges,
        })
    }

    /// Native-numbered pixels of the region the polygon traces, taken
    /// counter-clockwise.
    fn polygon_ranges(&self, polygon: &Polygon) -> SkyIndexResult<PixelRangeSet> {
        if !polygon.is_clockwise() && polygon.is_convex() {
            match self.port.query_polygon(
                self.order,
                &polygon.unit_vectors(),
                self.config.inclusive_factor,
            ) {
                Ok(ranges) => return Ok(ranges),
                Err(PixelizationError::InvalidQuery { message }) => {
                    tracing::debug!(%message, "direct polygon query refused, triangulating");
                }
                Err(err) => return Err(err.into()),
            }
        }
        triangulated_ranges(self.port, self.order, polygon, &self.config)
    }
}
