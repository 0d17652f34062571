//! Error types for sky indexing.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`InvalidShape`](SkyIndexError::InvalidShape) | shape constructors, triangulation of degenerate polygons |
//! | [`UnsupportedScheme`](SkyIndexError::UnsupportedScheme) | scheme parsing, strategy construction |
//! | [`Pixelization`](SkyIndexError::Pixelization) | any failure reported by the pixelization backend |
//! | [`InvalidConfig`](SkyIndexError::InvalidConfig) | [`IndexConfig::validate`](crate::IndexConfig::validate) |
//!
//! Nothing is retried or swallowed: the pixelization math is deterministic, so
//! a backend failure is returned to the caller unchanged.

use thiserror::Error;

pub type SkyIndexResult<T> = Result<T, SkyIndexError>;

pub type PixelizationResult<T> = Result<T, PixelizationError>;

#[derive(Debug, Error)]
pub enum SkyIndexError {
    #[error("Invalid shape: {message}")]
    InvalidShape { message: String },

    #[error("Unsupported scheme: {message}")]
    UnsupportedScheme { message: String },

    #[error("Pixelization failure: {source}")]
    Pixelization {
        #[from]
        source: PixelizationError,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl SkyIndexError {
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::InvalidShape {
            message: message.into(),
        }
    }

    pub fn unsupported_scheme(message: impl Into<String>) -> Self {
        Self::UnsupportedScheme {
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Failures reported by a [`Pixelization`](crate::pixel::Pixelization) backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PixelizationError {
    #[error("Order {order} exceeds the maximum supported order {max}")]
    OrderOutOfRange { order: u8, max: u8 },

    #[error("Pixel {pixel} out of range at order {order} (npix = {npix})")]
    PixelOutOfRange { order: u8, pixel: u64, npix: u64 },

    #[error("Invalid angle: {message}")]
    InvalidAngle { message: String },

    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },
}

impl PixelizationError {
    pub fn invalid_angle(message: impl Into<String>) -> Self {
        Self::InvalidAngle {
            message: message.into(),
        }
    }

    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shape_message() {
        let err = SkyIndexError::invalid_shape("polygon needs at least 3 points");
        assert_eq!(
            err.to_string(),
            "Invalid shape: polygon needs at least 3 points"
        );
    }

    #[test]
    fn test_pixelization_error_propagates_unchanged() {
        let source = PixelizationError::OrderOutOfRange { order: 31, max: 29 };
        let err: SkyIndexError = source.clone().into();
        match err {
            SkyIndexError::Pixelization { source: inner } => assert_eq!(inner, source),
            other => panic!("Expected Pixelization, got {other:?}"),
        }
    }

    #[test]
    fn test_pixel_out_of_range_message() {
        let err = PixelizationError::PixelOutOfRange {
            order: 0,
            pixel: 12,
            npix: 12,
        };
        assert!(err.to_string().contains("Pixel 12 out of range at order 0"));
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<SkyIndexError>();
        _assert_sync::<SkyIndexError>();
    }
}
