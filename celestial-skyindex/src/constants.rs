#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const PI: f64 = 3.141592653589793238462643;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const HALF_PI: f64 = 1.5707963267948966192313216;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const TWOPI: f64 = 6.283185307179586476925287;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_ARCMIN: f64 = 3437.746770784939252607889;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_ARCSEC: f64 = 206264.8062470963551564734;

#[allow(clippy::excessive_precision)]
pub const ARCSEC_TO_RAD: f64 = 4.848136811095359935899141e-6;

/// Triple products smaller than this are treated as exactly zero when
/// deciding the orientation of three points.
pub const ORIENTATION_EPSILON: f64 = 1e-15;

/// Deepest HEALPix order whose pixel count still fits a signed 64-bit id.
pub const HEALPIX_MAX_ORDER: u8 = 29;

/// Default edge densification step, in arcminutes.
pub const DEFAULT_RESAMPLE_STEP_ARCMIN: f64 = 10.0;

/// Default oversampling factor of inclusive pixel queries.
pub const DEFAULT_INCLUSIVE_FACTOR: u32 = 4;
