/// Default pixels-to-centimeter factor for UV captures.
pub const DEFAULT_UV_PIXELS_TO_CM: f64 = 0.046;

/// Default pixels-to-centimeter factor for stained captures.
pub const DEFAULT_STAIN_PIXELS_TO_CM: f64 = 0.048;

/// Spots closer than this (in primary-frame pixels) are the same spot.
pub const DEFAULT_PIXEL_TOLERANCE: f64 = 2.0;

/// Components closer than this (in centimeters) are the same component.
pub const DEFAULT_DISTANCE_TOLERANCE_CM: f64 = 0.1;

/// Decimal places kept for distances in centimeters.
pub const DISTANCE_DECIMALS: usize = 1;

/// Decimal places kept for Rf.
pub const RF_DECIMALS: usize = 2;

/// Decimal places kept for CV.
pub const CV_DECIMALS: usize = 1;

/// Slack added to inclusive tolerance comparisons so that values already
/// rounded to a decimal grid compare the way they read.
pub const TOLERANCE_EPSILON: f64 = 1e-9;

/// Minimum plate count to fan the batch out with Rayon.
pub const PARALLEL_PLATE_THRESHOLD: usize = 16;
