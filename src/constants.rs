//! Application constants for the winds aloft decoder
//!
//! This module contains the fixed markers, encoding constants and service
//! locations used throughout the decoder.

// =============================================================================
// Product Layout Markers
// =============================================================================

/// Token that starts the altitude header line
pub const HEADER_MARKER: &str = "FT";

/// Prefix of the validity line
pub const VALIDITY_PREFIX: &str = "VALID";

/// Substrings that must also appear on the validity line
pub const VALIDITY_MARKERS: &[&str] = &["TEMP", "NEG"];

/// Width of the location code field that precedes every data column
pub const DEFAULT_LOCATION_WIDTH: usize = 3;

/// Number of stored anomaly messages before further ones are dropped
pub const DEFAULT_MAX_RECORDED_ANOMALIES: usize = 100;

// =============================================================================
// Cell Encoding
// =============================================================================

/// Cell encoding constants for the `DDSS[TT]` wind/temperature groups
pub mod encoding {
    /// Direction codes above this value carry a +100 kt speed bias
    pub const OVERFLOW_THRESHOLD: u32 = 40;

    /// Amount added to the direction code when the speed is biased
    pub const DIRECTION_BIAS: i32 = 50;

    /// Amount added to the speed when the direction code is biased
    pub const SPEED_BIAS: u32 = 100;

    /// Direction code for light and variable winds
    pub const LIGHT_AND_VARIABLE: u32 = 99;

    /// Raw degree value reported for light and variable winds
    pub const LIGHT_AND_VARIABLE_DEGREES: i32 = -1;

    /// Width of the direction and speed subfields
    pub const FIELD_WIDTH: usize = 2;

    /// Minimum length of a cell that carries wind data
    pub const WIND_GROUP_LEN: usize = 4;

    /// Marker for positive temperatures at or below the negative-above threshold
    pub const POSITIVE_MARKER: char = '+';
}

// =============================================================================
// Weather Service Endpoints
// =============================================================================

/// Base URL of the weather service product API
pub const PRODUCT_API_BASE: &str = "https://api.weather.gov/products";

/// Product type prefix for winds and temperatures aloft
pub const PRODUCT_TYPE_PREFIX: &str = "FD";

/// Issuing location prefix for the contiguous US bulletins
pub const PRODUCT_LOCATION_PREFIX: &str = "US";
