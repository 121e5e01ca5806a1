//! Error handling for winds aloft decoding operations.
//!
//! Structural problems with a product (missing header or validity line,
//! unparseable validity line) abort a decode. Cell-level problems are
//! reported through [`WindsAloftError::MalformedCell`] and are normally
//! absorbed by the decoder.

use crate::source::ForecastHorizon;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WindsAloftError {
    #[error(
        "Product text is missing required lines (altitude header found: {header_found}, validity line found: {validity_found}):\n{text}"
    )]
    MissingSection {
        header_found: bool,
        validity_found: bool,
        text: String,
    },

    #[error("Validity line does not match the expected layout: '{line}'")]
    InvalidValidityLine { line: String },

    #[error("Altitude label '{label}' is not a number in header '{header}'")]
    InvalidAltitudeLabel { label: String, header: String },

    #[error("Malformed cell '{cell}': {reason}")]
    MalformedCell { cell: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No {horizon} product available: {reason}")]
    ProductUnavailable {
        horizon: ForecastHorizon,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl WindsAloftError {
    /// Create a malformed cell error
    pub fn malformed_cell(cell: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCell {
            cell: cell.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error means the product text itself is structurally unusable
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::MissingSection { .. }
                | Self::InvalidValidityLine { .. }
                | Self::InvalidAltitudeLabel { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, WindsAloftError>;
