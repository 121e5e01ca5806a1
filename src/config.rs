//! Configuration management and validation.
//!
//! Provides the decoder configuration with its defaults, builder-style
//! overrides and loading from a JSON file.

use crate::constants::{DEFAULT_LOCATION_WIDTH, DEFAULT_MAX_RECORDED_ANOMALIES};
use crate::error::{Result, WindsAloftError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Settings that control how a product is decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Width of the location code field at the start of each data row.
    /// Also seeds the column cursor when deriving altitude columns.
    pub location_width: usize,

    /// Keep a message for each degraded cell in the decode statistics
    pub record_anomalies: bool,

    /// Maximum number of anomaly messages kept
    pub max_recorded_anomalies: usize,

    /// Fail the whole decode on the first malformed cell
    pub strict: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            location_width: DEFAULT_LOCATION_WIDTH,
            record_anomalies: true,
            max_recorded_anomalies: DEFAULT_MAX_RECORDED_ANOMALIES,
            strict: false,
        }
    }
}

impl DecoderConfig {
    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        debug!("Loaded decoder configuration from {}", path.display());
        Ok(config)
    }

    /// Check that the configuration can be used for decoding
    pub fn validate(&self) -> Result<()> {
        if self.location_width == 0 {
            return Err(WindsAloftError::configuration(
                "location_width must be at least 1",
            ));
        }
        Ok(())
    }

    /// Use a different location code width
    pub fn with_location_width(mut self, width: usize) -> Self {
        self.location_width = width;
        self
    }

    /// Stop collecting per-cell anomaly messages
    pub fn without_anomaly_messages(mut self) -> Self {
        self.record_anomalies = false;
        self
    }

    /// Set the maximum number of anomaly messages kept
    pub fn with_max_recorded_anomalies(mut self, max: usize) -> Self {
        self.max_recorded_anomalies = max;
        self
    }

    /// Fail on malformed cells instead of degrading them
    pub fn with_strict(mut self) -> Self {
        self.strict = true;
        self
    }
}
