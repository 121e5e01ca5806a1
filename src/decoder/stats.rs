//! Decoding statistics and result structures
//!
//! Tracks how many rows and cells were decoded, degraded or skipped so that
//! callers can judge the quality of a product without re-scanning it.

use crate::models::ParsedProduct;
use serde::{Deserialize, Serialize};

/// Decoded product with its statistics
#[derive(Debug, Clone)]
pub struct DecodeResult {
    pub product: ParsedProduct,
    pub stats: DecodeStats,
}

/// Counters collected while decoding one product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeStats {
    /// Lines after the altitude header
    pub rows_seen: usize,

    /// Rows that produced a location record
    pub rows_decoded: usize,

    /// Blank or too-short rows that were skipped
    pub rows_skipped: usize,

    /// Cells that decoded cleanly, including blank ones
    pub cells_decoded: usize,

    /// Cells with no wind data, whether blank or degraded
    pub cells_missing: usize,

    /// Cells whose content could not be decoded
    pub cells_malformed: usize,

    /// Rows that replaced an earlier row for the same location
    pub duplicate_locations: usize,

    /// Messages describing degraded cells and skipped rows
    pub errors: Vec<String>,
}

impl DecodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total cells produced
    pub fn total_cells(&self) -> usize {
        self.cells_decoded + self.cells_malformed
    }

    /// Percentage of cells that decoded without being malformed
    pub fn success_rate(&self) -> f64 {
        let total = self.total_cells();
        if total == 0 {
            0.0
        } else {
            (self.cells_decoded as f64 / total as f64) * 100.0
        }
    }

    /// Whether any cell was degraded
    pub fn has_anomalies(&self) -> bool {
        self.cells_malformed > 0 || self.duplicate_locations > 0
    }
}
