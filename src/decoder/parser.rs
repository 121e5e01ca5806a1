//! Product decoder orchestration
//!
//! Drives the section extractor, the validity and header parsers and the
//! cell decoder across every data row to build a [`ParsedProduct`].

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::cell::decode_cell;
use super::extractor::extract_sections;
use super::header::parse_altitude_header_with_width;
use super::stats::{DecodeResult, DecodeStats};
use super::validity::parse_validity_line;
use crate::config::DecoderConfig;
use crate::error::Result;
use crate::models::{AltitudeColumn, LocationRecord, ParsedProduct, WindTempCell};
use crate::source::{ForecastHorizon, ProductSource, RawProduct};

/// Decoder for winds and temperatures aloft bulletins
///
/// Decoding is a pure transform over one text: the decoder holds only its
/// configuration and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct WindsAloftDecoder {
    config: DecoderConfig,
}

impl WindsAloftDecoder {
    /// Create a decoder with a validated configuration
    pub fn new(config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode product text issued at `issuance_time`
    pub fn decode(&self, product_text: &str, issuance_time: &str) -> Result<DecodeResult> {
        let sections = extract_sections(product_text)?;
        let validity = parse_validity_line(sections.validity_line)?;
        let columns =
            parse_altitude_header_with_width(sections.header_line, self.config.location_width)?;

        let mut stats = DecodeStats::new();
        let mut locations = BTreeMap::new();

        for row in sections.rows {
            stats.rows_seen += 1;

            let Some(code) = self.location_code(row) else {
                stats.rows_skipped += 1;
                if !row.trim().is_empty() {
                    warn!("Skipping row without a location code: '{}'", row);
                    self.record(&mut stats, format!("Skipped row '{}'", row));
                }
                continue;
            };

            let cells = self.decode_row(code, row, &columns, validity.neg_above, &mut stats)?;

            if locations
                .insert(code.to_string(), LocationRecord::new(code, cells))
                .is_some()
            {
                // Later rows replace earlier ones for the same location
                stats.duplicate_locations += 1;
                warn!("Duplicate location {}, keeping the later row", code);
                self.record(&mut stats, format!("Duplicate location {}", code));
            }
            stats.rows_decoded += 1;
        }

        info!(
            "Decoded {} locations across {} altitudes ({} cells missing, {} malformed)",
            locations.len(),
            columns.len(),
            stats.cells_missing,
            stats.cells_malformed
        );

        Ok(DecodeResult {
            product: ParsedProduct {
                validity,
                columns,
                issuance_time: issuance_time.to_string(),
                locations,
            },
            stats,
        })
    }

    /// Decode a product delivered by a [`ProductSource`]
    pub fn decode_raw(&self, raw: &RawProduct) -> Result<DecodeResult> {
        self.decode(&raw.product_text, &raw.issuance_time)
    }

    /// Fetch the product for a horizon and decode it
    pub fn fetch_and_decode<S>(&self, source: &S, horizon: ForecastHorizon) -> Result<DecodeResult>
    where
        S: ProductSource + ?Sized,
    {
        let raw = source.fetch(horizon)?;
        debug!(
            "Fetched {} product issued {} ({} bytes)",
            horizon,
            raw.issuance_time,
            raw.product_text.len()
        );
        self.decode_raw(&raw)
    }

    fn location_code<'a>(&self, row: &'a str) -> Option<&'a str> {
        let code = row.get(..self.config.location_width)?;
        if code.trim().is_empty() {
            None
        } else {
            Some(code)
        }
    }

    fn decode_row(
        &self,
        code: &str,
        row: &str,
        columns: &[AltitudeColumn],
        neg_above: u32,
        stats: &mut DecodeStats,
    ) -> Result<Vec<WindTempCell>> {
        let mut cells = Vec::with_capacity(columns.len());

        for column in columns {
            let entry = column.slice(row);
            let cell = match decode_cell(entry, column.altitude, neg_above) {
                Ok(cell) => {
                    stats.cells_decoded += 1;
                    cell
                }
                Err(e) if self.config.strict => return Err(e),
                Err(e) => {
                    stats.cells_malformed += 1;
                    warn!("{} at {}: {}", code, column.altitude, e);
                    self.record(stats, format!("{} at {}: {}", code, column.altitude, e));
                    WindTempCell::missing(column.altitude)
                }
            };
            if cell.is_missing() {
                stats.cells_missing += 1;
            }
            cells.push(cell);
        }

        Ok(cells)
    }

    fn record(&self, stats: &mut DecodeStats, message: String) {
        if self.config.record_anomalies && stats.errors.len() < self.config.max_recorded_anomalies
        {
            stats.errors.push(message);
        }
    }
}

/// Decode product text with the default configuration
pub fn decode_product(product_text: &str, issuance_time: &str) -> Result<ParsedProduct> {
    WindsAloftDecoder::default()
        .decode(product_text, issuance_time)
        .map(|result| result.product)
}
