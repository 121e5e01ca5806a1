//! Altitude header parsing
//!
//! Column widths in the data table are not uniform: the higher altitudes use
//! wider cells once temperatures lose their sign. Each column therefore ends
//! where its header label ends and starts one past the end of the previous
//! column.

use crate::constants::{DEFAULT_LOCATION_WIDTH, HEADER_MARKER};
use crate::error::{Result, WindsAloftError};
use crate::models::AltitudeColumn;
use tracing::debug;

/// Derive altitude columns from a header line such as
/// `FT  3000    6000    9000   12000   18000   24000  30000  34000  39000`
pub fn parse_altitude_header(header: &str) -> Result<Vec<AltitudeColumn>> {
    parse_altitude_header_with_width(header, DEFAULT_LOCATION_WIDTH)
}

/// Derive altitude columns with a custom location code width
pub fn parse_altitude_header_with_width(
    header: &str,
    location_width: usize,
) -> Result<Vec<AltitudeColumn>> {
    let mut columns = Vec::new();
    let mut last_end = location_width;
    let mut token_start = 0;

    for token in header.split(' ') {
        let offset = token_start;
        token_start += token.len() + 1;

        // Single characters are layout artifacts, not labels
        if token.len() <= 1 || token == HEADER_MARKER {
            continue;
        }

        let altitude = token
            .parse::<u32>()
            .map_err(|_| WindsAloftError::InvalidAltitudeLabel {
                label: token.to_string(),
                header: header.to_string(),
            })?;

        let end_offset = offset + token.len();
        columns.push(AltitudeColumn {
            altitude,
            start_offset: last_end + 1,
            end_offset,
        });
        last_end = end_offset;
    }

    debug!("Derived {} altitude columns from header", columns.len());
    Ok(columns)
}
