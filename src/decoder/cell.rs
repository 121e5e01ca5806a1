//! Wind and temperature cell decoding
//!
//! Each cell is a `DDSS[TT]` group: `DD` is the direction in tens of degrees,
//! `SS` the speed in knots and `TT` an optional temperature magnitude.
//! Speeds of 100 kt and more do not fit in `SS`, so the direction code is
//! raised by 50 and the speed lowered by 100. Direction code 99 means light
//! and variable. Temperatures are negative unless the altitude is at or below
//! the negative-above threshold and the cell carries a `+`.

use crate::constants::encoding::{
    DIRECTION_BIAS, FIELD_WIDTH, LIGHT_AND_VARIABLE, OVERFLOW_THRESHOLD, POSITIVE_MARKER,
    SPEED_BIAS, WIND_GROUP_LEN,
};
use crate::error::{Result, WindsAloftError};
use crate::models::{WindDirection, WindTempCell};

/// Decode one column slice of a data row.
///
/// A blank slice is not an error: the forecast simply has no data at that
/// altitude (for example below the station elevation) and a missing cell is
/// returned. Slices whose numeric fields are not digits are reported as
/// [`WindsAloftError::MalformedCell`].
pub fn decode_cell(entry: &str, altitude: u32, neg_above: u32) -> Result<WindTempCell> {
    let cell = entry.trim();
    if cell.is_empty() {
        return Ok(WindTempCell::missing(altitude));
    }
    if cell.len() < WIND_GROUP_LEN {
        return Err(WindsAloftError::malformed_cell(
            entry,
            format!("expected at least {WIND_GROUP_LEN} characters"),
        ));
    }

    let direction_code = two_digits(cell, 0)
        .ok_or_else(|| WindsAloftError::malformed_cell(entry, "direction is not numeric"))?;
    let speed_code = two_digits(cell, FIELD_WIDTH)
        .ok_or_else(|| WindsAloftError::malformed_cell(entry, "speed is not numeric"))?;

    let (direction, speed_kts) = decode_wind(direction_code, speed_code);

    let temp_c = if cell.len() > WIND_GROUP_LEN {
        let magnitude = two_digits(cell, cell.len() - FIELD_WIDTH)
            .ok_or_else(|| WindsAloftError::malformed_cell(entry, "temperature is not numeric"))?;
        let positive = altitude <= neg_above && cell.contains(POSITIVE_MARKER);
        let magnitude = magnitude as i32;
        Some(if positive { magnitude } else { -magnitude })
    } else {
        None
    };

    Ok(WindTempCell {
        direction,
        speed_kts: Some(speed_kts),
        temp_c,
        altitude,
    })
}

/// Decode a cell, degrading malformed content to a missing cell
pub fn decode_cell_or_missing(entry: &str, altitude: u32, neg_above: u32) -> WindTempCell {
    decode_cell(entry, altitude, neg_above).unwrap_or_else(|_| WindTempCell::missing(altitude))
}

/// Apply the speed bias and light-and-variable rules to raw codes
pub fn decode_wind(direction_code: u32, speed_code: u32) -> (WindDirection, u32) {
    if direction_code == LIGHT_AND_VARIABLE {
        return (WindDirection::LightAndVariable, speed_code);
    }
    if direction_code > OVERFLOW_THRESHOLD {
        let tens = direction_code as i32 - DIRECTION_BIAS;
        (WindDirection::Degrees(tens * 10), speed_code + SPEED_BIAS)
    } else {
        (WindDirection::Degrees(direction_code as i32 * 10), speed_code)
    }
}

fn two_digits(cell: &str, start: usize) -> Option<u32> {
    let field = cell.get(start..start + FIELD_WIDTH)?;
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
