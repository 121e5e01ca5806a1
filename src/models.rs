//! Core data structures for decoded winds aloft products.
//!
//! Defines the validity window, altitude columns, decoded cells and the
//! aggregated product returned by the decoder. All values are created in a
//! single decoding pass and are read-only afterwards.

use crate::constants::encoding::LIGHT_AND_VARIABLE_DEGREES;
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Forecast time window and temperature sign threshold from the validity line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityInfo {
    /// Valid time as printed, `DDHHMM`
    pub valid: String,
    /// Start of the usage window as printed, `HHMM`
    pub for_use_from: String,
    /// End of the usage window as printed, `HHMM`
    pub for_use_to: String,
    /// Altitude above which temperatures are negative unless marked otherwise
    pub neg_above: u32,
}

impl ValidityInfo {
    /// Day of month of the valid time
    pub fn day(&self) -> Option<u32> {
        stamp_field(&self.valid, 0)
    }

    /// Hour of the valid time
    pub fn hour(&self) -> Option<u32> {
        stamp_field(&self.valid, 2)
    }

    /// Minute of the valid time
    pub fn minute(&self) -> Option<u32> {
        stamp_field(&self.valid, 4)
    }

    /// Resolve the valid time to a full UTC timestamp.
    ///
    /// The stamp carries no month or year, so the month of `reference`
    /// and its neighbours are tried and the candidate nearest to
    /// `reference` wins. This handles products issued late in a month
    /// that are valid early the next month.
    pub fn valid_at(&self, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let (day, hour, minute) = (self.day()?, self.hour()?, self.minute()?);
        let first = NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)?;

        [
            first.checked_sub_months(Months::new(1)),
            Some(first),
            first.checked_add_months(Months::new(1)),
        ]
        .into_iter()
        .flatten()
        .filter_map(|month| {
            month
                .with_day(day)?
                .and_hms_opt(hour, minute, 0)
                .map(|naive| naive.and_utc())
        })
        .min_by_key(|candidate| (*candidate - reference).num_seconds().abs())
    }
}

fn stamp_field(stamp: &str, start: usize) -> Option<u32> {
    stamp.get(start..start + 2)?.parse().ok()
}

/// One altitude column of the data table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltitudeColumn {
    /// Altitude as printed in the header
    pub altitude: u32,
    /// First byte of the column in a data row
    pub start_offset: usize,
    /// One past the last byte of the column in a data row
    pub end_offset: usize,
}

impl AltitudeColumn {
    /// Slice this column out of a data row.
    ///
    /// Rows that end before the column is complete yield an empty slice.
    pub fn slice<'a>(&self, row: &'a str) -> &'a str {
        row.get(self.start_offset..self.end_offset).unwrap_or("")
    }

    /// Column width in bytes
    pub fn width(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }
}

/// Decoded wind direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindDirection {
    /// Direction in degrees after removing the speed bias
    Degrees(i32),
    /// Light and variable winds, no dominant direction
    LightAndVariable,
    /// No wind data for this cell
    Missing,
}

impl WindDirection {
    /// Direction as a plain number: light and variable is `-1`, missing is `None`
    pub fn raw_degrees(&self) -> Option<i32> {
        match self {
            WindDirection::Degrees(degrees) => Some(*degrees),
            WindDirection::LightAndVariable => Some(LIGHT_AND_VARIABLE_DEGREES),
            WindDirection::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, WindDirection::Missing)
    }
}

/// Wind and temperature forecast for one location at one altitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindTempCell {
    pub direction: WindDirection,
    /// Speed in knots, `None` when the cell has no wind data
    pub speed_kts: Option<u32>,
    /// Temperature in degrees Celsius, `None` when not reported
    pub temp_c: Option<i32>,
    pub altitude: u32,
}

impl WindTempCell {
    /// Cell for an altitude with no data in the row
    pub fn missing(altitude: u32) -> Self {
        Self {
            direction: WindDirection::Missing,
            speed_kts: None,
            temp_c: Some(0),
            altitude,
        }
    }

    /// Whether the cell carries no wind data
    pub fn is_missing(&self) -> bool {
        self.direction.is_missing() && self.speed_kts.is_none()
    }
}

/// All decoded cells for one location, in header column order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub code: String,
    cells: Vec<WindTempCell>,
}

impl LocationRecord {
    pub(crate) fn new(code: impl Into<String>, cells: Vec<WindTempCell>) -> Self {
        Self {
            code: code.into(),
            cells,
        }
    }

    /// Cell for an altitude
    pub fn cell(&self, altitude: u32) -> Option<&WindTempCell> {
        self.cells.iter().find(|cell| cell.altitude == altitude)
    }

    /// Cells in header column order
    pub fn cells(&self) -> &[WindTempCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A fully decoded winds aloft product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedProduct {
    pub validity: ValidityInfo,
    /// Altitude columns in header order
    pub columns: Vec<AltitudeColumn>,
    /// Issuance time copied from the product metadata
    pub issuance_time: String,
    /// Decoded rows keyed by location code
    pub locations: BTreeMap<String, LocationRecord>,
}

impl ParsedProduct {
    /// Record for a location code
    pub fn location(&self, code: &str) -> Option<&LocationRecord> {
        self.locations.get(code)
    }

    /// Cell for a location code and altitude
    pub fn cell(&self, code: &str, altitude: u32) -> Option<&WindTempCell> {
        self.location(code)?.cell(altitude)
    }

    /// Altitudes in header order
    pub fn altitudes(&self) -> impl Iterator<Item = u32> + '_ {
        self.columns.iter().map(|column| column.altitude)
    }

    /// Location codes in sorted order
    pub fn location_codes(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    /// Issuance time parsed as RFC 3339, when it is in that form
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.issuance_time)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Valid time resolved against the issuance time
    pub fn valid_at(&self) -> Option<DateTime<Utc>> {
        self.validity.valid_at(self.issued_at()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn validity(valid: &str) -> ValidityInfo {
        ValidityInfo {
            valid: valid.to_string(),
            for_use_from: "1400".to_string(),
            for_use_to: "2100".to_string(),
            neg_above: 24000,
        }
    }

    #[test]
    fn test_stamp_fields() {
        let info = validity("191800");
        assert_eq!(info.day(), Some(19));
        assert_eq!(info.hour(), Some(18));
        assert_eq!(info.minute(), Some(0));
        assert_eq!(validity("19").hour(), None);
    }

    #[test]
    fn test_valid_at_same_month() {
        let reference = Utc.with_ymd_and_hms(2024, 3, 19, 13, 59, 0).unwrap();
        let valid = validity("191800").valid_at(reference).unwrap();
        assert_eq!(valid, Utc.with_ymd_and_hms(2024, 3, 19, 18, 0, 0).unwrap());
    }

    #[test]
    fn test_valid_at_rolls_into_next_month() {
        let reference = Utc.with_ymd_and_hms(2024, 1, 31, 20, 0, 0).unwrap();
        let valid = validity("010600").valid_at(reference).unwrap();
        assert_eq!(valid, Utc.with_ymd_and_hms(2024, 2, 1, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_valid_at_rolls_into_previous_month() {
        let reference = Utc.with_ymd_and_hms(2024, 3, 1, 1, 0, 0).unwrap();
        let valid = validity("291800").valid_at(reference).unwrap();
        assert_eq!(valid, Utc.with_ymd_and_hms(2024, 2, 29, 18, 0, 0).unwrap());
    }

    #[test]
    fn test_column_slice_guards_short_rows() {
        let column = AltitudeColumn {
            altitude: 9000,
            start_offset: 9,
            end_offset: 16,
        };
        assert_eq!(column.slice("ABC      2714+05"), "2714+05");
        assert_eq!(column.slice("ABC      27"), "");
        assert_eq!(column.slice("ABC"), "");
        assert_eq!(column.width(), 7);
    }

    #[test]
    fn test_raw_degrees() {
        assert_eq!(WindDirection::Degrees(230).raw_degrees(), Some(230));
        assert_eq!(WindDirection::LightAndVariable.raw_degrees(), Some(-1));
        assert_eq!(WindDirection::Missing.raw_degrees(), None);
    }

    #[test]
    fn test_missing_cell() {
        let cell = WindTempCell::missing(3000);
        assert!(cell.is_missing());
        assert_eq!(cell.temp_c, Some(0));
        assert_eq!(cell.altitude, 3000);
    }

    #[test]
    fn test_issued_at() {
        let product = ParsedProduct {
            validity: validity("191800"),
            columns: Vec::new(),
            issuance_time: "2024-03-19T13:59:00+00:00".to_string(),
            locations: BTreeMap::new(),
        };
        assert_eq!(
            product.issued_at(),
            Some(Utc.with_ymd_and_hms(2024, 3, 19, 13, 59, 0).unwrap())
        );
        assert_eq!(
            product.valid_at(),
            Some(Utc.with_ymd_and_hms(2024, 3, 19, 18, 0, 0).unwrap())
        );
    }
}
