//! Test fixtures for the decoder
//!
//! Provides a representative FD1 bulletin and small helpers shared by the
//! decoder test modules.

use crate::models::{WindDirection, WindTempCell};


/// Six hour bulletin with blank, short, malformed and trailer rows
pub const FD1_PRODUCT: &str = include_str!("../../../tests/fixtures/fd1us1.txt");

pub const ISSUANCE_TIME: &str = "2024-03-19T13:59:00+00:00";

/// Build an expected cell
pub fn cell(direction: i32, speed: u32, temp: Option<i32>, altitude: u32) -> WindTempCell {
    WindTempCell {
        direction: WindDirection::Degrees(direction),
        speed_kts: Some(speed),
        temp_c: temp,
        altitude,
    }
}
