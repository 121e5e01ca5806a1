//! Winds Aloft Decoder Library
//!
//! A Rust library for decoding winds and temperatures aloft (FD) forecast
//! bulletins into per-station, per-altitude wind and temperature forecasts.
//!
//! This library provides tools for:
//! - Locating the validity line, altitude header and data rows in a bulletin
//! - Deriving altitude column offsets from the header layout
//! - Decoding `DDSS[TT]` cells, including the 100 kt speed bias, light and
//!   variable winds and the temperature sign convention
//! - Reading saved bulletins and weather service product documents
//! - Graceful degradation of malformed cells with decoding statistics

pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod models;
pub mod source;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::DecoderConfig;
pub use decoder::{DecodeResult, DecodeStats, WindsAloftDecoder, decode_product};
pub use error::{Result, WindsAloftError};
pub use models::{
    AltitudeColumn, LocationRecord, ParsedProduct, ValidityInfo, WindDirection, WindTempCell,
};
pub use source::{FileProductSource, ForecastHorizon, ProductSource, RawProduct};
