//! Winds aloft product decoder
//!
//! The decoder turns the fixed-width text of a winds and temperatures aloft
//! bulletin into a [`ParsedProduct`](crate::models::ParsedProduct).
//!
//! ## Architecture
//!
//! - [`extractor`] - locates the validity line, the altitude header and the data rows
//! - [`validity`] - parses the validity window and negative-above threshold
//! - [`header`] - derives altitude column offsets from the header line
//! - [`cell`] - decodes individual `DDSS[TT]` cells
//! - [`parser`] - drives the stages across every row
//! - [`stats`] - decoding statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use winds_aloft::decoder::decode_product;
//!
//! let text = "VALID 191800Z   FOR USE 1400-2100Z. TEMPS NEG ABV 24000\n\
//!             FT  3000    6000\n\
//!             BOS 2815 2925-06\n";
//!
//! let product = decode_product(text, "2024-03-19T13:59:00+00:00")?;
//! let cell = product.cell("BOS", 6000).unwrap();
//! assert_eq!(cell.speed_kts, Some(25));
//! assert_eq!(cell.temp_c, Some(-6));
//! # Ok::<(), winds_aloft::WindsAloftError>(())
//! ```

pub mod cell;
pub mod extractor;
pub mod header;
pub mod parser;
pub mod stats;
pub mod validity;

#[cfg(test)]
mod tests;

pub use cell::{decode_cell, decode_cell_or_missing};
pub use extractor::{ProductSections, extract_sections};
pub use header::{parse_altitude_header, parse_altitude_header_with_width};
pub use parser::{WindsAloftDecoder, decode_product};
pub use stats::{DecodeResult, DecodeStats};
pub use validity::parse_validity_line;
