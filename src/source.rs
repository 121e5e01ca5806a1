//! Upstream product sources
//!
//! The decoder performs no network I/O. Products reach it through a
//! [`ProductSource`], which returns the raw bulletin text and its issuance
//! time for a forecast horizon. This module also models the weather service
//! product documents so that saved API responses can be decoded directly.

use crate::constants::{PRODUCT_API_BASE, PRODUCT_LOCATION_PREFIX, PRODUCT_TYPE_PREFIX};
use crate::error::{Result, WindsAloftError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Forecast horizon of a winds aloft bulletin
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ForecastHorizon {
    /// 6 hour forecast (FD1)
    SixHour,
    /// 12 hour forecast (FD3)
    TwelveHour,
    /// 24 hour forecast (FD5)
    TwentyFourHour,
}

impl ForecastHorizon {
    pub const ALL: [ForecastHorizon; 3] = [
        ForecastHorizon::SixHour,
        ForecastHorizon::TwelveHour,
        ForecastHorizon::TwentyFourHour,
    ];

    /// Numeric code used in the product type and location identifiers
    pub fn product_code(&self) -> u8 {
        match self {
            ForecastHorizon::SixHour => 1,
            ForecastHorizon::TwelveHour => 3,
            ForecastHorizon::TwentyFourHour => 5,
        }
    }

    /// Forecast period in hours
    pub fn hours(&self) -> u32 {
        match self {
            ForecastHorizon::SixHour => 6,
            ForecastHorizon::TwelveHour => 12,
            ForecastHorizon::TwentyFourHour => 24,
        }
    }

    /// Product type identifier, e.g. `FD1`
    pub fn product_type(&self) -> String {
        format!("{}{}", PRODUCT_TYPE_PREFIX, self.product_code())
    }

    /// Issuing location identifier, e.g. `US1`
    pub fn location(&self) -> String {
        format!("{}{}", PRODUCT_LOCATION_PREFIX, self.product_code())
    }

    /// URL listing the issued products for this horizon, newest first
    pub fn listing_url(&self) -> String {
        format!(
            "{}/types/{}/locations/{}",
            PRODUCT_API_BASE,
            self.product_type(),
            self.location()
        )
    }

    /// URL of a single product document
    pub fn product_url(product_id: &str) -> String {
        format!("{}/{}", PRODUCT_API_BASE, product_id)
    }
}

impl fmt::Display for ForecastHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-hour", self.hours())
    }
}

/// Raw bulletin text together with its issuance time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProduct {
    pub product_text: String,
    pub issuance_time: String,
}

/// Anything that can supply the raw bulletin for a horizon
pub trait ProductSource {
    fn fetch(&self, horizon: ForecastHorizon) -> Result<RawProduct>;
}

/// One entry of a product listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListingEntry {
    pub id: String,
    #[serde(default, rename = "wmoCollectiveId")]
    pub collective_id: String,
    #[serde(default)]
    pub issuing_office: String,
    #[serde(default)]
    pub issuance_time: String,
    #[serde(default)]
    pub product_code: String,
    #[serde(default)]
    pub product_name: String,
}

/// Listing of issued products, as returned by the listing URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListing {
    #[serde(rename = "@graph", default)]
    pub entries: Vec<ProductListingEntry>,
}

impl ProductListing {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Id of the newest product in the listing
    pub fn latest_id(&self, horizon: ForecastHorizon) -> Result<&str> {
        self.entries
            .first()
            .map(|entry| entry.id.as_str())
            .ok_or_else(|| WindsAloftError::ProductUnavailable {
                horizon,
                reason: "product listing is empty".to_string(),
            })
    }
}

/// A single product document carrying the bulletin text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "wmoCollectiveId")]
    pub collective_id: String,
    #[serde(default)]
    pub issuing_office: String,
    pub issuance_time: String,
    #[serde(default)]
    pub product_code: String,
    #[serde(default)]
    pub product_name: String,
    pub product_text: String,
}

impl ProductDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<ProductDocument> for RawProduct {
    fn from(document: ProductDocument) -> Self {
        Self {
            product_text: document.product_text,
            issuance_time: document.issuance_time,
        }
    }
}

/// Read a saved product: either a product document (JSON) or the bare
/// bulletin text. Bare text takes the file modification time as its
/// issuance time.
pub fn read_product_file(path: &Path) -> Result<RawProduct> {
    let content = std::fs::read_to_string(path)?;

    if content.trim_start().starts_with('{') {
        debug!("Reading product document from {}", path.display());
        return Ok(ProductDocument::from_json(&content)?.into());
    }

    let issuance_time = std::fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map(|modified| DateTime::<Utc>::from(modified).to_rfc3339())
        .unwrap_or_default();

    debug!("Reading bulletin text from {}", path.display());
    Ok(RawProduct {
        product_text: content,
        issuance_time,
    })
}

/// Products saved on disk.
///
/// When the root is a directory the product for a horizon is looked up as
/// `FD1.json` or `FD1.txt` (`FD3`, `FD5` for the longer horizons). When the
/// root is a file it is returned for every horizon.
#[derive(Debug, Clone)]
pub struct FileProductSource {
    root: PathBuf,
}

impl FileProductSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn candidates(&self, horizon: ForecastHorizon) -> Vec<PathBuf> {
        let product_type = horizon.product_type();
        ["json", "txt"]
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", product_type, ext)))
            .collect()
    }
}

impl ProductSource for FileProductSource {
    fn fetch(&self, horizon: ForecastHorizon) -> Result<RawProduct> {
        if self.root.is_file() {
            return read_product_file(&self.root);
        }

        let path = self
            .candidates(horizon)
            .into_iter()
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| WindsAloftError::ProductUnavailable {
                horizon,
                reason: format!("no {} file in {}", horizon.product_type(), self.root.display()),
            })?;

        read_product_file(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const LISTING: &str = r#"{
        "@context": { "@version": "1.1", "@vocab": "https://api.weather.gov/ontology#" },
        "@graph": [
            {
                "@id": "https://api.weather.gov/products/0b1c",
                "id": "0b1c",
                "wmoCollectiveId": "FBUS31",
                "issuingOffice": "KWNO",
                "issuanceTime": "2024-03-19T13:59:00+00:00",
                "productCode": "FD1",
                "productName": "Winds Aloft Forecast"
            },
            { "id": "0a00", "issuanceTime": "2024-03-19T07:59:00+00:00" }
        ]
    }"#;

    #[test]
    fn test_horizon_identifiers() {
        let codes: Vec<u8> = ForecastHorizon::ALL.iter().map(|h| h.product_code()).collect();
        assert_eq!(codes, vec![1, 3, 5]);
        assert_eq!(ForecastHorizon::TwelveHour.product_type(), "FD3");
        assert_eq!(ForecastHorizon::TwentyFourHour.location(), "US5");
        assert_eq!(ForecastHorizon::SixHour.to_string(), "6-hour");
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            ForecastHorizon::SixHour.listing_url(),
            "https://api.weather.gov/products/types/FD1/locations/US1"
        );
        assert_eq!(
            ForecastHorizon::product_url("0b1c"),
            "https://api.weather.gov/products/0b1c"
        );
    }

    #[test]
    fn test_listing_latest_id() {
        let listing = ProductListing::from_json(LISTING).unwrap();
        assert_eq!(listing.entries.len(), 2);
        assert_eq!(listing.entries[0].collective_id, "FBUS31");
        assert_eq!(listing.latest_id(ForecastHorizon::SixHour).unwrap(), "0b1c");
    }

    #[test]
    fn test_empty_listing() {
        let listing = ProductListing::from_json(r#"{ "@graph": [] }"#).unwrap();
        assert!(matches!(
            listing.latest_id(ForecastHorizon::TwelveHour),
            Err(WindsAloftError::ProductUnavailable {
                horizon: ForecastHorizon::TwelveHour,
                ..
            })
        ));
    }

    #[test]
    fn test_product_document_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{ "id": "0b1c", "issuanceTime": "2024-03-19T13:59:00+00:00", "productText": "FT  3000\n" }}"#
        )
        .unwrap();

        let raw = read_product_file(temp_file.path()).unwrap();
        assert_eq!(raw.issuance_time, "2024-03-19T13:59:00+00:00");
        assert_eq!(raw.product_text, "FT  3000\n");
    }

    #[test]
    fn test_bare_text_file_uses_modification_time() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "FT  3000").unwrap();

        let raw = read_product_file(temp_file.path()).unwrap();
        assert_eq!(raw.product_text, "FT  3000\n");
        assert!(DateTime::parse_from_rfc3339(&raw.issuance_time).is_ok());
    }

    #[test]
    fn test_directory_source() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("FD3.txt"), "FT  3000\n").unwrap();

        let source = FileProductSource::new(dir.path());
        let raw = source.fetch(ForecastHorizon::TwelveHour).unwrap();
        assert_eq!(raw.product_text, "FT  3000\n");

        let missing = source.fetch(ForecastHorizon::SixHour);
        assert!(matches!(
            missing,
            Err(WindsAloftError::ProductUnavailable { .. })
        ));
    }

    #[test]
    fn test_invalid_document() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{ "id": "0b1c" }}"#).unwrap();

        let result = read_product_file(temp_file.path());
        assert!(matches!(result, Err(WindsAloftError::Json(_))));
    }
}
