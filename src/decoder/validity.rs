//! Validity line parsing
//!
//! The validity line states when the forecast is valid, the window it may be
//! used in, and the altitude above which temperatures are negative:
//!
//! ```text
//! VALID 191800Z   FOR USE 1400-2100Z. TEMPS NEG ABV 24000
//! ```

use crate::error::{Result, WindsAloftError};
use crate::models::ValidityInfo;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static VALIDITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^VALID\s+(\d{6})Z\s+FOR USE\s+(\d{4})-(\d{4})Z.*\D(\d{4,6})\s*$")
        .expect("validity pattern is valid")
});

/// Parse the validity line into its time window and negative-above threshold
pub fn parse_validity_line(line: &str) -> Result<ValidityInfo> {
    let invalid = || WindsAloftError::InvalidValidityLine {
        line: line.to_string(),
    };

    let captures = VALIDITY_PATTERN.captures(line).ok_or_else(invalid)?;
    let group = |index: usize| captures.get(index).map(|m| m.as_str());

    let (Some(valid), Some(from), Some(to), Some(neg_above)) =
        (group(1), group(2), group(3), group(4))
    else {
        return Err(invalid());
    };
    let neg_above = neg_above.parse::<u32>().map_err(|_| invalid())?;

    debug!(
        "Validity: valid={} use={}-{} neg_above={}",
        valid, from, to, neg_above
    );

    Ok(ValidityInfo {
        valid: valid.to_string(),
        for_use_from: from.to_string(),
        for_use_to: to.to_string(),
        neg_above,
    })
}
