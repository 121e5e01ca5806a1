//! Product text section extraction
//!
//! Locates the altitude header line and the validity line inside free-form
//! product text and hands back the rows that follow the header.

use crate::constants::{HEADER_MARKER, VALIDITY_MARKERS, VALIDITY_PREFIX};
use crate::error::{Result, WindsAloftError};
use tracing::debug;

/// The three regions of a winds aloft product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSections<'a> {
    pub validity_line: &'a str,
    pub header_line: &'a str,
    /// Every line after the header line, blank lines included
    pub rows: Vec<&'a str>,
}

/// Whether a line is the altitude header line
pub fn is_header_line(line: &str) -> bool {
    line.starts_with(HEADER_MARKER)
}

/// Whether a line is the validity line
pub fn is_validity_line(line: &str) -> bool {
    line.starts_with(VALIDITY_PREFIX) && VALIDITY_MARKERS.iter().all(|m| line.contains(m))
}

/// Split product text into its validity line, header line and data rows.
///
/// The last matching line wins for both the header and the validity line,
/// so remark lines earlier in the bulletin never shadow the real table.
pub fn extract_sections(product_text: &str) -> Result<ProductSections<'_>> {
    let lines: Vec<&str> = product_text.lines().collect();

    let mut header_index = None;
    let mut validity_index = None;
    for (index, line) in lines.iter().enumerate() {
        if is_header_line(line) {
            header_index = Some(index);
        }
        if is_validity_line(line) {
            validity_index = Some(index);
        }
    }

    let (Some(header_index), Some(validity_index)) = (header_index, validity_index) else {
        return Err(WindsAloftError::MissingSection {
            header_found: header_index.is_some(),
            validity_found: validity_index.is_some(),
            text: product_text.to_string(),
        });
    };

    debug!(
        "Found validity line at {} and altitude header at {} of {} lines",
        validity_index,
        header_index,
        lines.len()
    );

    Ok(ProductSections {
        validity_line: lines[validity_index],
        header_line: lines[header_index],
        rows: lines[header_index + 1..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sections() {
        let text = "000\nFBUS31 KWNO 191359\nFD1US1\nDATA BASED ON 191200Z\n\
                    VALID 191800Z   FOR USE 1400-2100Z. TEMPS NEG ABV 24000\n\n\
                    FT  3000    6000\nBOS 2118 2127+03\nBDL      2127+04\n";

        let sections = extract_sections(text).unwrap();
        assert_eq!(
            sections.validity_line,
            "VALID 191800Z   FOR USE 1400-2100Z. TEMPS NEG ABV 24000"
        );
        assert_eq!(sections.header_line, "FT  3000    6000");
        assert_eq!(sections.rows, vec!["BOS 2118 2127+03", "BDL      2127+04"]);
    }

    #[test]
    fn test_last_matching_lines_win() {
        let text = "FT REMARKS LINE\nVALID 010000Z FOR USE 0000-0600Z TEMP NEG ABV 24000\n\
                    VALID 191800Z FOR USE 1400-2100Z. TEMPS NEG ABV 24000\nFT  3000\nBOS 2118";

        let sections = extract_sections(text).unwrap();
        assert!(sections.validity_line.starts_with("VALID 191800Z"));
        assert_eq!(sections.header_line, "FT  3000");
        assert_eq!(sections.rows, vec!["BOS 2118"]);
    }

    #[test]
    fn test_missing_header_line() {
        let text = "VALID 191800Z FOR USE 1400-2100Z. TEMPS NEG ABV 24000\nBOS 2118";

        let error = extract_sections(text).unwrap_err();
        assert!(error.is_format_error());
        match error {
            WindsAloftError::MissingSection {
                header_found,
                validity_found,
                text: raw,
            } => {
                assert!(!header_found);
                assert!(validity_found);
                assert_eq!(raw, text);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validity_line_requires_markers() {
        assert!(is_validity_line(
            "VALID 191800Z FOR USE 1400-2100Z. TEMPS NEG ABV 24000"
        ));
        assert!(!is_validity_line("VALID 191800Z FOR USE 1400-2100Z"));
        assert!(!is_validity_line(" VALID 191800Z TEMPS NEG ABV 24000"));

        let result = extract_sections("FT  3000\nVALID 191800Z FOR USE 1400-2100Z\n");
        assert!(matches!(
            result,
            Err(WindsAloftError::MissingSection {
                header_found: true,
                validity_found: false,
                ..
            })
        ));
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "VALID 191800Z FOR USE 1400-2100Z. TEMPS NEG ABV 24000\r\nFT  3000\r\nBOS 2118\r\n";

        let sections = extract_sections(text).unwrap();
        assert_eq!(sections.header_line, "FT  3000");
        assert_eq!(sections.rows, vec!["BOS 2118"]);
    }
}
