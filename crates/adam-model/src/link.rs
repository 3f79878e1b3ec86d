//! Strict parser for codelist hyperlinks.
//!
//! Variable records link to their codelists with paths such as
//! `/mdr/root/ct/sdtmct/codelists/C66781`. The last segment is the codelist
//! concept identifier and the segment three positions from the end is the
//! terminology namespace.

use thiserror::Error;

use crate::ct::CodelistReference;
use crate::enums::CtStandard;

/// Minimum number of path segments: `<standard>/codelists/<id>`.
const MIN_SEGMENTS: usize = 3;

/// Why a codelist hyperlink could not be turned into a reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodelistLinkError {
    #[error("codelist link '{href}' has {found} path segment(s), expected at least 3")]
    TooFewSegments { href: String, found: usize },

    #[error("codelist link '{href}' ends in '{identifier}', which is not a C-code")]
    InvalidIdentifier { href: String, identifier: String },

    #[error("codelist link '{href}' names unknown terminology standard '{standard}'")]
    UnknownStandard { href: String, standard: String },
}

/// Parse a codelist hyperlink into a [`CodelistReference`].
///
/// Validates segment count before indexing, then checks the identifier
/// pattern (`C` followed by one or more ASCII digits) and the namespace.
pub fn parse_codelist_link(href: &str) -> Result<CodelistReference, CodelistLinkError> {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < MIN_SEGMENTS {
        return Err(CodelistLinkError::TooFewSegments {
            href: href.to_string(),
            found: segments.len(),
        });
    }

    let identifier = segments[segments.len() - 1];
    if !is_concept_id(identifier) {
        return Err(CodelistLinkError::InvalidIdentifier {
            href: href.to_string(),
            identifier: identifier.to_string(),
        });
    }

    let namespace = segments[segments.len() - 3];
    let standard: CtStandard =
        namespace
            .parse()
            .map_err(|_| CodelistLinkError::UnknownStandard {
                href: href.to_string(),
                standard: namespace.to_string(),
            })?;

    Ok(CodelistReference {
        standard,
        identifier: identifier.to_string(),
        source_href: href.to_string(),
    })
}

/// `C` followed by at least one ASCII digit, nothing else.
pub fn is_concept_id(value: &str) -> bool {
    value
        .strip_prefix('C')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_sdtmct_link() {
        let reference = parse_codelist_link("/mdr/root/ct/sdtmct/codelists/C66781").unwrap();
        assert_eq!(reference.standard, CtStandard::Sdtmct);
        assert_eq!(reference.identifier, "C66781");
        assert_eq!(reference.source_href, "/mdr/root/ct/sdtmct/codelists/C66781");
    }

    #[test]
    fn test_parses_absolute_url_with_trailing_slash() {
        let reference =
            parse_codelist_link("https://library.cdisc.org/api/mdr/root/ct/adamct/codelists/C81223/")
                .unwrap();
        assert_eq!(reference.standard, CtStandard::Adamct);
        assert_eq!(reference.identifier, "C81223");
    }

    #[test]
    fn test_rejects_non_c_code_identifier() {
        let err = parse_codelist_link("/mdr/root/ct/adamct/codelists/DTYPE").unwrap_err();
        assert!(matches!(err, CodelistLinkError::InvalidIdentifier { ref identifier, .. } if identifier == "DTYPE"));
        assert!(parse_codelist_link("/mdr/root/ct/adamct/codelists/C").is_err());
        assert!(parse_codelist_link("/mdr/root/ct/adamct/codelists/C12a").is_err());
        assert!(parse_codelist_link("/mdr/root/ct/adamct/codelists/c12345").is_err());
    }

    #[test]
    fn test_rejects_unknown_standard() {
        let err = parse_codelist_link("/mdr/root/ct/sendct/codelists/C12345").unwrap_err();
        assert!(matches!(err, CodelistLinkError::UnknownStandard { ref standard, .. } if standard == "sendct"));
    }

    #[test]
    fn test_rejects_short_links() {
        let err = parse_codelist_link("/C12345").unwrap_err();
        assert_eq!(
            err,
            CodelistLinkError::TooFewSegments {
                href: "/C12345".to_string(),
                found: 1
            }
        );
        assert!(parse_codelist_link("").is_err());
    }
}
