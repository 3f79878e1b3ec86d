//! Controlled Terminology (CT) model for resolved codelists.
//!
//! A codelist is resolved against one dated terminology package. Two kinds of
//! identifiers appear on it:
//!
//! - **Concept ID**: the NCI C-code (e.g. `C81223`), which variable records
//!   link to.
//! - **Submission value**: the short name used in datasets (e.g. `DTYPE`).
//!
//! Terms carry the same pair plus a decoded (preferred) value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::CtStandard;

/// A codelist link extracted from a variable record.
///
/// Identity is the identifier, compared case-insensitively; see
/// [`CodelistReference::dedup_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodelistReference {
    /// Terminology namespace the codelist is published under.
    pub standard: CtStandard,

    /// Canonical concept identifier (`C` followed by digits).
    pub identifier: String,

    /// The hyperlink the reference was parsed from.
    pub source_href: String,
}

impl CodelistReference {
    pub fn dedup_key(&self) -> String {
        self.identifier.to_uppercase()
    }
}

/// The latest published package date of a terminology standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminologyVersion {
    pub standard: CtStandard,
    pub version_date: NaiveDate,
}

impl TerminologyVersion {
    /// Package identifier, e.g. `sdtmct-2024-03-29`.
    pub fn package_id(&self) -> String {
        self.standard.package_id(self.version_date)
    }

    /// The date in `YYYY-MM-DD` form.
    pub fn date_string(&self) -> String {
        self.version_date.format("%Y-%m-%d").to_string()
    }
}

/// A single controlled term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// NCI concept code of the term (e.g. "C25473").
    pub concept_id: String,

    /// CDISC submission value, the value that appears in datasets.
    pub code: String,

    /// NCI preferred term.
    pub decoded_value: String,
}

/// A codelist resolved from a dated terminology package.
///
/// Terms are kept in ascending order of [`Term::code`]; the constructor sorts
/// them, so the order returned by the registry never leaks into output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Codelist {
    /// Codelist submission value (e.g. "DTYPE").
    pub submission_id: String,

    /// Codelist concept identifier (e.g. "C81223").
    pub concept_id: String,

    /// Human-readable name.
    pub name: String,

    /// Whether sponsors may extend the codelist with their own terms.
    pub extensible: bool,

    pub standard: CtStandard,

    pub version_date: NaiveDate,

    terms: Vec<Term>,
}

impl Codelist {
    pub fn new(
        submission_id: String,
        concept_id: String,
        name: String,
        extensible: bool,
        version: TerminologyVersion,
        mut terms: Vec<Term>,
    ) -> Self {
        // Stable sort: duplicate codes keep registry order among themselves.
        terms.sort_by(|a, b| a.code.cmp(&b.code));
        Self {
            submission_id,
            concept_id,
            name,
            extensible,
            standard: version.standard,
            version_date: version.version_date,
            terms,
        }
    }

    /// Terms in ascending code order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn has_terms(&self) -> bool {
        !self.terms.is_empty()
    }

    /// "Yes"/"No" rendering used by reports and exports.
    pub fn extensible_yn(&self) -> &'static str {
        if self.extensible { "Yes" } else { "No" }
    }

    pub fn version(&self) -> TerminologyVersion {
        TerminologyVersion {
            standard: self.standard,
            version_date: self.version_date,
        }
    }
}
