//! Type-safe enumerations for CDISC Library metadata.
//!
//! These enums provide compile-time type safety for concepts that the
//! registry publishes as strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Controlled terminology namespace a codelist is published under.
///
/// The CDISC Library publishes ADaM CT and SDTM CT as separate package
/// series (`adamct-YYYY-MM-DD`, `sdtmct-YYYY-MM-DD`). ADaM variables may
/// reference codelists from either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtStandard {
    /// ADaM Controlled Terminology.
    Adamct,
    /// SDTM Controlled Terminology.
    Sdtmct,
}

impl CtStandard {
    /// All known terminology namespaces.
    pub const ALL: [CtStandard; 2] = [CtStandard::Adamct, CtStandard::Sdtmct];

    /// Returns the namespace as it appears in registry paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            CtStandard::Adamct => "adamct",
            CtStandard::Sdtmct => "sdtmct",
        }
    }

    /// Package identifier for a given publication date, e.g. `adamct-2024-03-29`.
    pub fn package_id(&self, date: chrono::NaiveDate) -> String {
        format!("{}-{}", self.as_str(), date.format("%Y-%m-%d"))
    }
}

impl fmt::Display for CtStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CtStandard {
    type Err = ModelError;

    /// Parse a namespace; registry paths always use lowercase, so matching is exact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adamct" => Ok(CtStandard::Adamct),
            "sdtmct" => Ok(CtStandard::Sdtmct),
            _ => Err(ModelError::UnknownStandard(s.to_string())),
        }
    }
}

/// Core status of a variable within its dataset structure.
///
/// SDTMIG uses Req/Exp/Perm; ADaMIG uses Req/Cond/Perm. Anything else the
/// registry returns (or a missing value) maps to [`CoreStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CoreStatus {
    /// Must be present in the dataset.
    Required,
    /// Expected when applicable.
    Expected,
    /// Optional.
    Permissible,
    /// Required when a stated condition holds (ADaM only).
    Conditional,
    /// Not published or not recognized.
    #[default]
    Unknown,
}

impl CoreStatus {
    /// Parse a registry value, falling back to [`CoreStatus::Unknown`].
    pub fn from_registry(value: Option<&str>) -> Self {
        value
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(CoreStatus::Unknown)
    }

    /// Returns the full name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoreStatus::Required => "Required",
            CoreStatus::Expected => "Expected",
            CoreStatus::Permissible => "Permissible",
            CoreStatus::Conditional => "Conditional",
            CoreStatus::Unknown => "N/A",
        }
    }
}

impl fmt::Display for CoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CoreStatus {
    type Err = String;

    /// Handles both short codes (Req, Exp, Perm, Cond) and full names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "REQ" | "REQUIRED" => Ok(CoreStatus::Required),
            "EXP" | "EXPECTED" => Ok(CoreStatus::Expected),
            "PERM" | "PERMISSIBLE" => Ok(CoreStatus::Permissible),
            "COND" | "CONDITIONAL" => Ok(CoreStatus::Conditional),
            _ => Err(format!("Unknown core status: {s}")),
        }
    }
}
