//! Implementation-guide version handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// ADaMIG version in the hyphenated form used by registry identifiers.
///
/// Users commonly write `1.3`; the registry addresses it as `adamig-1-3`.
/// Construction rewrites every `.` separator to `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuideVersion(String);

impl GuideVersion {
    /// The guide version assumed when the caller does not supply one.
    pub const DEFAULT: &'static str = "1-3";

    pub fn new(raw: &str) -> Result<Self, ModelError> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        if !valid {
            return Err(ModelError::InvalidGuideVersion(raw.to_string()));
        }
        Ok(Self(trimmed.replace('.', "-")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Registry identifier of the guide, e.g. `adamig-1-3`.
    pub fn product_id(&self) -> String {
        format!("adamig-{}", self.0)
    }
}

impl Default for GuideVersion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for GuideVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GuideVersion {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
