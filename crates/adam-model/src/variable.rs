//! ADaM variable references, details, and the resolved aggregate.

use serde::Serialize;

use crate::ct::{Codelist, CodelistReference};
use crate::enums::CoreStatus;
use crate::guide::GuideVersion;

/// Where a variable lives: guide version, dataset structure, and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VariableReference {
    /// Variable name with the registry's casing.
    pub name: String,

    /// Owning dataset structure (e.g. "ADSL"), if located.
    pub dataset_structure: Option<String>,

    pub guide_version: GuideVersion,
}

/// Descriptive attributes of one ADaM variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableDetail {
    pub name: String,
    pub label: Option<String>,
    /// Simple data type (e.g. "Char", "Num").
    pub data_type: Option<String>,
    pub core: CoreStatus,
    /// CDISC notes published for the variable.
    pub description: Option<String>,
    pub dataset: String,
    pub guide_version: GuideVersion,
    /// Every codelist hyperlink on the record, in registry order.
    pub codelist_links: Vec<String>,
    /// Links that parsed into valid references, in registry order.
    pub codelist_references: Vec<CodelistReference>,
}

impl VariableDetail {
    /// `DATASET.VARIABLE` display name.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.dataset, self.name)
    }
}

/// The terminal result of one resolution run.
///
/// Constructed once and never mutated; exporters only read from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMetadata {
    variable: VariableDetail,
    codelists: Vec<Codelist>,
}

impl ResolvedMetadata {
    pub fn new(variable: VariableDetail, codelists: Vec<Codelist>) -> Self {
        Self {
            variable,
            codelists,
        }
    }

    pub fn variable(&self) -> &VariableDetail {
        &self.variable
    }

    /// Codelists in resolution order.
    pub fn codelists(&self) -> &[Codelist] {
        &self.codelists
    }

    /// Total number of terms across all codelists.
    pub fn term_count(&self) -> usize {
        self.codelists.iter().map(|c| c.terms().len()).sum()
    }
}
