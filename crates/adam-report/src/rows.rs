//! Flat tabular projection of resolved metadata.
//!
//! Every row has the same columns ([`EXPORT_COLUMNS`]). Three row kinds
//! exist: attribute rows describe the variable, term rows list one
//! controlled term, and a placeholder row stands in for a codelist that has
//! no terms.

use adam_model::{Codelist, ResolvedMetadata, Term, VariableDetail};

/// Column headers, in output order.
pub const EXPORT_COLUMNS: [&str; 11] = [
    "Dataset",
    "ADaMIGVersion",
    "Parameter",
    "Value",
    "CodelistID",
    "CodelistCode",
    "CodelistName",
    "ExtensibleYN",
    "TermCode",
    "TERM",
    "TermDecodedValue",
];

/// `Parameter` value of term and placeholder rows.
pub const CODELIST_TERM_PARAMETER: &str = "CodelistTerm";

/// `TERM` value of a placeholder row.
pub const NO_TERMS_PLACEHOLDER: &str = "(No terms found)";

const NOT_AVAILABLE: &str = "N/A";

/// Variable attributes exported as parameter/value rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeParameter {
    Label,
    DataType,
    Core,
    Notes,
    CodelistLinks,
}

impl AttributeParameter {
    /// Export order of attribute rows.
    pub const ORDER: [AttributeParameter; 5] = [
        AttributeParameter::Label,
        AttributeParameter::DataType,
        AttributeParameter::Core,
        AttributeParameter::Notes,
        AttributeParameter::CodelistLinks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeParameter::Label => "Label",
            AttributeParameter::DataType => "DataType",
            AttributeParameter::Core => "Core",
            AttributeParameter::Notes => "Notes",
            AttributeParameter::CodelistLinks => "CodelistLinks",
        }
    }

    fn value_of(&self, variable: &VariableDetail) -> String {
        match self {
            AttributeParameter::Label => or_na(variable.label.as_deref()),
            AttributeParameter::DataType => or_na(variable.data_type.as_deref()),
            AttributeParameter::Core => variable.core.as_str().to_string(),
            AttributeParameter::Notes => or_na(variable.description.as_deref()),
            AttributeParameter::CodelistLinks => variable.codelist_links.join(", "),
        }
    }
}

/// Columns shared by every row of one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableContext {
    pub dataset: String,
    pub guide_version: String,
}

/// Codelist columns of term and placeholder rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodelistContext {
    pub submission_id: String,
    pub concept_id: String,
    pub name: String,
    pub extensible_yn: &'static str,
}

impl From<&Codelist> for CodelistContext {
    fn from(codelist: &Codelist) -> Self {
        Self {
            submission_id: codelist.submission_id.clone(),
            concept_id: codelist.concept_id.clone(),
            name: codelist.name.clone(),
            extensible_yn: codelist.extensible_yn(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRow {
    pub variable: VariableContext,
    pub parameter: AttributeParameter,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRow {
    pub variable: VariableContext,
    pub codelist: CodelistContext,
    pub term: Term,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRow {
    pub variable: VariableContext,
    pub codelist: CodelistContext,
}

/// One exported row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportRow {
    Attribute(AttributeRow),
    Term(TermRow),
    Placeholder(PlaceholderRow),
}

impl ExportRow {
    pub fn is_term(&self) -> bool {
        matches!(self, ExportRow::Term(_))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ExportRow::Placeholder(_))
    }

    /// Field values in [`EXPORT_COLUMNS`] order.
    pub fn to_record(&self) -> [&str; 11] {
        match self {
            ExportRow::Attribute(row) => [
                row.variable.dataset.as_str(),
                row.variable.guide_version.as_str(),
                row.parameter.as_str(),
                row.value.as_str(),
                "",
                "",
                "",
                "",
                "",
                "",
                "",
            ],
            ExportRow::Term(row) => [
                row.variable.dataset.as_str(),
                row.variable.guide_version.as_str(),
                CODELIST_TERM_PARAMETER,
                "",
                row.codelist.submission_id.as_str(),
                row.codelist.concept_id.as_str(),
                row.codelist.name.as_str(),
                row.codelist.extensible_yn,
                row.term.concept_id.as_str(),
                row.term.code.as_str(),
                row.term.decoded_value.as_str(),
            ],
            ExportRow::Placeholder(row) => [
                row.variable.dataset.as_str(),
                row.variable.guide_version.as_str(),
                CODELIST_TERM_PARAMETER,
                "",
                row.codelist.submission_id.as_str(),
                row.codelist.concept_id.as_str(),
                row.codelist.name.as_str(),
                row.codelist.extensible_yn,
                "",
                NO_TERMS_PLACEHOLDER,
                "",
            ],
        }
    }
}

/// Flatten resolved metadata into export rows.
///
/// Attribute rows come first in [`AttributeParameter::ORDER`], then each
/// codelist in resolution order with its terms in code order.
pub fn export_rows(metadata: &ResolvedMetadata) -> Vec<ExportRow> {
    let variable = metadata.variable();
    let context = VariableContext {
        dataset: variable.dataset.clone(),
        guide_version: variable.guide_version.to_string(),
    };

    let mut rows: Vec<ExportRow> = AttributeParameter::ORDER
        .iter()
        .map(|parameter| {
            ExportRow::Attribute(AttributeRow {
                variable: context.clone(),
                parameter: *parameter,
                value: parameter.value_of(variable),
            })
        })
        .collect();

    for codelist in metadata.codelists() {
        let codelist_context = CodelistContext::from(codelist);
        if !codelist.has_terms() {
            rows.push(ExportRow::Placeholder(PlaceholderRow {
                variable: context.clone(),
                codelist: codelist_context,
            }));
            continue;
        }
        rows.extend(codelist.terms().iter().map(|term| {
            ExportRow::Term(TermRow {
                variable: context.clone(),
                codelist: codelist_context.clone(),
                term: term.clone(),
            })
        }));
    }
    rows
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}
