//! CDISC Library API response types.
//!
//! Only the fields the resolver reads are modelled. Everything is optional or
//! defaulted: the registry omits empty collections rather than sending `[]`.

use serde::{Deserialize, Deserializer};

/// A HAL-style hyperlink.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub href: Option<String>,
}

/// `GET /mdr/products/Terminology`
#[derive(Debug, Clone, Deserialize)]
pub struct TerminologyProduct {
    #[serde(rename = "_links")]
    pub links: TerminologyProductLinks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TerminologyProductLinks {
    pub packages: Vec<Link>,
}

/// `GET /mdr/adam/adamig-{version}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationGuide {
    pub data_structures: Vec<DataStructure>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStructure {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub analysis_variables: Vec<AnalysisVariable>,
    #[serde(default)]
    pub analysis_variable_sets: Vec<AnalysisVariableSet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisVariableSet {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub analysis_variables: Vec<AnalysisVariable>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisVariable {
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /mdr/adam/adamig-{version}/datastructures/{dataset}/variables/{name}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub simple_datatype: Option<String>,
    #[serde(default)]
    pub core: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "_links")]
    pub links: VariableLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariableLinks {
    #[serde(default)]
    pub codelist: Vec<Link>,
}

/// `GET /mdr/ct/packages/{standard}-{date}`
#[derive(Debug, Clone, Deserialize)]
pub struct CtPackage {
    pub codelists: Vec<PackageCodelist>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCodelist {
    #[serde(default, deserialize_with = "null_as_default")]
    pub concept_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub submission_value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub extensible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub terms: Vec<PackageTerm>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageTerm {
    #[serde(default, deserialize_with = "null_as_default")]
    pub concept_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub submission_value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferred_term: String,
}

/// Treats an explicit `null` like a missing field.
///
/// One malformed entry must not make the whole package unreadable.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `true`, `"true"`, `"Yes"`, and their negatives.
///
/// CT packages publish `extensible` as a string.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        Some(BoolOrString::Bool(value)) => Ok(value),
        Some(BoolOrString::Text(text)) => {
            Ok(matches!(text.trim().to_lowercase().as_str(), "true" | "yes" | "y"))
        }
        None => Ok(false),
    }
}
