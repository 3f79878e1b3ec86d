//! Variable record lookup.

use adam_model::{
    CodelistReference, CoreStatus, GuideVersion, VariableDetail, VariableReference,
    parse_codelist_link,
};
use tracing::{info, warn};

use crate::api::VariableRecord;
use crate::client::{MetadataSource, fetch_as};
use crate::error::{LibraryError, Result};

/// Registry path of one variable record.
pub fn variable_path(version: &GuideVersion, dataset: &str, variable: &str) -> String {
    format!(
        "/mdr/adam/{}/datastructures/{}/variables/{}",
        version.product_id(),
        dataset,
        variable
    )
}

/// Fetch the descriptive record of a located variable.
///
/// Codelist links that do not parse into a valid reference are dropped with a
/// warning; they stay visible in [`VariableDetail::codelist_links`].
pub fn fetch_variable_detail<S>(source: &S, reference: &VariableReference) -> Result<VariableDetail>
where
    S: MetadataSource + ?Sized,
{
    let dataset = reference.dataset_structure.as_deref().ok_or_else(|| {
        LibraryError::VariableNotFound {
            name: reference.name.clone(),
            version: reference.guide_version.clone(),
        }
    })?;
    let version = &reference.guide_version;

    info!(
        "Fetching details for {}.{} (ADaMIG {})",
        dataset, reference.name, version
    );
    let path = variable_path(version, dataset, &reference.name);
    let record: VariableRecord = fetch_as(source, &path)
        .ok_or_else(|| LibraryError::RegistryUnavailable { path: path.clone() })?;

    Ok(detail_from_record(record, reference, dataset))
}

fn detail_from_record(
    record: VariableRecord,
    reference: &VariableReference,
    dataset: &str,
) -> VariableDetail {
    let codelist_links: Vec<String> = record
        .links
        .codelist
        .into_iter()
        .filter_map(|link| link.href)
        .filter(|href| !href.trim().is_empty())
        .collect();
    let codelist_references = extract_codelist_references(&codelist_links);

    VariableDetail {
        name: record.name.unwrap_or_else(|| reference.name.clone()),
        label: record.label,
        data_type: record.simple_datatype,
        core: CoreStatus::from_registry(record.core.as_deref()),
        description: record.description,
        dataset: dataset.to_string(),
        guide_version: reference.guide_version.clone(),
        codelist_links,
        codelist_references,
    }
}

/// Parse every link, keeping valid references in order.
pub fn extract_codelist_references(links: &[String]) -> Vec<CodelistReference> {
    links
        .iter()
        .filter_map(|href| match parse_codelist_link(href) {
            Ok(reference) => Some(reference),
            Err(err) => {
                warn!("Dropping codelist link: {err}");
                None
            }
        })
        .collect()
}
