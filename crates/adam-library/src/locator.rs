//! Dataset structure lookup for ADaM variables.

use adam_model::{GuideVersion, VariableReference};
use tracing::{info, warn};

use crate::api::{AnalysisVariable, DataStructure, ImplementationGuide};
use crate::client::{MetadataSource, fetch_as};
use crate::error::{LibraryError, Result};

/// Registry path of an ADaMIG structure tree.
pub fn guide_path(version: &GuideVersion) -> String {
    format!("/mdr/adam/{}", version.product_id())
}

/// Determine which dataset structure declares `variable` in the given guide.
///
/// Structures are scanned in registry order. Within a structure, variables
/// declared directly on it are checked before those in its variable sets.
pub fn locate_dataset<S>(
    source: &S,
    variable: &str,
    version: &GuideVersion,
) -> Result<VariableReference>
where
    S: MetadataSource + ?Sized,
{
    let path = guide_path(version);
    info!(
        "Fetching ADaMIG structure for version {} to find dataset for {}",
        version, variable
    );
    let guide: ImplementationGuide = fetch_as(source, &path)
        .ok_or_else(|| LibraryError::RegistryUnavailable { path: path.clone() })?;

    find_in_structures(&guide.data_structures, variable, version).ok_or_else(|| {
        LibraryError::VariableNotFound {
            name: variable.to_string(),
            version: version.clone(),
        }
    })
}

/// Scan parsed structures; exposed for callers that already hold a guide.
pub fn find_in_structures(
    structures: &[DataStructure],
    variable: &str,
    version: &GuideVersion,
) -> Option<VariableReference> {
    for structure in structures {
        let Some(structure_name) = structure.name.as_deref() else {
            warn!("Skipping unnamed data structure in ADaMIG {}", version);
            continue;
        };

        let grouped = structure
            .analysis_variable_sets
            .iter()
            .flat_map(|set| set.analysis_variables.iter());
        let found = structure
            .analysis_variables
            .iter()
            .chain(grouped)
            .find_map(|candidate| matching_name(candidate, variable));

        if let Some(name) = found {
            info!(
                "Variable {} found in dataset structure: {}",
                variable, structure_name
            );
            return Some(VariableReference {
                name: name.to_string(),
                dataset_structure: Some(structure_name.to_string()),
                guide_version: version.clone(),
            });
        }
    }
    None
}

fn matching_name<'a>(candidate: &'a AnalysisVariable, wanted: &str) -> Option<&'a str> {
    candidate
        .name
        .as_deref()
        .filter(|name| name.eq_ignore_ascii_case(wanted))
}
