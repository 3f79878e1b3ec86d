//! Codelist resolution against the latest terminology packages.
//!
//! References are deduplicated by identifier, each standard's latest version
//! is discovered once per run, and each package document is fetched once per
//! run. Failures affect only the codelists they concern unless the
//! [`CodelistPolicy::Strict`] policy is selected.

use std::collections::{BTreeMap, HashSet};

use adam_model::{Codelist, CodelistReference, CtStandard, Term, TerminologyVersion};
use tracing::{info, warn};

use crate::api::{CtPackage, PackageCodelist};
use crate::client::{MetadataSource, fetch_as};
use crate::error::{LibraryError, Result};
use crate::terminology::latest_terminology_version;

/// How codelist failures affect the resolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodelistPolicy {
    /// Skip the failing codelist with a warning and keep going.
    #[default]
    Lenient,
    /// Abort the run on the first codelist that cannot be resolved.
    Strict,
}

/// Lookups memoized for the duration of one resolution run.
///
/// Outcomes are cached whether they succeeded or failed, so a failing
/// standard or package is requested at most once per run. Never share an
/// instance between runs: "latest" changes when the registry publishes.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    versions: BTreeMap<CtStandard, std::result::Result<TerminologyVersion, String>>,
    packages: BTreeMap<String, Option<CtPackage>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest version of `standard`, discovered on first use.
    pub fn version<S>(
        &mut self,
        source: &S,
        standard: CtStandard,
    ) -> std::result::Result<TerminologyVersion, String>
    where
        S: MetadataSource + ?Sized,
    {
        self.versions
            .entry(standard)
            .or_insert_with(|| {
                latest_terminology_version(source, standard).map_err(|err| err.to_string())
            })
            .clone()
    }

    fn package<S>(&mut self, source: &S, version: &TerminologyVersion) -> Option<&CtPackage>
    where
        S: MetadataSource + ?Sized,
    {
        self.packages
            .entry(version.package_id())
            .or_insert_with(|| fetch_as(source, &package_path(version)))
            .as_ref()
    }
}

/// Registry path of a dated terminology package.
pub fn package_path(version: &TerminologyVersion) -> String {
    format!("/mdr/ct/packages/{}", version.package_id())
}

/// Keep the first reference for each identifier (case-insensitive).
pub fn dedup_references(references: &[CodelistReference]) -> Vec<CodelistReference> {
    let mut seen = HashSet::new();
    references
        .iter()
        .filter(|reference| seen.insert(reference.dedup_key()))
        .cloned()
        .collect()
}

/// Resolve codelist references into codelists with sorted terms.
///
/// Output follows the order of first occurrence in `references`.
pub fn resolve_codelists<S>(
    source: &S,
    references: &[CodelistReference],
    policy: CodelistPolicy,
    cache: &mut ResolutionCache,
) -> Result<Vec<Codelist>>
where
    S: MetadataSource + ?Sized,
{
    let unique = dedup_references(references);
    if unique.is_empty() {
        info!("No codelist references found for this variable");
        return Ok(Vec::new());
    }
    let summary: Vec<String> = unique
        .iter()
        .map(|r| format!("{} ({})", r.identifier, r.standard))
        .collect();
    info!("Found codelist references: {}", summary.join(", "));

    let mut resolved = Vec::with_capacity(unique.len());
    for reference in &unique {
        match resolve_codelist(source, reference, cache) {
            Ok(codelist) => resolved.push(codelist),
            Err(err) if policy == CodelistPolicy::Lenient => {
                warn!("Skipping codelist {}: {}", reference.identifier, err);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(resolved)
}

/// Resolve one reference using the run cache.
pub fn resolve_codelist<S>(
    source: &S,
    reference: &CodelistReference,
    cache: &mut ResolutionCache,
) -> Result<Codelist>
where
    S: MetadataSource + ?Sized,
{
    let version = cache.version(source, reference.standard).map_err(|reason| {
        LibraryError::CodelistSkipped {
            identifier: reference.identifier.clone(),
            standard: reference.standard,
            reason: format!("could not fetch latest {} version: {reason}", reference.standard),
        }
    })?;

    info!(
        "Fetching terms for codelist {} ({} version {})",
        reference.identifier,
        reference.standard,
        version.date_string()
    );
    let package = cache
        .package(source, &version)
        .ok_or_else(|| LibraryError::CodelistSkipped {
            identifier: reference.identifier.clone(),
            standard: reference.standard,
            reason: format!("package {} is unavailable", version.package_id()),
        })?;

    let found = find_codelist(package, &reference.identifier).ok_or_else(|| {
        LibraryError::CodelistNotFound {
            identifier: reference.identifier.clone(),
            version,
        }
    })?;

    let codelist = normalize_codelist(found, version);
    info!(
        "Fetched {} terms for {} ({} from {})",
        codelist.terms().len(),
        codelist.submission_id,
        codelist.concept_id,
        version.package_id()
    );
    Ok(codelist)
}

/// Match on concept ID first, then fall back to submission value.
pub fn find_codelist<'a>(package: &'a CtPackage, identifier: &str) -> Option<&'a PackageCodelist> {
    if let Some(found) = package
        .codelists
        .iter()
        .find(|c| c.concept_id.eq_ignore_ascii_case(identifier))
    {
        return Some(found);
    }

    let fallback = package
        .codelists
        .iter()
        .find(|c| c.submission_value.eq_ignore_ascii_case(identifier));
    if fallback.is_some() {
        info!("Note: matched codelist {} using submissionValue", identifier);
    }
    fallback
}

fn normalize_codelist(codelist: &PackageCodelist, version: TerminologyVersion) -> Codelist {
    let terms = codelist
        .terms
        .iter()
        .map(|term| Term {
            concept_id: term.concept_id.clone(),
            code: term.submission_value.clone(),
            decoded_value: term.preferred_term.clone(),
        })
        .collect();
    Codelist::new(
        codelist.submission_value.clone(),
        codelist.concept_id.clone(),
        codelist.name.clone(),
        codelist.extensible,
        version,
        terms,
    )
}
