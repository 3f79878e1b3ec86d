//! Top-level resolution: variable name + guide version to [`ResolvedMetadata`].

use adam_model::{CtStandard, GuideVersion, ResolvedMetadata, TerminologyVersion};
use tracing::info_span;

use crate::client::MetadataSource;
use crate::codelist::{CodelistPolicy, ResolutionCache, resolve_codelists};
use crate::error::Result;
use crate::locator::locate_dataset;
use crate::terminology::latest_terminology_version;
use crate::variable::fetch_variable_detail;

/// Resolves ADaM variables against a metadata source.
///
/// Each call to [`MetadataResolver::resolve`] is an independent run with its
/// own cache; nothing is carried over between calls.
pub struct MetadataResolver<S> {
    source: S,
    policy: CodelistPolicy,
}

impl<S: MetadataSource> MetadataResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            policy: CodelistPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: CodelistPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve `variable` in the given guide version.
    ///
    /// Dataset and variable-record failures abort the run. Codelist failures
    /// follow the configured [`CodelistPolicy`].
    pub fn resolve(&self, variable: &str, version: &GuideVersion) -> Result<ResolvedMetadata> {
        let span = info_span!("resolve", variable = %variable, adamig = %version);
        let _guard = span.enter();

        let reference = locate_dataset(&self.source, variable, version)?;
        let detail = fetch_variable_detail(&self.source, &reference)?;

        let mut cache = ResolutionCache::new();
        let codelists = resolve_codelists(
            &self.source,
            &detail.codelist_references,
            self.policy,
            &mut cache,
        )?;

        Ok(ResolvedMetadata::new(detail, codelists))
    }

    /// Parse the guide version and resolve.
    pub fn resolve_str(&self, variable: &str, version: &str) -> Result<ResolvedMetadata> {
        let version = GuideVersion::new(version)?;
        self.resolve(variable, &version)
    }

    /// Latest published package of a terminology standard.
    pub fn latest_terminology_version(&self, standard: CtStandard) -> Result<TerminologyVersion> {
        latest_terminology_version(&self.source, standard)
    }
}
