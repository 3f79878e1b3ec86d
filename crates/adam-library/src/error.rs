//! Error types for CDISC Library lookups.

use adam_model::{CtStandard, GuideVersion, ModelError, TerminologyVersion};
use thiserror::Error;

/// Errors that can occur while resolving ADaM metadata.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LibraryError {
    /// No API key was configured.
    #[error("CDISC Library API key is required (set CDISC_API_KEY or pass --api-key)")]
    MissingCredential,

    /// Configuration value rejected before any request was made.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Network or HTTP-level failure.
    #[error("request to {path} failed: {message}")]
    TransportFailure { path: String, message: String },

    /// Body could not be read as the expected document.
    #[error("malformed response from {path}: {message}")]
    MalformedResponse { path: String, message: String },

    /// The registry returned no usable document for a stage that needs one.
    #[error("no usable data returned from {path}")]
    RegistryUnavailable { path: String },

    /// The terminology listing contains no dated package for the standard.
    #[error("no {standard} versions found")]
    NoVersionsFound { standard: CtStandard },

    /// No dataset structure in the guide declares the variable.
    #[error("variable {name} not found in any dataset structure for ADaMIG {version}")]
    VariableNotFound { name: String, version: GuideVersion },

    /// The terminology package has no codelist with this identifier.
    #[error("codelist {identifier} not found in {standard} version {date}", date = .version.date_string(), standard = .version.standard)]
    CodelistNotFound {
        identifier: String,
        version: TerminologyVersion,
    },

    /// A codelist could not be resolved and the strict policy forbids skipping it.
    #[error("codelist {identifier} ({standard}) could not be resolved: {reason}")]
    CodelistSkipped {
        identifier: String,
        standard: CtStandard,
        reason: String,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl LibraryError {
    /// Returns whether the failure came from the registry transport rather
    /// than from the content of a successful response.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::TransportFailure { .. }
                | Self::MalformedResponse { .. }
                | Self::RegistryUnavailable { .. }
        )
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, LibraryError>;
