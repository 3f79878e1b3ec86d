//! Data model for ADaM variable metadata resolved from the CDISC Library.
//!
//! The types here are plain values: they carry no I/O and are shared by the
//! resolution engine (`adam-library`), the exporters (`adam-report`), and any
//! downstream consumer of [`ResolvedMetadata`].
//!
//! # Module Organization
//!
//! - [`enums`]: Terminology standards and core status
//! - [`guide`]: Implementation-guide version normalization
//! - [`link`]: Strict parser for codelist hyperlinks
//! - [`ct`]: Codelists, terms, and terminology versions
//! - [`variable`]: Variable references, details, and the resolved aggregate

pub mod ct;
pub mod enums;
pub mod error;
pub mod guide;
pub mod link;
pub mod variable;

pub use ct::{Codelist, CodelistReference, Term, TerminologyVersion};
pub use enums::{CoreStatus, CtStandard};
pub use error::{ModelError, Result};
pub use guide::GuideVersion;
pub use link::{CodelistLinkError, parse_codelist_link};
pub use variable::{ResolvedMetadata, VariableDetail, VariableReference};
