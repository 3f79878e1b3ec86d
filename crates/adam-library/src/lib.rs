//! CDISC Library client and ADaM metadata resolution engine.
//!
//! Resolution of one variable runs as a chain of dependent lookups:
//!
//! 1. [`locator`]: find the dataset structure declaring the variable
//! 2. [`variable`]: fetch the variable record and its codelist links
//! 3. [`terminology`]: discover the latest package of each CT standard
//! 4. [`codelist`]: resolve each codelist in that package and sort its terms
//!
//! [`MetadataResolver`] ties the steps together. The registry is reached
//! through the [`MetadataSource`] trait; [`RegistryClient`] is the HTTP
//! implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use adam_library::{LibraryConfig, MetadataResolver, RegistryClient};
//!
//! let config = LibraryConfig::new(std::env::var("CDISC_API_KEY")?)?;
//! let resolver = MetadataResolver::new(RegistryClient::new(config)?);
//! let metadata = resolver.resolve_str("TRT01P", "1.3")?;
//! println!("{} codelist(s)", metadata.codelists().len());
//! ```

pub mod api;
pub mod client;
pub mod codelist;
pub mod config;
pub mod engine;
pub mod error;
pub mod locator;
pub mod terminology;
pub mod variable;

pub use client::{MetadataSource, RegistryClient};
pub use codelist::{CodelistPolicy, ResolutionCache};
pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, LibraryConfig};
pub use engine::MetadataResolver;
pub use error::{LibraryError, Result};
