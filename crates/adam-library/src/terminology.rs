//! Terminology version discovery.

use adam_model::{CtStandard, TerminologyVersion};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::api::TerminologyProduct;
use crate::client::{MetadataSource, fetch_as};
use crate::error::{LibraryError, Result};

/// Registry path of the terminology product listing.
pub const TERMINOLOGY_PRODUCTS_PATH: &str = "/mdr/products/Terminology";

/// Find the most recently dated package published for `standard`.
pub fn latest_terminology_version<S>(source: &S, standard: CtStandard) -> Result<TerminologyVersion>
where
    S: MetadataSource + ?Sized,
{
    info!("Fetching latest {} version", standard);
    let product: TerminologyProduct =
        fetch_as(source, TERMINOLOGY_PRODUCTS_PATH).ok_or_else(|| {
            LibraryError::RegistryUnavailable {
                path: TERMINOLOGY_PRODUCTS_PATH.to_string(),
            }
        })?;

    let hrefs = product.links.packages.iter().filter_map(|l| l.href.as_deref());
    let version_date =
        latest_package_date(hrefs, standard).ok_or(LibraryError::NoVersionsFound { standard })?;

    info!("Latest {} version found: {}", standard, version_date);
    Ok(TerminologyVersion {
        standard,
        version_date,
    })
}

/// Latest date among package links of the form `…/<standard>-YYYY-MM-DD`.
///
/// Links whose suffix is not a calendar date are ignored. When two links
/// carry the same date the later one in the listing is returned.
pub fn latest_package_date<'a, I>(hrefs: I, standard: CtStandard) -> Option<NaiveDate>
where
    I: IntoIterator<Item = &'a str>,
{
    let marker = format!("/{}-", standard.as_str());
    hrefs
        .into_iter()
        .filter_map(|href| {
            let (_, suffix) = href.rsplit_once(marker.as_str())?;
            match NaiveDate::parse_from_str(suffix, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    debug!("Skipping package link with unparseable date: {}", href);
                    None
                }
            }
        })
        .max()
}
