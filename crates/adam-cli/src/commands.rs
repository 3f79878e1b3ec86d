use anyhow::{Context, Result};
use tracing::info;

use adam_library::{LibraryConfig, MetadataResolver, RegistryClient};
use adam_model::{CtStandard, GuideVersion, ResolvedMetadata, TerminologyVersion};
use adam_report::{export_rows, render_report, write_csv_file};

use crate::cli::{ConnectionArgs, ReportFormatArg, TerminologyArgs, VariableArgs};

/// Build a registry client from connection flags.
///
/// Fails before any request is made when the API key is missing or the base
/// URL is not an http(s) URL.
pub fn build_client(connection: &ConnectionArgs) -> Result<RegistryClient> {
    let config = LibraryConfig::from_optional_key(connection.api_key.clone())
        .context("CDISC Library API key required (--api-key or CDISC_API_KEY)")?
        .with_base_url(&connection.base_url)
        .context("invalid --base-url")?
        .with_timeout(connection.timeout());
    RegistryClient::new(config).context("build registry client")
}

pub fn run_variable(connection: &ConnectionArgs, args: &VariableArgs) -> Result<ResolvedMetadata> {
    let version = GuideVersion::new(&args.ig_version).context("invalid --ig-version")?;
    let client = build_client(connection)?;
    let resolver = MetadataResolver::new(client).with_policy(args.policy());
    let metadata = resolver
        .resolve(&args.name, &version)
        .with_context(|| format!("resolve {} in ADaMIG {version}", args.name))?;

    match args.format {
        ReportFormatArg::Text => print!("{}", render_report(&metadata)),
        ReportFormatArg::Json => {
            let json =
                serde_json::to_string_pretty(&metadata).context("serialize metadata as JSON")?;
            println!("{json}");
        }
    }

    if let Some(path) = &args.output {
        let rows = export_rows(&metadata);
        write_csv_file(path, &rows).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), rows = rows.len(), "wrote export rows");
    }
    Ok(metadata)
}

pub fn run_terminology(
    connection: &ConnectionArgs,
    args: &TerminologyArgs,
) -> Result<TerminologyVersion> {
    let standard = CtStandard::from(args.standard);
    let client = build_client(connection)?;
    let version = MetadataResolver::new(client)
        .latest_terminology_version(standard)
        .with_context(|| format!("resolve latest {standard} package"))?;
    println!("{} {}", version.standard, version.date_string());
    Ok(version)
}
