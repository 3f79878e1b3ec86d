//! Human-readable report of resolved metadata.
//!
//! The report is plain text (no ANSI styling) so the same string can be
//! printed to a terminal or passed on as context to other tools.

use std::fmt::Write;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

use adam_model::{Codelist, ResolvedMetadata};

const RULE_WIDTH: usize = 70;
const TABLE_WIDTH: u16 = 100;
const TABLE_INDENT: &str = "    ";

/// Render the multi-section report.
pub fn render_report(metadata: &ResolvedMetadata) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, metadata);
    out
}

fn write_report(out: &mut String, metadata: &ResolvedMetadata) -> std::fmt::Result {
    let variable = metadata.variable();
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    writeln!(out, "{heavy}")?;
    writeln!(out, " ADaM Variable Details: {}", variable.qualified_name())?;
    writeln!(out, " ADaMIG Version: {}", variable.guide_version)?;
    writeln!(out, "{heavy}")?;
    writeln!(out, "  Label:          {}", or_na(variable.label.as_deref()))?;
    writeln!(out, "  Data Type:      {}", or_na(variable.data_type.as_deref()))?;
    writeln!(out, "  Core Status:    {}", variable.core)?;
    writeln!(out, "  CDISC Notes:    {}", or_na(variable.description.as_deref()))?;
    let links = if variable.codelist_links.is_empty() {
        "N/A".to_string()
    } else {
        variable.codelist_links.join(", ")
    };
    writeln!(out, "  Codelist HREFs: {links}")?;

    if metadata.codelists().is_empty() {
        writeln!(out)?;
        writeln!(out, "No associated codelist terms were fetched or found.")?;
    } else {
        writeln!(out)?;
        writeln!(out, "{light}")?;
        writeln!(out, " Associated Codelist(s)")?;
        writeln!(out, "{light}")?;
        for codelist in metadata.codelists() {
            write_codelist(out, codelist)?;
        }
    }
    writeln!(out)?;
    writeln!(out, "{heavy}")
}

fn write_codelist(out: &mut String, codelist: &Codelist) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(
        out,
        "  Codelist:     {} ({}) [{}]",
        codelist.name, codelist.submission_id, codelist.concept_id
    )?;
    writeln!(out, "  Extensible:   {}", codelist.extensible_yn())?;
    writeln!(
        out,
        "  Terminology:  {} {}",
        codelist.standard,
        codelist.version().date_string()
    )?;
    writeln!(out, "  Terms:")?;
    if !codelist.has_terms() {
        return writeln!(out, "{TABLE_INDENT}No terms found.");
    }
    for line in term_table(codelist).lines() {
        writeln!(out, "{TABLE_INDENT}{line}")?;
    }
    Ok(())
}

/// Term table with one row per term, in code order.
pub fn term_table(codelist: &Codelist) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH)
        .set_header(vec!["Code", "Decoded Value", "Concept ID"]);
    for term in codelist.terms() {
        table.add_row(vec![
            term.code.as_str(),
            term.decoded_value.as_str(),
            term.concept_id.as_str(),
        ]);
    }
    table
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}
