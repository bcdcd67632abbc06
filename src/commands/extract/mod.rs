use anyhow::{Result, bail};
use tracing::info;

use crate::cli::ExtractArgs;
use crate::model::{ExtractionMeta, RawExtraction};
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

mod contact;
mod entities;
mod pdf_text;
mod sections;
mod tables;
#[cfg(test)]
mod tests;

use contact::extract_contact_info;
use entities::{extract_identity, extract_services, extract_team};
use pdf_text::{command_available, extract_text_with_pdftotext};
use sections::detect_sections;
use tables::detect_tables;

pub const RAW_EXTRACT_FILE: &str = "raw-extract.json";

pub fn run(args: ExtractArgs) -> Result<()> {
    if !args.pdf.is_file() {
        bail!("PDF not found: {}", args.pdf.display());
    }
    if !command_available("pdftotext") {
        bail!("pdftotext is not available on PATH (install poppler-utils)");
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.data_dir.join(RAW_EXTRACT_FILE));

    info!(pdf = %args.pdf.display(), "extracting content");

    let pdf_text = extract_text_with_pdftotext(&args.pdf, args.max_pages)?;
    let text = pdf_text.joined();
    let meta = ExtractionMeta {
        source: args
            .pdf
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string(),
        extracted_at: now_utc_string(),
        page_count: pdf_text.pages.len(),
        text_length: text.chars().count(),
        source_sha256: sha256_file(&args.pdf)?,
    };

    info!(
        pages = meta.page_count,
        text_length = meta.text_length,
        "read pdf text layer"
    );

    let extraction = analyze_text(meta, text);

    info!(
        sections = extraction.sections.len(),
        tables = extraction.tables.len(),
        services = extraction.services.len(),
        team = extraction.team.len(),
        "extraction passes completed"
    );

    write_json_pretty(&output_path, &extraction)?;
    info!(path = %output_path.display(), "wrote raw extraction");

    Ok(())
}

/// Runs every extraction pass over one document's text.
pub fn analyze_text(meta: ExtractionMeta, text: String) -> RawExtraction {
    let sections = detect_sections(&text);
    let contact = extract_contact_info(&text);
    let tables = detect_tables(&text);
    let identity = extract_identity(&sections);
    let services = extract_services(&sections);
    let team = extract_team(&sections);

    RawExtraction {
        meta,
        identity,
        sections,
        contact,
        tables,
        services,
        team,
        raw_text: text,
    }
}
