use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Text layer of a PDF, one entry per page.
#[derive(Debug, Default)]
pub(super) struct PdfText {
    pub pages: Vec<String>,
}

impl PdfText {
    /// Pages joined by a blank line, the shape the section analyzer expects.
    pub fn joined(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.trim_end_matches('\n'))
            .collect::<Vec<&str>>()
            .join("\n\n")
    }
}

pub(super) fn command_available(program: &str) -> bool {
    Command::new(program).arg("-v").output().is_ok()
}

pub(super) fn extract_text_with_pdftotext(
    pdf_path: &Path,
    max_pages: Option<usize>,
) -> Result<PdfText> {
    let mut command = Command::new("pdftotext");
    command.arg("-enc").arg("UTF-8").arg("-f").arg("1");
    if let Some(max_pages) = max_pages {
        command.arg("-l").arg(max_pages.to_string());
    }
    command.arg(pdf_path).arg("-");

    let output = command
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
}

/// pdftotext separates pages with form feeds and ends with one.
pub(super) fn split_pages(raw: &str) -> PdfText {
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    PdfText { pages }
}
