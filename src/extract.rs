use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::TextSettings;
use crate::error::{ExtractError, Result};
use crate::parser::{ExtractionMode, PdfBackend, PdfDocument};

/// Placed between the text of consecutive non-empty pages
pub const PAGE_SEPARATOR: &str = "\n\n";

/// What a run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Pages in the document
    pub pages: usize,
    /// Pages that contributed text
    pub kept: usize,
    /// Pages where the tuned attempt failed and the default one was used
    pub fallbacks: usize,
    /// Bytes written to the output file
    pub bytes: usize,
}

/// Extract the text of `input` and write it to `output`.
///
/// The output file is only touched once every page has been extracted.
pub fn run<B: PdfBackend>(backend: &B, input: &Path, output: &Path) -> Result<Summary> {
    let (text, mut summary) = {
        let document = backend.open(input).map_err(|source| ExtractError::Open {
            path: input.to_path_buf(),
            source: Box::new(source),
        })?;
        extract_document(&document)?
    };

    fs::write(output, &text).map_err(|source| ExtractError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    summary.bytes = text.len();

    info!(
        output = %output.display(),
        pages = summary.pages,
        kept = summary.kept,
        fallbacks = summary.fallbacks,
        bytes = summary.bytes,
        "Wrote extracted text"
    );

    Ok(summary)
}

/// Extract every page, drop the empty ones and join the rest.
pub fn extract_document<D: PdfDocument>(document: &D) -> Result<(String, Summary)> {
    let settings = TextSettings::tuned();
    let pages = document.page_numbers();
    info!(pages = pages.len(), "Opened document");

    let mut summary = Summary {
        pages: pages.len(),
        ..Summary::default()
    };
    let mut chunks = Vec::with_capacity(pages.len());

    for page in pages {
        let text = extract_page(document, page, &settings, &mut summary)?.unwrap_or_default();
        let chunk = text.trim();
        if chunk.is_empty() {
            debug!(page, "Page has no text");
            continue;
        }
        debug!(page, chars = chunk.chars().count(), "Extracted page");
        chunks.push(chunk.to_string());
    }

    summary.kept = chunks.len();
    Ok((chunks.join(PAGE_SEPARATOR), summary))
}

/// Tuned attempt first, then one retry with the library defaults.
fn extract_page<D: PdfDocument>(
    document: &D,
    page: u32,
    settings: &TextSettings,
    summary: &mut Summary,
) -> Result<Option<String>> {
    match document.extract_text(page, &ExtractionMode::Tuned(*settings)) {
        Ok(text) => Ok(text),
        Err(tuned) => {
            warn!(page, error = %tuned, "Tuned extraction failed, retrying with default settings");
            summary.fallbacks += 1;
            document
                .extract_text(page, &ExtractionMode::Default)
                .map_err(|source| ExtractError::Page {
                    page,
                    tuned: Box::new(tuned),
                    source: Box::new(source),
                })
        }
    }
}
