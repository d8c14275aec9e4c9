use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use pdf_extract::{Document, OutputError, PlainTextOutput, output_doc_page};
use tracing::{debug, warn};

use super::layout::GlyphCollector;
use super::{ExtractionMode, PdfBackend, PdfDocument};
use crate::error::{ExtractError, Result};

/// Backend on top of the `pdf-extract` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractBackend;

/// A PDF loaded into memory by `pdf-extract`
pub struct PdfExtractDocument {
    doc: Document,
}

impl PdfBackend for PdfExtractBackend {
    type Document = PdfExtractDocument;

    fn open(&self, path: &Path) -> Result<PdfExtractDocument> {
        let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut doc = contain(|| Document::load_mem(&bytes))?.map_err(OutputError::from)?;

        // Many PDFs are encrypted with an empty user password
        if doc.is_encrypted() {
            if let Err(e) = doc.decrypt("") {
                warn!(path = %path.display(), error = %e, "Could not decrypt PDF with an empty password");
            }
        }

        Ok(PdfExtractDocument { doc })
    }
}

impl PdfDocument for PdfExtractDocument {
    fn page_numbers(&self) -> Vec<u32> {
        self.doc.get_pages().keys().copied().collect()
    }

    fn extract_text(&self, page: u32, mode: &ExtractionMode) -> Result<Option<String>> {
        match mode {
            ExtractionMode::Tuned(settings) => {
                let mut collector = GlyphCollector::new();
                contain(|| output_doc_page(&self.doc, &mut collector, page))??;
                Ok(collector.into_text(settings))
            }
            ExtractionMode::Default => {
                let mut text = String::new();
                {
                    let mut output = PlainTextOutput::new(&mut text);
                    contain(|| output_doc_page(&self.doc, &mut output, page))??;
                }
                Ok(if text.is_empty() { None } else { Some(text) })
            }
        }
    }
}

/// Run a `pdf-extract` call, turning a panic into an error.
///
/// The library indexes and unwraps freely while walking malformed files.
/// The default panic hook is swapped out for the duration of the call so a
/// contained panic does not print a backtrace notice; it is logged instead.
fn contain<T>(f: impl FnOnce() -> T) -> Result<T> {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(previous);

    result.map_err(|payload| {
        let message = panic_message(payload.as_ref());
        debug!(panic = %message, "PDF library panicked");
        ExtractError::Panicked(message)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
