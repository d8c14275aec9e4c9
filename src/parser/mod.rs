pub mod layout;
mod pdf;

use std::path::Path;

use crate::config::TextSettings;
use crate::error::Result;

pub use pdf::PdfExtractBackend;

/// How a page's text is pulled out of the PDF
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtractionMode {
    /// Glyphs are merged into words and lines using the given tolerances
    Tuned(TextSettings),
    /// The PDF library's own plain-text output, untouched
    Default,
}

/// Something that can open PDF files
pub trait PdfBackend {
    type Document: PdfDocument;

    /// Open and parse the PDF at `path`
    fn open(&self, path: &Path) -> Result<Self::Document>;
}

/// An opened PDF
pub trait PdfDocument {
    /// Page numbers in document order
    fn page_numbers(&self) -> Vec<u32>;

    /// Extract a page's text. `Ok(None)` means the page carries no text.
    fn extract_text(&self, page: u32, mode: &ExtractionMode) -> Result<Option<String>>;
}
