use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a PDF into text
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Pdf(#[from] pdf_extract::OutputError),

    /// The PDF library panicked on malformed input
    #[error("PDF library panicked: {0}")]
    Panicked(String),

    #[error("Failed to open PDF file: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: Box<ExtractError>,
    },

    /// Both the tuned and the default extraction attempts failed.
    /// `source` is the default attempt's error.
    #[error("Failed to extract text from page {page} (tuned attempt: {tuned})")]
    Page {
        page: u32,
        tuned: Box<ExtractError>,
        #[source]
        source: Box<ExtractError>,
    },

    #[error("Failed to write output file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
