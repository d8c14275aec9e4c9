use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pdftext")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract plain text from a PDF, page by page, into a text file", long_about = None)]
pub struct Cli {
    /// PDF file to read
    pub input: PathBuf,

    /// Text file to write (created or overwritten)
    pub output: PathBuf,

    /// Anything after OUTPUT is accepted and ignored
    #[arg(hide = true)]
    pub extra: Vec<String>,
}
