pub mod pdftotext;

use std::path::{Path, PathBuf};

use crate::error::ItdashError;

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub text: String,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor {
    /// Extract text from the first `max_pages` pages of the PDF bytes.
    fn extract_pages(&self, pdf_bytes: &[u8], max_pages: usize)
        -> Result<Vec<PageContent>, ItdashError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;

    /// Text of page 1, or "" for a PDF with no text layer.
    fn first_page_text(&self, pdf_bytes: &[u8]) -> Result<String, ItdashError> {
        Ok(self
            .extract_pages(pdf_bytes, 1)?
            .into_iter()
            .next()
            .map(|p| p.text)
            .unwrap_or_default())
    }
}

/// PDF files directly inside `dir`, sorted by name.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>, ItdashError> {
    let mut pdfs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf && path.is_file() {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}
