use itdash_core::error::ItdashError;
use itdash_core::extraction::pdftotext::PdftotextExtractor;
use itdash_core::extraction::PdfExtractor;
use itdash_core::parsing::parse_business_case;
use std::path::Path;

use crate::output;

pub fn run(pdf_file: &Path, output_format: &str) -> Result<(), ItdashError> {
    let pdf_bytes = std::fs::read(pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let text = extractor.first_page_text(&pdf_bytes)?;
    let record = parse_business_case(&text)?;

    match output_format {
        "json" => output::json::print(&record)?,
        _ => output::table::print_record(&record),
    }

    Ok(())
}
