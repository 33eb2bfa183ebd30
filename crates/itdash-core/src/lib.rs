pub mod browser;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod extraction;
pub mod merge;
pub mod model;
pub mod parsing;
pub mod workbook;

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use browser::{Driver, Session};
use config::Config;
use dashboard::{Dashboard, DownloadReport, Timeouts};
use error::ItdashError;
use extraction::PdfExtractor;
use model::{ListingRow, PdfRecord, Table};
use workbook::{SheetWrite, WriteMode};

/// Sheet holding the agency listing.
pub const AGENCIES_SHEET: &str = "Agencies";

/// Sheet holding the investments table with the PDF titles appended.
pub const COMPARISON_SHEET: &str = "PDF comparison";

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeSummary {
    pub agencies: Vec<ListingRow>,
    pub investment_sheet: String,
    pub investments: usize,
    pub downloads: DownloadReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedPdf {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareSummary {
    pub records: Vec<PdfRecord>,
    pub skipped: Vec<SkippedPdf>,
    pub rows: usize,
    pub not_in_pdf: usize,
    pub written: bool,
}

/// Browser half of the run: agency listing, the configured agency's
/// investments, and their business case PDFs.
///
/// The listing starts a fresh workbook at `config.output`; the investments
/// sheet is appended to it. `AgencyNotFound` is returned before anything
/// is written for the agency. The caller's session is left open either way.
pub fn scrape_dashboard<D: Driver>(
    session: &Session<D>,
    config: &Config,
    timeouts: Timeouts,
) -> Result<ScrapeSummary, ItdashError> {
    let dashboard = Dashboard::new(session.driver(), timeouts);

    dashboard.open(&config.url)?;
    let agencies = dashboard.agencies()?;
    workbook::write_sheet(
        &config.output,
        AGENCIES_SHEET,
        &Table::from(agencies.as_slice()),
        WriteMode::Create,
    )?;

    dashboard.select_agency(&config.agency)?;
    let investments = dashboard.investments()?;
    let investment_sheet = workbook::sheet_name(&config.agency);
    workbook::write_sheet(
        &config.output,
        &investment_sheet,
        &investments,
        WriteMode::Append(config.sheet_collision),
    )?;

    let links = dashboard.detail_links()?;
    let base_url = session.driver().current_url()?;
    let downloads = dashboard.download_business_cases(
        &base_url,
        &links,
        &config.pdf_path,
        config.skip_downloaded,
    )?;

    Ok(ScrapeSummary {
        agencies,
        investment_sheet,
        investments: investments.len(),
        downloads,
    })
}

/// Extract the record of every PDF in `config.pdf_path`.
///
/// PDFs that cannot be read from disk or by the extractor, or that lack the
/// expected labels, are returned as skipped. A missing extractor binary
/// aborts the scan.
pub fn extract_records(
    config: &Config,
    extractor: &dyn PdfExtractor,
) -> Result<(Vec<PdfRecord>, Vec<SkippedPdf>), ItdashError> {
    let pdfs = extraction::list_pdfs(&config.pdf_path)?;
    info!(
        pdfs = pdfs.len(),
        dir = %config.pdf_path.display(),
        backend = extractor.backend_name(),
        "extracting business cases"
    );

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for path in pdfs {
        let parsed = std::fs::read(&path)
            .map_err(ItdashError::from)
            .and_then(|bytes| extractor.first_page_text(&bytes))
            .and_then(|text| parsing::parse_business_case(&text));

        match parsed {
            Ok(record) => records.push(record),
            Err(e @ ItdashError::PdftotextNotFound) => return Err(e),
            Err(e) => {
                warn!(path = %path.display(), "skipping PDF: {e}");
                skipped.push(SkippedPdf {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok((records, skipped))
}

/// Offline half of the run: append the PDF titles to the agency's
/// investments and store the result as [`COMPARISON_SHEET`].
pub fn compare_pdfs(
    config: &Config,
    extractor: &dyn PdfExtractor,
) -> Result<CompareSummary, ItdashError> {
    let (records, skipped) = extract_records(config, extractor)?;

    let mut titles: HashMap<String, String> = HashMap::new();
    for record in &records {
        if let Some(previous) = titles.insert(record.uii.clone(), record.investment_name.clone()) {
            warn!(
                uii = %record.uii,
                previous = %previous,
                "UII appears in more than one PDF, keeping the later one"
            );
        }
    }

    let sheet = workbook::sheet_name(&config.agency);
    let investments = workbook::read_sheet(&config.output, &sheet)?;
    let merged = merge::merge_titles(
        &investments,
        &sheet,
        merge::UII_COLUMN,
        &titles,
        merge::TITLE_COLUMN,
    )?;

    let not_in_pdf = merged
        .column(merge::TITLE_COLUMN)
        .map(|col| col.into_iter().filter(|v| *v == merge::NOT_IN_PDF).count())
        .unwrap_or(0);

    let outcome = workbook::write_sheet(
        &config.output,
        COMPARISON_SHEET,
        &merged,
        WriteMode::Append(config.sheet_collision),
    )?;

    info!(
        rows = merged.len(),
        matched = merged.len() - not_in_pdf,
        not_in_pdf,
        "compared investments with business cases"
    );

    Ok(CompareSummary {
        records,
        skipped,
        rows: merged.len(),
        not_in_pdf,
        written: outcome != SheetWrite::Skipped,
    })
}
