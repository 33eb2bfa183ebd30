use itdash_core::dashboard::DownloadStatus;
use itdash_core::model::{ListingRow, PdfRecord};
use itdash_core::{CompareSummary, ScrapeSummary};

pub fn print_agencies(agencies: &[ListingRow]) {
    let max_name = agencies
        .iter()
        .map(|r| r.agency.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    println!("  {:<width$}  Amount", "Agency", width = max_name);
    println!("  {}", "-".repeat(max_name + 2 + 14));
    for row in agencies {
        println!("  {:<width$}  {}", row.agency, row.amount, width = max_name);
    }
    println!();
    println!("  {} agencies", agencies.len());
}

pub fn print_record(record: &PdfRecord) {
    println!("  UII:             {}", record.uii);
    println!("  Investment name: {}", record.investment_name);
}

pub fn print_scrape(summary: &ScrapeSummary) {
    println!("=== Dashboard ===\n");
    println!("  Agencies listed:     {}", summary.agencies.len());
    println!(
        "  Investments:         {} (sheet '{}')",
        summary.investments, summary.investment_sheet
    );
    println!(
        "  Business cases:      {} downloaded, {} already present, {} timed out",
        summary.downloads.count(DownloadStatus::Downloaded),
        summary.downloads.count(DownloadStatus::AlreadyPresent),
        summary.downloads.count(DownloadStatus::IndicatorTimeout),
    );

    let timed_out: Vec<&str> = summary
        .downloads
        .entries
        .iter()
        .filter(|e| e.status == DownloadStatus::IndicatorTimeout)
        .map(|e| e.uii.as_str())
        .collect();
    if !timed_out.is_empty() {
        println!("    check manually: {}", timed_out.join(", "));
    }
    println!();
}

pub fn print_compare(summary: &CompareSummary) {
    println!("=== PDF comparison ===\n");
    println!("  PDFs read:           {}", summary.records.len());
    println!(
        "  Investments matched: {} of {}",
        summary.rows - summary.not_in_pdf,
        summary.rows
    );
    if !summary.written {
        println!("  Sheet already existed and was left untouched");
    }

    if !summary.skipped.is_empty() {
        println!("\n  Skipped PDFs:");
        for s in &summary.skipped {
            println!("    {}  ({})", s.path.display(), s.reason);
        }
    }
    println!();
}
