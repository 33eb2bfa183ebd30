use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::browser::Driver;
use crate::dashboard::{xpath, Dashboard};
use crate::error::ItdashError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    Downloaded,
    /// `<uii>.pdf` was already in the download directory.
    AlreadyPresent,
    /// The progress indicator did not appear or vanish in time. The file may
    /// still have arrived.
    IndicatorTimeout,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadEntry {
    pub uii: String,
    pub status: DownloadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DownloadReport {
    pub entries: Vec<DownloadEntry>,
}

impl DownloadReport {
    pub fn count(&self, status: DownloadStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    fn push(&mut self, uii: &str, status: DownloadStatus, detail: Option<String>) {
        self.entries.push(DownloadEntry {
            uii: uii.to_string(),
            status,
            detail,
        });
    }
}

impl<D: Driver> Dashboard<'_, D> {
    /// Download the business case PDF of every investment in `links`.
    ///
    /// Each investment page lives at `<base_url>/<uii>`. A progress
    /// indicator that misses its deadline is recorded and the batch moves
    /// on; any other failure aborts the batch.
    pub fn download_business_cases(
        &self,
        base_url: &str,
        links: &[String],
        pdf_dir: &Path,
        skip_downloaded: bool,
    ) -> Result<DownloadReport, ItdashError> {
        let base = base_url.trim_end_matches('/');
        let timeouts = *self.timeouts();
        let mut report = DownloadReport::default();

        info!(investments = links.len(), "downloading business cases");

        for uii in links {
            if skip_downloaded && pdf_dir.join(format!("{uii}.pdf")).is_file() {
                info!(uii = %uii, "business case already downloaded");
                report.push(uii, DownloadStatus::AlreadyPresent, None);
                continue;
            }

            self.driver().navigate(&format!("{base}/{uii}"))?;
            self.click_when_visible(
                xpath::BUSINESS_CASE_LINK,
                0,
                timeouts.download_control,
                "business case download link",
            )?;

            let finished = self
                .wait_visible(
                    xpath::BUSINESS_CASE_INDICATOR,
                    timeouts.indicator_appear,
                    "download indicator",
                )
                .and_then(|()| {
                    self.wait_hidden(
                        xpath::BUSINESS_CASE_INDICATOR,
                        timeouts.indicator_vanish,
                        "download indicator",
                    )
                });

            match finished {
                Ok(()) => {
                    info!(uii = %uii, "business case downloaded");
                    report.push(uii, DownloadStatus::Downloaded, None);
                }
                Err(e @ ItdashError::WaitTimeout { .. }) => {
                    warn!(uii = %uii, "{e}");
                    report.push(uii, DownloadStatus::IndicatorTimeout, Some(e.to_string()));
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            downloaded = report.count(DownloadStatus::Downloaded),
            already_present = report.count(DownloadStatus::AlreadyPresent),
            timed_out = report.count(DownloadStatus::IndicatorTimeout),
            "business case downloads finished"
        );
        Ok(report)
    }
}
