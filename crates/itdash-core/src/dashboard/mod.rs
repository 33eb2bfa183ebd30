//! Page-level operations against itdashboard.gov.
//!
//! Everything here is expressed in terms of [`Driver`], so the same flow
//! runs against Chrome or a scripted fake.

pub mod download;
pub mod xpath;

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::browser::wait::poll_until;
use crate::browser::Driver;
use crate::error::ItdashError;
use crate::model::{ListingRow, Table};
use crate::parsing::{pair_alternating, reshape, total_entries};

pub use download::{DownloadEntry, DownloadReport, DownloadStatus};

/// Upper bounds for each wait in the flow.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub dive_in: Duration,
    pub listing: Duration,
    pub agency_click: Duration,
    pub table: Duration,
    pub download_control: Duration,
    pub indicator_appear: Duration,
    pub indicator_vanish: Duration,
    pub poll_interval: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Timeouts {
            dive_in: Duration::from_secs(10),
            listing: Duration::from_secs(10),
            agency_click: Duration::from_secs(10),
            table: Duration::from_secs(30),
            download_control: Duration::from_secs(10),
            indicator_appear: Duration::from_secs(20),
            indicator_vanish: Duration::from_secs(20),
            poll_interval: Duration::from_millis(250),
        }
    }
}

impl Timeouts {
    /// Single-probe waits, for drivers that answer synchronously.
    pub fn immediate() -> Self {
        Timeouts {
            dive_in: Duration::ZERO,
            listing: Duration::ZERO,
            agency_click: Duration::ZERO,
            table: Duration::ZERO,
            download_control: Duration::ZERO,
            indicator_appear: Duration::ZERO,
            indicator_vanish: Duration::ZERO,
            poll_interval: Duration::ZERO,
        }
    }
}

pub struct Dashboard<'a, D: Driver> {
    driver: &'a D,
    timeouts: Timeouts,
}

impl<'a, D: Driver> Dashboard<'a, D> {
    pub fn new(driver: &'a D, timeouts: Timeouts) -> Self {
        Dashboard { driver, timeouts }
    }

    pub fn driver(&self) -> &D {
        self.driver
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    /// Open the landing page and reveal the agency tiles.
    pub fn open(&self, url: &str) -> Result<(), ItdashError> {
        info!(url, "opening dashboard");
        self.driver.navigate(url)?;

        info!("clicking dive in");
        self.click_when_visible(xpath::DIVE_IN, 0, self.timeouts.dive_in, "dive in button")?;
        self.wait_visible(xpath::AGENCY_CONTAINER, self.timeouts.listing, "agency tiles")
    }

    /// Agency name/amount pairs, one per rendered tile.
    ///
    /// Each tile is paired from its own children; a tile that does not hold
    /// amount/name pairs is logged and skipped.
    pub fn agencies(&self) -> Result<Vec<ListingRow>, ItdashError> {
        let tiles = self
            .driver
            .grouped_texts(xpath::AGENCY_CONTAINER, xpath::AGENCY_TILE_SPANS)?;

        let mut rows = Vec::with_capacity(tiles.len());
        for (i, texts) in tiles.iter().enumerate() {
            match pair_alternating(texts) {
                Ok(pairs) => rows.extend(pairs),
                Err(e) => warn!(tile = i, texts = ?texts, "skipping agency tile: {e}"),
            }
        }

        info!(agencies = rows.len(), "read agency listing");
        Ok(rows)
    }

    /// Click the first tile whose text is exactly `agency`.
    pub fn select_agency(&self, agency: &str) -> Result<(), ItdashError> {
        info!(agency, "selecting agency");
        let texts = self.driver.texts(xpath::AGENCY_SPANS)?;

        let index = texts
            .iter()
            .position(|t| t.trim() == agency)
            .ok_or_else(|| ItdashError::AgencyNotFound {
                agency: agency.to_string(),
            })?;

        self.click_when_visible(xpath::AGENCY_SPANS, index, self.timeouts.agency_click, agency)
    }

    /// Show every row of the investments table and read it.
    pub fn investments(&self) -> Result<Table, ItdashError> {
        // Options of a closed <select> have no layout box; wait on the select.
        self.wait_visible(xpath::PAGE_LENGTH_SELECT, self.timeouts.table, "page length selector")?;
        let headers = self.driver.texts(xpath::TABLE_HEADERS)?;
        let first_page = self.driver.texts(xpath::TABLE_CELLS)?;

        self.driver.click(xpath::SHOW_ALL_ROWS, 0)?;
        let cells = self.wait_for_all_rows(&first_page, headers.len())?;

        let table = reshape(headers, cells)?;
        info!(
            rows = table.len(),
            columns = table.headers.len(),
            "read investments table"
        );
        Ok(table)
    }

    /// Link texts of the table's detail links (the investment UIIs).
    pub fn detail_links(&self) -> Result<Vec<String>, ItdashError> {
        let links: Vec<String> = self
            .driver
            .texts(xpath::DETAIL_LINKS)?
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        debug!(links = links.len(), "found detail links");
        Ok(links)
    }

    pub(crate) fn wait_visible(
        &self,
        xpath: &str,
        timeout: Duration,
        what: &str,
    ) -> Result<(), ItdashError> {
        debug!(xpath, ?timeout, "waiting for element");
        if poll_until(timeout, self.timeouts.poll_interval, || {
            self.driver.is_visible(xpath)
        })? {
            Ok(())
        } else {
            Err(ItdashError::WaitTimeout {
                what: what.to_string(),
                secs: timeout.as_secs(),
            })
        }
    }

    pub(crate) fn wait_hidden(
        &self,
        xpath: &str,
        timeout: Duration,
        what: &str,
    ) -> Result<(), ItdashError> {
        debug!(xpath, ?timeout, "waiting for element to disappear");
        if poll_until(timeout, self.timeouts.poll_interval, || {
            self.driver.is_visible(xpath).map(|visible| !visible)
        })? {
            Ok(())
        } else {
            Err(ItdashError::WaitTimeout {
                what: format!("{what} to disappear"),
                secs: timeout.as_secs(),
            })
        }
    }

    pub(crate) fn click_when_visible(
        &self,
        xpath: &str,
        index: usize,
        timeout: Duration,
        what: &str,
    ) -> Result<(), ItdashError> {
        self.wait_visible(xpath, timeout, what)?;
        self.driver.click(xpath, index)
    }

    /// Wait for the body to be redrawn with every row, then return its cells.
    ///
    /// Done as soon as the info line's entry count matches the body. Without
    /// that, the body must first differ from `first_page` and then keep the
    /// same cell count across two consecutive polls.
    fn wait_for_all_rows(
        &self,
        first_page: &[String],
        width: usize,
    ) -> Result<Vec<String>, ItdashError> {
        let mut cells = Vec::new();
        let mut reported = None;
        let mut redrawn = false;
        let mut last_count = None;

        let settled = poll_until(self.timeouts.table, self.timeouts.poll_interval, || {
            cells = self.driver.texts(xpath::TABLE_CELLS)?;
            reported = self
                .driver
                .texts(xpath::TABLE_INFO)?
                .first()
                .and_then(|info| total_entries(info));

            if !cells.is_empty() && reported.map(|rows| rows * width) == Some(cells.len()) {
                return Ok(true);
            }

            redrawn = redrawn || cells.as_slice() != first_page;
            if !redrawn {
                return Ok(false);
            }
            let stable = !cells.is_empty() && last_count == Some(cells.len());
            last_count = Some(cells.len());
            Ok(stable)
        })?;

        if settled {
            return Ok(cells);
        }
        if cells.is_empty() || reported.is_some() {
            return Err(ItdashError::WaitTimeout {
                what: "investments table to show all rows".into(),
                secs: self.timeouts.table.as_secs(),
            });
        }
        warn!(
            cells = cells.len(),
            redrawn,
            "investments table not settled at timeout, using last read"
        );
        Ok(cells)
    }
}
