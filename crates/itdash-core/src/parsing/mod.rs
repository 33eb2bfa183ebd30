//! Pure transforms from scraped text into the data model.
//!
//! Nothing in here touches the browser or the filesystem, so the shapes the
//! dashboard produces can be tested from literals.

pub mod business_case;
pub mod listing;
pub mod table;

pub use business_case::parse_business_case;
pub use listing::pair_alternating;
pub use table::{reshape, total_entries};
