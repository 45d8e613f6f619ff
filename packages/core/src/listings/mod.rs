//! Listing pipeline stages.
//!
//! Turns the raw resale page into a notification text in three pure steps:
//! [`extract`] pulls the embedded page data out of the HTML, [`filter`]
//! selects the events worth reporting, and [`format`] renders them.

pub mod extract;
pub mod filter;
pub mod format;
pub mod types;

pub use extract::extract_page_data;
pub use filter::{filter_listings, ListingCriteria};
pub use format::format_message;
pub use types::*;
