//! Outbound HTTP clients.

pub mod page;

pub use page::PageFetcher;
