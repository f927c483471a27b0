//! Research value objects: search hits, fetched pages and reports.

pub mod entities;
pub mod report;

pub use entities::{FetchedPage, PageExtract, ResearchReport, SearchResult};
pub use report::build_local_report;
