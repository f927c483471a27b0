//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`]: the user's query, kept as typed

pub mod query;
