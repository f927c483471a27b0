//! Report output

mod writer;

pub use writer::ReportWriter;
