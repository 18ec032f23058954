//! Standings Report
//!
//! Renders league standings into the single static page served from the
//! league's web hosting repository.

pub mod render;
pub mod writer;

pub use render::{escape_html, format_cost, render_html, ReportOptions};
pub use writer::write_report;
