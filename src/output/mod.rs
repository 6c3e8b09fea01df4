//! Output formatting for search results.
//!
//! This module handles formatting and outputting the available subnets:
//! - [`csv`] - CSV output formatting
//! - [`terminal`] - Plain text output and field helpers

mod csv;
mod terminal;

use crate::models::AvailableSubnetsReport;

pub use csv::{print_csv, render_csv};
pub use terminal::{format_field, print_text, render_text};

/// Supported report formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

/// Print the report to stdout in the requested format.
pub fn print_report(
    report: &AvailableSubnetsReport,
    format: OutputFormat,
) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Csv => print_csv(report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
