//! Terminal output utilities.
//!
//! Provides the plain text report and formatting helpers for terminal output.

use crate::models::{prefix_for_size, AvailableSubnetsReport};
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Render the report as human readable text.
pub fn render_text(report: &AvailableSubnetsReport) -> String {
    let mut out = format!(
        "Region: {}\nVPC ID: {}\nVPC CIDR: {}\nAvailable Subnets (/{} = {} addresses):\n",
        report.region,
        report.vpc_id,
        report.vpc_cidr,
        prefix_for_size(report.subnet_size).unwrap_or_default(),
        report.subnet_size
    );
    if report.available_subnets.is_empty() {
        out.push_str("None - the VPC is fully allocated at this size\n");
    } else {
        out.push_str(&report.available_subnets.iter().join("\n"));
        out.push('\n');
    }
    out
}

/// Print the report as text to stdout.
pub fn print_text(report: &AvailableSubnetsReport) {
    print!("{}", render_text(report));
    if report.available_subnets.is_empty() {
        log::warn!("{} no free subnet in {}", "NOTE".on_red(), report.vpc_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_render_text() {
        let report = AvailableSubnetsReport {
            region: "us-east-1".to_string(),
            vpc_id: "vpc-7c872910".to_string(),
            vpc_cidr: Ipv4::new("10.0.0.0/24").unwrap(),
            subnet_size: 64,
            available_subnets: vec![
                Ipv4::new("10.0.0.64/26").unwrap(),
                Ipv4::new("10.0.0.128/26").unwrap(),
            ],
        };
        assert_eq!(
            render_text(&report),
            "Region: us-east-1\nVPC ID: vpc-7c872910\nVPC CIDR: 10.0.0.0/24\n\
             Available Subnets (/26 = 64 addresses):\n10.0.0.64/26\n10.0.0.128/26\n"
        );
    }

    #[test]
    fn test_render_text_empty() {
        let report = AvailableSubnetsReport {
            region: "us-east-1".to_string(),
            vpc_id: "vpc-1".to_string(),
            vpc_cidr: Ipv4::new("10.0.0.0/24").unwrap(),
            subnet_size: 128,
            available_subnets: vec![],
        };
        assert!(render_text(&report).ends_with("None - the VPC is fully allocated at this size\n"));
    }
}
