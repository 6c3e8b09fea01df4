//! CSV output formatting for available subnets.

use crate::models::AvailableSubnetsReport;

use super::terminal::format_field;

/// Render the report as CSV, one row per available subnet.
pub fn render_csv(report: &AvailableSubnetsReport) -> String {
    let mut out = String::from(
        r#" "cnt",     "subnet_cidr",       "broadcast",   "size",         "vpc_id""#,
    );
    out.push('\n');

    for (i, subnet) in report.available_subnets.iter().enumerate() {
        out.push_str(&format!(
            "{j},{subnet_cidr},{broadcast},{size},{vpc_id}\n",
            j = format_field(i + 1, 6),
            subnet_cidr = format_field(subnet, 18),
            broadcast = format_field(format!("{}_br", subnet.hi()), 19),
            size = format_field(subnet.size(), 8),
            vpc_id = format_field(&report.vpc_id, 24),
        ));
    }
    out
}

/// Print the report as CSV to stdout.
pub fn print_csv(report: &AvailableSubnetsReport) {
    log::info!(
        "#Start print_csv() {} rows for {}",
        report.available_subnets.len(),
        report.vpc_id
    );
    print!("{}", render_csv(report));
}
