//! AWS CLI interaction.
//!
//! This module handles all AWS-related operations:
//! - [`cli`] - Command execution for the AWS CLI
//! - [`ec2`] - VPC and subnet queries
//! - [`cache`] - Caching of VPC snapshots

mod cache;
mod cli;
mod ec2;

// Re-export public types and functions
pub use cache::{default_cache_file, read_snapshot_file, read_vpc_cache};
pub use ec2::{create_session, fetch_vpc_snapshot, Session};
