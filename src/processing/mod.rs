//! Subnet data processing logic.
//!
//! This module contains the business logic that runs on provider data:
//! - [`finder`] - Partitioning a VPC and finding free subnets
//! - [`overlap`] - Consistency checks on existing subnets

mod finder;
mod overlap;

// Re-export public functions
pub use finder::{find_available_blocks, find_available_in, parse_parent_block};
pub use overlap::{
    find_blocks_outside, find_overlapping_blocks, log_inconsistencies, OverlapConflict,
};
