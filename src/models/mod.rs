//! Domain models for dignet.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 network block with CIDR notation support
//! - [`Subnet`] - AWS subnet representation
//! - [`VpcSnapshot`] and [`AvailableSubnetsReport`] - VPC input and search result

mod ipv4;
mod subnet;
mod vpc;

// Re-export public types
pub use ipv4::{cut_addr, get_cidr_mask, prefix_for_size, Ipv4, ADDRESS_SPACE, MAX_LENGTH};
pub use subnet::{Subnet, Tag};
pub use vpc::{AvailableSubnetsReport, VpcSnapshot};
