//! AWS VPC data model.

use super::{Ipv4, Subnet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything the provider returned for one VPC.
///
/// This is also the layout of the snapshot cache file.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct VpcSnapshot {
    /// AWS region the VPC was read from.
    pub region: String,
    /// VPC ID (`vpc-...`).
    pub vpc_id: String,
    /// Primary IPv4 CIDR block of the VPC.
    pub vpc_cidr: String,
    /// Subnets that already exist inside the VPC.
    pub subnets: Vec<Subnet>,
}

impl VpcSnapshot {
    /// CIDR blocks of the existing subnets, in provider order.
    pub fn occupied_cidrs(&self) -> Vec<&str> {
        self.subnets.iter().map(|s| s.cidr_block.as_str()).collect()
    }
}

/// Result of searching a VPC for free subnets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AvailableSubnetsReport {
    pub region: String,
    pub vpc_id: String,
    pub vpc_cidr: Ipv4,
    /// Address count of each available subnet, after rounding up to a power of two.
    pub subnet_size: u64,
    /// Available subnets, ascending by address.
    pub available_subnets: Vec<Ipv4>,
}

impl fmt::Display for VpcSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ({} subnets, {})",
            self.vpc_id,
            self.vpc_cidr,
            self.subnets.len(),
            self.region
        )
    }
}
