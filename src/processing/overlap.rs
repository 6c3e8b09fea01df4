//! Consistency checks on provider data.
//!
//! AWS never lets two subnets of a VPC overlap and never places a subnet
//! outside its VPC. These checks report data that breaks either rule so it
//! can be logged; the subnet finder still handles such data correctly.

use crate::models::{Ipv4, VpcSnapshot};

/// Two existing subnets that share addresses.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapConflict {
    pub first: Ipv4,
    pub second: Ipv4,
}

/// Find pairs of overlapping blocks, sorted by the first block.
pub fn find_overlapping_blocks(blocks: &[Ipv4]) -> Vec<OverlapConflict> {
    let mut sorted = blocks.to_vec();
    sorted.sort();

    let mut conflicts = Vec::new();
    for (i, first) in sorted.iter().enumerate() {
        // Later blocks start at or after `first`; stop once they start past its end.
        for second in sorted[i + 1..]
            .iter()
            .take_while(|b| b.range().0 < first.range().1)
        {
            conflicts.push(OverlapConflict {
                first: *first,
                second: *second,
            });
        }
    }
    conflicts
}

/// Blocks that are not entirely inside `parent`.
pub fn find_blocks_outside(parent: &Ipv4, blocks: &[Ipv4]) -> Vec<Ipv4> {
    blocks
        .iter()
        .filter(|b| !parent.contains(b))
        .copied()
        .collect()
}

/// Log every inconsistency found in a VPC snapshot as a warning.
///
/// CIDRs that do not parse are skipped here; the subnet finder rejects them.
///
/// # Returns
/// The number of problems found.
pub fn log_inconsistencies(snapshot: &VpcSnapshot) -> usize {
    let Ok(parent) = Ipv4::new(&snapshot.vpc_cidr) else {
        return 0;
    };
    let blocks: Vec<Ipv4> = snapshot
        .subnets
        .iter()
        .filter_map(|s| Ipv4::new(&s.cidr_block).ok())
        .collect();

    let conflicts = find_overlapping_blocks(&blocks);
    for conflict in &conflicts {
        log::warn!(
            "Subnets {} and {} overlap in VPC '{}'",
            conflict.first,
            conflict.second,
            snapshot.vpc_id
        );
    }

    let outside = find_blocks_outside(&parent, &blocks);
    for block in &outside {
        log::warn!(
            "Subnet {} lies outside VPC '{}' ({})",
            block,
            snapshot.vpc_id,
            parent
        );
    }

    if conflicts.is_empty() && outside.is_empty() {
        log::debug!("No inconsistent subnets in {snapshot}");
    }

    conflicts.len() + outside.len()
}
