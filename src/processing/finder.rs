//! Available subnet search.
//!
//! Partitions a VPC block into equally sized candidate blocks and keeps the
//! ones that do not overlap an existing subnet.

use crate::error::FinderError;
use crate::models::{prefix_for_size, Ipv4, ADDRESS_SPACE, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Find every block of `requested_size` addresses inside `parent_cidr` that
/// overlaps none of the `occupied` blocks.
///
/// `requested_size` is rounded up to the next power of two, so asking for 2000
/// addresses yields /21 blocks. The result is ascending by address and may be
/// empty when the VPC is fully allocated at that granularity.
///
/// # Arguments
/// * `parent_cidr` - The VPC CIDR, e.g. `10.0.0.0/16`
/// * `occupied` - CIDRs of the subnets that already exist
/// * `requested_size` - Desired number of addresses per subnet
///
/// # Examples
/// ```
/// use dignet::processing::find_available_blocks;
/// let free = find_available_blocks("10.0.0.0/24", &["10.0.0.0/26"], 64).unwrap();
/// let free: Vec<String> = free.iter().map(|b| b.to_string()).collect();
/// assert_eq!(free, ["10.0.0.64/26", "10.0.0.128/26", "10.0.0.192/26"]);
/// ```
pub fn find_available_blocks<S: AsRef<str>>(
    parent_cidr: &str,
    occupied: &[S],
    requested_size: u64,
) -> Result<Vec<Ipv4>, FinderError> {
    let parent = parse_parent_block(parent_cidr, requested_size)?;
    find_available_in(&parent, occupied, requested_size)
}

/// Check `requested_size`, then parse the parent CIDR.
pub fn parse_parent_block(parent_cidr: &str, requested_size: u64) -> Result<Ipv4, FinderError> {
    if requested_size == 0 || requested_size > ADDRESS_SPACE {
        return Err(FinderError::InvalidSize(requested_size));
    }
    parent_cidr
        .parse::<Ipv4>()
        .map_err(|e| FinderError::InvalidParentBlock {
            cidr: parent_cidr.to_string(),
            reason: e.to_string(),
        })
}

/// [`find_available_blocks`] for a parent block that is already parsed.
pub fn find_available_in<S: AsRef<str>>(
    parent: &Ipv4,
    occupied: &[S],
    requested_size: u64,
) -> Result<Vec<Ipv4>, FinderError> {
    let candidate_mask =
        prefix_for_size(requested_size).map_err(|_| FinderError::InvalidSize(requested_size))?;

    let mut occupied_blocks = occupied
        .iter()
        .map(|cidr| {
            let cidr = cidr.as_ref();
            cidr.parse::<Ipv4>()
                .map_err(|e| FinderError::InvalidOccupiedBlock {
                    cidr: cidr.to_string(),
                    reason: e.to_string(),
                })
        })
        .collect::<Result<Vec<Ipv4>, FinderError>>()?;

    if candidate_mask < parent.mask {
        return Err(FinderError::RequestExceedsParent {
            capacity: parent.size(),
            cidr: parent.to_string(),
        });
    }

    // Sorted by start address, swept alongside the ascending candidates.
    occupied_blocks.sort();
    let mut next = 0;
    let mut available = Vec::new();

    for candidate in candidate_blocks(*parent, candidate_mask) {
        let (start, end) = candidate.range();
        while occupied_blocks
            .get(next)
            .is_some_and(|block| block.range().1 <= start)
        {
            next += 1;
        }
        let taken = occupied_blocks
            .get(next)
            .is_some_and(|block| block.range().0 < end);
        if !taken {
            available.push(candidate);
        }
    }

    log::debug!(
        "{parent}: {} free /{candidate_mask} of {} candidates, {} occupied blocks",
        available.len(),
        1u64 << (candidate_mask - parent.mask),
        occupied_blocks.len()
    );

    Ok(available)
}

/// Every `/candidate_mask` block inside `parent`, in ascending address order.
///
/// Requires `parent.mask <= candidate_mask <= 32`.
fn candidate_blocks(parent: Ipv4, candidate_mask: u8) -> impl Iterator<Item = Ipv4> {
    let new_bits = candidate_mask - parent.mask;
    let step = 1u64 << (MAX_LENGTH - candidate_mask);
    let base = parent.range().0;
    (0..1u64 << new_bits).map(move |index| Ipv4 {
        addr: Ipv4Addr::from((base + index * step) as u32),
        mask: candidate_mask,
    })
}
