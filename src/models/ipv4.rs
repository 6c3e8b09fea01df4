//! IPv4 address and CIDR notation utilities.
//!
//! Provides the [`Ipv4`] network block used for parent VPCs, occupied subnets and
//! candidate subnets, along with the 32-bit mask arithmetic the subnet finder uses.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Number of addresses in the whole IPv4 space (a /0 block).
pub const ADDRESS_SPACE: u64 = 1 << MAX_LENGTH;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use dignet::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        Ok(netmask(len))
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Prefix length of the smallest block holding `size` addresses.
///
/// Sizes that are not a power of two round up, so 2000 addresses need a /21 (2048).
///
/// # Examples
/// ```
/// use dignet::models::prefix_for_size;
/// assert_eq!(prefix_for_size(2000).unwrap(), 21);
/// assert_eq!(prefix_for_size(1).unwrap(), 32);
/// ```
pub fn prefix_for_size(size: u64) -> Result<u8, Box<dyn Error>> {
    if size == 0 || size > ADDRESS_SPACE {
        return Err(format!("Invalid subnet size {size}").into());
    }
    let host_bits = size.next_power_of_two().trailing_zeros() as u8;
    Ok(MAX_LENGTH - host_bits)
}

// Callers keep len <= MAX_LENGTH; a /0 has no network bits.
fn netmask(len: u8) -> u32 {
    let host_bits = u32::from(MAX_LENGTH - len.min(MAX_LENGTH));
    u32::MAX.checked_shl(host_bits).unwrap_or(0)
}

/// IPv4 network block in CIDR notation.
///
/// Blocks built with [`Ipv4::new`] always have their host bits cleared,
/// so `10.0.0.5/24` becomes `10.0.0.0/24`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The network address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, Box<dyn Error>> {
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err("Invalid address/mask".into());
        }
        let addr: Ipv4Addr = parts[0]
            .parse()
            .map_err(|_| format!("Invalid address {}", parts[0]))?;
        if parts[1].is_empty() || !parts[1].bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("Invalid mask {}", parts[1]).into());
        }
        let mask: u8 = parts[1]
            .parse()
            .map_err(|_| format!("Invalid mask {}", parts[1]))?;
        if mask > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        Ok(Ipv4 {
            addr: cut_addr(addr, mask)?,
            mask,
        })
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        let mask = netmask(self.mask);
        Ipv4Addr::from((u32::from(self.addr) & mask) | !mask)
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & netmask(self.mask))
    }

    /// Number of addresses in the block, 2^(32 - mask).
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.mask.min(MAX_LENGTH))
    }

    /// Half-open address range `[start, end)`, widened to u64 so a /0 fits.
    pub fn range(&self) -> (u64, u64) {
        let start = u64::from(u32::from(self.lo()));
        (start, start + self.size())
    }

    /// True when both blocks share at least one address.
    pub fn overlaps(&self, other: &Ipv4) -> bool {
        let (a_start, a_end) = self.range();
        let (b_start, b_end) = other.range();
        a_start.max(b_start) < a_end.min(b_end)
    }

    /// True when `other` lies entirely inside this block.
    pub fn contains(&self, other: &Ipv4) -> bool {
        let (a_start, a_end) = self.range();
        let (b_start, b_end) = other.range();
        a_start <= b_start && b_end <= a_end
    }
}

impl FromStr for Ipv4 {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::new(s)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
