//! Address cursor for per-user single-host pools
//!
//! Each user gets the next free address after the previous user's, skipping
//! any address whose last octet the appliance treats as reserved.

use crate::{Allocation, Error, Result};
use log::trace;
use std::net::Ipv4Addr;

/// Last-octet values that break connectivity when used as a single-host pool
pub const RESERVED_LAST_OCTETS: [u8; 2] = [0, 255];

/// Whether the appliance would reject `addr` as a pool address
pub fn is_reserved(addr: Ipv4Addr) -> bool {
    RESERVED_LAST_OCTETS.contains(&addr.octets()[3])
}

/// First non-reserved address at or after `addr`.
///
/// Returns `None` if the walk would run past 255.255.255.255.
pub fn next_usable_address(addr: Ipv4Addr) -> Option<Ipv4Addr> {
    let mut cursor = addr;
    while is_reserved(cursor) {
        trace!("skipping reserved address {}", cursor);
        cursor = successor(cursor)?;
    }
    Some(cursor)
}

/// Parse a dotted-quad starting address
pub fn parse_start_address(start: &str) -> Result<Ipv4Addr> {
    start.parse().map_err(|_| Error::invalid_address(start))
}

/// Assign one address per identifier, in input order.
///
/// Duplicate identifiers are not detected and each receives its own address.
pub fn allocate<S: AsRef<str>>(identifiers: &[S], start: Ipv4Addr) -> Result<Vec<Allocation>> {
    let mut allocations = Vec::with_capacity(identifiers.len());
    let mut cursor = Some(start);

    for identifier in identifiers {
        let address = cursor
            .and_then(next_usable_address)
            .ok_or_else(|| Error::exhausted(start, identifiers.len()))?;
        allocations.push(Allocation::new(identifier.as_ref(), address));
        cursor = successor(address);
    }

    Ok(allocations)
}

fn successor(addr: Ipv4Addr) -> Option<Ipv4Addr> {
    u32::from(addr).checked_add(1).map(Ipv4Addr::from)
}
