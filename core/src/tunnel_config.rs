//! Address pool and tunnel-group configuration generation

use crate::allocator::{allocate, parse_start_address};
use crate::{Allocation, AllocationRequest, Result};
use log::debug;

/// Netmask for a pool holding exactly one host
pub const HOST_MASK: &str = "255.255.255.255";

/// Builder for the appliance's static tunnel configuration text
#[derive(Debug)]
pub struct TunnelConfigBuilder;

impl TunnelConfigBuilder {
    /// Generate the allocate block for a single user
    pub fn allocation_block(
        allocation: &Allocation,
        device: &str,
        aaa_server: &str,
        group_policy: &str,
    ) -> String {
        let user = &allocation.identifier;
        let lines = [
            format!("ip local pool {} {} mask {}", user, allocation.address, HOST_MASK),
            format!("tunnel-group {} type remote-access", user),
            format!("tunnel-group {} general-attributes", user),
            format!("address-pool {}", user),
            format!("authentication-server-group {}", aaa_server),
            format!("default-group-policy {}", group_policy),
            format!("tunnel-group {} webvpn-attributes", user),
            format!("group-url https://{}/{} enable", device, user),
        ];

        lines.join("\n")
    }

    /// Generate the clear block for a single user
    pub fn clear_block(identifier: &str) -> String {
        format!(
            "clear configure tunnel-group {user}\nno ip local pool {user}",
            user = identifier
        )
    }

    /// Generate allocate blocks for every identifier, in order.
    ///
    /// The start address is parsed and every address assigned before any text
    /// is produced, so an error never leaves partial configuration behind.
    pub fn render_allocation<S: AsRef<str>>(
        identifiers: &[S],
        device: &str,
        start_address: &str,
        aaa_server: &str,
        group_policy: &str,
    ) -> Result<String> {
        let start = parse_start_address(start_address)?;
        let allocations = allocate(identifiers, start)?;

        let blocks: Vec<String> = allocations
            .iter()
            .map(|a| Self::allocation_block(a, device, aaa_server, group_policy))
            .collect();

        if let (Some(first), Some(last)) = (allocations.first(), allocations.last()) {
            debug!(
                "rendered {} static tunnel(s) for {} ({} - {})",
                blocks.len(),
                device,
                first.address,
                last.address
            );
        }

        Ok(join_blocks(&blocks))
    }

    /// Generate clear blocks for every identifier, in order
    pub fn render_clear<S: AsRef<str>>(identifiers: &[S]) -> String {
        let blocks: Vec<String> = identifiers
            .iter()
            .map(|id| Self::clear_block(id.as_ref()))
            .collect();
        debug!("rendered {} static tunnel removal(s)", blocks.len());
        join_blocks(&blocks)
    }

    pub fn generate_allocation_config(request: &AllocationRequest) -> Result<String> {
        Self::render_allocation(
            &request.identifiers,
            &request.device,
            &request.start_address,
            &request.aaa_server,
            &request.group_policy,
        )
    }

    pub fn generate_clear_config(request: &AllocationRequest) -> String {
        Self::render_clear(&request.identifiers)
    }
}

// Each block is followed by a blank line, including the last one.
fn join_blocks(blocks: &[String]) -> String {
    let mut out = String::with_capacity(blocks.iter().map(|b| b.len() + 2).sum());
    for block in blocks {
        out.push_str(block);
        out.push_str("\n\n");
    }
    out
}
