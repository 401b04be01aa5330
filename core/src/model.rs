//! Domain model types for static tunnel generation

use crate::allocator::{allocate, parse_start_address};
use crate::{Result, TunnelConfigBuilder};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// One user's assigned single-host pool address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub identifier: String,
    pub address: Ipv4Addr,
}

impl Allocation {
    pub fn new(identifier: impl Into<String>, address: Ipv4Addr) -> Self {
        Self {
            identifier: identifier.into(),
            address,
        }
    }
}

/// Everything needed to generate static tunnels for a set of users.
///
/// `device`, `aaa_server` and `group_policy` are copied verbatim into every
/// block. `start_address` is kept as text and only parsed when rendering, so a
/// malformed value surfaces as [`crate::Error::InvalidAddress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AllocationRequest {
    #[serde(default)]
    pub identifiers: Vec<String>,
    pub device: String,
    pub start_address: String,
    pub aaa_server: String,
    pub group_policy: String,
}

impl AllocationRequest {
    pub fn new(
        device: impl Into<String>,
        start_address: impl Into<String>,
        aaa_server: impl Into<String>,
        group_policy: impl Into<String>,
    ) -> Self {
        Self {
            identifiers: Vec::new(),
            device: device.into(),
            start_address: start_address.into(),
            aaa_server: aaa_server.into(),
            group_policy: group_policy.into(),
        }
    }

    pub fn with_identifiers<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifiers.extend(identifiers.into_iter().map(Into::into));
        self
    }

    pub fn add_identifier(&mut self, identifier: impl Into<String>) {
        self.identifiers.push(identifier.into());
    }

    /// Validate the request, returning the parsed starting address
    pub fn validate(&self) -> Result<Ipv4Addr> {
        parse_start_address(&self.start_address)
    }

    /// Address assignment for every identifier, without rendering
    pub fn allocations(&self) -> Result<Vec<Allocation>> {
        let start = self.validate()?;
        allocate(&self.identifiers, start)
    }

    /// Render the allocate blocks for this request
    pub fn render(&self) -> Result<String> {
        TunnelConfigBuilder::generate_allocation_config(self)
    }

    /// Render the blocks that remove this request's pools and tunnel groups
    pub fn render_clear(&self) -> String {
        TunnelConfigBuilder::generate_clear_config(self)
    }

    /// Load a request from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a request from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn sample() -> AllocationRequest {
        AllocationRequest::new("vpn.example.com", "192.168.1.1", "AAA1", "GP1")
            .with_identifiers(["alice", "bob"])
    }

    #[test]
    fn test_from_toml_str() {
        let content = r#"
identifiers = ["alice", "bob"]
device = "vpn.example.com"
start_address = "192.168.1.1"
aaa_server = "AAA1"
group_policy = "GP1"
"#;
        let request = AllocationRequest::from_toml_str(content).unwrap();
        assert_eq!(request, sample());
    }

    #[test]
    fn test_from_json_str_defaults_identifiers() {
        let content = r#"{
            "device": "vpn.example.com",
            "start_address": "10.0.0.1",
            "aaa_server": "ISE",
            "group_policy": "Staff"
        }"#;
        let request = AllocationRequest::from_json_str(content).unwrap();
        assert!(request.identifiers.is_empty());
        assert_eq!(request.aaa_server, "ISE");
        assert_eq!(request.render().unwrap(), "");
    }

    #[test]
    fn test_from_toml_str_missing_field() {
        let err = AllocationRequest::from_toml_str("device = \"fw1\"").unwrap_err();
        assert!(matches!(err, Error::Deserialization(_)));
    }

    #[test]
    fn test_toml_string_reloads() {
        let request = sample();
        let content = request.to_toml_string().unwrap();
        assert!(content.contains("start_address = \"192.168.1.1\""));
        assert_eq!(AllocationRequest::from_toml_str(&content).unwrap(), request);
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            sample().validate().unwrap(),
            "192.168.1.1".parse::<Ipv4Addr>().unwrap()
        );

        let mut request = sample();
        request.start_address = "999.1.1.1".to_string();
        assert!(matches!(request.validate(), Err(Error::InvalidAddress(_))));
        assert!(matches!(request.allocations(), Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn test_add_identifier() {
        let mut request = sample();
        request.add_identifier("carol");
        let allocations = request.allocations().unwrap();
        assert_eq!(allocations.len(), 3);
        assert_eq!(allocations[2], Allocation::new("carol", "192.168.1.3".parse().unwrap()));
    }
}
