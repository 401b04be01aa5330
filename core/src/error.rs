//! Error types for the static-tunnels-core crate

use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),

    #[error("Address space exhausted: cannot place {requested} pool(s) starting at {start}")]
    AddressSpaceExhausted { start: Ipv4Addr, requested: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_address(addr: impl Into<String>) -> Self {
        Error::InvalidAddress(addr.into())
    }

    pub fn exhausted(start: Ipv4Addr, requested: usize) -> Self {
        Error::AddressSpaceExhausted { start, requested }
    }
}
