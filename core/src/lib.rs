//! Static Tunnels Core Library
//!
//! This crate generates remote-access VPN configuration that gives each user a
//! dedicated single-host address pool and tunnel group, along with the matching
//! removal configuration.

pub mod allocator;
pub mod error;
pub mod model;
pub mod tunnel_config;

pub use allocator::{allocate, is_reserved, next_usable_address};
pub use error::{Error, Result};
pub use model::*;
pub use tunnel_config::TunnelConfigBuilder;
