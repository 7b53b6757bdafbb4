//! K2FW - A port-indexed firewall rule compiler.
//!
//! This crate answers whether a `(direction, protocol, port, IPv4 address)`
//! packet tuple is permitted by a set of allow rules.
//!
//! # Features
//!
//! - **Range merging**: overlapping address ranges are merged per port at compile time
//! - **Logarithmic lookups**: each query is a binary search over one port's ranges
//! - **Full port domain**: every port `0..=65535` has its own table
//! - **Read-only after compilation**: a compiled [`Firewall`] is `Send + Sync`
//! - **CSV rule sources**: plain or gzip-compressed, single addresses, ranges or CIDR blocks
//!
//! # Quick Start
//!
//! ```
//! use k2fw::Firewall;
//!
//! let rules = "\
//! inbound,tcp,80,192.168.1.2
//! outbound,tcp,10000-20000,192.168.10.11
//! inbound,udp,53,192.168.1.1-192.168.2.5
//! ";
//!
//! let firewall = Firewall::from_reader(rules.as_bytes())?;
//! assert!(firewall.accept_packet("inbound", "tcp", 80, "192.168.1.2")?);
//! assert!(firewall.accept_packet("outbound", "tcp", 10234, "192.168.10.11")?);
//! assert!(!firewall.accept_packet("inbound", "tcp", 81, "192.168.1.2")?);
//!
//! // Malformed input is an error, not a denial.
//! assert!(firewall.accept_packet("inbound", "tcp", 70000, "192.168.1.2").is_err());
//! # Ok::<(), k2fw::Error>(())
//! ```
//!
//! # Rule Format
//!
//! One rule per line: `direction,protocol,ports,addresses`
//!
//! - **direction**: `inbound` or `outbound`
//! - **protocol**: `tcp` or `udp`
//! - **ports**: `80` or `10000-20000`
//! - **addresses**: `10.0.0.1`, `10.0.0.1-10.0.0.9` or `10.0.0.0/8`

mod category;
mod compiler;
mod error;
mod firewall;
mod global;
mod interval;

pub mod config;
pub mod converter;
pub mod rule;
pub mod table;

// Re-export core types
pub use category::{Category, Direction, Protocol};
pub use compiler::RuleCompiler;
pub use error::{Error, Result};
pub use interval::Interval;
pub use table::{PortTable, RangeTable};

// Re-export firewall types
pub use config::FirewallConfig;
pub use firewall::{CategoryStats, Firewall, FirewallBuilder, FirewallStats};
pub use rule::{FirewallRule, RuleRecord};

// Re-export global API functions
pub use global::{accept_packet, global_firewall, init_firewall, is_initialized};
