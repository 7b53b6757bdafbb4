//! Rule records consumed by the compiler.

mod address;
mod port;

pub use address::{ip_to_u32, parse_ip_range, u32_to_ip};
pub use port::{check_port, parse_port_range, PORT_COUNT};

use crate::{Category, Interval};

/// The port and address ranges of one rule, without its category.
///
/// Records only live between parsing and compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleRecord {
    pub min_port: u16,
    pub max_port: u16,
    pub min_ip: u32,
    pub max_ip: u32,
}

impl RuleRecord {
    /// Create a record.
    ///
    /// Callers must keep `min_port <= max_port` and `min_ip <= max_ip`;
    /// [`parse_port_range`] and [`parse_ip_range`] only produce ordered bounds.
    /// A record with reversed address bounds has no [`interval`](Self::interval)
    /// and one with reversed port bounds touches no port, so the compiler
    /// never stores an inverted interval.
    pub fn new(min_port: u16, max_port: u16, min_ip: u32, max_ip: u32) -> Self {
        Self {
            min_port,
            max_port,
            min_ip,
            max_ip,
        }
    }

    /// The address interval this record permits, `None` if its bounds are reversed.
    pub fn interval(&self) -> Option<Interval> {
        Interval::new(self.min_ip, self.max_ip)
    }

    /// `true` if both the port and the address bounds are ordered.
    pub fn is_valid(&self) -> bool {
        self.min_port <= self.max_port && self.min_ip <= self.max_ip
    }

    /// Iterate over every port the record applies to.
    pub fn ports(&self) -> impl Iterator<Item = u16> {
        self.min_port..=self.max_port
    }
}

/// A rule record tagged with the category it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FirewallRule {
    pub category: Category,
    pub record: RuleRecord,
}

impl FirewallRule {
    /// Create a rule.
    pub fn new(category: Category, record: RuleRecord) -> Self {
        Self { category, record }
    }
}
