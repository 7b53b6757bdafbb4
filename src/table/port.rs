//! Port-indexed collection of range tables for one category.

use serde::Serialize;

use super::RangeTable;
use crate::rule::{check_port, PORT_COUNT};
use crate::Result;

/// One [`RangeTable`] for every port in `0..=65535`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortTable {
    tables: Vec<RangeTable>,
}

impl PortTable {
    /// Create a table in which every port rejects every address.
    pub fn new() -> Self {
        Self {
            tables: vec![RangeTable::new(); PORT_COUNT],
        }
    }

    /// Range table for a port, failing with [`Error::InvalidPort`](crate::Error::InvalidPort)
    /// outside `0..=65535`.
    pub fn get(&self, port: u32) -> Result<&RangeTable> {
        Ok(self.table(check_port(port)?))
    }

    /// Range table for an already validated port.
    pub fn table(&self, port: u16) -> &RangeTable {
        &self.tables[usize::from(port)]
    }

    pub(crate) fn table_mut(&mut self, port: u16) -> &mut RangeTable {
        &mut self.tables[usize::from(port)]
    }

    /// `true` if `addr` is permitted on `port`.
    pub fn query(&self, port: u32, addr: u32) -> Result<bool> {
        Ok(self.get(port)?.contains(addr))
    }

    /// Summarize how many ports and intervals this table holds.
    pub fn stats(&self) -> PortTableStats {
        let mut stats = PortTableStats::default();
        for table in self.tables.iter().filter(|t| !t.is_empty()) {
            stats.ports_with_rules += 1;
            stats.intervals += table.len();
            stats.max_intervals_per_port = stats.max_intervals_per_port.max(table.len());
        }
        stats
    }
}

impl Default for PortTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Size summary of a [`PortTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PortTableStats {
    /// Ports with at least one permitted interval
    pub ports_with_rules: usize,
    /// Intervals across all ports
    pub intervals: usize,
    /// Largest interval count on any single port
    pub max_intervals_per_port: usize,
}
