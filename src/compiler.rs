//! Rule compilation into per-port range tables.

use crate::rule::RuleRecord;
use crate::table::PortTable;

/// Builds a [`PortTable`] from rule records.
///
/// Each record's address interval is merged into the range table of every
/// port in its port range, so a record costs one insertion per port.
#[derive(Debug, Default)]
pub struct RuleCompiler {
    table: PortTable,
    records: usize,
}

impl RuleCompiler {
    /// Create a compiler with an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one record into the table.
    ///
    /// A record with reversed bounds is logged and skipped.
    pub fn add(&mut self, record: &RuleRecord) {
        let Some(interval) = record.interval().filter(|_| record.is_valid()) else {
            log::warn!("Skipping rule record with reversed bounds: {:?}", record);
            return;
        };
        for port in record.ports() {
            self.table.table_mut(port).insert(interval);
        }
        self.records += 1;
    }

    /// Number of records merged so far.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Finish compilation.
    pub fn finish(self) -> PortTable {
        self.table
    }

    /// Compile a whole batch of records.
    pub fn compile<'a, I>(records: I) -> PortTable
    where
        I: IntoIterator<Item = &'a RuleRecord>,
    {
        let mut compiler = Self::new();
        for record in records {
            compiler.add(record);
        }
        compiler.finish()
    }
}
