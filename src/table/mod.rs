//! Compiled lookup tables.

mod port;
mod range;

pub use port::{PortTable, PortTableStats};
pub use range::RangeTable;
