//! Rule source parsers.

mod csv;

pub use csv::CsvParser;
