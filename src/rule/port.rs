//! Port validation and range parsing.

use crate::{Error, Result};

/// Number of distinct ports, `0..=65535`.
pub const PORT_COUNT: usize = u16::MAX as usize + 1;

/// Narrow a port number to `u16`, failing with [`Error::InvalidPort`].
pub fn check_port(port: u32) -> Result<u16> {
    u16::try_from(port).map_err(|_| Error::InvalidPort(port.into()))
}

fn parse_port(s: &str) -> Result<u16> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedPort(s.to_string()));
    }

    // Digits beyond u64 are still just an out-of-range number.
    let value: u64 = s.parse().unwrap_or(u64::MAX);
    u16::try_from(value).map_err(|_| Error::InvalidPort(value))
}

/// Parse a port field: a single port (`80`) or a range (`10000-20000`).
pub fn parse_port_range(field: &str) -> Result<(u16, u16)> {
    match field.split_once('-') {
        Some((min, max)) => {
            let (lo, hi) = (parse_port(min)?, parse_port(max)?);
            if lo > hi {
                return Err(Error::InvalidPortRange {
                    min: lo.into(),
                    max: hi.into(),
                });
            }
            Ok((lo, hi))
        }
        None => {
            let port = parse_port(field)?;
            Ok((port, port))
        }
    }
}
