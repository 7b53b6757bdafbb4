//! IPv4 address conversion and range parsing.

use ipnet::Ipv4Net;
use std::net::Ipv4Addr;

use crate::{Error, Result};

/// Convert a dotted-decimal IPv4 address to its big-endian integer value.
///
/// # Examples
/// ```
/// assert_eq!(k2fw::rule::ip_to_u32("1.1.1.1").unwrap(), 0x01010101);
/// assert!(k2fw::rule::ip_to_u32("256.0.0.1").is_err());
/// ```
pub fn ip_to_u32(ip: &str) -> Result<u32> {
    let ip = ip.trim();
    ip.parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| Error::InvalidIpAddress(ip.to_string()))
}

/// Convert an address integer back to an [`Ipv4Addr`].
pub fn u32_to_ip(value: u32) -> Ipv4Addr {
    Ipv4Addr::from(value)
}

/// Parse an address field into inclusive integer bounds.
///
/// Accepted forms:
/// - a single address: `192.168.1.2`
/// - a range: `192.168.1.1-192.168.2.5`
/// - a CIDR block: `10.0.0.0/8`
pub fn parse_ip_range(field: &str) -> Result<(u32, u32)> {
    let field = field.trim();

    if let Some((min, max)) = field.split_once('-') {
        let (lo, hi) = (ip_to_u32(min)?, ip_to_u32(max)?);
        if lo > hi {
            return Err(Error::InvalidIpRange {
                min: min.trim().to_string(),
                max: max.trim().to_string(),
            });
        }
        return Ok((lo, hi));
    }

    if field.contains('/') {
        let net: Ipv4Net = field
            .parse()
            .map_err(|_| Error::InvalidIpAddress(field.to_string()))?;
        return Ok((u32::from(net.network()), u32::from(net.broadcast())));
    }

    let ip = ip_to_u32(field)?;
    Ok((ip, ip))
}
