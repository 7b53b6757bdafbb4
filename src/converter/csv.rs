//! CSV rule source parser.
//!
//! Each row is `direction,protocol,ports,addresses`:
//!
//! ```text
//! # direction,protocol,port,ip_address
//! inbound,tcp,80,192.168.1.2
//! outbound,tcp,10000-20000,192.168.10.11
//! inbound,udp,53,192.168.1.1-192.168.2.5
//! outbound,udp,1000-2000,10.0.0.0/8
//! ```

use std::io::{BufRead, BufReader, Read};

use crate::rule::{parse_ip_range, parse_port_range, FirewallRule, RuleRecord};
use crate::{Category, Error, Result};

/// Parser for comma-separated firewall rules.
pub struct CsvParser;

impl CsvParser {
    /// Parse every rule from a reader.
    ///
    /// Blank lines, `#` comments and a leading `direction,...` header row are
    /// skipped. Any other malformed row fails with [`Error::Parse`].
    pub fn parse<R: Read>(reader: R) -> Result<Vec<FirewallRule>> {
        let buf_reader = BufReader::new(reader);
        let mut rules = Vec::new();
        let mut seen_row = false;

        for (idx, line) in buf_reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            // Remove comments
            let line = match line.find('#') {
                Some(pos) => &line[..pos],
                None => &line,
            };
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            // Only the first row may be a header.
            let first = !seen_row;
            seen_row = true;
            if first && is_header(line) {
                continue;
            }

            let rule = parse_row(line).map_err(|e| e.at_line(line_no))?;
            rules.push(rule);
        }

        log::debug!("Parsed {} firewall rules", rules.len());
        Ok(rules)
    }

    /// Parse rules held in a string.
    pub fn parse_str(text: &str) -> Result<Vec<FirewallRule>> {
        Self::parse(text.as_bytes())
    }
}

fn is_header(line: &str) -> bool {
    line.split(',')
        .next()
        .map(|f| f.trim().eq_ignore_ascii_case("direction"))
        .unwrap_or(false)
}

fn parse_row(line: &str) -> Result<FirewallRule> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [direction, protocol, ports, addresses] = fields[..] else {
        return Err(Error::Parse {
            line: 0,
            message: format!("expected 4 fields, found {}", fields.len()),
        });
    };

    let category = Category::from_parts(direction, protocol)?;
    let (min_port, max_port) = parse_port_range(ports)?;
    let (min_ip, max_ip) = parse_ip_range(addresses)?;

    Ok(FirewallRule::new(
        category,
        RuleRecord::new(min_port, max_port, min_ip, max_ip),
    ))
}
