//! Traffic category definitions (direction × protocol).

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Direction of a packet relative to the protected host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    /// Parse a direction from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "inbound" => Some(Direction::Inbound),
            "outbound" => Some(Direction::Outbound),
            _ => None,
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownCategory(format!("direction '{}'", s.trim())))
    }
}

/// Transport protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    /// Parse a protocol from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tcp" => Some(Protocol::Tcp),
            "udp" => Some(Protocol::Udp),
            _ => None,
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownCategory(format!("protocol '{}'", s.trim())))
    }
}

/// One of the four fixed rule categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Category {
    pub direction: Direction,
    pub protocol: Protocol,
}

impl Category {
    /// Number of distinct categories.
    pub const COUNT: usize = 4;

    /// All categories in table order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::new(Direction::Inbound, Protocol::Tcp),
        Category::new(Direction::Outbound, Protocol::Tcp),
        Category::new(Direction::Inbound, Protocol::Udp),
        Category::new(Direction::Outbound, Protocol::Udp),
    ];

    /// Create a category from its parts.
    pub const fn new(direction: Direction, protocol: Protocol) -> Self {
        Self {
            direction,
            protocol,
        }
    }

    /// Build a category from separate direction and protocol strings.
    pub fn from_parts(direction: &str, protocol: &str) -> crate::Result<Self> {
        Ok(Self::new(direction.parse()?, protocol.parse()?))
    }

    /// Parse a `direction/protocol` key such as `inbound/tcp`.
    pub fn parse(s: &str) -> Option<Self> {
        let (direction, protocol) = s.split_once('/')?;
        Some(Self::new(
            Direction::parse(direction)?,
            Protocol::parse(protocol)?,
        ))
    }

    /// Position of this category in [`Category::ALL`].
    pub fn index(&self) -> usize {
        match (self.direction, self.protocol) {
            (Direction::Inbound, Protocol::Tcp) => 0,
            (Direction::Outbound, Protocol::Tcp) => 1,
            (Direction::Inbound, Protocol::Udp) => 2,
            (Direction::Outbound, Protocol::Udp) => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.direction, self.protocol)
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownCategory(s.trim().to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("inbound"), Some(Direction::Inbound));
        assert_eq!(Direction::parse("OUTBOUND"), Some(Direction::Outbound));
        assert_eq!(Direction::parse(" Inbound "), Some(Direction::Inbound));
        assert_eq!(Direction::parse("sideways"), None);
    }

    #[test]
    fn test_protocol_parse() {
        assert_eq!(Protocol::parse("tcp"), Some(Protocol::Tcp));
        assert_eq!(Protocol::parse("UDP"), Some(Protocol::Udp));
        assert_eq!(Protocol::parse("icmp"), None);
    }

    #[test]
    fn test_category_key() {
        let category: Category = "inbound/udp".parse().unwrap();
        assert_eq!(category, Category::new(Direction::Inbound, Protocol::Udp));
        assert_eq!(category.to_string(), "inbound/udp");

        assert!(matches!(
            "inbound/icmp".parse::<Category>(),
            Err(Error::UnknownCategory(_))
        ));
        assert!(matches!(
            "inbound".parse::<Category>(),
            Err(Error::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_category_from_parts() {
        assert!(Category::from_parts("outbound", "tcp").is_ok());
        assert!(matches!(
            Category::from_parts("upward", "tcp"),
            Err(Error::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_category_index_matches_all() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }
}
