//! Compiled firewall and packet evaluation.

use ahash::AHashSet;
use flate2::read::GzDecoder;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::net::Ipv4Addr;
use std::path::Path;

use crate::compiler::RuleCompiler;
use crate::config::FirewallConfig;
use crate::converter::CsvParser;
use crate::rule::{ip_to_u32, FirewallRule};
use crate::table::{PortTable, PortTableStats, RangeTable};
use crate::{Category, Direction, Error, Interval, Protocol, Result};

/// A compiled, read-only set of firewall rules.
///
/// Holds one [`PortTable`] per [`Category`]. Nothing mutates the tables once
/// built, so a `Firewall` can be shared across threads without locking.
///
/// # Examples
/// ```
/// use k2fw::{Direction, Firewall, Protocol};
///
/// let firewall = Firewall::from_reader("inbound,tcp,80,192.168.1.2\n".as_bytes()).unwrap();
/// let ip = "192.168.1.2".parse().unwrap();
/// assert!(firewall.evaluate(Direction::Inbound, Protocol::Tcp, 80, ip).unwrap());
/// assert!(!firewall.evaluate(Direction::Inbound, Protocol::Tcp, 81, ip).unwrap());
/// ```
#[derive(Debug)]
pub struct Firewall {
    name: String,
    rule_count: usize,
    tables: [PortTable; Category::COUNT],
}

impl Firewall {
    /// Start building a firewall.
    pub fn builder() -> FirewallBuilder {
        FirewallBuilder::new()
    }

    /// Compile a firewall from parsed rules.
    pub fn from_rules<I: IntoIterator<Item = FirewallRule>>(rules: I) -> Self {
        Self::builder().add_rules(rules).build()
    }

    /// Parse CSV rules from a reader and compile them.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_rules(CsvParser::parse(reader)?))
    }

    /// Load and compile a CSV rule file; `.gz` files are decompressed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let rules = read_rule_file(path)?;
        let firewall = Self::builder()
            .name(path.display().to_string())
            .add_rules(rules)
            .build();
        log::info!(
            "Loaded firewall from {:?}: {} rules",
            path,
            firewall.rule_count
        );
        Ok(firewall)
    }

    /// Load and compile every rule file named by a configuration.
    pub fn from_config(config: &FirewallConfig) -> Result<Self> {
        let mut builder = Self::builder().name(config.name.clone());
        for path in &config.rule_files {
            builder = builder.add_rules(read_rule_file(path)?);
        }
        let firewall = builder.build();
        log::info!(
            "Loaded firewall '{}' from {} files: {} rules",
            firewall.name,
            config.rule_files.len(),
            firewall.rule_count
        );
        Ok(firewall)
    }

    /// Name of this firewall.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of distinct rules compiled into this firewall.
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Compiled port table of a category.
    pub fn table(&self, category: Category) -> &PortTable {
        &self.tables[category.index()]
    }

    /// Permitted address intervals for a category and port.
    pub fn ranges(&self, category: Category, port: u32) -> Result<&[Interval]> {
        Ok(self.table(category).get(port)?.ranges())
    }

    /// Check whether `addr` may pass on `port` within `category`.
    ///
    /// `Ok(false)` means no rule covers the packet. A port above 65535 is an
    /// [`Error::InvalidPort`], never a denial.
    pub fn query(&self, category: Category, port: u32, addr: u32) -> Result<bool> {
        let table: &RangeTable = self.table(category).get(port)?;
        Ok(table.contains(addr))
    }

    /// Evaluate a packet tuple.
    pub fn evaluate(
        &self,
        direction: Direction,
        protocol: Protocol,
        port: u32,
        ip: Ipv4Addr,
    ) -> Result<bool> {
        self.evaluate_u32(direction, protocol, port, u32::from(ip))
    }

    /// Evaluate a packet tuple with the address given as an integer.
    pub fn evaluate_u32(
        &self,
        direction: Direction,
        protocol: Protocol,
        port: u32,
        ip: u32,
    ) -> Result<bool> {
        self.query(Category::new(direction, protocol), port, ip)
    }

    /// Evaluate a packet tuple given as text, e.g.
    /// `accept_packet("inbound", "tcp", 80, "192.168.1.2")`.
    pub fn accept_packet(
        &self,
        direction: &str,
        protocol: &str,
        port: u32,
        ip_address: &str,
    ) -> Result<bool> {
        let category = Category::from_parts(direction, protocol)?;
        let addr = ip_to_u32(ip_address)?;
        self.query(category, port, addr)
    }

    /// Size summary for every category.
    pub fn stats(&self) -> FirewallStats {
        FirewallStats {
            name: self.name.clone(),
            rules: self.rule_count,
            categories: Category::ALL
                .iter()
                .map(|&category| CategoryStats {
                    category,
                    table: self.table(category).stats(),
                })
                .collect(),
        }
    }
}

fn read_rule_file(path: &Path) -> Result<Vec<FirewallRule>> {
    let file = File::open(path)?;
    let is_gzip = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    let parsed = if is_gzip {
        CsvParser::parse(GzDecoder::new(file))
    } else {
        CsvParser::parse(file)
    };
    let rules = parsed.map_err(|e| match e {
        Error::Parse { line, message } => Error::Parse {
            line,
            message: format!("{}: {}", path.display(), message),
        },
        other => other,
    })?;

    if rules.is_empty() {
        log::warn!("Rule file {:?} contains no rules", path);
    }
    Ok(rules)
}

/// Collects rules and compiles them into a [`Firewall`].
///
/// Identical rules are only compiled once.
#[derive(Debug)]
pub struct FirewallBuilder {
    name: String,
    rules: Vec<FirewallRule>,
    seen: AHashSet<FirewallRule>,
}

impl FirewallBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            name: "default".to_string(),
            rules: Vec::new(),
            seen: AHashSet::new(),
        }
    }

    /// Set the firewall name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add one rule.
    pub fn add_rule(mut self, rule: FirewallRule) -> Self {
        if self.seen.insert(rule) {
            self.rules.push(rule);
        }
        self
    }

    /// Add many rules.
    pub fn add_rules<I: IntoIterator<Item = FirewallRule>>(mut self, rules: I) -> Self {
        for rule in rules {
            self = self.add_rule(rule);
        }
        self
    }

    /// Compile all collected rules.
    pub fn build(self) -> Firewall {
        let mut compilers: [RuleCompiler; Category::COUNT] =
            std::array::from_fn(|_| RuleCompiler::new());

        for rule in &self.rules {
            compilers[rule.category.index()].add(&rule.record);
        }

        for category in Category::ALL {
            log::debug!(
                "Compiled {} rules for {}",
                compilers[category.index()].record_count(),
                category
            );
        }

        Firewall {
            name: self.name,
            rule_count: self.rules.len(),
            tables: compilers.map(RuleCompiler::finish),
        }
    }
}

impl Default for FirewallBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compilation statistics of a [`Firewall`].
#[derive(Debug, Clone, Serialize)]
pub struct FirewallStats {
    pub name: String,
    pub rules: usize,
    pub categories: Vec<CategoryStats>,
}

/// Compilation statistics of one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    #[serde(flatten)]
    pub table: PortTableStats,
}
