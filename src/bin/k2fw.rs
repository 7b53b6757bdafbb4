//! k2fw: CLI tool for evaluating packets against CSV firewall rules.

use clap::{Args, Parser, Subcommand};
use k2fw::{Firewall, FirewallConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "k2fw")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Compile firewall rules and evaluate packets against them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct RuleSource {
    /// CSV rule files (may be gzip-compressed)
    #[arg(short, long)]
    rules: Vec<PathBuf>,

    /// YAML config listing rule files
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one packet; exits 0 on accept, 1 on deny
    Check {
        #[command(flatten)]
        source: RuleSource,

        /// inbound or outbound
        direction: String,

        /// tcp or udp
        protocol: String,

        /// Destination port
        port: u32,

        /// IPv4 address
        ip: String,
    },

    /// Print compilation statistics
    Stats {
        #[command(flatten)]
        source: RuleSource,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            source,
            direction,
            protocol,
            port,
            ip,
        } => check(&source, &direction, &protocol, port, &ip),
        Commands::Stats { source, json } => stats(&source, json).map(|_| ExitCode::SUCCESS),
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(2)
    })
}

fn load(source: &RuleSource) -> Result<Firewall, Box<dyn std::error::Error>> {
    let config = match &source.config {
        Some(path) => FirewallConfig::from_path(path)?,
        None => FirewallConfig::new("cli", source.rules.clone()),
    };
    Ok(Firewall::from_config(&config)?)
}

fn check(
    source: &RuleSource,
    direction: &str,
    protocol: &str,
    port: u32,
    ip: &str,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let firewall = load(source)?;

    if firewall.accept_packet(direction, protocol, port, ip)? {
        println!("ACCEPT");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("DENY");
        Ok(ExitCode::from(1))
    }
}

fn stats(source: &RuleSource, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let firewall = load(source)?;
    let stats = firewall.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Firewall: {} ({} rules)", stats.name, stats.rules);
    for category in &stats.categories {
        println!(
            "  {:<14} {:>6} ports  {:>8} ranges  (max {} on one port)",
            category.category.to_string(),
            category.table.ports_with_rules,
            category.table.intervals,
            category.table.max_intervals_per_port
        );
    }
    Ok(())
}
