//! Integration tests for loading and evaluating firewall rules.

use flate2::write::GzEncoder;
use flate2::Compression;
use k2fw::{Category, Direction, Error, Firewall, FirewallConfig, Protocol};
use std::fs;
use std::io::Write;
use std::net::Ipv4Addr;
use std::sync::Arc;

const DEV_RULES: &str = "\
direction,protocol,port,ip_address
inbound,tcp,80,192.168.1.2
outbound,tcp,10000-20000,192.168.10.11
inbound,udp,53,192.168.1.1-192.168.2.5
outbound,udp,1000-2000,52.12.48.92
";

fn ip(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

#[test]
fn test_load_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dev.csv");
    fs::write(&path, DEV_RULES).unwrap();

    let fw = Firewall::from_path(&path).unwrap();
    assert_eq!(fw.rule_count(), 4);

    assert!(fw.accept_packet("inbound", "tcp", 80, "192.168.1.2").unwrap());
    assert!(fw.accept_packet("inbound", "udp", 53, "192.168.2.1").unwrap());
    assert!(fw.accept_packet("outbound", "tcp", 10234, "192.168.10.11").unwrap());
    assert!(!fw.accept_packet("inbound", "tcp", 81, "192.168.1.2").unwrap());
    assert!(!fw.accept_packet("inbound", "udp", 24, "52.12.48.92").unwrap());
}

#[test]
fn test_load_gzip_rules() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dev.csv.gz");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(DEV_RULES.as_bytes()).unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();

    let fw = Firewall::from_path(&path).unwrap();
    assert_eq!(fw.rule_count(), 4);
    assert!(fw
        .evaluate(Direction::Outbound, Protocol::Udp, 1500, ip("52.12.48.92"))
        .unwrap());
}

#[test]
fn test_load_from_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("web.csv"), "inbound,tcp,80,10.0.0.0/24\n").unwrap();
    fs::write(
        dir.path().join("dns.csv"),
        "inbound,udp,53,10.0.0.1-10.0.0.5\ninbound,tcp,80,10.0.0.0/24\n",
    )
    .unwrap();
    let config_path = dir.path().join("firewall.yml");
    fs::write(&config_path, "name: edge\nrule_files: [web.csv, dns.csv]\n").unwrap();

    let config = FirewallConfig::from_path(&config_path).unwrap();
    let fw = Firewall::from_config(&config).unwrap();

    assert_eq!(fw.name(), "edge");
    // The repeated web rule is compiled once.
    assert_eq!(fw.rule_count(), 2);
    assert!(fw.accept_packet("inbound", "tcp", 80, "10.0.0.255").unwrap());
    assert!(!fw.accept_packet("inbound", "tcp", 80, "10.0.1.0").unwrap());
    assert!(fw.accept_packet("inbound", "udp", 53, "10.0.0.5").unwrap());
}

#[test]
fn test_missing_rule_file() {
    let config = FirewallConfig::new("missing", vec!["/nonexistent/rules.csv".into()]);
    assert!(matches!(Firewall::from_config(&config), Err(Error::Io(_))));
}

#[test]
fn test_parse_error_names_file_and_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "inbound,tcp,80,10.0.0.1\ninbound,tcp,99999,10.0.0.1\n").unwrap();

    match Firewall::from_path(&path) {
        Err(Error::Parse { line, message }) => {
            assert_eq!(line, 2);
            assert!(message.contains("bad.csv"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_single_host_rule() {
    let fw = Firewall::from_reader("inbound,tcp,80,203.0.113.7\n".as_bytes()).unwrap();
    assert!(fw
        .evaluate(Direction::Inbound, Protocol::Tcp, 80, ip("203.0.113.7"))
        .unwrap());
    assert!(!fw
        .evaluate(Direction::Inbound, Protocol::Tcp, 80, ip("203.0.113.6"))
        .unwrap());
    assert!(!fw
        .evaluate(Direction::Inbound, Protocol::Tcp, 80, ip("203.0.113.8"))
        .unwrap());
}

#[test]
fn test_port_without_rules_rejects() {
    let fw = Firewall::from_reader(DEV_RULES.as_bytes()).unwrap();
    let category = Category::new(Direction::Inbound, Protocol::Tcp);
    assert!(fw.ranges(category, 443).unwrap().is_empty());
    assert!(!fw.query(category, 443, 0).unwrap());
    assert!(!fw.query(category, 443, u32::MAX).unwrap());
}

#[test]
fn test_max_port_is_valid() {
    let fw = Firewall::from_reader("outbound,udp,60000-65535,0.0.0.0/0\n".as_bytes()).unwrap();
    for addr in [0, 1, 0x7F000001, u32::MAX] {
        assert!(fw
            .evaluate_u32(Direction::Outbound, Protocol::Udp, 65535, addr)
            .unwrap());
    }
    assert!(!fw
        .evaluate_u32(Direction::Outbound, Protocol::Udp, 59999, 1)
        .unwrap());
    assert!(matches!(
        fw.evaluate_u32(Direction::Outbound, Protocol::Udp, 65536, 1),
        Err(Error::InvalidPort(65536))
    ));
}

#[test]
fn test_overlapping_rules_merge() {
    let rules = "\
inbound,tcp,22,10.0.0.10-10.0.0.20
inbound,tcp,22,10.0.0.30-10.0.0.40
inbound,tcp,22,10.0.0.15-10.0.0.35
inbound,tcp,22,10.0.0.41-10.0.0.50
";
    let fw = Firewall::from_reader(rules.as_bytes()).unwrap();
    let category = Category::new(Direction::Inbound, Protocol::Tcp);
    let ranges = fw.ranges(category, 22).unwrap();

    // 10-40 merged; 41-50 only touches and stays separate.
    assert_eq!(ranges.len(), 2);
    assert_eq!(Ipv4Addr::from(ranges[0].min()), ip("10.0.0.10"));
    assert_eq!(Ipv4Addr::from(ranges[0].max()), ip("10.0.0.40"));
    assert_eq!(Ipv4Addr::from(ranges[1].min()), ip("10.0.0.41"));

    for host in 10..=50u8 {
        let addr = Ipv4Addr::new(10, 0, 0, host);
        assert!(fw
            .evaluate(Direction::Inbound, Protocol::Tcp, 22, addr)
            .unwrap());
    }
    assert!(!fw
        .evaluate(Direction::Inbound, Protocol::Tcp, 22, ip("10.0.0.9"))
        .unwrap());
    assert!(!fw
        .evaluate(Direction::Inbound, Protocol::Tcp, 22, ip("10.0.0.51"))
        .unwrap());
}

#[test]
fn test_concurrent_readers() {
    let fw = Arc::new(Firewall::from_reader(DEV_RULES.as_bytes()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let fw = Arc::clone(&fw);
            std::thread::spawn(move || {
                for port in 10000..=20000u32 {
                    assert!(fw
                        .accept_packet("outbound", "tcp", port, "192.168.10.11")
                        .unwrap());
                }
                assert!(!fw
                    .accept_packet("outbound", "tcp", 9999 - i, "192.168.10.11")
                    .unwrap());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
