//! Process-wide firewall instance.
//!
//! The global firewall is installed once and stays read-only for the rest of
//! the process.

use once_cell::sync::OnceCell;

use crate::error::{Error, Result};
use crate::Firewall;

/// Global firewall
static GLOBAL_FIREWALL: OnceCell<Firewall> = OnceCell::new();

/// Install the global firewall.
///
/// Fails with [`Error::AlreadyInitialized`] if one is already installed.
pub fn init_firewall(firewall: Firewall) -> Result<()> {
    let name = firewall.name().to_string();
    GLOBAL_FIREWALL
        .set(firewall)
        .map_err(|_| Error::AlreadyInitialized)?;
    log::debug!("Installed global firewall: {}", name);
    Ok(())
}

/// Check if the global firewall is installed.
pub fn is_initialized() -> bool {
    GLOBAL_FIREWALL.get().is_some()
}

/// Get the global firewall.
pub fn global_firewall() -> Result<&'static Firewall> {
    GLOBAL_FIREWALL.get().ok_or(Error::NotInitialized)
}

/// Evaluate a packet against the global firewall.
///
/// See [`Firewall::accept_packet`].
pub fn accept_packet(direction: &str, protocol: &str, port: u32, ip_address: &str) -> Result<bool> {
    global_firewall()?.accept_packet(direction, protocol, port, ip_address)
}
