//! Read-only inventory records handed in by the host application.
//!
//! These mirror the identifying attributes of NetBox objects; the host's
//! full data model stays on the host side. Addresses arrive in CIDR form
//! exactly as NetBox stores them (e.g., `10.0.0.5/24`).

use serde::Deserialize;

/// A physical device.
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    /// Device name, possibly a per-chassis-member name like `sw1.2`.
    pub name: String,
    /// Name of the virtual chassis this device belongs to, if any. Chassis
    /// members search under this shared identity instead of `name`.
    pub virtual_chassis: Option<String>,
    /// Primary IPv4 address in CIDR form.
    pub primary_ip4: Option<String>,
}

/// A virtual machine.
#[derive(Debug, Clone, Deserialize)]
pub struct VirtualMachine {
    pub name: String,
    /// Primary IPv4 address in CIDR form.
    pub primary_ip4: Option<String>,
}

/// A network endpoint (e.g., a host port or appliance).
#[derive(Debug, Clone, Deserialize)]
pub struct Endpoint {
    pub name: String,
    /// Carried through for display; endpoints are searched by name only.
    pub mac_address: Option<String>,
}
