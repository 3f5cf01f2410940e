//! Aggregated device state and its text rendering.

use std::fmt;

use serde::Serialize;

use crate::network::AddressRecord;

/// Everything known about one device at one point in time.
///
/// The text form is produced by [`Display`](fmt::Display); the JSON form by
/// [`Serialize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceReport {
    /// Interface name.
    pub device: String,
    /// Cached hardware address.
    pub mac_address: Option<String>,
    /// IPv4 records in kernel order.
    pub ipv4_addresses: Vec<AddressRecord>,
    /// IPv6 records in kernel order.
    pub ipv6_addresses: Vec<AddressRecord>,
}

impl fmt::Display for DeviceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Device {}:", self.device)?;

        if let Some(mac) = &self.mac_address {
            writeln!(f, "\tMAC address: {mac}")?;
        }

        for record in &self.ipv4_addresses {
            write!(f, "\tIPv4 address: ")?;
            write_local(f, record)?;
            if let Some(broadcast) = record.broadcast {
                write!(f, "\t  Broadcast: {broadcast}")?;
            }
            writeln!(f)?;
        }

        for record in &self.ipv6_addresses {
            let scope = record.scope.map(|s| s.to_string()).unwrap_or_default();
            write!(f, "\tIPv6 address: [{scope}] ")?;
            write_local(f, record)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

fn write_local(f: &mut fmt::Formatter<'_>, record: &AddressRecord) -> fmt::Result {
    match record.local {
        Some(local) => write!(f, "{local}/{}", record.prefix_len),
        None => write!(f, "none/{}", record.prefix_len),
    }
}
