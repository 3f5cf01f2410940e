//! Core network types for link and address representation.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Address family of a configured address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    /// IPv4 (`AF_INET`).
    #[serde(rename = "ipv4")]
    V4,
    /// IPv6 (`AF_INET6`).
    #[serde(rename = "ipv6")]
    V6,
}

impl AddressFamily {
    /// Returns true if an address belongs to this family.
    #[must_use]
    pub const fn matches(self, addr: &IpAddr) -> bool {
        matches!(
            (self, addr),
            (Self::V4, IpAddr::V4(_)) | (Self::V6, IpAddr::V6(_))
        )
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Reachability domain of an address, as reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Globally routable (`RT_SCOPE_UNIVERSE`).
    Global,
    /// Site-local.
    Site,
    /// Valid only on this link.
    Link,
    /// Valid only inside this host.
    Host,
    /// Destination does not exist.
    Nowhere,
    /// A scope value without a well-known name.
    Other(u8),
}

impl Scope {
    /// Maps a raw `ifa_scope` value to a scope.
    #[must_use]
    pub const fn from_raw(value: u8) -> Self {
        match value {
            0 => Self::Global,
            200 => Self::Site,
            253 => Self::Link,
            254 => Self::Host,
            255 => Self::Nowhere,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Site => write!(f, "site"),
            Self::Link => write!(f, "link"),
            Self::Host => write!(f, "host"),
            Self::Nowhere => write!(f, "nowhere"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for Scope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One configured address on an interface.
///
/// Records are produced fresh by every query and never mutated afterwards.
///
/// # Equality
///
/// Two records are equal if every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressRecord {
    /// Address family.
    pub family: AddressFamily,
    /// Local address, `None` when the kernel reported no usable address.
    pub local: Option<IpAddr>,
    /// Prefix length, 0 if unknown.
    pub prefix_len: u8,
    /// Broadcast address (IPv4 only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<IpAddr>,
    /// Scope label (IPv6 only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

impl AddressRecord {
    /// Creates an IPv4 record.
    #[must_use]
    pub fn ipv4(local: impl Into<IpAddr>, prefix_len: u8, broadcast: Option<IpAddr>) -> Self {
        Self {
            family: AddressFamily::V4,
            local: Some(local.into()),
            prefix_len,
            broadcast,
            scope: None,
        }
    }

    /// Creates an IPv6 record.
    #[must_use]
    pub fn ipv6(local: impl Into<IpAddr>, prefix_len: u8, scope: Scope) -> Self {
        Self {
            family: AddressFamily::V6,
            local: Some(local.into()),
            prefix_len,
            broadcast: None,
            scope: Some(scope),
        }
    }
}

/// Link-layer information for one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkInfo {
    /// Hardware address as colon-separated lowercase hex, if the link has one.
    pub hardware_address: Option<String>,
}

impl LinkInfo {
    /// Creates link info carrying the given hardware address.
    #[must_use]
    pub fn with_hardware_address(address: impl Into<String>) -> Self {
        Self {
            hardware_address: Some(address.into()),
        }
    }
}

/// An interface as seen by device enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEntry {
    /// Interface name (e.g., "eth0").
    pub name: String,
    /// Whether the kernel flags this interface as loopback.
    pub loopback: bool,
}

impl DeviceEntry {
    /// Creates a device entry.
    #[must_use]
    pub fn new(name: impl Into<String>, loopback: bool) -> Self {
        Self {
            name: name.into(),
            loopback,
        }
    }
}
