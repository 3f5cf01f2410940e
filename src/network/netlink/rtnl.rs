//! Route-netlink link and address messages.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::attr::{self, AttrIter};
use crate::network::{AddressFamily, AddressRecord, QueryError, Scope};

/// Address family values on the wire.
pub const AF_UNSPEC: u8 = 0;
pub const AF_INET: u8 = 2;
pub const AF_INET6: u8 = 10;

/// Interface flag marking loopback devices.
pub const IFF_LOOPBACK: u32 = 0x8;

/// `errno` returned for an unknown interface.
pub const ENODEV: i32 = 19;

/// Link attributes (IFLA_*).
pub mod ifla {
    pub const ADDRESS: u16 = 1;
    pub const IFNAME: u16 = 3;
}

/// Address attributes (IFA_*).
pub mod ifa {
    pub const ADDRESS: u16 = 1;
    pub const LOCAL: u16 = 2;
    pub const BROADCAST: u16 = 4;
}

/// Interface info message (struct ifinfomsg).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct IfInfoMsg {
    /// Address family (usually `AF_UNSPEC`).
    pub ifi_family: u8,
    /// Padding.
    pub ifi_pad: u8,
    /// Device type (ARPHRD_*).
    pub ifi_type: u16,
    /// Interface index.
    pub ifi_index: i32,
    /// Device flags (IFF_*).
    pub ifi_flags: u32,
    /// Change mask.
    pub ifi_change: u32,
}

/// Interface address message (struct ifaddrmsg).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct IfAddrMsg {
    /// Address family (`AF_INET`, `AF_INET6`).
    pub ifa_family: u8,
    /// Prefix length.
    pub ifa_prefixlen: u8,
    /// Address flags.
    pub ifa_flags: u8,
    /// Address scope.
    pub ifa_scope: u8,
    /// Interface index.
    pub ifa_index: u32,
}

/// Wire value of an address family.
#[must_use]
pub const fn family_code(family: AddressFamily) -> u8 {
    match family {
        AddressFamily::V4 => AF_INET,
        AddressFamily::V6 => AF_INET6,
    }
}

/// A parsed `RTM_NEWLINK` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMessage {
    /// Interface index.
    pub index: i32,
    /// Interface name.
    pub name: Option<String>,
    /// Raw link-layer address.
    pub address: Option<Vec<u8>>,
    /// Device flags.
    pub flags: u32,
}

impl LinkMessage {
    /// Returns true if the device is flagged loopback.
    #[must_use]
    pub const fn is_loopback(&self) -> bool {
        self.flags & IFF_LOOPBACK != 0
    }

    /// Formats the link-layer address as colon-separated lowercase hex.
    #[must_use]
    pub fn hardware_address(&self) -> Option<String> {
        self.address.as_deref().and_then(format_hardware_address)
    }
}

/// Parses the payload of an `RTM_NEWLINK` message.
///
/// # Errors
///
/// Returns [`QueryError::Truncated`] if the payload lacks an `ifinfomsg`.
pub fn parse_link(payload: &[u8]) -> Result<LinkMessage, QueryError> {
    let (info, rest) = IfInfoMsg::ref_from_prefix(payload).map_err(|_| QueryError::Truncated {
        expected: std::mem::size_of::<IfInfoMsg>(),
        actual: payload.len(),
    })?;

    let mut link = LinkMessage {
        index: info.ifi_index,
        name: None,
        address: None,
        flags: info.ifi_flags,
    };

    for (kind, data) in AttrIter::new(rest) {
        match kind {
            ifla::IFNAME => link.name = attr::string(data),
            ifla::ADDRESS => link.address = Some(data.to_vec()),
            _ => {}
        }
    }

    Ok(link)
}

/// A parsed `RTM_NEWADDR` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressMessage {
    /// Index of the interface owning the address.
    pub index: u32,
    /// The address in record form.
    pub record: AddressRecord,
}

/// Parses the payload of an `RTM_NEWADDR` message.
///
/// `IFA_LOCAL` wins over `IFA_ADDRESS` for the local address; on
/// point-to-point links `IFA_ADDRESS` carries the peer. Broadcast is kept
/// for IPv4 only and scope for IPv6 only.
///
/// Returns `Ok(None)` for families other than IPv4/IPv6.
///
/// # Errors
///
/// Returns [`QueryError::Truncated`] if the payload lacks an `ifaddrmsg`.
pub fn parse_address(payload: &[u8]) -> Result<Option<AddressMessage>, QueryError> {
    let (msg, rest) = IfAddrMsg::ref_from_prefix(payload).map_err(|_| QueryError::Truncated {
        expected: std::mem::size_of::<IfAddrMsg>(),
        actual: payload.len(),
    })?;

    let family = match msg.ifa_family {
        AF_INET => AddressFamily::V4,
        AF_INET6 => AddressFamily::V6,
        _ => return Ok(None),
    };

    let mut local = None;
    let mut address = None;
    let mut broadcast = None;

    for (kind, data) in AttrIter::new(rest) {
        match kind {
            ifa::LOCAL => local = ip_from_bytes(family, data),
            ifa::ADDRESS => address = ip_from_bytes(family, data),
            ifa::BROADCAST if family == AddressFamily::V4 => {
                broadcast = ip_from_bytes(family, data);
            }
            _ => {}
        }
    }

    let scope = match family {
        AddressFamily::V4 => None,
        AddressFamily::V6 => Some(Scope::from_raw(msg.ifa_scope)),
    };

    Ok(Some(AddressMessage {
        index: msg.ifa_index,
        record: AddressRecord {
            family,
            local: local.or(address),
            prefix_len: msg.ifa_prefixlen,
            broadcast,
            scope,
        },
    }))
}

/// Formats a link-layer address; empty addresses yield `None`.
#[must_use]
pub fn format_hardware_address(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let parts: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Some(parts.join(":"))
}

fn ip_from_bytes(family: AddressFamily, data: &[u8]) -> Option<IpAddr> {
    match family {
        AddressFamily::V4 => {
            let octets: [u8; 4] = data.get(..4)?.try_into().ok()?;
            Some(IpAddr::V4(Ipv4Addr::from(octets)))
        }
        AddressFamily::V6 => {
            let octets: [u8; 16] = data.get(..16)?.try_into().ok()?;
            Some(IpAddr::V6(Ipv6Addr::from(octets)))
        }
    }
}
