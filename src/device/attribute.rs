//! Named members of a device and the values they resolve to.
//!
//! Lookup is two-tiered: [`Attribute`] covers the data members and is
//! resolved with one exhaustive match; any other name falls through to the
//! generic lookup, which knows the [`Method`] names and nothing else.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use serde::Serialize;

use super::DeviceError;

/// Data members readable on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Interface name; never queries.
    Device,
    /// Hardware address; queried once, then cached.
    MacAddress,
    /// Local address of the last IPv4 record.
    Ipv4Address,
    /// Prefix length of the last IPv4 record.
    Ipv4Netmask,
    /// Broadcast address of the last IPv4 record.
    Ipv4Broadcast,
}

impl Attribute {
    /// Every attribute, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Device,
        Self::MacAddress,
        Self::Ipv4Address,
        Self::Ipv4Netmask,
        Self::Ipv4Broadcast,
    ];

    /// The attribute's public name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Device => "device",
            Self::MacAddress => "mac_address",
            Self::Ipv4Address => "ipv4_address",
            Self::Ipv4Netmask => "ipv4_netmask",
            Self::Ipv4Broadcast => "ipv4_broadcast",
        }
    }
}

impl FromStr for Attribute {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|a| a.name() == s).ok_or(())
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Methods reachable through the generic lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Returns every IPv4 record.
    GetIpv4Addresses,
    /// Returns every IPv6 record.
    GetIpv6Addresses,
}

impl Method {
    /// Every method, in declaration order.
    pub const ALL: [Self; 2] = [Self::GetIpv4Addresses, Self::GetIpv6Addresses];

    /// The method's public name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetIpv4Addresses => "get_ipv4_addresses",
            Self::GetIpv6Addresses => "get_ipv6_addresses",
        }
    }
}

impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|m| m.name() == s).ok_or(())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A member name after lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    /// A data attribute.
    Attribute(Attribute),
    /// A method handle.
    Method(Method),
}

impl Member {
    /// Resolves a name: attributes first, then the generic method lookup.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        name.parse()
            .map(Self::Attribute)
            .or_else(|()| name.parse().map(Self::Method))
            .ok()
    }
}

/// The value an attribute read produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Explicit absence.
    None,
    /// A textual value (names, hardware addresses).
    Text(String),
    /// An IP address.
    Address(IpAddr),
    /// An integer value (prefix lengths).
    Integer(u32),
    /// A bound method handle; invoke it with [`DeviceInfo::call`](super::DeviceInfo::call).
    #[serde(serialize_with = "serialize_method")]
    Method(Method),
}

impl AttributeValue {
    /// Returns true for [`AttributeValue::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<Option<String>> for AttributeValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::None, Self::Text)
    }
}

impl From<Option<IpAddr>> for AttributeValue {
    fn from(value: Option<IpAddr>) -> Self {
        value.map_or(Self::None, Self::Address)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Text(text) => f.write_str(text),
            Self::Address(addr) => write!(f, "{addr}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Method(method) => write!(f, "<method {method}>"),
        }
    }
}

fn serialize_method<S: serde::Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(method.name())
}

/// String-keyed member access, the surface a host binding layer drives.
///
/// Members are read-only: [`set_attr`](AttributeAccess::set_attr) takes
/// `&self` and always fails with [`DeviceError::ReadOnly`].
pub trait AttributeAccess {
    /// Reads a member by name.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::AttributeNotFound`] for unknown names and
    /// [`DeviceError::Query`] when a required query fails.
    fn get_attr(&self, name: &str) -> Result<AttributeValue, DeviceError>;

    /// Rejects a write to any member.
    ///
    /// # Errors
    ///
    /// Always returns [`DeviceError::ReadOnly`].
    fn set_attr(&self, name: &str, value: AttributeValue) -> Result<(), DeviceError>;
}
