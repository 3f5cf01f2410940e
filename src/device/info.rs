//! The per-interface device object and its attribute resolver.

use std::cell::OnceCell;
use std::net::IpAddr;

use super::attribute::{Attribute, AttributeAccess, AttributeValue, Member, Method};
use super::legacy::LegacyIpv4;
use super::{DeviceError, DeviceReport};
use crate::network::{AddressFamily, AddressRecord, DeviceQueryClient, LinkInfo};

/// Live view of one network interface.
///
/// Link information (the hardware address) is fetched on first use and
/// cached for the lifetime of the object. Address lists are never cached:
/// every read issues a fresh query, so consecutive reads may observe
/// different kernel states.
///
/// The object is read-only to callers. Only the link cache changes, and it
/// is committed only after a successful query.
///
/// `DeviceInfo` is generic over its query client. Pass a
/// [`NetlinkClient`](crate::network::platform::NetlinkClient) by value to
/// give each device its own session, or by reference to share one.
///
/// # Example
///
/// ```no_run
/// use etherinfo::device::DeviceInfo;
/// use etherinfo::network::platform::PlatformClient;
///
/// let eth0 = DeviceInfo::new("eth0", PlatformClient::new());
/// println!("{}", eth0.to_display_string().expect("query failed"));
/// ```
#[derive(Debug)]
pub struct DeviceInfo<C> {
    name: String,
    client: C,
    link: OnceCell<LinkInfo>,
}

impl<C: DeviceQueryClient> DeviceInfo<C> {
    /// Creates a device view. No query is issued.
    pub fn new(name: impl Into<String>, client: C) -> Self {
        Self {
            name: name.into(),
            client,
            link: OnceCell::new(),
        }
    }

    /// The interface name given at construction.
    #[must_use]
    pub fn device(&self) -> &str {
        &self.name
    }

    /// The hardware address, fetched once and then served from the cache.
    ///
    /// A device without a hardware address yields `Ok(None)` and is not
    /// queried again.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Query`] if the first successful link query has
    /// not happened yet and this attempt fails. The cache stays empty, so
    /// the next call retries.
    pub fn mac_address(&self) -> Result<Option<&str>, DeviceError> {
        Ok(self.link()?.hardware_address.as_deref())
    }

    /// Local address of the last IPv4 record.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Query`] if the address query fails.
    pub fn ipv4_address(&self) -> Result<Option<IpAddr>, DeviceError> {
        Ok(self.legacy_ipv4()?.address)
    }

    /// Prefix length of the last IPv4 record, 0 without IPv4 records.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Query`] if the address query fails.
    pub fn ipv4_netmask(&self) -> Result<u8, DeviceError> {
        Ok(self.legacy_ipv4()?.netmask)
    }

    /// Broadcast address of the last IPv4 record.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Query`] if the address query fails.
    pub fn ipv4_broadcast(&self) -> Result<Option<IpAddr>, DeviceError> {
        Ok(self.legacy_ipv4()?.broadcast)
    }

    /// All three legacy IPv4 fields from a single query.
    ///
    /// Unlike reading [`ipv4_address`](Self::ipv4_address),
    /// [`ipv4_netmask`](Self::ipv4_netmask) and
    /// [`ipv4_broadcast`](Self::ipv4_broadcast) one by one, the fields are
    /// guaranteed to come from the same record.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Query`] if the address query fails.
    pub fn legacy_ipv4(&self) -> Result<LegacyIpv4, DeviceError> {
        Ok(LegacyIpv4::collapse(self.ipv4_addresses()?))
    }

    /// Every IPv4 record, in kernel order.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Query`] if the address query fails.
    pub fn ipv4_addresses(&self) -> Result<Vec<AddressRecord>, DeviceError> {
        self.addresses(AddressFamily::V4)
    }

    /// Every IPv6 record, in kernel order.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Query`] if the address query fails.
    pub fn ipv6_addresses(&self) -> Result<Vec<AddressRecord>, DeviceError> {
        self.addresses(AddressFamily::V6)
    }

    /// Reads a member by name.
    ///
    /// Attribute names resolve to their value. Method names resolve to a
    /// [`AttributeValue::Method`] handle without querying; pass it to
    /// [`call`](Self::call) to run it.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::AttributeNotFound`] for unknown names, or
    /// [`DeviceError::Query`] if resolving the attribute needs a query that
    /// fails.
    pub fn get(&self, name: &str) -> Result<AttributeValue, DeviceError> {
        match Member::lookup(name) {
            Some(Member::Attribute(attribute)) => self.resolve(attribute),
            Some(Member::Method(method)) => Ok(AttributeValue::Method(method)),
            None => Err(DeviceError::AttributeNotFound {
                device: self.name.clone(),
                name: name.to_string(),
            }),
        }
    }

    /// Resolves one attribute.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Query`] if the required query fails.
    pub fn resolve(&self, attribute: Attribute) -> Result<AttributeValue, DeviceError> {
        tracing::trace!(device = %self.name, %attribute, "Resolving attribute");
        let value = match attribute {
            Attribute::Device => AttributeValue::Text(self.name.clone()),
            Attribute::MacAddress => self.mac_address()?.map(str::to_string).into(),
            Attribute::Ipv4Address => self.ipv4_address()?.into(),
            Attribute::Ipv4Netmask => AttributeValue::Integer(self.ipv4_netmask()?.into()),
            Attribute::Ipv4Broadcast => self.ipv4_broadcast()?.into(),
        };
        Ok(value)
    }

    /// Runs a method.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Query`] if the address query fails.
    pub fn call(&self, method: Method) -> Result<Vec<AddressRecord>, DeviceError> {
        match method {
            Method::GetIpv4Addresses => self.ipv4_addresses(),
            Method::GetIpv6Addresses => self.ipv6_addresses(),
        }
    }

    /// Collects the cached link info and fresh address lists into a report.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Query`] if any of the queries fails.
    pub fn report(&self) -> Result<DeviceReport, DeviceError> {
        let mac_address = self.mac_address()?.map(str::to_string);
        Ok(DeviceReport {
            device: self.name.clone(),
            mac_address,
            ipv4_addresses: self.ipv4_addresses()?,
            ipv6_addresses: self.ipv6_addresses()?,
        })
    }

    /// Renders the device as human-readable text.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Query`] if any of the queries fails.
    pub fn to_display_string(&self) -> Result<String, DeviceError> {
        Ok(self.report()?.to_string())
    }

    /// Returns true once a link query has succeeded.
    #[must_use]
    pub fn is_link_cached(&self) -> bool {
        self.link.get().is_some()
    }

    /// The query client backing this device.
    pub const fn client(&self) -> &C {
        &self.client
    }

    fn link(&self) -> Result<&LinkInfo, DeviceError> {
        if let Some(link) = self.link.get() {
            tracing::trace!(device = %self.name, "Link info served from cache");
            return Ok(link);
        }

        let link = self
            .client
            .fetch_link(&self.name)
            .map_err(|e| DeviceError::query(&self.name, e))?;
        tracing::debug!(
            device = %self.name,
            mac = ?link.hardware_address,
            "Cached link info"
        );
        Ok(self.link.get_or_init(|| link))
    }

    fn addresses(&self, family: AddressFamily) -> Result<Vec<AddressRecord>, DeviceError> {
        let records = self
            .client
            .fetch_addresses(&self.name, family)
            .map_err(|e| DeviceError::query(&self.name, e))?;
        tracing::debug!(device = %self.name, %family, count = records.len(), "Fetched addresses");
        Ok(records)
    }
}

impl<C: DeviceQueryClient> AttributeAccess for DeviceInfo<C> {
    fn get_attr(&self, name: &str) -> Result<AttributeValue, DeviceError> {
        self.get(name)
    }

    fn set_attr(&self, name: &str, _value: AttributeValue) -> Result<(), DeviceError> {
        tracing::debug!(device = %self.name, name, "Rejected attribute write");
        Err(DeviceError::ReadOnly {
            name: name.to_string(),
        })
    }
}
