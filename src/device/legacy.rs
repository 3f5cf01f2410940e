//! Single-address view over a multi-address IPv4 list.
//!
//! Older consumers expect exactly one IPv4 address per device. The view
//! picks the last record of a freshly fetched list; an empty list yields
//! `none`, `0`, `none`.

use std::net::IpAddr;

use serde::Serialize;

use crate::network::AddressRecord;

/// Selects the record the legacy fields are read from.
///
/// Takes the list by value and returns an owned record, so the selection
/// never borrows from a transient query result.
#[must_use]
pub fn last_address(mut records: Vec<AddressRecord>) -> Option<AddressRecord> {
    records.pop()
}

/// The three legacy IPv4 fields, taken from one selected record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LegacyIpv4 {
    /// Local address of the selected record.
    pub address: Option<IpAddr>,
    /// Prefix length of the selected record, 0 when none was selected.
    pub netmask: u8,
    /// Broadcast address of the selected record.
    pub broadcast: Option<IpAddr>,
}

impl LegacyIpv4 {
    /// Collapses a fetched IPv4 list into the legacy fields.
    #[must_use]
    pub fn collapse(records: Vec<AddressRecord>) -> Self {
        last_address(records).map_or_else(Self::default, Self::from)
    }
}

impl From<AddressRecord> for LegacyIpv4 {
    fn from(record: AddressRecord) -> Self {
        Self {
            address: record.local,
            netmask: record.prefix_len,
            broadcast: record.broadcast,
        }
    }
}
