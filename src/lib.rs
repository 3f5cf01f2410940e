//! etherinfo: network interface information backed by live netlink queries.
//!
//! Each [`device::DeviceInfo`] is a read-only view of one interface. Its
//! hardware address is fetched once and cached; its address lists are
//! queried fresh on every read.

pub mod config;
pub mod device;
pub mod network;
