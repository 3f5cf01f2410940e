//! Network layer for querying interface link and address state.
//!
//! This module provides types and traits for:
//! - Representing configured addresses ([`AddressRecord`], [`AddressFamily`], [`Scope`])
//! - Representing link-layer information ([`LinkInfo`])
//! - Querying one interface ([`DeviceQueryClient`])
//! - Enumerating interfaces ([`DeviceEnumerator`], [`filter`])
//! - The netlink wire format ([`netlink`])
//! - Platform-specific implementations ([`platform`])

mod address;
mod client;
pub mod filter;
pub mod netlink;
pub mod platform;


pub use address::{AddressFamily, AddressRecord, DeviceEntry, LinkInfo, Scope};
pub use client::{DeviceEnumerator, DeviceQueryClient, QueryError};
