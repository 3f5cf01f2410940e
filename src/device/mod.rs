//! Device information object model.
//!
//! This module provides:
//! - The per-interface view with lazy, cached link lookup ([`DeviceInfo`])
//! - Named attribute and method dispatch ([`Attribute`], [`Method`], [`AttributeAccess`])
//! - The single-address legacy view ([`LegacyIpv4`])
//! - Aggregated state and its text rendering ([`DeviceReport`])

mod attribute;
mod error;
mod info;
mod legacy;
mod report;


pub use attribute::{Attribute, AttributeAccess, AttributeValue, Member, Method};
pub use error::DeviceError;
pub use info::DeviceInfo;
pub use legacy::{LegacyIpv4, last_address};
pub use report::DeviceReport;
