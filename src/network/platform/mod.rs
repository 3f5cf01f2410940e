//! Platform-specific device query implementations.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of [`DeviceQueryClient`](super::DeviceQueryClient) and
//! [`DeviceEnumerator`](super::DeviceEnumerator).
//!
//! # Platform Support
//!
//! - **Linux**: Route netlink via the `netlink-sys` crate.
//! - **Other**: Every query fails with [`QueryError::Platform`](super::QueryError::Platform).

#[cfg(target_os = "linux")]
mod linux;

#[cfg(not(target_os = "linux"))]
mod unsupported;

#[cfg(target_os = "linux")]
pub use linux::NetlinkClient;

// Re-export platform-specific client as PlatformClient for convenience
#[cfg(target_os = "linux")]
pub use linux::NetlinkClient as PlatformClient;

#[cfg(not(target_os = "linux"))]
pub use unsupported::UnsupportedClient as PlatformClient;
