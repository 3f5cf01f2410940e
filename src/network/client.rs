//! Device query traits and error types.

use std::rc::Rc;

use super::{AddressFamily, AddressRecord, DeviceEntry, LinkInfo};
use thiserror::Error;

/// Error type for device query operations.
///
/// Describes what went wrong on the transport without dictating recovery
/// strategy. An empty result is never an error; it is returned as data.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Socket-level failure (open, bind, send, receive).
    #[error("Netlink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The kernel rejected the request.
    #[error("Kernel error: {message} (errno {errno})")]
    Kernel {
        /// Positive errno value reported by the kernel.
        errno: i32,
        /// Human-readable description of the errno.
        message: String,
    },

    /// No interface with the requested name exists.
    #[error("Device not found: {name}")]
    DeviceNotFound {
        /// The interface name that was queried.
        name: String,
    },

    /// A reply was shorter than the structure it must contain.
    #[error("Message truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Minimum number of bytes required.
        expected: usize,
        /// Number of bytes available.
        actual: usize,
    },

    /// A reply could not be interpreted.
    #[error("Invalid netlink message: {0}")]
    InvalidMessage(String),

    /// The current platform has no query backend.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Trait for querying link and address state of a single interface.
///
/// # Design
///
/// - Every call performs one round-trip; implementations never cache
/// - Records are returned in kernel-reported order
/// - Enables dependency injection for testing with mock implementations
///
/// Calls are synchronous and block until the transport answers. The trait
/// has no `Send`/`Sync` bound: a session is owned by one thread.
pub trait DeviceQueryClient {
    /// Fetches link-layer information for `device`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the transport fails or the device does not exist.
    fn fetch_link(&self, device: &str) -> Result<LinkInfo, QueryError>;

    /// Fetches all addresses of `family` configured on `device`.
    ///
    /// An interface without addresses yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the transport fails or the device does not exist.
    fn fetch_addresses(
        &self,
        device: &str,
        family: AddressFamily,
    ) -> Result<Vec<AddressRecord>, QueryError>;
}

/// Trait for listing the interfaces known to the kernel.
pub trait DeviceEnumerator {
    /// Lists every interface in kernel order.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the transport fails.
    fn list_devices(&self) -> Result<Vec<DeviceEntry>, QueryError>;
}

impl<T: DeviceQueryClient + ?Sized> DeviceQueryClient for &T {
    fn fetch_link(&self, device: &str) -> Result<LinkInfo, QueryError> {
        (**self).fetch_link(device)
    }

    fn fetch_addresses(
        &self,
        device: &str,
        family: AddressFamily,
    ) -> Result<Vec<AddressRecord>, QueryError> {
        (**self).fetch_addresses(device, family)
    }
}

impl<T: DeviceQueryClient + ?Sized> DeviceQueryClient for Rc<T> {
    fn fetch_link(&self, device: &str) -> Result<LinkInfo, QueryError> {
        (**self).fetch_link(device)
    }

    fn fetch_addresses(
        &self,
        device: &str,
        family: AddressFamily,
    ) -> Result<Vec<AddressRecord>, QueryError> {
        (**self).fetch_addresses(device, family)
    }
}

impl<T: DeviceEnumerator + ?Sized> DeviceEnumerator for &T {
    fn list_devices(&self) -> Result<Vec<DeviceEntry>, QueryError> {
        (**self).list_devices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// A client that answers with fixed data and counts calls.
    struct CountingClient {
        link_calls: Cell<usize>,
        addr_calls: Cell<usize>,
    }

    impl CountingClient {
        const fn new() -> Self {
            Self {
                link_calls: Cell::new(0),
                addr_calls: Cell::new(0),
            }
        }
    }

    impl DeviceQueryClient for CountingClient {
        fn fetch_link(&self, _device: &str) -> Result<LinkInfo, QueryError> {
            self.link_calls.set(self.link_calls.get() + 1);
            Ok(LinkInfo::with_hardware_address("00:11:22:33:44:55"))
        }

        fn fetch_addresses(
            &self,
            device: &str,
            family: AddressFamily,
        ) -> Result<Vec<AddressRecord>, QueryError> {
            self.addr_calls.set(self.addr_calls.get() + 1);
            if device == "missing" {
                return Err(QueryError::DeviceNotFound {
                    name: device.to_string(),
                });
            }
            match family {
                AddressFamily::V4 => Ok(vec![AddressRecord::ipv4(
                    "10.0.0.1".parse::<std::net::IpAddr>().unwrap(),
                    8,
                    None,
                )]),
                AddressFamily::V6 => Ok(vec![]),
            }
        }
    }

    #[test]
    fn reference_forwards_to_inner_client() {
        let client = CountingClient::new();
        let by_ref = &client;

        let link = by_ref.fetch_link("eth0").unwrap();
        let v4 = by_ref.fetch_addresses("eth0", AddressFamily::V4).unwrap();

        assert_eq!(link.hardware_address.as_deref(), Some("00:11:22:33:44:55"));
        assert_eq!(v4.len(), 1);
        assert_eq!(client.link_calls.get(), 1);
        assert_eq!(client.addr_calls.get(), 1);
    }

    #[test]
    fn rc_shares_one_client() {
        let client = Rc::new(CountingClient::new());
        let a = Rc::clone(&client);
        let b = Rc::clone(&client);

        a.fetch_addresses("eth0", AddressFamily::V6).unwrap();
        b.fetch_addresses("eth0", AddressFamily::V6).unwrap();

        assert_eq!(client.addr_calls.get(), 2);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let client = CountingClient::new();
        let v6 = client.fetch_addresses("eth0", AddressFamily::V6).unwrap();
        assert!(v6.is_empty());
    }

    #[test]
    fn device_not_found_displays_name() {
        let client = CountingClient::new();
        let error = client
            .fetch_addresses("missing", AddressFamily::V4)
            .unwrap_err();
        assert_eq!(error.to_string(), "Device not found: missing");
    }

    #[test]
    fn kernel_error_displays_errno() {
        let error = QueryError::Kernel {
            errno: 1,
            message: "Operation not permitted".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Kernel error: Operation not permitted (errno 1)"
        );
    }

    #[test]
    fn io_error_converts_via_from() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = QueryError::from(io);
        assert!(matches!(error, QueryError::Io(_)));
        assert!(error.to_string().contains("denied"));
    }
}
