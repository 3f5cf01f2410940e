//! Error types for device attribute access.

use thiserror::Error;

use crate::network::QueryError;

/// Error type for [`DeviceInfo`](super::DeviceInfo) operations.
///
/// Absence is never an error: a missing hardware address, an empty address
/// list or a record without broadcast are returned as values.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The requested name is neither an attribute nor a method.
    #[error("'{device}' has no attribute '{name}'")]
    AttributeNotFound {
        /// Device the lookup was made on.
        device: String,
        /// The unrecognized attribute name.
        name: String,
    },

    /// An attribute write was attempted.
    #[error("device info member values are read-only (attempted to set '{name}')")]
    ReadOnly {
        /// The attribute name the caller tried to set.
        name: String,
    },

    /// The underlying query could not be completed.
    #[error("Query failed for '{device}': {source}")]
    Query {
        /// Device the query was made for.
        device: String,
        /// Transport error.
        #[source]
        source: QueryError,
    },
}

impl DeviceError {
    /// Wraps a transport error with the device it occurred on.
    #[must_use]
    pub fn query(device: &str, source: QueryError) -> Self {
        Self::Query {
            device: device.to_string(),
            source,
        }
    }

    /// Returns true if this error came from the transport.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Query { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_not_found_names_device_and_attribute() {
        let error = DeviceError::AttributeNotFound {
            device: "eth0".to_string(),
            name: "speed".to_string(),
        };
        assert_eq!(error.to_string(), "'eth0' has no attribute 'speed'");
    }

    #[test]
    fn read_only_names_attribute() {
        let error = DeviceError::ReadOnly {
            name: "mac_address".to_string(),
        };
        assert!(error.to_string().contains("read-only"));
        assert!(error.to_string().contains("mac_address"));
    }

    #[test]
    fn query_keeps_source() {
        let error = DeviceError::query(
            "eth1",
            QueryError::DeviceNotFound {
                name: "eth1".to_string(),
            },
        );

        assert!(error.is_transport());
        assert!(error.to_string().contains("eth1"));
        let source = std::error::Error::source(&error).unwrap();
        assert_eq!(source.to_string(), "Device not found: eth1");
    }

    #[test]
    fn non_query_errors_are_not_transport() {
        let error = DeviceError::ReadOnly {
            name: "device".to_string(),
        };
        assert!(!error.is_transport());
    }
}
