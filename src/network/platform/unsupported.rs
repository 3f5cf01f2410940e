//! Fallback client for platforms without a netlink backend.

use crate::network::{
    AddressFamily, AddressRecord, DeviceEntry, DeviceEnumerator, DeviceQueryClient, LinkInfo,
    QueryError,
};

/// Client that rejects every query.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedClient;

impl UnsupportedClient {
    /// Creates the fallback client.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn unsupported() -> QueryError {
    QueryError::Platform {
        message: format!("device queries are not supported on {}", std::env::consts::OS),
    }
}

impl DeviceQueryClient for UnsupportedClient {
    fn fetch_link(&self, _device: &str) -> Result<LinkInfo, QueryError> {
        Err(unsupported())
    }

    fn fetch_addresses(
        &self,
        _device: &str,
        _family: AddressFamily,
    ) -> Result<Vec<AddressRecord>, QueryError> {
        Err(unsupported())
    }
}

impl DeviceEnumerator for UnsupportedClient {
    fn list_devices(&self) -> Result<Vec<DeviceEntry>, QueryError> {
        Err(unsupported())
    }
}
