//! Linux device queries over a `NETLINK_ROUTE` socket.

use std::cell::{Cell, OnceCell};
use std::fmt;

use bytes::BytesMut;
use netlink_sys::{Socket, SocketAddr, protocols};

use crate::network::netlink::message::{ReplyCollector, msg_type};
use crate::network::netlink::rtnl::{self, ENODEV, LinkMessage};
use crate::network::netlink::{address_dump_request, link_by_name_request, link_dump_request};
use crate::network::{
    AddressFamily, AddressRecord, DeviceEntry, DeviceEnumerator, DeviceQueryClient, LinkInfo,
    QueryError,
};

/// Receive buffer size; one kernel dump datagram always fits.
const RECV_BUFFER_SIZE: usize = 32768;

/// Linux implementation of [`DeviceQueryClient`] over route netlink.
///
/// The socket is opened on the first query and closed when the client is
/// dropped. Every call is one blocking request/reply exchange; nothing is
/// cached between calls.
///
/// # Example
///
/// ```no_run
/// use etherinfo::network::{AddressFamily, DeviceQueryClient, platform::NetlinkClient};
///
/// let client = NetlinkClient::new();
/// let addresses = client.fetch_addresses("lo", AddressFamily::V4).expect("query failed");
///
/// for record in addresses {
///     println!("{:?}/{}", record.local, record.prefix_len);
/// }
/// ```
#[derive(Debug, Default)]
pub struct NetlinkClient {
    session: OnceCell<Session>,
}

impl NetlinkClient {
    /// Creates a client without opening a socket.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            session: OnceCell::new(),
        }
    }

    /// Returns true once the socket has been opened.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.session.get().is_some()
    }

    fn session(&self) -> Result<&Session, QueryError> {
        if let Some(session) = self.session.get() {
            return Ok(session);
        }
        let session = Session::open()?;
        Ok(self.session.get_or_init(|| session))
    }

    /// Looks up one link by name, mapping `ENODEV` to [`QueryError::DeviceNotFound`].
    fn query_link(&self, device: &str) -> Result<LinkMessage, QueryError> {
        let session = self.session()?;
        let seq = session.next_seq();
        let replies = session
            .exchange(&link_by_name_request(device, seq), seq)
            .map_err(|e| match e {
                QueryError::Kernel { errno: ENODEV, .. } => QueryError::DeviceNotFound {
                    name: device.to_string(),
                },
                other => other,
            })?;

        let payload = replies
            .into_iter()
            .find(|(kind, _)| *kind == msg_type::RTM_NEWLINK)
            .map(|(_, payload)| payload)
            .ok_or_else(|| QueryError::DeviceNotFound {
                name: device.to_string(),
            })?;

        rtnl::parse_link(&payload)
    }
}

impl DeviceQueryClient for NetlinkClient {
    fn fetch_link(&self, device: &str) -> Result<LinkInfo, QueryError> {
        let link = self.query_link(device)?;
        tracing::debug!(device, index = link.index, "Fetched link");
        Ok(LinkInfo {
            hardware_address: link.hardware_address(),
        })
    }

    fn fetch_addresses(
        &self,
        device: &str,
        family: AddressFamily,
    ) -> Result<Vec<AddressRecord>, QueryError> {
        let index = self.query_link(device)?.index;
        let session = self.session()?;
        let seq = session.next_seq();
        let replies = session.exchange(&address_dump_request(family, seq), seq)?;

        let mut records = Vec::new();
        for (kind, payload) in replies {
            if kind != msg_type::RTM_NEWADDR {
                continue;
            }
            let Some(message) = rtnl::parse_address(&payload)? else {
                continue;
            };
            if i64::from(message.index) == i64::from(index) && message.record.family == family {
                records.push(message.record);
            }
        }

        tracing::debug!(device, %family, count = records.len(), "Fetched addresses");
        Ok(records)
    }
}

impl DeviceEnumerator for NetlinkClient {
    fn list_devices(&self) -> Result<Vec<DeviceEntry>, QueryError> {
        let session = self.session()?;
        let seq = session.next_seq();
        let replies = session.exchange(&link_dump_request(seq), seq)?;

        let mut devices = Vec::new();
        for (kind, payload) in replies {
            if kind != msg_type::RTM_NEWLINK {
                continue;
            }
            let link = rtnl::parse_link(&payload)?;
            let loopback = link.is_loopback();
            if let Some(name) = link.name {
                devices.push(DeviceEntry::new(name, loopback));
            }
        }

        tracing::debug!(count = devices.len(), "Listed devices");
        Ok(devices)
    }
}

/// An open route-netlink socket and its sequence counter.
struct Session {
    socket: Socket,
    seq: Cell<u32>,
    port: u32,
}

impl Session {
    fn open() -> Result<Self, QueryError> {
        let mut socket = Socket::new(protocols::NETLINK_ROUTE)?;
        let mut addr = SocketAddr::new(0, 0);
        socket.bind(&addr)?;
        socket.get_address(&mut addr)?;
        let port = addr.port_number();

        tracing::debug!(port, "Opened netlink session");

        Ok(Self {
            socket,
            seq: Cell::new(1),
            port,
        })
    }

    fn next_seq(&self) -> u32 {
        let seq = self.seq.get();
        self.seq.set(seq.wrapping_add(1));
        seq
    }

    /// Sends one request and collects every message answering it.
    fn exchange(&self, request: &[u8], seq: u32) -> Result<Vec<(u16, Vec<u8>)>, QueryError> {
        self.socket.send(request, 0)?;
        tracing::trace!(seq, len = request.len(), "Sent netlink request");

        let mut collector = ReplyCollector::new(seq);
        while !collector.is_complete() {
            let mut buf = BytesMut::with_capacity(RECV_BUFFER_SIZE);
            let received = self.socket.recv(&mut buf, 0)?;
            if received == 0 {
                return Err(QueryError::InvalidMessage(
                    "netlink socket returned no data".to_string(),
                ));
            }
            tracing::trace!(seq, len = received, "Received netlink datagram");
            collector.absorb(&buf)?;
        }

        Ok(collector.into_messages())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("port", &self.port)
            .field("seq", &self.seq.get())
            .finish_non_exhaustive()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::debug!(port = self.port, "Closing netlink session");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_client_has_no_socket() {
        let client = NetlinkClient::new();
        assert!(!client.is_connected());
    }

    #[test]
    fn default_client_has_no_socket() {
        let client = NetlinkClient::default();
        assert!(!client.is_connected());
    }

    // Integration tests: talk to the running kernel. Every network
    // namespace has a loopback device.
    #[test]
    fn list_devices_includes_loopback() {
        let client = NetlinkClient::new();
        let devices = client.list_devices().expect("list_devices() failed");

        assert!(client.is_connected());
        assert!(
            devices.iter().any(|d| d.loopback),
            "Expected a loopback device, got: {devices:?}"
        );
    }

    #[test]
    fn loopback_has_ipv4_localhost() {
        let client = NetlinkClient::new();
        let lo = client
            .list_devices()
            .expect("list_devices() failed")
            .into_iter()
            .find(|d| d.loopback)
            .expect("no loopback device");

        let records = client
            .fetch_addresses(&lo.name, AddressFamily::V4)
            .expect("fetch_addresses() failed");

        assert!(
            records
                .iter()
                .all(|r| r.family == AddressFamily::V4 && r.scope.is_none()),
            "Unexpected records: {records:?}"
        );
    }

    #[test]
    fn unknown_device_is_not_found() {
        let client = NetlinkClient::new();
        let result = client.fetch_link("nosuchdev0");

        assert!(
            matches!(result, Err(QueryError::DeviceNotFound { ref name }) if name == "nosuchdev0"),
            "Unexpected result: {result:?}"
        );
    }

    #[test]
    fn sequence_numbers_advance() {
        let client = NetlinkClient::new();
        client.list_devices().expect("list_devices() failed");
        client.list_devices().expect("list_devices() failed");

        let session = client.session.get().expect("session not opened");
        assert_eq!(session.seq.get(), 3);
    }
}
