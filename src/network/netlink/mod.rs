//! Netlink wire format for the route-netlink queries this crate issues.
//!
//! Only the read path is modelled: `RTM_GETLINK` and `RTM_GETADDR` requests
//! and their `RTM_NEWLINK` / `RTM_NEWADDR` replies. Everything here is pure
//! byte manipulation; the socket lives in [`crate::network::platform`].

pub mod attr;
pub mod message;
pub mod rtnl;

use message::{NLM_F_DUMP, NLM_F_REQUEST, Request, msg_type};
use rtnl::{AF_UNSPEC, IfAddrMsg, IfInfoMsg, family_code, ifla};

use super::AddressFamily;

/// Builds a request for a single link, looked up by name.
#[must_use]
pub fn link_by_name_request(name: &str, seq: u32) -> Vec<u8> {
    let info = IfInfoMsg {
        ifi_family: AF_UNSPEC,
        ..IfInfoMsg::default()
    };
    Request::new(msg_type::RTM_GETLINK, NLM_F_REQUEST)
        .family_header(&info)
        .attr_str(ifla::IFNAME, name)
        .finish(seq)
}

/// Builds a dump request for every link.
#[must_use]
pub fn link_dump_request(seq: u32) -> Vec<u8> {
    Request::new(msg_type::RTM_GETLINK, NLM_F_REQUEST | NLM_F_DUMP)
        .family_header(&IfInfoMsg::default())
        .finish(seq)
}

/// Builds a dump request for every address of one family.
#[must_use]
pub fn address_dump_request(family: AddressFamily, seq: u32) -> Vec<u8> {
    let msg = IfAddrMsg {
        ifa_family: family_code(family),
        ..IfAddrMsg::default()
    };
    Request::new(msg_type::RTM_GETADDR, NLM_F_REQUEST | NLM_F_DUMP)
        .family_header(&msg)
        .finish(seq)
}
