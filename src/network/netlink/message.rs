//! Netlink message header, request building and reply collection.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::attr::{NlAttr, nla_align};
use crate::network::QueryError;

/// Netlink message header alignment.
pub const NLMSG_ALIGNTO: usize = 4;

/// Align a length to `NLMSG_ALIGNTO` boundary.
#[inline]
#[must_use]
pub const fn nlmsg_align(len: usize) -> usize {
    (len + NLMSG_ALIGNTO - 1) & !(NLMSG_ALIGNTO - 1)
}

/// Size of the netlink message header.
pub const NLMSG_HDRLEN: usize = nlmsg_align(std::mem::size_of::<NlMsgHdr>());

/// Message types used by this crate.
pub mod msg_type {
    /// No operation, message must be discarded.
    pub const NOOP: u16 = 1;
    /// Error message or ACK.
    pub const ERROR: u16 = 2;
    /// End of multipart message.
    pub const DONE: u16 = 3;
    /// Data lost.
    pub const OVERRUN: u16 = 4;

    pub const RTM_NEWLINK: u16 = 16;
    pub const RTM_GETLINK: u16 = 18;
    pub const RTM_NEWADDR: u16 = 20;
    pub const RTM_GETADDR: u16 = 22;
}

/// Netlink message flags.
pub const NLM_F_REQUEST: u16 = 0x01;
pub const NLM_F_MULTI: u16 = 0x02;
pub const NLM_F_DUMP_INTR: u16 = 0x10;
pub const NLM_F_ROOT: u16 = 0x100;
pub const NLM_F_MATCH: u16 = 0x200;
pub const NLM_F_DUMP: u16 = NLM_F_ROOT | NLM_F_MATCH;

/// Netlink message header (mirrors struct nlmsghdr).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct NlMsgHdr {
    /// Length of message including header.
    pub nlmsg_len: u32,
    /// Message type.
    pub nlmsg_type: u16,
    /// Additional flags.
    pub nlmsg_flags: u16,
    /// Sequence number.
    pub nlmsg_seq: u32,
    /// Sending process port ID.
    pub nlmsg_pid: u32,
}

impl NlMsgHdr {
    /// Check if this message has the multi flag.
    #[must_use]
    pub const fn is_multi(&self) -> bool {
        self.nlmsg_flags & NLM_F_MULTI != 0
    }

    /// Parse header from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Truncated`] if `data` is shorter than a header.
    pub fn from_bytes(data: &[u8]) -> Result<&Self, QueryError> {
        Self::ref_from_prefix(data)
            .map(|(r, _)| r)
            .map_err(|_| QueryError::Truncated {
                expected: std::mem::size_of::<Self>(),
                actual: data.len(),
            })
    }
}

/// Netlink error message payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout)]
pub struct NlMsgError {
    /// Error code (negative errno or 0 for ACK).
    pub error: i32,
    /// Original message header that caused the error.
    pub msg: NlMsgHdr,
}

impl NlMsgError {
    /// Parse error message from payload.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Truncated`] if the payload is too short.
    pub fn from_bytes(data: &[u8]) -> Result<&Self, QueryError> {
        Self::ref_from_prefix(data)
            .map(|(r, _)| r)
            .map_err(|_| QueryError::Truncated {
                expected: std::mem::size_of::<Self>(),
                actual: data.len(),
            })
    }
}

/// Iterator over netlink messages in a buffer.
pub struct MessageIter<'a> {
    data: &'a [u8],
}

impl<'a> MessageIter<'a> {
    /// Create a new message iterator.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> Iterator for MessageIter<'a> {
    type Item = Result<(&'a NlMsgHdr, &'a [u8]), QueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.len() < NLMSG_HDRLEN {
            return None;
        }

        let header = match NlMsgHdr::from_bytes(self.data) {
            Ok(h) => h,
            Err(e) => return Some(Err(e)),
        };

        let msg_len = header.nlmsg_len as usize;
        if msg_len < NLMSG_HDRLEN || msg_len > self.data.len() {
            self.data = &[];
            return Some(Err(QueryError::InvalidMessage(format!(
                "invalid message length: {msg_len}"
            ))));
        }

        let payload = &self.data[NLMSG_HDRLEN..msg_len];
        let aligned_len = nlmsg_align(msg_len);
        self.data = self.data.get(aligned_len..).unwrap_or(&[]);

        Some(Ok((header, payload)))
    }
}

/// Builder for a single netlink request.
#[derive(Debug, Clone)]
pub struct Request {
    buf: Vec<u8>,
}

impl Request {
    /// Starts a request with the given type and flags.
    #[must_use]
    pub fn new(msg_type: u16, flags: u16) -> Self {
        let header = NlMsgHdr {
            nlmsg_type: msg_type,
            nlmsg_flags: flags,
            ..NlMsgHdr::default()
        };
        let mut buf = vec![0u8; NLMSG_HDRLEN];
        buf[..std::mem::size_of::<NlMsgHdr>()].copy_from_slice(header.as_bytes());
        Self { buf }
    }

    /// Appends a fixed-size family header (`ifinfomsg`, `ifaddrmsg`).
    #[must_use]
    pub fn family_header<T: IntoBytes + Immutable>(mut self, value: &T) -> Self {
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.resize(nlmsg_align(self.buf.len()), 0);
        self
    }

    /// Appends an attribute with raw payload.
    #[must_use]
    pub fn attr(mut self, attr_type: u16, data: &[u8]) -> Self {
        let attr = NlAttr::new(attr_type, data.len());
        self.buf.extend_from_slice(attr.as_bytes());
        self.buf.extend_from_slice(data);
        self.buf.resize(nla_align(self.buf.len()), 0);
        self
    }

    /// Appends a NUL-terminated string attribute.
    #[must_use]
    pub fn attr_str(self, attr_type: u16, value: &str) -> Self {
        let mut data = Vec::with_capacity(value.len() + 1);
        data.extend_from_slice(value.as_bytes());
        data.push(0);
        self.attr(attr_type, &data)
    }

    /// Stamps length and sequence number and returns the wire bytes.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // requests are a few dozen bytes
    pub fn finish(mut self, seq: u32) -> Vec<u8> {
        let len = self.buf.len() as u32;
        self.buf[0..4].copy_from_slice(&len.to_ne_bytes());
        self.buf[8..12].copy_from_slice(&seq.to_ne_bytes());
        self.buf
    }
}

/// Accumulates the data messages answering one request.
#[derive(Debug, Default)]
pub struct ReplyCollector {
    seq: u32,
    messages: Vec<(u16, Vec<u8>)>,
    complete: bool,
}

impl ReplyCollector {
    /// Creates a collector for replies carrying `seq`.
    #[must_use]
    pub const fn new(seq: u32) -> Self {
        Self {
            seq,
            messages: Vec::new(),
            complete: false,
        }
    }

    /// Returns true once the final message of the reply has been seen.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Feeds one received datagram.
    ///
    /// Messages with a foreign sequence number are skipped. A data message
    /// without `NLM_F_MULTI` completes the reply, as does `NLMSG_DONE`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Kernel`] when the kernel answered with an error,
    /// or a parse error when the datagram is malformed.
    pub fn absorb(&mut self, datagram: &[u8]) -> Result<(), QueryError> {
        for message in MessageIter::new(datagram) {
            let (header, payload) = message?;

            if header.nlmsg_seq != self.seq {
                tracing::trace!(
                    expected = self.seq,
                    actual = header.nlmsg_seq,
                    "Skipping message with foreign sequence number"
                );
                continue;
            }

            match header.nlmsg_type {
                msg_type::NOOP => {}
                msg_type::ERROR => {
                    let error = NlMsgError::from_bytes(payload)?;
                    if error.error != 0 {
                        return Err(kernel_error(-error.error));
                    }
                    self.complete = true;
                }
                msg_type::DONE => self.complete = true,
                msg_type::OVERRUN => {
                    return Err(QueryError::InvalidMessage(
                        "kernel reported overrun".to_string(),
                    ));
                }
                other => {
                    if header.nlmsg_flags & NLM_F_DUMP_INTR != 0 {
                        tracing::debug!("Dump interrupted by concurrent change");
                    }
                    self.messages.push((other, payload.to_vec()));
                    if !header.is_multi() {
                        self.complete = true;
                    }
                }
            }

            if self.complete {
                break;
            }
        }
        Ok(())
    }

    /// Consumes the collector, returning `(message type, payload)` pairs in order.
    #[must_use]
    pub fn into_messages(self) -> Vec<(u16, Vec<u8>)> {
        self.messages
    }
}

/// Builds a kernel error from a positive errno.
#[must_use]
pub fn kernel_error(errno: i32) -> QueryError {
    QueryError::Kernel {
        errno,
        message: std::io::Error::from_raw_os_error(errno).to_string(),
    }
}
