//! Unix-domain socket delivery with ancillary file descriptors.
//!
//! A message is one payload plus zero or more descriptors. The kernel
//! delivers `SCM_RIGHTS` control data with the first byte(s) of the send it
//! was attached to, so the descriptors ride the first chunk only; remaining
//! bytes are retried without ancillary data until the payload is fully
//! written.

use std::{
    io::{self, IoSlice},
    os::{
        fd::{AsRawFd, BorrowedFd, RawFd},
        unix::net::UnixStream,
    },
};

use nix::sys::socket::{sendmsg, ControlMessage, MsgFlags, UnixAddr};

use crate::errors::{Result, TransportError};

/// One chunked write on a connection-oriented Unix socket.
///
/// The production implementation is [`UnixStream`]; tests substitute a
/// recording sink with an artificially small write quota.
pub trait MessageSink {
    /// Write a prefix of `bytes`, attaching `fds` as `SCM_RIGHTS` ancillary
    /// data. Returns the number of payload bytes accepted.
    fn send_chunk(&mut self, bytes: &[u8], fds: &[RawFd]) -> io::Result<usize>;
}

impl MessageSink for UnixStream {
    fn send_chunk(&mut self, bytes: &[u8], fds: &[RawFd]) -> io::Result<usize> {
        let iov = [IoSlice::new(bytes)];
        let rights = [ControlMessage::ScmRights(fds)];
        let cmsgs: &[ControlMessage<'_>] = if fds.is_empty() { &[] } else { &rights };

        sendmsg::<UnixAddr>(self.as_raw_fd(), &iov, cmsgs, MsgFlags::empty(), None)
            .map_err(io::Error::from)
    }
}

/// Deliver `payload` plus `fds` as one logical message.
///
/// An empty payload is a no-op and performs no syscall (descriptors, if any,
/// are not sent either: ancillary data cannot travel without bytes).
/// The sender's descriptors stay valid afterwards: the kernel duplicates
/// them into the receiving process.
///
/// # Errors
///
/// [`TransportError::Send`] on any I/O failure and
/// [`TransportError::ZeroWrite`] when the socket accepts nothing mid-message.
/// After an error the caller must not retry the same logical message: there
/// is no implicit resume, and the peer may have received a prefix.
pub fn send_with_fds(
    sink: &mut impl MessageSink,
    payload: &[u8],
    fds: &[BorrowedFd<'_>],
) -> Result<()> {
    if payload.is_empty() {
        return Ok(());
    }

    let raw: Vec<RawFd> = fds.iter().map(AsRawFd::as_raw_fd).collect();
    let mut sent = 0;

    while sent < payload.len() {
        let ancillary: &[RawFd] = if sent == 0 { &raw } else { &[] };
        let n = sink.send_chunk(&payload[sent..], ancillary).map_err(TransportError::Send)?;
        if n == 0 {
            return Err(TransportError::ZeroWrite { remaining: payload.len() - sent });
        }
        sent += n;
        if sent < payload.len() {
            tracing::trace!(
                target: "lumen::transport",
                sent,
                total = payload.len(),
                "partial socket write, continuing"
            );
        }
    }

    Ok(())
}
