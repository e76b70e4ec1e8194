//! Host-side helpers the engine calls back into.

use log::debug;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::net::UdpSocket;

/// Length of a BACnet/IP connection string: four address octets and a
/// little-endian port.
pub const CONNECTION_STRING_LEN: usize = 6;

pub fn encode_connection_string(addr: SocketAddrV4) -> [u8; CONNECTION_STRING_LEN] {
    let [a, b, c, d] = addr.ip().octets();
    let [lo, hi] = addr.port().to_le_bytes();
    [a, b, c, d, lo, hi]
}

/// Decodes a connection string. Shorter input yields `None`; bytes past the
/// sixth are ignored.
pub fn decode_connection_string(bytes: &[u8]) -> Option<SocketAddrV4> {
    let &[a, b, c, d, lo, hi] = bytes.get(..CONNECTION_STRING_LEN)? else {
        return None;
    };
    Some(SocketAddrV4::new(
        Ipv4Addr::new(a, b, c, d),
        u16::from_le_bytes([lo, hi]),
    ))
}

/// Sends `payload` to the peer named by `connection` without waiting.
/// Returns the number of bytes sent, or zero for a malformed connection
/// string or a socket that is not ready.
pub fn send_to_connection(socket: &UdpSocket, payload: &[u8], connection: &[u8]) -> usize {
    let Some(target) = decode_connection_string(connection) else {
        debug!("dropping {} byte message: malformed connection string", payload.len());
        return 0;
    };
    match socket.try_send_to(payload, SocketAddr::V4(target)) {
        Ok(sent) => sent,
        Err(e) => {
            debug!("send to {target} failed: {e}");
            0
        }
    }
}

/// Takes one datagram off `socket` without waiting. The sender is written
/// to `connection` as a connection string. Returns the payload length, or
/// zero when nothing was read, the sender is not IPv4 or `connection` is
/// too short.
pub fn receive_from_connection(
    socket: &UdpSocket,
    buf: &mut [u8],
    connection: &mut [u8],
) -> usize {
    let Some(connection) = connection.get_mut(..CONNECTION_STRING_LEN) else {
        return 0;
    };
    match socket.try_recv_from(buf) {
        Ok((len, SocketAddr::V4(peer))) => {
            connection.copy_from_slice(&encode_connection_string(peer));
            len
        }
        Ok((_, peer)) => {
            debug!("ignoring datagram from non-IPv4 peer {peer}");
            0
        }
        Err(e) if e.kind() == io::ErrorKind::WouldBlock => 0,
        Err(e) => {
            debug!("receive failed: {e}");
            0
        }
    }
}

/// Copies as much of `src` as fits into `dst` and returns the count.
pub fn copy_truncated(src: &[u8], dst: &mut [u8]) -> usize {
    let len = src.len().min(dst.len());
    dst[..len].copy_from_slice(&src[..len]);
    len
}

/// Like [`copy_truncated`], but never splits a UTF-8 sequence.
pub fn copy_str_truncated(src: &str, dst: &mut [u8]) -> usize {
    let mut len = src.len().min(dst.len());
    while !src.is_char_boundary(len) {
        len -= 1;
    }
    copy_truncated(&src.as_bytes()[..len], dst)
}

/// Seconds since the Unix epoch; zero if the clock is set before it.
pub fn unix_time_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
