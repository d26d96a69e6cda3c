//! LAN discovery via the server's UDP presence beacon.
//!
//! The server broadcasts a [`PresenceAnnouncement`] datagram every couple of
//! seconds. [`listen_for_server`] binds the beacon port, waits up to a
//! deadline for an announcement from an InputCast host, and reports where it
//! came from. Datagrams that are not valid announcements (other software on
//! the same port, foreign services) are ignored and the wait continues.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

use inputcast_core::PresenceAnnouncement;

/// How often the socket read unblocks to re-check the deadline.
const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Error type for discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The beacon port could not be bound (in use by another listener, no
    /// permission).
    #[error("failed to listen on beacon port: {0}")]
    Bind(#[source] std::io::Error),
}

/// A server found on the LAN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredServer {
    /// Address the announcement was sent from.
    pub ip: IpAddr,
    /// TCP port of the server's HTTP command API.
    pub port: u16,
    /// The server's configured broadcast identifier.
    pub identifier: String,
}

/// Listens on `beacon_port` for up to `wait`, returning the first InputCast
/// announcement heard, or `None` when the deadline passes silently.
///
/// Blocking; run it on a dedicated thread (or `spawn_blocking`) from async
/// code.
///
/// # Errors
///
/// Returns [`DiscoveryError::Bind`] when the beacon port cannot be bound.
pub fn listen_for_server(
    beacon_port: u16,
    wait: Duration,
) -> Result<Option<DiscoveredServer>, DiscoveryError> {
    let socket =
        UdpSocket::bind((Ipv4Addr::UNSPECIFIED, beacon_port)).map_err(DiscoveryError::Bind)?;
    socket
        .set_read_timeout(Some(READ_TIMEOUT))
        .map_err(DiscoveryError::Bind)?;

    let deadline = Instant::now() + wait;
    let mut buf = [0u8; 2048];

    while Instant::now() < deadline {
        let (len, from) = match socket.recv_from(&mut buf) {
            Ok(received) => received,
            // WouldBlock/TimedOut are the read timeout expiring.
            Err(e)
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut =>
            {
                continue;
            }
            Err(e) => {
                debug!("beacon read error, retrying: {e}");
                continue;
            }
        };

        let announcement: PresenceAnnouncement = match serde_json::from_slice(&buf[..len]) {
            Ok(announcement) => announcement,
            Err(e) => {
                debug!("ignoring non-announcement datagram from {from}: {e}");
                continue;
            }
        };
        if !announcement.is_inputcast() {
            debug!("ignoring foreign service {:?}", announcement.service);
            continue;
        }

        return Ok(Some(DiscoveredServer {
            ip: from.ip(),
            port: announcement.port,
            identifier: announcement.identifier,
        }));
    }

    Ok(None)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    /// Sends `payload` to the local beacon port from a background thread.
    fn spawn_sender(beacon_port: u16, payload: Vec<u8>) {
        std::thread::spawn(move || {
            let sender = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).expect("bind sender");
            let dest = SocketAddr::from((Ipv4Addr::LOCALHOST, beacon_port));
            // A few sends cover the race with the listener starting up.
            for _ in 0..10 {
                sender.send_to(&payload, dest).ok();
                std::thread::sleep(Duration::from_millis(50));
            }
        });
    }

    #[test]
    fn test_hears_an_announcement() {
        // Arrange
        let beacon_port = 48251;
        let announcement = PresenceAnnouncement::new("host-under-test", 9000);
        spawn_sender(beacon_port, serde_json::to_vec(&announcement).unwrap());

        // Act
        let found = listen_for_server(beacon_port, Duration::from_secs(5)).expect("listen");

        // Assert
        let server = found.expect("server must be discovered");
        assert_eq!(server.port, 9000);
        assert_eq!(server.identifier, "host-under-test");
    }

    #[test]
    fn test_silence_returns_none() {
        // Arrange / Act — nothing broadcasts on this port
        let found = listen_for_server(48252, Duration::from_millis(600)).expect("listen");

        // Assert
        assert!(found.is_none());
    }

    #[test]
    fn test_foreign_service_announcements_are_ignored() {
        // Arrange — valid JSON, wrong service name
        let beacon_port = 48253;
        let foreign = r#"{"service":"SomeOtherThing","identifier":"x","port":1234}"#;
        spawn_sender(beacon_port, foreign.as_bytes().to_vec());

        // Act
        let found = listen_for_server(beacon_port, Duration::from_millis(800)).expect("listen");

        // Assert
        assert!(found.is_none());
    }

    #[test]
    fn test_garbage_datagrams_are_ignored() {
        let beacon_port = 48254;
        spawn_sender(beacon_port, b"not json at all".to_vec());

        let found = listen_for_server(beacon_port, Duration::from_millis(800)).expect("listen");
        assert!(found.is_none());
    }
}
