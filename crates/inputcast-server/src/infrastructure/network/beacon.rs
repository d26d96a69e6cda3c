//! UDP presence beacon.
//!
//! While the host is running, a dedicated thread broadcasts a
//! [`PresenceAnnouncement`] datagram to the LAN broadcast address on the
//! configured beacon port every couple of seconds. Clients listening on that
//! port learn the host's identity and HTTP port without manual address entry.
//!
//! The thread is stopped by clearing the shared `running` flag; the
//! broadcast interval is checked in small steps so shutdown never waits for
//! a full interval.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::JoinHandle;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use inputcast_core::PresenceAnnouncement;

/// Time between announcements.
const BROADCAST_INTERVAL: Duration = Duration::from_secs(2);
/// Granularity at which the shutdown flag is checked between announcements.
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// Error type for beacon startup.
#[derive(Debug, Error)]
pub enum BeaconError {
    /// The UDP socket could not be bound or configured for broadcast.
    #[error("failed to set up beacon socket: {0}")]
    Socket(#[source] std::io::Error),

    /// The announcement could not be encoded.
    #[error("failed to encode announcement: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A running beacon. Stop it explicitly or by dropping it.
pub struct BeaconHandle {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl BeaconHandle {
    /// Clears the running flag and joins the broadcast thread.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            thread.join().ok();
        }
    }
}

impl Drop for BeaconHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Starts broadcasting `announcement` on UDP `beacon_port`.
///
/// # Errors
///
/// Returns [`BeaconError::Socket`] when the socket cannot be bound or put
/// into broadcast mode, and [`BeaconError::Encode`] when the payload cannot
/// be serialized.
pub fn start_beacon(
    beacon_port: u16,
    announcement: &PresenceAnnouncement,
) -> Result<BeaconHandle, BeaconError> {
    let socket =
        UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).map_err(BeaconError::Socket)?;
    socket.set_broadcast(true).map_err(BeaconError::Socket)?;

    let payload = serde_json::to_vec(announcement)?;
    let dest = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::BROADCAST, beacon_port));
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    let thread = std::thread::Builder::new()
        .name("inputcast-beacon".to_string())
        .spawn(move || {
            broadcast_loop(socket, dest, payload, running_clone);
        })
        .map_err(BeaconError::Socket)?;

    info!(
        "presence beacon announcing {} on UDP {beacon_port}",
        announcement.identifier
    );
    Ok(BeaconHandle {
        running,
        thread: Some(thread),
    })
}

/// The send loop executed on the beacon thread.
fn broadcast_loop(
    socket: UdpSocket,
    dest: SocketAddr,
    payload: Vec<u8>,
    running: Arc<AtomicBool>,
) {
    while running.load(Ordering::Relaxed) {
        if let Err(e) = socket.send_to(&payload, dest) {
            // Broadcast can fail transiently (interface down, sandboxed
            // environment); keep announcing on the next tick.
            debug!("beacon send failed: {e}");
        }

        let mut waited = Duration::ZERO;
        while waited < BROADCAST_INTERVAL {
            if !running.load(Ordering::Relaxed) {
                break;
            }
            std::thread::sleep(SHUTDOWN_POLL);
            waited += SHUTDOWN_POLL;
        }
    }

    info!("presence beacon stopped");
}

// ── Tests ─────────────────────────────────────────────────────────────────────
