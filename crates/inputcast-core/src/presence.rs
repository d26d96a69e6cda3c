//! Presence-beacon payload.
//!
//! While the server is running it broadcasts this JSON datagram on the LAN so
//! clients can discover it without manual address entry. The payload carries
//! only identity and the HTTP port; everything else about the broadcast
//! protocol is out of scope for the core.

use serde::{Deserialize, Serialize};

/// Fixed service name carried in every announcement. Clients filter on this
/// so unrelated broadcasts on the same port are ignored.
pub const SERVICE_NAME: &str = "InputCastServer";

/// One announcement datagram, serialized as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceAnnouncement {
    /// Always [`SERVICE_NAME`] for this service.
    pub service: String,
    /// The configured broadcast identifier distinguishing multiple hosts.
    pub identifier: String,
    /// TCP port the HTTP command API is listening on.
    pub port: u16,
}

impl PresenceAnnouncement {
    pub fn new(identifier: impl Into<String>, port: u16) -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            identifier: identifier.into(),
            port,
        }
    }

    /// Returns `true` if this announcement came from an InputCast server.
    pub fn is_inputcast(&self) -> bool {
        self.service == SERVICE_NAME
    }
}
