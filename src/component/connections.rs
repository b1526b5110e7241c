// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::identity::ComponentId;

/// Outgoing connections: peer identifier to the peer's reason as observed when connecting.
///
/// Connections are one-directional and never removed. Reconnecting to the
/// same peer overwrites the stored reason.
#[derive(Debug, Clone, Default)]
pub struct Connections {
    peers: HashMap<ComponentId, String>,
}

impl Connections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `peer_reason` under `peer_id`, returning the reason it replaced.
    pub fn connect(&mut self, peer_id: ComponentId, peer_reason: String) -> Option<String> {
        self.peers.insert(peer_id, peer_reason)
    }

    pub fn reason_of(&self, peer_id: &ComponentId) -> Option<&str> {
        self.peers.get(peer_id).map(String::as_str)
    }

    pub fn contains(&self, peer_id: &ComponentId) -> bool {
        self.peers.contains_key(peer_id)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Detached copy; later connections are not reflected in it.
    pub fn snapshot(&self) -> HashMap<ComponentId, String> {
        self.peers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::derive_id;
    use chrono::Utc;

    #[test]
    fn test_reconnect_overwrites_reason() {
        let peer = derive_id("transform", "{}", &Utc::now());
        let mut connections = Connections::new();

        assert_eq!(connections.connect(peer.clone(), "transform".to_string()), None);
        assert_eq!(
            connections.connect(peer.clone(), "reshape".to_string()),
            Some("transform".to_string())
        );

        assert_eq!(connections.len(), 1);
        assert_eq!(connections.reason_of(&peer), Some("reshape"));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut connections = Connections::new();
        let first = derive_id("a", "{}", &Utc::now());
        connections.connect(first, "a".to_string());

        let snapshot = connections.snapshot();
        connections.connect(derive_id("b", "{}", &Utc::now()), "b".to_string());

        assert_eq!(snapshot.len(), 1);
        assert_eq!(connections.len(), 2);
    }
}
