//! The session directory: display names for the presence list.
//!
//! Independent of room membership. A connection appears here from the
//! moment it announces a name until it disconnects. Names need not be
//! unique.

use std::collections::BTreeMap;

use fourline_types::ConnectionId;

/// Maps connections to the display name they announced.
///
/// Keyed by [`ConnectionId`], which is time-ordered, so listings come out
/// in connect order.
#[derive(Debug, Default)]
pub struct SessionDirectory {
    names: BTreeMap<ConnectionId, String>,
}

impl SessionDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or replace the display name for `id`.
    pub fn announce(&mut self, id: ConnectionId, display_name: impl Into<String>) {
        self.names.insert(id, display_name.into());
    }

    /// Forget `id`, returning its name if it had announced one.
    pub fn remove(&mut self, id: ConnectionId) -> Option<String> {
        self.names.remove(&id)
    }

    /// The name announced by `id`.
    pub fn display_name(&self, id: ConnectionId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Every announced name.
    pub fn display_names(&self) -> Vec<String> {
        self.names.values().cloned().collect()
    }

    /// Number of announced connections.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nobody has announced a name.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announce_upserts() {
        let mut directory = SessionDirectory::new();
        let id = ConnectionId::new();
        directory.announce(id, "alice");
        directory.announce(id, "alicia");
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.display_name(id), Some("alicia"));
    }

    #[test]
    fn duplicate_names_are_allowed() {
        let mut directory = SessionDirectory::new();
        directory.announce(ConnectionId::new(), "sam");
        directory.announce(ConnectionId::new(), "sam");
        assert_eq!(directory.display_names(), vec!["sam", "sam"]);
    }

    #[test]
    fn remove_is_a_no_op_for_unknown_ids() {
        let mut directory = SessionDirectory::new();
        let id = ConnectionId::new();
        assert_eq!(directory.remove(id), None);
        directory.announce(id, "alice");
        assert_eq!(directory.remove(id), Some(String::from("alice")));
        assert!(directory.is_empty());
    }
}
