use serde::{Deserialize, Serialize};

/// One room↔occupant pair from the resident roster.
///
/// The roster is the source of truth for who currently occupies a room;
/// it carries no charges. An empty name means a vacant unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub room: String,
    pub name: String,
}

impl RosterEntry {
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        self.name.is_empty()
    }
}
