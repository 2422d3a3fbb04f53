//! Collaborator traits the scoring service is written against

use crate::error::StateError;
use crate::event::BallEvent;
use crate::types::{Innings, InningsId, MatchId, PlayerId};
use std::collections::{BTreeMap, HashMap};

/// Read-through lookup of player display names.
///
/// Stats are keyed by [`PlayerId`]; names are resolved at derivation time so a
/// rename shows up on the next read without touching any event.
pub trait PlayerDirectory {
    fn player_name(&self, id: &PlayerId) -> Option<&str>;
}

impl PlayerDirectory for HashMap<PlayerId, String> {
    fn player_name(&self, id: &PlayerId) -> Option<&str> {
        self.get(id).map(String::as_str)
    }
}

impl PlayerDirectory for BTreeMap<PlayerId, String> {
    fn player_name(&self, id: &PlayerId) -> Option<&str> {
        self.get(id).map(String::as_str)
    }
}

/// Player names that may be corrected after the fact
pub trait PlayerRegistry: PlayerDirectory {
    fn rename_player(&mut self, id: &PlayerId, name: &str) -> Result<(), StateError>;
}

/// Ordered, append-only ball log per innings whose only retraction is
/// removing the newest record.
///
/// Mutations take `&mut self`: appends are serialized and a delete never races
/// an in-flight append. Shared stores must sit behind a lock.
pub trait EventLog {
    /// All events of an innings in log order
    fn list_events(&self, innings_id: &InningsId) -> Result<Vec<BallEvent>, StateError>;

    /// Append an event; its sequence must follow the current newest record
    fn append_event(&mut self, innings_id: &InningsId, event: BallEvent) -> Result<BallEvent, StateError>;

    /// Remove and return the newest event, failing on an empty log
    fn delete_last_event(&mut self, innings_id: &InningsId) -> Result<BallEvent, StateError>;
}

/// Storage of a match's innings records
pub trait InningsStore {
    /// Innings of a match ordered by innings number
    fn innings_of(&self, match_id: &MatchId) -> Vec<Innings>;

    /// Persist a new innings; fails if that innings number already exists
    fn insert_innings(&mut self, innings: Innings) -> Result<Innings, StateError>;
}
