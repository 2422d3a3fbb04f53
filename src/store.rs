//! In-memory event log, innings table and player registry

use crate::error::StateError;
use crate::event::BallEvent;
use crate::traits::{EventLog, InningsStore, PlayerDirectory, PlayerRegistry};
use crate::types::{Innings, InningsId, MatchId, PlayerId, Team};
use std::collections::BTreeMap;

/// Keeps everything in ordered maps; suitable for a single scorer process and
/// for tests. Wrap in a lock to share across threads.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    names: BTreeMap<PlayerId, String>,
    innings: BTreeMap<InningsId, Innings>,
    events: BTreeMap<InningsId, Vec<BallEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every rostered player of the given teams
    pub fn with_teams<'a>(teams: impl IntoIterator<Item = &'a Team>) -> Self {
        let mut store = Self::new();
        for team in teams {
            store.register_team(team);
        }
        store
    }

    pub fn register_team(&mut self, team: &Team) {
        for player in &team.players {
            self.names.insert(player.id.clone(), player.name.clone());
        }
    }

    /// Number of events logged for an innings, zero if unknown
    pub fn event_count(&self, innings_id: &InningsId) -> usize {
        self.events.get(innings_id).map_or(0, Vec::len)
    }

    fn log_mut(&mut self, innings_id: &InningsId) -> Result<&mut Vec<BallEvent>, StateError> {
        self.events
            .get_mut(innings_id)
            .ok_or_else(|| StateError::InningsNotFound {
                innings_id: innings_id.to_string(),
            })
    }
}

impl PlayerDirectory for MemoryStore {
    fn player_name(&self, id: &PlayerId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }
}

impl PlayerRegistry for MemoryStore {
    fn rename_player(&mut self, id: &PlayerId, name: &str) -> Result<(), StateError> {
        let entry = self.names.get_mut(id).ok_or_else(|| StateError::PlayerNotFound {
            player_id: id.to_string(),
        })?;
        *entry = name.to_string();
        Ok(())
    }
}

impl EventLog for MemoryStore {
    fn list_events(&self, innings_id: &InningsId) -> Result<Vec<BallEvent>, StateError> {
        self.events
            .get(innings_id)
            .cloned()
            .ok_or_else(|| StateError::InningsNotFound {
                innings_id: innings_id.to_string(),
            })
    }

    fn append_event(&mut self, innings_id: &InningsId, event: BallEvent) -> Result<BallEvent, StateError> {
        if &event.innings_id != innings_id {
            return Err(StateError::WrongInnings {
                event_id: event.id.to_string(),
                expected: innings_id.to_string(),
                actual: event.innings_id.to_string(),
            });
        }

        let log = self.log_mut(innings_id)?;
        let expected = log.last().map_or(1, |last| last.sequence + 1);
        if event.sequence != expected {
            return Err(StateError::OutOfOrder {
                innings_id: innings_id.to_string(),
                expected,
                actual: event.sequence,
            });
        }

        log.push(event.clone());
        Ok(event)
    }

    fn delete_last_event(&mut self, innings_id: &InningsId) -> Result<BallEvent, StateError> {
        self.log_mut(innings_id)?.pop().ok_or_else(|| StateError::EmptyLog {
            innings_id: innings_id.to_string(),
        })
    }
}

impl InningsStore for MemoryStore {
    fn innings_of(&self, match_id: &MatchId) -> Vec<Innings> {
        let mut innings: Vec<Innings> = self
            .innings
            .values()
            .filter(|i| &i.match_id == match_id)
            .cloned()
            .collect();
        innings.sort_by_key(|i| i.innings_number);
        innings
    }

    fn insert_innings(&mut self, innings: Innings) -> Result<Innings, StateError> {
        let duplicate = self.innings.values().any(|existing| {
            existing.id == innings.id
                || (existing.match_id == innings.match_id && existing.innings_number == innings.innings_number)
        });
        if duplicate {
            return Err(StateError::NextInningsNotAllowed {
                reason: format!("innings {} already exists", innings.innings_number),
            });
        }

        self.events.insert(innings.id.clone(), Vec::new());
        self.innings.insert(innings.id.clone(), innings.clone());
        Ok(innings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{BallEventDraft, Delivery};
    use crate::types::{Player, TeamId};
    use chrono::Utc;

    fn innings(number: u8) -> Innings {
        Innings {
            id: InningsId::new(format!("m-{}", number)),
            match_id: MatchId::from("m"),
            batting_team_id: TeamId::from("hawks"),
            bowling_team_id: TeamId::from("owls"),
            innings_number: number,
        }
    }

    fn event(innings_id: &str, sequence: u64) -> BallEvent {
        let delivery = Delivery::try_from(BallEventDraft::new("a", "b", "x").runs(1)).unwrap();
        BallEvent::stamp(delivery, InningsId::from(innings_id), sequence, Utc::now(), 0)
    }

    #[test]
    fn test_append_and_delete() {
        let mut store = MemoryStore::new();
        let id = store.insert_innings(innings(1)).unwrap().id;

        store.append_event(&id, event("m-1", 1)).unwrap();
        store.append_event(&id, event("m-1", 2)).unwrap();
        assert_eq!(store.event_count(&id), 2);

        let removed = store.delete_last_event(&id).unwrap();
        assert_eq!(removed.sequence, 2);
        assert_eq!(store.list_events(&id).unwrap().len(), 1);
    }

    #[test]
    fn test_append_rejects_gaps_and_foreign_events() {
        let mut store = MemoryStore::new();
        let id = store.insert_innings(innings(1)).unwrap().id;

        let err = store.append_event(&id, event("m-1", 2)).unwrap_err();
        assert_eq!(
            err,
            StateError::OutOfOrder {
                innings_id: "m-1".to_string(),
                expected: 1,
                actual: 2,
            }
        );
        assert!(matches!(
            store.append_event(&id, event("m-2", 1)),
            Err(StateError::WrongInnings { .. })
        ));
        assert_eq!(store.event_count(&id), 0);
    }

    #[test]
    fn test_delete_on_empty_log() {
        let mut store = MemoryStore::new();
        let id = store.insert_innings(innings(1)).unwrap().id;
        assert!(matches!(store.delete_last_event(&id), Err(StateError::EmptyLog { .. })));
        assert!(matches!(
            store.delete_last_event(&InningsId::from("nope")),
            Err(StateError::InningsNotFound { .. })
        ));
    }

    #[test]
    fn test_innings_numbers_are_unique() {
        let mut store = MemoryStore::new();
        store.insert_innings(innings(2)).unwrap();
        store.insert_innings(innings(1)).unwrap();
        assert!(store.insert_innings(innings(2)).is_err());

        let numbers: Vec<u8> = store
            .innings_of(&MatchId::from("m"))
            .iter()
            .map(|i| i.innings_number)
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_rename_player() {
        let team = Team {
            id: TeamId::from("hawks"),
            name: "Hawks".to_string(),
            players: vec![Player {
                id: PlayerId::from("a"),
                name: "Ann".to_string(),
                team_id: TeamId::from("hawks"),
            }],
        };
        let mut store = MemoryStore::with_teams([&team]);

        store.rename_player(&PlayerId::from("a"), "Anna").unwrap();
        assert_eq!(store.player_name(&PlayerId::from("a")), Some("Anna"));
        assert!(store.rename_player(&PlayerId::from("z"), "Zed").is_err());
    }
}
