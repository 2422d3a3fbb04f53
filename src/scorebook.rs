//! Scoring service: validates commands, appends to the log and serves the
//! derived scoreboard

use crate::clock::{Clock, SystemClock};
use crate::engine::{compute_stats, ScoringEngine};
use crate::error::{ScorebookError, StateError, ValidationError};
use crate::event::{BallEvent, BallEventDraft, Delivery};
use crate::hasher::SnapshotHasher;
use crate::lifecycle::{next_innings, target, InningsStatus, MatchOutcome, Sides};
use crate::logging::{LogEntry, LogLevel, ScoringLogger};
use crate::rules::MatchRules;
use crate::serialization::SnapshotSerializer;
use crate::stats::MatchStats;
use crate::store::MemoryStore;
use crate::timeline::{current_over, overs_timeline, run_rates, OverSummary, RunRates};
use crate::traits::{EventLog, InningsStore, PlayerRegistry};
use crate::types::{Innings, InningsId, MatchId, PlayerId, SnapshotHash, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything fixed at the start of a match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSetup {
    pub match_id: MatchId,
    #[serde(default)]
    pub rules: MatchRules,
    /// Bats in the first innings
    pub batting_first: Team,
    pub bowling_first: Team,
}

/// What a polling client reads after every ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardView {
    pub match_id: MatchId,
    pub innings_id: InningsId,
    pub innings_number: u8,
    pub batting_team_id: TeamId,
    pub bowling_team_id: TeamId,
    pub stats: MatchStats,
    pub status: InningsStatus,
    /// Second innings only
    pub target: Option<u32>,
    pub run_rates: RunRates,
    pub current_over: Option<OverSummary>,
    /// Second innings only
    pub outcome: Option<MatchOutcome>,
    pub snapshot_hash: SnapshotHash,
}

/// One match's scoring service.
///
/// Holds no derived state: every read replays the relevant innings log.
pub struct Scorebook<S = MemoryStore, C = SystemClock> {
    match_id: MatchId,
    engine: ScoringEngine,
    hasher: SnapshotHasher,
    teams: BTreeMap<TeamId, Team>,
    store: S,
    clock: C,
    logger: ScoringLogger,
}

impl Scorebook<MemoryStore, SystemClock> {
    /// Start a match backed by an in-memory store and the system clock
    pub fn in_memory(setup: MatchSetup) -> Result<Self, ScorebookError> {
        let store = MemoryStore::with_teams([&setup.batting_first, &setup.bowling_first]);
        Self::new(setup, store, SystemClock)
    }
}

impl<S, C> Scorebook<S, C>
where
    S: EventLog + InningsStore + PlayerRegistry,
    C: Clock,
{
    /// Start a match and open its first innings
    pub fn new(setup: MatchSetup, store: S, clock: C) -> Result<Self, ScorebookError> {
        let engine = ScoringEngine::builder().with_rules(setup.rules).build()?;
        if setup.batting_first.id == setup.bowling_first.id {
            return Err(ValidationError::InvalidRules {
                reason: format!("team {} cannot play itself", setup.batting_first.id),
            }
            .into());
        }

        let first = Innings {
            id: InningsId::new(format!("{}-1", setup.match_id)),
            match_id: setup.match_id.clone(),
            batting_team_id: setup.batting_first.id.clone(),
            bowling_team_id: setup.bowling_first.id.clone(),
            innings_number: 1,
        };

        let mut teams = BTreeMap::new();
        teams.insert(setup.batting_first.id.clone(), setup.batting_first);
        teams.insert(setup.bowling_first.id.clone(), setup.bowling_first);

        let mut scorebook = Self {
            match_id: setup.match_id,
            engine,
            hasher: SnapshotHasher::new(),
            teams,
            store,
            clock,
            logger: ScoringLogger::with_info_level(),
        };

        let first = scorebook.store.insert_innings(first)?;
        scorebook.journal(
            LogEntry::new(LogLevel::Info, scorebook.clock.now(), "Innings 1 started".to_string())
                .with_innings(first.id)
                .with_metadata("batting", &first.batting_team_id),
        );
        Ok(scorebook)
    }

    /// Replace the journal, e.g. to capture debug entries
    pub fn with_logger(mut self, logger: ScoringLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn match_id(&self) -> &MatchId {
        &self.match_id
    }

    pub fn rules(&self) -> &MatchRules {
        self.engine.rules()
    }

    pub fn logger(&self) -> &ScoringLogger {
        &self.logger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn team(&self, id: &TeamId) -> Result<&Team, StateError> {
        self.teams.get(id).ok_or_else(|| StateError::TeamNotFound {
            team_id: id.to_string(),
        })
    }

    /// Innings of this match, first to last
    pub fn innings(&self) -> Vec<Innings> {
        self.store.innings_of(&self.match_id)
    }

    /// The newest innings; scoring and undo act on it
    pub fn current_innings(&self) -> Result<Innings, StateError> {
        self.innings()
            .pop()
            .ok_or_else(|| StateError::InningsNotFound {
                innings_id: format!("{}-1", self.match_id),
            })
    }

    fn innings_number(&self, number: u8) -> Result<Innings, StateError> {
        self.innings()
            .into_iter()
            .find(|i| i.innings_number == number)
            .ok_or_else(|| StateError::InningsNotFound {
                innings_id: format!("{}-{}", self.match_id, number),
            })
    }

    /// Record one delivery into the current innings
    ///
    /// # Arguments
    /// * `draft` - The ball as submitted by the scorer
    ///
    /// # Returns
    /// The stamped event as appended to the log
    ///
    /// # Errors
    /// * `Validation` if the draft is malformed or names a player off the right roster
    /// * `State` if the innings is complete or the match is already decided
    ///
    /// Rejections are journaled at `Warn` and leave the log untouched.
    pub fn record_ball(&mut self, draft: BallEventDraft) -> Result<BallEvent, ScorebookError> {
        let result = self.try_record_ball(draft);
        if let Err(err) = &result {
            self.reject("record ball", err);
        }
        result
    }

    fn try_record_ball(&mut self, draft: BallEventDraft) -> Result<BallEvent, ScorebookError> {
        let innings = self.current_innings()?;
        let delivery = Delivery::try_from(draft)?;
        self.check_rosters(&innings, &delivery)?;

        let events = self.store.list_events(&innings.id)?;
        let stats = compute_stats(&events, &self.store);
        let roster_len = self.team(&innings.batting_team_id)?.roster_size();
        if self.engine.is_innings_complete(&stats, roster_len) {
            return Err(StateError::InningsComplete {
                innings_id: innings.id.to_string(),
            }
            .into());
        }
        if innings.innings_number == 2 {
            if let Some(outcome) = self.outcome()? {
                if outcome.finished {
                    return Err(StateError::MatchFinished {
                        message: outcome.message,
                    }
                    .into());
                }
            }
        }

        let sequence = events.last().map_or(1, |last| last.sequence + 1);
        let event = BallEvent::stamp(delivery, innings.id.clone(), sequence, self.clock.now(), stats.balls);
        let event = self.store.append_event(&innings.id, event)?;

        self.journal(
            LogEntry::new(LogLevel::Info, event.recorded_at, "Ball recorded".to_string())
                .with_innings(innings.id)
                .with_event(event.id.clone())
                .with_metadata("over", format!("{}.{}", event.over_number, event.ball_number))
                .with_metadata("runs", event.total_runs())
                .with_metadata("wicket", event.is_wicket),
        );
        Ok(event)
    }

    fn check_rosters(&self, innings: &Innings, delivery: &Delivery) -> Result<(), ScorebookError> {
        let batting = self.team(&innings.batting_team_id)?;
        let bowling = self.team(&innings.bowling_team_id)?;

        let on = |team: &Team, id: &PlayerId| -> Result<(), ValidationError> {
            if team.has_player(id) {
                Ok(())
            } else {
                Err(ValidationError::NotOnRoster {
                    player_id: id.to_string(),
                    side: team.name.clone(),
                })
            }
        };

        on(batting, &delivery.striker_id)?;
        on(batting, &delivery.non_striker_id)?;
        on(bowling, &delivery.bowler_id)?;
        if let Some(assister) = &delivery.assister_id {
            on(bowling, assister)?;
        }
        Ok(())
    }

    /// Remove the newest ball of the current innings
    pub fn undo_last_ball(&mut self) -> Result<BallEvent, ScorebookError> {
        let result = self
            .current_innings()
            .and_then(|innings| self.store.delete_last_event(&innings.id))
            .map_err(ScorebookError::from);

        match &result {
            Ok(event) => {
                let entry = LogEntry::new(LogLevel::Info, self.clock.now(), "Ball undone".to_string())
                    .with_innings(event.innings_id.clone())
                    .with_event(event.id.clone());
                self.journal(entry);
            }
            Err(err) => self.reject("undo", err),
        }
        result
    }

    /// Correct a player's display name; figures pick it up on the next read
    pub fn rename_player(&mut self, id: &PlayerId, name: &str) -> Result<(), ScorebookError> {
        let result = self.try_rename(id, name);
        if let Err(err) = &result {
            self.reject("rename", err);
        }
        result
    }

    fn try_rename(&mut self, id: &PlayerId, name: &str) -> Result<(), ScorebookError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        self.store.rename_player(id, name)?;
        for team in self.teams.values_mut() {
            if let Some(player) = team.players.iter_mut().find(|p| &p.id == id) {
                player.name = name.to_string();
            }
        }

        self.journal(
            LogEntry::new(LogLevel::Info, self.clock.now(), "Player renamed".to_string())
                .with_metadata("player", id)
                .with_metadata("name", name),
        );
        Ok(())
    }

    /// Open the second innings with the sides swapped
    pub fn start_next_innings(&mut self) -> Result<Innings, ScorebookError> {
        let result = self.try_start_next_innings();
        if let Err(err) = &result {
            self.reject("next innings", err);
        }
        result
    }

    fn try_start_next_innings(&mut self) -> Result<Innings, ScorebookError> {
        let existing = self.innings();
        let first_complete = match existing.iter().find(|i| i.innings_number == 1) {
            Some(first) => {
                let stats = self.stats_of(first)?;
                let roster_len = self.team(&first.batting_team_id)?.roster_size();
                self.engine.is_innings_complete(&stats, roster_len)
            }
            None => false,
        };

        let planned = next_innings(
            &existing,
            first_complete,
            InningsId::new(format!("{}-2", self.match_id)),
        )?;
        let innings = self.store.insert_innings(planned)?;

        self.journal(
            LogEntry::new(LogLevel::Info, self.clock.now(), "Innings 2 started".to_string())
                .with_innings(innings.id.clone())
                .with_metadata("batting", &innings.batting_team_id),
        );
        Ok(innings)
    }

    fn stats_of(&self, innings: &Innings) -> Result<MatchStats, StateError> {
        let events = self.store.list_events(&innings.id)?;
        Ok(compute_stats(&events, &self.store))
    }

    /// Snapshot of the current innings
    pub fn current_stats(&self) -> Result<MatchStats, ScorebookError> {
        let innings = self.current_innings()?;
        Ok(self.stats_of(&innings)?)
    }

    /// Snapshot of innings 1 or 2
    pub fn innings_stats(&self, number: u8) -> Result<MatchStats, ScorebookError> {
        let innings = self.innings_number(number)?;
        Ok(self.stats_of(&innings)?)
    }

    /// The match result, once a second innings exists
    pub fn outcome(&self) -> Result<Option<MatchOutcome>, ScorebookError> {
        let innings = self.innings();
        let (Some(first), Some(second)) = (
            innings.iter().find(|i| i.innings_number == 1),
            innings.iter().find(|i| i.innings_number == 2),
        ) else {
            return Ok(None);
        };

        let first_stats = self.stats_of(first)?;
        let second_stats = self.stats_of(second)?;
        let batting_first = self.team(&first.batting_team_id)?;
        let chasing = self.team(&second.batting_team_id)?;

        Ok(Some(self.engine.outcome(
            &first_stats,
            &second_stats,
            chasing.roster_size(),
            Sides {
                batting_first: &batting_first.name,
                chasing: &chasing.name,
            },
        )))
    }

    /// Over-by-over breakdown of the current innings
    pub fn timeline(&self) -> Result<Vec<OverSummary>, ScorebookError> {
        let innings = self.current_innings()?;
        Ok(overs_timeline(&self.store.list_events(&innings.id)?))
    }

    /// Full derived view of the current innings
    pub fn scoreboard(&self) -> Result<ScoreboardView, ScorebookError> {
        let innings = self.current_innings()?;
        let events = self.store.list_events(&innings.id)?;
        let stats = compute_stats(&events, &self.store);
        let roster_len = self.team(&innings.batting_team_id)?.roster_size();

        let chase_target = if innings.innings_number == 2 {
            Some(target(&self.innings_stats(1)?))
        } else {
            None
        };
        let outcome = self.outcome()?;
        let snapshot_hash = self.hasher.hash(&stats)?;

        Ok(ScoreboardView {
            match_id: self.match_id.clone(),
            innings_id: innings.id,
            innings_number: innings.innings_number,
            batting_team_id: innings.batting_team_id,
            bowling_team_id: innings.bowling_team_id,
            status: self.engine.status(&stats, roster_len),
            target: chase_target,
            run_rates: run_rates(&stats, self.engine.rules().overs_limit, chase_target),
            current_over: current_over(&events),
            outcome,
            snapshot_hash,
            stats,
        })
    }

    /// Encode the scoreboard for a client
    pub fn export_snapshot<T: SnapshotSerializer>(&self, serializer: &T) -> Result<Vec<u8>, ScorebookError> {
        let view = self.scoreboard()?;
        Ok(serializer.serialize(&view)?)
    }

    /// Encode the raw log of the current innings
    pub fn export_log<T: SnapshotSerializer>(&self, serializer: &T) -> Result<Vec<u8>, ScorebookError> {
        let innings = self.current_innings()?;
        let events = self.store.list_events(&innings.id)?;
        Ok(serializer.serialize(&events)?)
    }

    fn journal(&mut self, entry: LogEntry) {
        self.logger.log(entry);
    }

    fn reject(&mut self, action: &str, err: &ScorebookError) {
        let entry = LogEntry::new(LogLevel::Warn, self.clock.now(), format!("Rejected {}: {}", action, err))
            .with_metadata("action", action);
        self.journal(entry);
    }
}
