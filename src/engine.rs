//! Scoring engine: full replay of an innings log into a snapshot

use crate::accumulator::fold;
use crate::error::{SerializationError, ValidationError};
use crate::event::BallEvent;
use crate::hasher::SnapshotHasher;
use crate::lifecycle::{innings_status, match_outcome, InningsStatus, MatchOutcome, Sides};
use crate::rotation::CreaseState;
use crate::rules::MatchRules;
use crate::stats::MatchStats;
use crate::traits::PlayerDirectory;
use crate::types::SnapshotHash;
use serde::{Deserialize, Serialize};

/// Derive the complete snapshot of one innings.
///
/// Pure and total: figures come from folding every event, the crease from the
/// newest event and the legal-ball count.
///
/// # Arguments
/// * `events` - The innings log in append order
/// * `players` - Name lookup used for display names
///
/// # Returns
/// The full MatchStats, including the current striker, non-striker and bowler
pub fn compute_stats<P: PlayerDirectory + ?Sized>(events: &[BallEvent], players: &P) -> MatchStats {
    let mut stats = fold(events, players);
    CreaseState::after(events.last(), stats.balls).apply_to(&mut stats);
    stats
}

/// Snapshot of an innings together with its completion state and digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InningsReport {
    pub stats: MatchStats,
    pub status: InningsStatus,
    pub events_replayed: usize,
    pub snapshot_hash: SnapshotHash,
}

/// Replays innings logs under a fixed set of match rules
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    rules: MatchRules,
    hasher: SnapshotHasher,
}

impl ScoringEngine {
    pub fn new(rules: MatchRules) -> Self {
        Self {
            rules,
            hasher: SnapshotHasher::new(),
        }
    }

    /// Create a builder for constructing a scoring engine
    pub fn builder() -> ScoringEngineBuilder {
        ScoringEngineBuilder::new()
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    pub fn compute_stats<P: PlayerDirectory + ?Sized>(&self, events: &[BallEvent], players: &P) -> MatchStats {
        compute_stats(events, players)
    }

    /// `roster_len` is the batting side's roster length
    pub fn status(&self, stats: &MatchStats, roster_len: usize) -> InningsStatus {
        innings_status(stats, self.rules.roster_size(roster_len), self.rules.overs_limit)
    }

    pub fn is_innings_complete(&self, stats: &MatchStats, roster_len: usize) -> bool {
        self.status(stats, roster_len).is_complete()
    }

    /// Replay an innings and report its snapshot, status and digest
    ///
    /// # Arguments
    /// * `events` - The innings log in append order
    /// * `players` - Name lookup used for display names
    /// * `roster_len` - Length of the batting side's roster
    ///
    /// # Errors
    /// `SerializationFailed` if the snapshot cannot be encoded for hashing
    pub fn replay<P: PlayerDirectory + ?Sized>(
        &self,
        events: &[BallEvent],
        players: &P,
        roster_len: usize,
    ) -> Result<InningsReport, SerializationError> {
        let stats = compute_stats(events, players);
        let status = self.status(&stats, roster_len);
        let snapshot_hash = self.hasher.hash(&stats)?;

        Ok(InningsReport {
            stats,
            status,
            events_replayed: events.len(),
            snapshot_hash,
        })
    }

    /// Decide the match; `chasing_roster_len` is the second innings' batting side
    pub fn outcome(
        &self,
        first: &MatchStats,
        second: &MatchStats,
        chasing_roster_len: usize,
        sides: Sides<'_>,
    ) -> MatchOutcome {
        match_outcome(
            first,
            second,
            self.rules.roster_size(chasing_roster_len),
            self.rules.overs_limit,
            sides,
        )
    }

    /// Check a previously published digest against a fresh replay
    pub fn verify<P: PlayerDirectory + ?Sized>(
        &self,
        events: &[BallEvent],
        players: &P,
        expected: &SnapshotHash,
    ) -> Result<bool, SerializationError> {
        let stats = compute_stats(events, players);
        Ok(self.hasher.hash(&stats)? == *expected)
    }
}

/// Builder for constructing scoring engines with a fluent API
#[derive(Debug, Default)]
pub struct ScoringEngineBuilder {
    rules: Option<MatchRules>,
}

impl ScoringEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, rules: MatchRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Shorthand for rules with the given overs limit and default roster size
    pub fn with_overs_limit(mut self, overs: u32) -> Self {
        self.rules = Some(MatchRules::new(overs));
        self
    }

    /// Build the engine; rules default when unset and are validated either way
    pub fn build(self) -> Result<ScoringEngine, ValidationError> {
        let rules = self.rules.unwrap_or_default();
        rules.validate()?;
        Ok(ScoringEngine::new(rules))
    }
}
