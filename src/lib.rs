//! Scorebook
//!
//! Ball-by-ball cricket scoring. An innings is an ordered log of ball events;
//! every figure on the scoreboard is recomputed from that log on each read.

pub mod accumulator;
pub mod clock;
pub mod dismissal;
pub mod engine;
pub mod error;
pub mod event;
pub mod hasher;
pub mod lifecycle;
pub mod logging;
pub mod rotation;
pub mod rules;
pub mod scorebook;
pub mod serialization;
pub mod stats;
pub mod store;
pub mod timeline;
pub mod traits;
pub mod types;

// Re-export core types and traits
pub use accumulator::{fold, StatAccumulator};
pub use clock::{Clock, SteppingClock, SystemClock};
pub use engine::{compute_stats, InningsReport, ScoringEngine, ScoringEngineBuilder};
pub use error::{ScorebookError, SerializationError, StateError, ValidationError};
pub use event::{BallEvent, BallEventDraft, Delivery};
pub use hasher::SnapshotHasher;
pub use lifecycle::{
    innings_status, is_innings_complete, match_outcome, next_innings, target, InningsStatus, MatchOutcome,
    MatchResult, Sides,
};
pub use logging::{LogEntry, LogLevel, ScoringLogger};
pub use rotation::CreaseState;
pub use rules::{MatchRules, MatchRulesBuilder};
pub use scorebook::{MatchSetup, ScoreboardView, Scorebook};
pub use serialization::{BincodeSerializer, JsonSerializer, SnapshotSerializer};
pub use stats::{BatterStats, BowlerStats, ExtrasTally, LastWicket, MatchStats};
pub use store::MemoryStore;
pub use timeline::{current_over, overs_timeline, run_rates, BallMark, OverSummary, RunRates};
pub use traits::{EventLog, InningsStore, PlayerDirectory, PlayerRegistry};
pub use types::{
    EventId, ExtrasType, Innings, InningsId, MatchId, Player, PlayerId, SnapshotHash, Team, TeamId, WicketType,
};
