//! Error types for the scorebook

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScorebookError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

/// A ball event or configuration value was malformed and never reached the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Negative runs: {field} = {value}")]
    NegativeRuns { field: String, value: i64 },

    #[error("Unknown extras type: {code}")]
    UnknownExtrasType { code: String },

    #[error("Unknown wicket type: {code}")]
    UnknownWicketType { code: String },

    #[error("Missing player: {role} must be selected")]
    MissingPlayer { role: String },

    #[error("Invalid delivery: {reason}")]
    InvalidDelivery { reason: String },

    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    #[error("Invalid rules: {reason}")]
    InvalidRules { reason: String },

    #[error("Player {player_id} is not in the {side} side")]
    NotOnRoster { player_id: String, side: String },

    #[error("Player name cannot be empty")]
    EmptyName,
}

/// A command was well-formed but not allowed in the current match state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Nothing to undo in innings {innings_id}")]
    EmptyLog { innings_id: String },

    #[error("Cannot start next innings: {reason}")]
    NextInningsNotAllowed { reason: String },

    #[error("Innings {innings_id} is complete")]
    InningsComplete { innings_id: String },

    #[error("Match is finished: {message}")]
    MatchFinished { message: String },

    #[error("Innings not found: {innings_id}")]
    InningsNotFound { innings_id: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Team not found: {team_id}")]
    TeamNotFound { team_id: String },

    #[error("Out of order append to {innings_id}: expected sequence {expected}, got {actual}")]
    OutOfOrder {
        innings_id: String,
        expected: u64,
        actual: u64,
    },

    #[error("Event {event_id} belongs to {actual}, not {expected}")]
    WrongInnings {
        event_id: String,
        expected: String,
        actual: String,
    },
}

#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("Serialization failed: {reason}")]
    SerializationFailed { reason: String },

    #[error("Deserialization failed: {reason}")]
    DeserializationFailed { reason: String },
}
