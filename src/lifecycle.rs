//! Innings and match completion rules

use crate::error::StateError;
use crate::stats::MatchStats;
use crate::types::{Innings, InningsId};
use serde::{Deserialize, Serialize};

/// Why an innings is or is not over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InningsStatus {
    InProgress,
    /// Every batter but one dismissed
    AllOut,
    /// Overs limit reached
    OversExhausted,
}

impl InningsStatus {
    pub fn is_complete(self) -> bool {
        self != InningsStatus::InProgress
    }
}

/// All-out is reported ahead of overs-exhausted when both hold
pub fn innings_status(stats: &MatchStats, roster_size: usize, overs_limit: u32) -> InningsStatus {
    if stats.wickets as usize >= roster_size.saturating_sub(1) {
        InningsStatus::AllOut
    } else if stats.balls >= overs_limit.saturating_mul(6) {
        InningsStatus::OversExhausted
    } else {
        InningsStatus::InProgress
    }
}

pub fn is_innings_complete(stats: &MatchStats, roster_size: usize, overs_limit: u32) -> bool {
    innings_status(stats, roster_size, overs_limit).is_complete()
}

/// Runs the chasing side needs to win
pub fn target(first_innings: &MatchStats) -> u32 {
    first_innings.score.saturating_add(1)
}

/// How a two-innings match stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchResult {
    InProgress { runs_needed: u32 },
    ChaseWon { wickets_remaining: u32 },
    DefenceWon { margin: u32 },
    Tied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub finished: bool,
    pub message: String,
    pub result: MatchResult,
}

/// Team names used in result messages
#[derive(Debug, Clone, Copy)]
pub struct Sides<'a> {
    pub batting_first: &'a str,
    pub chasing: &'a str,
}

fn plural(n: u32, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// Decide the match from both innings.
///
/// Reaching the target ends the match at once, overs in hand or not.
/// Otherwise nothing is decided until the second innings is complete.
/// `roster_size` is the chasing side's.
pub fn match_outcome(
    first: &MatchStats,
    second: &MatchStats,
    roster_size: usize,
    overs_limit: u32,
    sides: Sides<'_>,
) -> MatchOutcome {
    let target = target(first);

    if second.score >= target {
        let wickets_remaining = (roster_size.saturating_sub(1) as u32).saturating_sub(second.wickets);
        return MatchOutcome {
            finished: true,
            message: format!("{} won by {}", sides.chasing, plural(wickets_remaining, "wicket")),
            result: MatchResult::ChaseWon { wickets_remaining },
        };
    }

    if !is_innings_complete(second, roster_size, overs_limit) {
        let runs_needed = target - second.score;
        return MatchOutcome {
            finished: false,
            message: format!("{} need {} to win", sides.chasing, plural(runs_needed, "run")),
            result: MatchResult::InProgress { runs_needed },
        };
    }

    if second.score < first.score {
        let margin = first.score - second.score;
        MatchOutcome {
            finished: true,
            message: format!("{} won by {}", sides.batting_first, plural(margin, "run")),
            result: MatchResult::DefenceWon { margin },
        }
    } else {
        MatchOutcome {
            finished: true,
            message: "Match Tied!".to_string(),
            result: MatchResult::Tied,
        }
    }
}

/// Plan the second innings.
///
/// Allowed only while the match has exactly innings 1, and that innings is
/// complete. The sides swap batting and bowling.
pub fn next_innings(existing: &[Innings], first_complete: bool, id: InningsId) -> Result<Innings, StateError> {
    if existing.iter().any(|i| i.innings_number >= 2) {
        return Err(StateError::NextInningsNotAllowed {
            reason: "the second innings has already started".to_string(),
        });
    }
    let first = existing
        .iter()
        .find(|i| i.innings_number == 1)
        .ok_or_else(|| StateError::NextInningsNotAllowed {
            reason: "the first innings has not started".to_string(),
        })?;
    if !first_complete {
        return Err(StateError::NextInningsNotAllowed {
            reason: "the first innings is not complete".to_string(),
        });
    }

    Ok(Innings {
        id,
        match_id: first.match_id.clone(),
        batting_team_id: first.bowling_team_id.clone(),
        bowling_team_id: first.batting_team_id.clone(),
        innings_number: 2,
    })
}
