//! Ball events: the wire draft, the validated delivery and the logged record

use crate::error::ValidationError;
use crate::types::{EventId, ExtrasType, InningsId, PlayerId, WicketType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ball as submitted by a scorer, before any checking.
///
/// Counts are signed and codes are free text so that malformed input can be
/// reported precisely instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BallEventDraft {
    pub striker_id: Option<String>,
    pub non_striker_id: Option<String>,
    pub bowler_id: Option<String>,
    pub runs_scored: i64,
    pub extras_type: Option<String>,
    pub extras_runs: i64,
    pub is_wicket: bool,
    pub wicket_type: Option<String>,
    pub out_player_id: Option<String>,
    pub assister_id: Option<String>,
}

impl BallEventDraft {
    pub fn new(striker: &str, non_striker: &str, bowler: &str) -> Self {
        Self {
            striker_id: Some(striker.to_string()),
            non_striker_id: Some(non_striker.to_string()),
            bowler_id: Some(bowler.to_string()),
            ..Self::default()
        }
    }

    pub fn runs(mut self, runs: i64) -> Self {
        self.runs_scored = runs;
        self
    }

    pub fn extras(mut self, code: &str, runs: i64) -> Self {
        self.extras_type = Some(code.to_string());
        self.extras_runs = runs;
        self
    }

    pub fn wicket(mut self, code: &str) -> Self {
        self.is_wicket = true;
        self.wicket_type = Some(code.to_string());
        self
    }

    pub fn out(mut self, player: &str) -> Self {
        self.out_player_id = Some(player.to_string());
        self
    }

    pub fn assisted_by(mut self, player: &str) -> Self {
        self.assister_id = Some(player.to_string());
        self
    }
}

/// A checked delivery, ready to be stamped and appended to an innings log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub striker_id: PlayerId,
    pub non_striker_id: PlayerId,
    pub bowler_id: PlayerId,
    pub runs_scored: u32,
    pub extras_type: ExtrasType,
    pub extras_runs: u32,
    pub is_wicket: bool,
    pub wicket_type: WicketType,
    pub out_player_id: Option<PlayerId>,
    pub assister_id: Option<PlayerId>,
}

fn required(value: Option<String>, role: &str) -> Result<PlayerId, ValidationError> {
    match value {
        Some(id) if !id.trim().is_empty() => Ok(PlayerId(id)),
        _ => Err(ValidationError::MissingPlayer {
            role: role.to_string(),
        }),
    }
}

/// Most runs a single count on one delivery may carry
pub const MAX_RUNS_PER_COUNT: u32 = 12;

fn non_negative(value: i64, field: &str) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::NegativeRuns {
            field: field.to_string(),
            value,
        });
    }
    match u32::try_from(value) {
        Ok(runs) if runs <= MAX_RUNS_PER_COUNT => Ok(runs),
        _ => Err(ValidationError::InvalidDelivery {
            reason: format!("{} = {} exceeds {} runs off one ball", field, value, MAX_RUNS_PER_COUNT),
        }),
    }
}

impl TryFrom<BallEventDraft> for Delivery {
    type Error = ValidationError;

    fn try_from(draft: BallEventDraft) -> Result<Self, Self::Error> {
        let striker_id = required(draft.striker_id, "striker")?;
        let non_striker_id = required(draft.non_striker_id, "non-striker")?;
        let bowler_id = required(draft.bowler_id, "bowler")?;

        let runs_scored = non_negative(draft.runs_scored, "runsScored")?;
        let extras_runs = non_negative(draft.extras_runs, "extrasRuns")?;

        let extras_type = match draft.extras_type.as_deref() {
            Some(code) => code.parse()?,
            None => ExtrasType::None,
        };
        let wicket_type = match draft.wicket_type.as_deref() {
            Some(code) => code.parse()?,
            None => WicketType::None,
        };

        if striker_id == non_striker_id {
            return Err(ValidationError::InvalidDelivery {
                reason: format!("{} cannot be both striker and non-striker", striker_id),
            });
        }
        if extras_type == ExtrasType::None && extras_runs > 0 {
            return Err(ValidationError::InvalidDelivery {
                reason: "extras runs recorded without an extras type".to_string(),
            });
        }
        if !draft.is_wicket && wicket_type != WicketType::None {
            return Err(ValidationError::InvalidDelivery {
                reason: format!("wicket type {} on a delivery without a wicket", wicket_type.code()),
            });
        }

        // Scorers send the striker as the out player on every ball; it only means something on a wicket.
        let (out_player_id, assister_id) = if draft.is_wicket {
            let out = draft.out_player_id.filter(|id| !id.trim().is_empty()).map(PlayerId);
            if let Some(out) = &out {
                if *out != striker_id && *out != non_striker_id {
                    return Err(ValidationError::InvalidDelivery {
                        reason: format!("dismissed player {} is not at the crease", out),
                    });
                }
            }
            let assister = draft.assister_id.filter(|id| !id.trim().is_empty()).map(PlayerId);
            (out, assister)
        } else {
            (None, None)
        };

        Ok(Delivery {
            striker_id,
            non_striker_id,
            bowler_id,
            runs_scored,
            extras_type,
            extras_runs,
            is_wicket: draft.is_wicket,
            wicket_type,
            out_player_id,
            assister_id,
        })
    }
}

/// An immutable ball event as stored in an innings log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallEvent {
    pub id: EventId,
    pub innings_id: InningsId,
    /// Position in the innings log, starting at 1
    pub sequence: u64,
    pub recorded_at: DateTime<Utc>,
    pub striker_id: PlayerId,
    pub non_striker_id: PlayerId,
    pub bowler_id: PlayerId,
    pub runs_scored: u32,
    pub extras_type: ExtrasType,
    pub extras_runs: u32,
    pub is_wicket: bool,
    pub wicket_type: WicketType,
    pub out_player_id: Option<PlayerId>,
    pub assister_id: Option<PlayerId>,
    /// Zero-based over the ball was bowled in, fixed at creation
    pub over_number: u32,
    /// One-based ball within the over, fixed at creation
    pub ball_number: u32,
}

impl BallEvent {
    /// Stamp a delivery with its log position.
    ///
    /// `legal_balls_before` is the innings' legal-ball count before this
    /// delivery and only feeds the display-only over/ball numbers.
    pub fn stamp(
        delivery: Delivery,
        innings_id: InningsId,
        sequence: u64,
        recorded_at: DateTime<Utc>,
        legal_balls_before: u32,
    ) -> Self {
        Self {
            id: EventId(format!("{}-{}", innings_id, sequence)),
            innings_id,
            sequence,
            recorded_at,
            striker_id: delivery.striker_id,
            non_striker_id: delivery.non_striker_id,
            bowler_id: delivery.bowler_id,
            runs_scored: delivery.runs_scored,
            extras_type: delivery.extras_type,
            extras_runs: delivery.extras_runs,
            is_wicket: delivery.is_wicket,
            wicket_type: delivery.wicket_type,
            out_player_id: delivery.out_player_id,
            assister_id: delivery.assister_id,
            over_number: legal_balls_before / 6,
            ball_number: legal_balls_before % 6 + 1,
        }
    }

    pub fn is_legal(&self) -> bool {
        self.extras_type.is_legal()
    }

    /// Runs this ball adds to the total
    pub fn total_runs(&self) -> u32 {
        self.runs_scored.saturating_add(self.extras_runs)
    }

    /// Runs charged against the bowler's figures
    pub fn bowler_runs(&self) -> u32 {
        if self.extras_type.is_bowler_extra() {
            self.runs_scored.saturating_add(self.extras_runs)
        } else {
            self.runs_scored
        }
    }

    /// The batter dismissed on this ball, defaulting to the striker
    pub fn dismissed_player(&self) -> Option<&PlayerId> {
        if !self.is_wicket {
            return None;
        }
        Some(self.out_player_id.as_ref().unwrap_or(&self.striker_id))
    }
}
