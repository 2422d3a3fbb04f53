//! Strike and over rotation derived from the newest event

use crate::event::BallEvent;
use crate::stats::MatchStats;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// Who is on the field next; `None` means the scorer has to pick someone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreaseState {
    pub striker_id: Option<PlayerId>,
    pub non_striker_id: Option<PlayerId>,
    pub bowler_id: Option<PlayerId>,
    pub last_bowler_id: Option<PlayerId>,
}

impl CreaseState {
    /// Derive the next crease from the newest event alone.
    ///
    /// `legal_balls` is the innings' legal-ball count including that event.
    /// Earlier events are never replayed: their swaps are already baked into
    /// the striker/non-striker the scorer recorded on the newest ball.
    pub fn after(last: Option<&BallEvent>, legal_balls: u32) -> Self {
        let Some(event) = last else {
            return Self::default();
        };

        let mut striker = Some(event.striker_id.clone());
        let mut non_striker = Some(event.non_striker_id.clone());

        let rotation_runs = event.runs_scored
            + if event.extras_type.is_bowler_extra() {
                event.extras_runs
            } else {
                0
            };
        if rotation_runs % 2 == 1 {
            std::mem::swap(&mut striker, &mut non_striker);
        }

        let over_complete = legal_balls > 0 && legal_balls % 6 == 0;
        if over_complete {
            std::mem::swap(&mut striker, &mut non_striker);
        }
        let bowler = if over_complete {
            None
        } else {
            Some(event.bowler_id.clone())
        };

        if event.is_wicket {
            match &event.out_player_id {
                Some(out) if non_striker.as_ref() == Some(out) => non_striker = None,
                _ => striker = None,
            }
        }

        Self {
            striker_id: striker,
            non_striker_id: non_striker,
            bowler_id: bowler,
            last_bowler_id: Some(event.bowler_id.clone()),
        }
    }

    /// Copy the crease into a snapshot's current-player fields
    pub fn apply_to(self, stats: &mut MatchStats) {
        stats.current_striker_id = self.striker_id;
        stats.current_non_striker_id = self.non_striker_id;
        stats.current_bowler_id = self.bowler_id;
        stats.last_bowler_id = self.last_bowler_id;
    }
}
