//! The derived match snapshot and its figures

use crate::error::ValidationError;
use crate::types::{PlayerId, WicketType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Render a legal-ball count as overs in tenths notation, e.g. 22 balls is "3.4"
pub fn overs_display(balls: u32) -> String {
    format!("{}.{}", balls / 6, balls % 6)
}

/// Runs conceded per six legal balls, two decimals, "0.00" before the first legal ball
pub fn economy(runs: u32, balls: u32) -> String {
    if balls == 0 {
        return "0.00".to_string();
    }
    let overs = balls as f64 / 6.0;
    format!("{:.2}", runs as f64 / overs)
}

/// Batting figures for one player in one innings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterStats {
    pub id: PlayerId,
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub is_out: bool,
    pub wicket_type: Option<WicketType>,
    pub dismissal: Option<String>,
}

impl BatterStats {
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            is_out: false,
            wicket_type: None,
            dismissal: None,
        }
    }

    /// Runs per hundred legal balls faced
    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            return 0.0;
        }
        self.runs as f64 * 100.0 / self.balls as f64
    }
}

/// Bowling figures for one player in one innings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlerStats {
    pub id: PlayerId,
    pub name: String,
    pub balls: u32,
    pub runs: u32,
    pub wickets: u32,
    pub maidens: u32,
    pub overs: String,
    pub economy: String,
    pub wides: u32,
    pub no_balls: u32,
}

impl BowlerStats {
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            balls: 0,
            runs: 0,
            wickets: 0,
            maidens: 0,
            overs: overs_display(0),
            economy: economy(0, 0),
            wides: 0,
            no_balls: 0,
        }
    }
}

/// Runs that did not come off the bat, by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtrasTally {
    pub total: u32,
    pub wide: u32,
    pub noball: u32,
    pub bye: u32,
    pub legbye: u32,
}

/// Final figures of the most recently dismissed batter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastWicket {
    pub player_id: PlayerId,
    pub name: String,
    pub dismissal: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
}

/// Everything derived from one innings log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub score: u32,
    pub wickets: u32,
    /// Legal deliveries bowled
    pub balls: u32,
    pub overs: String,
    pub batters: BTreeMap<PlayerId, BatterStats>,
    pub bowlers: BTreeMap<PlayerId, BowlerStats>,
    pub extras: ExtrasTally,
    pub current_striker_id: Option<PlayerId>,
    pub current_non_striker_id: Option<PlayerId>,
    pub current_bowler_id: Option<PlayerId>,
    pub last_bowler_id: Option<PlayerId>,
    pub last_wicket: Option<LastWicket>,
}

impl Default for MatchStats {
    fn default() -> Self {
        Self {
            score: 0,
            wickets: 0,
            balls: 0,
            overs: overs_display(0),
            batters: BTreeMap::new(),
            bowlers: BTreeMap::new(),
            extras: ExtrasTally::default(),
            current_striker_id: None,
            current_non_striker_id: None,
            current_bowler_id: None,
            last_bowler_id: None,
            last_wicket: None,
        }
    }
}

impl MatchStats {
    /// True while any of striker, non-striker or bowler still has to be chosen
    pub fn needs_selection(&self) -> bool {
        self.current_striker_id.is_none()
            || self.current_non_striker_id.is_none()
            || self.current_bowler_id.is_none()
    }

    /// Batters still at the crease, in striker / non-striker order
    pub fn active_batters(&self) -> Vec<&BatterStats> {
        [&self.current_striker_id, &self.current_non_striker_id]
            .into_iter()
            .flatten()
            .filter_map(|id| self.batters.get(id))
            .filter(|b| !b.is_out)
            .collect()
    }

    pub fn current_bowler(&self) -> Option<&BowlerStats> {
        self.current_bowler_id.as_ref().and_then(|id| self.bowlers.get(id))
    }

    /// Check the accounting identities every fold must satisfy
    pub fn validate(&self) -> Result<(), ValidationError> {
        let bat_runs: u32 = self.batters.values().map(|b| b.runs).sum();
        if self.score != bat_runs + self.extras.total {
            return Err(ValidationError::InvalidSnapshot {
                reason: format!(
                    "score {} != batter runs {} + extras {}",
                    self.score, bat_runs, self.extras.total
                ),
            });
        }

        let bowled: u32 = self.bowlers.values().map(|b| b.balls).sum();
        if self.balls != bowled {
            return Err(ValidationError::InvalidSnapshot {
                reason: format!("balls {} != bowler balls {}", self.balls, bowled),
            });
        }

        let by_kind = self.extras.wide + self.extras.noball + self.extras.bye + self.extras.legbye;
        if by_kind != self.extras.total {
            return Err(ValidationError::InvalidSnapshot {
                reason: format!("extras total {} != sum by kind {}", self.extras.total, by_kind),
            });
        }

        Ok(())
    }
}
