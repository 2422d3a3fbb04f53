//! Scorecard wording for dismissals

use crate::stats::{BatterStats, LastWicket};
use crate::types::WicketType;

/// Standard scorecard text for a dismissal.
///
/// A missing fielder reads "field" (or "keeper" for a stumping). Modes with no
/// bowler template print their own label; a wicket without a mode reads "Out".
pub fn resolve(wicket_type: WicketType, bowler: &str, assister: Option<&str>) -> String {
    match wicket_type {
        WicketType::Bowled => format!("b {}", bowler),
        WicketType::Caught => format!("c {} b {}", assister.unwrap_or("field"), bowler),
        WicketType::Lbw => format!("lbw b {}", bowler),
        WicketType::Stumped => format!("st {} b {}", assister.unwrap_or("keeper"), bowler),
        WicketType::RunOut => format!("run out ({})", assister.unwrap_or("field")),
        WicketType::None => "Out".to_string(),
        other => other.code().to_string(),
    }
}

/// Freeze a dismissed batter's figures for the last-wicket display
pub fn snapshot(batter: &BatterStats, dismissal: &str) -> LastWicket {
    LastWicket {
        player_id: batter.id.clone(),
        name: batter.name.clone(),
        dismissal: dismissal.to_string(),
        runs: batter.runs,
        balls: batter.balls,
        fours: batter.fours,
        sixes: batter.sixes,
    }
}
