//! Over-by-over timeline and run rates

use crate::event::BallEvent;
use crate::stats::MatchStats;
use crate::types::{EventId, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One delivery as shown in the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallMark {
    pub event_id: EventId,
    pub ball_number: u32,
    pub label: String,
    pub runs: u32,
    pub is_wicket: bool,
    pub is_legal: bool,
}

/// All deliveries stamped with one over number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverSummary {
    /// Zero-based
    pub over_number: u32,
    pub bowler_ids: Vec<PlayerId>,
    pub balls: Vec<BallMark>,
    pub runs: u32,
    pub wickets: u32,
}

/// "W" for a wicket, total runs plus code for extras, bat runs otherwise
pub fn ball_label(event: &BallEvent) -> String {
    if event.is_wicket {
        "W".to_string()
    } else if event.extras_type.code().is_empty() {
        event.runs_scored.to_string()
    } else {
        format!("{}{}", event.total_runs(), event.extras_type.code())
    }
}

/// Group an innings by the over number stamped on each event, in log order
pub fn overs_timeline(events: &[BallEvent]) -> Vec<OverSummary> {
    let mut overs: BTreeMap<u32, OverSummary> = BTreeMap::new();

    for event in events {
        let over = overs.entry(event.over_number).or_insert_with(|| OverSummary {
            over_number: event.over_number,
            bowler_ids: Vec::new(),
            balls: Vec::new(),
            runs: 0,
            wickets: 0,
        });
        if !over.bowler_ids.contains(&event.bowler_id) {
            over.bowler_ids.push(event.bowler_id.clone());
        }
        over.runs = over.runs.saturating_add(event.total_runs());
        if event.is_wicket {
            over.wickets += 1;
        }
        over.balls.push(BallMark {
            event_id: event.id.clone(),
            ball_number: event.ball_number,
            label: ball_label(event),
            runs: event.total_runs(),
            is_wicket: event.is_wicket,
            is_legal: event.is_legal(),
        });
    }

    overs.into_values().collect()
}

/// The over the newest event belongs to
pub fn current_over(events: &[BallEvent]) -> Option<OverSummary> {
    let last = events.last()?;
    let members: Vec<BallEvent> = events
        .iter()
        .filter(|e| e.over_number == last.over_number)
        .cloned()
        .collect();
    overs_timeline(&members).into_iter().next()
}

/// Scoring rates for the live header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRates {
    pub current: f64,
    pub projected_score: u32,
    pub balls_remaining: u32,
    /// Present only in a chase
    pub runs_needed: Option<u32>,
    pub required: Option<f64>,
}

pub fn run_rates(stats: &MatchStats, overs_limit: u32, target: Option<u32>) -> RunRates {
    let current = if stats.balls == 0 {
        0.0
    } else {
        stats.score as f64 * 6.0 / stats.balls as f64
    };
    let balls_remaining = overs_limit.saturating_mul(6).saturating_sub(stats.balls);
    let runs_needed = target.map(|t| t.saturating_sub(stats.score));
    let required = runs_needed.map(|needed| {
        if balls_remaining == 0 {
            0.0
        } else {
            needed as f64 * 6.0 / balls_remaining as f64
        }
    });

    RunRates {
        current,
        projected_score: (current * overs_limit as f64).round() as u32,
        balls_remaining,
        runs_needed,
        required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{BallEventDraft, Delivery};
    use crate::types::InningsId;
    use chrono::Utc;

    fn log(drafts: Vec<BallEventDraft>) -> Vec<BallEvent> {
        let mut legal = 0;
        let mut events = Vec::new();
        for (i, draft) in drafts.into_iter().enumerate() {
            let event = BallEvent::stamp(
                Delivery::try_from(draft).unwrap(),
                InningsId::from("inn"),
                i as u64 + 1,
                Utc::now(),
                legal,
            );
            if event.is_legal() {
                legal += 1;
            }
            events.push(event);
        }
        events
    }

    #[test]
    fn test_labels() {
        let events = log(vec![
            BallEventDraft::new("a", "b", "x").runs(4),
            BallEventDraft::new("a", "b", "x").runs(1).extras("NB", 1),
            BallEventDraft::new("a", "b", "x").wicket("bowled"),
            BallEventDraft::new("a", "b", "x").extras("LB", 2),
        ]);
        let labels: Vec<_> = events.iter().map(ball_label).collect();
        assert_eq!(labels, vec!["4", "2NB", "W", "2LB"]);
    }

    #[test]
    fn test_extras_stay_in_their_over() {
        let mut drafts: Vec<_> = (0..6).map(|_| BallEventDraft::new("a", "b", "x").runs(1)).collect();
        drafts.insert(3, BallEventDraft::new("a", "b", "x").extras("WD", 1));
        drafts.push(BallEventDraft::new("b", "a", "y").runs(2));
        let events = log(drafts);

        let overs = overs_timeline(&events);
        assert_eq!(overs.len(), 2);
        assert_eq!(overs[0].balls.len(), 7);
        assert_eq!(overs[0].runs, 7);
        assert_eq!(overs[1].bowler_ids, vec![PlayerId::from("y")]);

        let current = current_over(&events).unwrap();
        assert_eq!(current.over_number, 1);
        assert_eq!(current.balls.len(), 1);
    }

    #[test]
    fn test_current_over_empty_innings() {
        assert!(current_over(&[]).is_none());
    }

    #[test]
    fn test_run_rates_in_chase() {
        let stats = MatchStats {
            score: 60,
            balls: 60,
            ..MatchStats::default()
        };
        let rates = run_rates(&stats, 20, Some(121));
        assert_eq!(rates.current, 6.0);
        assert_eq!(rates.projected_score, 120);
        assert_eq!(rates.balls_remaining, 60);
        assert_eq!(rates.runs_needed, Some(61));
        assert_eq!(rates.required, Some(6.1));
    }

    #[test]
    fn test_run_rates_before_first_ball() {
        let rates = run_rates(&MatchStats::default(), 20, None);
        assert_eq!(rates.current, 0.0);
        assert_eq!(rates.balls_remaining, 120);
        assert!(rates.required.is_none());
    }
}
