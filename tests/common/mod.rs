//! Shared helpers for integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use scorebook::{
    BallEvent, BallEventDraft, Delivery, InningsId, MatchId, MatchRules, MatchSetup, Player, PlayerId, Team, TeamId,
};
use std::collections::HashMap;

pub const BATTERS: [&str; 4] = ["ana", "ben", "cat", "dev"];
pub const BOWLERS: [&str; 3] = ["xia", "yul", "zed"];

pub fn kickoff() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

/// Stamp drafts into an innings log the way the service does
pub fn stamp_log(drafts: Vec<BallEventDraft>) -> Vec<BallEvent> {
    let innings = InningsId::from("m-1");
    let mut legal = 0;
    let mut events = Vec::with_capacity(drafts.len());
    for (i, draft) in drafts.into_iter().enumerate() {
        let event = BallEvent::stamp(
            Delivery::try_from(draft).unwrap(),
            innings.clone(),
            i as u64 + 1,
            kickoff(),
            legal,
        );
        if event.is_legal() {
            legal += 1;
        }
        events.push(event);
    }
    events
}

pub fn names() -> HashMap<PlayerId, String> {
    BATTERS
        .iter()
        .chain(BOWLERS.iter())
        .map(|id| (PlayerId::from(*id), id.to_uppercase()))
        .collect()
}

pub fn team(id: &str, size: usize) -> Team {
    Team {
        id: TeamId::from(id),
        name: format!("{} XI", id),
        players: (1..=size)
            .map(|n| Player {
                id: PlayerId::new(format!("{}{}", id, n)),
                name: format!("{} player {}", id, n),
                team_id: TeamId::from(id),
            })
            .collect(),
    }
}

/// Two sides of `size`; "hawks" bat first
pub fn setup(overs: u32, size: usize) -> MatchSetup {
    MatchSetup {
        match_id: MatchId::from("final"),
        rules: MatchRules::new(overs),
        batting_first: team("hawks", size),
        bowling_first: team("owls", size),
    }
}

fn extras_code() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        6 => Just(None),
        1 => Just(Some("WD")),
        1 => Just(Some("NB")),
        1 => Just(Some("B")),
        1 => Just(Some("LB")),
    ]
}

fn wicket_code() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["bowled", "caught", "lbw", "runout", "stumped", "hitwicket", "retired"])
}

/// A well-formed delivery drawn from a small pool of players
pub fn arbitrary_draft() -> impl Strategy<Value = BallEventDraft> {
    (
        0usize..BATTERS.len(),
        1usize..BATTERS.len(),
        0usize..BOWLERS.len(),
        0i64..7,
        extras_code(),
        0i64..5,
        prop::option::weighted(0.15, (wicket_code(), any::<bool>())),
    )
        .prop_map(|(striker, offset, bowler, runs, extras, extras_runs, wicket)| {
            let non_striker = (striker + offset) % BATTERS.len();
            let mut draft = BallEventDraft::new(BATTERS[striker], BATTERS[non_striker], BOWLERS[bowler]).runs(runs);
            if let Some(code) = extras {
                draft = draft.extras(code, extras_runs);
            }
            if let Some((code, non_striker_out)) = wicket {
                draft = draft.wicket(code);
                if non_striker_out {
                    draft = draft.out(BATTERS[non_striker]);
                }
            }
            draft
        })
}

pub fn arbitrary_log(max: usize) -> impl Strategy<Value = Vec<BallEvent>> {
    prop::collection::vec(arbitrary_draft(), 0..max).prop_map(stamp_log)
}
