//! Stat accumulator: one pass over an innings log into score and figures

use crate::dismissal;
use crate::event::BallEvent;
use crate::stats::{economy, overs_display, BatterStats, BowlerStats, MatchStats};
use crate::traits::PlayerDirectory;
use crate::types::{ExtrasType, PlayerId};

const UNNAMED_BATTER: &str = "Batter";
const UNNAMED_BOWLER: &str = "Bowler";

/// Runs conceded in the over block currently being bowled, for maiden detection
#[derive(Debug, Default)]
struct OverBlock {
    bowler: Option<PlayerId>,
    runs: u32,
    shared: bool,
}

/// Folds ball events in log order into a [`MatchStats`].
///
/// The accumulator never fails: every field of a well-formed event has a
/// defined effect. Current-player fields are left empty; see [`crate::rotation`].
pub struct StatAccumulator<'a, P: PlayerDirectory + ?Sized> {
    players: &'a P,
    stats: MatchStats,
    over: OverBlock,
}

impl<'a, P: PlayerDirectory + ?Sized> StatAccumulator<'a, P> {
    /// Create an accumulator that resolves display names through `players`
    pub fn new(players: &'a P) -> Self {
        Self {
            players,
            stats: MatchStats::default(),
            over: OverBlock::default(),
        }
    }

    fn name_of(&self, id: &PlayerId, fallback: &str) -> String {
        self.players.player_name(id).unwrap_or(fallback).to_string()
    }

    /// Fold a single event into the running figures
    pub fn apply(&mut self, event: &BallEvent) {
        let legal = event.is_legal();
        let counted_extras = match event.extras_type {
            ExtrasType::None => 0,
            _ => event.extras_runs,
        };

        if !self.stats.batters.contains_key(&event.striker_id) {
            let name = self.name_of(&event.striker_id, UNNAMED_BATTER);
            self.stats
                .batters
                .insert(event.striker_id.clone(), BatterStats::new(event.striker_id.clone(), name));
        }
        if !self.stats.bowlers.contains_key(&event.bowler_id) {
            let name = self.name_of(&event.bowler_id, UNNAMED_BOWLER);
            self.stats
                .bowlers
                .insert(event.bowler_id.clone(), BowlerStats::new(event.bowler_id.clone(), name));
        }

        if let Some(batter) = self.stats.batters.get_mut(&event.striker_id) {
            batter.runs = batter.runs.saturating_add(event.runs_scored);
            if legal {
                batter.balls += 1;
            }
            // Boundary credit looks at bat runs only
            match event.runs_scored {
                4 => batter.fours += 1,
                6 => batter.sixes += 1,
                _ => {}
            }
        }

        let extras = &mut self.stats.extras;
        extras.total = extras.total.saturating_add(counted_extras);
        match event.extras_type {
            ExtrasType::Wide => extras.wide = extras.wide.saturating_add(counted_extras),
            ExtrasType::NoBall => extras.noball = extras.noball.saturating_add(counted_extras),
            ExtrasType::Bye => extras.bye = extras.bye.saturating_add(counted_extras),
            ExtrasType::LegBye => extras.legbye = extras.legbye.saturating_add(counted_extras),
            ExtrasType::None => {}
        }
        self.stats.score = self.stats.score.saturating_add(event.runs_scored.saturating_add(counted_extras));

        if let Some(bowler) = self.stats.bowlers.get_mut(&event.bowler_id) {
            bowler.runs = bowler.runs.saturating_add(event.bowler_runs());
            match event.extras_type {
                ExtrasType::Wide => bowler.wides += 1,
                ExtrasType::NoBall => bowler.no_balls += 1,
                _ => {}
            }
            if legal {
                bowler.balls += 1;
            }
        }
        if legal {
            self.stats.balls += 1;
        }

        self.track_over(event);

        if event.is_wicket {
            self.record_wicket(event);
        }
    }

    fn track_over(&mut self, event: &BallEvent) {
        match &self.over.bowler {
            None => self.over.bowler = Some(event.bowler_id.clone()),
            Some(bowler) if *bowler != event.bowler_id => self.over.shared = true,
            Some(_) => {}
        }
        self.over.runs = self.over.runs.saturating_add(event.bowler_runs());

        if event.is_legal() && self.stats.balls % 6 == 0 {
            let finished = std::mem::take(&mut self.over);
            if finished.runs == 0 && !finished.shared {
                if let Some(bowler) = finished.bowler.and_then(|id| self.stats.bowlers.get_mut(&id)) {
                    bowler.maidens += 1;
                }
            }
        }
    }

    fn record_wicket(&mut self, event: &BallEvent) {
        self.stats.wickets += 1;

        let bowler_name = self.name_of(&event.bowler_id, UNNAMED_BOWLER);
        let assister_name = event
            .assister_id
            .as_ref()
            .and_then(|id| self.players.player_name(id))
            .map(str::to_string);
        let text = dismissal::resolve(event.wicket_type, &bowler_name, assister_name.as_deref());

        if let Some(out_id) = event.dismissed_player() {
            match self.stats.batters.get_mut(out_id) {
                Some(batter) => {
                    batter.is_out = true;
                    batter.wicket_type = Some(event.wicket_type);
                    batter.dismissal = Some(text.clone());
                    self.stats.last_wicket = Some(dismissal::snapshot(batter, &text));
                }
                None => {
                    // Dismissed without facing a ball: no batting entry, zero figures
                    let name = self.name_of(out_id, UNNAMED_BATTER);
                    let unfaced = BatterStats::new(out_id.clone(), name);
                    self.stats.last_wicket = Some(dismissal::snapshot(&unfaced, &text));
                }
            }
        }

        if event.wicket_type.credits_bowler() {
            if let Some(bowler) = self.stats.bowlers.get_mut(&event.bowler_id) {
                bowler.wickets += 1;
            }
        }
    }

    /// Fold a sequence of events in order
    pub fn apply_all(&mut self, events: &[BallEvent]) {
        for event in events {
            self.apply(event);
        }
    }

    /// Finalize display figures and return the accumulated stats
    pub fn finish(mut self) -> MatchStats {
        self.stats.overs = overs_display(self.stats.balls);
        for bowler in self.stats.bowlers.values_mut() {
            bowler.overs = overs_display(bowler.balls);
            bowler.economy = economy(bowler.runs, bowler.balls);
        }
        self.stats
    }
}

/// Fold a full innings log; empty input yields zeroed stats with no players
pub fn fold<P: PlayerDirectory + ?Sized>(events: &[BallEvent], players: &P) -> MatchStats {
    let mut accumulator = StatAccumulator::new(players);
    accumulator.apply_all(events);
    accumulator.finish()
}
