mod common;

use common::*;
use scorebook::{compute_stats, BallEventDraft, ExtrasType, PlayerId, WicketType};

fn id(s: &str) -> PlayerId {
    PlayerId::from(s)
}

#[test]
fn test_empty_innings_is_all_zero() {
    let stats = compute_stats(&[], &names());

    assert_eq!(stats.score, 0);
    assert_eq!(stats.wickets, 0);
    assert_eq!(stats.balls, 0);
    assert_eq!(stats.overs, "0.0");
    assert!(stats.batters.is_empty());
    assert!(stats.bowlers.is_empty());
    assert!(stats.current_striker_id.is_none());
    assert!(stats.current_non_striker_id.is_none());
    assert!(stats.current_bowler_id.is_none());
    assert!(stats.last_wicket.is_none());
}

#[test]
fn test_single_boundary() {
    let events = stamp_log(vec![BallEventDraft::new("ana", "ben", "xia").runs(4)]);
    let stats = compute_stats(&events, &names());

    let ana = &stats.batters[&id("ana")];
    assert_eq!((ana.runs, ana.balls, ana.fours), (4, 1, 1));
    let xia = &stats.bowlers[&id("xia")];
    assert_eq!((xia.runs, xia.balls), (4, 1));
    assert_eq!(xia.economy, "24.00");
    assert_eq!(stats.score, 4);
    assert_eq!(stats.overs, "0.1");
    assert_eq!(ana.strike_rate(), 400.0);
}

#[test]
fn test_wide_is_not_a_ball() {
    let events = stamp_log(vec![BallEventDraft::new("ana", "ben", "xia").extras("WD", 1)]);
    let stats = compute_stats(&events, &names());

    assert_eq!(stats.extras.wide, 1);
    assert_eq!(stats.extras.total, 1);
    assert_eq!(stats.score, 1);
    assert_eq!(stats.balls, 0);
    assert_eq!(stats.batters[&id("ana")].balls, 0);
    let xia = &stats.bowlers[&id("xia")];
    assert_eq!((xia.balls, xia.runs, xia.wides), (0, 1, 1));
    assert_eq!(xia.economy, "0.00");
    // One extra run on a wide crosses the batters
    assert_eq!(stats.current_striker_id, Some(id("ben")));
}

#[test]
fn test_byes_are_not_charged_to_the_bowler() {
    let events = stamp_log(vec![
        BallEventDraft::new("ana", "ben", "xia").extras("B", 4),
        BallEventDraft::new("ana", "ben", "xia").extras("LB", 1),
    ]);
    let stats = compute_stats(&events, &names());

    assert_eq!(stats.score, 5);
    assert_eq!((stats.extras.bye, stats.extras.legbye), (4, 1));
    assert_eq!(stats.bowlers[&id("xia")].runs, 0);
    assert_eq!(stats.batters[&id("ana")].balls, 2);
    // Leg byes do not rotate strike
    assert_eq!(stats.current_striker_id, Some(id("ana")));
}

#[test]
fn test_no_ball_hit_for_six() {
    let events = stamp_log(vec![BallEventDraft::new("ana", "ben", "xia").runs(6).extras("NB", 1)]);
    let stats = compute_stats(&events, &names());

    let ana = &stats.batters[&id("ana")];
    assert_eq!((ana.runs, ana.balls, ana.sixes), (6, 0, 1));
    let xia = &stats.bowlers[&id("xia")];
    assert_eq!((xia.runs, xia.balls, xia.no_balls), (7, 0, 1));
    assert_eq!(stats.score, 7);
    assert_eq!(stats.current_striker_id, Some(id("ben")));
}

#[test]
fn test_wicket_on_sixth_ball_clears_striker_and_bowler() {
    let mut drafts: Vec<_> = (0..5).map(|_| BallEventDraft::new("ana", "ben", "xia")).collect();
    drafts.push(BallEventDraft::new("ana", "ben", "xia").wicket("bowled"));
    let stats = compute_stats(&stamp_log(drafts), &names());

    assert!(stats.current_bowler_id.is_none());
    assert!(stats.current_striker_id.is_none());
    assert_eq!(stats.current_non_striker_id, Some(id("ana")));
    assert!(stats.needs_selection());
}

#[test]
fn test_caught_dismissal_text_and_credit() {
    let events = stamp_log(vec![
        BallEventDraft::new("ana", "ben", "xia").runs(3),
        BallEventDraft::new("ben", "ana", "xia").wicket("caught").assisted_by("zed"),
    ]);
    let stats = compute_stats(&events, &names());

    let ben = &stats.batters[&id("ben")];
    assert!(ben.is_out);
    assert_eq!(ben.wicket_type, Some(WicketType::Caught));
    assert_eq!(ben.dismissal.as_deref(), Some("c ZED b XIA"));
    assert_eq!(stats.bowlers[&id("xia")].wickets, 1);

    let last = stats.last_wicket.as_ref().unwrap();
    assert_eq!(last.player_id, id("ben"));
    assert_eq!(last.dismissal, "c ZED b XIA");
    assert_eq!(stats.active_batters().len(), 1);
}

#[test]
fn test_run_out_of_non_striker_is_not_a_bowler_wicket() {
    let events = stamp_log(vec![
        BallEventDraft::new("ana", "ben", "xia").runs(2),
        BallEventDraft::new("ben", "ana", "xia")
            .runs(1)
            .wicket("runout")
            .out("ana")
            .assisted_by("yul"),
    ]);
    let stats = compute_stats(&events, &names());

    assert_eq!(stats.wickets, 1);
    assert_eq!(stats.bowlers[&id("xia")].wickets, 0);
    let ana = &stats.batters[&id("ana")];
    assert!(ana.is_out);
    assert_eq!(ana.dismissal.as_deref(), Some("run out (YUL)"));
    // The single crossed them: ben is at the far end, ana's slot is empty
    assert_eq!(stats.current_non_striker_id, Some(id("ben")));
    assert!(stats.current_striker_id.is_none());
}

#[test]
fn test_last_wicket_survives_later_balls() {
    let events = stamp_log(vec![
        BallEventDraft::new("ana", "ben", "xia").runs(4),
        BallEventDraft::new("ana", "ben", "xia").wicket("lbw"),
        BallEventDraft::new("cat", "ben", "xia").runs(2),
    ]);
    let stats = compute_stats(&events, &names());

    let last = stats.last_wicket.as_ref().unwrap();
    assert_eq!(last.name, "ANA");
    assert_eq!((last.runs, last.balls, last.fours), (4, 2, 1));
    assert_eq!(last.dismissal, "lbw b XIA");
}

#[test]
fn test_maiden_over() {
    let mut drafts: Vec<_> = (0..6).map(|_| BallEventDraft::new("ana", "ben", "xia")).collect();
    drafts.extend((0..6).map(|_| BallEventDraft::new("ben", "ana", "yul").extras("LB", 1)));
    drafts.extend((0..6).map(|_| BallEventDraft::new("ana", "ben", "xia")));
    drafts.insert(13, BallEventDraft::new("ana", "ben", "xia").extras("WD", 1));
    let stats = compute_stats(&stamp_log(drafts), &names());

    assert_eq!(stats.bowlers[&id("xia")].maidens, 1);
    // Leg byes are not charged, so the second over is a maiden too
    assert_eq!(stats.bowlers[&id("yul")].maidens, 1);
    assert_eq!(stats.bowlers[&id("xia")].overs, "2.0");
    assert_eq!(stats.overs, "3.0");
}

#[test]
fn test_over_and_ball_numbers_skip_extras() {
    let events = stamp_log(vec![
        BallEventDraft::new("ana", "ben", "xia"),
        BallEventDraft::new("ana", "ben", "xia").extras("NB", 1),
        BallEventDraft::new("ana", "ben", "xia"),
    ]);

    assert_eq!(events[1].extras_type, ExtrasType::NoBall);
    let numbers: Vec<_> = events.iter().map(|e| (e.over_number, e.ball_number)).collect();
    assert_eq!(numbers, vec![(0, 1), (0, 2), (0, 2)]);
}

#[test]
fn test_unknown_names_fall_back() {
    let events = stamp_log(vec![BallEventDraft::new("new1", "new2", "new3").runs(1)]);
    let stats = compute_stats(&events, &names());

    assert_eq!(stats.batters[&id("new1")].name, "Batter");
    assert_eq!(stats.bowlers[&id("new3")].name, "Bowler");
}
