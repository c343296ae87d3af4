//! Integration tests for scoring: match status transitions, live updates,
//! decisive finishes, and tournament completion.

use chrono::Utc;
use hoops_tournament_web::{
    finish_match, finish_tournament, form_pools, generate_schedule, report_score, start_match,
    MatchId, MatchStatus, Tournament, TournamentError, TournamentSettings, TournamentStatus,
};

/// 8 players, 4 teams, one pool, 6 pending matches.
fn active_tournament() -> Tournament {
    let mut t = Tournament::new(
        "Thursday Night Hoops",
        "Gymnase Jean Moulin",
        Utc::now(),
        "Sam",
        TournamentSettings::default(),
    )
    .unwrap();
    for i in 0..8 {
        t.add_player(format!("P{i}"), None).unwrap();
    }
    form_pools(&mut t).unwrap();
    generate_schedule(&mut t).unwrap();
    t
}

fn first_match_id(t: &Tournament) -> MatchId {
    t.matches[0].id
}

#[test]
fn start_match_moves_pending_to_active() {
    let mut t = active_tournament();
    let id = first_match_id(&t);
    start_match(&mut t, id).unwrap();

    let m = &t.matches[0];
    assert_eq!(m.status, MatchStatus::Active);
    assert!(m.start_time.is_some());

    assert_eq!(start_match(&mut t, id), Err(TournamentError::InvalidTransition));
}

#[test]
fn reporting_requires_an_active_match() {
    let mut t = active_tournament();
    let id = first_match_id(&t);
    assert_eq!(
        report_score(&mut t, id, 5, 3),
        Err(TournamentError::InvalidTransition)
    );
}

#[test]
fn live_reports_overwrite_and_keep_the_match_active() {
    let mut t = active_tournament();
    let id = first_match_id(&t);
    start_match(&mut t, id).unwrap();

    report_score(&mut t, id, 5, 3).unwrap();
    report_score(&mut t, id, 12, 10).unwrap();

    let m = &t.matches[0];
    assert_eq!((m.score_a, m.score_b), (12, 10));
    assert_eq!(m.status, MatchStatus::Active);
    assert!(m.winner.is_none());
}

#[test]
fn finishing_a_pending_match_fails() {
    let mut t = active_tournament();
    let id = first_match_id(&t);
    assert_eq!(
        finish_match(&mut t, id, 21, 15),
        Err(TournamentError::InvalidTransition)
    );
}

#[test]
fn tied_scores_cannot_finish_a_match() {
    let mut t = active_tournament();
    let id = first_match_id(&t);
    start_match(&mut t, id).unwrap();
    report_score(&mut t, id, 20, 18).unwrap();

    assert_eq!(
        finish_match(&mut t, id, 21, 21),
        Err(TournamentError::TiedScore { score: 21 })
    );

    // The match stays active with its last live score untouched.
    let m = &t.matches[0];
    assert_eq!(m.status, MatchStatus::Active);
    assert_eq!((m.score_a, m.score_b), (20, 18));
}

#[test]
fn winner_must_reach_the_score_limit() {
    let mut t = active_tournament();
    let id = first_match_id(&t);
    start_match(&mut t, id).unwrap();

    assert!(matches!(
        finish_match(&mut t, id, 10, 8),
        Err(TournamentError::InvalidInput { .. })
    ));
    assert_eq!(t.matches[0].status, MatchStatus::Active);
}

#[test]
fn finish_records_winner_and_is_exactly_once() {
    let mut t = active_tournament();
    let id = first_match_id(&t);
    let team_a = t.matches[0].team_a;
    start_match(&mut t, id).unwrap();
    finish_match(&mut t, id, 21, 15).unwrap();

    let m = &t.matches[0];
    assert_eq!(m.status, MatchStatus::Finished);
    assert_eq!((m.score_a, m.score_b), (21, 15));
    assert_eq!(m.winner, Some(team_a));
    assert!(m.end_time.is_some());

    assert_eq!(
        finish_match(&mut t, id, 15, 21),
        Err(TournamentError::InvalidTransition)
    );
    assert_eq!(t.matches[0].winner, Some(team_a));
}

#[test]
fn tournament_finishes_once_all_matches_do() {
    let mut t = active_tournament();
    let ids: Vec<_> = t.matches.iter().map(|m| m.id).collect();

    for (i, id) in ids.iter().enumerate() {
        start_match(&mut t, *id).unwrap();
        finish_match(&mut t, *id, 21, 10 + i as u32).unwrap();
        let expected = if i + 1 == ids.len() {
            TournamentStatus::Finished
        } else {
            TournamentStatus::Active
        };
        assert_eq!(t.status, expected);
    }
    assert_eq!(t.completed_matches(), ids.len());

    // No further score changes once finished.
    assert_eq!(
        report_score(&mut t, ids[0], 30, 0),
        Err(TournamentError::InvalidTransition)
    );
}

#[test]
fn explicit_finish_requires_all_matches_done() {
    let mut t = active_tournament();
    assert!(matches!(
        finish_tournament(&mut t),
        Err(TournamentError::PreconditionFailed { .. })
    ));
    assert_eq!(t.status, TournamentStatus::Active);
}

#[test]
fn explicit_finish_outside_active_fails() {
    let mut t = Tournament::new(
        "Not Started",
        "Court 2",
        Utc::now(),
        "Sam",
        TournamentSettings::default(),
    )
    .unwrap();
    assert_eq!(finish_tournament(&mut t), Err(TournamentError::InvalidTransition));
}

#[test]
fn unknown_match_id_is_reported() {
    let mut t = active_tournament();
    let bogus = uuid::Uuid::new_v4();
    assert_eq!(
        start_match(&mut t, bogus),
        Err(TournamentError::MatchNotFound(bogus))
    );
}
