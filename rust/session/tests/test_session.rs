use std::time::Duration;

use royale_engine::game::Stage;
use royale_engine::memory::{FlipOutcome, MemoryStatus};
use royale_engine::player::PlayerAction;
use royale_session::config::SessionConfig;
use royale_session::errors::SessionError;
use royale_session::events::{Cue, Mode, QueueScheduler, RecordingPresenter, TimerEvent};
use royale_session::logging::CapturedLogs;
use royale_session::session::Session;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

type TestSession = Session<QueueScheduler, RecordingPresenter>;

fn session(seed: u64) -> TestSession {
    let config = SessionConfig {
        seed: Some(seed),
        ..SessionConfig::default()
    };
    Session::new(config, QueueScheduler::new(), RecordingPresenter::new()).unwrap()
}

/// Plays the current round to the end, the human answering with `action`.
fn play_out(s: &mut TestSession, action: PlayerAction) {
    loop {
        s.run_pending().unwrap();
        if s.engine().current_player() == Some(0) {
            s.human_action(action).unwrap();
        } else {
            break;
        }
    }
}

fn pair_ids(s: &TestSession, symbol: usize) -> [usize; 2] {
    let ids: Vec<usize> = s
        .memory()
        .unwrap()
        .cards()
        .iter()
        .filter(|c| c.symbol == symbol)
        .map(|c| c.id)
        .collect();
    [ids[0], ids[1]]
}

#[test]
fn new_session_starts_in_the_menu() {
    let s = session(1);
    assert_eq!(s.mode(), Mode::Menu);
    assert_eq!(s.bankroll().balance(), 500);
    let first = s.presenter().last().unwrap();
    assert_eq!(first.mode, Mode::Menu);
    assert!(first.table.is_none());
    assert!(first.memory.is_none());
}

#[test]
fn unknown_opponent_is_rejected() {
    let config = SessionConfig {
        opponent: "shark".into(),
        ..SessionConfig::default()
    };
    let err = Session::new(config, QueueScheduler::new(), RecordingPresenter::new()).err();
    assert!(matches!(err, Some(SessionError::Ai(_))));
}

#[test]
fn entering_poker_deals_and_schedules_the_first_bot() {
    let mut s = session(2);
    s.enter_poker().unwrap();

    assert_eq!(s.mode(), Mode::Poker);
    assert_eq!(s.engine().stage(), Stage::Preflop);
    assert_eq!(s.presenter().cues, vec![Cue::Shuffle]);
    assert_eq!(s.scheduler().len(), 1);

    let event = s.scheduler_mut().next_due().unwrap();
    assert_eq!(event, TimerEvent::BotTurn { round_id: 1, seat: 3 });
    let delay = s.scheduler().now();
    assert!(delay >= Duration::from_millis(400) && delay <= Duration::from_millis(800));
}

#[test]
fn human_cannot_act_out_of_turn_or_mode() {
    let mut s = session(3);
    assert!(matches!(
        s.human_action(PlayerAction::Call),
        Err(SessionError::WrongMode {
            expected: Mode::Poker,
            actual: Mode::Menu
        })
    ));
    s.enter_poker().unwrap();
    assert!(matches!(
        s.human_action(PlayerAction::Call),
        Err(SessionError::NotHumanTurn)
    ));
}

#[test]
fn bots_play_until_the_human_is_up() {
    let mut s = session(4);
    s.enter_poker().unwrap();
    s.run_pending().unwrap();

    let eng = s.engine();
    assert!(eng.is_round_over() || eng.current_player() == Some(0));
    let snap = s.presenter().last().unwrap();
    let table = snap.table.as_ref().unwrap();
    if !eng.is_round_over() {
        assert!(table.seats[0].hole.is_some());
        assert!(table.seats[1..].iter().all(|seat| seat.hole.is_none()));
    }
}

#[test]
fn human_fold_lets_the_bots_finish() {
    let mut s = session(5);
    s.enter_poker().unwrap();
    play_out(&mut s, PlayerAction::Fold);

    assert_eq!(s.engine().stage(), Stage::Showdown);
    assert!(s.scheduler().is_empty());
    assert!(s.bankroll().balance() <= 500);
}

#[test]
fn stale_bot_timer_from_a_finished_round_is_dropped() {
    let mut s = session(6);
    s.enter_poker().unwrap();
    play_out(&mut s, PlayerAction::Fold);
    s.next_round().unwrap();
    assert_eq!(s.engine().round_id(), 2);

    let pot = s.engine().pot();
    let current = s.engine().current_player();
    let actions = s.engine().record().unwrap().actions.len();

    let logs = CapturedLogs::new();
    let subscriber = Registry::default().with(logs.clone());
    tracing::subscriber::with_default(subscriber, || {
        s.on_timer(TimerEvent::BotTurn { round_id: 1, seat: 3 })
            .unwrap();
    });

    assert_eq!(s.engine().pot(), pot);
    assert_eq!(s.engine().current_player(), current);
    assert_eq!(s.engine().record().unwrap().actions.len(), actions);
    let warnings = logs.at_level(Level::WARN);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "dropping stale bot timer");
}

#[test]
fn bot_timer_is_dropped_after_leaving_the_table() {
    let mut s = session(7);
    s.enter_poker().unwrap();
    let pending = s.scheduler_mut().next_due().unwrap();

    s.enter_menu();
    s.on_timer(pending).unwrap();
    assert_eq!(s.engine().current_player(), Some(3));
    assert_eq!(s.engine().record().unwrap().actions.len(), 2);

    // Coming back resumes the same round with a fresh timer.
    s.enter_poker().unwrap();
    assert_eq!(s.engine().round_id(), 1);
    let resumed = s.scheduler_mut().next_due().unwrap();
    assert_eq!(resumed, pending);
    s.on_timer(resumed).unwrap();
    assert_eq!(s.engine().record().unwrap().actions.len(), 3);
}

#[test]
fn next_round_while_playing_is_refused() {
    let mut s = session(8);
    s.enter_poker().unwrap();
    assert!(matches!(
        s.next_round(),
        Err(SessionError::Game(
            royale_engine::errors::GameError::RoundInProgress
        ))
    ));
}

#[test]
fn several_rounds_run_to_completion() {
    let mut s = session(9);
    s.enter_poker().unwrap();
    for round in 1..=5u64 {
        if round > 1 {
            s.next_round().unwrap();
        }
        play_out(&mut s, PlayerAction::Call);
        assert_eq!(s.engine().round_id(), round);
        assert_eq!(s.engine().stage(), Stage::Showdown);

        let snap = s.snapshot();
        assert_eq!(snap.bankroll, s.engine().player(0).unwrap().stack());
        assert!(snap.to_json().unwrap().contains("\"mode\":\"poker\""));
        if s.bankroll().balance() == 0 {
            break;
        }
    }
}

#[test]
fn same_seed_replays_the_same_session() {
    let run = |seed| {
        let mut s = session(seed);
        s.enter_poker().unwrap();
        play_out(&mut s, PlayerAction::Call);
        let record = s.engine().record().unwrap().clone();
        (record.actions, record.board, record.showdown, s.bankroll().balance())
    };
    assert_eq!(run(10), run(10));
}

#[test]
fn memory_mismatch_conceals_after_the_delay() {
    let mut s = session(11);
    s.enter_memory().unwrap();
    assert_eq!(s.mode(), Mode::Memory);
    assert_eq!(s.memory_id(), 1);

    let [a, _] = pair_ids(&s, 0);
    let [b, _] = pair_ids(&s, 1);
    s.memory_flip(a).unwrap();
    let out = s.memory_flip(b).unwrap();
    assert!(matches!(out, FlipOutcome::Mismatched { .. }));
    assert_eq!(s.bankroll().balance(), 490);

    let snap = s.presenter().last().unwrap();
    let view = snap.memory.as_ref().unwrap();
    assert_eq!(view.cards[a].symbol, Some(0));
    assert_eq!(view.attempts, 2);

    let event = s.scheduler_mut().next_due().unwrap();
    assert_eq!(event, TimerEvent::Conceal { game_id: 1 });
    assert_eq!(s.scheduler().now(), Duration::from_millis(900));
    s.on_timer(event).unwrap();
    assert!(s.memory().unwrap().face_up().is_empty());

    let view = s.snapshot().memory.unwrap();
    assert!(view.cards.iter().all(|c| c.symbol.is_none()));
}

#[test]
fn conceal_timer_of_an_old_game_is_dropped() {
    let mut s = session(12);
    s.enter_memory().unwrap();
    let [a, _] = pair_ids(&s, 0);
    let [b, _] = pair_ids(&s, 1);
    s.memory_flip(a).unwrap();
    s.memory_flip(b).unwrap();
    let stale = s.scheduler_mut().next_due().unwrap();

    s.enter_memory().unwrap();
    assert_eq!(s.memory_id(), 2);
    let [c, _] = pair_ids(&s, 0);
    let [d, _] = pair_ids(&s, 1);
    s.memory_flip(c).unwrap();
    s.memory_flip(d).unwrap();

    s.on_timer(stale).unwrap();
    assert!(s.memory().unwrap().awaiting_conceal());
}

#[test]
fn memory_match_cues_coin_and_feeds_the_table() {
    let mut s = session(13);
    s.enter_memory().unwrap();
    s.memory_bet(100).unwrap();
    let [a, b] = pair_ids(&s, 5);
    s.memory_flip(a).unwrap();
    let out = s.memory_flip(b).unwrap();
    let FlipOutcome::Matched { reward, jackpot, .. } = out else {
        panic!("expected a match, got {out:?}");
    };
    let cue = if jackpot { Cue::Jackpot } else { Cue::Coin };
    assert_eq!(s.presenter().cues.last(), Some(&cue));
    assert_eq!(s.bankroll().balance(), 500 + reward);

    s.enter_poker().unwrap();
    assert_eq!(s.engine().player(0).unwrap().stack(), 500 + reward);
}

#[test]
fn memory_inputs_need_memory_mode() {
    let mut s = session(14);
    assert!(matches!(s.memory_flip(0), Err(SessionError::WrongMode { .. })));
    s.enter_memory().unwrap();
    assert!(matches!(
        s.memory_bet(7),
        Err(SessionError::Memory(_))
    ));
}

#[test]
fn memory_game_can_be_lost() {
    let mut s = session(15);
    s.enter_memory().unwrap();
    let [a, _] = pair_ids(&s, 0);
    let [b, _] = pair_ids(&s, 1);
    for _ in 0..3 {
        s.memory_flip(a).unwrap();
        s.memory_flip(b).unwrap();
        s.run_pending().unwrap();
    }
    assert_eq!(s.memory().unwrap().status(), MemoryStatus::Lost);
    assert_eq!(s.bankroll().balance(), 470);
}
