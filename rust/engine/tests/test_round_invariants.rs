use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use royale_engine::bankroll::Bankroll;
use royale_engine::config::TableConfig;
use royale_engine::engine::Engine;
use royale_engine::game::Stage;
use royale_engine::player::PlayerAction;
use royale_engine::record::RecordedAction;

fn action(code: u8, raise: u32) -> PlayerAction {
    match code % 4 {
        0 => PlayerAction::Fold,
        1 => PlayerAction::Check,
        2 => PlayerAction::Call,
        _ => PlayerAction::Raise(raise),
    }
}

fn chips_on_table(eng: &Engine) -> u32 {
    eng.players().iter().map(|p| p.stack()).sum::<u32>() + eng.pot()
}

fn expected_board(stage: Stage) -> Option<usize> {
    match stage {
        Stage::Preflop => Some(0),
        Stage::Flop => Some(3),
        Stage::Turn => Some(4),
        Stage::River => Some(5),
        _ => None,
    }
}

proptest! {
    #[test]
    fn chips_are_conserved_through_a_round(
        seed in any::<u64>(),
        players in 2usize..=6,
        bankroll in 1u32..400,
        script in prop::collection::vec((any::<u8>(), 1u32..150), 1..200),
    ) {
        let config = TableConfig { players, ..TableConfig::default() };
        let bank = Bankroll::new(bankroll);
        let mut eng = Engine::new(config, bank.clone()).unwrap();
        eng.start_round(&mut ChaCha20Rng::seed_from_u64(seed)).unwrap();
        let total = chips_on_table(&eng);
        prop_assert_eq!(total, bankroll + 200 * (players as u32 - 1));

        for &(code, raise) in script.iter().cycle().take(400) {
            let Some(seat) = eng.current_player() else { break };
            prop_assert!(!eng.player(seat).unwrap().is_folded());
            prop_assert!(eng.player(seat).unwrap().stack() > 0);

            eng.act(seat, action(code, raise)).unwrap();

            prop_assert_eq!(chips_on_table(&eng), total);
            prop_assert_eq!(bank.balance(), eng.player(0).unwrap().stack());
            if let Some(n) = expected_board(eng.stage()) {
                prop_assert_eq!(eng.board().len(), n);
            }
        }

        if eng.stage() == Stage::Showdown {
            prop_assert_eq!(eng.pot(), 0);
            let info = eng.showdown().unwrap();
            prop_assert!(!info.winners.is_empty());
            prop_assert!(info.winners.iter().all(|&w| !eng.player(w).unwrap().is_folded()));
        }
    }

    #[test]
    fn pot_equals_recorded_payments(
        seed in any::<u64>(),
        script in prop::collection::vec((any::<u8>(), 1u32..80), 1..60),
    ) {
        let mut eng = Engine::new(TableConfig::default(), Bankroll::new(300)).unwrap();
        eng.start_round(&mut ChaCha20Rng::seed_from_u64(seed)).unwrap();

        for &(code, raise) in &script {
            let Some(seat) = eng.current_player() else { break };
            eng.act(seat, action(code, raise)).unwrap();
            if eng.is_round_over() {
                break;
            }
            let record = eng.record().unwrap();
            let paid: u32 = record
                .actions
                .iter()
                .map(|a| match a.action {
                    RecordedAction::SmallBlind(n)
                    | RecordedAction::BigBlind(n)
                    | RecordedAction::Call(n)
                    | RecordedAction::Raise(n)
                    | RecordedAction::AllIn(n) => n,
                    _ => 0,
                })
                .sum();
            prop_assert_eq!(eng.pot(), paid);
        }
    }
}
