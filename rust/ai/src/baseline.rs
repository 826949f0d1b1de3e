//! Baseline opponent: maps the current hand to a strength in `[0, 1)` and
//! turns it into fold/check/call/raise probabilities.

use rand::{Rng, RngCore};
use royale_engine::cards::Card;
use royale_engine::engine::Engine;
use royale_engine::hand::evaluate_hand;
use royale_engine::player::PlayerAction;

use crate::AIOpponent;

/// Base strength per hand category, high card to straight flush.
const CATEGORY_WEIGHT: [f64; 9] = [0.05, 0.15, 0.30, 0.45, 0.60, 0.75, 0.85, 0.95, 0.99];
const KICKER_WEIGHT: f64 = 0.1;
const MAX_STRENGTH: f64 = 0.999;

/// Strength-weighted probabilistic policy.
///
/// Stronger hands raise more often and fold less. Every decision consumes
/// exactly one uniform draw from the supplied RNG.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
/// use royale_ai::baseline::BaselineAI;
/// use royale_ai::AIOpponent;
/// use royale_engine::bankroll::Bankroll;
/// use royale_engine::config::TableConfig;
/// use royale_engine::engine::Engine;
///
/// let ai = BaselineAI::new();
/// assert_eq!(ai.name(), "BaselineAI");
///
/// let mut rng = ChaCha20Rng::seed_from_u64(42);
/// let mut engine = Engine::new(TableConfig::default(), Bankroll::new(500)).unwrap();
/// engine.start_round(&mut rng).unwrap();
///
/// let seat = engine.current_player().unwrap();
/// let _action = ai.get_action(&engine, seat, &mut rng);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }

    /// Strength estimate of `hole` plus whatever community cards are out.
    ///
    /// Category weight plus a kicker bonus from the highest tie-break rank,
    /// capped just below 1.
    pub fn estimate_strength(hole: [Card; 2], community: &[Card]) -> f64 {
        let mut cards = hole.to_vec();
        cards.extend_from_slice(community);
        let hs = evaluate_hand(&cards);

        let base = CATEGORY_WEIGHT[hs.category.value() as usize];
        let kicker = hs
            .top_rank()
            .map_or(0.0, |r| f64::from(r.value() - 2) / 12.0);
        (base + kicker * KICKER_WEIGHT).min(MAX_STRENGTH)
    }

    /// Picks an action from `strength` and a uniform `roll` in `[0, 1)`.
    ///
    /// Raises are expressed as the increment over the call, at least
    /// `min_raise` and otherwise half the current bet.
    pub fn decide(
        strength: f64,
        to_call: u32,
        current_bet: u32,
        min_raise: u32,
        roll: f64,
    ) -> PlayerAction {
        let increment = min_raise.max((f64::from(current_bet) * 0.5).round() as u32);

        if to_call == 0 {
            let raise_p = (0.05 + 0.4 * strength).min(0.45);
            return if roll < raise_p {
                PlayerAction::Raise(increment)
            } else {
                PlayerAction::Check
            };
        }

        let fold_below = (0.3 - 0.25 * strength).max(0.02);
        let call_band = (0.2 + 0.6 * strength).min(0.9);
        if roll < fold_below {
            PlayerAction::Fold
        } else if roll < fold_below + call_band {
            PlayerAction::Call
        } else {
            PlayerAction::Raise(increment)
        }
    }
}

impl AIOpponent for BaselineAI {
    fn get_action(&self, engine: &Engine, seat: usize, rng: &mut dyn RngCore) -> PlayerAction {
        let Some(hole) = engine.player(seat).and_then(|p| p.hand()) else {
            return PlayerAction::Check;
        };
        let strength = Self::estimate_strength(hole, engine.board());
        let to_call = engine.to_call(seat);
        let roll: f64 = rng.random();
        let action = Self::decide(
            strength,
            to_call,
            engine.current_bet(),
            engine.min_raise(),
            roll,
        );
        tracing::trace!(seat, strength, to_call, roll, action = ?action, "bot decision");
        action
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use royale_engine::bankroll::Bankroll;
    use royale_engine::cards::{Rank, Suit};
    use royale_engine::config::TableConfig;
    use royale_engine::game::Stage;

    fn c(s: Suit, r: Rank) -> Card {
        Card { suit: s, rank: r }
    }

    #[test]
    fn weak_preflop_hand_is_weak() {
        let s = BaselineAI::estimate_strength(
            [c(Suit::Hearts, Rank::Seven), c(Suit::Spades, Rank::Two)],
            &[],
        );
        // High card seven: 0.05 + 0.1 * 5/12
        assert!((s - (0.05 + 0.5 / 12.0)).abs() < 1e-9);
    }

    #[test]
    fn pocket_aces_outrank_high_card() {
        let aces = BaselineAI::estimate_strength(
            [c(Suit::Hearts, Rank::Ace), c(Suit::Spades, Rank::Ace)],
            &[],
        );
        assert!((aces - 0.25).abs() < 1e-9);
    }

    #[test]
    fn royal_flush_is_capped() {
        let s = BaselineAI::estimate_strength(
            [c(Suit::Hearts, Rank::Ace), c(Suit::Hearts, Rank::King)],
            &[
                c(Suit::Hearts, Rank::Queen),
                c(Suit::Hearts, Rank::Jack),
                c(Suit::Hearts, Rank::Ten),
            ],
        );
        assert_eq!(s, MAX_STRENGTH);
    }

    #[test]
    fn free_action_raises_or_checks() {
        assert_eq!(
            BaselineAI::decide(0.5, 0, 0, 20, 0.1),
            PlayerAction::Raise(20)
        );
        assert_eq!(BaselineAI::decide(0.5, 0, 0, 20, 0.3), PlayerAction::Check);
        // Raise probability tops out at 45%.
        assert_eq!(BaselineAI::decide(0.99, 0, 0, 20, 0.46), PlayerAction::Check);
    }

    #[test]
    fn owed_call_splits_into_fold_call_raise() {
        // strength 0: fold below 0.3, call below 0.5, raise above
        assert_eq!(BaselineAI::decide(0.0, 20, 20, 20, 0.29), PlayerAction::Fold);
        assert_eq!(BaselineAI::decide(0.0, 20, 20, 20, 0.45), PlayerAction::Call);
        assert_eq!(
            BaselineAI::decide(0.0, 20, 20, 20, 0.6),
            PlayerAction::Raise(20)
        );
        // Even the strongest hand folds on a low enough roll.
        assert_eq!(BaselineAI::decide(0.999, 20, 20, 20, 0.01), PlayerAction::Fold);
    }

    #[test]
    fn raise_sizing_follows_the_current_bet() {
        assert_eq!(
            BaselineAI::decide(0.0, 100, 100, 20, 0.99),
            PlayerAction::Raise(50)
        );
    }

    #[test]
    fn bot_actions_are_always_accepted() {
        let ai = BaselineAI::new();
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let mut engine = Engine::new(TableConfig::default(), Bankroll::new(500)).unwrap();
        for _ in 0..20 {
            engine.start_round(&mut rng).unwrap();
            while let Some(seat) = engine.current_player() {
                let action = ai.get_action(&engine, seat, &mut rng);
                engine.act(seat, action).unwrap();
            }
            assert_eq!(engine.stage(), Stage::Showdown);
        }
    }

    #[test]
    fn seat_without_cards_checks() {
        let ai = BaselineAI::new();
        let engine = Engine::new(TableConfig::default(), Bankroll::new(500)).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert_eq!(ai.get_action(&engine, 1, &mut rng), PlayerAction::Check);
    }
}
