use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bankroll::Bankroll;
use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::errors::{ConfigError, GameError};
use crate::game::{seat_after, Stage};
use crate::hand::{evaluate_hand, HandStrength};
use crate::player::{Player, PlayerAction, HUMAN_SEAT};
use crate::record::{ActionRecord, RecordedAction, RoundRecord, ShowdownInfo};
use crate::rules::{resolve_action, ValidatedAction};

/// What happened on one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub seat: usize,
    pub action: ValidatedAction,
    /// Stage after the action settled
    pub stage: Stage,
    pub stage_changed: bool,
    /// Seat holding the turn now, `None` once the round is over
    pub next: Option<usize>,
    /// Set when this action ended the round
    pub showdown: Option<ShowdownInfo>,
}

/// Round manager for one poker table: blinds, deal stages, turn order, pot
/// accounting and showdown.
///
/// Randomness is supplied by the caller on every shuffle, so a seeded RNG
/// reproduces a round exactly.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
/// use royale_engine::bankroll::Bankroll;
/// use royale_engine::config::TableConfig;
/// use royale_engine::engine::Engine;
/// use royale_engine::game::Stage;
///
/// let mut rng = ChaCha20Rng::seed_from_u64(7);
/// let mut engine = Engine::new(TableConfig::default(), Bankroll::new(500)).unwrap();
/// engine.start_round(&mut rng).unwrap();
///
/// assert_eq!(engine.stage(), Stage::Preflop);
/// assert_eq!(engine.pot(), 30);
/// assert_eq!(engine.current_bet(), 20);
/// ```
#[derive(Debug)]
pub struct Engine {
    config: TableConfig,
    players: Vec<Player>,
    deck: Deck,
    board: Vec<Card>,
    stage: Stage,
    pot: u32,
    current_bet: u32,
    current: Option<usize>,
    dealer: usize,
    round_id: u64,
    /// Seats that acted since the stage opened or the bet was last raised
    acted: Vec<bool>,
    record: Option<RoundRecord>,
    showdown: Option<ShowdownInfo>,
}

impl Engine {
    pub fn new(config: TableConfig, bankroll: Bankroll) -> Result<Self, ConfigError> {
        config.validate()?;
        let players = (0..config.players)
            .map(|seat| {
                if seat == HUMAN_SEAT {
                    Player::human(bankroll.clone())
                } else {
                    Player::bot(seat, config.bot_stake)
                }
            })
            .collect();
        Ok(Self {
            acted: vec![false; config.players],
            config,
            players,
            deck: Deck::build(),
            board: Vec::with_capacity(5),
            stage: Stage::Waiting,
            pot: 0,
            current_bet: 0,
            current: None,
            dealer: 0,
            round_id: 0,
            record: None,
            showdown: None,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn min_raise(&self) -> u32 {
        self.config.min_raise
    }
    /// Seat holding the turn, if a betting stage is open.
    pub fn current_player(&self) -> Option<usize> {
        self.current
    }
    pub fn dealer(&self) -> usize {
        self.dealer
    }
    /// Increases by one every round; 0 before the first round.
    pub fn round_id(&self) -> u64 {
        self.round_id
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }
    pub fn record(&self) -> Option<&RoundRecord> {
        self.record.as_ref()
    }
    pub fn showdown(&self) -> Option<&ShowdownInfo> {
        self.showdown.as_ref()
    }
    pub fn is_round_over(&self) -> bool {
        !self.stage.is_betting()
    }

    /// Chips `seat` still has to put in to match the current bet.
    pub fn to_call(&self, seat: usize) -> u32 {
        self.players
            .get(seat)
            .map_or(0, |p| self.current_bet.saturating_sub(p.bet_this_round()))
    }

    /// Non-folded seats still contesting the pot.
    pub fn contenders(&self) -> usize {
        self.players.iter().filter(|p| p.in_hand()).count()
    }

    /// Starts a new round: rotates the dealer, resets bot stakes, shuffles a
    /// fresh deck, deals two hole cards per seat and posts the blinds.
    ///
    /// Seats without chips sit the round out.
    ///
    /// # Errors
    ///
    /// - [`GameError::RoundInProgress`] while a betting stage is open
    /// - [`GameError::NotEnoughPlayers`] when fewer than two seats have chips
    /// - [`GameError::DeckExhausted`] when the deck cannot cover the hole cards
    pub fn start_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<u64, GameError> {
        self.start_round_with_deck(Deck::shuffled(rng))
    }

    /// [`Engine::start_round`] with a caller-supplied deck. Hole cards are
    /// dealt two at a time to seats 0, 1, 2, ... and the board follows.
    pub fn start_round_with_deck(&mut self, deck: Deck) -> Result<u64, GameError> {
        let preflop = if self.stage.allows(Stage::Preflop) {
            Stage::Preflop
        } else {
            return Err(GameError::RoundInProgress);
        };
        let bot_stake = self.config.bot_stake;
        let seated = self
            .players
            .iter()
            .filter(|p| if p.is_human() { p.stack() > 0 } else { bot_stake > 0 })
            .count();
        if seated < 2 {
            return Err(GameError::NotEnoughPlayers(seated));
        }

        let n = self.players.len();
        if deck.remaining() < 2 * n {
            return Err(GameError::DeckExhausted);
        }
        if self.round_id > 0 {
            self.dealer = seat_after(self.dealer, 1, n);
        }
        self.round_id += 1;
        self.deck = deck;
        self.board.clear();
        self.pot = 0;
        self.showdown = None;
        self.acted = vec![false; n];

        for i in 0..n {
            let hole = [self.draw()?, self.draw()?];
            let p = &mut self.players[i];
            p.start_round(hole, bot_stake);
            let has_chips = p.stack() > 0;
            p.set_active(has_chips);
        }

        self.transition(preflop);
        let mut record = RoundRecord::new(self.round_id, self.dealer);

        let sb = seat_after(self.dealer, 1, n);
        let bb = seat_after(self.dealer, 2, n);
        // The validated blind total fits in a u32, so these sums cannot wrap.
        let sb_paid = self.players[sb].pay(self.config.small_blind);
        self.pot += sb_paid;
        record.actions.push(ActionRecord {
            seat: sb,
            stage: preflop,
            action: RecordedAction::SmallBlind(sb_paid),
            pot: self.pot,
        });
        let bb_paid = self.players[bb].pay(self.config.big_blind);
        self.pot += bb_paid;
        record.actions.push(ActionRecord {
            seat: bb,
            stage: preflop,
            action: RecordedAction::BigBlind(bb_paid),
            pot: self.pot,
        });
        self.record = Some(record);
        self.current_bet = self.config.big_blind;

        tracing::info!(
            round_id = self.round_id,
            dealer = self.dealer,
            small_blind = sb,
            big_blind = bb,
            pot = self.pot,
            "round started"
        );

        self.settle(seat_after(self.dealer, 3, n))?;
        Ok(self.round_id)
    }

    /// Applies `action` for `seat` and moves the round along: next seat,
    /// next stage, or showdown once fewer than two players remain.
    ///
    /// # Errors
    ///
    /// - [`GameError::UnknownSeat`], [`GameError::NoRoundInProgress`]
    /// - [`GameError::PlayerAlreadyFolded`] for a folded seat
    /// - [`GameError::NotPlayersTurn`] when `seat` does not hold the turn
    /// - [`GameError::PotOverflow`] when the payment would not fit in the pot;
    ///   nothing changes and the seat keeps the turn
    /// - anything [`resolve_action`] rejects
    pub fn act(&mut self, seat: usize, action: PlayerAction) -> Result<TurnOutcome, GameError> {
        let n = self.players.len();
        if seat >= n {
            return Err(GameError::UnknownSeat(seat));
        }
        if !self.stage.is_betting() {
            return Err(GameError::NoRoundInProgress);
        }
        let expected = self.current.ok_or(GameError::NoRoundInProgress)?;
        if self.players[seat].is_folded() {
            return Err(GameError::PlayerAlreadyFolded(seat));
        }
        if seat != expected {
            return Err(GameError::NotPlayersTurn {
                expected,
                actual: seat,
            });
        }

        let resolved = resolve_action(
            self.players[seat].stack(),
            self.to_call(seat),
            self.config.min_raise,
            self.config.strict_actions,
            action,
        )?;
        let stage = self.stage;
        if self.pot.checked_add(resolved.amount()).is_none() {
            return Err(GameError::PotOverflow {
                pot: self.pot,
                amount: resolved.amount(),
            });
        }

        let player = &mut self.players[seat];
        match resolved {
            ValidatedAction::Fold => player.fold(),
            ValidatedAction::Check => {}
            ValidatedAction::Call(amount)
            | ValidatedAction::Raise(amount)
            | ValidatedAction::AllIn(amount) => {
                self.pot += player.pay(amount);
            }
        }
        let contributed = player.bet_this_round();
        if contributed > self.current_bet {
            self.current_bet = contributed;
            self.acted.iter_mut().for_each(|a| *a = false);
        }
        self.acted[seat] = true;

        if let Some(record) = self.record.as_mut() {
            record.actions.push(ActionRecord {
                seat,
                stage,
                action: resolved.into(),
                pot: self.pot,
            });
        }
        tracing::debug!(
            round_id = self.round_id,
            seat,
            stage = ?stage,
            action = ?resolved,
            pot = self.pot,
            current_bet = self.current_bet,
            "action applied"
        );

        self.current = None;
        self.settle(seat_after(seat, 1, n))?;

        Ok(TurnOutcome {
            seat,
            action: resolved,
            stage: self.stage,
            stage_changed: self.stage != stage,
            next: self.current,
            showdown: if self.stage == Stage::Showdown {
                self.showdown.clone()
            } else {
                None
            },
        })
    }

    /// Closes the current betting stage: deals the next community cards and
    /// reopens betting at the seat after the dealer, or resolves the
    /// showdown after the river. Stages where nobody can bet any more are
    /// run out automatically.
    ///
    /// This is the only place the stage moves within a round.
    pub fn advance_stage(&mut self) -> Result<Stage, GameError> {
        if !self.stage.is_betting() {
            return Err(GameError::NoRoundInProgress);
        }
        loop {
            if self.contenders() < 2 {
                self.resolve_showdown();
                break;
            }
            let next = match self.stage.next() {
                Some(Stage::Showdown) | None => {
                    self.resolve_showdown();
                    break;
                }
                Some(next) => next,
            };

            let want = next.cards_on_entry();
            let dealt = self.deck.deal_n(want);
            if dealt.len() < want {
                return Err(GameError::DeckExhausted);
            }
            self.board.extend_from_slice(&dealt);
            if let Some(record) = self.record.as_mut() {
                record.board.extend_from_slice(&dealt);
            }
            self.players.iter_mut().for_each(Player::start_stage);
            self.acted.iter_mut().for_each(|a| *a = false);
            self.current_bet = 0;
            self.current = None;
            self.transition(next);

            if self.betting_complete() {
                continue;
            }
            self.current = self.next_actor(seat_after(self.dealer, 1, self.players.len()));
            break;
        }
        Ok(self.stage)
    }

    fn draw(&mut self) -> Result<Card, GameError> {
        self.deck.deal().ok_or(GameError::DeckExhausted)
    }

    fn transition(&mut self, to: Stage) {
        debug_assert!(
            self.stage.allows(to),
            "illegal stage transition {:?} -> {:?}",
            self.stage,
            to
        );
        tracing::debug!(round_id = self.round_id, from = ?self.stage, to = ?to, "stage transition");
        self.stage = to;
    }

    /// Decides what follows a change: showdown, next actor, or next stage.
    fn settle(&mut self, from: usize) -> Result<(), GameError> {
        if self.contenders() < 2 {
            self.resolve_showdown();
            return Ok(());
        }
        if self.betting_complete() {
            self.advance_stage()?;
        } else {
            self.current = self.next_actor(from);
        }
        Ok(())
    }

    /// First seat from `from` onwards (wrapping) that can take a turn.
    fn next_actor(&self, from: usize) -> Option<usize> {
        let n = self.players.len();
        (0..n)
            .map(|k| seat_after(from, k, n))
            .find(|&i| self.players[i].can_act())
    }

    /// Every seat that can still bet has acted since the last raise and
    /// matched the current bet, or at most one such seat is left and it
    /// has matched.
    fn betting_complete(&self) -> bool {
        let live: Vec<usize> = (0..self.players.len())
            .filter(|&i| self.players[i].can_act())
            .collect();
        let matched = |i: usize| self.players[i].bet_this_round() >= self.current_bet;
        let pending = live.iter().any(|&i| !self.acted[i] || !matched(i));
        if !pending {
            return true;
        }
        live.len() <= 1 && live.iter().all(|&i| matched(i))
    }

    fn resolve_showdown(&mut self) {
        let ended_at = self.stage;
        self.current = None;
        self.transition(Stage::Showdown);

        let hands: Vec<(usize, HandStrength)> = self
            .players
            .iter()
            .filter(|p| p.in_hand())
            .filter_map(|p| {
                let hole = p.hand()?;
                let mut cards = hole.to_vec();
                cards.extend_from_slice(&self.board);
                Some((p.seat(), evaluate_hand(&cards)))
            })
            .collect();

        let pot = self.pot;
        let mut winners: Vec<usize> = Vec::new();
        if let Some((first_seat, first_hand)) = hands.first() {
            let mut best = first_hand;
            winners.push(*first_seat);
            for (seat, hand) in &hands[1..] {
                match hand.cmp(best) {
                    Ordering::Greater => {
                        best = hand;
                        winners = vec![*seat];
                    }
                    Ordering::Equal => winners.push(*seat),
                    Ordering::Less => {}
                }
            }
            if !self.config.split_ties {
                winners.truncate(1);
            }

            let share = pot / winners.len() as u32;
            let remainder = pot % winners.len() as u32;
            for (k, &seat) in winners.iter().enumerate() {
                let amount = if k == 0 { share + remainder } else { share };
                self.players[seat].award(amount);
            }
            self.pot = 0;
            tracing::info!(
                round_id = self.round_id,
                winners = ?winners,
                pot,
                ended_at = ?ended_at,
                "showdown resolved"
            );
        } else {
            tracing::warn!(round_id = self.round_id, pot, "showdown without contenders");
        }

        let info = ShowdownInfo {
            winners,
            pot,
            uncontested: hands.len() == 1,
            hands,
            ended_at,
        };
        if let Some(record) = self.record.as_mut() {
            record.showdown = Some(info.clone());
        }
        self.showdown = Some(info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn engine() -> Engine {
        Engine::new(TableConfig::default(), Bankroll::new(500)).unwrap()
    }

    #[test]
    fn fresh_stage_with_two_live_seats_is_open() {
        let mut eng = engine();
        eng.start_round(&mut ChaCha20Rng::seed_from_u64(3)).unwrap();
        assert!(!eng.betting_complete());
    }

    #[test]
    fn next_actor_skips_folded_seats() {
        let mut eng = engine();
        eng.start_round(&mut ChaCha20Rng::seed_from_u64(3)).unwrap();
        eng.players[1].fold();
        assert_eq!(eng.next_actor(1), Some(2));
    }
}
