//! Memory Royale: flip two cards at a time and bet on them matching.
//!
//! Matches pay `bet × multiplier` into the shared bankroll, misses cost the
//! bet and one attempt. The multiplier grows with the streak of consecutive
//! matches and doubles when a bonus card is part of the pair.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bankroll::Bankroll;
use crate::config::MemoryConfig;
use crate::errors::{ConfigError, MemoryError};

/// Streak length from which matches pay an extra 50%.
pub const HOT_STREAK: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCard {
    pub id: usize,
    /// Index of the symbol printed on the card; each appears exactly twice
    pub symbol: usize,
    pub bonus: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryStatus {
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipOutcome {
    /// Nothing changed (game over, card already up, or a pair awaits concealing)
    Ignored,
    /// First card of a pair turned face up
    Revealed { id: usize },
    Matched {
        ids: [usize; 2],
        reward: u32,
        /// Reward reached four times the bet
        jackpot: bool,
        won: bool,
    },
    Mismatched {
        ids: [usize; 2],
        /// Chips actually taken from the bankroll
        lost: u32,
        attempts_left: u32,
        near_miss: Option<usize>,
        game_over: bool,
    },
}

#[derive(Debug)]
pub struct MemoryGame {
    config: MemoryConfig,
    bankroll: Bankroll,
    cards: Vec<MemoryCard>,
    flipped: Vec<usize>,
    matched: Vec<bool>,
    bet: u32,
    attempts: u32,
    streak: u32,
    status: MemoryStatus,
    near_miss: Option<usize>,
}

impl MemoryGame {
    pub fn new<R: Rng + ?Sized>(
        config: MemoryConfig,
        bankroll: Bankroll,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut symbols: Vec<usize> = (0..config.pairs).chain(0..config.pairs).collect();
        symbols.shuffle(rng);
        let cards: Vec<MemoryCard> = symbols
            .into_iter()
            .enumerate()
            .map(|(id, symbol)| MemoryCard {
                id,
                symbol,
                bonus: rng.random_bool(config.bonus_chance),
            })
            .collect();

        tracing::info!(
            cards = cards.len(),
            bonus_cards = cards.iter().filter(|c| c.bonus).count(),
            "memory game dealt"
        );

        Ok(Self {
            matched: vec![false; cards.len()],
            bet: config.bet_tiers[0],
            attempts: config.attempts,
            config,
            bankroll,
            cards,
            flipped: Vec::with_capacity(2),
            streak: 0,
            status: MemoryStatus::Playing,
            near_miss: None,
        })
    }

    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }
    pub fn bet(&self) -> u32 {
        self.bet
    }
    pub fn bet_tiers(&self) -> &[u32] {
        &self.config.bet_tiers
    }
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
    pub fn streak(&self) -> u32 {
        self.streak
    }
    pub fn status(&self) -> MemoryStatus {
        self.status
    }
    /// An unmatched bonus card pointed out after the last miss.
    pub fn near_miss(&self) -> Option<usize> {
        self.near_miss
    }
    pub fn face_up(&self) -> &[usize] {
        &self.flipped
    }
    pub fn is_matched(&self, id: usize) -> bool {
        self.matched.get(id).copied().unwrap_or(false)
    }
    /// A missed pair is still showing and blocks further flips.
    pub fn awaiting_conceal(&self) -> bool {
        self.flipped.len() == 2
    }

    pub fn set_bet(&mut self, amount: u32) -> Result<(), MemoryError> {
        if !self.config.bet_tiers.contains(&amount) {
            return Err(MemoryError::InvalidBet { amount });
        }
        self.bet = amount;
        Ok(())
    }

    /// Multiplier the next match would pay.
    pub fn multiplier(&self, bonus: bool) -> f64 {
        let mut m = 1.0 + f64::from(self.streak) * 0.5;
        if bonus {
            m *= 2.0;
        }
        if self.streak >= HOT_STREAK {
            m *= 1.5;
        }
        m
    }

    pub fn flip(&mut self, id: usize) -> Result<FlipOutcome, MemoryError> {
        let card = *self.cards.get(id).ok_or(MemoryError::UnknownCard(id))?;
        if self.status != MemoryStatus::Playing
            || self.awaiting_conceal()
            || self.matched[id]
            || self.flipped.contains(&id)
        {
            return Ok(FlipOutcome::Ignored);
        }

        let Some(&first_id) = self.flipped.first() else {
            self.flipped.push(id);
            return Ok(FlipOutcome::Revealed { id });
        };
        let first = self.cards[first_id];
        let ids = [first_id, id];

        if first.symbol == card.symbol {
            let reward = (f64::from(self.bet) * self.multiplier(first.bonus || card.bonus)).round() as u32;
            self.bankroll.credit(reward);
            self.matched[first_id] = true;
            self.matched[id] = true;
            self.streak += 1;
            self.flipped.clear();
            self.near_miss = None;
            let won = self.matched.iter().all(|&m| m);
            if won {
                self.status = MemoryStatus::Won;
            }
            tracing::debug!(reward, streak = self.streak, won, "memory match");
            Ok(FlipOutcome::Matched {
                ids,
                reward,
                jackpot: reward >= self.bet.saturating_mul(4),
                won,
            })
        } else {
            self.flipped.push(id);
            let lost = self.bankroll.debit(self.bet);
            self.attempts = self.attempts.saturating_sub(1);
            let game_over = self.attempts == 0;
            if game_over {
                self.status = MemoryStatus::Lost;
            }
            self.streak = 0;
            self.near_miss = self
                .cards
                .iter()
                .find(|c| c.bonus && !self.matched[c.id])
                .map(|c| c.id);
            tracing::debug!(lost, attempts_left = self.attempts, game_over, "memory miss");
            Ok(FlipOutcome::Mismatched {
                ids,
                lost,
                attempts_left: self.attempts,
                near_miss: self.near_miss,
                game_over,
            })
        }
    }

    /// Turns a missed pair face down again. Returns whether anything changed.
    pub fn conceal(&mut self) -> bool {
        if self.awaiting_conceal() {
            self.flipped.clear();
            true
        } else {
            false
        }
    }
}
