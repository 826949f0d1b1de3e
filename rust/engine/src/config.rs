use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Seats beyond this would not fit 2 hole cards each plus a full board.
pub const MAX_PLAYERS: usize = 10;

/// Poker table constants, fixed for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    /// Seats including the human at seat 0
    pub players: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub min_raise: u32,
    /// Chips every bot sits down with at the start of each round
    pub bot_stake: u32,
    /// Pay exact ties equally instead of to the first tied seat
    pub split_ties: bool,
    /// Reject checks while a call is owed and raises below the minimum
    pub strict_actions: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            players: 4,
            small_blind: 10,
            big_blind: 20,
            min_raise: 20,
            bot_stake: 200,
            split_ties: false,
            strict_actions: false,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_PLAYERS).contains(&self.players) {
            return Err(ConfigError::PlayerCount(self.players));
        }
        if self.big_blind < self.small_blind {
            return Err(ConfigError::Blinds {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if self.small_blind.checked_add(self.big_blind).is_none() {
            return Err(ConfigError::BlindTotal {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if self.min_raise == 0 {
            return Err(ConfigError::MinRaise);
        }
        Ok(())
    }
}

/// Memory game constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MemoryConfig {
    pub bet_tiers: Vec<u32>,
    pub attempts: u32,
    /// Distinct symbols; the deck holds each twice
    pub pairs: usize,
    /// Probability that any single card is a bonus card
    pub bonus_chance: f64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            bet_tiers: vec![10, 20, 50, 100],
            attempts: 3,
            pairs: 32,
            bonus_chance: 0.08,
        }
    }
}

impl MemoryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bet_tiers.is_empty() || self.bet_tiers.contains(&0) {
            return Err(ConfigError::BetTiers);
        }
        if self.pairs == 0 {
            return Err(ConfigError::Pairs);
        }
        if self.attempts == 0 {
            return Err(ConfigError::Attempts);
        }
        if !(0.0..=1.0).contains(&self.bonus_chance) {
            return Err(ConfigError::BonusChance(self.bonus_chance));
        }
        Ok(())
    }
}
