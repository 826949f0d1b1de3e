use serde::{Deserialize, Serialize};

use crate::bankroll::Bankroll;
use crate::cards::Card;

/// The human always sits at seat 0.
pub const HUMAN_SEAT: usize = 0;

/// A decision taken on a player's turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Give up the round
    Fold,
    /// Pass without putting chips in
    Check,
    /// Match the current bet (or go all-in trying)
    Call,
    /// Match the current bet and add this much on top
    Raise(u32),
}

/// Where a seat's chips live. The human's chips are the shared bankroll,
/// bots hold a private stack.
#[derive(Debug, Clone)]
pub enum Chips {
    Own(u32),
    Shared(Bankroll),
}

impl Chips {
    fn balance(&self) -> u32 {
        match self {
            Chips::Own(n) => *n,
            Chips::Shared(b) => b.balance(),
        }
    }

    fn take(&mut self, amount: u32) -> u32 {
        match self {
            Chips::Own(n) => {
                let taken = amount.min(*n);
                *n -= taken;
                taken
            }
            Chips::Shared(b) => b.debit(amount),
        }
    }

    fn give(&mut self, amount: u32) {
        match self {
            Chips::Own(n) => *n = n.saturating_add(amount),
            Chips::Shared(b) => {
                b.credit(amount);
            }
        }
    }
}

/// One seat at the poker table.
#[derive(Debug, Clone)]
pub struct Player {
    seat: usize,
    name: String,
    chips: Chips,
    hole: [Option<Card>; 2],
    /// Chips put in during the current betting stage
    bet_this_round: u32,
    folded: bool,
    /// Cleared for seats sitting out; such seats are skipped in rotation
    active: bool,
}

impl Player {
    pub fn human(bankroll: Bankroll) -> Self {
        Self::with_chips(HUMAN_SEAT, "You".to_string(), Chips::Shared(bankroll))
    }

    pub fn bot(seat: usize, stake: u32) -> Self {
        Self::with_chips(seat, format!("Bot {seat}"), Chips::Own(stake))
    }

    fn with_chips(seat: usize, name: String, chips: Chips) -> Self {
        Self {
            seat,
            name,
            chips,
            hole: [None, None],
            bet_this_round: 0,
            folded: false,
            active: true,
        }
    }

    pub fn seat(&self) -> usize {
        self.seat
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn is_human(&self) -> bool {
        matches!(self.chips, Chips::Shared(_))
    }
    pub fn stack(&self) -> u32 {
        self.chips.balance()
    }
    pub fn bet_this_round(&self) -> u32 {
        self.bet_this_round
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_active(&self) -> bool {
        self.active
    }
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn hole_cards(&self) -> [Option<Card>; 2] {
        self.hole
    }

    /// Both hole cards, once dealt.
    pub fn hand(&self) -> Option<[Card; 2]> {
        match self.hole {
            [Some(a), Some(b)] => Some([a, b]),
            _ => None,
        }
    }

    /// Still contesting the pot.
    pub fn in_hand(&self) -> bool {
        !self.folded && self.active
    }

    /// Can be handed the turn: in the hand and holding chips.
    pub fn can_act(&self) -> bool {
        self.in_hand() && self.stack() > 0
    }

    /// Moves up to `amount` chips out of the stack into this stage's
    /// contribution. Returns the amount actually paid.
    pub fn pay(&mut self, amount: u32) -> u32 {
        let paid = self.chips.take(amount);
        self.bet_this_round += paid;
        paid
    }

    pub fn award(&mut self, amount: u32) {
        self.chips.give(amount);
    }

    pub fn fold(&mut self) {
        self.folded = true;
    }

    pub(crate) fn start_round(&mut self, hole: [Card; 2], bot_stake: u32) {
        if let Chips::Own(n) = &mut self.chips {
            *n = bot_stake;
        }
        self.hole = [Some(hole[0]), Some(hole[1])];
        self.bet_this_round = 0;
        self.folded = false;
    }

    pub(crate) fn start_stage(&mut self) {
        self.bet_this_round = 0;
    }
}
