use serde::{Deserialize, Serialize};

/// Lifecycle of one poker round. Within a round the stage only moves
/// forward; `Showdown` is terminal until the next round begins.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// No round has been played yet
    Waiting,
    /// Hole cards dealt, blinds posted
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
    /// Pot awarded
    Showdown,
}

impl Stage {
    /// The regular successor of a betting stage.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Preflop => Some(Stage::Flop),
            Stage::Flop => Some(Stage::Turn),
            Stage::Turn => Some(Stage::River),
            Stage::River => Some(Stage::Showdown),
            Stage::Waiting | Stage::Showdown => None,
        }
    }

    /// Community cards dealt when entering this stage.
    pub fn cards_on_entry(self) -> usize {
        match self {
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            _ => 0,
        }
    }

    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Stage::Preflop | Stage::Flop | Stage::Turn | Stage::River
        )
    }

    /// Whether `self -> to` is a legal transition: the regular successor, an
    /// early jump to showdown from any betting stage, or a fresh round.
    pub fn allows(self, to: Stage) -> bool {
        match to {
            Stage::Preflop => matches!(self, Stage::Waiting | Stage::Showdown),
            Stage::Showdown => self.is_betting(),
            _ => self.next() == Some(to),
        }
    }
}

/// Seat `offset` places after `seat`, wrapping around the table.
pub fn seat_after(seat: usize, offset: usize, seats: usize) -> usize {
    (seat + offset) % seats
}
