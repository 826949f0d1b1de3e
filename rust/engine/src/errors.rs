use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Cannot check while {owed} is owed")]
    CheckWhileOwed { owed: u32 },
    #[error("No round in progress")]
    NoRoundInProgress,
    #[error("A round is already being played")]
    RoundInProgress,
    #[error("At least two seats with chips are needed, found {0}")]
    NotEnoughPlayers(usize),
    #[error("Player {0} already folded")]
    PlayerAlreadyFolded(usize),
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("No seat {0} at this table")]
    UnknownSeat(usize),
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Paying {amount} into a pot of {pot} would overflow it")]
    PotOverflow { pot: u32, amount: u32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Bet {amount} is not one of the offered tiers")]
    InvalidBet { amount: u32 },
    #[error("No card with id {0}")]
    UnknownCard(usize),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Player count {0} must be between 2 and 10")]
    PlayerCount(usize),
    #[error("Big blind {big} is below small blind {small}")]
    Blinds { small: u32, big: u32 },
    #[error("Blinds {small} + {big} do not fit in a pot")]
    BlindTotal { small: u32, big: u32 },
    #[error("Minimum raise must be positive")]
    MinRaise,
    #[error("Memory bet tiers must be non-empty and positive")]
    BetTiers,
    #[error("Memory game needs at least one pair")]
    Pairs,
    #[error("Memory game needs at least one attempt")]
    Attempts,
    #[error("Bonus chance {0} must lie within [0, 1]")]
    BonusChance(f64),
}
