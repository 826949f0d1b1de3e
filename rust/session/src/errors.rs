use thiserror::Error;

use royale_ai::AiError;
use royale_engine::errors::{GameError, MemoryError};

use crate::config::ConfigError;
use crate::events::Mode;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error("Not available in {actual:?} mode (needs {expected:?})")]
    WrongMode { expected: Mode, actual: Mode },
    #[error("It is not the human player's turn")]
    NotHumanTurn,
    #[error("No memory game has been dealt")]
    NoMemoryGame,
}

impl From<royale_engine::errors::ConfigError> for SessionError {
    fn from(e: royale_engine::errors::ConfigError) -> Self {
        SessionError::Config(ConfigError::Rules(e))
    }
}
