//! # royale-ai: opponent policies for the poker table
//!
//! Decides what a bot seat does on its turn. Policies read the table through
//! a shared [`Engine`] reference and draw randomness from the caller's RNG,
//! so a seeded session replays bot decisions exactly.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait every policy implements
//! - [`baseline`] - Strength-weighted probabilistic policy
//! - [`create_ai`] - Factory selecting a policy by name
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//! use royale_ai::create_ai;
//! use royale_engine::bankroll::Bankroll;
//! use royale_engine::config::TableConfig;
//! use royale_engine::engine::Engine;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let ai = create_ai("baseline").unwrap();
//!
//! let mut engine = Engine::new(TableConfig::default(), Bankroll::new(500)).unwrap();
//! engine.start_round(&mut rng).unwrap();
//!
//! let seat = engine.current_player().unwrap();
//! let action = ai.get_action(&engine, seat, &mut rng);
//! engine.act(seat, action).unwrap();
//! ```

use rand::RngCore;
use royale_engine::engine::Engine;
use royale_engine::player::PlayerAction;
use thiserror::Error;

pub mod baseline;

/// Interface shared by every opponent policy.
///
/// # Example Implementation
///
/// ```rust
/// use rand::RngCore;
/// use royale_ai::AIOpponent;
/// use royale_engine::engine::Engine;
/// use royale_engine::player::PlayerAction;
///
/// struct Calling;
///
/// impl AIOpponent for Calling {
///     fn get_action(&self, _engine: &Engine, _seat: usize, _rng: &mut dyn RngCore) -> PlayerAction {
///         PlayerAction::Call
///     }
///
///     fn name(&self) -> &str {
///         "Calling"
///     }
/// }
/// ```
pub trait AIOpponent: Send + Sync {
    /// Chooses the action for `seat`, which holds the turn in `engine`.
    ///
    /// Must not panic on any table state; a seat without cards should
    /// check or fold.
    fn get_action(&self, engine: &Engine, seat: usize, rng: &mut dyn RngCore) -> PlayerAction;

    fn name(&self) -> &str;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AiError {
    #[error("Unknown opponent type: {0}")]
    UnknownKind(String),
}

/// Builds the policy registered under `kind`.
///
/// Supported: `"baseline"`.
///
/// ```rust
/// use royale_ai::{create_ai, AiError};
///
/// assert_eq!(create_ai("baseline").unwrap().name(), "BaselineAI");
/// assert_eq!(create_ai("shark").err(), Some(AiError::UnknownKind("shark".into())));
/// ```
pub fn create_ai(kind: &str) -> Result<Box<dyn AIOpponent>, AiError> {
    match kind {
        "baseline" => Ok(Box::new(baseline::BaselineAI::new())),
        other => Err(AiError::UnknownKind(other.to_string())),
    }
}
