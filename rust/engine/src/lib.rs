//! # royale-engine: card game core
//!
//! Rules and state for the two games of a Royale session: a multi-seat
//! Texas Hold'em round manager and the Memory Royale pair-matching game.
//! Both settle against one shared [`bankroll::Bankroll`]. All randomness is
//! supplied by the caller, so seeded RNGs replay a session exactly.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Fisher-Yates shuffling and dealing
//! - [`hand`] - Hand evaluation over up to seven cards and comparison
//! - [`engine`] - Round manager: blinds, stages, turn order, pot, showdown
//! - [`game`] - Stage lifecycle and seat arithmetic
//! - [`player`] - Seats, actions and chip handling
//! - [`rules`] - Resolving requested actions against a stack
//! - [`bankroll`] - The shared currency balance
//! - [`memory`] - Memory Royale
//! - [`record`] - Serialisable round history
//! - [`config`] - Table and memory constants
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use royale_engine::cards::{Card, Rank, Suit};
//! use royale_engine::hand::{evaluate_hand, Category};
//!
//! let cards = [
//!     Card::new(Rank::Ten, Suit::Spades),
//!     Card::new(Rank::Jack, Suit::Spades),
//!     Card::new(Rank::Queen, Suit::Spades),
//!     Card::new(Rank::King, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//!     Card::new(Rank::Three, Suit::Diamonds),
//! ];
//!
//! let strength = evaluate_hand(&cards);
//! assert_eq!(strength.category, Category::StraightFlush);
//! ```
//!
//! ## Playing a round
//!
//! ```rust
//! use royale_engine::bankroll::Bankroll;
//! use royale_engine::config::TableConfig;
//! use royale_engine::deck::seeded_rng;
//! use royale_engine::engine::Engine;
//! use royale_engine::player::PlayerAction;
//!
//! let mut rng = seeded_rng(Some(42));
//! let mut engine = Engine::new(TableConfig::default(), Bankroll::new(500)).unwrap();
//! engine.start_round(&mut rng).unwrap();
//!
//! while let Some(seat) = engine.current_player() {
//!     engine.act(seat, PlayerAction::Fold).unwrap();
//! }
//! assert!(engine.is_round_over());
//! ```

pub mod bankroll;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod memory;
pub mod player;
pub mod record;
pub mod rules;
