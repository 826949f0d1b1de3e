//! # royale-session: event-driven front of the card games
//!
//! Wires the poker [`Engine`](royale_engine::engine::Engine), the memory game
//! and a bot policy into one [`session::Session`] that reacts to discrete
//! inputs: menu choices, the human's actions and fired timers. Presentation
//! and timing stay behind the [`events::Presenter`] and [`events::Scheduler`]
//! traits.
//!
//! ## Headless play
//!
//! ```rust
//! use royale_engine::player::PlayerAction;
//! use royale_session::config::SessionConfig;
//! use royale_session::events::{QueueScheduler, RecordingPresenter};
//! use royale_session::session::Session;
//!
//! let config = SessionConfig { seed: Some(1), ..SessionConfig::default() };
//! royale_session::logging::init_tracing(&config.log_filter);
//! let mut session = Session::new(config, QueueScheduler::new(), RecordingPresenter::new()).unwrap();
//! session.enter_poker().unwrap();
//!
//! // Let the bots play until the human is up or the round is over.
//! session.run_pending().unwrap();
//! if session.engine().current_player() == Some(0) {
//!     session.human_action(PlayerAction::Fold).unwrap();
//!     session.run_pending().unwrap();
//! }
//! assert!(session.engine().is_round_over());
//! ```

pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod session;
