use std::time::Duration;

use rand::Rng;
use rand_chacha::ChaCha20Rng;

use royale_ai::{create_ai, AIOpponent};
use royale_engine::bankroll::Bankroll;
use royale_engine::deck::seeded_rng;
use royale_engine::engine::{Engine, TurnOutcome};
use royale_engine::game::Stage;
use royale_engine::memory::{FlipOutcome, MemoryGame};
use royale_engine::player::{PlayerAction, HUMAN_SEAT};

use crate::config::SessionConfig;
use crate::errors::SessionError;
use crate::events::{
    Cue, MemoryCardView, MemoryView, Mode, Presenter, QueueScheduler, Scheduler, SeatView,
    Snapshot, TableView, TimerEvent,
};

/// One player's session: the menu, the memory game and the poker table,
/// all settling against one bankroll.
///
/// Every input is a method call that runs to completion. Bot turns and
/// concealing a missed memory pair are deferred through the [`Scheduler`]
/// and come back via [`Session::on_timer`].
pub struct Session<S: Scheduler, P: Presenter> {
    config: SessionConfig,
    bankroll: Bankroll,
    rng: ChaCha20Rng,
    engine: Engine,
    memory: Option<MemoryGame>,
    memory_id: u64,
    opponent: Box<dyn AIOpponent>,
    mode: Mode,
    scheduler: S,
    presenter: P,
}

impl<S: Scheduler, P: Presenter> Session<S, P> {
    pub fn new(config: SessionConfig, scheduler: S, presenter: P) -> Result<Self, SessionError> {
        config.validate()?;
        let bankroll = Bankroll::new(config.human_bankroll);
        let engine = Engine::new(config.table.clone(), bankroll.clone())?;
        let opponent = create_ai(&config.opponent)?;
        tracing::info!(
            seed = ?config.seed,
            players = config.table.players,
            bankroll = config.human_bankroll,
            opponent = opponent.name(),
            "session created"
        );
        let mut session = Self {
            rng: seeded_rng(config.seed),
            config,
            bankroll,
            engine,
            memory: None,
            memory_id: 0,
            opponent,
            mode: Mode::Menu,
            scheduler,
            presenter,
        };
        session.render();
        Ok(session)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
    pub fn bankroll(&self) -> &Bankroll {
        &self.bankroll
    }
    pub fn engine(&self) -> &Engine {
        &self.engine
    }
    pub fn memory(&self) -> Option<&MemoryGame> {
        self.memory.as_ref()
    }
    /// Increases with every memory game dealt.
    pub fn memory_id(&self) -> u64 {
        self.memory_id
    }
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn enter_menu(&mut self) {
        self.switch_mode(Mode::Menu);
        self.render();
    }

    /// Deals a fresh memory game and switches to it. Timers of the previous
    /// game become stale.
    pub fn enter_memory(&mut self) -> Result<(), SessionError> {
        let game = MemoryGame::new(self.config.memory.clone(), self.bankroll.clone(), &mut self.rng)?;
        self.memory = Some(game);
        self.memory_id += 1;
        self.switch_mode(Mode::Memory);
        self.presenter.cue(Cue::Shuffle);
        self.render();
        Ok(())
    }

    /// Switches to the table and starts a round unless one is in progress.
    pub fn enter_poker(&mut self) -> Result<(), SessionError> {
        self.switch_mode(Mode::Poker);
        if self.engine.is_round_over() {
            self.next_round()?;
        } else {
            self.render();
            self.schedule_bot();
        }
        Ok(())
    }

    pub fn next_round(&mut self) -> Result<u64, SessionError> {
        self.require(Mode::Poker)?;
        let round_id = self.engine.start_round(&mut self.rng)?;
        self.presenter.cue(Cue::Shuffle);
        self.render();
        self.schedule_bot();
        Ok(round_id)
    }

    /// Applies the human's decision. Only valid while seat 0 holds the turn.
    pub fn human_action(&mut self, action: PlayerAction) -> Result<TurnOutcome, SessionError> {
        self.require(Mode::Poker)?;
        if self.engine.current_player() != Some(HUMAN_SEAT) {
            return Err(SessionError::NotHumanTurn);
        }
        self.apply(HUMAN_SEAT, action)
    }

    pub fn memory_bet(&mut self, amount: u32) -> Result<(), SessionError> {
        self.require(Mode::Memory)?;
        let game = self.memory.as_mut().ok_or(SessionError::NoMemoryGame)?;
        game.set_bet(amount)?;
        self.render();
        Ok(())
    }

    pub fn memory_flip(&mut self, id: usize) -> Result<FlipOutcome, SessionError> {
        self.require(Mode::Memory)?;
        let game = self.memory.as_mut().ok_or(SessionError::NoMemoryGame)?;
        let outcome = game.flip(id)?;
        match &outcome {
            FlipOutcome::Matched { jackpot: true, .. } => self.presenter.cue(Cue::Jackpot),
            FlipOutcome::Matched { .. } => self.presenter.cue(Cue::Coin),
            FlipOutcome::Mismatched { .. } => {
                let delay = Duration::from_millis(self.config.pacing.conceal_delay_ms);
                self.scheduler.schedule(
                    delay,
                    TimerEvent::Conceal {
                        game_id: self.memory_id,
                    },
                );
            }
            FlipOutcome::Revealed { .. } | FlipOutcome::Ignored => {}
        }
        if outcome != FlipOutcome::Ignored {
            self.render();
        }
        Ok(outcome)
    }

    /// Handles a timer scheduled earlier. Timers whose round, game, mode or
    /// actor no longer match are dropped.
    pub fn on_timer(&mut self, event: TimerEvent) -> Result<(), SessionError> {
        match event {
            TimerEvent::BotTurn { round_id, seat } => {
                let live = self.mode == Mode::Poker
                    && round_id == self.engine.round_id()
                    && self.engine.current_player() == Some(seat);
                if !live {
                    tracing::warn!(
                        round_id,
                        seat,
                        current_round = self.engine.round_id(),
                        "dropping stale bot timer"
                    );
                    return Ok(());
                }
                let action = self.opponent.get_action(&self.engine, seat, &mut self.rng);
                self.apply(seat, action)?;
            }
            TimerEvent::Conceal { game_id } => {
                if game_id != self.memory_id {
                    tracing::warn!(game_id, current_game = self.memory_id, "dropping stale conceal timer");
                    return Ok(());
                }
                if self.memory.as_mut().is_some_and(MemoryGame::conceal) {
                    self.render();
                }
            }
        }
        Ok(())
    }

    /// Serialisable view of the whole session.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode,
            bankroll: self.bankroll.balance(),
            table: (self.engine.round_id() > 0).then(|| self.table_view()),
            memory: self.memory.as_ref().map(|g| self.memory_view(g)),
        }
    }

    fn apply(&mut self, seat: usize, action: PlayerAction) -> Result<TurnOutcome, SessionError> {
        let board_before = self.engine.board().len();
        let outcome = self.engine.act(seat, action)?;

        if self.engine.board().len() > board_before {
            self.presenter.cue(Cue::Deal);
        }
        if let Some(info) = &outcome.showdown {
            if info.winners.contains(&HUMAN_SEAT) {
                self.presenter.cue(Cue::Coin);
            }
        }
        self.render();
        self.schedule_bot();
        Ok(outcome)
    }

    fn schedule_bot(&mut self) {
        let Some(seat) = self.engine.current_player() else {
            return;
        };
        if seat == HUMAN_SEAT {
            return;
        }
        let pacing = &self.config.pacing;
        let delay = self
            .rng
            .random_range(pacing.bot_delay_min_ms..=pacing.bot_delay_max_ms);
        self.scheduler.schedule(
            Duration::from_millis(delay),
            TimerEvent::BotTurn {
                round_id: self.engine.round_id(),
                seat,
            },
        );
    }

    fn switch_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::info!(from = ?self.mode, to = ?mode, "mode changed");
            self.mode = mode;
        }
    }

    fn require(&self, expected: Mode) -> Result<(), SessionError> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(SessionError::WrongMode {
                expected,
                actual: self.mode,
            })
        }
    }

    fn render(&mut self) {
        let snapshot = self.snapshot();
        self.presenter.render(&snapshot);
    }

    fn table_view(&self) -> TableView {
        let eng = &self.engine;
        let revealed = eng.stage() == Stage::Showdown;
        TableView {
            round_id: eng.round_id(),
            stage: eng.stage(),
            dealer: eng.dealer(),
            pot: eng.pot(),
            current_bet: eng.current_bet(),
            current_player: eng.current_player(),
            board: eng.board().to_vec(),
            seats: eng
                .players()
                .iter()
                .map(|p| SeatView {
                    seat: p.seat(),
                    name: p.name().to_string(),
                    stack: p.stack(),
                    bet_this_round: p.bet_this_round(),
                    folded: p.is_folded(),
                    active: p.is_active(),
                    hole: if p.is_human() || (revealed && p.in_hand()) {
                        p.hand()
                    } else {
                        None
                    },
                })
                .collect(),
            showdown: eng.showdown().cloned(),
        }
    }

    fn memory_view(&self, game: &MemoryGame) -> MemoryView {
        MemoryView {
            game_id: self.memory_id,
            bet: game.bet(),
            attempts: game.attempts(),
            streak: game.streak(),
            status: game.status(),
            multiplier: game.multiplier(false),
            near_miss: game.near_miss(),
            cards: game
                .cards()
                .iter()
                .map(|c| {
                    let matched = game.is_matched(c.id);
                    let face_up = game.face_up().contains(&c.id);
                    MemoryCardView {
                        id: c.id,
                        face_up,
                        matched,
                        symbol: (face_up || matched).then_some(c.symbol),
                        bonus: c.bonus,
                    }
                })
                .collect(),
        }
    }
}

impl<P: Presenter> Session<QueueScheduler, P> {
    /// Fires every pending timer in due order, jumping the virtual clock.
    /// Returns how many timers fired.
    pub fn run_pending(&mut self) -> Result<usize, SessionError> {
        let mut fired = 0;
        while let Some(event) = self.scheduler.next_due() {
            self.on_timer(event)?;
            fired += 1;
        }
        Ok(fired)
    }
}
