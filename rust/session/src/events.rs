//! What flows between a [`Session`](crate::session::Session) and its
//! surroundings: timers going out and coming back, cues and snapshots for
//! the presentation layer.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use royale_engine::cards::Card;
use royale_engine::game::Stage;
use royale_engine::memory::MemoryStatus;
use royale_engine::record::ShowdownInfo;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Menu,
    Memory,
    Poker,
}

/// A delayed callback. The ids let the session recognise timers that
/// outlived the round or game they were scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    BotTurn { round_id: u64, seat: usize },
    Conceal { game_id: u64 },
}

/// Audio/visual cue for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Shuffle,
    Deal,
    Coin,
    Jackpot,
}

/// Delivers [`TimerEvent`]s back to `Session::on_timer` after a delay.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, event: TimerEvent);
}

pub trait Presenter {
    fn render(&mut self, snapshot: &Snapshot);
    fn cue(&mut self, cue: Cue);
}

/// Time-ordered timer queue on a virtual clock. Drives a session without a
/// real event loop.
#[derive(Debug, Default)]
pub struct QueueScheduler {
    now: Duration,
    seq: u64,
    pending: BTreeMap<(Duration, u64), TimerEvent>,
}

impl QueueScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Moves the clock forward.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Earliest timer that is due at the current time.
    pub fn pop_due(&mut self) -> Option<TimerEvent> {
        let (&key, _) = self.pending.first_key_value()?;
        if key.0 > self.now {
            return None;
        }
        self.pending.remove(&key)
    }

    /// Jumps the clock to the earliest pending timer and returns it.
    pub fn next_due(&mut self) -> Option<TimerEvent> {
        let ((due, _), event) = self.pending.pop_first()?;
        self.now = self.now.max(due);
        Some(event)
    }
}

impl Scheduler for QueueScheduler {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) {
        self.seq += 1;
        self.pending.insert((self.now + delay, self.seq), event);
    }
}

/// Presenter that only remembers what it was shown.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub snapshots: Vec<Snapshot>,
    pub cues: Vec<Cue>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, snapshot: &Snapshot) {
        self.snapshots.push(snapshot.clone());
    }

    fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

/// Everything a view needs to draw the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub bankroll: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryView>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub round_id: u64,
    pub stage: Stage,
    pub dealer: usize,
    pub pot: u32,
    pub current_bet: u32,
    pub current_player: Option<usize>,
    pub board: Vec<Card>,
    pub seats: Vec<SeatView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showdown: Option<ShowdownInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub seat: usize,
    pub name: String,
    pub stack: u32,
    pub bet_this_round: u32,
    pub folded: bool,
    pub active: bool,
    /// Bots' cards stay hidden until the showdown
    pub hole: Option<[Card; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryView {
    pub game_id: u64,
    pub bet: u32,
    pub attempts: u32,
    pub streak: u32,
    pub status: MemoryStatus,
    /// Multiplier the next match would pay without a bonus card
    pub multiplier: f64,
    pub near_miss: Option<usize>,
    pub cards: Vec<MemoryCardView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCardView {
    pub id: usize,
    pub face_up: bool,
    pub matched: bool,
    /// Only visible while face up or matched
    pub symbol: Option<usize>,
    pub bonus: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_orders_by_due_time_then_insertion() {
        let mut q = QueueScheduler::new();
        q.schedule(Duration::from_millis(800), TimerEvent::Conceal { game_id: 1 });
        q.schedule(Duration::from_millis(400), TimerEvent::BotTurn { round_id: 1, seat: 1 });
        q.schedule(Duration::from_millis(400), TimerEvent::BotTurn { round_id: 1, seat: 2 });

        assert_eq!(q.pop_due(), None);
        q.advance(Duration::from_millis(500));
        assert_eq!(q.pop_due(), Some(TimerEvent::BotTurn { round_id: 1, seat: 1 }));
        assert_eq!(q.pop_due(), Some(TimerEvent::BotTurn { round_id: 1, seat: 2 }));
        assert_eq!(q.pop_due(), None);

        assert_eq!(q.next_due(), Some(TimerEvent::Conceal { game_id: 1 }));
        assert_eq!(q.now(), Duration::from_millis(800));
        assert!(q.is_empty());
    }

    #[test]
    fn timer_events_serialise_tagged() {
        let json = serde_json::to_string(&TimerEvent::BotTurn { round_id: 2, seat: 3 }).unwrap();
        assert_eq!(json, r#"{"type":"bot_turn","round_id":2,"seat":3}"#);
    }
}
