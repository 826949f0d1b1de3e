use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Stage;
use crate::hand::HandStrength;
use crate::rules::ValidatedAction;

/// What a seat did, including the forced blinds.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordedAction {
    SmallBlind(u32),
    BigBlind(u32),
    Fold,
    Check,
    Call(u32),
    Raise(u32),
    AllIn(u32),
}

impl From<ValidatedAction> for RecordedAction {
    fn from(a: ValidatedAction) -> Self {
        match a {
            ValidatedAction::Fold => RecordedAction::Fold,
            ValidatedAction::Check => RecordedAction::Check,
            ValidatedAction::Call(n) => RecordedAction::Call(n),
            ValidatedAction::Raise(n) => RecordedAction::Raise(n),
            ValidatedAction::AllIn(n) => RecordedAction::AllIn(n),
        }
    }
}

/// A single entry of the round history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: usize,
    pub stage: Stage,
    pub action: RecordedAction,
    /// Pot after the action
    pub pot: u32,
}

/// Outcome of a showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Seats paid from the pot, in seat order; empty when nobody contested
    pub winners: Vec<usize>,
    /// Pot at the moment of the showdown
    pub pot: u32,
    /// Evaluation of every contender, in seat order
    pub hands: Vec<(usize, HandStrength)>,
    /// Stage the round was in when it ended
    pub ended_at: Stage,
    /// Only one player was left in the hand
    pub uncontested: bool,
}

/// Complete history of one round, serialisable for the presentation layer.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_id: u64,
    pub dealer: usize,
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
    /// Round start (RFC3339)
    pub ts: String,
}

impl RoundRecord {
    pub fn new(round_id: u64, dealer: usize) -> Self {
        Self {
            round_id,
            dealer,
            actions: Vec::new(),
            board: Vec::new(),
            showdown: None,
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
