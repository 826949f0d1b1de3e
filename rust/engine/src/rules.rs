use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::PlayerAction as A;

/// An action resolved against the acting seat's stack. Amounts are the chips
/// that move into the pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Raise(u32),
    AllIn(u32),
}

impl ValidatedAction {
    pub fn amount(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(n) | ValidatedAction::Raise(n) | ValidatedAction::AllIn(n) => n,
        }
    }
}

/// Resolves a requested action into the chips it moves.
///
/// Payments never exceed `stack`: a call or raise the seat cannot cover
/// becomes [`ValidatedAction::AllIn`]. A call with nothing owed is a check.
///
/// In lenient mode (`strict == false`) a check is accepted even when a call
/// is owed and a raise of any positive size is accepted. Strict mode rejects
/// both.
///
/// # Errors
///
/// - [`GameError::InvalidBetAmount`] for `Raise(0)`, or in strict mode a
///   raise below `min_raise` that is not all-in
/// - [`GameError::CheckWhileOwed`] in strict mode when checking while owing
///
/// # Examples
///
/// ```
/// use royale_engine::rules::{resolve_action, ValidatedAction};
/// use royale_engine::player::PlayerAction;
///
/// assert_eq!(resolve_action(1000, 50, 20, false, PlayerAction::Call), Ok(ValidatedAction::Call(50)));
/// assert_eq!(resolve_action(60, 50, 20, false, PlayerAction::Raise(20)), Ok(ValidatedAction::AllIn(60)));
/// assert_eq!(resolve_action(1000, 50, 20, false, PlayerAction::Check), Ok(ValidatedAction::Check));
/// ```
pub fn resolve_action(
    stack: u32,
    to_call: u32,
    min_raise: u32,
    strict: bool,
    action: A,
) -> Result<ValidatedAction, GameError> {
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if strict && to_call > 0 {
                Err(GameError::CheckWhileOwed { owed: to_call })
            } else {
                Ok(ValidatedAction::Check)
            }
        }
        A::Call => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else if stack <= to_call {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        A::Raise(amount) => {
            if amount == 0 {
                return Err(GameError::InvalidBetAmount { amount, minimum: 1 });
            }
            let total = to_call.saturating_add(amount);
            if total >= stack {
                Ok(ValidatedAction::AllIn(stack))
            } else if strict && amount < min_raise {
                Err(GameError::InvalidBetAmount {
                    amount,
                    minimum: min_raise,
                })
            } else {
                Ok(ValidatedAction::Raise(total))
            }
        }
    }
}
