//! The currency balance shared by the human poker seat and the memory game.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Cloneable handle to one shared balance.
///
/// Every clone observes and mutates the same value. All changes go through
/// [`Bankroll::update`], an atomic read-modify-write, so two updates issued
/// in the same tick can never overwrite each other with a stale value.
#[derive(Debug, Clone, Default)]
pub struct Bankroll {
    balance: Arc<AtomicU32>,
}

impl Bankroll {
    pub fn new(initial: u32) -> Self {
        Self {
            balance: Arc::new(AtomicU32::new(initial)),
        }
    }

    pub fn balance(&self) -> u32 {
        self.balance.load(Ordering::Acquire)
    }

    /// Adds `amount`, saturating at `u32::MAX`. Returns the new balance.
    pub fn credit(&self, amount: u32) -> u32 {
        let (_, new) = self.update(|b| b.saturating_add(amount));
        tracing::trace!(amount, balance = new, "bankroll credited");
        new
    }

    /// Takes up to `amount` and returns what was actually taken.
    /// The balance never goes below zero.
    pub fn debit(&self, amount: u32) -> u32 {
        let (old, new) = self.update(|b| b.saturating_sub(amount));
        let taken = old - new;
        tracing::trace!(requested = amount, taken, balance = new, "bankroll debited");
        taken
    }

    /// Whether two handles refer to the same balance.
    pub fn same_as(&self, other: &Bankroll) -> bool {
        Arc::ptr_eq(&self.balance, &other.balance)
    }

    fn update(&self, f: impl Fn(u32) -> u32) -> (u32, u32) {
        let old = self
            .balance
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |b| Some(f(b)))
            .unwrap_or_else(|b| b);
        (old, f(old))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_balance() {
        let a = Bankroll::new(500);
        let b = a.clone();
        b.credit(30);
        a.debit(10);
        assert_eq!(a.balance(), 520);
        assert_eq!(b.balance(), 520);
        assert!(a.same_as(&b));
        assert!(!a.same_as(&Bankroll::new(520)));
    }

    #[test]
    fn debit_is_clamped_at_zero() {
        let b = Bankroll::new(15);
        assert_eq!(b.debit(40), 15);
        assert_eq!(b.balance(), 0);
        assert_eq!(b.debit(5), 0);
    }

    #[test]
    fn credit_saturates() {
        let b = Bankroll::new(u32::MAX - 1);
        assert_eq!(b.credit(10), u32::MAX);
    }
}
