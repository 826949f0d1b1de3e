use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// RNG used for every shuffle and draw of a session. A fixed seed replays
/// the same session; `None` seeds from the operating system.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_os_rng(),
    }
}

/// Returns a uniformly shuffled copy of `cards`; the input is left untouched.
///
/// Fisher-Yates: for every index from the last down to 1, swap it with a
/// uniformly chosen index in `[0, i]`.
pub fn shuffle<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Vec<Card> {
    let mut out = cards.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Cards owned by one round. Cards are dealt from the end of the sequence.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Ordered 52-card deck.
    pub fn build() -> Self {
        Self { cards: full_deck() }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            cards: shuffle(&full_deck(), rng),
        }
    }

    /// Deck that deals `deal_order` front to back, for replays and rigged
    /// tables.
    pub fn stacked(deal_order: Vec<Card>) -> Self {
        let mut cards = deal_order;
        cards.reverse();
        Self { cards }
    }

    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deals up to `n` cards; fewer are returned if the deck runs out.
    pub fn deal_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).map_while(|_| self.deal()).collect()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::build()
    }
}
