use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "high card",
            Category::OnePair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        };
        f.write_str(name)
    }
}

/// Result of evaluating a set of cards.
///
/// `tiebreak` holds at most five ranks, most significant first. A shorter
/// sequence loses to a longer one with the same prefix.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    pub tiebreak: Vec<Rank>,
}

impl HandStrength {
    fn new(category: Category, values: impl IntoIterator<Item = u8>) -> Self {
        Self {
            category,
            tiebreak: values.into_iter().take(5).map(Rank::from_u8).collect(),
        }
    }

    /// Leading tie-break rank, if any.
    pub fn top_rank(&self) -> Option<Rank> {
        self.tiebreak.first().copied()
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_hands(self, other)
    }
}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Scores any number of distinct cards (typically 7, fewer while the board
/// is still being dealt).
///
/// Categories are tested strongest first and the first match wins. Rank
/// groups are ordered by count then rank, and only the leading group is
/// considered for quads, full house and trips.
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    let mut rank_counts = [0u8; 15];
    let mut by_suit: [Vec<u8>; 4] = [vec![], vec![], vec![], vec![]];
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        by_suit[suit_index(c.suit)].push(r);
    }

    let distinct: Vec<u8> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .collect();

    let flush: Option<Vec<u8>> = by_suit.iter().find(|s| s.len() >= 5).map(|s| {
        let mut v = s.clone();
        v.sort_unstable_by(|a, b| b.cmp(a));
        v
    });

    if let Some(run) = flush.as_deref().and_then(find_straight) {
        return HandStrength::new(Category::StraightFlush, run);
    }

    let groups = rank_groups(&rank_counts);
    let lead = groups.first().copied();

    if let Some((quad, 4)) = lead {
        let kicker = distinct.iter().copied().find(|&v| v != quad);
        return HandStrength::new(Category::FourOfAKind, std::iter::once(quad).chain(kicker));
    }

    if let Some((trip, 3)) = lead {
        if let Some(&(pair, _)) = groups[1..].iter().find(|&&(_, n)| n >= 2) {
            return HandStrength::new(Category::FullHouse, [trip, pair]);
        }
    }

    if let Some(values) = flush {
        return HandStrength::new(Category::Flush, values);
    }

    if let Some(run) = find_straight(&distinct) {
        return HandStrength::new(Category::Straight, run);
    }

    if let Some((trip, 3)) = lead {
        let kickers = distinct.iter().copied().filter(|&v| v != trip).take(2);
        return HandStrength::new(Category::ThreeOfAKind, std::iter::once(trip).chain(kickers));
    }

    if let (Some((high, 2)), Some(&(low, 2))) = (lead, groups.get(1)) {
        let kicker = distinct.iter().copied().find(|&v| v != high && v != low);
        return HandStrength::new(Category::TwoPair, [high, low].into_iter().chain(kicker));
    }

    if let Some((pair, 2)) = lead {
        let kickers = distinct.iter().copied().filter(|&v| v != pair).take(3);
        return HandStrength::new(Category::OnePair, std::iter::once(pair).chain(kickers));
    }

    HandStrength::new(Category::HighCard, distinct)
}

/// Category first, then tie-break ranks element by element. A missing
/// element ranks below any real card. `Greater` means `a` is stronger.
pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => {
            let len = a.tiebreak.len().max(b.tiebreak.len());
            (0..len)
                .map(|i| a.tiebreak.get(i).cmp(&b.tiebreak.get(i)))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        }
        ord => ord,
    }
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Spades => 0,
        Suit::Hearts => 1,
        Suit::Diamonds => 2,
        Suit::Clubs => 3,
    }
}

// (rank, count) sorted by count desc, then rank desc.
fn rank_groups(rank_counts: &[u8; 15]) -> Vec<(u8, u8)> {
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .filter_map(|r| match rank_counts[r as usize] {
            0 => None,
            n => Some((r, n)),
        })
        .collect();
    groups.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    groups
}

/// Highest five-card run in a descending list of rank values. An ace also
/// plays as 1 beneath the two; it is reported back as 14 (ace).
fn find_straight(values_desc: &[u8]) -> Option<Vec<u8>> {
    let has_ace = values_desc.contains(&14);
    let present = |v: u8| values_desc.contains(&v) || (v == 1 && has_ace);

    let mut tops: Vec<u8> = values_desc.to_vec();
    tops.dedup();
    if has_ace {
        tops.push(1);
    }

    tops.into_iter()
        .filter(|&top| top >= 5)
        .find(|&top| (1..5).all(|k| present(top - k)))
        .map(|top| {
            (0..5)
                .map(|k| match top - k {
                    1 => 14,
                    v => v,
                })
                .collect()
        })
}
