//! Greedy move search for the computer seats.

use crate::game::entities::{Card, Category, Hand, TablePlay};
use crate::game::functional;

/// Find a legal move for a hand, or `None` to pass.
///
/// Leading (no play on the table) prefers, in order: the first valid
/// five-card window of the sorted hand, the first adjacent triple, the
/// first adjacent pair, the single lowest card. Following returns the
/// first combination in scan order that beats the table. Both scans
/// run left to right over the sorted hand, so the result is always the
/// cheapest qualifying combination.
#[must_use]
pub fn find_move(hand: &Hand, table: Option<&TablePlay>) -> Option<Vec<Card>> {
    match table {
        None => find_lead(hand.cards()),
        Some(current) => find_follow(hand.cards(), current),
    }
}

fn find_lead(cards: &[Card]) -> Option<Vec<Card>> {
    if cards.len() >= 5 {
        for window in cards.windows(5) {
            if functional::classify(window).is_some() {
                return Some(window.to_vec());
            }
        }
    }
    for window in cards.windows(3) {
        if same_rank(window) {
            return Some(window.to_vec());
        }
    }
    for window in cards.windows(2) {
        if same_rank(window) {
            return Some(window.to_vec());
        }
    }
    cards.first().map(|lowest| vec![*lowest])
}

fn find_follow(cards: &[Card], current: &TablePlay) -> Option<Vec<Card>> {
    match current.category {
        Category::Single => cards
            .iter()
            .find(|card| functional::beats(&[**card], Category::Single, current))
            .map(|card| vec![*card]),
        Category::Pair => cards
            .windows(2)
            .find(|w| same_rank(w) && functional::beats(w, Category::Pair, current))
            .map(<[Card]>::to_vec),
        Category::Triple => cards
            .windows(3)
            .find(|w| same_rank(w) && functional::beats(w, Category::Triple, current))
            .map(<[Card]>::to_vec),
        _ => cards
            .windows(5)
            .find(|w| {
                functional::classify(w)
                    .is_some_and(|category| functional::beats(w, category, current))
            })
            .map(<[Card]>::to_vec),
    }
}

fn same_rank(cards: &[Card]) -> bool {
    cards.windows(2).all(|w| w[0].rank == w[1].rank)
}
