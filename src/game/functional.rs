//! Pure play classification and comparison.
//!
//! Everything here is a total function over card slices: no shared
//! state, no mutation of inputs, same cards in any order give the same
//! answer.

use super::entities::{Card, Category, TablePlay};

/// Classify a set of cards as one of the playable combinations, or
/// `None` when the cards form no recognized combination. Only sets of
/// size 1, 2, 3 or 5 can classify.
#[must_use]
pub fn classify(cards: &[Card]) -> Option<Category> {
    match cards {
        [_] => Some(Category::Single),
        [a, b] => (a.rank == b.rank).then_some(Category::Pair),
        [a, b, c] => (a.rank == b.rank && b.rank == c.rank).then_some(Category::Triple),
        five @ [_, _, _, _, _] => classify_five(five),
        _ => None,
    }
}

fn classify_five(cards: &[Card]) -> Option<Category> {
    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank.index()).collect();
    ranks.sort_unstable();

    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = ranks.windows(2).all(|w| w[1] == w[0] + 1);

    if straight && flush {
        return Some(Category::StraightFlush);
    }
    // Four of a kind and full house both occupy a contiguous window of
    // the sorted ranks: a real hand holds at most four cards of a rank,
    // so the {4,1} and {3,2} multisets cannot interleave.
    if ranks[0] == ranks[3] || ranks[1] == ranks[4] {
        return Some(Category::FourOfAKind);
    }
    if (ranks[0] == ranks[2] && ranks[3] == ranks[4]) || (ranks[0] == ranks[1] && ranks[2] == ranks[4])
    {
        return Some(Category::FullHouse);
    }
    if flush {
        return Some(Category::Flush);
    }
    if straight {
        return Some(Category::Straight);
    }
    None
}

/// Scalar strength of a combination within its category: the lowest
/// card's value for singles, pairs and triples, the highest card's
/// value for the five-card categories. Never reorders the input.
#[must_use]
pub fn combination_value(cards: &[Card], category: Category) -> u8 {
    let values = cards.iter().map(Card::value);
    match category {
        Category::Single | Category::Pair | Category::Triple => values.min().unwrap_or(0),
        _ => values.max().unwrap_or(0),
    }
}

/// Whether a classified combination beats the play currently on the
/// table. Across categories only the five-card hierarchy applies
/// (straight flush > four of a kind > full house > flush > straight);
/// within a category the combination value must be strictly greater.
#[must_use]
pub fn beats(new_cards: &[Card], new_category: Category, current: &TablePlay) -> bool {
    if new_category == current.category {
        new_cards.len() == current.cards.len()
            && combination_value(new_cards, new_category)
                > combination_value(&current.cards, current.category)
    } else {
        new_category.is_five_card()
            && current.category.is_five_card()
            && new_category > current.category
    }
}
