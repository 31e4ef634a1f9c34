use rand::seq::SliceRandom;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::constants::{DECK_SIZE, NUM_SEATS};

/// Suits in tiebreak order, weakest first. Two cards of equal rank are
/// ordered by suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Diamond,
    Club,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Diamond, Self::Club, Self::Heart, Self::Spade];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Diamond => "♦",
            Self::Club => "♣",
            Self::Heart => "♥",
            Self::Spade => "♠",
        };
        write!(f, "{repr}")
    }
}

/// Ranks in the game's house order: 3 is the weakest rank and 2 the
/// strongest, unlike numeric face order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Two,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
        Self::Two,
    ];

    /// Position in the house order, 0 (three) through 12 (two).
    #[must_use]
    pub fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
            Self::Two => "2",
        };
        write!(f, "{repr}")
    }
}

/// A card is a rank and a suit. Identity is structural; the deck holds
/// each rank×suit combination exactly once.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// The distinguished card: its holder leads the first round.
    pub const THREE_OF_DIAMONDS: Self = Self {
        rank: Rank::Three,
        suit: Suit::Diamond,
    };

    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Scalar position in the total card order: `rank * 4 + suit`.
    /// 3♦ maps to 0 and 2♠ to 51, with no ties.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.rank as u8 * 4 + self.suit as u8
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Type alias for seat positions. Seat 0 is the human, 1..=3 the AIs.
pub type Seat = usize;

/// A full deck of 52 distinct cards.
#[derive(Debug)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards = [Card::THREE_OF_DIAMONDS; DECK_SIZE];
        for (i, suit) in Suit::ALL.into_iter().enumerate() {
            for (j, rank) in Rank::ALL.into_iter().enumerate() {
                cards[13 * i + j] = Card::new(rank, suit);
            }
        }
        Self { cards }
    }
}

impl Deck {
    /// Uniform Fisher–Yates permutation over all 52 cards.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
    }

    /// Deal the whole deck round-robin one card at a time starting from
    /// seat 0, producing four sorted 13-card hands.
    #[must_use]
    pub fn deal_four(&self) -> [Hand; NUM_SEATS] {
        let mut piles: [Vec<Card>; NUM_SEATS] = Default::default();
        for (i, card) in self.cards.iter().enumerate() {
            piles[i % NUM_SEATS].push(*card);
        }
        piles.map(Hand::from_cards)
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// A seat's cards, kept sorted weakest to strongest at all times.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Hand(Vec<Card>);

impl<'de> Deserialize<'de> for Hand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cards = Vec::<Card>::deserialize(deserializer)?;
        Ok(Self::from_cards(cards))
    }
}

impl Hand {
    #[must_use]
    pub fn from_cards(mut cards: Vec<Card>) -> Self {
        cards.sort_unstable();
        Self(cards)
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.0.binary_search(&card).is_ok()
    }

    /// Whether every claimed card is present, counting multiplicity, so
    /// a claim listing the same card twice is rejected.
    #[must_use]
    pub fn contains_all(&self, cards: &[Card]) -> bool {
        let mut pool = self.0.clone();
        for card in cards {
            match pool.iter().position(|c| c == card) {
                Some(i) => {
                    pool.swap_remove(i);
                }
                None => return false,
            }
        }
        true
    }

    /// Remove the given cards. Cards leave a hand permanently; the hand
    /// stays sorted since removal preserves relative order.
    pub fn remove_all(&mut self, cards: &[Card]) {
        self.0.retain(|c| !cards.contains(c));
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self::from_cards(iter.into_iter().collect())
    }
}

/// The combinatorial type of a play. The variant order of the five-card
/// categories is their beating hierarchy: a straight flush beats any
/// four of a kind, which beats any full house, and so on down to a
/// straight, regardless of card values.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Category {
    Single,
    Pair,
    Triple,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl Category {
    /// Whether this category is one of the five-card combinations that
    /// participate in the cross-category hierarchy.
    #[must_use]
    pub fn is_five_card(self) -> bool {
        matches!(
            self,
            Self::Straight | Self::Flush | Self::FullHouse | Self::FourOfAKind | Self::StraightFlush
        )
    }

    /// Number of cards a play of this category contains.
    #[must_use]
    pub fn size(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Pair => 2,
            Self::Triple => 3,
            _ => 5,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Single => "single",
            Self::Pair => "pair",
            Self::Triple => "triple",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
        };
        write!(f, "{repr}")
    }
}

/// The most recent accepted combination on the table. Cleared when a
/// round resets; its cards never return to any hand.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TablePlay {
    pub owner: Seat,
    pub cards: Vec<Card>,
    pub category: Category,
}

impl fmt::Display for TablePlay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{} [{cards}]", self.category)
    }
}

/// Tag naming the turn state machine's current state.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Phase {
    AwaitingLead,
    AwaitingFollow,
    RoundWon,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::AwaitingLead => "awaiting lead",
            Self::AwaitingFollow => "awaiting follow",
            Self::RoundWon => "round won",
        };
        write!(f, "{repr}")
    }
}

/// An immutable projection of the game for one viewer seat: the
/// viewer's own cards in full, every other hand as a count only.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    pub viewer: Seat,
    pub hand: Vec<Card>,
    pub hand_sizes: [usize; NUM_SEATS],
    pub table: Option<TablePlay>,
    pub turn: Seat,
    pub phase: Phase,
    pub winner: Option<Seat>,
    /// Remaining ticks of the human turn countdown, if one is running.
    pub countdown: Option<u32>,
}
