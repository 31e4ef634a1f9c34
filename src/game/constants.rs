//! Fixed parameters of a four-player Big Two game.

/// Number of seats at the table. Seat 0 is the human player.
pub const NUM_SEATS: usize = 4;

/// The human player's seat.
pub const HUMAN_SEAT: usize = 0;

/// Cards dealt to each seat from a full deck.
pub const HAND_SIZE: usize = 13;

/// Cards in a full deck.
pub const DECK_SIZE: usize = 52;
