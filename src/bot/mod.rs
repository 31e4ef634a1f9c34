//! Bot module providing the computer seats' move search.
//!
//! The search is a bounded greedy scan over the sorted hand: it plays
//! the cheapest legal combination it finds and passes when nothing in
//! the hand can beat the table. It never looks ahead and never
//! withholds a winning move.

pub mod decision;

pub use decision::find_move;
