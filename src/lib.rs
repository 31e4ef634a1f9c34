//! # Big Two
//!
//! A four-player Big Two (Lao Er Dai) card game engine using a
//! type-safe finite state machine (FSM) design.
//!
//! This library provides the complete rules and turn-flow core of the
//! game: combination classification, play comparison, turn state
//! management, timeout handling and a move search for the three
//! computer-controlled seats. Rendering, input handling and scheduling
//! live outside the crate and drive it through the [`table::Table`]
//! controller.
//!
//! ## Architecture
//!
//! The turn cycle is an FSM with three states, dispatched with
//! `enum_dispatch`:
//!
//! - **AwaitingLead**: no play on the table; the active seat opens the
//!   round with any valid combination and may not pass
//! - **AwaitingFollow**: the active seat must beat the table or pass;
//!   when every other seat passes, the round resets to the play's owner
//! - **RoundWon**: terminal; a seat emptied its hand
//!
//! Classification and comparison are pure functions in
//! [`game::functional`]; the only mutable state is the game data owned
//! by the machine, and the [`table::Table`] controller on top of it
//! owns the human turn countdown.
//!
//! ## Core Modules
//!
//! - [`game`]: entities, pure rules and the turn state machine
//! - [`bot`]: greedy move search for the computer seats
//! - [`table`]: the session controller and its configuration
//!
//! ## Example
//!
//! ```
//! use big_two::{Table, TableConfig};
//!
//! let mut table = Table::new(TableConfig::default());
//! let snapshot = table.start_game();
//! assert_eq!(snapshot.hand.len(), 13);
//! ```

/// Core game logic, entities and the turn state machine.
pub mod game;
pub use game::{
    GameEvent, GameState, GameStateManagement, PlayError,
    constants::{self, HUMAN_SEAT, NUM_SEATS},
    entities::{self, Card, Category, Hand, Phase, Rank, Seat, Snapshot, Suit, TablePlay},
};

/// Move search for the computer seats.
pub mod bot;
pub use bot::find_move;

/// The session controller owning the machine and its timers.
pub mod table;
pub use table::{ActionOutcome, Table, TableConfig, TableSpeed};
