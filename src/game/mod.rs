//! Big Two game engine - rules and turn state machine.
//!
//! This module provides the core game implementation:
//! - Card, deck and hand entities with the house card ordering
//! - Pure play classification and comparison (`functional`)
//! - The three-state turn machine with pass and round-reset semantics
//! - Event generation and per-seat snapshots

pub mod constants;
pub mod entities;
pub mod functional;
pub mod state_machine;
pub mod states;

pub use state_machine::{Game, GameData, GameEvent, GameState, GameStateManagement, PlayError};
