//! Turn state definitions for the Big Two FSM.
//!
//! Each state represents a point in the turn cycle; the machine in
//! `state_machine` wraps one of these together with the game data.

use crate::game::entities::{Phase, Seat};

/// No play is on the table; the active seat must open the round with
/// any valid combination. Passing is not allowed.
#[derive(Debug)]
pub struct AwaitingLead {}

/// A play is on the table and belongs to another seat; the active seat
/// must beat it or pass.
#[derive(Debug)]
pub struct AwaitingFollow {}

/// Terminal state: a seat has emptied its hand and won the game.
#[derive(Debug)]
pub struct RoundWon {
    pub winner: Seat,
}

/// What a state contributes to snapshots: its phase tag and, for the
/// terminal state, the winning seat.
pub trait PhaseInfo {
    fn phase(&self) -> Phase;

    fn winner(&self) -> Option<Seat> {
        None
    }
}

impl PhaseInfo for AwaitingLead {
    fn phase(&self) -> Phase {
        Phase::AwaitingLead
    }
}

impl PhaseInfo for AwaitingFollow {
    fn phase(&self) -> Phase {
        Phase::AwaitingFollow
    }
}

impl PhaseInfo for RoundWon {
    fn phase(&self) -> Phase {
        Phase::RoundWon
    }

    fn winner(&self) -> Option<Seat> {
        Some(self.winner)
    }
}
