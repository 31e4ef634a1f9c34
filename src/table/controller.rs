//! The session controller owning the turn machine and its timers.
//!
//! A [`Table`] is the single stateful component: it holds the turn
//! state machine, the per-human-turn countdown and the pacing config.
//! The view collaborator calls [`Table::propose_play`],
//! [`Table::pass_turn`] and [`Table::tick`]; the scheduling
//! collaborator calls [`Table::request_ai_move`] when an AI seat
//! becomes active. Turn progression is cooperative: the controller
//! suspends after every call and waits for the next stimulus.

use std::mem;

use serde::{Deserialize, Serialize};

use super::config::TableConfig;
use crate::bot::decision;
use crate::game::constants::{HUMAN_SEAT, NUM_SEATS};
use crate::game::entities::{Card, Hand, Phase, Seat, Snapshot};
use crate::game::{GameEvent, GameState, GameStateManagement, PlayError};

/// Result of a proposed action: whether it was applied, the rejection
/// reason if not, and the human seat's view afterwards. A rejected
/// action leaves the snapshot identical to before the call.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub accepted: bool,
    pub reason: Option<PlayError>,
    pub snapshot: Snapshot,
}

/// A single-session Big Two table for one human and three AI seats.
pub struct Table {
    config: TableConfig,
    state: GameState,
    /// Remaining ticks of the human turn, when one is running. Dropped
    /// and re-armed by the controller only; `start_game` releases it
    /// before dealing so a stale countdown can't fire into a new game.
    countdown: Option<u32>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

impl Table {
    /// Create an idle table. No cards are dealt until
    /// [`Table::start_game`].
    #[must_use]
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            state: GameState::default(),
            countdown: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn winner(&self) -> Option<Seat> {
        self.state.winner()
    }

    /// Deal a fresh shuffled game. Cancels any running countdown before
    /// reinitializing, then arms it again if the human leads.
    pub fn start_game(&mut self) -> Snapshot {
        self.countdown = None;
        self.state = GameState::new();
        log::info!(
            "table '{}': new deal, seat {} leads",
            self.config.name,
            self.state.data().turn()
        );
        self.arm_countdown();
        self.snapshot_for(HUMAN_SEAT)
    }

    /// Start a game from explicit hands, for deterministic setups.
    pub fn start_game_from_hands(&mut self, hands: [Hand; NUM_SEATS]) -> Snapshot {
        self.countdown = None;
        self.state = GameState::from_hands(hands);
        self.arm_countdown();
        self.snapshot_for(HUMAN_SEAT)
    }

    /// Propose a combination for a seat. Applies it when legal per the
    /// turn machine, otherwise reports the reason with state untouched.
    pub fn propose_play(&mut self, seat: Seat, cards: &[Card]) -> ActionOutcome {
        let state = mem::take(&mut self.state);
        let (state, result) = state.propose_play(seat, cards);
        self.state = state;
        match result {
            Ok(()) => {
                if let Some(play) = self.state.data().table() {
                    log::debug!("table '{}': seat {seat} plays {play}", self.config.name);
                }
                self.arm_countdown();
                self.outcome(None)
            }
            Err(reason) => {
                log::debug!(
                    "table '{}': rejected play from seat {seat}: {reason}",
                    self.config.name
                );
                self.outcome(Some(reason))
            }
        }
    }

    /// Pass the turn for a seat.
    pub fn pass_turn(&mut self, seat: Seat) -> ActionOutcome {
        let state = mem::take(&mut self.state);
        let (state, result) = state.pass(seat);
        self.state = state;
        match result {
            Ok(()) => {
                log::debug!("table '{}': seat {seat} passes", self.config.name);
                self.arm_countdown();
                self.outcome(None)
            }
            Err(reason) => {
                log::debug!(
                    "table '{}': rejected pass from seat {seat}: {reason}",
                    self.config.name
                );
                self.outcome(Some(reason))
            }
        }
    }

    /// Advance the human countdown by one tick. On expiry the
    /// controller acts on the human's behalf: a pass while following,
    /// or the move search's lead when passing is illegal.
    pub fn tick(&mut self) -> Snapshot {
        if let Some(remaining) = self.countdown {
            if remaining <= 1 {
                self.countdown = None;
                self.timeout_human();
            } else {
                self.countdown = Some(remaining - 1);
            }
        }
        self.snapshot_for(HUMAN_SEAT)
    }

    /// Find a move for an active AI seat. `None` means the seat cannot
    /// beat the table and should pass.
    #[must_use]
    pub fn request_ai_move(&self, seat: Seat) -> Option<Vec<Card>> {
        if seat == HUMAN_SEAT || seat >= NUM_SEATS {
            return None;
        }
        decision::find_move(self.state.data().hand(seat), self.state.data().table())
    }

    /// Drain queued game events for display.
    pub fn drain_events(&mut self) -> std::collections::VecDeque<GameEvent> {
        self.state.drain_events()
    }

    /// Project the game for one viewer seat, including the running
    /// countdown.
    #[must_use]
    pub fn snapshot_for(&self, viewer: Seat) -> Snapshot {
        let mut snapshot = self.state.snapshot(viewer);
        snapshot.countdown = self.countdown;
        snapshot
    }

    fn outcome(&self, reason: Option<PlayError>) -> ActionOutcome {
        ActionOutcome {
            accepted: reason.is_none(),
            reason,
            snapshot: self.snapshot_for(HUMAN_SEAT),
        }
    }

    fn arm_countdown(&mut self) {
        let human_active =
            self.state.phase() != Phase::RoundWon && self.state.data().turn() == HUMAN_SEAT;
        self.countdown = human_active.then(|| self.config.turn_timeout_ticks());
    }

    fn timeout_human(&mut self) {
        log::info!("table '{}': player ran out of time", self.config.name);
        self.state
            .data_mut()
            .push_event(GameEvent::TimedOut { seat: HUMAN_SEAT });
        match self.state.phase() {
            Phase::AwaitingFollow => {
                let _ = self.pass_turn(HUMAN_SEAT);
            }
            Phase::AwaitingLead => {
                if let Some(cards) = decision::find_move(self.state.data().hand(HUMAN_SEAT), None)
                {
                    let _ = self.propose_play(HUMAN_SEAT, &cards);
                }
            }
            Phase::RoundWon => {}
        }
    }
}
