//! Big Two turn state machine.
//!
//! The machine owns the only mutable game state: four hands, the play
//! on the table, the turn pointer and the event queue. Transitions
//! consume the machine and hand back the next state together with the
//! outcome, so a rejected action is a no-op by construction.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt, mem};
use thiserror::Error;

use super::constants::{HUMAN_SEAT, NUM_SEATS};
use super::entities::{Card, Category, Deck, Hand, Phase, Seat, Snapshot, TablePlay};
use super::functional;
use super::states::{AwaitingFollow, AwaitingLead, PhaseInfo, RoundWon};

/// Errors that can reject a proposed action. All are recoverable: the
/// machine is left untouched and the actor may retry or pass.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum PlayError {
    #[error("cards don't form a playable combination")]
    InvalidCombination,
    #[error("doesn't beat the play on the table")]
    IllegalAgainstCurrentPlay,
    #[error("not your turn")]
    NotActiveSeat,
    #[error("can't pass now")]
    PassNotAllowed,
}

/// Events that occur during gameplay, drained by the view collaborator
/// for display.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    Dealt { leader: Seat },
    Played { seat: Seat, category: Category, cards: Vec<Card> },
    Passed { seat: Seat },
    RoundReset { leader: Seat },
    TimedOut { seat: Seat },
    Won { seat: Seat },
}

fn seat_name(seat: Seat) -> String {
    if seat == HUMAN_SEAT {
        "player".to_string()
    } else {
        format!("AI {seat}")
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Dealt { leader } => format!("new deal, {} leads", seat_name(*leader)),
            Self::Played { seat, category, .. } => {
                format!("{} plays a {category}", seat_name(*seat))
            }
            Self::Passed { seat } => format!("{} passes", seat_name(*seat)),
            Self::RoundReset { leader } => {
                format!("everyone passed, {} leads", seat_name(*leader))
            }
            Self::TimedOut { seat } => format!("{} ran out of time", seat_name(*seat)),
            Self::Won { seat } => format!("{} wins!", seat_name(*seat)),
        };
        write!(f, "{repr}")
    }
}

/// Mutable game data shared across all states.
#[derive(Debug, Default)]
pub struct GameData {
    pub(super) hands: [Hand; NUM_SEATS],
    pub(super) table: Option<TablePlay>,
    pub(super) turn: Seat,
    /// Queue of game events giving insight into what happened due to
    /// accepted actions and state changes.
    pub(super) events: VecDeque<GameEvent>,
}

impl GameData {
    /// Deal a fresh shuffled deck into four hands; the holder of the
    /// lowest card in the deck ranking (3♦ for a full deal) leads.
    #[must_use]
    pub fn deal() -> Self {
        let mut deck = Deck::default();
        deck.shuffle();
        Self::from_hands(deck.deal_four())
    }

    /// Build game data from explicit hands. The leader is the seat
    /// holding the lowest card overall.
    #[must_use]
    pub fn from_hands(hands: [Hand; NUM_SEATS]) -> Self {
        let leader = (0..NUM_SEATS)
            .min_by_key(|&s| hands[s].cards().first().map_or(u8::MAX, Card::value))
            .unwrap_or(HUMAN_SEAT);
        let mut events = VecDeque::new();
        events.push_back(GameEvent::Dealt { leader });
        Self {
            hands,
            table: None,
            turn: leader,
            events,
        }
    }

    #[must_use]
    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat]
    }

    #[must_use]
    pub fn table(&self) -> Option<&TablePlay> {
        self.table.as_ref()
    }

    #[must_use]
    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    /// Validate a proposal far enough to name its category: the seat
    /// must be active, the cards must all come from that seat's hand
    /// (listing a card twice or a card the hand lacks is invalid), and
    /// they must classify.
    fn classify_claim(&self, seat: Seat, cards: &[Card]) -> Result<Category, PlayError> {
        if seat != self.turn {
            return Err(PlayError::NotActiveSeat);
        }
        if cards.is_empty() || !self.hands[seat].contains_all(cards) {
            return Err(PlayError::InvalidCombination);
        }
        functional::classify(cards).ok_or(PlayError::InvalidCombination)
    }

    /// Move an accepted combination from the actor's hand onto the
    /// table.
    fn commit_play(&mut self, seat: Seat, cards: &[Card], category: Category) {
        self.hands[seat].remove_all(cards);
        let mut played = cards.to_vec();
        played.sort_unstable();
        self.push_event(GameEvent::Played {
            seat,
            category,
            cards: played.clone(),
        });
        self.table = Some(TablePlay {
            owner: seat,
            cards: played,
            category,
        });
    }

    fn advance_turn(&mut self) {
        self.turn = (self.turn + 1) % NUM_SEATS;
    }

    fn snapshot(&self, viewer: Seat, phase: Phase, winner: Option<Seat>) -> Snapshot {
        let mut hand_sizes = [0; NUM_SEATS];
        for (seat, hand) in self.hands.iter().enumerate() {
            hand_sizes[seat] = hand.len();
        }
        Snapshot {
            viewer,
            hand: self.hands[viewer].cards().to_vec(),
            hand_sizes,
            table: self.table.clone(),
            turn: self.turn,
            phase,
            winner,
            countdown: None,
        }
    }
}

/// A game in one concrete turn state.
#[derive(Debug)]
pub struct Game<T> {
    pub data: GameData,
    pub state: T,
}

/// Trait for managing game state (events, snapshots).
#[enum_dispatch]
pub trait GameStateManagement {
    fn drain_events(&mut self) -> VecDeque<GameEvent>;

    /// Project the game for one viewer seat.
    #[must_use]
    fn snapshot(&self, viewer: Seat) -> Snapshot;
}

impl<T: PhaseInfo> GameStateManagement for Game<T> {
    fn drain_events(&mut self) -> VecDeque<GameEvent> {
        mem::take(&mut self.data.events)
    }

    fn snapshot(&self, viewer: Seat) -> Snapshot {
        self.data
            .snapshot(viewer, self.state.phase(), self.state.winner())
    }
}

/// The turn state machine: a game in whichever state it currently
/// occupies. Transitions consume the machine, so callers rebind:
///
/// ```
/// use big_two::game::GameState;
///
/// let game = GameState::new();
/// let leader = game.data().turn();
/// let lead = game.data().hand(leader).cards()[..1].to_vec();
/// let (game, result) = game.propose_play(leader, &lead);
/// assert!(result.is_ok());
/// # let _ = game;
/// ```
#[derive(Debug)]
#[enum_dispatch(GameStateManagement)]
pub enum GameState {
    AwaitingLead(Game<AwaitingLead>),
    AwaitingFollow(Game<AwaitingFollow>),
    RoundWon(Game<RoundWon>),
}

impl Default for GameState {
    /// An idle machine over empty hands; every proposal is rejected
    /// until a real deal replaces it.
    fn default() -> Self {
        Self::AwaitingLead(Game {
            data: GameData::default(),
            state: AwaitingLead {},
        })
    }
}

impl GameState {
    /// Deal a fresh shuffled game awaiting its first lead.
    #[must_use]
    pub fn new() -> Self {
        Self::AwaitingLead(Game {
            data: GameData::deal(),
            state: AwaitingLead {},
        })
    }

    /// Start a game from explicit hands, for deterministic setups.
    #[must_use]
    pub fn from_hands(hands: [Hand; NUM_SEATS]) -> Self {
        Self::AwaitingLead(Game {
            data: GameData::from_hands(hands),
            state: AwaitingLead {},
        })
    }

    /// Propose a combination for the given seat. Accepted plays move
    /// the cards to the table and advance the turn; the win check runs
    /// before the next state is computed.
    pub fn propose_play(self, seat: Seat, cards: &[Card]) -> (Self, Result<(), PlayError>) {
        match self {
            Self::AwaitingLead(game) => match game.data.classify_claim(seat, cards) {
                Ok(category) => (Self::accept(game.data, seat, cards, category), Ok(())),
                Err(reason) => (Self::AwaitingLead(game), Err(reason)),
            },
            Self::AwaitingFollow(game) => {
                let checked = game.data.classify_claim(seat, cards).and_then(|category| {
                    match game.data.table() {
                        Some(current) if functional::beats(cards, category, current) => Ok(category),
                        Some(_) => Err(PlayError::IllegalAgainstCurrentPlay),
                        None => Ok(category),
                    }
                });
                match checked {
                    Ok(category) => (Self::accept(game.data, seat, cards, category), Ok(())),
                    Err(reason) => (Self::AwaitingFollow(game), Err(reason)),
                }
            }
            Self::RoundWon(game) => (Self::RoundWon(game), Err(PlayError::NotActiveSeat)),
        }
    }

    fn accept(mut data: GameData, seat: Seat, cards: &[Card], category: Category) -> Self {
        data.commit_play(seat, cards, category);
        if data.hands[seat].is_empty() {
            data.push_event(GameEvent::Won { seat });
            Self::RoundWon(Game {
                data,
                state: RoundWon { winner: seat },
            })
        } else {
            data.advance_turn();
            Self::AwaitingFollow(Game {
                data,
                state: AwaitingFollow {},
            })
        }
    }

    /// Pass the turn. Legal only while following, and never for the
    /// owner of the play on the table; when the pointer returns to the
    /// owner the round resets and they lead again.
    pub fn pass(self, seat: Seat) -> (Self, Result<(), PlayError>) {
        match self {
            Self::AwaitingLead(game) => {
                let reason = if seat == game.data.turn {
                    PlayError::PassNotAllowed
                } else {
                    PlayError::NotActiveSeat
                };
                (Self::AwaitingLead(game), Err(reason))
            }
            Self::AwaitingFollow(mut game) => {
                if seat != game.data.turn {
                    return (Self::AwaitingFollow(game), Err(PlayError::NotActiveSeat));
                }
                let owner = game.data.table().map(|t| t.owner);
                if owner == Some(seat) {
                    return (Self::AwaitingFollow(game), Err(PlayError::PassNotAllowed));
                }
                game.data.push_event(GameEvent::Passed { seat });
                game.data.advance_turn();
                if owner == Some(game.data.turn) {
                    game.data.table = None;
                    let leader = game.data.turn;
                    game.data.push_event(GameEvent::RoundReset { leader });
                    (
                        Self::AwaitingLead(Game {
                            data: game.data,
                            state: AwaitingLead {},
                        }),
                        Ok(()),
                    )
                } else {
                    (Self::AwaitingFollow(game), Ok(()))
                }
            }
            Self::RoundWon(game) => (Self::RoundWon(game), Err(PlayError::NotActiveSeat)),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::AwaitingLead(game) => game.state.phase(),
            Self::AwaitingFollow(game) => game.state.phase(),
            Self::RoundWon(game) => game.state.phase(),
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<Seat> {
        match self {
            Self::RoundWon(game) => Some(game.state.winner),
            _ => None,
        }
    }

    #[must_use]
    pub fn data(&self) -> &GameData {
        match self {
            Self::AwaitingLead(game) => &game.data,
            Self::AwaitingFollow(game) => &game.data,
            Self::RoundWon(game) => &game.data,
        }
    }

    pub(crate) fn data_mut(&mut self) -> &mut GameData {
        match self {
            Self::AwaitingLead(game) => &mut game.data,
            Self::AwaitingFollow(game) => &mut game.data,
            Self::RoundWon(game) => &mut game.data,
        }
    }
}
