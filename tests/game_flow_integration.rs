//! Full end-to-end turn flow integration tests.
//!
//! Drives complete games through the public `Table` controller and the
//! `GameState` machine, checking the scenario flows, card conservation
//! and rejection idempotence.

use big_two::{
    Card, Category, HUMAN_SEAT, Hand, Phase, PlayError, Rank, Snapshot, Suit, Table, TableConfig,
    find_move,
};

fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn hand(cards: &[Card]) -> Hand {
    Hand::from_cards(cards.to_vec())
}

fn total_cards(snapshot: &Snapshot) -> usize {
    snapshot.hand_sizes.iter().sum()
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_scenario_a_lead_single_three_of_diamonds() {
    let mut table = Table::new(TableConfig::default());
    table.start_game_from_hands([
        hand(&[Card::THREE_OF_DIAMONDS, card(Rank::Nine, Suit::Club)]),
        hand(&[card(Rank::Four, Suit::Club), card(Rank::Ten, Suit::Club)]),
        hand(&[card(Rank::Five, Suit::Club), card(Rank::Jack, Suit::Club)]),
        hand(&[card(Rank::Six, Suit::Club), card(Rank::Queen, Suit::Club)]),
    ]);

    let outcome = table.propose_play(HUMAN_SEAT, &[Card::THREE_OF_DIAMONDS]);
    assert!(outcome.accepted);
    let snapshot = outcome.snapshot;
    assert_eq!(
        snapshot.table.as_ref().map(|t| t.category),
        Some(Category::Single)
    );
    assert_eq!(snapshot.phase, Phase::AwaitingFollow);
    assert_eq!(snapshot.turn, 1);
}

#[test]
fn test_scenario_b_lower_pair_rejected() {
    let mut table = Table::new(TableConfig::default());
    table.start_game_from_hands([
        hand(&[
            Card::THREE_OF_DIAMONDS,
            card(Rank::Seven, Suit::Club),
            card(Rank::Seven, Suit::Heart),
        ]),
        hand(&[
            card(Rank::Five, Suit::Club),
            card(Rank::Five, Suit::Heart),
            card(Rank::King, Suit::Club),
        ]),
        hand(&[card(Rank::Nine, Suit::Club), card(Rank::Ten, Suit::Club)]),
        hand(&[card(Rank::Jack, Suit::Club), card(Rank::Queen, Suit::Club)]),
    ]);

    // Any combination may open a round, so the human leads the pair of
    // 7s directly.
    let outcome = table.propose_play(
        HUMAN_SEAT,
        &[card(Rank::Seven, Suit::Club), card(Rank::Seven, Suit::Heart)],
    );
    assert!(outcome.accepted);

    let outcome = table.propose_play(
        1,
        &[card(Rank::Five, Suit::Club), card(Rank::Five, Suit::Heart)],
    );
    assert!(!outcome.accepted);
    assert_eq!(outcome.reason, Some(PlayError::IllegalAgainstCurrentPlay));
}

#[test]
fn test_scenario_c_full_pass_cycle_resets_to_owner() {
    let mut table = Table::new(TableConfig::default());
    // Seat 2 holds the 3♦ and so leads.
    table.start_game_from_hands([
        hand(&[card(Rank::Nine, Suit::Club), card(Rank::Ten, Suit::Heart)]),
        hand(&[card(Rank::Jack, Suit::Club), card(Rank::Queen, Suit::Heart)]),
        hand(&[Card::THREE_OF_DIAMONDS, card(Rank::King, Suit::Club)]),
        hand(&[card(Rank::Four, Suit::Club), card(Rank::Ace, Suit::Heart)]),
    ]);
    assert_eq!(table.snapshot_for(HUMAN_SEAT).turn, 2);

    assert!(table.propose_play(2, &[card(Rank::King, Suit::Club)]).accepted);
    assert!(table.pass_turn(3).accepted);
    assert!(table.pass_turn(0).accepted);
    let outcome = table.pass_turn(1);
    assert!(outcome.accepted);

    let snapshot = outcome.snapshot;
    assert_eq!(snapshot.phase, Phase::AwaitingLead);
    assert_eq!(snapshot.turn, 2);
    assert!(snapshot.table.is_none());
}

#[test]
fn test_scenario_d_last_card_wins() {
    let mut table = Table::new(TableConfig::default());
    // Human is down to the 2♠; seat 1 leads with the 3♦.
    table.start_game_from_hands([
        hand(&[card(Rank::Two, Suit::Spade)]),
        hand(&[Card::THREE_OF_DIAMONDS, card(Rank::Six, Suit::Club)]),
        hand(&[card(Rank::Seven, Suit::Club), card(Rank::Eight, Suit::Club)]),
        hand(&[card(Rank::Nine, Suit::Club), card(Rank::Ten, Suit::Club)]),
    ]);

    assert!(table.propose_play(1, &[Card::THREE_OF_DIAMONDS]).accepted);
    assert!(table.pass_turn(2).accepted);
    assert!(table.pass_turn(3).accepted);

    let outcome = table.propose_play(HUMAN_SEAT, &[card(Rank::Two, Suit::Spade)]);
    assert!(outcome.accepted);
    assert_eq!(outcome.snapshot.phase, Phase::RoundWon);
    assert_eq!(outcome.snapshot.winner, Some(HUMAN_SEAT));
    assert_eq!(table.winner(), Some(HUMAN_SEAT));
}

#[test]
fn test_scenario_e_ai_cannot_beat_straight_and_passes() {
    let mut table = Table::new(TableConfig::default());
    table.start_game_from_hands([
        hand(&[
            Card::THREE_OF_DIAMONDS,
            card(Rank::Four, Suit::Club),
            card(Rank::Five, Suit::Diamond),
            card(Rank::Six, Suit::Heart),
            card(Rank::Seven, Suit::Spade),
        ]),
        hand(&[
            card(Rank::Three, Suit::Club),
            card(Rank::Five, Suit::Heart),
            card(Rank::Seven, Suit::Diamond),
            card(Rank::Nine, Suit::Spade),
            card(Rank::Jack, Suit::Club),
            card(Rank::King, Suit::Diamond),
        ]),
        hand(&[card(Rank::Nine, Suit::Club), card(Rank::Ten, Suit::Club)]),
        hand(&[card(Rank::Jack, Suit::Heart), card(Rank::Queen, Suit::Club)]),
    ]);

    // Human leads the 3-to-7 straight.
    let straight = [
        Card::THREE_OF_DIAMONDS,
        card(Rank::Four, Suit::Club),
        card(Rank::Five, Suit::Diamond),
        card(Rank::Six, Suit::Heart),
        card(Rank::Seven, Suit::Spade),
    ];
    assert!(table.propose_play(HUMAN_SEAT, &straight).accepted);

    // Seat 1 has no straight of higher value and no higher category.
    assert_eq!(table.request_ai_move(1), None);
    let outcome = table.pass_turn(1);
    assert!(outcome.accepted);
    assert_eq!(outcome.snapshot.turn, 2);
}

// ============================================================================
// Invariant Tests
// ============================================================================

#[test]
fn test_cards_are_conserved_through_a_full_game() {
    let mut table = Table::new(TableConfig::default());
    let snapshot = table.start_game();
    assert_eq!(total_cards(&snapshot), 52);

    let mut played = 0;
    for _ in 0..500 {
        let snapshot = table.snapshot_for(HUMAN_SEAT);
        if snapshot.phase == Phase::RoundWon {
            break;
        }
        let seat = snapshot.turn;
        let view = table.snapshot_for(seat);
        let chosen = find_move(&Hand::from_cards(view.hand), view.table.as_ref());
        match chosen {
            Some(cards) => {
                let outcome = table.propose_play(seat, &cards);
                assert!(outcome.accepted, "move search produced an illegal move");
                played += cards.len();
            }
            None => {
                assert!(table.pass_turn(seat).accepted);
            }
        }
        // Dealt cards are never created or destroyed, only moved to
        // the played pile.
        let snapshot = table.snapshot_for(HUMAN_SEAT);
        assert_eq!(total_cards(&snapshot) + played, 52);
    }

    assert_eq!(table.snapshot_for(HUMAN_SEAT).phase, Phase::RoundWon);
    let winner = table.winner().expect("finished game has a winner");
    assert_eq!(table.snapshot_for(winner).hand_sizes[winner], 0);
}

#[test]
fn test_rejected_actions_leave_snapshot_untouched() {
    let mut table = Table::new(TableConfig::default());
    table.start_game_from_hands([
        hand(&[Card::THREE_OF_DIAMONDS, card(Rank::Nine, Suit::Club)]),
        hand(&[card(Rank::Four, Suit::Club), card(Rank::Ten, Suit::Club)]),
        hand(&[card(Rank::Five, Suit::Club), card(Rank::Jack, Suit::Club)]),
        hand(&[card(Rank::Six, Suit::Club), card(Rank::Queen, Suit::Club)]),
    ]);

    let before = serde_json::to_string(&table.snapshot_for(HUMAN_SEAT)).unwrap();

    // A card the hand does not hold.
    let outcome = table.propose_play(HUMAN_SEAT, &[card(Rank::Ace, Suit::Spade)]);
    assert!(!outcome.accepted);
    assert_eq!(serde_json::to_string(&outcome.snapshot).unwrap(), before);

    // A pass while leading.
    let outcome = table.pass_turn(HUMAN_SEAT);
    assert!(!outcome.accepted);
    assert_eq!(outcome.reason, Some(PlayError::PassNotAllowed));
    assert_eq!(serde_json::to_string(&outcome.snapshot).unwrap(), before);

    // An action from a seat that is not active.
    let outcome = table.propose_play(2, &[card(Rank::Five, Suit::Club)]);
    assert!(!outcome.accepted);
    assert_eq!(outcome.reason, Some(PlayError::NotActiveSeat));
    assert_eq!(
        serde_json::to_string(&table.snapshot_for(HUMAN_SEAT)).unwrap(),
        before
    );
}

#[test]
fn test_restart_mid_game_deals_fresh_consistent_state() {
    let mut table = Table::new(TableConfig::default());
    table.start_game();
    // Play whatever the leader's move search suggests, then restart.
    let snapshot = table.snapshot_for(HUMAN_SEAT);
    let seat = snapshot.turn;
    let view = table.snapshot_for(seat);
    let cards = find_move(&Hand::from_cards(view.hand), None).unwrap();
    assert!(table.propose_play(seat, &cards).accepted);

    let snapshot = table.start_game();
    assert_eq!(snapshot.hand_sizes, [13, 13, 13, 13]);
    assert_eq!(snapshot.phase, Phase::AwaitingLead);
    assert!(snapshot.table.is_none());
    assert!(snapshot.winner.is_none());
}

#[test]
fn test_first_leader_holds_three_of_diamonds() {
    for _ in 0..20 {
        let mut table = Table::new(TableConfig::default());
        table.start_game();
        let snapshot = table.snapshot_for(HUMAN_SEAT);
        let leader = snapshot.turn;
        let view = table.snapshot_for(leader);
        assert!(view.hand.contains(&Card::THREE_OF_DIAMONDS));
    }
}

// ============================================================================
// Timeout Flow
// ============================================================================

#[test]
fn test_following_timeout_synthesizes_pass() {
    let mut table = Table::new(TableConfig::default());
    // Seat 3 leads and plays; the human follows on a running clock.
    table.start_game_from_hands([
        hand(&[card(Rank::Nine, Suit::Club), card(Rank::Ten, Suit::Heart)]),
        hand(&[card(Rank::Jack, Suit::Club), card(Rank::Queen, Suit::Heart)]),
        hand(&[card(Rank::King, Suit::Club), card(Rank::Ace, Suit::Heart)]),
        hand(&[Card::THREE_OF_DIAMONDS, card(Rank::Four, Suit::Heart)]),
    ]);
    assert!(table.propose_play(3, &[Card::THREE_OF_DIAMONDS]).accepted);

    let snapshot = table.snapshot_for(HUMAN_SEAT);
    assert_eq!(snapshot.turn, HUMAN_SEAT);
    assert_eq!(snapshot.countdown, Some(30));

    let mut snapshot = snapshot;
    for _ in 0..30 {
        snapshot = table.tick();
    }
    // The countdown elapsed and the controller passed for the human.
    assert_eq!(snapshot.turn, 1);
    assert_eq!(snapshot.countdown, None);
    let events: Vec<String> = table.drain_events().iter().map(ToString::to_string).collect();
    assert!(events.iter().any(|e| e == "player ran out of time"));
    assert!(events.iter().any(|e| e == "player passes"));
}

#[test]
fn test_ticks_are_inert_during_ai_turns() {
    let mut table = Table::new(TableConfig::default());
    table.start_game_from_hands([
        hand(&[card(Rank::Nine, Suit::Club), card(Rank::Ten, Suit::Heart)]),
        hand(&[Card::THREE_OF_DIAMONDS, card(Rank::Queen, Suit::Heart)]),
        hand(&[card(Rank::King, Suit::Club), card(Rank::Ace, Suit::Heart)]),
        hand(&[card(Rank::Four, Suit::Club), card(Rank::Five, Suit::Heart)]),
    ]);
    let before = serde_json::to_string(&table.snapshot_for(HUMAN_SEAT)).unwrap();
    for _ in 0..100 {
        table.tick();
    }
    let after = serde_json::to_string(&table.snapshot_for(HUMAN_SEAT)).unwrap();
    assert_eq!(after, before);
}
