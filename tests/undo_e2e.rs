//! End-to-end tests for dispatch and undo
//!
//! Every action type is dispatched and undone through a real session; the
//! board must come back exactly, minus the cosmetic display log.

use mtg_table_rs::{
    core::{CardId, PlayerId},
    game::{compute_state_hash, IdentityShuffler},
    Action, GameSession, GameState, Result, SessionConfig, TableError, Zone,
};
use similar_asserts::assert_eq;

/// Board without the display log, which undo deliberately leaves alone
fn board(state: &GameState) -> GameState {
    let mut board = state.clone();
    board.display_log.clear();
    board
}

struct Table {
    session: GameSession,
    alice: PlayerId,
    bob: PlayerId,
    library: Vec<CardId>,
    hand: CardId,
    battlefield: CardId,
}

fn table() -> Result<Table> {
    let reverse = |ids: &mut [CardId]| ids.reverse();
    let mut session = GameSession::with_shuffler(SessionConfig::default(), Box::new(reverse));
    session.logger_mut().enable_capture();
    let alice = session.add_player("Alice");
    let bob = session.add_player("Bob");

    let mut library = Vec::new();
    for name in ["Forest", "Island", "Swamp", "Plains"] {
        library.push(session.add_card(alice, name, Zone::Library)?);
    }
    let hand = session.add_card(alice, "Llanowar Elves", Zone::Hand)?;
    let battlefield = session.add_card(alice, "Sol Ring", Zone::Battlefield)?;
    session.add_card(bob, "Mountain", Zone::Library)?;

    Ok(Table {
        session,
        alice,
        bob,
        library,
        hand,
        battlefield,
    })
}

fn assert_undo_restores(session: &mut GameSession, action: Action) -> Result<()> {
    let before = session.snapshot();
    let history_before = session.history().len();

    session.dispatch(action.clone())?;
    assert_eq!(session.history().len(), history_before + 1);
    assert!(
        board(session.state()) != board(&before),
        "{action:?} should change the board"
    );

    assert!(session.undo());
    assert_eq!(session.history().len(), history_before);
    assert_eq!(board(session.state()), board(&before));
    assert_eq!(compute_state_hash(session.state()), compute_state_hash(&before));
    Ok(())
}

#[test]
fn test_undo_restores_every_action_type() -> Result<()> {
    let mut t = table()?;
    let (alice, bob) = (t.alice, t.bob);

    let actions = vec![
        Action::PlayCard {
            player: alice,
            card: t.hand,
        },
        Action::Tap {
            player: alice,
            card: t.battlefield,
        },
        Action::MoveCard {
            player: alice,
            card: t.battlefield,
            to: Zone::Graveyard,
        },
        Action::Draw {
            player: alice,
            count: 2,
        },
        Action::Shuffle {
            player: alice,
            zone: Zone::Library,
        },
        Action::ModifyLife {
            player: bob,
            delta: -3,
        },
    ];
    for action in actions {
        assert_undo_restores(&mut t.session, action)?;
    }

    // Untap needs a tapped card to start from
    t.session.dispatch(Action::Tap {
        player: alice,
        card: t.battlefield,
    })?;
    assert_undo_restores(
        &mut t.session,
        Action::Untap {
            player: alice,
            card: t.battlefield,
        },
    )?;
    Ok(())
}

#[test]
fn test_undo_restores_library_order_after_draw() -> Result<()> {
    let mut t = table()?;
    let before = t.session.state().cards_in_zone(t.alice, Zone::Library);
    assert_eq!(before, t.library);

    t.session.dispatch(Action::Draw {
        player: t.alice,
        count: 3,
    })?;
    t.session.undo();

    assert_eq!(t.session.state().cards_in_zone(t.alice, Zone::Library), before);
    Ok(())
}

#[test]
fn test_undo_restores_tapped_card_moved_to_hand() -> Result<()> {
    let mut t = table()?;
    t.session.dispatch(Action::Tap {
        player: t.alice,
        card: t.battlefield,
    })?;

    assert_undo_restores(
        &mut t.session,
        Action::MoveCard {
            player: t.alice,
            card: t.battlefield,
            to: Zone::Library,
        },
    )?;
    assert!(t.session.state().get_card(t.battlefield)?.tapped);
    Ok(())
}

#[test]
fn test_undo_is_lifo_across_transactions() -> Result<()> {
    let mut t = table()?;
    let start = board(t.session.state());

    t.session.dispatch(Action::PlayCard {
        player: t.alice,
        card: t.hand,
    })?;
    let after_play = board(t.session.state());
    t.session.dispatch(Action::Tap {
        player: t.alice,
        card: t.hand,
    })?;
    t.session.dispatch(Action::MoveCard {
        player: t.alice,
        card: t.hand,
        to: Zone::Hand,
    })?;

    t.session.undo();
    t.session.undo();
    assert_eq!(board(t.session.state()), after_play);
    t.session.undo();
    assert_eq!(board(t.session.state()), start);
    assert!(!t.session.can_undo());
    Ok(())
}

#[test]
fn test_history_length_invariants() -> Result<()> {
    let mut t = table()?;
    assert_eq!(t.session.history().len(), 0);

    // Undo on empty history is a no-op
    assert!(!t.session.undo());
    assert_eq!(t.session.history().len(), 0);

    t.session.dispatch(Action::ModifyLife {
        player: t.alice,
        delta: 1,
    })?;
    assert_eq!(t.session.history().len(), 1);

    let failed = t.session.dispatch(Action::Untap {
        player: t.alice,
        card: t.battlefield,
    });
    assert!(matches!(failed, Err(TableError::AlreadyUntapped(_))));
    assert_eq!(t.session.history().len(), 1);

    assert!(t.session.undo());
    assert_eq!(t.session.history().len(), 0);
    Ok(())
}

#[test]
fn test_rejected_actions_leave_board_identical() -> Result<()> {
    let mut t = table()?;
    t.session.dispatch(Action::Tap {
        player: t.alice,
        card: t.battlefield,
    })?;
    let before = t.session.snapshot();
    let missing_card = CardId::new(9999);
    let missing_player = PlayerId::new(9999);

    let rejected = vec![
        Action::Tap {
            player: t.alice,
            card: t.battlefield,
        },
        Action::PlayCard {
            player: t.alice,
            card: t.library[0],
        },
        Action::PlayCard {
            player: t.bob,
            card: t.hand,
        },
        Action::PlayCard {
            player: t.alice,
            card: missing_card,
        },
        Action::Draw {
            player: missing_player,
            count: 1,
        },
        Action::ModifyLife {
            player: missing_player,
            delta: 5,
        },
    ];
    for action in rejected {
        let err = t.session.dispatch(action).unwrap_err();
        assert!(err.is_rejection(), "{err}");
        assert_eq!(t.session.state(), &before);
        assert_eq!(t.session.history().len(), 1);
    }
    Ok(())
}

#[test]
fn test_life_scenario_round_trip() -> Result<()> {
    let mut session = GameSession::with_shuffler(SessionConfig::default(), Box::new(IdentityShuffler));
    let p1 = session.add_player("A");
    let p2 = session.add_player("B");
    assert_eq!(session.state().get_player(p2)?.life, 40);

    session.dispatch(Action::ModifyLife { player: p1, delta: 5 })?;
    assert_eq!(session.state().get_player(p1)?.life, 45);

    session.dispatch(Action::ModifyLife { player: p1, delta: -5 })?;
    assert_eq!(session.state().get_player(p1)?.life, 40);

    session.undo();
    session.undo();
    assert_eq!(session.state().get_player(p1)?.life, 40);
    assert_eq!(session.history().len(), 0);

    // Both log lines survive; undo does not roll the display log back
    assert_eq!(session.state().display_log.len(), 2);
    Ok(())
}

#[test]
fn test_life_has_no_floor() -> Result<()> {
    let mut t = table()?;
    t.session.dispatch(Action::ModifyLife {
        player: t.bob,
        delta: -100,
    })?;
    assert_eq!(t.session.state().get_player(t.bob)?.life, -60);

    t.session.undo();
    assert_eq!(t.session.state().get_player(t.bob)?.life, 40);
    Ok(())
}

#[test]
fn test_extreme_life_changes_undo_exactly() -> Result<()> {
    let mut t = table()?;

    // Reaching the top of the range is fine and reverts cleanly
    assert_undo_restores(
        &mut t.session,
        Action::ModifyLife {
            player: t.bob,
            delta: i32::MAX - 40,
        },
    )?;
    assert_eq!(t.session.state().get_player(t.bob)?.life, 40);

    // Past it, or a delta with no exact negation, is refused outright
    let before = t.session.snapshot();
    for delta in [i32::MAX, i32::MIN] {
        let err = t
            .session
            .dispatch(Action::ModifyLife {
                player: t.bob,
                delta,
            })
            .unwrap_err();
        assert!(matches!(err, TableError::LifeOutOfRange { .. }));
        assert!(err.is_rejection());
    }
    assert_eq!(t.session.state(), &before);
    assert_eq!(t.session.history().len(), 0);
    Ok(())
}

#[test]
fn test_draw_into_held_hand_and_undo() -> Result<()> {
    let mut t = table()?;
    // Library bottom to top: Forest, Island, Swamp, Plains; hand holds the Elves
    let before = board(t.session.state());

    t.session.dispatch(Action::Draw {
        player: t.alice,
        count: 2,
    })?;

    assert_eq!(
        t.session.state().cards_in_zone(t.alice, Zone::Hand),
        vec![t.hand, t.library[3], t.library[2]]
    );
    assert_eq!(
        t.session.state().cards_in_zone(t.alice, Zone::Library),
        vec![t.library[0], t.library[1]]
    );

    t.session.undo();
    assert_eq!(board(t.session.state()), before);
    Ok(())
}
