//! Random legal playouts checked against the game's invariants.

use chessboard_core::{Color, PieceKind, Square};
use chessboard_engine::{is_king_attacked, make_move, Game, Position};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Plays up to `choices.len()` plies, picking each move by index, and calls
/// `check` before every ply. Stops early when the game ends.
fn playout(choices: &[usize], mut check: impl FnMut(&Game)) -> Game {
    let mut game = Game::new();
    for &choice in choices {
        check(&game);
        let moves = game.all_legal_moves();
        if moves.is_empty() {
            break;
        }
        let m = moves[choice % moves.len()];
        game.apply_move(m).unwrap();
    }
    check(&game);
    game
}

fn occupied_by(game: &Game, color: Color) -> BTreeSet<Square> {
    game.board().pieces_of(color).map(|(sq, _)| sq).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn one_king_per_side(choices in prop::collection::vec(any::<usize>(), 0..80)) {
        playout(&choices, |game| {
            for color in Color::BOTH {
                assert_eq!(game.board().count(PieceKind::King, color), 1);
            }
        });
    }

    #[test]
    fn no_legal_move_leaves_own_king_attacked(
        choices in prop::collection::vec(any::<usize>(), 0..60)
    ) {
        playout(&choices, |game| {
            let position: &Position = game.position();
            let us = position.side_to_move;
            for m in &game.all_legal_moves() {
                let next = make_move(position, *m);
                assert!(!is_king_attacked(&next.board, us), "{} exposes the king", m);
            }
        });
    }

    #[test]
    fn armies_match_board(choices in prop::collection::vec(any::<usize>(), 0..80)) {
        let game = playout(&choices, |game| {
            for color in Color::BOTH {
                assert_eq!(game.player(color).army(), &occupied_by(game, color));
            }
        });
        let lost = game.player(Color::White).lost().len() + game.player(Color::Black).lost().len();
        let captures = game.history().iter().filter(|m| m.is_capture()).count();
        prop_assert_eq!(lost, captures);
    }

    #[test]
    fn turn_alternates_and_history_grows(
        choices in prop::collection::vec(any::<usize>(), 0..80)
    ) {
        let game = playout(&choices, |_| {});
        let plies = game.history().len();
        let expected = if plies % 2 == 0 { Color::White } else { Color::Black };
        prop_assert_eq!(game.turn(), expected);
        for (i, m) in game.history().iter().enumerate() {
            let mover = if i % 2 == 0 { Color::White } else { Color::Black };
            prop_assert_eq!(m.piece().color, mover);
        }
    }

    #[test]
    fn moved_pieces_stay_moved(choices in prop::collection::vec(any::<usize>(), 0..80)) {
        let game = playout(&choices, |_| {});
        let mut destinations: Vec<Square> = Vec::new();
        for m in game.history() {
            destinations.retain(|&sq| sq != m.from());
            destinations.push(m.to());
        }
        for sq in destinations {
            if let Some(piece) = game.board().piece_at(sq) {
                prop_assert!(piece.has_moved, "{} on {} is marked unmoved", piece, sq);
            }
        }
    }

    #[test]
    fn en_passant_only_right_after_double_step(
        choices in prop::collection::vec(any::<usize>(), 0..80)
    ) {
        playout(&choices, |game| {
            let fresh_double = game.history().last().is_some_and(|m| m.is_double_push());
            if !fresh_double {
                assert!(!game.all_legal_moves().iter().any(|m| m.is_en_passant()));
            }
        });
    }

    #[test]
    fn fen_roundtrip_during_play(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        playout(&choices, |game| {
            let reparsed = Position::from_fen(&game.to_fen()).unwrap();
            assert_eq!(reparsed.to_fen(), game.to_fen());
            assert_eq!(
                reparsed.zobrist_hash(),
                game.position().zobrist_hash()
            );
        });
    }
}
