//! Board model integration tests: win detection, bookkeeping, playouts.

use hex_mcts::board::BoardState;
use hex_mcts::core::{Coord, HexError, HexRng, Player};
use proptest::prelude::*;

fn all_cells(size: u16) -> Vec<Coord> {
    (0..size).flat_map(|x| (0..size).map(move |y| Coord::new(x, y))).collect()
}

// =============================================================================
// Win Detection
// =============================================================================

#[test]
fn test_existing_chain_wins_immediately() {
    let board = BoardState::from_rows(&[
        ". . R . .",
        " . . R . .",
        "  . R . . .",
        "   . R B B .",
        "    . R . . B",
    ])
    .unwrap();

    assert_eq!(board.winner(), Some(Player::Red));
    assert!(!board.is_full());
}

#[test]
fn test_blocked_chain_does_not_win() {
    let board = BoardState::from_rows(&[
        ". . R . .",
        " . . R . .",
        "  . B . . .",
        "   . R . . .",
        "    . R . . .",
    ])
    .unwrap();

    assert_eq!(board.winner(), None);
}

#[test]
fn test_empty_board_has_no_winner() {
    for size in 1..=9 {
        assert_eq!(BoardState::new(size).unwrap().winner(), None);
    }
}

#[test]
fn test_full_row_wins_for_blue_only() {
    // A full row links left to right; it cannot link top to bottom.
    let mut board = BoardState::new(5).unwrap();
    for x in 0..5 {
        board.play(Coord::new(x, 2), Player::Blue).unwrap();
    }
    assert_eq!(board.winner(), Some(Player::Blue));
}

// =============================================================================
// Bookkeeping
// =============================================================================

#[test]
fn test_out_of_range_reads_fail() {
    let board = BoardState::new(3).unwrap();
    assert!(matches!(
        board.is_empty(Coord::new(3, 3)),
        Err(HexError::OutOfRange { .. })
    ));
    assert!(matches!(
        board.occupant(Coord::new(0, 7)),
        Err(HexError::OutOfRange { .. })
    ));
}

#[test]
fn test_legal_moves_track_play() {
    let mut board = BoardState::new(3).unwrap();
    board.play(Coord::new(0, 0), Player::Red).unwrap();
    board.play(Coord::new(2, 1), Player::Blue).unwrap();

    let moves = board.legal_moves();
    assert_eq!(moves.len(), 7);
    assert!(!moves.contains(&Coord::new(0, 0)));
    assert!(!moves.contains(&Coord::new(2, 1)));
    assert!(moves.windows(2).all(|w| w[0] < w[1]));
}

// =============================================================================
// Playouts
// =============================================================================

#[test]
fn test_playout_leaves_original_untouched() {
    let board = BoardState::new(6).unwrap();
    let mut sim = board.clone();
    let mut rng = HexRng::new(11);

    let winner = sim.random_playout(None, Player::Red, &mut rng);

    assert!(winner.is_some());
    assert!(sim.is_full());
    assert_eq!(board.free_count(), 36);
}

#[test]
fn test_playout_from_midgame() {
    let mut board = BoardState::from_rows(&[
        ". . . .",
        " . B . .",
        "  . R . .",
        "   . . . .",
    ])
    .unwrap();
    let mut rng = HexRng::new(2);

    let winner = board.random_playout(Some(Coord::new(1, 2)), Player::Blue, &mut rng);

    assert!(winner.is_some());
    assert_eq!(
        board.occupant(Coord::new(1, 1)).unwrap(),
        Some(Player::Blue)
    );
    assert_eq!(board.occupant(Coord::new(1, 2)).unwrap(), Some(Player::Red));
}

#[test]
fn test_playout_keeps_edge_template() {
    // Blue (1,1) is one column from its edge; Red just took carrier (0,2).
    for seed in 0..100 {
        let mut board = BoardState::from_rows(&[
            ". . . .",
            " . B . .",
            "  R . . .",
            "   . . . .",
        ])
        .unwrap();
        board.random_playout(Some(Coord::new(0, 2)), Player::Blue, &mut HexRng::new(seed));
        assert_eq!(
            board.occupant(Coord::new(0, 1)).unwrap(),
            Some(Player::Blue)
        );
    }
}

#[test]
fn test_playouts_vary_with_seed() {
    let results: Vec<BoardState> = (0..8)
        .map(|seed| {
            let mut board = BoardState::new(5).unwrap();
            board.random_playout(None, Player::Red, &mut HexRng::new(seed));
            board
        })
        .collect();
    assert!(results.iter().any(|b| *b != results[0]));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_full_board_has_exactly_one_winner(size in 1u16..=9, seed in any::<u64>()) {
        let mut cells = all_cells(size);
        HexRng::new(seed).shuffle(&mut cells);

        let mut board = BoardState::new(size).unwrap();
        let mut player = Player::Red;
        for cell in cells {
            board.play(cell, player).unwrap();
            player = player.opponent();
        }

        prop_assert!(board.is_full());
        let winner = board.winner();
        prop_assert!(winner.is_some());

        // The loser cannot also be connected: swap colours and check again.
        let loser = winner.unwrap().opponent();
        let mut only_loser = BoardState::new(size).unwrap();
        for cell in all_cells(size) {
            if board.occupant(cell).unwrap() == Some(loser) {
                only_loser.play(cell, loser).unwrap();
            }
        }
        prop_assert_eq!(only_loser.winner(), None);
    }

    #[test]
    fn prop_free_plus_occupied_is_constant(
        size in 1u16..=8,
        seed in any::<u64>(),
        count in 0usize..64
    ) {
        let mut cells = all_cells(size);
        HexRng::new(seed).shuffle(&mut cells);

        let mut board = BoardState::new(size).unwrap();
        let total = usize::from(size) * usize::from(size);
        let mut player = Player::Blue;
        for cell in cells.into_iter().take(count) {
            board.play(cell, player).unwrap();
            player = player.opponent();
            prop_assert_eq!(board.free_count() + board.stone_count(), total);
            prop_assert!(!board.legal_moves().contains(&cell));
            prop_assert_eq!(board.is_empty(cell).unwrap(), false);
        }
    }

    #[test]
    fn prop_playout_always_decides(size in 1u16..=8, seed in any::<u64>(), prefill in 0usize..20) {
        let mut rng = HexRng::new(seed);
        let mut cells = all_cells(size);
        rng.shuffle(&mut cells);

        let mut board = BoardState::new(size).unwrap();
        let mut player = Player::Red;
        let mut last = None;
        for cell in cells.into_iter().take(prefill) {
            board.play(cell, player).unwrap();
            last = Some(cell);
            player = player.opponent();
        }

        let winner = board.random_playout(last, player, &mut rng);
        prop_assert!(board.is_full());
        prop_assert!(winner.is_some());
        prop_assert_eq!(winner, board.winner());
    }
}
