//! Heuristic-accelerated random playouts.
//!
//! A playout fills every free cell, alternating players, and reports who won.
//! Moves mostly come from a shuffled list of the free cells, with one
//! exception: when the previous move intruded into a bridge of the player
//! about to move, that player answers in the other carrier cell.
//!
//! ## Bridge pattern
//!
//! Seen from the intruding move `m`, the pattern for rotation `i` is
//!
//! - the path cell `m + D[i]`, which must be on the board and empty;
//! - the two supports `m + D[i - 1]` and `m + D[i + 1]`, which must both be
//!   held by the mover.
//!
//! `m` and the path cell are the two carriers of the bridge between the
//! supports, so playing the path keeps the supports connected.
//!
//! A support that falls off the board counts as held when it lies directly
//! beyond one of the mover's own edges and the path cell is on that same edge.
//! That is the edge template: a stone one row in from its edge is virtually
//! connected to the edge through two carriers. The same test applies to both
//! players, with `Player::axis` picking the coordinate that matters.

use crate::core::coord::checked;
use crate::core::{Coord, HexRng, Player, DIRECTIONS};

use super::state::BoardState;

impl BoardState {
    /// Fill the board at random and return the winner.
    ///
    /// `preceding` is the move that led to this position, if any; `next` plays
    /// first. On return the board is full, so the result is always `Some` on a
    /// board of at least one cell.
    pub fn random_playout(
        &mut self,
        preceding: Option<Coord>,
        next: Player,
        rng: &mut HexRng,
    ) -> Option<Player> {
        let mut order = self.legal_moves();
        rng.shuffle(&mut order);

        let mut cursor = 0;
        let mut last = preceding;
        let mut mover = next;

        while !self.is_full() {
            let reply = last.and_then(|m| self.bridge_reply(m, mover));
            let mv = match reply {
                Some(path) => path,
                None => {
                    // Cells before the cursor are all taken; some free cell
                    // remains at or after it.
                    while self.get(order[cursor]).is_some() {
                        cursor += 1;
                    }
                    order[cursor]
                }
            };

            self.place(mv, mover);
            last = Some(mv);
            mover = mover.opponent();
        }

        self.winner()
    }

    /// The carrier `mover` should play to save a bridge `last` intruded on.
    #[must_use]
    pub fn bridge_reply(&self, last: Coord, mover: Player) -> Option<Coord> {
        (0..DIRECTIONS.len()).find_map(|i| {
            let path = checked(last.offset(DIRECTIONS[i]), self.size())?;
            if self.get(path).is_some() {
                return None;
            }
            let left = last.offset(DIRECTIONS[(i + 5) % 6]);
            let right = last.offset(DIRECTIONS[(i + 1) % 6]);

            (self.support_held(left, path, mover) && self.support_held(right, path, mover))
                .then_some(path)
        })
    }

    fn support_held(&self, support: (i32, i32), path: Coord, mover: Player) -> bool {
        let size = self.size();
        if let Some(cell) = checked(support, size) {
            return self.get(cell) == Some(mover);
        }

        let n = i32::from(size);
        let (sx, sy) = support;
        let along = mover.axis(sx, sy);
        let across = mover.cross_axis(sx, sy);
        if !(0..n).contains(&across) {
            return false;
        }

        let path_along = mover.axis(i32::from(path.x), i32::from(path.y));
        (along == -1 && path_along == 0) || (along == n && path_along == n - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_bridge_is_saved() {
        // Red bridge (2,1)-(3,2), carriers (3,1) and (2,2).
        let mut board = BoardState::from_rows(&[
            ". . . . .",
            " . . R . .",
            "  . . . R .",
            "   . . . . .",
            "    . . . . .",
        ])
        .unwrap();

        board.play(Coord::new(3, 1), Player::Blue).unwrap();
        assert_eq!(
            board.bridge_reply(Coord::new(3, 1), Player::Red),
            Some(Coord::new(2, 2))
        );

        let mut board2 = BoardState::from_rows(&[
            ". . . . .",
            " . . R . .",
            "  . . . R .",
            "   . . . . .",
            "    . . . . .",
        ])
        .unwrap();
        board2.play(Coord::new(2, 2), Player::Blue).unwrap();
        assert_eq!(
            board2.bridge_reply(Coord::new(2, 2), Player::Red),
            Some(Coord::new(3, 1))
        );
    }

    #[test]
    fn test_no_reply_without_bridge() {
        let mut board = BoardState::new(5).unwrap();
        board.play(Coord::new(2, 2), Player::Blue).unwrap();
        assert_eq!(board.bridge_reply(Coord::new(2, 2), Player::Red), None);
    }

    #[test]
    fn test_no_reply_when_path_taken() {
        let mut board = BoardState::from_rows(&[
            ". . . . .",
            " . . R . .",
            "  . . B R .",
            "   . . . . .",
            "    . . . . .",
        ])
        .unwrap();
        board.play(Coord::new(3, 1), Player::Blue).unwrap();
        assert_eq!(board.bridge_reply(Coord::new(3, 1), Player::Red), None);
    }

    #[test]
    fn test_opponent_stones_are_not_supports() {
        let mut board = BoardState::from_rows(&[
            ". . . . .",
            " . . B . .",
            "  . . . B .",
            "   . . . . .",
            "    . . . . .",
        ])
        .unwrap();
        board.play(Coord::new(3, 1), Player::Red).unwrap();
        assert_eq!(board.bridge_reply(Coord::new(3, 1), Player::Red), None);
    }

    #[test]
    fn test_edge_template_blue() {
        // Blue stone one column in from its left edge; Red takes one carrier.
        let mut board = BoardState::from_rows(&[
            ". . . .",
            " . B . .",
            "  . . . .",
            "   . . . .",
        ])
        .unwrap();
        board.play(Coord::new(0, 2), Player::Red).unwrap();
        assert_eq!(
            board.bridge_reply(Coord::new(0, 2), Player::Blue),
            Some(Coord::new(0, 1))
        );
    }

    #[test]
    fn test_edge_template_red() {
        // Red stone one row above its bottom edge; Blue takes one carrier.
        let mut board = BoardState::from_rows(&[
            ". . . .",
            " . . . .",
            "  . R . .",
            "   . . . .",
        ])
        .unwrap();
        board.play(Coord::new(1, 3), Player::Blue).unwrap();
        assert_eq!(
            board.bridge_reply(Coord::new(1, 3), Player::Red),
            Some(Coord::new(0, 3))
        );
    }

    #[test]
    fn test_edge_template_is_per_player() {
        // The same shape against the wrong edge does not count.
        let mut board = BoardState::from_rows(&[
            ". . . .",
            " . R . .",
            "  . . . .",
            "   . . . .",
        ])
        .unwrap();
        board.play(Coord::new(0, 2), Player::Blue).unwrap();
        assert_eq!(board.bridge_reply(Coord::new(0, 2), Player::Red), None);
    }

    #[test]
    fn test_playout_fills_board_and_has_winner() {
        let mut rng = HexRng::new(9);
        for size in 1..=7 {
            let mut board = BoardState::new(size).unwrap();
            let winner = board.random_playout(None, Player::Red, &mut rng);
            assert!(board.is_full());
            assert!(winner.is_some());
            assert_eq!(winner, board.winner());
        }
    }

    #[test]
    fn test_playout_alternates_players() {
        let mut rng = HexRng::new(3);
        let mut board = BoardState::new(5).unwrap();
        board.random_playout(None, Player::Blue, &mut rng);

        let blue = (0..5u16)
            .flat_map(|x| (0..5u16).map(move |y| Coord::new(x, y)))
            .filter(|&c| board.occupant(c).unwrap() == Some(Player::Blue))
            .count();
        // 25 cells, Blue first.
        assert_eq!(blue, 13);
    }

    #[test]
    fn test_playout_is_deterministic() {
        let mut a = BoardState::new(6).unwrap();
        let mut b = BoardState::new(6).unwrap();
        a.random_playout(None, Player::Red, &mut HexRng::new(77));
        b.random_playout(None, Player::Red, &mut HexRng::new(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_playout_respects_existing_winner() {
        let mut board = BoardState::from_rows(&[
            "R . .",
            " R . .",
            "  R . .",
        ])
        .unwrap();
        let mut rng = HexRng::new(1);
        let winner = board.random_playout(Some(Coord::new(0, 2)), Player::Blue, &mut rng);
        assert_eq!(winner, Some(Player::Red));
    }

    #[test]
    fn test_playout_answers_bridge_intrusion() {
        // Blue just took carrier (3,1) of the Red bridge (2,1)-(3,2).
        for seed in 0..200 {
            let mut board = BoardState::from_rows(&[
                ". . . . .",
                " . . R B .",
                "  . . . R .",
                "   . . . . .",
                "    . . . . .",
            ])
            .unwrap();
            let mut rng = HexRng::new(seed);
            board.random_playout(Some(Coord::new(3, 1)), Player::Red, &mut rng);
            assert_eq!(
                board.occupant(Coord::new(2, 2)).unwrap(),
                Some(Player::Red),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn test_playout_without_preceding_move_ignores_bridges() {
        // The same position with no known last move plays the carrier only by chance.
        let taken_by_blue = (0..200)
            .filter(|&seed| {
                let mut board = BoardState::from_rows(&[
                    ". . . . .",
                    " . . R B .",
                    "  . . . R .",
                    "   . . . . .",
                    "    . . . . .",
                ])
                .unwrap();
                board.random_playout(None, Player::Red, &mut HexRng::new(seed));
                board.occupant(Coord::new(2, 2)).unwrap() == Some(Player::Blue)
            })
            .count();
        assert!(taken_by_blue > 0);
    }
}
