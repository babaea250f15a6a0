/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::ops::Deref;

use arrayvec::ArrayVec;

use super::{generate, is_in_check, Board, Piece, Player, SafetyMode, Square, SquareList};

/// A move played out on a [`Board`] for as long as this value lives.
///
/// Creating a [`Simulation`] snapshots every square the move touches (origin, destination,
/// and the captured Pawn's square for en passant), then moves the piece, including its stored square.
/// Dropping it writes the snapshots back, so the board is restored on every exit path.
///
/// The board can be read through [`Deref`] while the simulation is active.
///
/// # Example
/// ```
/// # use gambit::*;
/// let mut board = Board::default();
/// let before = board;
/// {
///     let simulated = Simulation::new(&mut board, Square::E2, Square::E4);
///     assert!(simulated.has(Square::E4));
///     assert!(!simulated.has(Square::E2));
/// }
/// assert_eq!(board, before);
/// ```
pub struct Simulation<'a> {
    board: &'a mut Board,

    /// Squares touched by the move, with their contents before the move.
    saved: ArrayVec<(Square, Option<Piece>), 3>,
}

impl<'a> Simulation<'a> {
    /// Plays the piece at `from` onto `to`, displacing anything there.
    ///
    /// If there is no piece at `from`, nothing changes.
    pub fn new(board: &'a mut Board, from: Square, to: Square) -> Self {
        let mut saved = ArrayVec::new();
        saved.push((from, board.piece_at(from)));
        saved.push((to, board.piece_at(to)));

        let mut simulation = Self { board, saved };
        let Some(mut piece) = simulation.board.take(from) else {
            return simulation;
        };

        // En passant: a Pawn moving diagonally onto an empty square, beside an enemy Pawn that just advanced two squares
        if piece.is_pawn() && from.col() != to.col() && !simulation.board.has(to) {
            let victim = Square::new_unchecked(from.row(), to.col());
            let capturable = simulation.board.piece_at(victim).is_some_and(|other| {
                other.is_pawn() && other.is_enemy_of(&piece) && other.just_double_pushed()
            });

            if capturable {
                let captured = simulation.board.take(victim);
                simulation.saved.push((victim, captured));
            }
        }

        piece.relocate(to);
        simulation.board.put(piece);

        simulation
    }
}

impl Deref for Simulation<'_> {
    type Target = Board;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        while let Some((square, contents)) = self.saved.pop() {
            self.board[square] = contents;
        }
    }
}

/// Returns `true` if moving the piece at `from` to `to` does not leave its owner's King in check.
///
/// This does not check that `to` is a pseudo-legal destination; see [`legal_moves`].
/// The board is unchanged when this returns.
pub fn is_move_legal(board: &mut Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };

    let simulated = Simulation::new(board, from, to);
    !is_in_check(&simulated, piece.owner())
}

/// Generates the legal destinations of the piece at `from`: its pseudo-legal moves,
/// filtered to those that keep its own King safe.
///
/// # Example
/// ```
/// # use gambit::*;
/// let mut board = Board::default();
/// let moves = legal_moves(&mut board, Square::E2);
/// assert_eq!(moves.as_slice(), &[Square::E3, Square::E4]);
/// ```
pub fn legal_moves(board: &mut Board, from: Square) -> SquareList {
    let mut moves = generate(board, from, SafetyMode::KingSafetyChecked);
    moves.retain(|to| is_move_legal(board, from, *to));
    moves
}

/// Returns `true` if any piece of `player` has at least one legal move.
///
/// Stops at the first legal move found.
pub fn has_legal_move(board: &mut Board, player: Player) -> bool {
    let origins: ArrayVec<Square, { Square::COUNT }> =
        board.pieces_of(player).map(|piece| piece.square()).collect();

    origins
        .into_iter()
        .any(|from| !legal_moves(board, from).is_empty())
}
