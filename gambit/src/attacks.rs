/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{pawn_attacks, pseudo_legal_moves, Board, ChessError, Piece, Player, Square, SquareList};

/// Fetch the squares `piece` threatens.
///
/// Note: For Pawns, this retrieves only the Pawn's _attacks_, not their pushes.
/// If Pawn pushes were included, the King would not be able to step in front of an enemy Pawn,
/// as the detector would think that a Pawn's threat of pushing could check the King.
/// Every other piece threatens exactly its pseudo-legal destinations, ignoring King safety.
#[inline(always)]
pub fn attacks_for(board: &Board, piece: &Piece) -> SquareList {
    if piece.is_pawn() {
        pawn_attacks(piece)
    } else {
        pseudo_legal_moves(board, piece)
    }
}

/// Returns `true` if any piece of `defender`'s opponent threatens `square`.
///
/// # Example
/// ```
/// # use gambit::*;
/// let board = Board::default();
/// // Black's pawns cover the sixth rank
/// assert!(is_square_threatened(&board, Square::D6, Player::White));
/// assert!(!is_square_threatened(&board, Square::D5, Player::White));
/// ```
pub fn is_square_threatened(board: &Board, square: Square, defender: Player) -> bool {
    board
        .pieces_of(defender.opponent())
        .any(|attacker| attacks_for(board, &attacker).contains(&square))
}

/// Iterates over every piece of `defender`'s opponent that threatens `square`.
pub fn attackers_of(
    board: &Board,
    square: Square,
    defender: Player,
) -> impl Iterator<Item = Piece> + '_ {
    board
        .pieces_of(defender.opponent())
        .filter(move |attacker| attacks_for(board, attacker).contains(&square))
}

/// Locates `player`'s King.
#[inline(always)]
pub fn king_square(board: &Board, player: Player) -> Result<Square, ChessError> {
    board
        .find_king(player)
        .ok_or(ChessError::NoKingFound(player))
}

/// Returns `true` if `player`'s King is threatened.
///
/// A side without a King is never in check.
pub fn is_in_check(board: &Board, player: Player) -> bool {
    match king_square(board, player) {
        Ok(square) => is_square_threatened(board, square, player),
        Err(_) => false,
    }
}
