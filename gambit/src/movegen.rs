/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{
    is_in_check, is_square_threatened, Board, CastleSide, Offset, Piece, PieceKind, Simulation,
    Square, BISHOP_DIRECTIONS, KING_OFFSETS, KING_START_COL, KNIGHT_OFFSETS, QUEEN_DIRECTIONS,
    ROOK_DIRECTIONS,
};

/// The most destinations any single piece can have: a Queen in the middle of an open board.
pub const MAX_DESTINATIONS: usize = 27;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_DESTINATIONS`] squares.
pub type SquareList = arrayvec::ArrayVec<Square, MAX_DESTINATIONS>;

/// Whether a generator must keep its own King out of danger.
///
/// Only the King's generator is affected. Threat detection asks generators for their
/// destinations in [`SafetyMode::IgnoreKingSafety`], which keeps it from recursing
/// through the King's own safety checks.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SafetyMode {
    /// King steps onto threatened squares are dropped, and castling is considered.
    #[default]
    KingSafetyChecked,

    /// Plain movement patterns. No castling.
    IgnoreKingSafety,
}

/// Generates the pseudo-legal destinations of the piece at `from`.
///
/// The board may be mutated while the King's steps are checked for safety,
/// but is always restored before this returns.
/// If there is no piece at `from`, the list is empty.
///
/// # Example
/// ```
/// # use gambit::*;
/// let mut board = Board::default();
/// let knight = generate(&mut board, Square::G1, SafetyMode::KingSafetyChecked);
/// assert_eq!(knight.as_slice(), &[Square::F3, Square::H3]);
/// ```
pub fn generate(board: &mut Board, from: Square, mode: SafetyMode) -> SquareList {
    let Some(piece) = board.piece_at(from) else {
        return SquareList::new();
    };

    match (piece.kind(), mode) {
        (PieceKind::King, SafetyMode::KingSafetyChecked) => safe_king_moves(board, &piece),
        _ => pseudo_legal_moves(board, &piece),
    }
}

/// Generates the destinations of `piece` from its movement pattern and board occupancy alone.
///
/// This is [`generate`] in [`SafetyMode::IgnoreKingSafety`], for callers that only hold a shared borrow.
pub fn pseudo_legal_moves(board: &Board, piece: &Piece) -> SquareList {
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, piece),
        PieceKind::Knight => step_moves(board, piece, &KNIGHT_OFFSETS),
        PieceKind::Bishop => sliding_moves(board, piece, &BISHOP_DIRECTIONS),
        PieceKind::Rook => sliding_moves(board, piece, &ROOK_DIRECTIONS),
        PieceKind::Queen => sliding_moves(board, piece, &QUEEN_DIRECTIONS),
        PieceKind::King => step_moves(board, piece, &KING_OFFSETS),
    }
}

/// Walks each direction square-by-square, stopping at the edge, before a friendly piece, or on an enemy piece.
fn sliding_moves(board: &Board, piece: &Piece, directions: &[Offset]) -> SquareList {
    let mut moves = SquareList::new();

    for &(d_row, d_col) in directions {
        let mut current = piece.square();

        while let Some(next) = current.offset(d_row, d_col) {
            match board.piece_at(next) {
                None => moves.push(next),
                Some(blocker) => {
                    if blocker.is_enemy_of(piece) {
                        moves.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }

    moves
}

/// Fixed single jumps (Knight, King): any in-bounds square that is empty or enemy-occupied.
fn step_moves(board: &Board, piece: &Piece, offsets: &[Offset]) -> SquareList {
    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| piece.square().offset(d_row, d_col))
        .filter(|&to| {
            board
                .piece_at(to)
                .map_or(true, |occupant| occupant.is_enemy_of(piece))
        })
        .collect()
}

/// Pushes, double pushes from the starting row, diagonal captures and en passant.
fn pawn_moves(board: &Board, pawn: &Piece) -> SquareList {
    let mut moves = SquareList::new();
    let from = pawn.square();
    let owner = pawn.owner();
    let forward = owner.forward();

    // Single push, then a double push if the pawn is still on its starting row
    if let Some(one) = from.offset(forward, 0).filter(|&sq| !board.has(sq)) {
        moves.push(one);

        if from.row() == owner.pawn_row() {
            if let Some(two) = one.offset(forward, 0).filter(|&sq| !board.has(sq)) {
                moves.push(two);
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(target) = from.offset(forward, d_col) else {
            continue;
        };

        match board.piece_at(target) {
            Some(occupant) if occupant.is_enemy_of(pawn) => moves.push(target),
            Some(_) => {}
            None => {
                // En passant: the enemy pawn beside us has only just advanced two squares
                let beside = Square::new_unchecked(from.row(), target.col());
                let capturable = board.piece_at(beside).is_some_and(|other| {
                    other.is_pawn() && other.is_enemy_of(pawn) && other.just_double_pushed()
                });

                if capturable {
                    moves.push(target);
                }
            }
        }
    }

    moves
}

/// Returns the squares a Pawn of `pawn`'s owner at `pawn`'s square threatens: its two forward diagonals.
///
/// Unlike [`pseudo_legal_moves`], these are included whether or not anything stands on them,
/// and straight pushes are never included.
pub fn pawn_attacks(pawn: &Piece) -> SquareList {
    let forward = pawn.owner().forward();
    [-1, 1]
        .into_iter()
        .filter_map(|d_col| pawn.square().offset(forward, d_col))
        .collect()
}

/// King steps that do not walk into a threatened square, plus any available castling.
fn safe_king_moves(board: &mut Board, king: &Piece) -> SquareList {
    let from = king.square();
    let owner = king.owner();

    let mut moves = step_moves(board, king, &KING_OFFSETS);

    // Threats are judged with the King already standing on the destination (and any capture removed),
    // so that a King cannot "hide" behind itself on a line it is attacked along.
    moves.retain(|to| {
        let simulated = Simulation::new(board, from, *to);
        !is_square_threatened(&simulated, *to, owner)
    });

    for to in castling_destinations(board, king) {
        moves.push(to);
    }

    moves
}

/// Generates the destinations of `king` that castle, if any.
///
/// Castling towards a side requires, all at once:
/// - the King has not moved, stands on its starting square, and is not in check,
/// - that side's Rook has not moved and is still on its starting square,
/// - every square strictly between King and Rook is empty,
/// - none of the squares the King stands on, passes through, or lands on is threatened.
pub fn castling_destinations(board: &Board, king: &Piece) -> SquareList {
    let mut destinations = SquareList::new();
    let owner = king.owner();
    let home = Square::new_unchecked(owner.home_row(), KING_START_COL);

    if !king.is_king() || king.has_moved() || king.square() != home || is_in_check(board, owner) {
        return destinations;
    }

    for side in CastleSide::all() {
        if can_castle(board, king, side) {
            destinations.push(side.king_destination(owner));
        }
    }

    destinations
}

fn can_castle(board: &Board, king: &Piece, side: CastleSide) -> bool {
    let owner = king.owner();
    let row = owner.home_row();

    let rook_is_ready = board
        .piece_at(side.rook_origin(owner))
        .is_some_and(|rook| rook.is_rook() && rook.owner() == owner && !rook.has_moved());
    if !rook_is_ready {
        return false;
    }

    let king_col = king.square().col();
    let rook_col = side.rook_origin(owner).col();
    let (low, high) = (king_col.min(rook_col), king_col.max(rook_col));
    if (low + 1..high).any(|col| board.has(Square::new_unchecked(row, col))) {
        return false;
    }

    (0..=2).all(|step| {
        king.square()
            .offset(0, side.direction() * step)
            .is_some_and(|transit| !is_square_threatened(board, transit, owner))
    })
}
