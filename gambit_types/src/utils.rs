/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::PieceKind;

/// Number of rows (and columns) on a chessboard.
pub const BOARD_SIZE: usize = 8;

/// A `(d_row, d_col)` step on the board.
pub type Offset = (i8, i8);

/// Orthogonal directions a Rook slides along: up, down, left, right.
pub const ROOK_DIRECTIONS: [Offset; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal directions a Bishop slides along.
pub const BISHOP_DIRECTIONS: [Offset; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// All eight directions, used by both the Queen (sliding) and the King (stepping).
pub const QUEEN_DIRECTIONS: [Offset; 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// The eight adjacent squares a King can step to.
pub const KING_OFFSETS: [Offset; 8] = QUEEN_DIRECTIONS;

/// The eight `(±1, ±2)` / `(±2, ±1)` jumps of a Knight.
pub const KNIGHT_OFFSETS: [Offset; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Back-rank layout of the standard starting position, from the a-file to the h-file.
pub const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Column of both Kings in the starting position.
pub const KING_START_COL: u8 = 4;
