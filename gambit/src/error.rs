/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

use super::{Player, Square};

/// Ways in which a request to the engine can be rejected.
///
/// None of these are fatal: the board is left exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ChessError {
    /// The destination is not among the legal moves of the piece at `from`,
    /// there is no piece at `from`, or it belongs to the side not on move.
    #[error("Illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// Undo was requested before any move was made.
    #[error("No moves to undo")]
    NoMoveToUndo,

    /// The given side has no King on the board.
    #[error("{0} has no king on the board")]
    NoKingFound(Player),
}
