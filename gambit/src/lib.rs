/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

pub use gambit_types::*;

/// Threat detection: which squares a side's pieces attack, and whether a King is in check.
mod attacks;
/// The ways a request to the engine can fail.
mod error;
/// A game in progress: turns, applying and undoing moves, and checkmate/stalemate detection.
mod game;
/// Filtering pseudo-legal moves down to those that keep the mover's King safe.
mod legality;
/// Pseudo-legal move generation for every kind of piece, including castling.
mod movegen;
/// Records of moves that were made, and their notation.
mod moves;
/// Utility functions for verifying move generation by counting move paths.
mod perft;
/// Pieces and the board they stand on.
mod position;

pub use attacks::*;
pub use error::*;
pub use game::*;
pub use legality::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use position::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::attacks::*;
    pub use crate::error::*;
    pub use crate::game::*;
    pub use crate::legality::*;
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::perft::*;
    pub use crate::position::*;
    pub use gambit_types::*;
}
