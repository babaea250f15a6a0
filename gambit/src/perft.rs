/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Always, AutoQueen, Game, Promotion, Square};

/// Returns `true` if moving the piece at `from` to `to` would promote it.
fn promotes(game: &Game, from: Square, to: Square) -> bool {
    game.piece_at(from)
        .is_some_and(|piece| piece.is_pawn() && to.row() == piece.owner().promotion_row())
}

/// Every move available to the side to move, with each promotion choice listed separately.
fn expanded_moves(game: &Game) -> Vec<(Square, Square, Option<Promotion>)> {
    let mut moves = Vec::with_capacity(64);

    for (from, to) in game.all_legal_moves() {
        if promotes(game, from, to) {
            moves.extend(
                Promotion::all()
                    .into_iter()
                    .map(|promotion| (from, to, Some(promotion))),
            );
        } else {
            moves.push((from, to, None));
        }
    }

    moves
}

/// Plays `from -> to` (with the given promotion) on `game`, recurses, and takes it back.
fn perft_after(
    game: &mut Game,
    from: Square,
    to: Square,
    promotion: Option<Promotion>,
    depth: usize,
) -> u64 {
    let applied = match promotion {
        Some(promotion) => game.apply_move(from, to, &mut Always(promotion)),
        None => game.apply_move(from, to, &mut AutoQueen),
    };

    // Generated moves are always legal, so a rejection here is a bug in move generation
    debug_assert!(applied.is_ok(), "generated move {from}{to} was rejected: {applied:?}");
    if applied.is_err() {
        return 0;
    }

    let nodes = perft(game, depth);
    let undone = game.undo_last_move();
    debug_assert!(undone.is_ok(), "could not take back {from}{to}: {undone:?}");
    nodes
}

/// Counts the move paths of length `depth` available from the current position.
///
/// Every move is made and taken back through [`Game::apply_move`] and [`Game::undo_last_move`],
/// so this exercises the executor as well as move generation. Each promotion choice counts as its own move.
///
/// # Example
/// ```
/// # use gambit::*;
/// let mut game = Game::default();
/// assert_eq!(perft(&mut game, 2), 400);
/// assert_eq!(game, Game::default());
/// ```
pub fn perft(game: &mut Game, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = expanded_moves(game);

    // Bulk counting
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|(from, to, promotion)| perft_after(game, from, to, promotion, depth - 1))
        .sum()
}

/// Like [`perft`], but reports the count below each root move separately.
///
/// Moves are given in coordinate form (`e2e4`, `e7e8q`), in generation order.
pub fn splitperft(game: &mut Game, depth: usize) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    expanded_moves(game)
        .into_iter()
        .map(|(from, to, promotion)| {
            let mut uci = format!("{from}{to}");
            if let Some(promotion) = promotion {
                uci.push(promotion.char().to_ascii_lowercase());
            }

            let nodes = perft_after(game, from, to, promotion, depth - 1);
            (uci, nodes)
        })
        .collect()
}
