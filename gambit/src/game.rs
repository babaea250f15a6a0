/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt::{self, Write},
    ops::Deref,
};

use anyhow::{bail, Result};

use super::{
    is_in_check, legality, Board, CastleSide, ChessError, MoveRecord, Player, Promotion, Square,
    SquareList,
};

/// Supplies the piece a Pawn becomes when it reaches the far row.
///
/// Returning `None` declines the choice, and the Pawn becomes a Queen.
///
/// Any `FnMut(Player, Square) -> Option<Promotion>` closure is a [`PromotionChooser`].
pub trait PromotionChooser {
    /// Picks the promotion for `player`'s Pawn that has just landed on `square`.
    fn choose(&mut self, player: Player, square: Square) -> Option<Promotion>;
}

impl<F> PromotionChooser for F
where
    F: FnMut(Player, Square) -> Option<Promotion>,
{
    #[inline(always)]
    fn choose(&mut self, player: Player, square: Square) -> Option<Promotion> {
        self(player, square)
    }
}

/// Always promotes to a Queen.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AutoQueen;

impl PromotionChooser for AutoQueen {
    #[inline(always)]
    fn choose(&mut self, _player: Player, _square: Square) -> Option<Promotion> {
        Some(Promotion::Queen)
    }
}

/// Always promotes to the wrapped [`Promotion`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Always(pub Promotion);

impl PromotionChooser for Always {
    #[inline(always)]
    fn choose(&mut self, _player: Player, _square: Square) -> Option<Promotion> {
        Some(self.0)
    }
}

/// The state of play for the side to move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameStatus {
    /// The side to move has a legal move and is not in check.
    InProgress,

    /// The side to move is in check, but can get out of it.
    Check,

    /// The side to move is in check with no legal moves.
    Checkmate { winner: Player },

    /// The side to move is not in check, but has no legal moves.
    Stalemate,
}

impl GameStatus {
    /// Returns `true` if no further moves can be made.
    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        matches!(self, Self::Checkmate { .. } | Self::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "In progress"),
            Self::Check => write!(f, "Check"),
            Self::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            Self::Stalemate => write!(f, "Stalemate"),
        }
    }
}

/// A game of chess in progress: the board, whose turn it is, and every move made so far.
///
/// All moves go through [`Game::apply_move`] (or one of its shorthands), which accepts only legal moves,
/// and can be taken back one at a time with [`Game::undo_last_move`].
///
/// Queries take `&self`: they work on a scratch copy of the board, so the game itself is never touched.
///
/// # Example
/// ```
/// # use gambit::*;
/// let mut game = Game::default();
/// game.make_move_uci("f2f3").unwrap();
/// game.make_move_uci("e7e5").unwrap();
/// game.make_move_uci("g2g4").unwrap();
/// game.make_move_uci("d8h4").unwrap();
///
/// assert!(game.is_checkmate(Player::White));
/// assert_eq!(game.status(), GameStatus::Checkmate { winner: Player::Black });
/// assert_eq!(game.notation(), "1. f3 e5 2. g4 Qh4+");
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Player,

    /// Every move made, oldest first.
    history: Vec<MoveRecord>,
}

impl Game {
    /// Starts a new game from the standard position, White to move.
    #[inline(always)]
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Player::White)
    }

    /// Starts a game from any arrangement of pieces.
    ///
    /// Pieces keep whatever "has moved" and "just moved two squares" flags they carry.
    #[inline(always)]
    pub fn from_board(board: Board, side_to_move: Player) -> Self {
        Self {
            board,
            side_to_move,
            history: Vec::with_capacity(128),
        }
    }

    /// Puts every piece back where it started, White to move, with no history.
    #[inline(always)]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Every move made so far, oldest first.
    #[inline(always)]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline(always)]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// The legal destinations of the piece at `from`, whichever side owns it.
    ///
    /// Empty if `from` is empty.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let game = Game::default();
    /// assert_eq!(game.legal_moves(Square::B1).as_slice(), &[Square::A3, Square::C3]);
    /// assert!(game.legal_moves(Square::E4).is_empty());
    /// ```
    pub fn legal_moves(&self, from: Square) -> SquareList {
        let mut scratch = self.board;
        legality::legal_moves(&mut scratch, from)
    }

    /// Every legal `(from, to)` pair for the side to move.
    pub fn all_legal_moves(&self) -> Vec<(Square, Square)> {
        let mut scratch = self.board;
        let origins: Vec<Square> = self
            .board
            .pieces_of(self.side_to_move)
            .map(|piece| piece.square())
            .collect();

        origins
            .into_iter()
            .flat_map(|from| {
                legality::legal_moves(&mut scratch, from)
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect()
    }

    /// Returns `true` if `player` has at least one legal move.
    pub fn has_legal_move(&self, player: Player) -> bool {
        let mut scratch = self.board;
        legality::has_legal_move(&mut scratch, player)
    }

    /// Returns `true` if `player`'s King is threatened.
    ///
    /// A side without a King is never in check.
    #[inline(always)]
    pub fn is_in_check(&self, player: Player) -> bool {
        is_in_check(&self.board, player)
    }

    /// Returns `true` if `player` is in check and has no legal move.
    pub fn is_checkmate(&self, player: Player) -> bool {
        self.is_in_check(player) && !self.has_legal_move(player)
    }

    /// Returns `true` if `player` is not in check but has no legal move.
    pub fn is_stalemate(&self, player: Player) -> bool {
        !self.is_in_check(player) && !self.has_legal_move(player)
    }

    /// Evaluates the position for the side to move.
    pub fn status(&self) -> GameStatus {
        let player = self.side_to_move;
        match (self.is_in_check(player), self.has_legal_move(player)) {
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate {
                winner: player.opponent(),
            },
            (false, true) => GameStatus::InProgress,
            (false, false) => GameStatus::Stalemate,
        }
    }

    /// Moves the piece at `from` to `to`, if that is legal for the side to move.
    ///
    /// Handles captures, en passant, castling (the Rook moves too) and promotion, asking `chooser`
    /// for the promoted piece. On success the turn passes to the opponent and the move is recorded.
    /// On failure nothing changes.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        chooser: &mut impl PromotionChooser,
    ) -> Result<MoveRecord, ChessError> {
        let illegal = ChessError::IllegalMove { from, to };

        let piece = self.board.piece_at(from).ok_or(illegal)?;
        if piece.owner() != self.side_to_move || !self.legal_moves(from).contains(&to) {
            return Err(illegal);
        }
        let owner = piece.owner();

        // Flags must be cleared before this move is examined, or a stale double push could be captured
        let cleared_double_push = self.board.clear_double_pushes();
        let mut moving = self.board.take(from).ok_or(illegal)?;

        let en_passant = moving.is_pawn() && from.col() != to.col() && !self.board.has(to);
        let captured = if en_passant {
            self.board.take(Square::new_unchecked(from.row(), to.col()))
        } else {
            self.board.take(to)
        };

        if moving.is_pawn() && from.distance_rows(to) == 2 {
            moving.set_just_double_pushed(true);
        }

        let castle = if moving.is_king() {
            CastleSide::from_king_move(from, to)
        } else {
            None
        };
        let rook = castle.and_then(|side| {
            let rook = self.board.take(side.rook_origin(owner))?;
            let mut castled = rook;
            castled.relocate(side.rook_destination(owner));
            castled.mark_moved();
            self.board.put(castled);
            Some(rook)
        });

        moving.relocate(to);
        moving.mark_moved();

        let promotion = (moving.is_pawn() && to.row() == owner.promotion_row())
            .then(|| chooser.choose(owner, to).unwrap_or_default());
        if let Some(promotion) = promotion {
            moving = moving.promoted(promotion);
        }

        self.board.put(moving);
        self.side_to_move = owner.opponent();

        let record = MoveRecord {
            piece,
            from,
            to,
            captured,
            castle,
            rook,
            en_passant,
            promotion,
            cleared_double_push,
            gives_check: is_in_check(&self.board, self.side_to_move),
        };
        self.history.push(record);

        Ok(record)
    }

    /// Shorthand for [`Game::apply_move`] that promotes to a Queen.
    #[inline(always)]
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, ChessError> {
        self.apply_move(from, to, &mut AutoQueen)
    }

    /// Applies a move written in coordinate form, such as `e2e4` or `e7e8n`.
    ///
    /// The optional fifth letter picks the promotion (Queen if omitted), and is only accepted
    /// on a Pawn move to the far row.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let mut game = Game::default();
    /// let record = game.make_move_uci("e2e4").unwrap();
    /// assert_eq!(record.to(), Square::E4);
    /// assert!(game.make_move_uci("e2e4").is_err());
    /// assert!(game.make_move_uci("e7").is_err());
    /// ```
    pub fn make_move_uci(&mut self, uci: &str) -> Result<MoveRecord> {
        let uci = uci.trim();
        if !uci.is_ascii() || !(4..=5).contains(&uci.len()) {
            bail!("Invalid move {uci:?}: expected a form like e2e4 or e7e8q");
        }

        let from = Square::from_uci(&uci[0..2])?;
        let to = Square::from_uci(&uci[2..4])?;
        let promotion = uci[4..].parse::<Promotion>().ok();

        if uci.len() == 5 {
            let Some(promotion) = promotion else {
                bail!("Invalid move {uci:?}: unknown promotion {:?}", &uci[4..]);
            };
            let promotes = self
                .board
                .piece_at(from)
                .is_some_and(|piece| piece.is_pawn() && to.row() == piece.owner().promotion_row());
            if !promotes {
                bail!("Invalid move {uci:?}: only a Pawn reaching the far row can promote");
            }

            return Ok(self.apply_move(from, to, &mut Always(promotion))?);
        }

        Ok(self.make_move(from, to)?)
    }

    /// Takes back the most recent move, restoring the board exactly as it was before it.
    ///
    /// Returns the record of the move taken back.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let mut game = Game::default();
    /// assert_eq!(game.undo_last_move(), Err(ChessError::NoMoveToUndo));
    ///
    /// game.make_move(Square::E2, Square::E4).unwrap();
    /// game.undo_last_move().unwrap();
    /// assert_eq!(game, Game::default());
    /// ```
    pub fn undo_last_move(&mut self) -> Result<MoveRecord, ChessError> {
        let record = self.history.pop().ok_or(ChessError::NoMoveToUndo)?;

        // The pre-move copy also turns a promoted piece back into its Pawn
        self.board.clear(record.to);
        self.board.put(record.piece);

        if let Some(captured) = record.captured {
            self.board.put(captured);
        }

        if let (Some(side), Some(rook)) = (record.castle, record.rook) {
            self.board.clear(side.rook_destination(rook.owner()));
            self.board.put(rook);
        }

        // After the captured piece is back, since an en passant victim carries the flag
        if let Some(square) = record.cleared_double_push {
            if let Some(pawn) = self.board.piece_at_mut(square) {
                pawn.set_just_double_pushed(true);
            }
        }

        self.side_to_move = record.player();

        Ok(record)
    }

    /// The notation of every move `player` has made, in order.
    pub fn move_log(&self, player: Player) -> impl Iterator<Item = String> + '_ {
        self.history
            .iter()
            .filter(move |record| record.player() == player)
            .map(MoveRecord::notation)
    }

    /// The whole game so far as numbered move text, such as `1. e4 e5 2. Nf3`.
    ///
    /// If Black made the first recorded move, numbering starts with `1...`.
    pub fn notation(&self) -> String {
        let mut text = String::new();
        let mut number = 0;

        for (i, record) in self.history.iter().enumerate() {
            let sep = if i == 0 { "" } else { " " };
            match record.player() {
                Player::White => {
                    number += 1;
                    _ = write!(text, "{sep}{number}. {record}");
                }
                Player::Black if i == 0 => {
                    number += 1;
                    _ = write!(text, "{number}... {record}");
                }
                Player::Black => _ = write!(text, " {record}"),
            }
        }

        text
    }
}

impl Deref for Game {
    type Target = Board;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.board
    }
}

impl Default for Game {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "{} to move: {}", self.side_to_move, self.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, PieceKind};

    fn play(game: &mut Game, moves: &str) {
        for mv in moves.split_ascii_whitespace() {
            game.make_move_uci(mv)
                .unwrap_or_else(|e| panic!("{mv} failed: {e}\n{game}"));
        }
    }

    /// Applies then undoes `uci`, asserting the game is exactly as it was.
    fn assert_undo_restores(game: &mut Game, uci: &str) -> MoveRecord {
        let before = game.clone();
        let record = game.make_move_uci(uci).unwrap();
        assert_ne!(*game, before);
        let undone = game.undo_last_move().unwrap();
        assert_eq!(undone, record);
        assert_eq!(*game, before, "undo of {uci} did not restore the game");
        record
    }

    #[test]
    fn test_starting_position() {
        let game = Game::default();
        for player in Player::all() {
            assert!(!game.is_in_check(player));
            assert!(!game.is_checkmate(player));
            assert!(!game.is_stalemate(player));
        }

        assert_eq!(game.all_legal_moves().len(), 20);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_fools_mate() {
        let mut game = Game::default();
        play(&mut game, "f2f3 e7e5 g2g4 d8h4");

        assert!(game.is_in_check(Player::White));
        assert!(game.is_checkmate(Player::White));
        assert!(!game.is_stalemate(Player::White));
        for piece in game.pieces_of(Player::White) {
            assert!(game.legal_moves(piece.square()).is_empty());
        }
        assert!(game.status().is_over());
        assert_eq!(game.last_move().map(MoveRecord::notation).unwrap(), "Qh4+");
    }

    #[test]
    fn test_turns_are_enforced() {
        let mut game = Game::default();
        assert_eq!(
            game.make_move(Square::E7, Square::E5),
            Err(ChessError::IllegalMove {
                from: Square::E7,
                to: Square::E5
            })
        );
        assert!(game.make_move(Square::E2, Square::E5).is_err());
        assert!(game.make_move(Square::E3, Square::E4).is_err());
        assert_eq!(game, Game::default());

        game.make_move(Square::E2, Square::E4).unwrap();
        assert_eq!(game.side_to_move(), Player::Black);
        assert!(game.make_move(Square::D2, Square::D4).is_err());
    }

    #[test]
    fn test_en_passant_only_immediately() {
        let mut game = Game::default();
        play(&mut game, "e2e4 a7a6 e4e5 d7d5");

        assert!(game.legal_moves(Square::E5).contains(&Square::D6));

        // Play elsewhere instead, and the chance is gone
        let mut later = game.clone();
        play(&mut later, "h2h3 a6a5");
        assert!(!later.legal_moves(Square::E5).contains(&Square::D6));
        assert!(!later.piece_at(Square::D5).unwrap().just_double_pushed());

        let record = game.make_move(Square::E5, Square::D6).unwrap();
        assert!(record.is_en_passant());
        assert_eq!(record.captured().unwrap().square(), Square::D5);
        assert!(!game.has(Square::D5));
        assert_eq!(record.notation(), "exd6 e.p.");
    }

    #[test]
    fn test_undo_en_passant() {
        let mut game = Game::default();
        play(&mut game, "e2e4 a7a6 e4e5 d7d5");
        let record = assert_undo_restores(&mut game, "e5d6");
        assert!(record.is_en_passant());

        // The victim can still be captured after the undo
        assert!(game.piece_at(Square::D5).unwrap().just_double_pushed());
        assert!(game.legal_moves(Square::E5).contains(&Square::D6));
    }

    #[test]
    fn test_castling_moves_rook() {
        let mut game = Game::default();
        play(&mut game, "e2e4 e7e5 g1f3 b8c6 f1c4 g8f6");

        let record = game.make_move(Square::E1, Square::G1).unwrap();
        assert_eq!(record.castle(), Some(CastleSide::Kingside));
        assert_eq!(record.notation(), "O-O");

        let rook = game.piece_at(Square::F1).unwrap();
        assert_eq!(rook.kind(), PieceKind::Rook);
        assert!(rook.has_moved());
        assert!(!game.has(Square::H1));
        assert_eq!(game.kind_at(Square::G1), Some(PieceKind::King));
    }

    #[test]
    fn test_undo_castling() {
        let mut game = Game::default();
        play(&mut game, "d2d4 d7d5 b1c3 b8c6 c1f4 c8f5 d1d2 d8d7");
        assert_undo_restores(&mut game, "e1c1");

        let record = game.make_move(Square::E1, Square::C1).unwrap();
        assert_eq!(record.notation(), "O-O-O");
        assert_eq!(game.kind_at(Square::D1), Some(PieceKind::Rook));
        assert!(game.make_move(Square::E8, Square::C8).is_ok());
    }

    fn promotion_game() -> Game {
        let mut board = Board::new();
        board.place(Player::White, PieceKind::King, Square::E1);
        board.place(Player::White, PieceKind::Pawn, Square::B7);
        board.place(Player::Black, PieceKind::King, Square::H8);
        board.place(Player::Black, PieceKind::Rook, Square::A8);
        Game::from_board(board, Player::White)
    }

    #[test]
    fn test_promotion_choices() {
        let mut game = promotion_game();
        let record = game
            .apply_move(Square::B7, Square::A8, &mut |player: Player, square: Square| {
                assert_eq!(player, Player::White);
                assert_eq!(square, Square::A8);
                Some(Promotion::Knight)
            })
            .unwrap();

        assert_eq!(record.notation(), "bxa8=N");
        let knight = game.piece_at(Square::A8).unwrap();
        assert_eq!(knight.kind(), PieceKind::Knight);
        assert!(knight.has_moved());

        // Declining the choice gives a Queen, which checks along the back row
        let mut game = promotion_game();
        let record = game
            .apply_move(Square::B7, Square::B8, &mut |_: Player, _: Square| -> Option<Promotion> { None })
            .unwrap();
        assert_eq!(record.promotion(), Some(Promotion::Queen));
        assert_eq!(record.notation(), "b8=Q+");
    }

    #[test]
    fn test_undo_promotion() {
        let mut game = promotion_game();
        assert_undo_restores(&mut game, "b7a8r");
        assert_undo_restores(&mut game, "b7b8");
        assert_eq!(game.kind_at(Square::B7), Some(PieceKind::Pawn));
    }

    #[test]
    fn test_uci_promotion_letter_needs_promotion() {
        let mut game = Game::default();
        assert!(game.make_move_uci("e2e4q").is_err());
        assert!(game.make_move_uci("e2e4x").is_err());
        assert_eq!(game, Game::default());
    }

    #[test]
    fn test_stalemate() {
        let mut board = Board::new();
        board.place(Player::Black, PieceKind::King, Square::A8);
        board.place(Player::White, PieceKind::King, Square::C7);
        board.place(Player::White, PieceKind::Queen, Square::B5);
        let mut game = Game::from_board(board, Player::White);

        game.make_move(Square::B5, Square::B6).unwrap();
        assert!(game.is_stalemate(Player::Black));
        assert!(!game.is_checkmate(Player::Black));
        assert_eq!(game.status(), GameStatus::Stalemate);
        assert!(game.all_legal_moves().is_empty());
    }

    #[test]
    fn test_check_status() {
        let mut game = Game::default();
        play(&mut game, "e2e4 f7f6 d1h5");
        assert_eq!(game.status(), GameStatus::Check);
        assert!(game.last_move().unwrap().gives_check());

        // Only the g-pawn can block, and the King cannot move
        let replies = game.all_legal_moves();
        assert_eq!(replies, vec![(Square::G7, Square::G6)]);
    }

    #[test]
    fn test_undo_every_move_of_a_game() {
        let mut game = Game::default();
        let moves = "e2e4 d7d5 e4d5 d8d5 b1c3 d5a5 g1f3 c8g4 f1e2 b8c6 e1g1 e8c8";
        play(&mut game, moves);
        assert_eq!(game.history().len(), 12);

        while game.undo_last_move().is_ok() {}
        assert_eq!(game, Game::default());
        assert_eq!(game.undo_last_move(), Err(ChessError::NoMoveToUndo));
    }

    #[test]
    fn test_move_log_and_notation() {
        let mut game = Game::default();
        play(&mut game, "e2e4 d7d5 e4d5 d8d5 b1c3");

        let white: Vec<_> = game.move_log(Player::White).collect();
        let black: Vec<_> = game.move_log(Player::Black).collect();
        assert_eq!(white, ["e4", "exd5", "Nc3"]);
        assert_eq!(black, ["d5", "Qxd5"]);
        assert_eq!(game.notation(), "1. e4 d5 2. exd5 Qxd5 3. Nc3");

        game.undo_last_move().unwrap();
        assert_eq!(game.move_log(Player::White).count(), 2);
    }

    #[test]
    fn test_notation_starting_with_black() {
        let mut board = Board::new();
        board.place(Player::White, PieceKind::King, Square::E1);
        board.place(Player::Black, PieceKind::King, Square::E8);
        board.place(Player::Black, PieceKind::Rook, Square::A8);
        let mut game = Game::from_board(board, Player::Black);

        play(&mut game, "a8a1 e1e2");
        assert_eq!(game.notation(), "1... Ra1+ 2. Ke2");
    }

    #[test]
    fn test_reset() {
        let mut game = Game::default();
        play(&mut game, "e2e4 e7e5");
        game.reset();
        assert_eq!(game, Game::default());
        assert!(game.history().is_empty());
        assert_eq!(game.side_to_move(), Player::White);
    }

    #[test]
    fn test_king_cannot_capture_defended_piece() {
        let mut board = Board::new();
        board.place(Player::White, PieceKind::King, Square::E1);
        board.put(Piece::new(Player::Black, PieceKind::Queen, Square::E2));
        board.place(Player::Black, PieceKind::Knight, Square::C3);
        board.place(Player::Black, PieceKind::King, Square::E8);
        let game = Game::from_board(board, Player::White);

        assert!(game.is_checkmate(Player::White));
    }

    /// Plays and takes back every legal move (every promotion choice included),
    /// asserting none leaves the mover in check and each undo is exact.
    fn assert_every_move_is_safe_and_undoable(game: &mut Game) {
        let mover = game.side_to_move();
        let moves = game.all_legal_moves();
        assert!(!moves.is_empty());

        for (from, to) in moves {
            let promotes = game
                .piece_at(from)
                .is_some_and(|piece| piece.is_pawn() && to.row() == mover.promotion_row());
            let choices: Vec<Option<Promotion>> = if promotes {
                Promotion::all().into_iter().map(Some).collect()
            } else {
                vec![None]
            };

            for choice in choices {
                let before = game.clone();
                let record = match choice {
                    Some(promotion) => game.apply_move(from, to, &mut Always(promotion)),
                    None => game.apply_move(from, to, &mut AutoQueen),
                }
                .unwrap_or_else(|e| panic!("{from}{to} failed: {e}\n{before}"));

                assert_eq!(record.promotion(), choice);
                assert!(!game.is_in_check(mover), "{from}{to} left {mover} in check\n{game}");
                game.undo_last_move().unwrap();
                assert_eq!(*game, before, "undo of {from}{to} did not restore the game");
            }
        }
    }

    #[test]
    fn test_every_legal_move_is_safe_and_undoable() {
        let mut game = Game::default();
        assert_every_move_is_safe_and_undoable(&mut game);

        // Both sides castled, and White may capture d5 en passant
        play(&mut game, "e2e4 e7e6 g1f3 g8f6 f1e2 f8e7 e1g1 e8g8 e4e5 d7d5");
        assert!(game.legal_moves(Square::E5).contains(&Square::D6));
        assert_every_move_is_safe_and_undoable(&mut game);

        let mut game = promotion_game();
        assert_every_move_is_safe_and_undoable(&mut game);

        // Black answering the check from a new Queen
        play(&mut game, "b7b8q");
        assert!(game.is_in_check(Player::Black));
        assert_every_move_is_safe_and_undoable(&mut game);
    }
}
