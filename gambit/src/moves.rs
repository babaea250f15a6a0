/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{Piece, PieceKind, Player, Promotion, Square};

/// The side of the board a King castles towards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CastleSide {
    /// Towards the h-file Rook. Written `O-O`.
    Kingside,

    /// Towards the a-file Rook. Written `O-O-O`.
    Queenside,
}

impl CastleSide {
    /// Both sides, kingside first.
    #[inline(always)]
    pub const fn all() -> [Self; 2] {
        [Self::Kingside, Self::Queenside]
    }

    /// The column step the King takes while castling towards this side.
    #[inline(always)]
    pub const fn direction(&self) -> i8 {
        match self {
            Self::Kingside => 1,
            Self::Queenside => -1,
        }
    }

    #[inline(always)]
    const fn rook_origin_col(&self) -> u8 {
        match self {
            Self::Kingside => 7,
            Self::Queenside => 0,
        }
    }

    #[inline(always)]
    const fn rook_destination_col(&self) -> u8 {
        match self {
            Self::Kingside => 5,
            Self::Queenside => 3,
        }
    }

    #[inline(always)]
    const fn king_destination_col(&self) -> u8 {
        match self {
            Self::Kingside => 6,
            Self::Queenside => 2,
        }
    }

    /// Where `owner`'s Rook must stand to castle towards this side.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// assert_eq!(CastleSide::Kingside.rook_origin(Player::White), Square::H1);
    /// assert_eq!(CastleSide::Queenside.rook_origin(Player::Black), Square::A8);
    /// ```
    #[inline(always)]
    pub const fn rook_origin(&self, owner: Player) -> Square {
        Square::new_unchecked(owner.home_row(), self.rook_origin_col())
    }

    /// Where `owner`'s Rook lands after castling: the square the King passed over.
    #[inline(always)]
    pub const fn rook_destination(&self, owner: Player) -> Square {
        Square::new_unchecked(owner.home_row(), self.rook_destination_col())
    }

    /// Where `owner`'s King lands after castling.
    #[inline(always)]
    pub const fn king_destination(&self, owner: Player) -> Square {
        Square::new_unchecked(owner.home_row(), self.king_destination_col())
    }

    /// Classifies a King move: a step of two columns is a castle.
    ///
    /// Returns `None` for any other move.
    pub fn from_king_move(from: Square, to: Square) -> Option<Self> {
        if from.row() != to.row() || from.distance_cols(to) != 2 {
            return None;
        }

        if to.col() > from.col() {
            Some(Self::Kingside)
        } else {
            Some(Self::Queenside)
        }
    }

    /// `O-O` or `O-O-O`.
    #[inline(always)]
    pub const fn notation(&self) -> &'static str {
        match self {
            Self::Kingside => "O-O",
            Self::Queenside => "O-O-O",
        }
    }
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

/// Everything needed to describe a move that was made, and to take it back exactly.
///
/// Produced by [`crate::Game::apply_move`] and kept in the game's history.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MoveRecord {
    /// The moving piece as it was before the move (flags included).
    pub(crate) piece: Piece,
    pub(crate) from: Square,
    pub(crate) to: Square,

    /// The piece removed from the board, on the square it was removed from.
    pub(crate) captured: Option<Piece>,

    /// Set when the King castled; `rook` then holds the Rook as it was before castling.
    pub(crate) castle: Option<CastleSide>,
    pub(crate) rook: Option<Piece>,

    pub(crate) en_passant: bool,
    pub(crate) promotion: Option<Promotion>,

    /// The Pawn that lost its "just moved two squares" flag when this move was made.
    pub(crate) cleared_double_push: Option<Square>,

    /// Whether the move left the opponent in check.
    pub(crate) gives_check: bool,
}

impl MoveRecord {
    /// The moving piece, as it stood on [`MoveRecord::from`] before the move.
    #[inline(always)]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[inline(always)]
    pub const fn player(&self) -> Player {
        self.piece.owner()
    }

    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The captured piece, if any.
    ///
    /// Its square is where it was captured, which is not [`MoveRecord::to`] for en passant.
    #[inline(always)]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline(always)]
    pub const fn castle(&self) -> Option<CastleSide> {
        self.castle
    }

    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    #[inline(always)]
    pub const fn promotion(&self) -> Option<Promotion> {
        self.promotion
    }

    #[inline(always)]
    pub const fn gives_check(&self) -> bool {
        self.gives_check
    }

    /// Renders this move in algebraic-style notation.
    ///
    /// Castling is written `O-O` / `O-O-O` and nothing else.
    /// Otherwise the piece letter comes first (Pawns have none, but name their origin file when capturing),
    /// then `x` for a capture, then the destination, then ` e.p.`, `=Q` and `+` where they apply.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let mut game = Game::default();
    /// let record = game.make_move(Square::G1, Square::F3).unwrap();
    /// assert_eq!(record.notation(), "Nf3");
    /// ```
    pub fn notation(&self) -> String {
        if let Some(side) = self.castle {
            return side.notation().to_string();
        }

        let mut notation = String::with_capacity(10);

        match self.piece.kind().notation_letter() {
            Some(letter) => {
                notation.push(letter);
                if self.is_capture() {
                    notation.push('x');
                }
            }
            None if self.is_capture() => {
                notation.push(self.from.file_char());
                notation.push('x');
            }
            None => {}
        }

        notation.push(self.to.file_char());
        notation.push(self.to.rank_char());

        if self.en_passant {
            notation.push_str(" e.p.");
        }

        if let Some(promotion) = self.promotion {
            notation.push('=');
            notation.push(promotion.char());
        }

        if self.gives_check {
            notation.push('+');
        }

        notation
    }

    /// The kind of piece standing on [`MoveRecord::to`] after the move.
    #[inline(always)]
    pub fn landed_kind(&self) -> PieceKind {
        self.promotion
            .map_or(self.piece.kind(), |promotion| promotion.kind())
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(piece: Piece, to: Square) -> MoveRecord {
        MoveRecord {
            piece,
            from: piece.square(),
            to,
            captured: None,
            castle: None,
            rook: None,
            en_passant: false,
            promotion: None,
            cleared_double_push: None,
            gives_check: false,
        }
    }

    #[test]
    fn test_castle_side_squares() {
        assert_eq!(CastleSide::Kingside.king_destination(Player::White), Square::G1);
        assert_eq!(CastleSide::Kingside.rook_destination(Player::White), Square::F1);
        assert_eq!(CastleSide::Queenside.king_destination(Player::Black), Square::C8);
        assert_eq!(CastleSide::Queenside.rook_destination(Player::Black), Square::D8);
        assert_eq!(CastleSide::Queenside.rook_origin(Player::White), Square::A1);
        assert_eq!(CastleSide::Kingside.rook_origin(Player::Black), Square::H8);
    }

    #[test]
    fn test_castle_side_from_king_move() {
        assert_eq!(
            CastleSide::from_king_move(Square::E1, Square::G1),
            Some(CastleSide::Kingside)
        );
        assert_eq!(
            CastleSide::from_king_move(Square::E8, Square::C8),
            Some(CastleSide::Queenside)
        );
        assert_eq!(CastleSide::from_king_move(Square::E1, Square::F1), None);
        assert_eq!(CastleSide::from_king_move(Square::E1, Square::E2), None);
    }

    #[test]
    fn test_quiet_notation() {
        let pawn = Piece::new(Player::White, PieceKind::Pawn, Square::E2);
        assert_eq!(record(pawn, Square::E4).notation(), "e4");

        let knight = Piece::new(Player::Black, PieceKind::Knight, Square::B8);
        assert_eq!(record(knight, Square::C6).notation(), "Nc6");
    }

    #[test]
    fn test_capture_notation() {
        let pawn = Piece::new(Player::White, PieceKind::Pawn, Square::E4);
        let mut mv = record(pawn, Square::D5);
        mv.captured = Some(Piece::new(Player::Black, PieceKind::Pawn, Square::D5));
        assert_eq!(mv.notation(), "exd5");

        let bishop = Piece::new(Player::White, PieceKind::Bishop, Square::F1);
        let mut mv = record(bishop, Square::B5);
        mv.captured = Some(Piece::new(Player::Black, PieceKind::Knight, Square::B5));
        mv.gives_check = true;
        assert_eq!(mv.notation(), "Bxb5+");
    }

    #[test]
    fn test_en_passant_notation() {
        let pawn = Piece::new(Player::White, PieceKind::Pawn, Square::E5);
        let mut mv = record(pawn, Square::D6);
        mv.captured = Some(Piece::new(Player::Black, PieceKind::Pawn, Square::D5));
        mv.en_passant = true;
        assert_eq!(mv.notation(), "exd6 e.p.");
    }

    #[test]
    fn test_promotion_notation() {
        let pawn = Piece::new(Player::Black, PieceKind::Pawn, Square::B2);
        let mut mv = record(pawn, Square::A1);
        mv.captured = Some(Piece::new(Player::White, PieceKind::Rook, Square::A1));
        mv.promotion = Some(Promotion::Knight);
        mv.gives_check = true;
        assert_eq!(mv.notation(), "bxa1=N+");
        assert_eq!(mv.landed_kind(), PieceKind::Knight);
    }

    #[test]
    fn test_castle_notation_overrides_everything() {
        let king = Piece::new(Player::White, PieceKind::King, Square::E1);
        let mut mv = record(king, Square::C1);
        mv.castle = Some(CastleSide::Queenside);
        mv.gives_check = true;
        assert_eq!(mv.notation(), "O-O-O");
        assert_eq!(mv.to_string(), "O-O-O");
    }
}
