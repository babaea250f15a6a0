/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use super::{PieceKind, Player, Promotion, Square, BACK_RANK, BOARD_SIZE};

/// A chess piece as it stands on a [`Board`].
///
/// Besides its owner and kind, a piece remembers where it is, whether it has ever moved
/// (for castling), and, for Pawns, whether its last move was a two-square advance (for en passant).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    owner: Player,
    kind: PieceKind,
    square: Square,
    has_moved: bool,
    just_double_pushed: bool,
}

impl Piece {
    /// Creates a new, unmoved [`Piece`] at `square`.
    #[inline(always)]
    pub const fn new(owner: Player, kind: PieceKind, square: Square) -> Self {
        Self {
            owner,
            kind,
            square,
            has_moved: false,
            just_double_pushed: false,
        }
    }

    /// Consumes `self`, returning the same piece marked as having moved.
    ///
    /// Useful when setting up positions in which a King or Rook has lost its castling rights.
    #[inline(always)]
    pub const fn moved(mut self) -> Self {
        self.has_moved = true;
        self
    }

    #[inline(always)]
    pub const fn owner(&self) -> Player {
        self.owner
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// The [`Square`] this piece currently occupies.
    #[inline(always)]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[inline(always)]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// `true` only for a Pawn whose most recent move was a two-square advance,
    /// and only until the next move is made by either side.
    #[inline(always)]
    pub const fn just_double_pushed(&self) -> bool {
        self.just_double_pushed
    }

    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    #[inline(always)]
    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    /// Returns `true` if `other` belongs to the opposing side.
    #[inline(always)]
    pub fn is_enemy_of(&self, other: &Self) -> bool {
        self.owner != other.owner
    }

    /// Letter for this piece, uppercase for White and lowercase for Black.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self.owner {
            Player::White => self.kind.char(),
            Player::Black => self.kind.char().to_ascii_lowercase(),
        }
    }

    /// Returns the piece this Pawn becomes when promoting to `promotion`.
    ///
    /// The new piece counts as having moved.
    #[inline(always)]
    pub const fn promoted(&self, promotion: Promotion) -> Self {
        Self::new(self.owner, promotion.kind(), self.square).moved()
    }

    #[inline(always)]
    pub(crate) fn relocate(&mut self, square: Square) {
        self.square = square;
    }

    #[inline(always)]
    pub(crate) fn mark_moved(&mut self) {
        self.has_moved = true;
    }

    #[inline(always)]
    pub(crate) fn set_just_double_pushed(&mut self, flag: bool) {
        self.just_double_pushed = flag;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// Represents all pieces and their locations on a chess board.
///
/// Has no knowledge of whose turn it is or of move history. If you need those, see [`crate::Game`].
///
/// Internally a plain 8x8 grid of optional pieces, indexed by `[row][col]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use gambit::Board;
    /// let board = Board::new();
    /// assert_eq!(board.iter().count(), 0);
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            grid: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Creates a [`Board`] holding the standard starting position.
    pub fn standard() -> Self {
        let mut board = Self::new();

        for player in Player::all() {
            let home = player.home_row();
            let pawns = player.pawn_row();

            for (col, kind) in BACK_RANK.into_iter().enumerate() {
                let col = col as u8;
                board.place(player, kind, Square::new_unchecked(home, col));
                board.place(player, PieceKind::Pawn, Square::new_unchecked(pawns, col));
            }
        }

        board
    }

    /// Returns `true` if there is a piece at the given [`Square`], else `false`.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Square};
    /// let board = Board::default();
    /// assert!(board.has(Square::B1));
    /// assert!(!board.has(Square::E4));
    /// ```
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.grid[square.row() as usize][square.col() as usize].is_some()
    }

    /// Creates a new, unmoved piece and places it at `square`, replacing anything already there.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, PieceKind, Player, Square};
    /// let mut board = Board::new();
    /// board.place(Player::White, PieceKind::Knight, Square::C4);
    /// assert_eq!(board.kind_at(Square::C4), Some(PieceKind::Knight));
    /// ```
    #[inline(always)]
    pub fn place(&mut self, owner: Player, kind: PieceKind, square: Square) {
        self.put(Piece::new(owner, kind, square));
    }

    /// Places `piece` at the square it records as its own, replacing anything already there.
    #[inline(always)]
    pub fn put(&mut self, piece: Piece) {
        self[piece.square()] = Some(piece);
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, PieceKind, Player, Square};
    /// let mut board = Board::default();
    /// let taken = board.take(Square::B1).unwrap();
    /// assert_eq!(taken.kind(), PieceKind::Knight);
    /// assert_eq!(taken.owner(), Player::White);
    /// assert!(!board.has(Square::B1));
    /// ```
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self[square].take()
    }

    /// Clears the supplied [`Square`] of any pieces.
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.take(square);
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.row() as usize][square.col() as usize]
    }

    /// Mutably fetches the [`Piece`] at the provided [`Square`], if there is one.
    #[inline(always)]
    pub(crate) fn piece_at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self[square].as_mut()
    }

    /// Fetches the owner of the piece at the provided [`Square`], if there is one.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Player, Square};
    /// let board = Board::default();
    /// assert_eq!(board.owner_at(Square::A2), Some(Player::White));
    /// assert_eq!(board.owner_at(Square::E8), Some(Player::Black));
    /// assert!(board.owner_at(Square::E4).is_none());
    /// ```
    #[inline(always)]
    pub fn owner_at(&self, square: Square) -> Option<Player> {
        self.piece_at(square).map(|piece| piece.owner())
    }

    /// Fetches the [`PieceKind`] of the piece at the provided [`Square`], if there is one.
    #[inline(always)]
    pub fn kind_at(&self, square: Square) -> Option<PieceKind> {
        self.piece_at(square).map(|piece| piece.kind())
    }

    /// Iterates over every piece on the board, in row-major order starting from A8.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = Piece> + '_ {
        self.grid.iter().flatten().flatten().copied()
    }

    /// Iterates over every piece belonging to `player`.
    #[inline(always)]
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = Piece> + '_ {
        self.iter().filter(move |piece| piece.owner() == player)
    }

    /// Finds the [`Square`] of `player`'s King, if it is on the board.
    #[inline(always)]
    pub fn find_king(&self, player: Player) -> Option<Square> {
        self.pieces_of(player)
            .find(|piece| piece.is_king())
            .map(|king| king.square())
    }

    /// Clears the "just moved two squares" flag of every Pawn on the board.
    ///
    /// Returns the square of the Pawn whose flag was cleared, if any. At most one Pawn carries
    /// the flag at a time, since it is cleared before every move.
    pub(crate) fn clear_double_pushes(&mut self) -> Option<Square> {
        let mut cleared = None;

        for piece in self.grid.iter_mut().flatten().flatten() {
            if piece.just_double_pushed() {
                piece.set_just_double_pushed(false);
                cleared = Some(piece.square());
            }
        }

        cleared
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(198);

        for row in 0..BOARD_SIZE as u8 {
            let rank = BOARD_SIZE as u8 - row;
            board += &format!("{rank}| ");

            for col in 0..BOARD_SIZE as u8 {
                let occupant = self
                    .piece_at(Square::new_unchecked(row, col))
                    .map(|piece| piece.char())
                    .unwrap_or('.');

                board.push(occupant);
                board.push(' ');
            }

            board += "\n";
        }
        board += " +";
        for _ in 0..BOARD_SIZE {
            board += "--";
        }
        board += "\n   ";
        for col in 0..BOARD_SIZE as u8 {
            board.push(Square::new_unchecked(0, col).file_char());
            board.push(' ');
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;

        // Flags are invisible in the diagram, so list any piece carrying one.
        for piece in self.iter() {
            if piece.has_moved() || piece.just_double_pushed() {
                write!(f, "\n{}@{}", piece.char(), piece.square())?;
                if piece.has_moved() {
                    write!(f, " moved")?;
                }
                if piece.just_double_pushed() {
                    write!(f, " double-pushed")?;
                }
            }
        }

        Ok(())
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.grid[index.row() as usize][index.col() as usize]
    }
}

impl IndexMut<Square> for Board {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.grid[index.row() as usize][index.col() as usize]
    }
}
