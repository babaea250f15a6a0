/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::BOARD_SIZE;

/// A square on the chessboard, addressed by row and column.
///
/// Row 0 is Black's back rank (rank 8) and row 7 is White's back rank (rank 1).
/// Column 0 is the a-file and column 7 is the h-file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Square {
    row: u8,
    col: u8,
}

/// Declares the eight square constants of a single row, a-file through h-file.
macro_rules! row_of_squares {
    ($row:literal => $a:ident $b:ident $c:ident $d:ident $e:ident $f:ident $g:ident $h:ident) => {
        pub const $a: Self = Self::new_unchecked($row, 0);
        pub const $b: Self = Self::new_unchecked($row, 1);
        pub const $c: Self = Self::new_unchecked($row, 2);
        pub const $d: Self = Self::new_unchecked($row, 3);
        pub const $e: Self = Self::new_unchecked($row, 4);
        pub const $f: Self = Self::new_unchecked($row, 5);
        pub const $g: Self = Self::new_unchecked($row, 6);
        pub const $h: Self = Self::new_unchecked($row, 7);
    };
}

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = BOARD_SIZE * BOARD_SIZE;

    row_of_squares!(0 => A8 B8 C8 D8 E8 F8 G8 H8);
    row_of_squares!(1 => A7 B7 C7 D7 E7 F7 G7 H7);
    row_of_squares!(2 => A6 B6 C6 D6 E6 F6 G6 H6);
    row_of_squares!(3 => A5 B5 C5 D5 E5 F5 G5 H5);
    row_of_squares!(4 => A4 B4 C4 D4 E4 F4 G4 H4);
    row_of_squares!(5 => A3 B3 C3 D3 E3 F3 G3 H3);
    row_of_squares!(6 => A2 B2 C2 D2 E2 F2 G2 H2);
    row_of_squares!(7 => A1 B1 C1 D1 E1 F1 G1 H1);

    /// Creates a [`Square`] from a row and column, if both are on the board.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Square;
    /// assert_eq!(Square::new(4, 4), Some(Square::E4));
    /// assert_eq!(Square::new(8, 0), None);
    /// ```
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if Self::in_bounds(row as i8, col as i8) {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Creates a [`Square`] without checking bounds.
    ///
    /// Only used for constants and for coordinates already known to be in `[0, 8)`.
    #[inline(always)]
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns `true` if `row` and `col` both lie in `[0, 8)`. No wraparound.
    #[inline(always)]
    pub const fn in_bounds(row: i8, col: i8) -> bool {
        row >= 0 && row < BOARD_SIZE as i8 && col >= 0 && col < BOARD_SIZE as i8
    }

    /// Creates a [`Square`] from its row-major index in `[0, 64)`.
    #[inline(always)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::new_unchecked(
                (index / BOARD_SIZE) as u8,
                (index % BOARD_SIZE) as u8,
            ))
        } else {
            None
        }
    }

    /// Row-major index of this square, A8 being `0` and H1 being `63`.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.row
    }

    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.col
    }

    /// The square `d_row` rows and `d_col` columns away, if it is still on the board.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Square;
    /// assert_eq!(Square::E2.offset(-2, 0), Some(Square::E4));
    /// assert_eq!(Square::H1.offset(0, 1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if Self::in_bounds(row, col) {
            Some(Self::new_unchecked(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Number of rows between `self` and `other`.
    #[inline(always)]
    pub const fn distance_rows(&self, other: Self) -> u8 {
        self.row.abs_diff(other.row)
    }

    /// Number of columns between `self` and `other`.
    #[inline(always)]
    pub const fn distance_cols(&self, other: Self) -> u8 {
        self.col.abs_diff(other.col)
    }

    /// File letter of this square, `'a'` through `'h'`.
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank number of this square, `8 - row`.
    #[inline(always)]
    pub const fn rank(&self) -> u8 {
        BOARD_SIZE as u8 - self.row
    }

    /// Rank digit of this square, `'1'` through `'8'`.
    #[inline(always)]
    pub const fn rank_char(&self) -> char {
        (b'0' + self.rank()) as char
    }

    /// Parses a square from its file and rank, such as `"e4"`.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Square;
    /// assert_eq!(Square::from_uci("a8").unwrap(), Square::A8);
    /// assert_eq!(Square::from_uci("h1").unwrap(), Square::H1);
    /// assert!(Square::from_uci("i9").is_err());
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self> {
        let mut chars = uci.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid square {uci:?}: must be a file followed by a rank");
        };

        let col = match file.to_ascii_lowercase() {
            f @ 'a'..='h' => f as u8 - b'a',
            _ => bail!("Invalid square {uci:?}: file must be between 'a' and 'h'"),
        };

        let rank = rank
            .to_digit(10)
            .filter(|r| (1..=8).contains(r))
            .ok_or(anyhow!("Invalid square {uci:?}: rank must be between 1 and 8"))?;

        Ok(Self::new_unchecked(BOARD_SIZE as u8 - rank as u8, col))
    }

    /// Renders this square as its file and rank, such as `"e4"`.
    #[inline(always)]
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// Iterates over every square in row-major order, A8 first.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT).map(|i| Self::new_unchecked((i / BOARD_SIZE) as u8, (i % BOARD_SIZE) as u8))
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_coordinates_match_files_and_ranks() {
        assert_eq!((Square::A8.row(), Square::A8.col()), (0, 0));
        assert_eq!((Square::H1.row(), Square::H1.col()), (7, 7));
        assert_eq!((Square::E2.row(), Square::E2.col()), (6, 4));
        assert_eq!(Square::E2.to_string(), "e2");
        assert_eq!(Square::D5.to_uci(), "d5");
    }

    #[test]
    fn test_every_square_round_trips_through_its_name() {
        for square in Square::iter() {
            assert_eq!(Square::from_uci(&square.to_uci()).unwrap(), square);
            assert_eq!(Square::from_index(square.index()), Some(square));
        }
        assert_eq!(Square::iter().len(), Square::COUNT);
    }

    #[test]
    fn test_offsets_do_not_wrap() {
        assert_eq!(Square::A4.offset(0, -1), None);
        assert_eq!(Square::H4.offset(0, 1), None);
        assert_eq!(Square::A8.offset(-1, 0), None);
        assert_eq!(Square::A1.offset(1, 0), None);
        assert_eq!(Square::B1.offset(-2, -1), Some(Square::A3));
    }

    #[test]
    fn test_invalid_squares_rejected() {
        for bad in ["", "e", "e0", "e9", "z4", "e44", "44"] {
            assert!(Square::from_uci(bad).is_err(), "{bad:?} should not parse");
        }
    }
}
