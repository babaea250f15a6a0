/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

/// One of the two sides of a chess game.
///
/// White starts on rows 6 and 7 and advances towards row 0.
/// Black starts on rows 0 and 1 and advances towards row 7.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub enum Player {
    #[default]
    White,
    Black,
}

impl Player {
    /// Number of players.
    pub const COUNT: usize = 2;

    /// Both players, White first.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns the other player.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Player;
    /// assert_eq!(Player::White.opponent(), Player::Black);
    /// assert_eq!(Player::Black.opponent(), Player::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row delta of a single pawn step for this player.
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Row holding this player's back-rank pieces at the start of the game.
    #[inline(always)]
    pub const fn home_row(&self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// Row holding this player's pawns at the start of the game.
    #[inline(always)]
    pub const fn pawn_row(&self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// Row on which this player's pawns promote.
    #[inline(always)]
    pub const fn promotion_row(&self) -> u8 {
        self.opponent().home_row()
    }

    /// Human-readable name of this player.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The kind of a chess piece, without any notion of ownership or location.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 6;

    /// All piece kinds, in ascending order of their usual value.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::Pawn,
            Self::Knight,
            Self::Bishop,
            Self::Rook,
            Self::Queen,
            Self::King,
        ]
    }

    /// Uppercase letter for this kind, `P` for Pawns included.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Letter used for this kind in move notation. Pawns have none.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::PieceKind;
    /// assert_eq!(PieceKind::Knight.notation_letter(), Some('N'));
    /// assert_eq!(PieceKind::Pawn.notation_letter(), None);
    /// ```
    #[inline(always)]
    pub const fn notation_letter(&self) -> Option<char> {
        match self {
            Self::Pawn => None,
            _ => Some(self.char()),
        }
    }

    /// Human-readable name of this kind.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The pieces a Pawn may become when it reaches the far row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Promotion {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    /// Every promotion choice, Queen first.
    #[inline(always)]
    pub const fn all() -> [Self; 4] {
        [Self::Queen, Self::Rook, Self::Bishop, Self::Knight]
    }

    /// The [`PieceKind`] created by this promotion.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        match self {
            Self::Queen => PieceKind::Queen,
            Self::Rook => PieceKind::Rook,
            Self::Bishop => PieceKind::Bishop,
            Self::Knight => PieceKind::Knight,
        }
    }

    /// Uppercase letter of the promoted piece, as written after `=` in notation.
    #[inline(always)]
    pub const fn char(&self) -> char {
        self.kind().char()
    }

    /// Parses a promotion letter, in either case.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Promotion;
    /// assert_eq!(Promotion::from_char('n').unwrap(), Promotion::Knight);
    /// assert_eq!(Promotion::from_char('Q').unwrap(), Promotion::Queen);
    /// assert!(Promotion::from_char('k').is_err());
    /// ```
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'Q' => Ok(Self::Queen),
            'R' => Ok(Self::Rook),
            'B' => Ok(Self::Bishop),
            'N' => Ok(Self::Knight),
            _ => bail!("Invalid promotion: {c:?} is not one of Q, R, B or N"),
        }
    }
}

impl TryFrom<PieceKind> for Promotion {
    type Error = anyhow::Error;
    fn try_from(kind: PieceKind) -> Result<Self> {
        match kind {
            PieceKind::Queen => Ok(Self::Queen),
            PieceKind::Rook => Ok(Self::Rook),
            PieceKind::Bishop => Ok(Self::Bishop),
            PieceKind::Knight => Ok(Self::Knight),
            _ => bail!("A pawn cannot promote to a {kind}"),
        }
    }
}

impl FromStr for Promotion {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => bail!("Invalid promotion: expected a single letter, got {s:?}"),
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}
