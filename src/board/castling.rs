// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};

use super::attacks::attacked;
use super::material::{Color, Material, Piece};
use super::position::{between, Pos, Position};
use super::square::{File, Mask, Rank, Square};

use File::*;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    KingSide,
    QueenSide,
}

impl Wing {
    /// The wing a king is heading for when it moves from `from` to `to`,
    /// provided that is a two-square step along its rank.
    pub fn of_king_step(from: Square, to: Square) -> Option<Self> {
        let offset = to - from;
        match (offset.x, offset.y) {
            (2, 0) => Some(Wing::KingSide),
            (-2, 0) => Some(Wing::QueenSide),
            _ => None,
        }
    }
}

/// Per-side castling rights. Rights only ever get cleared.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    color: Color,
    oo: bool,
    ooo: bool,
}

impl CastlingRights {
    pub fn new(color: Color, oo: bool, ooo: bool) -> Self {
        Self { color, oo, ooo }
    }
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
    #[inline]
    pub fn oo(&self) -> bool {
        self.oo
    }
    #[inline]
    pub fn ooo(&self) -> bool {
        self.ooo
    }
    #[inline]
    pub fn allows(&self, wing: Wing) -> bool {
        match wing {
            Wing::KingSide => self.oo,
            Wing::QueenSide => self.ooo,
        }
    }
    #[inline]
    pub fn rank(&self) -> Rank {
        Rank::back_rank(self.color)
    }
    #[inline]
    pub fn king_src(&self) -> Square {
        Square::new(FileE, self.rank())
    }
    #[inline]
    pub fn king_dest(&self, wing: Wing) -> Square {
        match wing {
            Wing::KingSide => Square::new(FileG, self.rank()),
            Wing::QueenSide => Square::new(FileC, self.rank()),
        }
    }
    #[inline]
    pub fn rook_src(&self, wing: Wing) -> Square {
        match wing {
            Wing::KingSide => Square::new(FileH, self.rank()),
            Wing::QueenSide => Square::new(FileA, self.rank()),
        }
    }
    #[inline]
    pub fn rook_dest(&self, wing: Wing) -> Square {
        match wing {
            Wing::KingSide => Square::new(FileF, self.rank()),
            Wing::QueenSide => Square::new(FileD, self.rank()),
        }
    }
    /// Squares that must be empty: everything strictly between king and rook.
    pub fn blocking_lane(&self, wing: Wing) -> Mask {
        between(self.king_src(), self.rook_src(wing))
    }
    /// Squares the king stands on or crosses, start and end included.
    pub fn attacking_lane(&self, wing: Wing) -> Mask {
        let king_src = self.king_src();
        let king_dest = self.king_dest(wing);
        between(king_src, king_dest) | king_src | king_dest
    }
    pub fn clear(&mut self) {
        self.oo = false;
        self.ooo = false;
    }
    /// Clears the right tied to the rook corner `square`, if any.
    pub fn vacate(&mut self, square: Square) {
        if square == self.rook_src(Wing::KingSide) {
            self.oo = false;
        }
        if square == self.rook_src(Wing::QueenSide) {
            self.ooo = false;
        }
    }
}

/// Decides whether the king on `from` may castle toward `wing`. All of
/// these must hold at once: the right is still held, the king stands
/// unmoved on its home square and is not in check, an unmoved rook of
/// the same side stands in the corner, the squares between them are
/// empty, and no square the king passes through is attacked.
pub fn can_castle(pos: &Position, from: Square, wing: Wing) -> bool {
    match pos.contents(from) {
        Some(king) => can_castle_under(pos, from, wing, attacked(pos, !king.color())),
        None => false,
    }
}

/// As [`can_castle`], with the opponent's attack map already at hand.
pub fn can_castle_under(pos: &Position, from: Square, wing: Wing, threats: Mask) -> bool {
    let Some(king) = pos.contents(from) else {
        return false;
    };
    if king.piece() != Piece::King || king.has_moved() {
        return false;
    }
    let color = king.color();
    let rights = pos.castling(color);
    if !rights.allows(wing) || from != rights.king_src() {
        return false;
    }
    let rook_ok = pos
        .contents(rights.rook_src(wing))
        .map(|rook| rook.material() == Material::new(color, Piece::Rook) && !rook.has_moved())
        .unwrap_or(false);
    if !rook_ok {
        return false;
    }
    if !(rights.blocking_lane(wing) & pos.occupied()).is_empty() {
        return false;
    }
    // The lane includes the king's own square, so this also rules out
    // castling out of check.
    (rights.attacking_lane(wing) & threats).is_empty()
}
