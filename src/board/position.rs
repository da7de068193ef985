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

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use strum::IntoEnumIterator;

use super::castling::{CastlingRights, Wing};
use super::material::{Color, Material, Occupant, Pair, Piece, PieceId, Promotion};
use super::square::{Mask, Rank, Square};
use super::Turn;

use Color::*;
use Piece::*;

/// A transition the position knows how to carry out. Producing one is
/// the job of the legality engine; `Position::apply_move` trusts it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegalMove {
    Standard(Square, Square),
    DoubleAdvance(Square, Square),
    EnPassant(Square, Square),
    Promoting(Square, Square, Promotion),
    Castle(Color, Wing),
}

impl LegalMove {
    pub fn from(&self) -> Square {
        self.squares().0
    }

    pub fn to(&self) -> Square {
        self.squares().1
    }

    pub fn squares(&self) -> (Square, Square) {
        match *self {
            LegalMove::Standard(from, to)
            | LegalMove::DoubleAdvance(from, to)
            | LegalMove::EnPassant(from, to)
            | LegalMove::Promoting(from, to, _) => (from, to),
            LegalMove::Castle(color, wing) => {
                let rights = CastlingRights::new(color, true, true);
                (rights.king_src(), rights.king_dest(wing))
            }
        }
    }
}

/// What `Position::apply_move` did, for the caller's audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// The moving piece as it stood before the move.
    pub mover: Occupant,
    pub captured: Option<Occupant>,
    pub promotion: Option<Promotion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Squares([Option<Occupant>; 64]);

impl Squares {
    fn empty() -> Self {
        Self([None; 64])
    }
}

impl Index<Square> for Squares {
    type Output = Option<Occupant>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.to_index()]
    }
}

impl IndexMut<Square> for Squares {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index.to_index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Masks {
    pieces: Pair<Mask>,
    kings: Mask,
    queens: Mask,
    rooks: Mask,
    bishops: Mask,
    knights: Mask,
    pawns: Mask,
}

impl Masks {
    fn empty() -> Self {
        Self {
            pieces: Pair::new(Mask::empty(), Mask::empty()),
            kings: Mask::empty(),
            queens: Mask::empty(),
            rooks: Mask::empty(),
            bishops: Mask::empty(),
            knights: Mask::empty(),
            pawns: Mask::empty(),
        }
    }

    fn kind_mut(&mut self, piece: Piece) -> &mut Mask {
        match piece {
            King => &mut self.kings,
            Queen => &mut self.queens,
            Rook => &mut self.rooks,
            Bishop => &mut self.bishops,
            Knight => &mut self.knights,
            Pawn => &mut self.pawns,
        }
    }

    fn kind(&self, piece: Piece) -> Mask {
        match piece {
            King => self.kings,
            Queen => self.queens,
            Rook => self.rooks,
            Bishop => self.bishops,
            Knight => self.knights,
            Pawn => self.pawns,
        }
    }
}

/// The board model: which piece stands where, plus everything about
/// the game that the next move depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    squares: Squares,
    masks: Masks,
    castling: Pair<CastlingRights>,
    turn: Color,
    en_passant: Option<Square>,
    half_move_clock: u16,
    full_moves: u16,
    next_id: PieceId,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// The standard starting arrangement with full castling rights.
    pub fn new() -> Self {
        const BACK_RANK: [Piece; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut position = Self::empty();
        position.castling = Pair::new(
            CastlingRights::new(White, true, true),
            CastlingRights::new(Black, true, true),
        );
        // Identities are handed out in board order so two fresh positions
        // always agree on them.
        for square in Square::iter() {
            let file = square.file().to_index();
            for color in Color::iter() {
                let piece = if square.rank() == Rank::back_rank(color) {
                    BACK_RANK[file]
                } else if square.rank() == Rank::pawn_rank(color) {
                    Pawn
                } else {
                    continue;
                };
                position.spawn(square, Material::new(color, piece));
            }
        }
        position
    }

    /// A board with no pieces and no castling rights, White to move.
    pub fn empty() -> Self {
        Self {
            squares: Squares::empty(),
            masks: Masks::empty(),
            castling: Pair::new(
                CastlingRights::new(White, false, false),
                CastlingRights::new(Black, false, false),
            ),
            turn: White,
            en_passant: None,
            half_move_clock: 0,
            full_moves: 0,
            next_id: PieceId::new(0),
        }
    }

    pub fn with(mut self, square: Square, material: Material) -> Self {
        self.spawn(square, material);
        self
    }

    /// Places a piece that counts as having moved already.
    pub fn with_moved(mut self, square: Square, material: Material) -> Self {
        self.spawn(square, material);
        if let Some(occupant) = self.squares[square].as_mut() {
            occupant.mark_moved();
        }
        self
    }

    pub fn without(mut self, square: Square) -> Self {
        self.remove(square);
        self
    }

    pub fn with_turn(mut self, turn: Color) -> Self {
        self.turn = turn;
        self
    }

    pub fn with_castling(mut self, color: Color, oo: bool, ooo: bool) -> Self {
        self.castling[color] = CastlingRights::new(color, oo, ooo);
        self
    }

    pub fn with_en_passant(mut self, target: Option<Square>) -> Self {
        self.en_passant = target;
        self
    }

    pub fn with_half_move_clock(mut self, value: u16) -> Self {
        self.half_move_clock = value;
        self
    }

    #[inline]
    pub fn castling(&self, color: Color) -> &CastlingRights {
        &self.castling[color]
    }

    /// The square a pawn skipped over on the immediately preceding move.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn half_move_clock(&self) -> u16 {
        self.half_move_clock
    }

    /// Completed rounds: bumped each time Black finishes a move.
    #[inline]
    pub fn full_moves(&self) -> u16 {
        self.full_moves
    }

    /// Every occupied square with its occupant, in board order.
    pub fn occupants(&self) -> impl Iterator<Item = (Square, Occupant)> + '_ {
        Square::iter().filter_map(|square| self.squares[square].map(|occupant| (square, occupant)))
    }

    /// Carries out `mv`, including every side effect on rights, counters
    /// and the side to move. Returns `None` without touching anything if
    /// the origin square is empty.
    pub fn apply_move(&mut self, mv: LegalMove) -> Option<Applied> {
        let (from, to) = mv.squares();
        let mover = self.remove(from)?;
        let color = mover.color();
        let mut occupant = mover;
        let mut captured = None;
        let mut promotion = None;
        match mv {
            LegalMove::Castle(color, wing) => {
                let rights = self.castling[color];
                if let Some(mut rook) = self.remove(rights.rook_src(wing)) {
                    rook.mark_moved();
                    self.place(rights.rook_dest(wing), rook);
                }
            }
            LegalMove::EnPassant(from, to) => {
                captured = self.remove(Square::new(to.file(), from.rank()));
            }
            LegalMove::Promoting(_, _, kind) => {
                let id = self.mint_id();
                occupant.promote(kind, id);
                promotion = Some(kind);
            }
            LegalMove::Standard(..) | LegalMove::DoubleAdvance(..) => {}
        }
        occupant.mark_moved();
        if let Some(replaced) = self.place(to, occupant) {
            captured = Some(replaced);
        }

        self.en_passant = match mv {
            LegalMove::DoubleAdvance(from, to) => between(from, to).iter().next(),
            _ => None,
        };

        if mover.piece().is_king() {
            self.castling[color].clear();
        } else {
            self.castling[color].vacate(from);
        }
        if captured.is_some() {
            self.castling[!color].vacate(to);
        }

        if mover.piece().is_pawn() || captured.is_some() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock = self.half_move_clock.saturating_add(1);
        }
        if color == Black {
            self.full_moves += 1;
        }
        self.turn = !color;

        Some(Applied {
            mover,
            captured,
            promotion,
        })
    }

    /// Turns the pawn on `square` into `promotion` under a new identity.
    pub(crate) fn promote(&mut self, square: Square, promotion: Promotion) -> Option<Occupant> {
        let mut occupant = self.remove(square)?;
        let id = self.mint_id();
        occupant.promote(promotion, id);
        self.place(square, occupant);
        Some(occupant)
    }

    fn mint_id(&mut self) -> PieceId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    fn spawn(&mut self, square: Square, material: Material) {
        let id = self.mint_id();
        self.place(square, Occupant::new(material, id));
    }

    fn place(&mut self, square: Square, occupant: Occupant) -> Option<Occupant> {
        let replaced = self.remove(square);
        self.squares[square] = Some(occupant);
        self.masks.pieces[occupant.color()] |= square;
        *self.masks.kind_mut(occupant.piece()) |= square;
        replaced
    }

    fn remove(&mut self, square: Square) -> Option<Occupant> {
        let occupant = self.squares[square].take()?;
        self.masks.pieces[occupant.color()].reset(square);
        self.masks.kind_mut(occupant.piece()).reset(square);
        Some(occupant)
    }
}

impl Turn for Position {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

impl Index<Square> for Position {
    type Output = Option<Occupant>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index]
    }
}

impl AsRef<Self> for Position {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl Pos for Position {}

pub trait Pos: Turn + AsRef<Position> {
    #[inline]
    fn contents(&self, square: Square) -> Option<Occupant> {
        let pos: &Position = self.as_ref();
        pos.squares[square]
    }
    #[inline]
    fn occupied_by(&self, color: Color) -> Mask {
        let pos: &Position = self.as_ref();
        pos.masks.pieces[color]
    }
    #[inline]
    fn occupied(&self) -> Mask {
        self.occupied_by(White) | self.occupied_by(Black)
    }
    #[inline]
    fn is_vacant(&self, square: Square) -> bool {
        self.contents(square).is_none()
    }
    #[inline]
    fn pieces_of(&self, color: Color, piece: Piece) -> Mask {
        let pos: &Position = self.as_ref();
        pos.masks.pieces[color] & pos.masks.kind(piece)
    }
    #[inline]
    fn ours(&self) -> Mask {
        self.occupied_by(self.turn())
    }
    #[inline]
    fn theirs(&self) -> Mask {
        self.occupied_by(!self.turn())
    }
    /// The king of `color`, if there is exactly one.
    #[inline]
    fn king(&self, color: Color) -> Option<Square> {
        let mask = self.pieces_of(color, King);
        debug_assert!(mask.len() <= 1);
        match mask.len() {
            1 => mask.iter().next(),
            _ => None,
        }
    }
}

/// Squares strictly between `from` and `to` when they share a line,
/// otherwise empty.
#[inline]
pub(super) fn between(from: Square, to: Square) -> Mask {
    SQUARES_BETWEEN[from.to_index() * 64 + to.to_index()]
}

/// Squares beyond `to` on the ray from `from` through `to`.
#[inline]
pub(super) fn shielded(from: Square, to: Square) -> Mask {
    SQUARES_SHIELDED[from.to_index() * 64 + to.to_index()]
}

static SQUARES_BETWEEN: Lazy<Vec<Mask>> = Lazy::new(|| {
    let mut table = vec![Mask::empty(); 64 * 64];
    for start in Square::iter() {
        for end in Square::iter() {
            let Some(step) = (end - start).to_unit() else {
                continue;
            };
            let mut mask = Mask::empty();
            let mut next = start + step;
            while let Some(square) = next {
                if square == end {
                    break;
                }
                mask |= square;
                next = square + step;
            }
            table[start.to_index() * 64 + end.to_index()] = mask;
        }
    }
    table
});

static SQUARES_SHIELDED: Lazy<Vec<Mask>> = Lazy::new(|| {
    let mut table = vec![Mask::empty(); 64 * 64];
    for start in Square::iter() {
        for end in Square::iter() {
            let Some(step) = (end - start).to_unit() else {
                continue;
            };
            let mut mask = Mask::empty();
            let mut next = end + step;
            while let Some(square) = next {
                mask |= square;
                next = square + step;
            }
            table[start.to_index() * 64 + end.to_index()] = mask;
        }
    }
    table
});
