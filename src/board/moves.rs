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

use std::collections::HashMap;
use std::ops::Index;

use super::attacks::{attacked, BISHOP_MOVES, KING_MOVES, KNIGHT_MOVES, PAWN_ATTACKS};
use super::attacks::{QUEEN_MOVES, ROOK_MOVES};
use super::castling::{can_castle_under, Wing};
use super::legality::classify;
use super::material::{Color, Pair, Piece};
use super::position::{LegalMove, Pos, Position};
use super::square::{Mask, Offset, Rank, Square};
use super::Turn;

use Piece::*;

/// Legal moves of a single piece, keyed by destination.
#[derive(Debug, Clone, Default)]
pub struct MoveSet {
    destinations: Mask,
    map: HashMap<Square, LegalMove>,
}

impl MoveSet {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn insert(&mut self, dest: Square, mv: LegalMove) {
        self.destinations |= dest;
        self.map.insert(dest, mv);
    }
    pub fn destinations(&self) -> Mask {
        self.destinations
    }
    pub fn get(&self, dest: Square) -> Option<LegalMove> {
        self.map.get(&dest).copied()
    }
    pub fn contains(&self, dest: Square) -> bool {
        self.destinations.contains(dest)
    }
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
    /// Moves in board order of their destination.
    pub fn moves(&self) -> impl Iterator<Item = LegalMove> + '_ {
        self.destinations.iter().filter_map(|dest| self.get(dest))
    }
}

impl Index<Square> for MoveSet {
    type Output = LegalMove;
    fn index(&self, dest: Square) -> &Self::Output {
        self.map.index(&dest)
    }
}

/// A position together with both sides' attack maps, computed once so
/// that enumerating many pieces does not rebuild them.
#[derive(Debug, Clone)]
pub struct MoveState<'a> {
    position: &'a Position,
    threats: Pair<Mask>,
}

impl Turn for MoveState<'_> {
    fn turn(&self) -> Color {
        self.position.turn()
    }
}

impl AsRef<Position> for MoveState<'_> {
    fn as_ref(&self) -> &Position {
        self.position
    }
}

impl Pos for MoveState<'_> {}

impl<'a> MoveState<'a> {
    pub fn new(position: &'a Position) -> Self {
        Self {
            position,
            threats: Pair::new(
                attacked(position, Color::White),
                attacked(position, Color::Black),
            ),
        }
    }

    /// Squares attacked by `attacker`.
    #[inline]
    pub fn threats(&self, attacker: Color) -> Mask {
        self.threats[attacker]
    }

    /// Every legal move of the piece on `from`, whichever side it
    /// belongs to. Empty when `from` is vacant.
    pub fn legal_moves(&self, from: Square) -> MoveSet {
        let mut result = MoveSet::new();
        let Some(occupant) = self.contents(from) else {
            return result;
        };
        let color = occupant.color();
        let candidates = match occupant.piece() {
            King => self.king_candidates(from, color),
            Queen => QUEEN_MOVES[from],
            Rook => ROOK_MOVES[from],
            Bishop => BISHOP_MOVES[from],
            Knight => KNIGHT_MOVES[from],
            Pawn => pawn_candidates(from, color),
        };
        for dest in (candidates & !self.occupied_by(color)).iter() {
            if let Some(mv) = classify(self.position, from, dest, None) {
                result.insert(dest, mv);
            }
        }
        result
    }

    #[inline]
    pub fn legal_destinations(&self, from: Square) -> Mask {
        self.legal_moves(from).destinations()
    }

    /// Every legal move available to `color`, ordered by origin then
    /// destination.
    pub fn all_moves(&self, color: Color) -> Vec<LegalMove> {
        self.occupied_by(color)
            .iter()
            .flat_map(|from| self.legal_moves(from).moves().collect::<Vec<_>>())
            .collect()
    }

    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.occupied_by(color)
            .iter()
            .any(|from| !self.legal_moves(from).is_empty())
    }

    fn king_candidates(&self, from: Square, color: Color) -> Mask {
        // a square attacked now stays attacked once the king stands on it
        let threats = self.threats(!color);
        let mut candidates = KING_MOVES[from] & !threats;
        for wing in [Wing::KingSide, Wing::QueenSide] {
            if can_castle_under(self.position, from, wing, threats) {
                candidates |= self.position.castling(color).king_dest(wing);
            }
        }
        candidates
    }
}

fn pawn_candidates(from: Square, color: Color) -> Mask {
    let forward = Offset::forward(color);
    let mut candidates = PAWN_ATTACKS[color][from];
    if let Some(single) = from + forward {
        candidates |= single;
        if from.rank() == Rank::pawn_rank(color) {
            if let Some(double) = single + forward {
                candidates |= double;
            }
        }
    }
    candidates
}

/// Squares the piece on `from` may legally move to.
pub fn legal_destinations(pos: &Position, from: Square) -> Mask {
    MoveState::new(pos).legal_destinations(from)
}

/// Every legal move available to `color` in `pos`.
pub fn legal_moves(pos: &Position, color: Color) -> Vec<LegalMove> {
    MoveState::new(pos).all_moves(color)
}
