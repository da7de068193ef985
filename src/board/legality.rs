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

use super::attacks::{is_attacked, BISHOP_MOVES, KING_MOVES, KNIGHT_MOVES, PAWN_ATTACKS};
use super::attacks::{QUEEN_MOVES, ROOK_MOVES};
use super::castling::{can_castle, Wing};
use super::material::{Color, Occupant, Piece, Promotion};
use super::position::{between, LegalMove, Pos, Position};
use super::square::{Mask, Offset, Rank, Square};
use super::Turn;

use Piece::*;

/// Whether `occupant`, standing on `from`, may move to `to`.
pub fn is_legal(pos: &Position, occupant: &Occupant, from: Square, to: Square) -> bool {
    if pos.contents(from) != Some(*occupant) {
        return false;
    }
    classify(pos, from, to, None).is_some()
}

/// Works out which kind of move `from` -> `to` is, or `None` if it is
/// not legal. A pawn arriving on its last rank promotes to `promotion`,
/// or to a queen when none is given. Asking for a promotion on any
/// other move makes it illegal.
pub fn classify(
    pos: &Position,
    from: Square,
    to: Square,
    promotion: Option<Promotion>,
) -> Option<LegalMove> {
    let occupant = pos.contents(from)?;
    let mv = shape(pos, &occupant, from, to, promotion)?;
    if promotion.is_some() && !matches!(mv, LegalMove::Promoting(..)) {
        return None;
    }
    leaves_king_safe(pos, mv, occupant.color()).then_some(mv)
}

/// Plays `mv` on a copy of the board and reports whether the king of
/// `color` is out of reach of the opponent afterwards.
pub(super) fn leaves_king_safe(pos: &Position, mv: LegalMove, color: Color) -> bool {
    let mut after = pos.clone();
    if after.apply_move(mv).is_none() {
        return false;
    }
    match after.king(color) {
        Some(king) => !is_attacked(&after, king, !color),
        None => true,
    }
}

/// Movement geometry, obstruction and capture rules. Self-check is not
/// considered here.
fn shape(
    pos: &Position,
    occupant: &Occupant,
    from: Square,
    to: Square,
    promotion: Option<Promotion>,
) -> Option<LegalMove> {
    if from == to {
        return None;
    }
    let color = occupant.color();
    if pos.occupied_by(color).contains(to) {
        return None;
    }
    let standard = LegalMove::Standard(from, to);
    match occupant.piece() {
        Pawn => pawn_shape(pos, color, from, to, promotion),
        Knight => KNIGHT_MOVES[from].contains(to).then_some(standard),
        Bishop => slides(pos, from, to, BISHOP_MOVES[from]).then_some(standard),
        Rook => slides(pos, from, to, ROOK_MOVES[from]).then_some(standard),
        Queen => slides(pos, from, to, QUEEN_MOVES[from]).then_some(standard),
        King => {
            if KING_MOVES[from].contains(to) {
                return Some(standard);
            }
            let wing = Wing::of_king_step(from, to)?;
            can_castle(pos, from, wing).then_some(LegalMove::Castle(color, wing))
        }
    }
}

fn slides(pos: &Position, from: Square, to: Square, reach: Mask) -> bool {
    reach.contains(to) && (between(from, to) & pos.occupied()).is_empty()
}

fn pawn_shape(
    pos: &Position,
    color: Color,
    from: Square,
    to: Square,
    promotion: Option<Promotion>,
) -> Option<LegalMove> {
    let forward = Offset::forward(color);
    let single = from + forward;
    let arrives = |mv: LegalMove| {
        if to.rank() == Rank::last_rank(color) {
            LegalMove::Promoting(from, to, promotion.unwrap_or_default())
        } else {
            mv
        }
    };

    if single == Some(to) {
        return pos.is_vacant(to).then(|| arrives(LegalMove::Standard(from, to)));
    }
    if let Some(single) = single {
        if from.rank() == Rank::pawn_rank(color) && single + forward == Some(to) {
            let clear = pos.is_vacant(single) && pos.is_vacant(to);
            return clear.then_some(LegalMove::DoubleAdvance(from, to));
        }
    }
    if !PAWN_ATTACKS[color][from].contains(to) {
        return None;
    }
    if pos.contents(to).is_some() {
        // same-side targets were turned away before we got here
        return Some(arrives(LegalMove::Standard(from, to)));
    }
    en_passant(pos, color, from, to).then_some(LegalMove::EnPassant(from, to))
}

/// An empty diagonal may be taken only when the opposing pawn beside us
/// made a two-square advance on the immediately preceding move.
fn en_passant(pos: &Position, color: Color, from: Square, to: Square) -> bool {
    if pos.turn() != color || pos.en_passant() != Some(to) {
        return false;
    }
    let victim = Square::new(to.file(), from.rank());
    matches!(
        pos.contents(victim),
        Some(pawn) if pawn.piece() == Pawn && pawn.color() != color
    )
}
