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

//! Attack maps: the raw geometric reach of one side's pieces, ignoring
//! whose turn it is and what stands on the target square.

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use super::material::{Color, Pair, Piece};
use super::position::{shielded, Pos, Position};
use super::square::{Direction, Mask, Offset, Rank, Square};

use Piece::*;

/// Every square `attacker` could capture onto.
pub fn attacked(pos: &Position, attacker: Color) -> Mask {
    pos.occupied_by(attacker)
        .iter()
        .fold(Mask::empty(), |mask, from| mask | attacks_from(pos, from))
}

#[inline]
pub fn is_attacked(pos: &Position, square: Square, attacker: Color) -> bool {
    attacked(pos, attacker).contains(square)
}

/// The squares attacked by whatever stands on `from`. Sliding pieces stop
/// at, and include, the first occupied square in each direction.
pub fn attacks_from(pos: &Position, from: Square) -> Mask {
    let Some(occupant) = pos.contents(from) else {
        return Mask::empty();
    };
    match occupant.piece() {
        King => KING_MOVES[from],
        Queen => unblocked(pos, from, QUEEN_MOVES[from]),
        Rook => unblocked(pos, from, ROOK_MOVES[from]),
        Bishop => unblocked(pos, from, BISHOP_MOVES[from]),
        Knight => KNIGHT_MOVES[from],
        Pawn => PAWN_ATTACKS[occupant.color()][from],
    }
}

fn unblocked(pos: &Position, from: Square, mut reach: Mask) -> Mask {
    for square in (reach & pos.occupied()).iter() {
        reach &= !shielded(from, square);
    }
    reach
}

pub(super) static KING_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::empty(); 64];
    for square in Square::iter() {
        array[square] = Direction::iter().filter_map(|dir| square + dir).collect();
    }
    array
});

pub(super) static KNIGHT_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(-2, -1),
        Offset::new(-2, 1),
        Offset::new(2, -1),
        Offset::new(2, 1),
        Offset::new(-1, -2),
        Offset::new(-1, 2),
        Offset::new(1, -2),
        Offset::new(1, 2),
    ];
    let mut array = [Mask::empty(); 64];
    for square in Square::iter() {
        array[square] = OFFSETS.into_iter().filter_map(|offset| square + offset).collect();
    }
    array
});

fn rays<I>(square: Square, directions: I) -> Mask
where
    I: Iterator<Item = Direction>,
{
    let mut mask = Mask::empty();
    for dir in directions {
        let mut next = square + dir;
        while let Some(sq) = next {
            mask |= sq;
            next = sq + dir;
        }
    }
    mask
}

pub(super) static ROOK_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::empty(); 64];
    for square in Square::iter() {
        array[square] = rays(square, Direction::horizontals());
    }
    array
});

pub(super) static BISHOP_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::empty(); 64];
    for square in Square::iter() {
        array[square] = rays(square, Direction::diagonals());
    }
    array
});

pub(super) static QUEEN_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::empty(); 64];
    for square in Square::iter() {
        array[square] = ROOK_MOVES[square] | BISHOP_MOVES[square];
    }
    array
});

/// Pawns attack the two forward diagonals only, never straight ahead.
pub(super) static PAWN_ATTACKS: Lazy<Pair<[Mask; 64]>> = Lazy::new(|| {
    let table = |color: Color| {
        let forward = Offset::forward(color);
        let offsets = [Offset::new(-1, forward.y), Offset::new(1, forward.y)];
        let mut array = [Mask::empty(); 64];
        for square in Square::iter() {
            // no pawn ever stands on a back rank
            if square.rank() == Rank::back_rank(Color::White)
                || square.rank() == Rank::back_rank(Color::Black)
            {
                continue;
            }
            array[square] = offsets.into_iter().filter_map(|offset| square + offset).collect();
        }
        array
    };
    Pair::new(table(Color::White), table(Color::Black))
});
