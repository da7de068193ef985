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

use super::attacks::is_attacked;
use super::material::Color;
use super::moves::MoveState;
use super::position::{Pos, Position};

/// Whether `side`'s king is attacked. A side without a king is never in
/// check.
pub fn in_check(pos: &Position, side: Color) -> bool {
    pos.king(side)
        .map(|king| is_attacked(pos, king, !side))
        .unwrap_or(false)
}

pub fn has_legal_moves(pos: &Position, side: Color) -> bool {
    MoveState::new(pos).has_legal_moves(side)
}

pub fn is_checkmate(pos: &Position, side: Color) -> bool {
    in_check(pos, side) && !has_legal_moves(pos, side)
}

pub fn is_stalemate(pos: &Position, side: Color) -> bool {
    !in_check(pos, side) && !has_legal_moves(pos, side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::material::Material;
    use crate::board::position::LegalMove;
    use Color::*;
    use crate::board::square::Square::*;

    #[test]
    fn test_opening_is_quiet() {
        let pos = Position::new();
        for side in [White, Black] {
            assert!(!in_check(&pos, side));
            assert!(has_legal_moves(&pos, side));
            assert!(!is_checkmate(&pos, side));
            assert!(!is_stalemate(&pos, side));
        }
    }
    #[test]
    fn test_fools_mate() {
        let mut pos = Position::new();
        for mv in [
            LegalMove::Standard(F2, F3),
            LegalMove::DoubleAdvance(E7, E5),
            LegalMove::DoubleAdvance(G2, G4),
            LegalMove::Standard(D8, H4),
        ] {
            pos.apply_move(mv).unwrap();
        }
        assert!(in_check(&pos, White));
        assert!(is_checkmate(&pos, White));
        assert!(!is_stalemate(&pos, White));
        assert!(!in_check(&pos, Black));
    }
    #[test]
    fn test_check_with_escape_is_not_mate() {
        let pos = Position::empty()
            .with(E1, Material::WK)
            .with(E8, Material::BR)
            .with(A8, Material::BK);
        assert!(in_check(&pos, White));
        assert!(!is_checkmate(&pos, White));
    }
    #[test]
    fn test_stalemate_after_queen_move() {
        let mut pos = Position::empty()
            .with(A8, Material::BK)
            .with(B6, Material::WK)
            .with(C5, Material::WQ);
        assert!(!is_stalemate(&pos, Black));
        pos.apply_move(LegalMove::Standard(C5, C7)).unwrap();
        assert!(is_stalemate(&pos, Black));
        assert!(!is_checkmate(&pos, Black));
    }
    #[test]
    fn test_missing_king_is_never_in_check() {
        let pos = Position::empty().with(E4, Material::BQ).with(E1, Material::WR);
        assert!(!in_check(&pos, White));
    }
}
