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
use std::fmt;

use crate::{Color, Coord, Material, Occupant, PieceId, Promotion, Square};

/// The piece a caller believes it is moving.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRef {
    pub id: PieceId,
    pub material: Material,
}

impl PieceRef {
    pub fn new(id: PieceId, material: Material) -> Self {
        Self { id, material }
    }
    /// Whether `occupant` is the very piece this reference names.
    pub fn matches(&self, occupant: &Occupant) -> bool {
        self.id == occupant.id() && self.material == occupant.material()
    }
}

impl From<Occupant> for PieceRef {
    fn from(occupant: Occupant) -> Self {
        Self::new(occupant.id(), occupant.material())
    }
}

/// A move as submitted by one of the players.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRequest {
    pub from: Coord,
    pub to: Coord,
    pub piece: PieceRef,
    #[serde(default)]
    pub promotion: Option<Promotion>,
    /// The side of the player submitting the move.
    pub side: Color,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square, piece: PieceRef, side: Color) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            piece,
            promotion: None,
            side,
        }
    }
    pub fn promoting(mut self, promotion: Promotion) -> Self {
        self.promotion = Some(promotion);
        self
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.side, self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "={promotion:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;
    use Square::*;

    #[test]
    fn test_piece_ref_matches_identity_and_material() {
        let pos = Position::new();
        let knight = pos[G1].unwrap();
        let piece = PieceRef::from(knight);
        assert!(piece.matches(&knight));
        assert!(!piece.matches(&pos[B1].unwrap()));
        let wrong = PieceRef::new(knight.id(), Material::WB);
        assert!(!wrong.matches(&knight));
    }
    #[test]
    fn test_request_deserializes_without_promotion() {
        let json = r#"{
            "from": {"file": 4, "rank": 1},
            "to": {"file": 4, "rank": 3},
            "piece": {"id": 52, "material": {"color": "White", "piece": "Pawn"}},
            "side": "White"
        }"#;
        let request: MoveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.from.to_square(), Some(E2));
        assert_eq!(request.to.to_square(), Some(E4));
        assert_eq!(request.promotion, None);
        assert_eq!(request.piece.id, PieceId::new(52));
    }
}
