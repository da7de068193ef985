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

use crate::Promotion;

/// Plies without a pawn move or capture after which the game is drawn.
pub const DRAW_HALF_MOVES: u16 = 100;

/// Per-session rule settings. Any field left out when deserializing
/// takes its standard value.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    pub draw_half_moves: u16,
    /// Piece a pawn becomes when a move reaches the last rank without
    /// naming one.
    pub default_promotion: Promotion,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            draw_half_moves: DRAW_HALF_MOVES,
            default_promotion: Promotion::Queen,
        }
    }
}
