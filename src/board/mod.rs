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

//! Board model and rules of standard chess
//!
//! Everything in this module is pure and synchronous: functions take a
//! `Position` by reference and never block or perform I/O, so they can
//! run on any thread. The following rules are supported:
//!
//! [x] Piece movement, obstruction and capture
//! [x] Check avoidance for every move, king moves and castling included
//! [x] Castling with per-wing rights
//! [x] En passant
//! [x] Promotion on arrival
//! [x] Checkmate and stalemate detection
//! [ ] Chess960
//! [ ] Repetition and insufficient material
//!
//! Some of the key abstractions include:
//!
//! * A `Square` names one of the 64 squares (`A1` .. `H8`). `Rank` and
//!   `File` are its row and column. `Coord` is the raw zero-based
//!   coordinate pair a caller may hand in; it converts to a `Square`
//!   only when it lies on the board.
//!
//! * A `Mask` is a 64-bit set of squares. Attack maps and destination
//!   sets are both masks and combine with `|`, `&` and `!`.
//!
//! * An `Occupant` is what stands on a square: its `Material` (side
//!   plus `Piece` kind), a stable `PieceId` and whether it has moved.
//!
//! * A `Position` holds the squares, castling rights, the en-passant
//!   target, both counters and the side to move. `apply_move` is the
//!   only way to advance it and takes a `LegalMove`, which is what the
//!   legality engine (`classify`) produces.
//!
//! * `attacked` builds a side's attack map, `is_legal` decides a single
//!   move, `MoveState` enumerates destinations and the terminal
//!   functions (`in_check`, `is_checkmate`, `is_stalemate`) sit on top.

mod attacks;
mod castling;
mod legality;
mod material;
mod moves;
mod position;
mod square;
mod terminal;

pub use attacks::{attacked, attacks_from, is_attacked};
pub use castling::*;
pub use legality::{classify, is_legal};
pub use material::*;
pub use moves::*;
pub use position::*;
pub use square::*;
pub use terminal::*;

pub trait Turn {
    fn turn(&self) -> Color;
}
