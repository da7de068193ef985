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

use serde::Serialize;
use thiserror::Error;

use super::{GameId, Status};
use crate::{Color, Coord, Piece, Square};

/// Why a session turned a request away. The session is left exactly as
/// it was whenever one of these is returned.
#[derive(Error, Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("Session is not accepting moves (status: {0})")]
    SessionNotAcceptingMoves(Status),
    #[error("Not your turn: {expected} to move")]
    WrongTurn { expected: Color },
    #[error("Piece on {0} does not match the one referenced")]
    StalePieceReference(Square),
    #[error("Illegal move: {piece} from {from} to {to}")]
    IllegalMove { piece: Piece, from: Square, to: Square },
    #[error("Coordinates {0} are off the board")]
    OutOfBounds(Coord),
    #[error("No pawn awaiting promotion on {0}")]
    NothingToPromote(Square),
    #[error("Pawn on {0} must be promoted first")]
    PromotionPending(Square),
}

/// A custom starting position that no game could be played from.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    #[error("Expecting exactly 1 {0} king, found {1}")]
    KingCount(Color, usize),
    #[error("{0} king can be captured immediately")]
    KingCapturable(Color),
    #[error("{0} pawn cannot stand on {1}")]
    PawnOnBackRank(Color, Square),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown game {0}")]
    UnknownGame(GameId),
    #[error("Game {0} already exists")]
    DuplicateGame(GameId),
    #[error("Internal error: session lock poisoned")]
    Poisoned,
}
