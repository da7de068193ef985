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
use strum::IntoEnumIterator;
use strum_macros::Display;
use tracing::{debug, info, trace};

use super::{DrawReason, GameResult, MoveRejection, MoveRequest, SessionConfig, SetupError, WinReason};
use crate::{classify, has_legal_moves, in_check, is_attacked};
use crate::{CastlingRights, Color, LegalMove, Mask, MoveState, Occupant, Pair, Piece};
use crate::{Pos, Position, Promotion, Rank, Square, Turn, Wing};

use MoveRejection::*;

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Fewer than two players are present.
    Waiting,
    Playing,
    /// The side to move is in check.
    Check,
    Checkmate,
    Stalemate,
    /// Drawn by the half-move clock.
    Draw,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Checkmate | Status::Stalemate | Status::Draw)
    }
    pub fn accepts_moves(&self) -> bool {
        matches!(self, Status::Playing | Status::Check)
    }
}

/// The most recently applied move. Only one is ever kept.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
    /// The moved piece as it stands on `to`.
    pub piece: Occupant,
    pub captured: Option<Occupant>,
    pub promotion: Option<Promotion>,
    pub castle: Option<Wing>,
    pub en_passant: bool,
}

/// Everything a transport needs to show the game after a change.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub status: Status,
    pub turn: Color,
    pub winner: Option<Color>,
    pub pieces: Vec<(Square, Occupant)>,
    pub castling: Pair<CastlingRights>,
    pub en_passant: Option<Square>,
    pub half_move_clock: u16,
    pub full_moves: u16,
    pub last_move: Option<LastMove>,
}

/// One game in progress. All changes go through `apply_move`,
/// `set_occupancy` and `request_promotion`, each of which either
/// succeeds completely or leaves the session untouched.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    position: Position,
    status: Status,
    winner: Option<Color>,
    last_move: Option<LastMove>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Turn for Session {
    fn turn(&self) -> Color {
        self.position.turn()
    }
}

impl AsRef<Position> for Session {
    fn as_ref(&self) -> &Position {
        &self.position
    }
}

impl Pos for Session {}

impl Session {
    /// A new game from the standard arrangement, waiting for players.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            position: Position::new(),
            status: Status::Waiting,
            winner: None,
            last_move: None,
        }
    }

    /// A new game from a custom arrangement. Each side needs exactly one
    /// king, and the side to move must not already be able to take the
    /// other king.
    pub fn from_position(position: Position, config: SessionConfig) -> Result<Self, SetupError> {
        validate_setup(&position)?;
        Ok(Self {
            config,
            position,
            status: Status::Waiting,
            winner: None,
            last_move: None,
        })
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }
    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }
    #[inline]
    pub fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.status {
            Status::Checkmate => self
                .winner
                .map(|winner| GameResult::Win(winner, WinReason::CheckMate)),
            Status::Stalemate => Some(GameResult::Draw(DrawReason::StaleMate)),
            Status::Draw => Some(GameResult::Draw(DrawReason::FiftyMoves)),
            Status::Waiting | Status::Playing | Status::Check => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let castling = Pair::new(
            *self.position.castling(Color::White),
            *self.position.castling(Color::Black),
        );
        SessionSnapshot {
            status: self.status,
            turn: self.turn(),
            winner: self.winner,
            pieces: self.position.occupants().collect(),
            castling,
            en_passant: self.position.en_passant(),
            half_move_clock: self.position.half_move_clock(),
            full_moves: self.position.full_moves(),
            last_move: self.last_move,
        }
    }

    /// Tells the session how many players are present. Below two the game
    /// pauses in `Waiting`; once both are back the status is worked out
    /// again from the board. A finished game ignores this.
    pub fn set_occupancy(&mut self, side_count: usize) -> Status {
        if self.status.is_terminal() {
            trace!(side_count, status = %self.status, "occupancy ignored");
            return self.status;
        }
        let status = if side_count < 2 {
            Status::Waiting
        } else if self.status == Status::Waiting {
            self.evaluate()
        } else {
            self.status
        };
        trace!(side_count, from = %self.status, to = %status, "occupancy changed");
        self.settle(status);
        self.status
    }

    /// Validates and plays a move. On any rejection nothing changes and
    /// the same request keeps producing the same rejection.
    pub fn apply_move(&mut self, request: &MoveRequest) -> Result<SessionSnapshot, MoveRejection> {
        match self.play(request) {
            Ok(snapshot) => Ok(snapshot),
            Err(reason) => {
                debug!(%request, %reason, "move rejected");
                Err(reason)
            }
        }
    }

    /// Squares the piece on `square` may move to. Empty unless the game
    /// is under way and the piece belongs to the side to move.
    pub fn legal_destinations(&self, square: Square) -> Mask {
        if !self.status.accepts_moves() || self.pending_promotion().is_some() {
            return Mask::empty();
        }
        match self.contents(square) {
            Some(occupant) if occupant.color() == self.turn() => {
                MoveState::new(&self.position).legal_destinations(square)
            }
            _ => Mask::empty(),
        }
    }

    /// Pawn of the side that just moved still standing on its last rank.
    /// Play stays blocked until it is promoted.
    pub fn pending_promotion(&self) -> Option<Square> {
        let owner = !self.turn();
        self.position
            .pieces_of(owner, Piece::Pawn)
            .iter()
            .find(|square| square.rank() == Rank::last_rank(owner))
    }

    /// Promotes a pawn left standing on its last rank by the side that
    /// just moved. Only a custom starting position can leave one there,
    /// since moves onto the last rank promote as they are played.
    pub fn request_promotion(
        &mut self,
        square: Square,
        promotion: Promotion,
    ) -> Result<SessionSnapshot, MoveRejection> {
        if !self.status.accepts_moves() {
            return Err(SessionNotAcceptingMoves(self.status));
        }
        let owner = !self.turn();
        let awaiting = matches!(
            self.contents(square),
            Some(pawn) if pawn.piece() == Piece::Pawn
                && pawn.color() == owner
                && square.rank() == Rank::last_rank(owner)
        );
        if !awaiting {
            debug!(%square, "nothing to promote");
            return Err(NothingToPromote(square));
        }
        let promoted = self
            .position
            .promote(square, promotion)
            .ok_or(NothingToPromote(square))?;
        if let Some(last) = self.last_move.as_mut().filter(|last| last.to == square) {
            last.piece = promoted;
            last.promotion = Some(promotion);
        }
        debug!(%square, ?promotion, id = %promoted.id(), "pawn promoted");
        let status = self.evaluate();
        self.settle(status);
        Ok(self.snapshot())
    }

    fn play(&mut self, request: &MoveRequest) -> Result<SessionSnapshot, MoveRejection> {
        if !self.status.accepts_moves() {
            return Err(SessionNotAcceptingMoves(self.status));
        }
        if let Some(square) = self.pending_promotion() {
            return Err(PromotionPending(square));
        }
        let expected = self.turn();
        if request.side != expected || request.piece.material.color() != expected {
            return Err(WrongTurn { expected });
        }
        let from = request.from.to_square().ok_or(OutOfBounds(request.from))?;
        let to = request.to.to_square().ok_or(OutOfBounds(request.to))?;
        let occupant = self
            .contents(from)
            .filter(|occupant| request.piece.matches(occupant))
            .ok_or(StalePieceReference(from))?;

        let reaches_last_rank =
            occupant.piece() == Piece::Pawn && to.rank() == Rank::last_rank(occupant.color());
        let promotion = match request.promotion {
            Some(promotion) => Some(promotion),
            None if reaches_last_rank => Some(self.config.default_promotion),
            None => None,
        };
        let illegal = IllegalMove {
            piece: occupant.piece(),
            from,
            to,
        };
        let mv = classify(&self.position, from, to, promotion).ok_or(illegal)?;
        let applied = self.position.apply_move(mv).ok_or(illegal)?;

        let last = LastMove {
            from,
            to,
            piece: self.contents(to).unwrap_or(applied.mover),
            captured: applied.captured,
            promotion: applied.promotion,
            castle: match mv {
                LegalMove::Castle(_, wing) => Some(wing),
                _ => None,
            },
            en_passant: matches!(mv, LegalMove::EnPassant(..)),
        };
        debug!(
            side = %expected,
            piece = %occupant.piece(),
            %from,
            %to,
            capture = last.captured.is_some(),
            "move applied"
        );
        let status = self.evaluate();
        self.settle(status);
        self.last_move = Some(last);
        Ok(self.snapshot())
    }

    /// Status of the board for the side to move, most decisive first.
    fn evaluate(&self) -> Status {
        let side = self.turn();
        let check = in_check(&self.position, side);
        let can_move = has_legal_moves(&self.position, side);
        if !can_move {
            return if check {
                Status::Checkmate
            } else {
                Status::Stalemate
            };
        }
        if self.position.half_move_clock() >= self.config.draw_half_moves {
            Status::Draw
        } else if check {
            Status::Check
        } else {
            Status::Playing
        }
    }

    fn settle(&mut self, status: Status) {
        if status == Status::Checkmate {
            self.winner = Some(!self.turn());
        }
        if status.is_terminal() && status != self.status {
            info!(%status, winner = ?self.winner, "game over");
        }
        self.status = status;
    }
}

fn validate_setup(position: &Position) -> Result<(), SetupError> {
    for color in Color::iter() {
        let kings = position.pieces_of(color, Piece::King).len();
        if kings != 1 {
            return Err(SetupError::KingCount(color, kings));
        }
        for square in position.pieces_of(color, Piece::Pawn).iter() {
            let stranded = square.rank() == Rank::back_rank(color)
                || (color == position.turn() && square.rank() == Rank::last_rank(color));
            if stranded {
                return Err(SetupError::PawnOnBackRank(color, square));
            }
        }
    }
    let waiting = !position.turn();
    if let Some(king) = position.king(waiting) {
        if is_attacked(position, king, position.turn()) {
            return Err(SetupError::KingCapturable(waiting));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, PieceRef};
    use Color::*;
    use Square::*;

    fn started() -> Session {
        let mut session = Session::new();
        session.set_occupancy(2);
        session
    }

    fn started_from(position: Position) -> Session {
        let mut session = Session::from_position(position, SessionConfig::default()).unwrap();
        session.set_occupancy(2);
        session
    }

    fn request(session: &Session, from: Square, to: Square) -> MoveRequest {
        let occupant = session.position()[from].unwrap();
        MoveRequest::new(from, to, occupant.into(), occupant.color())
    }

    fn play(session: &mut Session, from: Square, to: Square) -> SessionSnapshot {
        let request = request(session, from, to);
        session.apply_move(&request).unwrap()
    }

    #[test]
    fn test_new_session_waits_for_players() {
        let mut session = Session::new();
        assert_eq!(session.status(), Status::Waiting);
        assert_eq!(session.turn(), White);
        assert_eq!(session.position().half_move_clock(), 0);
        assert_eq!(session.position().full_moves(), 0);
        let req = request(&session, E2, E4);
        assert_eq!(
            session.apply_move(&req),
            Err(SessionNotAcceptingMoves(Status::Waiting))
        );
        assert_eq!(session.set_occupancy(1), Status::Waiting);
        assert_eq!(session.set_occupancy(2), Status::Playing);
        assert!(session.apply_move(&req).is_ok());
    }
    #[test]
    fn test_occupancy_pauses_and_resumes() {
        let mut session = started();
        play(&mut session, E2, E4);
        assert_eq!(session.set_occupancy(1), Status::Waiting);
        assert!(session.legal_destinations(E7).is_empty());
        assert_eq!(session.set_occupancy(2), Status::Playing);
        assert_eq!(session.legal_destinations(E7), Mask::from_squares([E6, E5]));
    }
    #[test]
    fn test_fools_mate() {
        let mut session = started();
        play(&mut session, F2, F3);
        play(&mut session, E7, E5);
        play(&mut session, G2, G4);
        let snapshot = play(&mut session, D8, H4);
        assert_eq!(snapshot.status, Status::Checkmate);
        assert_eq!(snapshot.winner, Some(Black));
        assert_eq!(session.result(), Some(GameResult::Win(Black, WinReason::CheckMate)));
        assert_eq!(session.set_occupancy(1), Status::Checkmate);
        let req = request(&session, A2, A3);
        assert_eq!(
            session.apply_move(&req),
            Err(SessionNotAcceptingMoves(Status::Checkmate))
        );
    }
    #[test]
    fn test_check_and_release() {
        let mut session = started();
        play(&mut session, E2, E4);
        play(&mut session, F7, F6);
        let snapshot = play(&mut session, D1, H5);
        assert_eq!(snapshot.status, Status::Check);
        play(&mut session, G7, G6);
        assert_eq!(session.status(), Status::Playing);
    }
    #[test]
    fn test_wrong_turn() {
        let mut session = started();
        let req = request(&session, E7, E5);
        assert_eq!(session.apply_move(&req), Err(WrongTurn { expected: White }));
        // a black player claiming a white piece is turned away too
        let mut req = request(&session, E2, E4);
        req.side = Black;
        assert_eq!(session.apply_move(&req), Err(WrongTurn { expected: White }));
    }
    #[test]
    fn test_out_of_bounds() {
        let mut session = started();
        let mut req = request(&session, E2, E4);
        req.to = crate::Coord::new(4, 8);
        assert_eq!(session.apply_move(&req), Err(OutOfBounds(crate::Coord::new(4, 8))));
    }
    #[test]
    fn test_stale_piece_reference() {
        let mut session = started();
        let mut req = request(&session, E2, E4);
        req.piece = PieceRef::from(session.position()[D2].unwrap());
        assert_eq!(session.apply_move(&req), Err(StalePieceReference(E2)));
        let req = MoveRequest::new(E4, E5, req.piece, White);
        assert_eq!(session.apply_move(&req), Err(StalePieceReference(E4)));
    }
    #[test]
    fn test_rejection_leaves_session_untouched() {
        let mut session = started();
        let before = session.snapshot();
        let req = request(&session, G1, G3);
        for _ in 0..3 {
            assert_eq!(
                session.apply_move(&req),
                Err(IllegalMove {
                    piece: Piece::Knight,
                    from: G1,
                    to: G3
                })
            );
            assert_eq!(session.snapshot(), before);
        }
    }
    #[test]
    fn test_en_passant_only_on_next_move() {
        let mut session = started();
        play(&mut session, E2, E4);
        play(&mut session, A7, A6);
        play(&mut session, E4, E5);
        play(&mut session, D7, D5);
        assert!(session.legal_destinations(E5).contains(D6));
        let snapshot = play(&mut session, E5, D6);
        assert!(snapshot.last_move.unwrap().en_passant);
        assert!(session.position()[D5].is_none());
        assert_eq!(snapshot.half_move_clock, 0);

        let mut session = started();
        play(&mut session, E2, E4);
        play(&mut session, A7, A6);
        play(&mut session, E4, E5);
        play(&mut session, D7, D5);
        play(&mut session, H2, H3);
        play(&mut session, H7, H6);
        let req = request(&session, E5, D6);
        assert_eq!(
            session.apply_move(&req),
            Err(IllegalMove {
                piece: Piece::Pawn,
                from: E5,
                to: D6
            })
        );
    }
    #[test]
    fn test_castling_moves_rook_and_clears_rights() {
        let mut session = started();
        play(&mut session, E2, E4);
        play(&mut session, E7, E5);
        play(&mut session, G1, F3);
        play(&mut session, B8, C6);
        play(&mut session, F1, C4);
        play(&mut session, G8, F6);
        let snapshot = play(&mut session, E1, G1);
        assert_eq!(snapshot.last_move.unwrap().castle, Some(Wing::KingSide));
        assert_eq!(session.position()[F1].unwrap().material(), Material::WR);
        assert!(session.position()[H1].is_none());
        assert!(!snapshot.castling[White].oo() && !snapshot.castling[White].ooo());
        assert!(snapshot.castling[Black].oo());
    }
    #[test]
    fn test_half_move_clock_draw() {
        let mut session = started();
        let shuffle = [(G1, F3), (G8, F6), (F3, G1), (F6, G8)];
        for ply in 0..99 {
            let (from, to) = shuffle[ply % 4];
            let snapshot = play(&mut session, from, to);
            assert_eq!(snapshot.status, Status::Playing);
            assert_eq!(snapshot.half_move_clock as usize, ply + 1);
        }
        let (from, to) = shuffle[99 % 4];
        let snapshot = play(&mut session, from, to);
        assert_eq!(snapshot.half_move_clock, 100);
        assert_eq!(snapshot.status, Status::Draw);
        assert_eq!(snapshot.winner, None);
        assert_eq!(session.result(), Some(GameResult::Draw(DrawReason::FiftyMoves)));
    }
    #[test]
    fn test_pawn_move_resets_clock() {
        let mut session = started();
        let shuffle = [(G1, F3), (G8, F6), (F3, G1), (F6, G8)];
        for ply in 0..60 {
            let (from, to) = shuffle[ply % 4];
            play(&mut session, from, to);
        }
        assert_eq!(session.position().half_move_clock(), 60);
        assert_eq!(session.position().full_moves(), 30);
        play(&mut session, E2, E4);
        assert_eq!(session.position().half_move_clock(), 0);
        let reply = [(G8, F6), (G1, F3), (F6, G8), (F3, G1)];
        for ply in 0..60 {
            let (from, to) = reply[ply % 4];
            play(&mut session, from, to);
        }
        assert_eq!(session.position().half_move_clock(), 60);
        assert_eq!(session.status(), Status::Playing);
    }
    #[test]
    fn test_capture_resets_clock() {
        let position = Position::empty()
            .with(F1, Material::WK)
            .with(E8, Material::BK)
            .with(B1, Material::WN)
            .with(G8, Material::BN)
            .with(H1, Material::WR)
            .with(A1, Material::BB);
        let mut session = started_from(position);
        let shuffle = [(B1, C3), (G8, F6), (C3, B1), (F6, G8)];
        for ply in 0..57 {
            let (from, to) = shuffle[ply % 4];
            play(&mut session, from, to);
        }
        assert_eq!(session.position().half_move_clock(), 57);
        assert_eq!(session.turn(), Black);
        // black bishop takes the knight sitting on c3
        let snapshot = play(&mut session, A1, C3);
        assert_eq!(snapshot.half_move_clock, 0);
        assert_eq!(snapshot.last_move.unwrap().captured.unwrap().material(), Material::WN);
        let reply = [(H1, H2), (G8, F6), (H2, H1), (F6, G8)];
        for ply in 0..99 {
            let (from, to) = reply[ply % 4];
            assert_eq!(play(&mut session, from, to).status, Status::Playing);
        }
        let snapshot = play(&mut session, reply[99 % 4].0, reply[99 % 4].1);
        assert_eq!(snapshot.half_move_clock, 100);
        assert_eq!(snapshot.status, Status::Draw);
    }
    #[test]
    fn test_configured_draw_threshold() {
        let config = SessionConfig {
            draw_half_moves: 4,
            ..SessionConfig::default()
        };
        let mut session = Session::with_config(config);
        session.set_occupancy(2);
        for (from, to) in [(G1, F3), (G8, F6), (F3, G1)] {
            assert_eq!(play(&mut session, from, to).status, Status::Playing);
        }
        assert_eq!(play(&mut session, F6, G8).status, Status::Draw);
    }
    #[test]
    fn test_stalemate() {
        let position = Position::empty()
            .with(A8, Material::BK)
            .with(B6, Material::WK)
            .with(C5, Material::WQ);
        let mut session = started_from(position);
        let snapshot = play(&mut session, C5, C7);
        assert_eq!(snapshot.status, Status::Stalemate);
        assert_eq!(snapshot.winner, None);
        assert_eq!(session.result(), Some(GameResult::Draw(DrawReason::StaleMate)));
    }
    #[test]
    fn test_promotion_defaults_and_requested() {
        let position = Position::empty()
            .with(E1, Material::WK)
            .with(H8, Material::BK)
            .with(A7, Material::WP)
            .with(B2, Material::BP);
        let mut session = started_from(position);
        let pawn_id = session.position()[A7].unwrap().id();
        let snapshot = play(&mut session, A7, A8);
        let last = snapshot.last_move.unwrap();
        assert_eq!(last.promotion, Some(Promotion::Queen));
        assert_eq!(last.piece.material(), Material::WQ);
        assert_ne!(last.piece.id(), pawn_id);
        // the new queen checks along the back rank
        assert_eq!(snapshot.status, Status::Check);

        let req = request(&session, H8, H7);
        session.apply_move(&req).unwrap();
        let req = request(&session, E1, E2);
        session.apply_move(&req).unwrap();
        let req = request(&session, B2, B1).promoting(Promotion::Knight);
        let snapshot = session.apply_move(&req).unwrap();
        assert_eq!(session.position()[B1].unwrap().material(), Material::BN);
        assert_eq!(snapshot.last_move.unwrap().promotion, Some(Promotion::Knight));
    }
    #[test]
    fn test_promotion_request_on_ordinary_move_is_illegal() {
        let mut session = started();
        let req = request(&session, E2, E4).promoting(Promotion::Queen);
        assert!(matches!(session.apply_move(&req), Err(IllegalMove { .. })));
    }
    #[test]
    fn test_configured_default_promotion() {
        let position = Position::empty()
            .with(E1, Material::WK)
            .with(H1, Material::BK)
            .with(C7, Material::WP);
        let config = SessionConfig {
            default_promotion: Promotion::Rook,
            ..SessionConfig::default()
        };
        let mut session = Session::from_position(position, config).unwrap();
        session.set_occupancy(2);
        play(&mut session, C7, C8);
        assert_eq!(session.position()[C8].unwrap().material(), Material::WR);
    }
    #[test]
    fn test_request_promotion() {
        // white pawn left on the eighth rank with black to move
        let position = Position::empty()
            .with(E1, Material::WK)
            .with(H6, Material::BK)
            .with(A8, Material::WP)
            .with(B3, Material::WP)
            .with_turn(Black);
        let mut session = started_from(position);
        assert_eq!(
            session.request_promotion(B3, Promotion::Queen),
            Err(NothingToPromote(B3))
        );
        assert_eq!(
            session.request_promotion(H6, Promotion::Queen),
            Err(NothingToPromote(H6))
        );
        let old_id = session.position()[A8].unwrap().id();
        let snapshot = session.request_promotion(A8, Promotion::Rook).unwrap();
        let rook = session.position()[A8].unwrap();
        assert_eq!(rook.material(), Material::WR);
        assert_ne!(rook.id(), old_id);
        assert_eq!(snapshot.status, Status::Playing);
        assert_eq!(
            session.request_promotion(A8, Promotion::Queen),
            Err(NothingToPromote(A8))
        );
    }
    #[test]
    fn test_moves_wait_for_pending_promotion() {
        let position = Position::empty()
            .with(E1, Material::WK)
            .with(H6, Material::BK)
            .with(A8, Material::WP)
            .with_turn(Black);
        let mut session = started_from(position);
        assert_eq!(session.pending_promotion(), Some(A8));
        let req = request(&session, H6, H5);
        assert_eq!(session.apply_move(&req), Err(PromotionPending(A8)));
        assert!(session.legal_destinations(H6).is_empty());
        assert_eq!(session.turn(), Black);
        assert!(session.position()[H5].is_none());

        let snapshot = session.request_promotion(A8, Promotion::Queen).unwrap();
        assert_eq!(snapshot.turn, Black);
        assert_eq!(session.pending_promotion(), None);
        assert_eq!(session.position()[A8].unwrap().material(), Material::WQ);
        let snapshot = session.apply_move(&req).unwrap();
        assert_eq!(snapshot.turn, White);
    }
    #[test]
    fn test_destinations_only_for_side_to_move() {
        let session = started();
        assert_eq!(session.legal_destinations(G1), Mask::from_squares([F3, H3]));
        assert!(session.legal_destinations(G8).is_empty());
        assert!(session.legal_destinations(E4).is_empty());
        assert!(Session::new().legal_destinations(G1).is_empty());
    }
    #[test]
    fn test_setup_validation() {
        let no_black_king = Position::empty().with(E1, Material::WK);
        assert_eq!(
            Session::from_position(no_black_king, SessionConfig::default()).unwrap_err(),
            SetupError::KingCount(Black, 0)
        );
        let capturable = Position::empty()
            .with(E1, Material::WK)
            .with(E8, Material::BK)
            .with(E4, Material::WR);
        assert_eq!(
            Session::from_position(capturable, SessionConfig::default()).unwrap_err(),
            SetupError::KingCapturable(Black)
        );
        let stranded = Position::empty()
            .with(E1, Material::WK)
            .with(E8, Material::BK)
            .with(A1, Material::WP);
        assert_eq!(
            Session::from_position(stranded, SessionConfig::default()).unwrap_err(),
            SetupError::PawnOnBackRank(White, A1)
        );
    }
    #[test]
    fn test_snapshot_serializes() {
        let mut session = started();
        let snapshot = play(&mut session, E2, E4);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["status"], "Playing");
        assert_eq!(json["turn"], "Black");
        assert_eq!(json["en_passant"], "E3");
        assert_eq!(json["pieces"].as_array().unwrap().len(), 32);
    }
}
