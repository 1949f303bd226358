/*
 * Caissa, a chess problem solver
 * Copyright (C) 2026 The Caissa Authors
 *
 * Caissa is free software: you can redistribute it and/or modify it under the
 * terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or (at your option) any later
 * version.
 *
 * Caissa is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along with
 * Caissa. If not, see <https://www.gnu.org/licenses/>.
 */

//! The move-construction policy ("fairy condition") consulted by piece
//! movement rules at every point a move is about to be emitted.
//!
//! Every `generate_*` method here that returns `bool` returns `true` unless
//! the square being acted on holds the opponent's royal piece, in which case
//! it returns `false` and emits nothing: that's the sole signal
//! [`crate::position`] relies on to detect check, so it's independent of
//! whatever a condition-specific rule (Circe rebirth, AntiCirce legality,
//! ...) decides about whether an otherwise-ordinary capture gets generated
//! at all.

use crate::{
    board::Board,
    mv::{Arrival, Effect, Move, RebirthSubject},
    piece::Piece,
    promotion::PromotionBox,
    square::Square,
};

/// Where generated moves are appended. Implemented for `Vec<Move>`; kept as
/// a trait so a future caller (e.g. a check-only probe) can swap in a sink
/// that short-circuits after the first move.
pub trait MoveSink {
    fn record(&mut self, mv: Move);
}

impl MoveSink for Vec<Move> {
    fn record(&mut self, mv: Move) {
        self.push(mv);
    }
}

/// How captures are constructed. Orthogonal to whether non-captures flip
/// the mover's colour ([`Factory::andernach`]/[`Factory::anti_andernach`]).
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
enum CaptureRule {
    Default,
    NoCapture,
    Circe,
    AntiCirce { calvet: bool },
}

/// The fairy condition(s) a [`crate::position::Position`] was set up with.
///
/// The five named compositions pair a capture rule with one of the two
/// colour-flip conditions; every other combination the two axes could in
/// principle produce (e.g. plain `Andernach` with no Circe/AntiCirce
/// capture rule) is also a variant here, since nothing about the rules
/// actually requires the two axes to be mutually exclusive.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[allow(clippy::exhaustive_enums)]
pub enum Factory {
    Default,
    NoCapture,
    Circe,
    AntiCirce { calvet: bool },
    Andernach,
    AntiAndernach,
    CirceAndernach,
    AntiCirceAndernach { calvet: bool },
    NoCaptureAntiAndernach,
    CirceAntiAndernach,
    AntiCirceAntiAndernach { calvet: bool },
}

impl Factory {
    fn capture_rule(self) -> CaptureRule {
        match self {
            Self::Default | Self::Andernach | Self::AntiAndernach => CaptureRule::Default,
            Self::NoCapture | Self::NoCaptureAntiAndernach => CaptureRule::NoCapture,
            Self::Circe | Self::CirceAndernach | Self::CirceAntiAndernach => CaptureRule::Circe,
            Self::AntiCirce { calvet }
            | Self::AntiCirceAndernach { calvet }
            | Self::AntiCirceAntiAndernach { calvet } => CaptureRule::AntiCirce { calvet },
        }
    }

    /// Whether a non-royal capturer flips colour on arrival.
    const fn andernach(self) -> bool {
        matches!(
            self,
            Self::Andernach | Self::CirceAndernach | Self::AntiCirceAndernach { .. }
        )
    }

    /// Whether a non-royal mover flips colour on any non-capturing move.
    const fn anti_andernach(self) -> bool {
        matches!(
            self,
            Self::AntiAndernach
                | Self::NoCaptureAntiAndernach
                | Self::CirceAntiAndernach
                | Self::AntiCirceAntiAndernach { .. }
        )
    }

    /// Whether `piece`, sitting on `square` (after whatever this move just
    /// did to it), is still/now eligible to castle: inherently eligible by
    /// kind, and `square` is genuinely its own game-array square for its
    /// current colour. True by construction for a Circe/AntiCirce rebirth
    /// (rebirth squares are always computed from the very rule this asks
    /// about); meaningful and usually false for an Andernach/AntiAndernach
    /// flip, where the piece stays wherever the move happened to land.
    fn castling_eligible_at(piece: Piece, square: Square) -> bool {
        piece.is_castling_eligible() && piece.rebirth_square(square) == square
    }

    /// The effect (if any) a quiet, double-step or promotion move built
    /// under this factory carries: the Andernach family only ever touches
    /// captures, so the only thing a non-capturing move can pick up here is
    /// an AntiAndernach flip.
    fn non_capture_effect(self, mover: Piece, target: Square) -> Effect {
        if self.anti_andernach() && !mover.is_royal() {
            let mut flipped = mover;
            flipped.black = !flipped.black;
            Effect {
                rebirth: None,
                flip: true,
                flip_castling_eligible: Self::castling_eligible_at(flipped, target),
            }
        } else {
            Effect::NONE
        }
    }

    /// The effect of a plain (non-Circe/AntiCirce) capture: an Andernach
    /// flip of the non-royal capturer, which lands as usual on `target`.
    fn andernach_flip(self, capturer: Piece, target: Square) -> Effect {
        if self.andernach() && !capturer.is_royal() {
            let mut flipped = capturer;
            flipped.black = !flipped.black;
            Effect {
                rebirth: None,
                flip: true,
                flip_castling_eligible: Self::castling_eligible_at(flipped, target),
            }
        } else {
            Effect::NONE
        }
    }

    /// Circe: the captured piece is reborn on its own rebirth square,
    /// computed from the square it was captured on, provided that square is
    /// empty or is the capturer's own (about-to-be-vacated) origin.
    /// Otherwise the capture is plain.
    fn circe_effect(self, board: &Board, captured: Piece, origin: Square, target: Square) -> Effect {
        let rebirth_square = captured.rebirth_square(target);
        let reborn_ok = rebirth_square == origin || board.at(rebirth_square).is_none();
        if reborn_ok {
            let andernach_flip = self.andernach() && !captured.is_royal();
            Effect {
                rebirth: Some(Arrival {
                    subject: RebirthSubject::Captured,
                    square: rebirth_square,
                    castling_eligible: Self::castling_eligible_at(captured, rebirth_square),
                }),
                flip: andernach_flip,
                flip_castling_eligible: false,
            }
        } else {
            Effect::NONE
        }
    }

    /// AntiCirce: the capturing piece's own rebirth square, computed from
    /// where the capture happened. Legal iff that square is empty, is the
    /// capturer's own origin, or (Calvet only) is the capture square
    /// itself (by the time the capturer would land there, the captured
    /// piece has already been removed).
    fn anti_circe_effect(
        self,
        board: &Board,
        capturer: Piece,
        origin: Square,
        target: Square,
        calvet: bool,
    ) -> Option<Effect> {
        let rebirth_square = capturer.rebirth_square(target);
        let allowed = rebirth_square == origin
            || board.at(rebirth_square).is_none()
            || (calvet && rebirth_square == target);
        if !allowed {
            return None;
        }
        let andernach_flip = self.andernach() && !capturer.is_royal();
        Some(Effect {
            rebirth: Some(Arrival {
                subject: RebirthSubject::Capturer,
                square: rebirth_square,
                castling_eligible: Self::castling_eligible_at(capturer, rebirth_square),
            }),
            flip: andernach_flip,
            flip_castling_eligible: false,
        })
    }

    /// Builds a [`Move::Quiet`] from `origin` to `target`.
    pub fn generate_quiet_move(
        self,
        board: &Board,
        origin: Square,
        target: Square,
        sink: &mut impl MoveSink,
    ) {
        let mover = board.at(origin).expect("quiet move with no mover");
        let effect = self.non_capture_effect(mover, target);
        sink.record(Move::Quiet { origin, target, effect });
    }

    /// Builds a [`Move::DoubleStep`] from `origin` to `target`, passing
    /// through `stop`.
    pub fn generate_double_step(
        self,
        board: &Board,
        origin: Square,
        target: Square,
        stop: Square,
        sink: &mut impl MoveSink,
    ) {
        let mover = board.at(origin).expect("double step with no mover");
        let effect = self.non_capture_effect(mover, target);
        sink.record(Move::DoubleStep { origin, target, stop, effect });
    }

    /// Builds a [`Move::Capture`] (or, under Circe/AntiCirce, its
    /// rebirth-carrying form) of the piece on `target`. Returns `false`
    /// without emitting anything if `target` holds a royal piece.
    pub fn generate_capture(
        self,
        board: &Board,
        origin: Square,
        target: Square,
        sink: &mut impl MoveSink,
    ) -> bool {
        let captured = board.at(target).expect("capture onto an empty square");
        if captured.is_royal() {
            return false;
        }
        let capturer = board.at(origin).expect("capture with no capturer");
        match self.capture_rule() {
            CaptureRule::NoCapture => {}
            CaptureRule::Default => {
                sink.record(Move::Capture {
                    origin,
                    target,
                    effect: self.andernach_flip(capturer, target),
                });
            }
            CaptureRule::Circe => {
                let effect = self.circe_effect(board, captured, origin, target);
                sink.record(Move::Capture { origin, target, effect });
            }
            CaptureRule::AntiCirce { calvet } => {
                if let Some(effect) = self.anti_circe_effect(board, capturer, origin, target, calvet) {
                    sink.record(Move::Capture { origin, target, effect });
                }
            }
        }
        true
    }

    /// Builds a [`Move::EnPassant`] capturing the pawn on `stop`, from
    /// `origin` to `target`. Returns `false` (emitting nothing) if `stop`
    /// somehow holds a royal piece (unreachable for a real pawn, kept for
    /// symmetry with [`Self::generate_capture`]).
    pub fn generate_en_passant(
        self,
        board: &Board,
        origin: Square,
        target: Square,
        stop: Square,
        sink: &mut impl MoveSink,
    ) -> bool {
        let captured = board.at(stop).expect("en passant with no captured pawn");
        if captured.is_royal() {
            return false;
        }
        let capturer = board.at(origin).expect("en passant with no capturer");
        match self.capture_rule() {
            CaptureRule::NoCapture => {}
            CaptureRule::Default => {
                sink.record(Move::EnPassant {
                    origin,
                    target,
                    stop,
                    effect: self.andernach_flip(capturer, target),
                });
            }
            CaptureRule::Circe => {
                // Circe rebirth is computed from the square the capture
                // happened on, which for en passant is `stop`, not `target`.
                let rebirth_square = captured.rebirth_square(stop);
                let reborn_ok = rebirth_square == origin || board.at(rebirth_square).is_none();
                let effect = if reborn_ok {
                    Effect {
                        rebirth: Some(Arrival {
                            subject: RebirthSubject::Captured,
                            square: rebirth_square,
                            castling_eligible: Self::castling_eligible_at(captured, rebirth_square),
                        }),
                        flip: self.andernach() && !captured.is_royal(),
                        flip_castling_eligible: false,
                    }
                } else {
                    Effect::NONE
                };
                sink.record(Move::EnPassant { origin, target, stop, effect });
            }
            CaptureRule::AntiCirce { calvet } => {
                let rebirth_square = capturer.rebirth_square(stop);
                let allowed = rebirth_square == origin
                    || board.at(rebirth_square).is_none()
                    || (calvet && rebirth_square == target);
                if allowed {
                    let effect = Effect {
                        rebirth: Some(Arrival {
                            subject: RebirthSubject::Capturer,
                            square: rebirth_square,
                            castling_eligible: Self::castling_eligible_at(capturer, rebirth_square),
                        }),
                        flip: self.andernach() && !capturer.is_royal(),
                        flip_castling_eligible: false,
                    };
                    sink.record(Move::EnPassant { origin, target, stop, effect });
                }
            }
        }
        true
    }

    /// Builds every [`Move::Promotion`] a pawn reaching `target` can make,
    /// one per order still stocked in `box_` for `black`.
    pub fn generate_promotion(
        self,
        board: &Board,
        box_: &PromotionBox,
        origin: Square,
        target: Square,
        black: bool,
        sink: &mut impl MoveSink,
    ) {
        let mover = board.at(origin).expect("promotion with no pawn");
        for order in box_.orders(black) {
            if box_.peek_front(black, order).is_none() {
                continue;
            }
            let effect = self.non_capture_effect(mover, target);
            sink.record(Move::Promotion { origin, target, black, order, effect });
        }
    }

    /// Builds every [`Move::PromotionCapture`] a pawn reaching `target` (and
    /// capturing whatever is there) can make. Returns `false` without
    /// emitting anything if `target` holds a royal piece.
    pub fn generate_promotion_capture(
        self,
        board: &Board,
        box_: &PromotionBox,
        origin: Square,
        target: Square,
        black: bool,
        sink: &mut impl MoveSink,
    ) -> bool {
        let captured = board.at(target).expect("promotion capture onto an empty square");
        if captured.is_royal() {
            return false;
        }
        let capturer = board.at(origin).expect("promotion capture with no pawn");
        for order in box_.orders(black) {
            if box_.peek_front(black, order).is_none() {
                continue;
            }
            match self.capture_rule() {
                CaptureRule::NoCapture => {}
                CaptureRule::Default => {
                    sink.record(Move::PromotionCapture {
                        origin,
                        target,
                        black,
                        order,
                        effect: self.andernach_flip(capturer, target),
                    });
                }
                CaptureRule::Circe => {
                    let effect = self.circe_effect(board, captured, origin, target);
                    sink.record(Move::PromotionCapture { origin, target, black, order, effect });
                }
                CaptureRule::AntiCirce { calvet } => {
                    if let Some(effect) =
                        self.anti_circe_effect(board, capturer, origin, target, calvet)
                    {
                        sink.record(Move::PromotionCapture { origin, target, black, order, effect });
                    }
                }
            }
        }
        true
    }

    /// Builds a [`Move::LongCastling`] / [`Move::ShortCastling`]. Castling
    /// itself is never fairy-conditioned: no factory variant changes it.
    pub fn generate_long_castling(
        self,
        origin: Square,
        target: Square,
        origin2: Square,
        target2: Square,
        sink: &mut impl MoveSink,
    ) {
        sink.record(Move::LongCastling { origin, target, origin2, target2 });
    }

    /// See [`Self::generate_long_castling`].
    pub fn generate_short_castling(
        self,
        origin: Square,
        target: Square,
        origin2: Square,
        target2: Square,
        sink: &mut impl MoveSink,
    ) {
        sink.record(Move::ShortCastling { origin, target, origin2, target2 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        piece::PieceKind,
        square::{File, Rank},
    };

    fn board_with(pieces: &[(Square, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(sq, p) in pieces {
            board.set(sq, Some(p));
        }
        board
    }

    #[test]
    fn default_factory_generates_a_plain_capture() {
        let d4 = Square::from_file_rank(File::D, Rank::R4);
        let e5 = Square::from_file_rank(File::E, Rank::R5);
        let board = board_with(&[
            (d4, Piece::new(PieceKind::Bishop, false)),
            (e5, Piece::new(PieceKind::Pawn, true)),
        ]);
        let mut moves = Vec::new();
        let legal = Factory::Default.generate_capture(&board, d4, e5, &mut moves);
        assert!(legal);
        assert_eq!(moves.len(), 1);
        assert!(matches!(moves[0], Move::Capture { effect: Effect { rebirth: None, flip: false, .. }, .. }));
    }

    #[test]
    fn capturing_a_king_reports_illegal_and_generates_nothing() {
        let d4 = Square::from_file_rank(File::D, Rank::R4);
        let e5 = Square::from_file_rank(File::E, Rank::R5);
        let board = board_with(&[
            (d4, Piece::new(PieceKind::Rook, false)),
            (e5, Piece::new(PieceKind::King, true)),
        ]);
        let mut moves = Vec::new();
        let legal = Factory::Default.generate_capture(&board, d4, e5, &mut moves);
        assert!(!legal);
        assert!(moves.is_empty());
    }

    #[test]
    fn no_capture_factory_still_flags_a_royal_attack_but_emits_nothing_else() {
        let d4 = Square::from_file_rank(File::D, Rank::R4);
        let e5 = Square::from_file_rank(File::E, Rank::R5);
        let a1 = Square::from_file_rank(File::A, Rank::R1);
        let board = board_with(&[
            (d4, Piece::new(PieceKind::Rook, false)),
            (e5, Piece::new(PieceKind::Pawn, true)),
            (a1, Piece::new(PieceKind::King, true)),
        ]);
        let mut moves = Vec::new();
        assert!(Factory::NoCapture.generate_capture(&board, d4, e5, &mut moves));
        assert!(moves.is_empty());
    }

    #[test]
    fn circe_rebirths_a_captured_rook_on_its_home_corner() {
        // White rook on a1 captures a black rook sitting on h1; a black
        // rook's rebirth square is keyed off the colour of the capture
        // square among {a8, h8}, and h1 is the same colour as a8, which is
        // empty, so it's reborn there.
        let a1 = Square::from_file_rank(File::A, Rank::R1);
        let h1 = Square::from_file_rank(File::H, Rank::R1);
        let a8 = Square::from_file_rank(File::A, Rank::R8);
        let board = board_with(&[
            (a1, Piece::new(PieceKind::Rook, false)),
            (h1, Piece::new(PieceKind::Rook, true)),
        ]);
        let mut moves = Vec::new();
        assert!(Factory::Circe.generate_capture(&board, a1, h1, &mut moves));
        assert_eq!(moves.len(), 1);
        match moves[0] {
            Move::Capture {
                effect: Effect { rebirth: Some(arrival), .. },
                ..
            } => {
                assert_eq!(arrival.square, a8);
                assert!(arrival.castling_eligible);
            }
            other => panic!("expected a rebirth-carrying capture, got {other:?}"),
        }
    }

    #[test]
    fn circe_rebirth_blocked_by_an_occupied_square_falls_back_to_a_plain_capture() {
        // White rook on a1 captures a black rook on h1; the rebirth square
        // (a8, same colour as h1) is occupied by a white pawn, so rebirth is
        // denied and this is a plain capture.
        let a1 = Square::from_file_rank(File::A, Rank::R1);
        let h1 = Square::from_file_rank(File::H, Rank::R1);
        let a8 = Square::from_file_rank(File::A, Rank::R8);
        let board = board_with(&[
            (a1, Piece::new(PieceKind::Rook, false)),
            (h1, Piece::new(PieceKind::Rook, true)),
            (a8, Piece::new(PieceKind::Pawn, false)),
        ]);
        let mut moves = Vec::new();
        assert!(Factory::Circe.generate_capture(&board, a1, h1, &mut moves));
        assert!(matches!(moves[0], Move::Capture { effect: Effect { rebirth: None, .. }, .. }));
    }

    #[test]
    fn anti_circe_allows_a_capture_whose_rebirth_square_is_empty() {
        // White rook from a1 captures on a8; its rebirth square (computed
        // from a8, the capture square) is h1, which is empty, so this is
        // allowed.
        let a1 = Square::from_file_rank(File::A, Rank::R1);
        let a8 = Square::from_file_rank(File::A, Rank::R8);
        let board = board_with(&[
            (a1, Piece::new(PieceKind::Rook, false)),
            (a8, Piece::new(PieceKind::Rook, true)),
        ]);
        let mut moves = Vec::new();
        assert!(Factory::AntiCirce { calvet: true }.generate_capture(&board, a1, a8, &mut moves));
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn anti_andernach_flips_a_quiet_movers_colour() {
        let e2 = Square::from_file_rank(File::E, Rank::R2);
        let e3 = Square::from_file_rank(File::E, Rank::R3);
        let board = board_with(&[(e2, Piece::new(PieceKind::Pawn, false))]);
        let mut moves = Vec::new();
        Factory::AntiAndernach.generate_quiet_move(&board, e2, e3, &mut moves);
        match moves[0] {
            Move::Quiet { effect: Effect { flip: true, .. }, .. } => {}
            other => panic!("expected a flipping quiet move, got {other:?}"),
        }
    }
}
